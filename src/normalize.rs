use regex::{NoExpand, Regex};

const DEGREE: &str = "$\\degree$";
const EDITORIAL_MARKER: &str = "Editor’s note: ";

/// Fraction token rendering numerator-over-denominator in the typeset output.
fn frac(numerator: u32, denominator: u32) -> String {
    format!("$\\frac{{{numerator}}}{{{denominator}}}$")
}

/// Turns scraped recipe text into typeset-safe text.
///
/// The rule table is order-sensitive: glyphs and spelled-out fraction forms
/// run before shorter overlapping patterns, and every output token is chosen
/// so it never re-matches an input pattern. Running the pipeline twice yields
/// the same result as running it once.
pub struct Normalizer {
    collapse: Regex,
    fractions: Vec<(Regex, String)>,
}

impl Normalizer {
    pub fn new() -> Self {
        // Spelled forms accept an optional space before the slash ("1 /4"),
        // matching how the source sites break quantities across inline tags.
        let table: &[(&str, u32, u32)] = &[
            ("¼", 1, 4),
            ("1 ?/4", 1, 4),
            ("⅓", 1, 3),
            ("1 ?/3", 1, 3),
            ("½", 1, 2),
            ("1 ?/2", 1, 2),
            ("⅔", 2, 3),
            ("²⁄₃", 2, 3),
            ("2 ?/3", 2, 3),
            ("¾", 3, 4),
            ("3 ?/4", 3, 4),
            ("⅛", 1, 8),
            ("1 ?/8", 1, 8),
            ("⅜", 3, 8),
            ("3 ?/8", 3, 8),
            ("⅝", 5, 8),
            ("5 ?/8", 5, 8),
        ];

        let fractions = table
            .iter()
            .map(|(pattern, n, d)| (Regex::new(pattern).unwrap(), frac(*n, *d)))
            .collect();

        Normalizer {
            collapse: Regex::new(" {2,}").unwrap(),
            fractions,
        }
    }

    pub fn normalize(&self, text: &str) -> String {
        let mut text = text.replace('\n', " ").replace('\u{a0}', "");

        // Everything after the editorial aside is site commentary, not recipe.
        if let Some(idx) = text.find(EDITORIAL_MARKER) {
            text.truncate(idx);
        }

        let mut text = self
            .collapse
            .replace_all(text.trim(), " ")
            .into_owned();

        for (pattern, token) in &self.fractions {
            text = pattern.replace_all(&text, NoExpand(token)).into_owned();
        }

        let text = text.replace('˚', DEGREE).replace('°', DEGREE);
        let text = escape_specials(&text);
        text.replace('ồ', "o")
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Normalizer::new()
    }
}

/// Escapes `#` and `&` for the typeset output, leaving already escaped
/// occurrences alone so the transform stays idempotent.
fn escape_specials(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut escaped = false;
    for c in text.chars() {
        if (c == '#' || c == '&') && !escaped {
            out.push('\\');
        }
        escaped = c == '\\';
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glyph_and_spelled_fractions_normalize_identically() {
        let n = Normalizer::new();
        let from_glyph = n.normalize("½ cup sugar");
        let from_spelled = n.normalize("1/2 cup sugar");
        assert_eq!(from_glyph, from_spelled);
        assert!(from_glyph.contains("$\\frac{1}{2}$"));
    }

    #[test]
    fn spelled_fraction_with_space_before_slash() {
        let n = Normalizer::new();
        assert_eq!(n.normalize("2 /3 cup"), "$\\frac{2}{3}$ cup");
    }

    #[test]
    fn compound_two_thirds_glyph() {
        let n = Normalizer::new();
        assert_eq!(n.normalize("²⁄₃ cup flour"), "$\\frac{2}{3}$ cup flour");
    }

    #[test]
    fn degree_glyphs_become_degree_token() {
        let n = Normalizer::new();
        assert_eq!(n.normalize("bake at 350° for 1 hour"), "bake at 350$\\degree$ for 1 hour");
        assert_eq!(n.normalize("350˚F"), "350$\\degree$F");
    }

    #[test]
    fn hash_and_ampersand_are_escaped_once() {
        let n = Normalizer::new();
        assert_eq!(n.normalize("salt & pepper"), "salt \\& pepper");
        assert_eq!(n.normalize("item #2"), "item \\#2");
        assert_eq!(n.normalize("salt \\& pepper"), "salt \\& pepper");
    }

    #[test]
    fn whitespace_and_nbsp_are_cleaned() {
        let n = Normalizer::new();
        assert_eq!(n.normalize("  1 cup\n\u{a0}of   milk  "), "1 cup of milk");
    }

    #[test]
    fn editorial_aside_is_dropped() {
        let n = Normalizer::new();
        assert_eq!(
            n.normalize("Serve warm. Editor’s note: this ran in 2019."),
            "Serve warm."
        );
    }

    #[test]
    fn misencoded_vowel_is_corrected() {
        let n = Normalizer::new();
        assert_eq!(n.normalize("bành mồ"), "bành mo");
    }

    #[test]
    fn normalize_is_idempotent() {
        let n = Normalizer::new();
        for s in [
            "½ cup sugar & 1/4 tsp salt at 350° #1",
            "Do ahead: chill ⅔ of the dough",
            "already $\\frac{1}{2}$ \\& \\# done",
            "  messy \n\u{a0} input ²⁄₃ ",
        ] {
            let once = n.normalize(s);
            assert_eq!(n.normalize(&once), once, "not idempotent for {s:?}");
        }
    }
}
