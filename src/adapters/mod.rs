use scraper::{ElementRef, Html, Selector};

use crate::error::ImportError;
use crate::model::RawFields;

mod bon_appetit;
mod manual;
mod nyt_cooking;
mod serious_eats;

pub use self::bon_appetit::BonAppetitAdapter;
pub use self::manual::{FieldSupply, ManualAdapter, StdinFieldSupply};
pub use self::nyt_cooking::NytCookingAdapter;
pub use self::serious_eats::SeriousEatsAdapter;

/// Extracts the raw field bundle from one parsed document.
///
/// One implementation per site; manual entry has its own capability since it
/// consumes a [`FieldSupply`] instead of a document.
pub trait SourceAdapter {
    fn extract(&self, document: &Html) -> Result<RawFields, ImportError>;
}

pub(crate) fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap()
}

/// Concatenated text of an element and all its descendants.
pub(crate) fn text_of(element: ElementRef) -> String {
    element.text().collect()
}

/// Text of the element's first child, when that child is a bare text node.
/// Site markup puts amount strings and step numbers there, ahead of any
/// nested tags.
pub(crate) fn leading_text(element: ElementRef) -> Option<String> {
    element
        .children()
        .next()
        .and_then(|node| node.value().as_text().map(|text| text.to_string()))
}

pub(crate) fn page_title(document: &Html) -> Option<String> {
    document
        .select(&selector("title"))
        .next()
        .map(text_of)
        .filter(|title| !title.is_empty())
}

pub(crate) fn parent_element(element: ElementRef) -> Option<ElementRef> {
    element.parent().and_then(ElementRef::wrap)
}

pub(crate) fn missing_section(source_name: &str, section: &str) -> ImportError {
    ImportError::MissingSection {
        source_name: source_name.to_string(),
        section: section.to_string(),
    }
}
