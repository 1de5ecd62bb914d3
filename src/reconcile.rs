use log::debug;
use regex::Regex;

use crate::error::ImportError;

const DO_AHEAD_LABEL: &str = "Do ahead";

/// Restores the one-to-one correspondence between step labels and
/// instruction paragraphs when a "Do ahead: " marker is embedded in the
/// instruction text.
///
/// Two shapes occur in the wild:
/// - label and instruction counts already match, and the marker either opens
///   an instruction (relabel that position) or trails normal text inside one
///   (split the instruction in two and insert a "Do ahead" label after it);
/// - the site omitted the heading for the do-ahead paragraph, leaving one
///   fewer label than instructions, and each prefix marker gets a fresh
///   "Do ahead" label inserted at its position.
///
/// Built as a single forward pass over fresh output vectors, never by
/// splicing the inputs mid-iteration. At most one mid-string split is
/// supported per run; a second marker is an unsupported-input failure, as is
/// any count discrepancy the markers cannot explain.
pub fn reconcile_do_ahead(
    source_name: &str,
    labels: Vec<String>,
    instructions: Vec<String>,
) -> Result<(Vec<String>, Vec<String>), ImportError> {
    let marker = Regex::new("(?i)Do ahead: ").unwrap();
    let (label_count, instruction_count) = (labels.len(), instructions.len());

    let mut out_labels = Vec::with_capacity(instruction_count + 1);
    let mut out_instructions = Vec::with_capacity(instruction_count + 1);

    if label_count == instruction_count {
        let mut split_seen = false;
        for (label, instruction) in labels.into_iter().zip(instructions) {
            let found = marker.find(&instruction).map(|m| (m.start(), m.end()));
            match found {
                Some((0, end)) => {
                    out_labels.push(DO_AHEAD_LABEL.to_string());
                    out_instructions.push(instruction[end..].to_string());
                }
                Some((start, end)) => {
                    if split_seen {
                        return Err(ImportError::AmbiguousDoAhead {
                            source_name: source_name.to_string(),
                        });
                    }
                    split_seen = true;
                    debug!("splitting embedded do-ahead out of \"{label}\"");
                    out_labels.push(label);
                    out_instructions.push(instruction[..start].trim_end().to_string());
                    out_labels.push(DO_AHEAD_LABEL.to_string());
                    out_instructions.push(instruction[end..].to_string());
                }
                None => {
                    out_labels.push(label);
                    out_instructions.push(instruction);
                }
            }
        }
    } else if label_count < instruction_count {
        // The site dropped the do-ahead heading: prefix markers claim their
        // own label instead of consuming a site-provided one.
        let mut label_iter = labels.into_iter();
        for instruction in instructions {
            let prefix_end = marker
                .find(&instruction)
                .filter(|m| m.start() == 0)
                .map(|m| m.end());
            match prefix_end {
                Some(end) => {
                    out_labels.push(DO_AHEAD_LABEL.to_string());
                    out_instructions.push(instruction[end..].to_string());
                }
                None => {
                    let label =
                        label_iter.next().ok_or_else(|| ImportError::CountMismatch {
                            source_name: source_name.to_string(),
                            labels: label_count,
                            instructions: instruction_count,
                        })?;
                    out_labels.push(label);
                    out_instructions.push(instruction);
                }
            }
        }
        if label_iter.next().is_some() || out_labels.len() != out_instructions.len() {
            return Err(ImportError::CountMismatch {
                source_name: source_name.to_string(),
                labels: label_count,
                instructions: instruction_count,
            });
        }
    } else {
        return Err(ImportError::CountMismatch {
            source_name: source_name.to_string(),
            labels: label_count,
            instructions: instruction_count,
        });
    }

    Ok((out_labels, out_instructions))
}
