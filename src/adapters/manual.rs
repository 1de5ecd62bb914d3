use std::io::{self, Write};

use crate::error::ImportError;
use crate::model::RawFields;

/// Supplies field values for manual recipe entry, decoupling the adapter
/// from any particular prompting mechanism.
pub trait FieldSupply {
    /// One value for a named field; empty means the field is absent.
    fn value(&mut self, prompt: &str) -> String;
    /// An open-ended ordered list, collected until the supplier runs dry.
    fn values(&mut self, prompt: &str) -> Vec<String>;
    /// A yes/no answer.
    fn confirm(&mut self, prompt: &str) -> bool;
}

/// Builds a raw field bundle from supplied values instead of a document.
/// Labels are synthesized directly, so no normalization or reconciliation
/// runs; the step count is validated against the instruction list before
/// assembly.
pub struct ManualAdapter;

impl ManualAdapter {
    pub fn extract(&self, supply: &mut dyn FieldSupply) -> Result<RawFields, ImportError> {
        let mut fields = RawFields::default();

        fields.title = supply.value("title").trim().to_string();
        if fields.title.is_empty() {
            return Err(ImportError::InvalidField {
                field: "title".into(),
                reason: "must not be empty".into(),
            });
        }

        fields.active_time = non_empty(supply.value("active time"));
        fields.total_time = non_empty(supply.value("total time"));
        fields.servings = non_empty(supply.value("number of servings"));
        fields.ingredients = supply.values("ingredient");

        let step_count = supply.value("number of steps");
        let step_count: usize = step_count.trim().parse().map_err(|_| {
            ImportError::InvalidField {
                field: "number of steps".into(),
                reason: format!("{step_count:?} is not a whole number"),
            }
        })?;
        fields.steps = (1..=step_count).map(|i| format!("Step {i}")).collect();
        if supply.confirm("Do ahead instructions? (y/n)") {
            fields.steps.push("Do ahead".to_string());
        }

        fields.instructions = supply.values("instruction");
        if fields.instructions.len() != fields.steps.len() {
            return Err(ImportError::CountMismatch {
                source_name: "manual entry".into(),
                labels: fields.steps.len(),
                instructions: fields.instructions.len(),
            });
        }

        Ok(fields)
    }
}

fn non_empty(value: String) -> Option<String> {
    let value = value.trim().to_string();
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Interactive [`FieldSupply`] over stdin, used by the binary.
pub struct StdinFieldSupply;

impl StdinFieldSupply {
    fn read_line(&self, prompt: &str) -> String {
        print!("{prompt} ");
        let _ = io::stdout().flush();
        let mut line = String::new();
        let _ = io::stdin().read_line(&mut line);
        line.trim_end_matches(['\r', '\n']).to_string()
    }
}

impl FieldSupply for StdinFieldSupply {
    fn value(&mut self, prompt: &str) -> String {
        self.read_line(&format!("Enter {prompt}:"))
    }

    fn values(&mut self, prompt: &str) -> Vec<String> {
        let mut items = Vec::new();
        loop {
            items.push(self.read_line(&format!("Enter {prompt}:")));
            if !self.confirm(&format!("More {prompt}s? (y/n)")) {
                break;
            }
        }
        items
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        self.read_line(prompt) == "y"
    }
}
