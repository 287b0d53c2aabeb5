use launch_core::{LaunchContext, LaunchError};

use crate::substitution::Substitution;

/// Literal text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSubstitution {
    text: String,
}

impl TextSubstitution {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Substitution for TextSubstitution {
    fn perform(&self, _context: &LaunchContext) -> Result<String, LaunchError> {
        Ok(self.text.clone())
    }

    fn describe(&self) -> String {
        format!("'{}'", self.text)
    }
}
