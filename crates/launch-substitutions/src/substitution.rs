//! The substitution contract and token normalization.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use launch_core::{LaunchContext, LaunchError};

use crate::text::TextSubstitution;

/// A lazy value resolved to a string against a [`LaunchContext`].
///
/// Implementations must be pure: they may read the context but never
/// mutate shared state, and return the same value for the same snapshot.
pub trait Substitution: fmt::Debug + Send + Sync {
    fn perform(&self, context: &LaunchContext) -> Result<String, LaunchError>;

    fn describe(&self) -> String;
}

/// One input token: literal text or a nested substitution.
#[derive(Debug, Clone)]
pub enum SubstitutionToken {
    Text(String),
    Substitution(Arc<dyn Substitution>),
}

impl SubstitutionToken {
    pub fn substitution(substitution: impl Substitution + 'static) -> Self {
        Self::Substitution(Arc::new(substitution))
    }
}

impl From<&str> for SubstitutionToken {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for SubstitutionToken {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Arc<dyn Substitution>> for SubstitutionToken {
    fn from(substitution: Arc<dyn Substitution>) -> Self {
        Self::Substitution(substitution)
    }
}

/// Canonical ordered list of substitutions making up one compound value.
#[derive(Debug, Clone, Default)]
pub struct SubstitutionList(Vec<Arc<dyn Substitution>>);

impl SubstitutionList {
    /// Evaluate every element in order and concatenate the results.
    pub fn perform(&self, context: &LaunchContext) -> Result<String, LaunchError> {
        perform_substitutions(context, &self.0)
    }

    pub fn describe(&self) -> String {
        self.0
            .iter()
            .map(|s| s.describe())
            .collect::<Vec<_>>()
            .join(" + ")
    }
}

impl Deref for SubstitutionList {
    type Target = [Arc<dyn Substitution>];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<&str> for SubstitutionList {
    fn from(text: &str) -> Self {
        normalize_to_list_of_substitutions([text])
    }
}

impl From<String> for SubstitutionList {
    fn from(text: String) -> Self {
        normalize_to_list_of_substitutions([text])
    }
}

impl From<Vec<SubstitutionToken>> for SubstitutionList {
    fn from(tokens: Vec<SubstitutionToken>) -> Self {
        normalize_to_list_of_substitutions(tokens)
    }
}

/// Normalize literal text and substitutions into a [`SubstitutionList`].
///
/// Literal text becomes a [`TextSubstitution`]; order is preserved.
pub fn normalize_to_list_of_substitutions<I, T>(tokens: I) -> SubstitutionList
where
    I: IntoIterator<Item = T>,
    T: Into<SubstitutionToken>,
{
    SubstitutionList(
        tokens
            .into_iter()
            .map(|token| match token.into() {
                SubstitutionToken::Text(text) => {
                    Arc::new(TextSubstitution::new(text)) as Arc<dyn Substitution>
                }
                SubstitutionToken::Substitution(substitution) => substitution,
            })
            .collect(),
    )
}

/// Evaluate a compound substitution list against the context.
pub fn perform_substitutions(
    context: &LaunchContext,
    substitutions: &[Arc<dyn Substitution>],
) -> Result<String, LaunchError> {
    let mut result = String::new();
    for substitution in substitutions {
        result.push_str(&substitution.perform(context)?);
    }
    Ok(result)
}
