//! Substitution that reads an environment variable from the context.

use launch_core::{LaunchContext, LaunchError};

use crate::substitution::{
    Substitution, SubstitutionList, SubstitutionToken, normalize_to_list_of_substitutions,
};

/// Resolves to the value of an environment variable.
///
/// The variable name is itself a substitution list, so it may be computed.
/// A missing variable resolves to the default value when one is set, and to
/// the empty string otherwise. It never fails because a variable is unset.
#[derive(Debug, Clone)]
pub struct EnvironmentVariable {
    name: SubstitutionList,
    default_value: Option<SubstitutionList>,
}

impl EnvironmentVariable {
    /// Construct from a single literal name or substitution.
    pub fn new(name: impl Into<SubstitutionToken>) -> Self {
        Self::from_tokens([name])
    }

    /// Construct from an ordered sequence of text and substitutions whose
    /// concatenation forms the variable name.
    pub fn from_tokens<I, T>(name: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<SubstitutionToken>,
    {
        Self {
            name: normalize_to_list_of_substitutions(name),
            default_value: None,
        }
    }

    pub fn with_default_value<I, T>(mut self, default_value: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<SubstitutionToken>,
    {
        self.default_value = Some(normalize_to_list_of_substitutions(default_value));
        self
    }

    pub fn name(&self) -> &SubstitutionList {
        &self.name
    }

    pub fn default_value(&self) -> Option<&SubstitutionList> {
        self.default_value.as_ref()
    }
}

impl Substitution for EnvironmentVariable {
    fn perform(&self, context: &LaunchContext) -> Result<String, LaunchError> {
        let name = self.name.perform(context)?;
        match context.env_var(&name) {
            Some(value) => Ok(value.to_string()),
            None => {
                tracing::trace!(variable = %name, "Environment variable not set");
                match &self.default_value {
                    Some(default_value) => default_value.perform(context),
                    None => Ok(String::new()),
                }
            }
        }
    }

    fn describe(&self) -> String {
        format!("EnvVar({})", self.name.describe())
    }
}
