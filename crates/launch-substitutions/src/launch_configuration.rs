use launch_core::{LaunchContext, LaunchError};

use crate::substitution::{
    Substitution, SubstitutionList, SubstitutionToken, normalize_to_list_of_substitutions,
};

/// Resolves to the value of a launch configuration held by the context.
///
/// Unlike [`crate::EnvironmentVariable`], an unknown name without a default
/// is an error.
#[derive(Debug, Clone)]
pub struct LaunchConfiguration {
    variable_name: SubstitutionList,
    default: Option<SubstitutionList>,
}

impl LaunchConfiguration {
    pub fn new(variable_name: impl Into<SubstitutionToken>) -> Self {
        Self::from_tokens([variable_name])
    }

    pub fn from_tokens<I, T>(variable_name: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<SubstitutionToken>,
    {
        Self {
            variable_name: normalize_to_list_of_substitutions(variable_name),
            default: None,
        }
    }

    pub fn with_default<I, T>(mut self, default: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<SubstitutionToken>,
    {
        self.default = Some(normalize_to_list_of_substitutions(default));
        self
    }

    pub fn variable_name(&self) -> &SubstitutionList {
        &self.variable_name
    }
}

impl Substitution for LaunchConfiguration {
    fn perform(&self, context: &LaunchContext) -> Result<String, LaunchError> {
        let name = self.variable_name.perform(context)?;
        if let Some(value) = context.launch_configuration(&name) {
            return Ok(value.to_string());
        }
        match &self.default {
            Some(default) => default.perform(context),
            None => Err(LaunchError::LaunchConfigurationNotFound(name)),
        }
    }

    fn describe(&self) -> String {
        format!("LaunchConfig({})", self.variable_name.describe())
    }
}
