//! Lazy substitutions resolved against a [`launch_core::LaunchContext`].
//!
//! A substitution list is an ordered sequence of literal text and nested
//! substitutions. Performing it evaluates every element in order and
//! concatenates the results:
//!
//! ```
//! use launch_core::LaunchContext;
//! use launch_substitutions::{EnvironmentVariable, SubstitutionToken, normalize_to_list_of_substitutions};
//!
//! let list = normalize_to_list_of_substitutions([
//!     SubstitutionToken::from("A_"),
//!     SubstitutionToken::substitution(EnvironmentVariable::new("B")),
//! ]);
//! let ctx = LaunchContext::new().with_env("B", "1");
//! assert_eq!(list.perform(&ctx).unwrap(), "A_1");
//! ```

pub mod environment_variable;
pub mod launch_configuration;
pub mod substitution;
pub mod text;

pub use environment_variable::EnvironmentVariable;
pub use launch_configuration::LaunchConfiguration;
pub use substitution::{
    Substitution, SubstitutionList, SubstitutionToken, normalize_to_list_of_substitutions,
    perform_substitutions,
};
pub use text::TextSubstitution;
