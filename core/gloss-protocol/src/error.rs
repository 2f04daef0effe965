use thiserror::Error;

use crate::ids::SentenceId;

/// Load-time configuration faults. Anything else the engine meets at
/// runtime degrades to "no entry" instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("source form '{0}' is declared by more than one dictionary entry")]
    DuplicateSourceForm(String),
    #[error("sentence id {0} is declared more than once")]
    DuplicateSentenceId(SentenceId),
}
