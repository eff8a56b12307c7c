//! Errors raised while creating bindings.

use thiserror::Error;

use crate::behind::TypeKey;

#[derive(Debug, Error)]
pub enum BindError {
    #[error("configuration error: front type `{front}` has no registered behind type")]
    UnregisteredFront { front: TypeKey },
    #[error(
        "configuration error: behind type `{behind}` has no constructor accepting front type `{front}` (expects `{expected}`)"
    )]
    IncompatibleConstructor {
        front: TypeKey,
        behind: TypeKey,
        expected: TypeKey,
    },
    /// Failure raised by the behind constructor itself, passed through as-is.
    #[error(transparent)]
    Behind(#[from] anyhow::Error),
}

impl BindError {
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::UnregisteredFront { .. } | Self::IncompatibleConstructor { .. }
        )
    }
}
