use thiserror::Error;

pub type SpecResult<T> = Result<T, SpecError>;

/// Errors raised while building fragments or assembling a document.
///
/// None of these leave the shared [`crate::theme::Theme`] in a different state;
/// every failure is local to the call that produced it.
#[derive(Debug, Error)]
pub enum SpecError {
    /// A required identity field (scale name, data source, field binding) is empty.
    #[error("invalid argument: `{field}` is required and must not be empty")]
    InvalidArgument { field: &'static str },

    #[error("configuration error: unknown mark type `{0}` (expected line, area, bar, point or rect)")]
    UnknownMarkType(String),

    /// Theme overrides could not be decoded or left a token category empty.
    #[error("configuration error in theme category `{category}`: {reason}")]
    Configuration {
        category: &'static str,
        reason: String,
    },

    #[error("duplicate scale name `{0}`")]
    DuplicateScale(String),

    #[error("scale `{scale}` referenced by {referrer} is not defined")]
    UnresolvedScale { referrer: String, scale: String },

    #[error("failed to serialize specification: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl SpecError {
    pub(crate) fn configuration(category: &'static str, reason: impl Into<String>) -> Self {
        SpecError::Configuration {
            category,
            reason: reason.into(),
        }
    }
}

/// Fail with [`SpecError::InvalidArgument`] when `value` is empty or whitespace.
pub(crate) fn require(field: &'static str, value: &str) -> SpecResult<()> {
    if value.trim().is_empty() {
        Err(SpecError::InvalidArgument { field })
    } else {
        Ok(())
    }
}
