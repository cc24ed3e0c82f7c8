use thiserror::Error;

/// Failure raised while turning plain JSON into typed model values.
///
/// Nested failures are never wrapped twice: an invalid question inside a
/// question answer surfaces as the question's own error.
#[derive(Debug, Error)]
pub enum HydrationError {
    #[error("expected a JSON object for {0}")]
    NotAnObject(&'static str),

    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("answer details have no `type` discriminator")]
    MissingAnswerType,

    #[error("unknown answer details type: {0}")]
    UnknownAnswerType(String),

    #[error("malformed {entity}: {source}")]
    Malformed {
        entity: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid {entity}: {source}")]
    Invalid {
        entity: &'static str,
        #[source]
        source: validator::ValidationErrors,
    },
}

impl HydrationError {
    /// Stable label used for the `reason` metric dimension
    pub fn reason(&self) -> &'static str {
        match self {
            HydrationError::NotAnObject(_) => "not_an_object",
            HydrationError::MissingField(_) => "missing_field",
            HydrationError::MissingAnswerType => "missing_answer_type",
            HydrationError::UnknownAnswerType(_) => "unknown_answer_type",
            HydrationError::Malformed { .. } => "malformed",
            HydrationError::Invalid { .. } => "invalid",
        }
    }
}
