use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::answer_details::{create_answer_details_with, AnswerDetails, UnknownAnswerTypePolicy};
use super::question::Question;
use crate::error::HydrationError;
use crate::utils::json::{require_field, require_object};

/// A question paired with the answer a user gave to it.
///
/// `question` is `None` only for the default value; anything hydrated from
/// input carries both halves.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionAnswer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<Question>,
    pub answer_details: AnswerDetails,
}

impl QuestionAnswer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Absent input and JSON `null` both produce the default value
    pub fn hydrate(input: Option<&Value>) -> Result<Self, HydrationError> {
        Self::hydrate_with(input, UnknownAnswerTypePolicy::Reject)
    }

    pub fn hydrate_with(
        input: Option<&Value>,
        policy: UnknownAnswerTypePolicy,
    ) -> Result<Self, HydrationError> {
        match input {
            None | Some(Value::Null) => Ok(Self::default()),
            Some(raw) => Self::from_raw_with(raw, policy),
        }
    }

    pub fn from_raw(raw: &Value) -> Result<Self, HydrationError> {
        Self::from_raw_with(raw, UnknownAnswerTypePolicy::Reject)
    }

    pub fn from_raw_with(
        raw: &Value,
        policy: UnknownAnswerTypePolicy,
    ) -> Result<Self, HydrationError> {
        let object = require_object(raw, "question answer")?;

        let question = Question::from_raw(require_field(object, "question")?)?;
        let answer_details =
            create_answer_details_with(require_field(object, "answerDetails")?, policy)?;

        Ok(Self {
            question: Some(question),
            answer_details,
        })
    }

    /// Read back the serialized form, where a missing `question` marks the
    /// default value. `answerDetails` is still required.
    pub fn restore_with(
        raw: &Value,
        policy: UnknownAnswerTypePolicy,
    ) -> Result<Self, HydrationError> {
        if raw.is_null() {
            return Ok(Self::default());
        }
        let object = require_object(raw, "question answer")?;
        match object.get("question") {
            Some(Value::Null) | None => Ok(Self {
                question: None,
                answer_details: create_answer_details_with(
                    require_field(object, "answerDetails")?,
                    policy,
                )?,
            }),
            Some(_) => Self::from_raw_with(raw, policy),
        }
    }

    pub fn from_json(input: &str) -> Result<Self, HydrationError> {
        let raw: Value = serde_json::from_str(input).map_err(|source| HydrationError::Malformed {
            entity: "question answer",
            source,
        })?;
        Self::hydrate(Some(&raw))
    }

    pub fn is_answered(&self) -> bool {
        self.answer_details.is_answered()
    }
}

impl<'de> Deserialize<'de> for QuestionAnswer {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Value::deserialize(deserializer)?;
        Self::restore_with(&raw, UnknownAnswerTypePolicy::Reject)
            .map_err(serde::de::Error::custom)
    }
}
