use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::{Validate, ValidationError};

use crate::error::HydrationError;
use crate::utils::json::{from_validated, require_object};

/// Publication state of a question in the question bank
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionStatus {
    #[default]
    Available,
    Disabled,
    Removed,
    Submitted,
}

impl QuestionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionStatus::Available => "AVAILABLE",
            QuestionStatus::Disabled => "DISABLED",
            QuestionStatus::Removed => "REMOVED",
            QuestionStatus::Submitted => "SUBMITTED",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[validate(length(min = 1, message = "Image url must not be empty"))]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[validate(length(
        min = 1,
        max = 100,
        message = "Topic name must be between 1 and 100 characters"
    ))]
    pub name: String,
}

/// A question prompt as exchanged with the front-end.
///
/// `text` also accepts the legacy `content` key on input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_answer_counts"))]
pub struct Question {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<i64>,

    #[serde(default)]
    #[validate(length(max = 255, message = "Title must be at most 255 characters"))]
    pub title: String,

    #[serde(alias = "content")]
    #[validate(custom(function = "not_blank"))]
    pub text: String,

    #[serde(default)]
    pub status: QuestionStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0, max = 100, message = "Difficulty must be between 0 and 100"))]
    pub difficulty: Option<i32>,

    #[serde(default)]
    pub number_of_answers: u32,

    #[serde(default)]
    pub number_of_correct: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(nested)]
    pub image: Option<Image>,

    #[serde(default)]
    #[validate(nested)]
    pub topics: Vec<Topic>,
}

impl Question {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: None,
            key: None,
            title: String::new(),
            text: text.into(),
            status: QuestionStatus::default(),
            difficulty: None,
            number_of_answers: 0,
            number_of_correct: 0,
            creation_date: None,
            image: None,
            topics: Vec::new(),
        }
    }

    /// Build an owned, validated question from plain JSON
    pub fn from_raw(raw: &Value) -> Result<Self, HydrationError> {
        require_object(raw, "question")?;
        from_validated(raw, "question")
    }

    pub fn is_available(&self) -> bool {
        self.status == QuestionStatus::Available
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank")
            .with_message("Question text must not be empty".into()));
    }
    Ok(())
}

fn validate_answer_counts(question: &Question) -> Result<(), ValidationError> {
    if question.number_of_correct > question.number_of_answers {
        return Err(ValidationError::new("answer_counts")
            .with_message("numberOfCorrect cannot exceed numberOfAnswers".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_minimal_question() {
        let question = Question::from_raw(&json!({ "id": 1, "text": "2+2?" })).unwrap();
        assert_eq!(question.id, Some(1));
        assert_eq!(question.text, "2+2?");
        assert_eq!(question.status, QuestionStatus::Available);
        assert!(question.topics.is_empty());
    }

    #[test]
    fn test_content_alias() {
        let question = Question::from_raw(&json!({ "content": "Explain ownership" })).unwrap();
        assert_eq!(question, Question::new("Explain ownership"));
    }

    #[test]
    fn test_blank_text_is_invalid() {
        let err = Question::from_raw(&json!({ "text": "   " })).unwrap_err();
        assert!(matches!(err, HydrationError::Invalid { entity: "question", .. }));
    }

    #[test]
    fn test_missing_text_is_malformed() {
        let err = Question::from_raw(&json!({ "id": 4 })).unwrap_err();
        assert!(matches!(err, HydrationError::Malformed { .. }));
    }

    #[test]
    fn test_correct_count_cannot_exceed_answers() {
        let raw = json!({ "text": "Q", "numberOfAnswers": 2, "numberOfCorrect": 3 });
        assert!(matches!(
            Question::from_raw(&raw),
            Err(HydrationError::Invalid { .. })
        ));
    }

    #[test]
    fn test_nested_topic_validation() {
        let raw = json!({ "text": "Q", "topics": [{ "id": 1, "name": "" }] });
        assert!(matches!(
            Question::from_raw(&raw),
            Err(HydrationError::Invalid { .. })
        ));
    }

    #[test]
    fn test_status_serialization() {
        let mut question = Question::new("Q");
        question.status = QuestionStatus::Disabled;
        let value = serde_json::to_value(&question).unwrap();
        assert_eq!(value["status"], QuestionStatus::Disabled.as_str());
        assert!(!question.is_available());
    }
}
