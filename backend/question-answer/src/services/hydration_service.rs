use anyhow::{Context, Result};
use serde_json::Value;

use crate::config::Config;
use crate::error::HydrationError;
use crate::metrics::{track_hydration, ANSWER_DETAILS_KIND_TOTAL};
use crate::models::{
    create_answer_details_with, AnswerDetails, Question, QuestionAnswer, UnknownAnswerTypePolicy,
};

/// Hydrates plain JSON into model values under the configured policy,
/// recording metrics and logs along the way.
#[derive(Debug, Clone, Default)]
pub struct HydrationService {
    policy: UnknownAnswerTypePolicy,
}

impl HydrationService {
    pub fn new(config: &Config) -> Self {
        Self {
            policy: config.unknown_answer_type,
        }
    }

    pub fn with_policy(policy: UnknownAnswerTypePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> UnknownAnswerTypePolicy {
        self.policy
    }

    pub fn question(&self, raw: &Value) -> Result<Question, HydrationError> {
        track_hydration("question", || Question::from_raw(raw))
    }

    pub fn answer_details(&self, raw: &Value) -> Result<AnswerDetails, HydrationError> {
        let details = track_hydration("answer_details", || {
            create_answer_details_with(raw, self.policy)
        })?;
        self.record_kind(&details);
        Ok(details)
    }

    pub fn question_answer(&self, input: Option<&Value>) -> Result<QuestionAnswer, HydrationError> {
        let result = track_hydration("question_answer", || {
            QuestionAnswer::hydrate_with(input, self.policy)
        });

        match &result {
            Ok(qa) => {
                self.record_kind(&qa.answer_details);
                tracing::debug!(
                    "Hydrated question answer: question_id={:?}, kind={}, answered={}",
                    qa.question.as_ref().and_then(|q| q.id),
                    qa.answer_details.kind(),
                    qa.is_answered()
                );
            }
            Err(err) => {
                tracing::debug!("Question answer hydration failed: {}", err);
            }
        }

        result
    }

    /// Hydrate a JSON document holding one question answer (or `null`) or an
    /// array of them, returning the normalized re-serialization. Default
    /// values come back out as `null` so the output hydrates again.
    pub fn hydrate_document(&self, document: &str) -> Result<Value> {
        let raw: Value = serde_json::from_str(document).context("Document is not valid JSON")?;

        match raw {
            Value::Array(items) => {
                let mut hydrated = Vec::with_capacity(items.len());
                for (index, item) in items.iter().enumerate() {
                    let qa = self
                        .question_answer(Some(item))
                        .with_context(|| format!("Failed to hydrate item {}", index))?;
                    hydrated.push(document_value(&qa)?);
                }
                tracing::info!("Hydrated {} question answers", hydrated.len());
                Ok(Value::Array(hydrated))
            }
            single => {
                let qa = self
                    .question_answer(Some(&single))
                    .context("Failed to hydrate question answer")?;
                document_value(&qa)
            }
        }
    }

    fn record_kind(&self, details: &AnswerDetails) {
        ANSWER_DETAILS_KIND_TOTAL
            .with_label_values(&[details.kind().as_str()])
            .inc();
    }
}

fn document_value(qa: &QuestionAnswer) -> Result<Value> {
    if qa.question.is_none() {
        return Ok(Value::Null);
    }
    Ok(serde_json::to_value(qa)?)
}
