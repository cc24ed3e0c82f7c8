use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::{collections::HashSet, fmt, str::FromStr};
use validator::{Validate, ValidationError};

use crate::error::HydrationError;
use crate::utils::json::{from_validated, require_object};

/// Discriminator carried in the `type` field of every answer-details payload
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum AnswerDetailsKind {
    MultipleChoice,
    CodeFillIn,
    CodeOrder,
    OpenAnswer,
}

impl AnswerDetailsKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnswerDetailsKind::MultipleChoice => "multiple-choice",
            AnswerDetailsKind::CodeFillIn => "code-fill-in",
            AnswerDetailsKind::CodeOrder => "code-order",
            AnswerDetailsKind::OpenAnswer => "open-answer",
        }
    }
}

impl fmt::Display for AnswerDetailsKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnswerDetailsKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_lowercase().replace('_', "-");
        match normalized.as_str() {
            "multiple-choice" => Ok(AnswerDetailsKind::MultipleChoice),
            "code-fill-in" => Ok(AnswerDetailsKind::CodeFillIn),
            "code-order" => Ok(AnswerDetailsKind::CodeOrder),
            "open-answer" => Ok(AnswerDetailsKind::OpenAnswer),
            _ => Err(format!("Invalid answer details type: {}", value)),
        }
    }
}

/// What the factory does with a missing or unrecognized discriminator
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum UnknownAnswerTypePolicy {
    #[default]
    Reject,
    FallbackToDefault,
}

impl UnknownAnswerTypePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnknownAnswerTypePolicy::Reject => "reject",
            UnknownAnswerTypePolicy::FallbackToDefault => "fallback-to-default",
        }
    }
}

impl FromStr for UnknownAnswerTypePolicy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_lowercase().replace('_', "-");
        match normalized.as_str() {
            "reject" => Ok(UnknownAnswerTypePolicy::Reject),
            "fallback-to-default" | "fallback" => Ok(UnknownAnswerTypePolicy::FallbackToDefault),
            _ => Err(format!("Invalid unknown answer type policy: {}", value)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MultipleChoiceAnswerDetails {
    #[serde(default)]
    #[validate(custom(function = "distinct_ids"))]
    pub selected_ids: Vec<i64>,
}

impl MultipleChoiceAnswerDetails {
    pub fn new(selected_ids: Vec<i64>) -> Self {
        Self { selected_ids }
    }

    pub fn is_answered(&self) -> bool {
        !self.selected_ids.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FillInSpotSelection {
    pub sequence: u32,
    pub option_id: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "distinct_sequences"))]
pub struct CodeFillInAnswerDetails {
    #[serde(default)]
    #[validate(nested)]
    pub selected_options: Vec<FillInSpotSelection>,
}

impl CodeFillInAnswerDetails {
    pub fn is_answered(&self) -> bool {
        !self.selected_options.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OrderSlotPosition {
    pub slot_id: i64,
    pub order: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "distinct_slots"))]
pub struct CodeOrderAnswerDetails {
    #[serde(default)]
    #[validate(nested)]
    pub ordered_slots: Vec<OrderSlotPosition>,
}

impl CodeOrderAnswerDetails {
    pub fn is_answered(&self) -> bool {
        !self.ordered_slots.is_empty()
    }

    /// Slot ids sorted by their submitted position
    pub fn slot_sequence(&self) -> Vec<i64> {
        let mut slots = self.ordered_slots.clone();
        slots.sort_by_key(|slot| slot.order);
        slots.into_iter().map(|slot| slot.slot_id).collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OpenAnswerDetails {
    #[serde(default)]
    #[validate(length(
        max = 10000,
        message = "Open answer must be at most 10000 characters"
    ))]
    pub answer: String,
}

impl OpenAnswerDetails {
    pub fn is_answered(&self) -> bool {
        !self.answer.trim().is_empty()
    }
}

/// A user's answer payload, one variant per question type.
///
/// Serializes with a kebab-case `type` tag. Deserializing goes through
/// [`create_answer_details`], so the validators always run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum AnswerDetails {
    MultipleChoice(MultipleChoiceAnswerDetails),
    CodeFillIn(CodeFillInAnswerDetails),
    CodeOrder(CodeOrderAnswerDetails),
    OpenAnswer(OpenAnswerDetails),
}

impl Default for AnswerDetails {
    fn default() -> Self {
        AnswerDetails::MultipleChoice(MultipleChoiceAnswerDetails::default())
    }
}

impl AnswerDetails {
    pub fn kind(&self) -> AnswerDetailsKind {
        match self {
            AnswerDetails::MultipleChoice(_) => AnswerDetailsKind::MultipleChoice,
            AnswerDetails::CodeFillIn(_) => AnswerDetailsKind::CodeFillIn,
            AnswerDetails::CodeOrder(_) => AnswerDetailsKind::CodeOrder,
            AnswerDetails::OpenAnswer(_) => AnswerDetailsKind::OpenAnswer,
        }
    }

    pub fn is_answered(&self) -> bool {
        match self {
            AnswerDetails::MultipleChoice(details) => details.is_answered(),
            AnswerDetails::CodeFillIn(details) => details.is_answered(),
            AnswerDetails::CodeOrder(details) => details.is_answered(),
            AnswerDetails::OpenAnswer(details) => details.is_answered(),
        }
    }

    pub fn as_multiple_choice(&self) -> Option<&MultipleChoiceAnswerDetails> {
        match self {
            AnswerDetails::MultipleChoice(details) => Some(details),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for AnswerDetails {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Value::deserialize(deserializer)?;
        create_answer_details(&raw).map_err(serde::de::Error::custom)
    }
}

/// Pick and build the concrete variant named by the `type` discriminator,
/// rejecting missing or unrecognized tags.
pub fn create_answer_details(raw: &Value) -> Result<AnswerDetails, HydrationError> {
    create_answer_details_with(raw, UnknownAnswerTypePolicy::Reject)
}

pub fn create_answer_details_with(
    raw: &Value,
    policy: UnknownAnswerTypePolicy,
) -> Result<AnswerDetails, HydrationError> {
    let object = require_object(raw, "answer details")?;

    let kind = match object.get("type") {
        Some(Value::String(tag)) => match tag.parse::<AnswerDetailsKind>() {
            Ok(kind) => kind,
            Err(_) => return unresolved(policy, HydrationError::UnknownAnswerType(tag.clone())),
        },
        Some(Value::Null) | None => {
            return unresolved(policy, HydrationError::MissingAnswerType)
        }
        Some(other) => {
            return unresolved(policy, HydrationError::UnknownAnswerType(other.to_string()))
        }
    };

    let details = match kind {
        AnswerDetailsKind::MultipleChoice => {
            AnswerDetails::MultipleChoice(from_validated(raw, "multiple-choice answer details")?)
        }
        AnswerDetailsKind::CodeFillIn => {
            AnswerDetails::CodeFillIn(from_validated(raw, "code-fill-in answer details")?)
        }
        AnswerDetailsKind::CodeOrder => {
            AnswerDetails::CodeOrder(from_validated(raw, "code-order answer details")?)
        }
        AnswerDetailsKind::OpenAnswer => {
            AnswerDetails::OpenAnswer(from_validated(raw, "open answer details")?)
        }
    };
    Ok(details)
}

fn unresolved(
    policy: UnknownAnswerTypePolicy,
    err: HydrationError,
) -> Result<AnswerDetails, HydrationError> {
    match policy {
        UnknownAnswerTypePolicy::Reject => Err(err),
        UnknownAnswerTypePolicy::FallbackToDefault => {
            tracing::warn!("Substituting default answer details: {}", err);
            Ok(AnswerDetails::default())
        }
    }
}

fn distinct_ids(ids: &[i64]) -> Result<(), ValidationError> {
    let mut seen = HashSet::with_capacity(ids.len());
    if ids.iter().all(|id| seen.insert(*id)) {
        Ok(())
    } else {
        Err(ValidationError::new("duplicate_selection")
            .with_message("Selected option ids must be distinct".into()))
    }
}

fn distinct_sequences(details: &CodeFillInAnswerDetails) -> Result<(), ValidationError> {
    let mut seen = HashSet::with_capacity(details.selected_options.len());
    if details
        .selected_options
        .iter()
        .all(|option| seen.insert(option.sequence))
    {
        Ok(())
    } else {
        Err(ValidationError::new("duplicate_spot")
            .with_message("Each fill-in spot can be answered once".into()))
    }
}

fn distinct_slots(details: &CodeOrderAnswerDetails) -> Result<(), ValidationError> {
    let mut slots = HashSet::with_capacity(details.ordered_slots.len());
    let mut orders = HashSet::with_capacity(details.ordered_slots.len());
    for slot in &details.ordered_slots {
        if !slots.insert(slot.slot_id) || !orders.insert(slot.order) {
            return Err(ValidationError::new("duplicate_slot")
                .with_message("Slots and positions must be distinct".into()));
        }
    }
    Ok(())
}
