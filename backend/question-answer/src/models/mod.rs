pub mod answer_details;
pub mod question;
pub mod question_answer;

pub use answer_details::{
    create_answer_details, create_answer_details_with, AnswerDetails, AnswerDetailsKind,
    CodeFillInAnswerDetails, CodeOrderAnswerDetails, FillInSpotSelection,
    MultipleChoiceAnswerDetails, OpenAnswerDetails, OrderSlotPosition, UnknownAnswerTypePolicy,
};
pub use question::{Image, Question, QuestionStatus, Topic};
pub use question_answer::QuestionAnswer;
