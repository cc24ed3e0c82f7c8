pub mod config;
pub mod error;
pub mod metrics;
pub mod models;
pub mod services;
pub mod utils;

pub use config::Config;
pub use error::HydrationError;
pub use models::{
    create_answer_details, AnswerDetails, AnswerDetailsKind, Question, QuestionAnswer,
};
pub use services::HydrationService;
