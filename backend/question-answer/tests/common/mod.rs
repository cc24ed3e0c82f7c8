#![allow(dead_code)]

use serde_json::{json, Value};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

pub fn arithmetic_question() -> Value {
    json!({ "id": 1, "text": "2+2?" })
}

pub fn multiple_choice(selected_ids: &[i64]) -> Value {
    json!({ "type": "multiple-choice", "selectedIds": selected_ids })
}

pub fn question_answer(question: Value, answer_details: Value) -> Value {
    json!({ "question": question, "answerDetails": answer_details })
}

pub fn full_question() -> Value {
    json!({
        "id": 42,
        "key": 7,
        "title": "Borrowing",
        "content": "Which of these compile?",
        "status": "AVAILABLE",
        "difficulty": 35,
        "numberOfAnswers": 10,
        "numberOfCorrect": 4,
        "creationDate": "2024-03-01T10:15:00Z",
        "image": { "id": 3, "url": "borrow.png", "width": 200 },
        "topics": [{ "id": 1, "name": "Ownership" }, { "id": 2, "name": "Lifetimes" }]
    })
}
