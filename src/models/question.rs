use serde::Deserialize;

/// A single multiple-choice question.
///
/// Deserialized from the question bank's JSON records:
/// `{ "question": "...", "choices": ["...", ...], "correct": "..." }`.
#[derive(Clone, Debug, Deserialize)]
pub struct Question {
    #[serde(rename = "question")]
    pub text: String,
    pub choices: Vec<String>,
    #[serde(rename = "correct")]
    pub correct_answer: String,
}

impl Question {
    /// Whether the given choice is this question's correct answer.
    pub fn is_correct(&self, choice: &str) -> bool {
        self.correct_answer == choice
    }
}
