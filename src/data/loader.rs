//! Question bank loading and validation.
//!
//! The bank is a JSON array of `{ "question", "choices", "correct" }`
//! records, loaded once before a session starts. Any defect is fatal to
//! startup: the caller reports the error and never shows a session.

use std::fs;
use std::io;
use std::path::Path;

use crate::models::Question;

/// Error loading or validating the question bank.
#[derive(Debug)]
pub enum LoadError {
    /// The file could not be read.
    Io(io::Error),
    /// The file is not valid JSON of the expected shape.
    Parse(serde_json::Error),
    /// The bank contains no questions.
    Empty,
    /// A question violates the bank rules (0-based index).
    BadQuestion { index: usize, reason: String },
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Io(e) => write!(f, "failed to read question bank: {}", e),
            LoadError::Parse(e) => write!(f, "invalid question bank JSON: {}", e),
            LoadError::Empty => write!(f, "question bank contains no questions"),
            LoadError::BadQuestion { index, reason } => {
                write!(f, "question {}: {}", index + 1, reason)
            }
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(e) => Some(e),
            LoadError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for LoadError {
    fn from(err: io::Error) -> Self {
        LoadError::Io(err)
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        LoadError::Parse(err)
    }
}

/// Load and validate a question bank from a JSON file.
pub fn load_questions_from_json<P: AsRef<Path>>(path: P) -> Result<Vec<Question>, LoadError> {
    let json = fs::read_to_string(path)?;
    let questions: Vec<Question> = serde_json::from_str(&json)?;
    validate_questions(&questions)?;
    Ok(questions)
}

/// Check the bank rules: non-empty, every question has at least two
/// choices, and its correct answer is one of them.
pub fn validate_questions(questions: &[Question]) -> Result<(), LoadError> {
    if questions.is_empty() {
        return Err(LoadError::Empty);
    }

    for (index, question) in questions.iter().enumerate() {
        if question.choices.len() < 2 {
            return Err(LoadError::BadQuestion {
                index,
                reason: format!("needs at least 2 choices, has {}", question.choices.len()),
            });
        }
        if !question.choices.iter().any(|c| question.is_correct(c)) {
            return Err(LoadError::BadQuestion {
                index,
                reason: format!(
                    "correct answer {:?} is not one of the choices",
                    question.correct_answer
                ),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(text: &str, choices: &[&str], correct: &str) -> Question {
        Question {
            text: text.to_string(),
            choices: choices.iter().map(|c| c.to_string()).collect(),
            correct_answer: correct.to_string(),
        }
    }

    #[test]
    fn parses_bank_records() {
        let json = r#"[
            {
                "question": "What is 2 + 2?",
                "choices": ["3", "4", "5"],
                "correct": "4"
            }
        ]"#;

        let questions: Vec<Question> = serde_json::from_str(json).unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].text, "What is 2 + 2?");
        assert_eq!(questions[0].choices, vec!["3", "4", "5"]);
        assert!(questions[0].is_correct("4"));
        assert!(validate_questions(&questions).is_ok());
    }

    #[test]
    fn rejects_empty_bank() {
        assert!(matches!(validate_questions(&[]), Err(LoadError::Empty)));
    }

    #[test]
    fn rejects_single_choice() {
        let bank = [question("Q?", &["only"], "only")];
        assert!(matches!(
            validate_questions(&bank),
            Err(LoadError::BadQuestion { index: 0, .. })
        ));
    }

    #[test]
    fn rejects_correct_answer_outside_choices() {
        let bank = [
            question("Q1?", &["a", "b"], "a"),
            question("Q2?", &["a", "b"], "c"),
        ];
        assert!(matches!(
            validate_questions(&bank),
            Err(LoadError::BadQuestion { index: 1, .. })
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_questions_from_json("does-not-exist.json").unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }
}
