//! # quiz-master
//!
//! A terminal multiple-choice quiz with a per-question countdown.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use quiz_master::{Quiz, QuizError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), QuizError> {
//!     // Load questions from a JSON file
//!     let quiz = Quiz::from_json("questions.json")?;
//!
//!     // Run the quiz in the terminal
//!     quiz.run().await?;
//!
//!     Ok(())
//! }
//! ```

mod app;
mod data;
mod models;
pub mod terminal;
mod timer;
mod ui;

use std::io;
use std::path::Path;

use crossterm::event::{Event, EventStream, KeyCode, KeyEventKind};
use futures_util::StreamExt;
use tokio::sync::mpsc::{self, UnboundedReceiver};

pub use app::{App, AnswerReview, ResultsSummary, DEFAULT_TIME_LIMIT_SECS};
pub use data::{load_questions_from_json, validate_questions, LoadError};
pub use models::{Question, Screen};
pub use timer::{CountdownTimer, TimerEvent};

/// Error type for quiz operations.
#[derive(Debug)]
pub enum QuizError {
    /// Error loading or validating the question bank.
    Load(LoadError),
    /// IO error during quiz execution.
    Io(io::Error),
}

impl std::fmt::Display for QuizError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuizError::Load(e) => write!(f, "Failed to load questions: {}", e),
            QuizError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for QuizError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            QuizError::Load(e) => Some(e),
            QuizError::Io(e) => Some(e),
        }
    }
}

impl From<LoadError> for QuizError {
    fn from(err: LoadError) -> Self {
        QuizError::Load(err)
    }
}

impl From<io::Error> for QuizError {
    fn from(err: io::Error) -> Self {
        QuizError::Io(err)
    }
}

/// A quiz instance that can be run in the terminal.
pub struct Quiz {
    app: App,
    timer_events: UnboundedReceiver<TimerEvent>,
}

impl Quiz {
    /// Create a quiz from an already-loaded question bank, using the
    /// default 30-second time limit.
    ///
    /// The bank is validated the same way file loading validates it.
    pub fn new(questions: Vec<Question>) -> Result<Self, QuizError> {
        Self::with_time_limit(questions, DEFAULT_TIME_LIMIT_SECS)
    }

    /// Create a quiz with a custom per-question time limit in seconds.
    ///
    /// A zero time limit is a programming error.
    pub fn with_time_limit(questions: Vec<Question>, time_limit: u32) -> Result<Self, QuizError> {
        assert!(time_limit > 0, "time limit must be positive");
        validate_questions(&questions)?;

        let (tx, rx) = mpsc::unbounded_channel();
        Ok(Self {
            app: App::new(questions, time_limit, tx),
            timer_events: rx,
        })
    }

    /// Load a quiz from a JSON file.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use quiz_master::Quiz;
    ///
    /// let quiz = Quiz::from_json("questions.json").expect("Failed to load quiz");
    /// ```
    pub fn from_json<P: AsRef<Path>>(path: P) -> Result<Self, QuizError> {
        let questions = load_questions_from_json(path)?;
        Self::new(questions)
    }

    /// Run the quiz in the terminal.
    ///
    /// Takes over the terminal, drives the session until the user quits,
    /// then restores the terminal.
    pub async fn run(mut self) -> Result<(), QuizError> {
        let mut term = terminal::init()?;
        let result = run_event_loop(&mut term, &mut self.app, &mut self.timer_events).await;
        terminal::restore()?;
        result
    }

    /// Get a reference to the underlying app for custom handling.
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Get a mutable reference to the underlying app for custom handling.
    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }
}

/// The session's single thread of control.
///
/// User input and timer events are both awaited here and applied to the
/// controller one at a time, so session state never sees interleaved
/// mutations and needs no locking.
async fn run_event_loop(
    terminal: &mut terminal::AppTerminal,
    app: &mut App,
    timer_events: &mut UnboundedReceiver<TimerEvent>,
) -> Result<(), QuizError> {
    let mut input = EventStream::new();

    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        tokio::select! {
            maybe_event = input.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        if handle_input(app, key.code) {
                            break;
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(QuizError::Io(e)),
                    None => break,
                }
            }
            Some(event) = timer_events.recv() => {
                app.handle_timer_event(event);
            }
        }
    }

    Ok(())
}

/// Returns true if the app should exit. Keys that do not belong to the
/// current screen fall through and are ignored.
fn handle_input(app: &mut App, key: KeyCode) -> bool {
    match app.screen {
        Screen::Menu => handle_menu_input(app, key),
        Screen::Question => handle_question_input(app, key),
        Screen::Results => handle_results_input(app, key),
    }
}

fn handle_menu_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Enter => {
            app.start_quiz();
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        _ => false,
    }
}

fn handle_question_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Up | KeyCode::Char('k') => {
            app.highlight_previous();
            false
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.highlight_next();
            false
        }
        KeyCode::Char(' ') => {
            app.toggle_selection();
            false
        }
        KeyCode::Enter | KeyCode::Char('n') => {
            app.submit_current();
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        _ => false,
    }
}

fn handle_results_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Down | KeyCode::Char('j') => {
            app.scroll_results_down();
            false
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.scroll_results_up();
            false
        }
        KeyCode::Char('r') | KeyCode::Char('R') => {
            app.restart();
            false
        }
        KeyCode::Char('m') | KeyCode::Char('M') => {
            app.return_to_menu();
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        _ => false,
    }
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

    #[tokio::test]
    async fn quiz_rejects_a_defective_bank() {
        assert!(matches!(
            Quiz::new(Vec::new()),
            Err(QuizError::Load(LoadError::Empty))
        ));

        let bank = vec![question("Q?", &["a", "b"], "z")];
        assert!(matches!(
            Quiz::new(bank),
            Err(QuizError::Load(LoadError::BadQuestion { .. }))
        ));
    }

    #[tokio::test]
    async fn keys_drive_the_session_through_all_screens() {
        let bank = vec![
            question("Q1?", &["a", "b"], "a"),
            question("Q2?", &["c", "d"], "d"),
        ];
        let mut quiz = Quiz::new(bank).unwrap();
        let app = quiz.app_mut();

        assert!(!handle_input(app, KeyCode::Enter));
        assert_eq!(app.screen, Screen::Question);

        // Mark "a" and advance; skip the second question unanswered.
        handle_input(app, KeyCode::Char(' '));
        handle_input(app, KeyCode::Enter);
        assert_eq!(app.screen, Screen::Question);
        handle_input(app, KeyCode::Enter);
        assert_eq!(app.screen, Screen::Results);
        assert_eq!(app.score(), 1);

        assert!(!handle_input(app, KeyCode::Char('m')));
        assert_eq!(app.screen, Screen::Menu);

        assert!(handle_input(app, KeyCode::Char('q')));
    }

    #[tokio::test]
    async fn unmapped_keys_are_ignored_on_every_screen() {
        let bank = vec![question("Q1?", &["a", "b"], "a")];
        let mut quiz = Quiz::new(bank).unwrap();
        let app = quiz.app_mut();

        // Question/results keys do nothing on the menu.
        assert!(!handle_input(app, KeyCode::Char(' ')));
        assert!(!handle_input(app, KeyCode::Char('r')));
        assert_eq!(app.screen, Screen::Menu);
        assert!(app.answers().is_empty());

        handle_input(app, KeyCode::Enter);
        assert!(!handle_input(app, KeyCode::Char('x')));
        assert_eq!(app.screen, Screen::Question);
        assert!(app.answers().is_empty());
    }
}
