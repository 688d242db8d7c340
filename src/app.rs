//! Session controller: the single owner of quiz progress.
//!
//! [`App`] is the only component that mutates session state and the sole
//! consumer of timer events. The renderer reads it through accessors; the
//! event loop feeds it key presses and [`TimerEvent`]s on one serialized
//! context, so no two mutations ever interleave.

use tokio::sync::mpsc::UnboundedSender;

use crate::models::{Question, Screen};
use crate::timer::{CountdownTimer, TimerEvent};

/// Default seconds allowed per question.
pub const DEFAULT_TIME_LIMIT_SECS: u32 = 30;

/// Everything derived for the results screen.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultsSummary {
    pub score: usize,
    pub total: usize,
    pub percentage: f64,
    pub per_question: Vec<AnswerReview>,
}

/// One question's entry in the results breakdown.
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerReview {
    pub question: String,
    /// `None` when the question timed out or was skipped unanswered.
    pub user_answer: Option<String>,
    pub correct_answer: String,
    pub is_correct: bool,
}

pub struct App {
    pub screen: Screen,
    questions: Vec<Question>,
    current_index: usize,
    score: usize,
    answers: Vec<Option<String>>,
    /// Choice the highlight cursor is on.
    highlighted: usize,
    /// Choice marked for submission; mutable right up to submit.
    selected: Option<usize>,
    time_limit: u32,
    time_left: u32,
    result_scroll: usize,
    timer: CountdownTimer,
}

impl App {
    /// Create a controller on the Menu screen with an idle timer.
    ///
    /// The question bank is expected to be validated already; loading is
    /// the boundary where a defective bank is fatal.
    pub fn new(
        questions: Vec<Question>,
        time_limit: u32,
        timer_events: UnboundedSender<TimerEvent>,
    ) -> Self {
        Self {
            screen: Screen::Menu,
            questions,
            current_index: 0,
            score: 0,
            answers: Vec::new(),
            highlighted: 0,
            selected: None,
            time_limit,
            time_left: time_limit,
            result_scroll: 0,
            timer: CountdownTimer::new(timer_events),
        }
    }

    pub fn current_question(&self) -> &Question {
        &self.questions[self.current_index]
    }

    /// 1-based, for display.
    pub fn current_question_number(&self) -> usize {
        self.current_index + 1
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn answers(&self) -> &[Option<String>] {
        &self.answers
    }

    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn time_limit(&self) -> u32 {
        self.time_limit
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn result_scroll(&self) -> usize {
        self.result_scroll
    }

    /// Begin a fresh session: reset all progress and show question 0.
    ///
    /// Cancels any running timer first, so calling this twice in a row
    /// leaves exactly one activation alive. Ignored on an empty bank.
    pub fn start_quiz(&mut self) {
        if self.questions.is_empty() {
            return;
        }

        self.timer.cancel();
        self.current_index = 0;
        self.score = 0;
        self.answers.clear();
        self.highlighted = 0;
        self.selected = None;
        self.result_scroll = 0;
        self.screen = Screen::Question;
        self.time_left = self.time_limit;
        self.timer.start(self.time_limit);
    }

    /// Restart from the results screen; identical to a fresh start.
    pub fn restart(&mut self) {
        self.start_quiz();
    }

    /// Leave the session flow. Prior score/answers stay in place until the
    /// next start overwrites them.
    pub fn return_to_menu(&mut self) {
        self.timer.cancel();
        self.screen = Screen::Menu;
    }

    pub fn highlight_next(&mut self) {
        if self.screen != Screen::Question {
            return;
        }
        let count = self.current_question().choices.len();
        self.highlighted = (self.highlighted + 1) % count;
    }

    pub fn highlight_previous(&mut self) {
        if self.screen != Screen::Question {
            return;
        }
        let count = self.current_question().choices.len();
        self.highlighted = (self.highlighted + count - 1) % count;
    }

    /// Mark the highlighted choice for submission, or clear the mark when
    /// it is already on the highlight. The mark can be moved or cleared
    /// any number of times before submitting.
    pub fn toggle_selection(&mut self) {
        if self.screen != Screen::Question {
            return;
        }
        self.selected = if self.selected == Some(self.highlighted) {
            None
        } else {
            Some(self.highlighted)
        };
    }

    /// Submit whatever is currently marked; absent when nothing is.
    pub fn submit_current(&mut self) {
        if self.screen != Screen::Question {
            return;
        }
        let choice = self
            .selected
            .map(|i| self.current_question().choices[i].clone());
        self.submit_answer(choice);
    }

    /// The single question-to-question transition point.
    ///
    /// Stops the running timer (invalidating any queued tick), records the
    /// answer, scores it, and either advances to the next question with a
    /// fresh timer or enters the results screen after the last one. Called
    /// for both the user's next/finish action and timer expiry; the screen
    /// guard plus timer cancellation guarantee exactly one answer entry
    /// per question.
    fn submit_answer(&mut self, choice: Option<String>) {
        if self.screen != Screen::Question || self.current_index >= self.questions.len() {
            return;
        }

        self.timer.cancel();

        let question = &self.questions[self.current_index];
        if choice.as_deref().is_some_and(|c| question.is_correct(c)) {
            self.score += 1;
        }
        self.answers.push(choice);
        self.current_index += 1;
        self.highlighted = 0;
        self.selected = None;

        if self.current_index == self.questions.len() {
            self.screen = Screen::Results;
        } else {
            self.time_left = self.time_limit;
            self.timer.start(self.time_limit);
        }
    }

    /// Apply a timer notification. Events from a cancelled or replaced
    /// activation are dropped here, which is what makes a user submit and
    /// a racing expiry produce exactly one recorded answer.
    pub fn handle_timer_event(&mut self, event: TimerEvent) {
        if !self.timer.is_current(&event) {
            return;
        }

        match event {
            TimerEvent::Tick { remaining, .. } => {
                if self.screen == Screen::Question {
                    self.time_left = remaining;
                }
            }
            TimerEvent::Expired { .. } => {
                self.time_left = 0;
                self.submit_answer(None);
            }
        }
    }

    /// Derive the results view.
    ///
    /// Pure with respect to session state, and callable on any screen:
    /// before the session finishes, questions past `current_index` simply
    /// report an absent answer. On the results screen every entry is a
    /// settled answer.
    pub fn compute_results(&self) -> ResultsSummary {
        let total = self.questions.len();
        let percentage = if total > 0 {
            self.score as f64 / total as f64 * 100.0
        } else {
            0.0
        };

        let per_question = self
            .questions
            .iter()
            .enumerate()
            .map(|(i, question)| {
                let user_answer = self.answers.get(i).cloned().flatten();
                let is_correct = user_answer
                    .as_deref()
                    .is_some_and(|c| question.is_correct(c));
                AnswerReview {
                    question: question.text.clone(),
                    user_answer,
                    correct_answer: question.correct_answer.clone(),
                    is_correct,
                }
            })
            .collect();

        ResultsSummary {
            score: self.score,
            total,
            percentage,
            per_question,
        }
    }

    pub fn scroll_results_down(&mut self) {
        if self.screen != Screen::Results {
            return;
        }
        let max_scroll = self.questions.len().saturating_sub(1);
        self.result_scroll = (self.result_scroll + 1).min(max_scroll);
    }

    pub fn scroll_results_up(&mut self) {
        if self.screen != Screen::Results {
            return;
        }
        self.result_scroll = self.result_scroll.saturating_sub(1);
    }

    #[cfg(test)]
    pub(crate) fn timer(&self) -> &CountdownTimer {
        &self.timer
    }
}
