use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::config::Config;
use crate::quiz::session::{AnswerOutcome, SessionObserver};
use crate::quiz::{Answer, FinalResult, Question, Session, SessionState, loader};
use crate::ui::components::menu::Menu;
use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Menu,
    Quiz,
    Result,
    Settings,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FeedbackKind {
    Correct,
    Incorrect(Answer),
    Skipped,
}

/// Presentation-side session state, fed by the session's observer hooks.
#[derive(Default)]
pub struct Feedback {
    pub banner: Option<FeedbackKind>,
    pub score: f64,
}

impl SessionObserver for Feedback {
    fn on_session_start(&mut self, _first_question: &Question) {
        self.banner = None;
        self.score = 0.0;
    }

    fn on_answer_result(&mut self, outcome: AnswerOutcome, score: f64) {
        self.banner = Some(match outcome {
            AnswerOutcome::Correct => FeedbackKind::Correct,
            AnswerOutcome::Incorrect { correct_answer } => FeedbackKind::Incorrect(correct_answer),
        });
        self.score = score;
    }

    fn on_skip(&mut self) {
        self.banner = Some(FeedbackKind::Skipped);
    }

    fn on_session_complete(&mut self, score: f64, _passed: bool) {
        self.score = score;
    }
}

pub struct App {
    pub screen: AppScreen,
    pub session: Session,
    pub feedback: Feedback,
    pub last_result: Option<FinalResult>,
    pub menu: Menu<'static>,
    pub theme: &'static Theme,
    pub config: Config,
    pub should_quit: bool,
    pub settings_selected: usize,
    /// The question on screen; kept through `Advancing` so the feedback
    /// banner appears under the question it belongs to.
    pub shown_question: Option<Question>,
    question_bank: Vec<Question>,
    advance_at: Option<Instant>,
    rng: SmallRng,
}

impl App {
    pub fn new(config: Config, question_bank: Vec<Question>) -> Self {
        let loaded_theme = Theme::load(&config.theme).unwrap_or_default();
        let theme: &'static Theme = Box::leak(Box::new(loaded_theme));
        let menu = Menu::new(theme);

        Self {
            screen: AppScreen::Menu,
            session: Session::new(Vec::new(), config.passing_threshold),
            feedback: Feedback::default(),
            last_result: None,
            menu,
            theme,
            config,
            should_quit: false,
            settings_selected: 0,
            shown_question: None,
            question_bank,
            advance_at: None,
            rng: SmallRng::from_entropy(),
        }
    }

    #[cfg(test)]
    pub fn with_seed(config: Config, question_bank: Vec<Question>, seed: u64) -> Self {
        let mut app = Self::new(config, question_bank);
        app.rng = SmallRng::seed_from_u64(seed);
        app
    }

    /// Draws a fresh shuffled, capped round from the bank and starts it.
    pub fn start_session(&mut self) {
        let round = loader::select(
            self.question_bank.clone(),
            self.config.question_count,
            &mut self.rng,
        );
        self.session = Session::new(round, self.config.passing_threshold);
        self.session.start(&mut self.feedback);
        self.advance_at = None;

        if self.session.state() == SessionState::Complete {
            self.last_result = self.session.final_result().ok();
            self.screen = AppScreen::Result;
        } else {
            self.shown_question = self.session.current_question().ok().cloned();
            self.screen = AppScreen::Quiz;
        }
    }

    /// Inputs are dead while feedback is showing; the session's own state
    /// guard backs this up.
    pub fn answer(&mut self, choice: Answer) {
        if self.session.state() != SessionState::AwaitingAnswer {
            return;
        }
        self.shown_question = self.session.current_question().ok().cloned();
        if self.session.answer(choice, &mut self.feedback).is_ok() {
            self.schedule_advance();
        }
    }

    pub fn skip(&mut self) {
        if self.session.state() != SessionState::AwaitingAnswer {
            return;
        }
        self.shown_question = self.session.current_question().ok().cloned();
        if self.session.skip(&mut self.feedback).is_ok() {
            self.schedule_advance();
        }
    }

    fn schedule_advance(&mut self) {
        self.advance_at = Some(Instant::now() + Duration::from_millis(self.config.advance_delay_ms));
    }

    /// Called on every tick; fires the pending advance once the delay is up.
    pub fn on_tick(&mut self) {
        let due = self.advance_at.is_some_and(|at| Instant::now() >= at);
        if !due {
            return;
        }
        self.advance_at = None;
        self.advance();
    }

    fn advance(&mut self) {
        if self.session.advance(&mut self.feedback).is_err() {
            return;
        }
        match self.session.state() {
            SessionState::AwaitingAnswer => {
                self.feedback.banner = None;
                self.shown_question = self.session.current_question().ok().cloned();
            }
            SessionState::Complete => {
                self.last_result = self.session.final_result().ok();
                self.shown_question = None;
                self.screen = AppScreen::Result;
            }
            SessionState::Advancing => {}
        }
    }

    pub fn retry_session(&mut self) {
        self.start_session();
    }

    pub fn go_to_menu(&mut self) {
        self.screen = AppScreen::Menu;
        self.shown_question = None;
        self.advance_at = None;
        self.feedback = Feedback::default();
    }

    pub fn go_to_settings(&mut self) {
        self.settings_selected = 0;
        self.screen = AppScreen::Settings;
    }

    pub fn settings_cycle_forward(&mut self) {
        match self.settings_selected {
            0 => {
                self.config.question_count = (self.config.question_count + 1).min(50);
            }
            1 => {
                self.config.passing_threshold = (self.config.passing_threshold + 0.5).min(50.0);
            }
            2 => {
                self.config.advance_delay_ms = (self.config.advance_delay_ms + 250).min(5000);
            }
            3 => self.cycle_theme(1),
            _ => {}
        }
    }

    pub fn settings_cycle_backward(&mut self) {
        match self.settings_selected {
            0 => {
                self.config.question_count = self.config.question_count.saturating_sub(1).max(1);
            }
            1 => {
                self.config.passing_threshold = (self.config.passing_threshold - 0.5).max(0.0);
            }
            2 => {
                self.config.advance_delay_ms = self.config.advance_delay_ms.saturating_sub(250);
            }
            3 => self.cycle_theme(-1),
            _ => {}
        }
    }

    fn cycle_theme(&mut self, direction: i64) {
        let themes = Theme::available_themes();
        if themes.is_empty() {
            return;
        }
        let idx = themes
            .iter()
            .position(|t| *t == self.config.theme)
            .unwrap_or(0) as i64;
        let next = (idx + direction).rem_euclid(themes.len() as i64) as usize;
        self.config.theme = themes[next].clone();
        if let Some(new_theme) = Theme::load(&self.config.theme) {
            let theme: &'static Theme = Box::leak(Box::new(new_theme));
            self.theme = theme;
            self.menu.theme = theme;
        }
    }

    pub fn advancing(&self) -> bool {
        self.session.state() == SessionState::Advancing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        let mut config = Config::default();
        config.question_count = 2;
        config.advance_delay_ms = 0;
        config
    }

    fn bank() -> Vec<Question> {
        vec![
            Question::new(Answer::Yes, "Q1"),
            Question::new(Answer::No, "Q2"),
        ]
    }

    #[test]
    fn test_start_session_enters_quiz_screen() {
        let mut app = App::with_seed(test_config(), bank(), 1);
        app.start_session();
        assert_eq!(app.screen, AppScreen::Quiz);
        assert!(app.shown_question.is_some());
        assert_eq!(app.session.question_count(), 2);
    }

    #[test]
    fn test_empty_bank_goes_straight_to_result() {
        let mut app = App::with_seed(test_config(), Vec::new(), 1);
        app.start_session();
        assert_eq!(app.screen, AppScreen::Result);
        let result = app.last_result.unwrap();
        assert_eq!(result.score, 0.0);
        assert!(!result.passed);
    }

    #[test]
    fn test_answer_shows_banner_and_blocks_input() {
        let mut app = App::with_seed(test_config(), bank(), 1);
        app.start_session();
        let expected = app.shown_question.clone();

        let first = app.session.current_question().unwrap().expected;
        app.answer(first);
        assert_eq!(app.feedback.banner, Some(FeedbackKind::Correct));
        assert!(app.advancing());
        // The answered question stays on screen during feedback,
        // and further inputs are ignored.
        assert_eq!(app.shown_question, expected);
        let score = app.session.score();
        app.answer(Answer::Yes);
        app.skip();
        assert_eq!(app.session.score(), score);
    }

    #[test]
    fn test_tick_advances_after_deadline() {
        let mut app = App::with_seed(test_config(), bank(), 1);
        app.start_session();

        let first = app.session.current_question().unwrap().expected;
        app.answer(first);
        // Delay is zero, so the next tick fires the advance.
        app.on_tick();
        assert_eq!(app.session.state(), SessionState::AwaitingAnswer);
        assert!(app.feedback.banner.is_none());

        app.skip();
        assert_eq!(app.feedback.banner, Some(FeedbackKind::Skipped));
        app.on_tick();
        assert_eq!(app.screen, AppScreen::Result);
        assert_eq!(app.last_result.unwrap().score, 1.0);
    }

    #[test]
    fn test_tick_without_pending_advance_is_noop() {
        let mut app = App::with_seed(test_config(), bank(), 1);
        app.start_session();
        app.on_tick();
        assert_eq!(app.session.state(), SessionState::AwaitingAnswer);
    }

    #[test]
    fn test_wrong_answer_banner_names_correct_answer() {
        let mut app = App::with_seed(test_config(), bank(), 1);
        app.start_session();
        let expected = app.session.current_question().unwrap().expected;
        let wrong = match expected {
            Answer::Yes => Answer::No,
            Answer::No => Answer::Yes,
        };
        app.answer(wrong);
        assert_eq!(app.feedback.banner, Some(FeedbackKind::Incorrect(expected)));
        assert_eq!(app.session.score(), 0.0);
    }

    #[test]
    fn test_settings_clamp_at_bounds() {
        let mut app = App::with_seed(test_config(), bank(), 1);
        app.settings_selected = 0;
        app.config.question_count = 1;
        app.settings_cycle_backward();
        assert_eq!(app.config.question_count, 1);

        app.settings_selected = 1;
        app.config.passing_threshold = 0.0;
        app.settings_cycle_backward();
        assert_eq!(app.config.passing_threshold, 0.0);

        app.settings_selected = 2;
        app.config.advance_delay_ms = 0;
        app.settings_cycle_backward();
        assert_eq!(app.config.advance_delay_ms, 0);
    }
}
