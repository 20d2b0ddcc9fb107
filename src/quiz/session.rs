use thiserror::Error;

use crate::quiz::question::{Answer, Question};

/// Where the session is between user actions.
///
/// `Advancing` covers the window where feedback for the previous answer
/// is on screen and inputs are dead; the host calls [`Session::advance`]
/// once its delay elapses. The session itself never touches the clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    AwaitingAnswer,
    Advancing,
    Complete,
}

impl SessionState {
    pub fn as_str(self) -> &'static str {
        match self {
            SessionState::AwaitingAnswer => "awaiting-answer",
            SessionState::Advancing => "advancing",
            SessionState::Complete => "complete",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AnswerOutcome {
    Correct,
    Incorrect { correct_answer: Answer },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FinalResult {
    pub score: f64,
    pub passed: bool,
}

/// Contract violation: an operation was called outside its legal state.
/// The UI prevents this by construction, but the session guards anyway.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("{op} called in {state} state", state = .state.as_str())]
pub struct InvalidStateError {
    pub op: &'static str,
    pub state: SessionState,
}

/// Hooks the session fires toward the presentation layer. The host drives
/// the session with direct calls and gets feedback pushed through these.
pub trait SessionObserver {
    fn on_session_start(&mut self, _first_question: &Question) {}
    fn on_answer_result(&mut self, _outcome: AnswerOutcome, _score: f64) {}
    fn on_skip(&mut self) {}
    fn on_session_complete(&mut self, _score: f64, _passed: bool) {}
}

/// No-op observer for callers that only want the return values.
impl SessionObserver for () {}

/// One run through a fixed, already shuffled-and-capped question list.
///
/// Single-owner, synchronous: exactly one call per user action, no
/// internal timers, no concurrent mutation.
pub struct Session {
    questions: Vec<Question>,
    current_index: usize,
    score: f64,
    state: SessionState,
    passing_threshold: f64,
}

impl Session {
    pub fn new(questions: Vec<Question>, passing_threshold: f64) -> Self {
        Self {
            questions,
            current_index: 0,
            score: 0.0,
            state: SessionState::Complete,
            passing_threshold,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    /// Resets to the first question. An empty question list completes
    /// immediately with a score of 0.0.
    pub fn start(&mut self, observer: &mut dyn SessionObserver) {
        self.current_index = 0;
        self.score = 0.0;
        if self.questions.is_empty() {
            self.state = SessionState::Complete;
            observer.on_session_complete(self.score, self.passed());
        } else {
            self.state = SessionState::AwaitingAnswer;
            observer.on_session_start(&self.questions[0]);
        }
    }

    pub fn current_question(&self) -> Result<&Question, InvalidStateError> {
        self.check_state("current_question", SessionState::AwaitingAnswer)?;
        Ok(&self.questions[self.current_index])
    }

    /// Scores one answer: +1.0 for a match, -0.5 otherwise, never below
    /// 0.0. Moves to the next question and enters `Advancing`.
    pub fn answer(
        &mut self,
        choice: Answer,
        observer: &mut dyn SessionObserver,
    ) -> Result<AnswerOutcome, InvalidStateError> {
        self.check_state("answer", SessionState::AwaitingAnswer)?;

        let expected = self.questions[self.current_index].expected;
        let outcome = if choice == expected {
            self.score += 1.0;
            AnswerOutcome::Correct
        } else {
            self.score = (self.score - 0.5).max(0.0);
            AnswerOutcome::Incorrect {
                correct_answer: expected,
            }
        };

        self.current_index += 1;
        self.state = SessionState::Advancing;
        observer.on_answer_result(outcome, self.score);
        Ok(outcome)
    }

    /// Passes on the current question without touching the score.
    pub fn skip(&mut self, observer: &mut dyn SessionObserver) -> Result<(), InvalidStateError> {
        self.check_state("skip", SessionState::AwaitingAnswer)?;
        self.current_index += 1;
        self.state = SessionState::Advancing;
        observer.on_skip();
        Ok(())
    }

    /// Called by the host once its inter-question delay has elapsed.
    pub fn advance(&mut self, observer: &mut dyn SessionObserver) -> Result<(), InvalidStateError> {
        self.check_state("advance", SessionState::Advancing)?;
        if self.current_index < self.questions.len() {
            self.state = SessionState::AwaitingAnswer;
        } else {
            self.state = SessionState::Complete;
            observer.on_session_complete(self.score, self.passed());
        }
        Ok(())
    }

    pub fn final_result(&self) -> Result<FinalResult, InvalidStateError> {
        self.check_state("final_result", SessionState::Complete)?;
        Ok(FinalResult {
            score: self.score,
            passed: self.passed(),
        })
    }

    fn passed(&self) -> bool {
        self.score >= self.passing_threshold
    }

    fn check_state(
        &self,
        op: &'static str,
        expected: SessionState,
    ) -> Result<(), InvalidStateError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(InvalidStateError {
                op,
                state: self.state,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const THRESHOLD: f64 = 8.5;

    fn two_question_session() -> Session {
        Session::new(
            vec![
                Question::new(Answer::Yes, "Q1"),
                Question::new(Answer::No, "Q2"),
            ],
            THRESHOLD,
        )
    }

    fn assert_invariants(session: &Session) {
        assert!(session.current_index() <= session.question_count());
        assert!(session.score() >= 0.0);
    }

    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
    }

    impl SessionObserver for Recorder {
        fn on_session_start(&mut self, first_question: &Question) {
            self.events.push(format!("start:{}", first_question.text));
        }

        fn on_answer_result(&mut self, outcome: AnswerOutcome, score: f64) {
            let tag = match outcome {
                AnswerOutcome::Correct => "correct".to_string(),
                AnswerOutcome::Incorrect { correct_answer } => {
                    format!("incorrect({})", correct_answer.as_str())
                }
            };
            self.events.push(format!("answer:{tag}:{score}"));
        }

        fn on_skip(&mut self) {
            self.events.push("skip".to_string());
        }

        fn on_session_complete(&mut self, score: f64, passed: bool) {
            self.events.push(format!("complete:{score}:{passed}"));
        }
    }

    #[test]
    fn test_two_question_scenario() {
        let mut session = two_question_session();
        session.start(&mut ());
        assert_eq!(session.state(), SessionState::AwaitingAnswer);
        assert_eq!(session.current_question().unwrap().text, "Q1");

        let outcome = session.answer(Answer::Yes, &mut ()).unwrap();
        assert_eq!(outcome, AnswerOutcome::Correct);
        assert_eq!(session.score(), 1.0);
        assert_eq!(session.state(), SessionState::Advancing);
        assert_invariants(&session);

        session.advance(&mut ()).unwrap();
        assert_eq!(session.state(), SessionState::AwaitingAnswer);

        let outcome = session.answer(Answer::Yes, &mut ()).unwrap();
        assert_eq!(
            outcome,
            AnswerOutcome::Incorrect {
                correct_answer: Answer::No
            }
        );
        assert_eq!(session.score(), 0.5);
        assert_invariants(&session);

        session.advance(&mut ()).unwrap();
        assert_eq!(session.state(), SessionState::Complete);

        let result = session.final_result().unwrap();
        assert_eq!(result.score, 0.5);
        assert!(!result.passed);
    }

    #[test]
    fn test_score_clamps_at_zero() {
        let mut session = two_question_session();
        session.start(&mut ());
        // Wrong on the first question from 0.0 stays at 0.0, not -0.5.
        session.answer(Answer::No, &mut ()).unwrap();
        assert_eq!(session.score(), 0.0);
        session.advance(&mut ()).unwrap();
        session.answer(Answer::Yes, &mut ()).unwrap();
        assert_eq!(session.score(), 0.0);
        assert_invariants(&session);
    }

    #[test]
    fn test_skip_leaves_score_untouched() {
        let mut session = two_question_session();
        session.start(&mut ());
        session.answer(Answer::Yes, &mut ()).unwrap();
        session.advance(&mut ()).unwrap();
        session.skip(&mut ()).unwrap();
        assert_eq!(session.score(), 1.0);
        assert_eq!(session.state(), SessionState::Advancing);
        session.advance(&mut ()).unwrap();
        assert_eq!(session.state(), SessionState::Complete);
    }

    #[test]
    fn test_empty_session_completes_immediately() {
        let mut session = Session::new(Vec::new(), THRESHOLD);
        session.start(&mut ());
        assert_eq!(session.state(), SessionState::Complete);
        let result = session.final_result().unwrap();
        assert_eq!(result.score, 0.0);
        assert!(!result.passed);
    }

    #[test]
    fn test_final_result_is_idempotent() {
        let mut session = Session::new(vec![Question::new(Answer::Yes, "Q1")], THRESHOLD);
        session.start(&mut ());
        session.answer(Answer::Yes, &mut ()).unwrap();
        session.advance(&mut ()).unwrap();
        let first = session.final_result().unwrap();
        let second = session.final_result().unwrap();
        assert_eq!(first, second);
    }

    fn run_all_yes(question_count: usize, wrong: usize, threshold: f64) -> FinalResult {
        let questions: Vec<Question> = (0..question_count)
            .map(|i| Question::new(Answer::Yes, format!("Q{i}")))
            .collect();
        let mut session = Session::new(questions, threshold);
        session.start(&mut ());
        for i in 0..question_count {
            let choice = if i < wrong { Answer::No } else { Answer::Yes };
            session.answer(choice, &mut ()).unwrap();
            session.advance(&mut ()).unwrap();
        }
        session.final_result().unwrap()
    }

    #[test]
    fn test_passing_threshold_is_inclusive() {
        // Landing exactly on the threshold counts as a pass.
        let exact = run_all_yes(9, 0, 9.0);
        assert_eq!(exact.score, 9.0);
        assert!(exact.passed);

        // One wrong answer costs 1.5 relative to a correct one.
        let short = run_all_yes(9, 1, THRESHOLD);
        assert_eq!(short.score, 7.5);
        assert!(!short.passed);
    }

    #[test]
    fn test_operations_outside_legal_state_fail() {
        let mut session = two_question_session();
        session.start(&mut ());

        let err = session.advance(&mut ()).unwrap_err();
        assert_eq!(err.op, "advance");
        assert_eq!(err.state, SessionState::AwaitingAnswer);
        assert!(session.final_result().is_err());

        session.answer(Answer::Yes, &mut ()).unwrap();
        assert!(session.answer(Answer::Yes, &mut ()).is_err());
        assert!(session.skip(&mut ()).is_err());
        assert!(session.current_question().is_err());

        session.advance(&mut ()).unwrap();
        session.skip(&mut ()).unwrap();
        session.advance(&mut ()).unwrap();
        assert_eq!(session.state(), SessionState::Complete);
        let err = session.answer(Answer::Yes, &mut ()).unwrap_err();
        assert_eq!(err.state, SessionState::Complete);
        assert!(err.to_string().contains("complete"));
    }

    #[test]
    fn test_index_advances_by_one_per_action() {
        let mut session = two_question_session();
        session.start(&mut ());
        assert_eq!(session.current_index(), 0);
        session.answer(Answer::Yes, &mut ()).unwrap();
        assert_eq!(session.current_index(), 1);
        session.advance(&mut ()).unwrap();
        session.skip(&mut ()).unwrap();
        assert_eq!(session.current_index(), 2);
        assert_invariants(&session);
    }

    #[test]
    fn test_observer_sees_full_session() {
        let mut session = two_question_session();
        let mut recorder = Recorder::default();
        session.start(&mut recorder);
        session.answer(Answer::Yes, &mut recorder).unwrap();
        session.advance(&mut recorder).unwrap();
        session.skip(&mut recorder).unwrap();
        session.advance(&mut recorder).unwrap();

        assert_eq!(
            recorder.events,
            vec![
                "start:Q1".to_string(),
                "answer:correct:1".to_string(),
                "skip".to_string(),
                "complete:1:false".to_string(),
            ]
        );
    }

    #[test]
    fn test_observer_notified_on_empty_start() {
        let mut session = Session::new(Vec::new(), THRESHOLD);
        let mut recorder = Recorder::default();
        session.start(&mut recorder);
        assert_eq!(recorder.events, vec!["complete:0:false".to_string()]);
    }
}
