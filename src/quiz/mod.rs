pub mod loader;
pub mod question;
pub mod session;

pub use question::{Answer, Question, TokenMap};
pub use session::{AnswerOutcome, FinalResult, Session, SessionObserver, SessionState};
