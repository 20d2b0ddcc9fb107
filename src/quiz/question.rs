#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Answer {
    Yes,
    No,
}

impl Answer {
    pub fn as_str(self) -> &'static str {
        match self {
            Answer::Yes => "Yes",
            Answer::No => "No",
        }
    }
}

/// A single true/false prompt. Immutable once parsed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Question {
    pub expected: Answer,
    pub text: String,
}

impl Question {
    pub fn new(expected: Answer, text: impl Into<String>) -> Self {
        Self {
            expected,
            text: text.into(),
        }
    }
}

/// Maps the two answer tokens in a question file to Yes/No.
///
/// The tokens are configuration, not constants: question files in the
/// wild use locale-specific letters.
#[derive(Clone, Debug)]
pub struct TokenMap {
    yes: String,
    no: String,
}

impl TokenMap {
    pub fn new(yes: &str, no: &str) -> Self {
        Self {
            yes: yes.trim().to_lowercase(),
            no: no.trim().to_lowercase(),
        }
    }

    pub fn parse(&self, token: &str) -> Option<Answer> {
        let token = token.trim().to_lowercase();
        if token == self.yes {
            Some(Answer::Yes)
        } else if token == self.no {
            Some(Answer::No)
        } else {
            None
        }
    }
}

impl Default for TokenMap {
    fn default() -> Self {
        Self::new("y", "n")
    }
}
