use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rand::Rng;
use rand::seq::SliceRandom;
use rust_embed::Embed;
use thiserror::Error;

use crate::quiz::question::{Question, TokenMap};

/// Question set bundled into the binary, used when no file is configured.
#[derive(Embed)]
#[folder = "assets/questions/"]
struct QuestionAssets;

pub const DEFAULT_QUESTION_SET: &str = "general.csv";

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read question file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("bundled question set {0} is missing or not valid UTF-8")]
    MissingAsset(String),
}

/// Parses question lines: one question per line, `<token>,<text>`,
/// split on the first comma, both fields trimmed.
///
/// Lines that don't split into exactly two fields, or whose token maps
/// to neither answer, are skipped rather than rejected. File order is
/// preserved and an empty result is legal.
pub fn parse_lines<'a>(
    lines: impl IntoIterator<Item = &'a str>,
    tokens: &TokenMap,
) -> Vec<Question> {
    lines
        .into_iter()
        .filter_map(|line| {
            let (token, text) = line.split_once(',')?;
            let answer = tokens.parse(token)?;
            let text = text.trim();
            if text.is_empty() {
                return None;
            }
            Some(Question::new(answer, text))
        })
        .collect()
}

/// Loads questions from a file on disk. Missing/unreadable files are a
/// single error kind; malformed lines inside a readable file are not.
pub fn load_questions(path: &Path, tokens: &TokenMap) -> Result<Vec<Question>, LoadError> {
    let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_lines(content.lines(), tokens))
}

/// Loads the embedded default question set.
pub fn load_embedded(tokens: &TokenMap) -> Result<Vec<Question>, LoadError> {
    let file = QuestionAssets::get(DEFAULT_QUESTION_SET)
        .ok_or_else(|| LoadError::MissingAsset(DEFAULT_QUESTION_SET.to_string()))?;
    let content = std::str::from_utf8(file.data.as_ref())
        .map_err(|_| LoadError::MissingAsset(DEFAULT_QUESTION_SET.to_string()))?;
    Ok(parse_lines(content.lines(), tokens))
}

/// Uniformly shuffles the full set, then keeps the first `count`
/// questions (all of them if the set is smaller). The order is fixed for
/// the rest of the session.
pub fn select(mut questions: Vec<Question>, count: usize, rng: &mut impl Rng) -> Vec<Question> {
    questions.shuffle(rng);
    questions.truncate(count);
    questions
}
