//! Decoder for the `top_results` string returned by `/ask`.
//!
//! Grammar (one record per line, blank lines skipped, trailing `\r` removed):
//!
//! ```text
//! record := "Score: " float ", Relevant Chunk: " text
//! ```
//!
//! The chunk is everything after the first separator, verbatim, so it may
//! itself contain the separator, commas, or colons. It cannot contain a
//! newline; the backend applies no escaping.

use thiserror::Error;

use crate::RankedChunk;

pub const SCORE_PREFIX: &str = "Score: ";
pub const CHUNK_SEPARATOR: &str = ", Relevant Chunk: ";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TopResultsError {
    #[error("line {line}: missing \", Relevant Chunk: \" separator")]
    MissingSeparator { line: usize },
    #[error("line {line}: expected \"Score: \" before the score")]
    MissingScoreLabel { line: usize },
    #[error("line {line}: invalid score {value:?}")]
    InvalidScore { line: usize, value: String },
}

impl TopResultsError {
    /// 1-based line of the offending record.
    pub fn line(&self) -> usize {
        match self {
            TopResultsError::MissingSeparator { line }
            | TopResultsError::MissingScoreLabel { line }
            | TopResultsError::InvalidScore { line, .. } => *line,
        }
    }
}

/// Decode every record in order. The first malformed record aborts decoding.
pub fn decode_top_results(raw: &str) -> Result<Vec<RankedChunk>, TopResultsError> {
    raw.split('\n')
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.strip_suffix('\r').unwrap_or(line)))
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(line_no, record)| decode_record(line_no, record))
        .collect()
}

fn decode_record(line: usize, record: &str) -> Result<RankedChunk, TopResultsError> {
    let (score_part, chunk) = record
        .split_once(CHUNK_SEPARATOR)
        .ok_or(TopResultsError::MissingSeparator { line })?;
    let value = score_part
        .trim_start()
        .strip_prefix(SCORE_PREFIX)
        .ok_or(TopResultsError::MissingScoreLabel { line })?;
    let score = value
        .trim()
        .parse::<f64>()
        .map_err(|_| TopResultsError::InvalidScore {
            line,
            value: value.to_string(),
        })?;
    Ok(RankedChunk {
        score,
        chunk: chunk.to_string(),
    })
}
