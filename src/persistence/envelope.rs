//! Versioned JSON envelope for stored scores
//!
//! Current layout: `{"version": 1, "scores": [ {score, player, timestamp}, ... ]}`.
//!
//! Older layouts still load:
//! - a bare array of integers
//! - a bare array of `{score, nickname, timestamp}` objects
//!
//! Items that don't parse are skipped rather than failing the whole file.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::PersistError;
use crate::highscores::{HighScores, ScoreRecord};

/// Envelope version written by this build
pub const FORMAT_VERSION: u32 = 1;

#[derive(Serialize)]
struct EnvelopeOut<'a> {
    version: u32,
    scores: &'a [ScoreRecord],
}

#[derive(Deserialize)]
struct EnvelopeIn {
    version: u32,
    #[serde(default)]
    scores: Vec<Value>,
}

/// Serialize a leaderboard into the current envelope
pub fn encode(scores: &HighScores) -> Result<String, PersistError> {
    let envelope = EnvelopeOut {
        version: FORMAT_VERSION,
        scores: scores.entries(),
    };
    Ok(serde_json::to_string(&envelope)?)
}

/// Parse any known layout into a leaderboard
pub fn decode(text: &str) -> Result<HighScores, PersistError> {
    let value: Value = serde_json::from_str(text)?;
    let items = match value {
        Value::Array(items) => items,
        Value::Object(_) => {
            let envelope: EnvelopeIn = serde_json::from_value(value)?;
            if envelope.version > FORMAT_VERSION {
                return Err(PersistError::UnsupportedVersion(envelope.version));
            }
            envelope.scores
        }
        other => {
            return Err(PersistError::Malformed(format!(
                "expected an object or array, found {}",
                json_kind(&other)
            )));
        }
    };

    let total = items.len();
    let records: Vec<ScoreRecord> = items.into_iter().filter_map(parse_item).collect();
    if records.len() < total {
        log::warn!("Skipped {} unreadable score entries", total - records.len());
    }
    Ok(HighScores::from_records(records))
}

fn parse_item(item: Value) -> Option<ScoreRecord> {
    match item {
        Value::Number(n) => {
            let score = u32::try_from(n.as_u64()?).ok()?;
            Some(ScoreRecord::new(score, None, 0.0))
        }
        Value::Object(_) => serde_json::from_value(item).ok(),
        _ => None,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
