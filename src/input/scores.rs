use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::input::InputError;

pub const SCORE_FIELDS: [&str; 4] = ["macro_f1", "accuracy", "precision", "recall"];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreRecord {
    pub macro_f1: f64,
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
}

/// Reads the first line of `path`; anything after it is ignored.
pub fn load_scores(path: &Path) -> Result<ScoreRecord, InputError> {
    let file = File::open(path).map_err(|e| InputError::io(path, e))?;
    let mut reader = BufReader::new(file);
    let mut line = String::new();
    let read = reader
        .read_line(&mut line)
        .map_err(|e| InputError::io(path, e))?;
    if read == 0 {
        return Err(InputError::Parse(format!(
            "score file {} is empty",
            path.display()
        )));
    }
    parse_score_line(&line)
}

pub fn parse_score_line(line: &str) -> Result<ScoreRecord, InputError> {
    let fields: Vec<&str> = line.trim().split(',').map(str::trim).collect();
    if fields.len() != SCORE_FIELDS.len() {
        return Err(InputError::Parse(format!(
            "score line must have {} comma-separated values, found {}",
            SCORE_FIELDS.len(),
            fields.len()
        )));
    }

    let mut values = [0f64; 4];
    for (idx, raw) in fields.iter().enumerate() {
        values[idx] = raw.parse::<f64>().map_err(|_| {
            InputError::Parse(format!("{} is not a number: {:?}", SCORE_FIELDS[idx], raw))
        })?;
    }

    Ok(ScoreRecord {
        macro_f1: values[0],
        accuracy: values[1],
        precision: values[2],
        recall: values[3],
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/scores.rs"]
mod tests;
