use chrono::{DateTime, NaiveDateTime, Utc};
use csv::StringRecord;
use serde::Serialize;

use crate::input::{MetadataField, RunMetadata, ScoreRecord};

pub const COLUMNS: [&str; 10] = [
    "username",
    "timestamp_utc",
    "team",
    "run_id",
    "type",
    "model",
    "macro_f1",
    "accuracy",
    "precision",
    "recall",
];

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardRow {
    pub username: String,
    pub timestamp_utc: String,
    pub team: String,
    pub run_id: String,
    #[serde(rename = "type")]
    pub run_type: String,
    pub model: String,
    pub macro_f1: f64,
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowShapeError {
    pub column: Option<&'static str>,
    pub message: String,
}

impl LeaderboardRow {
    pub fn new(
        username: &str,
        captured_at: DateTime<Utc>,
        meta: &RunMetadata,
        scores: &ScoreRecord,
    ) -> Self {
        Self {
            username: username.to_string(),
            timestamp_utc: format_timestamp(captured_at),
            team: meta.get(MetadataField::Team).to_string(),
            run_id: meta.get(MetadataField::RunId).to_string(),
            run_type: meta.get(MetadataField::Type).to_string(),
            model: meta.get(MetadataField::Model).to_string(),
            macro_f1: scores.macro_f1,
            accuracy: scores.accuracy,
            precision: scores.precision,
            recall: scores.recall,
        }
    }

    pub fn to_record(&self) -> StringRecord {
        let mut record = StringRecord::with_capacity(128, COLUMNS.len());
        record.push_field(&self.username);
        record.push_field(&self.timestamp_utc);
        record.push_field(&self.team);
        record.push_field(&self.run_id);
        record.push_field(&self.run_type);
        record.push_field(&self.model);
        for v in [self.macro_f1, self.accuracy, self.precision, self.recall] {
            record.push_field(&format_score(v));
        }
        record
    }

    pub fn from_record(record: &StringRecord) -> Result<Self, RowShapeError> {
        if record.len() != COLUMNS.len() {
            return Err(RowShapeError {
                column: None,
                message: format!("expected {} fields, found {}", COLUMNS.len(), record.len()),
            });
        }
        let text = |idx: usize| record.get(idx).unwrap_or("").to_string();
        let score = |idx: usize| -> Result<f64, RowShapeError> {
            let raw = record.get(idx).unwrap_or("").trim();
            raw.parse::<f64>().map_err(|_| RowShapeError {
                column: Some(COLUMNS[idx]),
                message: format!("not a number: {:?}", raw),
            })
        };
        Ok(Self {
            username: text(0),
            timestamp_utc: text(1),
            team: text(2),
            run_id: text(3),
            run_type: text(4),
            model: text(5),
            macro_f1: score(6)?,
            accuracy: score(7)?,
            precision: score(8)?,
            recall: score(9)?,
        })
    }

    pub fn captured_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.timestamp_utc)
    }
}

pub fn header_record() -> StringRecord {
    StringRecord::from(COLUMNS.to_vec())
}

pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(raw.trim(), TIMESTAMP_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

/// Shortest round-trip text, keeping a trailing `.0` on integral values.
pub fn format_score(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{:.1}", v)
    } else {
        format!("{}", v)
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/row.rs"]
mod tests;
