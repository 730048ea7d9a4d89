use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::LeaderboardRow;

pub mod json;
pub mod text;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[value(alias = "macro_f1")]
    MacroF1,
    Accuracy,
    Precision,
    Recall,
    Team,
    Type,
    Model,
    Timestamp,
}

impl SortKey {
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            SortKey::MacroF1 | SortKey::Accuracy | SortKey::Precision | SortKey::Recall
        )
    }

    pub fn default_direction(self) -> SortDirection {
        if self.is_numeric() {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }

    fn numeric(self, row: &LeaderboardRow) -> f64 {
        let v = match self {
            SortKey::MacroF1 => row.macro_f1,
            SortKey::Accuracy => row.accuracy,
            SortKey::Precision => row.precision,
            SortKey::Recall => row.recall,
            _ => return f64::NEG_INFINITY,
        };
        if v.is_nan() { f64::NEG_INFINITY } else { v }
    }

    fn text(self, row: &LeaderboardRow) -> String {
        match self {
            SortKey::Team => row.team.to_lowercase(),
            SortKey::Type => row.run_type.to_lowercase(),
            SortKey::Model => row.model.to_lowercase(),
            SortKey::Timestamp => row.timestamp_utc.to_lowercase(),
            _ => String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone)]
pub struct RankQuery {
    pub sort: SortKey,
    pub direction: Option<SortDirection>,
    pub model: Option<String>,
    pub since_days: Option<u32>,
    pub search: Option<String>,
}

impl Default for RankQuery {
    fn default() -> Self {
        Self {
            sort: SortKey::MacroF1,
            direction: None,
            model: None,
            since_days: None,
            search: None,
        }
    }
}

impl RankQuery {
    pub fn direction(&self) -> SortDirection {
        self.direction
            .unwrap_or_else(|| self.sort.default_direction())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RankedRow {
    pub rank: usize,
    #[serde(flatten)]
    pub row: LeaderboardRow,
}

#[derive(Debug, Clone, Serialize)]
pub struct RankReport {
    pub sort: SortKey,
    pub direction: SortDirection,
    pub count: usize,
    pub rows: Vec<RankedRow>,
}

pub fn rank_rows<'a>(
    rows: impl IntoIterator<Item = &'a LeaderboardRow>,
    query: &RankQuery,
    now: DateTime<Utc>,
) -> RankReport {
    let model = query.model.as_deref().map(str::to_lowercase);
    let search = query
        .search
        .as_deref()
        .map(|q| q.trim().to_lowercase())
        .filter(|q| !q.is_empty());

    let mut kept: Vec<&LeaderboardRow> = rows
        .into_iter()
        .filter(|r| !r.team.is_empty())
        .filter(|r| match &model {
            Some(m) => r.model.to_lowercase() == *m,
            None => true,
        })
        .filter(|r| match query.since_days {
            Some(days) => within_days(r, days, now),
            None => true,
        })
        .filter(|r| match &search {
            Some(q) => haystack(r).contains(q.as_str()),
            None => true,
        })
        .collect();

    let direction = query.direction();
    let key = query.sort;
    kept.sort_by(|a, b| {
        let ord = if key.is_numeric() {
            key.numeric(a)
                .partial_cmp(&key.numeric(b))
                .unwrap_or(Ordering::Equal)
        } else {
            key.text(a).cmp(&key.text(b))
        };
        match direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });

    let rows = assign_ranks(&kept, key);
    RankReport {
        sort: key,
        direction,
        count: rows.len(),
        rows,
    }
}

/// Competition ranking on macro-F1 (equal scores share the first rank of
/// the run); any other key ranks by position.
fn assign_ranks(sorted: &[&LeaderboardRow], key: SortKey) -> Vec<RankedRow> {
    let mut out = Vec::with_capacity(sorted.len());
    let mut last: Option<(f64, usize)> = None;
    for (idx, row) in sorted.iter().enumerate() {
        let rank = if key == SortKey::MacroF1 {
            match last {
                Some((score, rank)) if score == row.macro_f1 => rank,
                _ => {
                    last = Some((row.macro_f1, idx + 1));
                    idx + 1
                }
            }
        } else {
            idx + 1
        };
        out.push(RankedRow {
            rank,
            row: (*row).clone(),
        });
    }
    out
}

fn within_days(row: &LeaderboardRow, days: u32, now: DateTime<Utc>) -> bool {
    let Some(at) = row.captured_at() else {
        return false;
    };
    let age_days = (now - at).num_seconds() as f64 / 86_400.0;
    age_days <= days as f64
}

fn haystack(row: &LeaderboardRow) -> String {
    format!(
        "{} {} {} {}",
        row.team, row.run_type, row.model, row.timestamp_utc
    )
    .to_lowercase()
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
