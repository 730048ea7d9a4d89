use std::fs;
use std::path::Path;

use crate::model::LeaderboardRow;
use crate::store::{Leaderboard, StoreError, StoreLock};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    Created,
    Appended { rows: usize },
    AlreadyExists { username: String },
}

pub fn run_stage3(
    store_path: &Path,
    candidate: LeaderboardRow,
) -> Result<UpdateOutcome, StoreError> {
    if let Some(dir) = store_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|e| StoreError::Write {
            path: dir.display().to_string(),
            source: e,
        })?;
    }

    let _lock = StoreLock::acquire(store_path)?;
    let mut board = Leaderboard::open(store_path)?;

    if board.contains_username(&candidate.username) {
        return Ok(UpdateOutcome::AlreadyExists {
            username: candidate.username,
        });
    }

    let created = !board.exists();
    board.append_and_persist(candidate)?;
    if created {
        Ok(UpdateOutcome::Created)
    } else {
        Ok(UpdateOutcome::Appended { rows: board.len() })
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_commit.rs"]
mod tests;
