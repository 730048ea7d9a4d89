use std::path::PathBuf;

use chrono::{DateTime, Utc};

use crate::error::AppError;

pub mod stage1_inputs;
pub mod stage2_candidate;
pub mod stage3_commit;

pub use stage3_commit::UpdateOutcome;

#[derive(Debug, Clone)]
pub struct UpdateRequest {
    pub score_path: PathBuf,
    pub metadata_path: PathBuf,
    pub username: String,
    pub store_path: PathBuf,
}

pub fn run_update(request: &UpdateRequest, now: DateTime<Utc>) -> Result<UpdateOutcome, AppError> {
    let inputs = stage1_inputs::run_stage1(
        &request.score_path,
        &request.metadata_path,
        &request.username,
    )?;
    let candidate = stage2_candidate::run_stage2(&inputs, now);
    let outcome = stage3_commit::run_stage3(&request.store_path, candidate)?;
    Ok(outcome)
}
