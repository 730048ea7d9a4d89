use std::path::Path;

use crate::input::{
    InputError, RunMetadata, ScoreRecord, load_metadata, load_scores, validate_username,
};

#[derive(Debug, Clone)]
pub struct Stage1Output {
    pub username: String,
    pub scores: ScoreRecord,
    pub metadata: RunMetadata,
}

/// Parses every input up front so a bad submission never reaches the store.
pub fn run_stage1(
    score_path: &Path,
    metadata_path: &Path,
    username: &str,
) -> Result<Stage1Output, InputError> {
    let username = validate_username(username)?;
    let scores = load_scores(score_path)?;
    let metadata = load_metadata(metadata_path)?;
    tracing::info!(
        username,
        team = %metadata.team,
        run_id = %metadata.run_id,
        macro_f1 = scores.macro_f1,
        "submission inputs parsed"
    );
    Ok(Stage1Output {
        username: username.to_string(),
        scores,
        metadata,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_inputs.rs"]
mod tests;
