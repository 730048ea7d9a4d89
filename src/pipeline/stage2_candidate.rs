use chrono::{DateTime, Utc};

use crate::model::LeaderboardRow;
use crate::pipeline::stage1_inputs::Stage1Output;

/// `now` is the capture time of the update itself, never a time taken from
/// the submission's metadata.
pub fn run_stage2(inputs: &Stage1Output, now: DateTime<Utc>) -> LeaderboardRow {
    LeaderboardRow::new(&inputs.username, now, &inputs.metadata, &inputs.scores)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_candidate.rs"]
mod tests;
