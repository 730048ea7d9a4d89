use crate::report::RankReport;

pub fn render_rank_json(report: &RankReport) -> Result<String, serde_json::Error> {
    let mut out = serde_json::to_string_pretty(report)?;
    out.push('\n');
    Ok(out)
}
