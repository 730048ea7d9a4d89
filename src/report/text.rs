use crate::model::row::format_score;
use crate::report::RankReport;

const HEADERS: [&str; 9] = [
    "Rank",
    "Team",
    "Type",
    "Model",
    "Macro-F1",
    "Accuracy",
    "Precision",
    "Recall",
    "Date (UTC)",
];

pub fn render_rank_text(report: &RankReport) -> String {
    let mut table: Vec<[String; 9]> = Vec::with_capacity(report.rows.len());
    for ranked in &report.rows {
        let r = &ranked.row;
        table.push([
            ranked.rank.to_string(),
            r.team.clone(),
            r.run_type.clone(),
            r.model.clone(),
            format_score(r.macro_f1),
            format_score(r.accuracy),
            format_score(r.precision),
            format_score(r.recall),
            r.timestamp_utc.clone(),
        ]);
    }

    let mut widths = HEADERS.map(|h| h.chars().count());
    for cells in &table {
        for (w, cell) in widths.iter_mut().zip(cells.iter()) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    if !table.is_empty() {
        push_line(&mut out, &HEADERS.map(str::to_string), &widths);
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        out.push_str(rule.join("  ").trim_end());
        out.push('\n');
        for cells in &table {
            push_line(&mut out, cells, &widths);
        }
    }

    if report.count == 0 {
        out.push_str("No results\n");
    } else {
        out.push_str(&format!("{} result(s)\n", report.count));
    }
    out
}

fn push_line(out: &mut String, cells: &[String; 9], widths: &[usize; 9]) {
    let mut parts = Vec::with_capacity(cells.len());
    for (idx, cell) in cells.iter().enumerate() {
        let pad = widths[idx].saturating_sub(cell.chars().count());
        // Rank and score columns are right-aligned.
        if idx == 0 || (4..8).contains(&idx) {
            parts.push(format!("{}{}", " ".repeat(pad), cell));
        } else {
            parts.push(format!("{}{}", cell, " ".repeat(pad)));
        }
    }
    out.push_str(parts.join("  ").trim_end());
    out.push('\n');
}
