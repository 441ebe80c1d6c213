//! Report rendering for the command line.

use colored::Colorize;

use crate::config::OutputFormat;
use crate::report::Report;

/// Renders finished reports in the requested format.
///
/// JSON output is a single object for one report and an array otherwise.
/// `max_recommendations == 0` keeps every recommendation.
///
/// # Errors
///
/// Returns a `serde_json::Error` if a report cannot be serialized.
pub fn render_reports(
    reports: &[Report],
    format: OutputFormat,
    max_recommendations: usize,
) -> Result<String, serde_json::Error> {
    let reports: Vec<Report> = reports
        .iter()
        .cloned()
        .map(|mut report| {
            if max_recommendations > 0 {
                report.truncate_recommendations(max_recommendations);
            }
            report
        })
        .collect();

    match format {
        OutputFormat::Json => match reports.as_slice() {
            [report] => serde_json::to_string_pretty(report),
            reports => serde_json::to_string_pretty(reports),
        },
        OutputFormat::Text => Ok(reports
            .iter()
            .map(render_text)
            .collect::<Vec<_>>()
            .join("\n")),
    }
}

fn colored_score(score: u8) -> colored::ColoredString {
    let text = format!("{score}/100");
    match score {
        80..=100 => text.green(),
        50..=79 => text.yellow(),
        _ => text.red(),
    }
}

fn render_text(report: &Report) -> String {
    let mut out = format!(
        "{} {}\n",
        report.url.cyan().bold(),
        colored_score(report.overall_score)
    );

    for (kind, score) in report.scores() {
        let score = match score {
            Some(score) => colored_score(score).to_string(),
            None => "failed".red().to_string(),
        };
        out.push_str(&format!("  {:<20} {}\n", kind.as_str(), score));
    }

    out.push_str(&format!("\n{}\n", report.summary()));

    if !report.recommendations.is_empty() {
        out.push_str(&format!("\n{}\n", "Recommendations:".bold()));
        for (i, recommendation) in report.recommendations.iter().enumerate() {
            out.push_str(&format!("  {:>2}. {}\n", i + 1, recommendation));
        }
    }
    out
}
