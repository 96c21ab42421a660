//! Catalog maintenance commands: rebuild-index, validate-all.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use clitpl_types::validation::BatchReport;

use crate::state::AppState;

fn spinner(message: &'static str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(template) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        spinner.set_style(template);
    }
    spinner.set_message(message);
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner
}

/// Regenerate `templates/index.json`. Returns whether the command succeeded.
pub async fn rebuild_index(state: &AppState) -> Result<bool> {
    let spinner = spinner("Rebuilding index...");
    let result = state.catalog_service.rebuild_index().await;
    spinner.finish_and_clear();

    let summary = result?;
    println!(
        "  {} Wrote {} ({} {})",
        style("✓").green().bold(),
        style(state.layout.relative(&summary.path).display()).cyan(),
        summary.entries,
        if summary.entries == 1 { "entry" } else { "entries" }
    );
    Ok(true)
}

/// Validate every stored entry, printing per-file violations.
pub async fn validate_all(state: &AppState) -> Result<bool> {
    let spinner = spinner("Validating entries...");
    let result = state.catalog_service.validate_all().await;
    spinner.finish_and_clear();

    let report = result?;
    if report.is_success() {
        println!(
            "  {} All {} entries match the schema",
            style("✓").green().bold(),
            report.checked
        );
        return Ok(true);
    }

    println!("{}", failure_table(&report));
    println!();
    println!(
        "  {} {} of {} entries failed schema validation",
        style("✗").red().bold(),
        report.failures.len(),
        report.checked
    );
    Ok(false)
}

/// One row per violation, grouped by file.
pub fn failure_table(report: &BatchReport) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("File").fg(Color::White),
        Cell::new("Location").fg(Color::White),
        Cell::new("Problem").fg(Color::White),
    ]);

    for failure in &report.failures {
        for violation in &failure.violations {
            let location = if violation.instance_path.is_empty() {
                "/"
            } else {
                violation.instance_path.as_str()
            };
            table.add_row(vec![
                Cell::new(failure.path.display()).fg(Color::Cyan),
                Cell::new(location).fg(Color::Yellow),
                Cell::new(&violation.message),
            ]);
        }
    }

    table
}
