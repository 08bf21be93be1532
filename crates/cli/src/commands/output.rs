//! Rendering of ranked opportunities.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use odds_arb_detector::{ArbitrageOpportunity, DetectionReport};

/// Output format for detection results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Fixed-width table for the terminal
    #[default]
    Table,
    /// JSON array of records
    Json,
    /// CSV with one row per record
    Csv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

const TABLE_HEADERS: [&str; 7] = ["Game", "Market", "Bet 1", "Bet 2", "Stake", "Profit", "ROI"];

const CSV_COLUMNS: [&str; 15] = [
    "game",
    "market",
    "book1",
    "book2",
    "team1",
    "team2",
    "odds1",
    "odds2",
    "stake1",
    "stake2",
    "total_stake",
    "profit",
    "roi",
    "arb_percent",
    "timestamp",
];

/// Writes the report to `output`, or stdout when no path is given.
///
/// # Errors
///
/// Returns an error if the file cannot be created or writing fails.
pub fn emit(report: &DetectionReport, format: OutputFormat, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            let mut file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            write_report(report, format, &mut file)?;
            file.flush()?;
        }
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            write_report(report, format, &mut lock)?;
            lock.flush()?;
        }
    }
    Ok(())
}

/// Renders the report's opportunities in the given format.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_report(
    report: &DetectionReport,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<()> {
    match format {
        OutputFormat::Table => {
            out.write_all(render_table(&report.opportunities).as_bytes())?;
            if let Some(best) = report.summary.best_roi {
                writeln!(out, "Best ROI: {best:.2}%")?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &report.opportunities)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => write_csv(&report.opportunities, out)?,
    }
    Ok(())
}

fn table_row(opp: &ArbitrageOpportunity) -> [String; 7] {
    [
        opp.game.clone(),
        opp.market.to_string(),
        opp.leg1_label(),
        opp.leg2_label(),
        format!("${:.2}", opp.total_stake),
        format!("${:.2}", opp.profit),
        format!("{:.2}%", opp.roi),
    ]
}

/// Renders a fixed-width table, one line per opportunity.
#[must_use]
pub fn render_table(opportunities: &[ArbitrageOpportunity]) -> String {
    if opportunities.is_empty() {
        return "No arbitrage opportunities found.\n".to_string();
    }

    let rows: Vec<[String; 7]> = opportunities.iter().map(table_row).collect();

    let mut widths = TABLE_HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    let mut table = String::new();
    push_line(&mut table, &TABLE_HEADERS.map(str::to_string), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    table.push_str(rule.join("  ").as_str());
    table.push('\n');
    for row in &rows {
        push_line(&mut table, row, &widths);
    }
    table
}

fn push_line(table: &mut String, cells: &[String; 7], widths: &[usize; 7]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(column, (cell, &width))| {
            // text columns left-aligned, money and percentages right-aligned
            if column < 4 {
                format!("{cell:<width$}")
            } else {
                format!("{cell:>width$}")
            }
        })
        .collect();
    table.push_str(line.join("  ").trim_end());
    table.push('\n');
}

/// Writes a header row plus one row per opportunity.
///
/// # Errors
///
/// Returns an error if a record cannot be serialized or written.
pub fn write_csv(opportunities: &[ArbitrageOpportunity], out: &mut dyn Write) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(out);

    writer.write_record(CSV_COLUMNS)?;
    for opp in opportunities {
        writer.serialize(opp)?;
    }
    writer.flush()?;
    Ok(())
}
