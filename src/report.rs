// Audit report: summary metrics, terminal table, JSON and XLSX export
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use serde::Serialize;
use std::path::Path;
use thiserror::Error;

use crate::batch::BatchOutcome;
use crate::types::{format_brl, ExtractionRecord, COLUMN_HEADERS};

pub const SPREADSHEET_FILE_NAME: &str = "relatorio_parcelamentos.xlsx";
pub const SPREADSHEET_MIME: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const SHEET_NAME: &str = "Parcelamentos";

const BALANCE_COLUMN: usize = 4;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("spreadsheet: {0}")]
    Xlsx(#[from] XlsxError),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BatchSummary {
    pub count: usize,
    pub total_balance: f64,
    pub max_balance: f64,
}

impl BatchSummary {
    pub fn from_records(records: &[ExtractionRecord]) -> Self {
        Self {
            count: records.len(),
            total_balance: records.iter().map(|r| r.balance).sum(),
            max_balance: records.iter().map(|r| r.balance).fold(0.0, f64::max),
        }
    }
}

/// Plain-text table in report column order, followed by the summary and
/// one line per failed file.
pub fn render_table(outcome: &BatchOutcome) -> String {
    let rows: Vec<[String; 6]> = outcome.records.iter().map(|r| r.columns()).collect();

    let mut widths: Vec<usize> = COLUMN_HEADERS.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let rule: String = widths
        .iter()
        .map(|w| "─".repeat(w + 2))
        .collect::<Vec<_>>()
        .join("┼");

    let mut out = String::new();
    out.push_str(&format_row(COLUMN_HEADERS.iter().map(|h| h.to_string()), &widths));
    out.push_str(&rule);
    out.push('\n');
    for row in rows {
        out.push_str(&format_row(row.into_iter(), &widths));
    }

    let summary = BatchSummary::from_records(&outcome.records);
    out.push('\n');
    out.push_str(&format!("Documents:     {}\n", summary.count));
    out.push_str(&format!("Total balance: R$ {}\n", format_brl(summary.total_balance)));
    out.push_str(&format!("Max balance:   R$ {}\n", format_brl(summary.max_balance)));

    for failure in &outcome.failures {
        out.push_str(&format!("✗ {}\n", failure.message));
    }
    out
}

fn format_row(cells: impl Iterator<Item = String>, widths: &[usize]) -> String {
    let line = cells
        .zip(widths)
        .enumerate()
        .map(|(col, (cell, width))| {
            if col == BALANCE_COLUMN {
                format!(" {:>width$} ", cell, width = *width)
            } else {
                format!(" {:<width$} ", cell, width = *width)
            }
        })
        .collect::<Vec<_>>()
        .join("│");
    format!("{}\n", line.trim_end())
}

#[derive(Serialize)]
struct JsonReport<'a> {
    records: &'a [ExtractionRecord],
    failures: &'a [crate::batch::DocumentFailure],
    summary: BatchSummary,
}

pub fn to_json(outcome: &BatchOutcome) -> Result<String, ReportError> {
    let report = JsonReport {
        records: &outcome.records,
        failures: &outcome.failures,
        summary: BatchSummary::from_records(&outcome.records),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

/// One-sheet workbook with the same columns as the table, built in memory
pub fn to_xlsx_bytes(records: &[ExtractionRecord]) -> Result<Vec<u8>, ReportError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let money_format = Format::new().set_num_format("#,##0.00");

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, header) in COLUMN_HEADERS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    for (i, record) in records.iter().enumerate() {
        let row = (i + 1) as u32;
        for (col, cell) in record.columns().iter().enumerate() {
            if col == BALANCE_COLUMN {
                worksheet.write_number_with_format(row, col as u16, record.balance, &money_format)?;
            } else {
                worksheet.write_string(row, col as u16, cell)?;
            }
        }
    }
    worksheet.autofit();

    Ok(workbook.save_to_buffer()?)
}

pub fn write_xlsx(records: &[ExtractionRecord], path: &Path) -> Result<usize, ReportError> {
    let bytes = to_xlsx_bytes(records)?;
    std::fs::write(path, &bytes)?;
    Ok(bytes.len())
}
