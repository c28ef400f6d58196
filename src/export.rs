// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Quote report export: one row per loaded quote plus a totals row.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{Format, Workbook};
use serde::Serialize;
use thiserror::Error;

use crate::models::Quote;
use crate::views::report_totals;

pub const SHEET_NAME: &str = "Reporte Cotizaciones";
pub const TOTALS_LABEL: &str = "TOTALES";

/// Header and column width, in sheet order.
pub const COLUMNS: [(&str, f64); 13] = [
    ("Número", 18.0),
    ("Fecha", 12.0),
    ("Cliente", 30.0),
    ("Tipo Cliente", 15.0),
    ("Identidad", 15.0),
    ("Teléfono", 12.0),
    ("Tipo Seguro", 20.0),
    ("Descripción del Bien", 40.0),
    ("Moneda", 10.0),
    ("Suma Asegurada", 18.0),
    ("Tasa %", 10.0),
    ("Prima Neta", 15.0),
    ("Correo Enviado", 15.0),
];

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Unknown format: {0} (use xlsx|csv|json)")]
    UnknownFormat(String),
    #[error("No quotes loaded; nothing to export")]
    Empty,
    #[error(transparent)]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Xlsx,
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "xlsx" => Ok(ExportFormat::Xlsx),
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(ExportError::UnknownFormat(other.to_string())),
        }
    }
}

/// One spreadsheet row. Serde names double as CSV/JSON headers; money is
/// written as numbers, matching the listing output.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SheetRow {
    #[serde(rename = "Número")]
    pub number: String,
    #[serde(rename = "Fecha")]
    pub date: String,
    #[serde(rename = "Cliente")]
    pub client: String,
    #[serde(rename = "Tipo Cliente")]
    pub client_type: String,
    #[serde(rename = "Identidad")]
    pub identity: String,
    #[serde(rename = "Teléfono")]
    pub phone: String,
    #[serde(rename = "Tipo Seguro")]
    pub insurance_type: String,
    #[serde(rename = "Descripción del Bien")]
    pub description: String,
    #[serde(rename = "Moneda")]
    pub currency: String,
    #[serde(rename = "Suma Asegurada", serialize_with = "rust_decimal::serde::float_option::serialize")]
    pub sum_insured: Option<Decimal>,
    #[serde(rename = "Tasa %", serialize_with = "rust_decimal::serde::float_option::serialize")]
    pub rate_percent: Option<Decimal>,
    #[serde(rename = "Prima Neta", serialize_with = "rust_decimal::serde::float_option::serialize")]
    pub net_premium: Option<Decimal>,
    #[serde(rename = "Correo Enviado")]
    pub email_sent: String,
}

impl From<&Quote> for SheetRow {
    fn from(q: &Quote) -> Self {
        Self {
            number: q.number.clone(),
            date: q.date_display.clone(),
            client: q.client_name.clone(),
            client_type: q.client_type.clone(),
            identity: q.client_identity.clone(),
            phone: q.client_phone.clone(),
            insurance_type: q.insurance_type.clone(),
            description: q.asset_description.clone(),
            currency: q.currency_code.clone(),
            sum_insured: Some(q.sum_insured),
            rate_percent: Some(q.rate_percent),
            net_premium: Some(q.net_premium),
            email_sent: q.email_sent_display.clone(),
        }
    }
}

impl SheetRow {
    fn cells(&self) -> [Cell<'_>; 13] {
        [
            Cell::Text(&self.number),
            Cell::Text(&self.date),
            Cell::Text(&self.client),
            Cell::Text(&self.client_type),
            Cell::Text(&self.identity),
            Cell::Text(&self.phone),
            Cell::Text(&self.insurance_type),
            Cell::Text(&self.description),
            Cell::Text(&self.currency),
            Cell::Number(self.sum_insured),
            Cell::Number(self.rate_percent),
            Cell::Number(self.net_premium),
            Cell::Text(&self.email_sent),
        ]
    }
}

enum Cell<'a> {
    Text(&'a str),
    Number(Option<Decimal>),
}

/// Rows for `quotes` followed by the totals row.
pub fn build_rows(quotes: &[Quote]) -> Vec<SheetRow> {
    let totals = report_totals(quotes);
    let mut rows: Vec<SheetRow> = quotes.iter().map(SheetRow::from).collect();
    rows.push(SheetRow {
        description: TOTALS_LABEL.to_string(),
        sum_insured: Some(totals.sum_insured),
        net_premium: Some(totals.net_premium),
        ..Default::default()
    });
    rows
}

/// `Reporte_Cotizaciones_YYYYMMDD.<ext>`
pub fn default_file_name(date: NaiveDate, format: ExportFormat) -> String {
    format!(
        "Reporte_Cotizaciones_{}.{}",
        date.format("%Y%m%d"),
        format.extension()
    )
}

/// The user's download directory, or the working directory.
pub fn default_dir() -> PathBuf {
    directories::UserDirs::new()
        .and_then(|u| u.download_dir().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Writes the report and returns the number of quote rows (totals excluded).
pub fn write_report(quotes: &[Quote], format: ExportFormat, out: &Path) -> Result<usize, ExportError> {
    if quotes.is_empty() {
        return Err(ExportError::Empty);
    }
    let rows = build_rows(quotes);
    match format {
        ExportFormat::Xlsx => write_xlsx(&rows, out)?,
        ExportFormat::Csv => {
            let mut wtr = csv::Writer::from_path(out)?;
            for row in &rows {
                wtr.serialize(row)?;
            }
            wtr.flush()?;
        }
        ExportFormat::Json => {
            std::fs::write(out, serde_json::to_string_pretty(&rows)?)?;
        }
    }
    Ok(quotes.len())
}

fn write_xlsx(rows: &[SheetRow], out: &Path) -> Result<(), ExportError> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;
    for (col, (header, width)) in COLUMNS.iter().enumerate() {
        let col = col as u16;
        sheet.set_column_width(col, *width)?;
        sheet.write_string_with_format(0, col, *header, &bold)?;
    }
    for (i, row) in rows.iter().enumerate() {
        let r = (i + 1) as u32;
        for (col, cell) in row.cells().into_iter().enumerate() {
            let col = col as u16;
            match cell {
                Cell::Text(s) if !s.is_empty() => {
                    sheet.write_string(r, col, s)?;
                }
                Cell::Number(Some(d)) => {
                    sheet.write_number(r, col, d.to_f64().unwrap_or_default())?;
                }
                _ => {}
            }
        }
    }
    workbook.save(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_embeds_date() {
        let d = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        assert_eq!(
            default_file_name(d, ExportFormat::Xlsx),
            "Reporte_Cotizaciones_20250307.xlsx"
        );
    }

    #[test]
    fn format_parsing() {
        assert_eq!("XLSX".parse::<ExportFormat>().unwrap(), ExportFormat::Xlsx);
        assert!(matches!(
            "xml".parse::<ExportFormat>(),
            Err(ExportError::UnknownFormat(_))
        ));
    }
}
