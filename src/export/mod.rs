// src/export/mod.rs

//! Record export: CSV (UTF-8 with BOM) plus a best-effort formatted
//! spreadsheet. A spreadsheet failure never loses the CSV already written.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use rust_xlsxwriter::{Format, Workbook};

use crate::config::Config;
use crate::error::Result;
use crate::models::BookingRecord;

const SHEET_NAME: &str = "Bookings";

/// Width hints keyed by column header, with a generic fallback.
fn column_width(header: &str) -> f64 {
    match header {
        "เว็บไซต์" => 22.0,
        "ชื่อบ้าน" => 30.0,
        "รหัส" => 14.0,
        "เดือน" => 18.0,
        "วันที่" => 10.0,
        "สถานะ" => 12.0,
        other => (other.chars().count() as f64 + 2.0).clamp(10.0, 40.0),
    }
}

/// Export records to both output files. The CSV is the source of truth;
/// the spreadsheet is formatted best-effort.
pub fn export(records: &[BookingRecord], config: &Config) -> Result<()> {
    write_csv(records, &config.csv_path)?;
    log::info!("saved {}", config.csv_path.display());

    match write_xlsx(records, &config.xlsx_path) {
        Ok(()) => log::info!("saved {}", config.xlsx_path.display()),
        Err(e) => log::warn!("spreadsheet export failed (CSV already written): {e}"),
    }
    Ok(())
}

/// Write the delimited export with a UTF-8 BOM so spreadsheet applications
/// detect the Thai text encoding.
pub fn write_csv(records: &[BookingRecord], path: &Path) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(b"\xEF\xBB\xBF")?;

    let mut writer = csv::Writer::from_writer(file);
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the formatted workbook: frozen header row, per-column width hints,
/// and a header autofilter spanning the data range.
pub fn write_xlsx(records: &[BookingRecord], path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    let bold = Format::new().set_bold();
    for (col, header) in BookingRecord::HEADERS.iter().enumerate() {
        let col = col as u16;
        sheet.write_with_format(0, col, *header, &bold)?;
        sheet.set_column_width(col, column_width(header))?;
    }

    for (idx, record) in records.iter().enumerate() {
        let row = idx as u32 + 1;
        sheet.write(row, 0, record.website.as_str())?;
        sheet.write(row, 1, record.house_name.as_str())?;
        sheet.write(row, 2, record.house_code.as_str())?;
        sheet.write(row, 3, record.month_label.as_str())?;
        sheet.write(row, 4, record.day)?;
        sheet.write(row, 5, record.status.as_str())?;
    }

    sheet.autofilter(
        0,
        0,
        records.len() as u32,
        (BookingRecord::HEADERS.len() - 1) as u16,
    )?;
    sheet.set_freeze_panes(1, 0)?;

    workbook.save(path)?;
    Ok(())
}
