use std::path::{Path, PathBuf};

use collector_core::{VideoRecord, COLUMNS};

use crate::persist::{AtomicFileWriter, PersistError};

/// Spreadsheet applications need the BOM to detect UTF-8 in CSV files.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub record_count: usize,
    pub output_path: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("persist error: {0}")]
    Persist(#[from] PersistError),
}

/// Encode `records` as UTF-8 CSV (with BOM): a header row, then one row per record.
pub fn build_csv(records: &[VideoRecord]) -> Result<Vec<u8>, ExportError> {
    let mut buffer = UTF8_BOM.to_vec();
    {
        let mut writer = csv::Writer::from_writer(&mut buffer);
        writer.write_record(COLUMNS)?;
        for record in records {
            writer.write_record(record.to_row())?;
        }
        writer.flush()?;
    }
    Ok(buffer)
}

/// Write `records` to `{output_dir}/{filename}` atomically.
pub fn write_csv_export(
    records: &[VideoRecord],
    output_dir: &Path,
    filename: &str,
) -> Result<ExportSummary, ExportError> {
    let content = build_csv(records)?;
    let writer = AtomicFileWriter::new(output_dir.to_path_buf());
    let output_path = writer.write(filename, &content)?;
    Ok(ExportSummary {
        record_count: records.len(),
        output_path,
    })
}
