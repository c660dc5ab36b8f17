use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::error::ExportError;
use super::model::{Record, REQUIRED_COLUMNS};

/// Write `records` as CSV with the export's own column headers, so the file
/// opens again in the dashboard. The header is written even for no records.
pub fn export_csv(records: &[Record], path: &Path) -> Result<(), ExportError> {
    let file = create(path)?;
    write_csv(records, file)?;
    log::info!("Exported {} records to CSV: {}", records.len(), path.display());
    Ok(())
}

pub fn write_csv<W: Write>(records: &[Record], out: W) -> Result<(), ExportError> {
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(out);
    writer.write_record(REQUIRED_COLUMNS)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Write `records` as a pretty-printed, records-oriented JSON array.
pub fn export_json(records: &[Record], path: &Path) -> Result<(), ExportError> {
    let mut writer = BufWriter::new(create(path)?);
    serde_json::to_writer_pretty(&mut writer, records)?;
    // Flush explicitly; BufWriter::drop swallows errors.
    writer.flush().map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("Exported {} records to JSON: {}", records.len(), path.display());
    Ok(())
}

fn create(path: &Path) -> Result<File, ExportError> {
    File::create(path).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })
}
