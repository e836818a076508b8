//! JSONL export loader - replaces a newline-delimited JSON dump of the summary

use super::loader_backend::{LoaderError, SummaryLoaderBackend};
use super::table::SummaryRow;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

pub struct JsonlSummaryLoader {
    output_path: PathBuf,
}

impl JsonlSummaryLoader {
    pub fn new(output_path: PathBuf) -> Result<Self, LoaderError> {
        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        Ok(Self { output_path })
    }
}

impl SummaryLoaderBackend for JsonlSummaryLoader {
    fn load(&mut self, rows: &[SummaryRow]) -> Result<usize, LoaderError> {
        // Truncate rather than append: each run fully replaces the export.
        let file = File::create(&self.output_path)?;
        let mut writer = BufWriter::new(file);

        for row in rows {
            let json = serde_json::to_string(row)?;
            writeln!(writer, "{}", json)?;
        }
        writer.flush()?;

        log::info!(
            "📝 Wrote {} summary rows to {}",
            rows.len(),
            self.output_path.display()
        );
        Ok(rows.len())
    }

    fn backend_type(&self) -> &'static str {
        "JSONL"
    }
}
