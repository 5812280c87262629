//! Plain-text deal list
//!
//! One record per deal, records separated by a blank line:
//!
//! ```text
//! Tent
//! Price: $75 (Was $100 - 25.00% off)
//! Link: https://x/y
//! Is Top Brand? Yes (Filtered by Amazon/User)
//! ------------------------
//! ```

use crate::config::OutputConfig;
use crate::listing::Deal;
use crate::output::traits::{DealWriter, OutputError, OutputResult};
use std::fs;
use std::path::PathBuf;

/// Line closing every record
pub const SEPARATOR: &str = "------------------------";

/// Formats a single deal record, without a trailing newline
///
/// Prices print in their shortest form (`75`, `19.99`); the discount always
/// carries two decimals.
pub fn format_deal(deal: &Deal, annotation: &str) -> String {
    format!(
        "{}\nPrice: ${} (Was ${} - {:.2}% off)\nLink: {}\n{}\n{}",
        deal.title,
        deal.current_price.normalize(),
        deal.list_price.normalize(),
        deal.discount_percent,
        deal.link,
        annotation,
        SEPARATOR
    )
}

/// Formats all deals, joined by a blank line
pub fn format_deals(deals: &[Deal], annotation: &str) -> String {
    deals
        .iter()
        .map(|deal| format_deal(deal, annotation))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Writes the deal list to `<directory>/<file-name>`
#[derive(Debug, Clone)]
pub struct TextFileWriter {
    directory: PathBuf,
    file_name: String,
    annotation: String,
}

impl TextFileWriter {
    pub fn new(config: &OutputConfig) -> Self {
        Self {
            directory: PathBuf::from(&config.directory),
            file_name: config.file_name.clone(),
            annotation: config.annotation.clone(),
        }
    }

    /// Full path of the output file
    pub fn path(&self) -> PathBuf {
        self.directory.join(&self.file_name)
    }
}

impl DealWriter for TextFileWriter {
    fn write(&self, deals: &[Deal]) -> OutputResult<PathBuf> {
        fs::create_dir_all(&self.directory).map_err(|e| {
            OutputError::Write(format!(
                "cannot create {}: {}",
                self.directory.display(),
                e
            ))
        })?;

        let path = self.path();
        fs::write(&path, format_deals(deals, &self.annotation))?;

        tracing::info!("Wrote {} deals to {}", deals.len(), path.display());
        Ok(path)
    }
}
