use anyhow::{Context, Result, bail};
use log::{info, warn};
use std::fs::{self, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::domain::{MonthlyStats, YearMonth};
use crate::errors::write_context;

/// Append-only CSV of completed months; its last row is the crawl checkpoint
pub struct ResultsLog {
    path: PathBuf,
}

impl ResultsLog {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Month of the last data row.
    ///
    /// An unreadable log counts as no checkpoint. A log that is readable but whose
    /// last row cannot be parsed is an error, so a corrupt file never restarts the
    /// crawl from the epoch and duplicates rows.
    pub fn last_completed(&self) -> Result<Option<YearMonth>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("No results log at {}, starting fresh", self.path.display());
                return Ok(None);
            }
            Err(e) => {
                warn!("could not read {}: {}", self.path.display(), e);
                return Ok(None);
            }
        };

        Self::parse_last_month(&content)
            .with_context(|| format!("Failed to parse checkpoint from {}", self.path.display()))
    }

    /// Append one completed month, writing the header first if the log is new
    pub fn append(&self, stats: &MonthlyStats) -> Result<()> {
        let needs_header = self.is_empty();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| write_context(&self.path))?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(needs_header)
            .from_writer(file);
        writer
            .serialize(stats)
            .with_context(|| write_context(&self.path))?;
        writer.flush().with_context(|| write_context(&self.path))?;
        Ok(())
    }

    /// Every data row, oldest first
    pub fn read_all(&self) -> Result<Vec<MonthlyStats>> {
        let mut reader = csv::Reader::from_path(&self.path)
            .with_context(|| format!("Failed to open {}", self.path.display()))?;
        reader
            .deserialize()
            .collect::<Result<Vec<MonthlyStats>, _>>()
            .with_context(|| format!("Failed to parse {}", self.path.display()))
    }

    // --- Helper Methods ---

    fn is_empty(&self) -> bool {
        fs::metadata(&self.path).map_or(true, |m| m.len() == 0)
    }

    /// The first line is a header; only year and month of the last row matter
    fn parse_last_month(content: &str) -> Result<Option<YearMonth>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(content.as_bytes());

        let mut last = None;
        for record in reader.records() {
            last = Some(record?);
        }
        let Some(record) = last else {
            return Ok(None);
        };

        let year: i32 = Self::field(&record, 0, "year")?;
        let month: u32 = Self::field(&record, 1, "month")?;
        if !(1..=12).contains(&month) {
            bail!("month {} out of range in last row", month);
        }
        Ok(Some(YearMonth::new(year, month)))
    }

    fn field<T: std::str::FromStr>(record: &csv::StringRecord, idx: usize, name: &str) -> Result<T> {
        let raw = record
            .get(idx)
            .with_context(|| format!("last row has no {} column", name))?;
        raw.trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid {} '{}' in last row", name, raw))
    }
}
