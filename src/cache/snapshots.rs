use anyhow::{Context, Result, bail};
use log::debug;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::YearMonth;
use crate::errors::write_context;

/// File store for raw API responses, laid out as `<root>/<year>-<month>/<slug>/`
pub struct SnapshotStore {
    root: PathBuf,
}

impl SnapshotStore {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn for_month(&self, month: YearMonth) -> MonthSnapshots {
        MonthSnapshots {
            dir: self.root.join(month.to_string()),
        }
    }
}

/// Snapshot location for one month's tournaments
pub struct MonthSnapshots {
    dir: PathBuf,
}

impl MonthSnapshots {
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Save a phase group response as `<slug>/<group_id>.json`
    pub fn save_group<T: Serialize>(&self, slug: &str, group_id: i64, data: &T) -> Result<()> {
        let path = self.build_group_path(slug, group_id)?;
        self.write_json(&path, data)
    }

    /// Save a tournament response as `<slug>/<slug>.json`
    pub fn save_tournament<T: Serialize>(&self, slug: &str, data: &T) -> Result<()> {
        let path = self.build_tournament_path(slug)?;
        self.write_json(&path, data)
    }

    // --- Helper Methods ---

    fn build_group_path(&self, slug: &str, group_id: i64) -> Result<PathBuf> {
        Ok(self.slug_dir(slug)?.join(format!("{}.json", group_id)))
    }

    fn build_tournament_path(&self, slug: &str) -> Result<PathBuf> {
        Ok(self.slug_dir(slug)?.join(format!("{}.json", slug)))
    }

    /// The slug must stay a single component inside the month directory
    fn slug_dir(&self, slug: &str) -> Result<PathBuf> {
        if !is_plain_component(slug) {
            bail!("Refusing to snapshot tournament with unsafe slug {:?}", slug);
        }
        Ok(self.dir.join(slug))
    }

    fn write_json<T: Serialize>(&self, path: &Path, data: &T) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create snapshot directory {}", parent.display()))?;
        }
        let json = serde_json::to_string(data).context("Failed to serialize snapshot")?;
        fs::write(path, json).with_context(|| write_context(path))?;
        debug!("Saved snapshot: {}", path.display());
        Ok(())
    }
}

fn is_plain_component(slug: &str) -> bool {
    !slug.is_empty() && slug != "." && slug != ".." && !slug.contains(['/', '\\', '\0'])
}
