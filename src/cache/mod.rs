mod snapshots;

pub use snapshots::{MonthSnapshots, SnapshotStore};
