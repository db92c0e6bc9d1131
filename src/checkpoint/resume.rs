use anyhow::Result;
use log::info;

use crate::domain::YearMonth;

use super::results_log::ResultsLog;

/// Month after the checkpoint, or the epoch when there is none
pub fn first_pending(last_completed: Option<YearMonth>, epoch: YearMonth) -> YearMonth {
    last_completed.map_or(epoch, YearMonth::next)
}

/// Walks months from the checkpoint up to, but excluding, the current month
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeController {
    next: YearMonth,
    until: YearMonth,
}

impl ResumeController {
    pub fn new(start: YearMonth, until: YearMonth) -> Self {
        Self { next: start, until }
    }

    /// Resume after the log's last row; `until` is normally the current UTC month
    pub fn from_log(log: &ResultsLog, epoch: YearMonth, until: YearMonth) -> Result<Self> {
        let last = log.last_completed()?;
        let start = first_pending(last, epoch);
        match last {
            Some(month) => info!("Last completed month {}, resuming at {}", month, start),
            None => info!("No checkpoint, starting at {}", start),
        }
        Ok(Self::new(start, until))
    }

    /// Next fully elapsed month still to process
    pub fn pending(&self) -> Option<YearMonth> {
        (self.next < self.until).then_some(self.next)
    }

    /// Record `month` as persisted and move past it
    pub fn complete(&mut self, month: YearMonth) {
        self.next = month.next();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_pending() {
        let epoch = YearMonth::new(2019, 2);

        assert_eq!(first_pending(None, epoch), epoch);
        assert_eq!(first_pending(Some(YearMonth::new(2022, 7)), epoch), YearMonth::new(2022, 8));
        assert_eq!(first_pending(Some(YearMonth::new(2022, 12)), epoch), YearMonth::new(2023, 1));
    }

    #[test]
    fn test_stops_before_current_month() {
        let mut controller = ResumeController::new(YearMonth::new(2022, 11), YearMonth::new(2023, 2));
        let mut processed = Vec::new();

        while let Some(month) = controller.pending() {
            processed.push(month);
            controller.complete(month);
        }

        assert_eq!(
            processed,
            vec![YearMonth::new(2022, 11), YearMonth::new(2022, 12), YearMonth::new(2023, 1)]
        );
    }

    #[test]
    fn test_caught_up_processes_nothing() {
        let controller = ResumeController::new(YearMonth::new(2023, 2), YearMonth::new(2023, 2));
        assert_eq!(controller.pending(), None);
    }

    #[test]
    fn test_from_log() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("results.csv");
        std::fs::write(&path, "year,month\n2022,12,3\n").unwrap();

        let controller = ResumeController::from_log(
            &ResultsLog::new(&path),
            YearMonth::new(2019, 2),
            YearMonth::new(2024, 1),
        )
        .unwrap();

        assert_eq!(controller.pending(), Some(YearMonth::new(2023, 1)));
    }
}
