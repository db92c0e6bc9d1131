mod results_log;
mod resume;

pub use results_log::ResultsLog;
pub use resume::{ResumeController, first_pending};
