mod counter;
mod summary;

pub use counter::{Outcome, OutcomeCounter};
pub use summary::{write_summary_file, Summary, SUMMARY_FILE_HEADER, SUMMARY_RULE_WIDTH};
