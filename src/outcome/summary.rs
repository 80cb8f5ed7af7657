use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use super::OutcomeCounter;

pub const SUMMARY_FILE_HEADER: &str = "Test Results Summary";
pub const SUMMARY_CONSOLE_HEADER: &str = "Summary of Test Results";
pub const SUMMARY_RULE_WIDTH: usize = 50;

/// Frozen view of an [`OutcomeCounter`] at the end of a session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub total: u64,
    pub passed: u64,
    pub failed: u64,
    pub skipped: u64,
    pub pass_percentage: f64,
}

impl From<OutcomeCounter> for Summary {
    fn from(counter: OutcomeCounter) -> Self {
        Self {
            total: counter.total(),
            passed: counter.passed(),
            failed: counter.failed(),
            skipped: counter.skipped(),
            pass_percentage: counter.pass_percentage(),
        }
    }
}

impl Summary {
    /// Console banner: rule, heading, rule, counts, rule.
    pub fn console_report(&self) -> String {
        let rule = rule();
        format!("\n{rule}\n{SUMMARY_CONSOLE_HEADER}\n{rule}\n{}\n{rule}\n", self)
    }

    /// Contents of the persisted summary file.
    pub fn file_contents(&self) -> String {
        format!("{SUMMARY_FILE_HEADER}\n{}\n{}", rule(), self)
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<20}: {}", "Total Tests Run", self.total)?;
        writeln!(f, "{:<20}: {}", "Passed Tests", self.passed)?;
        writeln!(f, "{:<20}: {}", "Failed Tests", self.failed)?;
        writeln!(f, "{:<20}: {}", "Skipped Tests", self.skipped)?;
        writeln!(f, "{:<20}: {:.2}%", "Pass Percentage", self.pass_percentage)
    }
}

fn rule() -> String {
    "=".repeat(SUMMARY_RULE_WIDTH)
}

/// Writes the summary file, replacing whatever a previous session left.
pub async fn write_summary_file(path: &Path, summary: &Summary) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("creating summary directory {}", parent.display()))?;
    }

    tokio::fs::write(path, summary.file_contents())
        .await
        .with_context(|| format!("writing summary file {}", path.display()))?;

    info!(path = %path.display(), total = summary.total, "summary written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::Outcome;

    fn summary(passed: usize, failed: usize, skipped: usize) -> Summary {
        let mut counter = OutcomeCounter::new();
        (0..passed).for_each(|_| counter.record(Outcome::Passed));
        (0..failed).for_each(|_| counter.record(Outcome::Failed));
        (0..skipped).for_each(|_| counter.record(Outcome::Skipped));
        Summary::from(counter)
    }

    #[test]
    fn test_summary_lines() {
        let text = summary(4, 1, 1).to_string();
        let expected = "Total Tests Run     : 6\n\
                        Passed Tests        : 4\n\
                        Failed Tests        : 1\n\
                        Skipped Tests       : 1\n\
                        Pass Percentage     : 66.67%\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_empty_summary_reports_zero_percent() {
        let text = summary(0, 0, 0).to_string();
        assert!(text.contains("Total Tests Run     : 0\n"));
        assert!(text.contains("Pass Percentage     : 0.00%\n"));
    }

    #[test]
    fn test_file_contents_layout() {
        let contents = summary(6, 0, 0).file_contents();
        let lines: Vec<_> = contents.lines().collect();
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], "Test Results Summary");
        assert_eq!(lines[1], "=".repeat(50));
        assert_eq!(lines[6], "Pass Percentage     : 100.00%");
    }

    #[test]
    fn test_console_report_layout() {
        let report = summary(1, 1, 0).console_report();
        let rule = "=".repeat(50);
        assert!(report.starts_with(&format!("\n{rule}\nSummary of Test Results\n{rule}\n")));
        assert!(report.ends_with(&format!("Pass Percentage     : 50.00%\n\n{rule}\n")));
    }

    #[tokio::test]
    async fn test_write_summary_file_for_empty_session() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("reports").join("test_results.txt");
        std::fs::create_dir_all(temp.path().join("reports"))?;
        std::fs::write(&path, "Total Tests Run     : 99\n".repeat(10))?;

        let empty = Summary::from(OutcomeCounter::new());
        write_summary_file(&path, &empty).await?;

        let written = std::fs::read_to_string(&path)?;
        let lines: Vec<_> = written.lines().collect();
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], "Test Results Summary");
        assert_eq!(lines[2], "Total Tests Run     : 0");
        assert_eq!(lines[3], "Passed Tests        : 0");
        assert_eq!(lines[4], "Failed Tests        : 0");
        assert_eq!(lines[5], "Skipped Tests       : 0");
        assert_eq!(lines[6], "Pass Percentage     : 0.00%");
        Ok(())
    }
}
