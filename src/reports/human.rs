//! Human-readable console report generation

use std::fmt::Write;

use super::ReportGenerator;
use crate::error::SchedulerError;
use crate::scheduler::ScheduleItem;

pub struct HumanReportGenerator;

impl Default for HumanReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl HumanReportGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl ReportGenerator for HumanReportGenerator {
    fn generate_report(&self, schedule: &[ScheduleItem]) -> Result<String, SchedulerError> {
        let mut output = String::new();

        if schedule.is_empty() {
            writeln!(output, "Execution order is empty - nothing to run.")?;
            return Ok(output);
        }

        let step_word = if schedule.len() == 1 { "step" } else { "steps" };
        writeln!(output, "Execution order ({} {step_word}):", schedule.len())?;
        for (i, item) in schedule.iter().enumerate() {
            writeln!(output, "  {}. {item}", i + 1)?;
        }

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_schedule() {
        let report = HumanReportGenerator::new().generate_report(&[]).unwrap();
        assert!(report.contains("nothing to run"));
    }

    #[test]
    fn test_numbered_items() {
        let schedule = vec![
            ScheduleItem::RunNode("a".to_string()),
            ScheduleItem::RunNode("b".to_string()),
            ScheduleItem::HandOffToController("solver".to_string()),
        ];

        let report = HumanReportGenerator::new()
            .generate_report(&schedule)
            .unwrap();

        assert!(report.contains("Execution order (3 steps):"));
        assert!(report.contains("1. run 'a'"));
        assert!(report.contains("2. run 'b'"));
        assert!(report.contains("3. hand off to controller 'solver'"));
    }

    #[test]
    fn test_single_step_wording() {
        let schedule = vec![ScheduleItem::RunNode("only".to_string())];
        let report = HumanReportGenerator::new()
            .generate_report(&schedule)
            .unwrap();

        assert!(report.contains("(1 step):"));
    }
}
