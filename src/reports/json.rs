//! JSON format report generation

use serde_json::json;

use super::ReportGenerator;
use crate::error::SchedulerError;
use crate::scheduler::ScheduleItem;

pub struct JsonReportGenerator;

impl Default for JsonReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonReportGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl ReportGenerator for JsonReportGenerator {
    fn generate_report(&self, schedule: &[ScheduleItem]) -> Result<String, SchedulerError> {
        let report = json!({
            "item_count": schedule.len(),
            "items": schedule,
        });

        serde_json::to_string_pretty(&report).map_err(SchedulerError::Json)
    }
}
