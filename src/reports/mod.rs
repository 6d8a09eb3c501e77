//! Report generation for computed execution orders
//!
//! This module renders a computed schedule for consumption outside the
//! scheduler:
//! - human: numbered console-friendly listing
//! - json: stable JSON for programmatic use

pub mod human;
pub mod json;

use crate::error::SchedulerError;
use crate::scheduler::ScheduleItem;

/// Common trait for all report generators
pub trait ReportGenerator {
    /// Render a report from a computed execution order
    fn generate_report(&self, schedule: &[ScheduleItem]) -> Result<String, SchedulerError>;
}

// Re-export for convenience
pub use human::HumanReportGenerator;
pub use json::JsonReportGenerator;
