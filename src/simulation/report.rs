//! End-of-run summary.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::strategy::Mode;
use crate::Id;

/// Summary of a run, suitable for scoring.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RunReport {
    /// Identifier of the run, as recorded on its log span.
    pub run_id: Id,
    /// Coordination mode used.
    pub mode: Mode,
    /// Ticks executed.
    pub steps_taken: u64,
    /// Tasks on the map.
    pub tasks_total: usize,
    /// Tasks handed over at the collection point.
    pub tasks_delivered: usize,
    /// Cells moved, summed over all robots.
    pub total_moves: u64,
    /// Deliveries per robot, in robot order.
    pub deliveries_per_robot: Vec<u32>,
}

impl RunReport {
    /// True if every task was delivered.
    pub fn is_complete(&self) -> bool {
        self.tasks_delivered == self.tasks_total
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Run Report ({}) ===", self.mode)?;
        writeln!(f, "  Run id:           {}", self.run_id)?;
        writeln!(f, "  Ticks:            {}", self.steps_taken)?;
        writeln!(
            f,
            "  Tasks delivered:  {}/{}",
            self.tasks_delivered, self.tasks_total
        )?;
        writeln!(f, "  Total moves:      {}", self.total_moves)?;
        let per_robot: Vec<String> = self
            .deliveries_per_robot
            .iter()
            .map(u32::to_string)
            .collect();
        write!(f, "  Per-robot:        [{}]", per_robot.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> RunReport {
        RunReport {
            run_id: "run-1".into(),
            mode: Mode::Cooperative,
            steps_taken: 12,
            tasks_total: 3,
            tasks_delivered: 3,
            total_moves: 20,
            deliveries_per_robot: vec![2, 1],
        }
    }

    #[test]
    fn display_lists_totals() {
        let text = report().to_string();
        assert!(text.starts_with("=== Run Report (cooperative) ==="));
        assert!(text.contains("Tasks delivered:  3/3"));
        assert!(text.contains("[2, 1]"));
    }

    #[test]
    fn completeness() {
        let mut report = report();
        assert!(report.is_complete());
        report.tasks_delivered = 2;
        assert!(!report.is_complete());
    }
}
