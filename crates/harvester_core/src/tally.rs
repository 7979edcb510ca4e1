use crate::report::Report;
use crate::status::{status_label, PepStatus};

/// Running count of detected statuses, kept in first-observed order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusTally {
    counts: Vec<(Option<PepStatus>, usize)>,
    total: usize,
}

impl StatusTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, status: Option<PepStatus>) {
        self.total += 1;
        match self.counts.iter_mut().find(|(seen, _)| *seen == status) {
            Some((_, count)) => *count += 1,
            None => self.counts.push((status, 1)),
        }
    }

    /// Consume the tally into `(status, count)` rows closed by a `Total` row.
    pub fn into_report(self) -> Report<2> {
        let mut report = Report::with_header(["Status", "Count"]);
        for (status, count) in self.counts {
            report.push([status_label(status).to_string(), count.to_string()]);
        }
        report.push(["Total".to_string(), self.total.to_string()]);
        report
    }
}
