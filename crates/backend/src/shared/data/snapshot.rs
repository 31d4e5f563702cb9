use contracts::domain::a101_restock_event::RestockEvent;
use contracts::domain::a102_revenue_loss::RevenueRecord;
use contracts::domain::a103_planogram_audit::ComplianceRecord;

/// The three raw record collections of one loaded snapshot
///
/// Immutable once built; share it across requests as `Arc<Snapshot>`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    restock_events: Vec<RestockEvent>,
    revenue_records: Vec<RevenueRecord>,
    compliance_records: Vec<ComplianceRecord>,
}

impl Snapshot {
    pub fn new(
        restock_events: Vec<RestockEvent>,
        revenue_records: Vec<RevenueRecord>,
        compliance_records: Vec<ComplianceRecord>,
    ) -> Self {
        Self {
            restock_events,
            revenue_records,
            compliance_records,
        }
    }

    pub fn restock_events(&self) -> &[RestockEvent] {
        &self.restock_events
    }

    pub fn revenue_records(&self) -> &[RevenueRecord] {
        &self.revenue_records
    }

    pub fn compliance_records(&self) -> &[ComplianceRecord] {
        &self.compliance_records
    }

    /// Row counts in velocity / revenue / compliance order
    pub fn counts(&self) -> (usize, usize, usize) {
        (
            self.restock_events.len(),
            self.revenue_records.len(),
            self.compliance_records.len(),
        )
    }
}
