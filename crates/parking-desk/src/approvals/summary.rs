use serde::Serialize;

use super::domain::{OccupantType, Registration, RegistrationStatus};

/// Aggregated counts backing the operator header tiles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ParkingSummary {
    pub active: usize,
    pub tenants: usize,
    pub guests: usize,
    pub total_hours: u64,
}

/// Derive the summary from scratch over the current records.
///
/// "Active" means status other than completed; the tenant/guest split and
/// the hour total cover only that subset. Callers re-run this on every read
/// rather than maintaining incremental counters.
pub fn summarize(registrations: &[Registration]) -> ParkingSummary {
    let mut summary = ParkingSummary::default();

    for registration in registrations {
        if registration.status == RegistrationStatus::Completed {
            continue;
        }

        summary.active += 1;
        match registration.occupant_type {
            OccupantType::Tenant => summary.tenants += 1,
            OccupantType::Guest => summary.guests += 1,
        }
        summary.total_hours += u64::from(registration.hours_approved);
    }

    summary
}
