use std::sync::{Arc, Mutex};

use chrono::{DateTime, TimeZone, Utc};

use crate::approvals::domain::{
    Notification, OccupantType, Registration, RegistrationId, RegistrationRequest,
    RegistrationStatus, VehicleSlot,
};
use crate::approvals::repository::{
    DispatchError, NotificationLog, RegistrationStore, StoreError,
};
use crate::approvals::service::{ApprovalPolicy, ParkingDeskService};
use crate::approvals::validate::{ApprovalGuard, Clock, SequenceIds};

pub(super) fn fixed_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0)
        .single()
        .expect("valid instant")
}

/// Clock pinned to a single instant so ids and timestamps are reproducible.
pub(super) struct FixedClock(pub(super) DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

pub(super) fn request() -> RegistrationRequest {
    RegistrationRequest {
        occupant_name: "Robin Schneider".to_string(),
        occupant_type: OccupantType::Tenant,
        email: "Robin@x.com".to_string(),
        phone: "555-1".to_string(),
        vehicle_slot: VehicleSlot::Primary,
        vehicle_plate: "abc-123".to_string(),
        vehicle_make: "Toyota".to_string(),
        vehicle_color: "Blue".to_string(),
        hours_approved: 2,
        notes: String::new(),
    }
}

pub(super) fn guard() -> ApprovalGuard {
    ApprovalGuard::new(
        Arc::new(FixedClock(fixed_instant())),
        Arc::new(SequenceIds::default()),
    )
}

/// Build a stored record directly, bypassing the guard, for seeding
/// constraint scenarios the validator alone cannot produce.
pub(super) fn stored(
    id: &str,
    email: &str,
    slot: VehicleSlot,
    status: RegistrationStatus,
) -> Registration {
    Registration {
        id: RegistrationId(id.to_string()),
        created_at: fixed_instant(),
        occupant_name: "Seeded Occupant".to_string(),
        occupant_type: OccupantType::Tenant,
        email: email.to_string(),
        phone: "555-0".to_string(),
        vehicle_slot: slot,
        vehicle_plate: "SEED-1".to_string(),
        vehicle_make: None,
        vehicle_color: None,
        hours_approved: 1,
        notes: None,
        status,
        notified_at: fixed_instant(),
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryStore {
    records: Arc<Mutex<Vec<Registration>>>,
}

impl RegistrationStore for MemoryStore {
    fn append(&self, registration: Registration) -> Result<(), StoreError> {
        self.records.lock().expect("lock").push(registration);
        Ok(())
    }

    fn set_status(
        &self,
        id: &RegistrationId,
        status: RegistrationStatus,
    ) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("lock");
        if let Some(record) = guard.iter_mut().find(|record| &record.id == id) {
            record.status = status;
        }
        Ok(())
    }

    fn snapshot(&self) -> Result<Vec<Registration>, StoreError> {
        Ok(self.records.lock().expect("lock").clone())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryLog {
    entries: Arc<Mutex<Vec<Notification>>>,
}

impl NotificationLog for MemoryLog {
    fn dispatch(&self, notification: Notification) -> Result<(), DispatchError> {
        self.entries.lock().expect("lock").insert(0, notification);
        Ok(())
    }

    fn feed(&self) -> Result<Vec<Notification>, DispatchError> {
        Ok(self.entries.lock().expect("lock").clone())
    }
}

pub(super) fn build_service(
    policy: ApprovalPolicy,
) -> (
    ParkingDeskService<MemoryStore, MemoryLog>,
    Arc<MemoryStore>,
    Arc<MemoryLog>,
) {
    let store = Arc::new(MemoryStore::default());
    let log = Arc::new(MemoryLog::default());
    let service = ParkingDeskService::with_capabilities(
        store.clone(),
        log.clone(),
        policy,
        Arc::new(FixedClock(fixed_instant())),
        Arc::new(SequenceIds::default()),
    );
    (service, store, log)
}
