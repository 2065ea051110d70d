use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::domain::{
    NotificationId, Registration, RegistrationId, RegistrationRequest, RegistrationStatus,
    VehicleSlot,
};

/// Rejections raised by the slot-assignment rules. Every variant is a
/// correctable operator input problem; the message is the copy shown beside
/// the registration form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationRejection {
    #[error("please provide the tenant or guest name")]
    MissingName,
    #[error("email is required to deliver confirmations")]
    MissingEmail,
    #[error("phone number is required to deliver SMS confirmations")]
    MissingPhone,
    #[error("vehicle plate number is required")]
    MissingPlate,
    #[error("approved parking hours must be at least 1 hour")]
    InvalidHours,
    #[error("the {} slot is already registered for this account", .0.display_name())]
    SlotAlreadyUsed(VehicleSlot),
    #[error("this account already has two vehicles assigned")]
    AccountVehicleLimitReached,
    #[error("register the primary vehicle first before assigning a second vehicle")]
    PrimaryVehicleRequiredFirst,
}

/// Time source injected into the guard so approvals are deterministic under
/// test.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock implementation used by the running service.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Source of opaque identifiers. Only uniqueness is contractual, not the
/// shape of the generated string.
pub trait IdGenerator: Send + Sync {
    fn registration_id(&self) -> RegistrationId;
    fn notification_id(&self) -> NotificationId;
}

/// Monotonic sequence shared by registrations and notifications, unique for
/// the lifetime of the session state.
#[derive(Debug, Default)]
pub struct SequenceIds {
    counter: AtomicU64,
}

impl SequenceIds {
    fn next(&self) -> u64 {
        self.counter.fetch_add(1, Ordering::Relaxed) + 1
    }
}

impl IdGenerator for SequenceIds {
    fn registration_id(&self) -> RegistrationId {
        RegistrationId(format!("reg-{:06}", self.next()))
    }

    fn notification_id(&self) -> NotificationId {
        NotificationId(format!("ntf-{:06}", self.next()))
    }
}

/// Applies the slot-assignment rules and turns accepted candidates into
/// normalized [`Registration`] records.
pub struct ApprovalGuard {
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
}

impl Default for ApprovalGuard {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock), Arc::new(SequenceIds::default()))
    }
}

impl ApprovalGuard {
    pub fn new(clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { clock, ids }
    }

    /// Decide whether a candidate may be created given the full current set
    /// of registrations.
    ///
    /// Checks run in a fixed order and the first failure wins; callers rely
    /// on that priority when surfacing messages to operators. The account
    /// constraints count completed registrations too.
    pub fn approve(
        &self,
        request: RegistrationRequest,
        existing: &[Registration],
    ) -> Result<Registration, RegistrationRejection> {
        let occupant_name = request.occupant_name.trim();
        if occupant_name.is_empty() {
            return Err(RegistrationRejection::MissingName);
        }

        let email = request.email.trim().to_lowercase();
        if email.is_empty() {
            return Err(RegistrationRejection::MissingEmail);
        }

        let phone = request.phone.trim();
        if phone.is_empty() {
            return Err(RegistrationRejection::MissingPhone);
        }

        let plate = request.vehicle_plate.trim();
        if plate.is_empty() {
            return Err(RegistrationRejection::MissingPlate);
        }

        if request.hours_approved == 0 {
            return Err(RegistrationRejection::InvalidHours);
        }

        // Stored emails are already normalized, so equality suffices.
        let held: Vec<&Registration> = existing
            .iter()
            .filter(|registration| registration.email == email)
            .collect();

        if held
            .iter()
            .any(|registration| registration.vehicle_slot == request.vehicle_slot)
        {
            return Err(RegistrationRejection::SlotAlreadyUsed(request.vehicle_slot));
        }

        if held.len() >= 2 {
            return Err(RegistrationRejection::AccountVehicleLimitReached);
        }

        if held.is_empty() && request.vehicle_slot == VehicleSlot::Secondary {
            return Err(RegistrationRejection::PrimaryVehicleRequiredFirst);
        }

        let now = self.clock.now();
        Ok(Registration {
            id: self.ids.registration_id(),
            created_at: now,
            occupant_name: occupant_name.to_string(),
            occupant_type: request.occupant_type,
            email,
            phone: phone.to_string(),
            vehicle_slot: request.vehicle_slot,
            vehicle_plate: plate.to_uppercase(),
            vehicle_make: non_empty(&request.vehicle_make),
            vehicle_color: non_empty(&request.vehicle_color),
            hours_approved: request.hours_approved,
            notes: non_empty(&request.notes),
            status: RegistrationStatus::Approved,
            notified_at: now,
        })
    }
}

fn non_empty(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
