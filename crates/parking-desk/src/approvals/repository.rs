use serde::Serialize;

use super::domain::{Notification, Registration, RegistrationId, RegistrationStatus};

/// Storage abstraction over the session's registration collection so the
/// service module can be exercised in isolation.
pub trait RegistrationStore: Send + Sync {
    /// Append in insertion order. Validation is the caller's responsibility;
    /// the store never re-checks slot constraints.
    fn append(&self, registration: Registration) -> Result<(), StoreError>;

    /// Replace the status of the matching record, leaving every other field
    /// untouched. Unknown ids are a silent no-op.
    fn set_status(&self, id: &RegistrationId, status: RegistrationStatus)
        -> Result<(), StoreError>;

    /// Insertion-ordered copy of the current records. Display ordering is
    /// derived by callers, never stored.
    fn snapshot(&self) -> Result<Vec<Registration>, StoreError>;
}

/// Error enumeration for store failures. The in-memory implementation never
/// fails; the variant exists for transport-backed stores.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("registration store unavailable: {0}")]
    Unavailable(String),
}

/// Outbound hook for the synthetic confirmation feed shown to staff.
pub trait NotificationLog: Send + Sync {
    /// Record one confirmation event. Implementations prepend, so the stored
    /// order stays newest-first.
    fn dispatch(&self, notification: Notification) -> Result<(), DispatchError>;

    /// Current feed in stored (newest-first) order.
    fn feed(&self) -> Result<Vec<Notification>, DispatchError>;
}

/// Dispatch error for log transports.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("notification transport unavailable: {0}")]
    Transport(String),
}

/// Payload surfaced to the operator after a successful approval, mirroring
/// the confirmation panel beside the registration form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApprovalConfirmation {
    pub registration_id: RegistrationId,
    pub email: String,
    pub phone: String,
    pub hours_approved: u32,
}

impl From<&Registration> for ApprovalConfirmation {
    fn from(registration: &Registration) -> Self {
        Self {
            registration_id: registration.id.clone(),
            email: registration.email.clone(),
            phone: registration.phone.clone(),
            hours_approved: registration.hours_approved,
        }
    }
}
