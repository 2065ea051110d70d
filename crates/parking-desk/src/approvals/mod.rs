//! Parking approval intake, slot-assignment rules, and the confirmation feed.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;
pub mod summary;
pub(crate) mod validate;

#[cfg(test)]
mod tests;

pub use domain::{
    Notification, NotificationId, OccupantType, Registration, RegistrationId, RegistrationRequest,
    RegistrationStatus, VehicleSlot,
};
pub use repository::{
    ApprovalConfirmation, DispatchError, NotificationLog, RegistrationStore, StoreError,
};
pub use router::approvals_router;
pub use service::{ApprovalError, ApprovalPolicy, ParkingDeskService};
pub use summary::{summarize, ParkingSummary};
pub use validate::{
    ApprovalGuard, Clock, IdGenerator, RegistrationRejection, SequenceIds, SystemClock,
};
