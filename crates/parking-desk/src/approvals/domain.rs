use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for approved registrations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegistrationId(pub String);

/// Identifier wrapper for dispatched notifications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NotificationId(pub String);

/// Who the parking approval is granted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OccupantType {
    Tenant,
    Guest,
}

impl OccupantType {
    pub const fn label(self) -> &'static str {
        match self {
            OccupantType::Tenant => "tenant",
            OccupantType::Guest => "guest",
        }
    }
}

/// One of the two exclusive vehicle positions available per account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleSlot {
    Primary,
    Secondary,
}

impl VehicleSlot {
    pub const fn label(self) -> &'static str {
        match self {
            VehicleSlot::Primary => "primary",
            VehicleSlot::Secondary => "secondary",
        }
    }

    /// Operator-facing wording used in rejection messages.
    pub const fn display_name(self) -> &'static str {
        match self {
            VehicleSlot::Primary => "primary vehicle",
            VehicleSlot::Secondary => "second vehicle",
        }
    }
}

/// Lifecycle of an approval: approved, then parked, then completed. Parked
/// may be skipped; completed is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationStatus {
    Approved,
    Parked,
    Completed,
}

impl RegistrationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            RegistrationStatus::Approved => "approved",
            RegistrationStatus::Parked => "parked",
            RegistrationStatus::Completed => "completed",
        }
    }

    /// Position in the approved -> parked -> completed progression.
    pub(crate) const fn rank(self) -> u8 {
        match self {
            RegistrationStatus::Approved => 0,
            RegistrationStatus::Parked => 1,
            RegistrationStatus::Completed => 2,
        }
    }
}

/// Raw candidate accepted from the operator console before any validation
/// or normalization has happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationRequest {
    pub occupant_name: String,
    pub occupant_type: OccupantType,
    pub email: String,
    pub phone: String,
    pub vehicle_slot: VehicleSlot,
    pub vehicle_plate: String,
    #[serde(default)]
    pub vehicle_make: String,
    #[serde(default)]
    pub vehicle_color: String,
    pub hours_approved: u32,
    #[serde(default)]
    pub notes: String,
}

/// One approved vehicle-to-slot assignment.
///
/// Emails are stored lowercased and plates uppercased; the guard normalizes
/// both before a record is ever created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub id: RegistrationId,
    pub created_at: DateTime<Utc>,
    pub occupant_name: String,
    pub occupant_type: OccupantType,
    pub email: String,
    pub phone: String,
    pub vehicle_slot: VehicleSlot,
    pub vehicle_plate: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_make: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_color: Option<String>,
    pub hours_approved: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub status: RegistrationStatus,
    pub notified_at: DateTime<Utc>,
}

/// Synthetic confirmation event recorded the moment an approval is granted.
/// Immutable once written; the feed only grows for the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub headline: String,
    pub details: String,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Build the confirmation copy for a freshly approved registration.
    pub fn for_approval(id: NotificationId, registration: &Registration) -> Self {
        let unit = if registration.hours_approved == 1 {
            "hour"
        } else {
            "hours"
        };

        Self {
            id,
            headline: format!(
                "Parking slot approved for {}",
                registration.vehicle_plate
            ),
            details: format!(
                "Confirmation sent to {} and {} for {} {unit}.",
                registration.email, registration.phone, registration.hours_approved
            ),
            created_at: registration.notified_at,
        }
    }
}
