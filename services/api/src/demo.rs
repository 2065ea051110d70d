use crate::infra::{InMemoryNotificationLog, InMemoryRegistrationStore};
use clap::Args;
use parking_desk::approvals::{
    ApprovalError, ApprovalPolicy, OccupantType, ParkingDeskService, RegistrationRequest,
    RegistrationStatus, VehicleSlot,
};
use parking_desk::error::AppError;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Enforce forward-only status transitions during the session
    #[arg(long)]
    pub(crate) strict_lifecycle: bool,
}

fn request(
    name: &str,
    occupant_type: OccupantType,
    email: &str,
    phone: &str,
    slot: VehicleSlot,
    plate: &str,
    hours: u32,
    notes: &str,
) -> RegistrationRequest {
    RegistrationRequest {
        occupant_name: name.to_string(),
        occupant_type,
        email: email.to_string(),
        phone: phone.to_string(),
        vehicle_slot: slot,
        vehicle_plate: plate.to_string(),
        vehicle_make: String::new(),
        vehicle_color: String::new(),
        hours_approved: hours,
        notes: notes.to_string(),
    }
}

/// Scripted approval session so stakeholders can see the desk behavior
/// without standing up the HTTP service.
pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let store = Arc::new(InMemoryRegistrationStore::default());
    let log = Arc::new(InMemoryNotificationLog::default());
    let desk = ParkingDeskService::new(
        store,
        log,
        ApprovalPolicy {
            strict_lifecycle: args.strict_lifecycle,
        },
    );

    println!("== Parking approval desk demo ==");

    let tenant = desk.register(request(
        "Dana Whitfield",
        OccupantType::Tenant,
        "dana@example.com",
        "555-0101",
        VehicleSlot::Primary,
        "kjh 204",
        12,
        "Overnight permit",
    ))?;
    println!("approved {} for {}", tenant.vehicle_plate, tenant.occupant_name);

    let second = desk.register(request(
        "Dana Whitfield",
        OccupantType::Tenant,
        "dana@example.com",
        "555-0101",
        VehicleSlot::Secondary,
        "kjh 887",
        4,
        "",
    ))?;
    println!("approved {} for {}", second.vehicle_plate, second.occupant_name);

    let guest = desk.register(request(
        "Morgan Ellis",
        OccupantType::Guest,
        "Morgan@Example.com",
        "555-0188",
        VehicleSlot::Primary,
        "vis 009",
        2,
        "Visiting unit 4B",
    ))?;
    println!("approved {} for {}", guest.vehicle_plate, guest.occupant_name);

    let duplicate = desk.register(request(
        "Dana Whitfield",
        OccupantType::Tenant,
        "dana@example.com",
        "555-0101",
        VehicleSlot::Primary,
        "kjh 999",
        1,
        "",
    ));
    match duplicate {
        Err(ApprovalError::Rejected(rejection)) => {
            println!("rejected as expected: {rejection}");
        }
        Ok(registration) => println!("unexpected approval of {}", registration.vehicle_plate),
        Err(other) => return Err(other.into()),
    }

    desk.update_status(&guest.id, RegistrationStatus::Parked)?;
    desk.update_status(&second.id, RegistrationStatus::Completed)?;

    if args.strict_lifecycle {
        match desk.update_status(&second.id, RegistrationStatus::Parked) {
            Err(ApprovalError::InvalidTransition { .. }) => {
                println!("strict lifecycle blocked a backward transition");
            }
            Err(other) => return Err(other.into()),
            Ok(()) => println!("unexpected backward transition applied"),
        }
    }

    println!("\n-- Board (latest first) --");
    for registration in desk.registrations()? {
        println!(
            "  [{}] {} {} - {} ({}), {} hr(s)",
            registration.status.label(),
            registration.vehicle_plate,
            registration.vehicle_slot.label(),
            registration.occupant_name,
            registration.occupant_type.label(),
            registration.hours_approved,
        );
    }

    println!("\n-- Confirmation feed (newest first) --");
    for notification in desk.notifications()? {
        println!("  {}", notification.headline);
        println!("    {}", notification.details);
    }

    let summary = desk.summary()?;
    println!(
        "\nactive: {} (tenants {}, guests {}), hours authorized: {}",
        summary.active, summary.tenants, summary.guests, summary.total_hours
    );

    Ok(())
}
