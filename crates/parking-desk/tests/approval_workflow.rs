//! End-to-end scenarios for the parking approval desk.
//!
//! These exercise the public service facade and the HTTP router together so
//! registration validation, the confirmation feed, and the summary stay in
//! agreement without the tests reaching into private modules.

mod common {
    use std::sync::{Arc, Mutex};

    use chrono::{DateTime, TimeZone, Utc};

    use parking_desk::approvals::{
        ApprovalPolicy, Clock, DispatchError, Notification, NotificationLog, OccupantType,
        ParkingDeskService, Registration, RegistrationId, RegistrationRequest, RegistrationStatus,
        RegistrationStore, SequenceIds, StoreError, VehicleSlot,
    };

    pub(super) fn approval_instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0)
            .single()
            .expect("valid instant")
    }

    pub(super) struct FixedClock(pub(super) DateTime<Utc>);

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
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

    impl MemoryLog {
        pub(super) fn entries(&self) -> Vec<Notification> {
            self.entries.lock().expect("lock").clone()
        }
    }

    impl NotificationLog for MemoryLog {
        fn dispatch(&self, notification: Notification) -> Result<(), DispatchError> {
            self.entries.lock().expect("lock").insert(0, notification);
            Ok(())
        }

        fn feed(&self) -> Result<Vec<Notification>, DispatchError> {
            Ok(self.entries())
        }
    }

    pub(super) fn robin() -> RegistrationRequest {
        RegistrationRequest {
            occupant_name: "Robin Schneider".to_string(),
            occupant_type: OccupantType::Tenant,
            email: "Robin@x.com".to_string(),
            phone: "555-1".to_string(),
            vehicle_slot: VehicleSlot::Primary,
            vehicle_plate: "abc-123".to_string(),
            vehicle_make: String::new(),
            vehicle_color: String::new(),
            hours_approved: 2,
            notes: String::new(),
        }
    }

    pub(super) fn guest(email: &str, plate: &str, hours: u32) -> RegistrationRequest {
        RegistrationRequest {
            occupant_name: "Visiting Guest".to_string(),
            occupant_type: OccupantType::Guest,
            email: email.to_string(),
            phone: "555-9".to_string(),
            vehicle_slot: VehicleSlot::Primary,
            vehicle_plate: plate.to_string(),
            vehicle_make: String::new(),
            vehicle_color: String::new(),
            hours_approved: hours,
            notes: String::new(),
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
            Arc::new(FixedClock(approval_instant())),
            Arc::new(SequenceIds::default()),
        );
        (service, store, log)
    }
}

mod registration {
    use super::common::*;
    use parking_desk::approvals::{
        ApprovalError, ApprovalPolicy, RegistrationRejection, RegistrationStatus, VehicleSlot,
    };

    #[test]
    fn approval_normalizes_and_notifies_once() {
        let (service, _, log) = build_service(ApprovalPolicy::default());

        let registration = service.register(robin()).expect("approval succeeds");
        assert_eq!(registration.vehicle_plate, "ABC-123");
        assert_eq!(registration.email, "robin@x.com");
        assert_eq!(registration.status, RegistrationStatus::Approved);
        assert_eq!(registration.notified_at, registration.created_at);

        let entries = log.entries();
        assert_eq!(entries.len(), 1, "exactly one confirmation per approval");
        assert_eq!(entries[0].headline, "Parking slot approved for ABC-123");
        assert_eq!(
            entries[0].details,
            "Confirmation sent to robin@x.com and 555-1 for 2 hours."
        );
        assert_eq!(entries[0].created_at, registration.notified_at);
    }

    #[test]
    fn single_hour_confirmation_uses_singular_wording() {
        let (service, _, log) = build_service(ApprovalPolicy::default());
        service
            .register(guest("pat@x.com", "gg-01", 1))
            .expect("approval succeeds");

        let entries = log.entries();
        assert!(entries[0].details.ends_with("for 1 hour."));
    }

    #[test]
    fn duplicate_primary_slot_is_rejected() {
        let (service, _, log) = build_service(ApprovalPolicy::default());
        service.register(robin()).expect("first approval succeeds");

        match service.register(robin()) {
            Err(ApprovalError::Rejected(RegistrationRejection::SlotAlreadyUsed(slot))) => {
                assert_eq!(slot, VehicleSlot::Primary);
            }
            other => panic!("expected slot rejection, got {other:?}"),
        }

        assert_eq!(log.entries().len(), 1, "rejections never notify");
    }

    #[test]
    fn secondary_without_primary_is_rejected() {
        let (service, _, _) = build_service(ApprovalPolicy::default());
        let mut candidate = guest("new@x.com", "gg-02", 4);
        candidate.vehicle_slot = VehicleSlot::Secondary;

        match service.register(candidate) {
            Err(ApprovalError::Rejected(rejection)) => {
                assert_eq!(rejection, RegistrationRejection::PrimaryVehicleRequiredFirst);
            }
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[test]
    fn full_account_rejects_any_further_slot() {
        let (service, _, _) = build_service(ApprovalPolicy::default());
        service.register(robin()).expect("primary approved");

        let mut secondary = robin();
        secondary.vehicle_slot = VehicleSlot::Secondary;
        secondary.vehicle_plate = "xyz-789".to_string();
        service.register(secondary).expect("secondary approved");

        // With both slots taken, the slot collision fires first by contract.
        match service.register(robin()) {
            Err(ApprovalError::Rejected(RegistrationRejection::SlotAlreadyUsed(slot))) => {
                assert_eq!(slot, VehicleSlot::Primary);
            }
            other => panic!("expected slot rejection, got {other:?}"),
        }
    }
}

mod board {
    use super::common::*;
    use parking_desk::approvals::{ApprovalPolicy, RegistrationStatus};

    #[test]
    fn summary_tracks_active_registrations_only() {
        let (service, _, _) = build_service(ApprovalPolicy::default());

        let tenant = service.register(robin()).expect("tenant approved");
        service
            .register(guest("pat@x.com", "gg-01", 6))
            .expect("guest approved");

        let summary = service.summary().expect("summary");
        assert_eq!(summary.active, 2);
        assert_eq!(summary.tenants, 1);
        assert_eq!(summary.guests, 1);
        assert_eq!(summary.total_hours, 8);

        service
            .update_status(&tenant.id, RegistrationStatus::Completed)
            .expect("release applies");

        let summary = service.summary().expect("summary");
        assert_eq!(summary.active, 1);
        assert_eq!(summary.tenants, 0);
        assert_eq!(summary.guests, 1);
        assert_eq!(summary.total_hours, 6);
    }

    #[test]
    fn listing_is_latest_first() {
        let (service, _, _) = build_service(ApprovalPolicy::default());
        service.register(robin()).expect("first approved");
        service
            .register(guest("pat@x.com", "gg-01", 3))
            .expect("second approved");

        let records = service.registrations().expect("listing");
        assert_eq!(records.len(), 2);
        // Identical timestamps under the pinned clock keep insertion order
        // within the stable descending sort.
        assert!(records
            .iter()
            .all(|record| record.created_at == approval_instant()));
    }
}

mod routing {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::common::*;
    use parking_desk::approvals::{approvals_router, ApprovalPolicy};

    fn build_router() -> axum::Router {
        let (service, _, _) = build_service(ApprovalPolicy::default());
        approvals_router(Arc::new(service))
    }

    #[tokio::test]
    async fn register_then_list_round_trip() {
        let router = build_router();

        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/parking/registrations")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        serde_json::to_vec(&robin()).expect("serialize request"),
                    ))
                    .expect("request"),
            )
            .await
            .expect("router dispatch");
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = router
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/api/v1/parking/registrations")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router dispatch");
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("body");
        let payload: Value = serde_json::from_slice(&body).expect("json");
        let records = payload.as_array().expect("array");
        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0].get("vehicle_plate").and_then(Value::as_str),
            Some("ABC-123"),
        );
        assert_eq!(records[0].get("status"), Some(&json!("approved")));
    }
}
