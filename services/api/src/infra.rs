use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use parking_desk::approvals::{
    DispatchError, Notification, NotificationLog, Registration, RegistrationId,
    RegistrationStatus, RegistrationStore, StoreError,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Session-scoped registration collection. Insertion order is the stored
/// order; display ordering is derived by the service.
#[derive(Default, Clone)]
pub(crate) struct InMemoryRegistrationStore {
    records: Arc<Mutex<Vec<Registration>>>,
}

impl RegistrationStore for InMemoryRegistrationStore {
    fn append(&self, registration: Registration) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("registration mutex poisoned");
        guard.push(registration);
        Ok(())
    }

    fn set_status(
        &self,
        id: &RegistrationId,
        status: RegistrationStatus,
    ) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("registration mutex poisoned");
        if let Some(record) = guard.iter_mut().find(|record| &record.id == id) {
            record.status = status;
        }
        Ok(())
    }

    fn snapshot(&self) -> Result<Vec<Registration>, StoreError> {
        let guard = self.records.lock().expect("registration mutex poisoned");
        Ok(guard.clone())
    }
}

/// Session-scoped confirmation feed. Prepends on dispatch so the stored
/// order stays newest-first.
#[derive(Default, Clone)]
pub(crate) struct InMemoryNotificationLog {
    entries: Arc<Mutex<Vec<Notification>>>,
}

impl NotificationLog for InMemoryNotificationLog {
    fn dispatch(&self, notification: Notification) -> Result<(), DispatchError> {
        let mut guard = self.entries.lock().expect("notification mutex poisoned");
        guard.insert(0, notification);
        Ok(())
    }

    fn feed(&self) -> Result<Vec<Notification>, DispatchError> {
        let guard = self.entries.lock().expect("notification mutex poisoned");
        Ok(guard.clone())
    }
}
