use std::sync::Arc;

use super::domain::{
    Notification, Registration, RegistrationId, RegistrationRequest, RegistrationStatus,
};
use super::repository::{DispatchError, NotificationLog, RegistrationStore, StoreError};
use super::summary::{summarize, ParkingSummary};
use super::validate::{
    ApprovalGuard, Clock, IdGenerator, RegistrationRejection, SequenceIds, SystemClock,
};

/// Policy dials for the approval desk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApprovalPolicy {
    /// Reject status updates that move backwards through
    /// approved -> parked -> completed instead of silently applying them.
    /// Off by default: the desk historically accepted any transition.
    pub strict_lifecycle: bool,
}

/// Service composing the approval guard, registration store, and dispatch
/// log. All state lives behind the injected store and log; the service
/// itself is stateless apart from its id sequence.
pub struct ParkingDeskService<S, N> {
    guard: ApprovalGuard,
    store: Arc<S>,
    log: Arc<N>,
    ids: Arc<dyn IdGenerator>,
    policy: ApprovalPolicy,
}

impl<S, N> ParkingDeskService<S, N>
where
    S: RegistrationStore + 'static,
    N: NotificationLog + 'static,
{
    pub fn new(store: Arc<S>, log: Arc<N>, policy: ApprovalPolicy) -> Self {
        Self::with_capabilities(
            store,
            log,
            policy,
            Arc::new(SystemClock),
            Arc::new(SequenceIds::default()),
        )
    }

    /// Construct with explicit clock and id sources so tests can pin both.
    pub fn with_capabilities(
        store: Arc<S>,
        log: Arc<N>,
        policy: ApprovalPolicy,
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        Self {
            guard: ApprovalGuard::new(clock, ids.clone()),
            store,
            log,
            ids,
            policy,
        }
    }

    /// Validate a candidate against the current records, append it, and
    /// dispatch exactly one confirmation notice.
    ///
    /// The snapshot-validate-append sequence assumes a single logical
    /// writer; concurrent registrations for the same account need an outer
    /// lock around this call.
    pub fn register(&self, request: RegistrationRequest) -> Result<Registration, ApprovalError> {
        let existing = self.store.snapshot()?;
        let registration = self.guard.approve(request, &existing)?;

        self.store.append(registration.clone())?;

        let notification =
            Notification::for_approval(self.ids.notification_id(), &registration);
        self.log.dispatch(notification)?;

        Ok(registration)
    }

    /// Apply a status change. Unknown ids are a silent no-op. Backward
    /// transitions are rejected only under the strict lifecycle policy;
    /// skipping parked on the way to completed is always allowed.
    pub fn update_status(
        &self,
        id: &RegistrationId,
        status: RegistrationStatus,
    ) -> Result<(), ApprovalError> {
        if self.policy.strict_lifecycle {
            let existing = self.store.snapshot()?;
            if let Some(current) = existing.iter().find(|registration| &registration.id == id) {
                if status.rank() < current.status.rank() {
                    return Err(ApprovalError::InvalidTransition {
                        from: current.status,
                        to: status,
                    });
                }
            }
        }

        self.store.set_status(id, status)?;
        Ok(())
    }

    /// Display-ordered snapshot, latest approval first.
    pub fn registrations(&self) -> Result<Vec<Registration>, ApprovalError> {
        let mut records = self.store.snapshot()?;
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }

    /// Confirmation feed, newest first.
    pub fn notifications(&self) -> Result<Vec<Notification>, ApprovalError> {
        Ok(self.log.feed()?)
    }

    /// Recompute the header summary over the current records.
    pub fn summary(&self) -> Result<ParkingSummary, ApprovalError> {
        let records = self.store.snapshot()?;
        Ok(summarize(&records))
    }
}

/// Error raised by the approval desk service.
#[derive(Debug, thiserror::Error)]
pub enum ApprovalError {
    #[error(transparent)]
    Rejected(#[from] RegistrationRejection),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
    #[error("cannot move a {} registration back to {}", from.label(), to.label())]
    InvalidTransition {
        from: RegistrationStatus,
        to: RegistrationStatus,
    },
}
