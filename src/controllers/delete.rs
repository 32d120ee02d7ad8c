use crate::domain::types::VoucherId;
use crate::domain::voucher::Voucher;
use crate::repository::errors::RepositoryResult;

#[derive(Clone, Debug, PartialEq)]
pub enum ConfirmAction {
    /// Delete this voucher and feed the response to
    /// [`DeleteConfirmation::resolve`].
    Dispatch(VoucherId),
    /// Nothing staged; no call is made.
    Idle,
    /// A delete is already in flight; this one is a no-op.
    AlreadyPending,
}

#[derive(Clone, Debug, PartialEq)]
pub enum DeleteOutcome {
    Deleted,
    /// The backend refused; the dialog stays open with the message.
    Failed(String),
}

/// Confirmation dialog state holding at most one pending delete target.
#[derive(Debug, Default)]
pub struct DeleteConfirmation {
    target: Option<Voucher>,
    in_flight: bool,
    error: Option<String>,
}

impl DeleteConfirmation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stages a voucher for deletion, replacing any previously staged one.
    /// Ignored while a delete is in flight.
    pub fn request(&mut self, voucher: Voucher) {
        if self.in_flight {
            return;
        }
        self.error = None;
        self.target = Some(voucher);
    }

    pub fn confirm(&mut self) -> ConfirmAction {
        if self.in_flight {
            return ConfirmAction::AlreadyPending;
        }
        match &self.target {
            Some(voucher) => {
                self.in_flight = true;
                ConfirmAction::Dispatch(voucher.id)
            }
            None => ConfirmAction::Idle,
        }
    }

    pub fn resolve(&mut self, result: RepositoryResult<()>) -> DeleteOutcome {
        self.in_flight = false;
        match result {
            Ok(()) => {
                self.target = None;
                self.error = None;
                DeleteOutcome::Deleted
            }
            Err(err) => {
                let message = err.to_string();
                self.error = Some(message.clone());
                DeleteOutcome::Failed(message)
            }
        }
    }

    /// Clears the staged target without touching the backend. Dismissing an
    /// already-closed dialog is fine; an in-flight delete keeps the dialog up
    /// until its response arrives.
    pub fn cancel(&mut self) {
        if self.in_flight {
            return;
        }
        self.target = None;
        self.error = None;
    }

    pub fn target(&self) -> Option<&Voucher> {
        self.target.as_ref()
    }

    pub fn deleting(&self) -> bool {
        self.in_flight
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
