use std::collections::HashSet;
use std::fmt::{Display, Formatter};

use crate::domain::types::VoucherId;
use crate::domain::voucher::{NewVoucher, UpdateVoucher, Voucher};
use crate::forms::ValidationError;
use crate::forms::voucher::{VoucherDraft, VoucherField, VoucherFieldName};
use crate::repository::errors::RepositoryResult;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { id: VoucherId },
}

/// Message shown next to the form: a local validation failure or the text the
/// backend rejected the submit with.
#[derive(Clone, Debug, PartialEq)]
pub enum FormIssue {
    Invalid(ValidationError),
    Remote(String),
}

impl Display for FormIssue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FormIssue::Invalid(err) => write!(f, "{err}"),
            FormIssue::Remote(message) => write!(f, "{message}"),
        }
    }
}

/// The remote call a successful submit asks the caller to perform.
#[derive(Clone, Debug, PartialEq)]
pub enum VoucherMutation {
    Create(NewVoucher),
    Update(VoucherId, UpdateVoucher),
}

#[derive(Clone, Debug, PartialEq)]
pub enum SubmitAction {
    /// Perform this mutation and feed the response to [`VoucherForm::resolve`].
    Dispatch(VoucherMutation),
    /// Validation failed; nothing may reach the network.
    Rejected(ValidationError),
    /// A submit is already in flight; this one is a no-op.
    AlreadyPending,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SubmitOutcome {
    Saved(Voucher),
    /// The backend rejected the submit; the form stays open for retry.
    Failed(String),
}

/// Draft editor for one voucher, in create or edit mode.
///
/// At most one submit is in flight at a time: `submit` latches a guard that
/// only `resolve` releases.
#[derive(Debug)]
pub struct VoucherForm {
    mode: FormMode,
    draft: VoucherDraft,
    touched: HashSet<VoucherFieldName>,
    issue: Option<FormIssue>,
    in_flight: bool,
}

impl VoucherForm {
    /// Opens an empty create form.
    pub fn create() -> Self {
        Self {
            mode: FormMode::Create,
            draft: VoucherDraft::default(),
            touched: HashSet::new(),
            issue: None,
            in_flight: false,
        }
    }

    /// Opens an edit form initialized from an existing record.
    pub fn edit(voucher: &Voucher) -> Self {
        Self {
            mode: FormMode::Edit { id: voucher.id },
            draft: VoucherDraft::from(voucher),
            touched: HashSet::new(),
            issue: None,
            in_flight: false,
        }
    }

    pub fn set_field(&mut self, field: VoucherField) {
        // The code identifies the voucher; it cannot change once created.
        if matches!(self.mode, FormMode::Edit { .. }) && field.name() == VoucherFieldName::Code {
            return;
        }
        self.touched.insert(field.name());
        self.draft.apply(field);
    }

    /// First failing validation rule, if any.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.draft.validate().map(|_| ())
    }

    /// Re-validates and either hands back the mutation to dispatch or the
    /// reason nothing was sent.
    pub fn submit(&mut self) -> SubmitAction {
        if self.in_flight {
            return SubmitAction::AlreadyPending;
        }

        let validated = match self.draft.validate() {
            Ok(validated) => validated,
            Err(err) => {
                self.issue = Some(FormIssue::Invalid(err.clone()));
                return SubmitAction::Rejected(err);
            }
        };

        self.issue = None;
        self.in_flight = true;
        let mutation = match &self.mode {
            FormMode::Create => VoucherMutation::Create(validated.into_new()),
            FormMode::Edit { id } => VoucherMutation::Update(*id, validated.into_update()),
        };
        SubmitAction::Dispatch(mutation)
    }

    /// Feeds the mutation's response back in, releasing the in-flight guard.
    pub fn resolve(&mut self, result: RepositoryResult<Voucher>) -> SubmitOutcome {
        self.in_flight = false;
        match result {
            Ok(voucher) => {
                self.issue = None;
                SubmitOutcome::Saved(voucher)
            }
            Err(err) => {
                let message = err.to_string();
                self.issue = Some(FormIssue::Remote(message.clone()));
                SubmitOutcome::Failed(message)
            }
        }
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn draft(&self) -> &VoucherDraft {
        &self.draft
    }

    pub fn issue(&self) -> Option<&FormIssue> {
        self.issue.as_ref()
    }

    pub fn submitting(&self) -> bool {
        self.in_flight
    }

    pub fn is_touched(&self, field: VoucherFieldName) -> bool {
        self.touched.contains(&field)
    }
}
