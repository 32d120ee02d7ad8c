use log::error;

use crate::controllers::delete::{ConfirmAction, DeleteConfirmation, DeleteOutcome};
use crate::controllers::form::{SubmitAction, SubmitOutcome, VoucherForm, VoucherMutation};
use crate::controllers::list::VoucherList;
use crate::domain::types::VoucherId;
use crate::domain::voucher::Voucher;
use crate::forms::ValidationError;
use crate::repository::{VoucherReader, VoucherWriter};
use crate::services::{ServiceError, ServiceResult};

/// Result of driving one submit through the form controller.
#[derive(Debug, Clone, PartialEq)]
pub enum FormSubmission {
    Saved(Voucher),
    Rejected(ValidationError),
    Failed(String),
    AlreadyPending,
}

/// Result of driving one confirmation through the delete dialog.
#[derive(Debug, Clone, PartialEq)]
pub enum DeleteResolution {
    Deleted,
    Failed(String),
    Idle,
    AlreadyPending,
}

/// Runs the list controller's current query against the repository, following
/// at most one clamp-induced requery when the page count shrank.
pub fn load_vouchers<R>(list: &mut VoucherList, repo: &R)
where
    R: VoucherReader + ?Sized,
{
    let mut query = list.refetch();
    loop {
        let result = repo.list(&query);
        if let Err(err) = &result {
            error!("Failed to list vouchers: {err}");
        }
        match list.apply(result) {
            Some(follow_up) => query = follow_up,
            None => break,
        }
    }
}

/// Validates and submits the draft. A saved voucher refreshes the list; any
/// failure leaves the form open with its message.
pub fn submit_voucher_form<R>(
    form: &mut VoucherForm,
    list: &mut VoucherList,
    repo: &R,
) -> FormSubmission
where
    R: VoucherReader + VoucherWriter + ?Sized,
{
    match form.submit() {
        SubmitAction::Rejected(err) => FormSubmission::Rejected(err),
        SubmitAction::AlreadyPending => FormSubmission::AlreadyPending,
        SubmitAction::Dispatch(mutation) => {
            let result = match &mutation {
                VoucherMutation::Create(new_voucher) => repo.create(new_voucher),
                VoucherMutation::Update(id, updates) => repo.update(*id, updates),
            };
            match form.resolve(result) {
                SubmitOutcome::Saved(voucher) => {
                    load_vouchers(list, repo);
                    FormSubmission::Saved(voucher)
                }
                SubmitOutcome::Failed(message) => {
                    error!("Failed to save voucher: {message}");
                    FormSubmission::Failed(message)
                }
            }
        }
    }
}

/// Confirms the pending delete. Once the record is gone the list is
/// refreshed; a refusal keeps the dialog open with its message.
pub fn confirm_voucher_delete<R>(
    dialog: &mut DeleteConfirmation,
    list: &mut VoucherList,
    repo: &R,
) -> DeleteResolution
where
    R: VoucherReader + VoucherWriter + ?Sized,
{
    match dialog.confirm() {
        ConfirmAction::Idle => DeleteResolution::Idle,
        ConfirmAction::AlreadyPending => DeleteResolution::AlreadyPending,
        ConfirmAction::Dispatch(id) => match dialog.resolve(repo.delete(id)) {
            DeleteOutcome::Deleted => {
                load_vouchers(list, repo);
                DeleteResolution::Deleted
            }
            DeleteOutcome::Failed(message) => {
                error!("Failed to delete voucher {id}: {message}");
                DeleteResolution::Failed(message)
            }
        },
    }
}

/// Snapshots server truth for the edit dialog rather than trusting a
/// possibly stale table row.
pub fn open_edit_form<R>(repo: &R, id: VoucherId) -> ServiceResult<VoucherForm>
where
    R: VoucherReader + ?Sized,
{
    match repo.get_by_id(id) {
        Ok(Some(voucher)) => Ok(VoucherForm::edit(&voucher)),
        Ok(None) => Err(ServiceError::NotFound),
        Err(err) => {
            error!("Failed to load voucher {id}: {err}");
            Err(ServiceError::from(err))
        }
    }
}
