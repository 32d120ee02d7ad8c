use serde::Serialize;

use crate::controllers::delete::DeleteConfirmation;
use crate::controllers::form::{FormMode, VoucherForm};
use crate::controllers::list::{ListStatus, VoucherList};
use crate::domain::types::VoucherId;
use crate::domain::voucher::Voucher;
use crate::forms::voucher::VoucherDraft;
use crate::pagination::Paginated;

/// Everything the voucher table needs to render one frame.
#[derive(Debug, Serialize)]
pub struct VoucherListPage {
    pub status: ListStatus,
    pub vouchers: Paginated<Voucher>,
    /// Search term echoed back to the search box when present.
    pub search_query: Option<String>,
    pub error: Option<String>,
}

impl From<&VoucherList> for VoucherListPage {
    fn from(list: &VoucherList) -> Self {
        Self {
            status: list.status(),
            vouchers: Paginated::new(
                list.items().to_vec(),
                list.page(),
                list.total_items().unwrap_or(0),
                list.per_page(),
            ),
            search_query: list.search_query().map(str::to_string),
            error: list.error().map(str::to_string),
        }
    }
}

/// State of the create/edit dialog.
#[derive(Debug, Serialize)]
pub struct VoucherFormView {
    /// Identifier of the voucher being edited; `None` in create mode.
    pub editing: Option<VoucherId>,
    pub draft: VoucherDraft,
    pub error: Option<String>,
    pub submitting: bool,
}

impl From<&VoucherForm> for VoucherFormView {
    fn from(form: &VoucherForm) -> Self {
        Self {
            editing: match form.mode() {
                FormMode::Create => None,
                FormMode::Edit { id } => Some(*id),
            },
            draft: form.draft().clone(),
            error: form.issue().map(|issue| issue.to_string()),
            submitting: form.submitting(),
        }
    }
}

/// State of the delete confirmation dialog.
#[derive(Debug, Serialize)]
pub struct DeleteDialogView {
    pub target: Option<Voucher>,
    pub error: Option<String>,
    pub deleting: bool,
}

impl From<&DeleteConfirmation> for DeleteDialogView {
    fn from(dialog: &DeleteConfirmation) -> Self {
        Self {
            target: dialog.target().cloned(),
            error: dialog.error().map(str::to_string),
            deleting: dialog.deleting(),
        }
    }
}
