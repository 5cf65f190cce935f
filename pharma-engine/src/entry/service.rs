//! Entry workflow
//!
//! Binds an [`OrderDraft`] to the remote API: duplicate invoice checks and
//! order submission. A failed submission never touches the draft, so the
//! user can fix the problem and retry.

use std::sync::Arc;

use chrono::NaiveDate;
use pharma_client::{ClientError, PharmacyApi};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{PurchaseOrder, SellOrder};

use super::draft::{OrderDraft, Submission};

/// Order accepted by the API
#[derive(Debug, Clone, PartialEq)]
pub enum SubmittedOrder {
    Purchase(PurchaseOrder),
    Sell(SellOrder),
}

#[derive(Clone)]
pub struct EntryService {
    api: Arc<dyn PharmacyApi>,
}

impl std::fmt::Debug for EntryService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntryService").finish_non_exhaustive()
    }
}

impl EntryService {
    pub fn new(api: Arc<dyn PharmacyApi>) -> Self {
        Self { api }
    }

    /// Ask the API whether the draft's invoice number is already recorded
    /// for its distributor, and record the conflict on the draft.
    ///
    /// Returns `Ok(false)` without a request while the header is incomplete.
    /// A failed check is logged and treated as "no conflict"; the API still
    /// rejects a duplicate at submit time.
    pub async fn check_invoice(&self, draft: &mut OrderDraft) -> AppResult<bool> {
        if !draft.kind().is_purchase() {
            return Ok(false);
        }
        let Some(distributor_id) = draft.distributor_id() else {
            return Ok(false);
        };
        let entered = draft.invoice_number().to_string();
        let invoice_number = entered.trim();
        if invoice_number.is_empty() {
            return Ok(false);
        }

        match self
            .api
            .check_duplicate_invoice(invoice_number, distributor_id)
            .await
        {
            Ok(true) => {
                tracing::info!(
                    invoice = %invoice_number,
                    distributor_id,
                    "Duplicate invoice detected"
                );
                Ok(draft.mark_duplicate_invoice_for(&entered, distributor_id))
            }
            Ok(false) => Ok(false),
            Err(ClientError::Unauthorized) => Err(AppError::not_authenticated()),
            Err(e) => {
                tracing::warn!("Duplicate invoice check failed: {}", e);
                Ok(false)
            }
        }
    }

    /// Prepare and post the draft
    pub async fn submit(&self, draft: &OrderDraft, today: NaiveDate) -> AppResult<SubmittedOrder> {
        let submission = draft.prepare_submission(today).inspect_err(|e| {
            tracing::debug!(code = %e.code, "Draft not ready for submission: {}", e.message);
        })?;

        let result = match &submission {
            Submission::CreatePurchase(order) => self
                .api
                .create_purchase_order(order)
                .await
                .map(SubmittedOrder::Purchase),
            Submission::UpdatePurchase { id, order } => self
                .api
                .update_purchase_order(*id, order)
                .await
                .map(SubmittedOrder::Purchase),
            Submission::CreateSell(order) => self
                .api
                .create_sell_order(order)
                .await
                .map(SubmittedOrder::Sell),
        };

        match result {
            Ok(submitted) => {
                match &submitted {
                    SubmittedOrder::Purchase(order) => tracing::info!(
                        order_id = order.id,
                        invoice = %order.invoice_number,
                        items = order.items.len(),
                        "Purchase order saved"
                    ),
                    SubmittedOrder::Sell(order) => tracing::info!(
                        order_id = order.id,
                        bill = %order.bill_number,
                        items = order.items.len(),
                        "Sell order saved"
                    ),
                }
                Ok(submitted)
            }
            Err(e) => {
                tracing::error!("Order submission failed: {}", e);
                Err(submission_error(&submission, e))
            }
        }
    }
}

fn submission_error(submission: &Submission, err: ClientError) -> AppError {
    match (submission, err) {
        (
            Submission::CreatePurchase(order) | Submission::UpdatePurchase { order, .. },
            ClientError::Conflict(msg),
        ) => AppError::with_message(ErrorCode::DuplicateInvoice, msg)
            .with_detail("invoice_number", order.invoice_number.as_str())
            .with_detail("distributor_id", order.distributor_id),
        (_, err) => err.into(),
    }
}
