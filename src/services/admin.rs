use std::collections::BTreeMap;

use serde::de::DeserializeOwned;

use crate::{
    dto::admin::{ModerationRequest, Payout, ProductApproval, ReturnCase, WorkflowPage, WorkflowQuery},
    error::{ApiResult, MutationResult},
    gateway::ApiGateway,
    models::{DocumentStatus, RefundLog, Vendor},
    services::into_ack,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowResource {
    Vendors,
    Approvals,
    Payouts,
    Returns,
}

impl WorkflowResource {
    fn path(self) -> &'static str {
        match self {
            WorkflowResource::Vendors => "admin/vendors",
            WorkflowResource::Approvals => "admin/approvals",
            WorkflowResource::Payouts => "admin/payouts",
            WorkflowResource::Returns => "admin/returns",
        }
    }
}

/// The shared back-office screen pattern: fetch a filtered, paginated list
/// with counts-by-status facets; moderate a record; re-fetch the whole list
/// after every successful mutation. Unlike the order cache there is no
/// optimistic merge here, correctness wins over responsiveness.
pub struct BackOfficeWorkflow<T> {
    resource: WorkflowResource,
    query: WorkflowQuery,
    records: Vec<T>,
    counts: BTreeMap<String, i64>,
}

impl<T: DeserializeOwned> BackOfficeWorkflow<T> {
    pub fn new(resource: WorkflowResource) -> Self {
        Self {
            resource,
            query: WorkflowQuery::default(),
            records: Vec::new(),
            counts: BTreeMap::new(),
        }
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn counts(&self) -> &BTreeMap<String, i64> {
        &self.counts
    }

    /// Clicking a facet sets the status filter and rewinds to page one.
    pub fn set_facet(&mut self, status: Option<String>) {
        self.query.status = status;
        self.query.pagination.page = Some(1);
    }

    pub fn set_search(&mut self, search: Option<String>) {
        self.query.search = search;
        self.query.pagination.page = Some(1);
    }

    pub fn set_page(&mut self, page: i64) {
        self.query.pagination.page = Some(page);
    }

    pub async fn refresh(&mut self, gateway: &ApiGateway) -> ApiResult<()> {
        let pairs = self.query.to_query_pairs();
        let envelope = gateway
            .get_with_query::<WorkflowPage<T>>(self.resource.path(), &pairs)
            .await?;
        if let Some(page) = envelope.data {
            self.records = page.items;
            self.counts = page.counts;
        }
        Ok(())
    }

    /// Approve/reject/suspend a record. On success the whole list is
    /// re-fetched; on failure the message is returned for the operator to
    /// see, and nothing is retried.
    pub async fn moderate(
        &mut self,
        gateway: &ApiGateway,
        id: &str,
        target_status: &str,
        reason: Option<String>,
    ) -> MutationResult<()> {
        let body = ModerationRequest {
            status: target_status.to_string(),
            reason,
        };
        let result = into_ack(
            gateway
                .put(&format!("{}/{id}", self.resource.path()), &body)
                .await,
        );
        if result.is_success() {
            if let Err(err) = self.refresh(gateway).await {
                tracing::warn!(error = %err, "list re-fetch after moderation failed");
            }
        }
        result
    }
}

pub type VendorWorkflow = BackOfficeWorkflow<Vendor>;
pub type ApprovalWorkflow = BackOfficeWorkflow<ProductApproval>;
pub type PayoutWorkflow = BackOfficeWorkflow<Payout>;
pub type ReturnsWorkflow = BackOfficeWorkflow<ReturnCase>;

impl BackOfficeWorkflow<Vendor> {
    pub fn vendors() -> Self {
        Self::new(WorkflowResource::Vendors)
    }

    /// Compliance documents carry their own state machine; reviewing one
    /// never touches the vendor's own status.
    pub async fn review_document(
        &mut self,
        gateway: &ApiGateway,
        vendor_id: &str,
        document_id: &str,
        status: DocumentStatus,
        reason: Option<String>,
    ) -> MutationResult<()> {
        let status = match status {
            DocumentStatus::Pending => "pending",
            DocumentStatus::Approved => "approved",
            DocumentStatus::Rejected => "rejected",
        };
        let body = ModerationRequest {
            status: status.to_string(),
            reason,
        };
        let result = into_ack(
            gateway
                .put(
                    &format!("admin/vendors/{vendor_id}/documents/{document_id}"),
                    &body,
                )
                .await,
        );
        if result.is_success() {
            if let Err(err) = self.refresh(gateway).await {
                tracing::warn!(error = %err, "vendor re-fetch after document review failed");
            }
        }
        result
    }
}

impl BackOfficeWorkflow<ProductApproval> {
    pub fn approvals() -> Self {
        Self::new(WorkflowResource::Approvals)
    }
}

impl BackOfficeWorkflow<Payout> {
    pub fn payouts() -> Self {
        Self::new(WorkflowResource::Payouts)
    }
}

impl BackOfficeWorkflow<ReturnCase> {
    pub fn returns() -> Self {
        Self::new(WorkflowResource::Returns)
    }

    /// Append-only refund audit trail for one order, read straight through.
    pub async fn refund_log(
        &self,
        gateway: &ApiGateway,
        order_id: &str,
    ) -> ApiResult<Vec<RefundLog>> {
        Ok(gateway
            .get::<Vec<RefundLog>>(&format!("admin/returns/{order_id}/refunds"))
            .await?
            .data
            .unwrap_or_default())
    }
}
