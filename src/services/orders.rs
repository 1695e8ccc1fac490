use crate::{
    auth::Identity,
    dto::orders::{OrderDraft, ReturnRequest, StatusUpdateRequest},
    error::{ApiResult, MutationResult},
    gateway::ApiGateway,
    models::{Order, OrderStatus, ReturnStatus},
    realtime::RealtimeEvent,
    services::into_mutation,
};

/// Cancellation is permitted only before packing or shipping begins.
/// Re-derived on every call so it always reflects the latest snapshot.
pub fn can_cancel(order: &Order) -> bool {
    matches!(
        order.status,
        OrderStatus::Pending | OrderStatus::Approved | OrderStatus::Processing
    )
}

/// A return may be requested once the order is delivered and no return has
/// been requested before.
pub fn can_return(order: &Order) -> bool {
    order.status == OrderStatus::Delivered
        && matches!(order.return_status, None | Some(ReturnStatus::None))
}

/// Client-side split of an order total into refundable and non-refundable
/// portions. Shipping is never refundable; every surface that shows a refund
/// estimate goes through this one function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefundPreview {
    pub refundable: i64,
    pub non_refundable: i64,
    pub total: i64,
}

pub fn refund_preview(order: &Order) -> RefundPreview {
    let refundable = order.items_price + order.tax_price;
    RefundPreview {
        refundable,
        non_refundable: order.shipping_price,
        total: refundable,
    }
}

/// The five tracking steps, totally ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ProgressStep {
    Placed,
    Confirmed,
    Packed,
    Shipped,
    Delivered,
}

impl ProgressStep {
    pub fn index(self) -> u8 {
        match self {
            ProgressStep::Placed => 1,
            ProgressStep::Confirmed => 2,
            ProgressStep::Packed => 3,
            ProgressStep::Shipped => 4,
            ProgressStep::Delivered => 5,
        }
    }
}

/// Progress state for tracking views. Cancelled and Returned orders get a
/// distinct terminal state in every view instead of falling back to an
/// arbitrary step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    Stage(ProgressStep),
    Terminal(OrderStatus),
}

impl Progress {
    /// Step index for bar rendering; terminal states have no step.
    pub fn step_index(&self) -> Option<u8> {
        match self {
            Progress::Stage(step) => Some(step.index()),
            Progress::Terminal(_) => None,
        }
    }
}

pub fn progress(status: OrderStatus) -> Progress {
    match status {
        OrderStatus::Pending => Progress::Stage(ProgressStep::Placed),
        // Processing is a sub-state of confirmation, Out for Delivery of
        // shipping.
        OrderStatus::Approved | OrderStatus::Processing => Progress::Stage(ProgressStep::Confirmed),
        OrderStatus::Packed => Progress::Stage(ProgressStep::Packed),
        OrderStatus::Shipped | OrderStatus::OutForDelivery => {
            Progress::Stage(ProgressStep::Shipped)
        }
        OrderStatus::Delivered => Progress::Stage(ProgressStep::Delivered),
        OrderStatus::Cancelled | OrderStatus::Returned => Progress::Terminal(status),
    }
}

/// Session-scoped cache of the orders visible to the current identity, plus
/// the merge rules that keep it consistent under realtime pushes. There is
/// exactly one of these per session; consumers treat `orders()` as a
/// snapshot and re-read after each mutation.
pub struct OrderViewModel {
    gateway: ApiGateway,
    orders: Vec<Order>,
}

impl OrderViewModel {
    pub fn new(gateway: ApiGateway) -> Self {
        Self {
            gateway,
            orders: Vec::new(),
        }
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn find(&self, id: &str) -> Option<&Order> {
        self.orders.iter().find(|o| o.id == id)
    }

    /// Best-effort refresh. Order history is off the critical path, so a
    /// failed load keeps the previous cache and is only logged.
    pub async fn load(&mut self, identity: &Identity) {
        let path = if identity.is_admin() {
            "orders"
        } else {
            "orders/myorders"
        };
        match self.gateway.get::<Vec<Order>>(path).await {
            Ok(envelope) => {
                if let Some(orders) = envelope.data {
                    self.orders = orders;
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "order list refresh failed, keeping cached list");
            }
        }
    }

    /// Submit a new order. The cache gets the server's snapshot prepended;
    /// display layers still re-sort by `created_at`.
    pub async fn create(&mut self, draft: &OrderDraft) -> MutationResult<Order> {
        let result = into_mutation(self.gateway.post::<_, Order>("orders", draft).await);
        if let MutationResult::Success { data, .. } = &result {
            self.orders.insert(0, data.clone());
        }
        result
    }

    /// Replace-by-id merge. Idempotent under duplicate delivery, never
    /// appends unknown ids, and discards snapshots older than the cached
    /// copy so the optimistic-echo/realtime race resolves by version rather
    /// than arrival order.
    pub fn apply_status_update(&mut self, incoming: Order) {
        let Some(cached) = self.orders.iter_mut().find(|o| o.id == incoming.id) else {
            return;
        };
        if let (Some(new), Some(old)) = (incoming.updated_at, cached.updated_at) {
            if new < old {
                tracing::debug!(order_id = %incoming.id, "discarding stale order snapshot");
                return;
            }
        }
        *cached = incoming;
    }

    pub async fn cancel(&mut self, id: &str) -> MutationResult<Order> {
        let result = into_mutation(
            self.gateway
                .post::<_, Order>(&format!("orders/{id}/cancel"), &serde_json::json!({}))
                .await,
        );
        if let MutationResult::Success { data, .. } = &result {
            self.apply_status_update(data.clone());
        }
        result
    }

    pub async fn request_return(&mut self, id: &str, reason: &str) -> MutationResult<Order> {
        let body = ReturnRequest {
            reason: reason.to_string(),
        };
        let result = into_mutation(
            self.gateway
                .post::<_, Order>(&format!("orders/{id}/return"), &body)
                .await,
        );
        if let MutationResult::Success { data, .. } = &result {
            self.apply_status_update(data.clone());
        }
        result
    }

    /// Admin status transition, echoed locally through the same merge path
    /// the realtime push uses.
    pub async fn update_status(
        &mut self,
        identity: &Identity,
        id: &str,
        status: OrderStatus,
    ) -> MutationResult<Order> {
        if !identity.is_admin() {
            return MutationResult::Failure {
                message: "Only admins can change order status".into(),
            };
        }
        let body = StatusUpdateRequest { status };
        let result = into_mutation(
            self.gateway
                .put::<_, Order>(&format!("orders/{id}/status"), &body)
                .await,
        );
        if let MutationResult::Success { data, .. } = &result {
            self.apply_status_update(data.clone());
        }
        result
    }

    /// Public-ish lookup by id; does not touch the cache.
    pub async fn track(&self, id: &str) -> ApiResult<Option<Order>> {
        let envelope = self
            .gateway
            .get::<Order>(&format!("orders/track/{id}"))
            .await?;
        Ok(envelope.data)
    }

    /// Realtime merge rule. `new-order` is admin-only; `order-status-updated`
    /// never creates rows; everything else belongs to other views.
    pub fn handle_event(&mut self, event: RealtimeEvent, identity: &Identity) {
        match event {
            RealtimeEvent::NewOrder(order) => {
                if identity.is_admin() && self.find(&order.id).is_none() {
                    self.orders.insert(0, order);
                }
            }
            RealtimeEvent::OrderStatusUpdated(order) => self.apply_status_update(order),
            RealtimeEvent::ActiveUsers(_) | RealtimeEvent::ReceiveMessage(_) => {}
        }
    }
}
