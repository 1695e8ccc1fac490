use serde::{Deserialize, Serialize};

use crate::models::{OrderItem, OrderStatus};

/// Payload for `POST /orders`. Totals are echoed for server-side validation;
/// the server recomputes and owns the authoritative figures.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    pub order_items: Vec<OrderItem>,
    pub items_price: i64,
    pub tax_price: i64,
    pub shipping_price: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coupon_code: Option<String>,
    pub payment_method: String,
    pub shipping_address_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReturnRequest {
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: OrderStatus,
}
