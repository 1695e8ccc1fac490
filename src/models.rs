use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fulfillment status of an order. Owned by the backend; the client only
/// ever reads it. `Processing` and `Out for Delivery` are transient values
/// the server emits between the main steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    Pending,
    Approved,
    Processing,
    Packed,
    Shipped,
    #[serde(rename = "Out for Delivery")]
    OutForDelivery,
    Delivered,
    Cancelled,
    Returned,
}

impl OrderStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Cancelled | OrderStatus::Returned)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "Pending"),
            OrderStatus::Approved => write!(f, "Approved"),
            OrderStatus::Processing => write!(f, "Processing"),
            OrderStatus::Packed => write!(f, "Packed"),
            OrderStatus::Shipped => write!(f, "Shipped"),
            OrderStatus::OutForDelivery => write!(f, "Out for Delivery"),
            OrderStatus::Delivered => write!(f, "Delivered"),
            OrderStatus::Cancelled => write!(f, "Cancelled"),
            OrderStatus::Returned => write!(f, "Returned"),
        }
    }
}

/// Return workflow state, layered on top of `OrderStatus` as an independent
/// machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReturnStatus {
    None,
    Requested,
    Approved,
    Rejected,
    Returned,
    Refunded,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub name: String,
    pub image: String,
    pub price: i64,
    pub quantity: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hsn: Option<String>,
}

/// Server-owned order snapshot. The client holds a cached copy keyed by
/// `id`; monetary fields are minor units and `total_price` is authoritative,
/// never recomputed here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    pub order_items: Vec<OrderItem>,
    pub items_price: i64,
    pub tax_price: i64,
    pub shipping_price: i64,
    #[serde(default)]
    pub discount_amount: i64,
    pub total_price: i64,
    #[serde(default)]
    pub is_paid: bool,
    #[serde(default)]
    pub is_refunded: bool,
    #[serde(default)]
    pub refund_amount: Option<i64>,
    #[serde(default)]
    pub refund_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub return_status: Option<ReturnStatus>,
}

/// Append-only refund audit record; never mutated client-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefundLog {
    pub id: String,
    pub order_id: String,
    pub amount: i64,
    pub delivery_charge: i64,
    pub total_refundable_amount: i64,
    pub initiated_by: String,
    pub status: String,
    #[serde(default)]
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    Percentage,
    Fixed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    pub code: String,
    pub discount_type: DiscountType,
    pub discount_value: i64,
    pub expiry_date: DateTime<Utc>,
    pub max_uses: i64,
    pub used_count: i64,
    pub is_active: bool,
    #[serde(default)]
    pub assigned_to: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VendorStatus {
    Pending,
    UnderReview,
    Approved,
    Suspended,
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceDocument {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub doc_type: String,
    pub status: DocumentStatus,
    pub file_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub plan: String,
    #[serde(default)]
    pub upcoming_plan: Option<String>,
}

/// Vendor record. Vendor status and document statuses are independent
/// machines; approving the vendor does not touch its documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vendor {
    pub id: String,
    pub business_name: String,
    pub status: VendorStatus,
    #[serde(default)]
    pub compliance_documents: Vec<ComplianceDocument>,
    #[serde(default)]
    pub subscription: Option<Subscription>,
    pub commission_rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub id: String,
    pub line1: String,
    #[serde(default)]
    pub line2: Option<String>,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    #[serde(default)]
    pub is_default: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub gst_claim_enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletEntry {
    pub id: String,
    pub amount: i64,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    pub balance: i64,
    #[serde(default)]
    pub entries: Vec<WalletEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub from: String,
    pub body: String,
    pub sent_at: DateTime<Utc>,
}
