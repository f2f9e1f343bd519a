use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An order as returned by `GET /v2/orders/{id}`. Fields the pipeline does not
/// act on are kept in `extra` so the aggregated record carries them through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: u64,
    pub customer_id: Option<u64>,
    pub status: Option<String>,
    pub currency_code: Option<String>,
    pub subtotal_inc_tax: Option<String>,
    pub total_ex_tax: Option<String>,
    pub total_inc_tax: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Order {
    /// Guest checkouts carry `customer_id: 0`.
    pub fn customer_reference(&self) -> Option<u64> {
        self.customer_id.filter(|id| *id > 0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderProduct {
    pub id: u64,
    pub product_id: Option<u64>,
    pub name: Option<String>,
    pub sku: Option<String>,
    pub quantity: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderFee {
    pub id: u64,
    #[serde(rename = "type")]
    pub fee_type: Option<String>,
    pub display_name_customer: Option<String>,
    pub cost_inc_tax: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderCoupon {
    pub id: u64,
    pub coupon_id: Option<u64>,
    pub code: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
