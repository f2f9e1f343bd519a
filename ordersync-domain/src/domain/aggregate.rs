use crate::{Company, Customer, Order, OrderCoupon, OrderFee, OrderProduct};
use serde::{Deserialize, Serialize};

/// Outcome of matching a customer to a B2B company.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyResolution {
    pub matched_company: Option<Company>,
    pub company_id: Option<u64>,
    pub e8_company_id: Option<String>,
}

impl CompanyResolution {
    pub fn from_company(company: &Company, field_label: &str) -> Self {
        Self {
            company_id: company.company_id,
            e8_company_id: company.field_value(field_label),
            matched_company: Some(company.clone()),
        }
    }
}

/// Everything known about one order after a webhook delivery. Optional parts
/// serialise as `null`, never as missing keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedResult {
    pub order: Option<Order>,
    pub customer: Option<Customer>,
    pub products: Vec<OrderProduct>,
    pub fees: Vec<OrderFee>,
    pub coupons: Vec<OrderCoupon>,
    pub matched_company: Option<Company>,
    pub company_id: Option<u64>,
    pub e8_company_id: Option<String>,
}

impl AggregatedResult {
    pub fn new(
        order: Option<Order>,
        customer: Option<Customer>,
        products: Vec<OrderProduct>,
        fees: Vec<OrderFee>,
        coupons: Vec<OrderCoupon>,
        resolution: CompanyResolution,
    ) -> Self {
        Self {
            order,
            customer,
            products,
            fees,
            coupons,
            matched_company: resolution.matched_company,
            company_id: resolution.company_id,
            e8_company_id: resolution.e8_company_id,
        }
    }
}
