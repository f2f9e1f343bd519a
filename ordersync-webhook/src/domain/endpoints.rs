use super::config::WebhookConfig;

/// URLs of every upstream resource the service touches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommerceEndpoints {
    v2: String,
    v3: String,
    companies: String,
}

impl CommerceEndpoints {
    pub fn new(config: &WebhookConfig) -> Self {
        let store = format!(
            "{}/stores/{}",
            config.commerce_api_base_url.trim_end_matches('/'),
            config.store_hash
        );

        Self {
            v2: format!("{store}/v2"),
            v3: format!("{store}/v3"),
            companies: format!(
                "{}/api/v3/io/companies",
                config.company_api_base_url.trim_end_matches('/')
            ),
        }
    }

    pub fn order(&self, order_id: u64) -> String {
        format!("{}/orders/{order_id}", self.v2)
    }

    pub fn order_products(&self, order_id: u64) -> String {
        format!("{}/orders/{order_id}/products", self.v2)
    }

    pub fn order_fees(&self, order_id: u64) -> String {
        format!("{}/orders/{order_id}/fees", self.v2)
    }

    pub fn order_coupons(&self, order_id: u64) -> String {
        format!("{}/orders/{order_id}/coupons", self.v2)
    }

    pub fn customer(&self, customer_id: u64) -> String {
        format!("{}/customers/{customer_id}", self.v2)
    }

    pub fn companies(&self) -> &str {
        &self.companies
    }

    pub fn hooks(&self) -> String {
        format!("{}/hooks", self.v3)
    }
}
