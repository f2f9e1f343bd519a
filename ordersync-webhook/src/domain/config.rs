use envconfig::Envconfig;
use ordersync_domain::{ApiCredential, AuthScheme};
use std::{
    fmt::{Display, Formatter},
    net::SocketAddr,
};
use strum::{AsRefStr, EnumString};

/// What to do when the order itself cannot be fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum OrderFetchPolicy {
    /// Fail the delivery with a 500, every other lookup depends on the order.
    Strict,
    /// Carry on with `order: null`.
    Tolerant,
}

#[derive(Envconfig, Clone)] // Intentionally no Debug so secret is not printed
pub struct WebhookConfig {
    #[envconfig(from = "INTERNAL_SERVER_ADDRESS", default = "0.0.0.0:3000")]
    pub address: SocketAddr,
    #[envconfig(from = "WORKER_THREADS")]
    pub worker_threads: Option<usize>,
    #[envconfig(from = "STORE_HASH")]
    pub store_hash: String,
    #[envconfig(from = "COMMERCE_API_TOKEN")]
    pub commerce_api_token: String,
    #[envconfig(from = "COMPANY_API_TOKEN")]
    pub company_api_token: String,
    #[envconfig(from = "COMMERCE_API_BASE_URL", default = "https://api.bigcommerce.com")]
    pub commerce_api_base_url: String,
    #[envconfig(
        from = "COMPANY_API_BASE_URL",
        default = "https://api-b2b.bigcommerce.com"
    )]
    pub company_api_base_url: String,
    #[envconfig(from = "COMMERCE_AUTH_SCHEME", default = "X-Auth-Token")]
    pub commerce_auth_scheme: AuthScheme,
    #[envconfig(from = "COMPANY_AUTH_SCHEME", default = "X-Auth-Token")]
    pub company_auth_scheme: AuthScheme,
    #[envconfig(from = "CUSTOM_FIELD_LABEL", default = "E8 COMPANY ID")]
    pub custom_field_label: String,
    #[envconfig(from = "ORDER_FETCH_POLICY", default = "strict")]
    pub order_fetch_policy: OrderFetchPolicy,
    #[envconfig(from = "HTTP_CLIENT_TIMEOUT_SECS", default = "30")]
    pub http_client_timeout_secs: u64,
    #[envconfig(from = "PUBLIC_DOMAIN")]
    pub public_domain: Option<String>,
}

impl WebhookConfig {
    pub fn commerce_credential(&self) -> ApiCredential {
        ApiCredential::new(
            self.commerce_auth_scheme.clone(),
            self.commerce_api_token.as_str(),
        )
    }

    pub fn company_credential(&self) -> ApiCredential {
        ApiCredential::new(
            self.company_auth_scheme.clone(),
            self.company_api_token.as_str(),
        )
    }
}

impl Display for WebhookConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "INTERNAL_SERVER_ADDRESS: {}", self.address)?;
        writeln!(f, "WORKER_THREADS: {:?}", self.worker_threads)?;
        writeln!(f, "STORE_HASH: {}", self.store_hash)?;
        writeln!(f, "COMMERCE_API_TOKEN: ****")?;
        writeln!(f, "COMPANY_API_TOKEN: ****")?;
        writeln!(f, "COMMERCE_API_BASE_URL: {}", self.commerce_api_base_url)?;
        writeln!(f, "COMPANY_API_BASE_URL: {}", self.company_api_base_url)?;
        writeln!(f, "COMMERCE_AUTH_SCHEME: {}", self.commerce_auth_scheme)?;
        writeln!(f, "COMPANY_AUTH_SCHEME: {}", self.company_auth_scheme)?;
        writeln!(f, "CUSTOM_FIELD_LABEL: {}", self.custom_field_label)?;
        writeln!(f, "ORDER_FETCH_POLICY: {}", self.order_fetch_policy.as_ref())?;
        writeln!(
            f,
            "HTTP_CLIENT_TIMEOUT_SECS: {}",
            self.http_client_timeout_secs
        )?;
        writeln!(f, "PUBLIC_DOMAIN: {:?}", self.public_domain)
    }
}
