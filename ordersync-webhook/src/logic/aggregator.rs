use crate::domain::{
    config::{OrderFetchPolicy, WebhookConfig},
    endpoints::CommerceEndpoints,
};
use ordersync_domain::{
    keep_valid_rows, AggregatedResult, Api, CompanyDirectory, CompanyResolution, Customer,
    InternalError, Order, OrderCoupon, OrderFee, OrderProduct, OrderSyncError, ResilientClient,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Everything the pipeline needs besides the http client.
#[derive(Debug, Clone)]
pub struct AggregatorSettings {
    pub endpoints: CommerceEndpoints,
    pub custom_field_label: String,
    pub order_fetch_policy: OrderFetchPolicy,
}

impl From<&WebhookConfig> for AggregatorSettings {
    fn from(config: &WebhookConfig) -> Self {
        Self {
            endpoints: CommerceEndpoints::new(config),
            custom_field_label: config.custom_field_label.clone(),
            order_fetch_policy: config.order_fetch_policy,
        }
    }
}

/// Builds the [`AggregatedResult`] for one order.
///
/// The order is fetched first. The customer lookup (followed by company
/// resolution) then runs concurrently with the products, fees and coupons
/// lookups. Every lookup other than the order degrades to an empty value when
/// its upstream is unavailable.
#[derive(Clone)]
pub struct OrderAggregator {
    client: ResilientClient,
    settings: AggregatorSettings,
}

impl OrderAggregator {
    pub fn new(client: ResilientClient, settings: AggregatorSettings) -> Self {
        Self { client, settings }
    }

    #[tracing::instrument(skip(self))]
    pub async fn aggregate(&self, order_id: u64) -> Result<AggregatedResult, OrderSyncError> {
        let endpoints = &self.settings.endpoints;

        let order = self.retrieve_order(order_id).await?;
        let customer_id = order.as_ref().and_then(Order::customer_reference);

        let ((customer, resolution), products, fees, coupons) = tokio::join!(
            self.customer_context(customer_id),
            self.list::<OrderProduct>(endpoints.order_products(order_id)),
            self.list::<OrderFee>(endpoints.order_fees(order_id)),
            self.list::<OrderCoupon>(endpoints.order_coupons(order_id)),
        );

        let result = AggregatedResult::new(order, customer, products, fees, coupons, resolution);
        record_snapshot(order_id, &result);

        Ok(result)
    }

    async fn retrieve_order(&self, order_id: u64) -> Result<Option<Order>, OrderSyncError> {
        let order = self
            .client
            .fetch::<Order>(&self.settings.endpoints.order(order_id), Api::Commerce)
            .await;

        match (order, self.settings.order_fetch_policy) {
            (Some(order), _) => Ok(Some(order)),
            (None, OrderFetchPolicy::Strict) => {
                tracing::error!("Order {order_id} could not be retrieved, aborting");
                Err(InternalError::upstream_unavailable(
                    &format!("Order {order_id} could not be retrieved"),
                    Some("order"),
                ))
            }
            (None, OrderFetchPolicy::Tolerant) => {
                tracing::warn!("Order {order_id} could not be retrieved, continuing without it");
                Ok(None)
            }
        }
    }

    async fn customer_context(
        &self,
        customer_id: Option<u64>,
    ) -> (Option<Customer>, CompanyResolution) {
        let Some(customer_id) = customer_id else {
            return (None, CompanyResolution::default());
        };

        let customer = self
            .client
            .fetch::<Customer>(&self.settings.endpoints.customer(customer_id), Api::Commerce)
            .await;

        let resolution = match customer.as_ref() {
            Some(customer) => self.resolve_company(customer).await,
            None => CompanyResolution::default(),
        };

        (customer, resolution)
    }

    /// Matches the customer's company against the B2B directory. Customers
    /// without a company name never trigger a directory call.
    pub async fn resolve_company(&self, customer: &Customer) -> CompanyResolution {
        let Some(company_name) = customer.company_name() else {
            tracing::debug!("Customer {} has no company, skipping lookup", customer.id);
            return CompanyResolution::default();
        };

        let Some(directory) = self
            .client
            .fetch::<CompanyDirectory>(self.settings.endpoints.companies(), Api::Company)
            .await
        else {
            return CompanyResolution::default();
        };

        if let Some(missing) = directory.missing_rows() {
            tracing::warn!(
                returned = directory.data.len(),
                missing,
                "Company directory is paginated, companies past the first page are not matched"
            );
        }

        match directory.find_by_name(&company_name) {
            Some(company) => {
                CompanyResolution::from_company(company, &self.settings.custom_field_label)
            }
            None => {
                tracing::info!("No company in the directory is named {company_name:?}");
                CompanyResolution::default()
            }
        }
    }

    /// Rows are decoded one by one, so a malformed line item only drops
    /// itself.
    async fn list<T: DeserializeOwned>(&self, url: String) -> Vec<T> {
        self.client
            .fetch::<Vec<Value>>(&url, Api::Commerce)
            .await
            .map(keep_valid_rows::<T>)
            .unwrap_or_default()
    }
}

fn record_snapshot(order_id: u64, result: &AggregatedResult) {
    tracing::info!(
        order_id,
        order_found = result.order.is_some(),
        customer_id = result.customer.as_ref().map(|c| c.id),
        company_id = result.company_id,
        e8_company_id = result.e8_company_id.as_deref(),
        products = result.products.len(),
        fees = result.fees.len(),
        coupons = result.coupons.len(),
        "Aggregated order context"
    );

    match serde_json::to_string(result) {
        Ok(snapshot) => tracing::debug!(order_id, %snapshot, "Aggregated order snapshot"),
        Err(e) => tracing::warn!("Failed to serialize snapshot for order {order_id}: {e}"),
    }
}
