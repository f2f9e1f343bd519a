use crate::{
    domain::{config::WebhookConfig, endpoints::CommerceEndpoints},
    logic::aggregator::{AggregatorSettings, OrderAggregator},
    router,
};
use anyhow::Result as AnyhowResult;
use axum::Router;
use ordersync_domain::{OrderSyncError, ResilientClient};
use std::{sync::Arc, time::Duration};
use tokio::net::TcpListener;

pub struct AppState {
    pub config: WebhookConfig,
    pub client: ResilientClient,
    pub endpoints: CommerceEndpoints,
    pub aggregator: OrderAggregator,
}

impl AppState {
    pub fn new(config: WebhookConfig) -> Result<Self, OrderSyncError> {
        let client = ResilientClient::with_timeout(
            Duration::from_secs(config.http_client_timeout_secs),
            config.commerce_credential(),
            config.company_credential(),
        )?;

        let aggregator = OrderAggregator::new(client.clone(), AggregatorSettings::from(&config));

        Ok(Self {
            endpoints: CommerceEndpoints::new(&config),
            config,
            client,
            aggregator,
        })
    }
}

#[derive(Clone)]
pub struct Server {
    pub state: Arc<AppState>,
}

impl Server {
    pub fn init(config: WebhookConfig) -> AnyhowResult<Self> {
        let state = AppState::new(config)?;

        Ok(Self {
            state: Arc::new(state),
        })
    }

    pub fn router(&self) -> Router {
        router::get_router().with_state(self.state.clone())
    }

    /// Serves on an already bound listener until ctrl-c.
    pub async fn serve(&self, listener: TcpListener) -> AnyhowResult<()> {
        tracing::info!("Webhook server listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router().into_make_service())
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| anyhow::anyhow!("Server error: {}", e))
    }

    pub async fn run(&self) -> AnyhowResult<()> {
        let listener = TcpListener::bind(&self.state.config.address)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to bind to address: {}", e))?;

        self.serve(listener).await
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Received Ctrl+C, shutting down..."),
        Err(e) => tracing::error!("Failed to listen for shutdown signal: {e}"),
    }
}
