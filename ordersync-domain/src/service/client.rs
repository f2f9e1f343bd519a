use crate::{ErrorMeta, InternalError, OrderSyncError};
use http::{
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
    HeaderName, Method,
};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware, RequestBuilder};
use reqwest_tracing::TracingMiddleware;
use serde::de::DeserializeOwned;
use std::{
    fmt::{Display, Formatter},
    str::FromStr,
    time::Duration,
};
use strum::AsRefStr;

/// Which upstream a request is for, and therefore which credential it carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum Api {
    Commerce,
    Company,
}

/// How a token is attached to a request: `Authorization: Bearer <token>`, or
/// the raw token under a named header such as `X-Auth-Token`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthScheme {
    Bearer,
    Header(HeaderName),
}

impl FromStr for AuthScheme {
    type Err = OrderSyncError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("bearer") {
            return Ok(AuthScheme::Bearer);
        }

        HeaderName::from_bytes(s.as_bytes())
            .map(AuthScheme::Header)
            .map_err(|_| {
                InternalError::configuration_error(
                    &format!("Invalid auth scheme: {s:?}"),
                    Some("auth_scheme"),
                )
            })
    }
}

impl Display for AuthScheme {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthScheme::Bearer => write!(f, "bearer"),
            AuthScheme::Header(name) => write!(f, "{name}"),
        }
    }
}

#[derive(Clone)] // Intentionally no Debug so the token is not printed
pub struct ApiCredential {
    scheme: AuthScheme,
    token: String,
}

impl ApiCredential {
    pub fn new(scheme: AuthScheme, token: impl Into<String>) -> Self {
        Self {
            scheme,
            token: token.into(),
        }
    }

    fn apply(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.scheme {
            AuthScheme::Bearer => builder.header(AUTHORIZATION, format!("Bearer {}", self.token)),
            AuthScheme::Header(name) => builder.header(name.clone(), self.token.as_str()),
        }
    }
}

/// Authenticated JSON client for the commerce and B2B APIs.
///
/// [`ResilientClient::fetch`] never fails: transport errors, non-2xx statuses
/// and bodies that do not parse into the requested type are logged and come
/// back as `None`. An empty body is also `None`.
#[derive(Clone)]
pub struct ResilientClient {
    http: ClientWithMiddleware,
    commerce: ApiCredential,
    company: ApiCredential,
}

impl ResilientClient {
    pub fn new(http: ClientWithMiddleware, commerce: ApiCredential, company: ApiCredential) -> Self {
        Self {
            http,
            commerce,
            company,
        }
    }

    pub fn with_timeout(
        timeout: Duration,
        commerce: ApiCredential,
        company: ApiCredential,
    ) -> Result<Self, OrderSyncError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                InternalError::configuration_error(
                    &format!("Failed to build http client: {e}"),
                    Some("http_client"),
                )
            })?;

        let http = ClientBuilder::new(client)
            .with(TracingMiddleware::default())
            .build();

        Ok(Self::new(http, commerce, company))
    }

    fn credential(&self, api: Api) -> &ApiCredential {
        match api {
            Api::Commerce => &self.commerce,
            Api::Company => &self.company,
        }
    }

    /// A JSON request to `url` carrying the credential for `api`.
    pub fn request(&self, method: Method, url: &str, api: Api) -> RequestBuilder {
        let builder = self
            .http
            .request(method, url)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json");

        self.credential(api).apply(builder)
    }

    #[tracing::instrument(skip(self, api), fields(api = api.as_ref()))]
    pub async fn fetch<T: DeserializeOwned>(&self, url: &str, api: Api) -> Option<T> {
        match self.try_fetch(url, api).await {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key = %e.key(), "Treating {url} as unavailable: {e}");
                None
            }
        }
    }

    async fn try_fetch<T: DeserializeOwned>(
        &self,
        url: &str,
        api: Api,
    ) -> Result<Option<T>, OrderSyncError> {
        let response = self
            .request(Method::GET, url, api)
            .send()
            .await
            .map_err(|e| {
                InternalError::connection_error(
                    &format!("Failed to send request: {e}"),
                    Some(api.as_ref()),
                )
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            InternalError::io_err(
                &format!("Failed to read response body: {e}"),
                Some(api.as_ref()),
            )
        })?;

        if !status.is_success() {
            return Err(InternalError::upstream_unavailable(
                &format!("Upstream responded with status {status}"),
                Some(api.as_ref()),
            ));
        }

        if body.trim().is_empty() {
            tracing::debug!("Empty body from {url} with status {status}");
            return Ok(None);
        }

        serde_json::from_str::<T>(&body).map(Some).map_err(|e| {
            InternalError::deserialize_error(
                &format!("Failed to parse response body: {e}"),
                Some(api.as_ref()),
            )
        })
    }
}
