//! Calls to the news and exchange-rate APIs.
//!
//! # Responsibilities
//! - Build one call descriptor (URL + credential headers) per request
//! - Send it with the shared HTTP client
//! - Hand the response to [`gather_response`]
//!
//! # Design Decisions
//! - No retries and no status check; the upstream body is forwarded as-is
//! - Descriptors are rebuilt for every call and dropped afterwards

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use url::Url;

use crate::config::{TimeoutConfig, UpstreamConfig, UpstreamsConfig};
use crate::upstream::error::UpstreamError;
use crate::upstream::gather::gather_response;

/// Header naming the upstream API host.
pub const RAPIDAPI_HOST_HEADER: HeaderName = HeaderName::from_static("x-rapidapi-host");

/// Header carrying the shared API key.
pub const RAPIDAPI_KEY_HEADER: HeaderName = HeaderName::from_static("x-rapidapi-key");

/// `function` query value selecting the exchange-rate lookup.
pub const EXCHANGE_RATE_FUNCTION: &str = "CURRENCY_EXCHANGE_RATE";

/// One outbound request, built per call and discarded after it completes.
#[derive(Debug, Clone)]
pub struct UpstreamCall {
    /// Upstream name for logs.
    pub name: &'static str,
    pub url: Url,
    pub headers: HeaderMap,
}

/// Client for both upstream APIs.
#[derive(Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    api_key: String,
    news: UpstreamConfig,
    exchange_rate: UpstreamConfig,
}

impl UpstreamClient {
    /// Build the client from the validated configuration.
    pub fn new(config: &UpstreamsConfig, timeouts: &TimeoutConfig) -> Result<Self, UpstreamError> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .timeout(Duration::from_secs(timeouts.upstream_secs))
            .build()?;

        Ok(Self {
            http,
            api_key: config.api_key.clone().unwrap_or_default(),
            news: config.news.clone(),
            exchange_rate: config.exchange_rate.clone(),
        })
    }

    /// `GET {base}/news`.
    pub fn news_call(&self) -> Result<UpstreamCall, UpstreamError> {
        Ok(UpstreamCall {
            name: "news",
            url: endpoint(&self.news, "news")?,
            headers: self.credential_headers(&self.news)?,
        })
    }

    /// `GET {base}/query?from_currency=..&function=CURRENCY_EXCHANGE_RATE&to_currency=..`.
    ///
    /// Absent currencies are sent as empty values; the upstream decides what
    /// that means.
    pub fn exchange_rate_call(
        &self,
        from_currency: Option<&str>,
        to_currency: Option<&str>,
    ) -> Result<UpstreamCall, UpstreamError> {
        let mut url = endpoint(&self.exchange_rate, "query")?;
        url.query_pairs_mut()
            .append_pair("from_currency", from_currency.unwrap_or_default())
            .append_pair("function", EXCHANGE_RATE_FUNCTION)
            .append_pair("to_currency", to_currency.unwrap_or_default());

        Ok(UpstreamCall {
            name: "exchange_rate",
            url,
            headers: self.credential_headers(&self.exchange_rate)?,
        })
    }

    pub async fn fetch_news(&self) -> Result<String, UpstreamError> {
        let call = self.news_call()?;
        self.execute(call).await
    }

    pub async fn fetch_exchange_rate(
        &self,
        from_currency: Option<&str>,
        to_currency: Option<&str>,
    ) -> Result<String, UpstreamError> {
        let call = self.exchange_rate_call(from_currency, to_currency)?;
        self.execute(call).await
    }

    /// Send a call and gather its body.
    pub async fn execute(&self, call: UpstreamCall) -> Result<String, UpstreamError> {
        tracing::debug!(upstream = call.name, url = %call.url, "Calling upstream");

        let response = self.http.get(call.url).headers(call.headers).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(upstream = call.name, status = %status, "Upstream returned non-success status, forwarding body");
        }

        let body = gather_response(response).await?;
        tracing::debug!(upstream = call.name, status = %status, bytes = body.len(), "Upstream payload received");
        Ok(body)
    }

    fn credential_headers(&self, upstream: &UpstreamConfig) -> Result<HeaderMap, UpstreamError> {
        let mut headers = HeaderMap::new();
        headers.insert(RAPIDAPI_HOST_HEADER, HeaderValue::from_str(&upstream.host)?);
        let mut key = HeaderValue::from_str(&self.api_key)?;
        key.set_sensitive(true);
        headers.insert(RAPIDAPI_KEY_HEADER, key);
        Ok(headers)
    }
}

fn endpoint(upstream: &UpstreamConfig, path: &str) -> Result<Url, UpstreamError> {
    let base = upstream.base_url.trim_end_matches('/');
    Ok(Url::parse(&format!("{base}/{path}"))?)
}
