// SPDX-License-Identifier: GPL-3.0-or-later

use crate::{LabelError, config::config};
use etag::EntityTag;
use reqwest::{
    Client, Response,
    header::{ACCEPT, CACHE_CONTROL, ETAG, HeaderMap, HeaderValue, PRAGMA},
};
use serde_json::Value;
use std::str::FromStr;
use tracing::{debug, warn};

/// The transport seam every gateway in this crate is coded against. The
/// real implementation is [HttpTransport]; tests run the same gateways over
/// [MockOrg][crate::api::mock::MockOrg].
pub trait Transport: Send + Sync {
    /// GET `url` expecting a JSON body.
    fn get_json(&self, url: &str) -> impl Future<Output = Result<Value, LabelError>> + Send;

    /// GET `url` expecting a JSON body, also capturing the response's
    /// `ETag` validator when the server sends one.
    fn get_json_with_etag(
        &self,
        url: &str,
    ) -> impl Future<Output = Result<(Value, Option<EntityTag>), LabelError>> + Send;

    /// PATCH `url` w/ a JSON body. When `if_match` is given it is sent as
    /// an `If-Match` precondition, so the write fails w/ HTTP 412 if the
    /// resource changed concurrently.
    fn patch_json(
        &self,
        url: &str,
        body: &Value,
        if_match: Option<&EntityTag>,
    ) -> impl Future<Output = Result<(), LabelError>> + Send;

    /// POST `url` w/ a JSON body; an empty response body yields
    /// `Value::Null`.
    fn post_json(
        &self,
        url: &str,
        body: &Value,
    ) -> impl Future<Output = Result<Value, LabelError>> + Send;

    /// POST a SOAP envelope to the legacy Organization service endpoint.
    fn post_soap(
        &self,
        url: &str,
        action: &str,
        envelope: &str,
    ) -> impl Future<Output = Result<String, LabelError>> + Send;
}

/// [Transport] implementation over a cookie-authenticated [reqwest] client
/// w/ the OData headers every Web API call requires.
///
/// Every GET carries explicit cache suppression. The same URL must return
/// different content depending on invisible server-side session state (the
/// acting user's current UI language), so ordinary HTTP caching would
/// silently return stale-language content.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Construct a new instance.
    pub fn new() -> Result<Self, LabelError> {
        let mut headers = HeaderMap::new();
        headers.insert("OData-MaxVersion", HeaderValue::from_static("4.0"));
        headers.insert("OData-Version", HeaderValue::from_static("4.0"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .cookie_store(true)
            .default_headers(headers)
            .timeout(config().http_timeout)
            .build()?;
        Ok(HttpTransport { client })
    }

    async fn get(&self, url: &str) -> Result<Response, LabelError> {
        debug!("GET {}", url);
        let resp = self
            .client
            .get(url)
            .header(CACHE_CONTROL, "no-cache, no-store, must-revalidate")
            .header(PRAGMA, "no-cache")
            .send()
            .await?;
        ensure_2xx(resp).await
    }
}

/// Map a non-2xx response to [LabelError::Http], carrying whatever body
/// text the server sent.
async fn ensure_2xx(resp: Response) -> Result<Response, LabelError> {
    let status = resp.status();
    if status.is_success() {
        Ok(resp)
    } else {
        let body = resp.text().await.unwrap_or_default();
        Err(LabelError::Http {
            status: status.as_u16(),
            body,
        })
    }
}

fn capture_etag(resp: &Response) -> Option<EntityTag> {
    let raw = resp.headers().get(ETAG)?.to_str().ok()?;
    match EntityTag::from_str(raw.trim()) {
        Ok(x) => Some(x),
        Err(x) => {
            warn!("Malformed ETag ({}). Ignore + continue: {:?}", raw, x);
            None
        }
    }
}

impl Transport for HttpTransport {
    async fn get_json(&self, url: &str) -> Result<Value, LabelError> {
        let resp = self.get(url).await?;
        Ok(resp.json().await?)
    }

    async fn get_json_with_etag(&self, url: &str) -> Result<(Value, Option<EntityTag>), LabelError> {
        let resp = self.get(url).await?;
        let etag = capture_etag(&resp);
        Ok((resp.json().await?, etag))
    }

    async fn patch_json(
        &self,
        url: &str,
        body: &Value,
        if_match: Option<&EntityTag>,
    ) -> Result<(), LabelError> {
        debug!("PATCH {}", url);
        let mut req = self.client.patch(url).json(body);
        if let Some(x) = if_match {
            req = req.header(reqwest::header::IF_MATCH, x.to_string());
        }
        let resp = req.send().await?;
        ensure_2xx(resp).await?;
        Ok(())
    }

    async fn post_json(&self, url: &str, body: &Value) -> Result<Value, LabelError> {
        debug!("POST {}", url);
        let resp = self.client.post(url).json(body).send().await?;
        let resp = ensure_2xx(resp).await?;
        let text = resp.text().await?;
        if text.trim().is_empty() {
            Ok(Value::Null)
        } else {
            Ok(serde_json::from_str(&text)?)
        }
    }

    async fn post_soap(&self, url: &str, action: &str, envelope: &str) -> Result<String, LabelError> {
        debug!("POST (SOAP {}) {}", action, url);
        let resp = self
            .client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "text/xml; charset=utf-8")
            .header("SOAPAction", action)
            .body(envelope.to_string())
            .send()
            .await?;
        let resp = ensure_2xx(resp).await?;
        Ok(resp.text().await?)
    }
}
