use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};
use url::Url;

use crate::config::UpstreamConfig;
use crate::error::PortalError;

/// Best-effort client for the two upstream services.
///
/// Every call is a single attempt. Transport failures and non-JSON bodies
/// are logged and collapsed into `None`; callers decide on a fallback.
#[derive(Clone)]
pub struct RestApi {
    client: reqwest::Client,
    backend_url: Url,
    sentiment_url: Url,
}

impl RestApi {
    pub fn new(cfg: &UpstreamConfig) -> Result<Self, PortalError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("dealership-portal/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(cfg.connect_timeout())
            .default_headers(headers);
        if let Some(timeout) = cfg.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self::with_client(client, cfg))
    }

    pub fn with_client(client: reqwest::Client, cfg: &UpstreamConfig) -> Self {
        Self {
            client,
            backend_url: cfg.backend_url.clone(),
            sentiment_url: ensure_trailing_slash(cfg.sentiment_analyzer_url.clone()),
        }
    }

    /// `backend_url + endpoint + "?" + urlencoded(params)`.
    pub fn backend_endpoint<K, V>(&self, endpoint: &str, params: &[(K, V)]) -> Result<Url, PortalError>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let base = self.backend_url.as_str().trim_end_matches('/');
        let mut url = Url::parse(&format!("{base}{endpoint}"))?;
        url.set_query(Some(""));
        if !params.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(params.iter().map(|(k, v)| (k.as_ref(), v.as_ref())));
        }
        Ok(url)
    }

    /// `sentiment_url + "analyze/" + text`, with `text` as one escaped path segment.
    pub fn sentiment_endpoint(&self, text: &str) -> Result<Url, PortalError> {
        let mut url = self.sentiment_url.join("analyze/")?;
        url.path_segments_mut()
            .map_err(|_| PortalError::Unexpected("sentiment url cannot be a base".to_string()))?
            .pop_if_empty()
            .push(text);
        Ok(url)
    }

    /// GET a backend endpoint. `None` on any failure.
    pub async fn get_request<K, V>(&self, endpoint: &str, params: &[(K, V)]) -> Option<Value>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let url = self
            .backend_endpoint(endpoint, params)
            .inspect_err(|e| warn!(endpoint, error = %e, "invalid backend endpoint"))
            .ok()?;
        info!("GET from {}", url);
        self.fetch_json(url).await
    }

    /// Ask the sentiment analyzer about `text`. `None` on any failure.
    pub async fn analyze_review_sentiments(&self, text: &str) -> Option<Value> {
        let url = self
            .sentiment_endpoint(text)
            .inspect_err(|e| warn!(error = %e, "invalid sentiment endpoint"))
            .ok()?;
        info!("GET from {}", url);
        self.fetch_json(url).await
    }

    /// POST a review to `/insert_review`.
    ///
    /// `Err` only when the request cannot be built (bad URL or scheme);
    /// transport and decode failures still come back as `Ok(None)`.
    pub async fn post_review<T>(&self, review: &T) -> Result<Option<Value>, PortalError>
    where
        T: Serialize + ?Sized,
    {
        let mut url = self.backend_endpoint::<&str, &str>("/insert_review", &[])?;
        url.set_query(None);
        info!("POST to {}", url);

        let outcome = async {
            let resp = self.client.post(url).json(review).send().await?;
            resp.json::<Value>().await
        }
        .await;

        match outcome {
            Ok(body) => {
                info!(response = %body, "review posted");
                Ok(Some(body))
            }
            Err(e) if e.is_builder() => Err(e.into()),
            Err(e) => {
                warn!(error = %e, "Network exception occurred");
                Ok(None)
            }
        }
    }

    async fn fetch_json(&self, url: Url) -> Option<Value> {
        let outcome = async {
            let resp = self.client.get(url).send().await?;
            resp.json::<Value>().await
        }
        .await;

        outcome
            .inspect_err(|e| warn!(error = %e, "Network exception occurred"))
            .ok()
    }
}

fn ensure_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(backend: &str, sentiment: &str) -> RestApi {
        let cfg = UpstreamConfig {
            backend_url: Url::parse(backend).unwrap(),
            sentiment_analyzer_url: Url::parse(sentiment).unwrap(),
            ..UpstreamConfig::default()
        };
        RestApi::with_client(reqwest::Client::new(), &cfg)
    }

    #[test]
    fn backend_endpoint_appends_encoded_query() {
        let api = api("http://localhost:3030", "http://localhost:5050/");
        let url = api
            .backend_endpoint("/fetchDealers", &[("state", "New York"), ("page", "2")])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:3030/fetchDealers?state=New+York&page=2"
        );
    }

    #[test]
    fn backend_endpoint_without_params_keeps_bare_separator() {
        let api = api("http://localhost:3030/", "http://localhost:5050/");
        let url = api.backend_endpoint::<&str, &str>("/fetchDealers/Texas", &[]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3030/fetchDealers/Texas?");
    }

    #[test]
    fn sentiment_endpoint_escapes_review_text() {
        let api = api("http://localhost:3030", "http://localhost:5050");
        let url = api.sentiment_endpoint("great car / fast").unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:5050/analyze/great%20car%20%2F%20fast"
        );
    }

    #[test]
    fn sentiment_endpoint_respects_base_path() {
        let api = api("http://localhost:3030", "http://nlp.local/v1/");
        let url = api.sentiment_endpoint("ok").unwrap();
        assert_eq!(url.as_str(), "http://nlp.local/v1/analyze/ok");
    }
}
