use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, IF_MODIFIED_SINCE, IF_NONE_MATCH};
use reqwest::{Client, StatusCode};

use crate::app::{Result, TributaryError};
use crate::config::HttpConfig;
use crate::fetcher::{FetchResult, Fetcher, RequestOptions};

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .gzip(true)
            .brotli(true)
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(
        &self,
        url: &str,
        etag: Option<&str>,
        last_modified: Option<&str>,
        options: &RequestOptions,
    ) -> Result<FetchResult> {
        let mut headers = HeaderMap::new();

        if let Some(etag) = etag {
            if let Ok(value) = HeaderValue::from_str(etag) {
                headers.insert(IF_NONE_MATCH, value);
            }
        }

        if let Some(last_modified) = last_modified {
            if let Ok(value) = HeaderValue::from_str(last_modified) {
                headers.insert(IF_MODIFIED_SINCE, value);
            }
        }

        for (name, value) in &options.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| TributaryError::FeedFetch(format!("Invalid header name {}: {}", name, e)))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| TributaryError::FeedFetch(format!("Invalid header value: {}", e)))?;
            headers.insert(name, value);
        }

        let response = self.client.get(url).headers(headers).send().await?;

        if response.status() == StatusCode::NOT_MODIFIED {
            return Ok(FetchResult::NotModified);
        }

        if !response.status().is_success() {
            return Err(TributaryError::FeedFetch(format!(
                "HTTP {} when fetching {}",
                response.status(),
                url
            )));
        }

        let etag = response
            .headers()
            .get("etag")
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        let last_modified = response
            .headers()
            .get("last-modified")
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        let body = response.bytes().await?.to_vec();

        Ok(FetchResult::Content {
            body,
            etag,
            last_modified,
        })
    }
}
