use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{Error, Result};

/// Thin client for the hosted data platform's REST interface. Every
/// table lives under `/rest/v1/{table}` and every request carries the
/// project API key twice, as `apikey` and as a bearer token.
#[derive(Clone)]
pub struct DataClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl DataClient {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        Url::parse(base_url)
            .map_err(|e| Error::Config(format!("Invalid data API URL '{}': {}", base_url, e)))?;
        let http = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    pub fn get(&self, table: &str) -> RequestBuilder {
        self.authorized(self.http.get(self.table_url(table)))
    }

    /// Inserts return the created rows; `Prefer: return=representation`
    /// asks the data API to echo them back.
    pub fn post(&self, table: &str) -> RequestBuilder {
        self.authorized(self.http.post(self.table_url(table)))
            .header("Prefer", "return=representation")
    }

    pub fn patch(&self, table: &str) -> RequestBuilder {
        self.authorized(self.http.patch(self.table_url(table)))
            .header("Prefer", "return=representation")
    }

    pub async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(Error::DataApi {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response.json::<T>().await?)
    }
}
