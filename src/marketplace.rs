use std::collections::BTreeMap;
use std::time::Duration;

use crate::config::RankingConfig;
use crate::AdRecord;

#[derive(Clone)]
pub struct MarketplaceClient {
    endpoint: String,
    client: reqwest::Client,
}

impl MarketplaceClient {
    pub fn from_config(config: &RankingConfig) -> Result<Self, String> {
        let timeout = Duration::from_millis(config.marketplace.timeout_ms);
        MarketplaceClient::new(config.marketplace.endpoint.clone(), timeout)
    }

    pub fn new(endpoint: String, timeout: Duration) -> Result<Self, String> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| format!("failed to build marketplace client: {}", err))?;
        Ok(Self { endpoint, client })
    }

    pub async fn fetch_ads(&self, subcategory: Option<&str>) -> Result<Vec<AdRecord>, String> {
        let mut url = format!("{}/ads", self.endpoint.trim_end_matches('/'));
        if let Some(subcategory) = subcategory {
            url = format!("{}?subcategory_id={}", url, subcategory);
        }
        self.get_json(&url).await
    }

    pub async fn fetch_listings(&self) -> Result<BTreeMap<String, Vec<AdRecord>>, String> {
        let url = format!("{}/ads/organized", self.endpoint.trim_end_matches('/'));
        self.get_json(&url).await
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| format!("marketplace request failed: {}", err))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(format!("marketplace error {}: {}", status, body));
        }

        response
            .json::<T>()
            .await
            .map_err(|err| format!("marketplace response parse failed: {}", err))
    }
}
