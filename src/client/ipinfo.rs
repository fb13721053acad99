use async_trait::async_trait;
use reqwest::{Client, Url};

use super::services::{IpLocation, IpLocator};
use crate::config::IpLocationConfig;
use crate::{Result, WeatherSearchError};

/// ipinfo.io lookup of the caller's public address
pub struct IpInfoClient {
    client: Client,
    token: Option<String>,
    base_url: String,
}

impl IpInfoClient {
    pub fn new(config: &IpLocationConfig) -> Result<Self> {
        Ok(Self {
            client: super::http_client()?,
            token: config.token.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl IpLocator for IpInfoClient {
    #[tracing::instrument(skip(self))]
    async fn locate(&self) -> Result<IpLocation> {
        let mut url = Url::parse(&format!("{}/json", self.base_url))
            .map_err(|e| WeatherSearchError::config(format!("Invalid ip_location base URL: {e}")))?;
        if let Some(token) = &self.token {
            url.query_pairs_mut().append_pair("token", token);
        }

        let location: IpLocation = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        tracing::info!(city = %location.city, region = %location.region, "Located caller by IP");
        Ok(location)
    }
}
