//! Best-effort fetch of decorative JSON payloads (loading animations). Failures yield `None`.

use reqwest::blocking::Client;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

use crate::config::Config;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecorPayload {
    pub url: String,
    pub payload: Option<Value>,
}

fn client(timeout: Duration) -> Option<Client> {
    Client::builder().timeout(timeout).build().ok()
}

pub fn fetch_decor(client: &Client, url: &str) -> Option<Value> {
    let response = match client.get(url).send() {
        Ok(r) => r,
        Err(e) => {
            log::debug!("decor fetch {} failed: {}", url, e);
            return None;
        }
    };
    if !response.status().is_success() {
        log::debug!("decor fetch {} returned {}", url, response.status());
        return None;
    }
    response.json::<Value>().ok()
}

/// One entry per configured URL, in order.
pub fn fetch_all(config: &Config) -> Vec<DecorPayload> {
    let client = client(config.decor_timeout);
    config
        .decor_urls
        .iter()
        .map(|url| DecorPayload {
            url: url.clone(),
            payload: client.as_ref().and_then(|c| fetch_decor(c, url)),
        })
        .collect()
}
