//! BillTrack50 lookups behind the per-bill sponsor detail view.
//!
//! Thin passthrough: sponsors for a bill, then bills for each sponsor.

use crate::config::Config;
use crate::error::IngestError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Sponsor {
    #[serde(default, rename = "legislatorID")]
    pub legislator_id: Option<Value>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub legislator_party: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub district: Option<String>,
    #[serde(default)]
    pub primary: bool,
}

impl Sponsor {
    /// Ids come back as numbers or strings depending on endpoint version.
    pub fn legislator_key(&self) -> Option<String> {
        match self.legislator_id.as_ref()? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SponsorDetail {
    pub sponsor: Sponsor,
    pub bills: Vec<Value>,
}

pub struct BillTrackClient {
    base_url: String,
    api_key: String,
    http: reqwest::blocking::Client,
}

fn list_field(body: Value, key: &str) -> Vec<Value> {
    match body {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove(key) {
            Some(Value::Array(items)) => items,
            _ => vec![],
        },
        _ => vec![],
    }
}

impl BillTrackClient {
    pub fn from_config(config: &Config) -> Result<Self, IngestError> {
        let api_key = config
            .billtrack_api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or(IngestError::MissingApiKey)?;
        let base_url = config.billtrack_base_url.trim_end_matches('/').to_string();
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|source| IngestError::Fetch {
                url: base_url.clone(),
                source,
            })?;
        Ok(Self {
            base_url,
            api_key,
            http,
        })
    }

    pub fn bill_sponsors_url(&self, bill_id: &str) -> String {
        format!("{}/bills/{}/sponsors", self.base_url, bill_id)
    }

    pub fn legislator_bills_url(&self, legislator_id: &str) -> String {
        format!("{}/json/legislators/{}/bills", self.base_url, legislator_id)
    }

    fn get_json(&self, url: &str) -> Result<Value, IngestError> {
        debug!(url, "billtrack request");
        let fetch_err = |source| IngestError::Fetch {
            url: url.to_string(),
            source,
        };
        let resp = self
            .http
            .get(url)
            .header("Authorization", format!("apikey {}", self.api_key))
            .header("Accept", "application/json")
            .send()
            .map_err(fetch_err)?;
        if !resp.status().is_success() {
            return Err(IngestError::Status {
                url: url.to_string(),
                status: resp.status(),
            });
        }
        resp.json().map_err(fetch_err)
    }

    pub fn bill_sponsors(&self, bill_id: &str) -> Result<Vec<Sponsor>, IngestError> {
        let url = self.bill_sponsors_url(bill_id);
        let body = self.get_json(&url)?;
        list_field(body, "sponsors")
            .into_iter()
            .map(|v| {
                serde_json::from_value(v).map_err(|source| IngestError::Json {
                    name: url.clone(),
                    source,
                })
            })
            .collect()
    }

    pub fn legislator_bills(&self, legislator_id: &str) -> Result<Vec<Value>, IngestError> {
        let url = self.legislator_bills_url(legislator_id);
        Ok(list_field(self.get_json(&url)?, "bills"))
    }

    /// Sponsors for a bill, each with the other bills they sponsor. Sponsors
    /// without a legislator id come back with no bills.
    pub fn sponsor_details(&self, bill_id: &str) -> Result<Vec<SponsorDetail>, IngestError> {
        self.bill_sponsors(bill_id)?
            .into_iter()
            .map(|sponsor| {
                let bills = match sponsor.legislator_key() {
                    Some(id) => self.legislator_bills(&id)?,
                    None => vec![],
                };
                Ok::<_, IngestError>(SponsorDetail { sponsor, bills })
            })
            .collect()
    }
}
