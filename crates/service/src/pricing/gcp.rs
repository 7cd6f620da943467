//! GCP Cloud Billing catalog adapter.
//!
//! SKU lookup is path-parameterized by service id and authenticated with an
//! API key query parameter. Each SKU becomes a plan; each tiered rate a
//! tier with the price in whole currency units:
//! `price = (units + nanos / 1_000_000_000) * display_quantity`.

use serde::Serialize;
use serde_json::Value;

use crate::errors::ServiceError;
use crate::pricing::{upstream_err, PricingClient};

pub const CLOUD_BILLING_BASE: &str = "https://cloudbilling.googleapis.com/v1";

const NANOS_PER_UNIT: f64 = 1_000_000_000.0;

#[derive(Debug, Serialize)]
pub struct PricePlan {
    pub name: String,
    pub usage_type: String,
    pub tiers: Vec<PriceTier>,
}

#[derive(Debug, Serialize)]
pub struct PriceTier {
    pub start_usage_amount: f64,
    pub usage_unit: String,
    pub display_quantity: f64,
    pub price: f64,
    pub currency: String,
}

pub fn tier_price(units: i64, nanos: i64, display_quantity: f64) -> f64 {
    (units as f64 + nanos as f64 / NANOS_PER_UNIT) * display_quantity
}

/// The catalog serializes `units` as a string; older fixtures carry it as a
/// number. Accept both.
fn parse_units(v: &Value) -> i64 {
    v.as_str()
        .and_then(|s| s.parse().ok())
        .or_else(|| v.as_i64())
        .unwrap_or(0)
}

pub fn normalize_skus(body: &Value) -> Vec<PricePlan> {
    body.get("skus")
        .and_then(Value::as_array)
        .map(|skus| skus.iter().map(normalize_sku).collect())
        .unwrap_or_default()
}

fn normalize_sku(sku: &Value) -> PricePlan {
    let category = &sku["category"];
    let name = format!(
        "{}, {}",
        category["serviceDisplayName"].as_str().unwrap_or_default(),
        sku["description"].as_str().unwrap_or_default()
    );
    let usage_type = category["usageType"].as_str().unwrap_or_default().to_string();

    let expression = &sku["pricingInfo"][0]["pricingExpression"];
    let usage_unit = expression["usageUnit"].as_str().unwrap_or_default().to_string();
    let display_quantity = expression["displayQuantity"].as_f64().unwrap_or(1.0);

    let tiers = expression["tieredRates"]
        .as_array()
        .map(|rates| {
            rates
                .iter()
                .map(|rate| {
                    let unit_price = &rate["unitPrice"];
                    PriceTier {
                        start_usage_amount: rate["startUsageAmount"].as_f64().unwrap_or(0.0),
                        usage_unit: usage_unit.clone(),
                        display_quantity,
                        price: tier_price(
                            parse_units(&unit_price["units"]),
                            unit_price["nanos"].as_i64().unwrap_or(0),
                            display_quantity,
                        ),
                        currency: unit_price["currencyCode"].as_str().unwrap_or_default().to_string(),
                    }
                })
                .collect()
        })
        .unwrap_or_default();

    PricePlan { name, usage_type, tiers }
}

pub async fn get_service_skus(
    client: &PricingClient,
    service_id: &str,
) -> Result<Vec<PricePlan>, ServiceError> {
    let key = client
        .gcp_api_key
        .as_deref()
        .ok_or_else(|| ServiceError::Validation("GCP API key is not configured".into()))?;
    let url = format!("{}/services/{}/skus", CLOUD_BILLING_BASE, service_id);
    let resp = client
        .http
        .get(&url)
        .query(&[("key", key)])
        .send()
        .await
        .map_err(|e| upstream_err("GCP", e))?;
    if !resp.status().is_success() {
        return Err(upstream_err("GCP", format!("status {}", resp.status())));
    }
    let body = resp.json::<Value>().await.map_err(|e| upstream_err("GCP", e))?;
    let plans = normalize_skus(&body);
    if plans.is_empty() {
        return Err(ServiceError::UpstreamNoData("no SKUs found for the given service".into()));
    }
    Ok(plans)
}
