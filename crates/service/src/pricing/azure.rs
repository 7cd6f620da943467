//! Azure Retail Prices adapter.
//!
//! The request config becomes an OData `$filter` string; the flat `Items`
//! array comes back reshaped into normalized price records. The retail API
//! needs no authentication.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::errors::ServiceError;
use crate::pricing::{upstream_err, PricingClient};

pub const RETAIL_PRICES_URL: &str = "https://prices.azure.com/api/retail/prices";

/// One retail price record in the normalized flat shape.
#[derive(Debug, Serialize)]
pub struct RetailPrice {
    pub unit: String,
    pub price_per_unit: f64,
    pub description: String,
    pub currency: String,
    pub region: String,
    pub sku_name: String,
}

/// `key eq 'value'` terms joined with `and`, per the OData spec.
pub fn build_filter(config: &BTreeMap<String, String>) -> String {
    config
        .iter()
        .map(|(key, value)| format!("{} eq '{}'", key, value))
        .collect::<Vec<_>>()
        .join(" and ")
}

pub fn normalize_items(body: &Value) -> Vec<RetailPrice> {
    body.get("Items")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .map(|item| RetailPrice {
                    unit: str_field(item, "unitOfMeasure"),
                    price_per_unit: item.get("retailPrice").and_then(Value::as_f64).unwrap_or(0.0),
                    description: format!(
                        "{} - {}",
                        str_field(item, "productName"),
                        str_field(item, "meterName")
                    ),
                    currency: str_field(item, "currencyCode"),
                    region: str_field(item, "armRegionName"),
                    sku_name: str_field(item, "skuName"),
                })
                .collect()
        })
        .unwrap_or_default()
}

fn str_field(item: &Value, key: &str) -> String {
    item.get(key).and_then(Value::as_str).unwrap_or_default().to_string()
}

pub async fn fetch_resource_prices(
    client: &PricingClient,
    config: BTreeMap<String, String>,
) -> Result<Vec<RetailPrice>, ServiceError> {
    let filter = build_filter(&config);
    let resp = client
        .http
        .get(RETAIL_PRICES_URL)
        .query(&[("$filter", filter.as_str())])
        .send()
        .await
        .map_err(|e| upstream_err("Azure", e))?;
    if !resp.status().is_success() {
        return Err(upstream_err("Azure", format!("status {}", resp.status())));
    }
    let body = resp.json::<Value>().await.map_err(|e| upstream_err("Azure", e))?;
    let prices = normalize_items(&body);
    if prices.is_empty() {
        return Err(ServiceError::UpstreamNoData(
            "no retail prices matched the given configuration".into(),
        ));
    }
    Ok(prices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn filter_joins_terms_with_and() {
        let mut config = BTreeMap::new();
        config.insert("armRegionName".to_string(), "westus".to_string());
        config.insert("serviceName".to_string(), "Virtual Machines".to_string());
        // BTreeMap iterates in key order
        assert_eq!(
            build_filter(&config),
            "armRegionName eq 'westus' and serviceName eq 'Virtual Machines'"
        );
    }

    #[test]
    fn single_term_has_no_joiner() {
        let mut config = BTreeMap::new();
        config.insert("skuName".to_string(), "D2s v3".to_string());
        assert_eq!(build_filter(&config), "skuName eq 'D2s v3'");
    }

    #[test]
    fn items_are_reshaped_into_flat_records() {
        let body = json!({
            "Items": [{
                "currencyCode": "USD",
                "retailPrice": 0.096,
                "unitOfMeasure": "1 Hour",
                "meterName": "D2s v3",
                "productName": "Virtual Machines Dsv3 Series",
                "skuName": "D2s v3",
                "armRegionName": "westus"
            }]
        });
        let prices = normalize_items(&body);
        assert_eq!(prices.len(), 1);
        assert_eq!(prices[0].unit, "1 Hour");
        assert_eq!(prices[0].price_per_unit, 0.096);
        assert_eq!(prices[0].description, "Virtual Machines Dsv3 Series - D2s v3");
        assert_eq!(prices[0].region, "westus");
    }

    #[test]
    fn missing_items_yields_empty() {
        assert!(normalize_items(&json!({})).is_empty());
        assert!(normalize_items(&json!({"Items": []})).is_empty());
    }
}
