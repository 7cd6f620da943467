//! AWS price-list adapter.
//!
//! Serves lookups from the public price-list JSON documents. Filters are
//! exact attribute matches applied to the product list (the TERM_MATCH
//! translation); the price comes out of the `terms.OnDemand` nesting of the
//! first matching product.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::errors::ServiceError;
use crate::pricing::{upstream_err, PricingClient};

pub const PRICE_LIST_BASE: &str = "https://pricing.us-east-1.amazonaws.com";

/// Price lookup result in the normalized flat shape.
#[derive(Debug, Serialize)]
pub struct ServicePrice {
    pub service_code: String,
    pub config: BTreeMap<String, String>,
    pub unit: String,
    pub price_per_unit: String,
    pub description: String,
}

pub fn region_to_location(region: &str) -> Option<&'static str> {
    match region {
        "us-east-1" => Some("US East (N. Virginia)"),
        "us-west-1" => Some("US West (N. California)"),
        "us-west-2" => Some("US West (Oregon)"),
        "eu-central-1" => Some("EU (Frankfurt)"),
        "eu-west-1" => Some("EU (Ireland)"),
        "ap-southeast-1" => Some("Asia Pacific (Singapore)"),
        "ap-southeast-2" => Some("Asia Pacific (Sydney)"),
        _ => None,
    }
}

/// Turn the request config into attribute equality filters. `region` is
/// special-cased into the `location` attribute the price list uses.
pub fn build_filters(config: &BTreeMap<String, String>) -> Vec<(String, String)> {
    let mut filters: Vec<(String, String)> = config
        .iter()
        .filter(|(k, _)| k.as_str() != "region")
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    if let Some(location) = config.get("region").and_then(|r| region_to_location(r)) {
        filters.push(("location".to_string(), location.to_string()));
    }
    filters
}

/// First product whose attributes satisfy every filter exactly.
pub fn find_matching_sku(products: &Value, filters: &[(String, String)]) -> Option<String> {
    let products = products.as_object()?;
    for (sku, product) in products {
        let attrs = &product["attributes"];
        let all_match = filters
            .iter()
            .all(|(k, v)| attrs.get(k).and_then(Value::as_str) == Some(v.as_str()));
        if all_match {
            return Some(sku.clone());
        }
    }
    None
}

/// Walk `terms.OnDemand.<sku>` down to the first price dimension.
pub fn extract_on_demand_price(terms: &Value, sku: &str) -> Option<(String, String, String)> {
    let on_demand = terms.get("OnDemand")?.get(sku)?.as_object()?;
    let offer = on_demand.values().next()?;
    let dimensions = offer.get("priceDimensions")?.as_object()?;
    let dimension = dimensions.values().next()?;
    let unit = dimension.get("unit")?.as_str()?.to_string();
    let description = dimension.get("description")?.as_str()?.to_string();
    let price = dimension.get("pricePerUnit")?.get("USD")?.as_str()?.to_string();
    Some((unit, price, description))
}

async fn fetch_offer_index(client: &PricingClient, service_code: &str) -> Result<Value, ServiceError> {
    let url = format!("{}/offers/v1.0/aws/{}/current/index.json", PRICE_LIST_BASE, service_code);
    let resp = client
        .http
        .get(&url)
        .send()
        .await
        .map_err(|e| upstream_err("AWS", e))?;
    if !resp.status().is_success() {
        return Err(upstream_err("AWS", format!("status {}", resp.status())));
    }
    resp.json::<Value>().await.map_err(|e| upstream_err("AWS", e))
}

pub async fn get_service_price(
    client: &PricingClient,
    service_code: &str,
    config: BTreeMap<String, String>,
) -> Result<ServicePrice, ServiceError> {
    let index = fetch_offer_index(client, service_code).await?;
    let filters = build_filters(&config);
    let sku = find_matching_sku(&index["products"], &filters)
        .ok_or_else(|| ServiceError::UpstreamNoData("no pricing data found for the given configuration".into()))?;
    let (unit, price_per_unit, description) = extract_on_demand_price(&index["terms"], &sku)
        .ok_or_else(|| ServiceError::UpstreamNoData("no on-demand price for the matched product".into()))?;
    Ok(ServicePrice {
        service_code: service_code.to_string(),
        config,
        unit,
        price_per_unit,
        description,
    })
}

/// Attribute names usable as filters for the service, the union over all
/// its products.
pub async fn get_service_attributes(
    client: &PricingClient,
    service_code: &str,
) -> Result<Vec<String>, ServiceError> {
    let index = fetch_offer_index(client, service_code).await?;
    let names = collect_attribute_names(&index["products"]);
    if names.is_empty() {
        return Err(ServiceError::UpstreamNoData("service not found".into()));
    }
    Ok(names)
}

/// Distinct values seen for one attribute across the service's products.
pub async fn get_attribute_values(
    client: &PricingClient,
    service_code: &str,
    attribute: &str,
) -> Result<Vec<String>, ServiceError> {
    let index = fetch_offer_index(client, service_code).await?;
    let values = collect_attribute_values(&index["products"], attribute);
    if values.is_empty() {
        return Err(ServiceError::UpstreamNoData("configuration filter not found".into()));
    }
    Ok(values)
}

pub fn collect_attribute_names(products: &Value) -> Vec<String> {
    let mut names: Vec<String> = products
        .as_object()
        .map(|m| {
            m.values()
                .filter_map(|p| p.get("attributes").and_then(Value::as_object))
                .flat_map(|attrs| attrs.keys().cloned())
                .collect()
        })
        .unwrap_or_default();
    names.sort();
    names.dedup();
    names
}

pub fn collect_attribute_values(products: &Value, attribute: &str) -> Vec<String> {
    let mut values: Vec<String> = products
        .as_object()
        .map(|m| {
            m.values()
                .filter_map(|p| p["attributes"].get(attribute).and_then(Value::as_str))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();
    values.sort();
    values.dedup();
    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_index() -> Value {
        json!({
            "products": {
                "SKU1": {
                    "attributes": {
                        "instanceType": "t3.micro",
                        "location": "US East (N. Virginia)",
                        "operatingSystem": "Linux"
                    }
                },
                "SKU2": {
                    "attributes": {
                        "instanceType": "t3.large",
                        "location": "EU (Ireland)",
                        "operatingSystem": "Linux"
                    }
                }
            },
            "terms": {
                "OnDemand": {
                    "SKU1": {
                        "SKU1.JRTCKXETXF": {
                            "priceDimensions": {
                                "SKU1.JRTCKXETXF.6YS6EN2CT7": {
                                    "unit": "Hrs",
                                    "description": "$0.0104 per On Demand Linux t3.micro Instance Hour",
                                    "pricePerUnit": { "USD": "0.0104000000" }
                                }
                            }
                        }
                    }
                }
            }
        })
    }

    #[test]
    fn region_map_covers_known_regions() {
        assert_eq!(region_to_location("us-east-1"), Some("US East (N. Virginia)"));
        assert_eq!(region_to_location("mars-north-1"), None);
    }

    #[test]
    fn filters_translate_region_to_location() {
        let mut config = BTreeMap::new();
        config.insert("region".to_string(), "us-east-1".to_string());
        config.insert("instanceType".to_string(), "t3.micro".to_string());
        let filters = build_filters(&config);
        assert!(filters.contains(&("instanceType".to_string(), "t3.micro".to_string())));
        assert!(filters.contains(&("location".to_string(), "US East (N. Virginia)".to_string())));
        assert!(!filters.iter().any(|(k, _)| k == "region"));
    }

    #[test]
    fn matching_requires_every_filter() {
        let index = sample_index();
        let filters = vec![
            ("instanceType".to_string(), "t3.micro".to_string()),
            ("location".to_string(), "US East (N. Virginia)".to_string()),
        ];
        assert_eq!(find_matching_sku(&index["products"], &filters), Some("SKU1".to_string()));

        let filters = vec![
            ("instanceType".to_string(), "t3.micro".to_string()),
            ("location".to_string(), "EU (Ireland)".to_string()),
        ];
        assert_eq!(find_matching_sku(&index["products"], &filters), None);
    }

    #[test]
    fn on_demand_extraction_walks_the_nesting() {
        let index = sample_index();
        let (unit, price, description) = extract_on_demand_price(&index["terms"], "SKU1").unwrap();
        assert_eq!(unit, "Hrs");
        assert_eq!(price, "0.0104000000");
        assert!(description.contains("t3.micro"));
        assert!(extract_on_demand_price(&index["terms"], "SKU2").is_none());
    }

    #[test]
    fn attribute_names_and_values_are_deduped_and_sorted() {
        let index = sample_index();
        let names = collect_attribute_names(&index["products"]);
        assert_eq!(names, vec!["instanceType", "location", "operatingSystem"]);

        let values = collect_attribute_values(&index["products"], "operatingSystem");
        assert_eq!(values, vec!["Linux"]);

        let values = collect_attribute_values(&index["products"], "instanceType");
        assert_eq!(values, vec!["t3.large", "t3.micro"]);
    }
}
