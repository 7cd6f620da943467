use std::collections::BTreeMap;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;

use crate::errors::ApiError;
use crate::routes::ServerState;
use service::pricing::{aws, azure, gcp};

#[derive(Debug, Deserialize)]
pub struct AwsPriceInput {
    pub service_code: String,
    pub config: BTreeMap<String, String>,
}

pub async fn aws_price(
    State(state): State<ServerState>,
    Json(input): Json<AwsPriceInput>,
) -> Result<Json<aws::ServicePrice>, ApiError> {
    Ok(Json(
        aws::get_service_price(&state.pricing, &input.service_code, input.config).await?,
    ))
}

pub async fn aws_service_configs(
    State(state): State<ServerState>,
    Path(service_code): Path<String>,
) -> Result<Json<Vec<String>>, ApiError> {
    Ok(Json(aws::get_service_attributes(&state.pricing, &service_code).await?))
}

pub async fn aws_config_values(
    State(state): State<ServerState>,
    Path((service_code, config_name)): Path<(String, String)>,
) -> Result<Json<Vec<String>>, ApiError> {
    Ok(Json(
        aws::get_attribute_values(&state.pricing, &service_code, &config_name).await?,
    ))
}

pub async fn azure_price(
    State(state): State<ServerState>,
    Json(config): Json<BTreeMap<String, String>>,
) -> Result<Json<Vec<azure::RetailPrice>>, ApiError> {
    Ok(Json(azure::fetch_resource_prices(&state.pricing, config).await?))
}

pub async fn gcp_service_skus(
    State(state): State<ServerState>,
    Path(service_id): Path<String>,
) -> Result<Json<Vec<gcp::PricePlan>>, ApiError> {
    Ok(Json(gcp::get_service_skus(&state.pricing, &service_id).await?))
}
