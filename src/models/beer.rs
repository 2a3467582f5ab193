use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::beer::BeerStyle;

/// External shape of a beer.
///
/// Every field is optional so the same shape serves create, full update and
/// patch bodies. `id`, `version` and the timestamps are ignored on input,
/// except that a supplied `version` must match the stored one on update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BeerDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i32>,
    #[serde(default)]
    pub beer_name: Option<String>,
    #[serde(default)]
    pub beer_style: Option<BeerStyle>,
    #[serde(default)]
    pub upc: Option<String>,
    #[serde(default)]
    pub quantity_on_hand: Option<i32>,
    /// Decimal price serialized as a string, e.g. "12.99"
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub price: Option<BigDecimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_date: Option<DateTime<Utc>>,
}
