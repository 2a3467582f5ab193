use std::fmt;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::errors::DomainError;

pub const MAX_BEER_NAME_LEN: usize = 50;
pub const MAX_UPC_LEN: usize = 255;
/// Matches the `NUMERIC(10, 2)` price column.
pub const PRICE_SCALE: i64 = 2;
pub const PRICE_INTEGER_DIGITS: u32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BeerStyle {
    Lager,
    Pilsner,
    Stout,
    Gose,
    Porter,
    Ale,
    Wheat,
    Ipa,
    PaleAle,
    Saison,
}

impl BeerStyle {
    pub const ALL: [BeerStyle; 10] = [
        BeerStyle::Lager,
        BeerStyle::Pilsner,
        BeerStyle::Stout,
        BeerStyle::Gose,
        BeerStyle::Porter,
        BeerStyle::Ale,
        BeerStyle::Wheat,
        BeerStyle::Ipa,
        BeerStyle::PaleAle,
        BeerStyle::Saison,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BeerStyle::Lager => "LAGER",
            BeerStyle::Pilsner => "PILSNER",
            BeerStyle::Stout => "STOUT",
            BeerStyle::Gose => "GOSE",
            BeerStyle::Porter => "PORTER",
            BeerStyle::Ale => "ALE",
            BeerStyle::Wheat => "WHEAT",
            BeerStyle::Ipa => "IPA",
            BeerStyle::PaleAle => "PALE_ALE",
            BeerStyle::Saison => "SAISON",
        }
    }
}

impl fmt::Display for BeerStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BeerStyle {
    type Err = DomainError;

    /// Exact, case-sensitive match on the style name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BeerStyle::ALL
            .into_iter()
            .find(|style| style.as_str() == s)
            .ok_or_else(|| DomainError::InvalidArgument(format!("unknown beer style '{}'", s)))
    }
}

/// A persisted beer. `id`, `version` and the timestamps are owned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Beer {
    pub id: Uuid,
    pub version: i32,
    pub beer_name: String,
    pub beer_style: BeerStyle,
    pub upc: String,
    pub quantity_on_hand: Option<i32>,
    pub price: BigDecimal,
    pub created_date: DateTime<Utc>,
    pub update_date: DateTime<Utc>,
}

/// A beer that has not been persisted yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBeer {
    pub beer_name: String,
    pub beer_style: BeerStyle,
    pub upc: String,
    pub quantity_on_hand: Option<i32>,
    pub price: BigDecimal,
}

impl Beer {
    /// Overwrite every caller-owned field with `values`.
    pub fn replace_with(&mut self, values: NewBeer) {
        self.beer_name = values.beer_name;
        self.beer_style = values.beer_style;
        self.upc = values.upc;
        self.quantity_on_hand = values.quantity_on_hand;
        self.price = values.price;
    }
}

pub(crate) fn check_beer_name(name: &str, violations: &mut Vec<String>) {
    if name.trim().is_empty() {
        violations.push("beerName must not be blank".to_string());
    } else if name.chars().count() > MAX_BEER_NAME_LEN {
        violations.push(format!(
            "beerName must be at most {} characters",
            MAX_BEER_NAME_LEN
        ));
    }
}

pub(crate) fn check_upc(upc: &str, violations: &mut Vec<String>) {
    if upc.trim().is_empty() {
        violations.push("upc must not be blank".to_string());
    } else if upc.chars().count() > MAX_UPC_LEN {
        violations.push(format!("upc must be at most {} characters", MAX_UPC_LEN));
    }
}

/// Prices must fit the column exactly; the store would otherwise round or
/// reject them.
pub(crate) fn check_price(price: &BigDecimal, violations: &mut Vec<String>) {
    let (_, scale) = price.normalized().as_bigint_and_exponent();
    if scale > PRICE_SCALE {
        violations.push(format!(
            "price must have at most {} decimal places",
            PRICE_SCALE
        ));
    }
    if price.abs() >= BigDecimal::from(10_i64.pow(PRICE_INTEGER_DIGITS)) {
        violations.push(format!(
            "price must be below {}",
            10_i64.pow(PRICE_INTEGER_DIGITS)
        ));
    }
}

/// Which of the four listing queries to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BeerFilter {
    All,
    NameLike(String),
    Style(BeerStyle),
    NameLikeAndStyle(String, BeerStyle),
}

impl BeerFilter {
    /// Select the query variant from optional caller filters. Blank strings
    /// count as absent. An unparseable style is an `InvalidArgument`.
    pub fn from_params(beer_name: Option<&str>, beer_style: Option<&str>) -> Result<Self, DomainError> {
        let name = beer_name.filter(|s| !s.trim().is_empty());
        let style = beer_style.filter(|s| !s.trim().is_empty());

        Ok(match (name, style) {
            (Some(name), None) => BeerFilter::NameLike(name.to_string()),
            (None, Some(style)) => BeerFilter::Style(style.parse()?),
            (Some(name), Some(style)) => BeerFilter::NameLikeAndStyle(name.to_string(), style.parse()?),
            (None, None) => BeerFilter::All,
        })
    }

    /// Whether `beer` would be returned by this filter.
    pub fn matches(&self, beer: &Beer) -> bool {
        match self {
            BeerFilter::All => true,
            BeerFilter::NameLike(name) => name_contains(&beer.beer_name, name),
            BeerFilter::Style(style) => beer.beer_style == *style,
            BeerFilter::NameLikeAndStyle(name, style) => {
                beer.beer_style == *style && name_contains(&beer.beer_name, name)
            }
        }
    }
}

fn name_contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
