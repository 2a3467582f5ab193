use chrono::{DateTime, Utc};
use uuid::Uuid;

pub const MAX_CUSTOMER_NAME_LEN: usize = 50;
pub const MAX_CUSTOMER_REF_LEN: usize = 255;

#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub id: Uuid,
    pub version: i32,
    pub name: String,
    pub created_date: DateTime<Utc>,
    pub update_date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewCustomer {
    pub name: String,
}

/// An order with its lines fully loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct BeerOrder {
    pub id: Uuid,
    pub version: i32,
    pub customer_ref: Option<String>,
    pub customer_id: Option<Uuid>,
    pub created_date: DateTime<Utc>,
    pub last_modified_date: DateTime<Utc>,
    pub lines: Vec<BeerOrderLine>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BeerOrderLine {
    pub id: Uuid,
    pub version: i32,
    pub beer_order_id: Uuid,
    pub beer_id: Uuid,
    pub order_quantity: i32,
    pub quantity_allocated: i32,
    pub created_date: DateTime<Utc>,
    pub last_modified_date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewBeerOrderLine {
    pub beer_id: Uuid,
    pub order_quantity: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewBeerOrder {
    pub customer_id: Option<Uuid>,
    pub customer_ref: Option<String>,
    pub lines: Vec<NewBeerOrderLine>,
}
