use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::beer::Beer;
use crate::domain::errors::DomainError;
use crate::domain::order::{BeerOrder, BeerOrderLine, Customer};
use crate::schema::{beer_order_lines, beer_orders, beers, customers};

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = beers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BeerRow {
    pub id: Uuid,
    pub version: i32,
    pub beer_name: String,
    pub beer_style: String,
    pub upc: String,
    pub quantity_on_hand: Option<i32>,
    pub price: BigDecimal,
    pub created_date: DateTime<Utc>,
    pub update_date: DateTime<Utc>,
}

impl TryFrom<BeerRow> for Beer {
    type Error = DomainError;

    fn try_from(row: BeerRow) -> Result<Self, Self::Error> {
        let beer_style = row.beer_style.parse().map_err(|_| {
            DomainError::Internal(format!(
                "beer {} has unknown stored style '{}'",
                row.id, row.beer_style
            ))
        })?;
        Ok(Beer {
            id: row.id,
            version: row.version,
            beer_name: row.beer_name,
            beer_style,
            upc: row.upc,
            quantity_on_hand: row.quantity_on_hand,
            price: row.price,
            created_date: row.created_date,
            update_date: row.update_date,
        })
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = beers)]
pub struct NewBeerRow {
    pub id: Uuid,
    pub beer_name: String,
    pub beer_style: String,
    pub upc: String,
    pub quantity_on_hand: Option<i32>,
    pub price: BigDecimal,
}

/// Caller-owned beer columns. `None` writes NULL rather than skipping.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = beers)]
#[diesel(treat_none_as_null = true)]
pub struct BeerChangeset<'a> {
    pub beer_name: &'a str,
    pub beer_style: &'a str,
    pub upc: &'a str,
    pub quantity_on_hand: Option<i32>,
    pub price: &'a BigDecimal,
    pub update_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = customers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CustomerRow {
    pub id: Uuid,
    pub version: i32,
    pub name: String,
    pub created_date: DateTime<Utc>,
    pub update_date: DateTime<Utc>,
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Customer {
            id: row.id,
            version: row.version,
            name: row.name,
            created_date: row.created_date,
            update_date: row.update_date,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = customers)]
pub struct NewCustomerRow {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = beer_orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BeerOrderRow {
    pub id: Uuid,
    pub version: i32,
    pub customer_ref: Option<String>,
    pub customer_id: Option<Uuid>,
    pub created_date: DateTime<Utc>,
    pub last_modified_date: DateTime<Utc>,
}

impl BeerOrderRow {
    pub fn into_order(self, lines: Vec<BeerOrderLineRow>) -> BeerOrder {
        BeerOrder {
            id: self.id,
            version: self.version,
            customer_ref: self.customer_ref,
            customer_id: self.customer_id,
            created_date: self.created_date,
            last_modified_date: self.last_modified_date,
            lines: lines.into_iter().map(BeerOrderLine::from).collect(),
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = beer_orders)]
pub struct NewBeerOrderRow {
    pub id: Uuid,
    pub customer_ref: Option<String>,
    pub customer_id: Option<Uuid>,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations)]
#[diesel(table_name = beer_order_lines)]
#[diesel(belongs_to(BeerOrderRow, foreign_key = beer_order_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BeerOrderLineRow {
    pub id: Uuid,
    pub version: i32,
    pub beer_order_id: Uuid,
    pub beer_id: Uuid,
    pub order_quantity: i32,
    pub quantity_allocated: i32,
    pub created_date: DateTime<Utc>,
    pub last_modified_date: DateTime<Utc>,
}

impl From<BeerOrderLineRow> for BeerOrderLine {
    fn from(row: BeerOrderLineRow) -> Self {
        BeerOrderLine {
            id: row.id,
            version: row.version,
            beer_order_id: row.beer_order_id,
            beer_id: row.beer_id,
            order_quantity: row.order_quantity,
            quantity_allocated: row.quantity_allocated,
            created_date: row.created_date,
            last_modified_date: row.last_modified_date,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = beer_order_lines)]
pub struct NewBeerOrderLineRow {
    pub id: Uuid,
    pub beer_order_id: Uuid,
    pub beer_id: Uuid,
    pub order_quantity: i32,
}
