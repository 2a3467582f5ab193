use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::order::{BeerOrder, Customer, NewBeerOrder, NewCustomer};
use crate::domain::page::{Page, PageRequest};
use crate::domain::ports::{BeerOrderRepository, CustomerRepository};
use crate::schema::{beer_order_lines, beer_orders, customers};

use super::models::{
    BeerOrderLineRow, BeerOrderRow, CustomerRow, NewBeerOrderLineRow, NewBeerOrderRow,
    NewCustomerRow,
};

// ── Customers ─────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DieselCustomerRepository {
    pool: DbPool,
}

impl DieselCustomerRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl CustomerRepository for DieselCustomerRepository {
    fn insert(&self, customer: NewCustomer) -> Result<Customer, DomainError> {
        let mut conn = self.pool.get()?;

        let row = diesel::insert_into(customers::table)
            .values(&NewCustomerRow {
                id: Uuid::new_v4(),
                name: customer.name,
            })
            .returning(CustomerRow::as_returning())
            .get_result(&mut conn)?;

        Ok(row.into())
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = customers::table
            .filter(customers::id.eq(id))
            .select(CustomerRow::as_select())
            .first(&mut conn)
            .optional()?;

        Ok(row.map(Customer::from))
    }

    fn find_all(&self, page: PageRequest) -> Result<Page<Customer>, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let total: i64 = customers::table.count().get_result(conn)?;

            let rows = customers::table
                .select(CustomerRow::as_select())
                .order((customers::created_date.asc(), customers::id.asc()))
                .limit(page.page_size)
                .offset(page.offset())
                .load(conn)?;

            Ok(Page::new(
                rows.into_iter().map(Customer::from).collect(),
                page,
                total,
            ))
        })
    }
}

// ── Beer orders ───────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DieselBeerOrderRepository {
    pool: DbPool,
}

impl DieselBeerOrderRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl BeerOrderRepository for DieselBeerOrderRepository {
    fn create(&self, order: NewBeerOrder) -> Result<BeerOrder, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            // 1. Insert the order header
            let order_row = diesel::insert_into(beer_orders::table)
                .values(&NewBeerOrderRow {
                    id: Uuid::new_v4(),
                    customer_ref: order.customer_ref,
                    customer_id: order.customer_id,
                })
                .returning(BeerOrderRow::as_returning())
                .get_result(conn)?;

            // 2. Insert its lines; FK violations roll the whole order back
            let new_lines: Vec<NewBeerOrderLineRow> = order
                .lines
                .iter()
                .map(|l| NewBeerOrderLineRow {
                    id: Uuid::new_v4(),
                    beer_order_id: order_row.id,
                    beer_id: l.beer_id,
                    order_quantity: l.order_quantity,
                })
                .collect();
            let line_rows = diesel::insert_into(beer_order_lines::table)
                .values(&new_lines)
                .returning(BeerOrderLineRow::as_returning())
                .get_results(conn)?;

            log::debug!(
                "created beer order {} with {} line(s)",
                order_row.id,
                line_rows.len()
            );
            Ok(order_row.into_order(line_rows))
        })
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<BeerOrder>, DomainError> {
        let mut conn = self.pool.get()?;

        let order = beer_orders::table
            .filter(beer_orders::id.eq(id))
            .select(BeerOrderRow::as_select())
            .first(&mut conn)
            .optional()?;

        let Some(order) = order else {
            return Ok(None);
        };

        let lines = BeerOrderLineRow::belonging_to(&order)
            .select(BeerOrderLineRow::as_select())
            .order(beer_order_lines::created_date.asc())
            .load(&mut conn)?;

        Ok(Some(order.into_order(lines)))
    }

    fn find_all_by_customer(
        &self,
        customer_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<BeerOrder>, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let total: i64 = beer_orders::table
                .filter(beer_orders::customer_id.eq(customer_id))
                .count()
                .get_result(conn)?;

            let orders = beer_orders::table
                .filter(beer_orders::customer_id.eq(customer_id))
                .select(BeerOrderRow::as_select())
                .order((beer_orders::created_date.asc(), beer_orders::id.asc()))
                .limit(page.page_size)
                .offset(page.offset())
                .load(conn)?;

            let lines = BeerOrderLineRow::belonging_to(&orders)
                .select(BeerOrderLineRow::as_select())
                .load::<BeerOrderLineRow>(conn)?
                .grouped_by(&orders);

            let content = orders
                .into_iter()
                .zip(lines)
                .map(|(order, lines)| order.into_order(lines))
                .collect();
            Ok(Page::new(content, page, total))
        })
    }
}
