//! A process-local store implementing every repository port.
//!
//! Applies the same ordering, foreign-key and version rules as the Diesel
//! repositories, so services and handlers can be exercised without Postgres.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::beer::{Beer, BeerFilter, BeerStyle, NewBeer};
use crate::domain::errors::DomainError;
use crate::domain::order::{BeerOrder, BeerOrderLine, Customer, NewBeerOrder, NewCustomer};
use crate::domain::page::{Page, PageRequest};
use crate::domain::ports::{BeerOrderRepository, BeerRepository, CustomerRepository};

#[derive(Debug, Default)]
struct MemoryState {
    beers: HashMap<Uuid, Beer>,
    customers: HashMap<Uuid, Customer>,
    orders: HashMap<Uuid, BeerOrder>,
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> Result<MutexGuard<'_, MemoryState>, DomainError> {
        self.state
            .lock()
            .map_err(|_| DomainError::Internal("in-memory store lock poisoned".to_string()))
    }

    fn beer_page(&self, filter: BeerFilter, page: PageRequest) -> Result<Page<Beer>, DomainError> {
        let state = self.state()?;
        let matching = state
            .beers
            .values()
            .filter(|b| filter.matches(b))
            .cloned()
            .collect();
        Ok(paginate(matching, page, |b: &Beer| (b.created_date, b.id)))
    }
}

fn paginate<T, K: Ord>(
    mut items: Vec<T>,
    page: PageRequest,
    sort_key: impl Fn(&T) -> K,
) -> Page<T> {
    items.sort_by_key(|item| sort_key(item));
    let total = items.len() as i64;
    let content = items
        .into_iter()
        .skip(usize::try_from(page.offset()).unwrap_or(usize::MAX))
        .take(usize::try_from(page.page_size).unwrap_or(usize::MAX))
        .collect();
    Page::new(content, page, total)
}

/// Strictly increasing creation stamps keep insertion order stable even when
/// two inserts land on the same clock tick.
fn next_stamp<'a>(existing: impl Iterator<Item = &'a DateTime<Utc>>) -> DateTime<Utc> {
    let now = Utc::now();
    match existing.max() {
        Some(latest) if *latest >= now => *latest + chrono::Duration::microseconds(1),
        _ => now,
    }
}

impl BeerRepository for InMemoryStore {
    fn find_by_id(&self, id: Uuid) -> Result<Option<Beer>, DomainError> {
        Ok(self.state()?.beers.get(&id).cloned())
    }

    fn find_all(&self, page: PageRequest) -> Result<Page<Beer>, DomainError> {
        self.beer_page(BeerFilter::All, page)
    }

    fn find_all_by_name_like(&self, name: &str, page: PageRequest) -> Result<Page<Beer>, DomainError> {
        self.beer_page(BeerFilter::NameLike(name.to_string()), page)
    }

    fn find_all_by_style(&self, style: BeerStyle, page: PageRequest) -> Result<Page<Beer>, DomainError> {
        self.beer_page(BeerFilter::Style(style), page)
    }

    fn find_all_by_name_like_and_style(
        &self,
        name: &str,
        style: BeerStyle,
        page: PageRequest,
    ) -> Result<Page<Beer>, DomainError> {
        self.beer_page(BeerFilter::NameLikeAndStyle(name.to_string(), style), page)
    }

    fn insert(&self, beer: NewBeer) -> Result<Beer, DomainError> {
        let mut state = self.state()?;
        let now = next_stamp(state.beers.values().map(|b| &b.created_date));
        let stored = Beer {
            id: Uuid::new_v4(),
            version: 0,
            beer_name: beer.beer_name,
            beer_style: beer.beer_style,
            upc: beer.upc,
            quantity_on_hand: beer.quantity_on_hand,
            price: beer.price,
            created_date: now,
            update_date: now,
        };
        state.beers.insert(stored.id, stored.clone());
        Ok(stored)
    }

    fn update(&self, beer: &Beer) -> Result<Beer, DomainError> {
        let mut state = self.state()?;
        let conflict = DomainError::ConcurrencyConflict {
            id: beer.id,
            expected_version: beer.version,
        };
        let Some(stored) = state.beers.get_mut(&beer.id) else {
            return Err(conflict);
        };
        if stored.version != beer.version {
            return Err(conflict);
        }
        stored.beer_name = beer.beer_name.clone();
        stored.beer_style = beer.beer_style;
        stored.upc = beer.upc.clone();
        stored.quantity_on_hand = beer.quantity_on_hand;
        stored.price = beer.price.clone();
        stored.version += 1;
        stored.update_date = Utc::now();
        Ok(stored.clone())
    }

    fn exists_by_id(&self, id: Uuid) -> Result<bool, DomainError> {
        Ok(self.state()?.beers.contains_key(&id))
    }

    fn delete_by_id(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut state = self.state()?;
        let referenced = state
            .orders
            .values()
            .flat_map(|o| o.lines.iter())
            .any(|l| l.beer_id == id);
        if referenced {
            return Err(DomainError::InvalidArgument(format!(
                "beer {} is referenced by an order line",
                id
            )));
        }
        Ok(state.beers.remove(&id).is_some())
    }
}

impl CustomerRepository for InMemoryStore {
    fn insert(&self, customer: NewCustomer) -> Result<Customer, DomainError> {
        let mut state = self.state()?;
        let now = next_stamp(state.customers.values().map(|c| &c.created_date));
        let stored = Customer {
            id: Uuid::new_v4(),
            version: 0,
            name: customer.name,
            created_date: now,
            update_date: now,
        };
        state.customers.insert(stored.id, stored.clone());
        Ok(stored)
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>, DomainError> {
        Ok(self.state()?.customers.get(&id).cloned())
    }

    fn find_all(&self, page: PageRequest) -> Result<Page<Customer>, DomainError> {
        let state = self.state()?;
        let all = state.customers.values().cloned().collect();
        Ok(paginate(all, page, |c: &Customer| (c.created_date, c.id)))
    }
}

impl BeerOrderRepository for InMemoryStore {
    fn create(&self, order: NewBeerOrder) -> Result<BeerOrder, DomainError> {
        let mut state = self.state()?;
        if let Some(customer_id) = order.customer_id {
            if !state.customers.contains_key(&customer_id) {
                return Err(DomainError::InvalidArgument(format!(
                    "unknown customer {}",
                    customer_id
                )));
            }
        }
        if let Some(line) = order.lines.iter().find(|l| !state.beers.contains_key(&l.beer_id)) {
            return Err(DomainError::InvalidArgument(format!(
                "unknown beer {}",
                line.beer_id
            )));
        }

        let now = next_stamp(state.orders.values().map(|o| &o.created_date));
        let order_id = Uuid::new_v4();
        let stored = BeerOrder {
            id: order_id,
            version: 0,
            customer_ref: order.customer_ref,
            customer_id: order.customer_id,
            created_date: now,
            last_modified_date: now,
            lines: order
                .lines
                .into_iter()
                .map(|l| BeerOrderLine {
                    id: Uuid::new_v4(),
                    version: 0,
                    beer_order_id: order_id,
                    beer_id: l.beer_id,
                    order_quantity: l.order_quantity,
                    quantity_allocated: 0,
                    created_date: now,
                    last_modified_date: now,
                })
                .collect(),
        };
        state.orders.insert(order_id, stored.clone());
        Ok(stored)
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<BeerOrder>, DomainError> {
        Ok(self.state()?.orders.get(&id).cloned())
    }

    fn find_all_by_customer(
        &self,
        customer_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<BeerOrder>, DomainError> {
        let state = self.state()?;
        let owned = state
            .orders
            .values()
            .filter(|o| o.customer_id == Some(customer_id))
            .cloned()
            .collect();
        Ok(paginate(owned, page, |o: &BeerOrder| (o.created_date, o.id)))
    }
}
