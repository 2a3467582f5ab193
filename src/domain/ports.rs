use uuid::Uuid;

use super::beer::{Beer, BeerStyle, NewBeer};
use super::errors::DomainError;
use super::order::{BeerOrder, Customer, NewBeerOrder, NewCustomer};
use super::page::{Page, PageRequest};

/// Listing queries return rows ordered by creation time, then id.
pub trait BeerRepository: Send + Sync + 'static {
    fn find_by_id(&self, id: Uuid) -> Result<Option<Beer>, DomainError>;
    fn find_all(&self, page: PageRequest) -> Result<Page<Beer>, DomainError>;
    /// Case-insensitive substring match on the beer name.
    fn find_all_by_name_like(&self, name: &str, page: PageRequest) -> Result<Page<Beer>, DomainError>;
    fn find_all_by_style(&self, style: BeerStyle, page: PageRequest) -> Result<Page<Beer>, DomainError>;
    fn find_all_by_name_like_and_style(
        &self,
        name: &str,
        style: BeerStyle,
        page: PageRequest,
    ) -> Result<Page<Beer>, DomainError>;
    fn insert(&self, beer: NewBeer) -> Result<Beer, DomainError>;
    /// Persist the caller-owned fields of `beer` if the stored version still
    /// equals `beer.version`. Bumps the version on success and fails with
    /// `ConcurrencyConflict` otherwise.
    fn update(&self, beer: &Beer) -> Result<Beer, DomainError>;
    fn exists_by_id(&self, id: Uuid) -> Result<bool, DomainError>;
    /// Returns whether a row was removed.
    fn delete_by_id(&self, id: Uuid) -> Result<bool, DomainError>;
}

pub trait CustomerRepository: Send + Sync + 'static {
    fn insert(&self, customer: NewCustomer) -> Result<Customer, DomainError>;
    fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>, DomainError>;
    fn find_all(&self, page: PageRequest) -> Result<Page<Customer>, DomainError>;
}

pub trait BeerOrderRepository: Send + Sync + 'static {
    /// Insert the order and all of its lines atomically.
    fn create(&self, order: NewBeerOrder) -> Result<BeerOrder, DomainError>;
    fn find_by_id(&self, id: Uuid) -> Result<Option<BeerOrder>, DomainError>;
    fn find_all_by_customer(
        &self,
        customer_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<BeerOrder>, DomainError>;
}
