use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::page::{Page, PageRequest};
use crate::domain::ports::{BeerOrderRepository, CustomerRepository};
use crate::mappers::{beer_order_to_beer_order_dto, create_request_to_new_beer_order};
use crate::models::order::{BeerOrderDto, CreateBeerOrderRequest};

pub struct BeerOrderService<O, C> {
    orders: O,
    customers: C,
}

impl<O: BeerOrderRepository, C: CustomerRepository> BeerOrderService<O, C> {
    pub fn new(orders: O, customers: C) -> Self {
        Self { orders, customers }
    }

    pub fn create_order(&self, request: CreateBeerOrderRequest) -> Result<BeerOrderDto, DomainError> {
        let new_order = create_request_to_new_beer_order(request)?;
        if let Some(customer_id) = new_order.customer_id {
            if self.customers.find_by_id(customer_id)?.is_none() {
                return Err(DomainError::InvalidArgument(format!(
                    "unknown customer {}",
                    customer_id
                )));
            }
        }
        let saved = self.orders.create(new_order)?;
        Ok(beer_order_to_beer_order_dto(saved))
    }

    pub fn get_order_by_id(&self, id: Uuid) -> Result<Option<BeerOrderDto>, DomainError> {
        Ok(self.orders.find_by_id(id)?.map(beer_order_to_beer_order_dto))
    }

    /// Absent when the customer does not exist.
    pub fn list_orders_for_customer(
        &self,
        customer_id: Uuid,
        page_number: Option<i64>,
        page_size: Option<i64>,
    ) -> Result<Option<Page<BeerOrderDto>>, DomainError> {
        let page_request = PageRequest::from_params(page_number, page_size)?;
        if self.customers.find_by_id(customer_id)?.is_none() {
            return Ok(None);
        }
        let page = self.orders.find_all_by_customer(customer_id, page_request)?;
        Ok(Some(page.map(beer_order_to_beer_order_dto)))
    }
}
