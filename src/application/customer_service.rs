use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::page::{Page, PageRequest};
use crate::domain::ports::CustomerRepository;
use crate::mappers::{customer_dto_to_new_customer, customer_to_customer_dto};
use crate::models::order::CustomerDto;

pub struct CustomerService<C> {
    repo: C,
}

impl<C: CustomerRepository> CustomerService<C> {
    pub fn new(repo: C) -> Self {
        Self { repo }
    }

    pub fn create_customer(&self, dto: CustomerDto) -> Result<CustomerDto, DomainError> {
        let saved = self.repo.insert(customer_dto_to_new_customer(dto)?)?;
        Ok(customer_to_customer_dto(saved))
    }

    pub fn get_customer_by_id(&self, id: Uuid) -> Result<Option<CustomerDto>, DomainError> {
        Ok(self.repo.find_by_id(id)?.map(customer_to_customer_dto))
    }

    pub fn list_customers(
        &self,
        page_number: Option<i64>,
        page_size: Option<i64>,
    ) -> Result<Page<CustomerDto>, DomainError> {
        let page_request = PageRequest::from_params(page_number, page_size)?;
        Ok(self.repo.find_all(page_request)?.map(customer_to_customer_dto))
    }
}
