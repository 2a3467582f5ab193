//! Pure conversions between stored entities and transfer objects.

use crate::domain::beer::{check_beer_name, check_price, check_upc, Beer, NewBeer};
use crate::domain::errors::DomainError;
use crate::domain::order::{
    BeerOrder, BeerOrderLine, Customer, NewBeerOrder, NewBeerOrderLine, NewCustomer,
    MAX_CUSTOMER_NAME_LEN, MAX_CUSTOMER_REF_LEN,
};
use crate::models::beer::BeerDto;
use crate::models::order::{BeerOrderDto, BeerOrderLineDto, CreateBeerOrderRequest, CustomerDto};

pub fn beer_to_beer_dto(beer: Beer) -> BeerDto {
    BeerDto {
        id: Some(beer.id),
        version: Some(beer.version),
        beer_name: Some(beer.beer_name),
        beer_style: Some(beer.beer_style),
        upc: Some(beer.upc),
        quantity_on_hand: beer.quantity_on_hand,
        price: Some(beer.price),
        created_date: Some(beer.created_date),
        update_date: Some(beer.update_date),
    }
}

/// Convert a DTO into a persistable beer, collecting every constraint
/// violation into a single `InvalidArgument`.
pub fn beer_dto_to_new_beer(dto: BeerDto) -> Result<NewBeer, DomainError> {
    let mut violations = Vec::new();

    match dto.beer_name.as_deref() {
        Some(name) => check_beer_name(name, &mut violations),
        None => violations.push("beerName is required".to_string()),
    }
    if dto.beer_style.is_none() {
        violations.push("beerStyle is required".to_string());
    }
    match dto.upc.as_deref() {
        Some(upc) => check_upc(upc, &mut violations),
        None => violations.push("upc is required".to_string()),
    }
    match dto.price.as_ref() {
        Some(price) => check_price(price, &mut violations),
        None => violations.push("price is required".to_string()),
    }

    match (dto.beer_name, dto.beer_style, dto.upc, dto.price) {
        (Some(beer_name), Some(beer_style), Some(upc), Some(price)) if violations.is_empty() => {
            Ok(NewBeer {
                beer_name,
                beer_style,
                upc,
                quantity_on_hand: dto.quantity_on_hand,
                price,
            })
        }
        _ => Err(DomainError::InvalidArgument(violations.join("; "))),
    }
}

pub fn customer_to_customer_dto(customer: Customer) -> CustomerDto {
    CustomerDto {
        id: Some(customer.id),
        version: Some(customer.version),
        name: Some(customer.name),
        created_date: Some(customer.created_date),
        update_date: Some(customer.update_date),
    }
}

pub fn customer_dto_to_new_customer(dto: CustomerDto) -> Result<NewCustomer, DomainError> {
    let name = dto
        .name
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| DomainError::InvalidArgument("name must not be blank".to_string()))?;
    if name.chars().count() > MAX_CUSTOMER_NAME_LEN {
        return Err(DomainError::InvalidArgument(format!(
            "name must be at most {} characters",
            MAX_CUSTOMER_NAME_LEN
        )));
    }
    Ok(NewCustomer { name })
}

fn beer_order_line_to_dto(line: BeerOrderLine) -> BeerOrderLineDto {
    BeerOrderLineDto {
        id: line.id,
        version: line.version,
        beer_id: line.beer_id,
        order_quantity: line.order_quantity,
        quantity_allocated: line.quantity_allocated,
        created_date: line.created_date,
        last_modified_date: line.last_modified_date,
    }
}

pub fn beer_order_to_beer_order_dto(order: BeerOrder) -> BeerOrderDto {
    BeerOrderDto {
        id: order.id,
        version: order.version,
        customer_id: order.customer_id,
        customer_ref: order.customer_ref,
        created_date: order.created_date,
        last_modified_date: order.last_modified_date,
        beer_order_lines: order.lines.into_iter().map(beer_order_line_to_dto).collect(),
    }
}

pub fn create_request_to_new_beer_order(
    request: CreateBeerOrderRequest,
) -> Result<NewBeerOrder, DomainError> {
    if request.lines.is_empty() {
        return Err(DomainError::InvalidArgument(
            "an order needs at least one line".to_string(),
        ));
    }
    if let Some(line) = request.lines.iter().find(|l| l.order_quantity < 1) {
        return Err(DomainError::InvalidArgument(format!(
            "orderQuantity for beer {} must be at least 1",
            line.beer_id
        )));
    }
    if let Some(customer_ref) = &request.customer_ref {
        if customer_ref.chars().count() > MAX_CUSTOMER_REF_LEN {
            return Err(DomainError::InvalidArgument(format!(
                "customerRef must be at most {} characters",
                MAX_CUSTOMER_REF_LEN
            )));
        }
    }
    Ok(NewBeerOrder {
        customer_id: request.customer_id,
        customer_ref: request.customer_ref.filter(|r| !r.trim().is_empty()),
        lines: request
            .lines
            .into_iter()
            .map(|l| NewBeerOrderLine {
                beer_id: l.beer_id,
                order_quantity: l.order_quantity,
            })
            .collect(),
    })
}
