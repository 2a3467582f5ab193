use actix_web::http::header;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;

use crate::application::beer_order_service::BeerOrderService;
use crate::application::customer_service::CustomerService;
use crate::domain::page::Page;
use crate::domain::ports::{BeerOrderRepository, CustomerRepository};
use crate::errors::AppError;
use crate::models::order::{BeerOrderDto, CustomerDto};

pub const CUSTOMER_PATH: &str = "/api/v1/customer";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageParams {
    pub page_number: Option<i64>,
    pub page_size: Option<i64>,
}

/// POST /api/v1/customer
#[utoipa::path(
    post,
    path = "/api/v1/customer",
    request_body = CustomerDto,
    responses(
        (status = 201, description = "Customer created", body = CustomerDto),
        (status = 400, description = "Blank or overlong name"),
    ),
    tag = "customers"
)]
pub async fn create_customer<C: CustomerRepository>(
    service: web::Data<CustomerService<C>>,
    body: web::Json<CustomerDto>,
) -> Result<HttpResponse, AppError> {
    let dto = body.into_inner();

    let saved = web::block(move || service.create_customer(dto))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    let mut response = HttpResponse::Created();
    if let Some(id) = saved.id {
        response.insert_header((header::LOCATION, format!("{}/{}", CUSTOMER_PATH, id)));
    }
    Ok(response.json(saved))
}

/// GET /api/v1/customer
#[utoipa::path(
    get,
    path = "/api/v1/customer",
    params(
        ("pageNumber" = Option<i64>, Query, description = "Page number (1-based, default 1)"),
        ("pageSize" = Option<i64>, Query, description = "Items per page (default 25, max 1000)"),
    ),
    responses((status = 200, description = "Page of customers", body = Page<CustomerDto>)),
    tag = "customers"
)]
pub async fn list_customers<C: CustomerRepository>(
    service: web::Data<CustomerService<C>>,
    query: web::Query<PageParams>,
) -> Result<HttpResponse, AppError> {
    let params = query.into_inner();

    let page = web::block(move || service.list_customers(params.page_number, params.page_size))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(page))
}

/// GET /api/v1/customer/{customer_id}
#[utoipa::path(
    get,
    path = "/api/v1/customer/{customer_id}",
    params(("customer_id" = Uuid, Path, description = "Customer UUID")),
    responses(
        (status = 200, description = "Customer found", body = CustomerDto),
        (status = 404, description = "Customer not found"),
    ),
    tag = "customers"
)]
pub async fn get_customer<C: CustomerRepository>(
    service: web::Data<CustomerService<C>>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let customer_id = path.into_inner();

    let customer = web::block(move || service.get_customer_by_id(customer_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    customer
        .map(|c| HttpResponse::Ok().json(c))
        .ok_or(AppError::NotFound)
}

/// GET /api/v1/customer/{customer_id}/orders
#[utoipa::path(
    get,
    path = "/api/v1/customer/{customer_id}/orders",
    params(
        ("customer_id" = Uuid, Path, description = "Customer UUID"),
        ("pageNumber" = Option<i64>, Query, description = "Page number (1-based, default 1)"),
        ("pageSize" = Option<i64>, Query, description = "Items per page (default 25, max 1000)"),
    ),
    responses(
        (status = 200, description = "Page of the customer's orders", body = Page<BeerOrderDto>),
        (status = 404, description = "Customer not found"),
    ),
    tag = "customers"
)]
pub async fn list_customer_orders<O: BeerOrderRepository, C: CustomerRepository>(
    service: web::Data<BeerOrderService<O, C>>,
    path: web::Path<Uuid>,
    query: web::Query<PageParams>,
) -> Result<HttpResponse, AppError> {
    let customer_id = path.into_inner();
    let params = query.into_inner();

    let page = web::block(move || {
        service.list_orders_for_customer(customer_id, params.page_number, params.page_size)
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    page.map(|p| HttpResponse::Ok().json(p))
        .ok_or(AppError::NotFound)
}
