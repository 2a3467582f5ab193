use actix_web::http::header;
use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::application::beer_order_service::BeerOrderService;
use crate::domain::ports::{BeerOrderRepository, CustomerRepository};
use crate::errors::AppError;
use crate::models::order::{BeerOrderDto, CreateBeerOrderRequest};

pub const BEER_ORDER_PATH: &str = "/api/v1/beerOrder";

/// POST /api/v1/beerOrder
///
/// Creates the order and all of its lines in a single transaction.
#[utoipa::path(
    post,
    path = "/api/v1/beerOrder",
    request_body = CreateBeerOrderRequest,
    responses(
        (status = 201, description = "Order created", body = BeerOrderDto),
        (status = 400, description = "No lines, bad quantity, or unknown customer/beer"),
    ),
    tag = "orders"
)]
pub async fn create_order<O: BeerOrderRepository, C: CustomerRepository>(
    service: web::Data<BeerOrderService<O, C>>,
    body: web::Json<CreateBeerOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let request = body.into_inner();

    let order = web::block(move || service.create_order(request))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("{}/{}", BEER_ORDER_PATH, order.id)))
        .json(order))
}

/// GET /api/v1/beerOrder/{beer_order_id}
///
/// Returns the order together with its lines.
#[utoipa::path(
    get,
    path = "/api/v1/beerOrder/{beer_order_id}",
    params(("beer_order_id" = Uuid, Path, description = "Order UUID")),
    responses(
        (status = 200, description = "Order found", body = BeerOrderDto),
        (status = 404, description = "Order not found"),
    ),
    tag = "orders"
)]
pub async fn get_order<O: BeerOrderRepository, C: CustomerRepository>(
    service: web::Data<BeerOrderService<O, C>>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();

    let order = web::block(move || service.get_order_by_id(order_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    match order {
        Some(order) => Ok(HttpResponse::Ok().json(order)),
        None => Err(AppError::NotFound),
    }
}
