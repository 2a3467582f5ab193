use actix_web::http::header;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;

use crate::application::beer_service::{BeerService, ListBeersQuery};
use crate::domain::page::Page;
use crate::domain::ports::BeerRepository;
use crate::errors::AppError;
use crate::models::beer::BeerDto;

pub const BEER_PATH: &str = "/api/v1/beer";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListBeersParams {
    pub beer_name: Option<String>,
    pub beer_style: Option<String>,
    pub show_inventory: Option<bool>,
    pub page_number: Option<i64>,
    pub page_size: Option<i64>,
}

/// GET /api/v1/beer
#[utoipa::path(
    get,
    path = "/api/v1/beer",
    params(
        ("beerName" = Option<String>, Query, description = "Case-insensitive substring of the beer name"),
        ("beerStyle" = Option<String>, Query, description = "Exact style name, e.g. PALE_ALE"),
        ("showInventory" = Option<bool>, Query, description = "false hides quantityOnHand"),
        ("pageNumber" = Option<i64>, Query, description = "Page number (1-based, default 1)"),
        ("pageSize" = Option<i64>, Query, description = "Items per page (default 25, max 1000)"),
    ),
    responses(
        (status = 200, description = "Page of beers", body = Page<BeerDto>),
        (status = 400, description = "Unknown beer style or invalid page size"),
    ),
    tag = "beers"
)]
pub async fn list_beers<R: BeerRepository>(
    service: web::Data<BeerService<R>>,
    query: web::Query<ListBeersParams>,
) -> Result<HttpResponse, AppError> {
    let params = query.into_inner();

    let page = web::block(move || {
        service.list_beers(ListBeersQuery {
            beer_name: params.beer_name.as_deref(),
            beer_style: params.beer_style.as_deref(),
            show_inventory: params.show_inventory,
            page_number: params.page_number,
            page_size: params.page_size,
        })
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(page))
}

/// GET /api/v1/beer/{beer_id}
#[utoipa::path(
    get,
    path = "/api/v1/beer/{beer_id}",
    params(("beer_id" = Uuid, Path, description = "Beer UUID")),
    responses(
        (status = 200, description = "Beer found", body = BeerDto),
        (status = 404, description = "Beer not found"),
    ),
    tag = "beers"
)]
pub async fn get_beer<R: BeerRepository>(
    service: web::Data<BeerService<R>>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let beer_id = path.into_inner();

    let beer = web::block(move || service.get_beer_by_id(beer_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    match beer {
        Some(beer) => Ok(HttpResponse::Ok().json(beer)),
        None => Err(AppError::NotFound),
    }
}

/// POST /api/v1/beer
#[utoipa::path(
    post,
    path = "/api/v1/beer",
    request_body = BeerDto,
    responses(
        (status = 201, description = "Beer created", body = BeerDto),
        (status = 400, description = "Missing or invalid fields"),
    ),
    tag = "beers"
)]
pub async fn create_beer<R: BeerRepository>(
    service: web::Data<BeerService<R>>,
    body: web::Json<BeerDto>,
) -> Result<HttpResponse, AppError> {
    let dto = body.into_inner();

    let saved = web::block(move || service.save_new_beer(dto))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    let mut response = HttpResponse::Created();
    if let Some(id) = saved.id {
        response.insert_header((header::LOCATION, format!("{}/{}", BEER_PATH, id)));
    }
    Ok(response.json(saved))
}

/// PUT /api/v1/beer/{beer_id}
#[utoipa::path(
    put,
    path = "/api/v1/beer/{beer_id}",
    params(("beer_id" = Uuid, Path, description = "Beer UUID")),
    request_body = BeerDto,
    responses(
        (status = 200, description = "Beer replaced", body = BeerDto),
        (status = 400, description = "Missing or invalid fields"),
        (status = 404, description = "Beer not found"),
        (status = 409, description = "Version conflict"),
    ),
    tag = "beers"
)]
pub async fn update_beer<R: BeerRepository>(
    service: web::Data<BeerService<R>>,
    path: web::Path<Uuid>,
    body: web::Json<BeerDto>,
) -> Result<HttpResponse, AppError> {
    let beer_id = path.into_inner();
    let dto = body.into_inner();

    let updated = web::block(move || service.update_beer_by_id(beer_id, dto))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    updated
        .map(|beer| HttpResponse::Ok().json(beer))
        .ok_or(AppError::NotFound)
}

/// PATCH /api/v1/beer/{beer_id}
#[utoipa::path(
    patch,
    path = "/api/v1/beer/{beer_id}",
    params(("beer_id" = Uuid, Path, description = "Beer UUID")),
    request_body = BeerDto,
    responses(
        (status = 200, description = "Beer patched", body = BeerDto),
        (status = 404, description = "Beer not found"),
        (status = 409, description = "Version conflict"),
    ),
    tag = "beers"
)]
pub async fn patch_beer<R: BeerRepository>(
    service: web::Data<BeerService<R>>,
    path: web::Path<Uuid>,
    body: web::Json<BeerDto>,
) -> Result<HttpResponse, AppError> {
    let beer_id = path.into_inner();
    let dto = body.into_inner();

    let patched = web::block(move || service.patch_beer_by_id(beer_id, dto))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    patched
        .map(|beer| HttpResponse::Ok().json(beer))
        .ok_or(AppError::NotFound)
}

/// DELETE /api/v1/beer/{beer_id}
#[utoipa::path(
    delete,
    path = "/api/v1/beer/{beer_id}",
    params(("beer_id" = Uuid, Path, description = "Beer UUID")),
    responses(
        (status = 204, description = "Beer deleted"),
        (status = 404, description = "Beer not found"),
    ),
    tag = "beers"
)]
pub async fn delete_beer<R: BeerRepository>(
    service: web::Data<BeerService<R>>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let beer_id = path.into_inner();

    let deleted = web::block(move || service.delete_by_id(beer_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    if deleted {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Err(AppError::NotFound)
    }
}
