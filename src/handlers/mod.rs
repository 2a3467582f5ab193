pub mod beers;
pub mod customers;
pub mod orders;

use actix_web::web;
use utoipa::OpenApi;

use crate::domain::beer::BeerStyle;
use crate::domain::ports::{BeerOrderRepository, BeerRepository, CustomerRepository};
use crate::models::beer::BeerDto;
use crate::models::order::{
    BeerOrderDto, BeerOrderLineDto, CreateBeerOrderLineRequest, CreateBeerOrderRequest,
    CustomerDto,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        beers::list_beers,
        beers::get_beer,
        beers::create_beer,
        beers::update_beer,
        beers::patch_beer,
        beers::delete_beer,
        customers::create_customer,
        customers::list_customers,
        customers::get_customer,
        customers::list_customer_orders,
        orders::create_order,
        orders::get_order,
    ),
    components(schemas(
        BeerDto,
        BeerStyle,
        CustomerDto,
        BeerOrderDto,
        BeerOrderLineDto,
        CreateBeerOrderRequest,
        CreateBeerOrderLineRequest,
    )),
    tags(
        (name = "beers", description = "Beer catalog"),
        (name = "customers", description = "Customers and their orders"),
        (name = "orders", description = "Beer orders"),
    )
)]
pub struct ApiDoc;

/// Register every route. Services are expected as `web::Data` app data.
pub fn configure<R, C, O>(cfg: &mut web::ServiceConfig)
where
    R: BeerRepository,
    C: CustomerRepository,
    O: BeerOrderRepository,
{
    cfg.service(
        web::scope(beers::BEER_PATH)
            .route("", web::get().to(beers::list_beers::<R>))
            .route("", web::post().to(beers::create_beer::<R>))
            .route("/{beer_id}", web::get().to(beers::get_beer::<R>))
            .route("/{beer_id}", web::put().to(beers::update_beer::<R>))
            .route("/{beer_id}", web::patch().to(beers::patch_beer::<R>))
            .route("/{beer_id}", web::delete().to(beers::delete_beer::<R>)),
    )
    .service(
        web::scope(customers::CUSTOMER_PATH)
            .route("", web::get().to(customers::list_customers::<C>))
            .route("", web::post().to(customers::create_customer::<C>))
            .route("/{customer_id}", web::get().to(customers::get_customer::<C>))
            .route(
                "/{customer_id}/orders",
                web::get().to(customers::list_customer_orders::<O, C>),
            ),
    )
    .service(
        web::scope(orders::BEER_ORDER_PATH)
            .route("", web::post().to(orders::create_order::<O, C>))
            .route("/{beer_order_id}", web::get().to(orders::get_order::<O, C>)),
    );
}
