pub mod beer_order_service;
pub mod beer_service;
pub mod customer_service;
