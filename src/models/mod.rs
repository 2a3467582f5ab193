pub mod beer;
pub mod order;
