pub mod directory;
pub mod order_repository;
