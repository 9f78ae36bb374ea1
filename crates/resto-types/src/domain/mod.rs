pub mod order;
pub mod principal;
pub mod status;
