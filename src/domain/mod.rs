pub mod discount;
pub mod errors;
pub mod invoice;
pub mod ports;
pub mod supplier;
