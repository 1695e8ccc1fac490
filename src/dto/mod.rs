pub mod account;
pub mod admin;
pub mod coupons;
pub mod orders;
