pub mod bank;
pub mod forecast;
pub mod price;
