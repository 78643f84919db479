pub mod couriers;
pub mod reports;
pub mod sales;
pub mod sizes;
