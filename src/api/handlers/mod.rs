pub mod admin;
pub mod booking;
pub mod cashier;
pub mod facility;
pub mod health;
pub mod payment;
