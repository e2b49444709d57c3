pub mod audit;
pub mod block;
pub mod booking;
pub mod facility;
pub mod inventory;
pub mod rate;
