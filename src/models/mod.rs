pub mod client;
pub mod inventory;
pub mod job;
pub mod notification;
pub mod technician;
pub mod van;
