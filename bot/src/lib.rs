pub mod config;
pub mod events;
pub mod messages;
pub mod scheduler;
pub mod store;
