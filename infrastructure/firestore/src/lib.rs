pub mod app;
pub mod client;
pub mod event;
pub mod repository;
pub mod wire;
