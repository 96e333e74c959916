pub mod app;
pub mod config;
pub mod events;
pub mod region;
pub mod sys;
