pub mod app;
pub mod config;
pub mod db;
pub mod export;
pub mod extract;
pub mod services;
pub mod utils;
