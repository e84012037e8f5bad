pub mod config;
pub mod dtos;
pub mod finance;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod numbering;
pub mod progress;
pub mod services;
pub mod startup;
