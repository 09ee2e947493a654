pub mod config;
pub mod controllers;
pub mod errors;
pub mod markdown;
pub mod models;
pub mod services;
