pub mod database;
pub mod error;
pub mod models;
pub mod notifications;
pub mod services;
pub mod web;
