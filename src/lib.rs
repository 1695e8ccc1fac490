pub mod auth;
pub mod config;
pub mod dto;
pub mod error;
pub mod gateway;
pub mod models;
pub mod realtime;
pub mod response;
pub mod services;
