//! HTTP gateway: route guard, session endpoints, backend forwarding.

pub mod app;
pub mod backend;
pub mod config;
pub mod context;
pub mod cookies;
pub mod middleware;
pub mod pages;
