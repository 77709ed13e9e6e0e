//! API request handlers

pub mod containers;
pub mod files;
pub mod health;
