//! Request handlers

pub mod health;
pub mod analysis;
pub mod honeypot;
pub mod alerts;
pub mod stats;
pub mod feed;
