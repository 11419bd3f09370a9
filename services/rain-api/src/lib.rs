//! Raincell Map API Service Library
//!
//! This crate provides the HTTP server that serves a map visualization of
//! rainfall observations read from NetCDF files.

pub mod handlers;
pub mod state;
