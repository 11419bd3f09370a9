//! HTTP request handlers for the raincell map API.

pub mod health;
pub mod pages;
pub mod raincells;
