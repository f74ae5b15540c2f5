// src/lib.rs
// DOCUMENTATION: Library root shared by the server and the terminal client
// PURPOSE: Restaurant search and photo proxy in front of the Google Places API

pub mod config;
pub mod display;
pub mod errors;
pub mod gateway;
pub mod handlers;
pub mod models;
pub mod services;
