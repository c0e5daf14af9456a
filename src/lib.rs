// src/lib.rs

//! godocs: Go package documentation scraper

pub mod error;
pub mod models;
pub mod parsers;
pub mod render;
pub mod services;
pub mod utils;
