// src/lib.rs

//! Pool-villa booking calendar crawler library.

pub mod config;
pub mod error;
pub mod export;
pub mod extract;
pub mod filter;
pub mod models;
pub mod normalize;
pub mod pipeline;
pub mod render;
