// src/lib.rs

//! agora: forum category tree crawler and topic archiver.

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;
