#![allow(dead_code)]

pub mod config;
pub mod mock_google;
pub mod mock_storage;
pub mod server;
