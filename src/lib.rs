pub mod assistant;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod matcher;
pub mod model;
pub mod normalizer;
pub mod parser;
pub mod requests;
pub mod session;
pub mod storage;
pub mod utils;
