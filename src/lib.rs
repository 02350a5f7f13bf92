pub mod config;
pub mod deck;
pub mod pipeline;
pub mod session;
