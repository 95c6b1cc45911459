pub mod ai_provider;
pub mod analyzer;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod scanner;
pub mod session;
pub mod upload;
pub mod voice;
