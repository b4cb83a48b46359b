pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod paths;
pub mod resolver;
pub mod rewrite;
pub mod scanner;
