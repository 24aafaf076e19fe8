pub mod config;
pub mod logging;
pub mod parser;
pub mod project;
pub mod sdk;
pub mod version;
