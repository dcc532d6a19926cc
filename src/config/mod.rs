/// Database configuration and connection management
pub mod database;

/// Budget, income, and bill configuration loading from config.toml
pub mod settings;
