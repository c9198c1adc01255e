// Command-line interface layer
pub mod commands;

pub use commands::CliHandler;
