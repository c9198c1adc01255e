// Packsmith - build plan resolver for web asset pipelines
// Entry point with clean separation of concerns

mod cli;
mod core;
mod utils;

use cli::CliHandler;

fn main() {
    let handler = CliHandler::new();

    if let Err(e) = handler.run() {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}
