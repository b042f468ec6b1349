// Library root for the travelcast command: argument parsing, subcommand
// orchestration and output formatting. `main.rs` only wires up logging.

pub mod args;
pub mod commands;
pub mod render;
