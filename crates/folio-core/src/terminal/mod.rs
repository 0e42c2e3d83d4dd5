//! In-memory command terminal.
//!
//! A fixed vocabulary of commands is interpreted against static profile
//! content. Results go into an append-only log with shell-like history
//! recall. Entry point: [`emulator::TerminalEmulator`].

pub mod command;
pub mod emulator;
pub mod history;
pub mod output;

pub use command::Command;
pub use emulator::TerminalEmulator;
pub use history::HistoryCursor;
