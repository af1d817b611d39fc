pub mod commands;
pub mod complete;
pub mod config;
pub mod error;
pub mod history;
pub mod host;
pub mod input;
pub mod logging;
pub mod parser;
pub mod render;
pub mod session;
pub mod terminal;
pub mod vfs;

pub use config::TerminalConfig;
pub use host::Host;
pub use session::{HistoryEntry, Key, ScrollbackKind, TerminalSession};
pub use terminal::Terminal;
