//! Terminal I/O: backends that display cells and the session guard.

mod backend;
mod output;
mod session;

pub use backend::{AnsiBackend, Backend, TestBackend};
pub use output::OutputBuffer;
pub use session::{Terminal, TerminalConfig};
