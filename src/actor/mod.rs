//! Background threads feeding the main loop.
//!
//! ```text
//! ┌──────────────┐     InputEvent      ┌──────────────┐
//! │ EventReader  │ ─────────────────▶  │              │
//! └──────────────┘                     │  Main Loop   │ ──▶ Renderer
//! ┌──────────────┐        Tick         │              │
//! │   Ticker     │ ─────────────────▶  │              │
//! └──────────────┘                     └──────────────┘
//! ```
//!
//! Both threads talk over crossbeam channels so the main loop can
//! `select!` across them and any data sources of its own.

mod events;
mod messages;
mod ticker;
mod worker;

pub use events::EventReader;
pub use messages::{InputEvent, KeyCode, KeyModifiers, MouseButton, MouseEvent};
pub use ticker::{Tick, Ticker};
