pub mod autostart;
mod client;
mod config;
pub mod hints;
mod monitor;
mod rules_engine;
mod state;
mod tag;

pub use autostart::{Autostart, AutostartEntry};
pub use client::*;
pub use config::*;
pub use monitor::*;
pub use rules_engine::*;
pub use state::*;
pub use tag::*;
