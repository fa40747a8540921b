pub use board::*;
pub use cell::*;
pub use config::*;
pub use error::*;
pub use input::*;
pub use session::*;
pub use types::*;

mod board;
mod cell;
mod config;
mod error;
mod input;
mod session;
mod types;
