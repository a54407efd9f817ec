//! Logging abstractions for runtime-agnostic logging

mod traits;
mod noop;
mod console;

pub use traits::{Logger, SharedLogger};
pub use noop::{MemoryLogger, NoOpLogger};
pub use console::{ConsoleLogger, LogLevel};
