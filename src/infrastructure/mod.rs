//! Infrastructure layer: console I/O implementations
//!
//! This layer implements the I/O boundary trait the printer writes through.

pub mod traits;

pub use traits::{Console, MemoryConsole, StdConsole, Stream};
