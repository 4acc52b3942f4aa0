//! Core types shared across the bridge.

pub mod completion;
pub mod message;

pub use completion::*;
pub use message::*;
