//! Instruction model of the stack machine targeted by the Jack compiler.
//!
//! The text form produced by [`Command`]'s `Display` is the interchange format
//! read by the downstream translator.

mod command;
mod error;
mod segment;

pub use command::{render, Command};
pub use error::Error;
pub use segment::{ArithOp, Segment};
