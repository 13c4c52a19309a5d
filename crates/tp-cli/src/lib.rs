//! `tickpack` command implementations, kept out of `main.rs` so they can be
//! driven from tests.

pub mod args;
pub mod commands;

pub use args::{Cli, Command, CompressArgs, DecompressArgs};
