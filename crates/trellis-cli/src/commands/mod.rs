//! Command implementations for the trellis CLI.

pub mod backends;
pub mod build;
pub mod emit;
pub mod init;
pub mod inspect;
