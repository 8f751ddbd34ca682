//! Command implementations that work on the filesystem directly.

pub mod init;
