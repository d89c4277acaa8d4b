//! Storage layer for gcmcrypt
//!
//! Atomic file writes, input reading, and the key-file format.

pub mod file_io;

pub use file_io::{read_bytes, read_json, read_key_file, read_text, write_atomic, write_key_file};
