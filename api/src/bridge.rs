//! Host bridge: the two primitives the engine uses to exchange file
//! contents with the surrounding operating system.
//!
//! `import` reads a host file fully into memory before any filesystem state
//! is touched, and `export` writes an assembled byte buffer out in one go.
//! Keeping both sides whole-buffer means the engine never holds a partially
//! transferred file: a bridge failure surfaces before the engine mutates
//! anything (import) or after it is done reading (export).
//!
//! Both primitives are allowed to fail; a missing or unreadable host file
//! and a failed or short write (for instance on a full device) are reported
//! as [`APIError`] values that the engine maps to its own error type.

use super::error;
use std::fs::OpenOptions;
use std::io::{Read, Write};
use std::path::Path;

/// Read the host file at `path` fully into a byte buffer.
/// Fails if the file does not exist or cannot be read.
pub fn read_host<P: AsRef<Path>>(path: P) -> error::Result<Vec<u8>> {
    let mut f = OpenOptions::new().read(true).open(path)?;
    let mut data = Vec::new();
    f.read_to_end(&mut data)?;
    Ok(data)
}

/// Write `data` to the host file at `path`, creating or truncating it.
/// Fails if the file cannot be created, or if the write or the final flush
/// fails; a host-side out-of-space condition shows up here.
pub fn write_host<P: AsRef<Path>>(path: P, data: &[u8]) -> error::Result<()> {
    let mut f = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?;
    f.write_all(data)?;
    f.flush()?;
    Ok(())
}
