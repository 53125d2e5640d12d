//! Shared contract of the in-memory filesystem
//!
//! This crate contains the data model of the filesystem (the superblock, the
//! inode table, the data-block arena and the free list), the traits the
//! engine crate implements layer by layer, and the host bridge that
//! `import`/`export` use to exchange bytes with the surrounding operating
//! system.
//!
//! Placing the modules here ensures that Cargo notices them as part of the build process.

#![deny(missing_docs)]

//The host bridge, the only place where the engine touches the outside world
pub mod bridge;
pub mod error;

//Basic modules for types
pub mod types;

//Traits the engine implements
pub mod fs;
