//! The in-memory filesystem engine
//!
//! This crate implements the traits of the `memfs_api` crate on a single
//! filesystem type, [`MemFileSystem`](block_support::MemFileSystem), built
//! up layer by layer:
//!
//! 1. [`block_support`] — the filesystem aggregate itself plus the data
//!    block allocator and deallocator.
//! 2. [`inode_support`] — claiming and releasing inode slots.
//! 3. [`dir_support`] — linking, unlinking and looking up directory
//!    children.
//! 4. [`path_support`] — absolute path validation and resolution.
//! 5. [`file_support`] — reading, writing and recursively releasing file
//!    contents.
//! 6. [`ops_support`] — the path-addressed operation surface consumed by a
//!    front-end: `mkdir`, `mkfile`, `writef`, `rm`, `cp`, `import`,
//!    `export`, `ls` and `stat`.
//!
//! Each module pulls its integration tests in from the shared
//! `api/fs-tests` directory, so the tests sit next to the contracts they
//! exercise.

#![deny(missing_docs)]

pub mod block_support;
pub mod dir_support;
pub mod error_fs;
pub mod file_support;
pub mod inode_support;
pub mod ops_support;
pub mod path_support;
