//! The error type shared by every layer of the engine.

use memfs_api::error::APIError;
use thiserror::Error;

/// Everything that can go wrong inside the engine.
///
/// One enum serves all layers, since every trait of the stack is
/// implemented on the same filesystem type. Structural problems (bad
/// paths, missing or clashing entries), resource exhaustion and host
/// bridge failures each get their own variants so callers can react to
/// them individually; [`status`](FsError::status) renders the classic
/// small-integer code a front-end reports.
///
/// The two name-clash conditions are deliberately separate variants:
/// `LeafExists` (a `mkdir`/`mkfile` target that is already present,
/// code `-1`) and `AlreadyExists` (a `cp` destination that is already
/// present, code `-2`). The same goes for running out of room:
/// `InsufficientSpace` (a `writef`/`import` that does not fit, code `-2`)
/// and `NoSpaceForCopy` (a subtree copy that does not fit, code `-1`).
#[derive(Error, Debug)]
pub enum FsError {
    ///failure in the host bridge while importing or exporting
    #[error("host bridge failure")]
    Host(#[from] APIError),

    ///the path is not a well-formed absolute path
    #[error("invalid path: {0}")]
    InvalidPath(&'static str),

    ///a path component does not exist
    #[error("no such file or directory")]
    NotFound,

    ///creation target already present in its parent directory
    #[error("an entry with this name already exists")]
    LeafExists,

    ///copy destination already present in its parent directory
    #[error("the destination already exists")]
    AlreadyExists,

    ///directory operation applied to a non-directory inode
    #[error("not a directory")]
    NotADirectory,

    ///file operation applied to a non-file inode
    #[error("not a regular file")]
    NotAFile,

    ///the inode table has no free slot left
    #[error("no free inode slots")]
    NoFreeInodes,

    ///the parent directory's direct-block table is full
    #[error("directory has no free entry")]
    DirectoryFull,

    ///a write does not fit in the free data blocks or the direct-block table
    #[error("not enough free data blocks")]
    InsufficientSpace,

    ///a subtree copy would exhaust the free data blocks or inode slots
    #[error("the source tree does not fit in the remaining space")]
    NoSpaceForCopy,

    ///attempt to remove the root directory
    #[error("the root directory cannot be removed")]
    RemoveRoot,

    ///misuse of a low-level primitive, e.g. freeing a block twice
    #[error("invalid operation: {0}")]
    InvalidOp(&'static str),
}

impl FsError {
    /// The small integer code a front-end reports for this failure
    /// (success is rendered as `0` by the caller): `-2` for an existing
    /// `cp` destination and for a `writef`/`import` that runs out of
    /// space, `-1` for every other failure.
    pub fn status(&self) -> i32 {
        match self {
            FsError::AlreadyExists | FsError::InsufficientSpace => -2,
            _ => -1,
        }
    }
}
