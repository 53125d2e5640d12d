//! Collection of the traits the engine implements, one per abstraction
//! layer of the filesystem.
//!
//! The layers build on each other: blocks, then inodes, then directories,
//! then paths and file contents, and finally the operation surface the
//! front-end consumes. Each trait lists the lower layers it relies on as
//! supertraits, so a type implementing [`OpsSupport`] provides the whole
//! stack. The engine implements all of them on a single filesystem type;
//! the split into traits keeps every layer's contract small and separately
//! testable.
//!
//! Two ordering rules run through all of the contracts below and are relied
//! on by the tests: free slots are always claimed in lowest-index-first
//! scan order (for data blocks and for inodes alike), and every mutating
//! operation either completes or leaves the filesystem exactly as it found
//! it.

use super::types::{FType, Stat};
use std::{error, path::Path};

/// Base trait for the filesystem stack.
///
/// Defines the error type shared by every layer and the constructor that
/// produces a pristine filesystem value.
pub trait FileSysSupport: Sized {
    /// The error type of the implementation, used by all layer traits.
    ///
    /// Note the "supertrait" the error type must implement:
    /// [`error::Error`](https://doc.rust-lang.org/std/error/trait.Error.html),
    /// the base trait for all Rust errors.
    type Error: error::Error;

    /// Create a fresh filesystem: every data block free and zeroed, every
    /// inode slot free except inode 0, which is initialized as the root
    /// directory with its parent field pointing back to itself.
    ///
    /// *EXTRA*: mkfs is inspired by the unix command of the same name,
    /// although this filesystem only ever lives in memory.
    fn mkfs() -> Self;
}

/// This trait adds block-level operations to the filesystem: claiming and
/// releasing data blocks while keeping the free list and the superblock
/// counter in lockstep.
pub trait BlockSupport: FileSysSupport {
    /// Allocate the first free data block, scanning the free list from
    /// index 0. The block's buffer is zeroed, its valid-byte count reset,
    /// the free-list entry cleared and the superblock counter decremented.
    /// Returns the index of the claimed block.
    ///
    /// Assigning the block's parent back-references is the caller's job;
    /// the allocator hands out an owned but unattached block.
    ///
    /// Errors when no free block is left.
    fn b_alloc(&mut self) -> Result<usize, Self::Error>;

    /// Release the data block with index `i`: zero the buffer, reset the
    /// valid-byte count and the parent back-references, mark the free-list
    /// entry free and increment the superblock counter.
    ///
    /// Freeing a block that is already free, or passing an out-of-range
    /// index, is an error and leaves the state unchanged.
    fn b_free(&mut self, i: usize) -> Result<(), Self::Error>;
}

/// This trait adds the abstraction of inodes to the filesystem.
pub trait InodeSupport: BlockSupport {
    /// Claim the first free inode slot, scanning from index 1 (inode 0 is
    /// the root and is never handed out). The slot is initialized with the
    /// given type, `name` (truncated to the name capacity) and `parent`;
    /// its direct-block table is reset to empty and its size to 0.
    /// Returns the index of the claimed inode.
    ///
    /// Errors when the inode table is full.
    fn i_alloc(&mut self, ft: FType, name: &str, parent: usize) -> Result<usize, Self::Error>;

    /// Release inode `i`, resetting the slot to the free state: type
    /// `TFree`, cleared name, empty direct-block table, size 0, no parent.
    ///
    /// This is a table operation only; it does not release data blocks or
    /// children. Callers orchestrate recursive teardown through
    /// [`FileSupport::f_remove`]. Freeing inode 0, an out-of-range index
    /// or an already-free slot is an error.
    fn i_free(&mut self, i: usize) -> Result<(), Self::Error>;
}

/// This trait adds directory semantics on top of inodes: a directory inode
/// reinterprets its direct-block table as a list of child inode indices.
pub trait DirectorySupport: InodeSupport {
    /// Look for a child named `name` in the directory inode `dir`.
    /// Walks the direct-block table in slot order and compares each child
    /// inode's name byte for byte. Returns the child's inode index.
    ///
    /// Errors if `dir` is not a directory, or if no child matches.
    fn dirlookup(&self, dir: usize, name: &str) -> Result<usize, Self::Error>;

    /// Link inode `child` into directory `dir`, writing its index into the
    /// first free entry of the direct-block table. Returns the slot used.
    ///
    /// Errors if `dir` is not a directory or its table is full. The child
    /// inode itself is not modified; its `parent` field is set at
    /// allocation time.
    fn dirlink(&mut self, dir: usize, child: usize) -> Result<usize, Self::Error>;

    /// Clear entry `slot` of directory `dir`, detaching whatever child was
    /// linked there. Does not free the child inode; the caller
    /// orchestrates.
    ///
    /// Errors if `dir` is not a directory, `slot` is out of range, or the
    /// entry is already empty.
    fn dirunlink(&mut self, dir: usize, slot: usize) -> Result<(), Self::Error>;
}

/// This trait adds a notion of file paths and resolution through the
/// directory tree.
///
/// Paths are absolute: they start with `/` and consist of `/`-separated
/// name components. The empty path, empty components, a trailing `/` (the
/// root path `/` itself being the one exception), the special names `.`
/// and `..`, and components longer than the name capacity are all invalid.
pub trait PathSupport: DirectorySupport {
    /// Returns true iff the given string is a well-formed absolute path.
    fn valid_path(path: &str) -> bool;

    /// Resolve `path` to the index of an existing inode, walking the tree
    /// from the root. The path `/` resolves to inode 0.
    ///
    /// Errors if the path is invalid, if any component does not exist, or
    /// if a non-final component refers to something that is not a
    /// directory.
    fn resolve_path(&self, path: &str) -> Result<usize, Self::Error>;

    /// Split `path` into an existing parent directory and the final name
    /// component, for creation operations. Returns the parent's inode
    /// index, the leaf name, and the first free slot of the parent's
    /// direct-block table (`None` when the parent is full). The leaf
    /// itself may or may not exist; the caller decides what that means.
    ///
    /// Errors if the path is invalid or `/`, if the prefix does not
    /// resolve, or if it resolves to something that is not a directory.
    fn resolve_parent<'p>(
        &self,
        path: &'p str,
    ) -> Result<(usize, &'p str, Option<usize>), Self::Error>;
}

/// This trait adds reading and writing of file contents, and recursive
/// teardown of whole subtrees.
pub trait FileSupport: InodeSupport {
    /// Assemble the logical byte stream of file inode `i`: the
    /// concatenation, in direct-block-table order, of the first `size`
    /// valid bytes of each referenced data block. Empty table entries are
    /// skipped, so a table with gaps still reads cleanly.
    ///
    /// Errors if `i` is not a regular file.
    fn f_read(&self, i: usize) -> Result<Vec<u8>, Self::Error>;

    /// Replace the contents of file inode `i` with `data`.
    ///
    /// The write is all-or-nothing: it first checks that the data fits in
    /// the direct-block table and in the blocks that are currently free or
    /// about to be released by the truncation, and errors without touching
    /// anything if not. It then releases the file's current blocks and
    /// writes `data` chunk by chunk, claiming blocks in allocation-scan
    /// order and setting each block's valid-byte count and back-references
    /// and finally the inode's total size.
    ///
    /// Errors if `i` is not a regular file, or on insufficient space.
    fn f_write(&mut self, i: usize, data: &[u8]) -> Result<(), Self::Error>;

    /// Release inode `i` and everything it owns. For a file: free every
    /// referenced data block, then the inode. For a directory: recurse
    /// into every linked child, then free the inode itself.
    ///
    /// The caller detaches `i` from its parent directory; this function
    /// only releases storage. Removing the root (inode 0) is an error.
    fn f_remove(&mut self, i: usize) -> Result<(), Self::Error>;
}

/// The operation surface consumed by the front-end: path-addressed
/// mutations plus the read-only helpers `ls` and `stat`.
///
/// Every operation validates before it allocates and never leaves a
/// partial mutation behind: a failing call returns with the filesystem in
/// the exact state it was in at entry. The front-end renders the error
/// values as small integer codes (`0` success; `-2` for an existing `cp`
/// destination and for out-of-space during `writef`/`import`; `-1` for
/// every other failure); the engine itself reports typed errors.
pub trait OpsSupport: PathSupport + FileSupport {
    /// Create a directory at `path`. The parent must exist, the leaf must
    /// not. Returns the new inode's index.
    ///
    /// Errors: invalid path, missing parent, existing leaf, full parent
    /// directory, or no free inode slot.
    fn mkdir(&mut self, path: &str) -> Result<usize, Self::Error>;

    /// Create an empty regular file at `path`. Same contract as [`mkdir`]
    /// apart from the inode type.
    ///
    /// [`mkdir`]: Self::mkdir
    fn mkfile(&mut self, path: &str) -> Result<usize, Self::Error>;

    /// Replace the contents of the file at `path` with `data`, with the
    /// all-or-nothing semantics of [`FileSupport::f_write`].
    ///
    /// Errors: path does not resolve or does not name a regular file;
    /// insufficient space.
    fn writef(&mut self, path: &str, data: &[u8]) -> Result<(), Self::Error>;

    /// Remove the entity at `path`: release its storage (recursively for
    /// directories) and detach it from its parent directory.
    ///
    /// Errors: path does not resolve, or names the root.
    fn rm(&mut self, path: &str) -> Result<(), Self::Error>;

    /// Duplicate the entity at `src` as `dst`: a deep copy of the whole
    /// subtree, block contents included. The destination must not exist
    /// yet. Space for the entire copy (data blocks and inode slots) is
    /// checked up front, so a failing `cp` has allocated nothing. Returns
    /// the inode index of the copy's root.
    ///
    /// Errors: missing source, invalid or unresolvable destination path,
    /// existing destination, full destination parent, or insufficient
    /// space for the subtree.
    fn cp(&mut self, src: &str, dst: &str) -> Result<usize, Self::Error>;

    /// Read the host file at `host` through the bridge and write its bytes
    /// to the internal file at `path`, as in [`writef`].
    ///
    /// Errors: invalid or unresolvable internal path, missing or
    /// unreadable host file, insufficient space.
    ///
    /// [`writef`]: Self::writef
    fn import<P: AsRef<Path>>(&mut self, path: &str, host: P) -> Result<(), Self::Error>;

    /// Assemble the bytes of the internal file at `path` and write them to
    /// the host file at `host` through the bridge.
    ///
    /// Errors: internal path does not resolve to a regular file, or the
    /// host write fails (including a full host device).
    fn export<P: AsRef<Path>>(&self, path: &str, host: P) -> Result<(), Self::Error>;

    /// List the names of the children of the directory at `path`, in slot
    /// order.
    ///
    /// Errors: path does not resolve or does not name a directory.
    fn ls(&self, path: &str) -> Result<Vec<String>, Self::Error>;

    /// Return a metadata snapshot of the entity at `path`.
    ///
    /// Errors: path does not resolve.
    fn stat(&self, path: &str) -> Result<Stat, Self::Error>;
}
