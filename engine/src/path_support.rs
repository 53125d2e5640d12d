//! Path layer of the engine
//!
//! Implements the [`PathSupport`] trait: validating absolute paths and
//! walking them through the directory tree, either all the way to an
//! existing inode or up to the parent of a yet-to-be-created leaf.
//!
//! [`PathSupport`]: ../../memfs_api/fs/trait.PathSupport.html

use memfs_api::fs::{DirectorySupport, PathSupport};
use memfs_api::types::{FType, FREE_SLOT, NAME_LEN};

use crate::block_support::MemFileSystem;
use crate::error_fs::FsError;

/// The filesystem type of this crate, under the name the shared test files
/// expect.
pub type FSName = MemFileSystem;

//A single path component. `.` and `..` are not resolved by this engine
//and are rejected as names.
fn valid_component(comp: &str) -> bool {
    !comp.is_empty()
        && comp != "."
        && comp != ".."
        && !comp.contains('\0')
        && comp.len() <= NAME_LEN - 1
}

impl PathSupport for MemFileSystem {
    fn valid_path(path: &str) -> bool {
        if path == "/" {
            return true;
        }
        match path.strip_prefix('/') {
            None => false,
            Some(rest) => !rest.ends_with('/') && rest.split('/').all(valid_component),
        }
    }

    fn resolve_path(&self, path: &str) -> Result<usize, FsError> {
        if !Self::valid_path(path) {
            return Err(FsError::InvalidPath("not a well-formed absolute path"));
        }
        if path == "/" {
            return Ok(0);
        }

        let mut cur = 0;
        for comp in path[1..].split('/') {
            //dirlookup rejects a non-directory midway through the walk
            cur = self.dirlookup(cur, comp)?;
        }
        Ok(cur)
    }

    fn resolve_parent<'p>(
        &self,
        path: &'p str,
    ) -> Result<(usize, &'p str, Option<usize>), FsError> {
        if !Self::valid_path(path) {
            return Err(FsError::InvalidPath("not a well-formed absolute path"));
        }
        if path == "/" {
            return Err(FsError::InvalidPath("the root has no parent directory"));
        }

        //The path is known to start with '/', so the split always succeeds
        let cut = path.rfind('/').unwrap();
        let (prefix, leaf) = (&path[..cut], &path[cut + 1..]);

        let parent = if prefix.is_empty() {
            0
        } else {
            self.resolve_path(prefix)?
        };
        if self.inodes[parent].n_type != FType::TDir {
            return Err(FsError::NotADirectory);
        }

        let slot = self.inodes[parent]
            .direct_blocks
            .iter()
            .position(|&e| e == FREE_SLOT);
        Ok((parent, leaf, slot))
    }
}

#[cfg(test)]
#[path = "../../api/fs-tests/path_test.rs"]
mod tests;
