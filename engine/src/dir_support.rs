//! Directory layer of the engine
//!
//! Implements the [`DirectorySupport`] trait: a directory inode's
//! direct-block table holds child inode indices, and this layer links,
//! unlinks and looks up those children. The directory's `size` field
//! tracks the number of linked children.
//!
//! [`DirectorySupport`]: ../../memfs_api/fs/trait.DirectorySupport.html

use memfs_api::fs::DirectorySupport;
use memfs_api::types::{FType, DIRECT_BLOCKS, FREE_SLOT, NUM_INODES};

use crate::block_support::MemFileSystem;
use crate::error_fs::FsError;

/// The filesystem type of this crate, under the name the shared test files
/// expect.
pub type FSName = MemFileSystem;

impl MemFileSystem {
    fn dir_checked(&self, dir: usize) -> Result<(), FsError> {
        if dir >= NUM_INODES {
            return Err(FsError::InvalidOp("inode index out of range"));
        }
        if self.inodes[dir].n_type != FType::TDir {
            return Err(FsError::NotADirectory);
        }
        Ok(())
    }
}

impl DirectorySupport for MemFileSystem {
    fn dirlookup(&self, dir: usize, name: &str) -> Result<usize, FsError> {
        self.dir_checked(dir)?;
        for &child in self.inodes[dir].direct_blocks.iter() {
            if child == FREE_SLOT {
                continue;
            }
            if self.inodes[child as usize].name_is(name) {
                return Ok(child as usize);
            }
        }
        Err(FsError::NotFound)
    }

    fn dirlink(&mut self, dir: usize, child: usize) -> Result<usize, FsError> {
        self.dir_checked(dir)?;
        if child >= NUM_INODES {
            return Err(FsError::InvalidOp("inode index out of range"));
        }
        let d = &mut self.inodes[dir];
        let slot = d
            .direct_blocks
            .iter()
            .position(|&e| e == FREE_SLOT)
            .ok_or(FsError::DirectoryFull)?;
        d.direct_blocks[slot] = child as i32;
        d.size += 1;
        Ok(slot)
    }

    fn dirunlink(&mut self, dir: usize, slot: usize) -> Result<(), FsError> {
        self.dir_checked(dir)?;
        if slot >= DIRECT_BLOCKS {
            return Err(FsError::InvalidOp("directory slot out of range"));
        }
        let d = &mut self.inodes[dir];
        if d.direct_blocks[slot] == FREE_SLOT {
            return Err(FsError::InvalidOp("directory slot is already empty"));
        }
        d.direct_blocks[slot] = FREE_SLOT;
        d.size -= 1;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../api/fs-tests/dir_test.rs"]
mod tests;
