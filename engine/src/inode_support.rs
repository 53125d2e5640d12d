//! Inode layer of the engine
//!
//! Implements the [`InodeSupport`] trait: claiming and releasing slots in
//! the inode table. Allocation scans from index 1 upward, so freshly
//! created entities get the lowest free inode number and the numbering of
//! a build-up sequence is deterministic.
//!
//! [`InodeSupport`]: ../../memfs_api/fs/trait.InodeSupport.html

use memfs_api::fs::InodeSupport;
use memfs_api::types::{FType, Inode, DIRECT_BLOCKS, FREE_SLOT, NUM_INODES};

use crate::block_support::MemFileSystem;
use crate::error_fs::FsError;

/// The filesystem type of this crate, under the name the shared test files
/// expect.
pub type FSName = MemFileSystem;

impl InodeSupport for MemFileSystem {
    fn i_alloc(&mut self, ft: FType, name: &str, parent: usize) -> Result<usize, FsError> {
        //Slot 0 is the root and never handed out
        for i in 1..NUM_INODES {
            if self.inodes[i].n_type != FType::TFree {
                continue;
            }
            let ino = &mut self.inodes[i];
            ino.n_type = ft;
            ino.set_name(name);
            ino.size = 0;
            ino.direct_blocks = [FREE_SLOT; DIRECT_BLOCKS];
            ino.parent = parent as i32;
            return Ok(i);
        }
        Err(FsError::NoFreeInodes)
    }

    fn i_free(&mut self, i: usize) -> Result<(), FsError> {
        if i == 0 {
            return Err(FsError::InvalidOp("the root inode is never freed"));
        }
        if i >= NUM_INODES {
            return Err(FsError::InvalidOp("inode index out of range"));
        }
        if self.inodes[i].n_type == FType::TFree {
            return Err(FsError::InvalidOp("inode is already free"));
        }

        //The default inode is exactly the freed state: TFree, cleared
        //name, empty direct-block table, size 0, no parent.
        self.inodes[i] = Inode::default();
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../api/fs-tests/inode_test.rs"]
mod tests;
