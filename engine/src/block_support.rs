//! Block layer of the engine
//!
//! Defines the filesystem aggregate, [`MemFileSystem`], and implements the
//! [`FileSysSupport`] and [`BlockSupport`] traits on it: creating a fresh
//! filesystem and moving data blocks between the free and allocated
//! states.
//!
//! [`FileSysSupport`]: ../../memfs_api/fs/trait.FileSysSupport.html
//! [`BlockSupport`]: ../../memfs_api/fs/trait.BlockSupport.html

use memfs_api::fs::{BlockSupport, FileSysSupport};
use memfs_api::types::{
    DataBlock, FType, Inode, SuperBlock, BLOCK_SIZE, FREE_SLOT, NUM_BLOCKS, NUM_INODES,
};

use crate::error_fs::FsError;

/// The filesystem type of this crate, under the name the shared test files
/// expect.
pub type FSName = MemFileSystem;

/// The complete in-memory filesystem: superblock, free list, inode table
/// and data-block arena, all owned by value.
///
/// The struct exposes its fields so that tests (and a front-end `stat`-like
/// debugging view) can inspect raw state; mutation goes through the layer
/// traits, which keep the superblock counter, the free list and the
/// per-block back-references consistent with each other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemFileSystem {
    /// Filesystem-global metadata, i.e. the free-block counter
    pub super_block: SuperBlock,
    /// Per-block free map; `1` marks a free block, `0` an allocated one
    pub free_list: [u8; NUM_BLOCKS],
    /// The inode table; slot 0 is the root directory
    pub inodes: [Inode; NUM_INODES],
    /// The data-block arena
    pub data_blocks: [DataBlock; NUM_BLOCKS],
}

impl FileSysSupport for MemFileSystem {
    type Error = FsError;

    fn mkfs() -> Self {
        let mut inodes: [Inode; NUM_INODES] = std::array::from_fn(|_| Inode::default());

        //Inode 0 is the root directory. It parents itself, so walking up
        //the tree terminates without a special case.
        inodes[0].n_type = FType::TDir;
        inodes[0].parent = 0;
        inodes[0].set_name("/");

        MemFileSystem {
            super_block: SuperBlock {
                free_blocks: NUM_BLOCKS,
            },
            free_list: [1; NUM_BLOCKS],
            inodes,
            data_blocks: std::array::from_fn(|_| DataBlock::default()),
        }
    }
}

impl BlockSupport for MemFileSystem {
    fn b_alloc(&mut self) -> Result<usize, FsError> {
        let i = self
            .free_list
            .iter()
            .position(|&f| f == 1)
            .ok_or(FsError::InsufficientSpace)?;

        self.free_list[i] = 0;
        let db = &mut self.data_blocks[i];
        db.block = [0; BLOCK_SIZE];
        db.size = 0;
        self.super_block.free_blocks -= 1;
        Ok(i)
    }

    fn b_free(&mut self, i: usize) -> Result<(), FsError> {
        if i >= NUM_BLOCKS {
            return Err(FsError::InvalidOp("block index out of range"));
        }
        if self.free_list[i] == 1 {
            return Err(FsError::InvalidOp("block is already free"));
        }

        let db = &mut self.data_blocks[i];
        db.block = [0; BLOCK_SIZE];
        db.size = 0;
        db.parent_inode = FREE_SLOT;
        db.parent_block_num = FREE_SLOT;
        self.free_list[i] = 1;
        self.super_block.free_blocks += 1;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../api/fs-tests/block_test.rs"]
mod tests;
