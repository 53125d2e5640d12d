//! File content layer of the engine
//!
//! Implements the [`FileSupport`] trait: assembling a file's logical byte
//! stream from its data blocks, replacing it wholesale, and recursively
//! releasing the storage of a file or a whole directory subtree.
//!
//! Writes are all-or-nothing. Sufficiency of both the direct-block table
//! and the free blocks is established before the first mutation, so a
//! rejected write leaves the filesystem untouched rather than rolled back.
//!
//! [`FileSupport`]: ../../memfs_api/fs/trait.FileSupport.html

use memfs_api::fs::{BlockSupport, FileSupport, InodeSupport};
use memfs_api::types::{FType, BLOCK_SIZE, DIRECT_BLOCKS, FREE_SLOT, NUM_INODES};

use crate::block_support::MemFileSystem;
use crate::error_fs::FsError;

/// The filesystem type of this crate, under the name the shared test files
/// expect.
pub type FSName = MemFileSystem;

impl MemFileSystem {
    fn file_checked(&self, i: usize) -> Result<(), FsError> {
        if i >= NUM_INODES {
            return Err(FsError::InvalidOp("inode index out of range"));
        }
        if self.inodes[i].n_type != FType::TFile {
            return Err(FsError::NotAFile);
        }
        Ok(())
    }

    //Number of data blocks currently referenced by inode `i`.
    fn blocks_held(&self, i: usize) -> usize {
        self.inodes[i]
            .direct_blocks
            .iter()
            .filter(|&&b| b != FREE_SLOT)
            .count()
    }
}

impl FileSupport for MemFileSystem {
    fn f_read(&self, i: usize) -> Result<Vec<u8>, FsError> {
        self.file_checked(i)?;

        let ino = &self.inodes[i];
        let mut out = Vec::with_capacity(ino.size);
        for &b in ino.direct_blocks.iter() {
            if b == FREE_SLOT {
                //Tolerate gaps; a partially cleared table still reads
                continue;
            }
            let db = &self.data_blocks[b as usize];
            out.extend_from_slice(&db.block[..db.size]);
        }
        Ok(out)
    }

    fn f_write(&mut self, i: usize, data: &[u8]) -> Result<(), FsError> {
        self.file_checked(i)?;

        let needed = data.len().div_ceil(BLOCK_SIZE);
        if needed > DIRECT_BLOCKS {
            return Err(FsError::InsufficientSpace);
        }
        //The truncation below returns this file's current blocks to the
        //free pool, so they count towards what the write may use.
        if needed > self.super_block.free_blocks + self.blocks_held(i) {
            return Err(FsError::InsufficientSpace);
        }

        //Truncate: release every block the file holds
        for k in 0..DIRECT_BLOCKS {
            let b = self.inodes[i].direct_blocks[k];
            if b != FREE_SLOT {
                self.b_free(b as usize)?;
                self.inodes[i].direct_blocks[k] = FREE_SLOT;
            }
        }
        self.inodes[i].size = 0;

        //Write chunk by chunk; the pre-checks guarantee allocation succeeds
        for (k, chunk) in data.chunks(BLOCK_SIZE).enumerate() {
            let b = self.b_alloc()?;
            let db = &mut self.data_blocks[b];
            db.block[..chunk.len()].copy_from_slice(chunk);
            db.size = chunk.len();
            db.parent_inode = i as i32;
            db.parent_block_num = k as i32;
            self.inodes[i].direct_blocks[k] = b as i32;
        }
        self.inodes[i].size = data.len();
        Ok(())
    }

    fn f_remove(&mut self, i: usize) -> Result<(), FsError> {
        if i == 0 {
            return Err(FsError::RemoveRoot);
        }
        if i >= NUM_INODES {
            return Err(FsError::InvalidOp("inode index out of range"));
        }

        match self.inodes[i].n_type {
            FType::TFree => Err(FsError::InvalidOp("inode is already free")),
            FType::TFile => {
                for k in 0..DIRECT_BLOCKS {
                    let b = self.inodes[i].direct_blocks[k];
                    if b != FREE_SLOT {
                        self.b_free(b as usize)?;
                        self.inodes[i].direct_blocks[k] = FREE_SLOT;
                    }
                }
                self.i_free(i)
            }
            FType::TDir => {
                for k in 0..DIRECT_BLOCKS {
                    let child = self.inodes[i].direct_blocks[k];
                    if child != FREE_SLOT {
                        self.f_remove(child as usize)?;
                        self.inodes[i].direct_blocks[k] = FREE_SLOT;
                    }
                }
                self.i_free(i)
            }
        }
    }
}

#[cfg(test)]
#[path = "../../api/fs-tests/file_test.rs"]
mod tests;
