//! Operation surface of the engine
//!
//! Implements the [`OpsSupport`] trait: the path-addressed operations a
//! front-end calls, composed from the lower layers. Every operation
//! resolves and validates first and only then allocates; `cp` additionally
//! sizes up the whole source subtree against the free counters before
//! duplicating anything, so a failing operation never leaves partial state
//! behind.
//!
//! [`OpsSupport`]: ../../memfs_api/fs/trait.OpsSupport.html

use std::path::Path;

use memfs_api::bridge;
use memfs_api::fs::{
    BlockSupport, DirectorySupport, FileSupport, InodeSupport, OpsSupport, PathSupport,
};
use memfs_api::types::{FType, Stat, DIRECT_BLOCKS, FREE_SLOT};

use crate::block_support::MemFileSystem;
use crate::error_fs::FsError;

/// The filesystem type of this crate, under the name the shared test files
/// expect.
pub type FSName = MemFileSystem;

impl MemFileSystem {
    //Shared path of mkdir and mkfile; they differ only in the inode type.
    fn create_node(&mut self, path: &str, ft: FType) -> Result<usize, FsError> {
        let (parent, leaf, slot) = self.resolve_parent(path)?;
        if self.dirlookup(parent, leaf).is_ok() {
            return Err(FsError::LeafExists);
        }
        if slot.is_none() {
            return Err(FsError::DirectoryFull);
        }
        let inum = self.i_alloc(ft, leaf, parent)?;
        self.dirlink(parent, inum)?;
        Ok(inum)
    }

    fn free_inode_slots(&self) -> usize {
        self.inodes[1..]
            .iter()
            .filter(|ino| ino.n_type == FType::TFree)
            .count()
    }

    //Inodes and data blocks a full copy of the subtree rooted at `i` will
    //claim.
    fn subtree_demand(&self, i: usize) -> (usize, usize) {
        match self.inodes[i].n_type {
            FType::TFile => {
                let blocks = self.inodes[i]
                    .direct_blocks
                    .iter()
                    .filter(|&&b| b != FREE_SLOT)
                    .count();
                (1, blocks)
            }
            FType::TDir => {
                let mut nodes = 1;
                let mut blocks = 0;
                for &child in self.inodes[i].direct_blocks.iter() {
                    if child != FREE_SLOT {
                        let (n, b) = self.subtree_demand(child as usize);
                        nodes += n;
                        blocks += b;
                    }
                }
                (nodes, blocks)
            }
            FType::TFree => (0, 0),
        }
    }

    //Duplicate the subtree rooted at `src` under the (already allocated)
    //parent directory `parent`, the copy's root taking the name `name`.
    //The caller has checked the demand against the free counters, so the
    //allocations below cannot fail. Nodes are claimed parent-first, which
    //keeps the inode numbering of a copy deterministic.
    fn copy_tree(&mut self, src: usize, name: &str, parent: usize) -> Result<usize, FsError> {
        let ft = self.inodes[src].n_type;
        let new = self.i_alloc(ft, name, parent)?;
        match ft {
            FType::TFile => {
                for k in 0..DIRECT_BLOCKS {
                    let b = self.inodes[src].direct_blocks[k];
                    if b == FREE_SLOT {
                        continue;
                    }
                    let (buf, sz) = {
                        let sdb = &self.data_blocks[b as usize];
                        (sdb.block, sdb.size)
                    };
                    let nb = self.b_alloc()?;
                    let ndb = &mut self.data_blocks[nb];
                    ndb.block = buf;
                    ndb.size = sz;
                    ndb.parent_inode = new as i32;
                    ndb.parent_block_num = k as i32;
                    self.inodes[new].direct_blocks[k] = nb as i32;
                }
                self.inodes[new].size = self.inodes[src].size;
            }
            FType::TDir => {
                for k in 0..DIRECT_BLOCKS {
                    let child = self.inodes[src].direct_blocks[k];
                    if child == FREE_SLOT {
                        continue;
                    }
                    let child_name = self.inodes[child as usize].name();
                    let copied = self.copy_tree(child as usize, &child_name, new)?;
                    self.dirlink(new, copied)?;
                }
            }
            FType::TFree => return Err(FsError::InvalidOp("cannot copy a free inode")),
        }
        Ok(new)
    }
}

impl OpsSupport for MemFileSystem {
    fn mkdir(&mut self, path: &str) -> Result<usize, FsError> {
        self.create_node(path, FType::TDir)
    }

    fn mkfile(&mut self, path: &str) -> Result<usize, FsError> {
        self.create_node(path, FType::TFile)
    }

    fn writef(&mut self, path: &str, data: &[u8]) -> Result<(), FsError> {
        let i = self.resolve_path(path)?;
        self.f_write(i, data)
    }

    fn rm(&mut self, path: &str) -> Result<(), FsError> {
        let i = self.resolve_path(path)?;
        if i == 0 {
            return Err(FsError::RemoveRoot);
        }

        //Locate the parent's slot before the target disappears
        let parent = self.inodes[i].parent as usize;
        let slot = self.inodes[parent]
            .direct_blocks
            .iter()
            .position(|&e| e == i as i32)
            .ok_or(FsError::InvalidOp("target is not linked into its parent"))?;

        self.f_remove(i)?;
        self.dirunlink(parent, slot)
    }

    fn cp(&mut self, src: &str, dst: &str) -> Result<usize, FsError> {
        let s = self.resolve_path(src)?;
        let (parent, leaf, slot) = self.resolve_parent(dst)?;
        if self.dirlookup(parent, leaf).is_ok() {
            return Err(FsError::AlreadyExists);
        }
        if slot.is_none() {
            return Err(FsError::DirectoryFull);
        }

        //Size up the whole subtree first, so a copy that cannot complete
        //allocates nothing at all.
        let (nodes, blocks) = self.subtree_demand(s);
        if blocks > self.super_block.free_blocks || nodes > self.free_inode_slots() {
            return Err(FsError::NoSpaceForCopy);
        }

        let new = self.copy_tree(s, leaf, parent)?;
        self.dirlink(parent, new)?;
        Ok(new)
    }

    fn import<P: AsRef<Path>>(&mut self, path: &str, host: P) -> Result<(), FsError> {
        let i = self.resolve_path(path)?;
        if self.inodes[i].n_type != FType::TFile {
            return Err(FsError::NotAFile);
        }
        let data = bridge::read_host(host)?;
        self.f_write(i, &data)
    }

    fn export<P: AsRef<Path>>(&self, path: &str, host: P) -> Result<(), FsError> {
        let i = self.resolve_path(path)?;
        let data = self.f_read(i)?;
        bridge::write_host(host, &data)?;
        Ok(())
    }

    fn ls(&self, path: &str) -> Result<Vec<String>, FsError> {
        let d = self.resolve_path(path)?;
        if self.inodes[d].n_type != FType::TDir {
            return Err(FsError::NotADirectory);
        }
        Ok(self.inodes[d]
            .direct_blocks
            .iter()
            .filter(|&&e| e != FREE_SLOT)
            .map(|&e| self.inodes[e as usize].name())
            .collect())
    }

    fn stat(&self, path: &str) -> Result<Stat, FsError> {
        let i = self.resolve_path(path)?;
        let ino = &self.inodes[i];
        Ok(Stat {
            inum: i,
            n_type: ino.n_type,
            size: ino.size,
            name: ino.name(),
        })
    }
}

#[cfg(test)]
#[path = "../../api/fs-tests/ops_test.rs"]
mod tests;

#[cfg(test)]
#[path = "../../api/fs-tests/import_export_test.rs"]
mod import_export_tests;
