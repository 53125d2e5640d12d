//! Module containing the types used in this project.
//!
//! The filesystem is a single in-memory aggregate built from the four
//! structures below: a [`SuperBlock`] holding the free-block counter, a
//! free list marking which data blocks are in use, an inode table and a
//! data-block arena. All sizes are fixed at compile time; the constants in
//! this module are the single source of truth for them.
//!
//! Inodes and data blocks refer to each other exclusively through small
//! integer indices into the two arenas, never through owning pointers.
//! Unused index slots hold the sentinel [`FREE_SLOT`].

/// Number of bytes in one data block.
pub const BLOCK_SIZE: usize = 1024;

/// Total number of data blocks in the filesystem.
pub const NUM_BLOCKS: usize = 5;

/// Number of slots in the inode table.
pub const NUM_INODES: usize = 16;

/// Maximum length of a name, including the terminating NUL byte.
/// Names are therefore at most `NAME_LEN - 1` bytes long.
pub const NAME_LEN: usize = 32;

/// Number of entries in an inode's direct-block table.
/// For files these entries are data-block indices, for directories they are
/// child inode indices.
pub const DIRECT_BLOCKS: usize = 12;

/// Sentinel marking an unused entry in a direct-block table, and the reset
/// value of the parent back-references of a free data block.
pub const FREE_SLOT: i32 = -1;

/// Filesystem-global metadata.
///
/// `free_blocks` is the authoritative count of free data blocks. It equals
/// the number of `1` entries in the free list at all times and is updated
/// exclusively by the block allocator and deallocator, in lockstep with the
/// free list itself.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SuperBlock {
    /// Count of currently free data blocks.
    pub free_blocks: usize,
}

/// Enum describing the type of an inode.
/// `TFree` marks an unused slot in the inode table that can be taken to
/// create a new file or directory.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum FType {
    /// Free inode slot
    TFree = 0,
    /// Regular file
    TFile = 1,
    /// Directory
    TDir = 2,
}

impl Default for FType {
    fn default() -> FType {
        FType::TFree
    }
}

/// Metadata record for one filesystem entity.
///
/// The `direct_blocks` table is reinterpreted per type: for a `TFile` inode
/// it lists the data blocks holding the file contents, for a `TDir` inode
/// it lists the child inodes. Unused entries hold [`FREE_SLOT`].
///
/// Inode 0 is the root directory. It is always present, always a `TDir`,
/// its `parent` field points back to itself and it is never freed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inode {
    /// Type of this inode
    pub n_type: FType,
    /// Name of this entity, NUL-terminated within the array
    pub name: [u8; NAME_LEN],
    /// For files: total number of valid bytes across all referenced data
    /// blocks. For directories: number of linked children.
    pub size: usize,
    /// Data-block indices (files) or child inode indices (directories)
    pub direct_blocks: [i32; DIRECT_BLOCKS],
    /// Inode index of the containing directory
    pub parent: i32,
}

impl Default for Inode {
    /// A free inode: no type, no name, an empty direct-block table and no
    /// parent. This is also the state `i_free` restores a slot to.
    fn default() -> Inode {
        Inode {
            n_type: FType::TFree,
            name: [0; NAME_LEN],
            size: 0,
            direct_blocks: [FREE_SLOT; DIRECT_BLOCKS],
            parent: FREE_SLOT,
        }
    }
}

impl Inode {
    /// The stored name, up to the first NUL byte.
    pub fn name_bytes(&self) -> &[u8] {
        let end = self.name.iter().position(|&b| b == 0).unwrap_or(NAME_LEN);
        &self.name[..end]
    }

    /// The stored name as an owned `String`.
    pub fn name(&self) -> String {
        String::from_utf8_lossy(self.name_bytes()).into_owned()
    }

    /// True iff the stored name equals `other`, compared byte for byte.
    pub fn name_is(&self, other: &str) -> bool {
        self.name_bytes() == other.as_bytes()
    }

    /// Store `name` in this inode, truncated to `NAME_LEN - 1` bytes.
    /// The remainder of the array is NUL-filled so `name_bytes` terminates.
    pub fn set_name(&mut self, name: &str) {
        let src = name.as_bytes();
        let len = src.len().min(NAME_LEN - 1);
        self.name = [0; NAME_LEN];
        self.name[..len].copy_from_slice(&src[..len]);
    }
}

/// One data block: a fixed byte buffer plus its bookkeeping.
///
/// `parent_inode` and `parent_block_num` are back-references for
/// validation, not ownership handles: while the block is allocated,
/// `inodes[parent_inode].direct_blocks[parent_block_num]` holds this
/// block's own index. A free block has both set to [`FREE_SLOT`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataBlock {
    /// The byte buffer itself
    pub block: [u8; BLOCK_SIZE],
    /// Number of valid bytes in `block`
    pub size: usize,
    /// Index of the owning inode, or [`FREE_SLOT`] when free
    pub parent_inode: i32,
    /// Position of this block within the owning inode's direct-block table
    pub parent_block_num: i32,
}

impl Default for DataBlock {
    fn default() -> DataBlock {
        DataBlock {
            block: [0; BLOCK_SIZE],
            size: 0,
            parent_inode: FREE_SLOT,
            parent_block_num: FREE_SLOT,
        }
    }
}

/// Read-only metadata snapshot of one filesystem entity, as returned by the
/// `stat` operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stat {
    /// Index of the inode describing the entity
    pub inum: usize,
    /// File or directory
    pub n_type: FType,
    /// Byte size for files, number of children for directories
    pub size: usize,
    /// Name of the entity
    pub name: String,
}

#[cfg(test)]
mod inode_name_tests {
    use super::*;

    #[test]
    fn fresh_inode_is_free() {
        let ino = Inode::default();
        assert_eq!(ino.n_type, FType::TFree);
        assert_eq!(ino.direct_blocks, [FREE_SLOT; DIRECT_BLOCKS]);
        assert_eq!(ino.parent, FREE_SLOT);
        assert_eq!(ino.size, 0);
        assert_eq!(ino.name(), "");
    }

    #[test]
    fn name_round_trip() {
        let mut ino = Inode::default();
        ino.set_name("testDirectory");
        assert_eq!(ino.name(), "testDirectory");
        assert!(ino.name_is("testDirectory"));
        assert!(!ino.name_is("testDirector"));
        assert!(!ino.name_is("testDirectoryy"));

        //Overwriting with a shorter name must not leave stale bytes behind
        ino.set_name("tt");
        assert_eq!(ino.name(), "tt");
    }

    #[test]
    fn name_truncated_to_capacity() {
        let mut ino = Inode::default();
        let long = "x".repeat(NAME_LEN + 5);
        ino.set_name(&long);
        assert_eq!(ino.name_bytes().len(), NAME_LEN - 1);
        assert_eq!(ino.name(), "x".repeat(NAME_LEN - 1));
    }

    #[test]
    fn fresh_block_is_unowned() {
        let db = DataBlock::default();
        assert_eq!(db.size, 0);
        assert_eq!(db.parent_inode, FREE_SLOT);
        assert_eq!(db.parent_block_num, FREE_SLOT);
        assert_eq!(db.block, [0; BLOCK_SIZE]);
    }
}
