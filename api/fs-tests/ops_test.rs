use super::FSName;
use crate::error_fs::FsError;
use memfs_api::fs::{FileSupport, FileSysSupport, InodeSupport, OpsSupport};
use memfs_api::types::{
    FType, BLOCK_SIZE, DIRECT_BLOCKS, FREE_SLOT, NUM_BLOCKS, NUM_INODES,
};

//Cross-checks the global invariants the layers promise to maintain:
//counter/free-list agreement, block back-references, and parent links.
fn check_consistency(fs: &FSName) {
    let free = fs.free_list.iter().filter(|&&e| e == 1).count();
    assert_eq!(fs.super_block.free_blocks, free);

    for (b, db) in fs.data_blocks.iter().enumerate() {
        if fs.free_list[b] == 1 {
            assert_eq!(db.parent_inode, FREE_SLOT);
            assert_eq!(db.parent_block_num, FREE_SLOT);
        } else {
            let owner = &fs.inodes[db.parent_inode as usize];
            assert_eq!(owner.direct_blocks[db.parent_block_num as usize], b as i32);
        }
    }

    for (i, ino) in fs.inodes.iter().enumerate().skip(1) {
        if ino.n_type != FType::TFree {
            let parent = &fs.inodes[ino.parent as usize];
            assert_eq!(parent.n_type, FType::TDir);
            assert!(parent.direct_blocks.contains(&(i as i32)));
        }
    }
}

#[test]
fn mkdir_links_into_the_root() {
    let mut fs = FSName::mkfs();
    assert_eq!(fs.mkdir("/testDirectory").unwrap(), 1);
    assert_eq!(fs.inodes[1].n_type, FType::TDir);
    assert_eq!(fs.inodes[1].name(), "testDirectory");
    assert_eq!(fs.inodes[1].parent, 0);
    assert_eq!(fs.inodes[0].direct_blocks[0], 1);
    //Creating a directory claims no data blocks
    assert_eq!(fs.super_block.free_blocks, NUM_BLOCKS);
    check_consistency(&fs);
}

#[test]
fn mkfile_links_into_the_root() {
    let mut fs = FSName::mkfs();
    assert_eq!(fs.mkfile("/testFile").unwrap(), 1);
    assert_eq!(fs.inodes[1].n_type, FType::TFile);
    assert_eq!(fs.inodes[1].name(), "testFile");
    assert_eq!(fs.inodes[1].size, 0);
    assert_eq!(fs.inodes[0].direct_blocks[0], 1);
    check_consistency(&fs);
}

#[test]
fn creation_error_cases() {
    let mut fs = FSName::mkfs();
    fs.mkdir("/d").unwrap();
    fs.mkfile("/d/f").unwrap();

    assert!(matches!(fs.mkdir("/d").unwrap_err(), FsError::LeafExists));
    assert!(matches!(fs.mkfile("/d/f").unwrap_err(), FsError::LeafExists));
    //A file and a directory cannot share a name either
    assert!(matches!(fs.mkfile("/d").unwrap_err(), FsError::LeafExists));
    //A creation clash reports the general failure code
    assert_eq!(fs.mkdir("/d").unwrap_err().status(), -1);
    assert!(matches!(
        fs.mkdir("noslash").unwrap_err(),
        FsError::InvalidPath(_)
    ));
    assert!(matches!(
        fs.mkdir("/missing/x").unwrap_err(),
        FsError::NotFound
    ));
    assert!(matches!(
        fs.mkdir("/d/f/x").unwrap_err(),
        FsError::NotADirectory
    ));
    check_consistency(&fs);
}

#[test]
fn creation_stops_at_a_full_parent() {
    let mut fs = FSName::mkfs();
    for i in 0..DIRECT_BLOCKS {
        fs.mkdir(&format!("/d{}", i)).unwrap();
    }
    assert!(matches!(
        fs.mkdir("/overflow").unwrap_err(),
        FsError::DirectoryFull
    ));
    check_consistency(&fs);
}

#[test]
fn creation_stops_without_inode_slots() {
    let mut fs = FSName::mkfs();
    for _ in 1..NUM_INODES {
        fs.i_alloc(FType::TFile, "burner", 0).unwrap();
    }
    assert!(matches!(
        fs.mkdir("/d").unwrap_err(),
        FsError::NoFreeInodes
    ));
}

#[test]
fn write_and_rm_update_free_blocks() {
    let mut fs = FSName::mkfs();
    fs.mkfile("/fil1").unwrap();
    fs.writef("/fil1", b"data").unwrap();
    assert_eq!(fs.super_block.free_blocks, NUM_BLOCKS - 1);
    check_consistency(&fs);

    fs.rm("/fil1").unwrap();
    assert_eq!(fs.super_block.free_blocks, NUM_BLOCKS);
    assert_eq!(fs.inodes[1].n_type, FType::TFree);
    assert_eq!(fs.inodes[0].direct_blocks[0], FREE_SLOT);
    check_consistency(&fs);
}

#[test]
fn writef_error_cases() {
    let mut fs = FSName::mkfs();
    fs.mkdir("/d").unwrap();

    assert!(matches!(
        fs.writef("/nope", b"x").unwrap_err(),
        FsError::NotFound
    ));
    assert!(matches!(
        fs.writef("/d", b"x").unwrap_err(),
        FsError::NotAFile
    ));
}

#[test]
fn rm_empty_directory_keeps_free_blocks() {
    let mut fs = FSName::mkfs();
    fs.mkdir("/dir1").unwrap();
    assert_eq!(fs.super_block.free_blocks, NUM_BLOCKS);

    fs.rm("/dir1").unwrap();
    assert_eq!(fs.super_block.free_blocks, NUM_BLOCKS);
    assert_eq!(fs.inodes[0].size, 0);
    check_consistency(&fs);
}

#[test]
fn rm_directory_with_file_restores_free_blocks() {
    let mut fs = FSName::mkfs();
    fs.mkdir("/dir1").unwrap();
    fs.mkfile("/dir1/file1").unwrap();
    fs.writef("/dir1/file1", b"abc").unwrap();
    assert_eq!(fs.super_block.free_blocks, NUM_BLOCKS - 1);

    fs.rm("/dir1").unwrap();
    assert_eq!(fs.super_block.free_blocks, NUM_BLOCKS);
    assert_eq!(fs.inodes[1].n_type, FType::TFree);
    assert_eq!(fs.inodes[2].n_type, FType::TFree);
    check_consistency(&fs);
}

#[test]
fn rm_error_cases() {
    let mut fs = FSName::mkfs();
    assert!(matches!(fs.rm("/missing").unwrap_err(), FsError::NotFound));
    assert!(matches!(fs.rm("/").unwrap_err(), FsError::RemoveRoot));
}

#[test]
fn cp_directory_easy() {
    let mut fs = FSName::mkfs();
    fs.mkdir("/testDirectory").unwrap();

    assert_eq!(fs.cp("/testDirectory", "/testLocation").unwrap(), 2);
    assert_eq!(fs.inodes[2].n_type, FType::TDir);
    assert_eq!(fs.inodes[2].name(), "testLocation");
    assert_eq!(fs.inodes[2].parent, 0);
    assert_eq!(fs.inodes[0].direct_blocks[1], 2);
    check_consistency(&fs);
}

#[test]
fn cp_file_copies_the_contents() {
    let mut fs = FSName::mkfs();
    fs.mkfile("/testFile").unwrap();
    fs.writef("/testFile", b"payload").unwrap();

    assert_eq!(fs.cp("/testFile", "/abc").unwrap(), 2);
    assert_eq!(fs.inodes[2].n_type, FType::TFile);
    assert_eq!(fs.inodes[2].name(), "abc");
    assert_eq!(fs.inodes[2].parent, 0);
    assert_eq!(fs.inodes[0].direct_blocks[1], 2);

    //The copy owns its own block; the contents agree byte for byte
    assert_eq!(fs.inodes[1].direct_blocks[0], 0);
    assert_eq!(fs.inodes[2].direct_blocks[0], 1);
    assert_eq!(fs.f_read(2).unwrap(), b"payload");
    assert_eq!(fs.super_block.free_blocks, NUM_BLOCKS - 2);
    check_consistency(&fs);
}

#[test]
fn cp_nested_directory() {
    let mut fs = FSName::mkfs();
    fs.mkdir("/testDirectory").unwrap();
    fs.mkdir("/testDirectory/tt").unwrap();

    assert_eq!(fs.cp("/testDirectory", "/testLocation").unwrap(), 3);
    //The copy's root comes first, its children after
    assert_eq!(fs.inodes[3].n_type, FType::TDir);
    assert_eq!(fs.inodes[3].name(), "testLocation");
    assert_eq!(fs.inodes[3].parent, 0);
    assert_eq!(fs.inodes[0].direct_blocks[1], 3);

    assert_eq!(fs.inodes[4].n_type, FType::TDir);
    assert_eq!(fs.inodes[4].name(), "tt");
    assert_eq!(fs.inodes[4].parent, 3);
    assert_eq!(fs.inodes[3].direct_blocks[0], 4);
    check_consistency(&fs);
}

#[test]
fn cp_error_cases() {
    let mut fs = FSName::mkfs();
    fs.mkfile("/src").unwrap();
    fs.mkfile("/dest").unwrap();

    assert!(matches!(
        fs.cp("/nosrc", "/x").unwrap_err(),
        FsError::NotFound
    ));
    assert_eq!(fs.cp("/nosrc", "/x").unwrap_err().status(), -1);
    assert!(matches!(
        fs.cp("/src", "/dest").unwrap_err(),
        FsError::AlreadyExists
    ));
    //An occupied destination is the one clash that reports -2
    assert_eq!(fs.cp("/src", "/dest").unwrap_err().status(), -2);
    assert!(matches!(
        fs.cp("/src", "/missing/x").unwrap_err(),
        FsError::NotFound
    ));
    assert!(matches!(
        fs.cp("/src", "relative").unwrap_err(),
        FsError::InvalidPath(_)
    ));
    check_consistency(&fs);
}

#[test]
fn cp_without_blocks_changes_nothing() {
    let mut fs = FSName::mkfs();
    fs.mkfile("/src").unwrap();
    fs.writef("/src", &vec![1; 2 * BLOCK_SIZE]).unwrap();
    fs.mkfile("/busy").unwrap();
    fs.writef("/busy", &vec![2; BLOCK_SIZE + 1]).unwrap();
    assert_eq!(fs.super_block.free_blocks, 1);

    //The copy would need two blocks; only one is free
    assert!(matches!(
        fs.cp("/src", "/copy").unwrap_err(),
        FsError::NoSpaceForCopy
    ));
    //Out of space during cp reports -1, unlike writef and import
    assert_eq!(fs.cp("/src", "/copy").unwrap_err().status(), -1);
    assert_eq!(fs.super_block.free_blocks, 1);
    assert_eq!(fs.inodes[3].n_type, FType::TFree); //no inode was claimed
    check_consistency(&fs);
}

#[test]
fn cp_without_inode_slots_changes_nothing() {
    let mut fs = FSName::mkfs();
    fs.mkfile("/src").unwrap();
    fs.writef("/src", b"tiny").unwrap();
    for _ in 2..NUM_INODES {
        fs.i_alloc(FType::TFile, "burner", 0).unwrap();
    }

    assert!(matches!(
        fs.cp("/src", "/copy").unwrap_err(),
        FsError::NoSpaceForCopy
    ));
    assert_eq!(fs.super_block.free_blocks, NUM_BLOCKS - 1);
}

#[test]
fn ls_and_stat_report_the_tree() {
    let mut fs = FSName::mkfs();
    fs.mkdir("/d").unwrap();
    fs.mkfile("/d/f").unwrap();
    fs.writef("/d/f", b"12345").unwrap();

    assert_eq!(fs.ls("/").unwrap(), vec!["d"]);
    assert_eq!(fs.ls("/d").unwrap(), vec!["f"]);
    assert!(matches!(fs.ls("/d/f").unwrap_err(), FsError::NotADirectory));

    let st = fs.stat("/d/f").unwrap();
    assert_eq!(st.inum, 2);
    assert_eq!(st.n_type, FType::TFile);
    assert_eq!(st.size, 5);
    assert_eq!(st.name, "f");

    //A directory's size counts its children
    let st = fs.stat("/d").unwrap();
    assert_eq!(st.n_type, FType::TDir);
    assert_eq!(st.size, 1);

    assert_eq!(fs.stat("/").unwrap().name, "/");
    assert!(matches!(fs.stat("/nope").unwrap_err(), FsError::NotFound));
}
