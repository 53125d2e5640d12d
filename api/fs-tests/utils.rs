#![allow(dead_code)]

//Some general utilities for tests that exchange files with the host system
use std::fs::{create_dir_all, remove_dir, remove_file};
use std::path::{Path, PathBuf};

//Create the directories 'name' leading up to 'file_name', starting from the crate root
//Additionally, remove 'file_name' if it already exists in the file system, so a
//previously failed test run cannot interfere with the current one
//*WARNING* make sure 'name' is unique over different tests, because tests are
//executed in parallel by default!
pub fn host_prep_path(name: &str, file_name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push(name);
    path.push(file_name);

    if path.exists() {
        //Remove the file in case it already exists
        remove_file(&path).unwrap();
    }
    {
        //Create any missing directories first, if applicable
        let prefix = path.parent().unwrap();
        create_dir_all(prefix).unwrap();
    }

    path
}

//Undo folder creation, including removing the parent
pub fn host_unprep_path(path: &Path) {
    //Ensure that the file has been deleted before going on
    remove_file(path).unwrap();

    let parent = path.parent().unwrap();
    remove_dir(parent).unwrap(); //Safety; only remove if empty
}

//Put a fixture file on the host for the engine to import
pub fn put_host_file(path: &Path, data: &[u8]) {
    std::fs::write(path, data).unwrap();
}

//Read back a file the engine exported to the host
pub fn get_host_file(path: &Path) -> Vec<u8> {
    std::fs::read(path).unwrap()
}

//A payload that spans exactly two data blocks
pub fn two_block_payload() -> Vec<u8> {
    (0..2 * memfs_api::types::BLOCK_SIZE)
        .map(|i| (i % 251) as u8)
        .collect()
}
