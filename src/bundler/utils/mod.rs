//! Filesystem, archive and process helpers shared by the packagers.

pub mod archive;
pub mod fs;
pub mod process;
