mod directory;
pub mod error;
mod fs_directory;
mod ram_directory;

pub use directory::Directory;
pub use fs_directory::FsDirectory;
pub use ram_directory::RamDirectory;
