//! dirsnap - timestamped snapshot copies of a directory

pub mod archiver;
pub mod cli;
pub mod config;
pub mod dialog;

// Re-exports for easy access
pub use archiver::{dir_size, ArchiveError, DirectoryArchiver, TIMESTAMP_FORMAT};
pub use cli::{Cli, Commands};
pub use config::{Config, ConfigError};
pub use dialog::{confirm_and_archive, ConsoleDialog, Dialog};

pub mod colors {
    use colored::Color;

    pub const SUCCESS: Color = Color::TrueColor { r: 77, g: 255, b: 157 };
    pub const HEADER: Color = Color::TrueColor { r: 157, g: 77, b: 255 };
    pub const PATH: Color = Color::TrueColor { r: 77, g: 195, b: 255 };
    pub const WARNING: Color = Color::TrueColor { r: 255, g: 217, b: 61 };
}

/// Current version of dirsnap
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
