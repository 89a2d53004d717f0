use std::fs::{self, File};
use std::io;
use std::path::Path;

use log::LevelFilter;
use simplelog::{Config, WriteLogger};

/// Routes the `log` macros to `path`; the terminal itself belongs to the UI.
pub fn init_file_logger(path: &Path, verbose: bool) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    WriteLogger::init(level, Config::default(), File::create(path)?).map_err(io::Error::other)
}
