//! Config Command
//!
//! Shows, locates, and initializes configuration files.

use crate::cli::output::Output;
use crate::config::ConfigLoader;
use crate::types::Result;

pub fn show(as_json: bool) -> Result<()> {
    ConfigLoader::show_config(as_json)
}

pub fn path() -> Result<()> {
    ConfigLoader::show_path();
    Ok(())
}

pub fn init(global: bool, force: bool, name: Option<&str>) -> Result<()> {
    let out = Output::new();

    if global {
        let dir = ConfigLoader::init_global(force)?;
        out.success(&format!("Global configuration ready at {}", dir.display()));
    } else {
        let dir = ConfigLoader::init_project(name)?;
        out.success(&format!("Project configuration ready at {}", dir.display()));
    }

    Ok(())
}
