//! `drydock clean` command

use anyhow::Result;

use crate::cli::CleanArgs;
use drydock::ops::clean::clean_project;

pub fn execute(args: CleanArgs) -> Result<()> {
    let project = super::project_dir(args.path)?;
    clean_project(&project)?;
    println!("Cleaned {}", project.display());
    Ok(())
}
