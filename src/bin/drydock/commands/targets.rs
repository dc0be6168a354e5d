//! `drydock targets` command

use anyhow::Result;

use crate::cli::TargetsArgs;
use drydock::core::metadata::{BuildData, PackageMetadata};
use drydock::core::targets::target_list;

pub fn execute(args: TargetsArgs) -> Result<()> {
    let project = super::project_dir(args.path)?;

    let meta = PackageMetadata::load(&project)?;
    let data = BuildData::load(&project)?;

    println!("Targets for `{}`:", meta.name);
    for spec in target_list(&meta) {
        println!("  {}", spec);
    }

    if let Some(version) = &meta.cmake_version {
        println!();
        println!("Tool requirement:");
        println!("  cmake/{}", version);
    }

    if !data.requirements.is_empty() {
        println!();
        println!("Extra requirements:");
        for req in &data.requirements {
            println!("  {}", req);
        }
    }

    Ok(())
}
