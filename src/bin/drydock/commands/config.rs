//! `drydock config` command

use anyhow::Result;

use crate::cli::ConfigArgs;
use drydock::builder::toolchain::BuildVars;
use drydock::core::metadata::{PackageMetadata, ToolchainFamily};

pub fn execute(args: ConfigArgs) -> Result<()> {
    let project = super::project_dir(args.path)?;

    let meta = PackageMetadata::load(&project)?;
    let toolchain = args.compiler.or_else(ToolchainFamily::detect);
    let vars = BuildVars::from_metadata(&meta, toolchain);

    for define in vars.as_cmake_defines() {
        println!("{}", define);
    }

    Ok(())
}
