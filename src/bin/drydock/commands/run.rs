//! `drydock run` command

use anyhow::Result;

use crate::cli::{OutputFormat, RunArgs};
use drydock::builder::cmake::CMakeDriver;
use drydock::core::metadata::{BuildData, PackageMetadata, ToolchainFamily};
use drydock::ops::cycle::{format_report, run_cycle, CycleOptions};

pub fn execute(args: RunArgs) -> Result<()> {
    let project = super::project_dir(args.path)?;

    let meta = PackageMetadata::load(&project)?;
    let data = BuildData::load(&project)?;

    for req in &data.requirements {
        tracing::debug!("extra requirement: {}", req);
    }

    let toolchain = args.compiler.or_else(ToolchainFamily::detect);
    let opts = CycleOptions {
        host_can_run: !args.no_run,
        toolchain,
    };

    let driver = CMakeDriver::new(&project)?;
    let build_dir = driver.build_dir().to_path_buf();

    let report = run_cycle(&driver, &project, &build_dir, &meta, &opts)?;

    match args.output_format {
        OutputFormat::Human => {
            println!("Cycle complete for `{}`:", meta.name);
            println!();
            print!("{}", format_report(&report));
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}
