use std::process::Stdio;

use anyhow::{bail, Context, Result};
use tokio::process::Command;
use tracing::info;

use crate::config::Config;

/// Make sure a static build exists in `config.dist_dir`, running the build command if not.
pub async fn ensure_build(config: &Config) -> Result<()> {
    if config.dist_dir.is_dir() {
        info!("Using existing build at {}", config.dist_dir.display());
        return Ok(());
    }

    info!(
        "No build found at {}, running `{}`",
        config.dist_dir.display(),
        config.build_command
    );

    let mut parts = config.build_command.split_whitespace();
    let Some(program) = parts.next() else {
        bail!("BUILD_COMMAND is empty");
    };

    let status = Command::new(program)
        .args(parts)
        .current_dir(&config.project_root)
        .stdin(Stdio::null())
        .status()
        .await
        .with_context(|| format!("Failed to run build command `{}`", config.build_command))?;

    if !status.success() {
        bail!("Build command `{}` failed ({})", config.build_command, status);
    }

    if !config.dist_dir.is_dir() {
        bail!(
            "Build finished but {} does not exist",
            config.dist_dir.display()
        );
    }

    info!("✓ Build complete");
    Ok(())
}
