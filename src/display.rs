use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{PlotError, Result};

/// Opens each figure in the platform viewer. `open -W` and `start /WAIT`
/// block until the viewer closes; `xdg-open` usually returns as soon as the
/// desktop has taken the file. Without a graphical session this only reports
/// where the files are.
pub fn show(paths: &[PathBuf]) -> Result<()> {
    if !has_display() {
        println!("No display available; figures left at:");
        for path in paths {
            println!("  {}", path.display());
        }
        return Ok(());
    }

    for path in paths {
        let status = viewer_command(path)
            .status()
            .map_err(|e| PlotError::Display(format!("failed to launch viewer: {}", e)))?;
        if !status.success() {
            return Err(PlotError::Display(format!(
                "viewer exited with {} for {}",
                status,
                path.display()
            )));
        }
    }
    Ok(())
}

fn has_display() -> bool {
    if cfg!(any(target_os = "macos", target_os = "windows")) {
        return true;
    }
    display_from_env(|key| std::env::var_os(key).is_some())
}

fn display_from_env(is_set: impl Fn(&str) -> bool) -> bool {
    is_set("DISPLAY") || is_set("WAYLAND_DISPLAY")
}

fn viewer_command(path: &Path) -> Command {
    let mut cmd = if cfg!(target_os = "macos") {
        let mut cmd = Command::new("open");
        cmd.arg("-W");
        cmd
    } else if cfg!(target_os = "windows") {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", "start", "/WAIT", ""]);
        cmd
    } else {
        Command::new("xdg-open")
    };
    cmd.arg(path);
    cmd
}
