use std::{path::Path, process::Stdio};

use anyhow::{anyhow, Result};
use sysinfo::{get_current_pid, Signal, System};
use tracing::info;

use super::daemon_path::to_daemon_path;

/// Terminates every running process started from `name`, except this one and its children.
pub fn kill_previous_servers(name: &Path) -> Result<usize> {
    let system = System::new_all();
    let current_id = get_current_pid().map_err(|e| anyhow!("Can't find own pid {e}"))?;
    let mut killed = 0;
    for (pid, process) in system.processes().iter() {
        if *pid == current_id {
            continue;
        }
        if matches!(process.parent(), Some(p) if p == current_id) {
            continue;
        }

        if process
            .exe()
            .filter(|v| v.exists())
            .filter(|v| name == *v)
            .is_some()
        {
            // This will forcefully terminate the process on Windows. Anything better will require a
            // lot more work.
            if process.kill_with(Signal::Term).is_none() {
                process.kill();
            }
            process.wait();
            info!("Stopped daemon {pid}");
            killed += 1;
        }
    }
    Ok(killed)
}

/// Stops a previously started daemon and starts a new one. The daemon binary detaches itself, so
/// this only waits for the launcher to exit.
pub fn restart_server(app_dir: &Path) -> Result<()> {
    let daemon_path = to_daemon_path(std::env::current_exe()?);
    kill_previous_servers(&daemon_path)?;

    let mut command = std::process::Command::new(&daemon_path);
    command.arg("--dir").arg(app_dir);
    command.stdin(Stdio::null());

    println!("Spawning {}", daemon_path.display());
    let status = command.status()?;
    if !status.success() {
        return Err(anyhow!("Daemon launcher exited with {status}"));
    }
    Ok(())
}

pub fn stop_server() -> Result<()> {
    let daemon_path = to_daemon_path(std::env::current_exe()?);
    match kill_previous_servers(&daemon_path)? {
        0 => println!("No daemon is running"),
        count => println!("Stopped {count} daemon(s)"),
    }
    Ok(())
}
