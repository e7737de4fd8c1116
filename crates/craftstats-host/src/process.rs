//! Server process detection
//!
//! MineOS launches each server from its own directory, so a server counts as
//! up when some running process references that directory (command line or
//! working directory).

use std::path::Path;
use sysinfo::System;

/// Check whether any running process belongs to the given server directory
pub fn server_process_running(server_dir: &Path) -> bool {
    let mut system = System::new();
    system.refresh_processes();
    process_scan_hit(&system, server_dir)
}

fn process_scan_hit(system: &System, server_dir: &Path) -> bool {
    let needle = server_dir.to_string_lossy();
    system.processes().values().any(|process| {
        process
            .cwd()
            .map_or(false, |cwd| cwd.starts_with(server_dir))
            || process.cmd().iter().any(|arg| arg.contains(needle.as_ref()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_unknown_directory_is_down() {
        let dir = PathBuf::from("/var/games/minecraft/servers/definitely-not-running");
        assert!(!server_process_running(&dir));
    }

    #[test]
    fn test_own_process_cwd_is_detected() {
        // The test binary itself runs somewhere; its cwd must register as up
        let cwd = std::env::current_dir().unwrap();
        assert!(server_process_running(&cwd));
    }
}
