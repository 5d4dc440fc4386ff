//! Best-effort host hardware probing for the report header.
//!
//! The processor and memory descriptors are opaque strings shown verbatim
//! in the report; any probe failure falls back to an "Unknown" placeholder
//! rather than failing report generation.

use std::process::Command;

use serde::Serialize;

/// Host descriptors displayed in the report's hardware card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HardwareInfo {
    pub processor: String,
    pub memory: String,
}

impl HardwareInfo {
    /// Probe the current host.
    pub fn detect() -> Self {
        Self {
            processor: cpu_name().unwrap_or_else(|| "Unknown Processor".to_string()),
            memory: memory_total().unwrap_or_else(|| "Unknown RAM".to_string()),
        }
    }
}

/// Run a command and return its trimmed stdout, if it succeeded with
/// non-empty output.
fn command_stdout(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program).args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

fn cpu_name() -> Option<String> {
    if cfg!(target_os = "linux") {
        let cpuinfo = std::fs::read_to_string("/proc/cpuinfo").ok()?;
        cpuinfo
            .lines()
            .find(|line| line.starts_with("model name"))
            .and_then(|line| line.split(':').nth(1))
            .map(|name| name.trim().to_string())
    } else if cfg!(target_os = "macos") {
        command_stdout("sysctl", &["-n", "machdep.cpu.brand_string"])
    } else if cfg!(target_os = "windows") {
        command_stdout(
            "powershell",
            &[
                "-NoProfile",
                "-Command",
                "Get-CimInstance -ClassName Win32_Processor | Select-Object -ExpandProperty Name",
            ],
        )
    } else {
        None
    }
}

fn memory_total() -> Option<String> {
    if cfg!(target_os = "linux") {
        let meminfo = std::fs::read_to_string("/proc/meminfo").ok()?;
        let line = meminfo.lines().find(|line| line.starts_with("MemTotal"))?;
        let kb: f64 = line.split_whitespace().nth(1)?.parse().ok()?;
        Some(format!("{:.1} GB", kb / (1024.0 * 1024.0)))
    } else if cfg!(target_os = "macos") {
        let bytes: f64 = command_stdout("sysctl", &["-n", "hw.memsize"])?.parse().ok()?;
        Some(format!("{:.1} GB", bytes / (1024.0 * 1024.0 * 1024.0)))
    } else if cfg!(target_os = "windows") {
        let bytes: f64 = command_stdout(
            "powershell",
            &[
                "-NoProfile",
                "-Command",
                "Get-CimInstance -ClassName Win32_ComputerSystem | Select-Object -ExpandProperty TotalPhysicalMemory",
            ],
        )?
        .parse()
        .ok()?;
        Some(format!("{:.1} GB", bytes / (1024.0 * 1024.0 * 1024.0)))
    } else {
        None
    }
}
