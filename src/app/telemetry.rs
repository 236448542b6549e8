use serde_json::Value;
use std::path::Path;
use std::process::Command;
use sysinfo::System;

const NOT_AVAILABLE: &str = "N/A";
const ENGINE_PACKAGE: &str = "node_modules/cypress/package.json";

/// Read-only snapshot of the host running the suite.
#[derive(Debug, Clone, PartialEq)]
pub struct SystemTelemetry {
    pub os: String,
    pub arch: String,
    pub platform: String,
    pub hostname: String,
    pub node_version: String,
    pub engine_version: String,
    pub cpu_model: String,
    pub cores: usize,
    pub free_memory: u64,
    pub total_memory: u64,
}

impl SystemTelemetry {
    pub fn collect() -> Self {
        let system = System::new_all();
        let os = format!(
            "{} {}",
            System::name().unwrap_or_else(|| NOT_AVAILABLE.to_owned()),
            System::kernel_version().unwrap_or_default()
        );
        let cpu_model = system
            .cpus()
            .first()
            .map(|cpu| cpu.brand().trim().to_owned())
            .unwrap_or_else(|| NOT_AVAILABLE.to_owned());
        Self {
            os: os.trim().to_owned(),
            arch: std::env::consts::ARCH.to_owned(),
            platform: std::env::consts::OS.to_owned(),
            hostname: System::host_name().unwrap_or_else(|| NOT_AVAILABLE.to_owned()),
            node_version: node_version().unwrap_or_else(|| NOT_AVAILABLE.to_owned()),
            engine_version: engine_version(Path::new(ENGINE_PACKAGE))
                .unwrap_or_else(|| NOT_AVAILABLE.to_owned()),
            cpu_model,
            cores: system.cpus().len(),
            free_memory: system.free_memory(),
            total_memory: system.total_memory(),
        }
    }

    pub fn lines(&self) -> Vec<String> {
        vec![
            format!("SYSTEM      : {}", self.os),
            format!("ARCH        : {} / {}", self.arch, self.platform),
            format!("HOSTNAME    : {}", self.hostname),
            format!("NODE        : {}", self.node_version),
            format!("CYPRESS     : v{}", self.engine_version),
            format!("CPU MODEL   : {}", self.cpu_model),
            format!("CORES       : {} cores", self.cores),
            format!(
                "MEMORY      : {} free / {} total",
                format_memory(self.free_memory),
                format_memory(self.total_memory)
            ),
        ]
    }
}

fn node_version() -> Option<String> {
    let output = Command::new("node").arg("--version").output().ok()?;
    if !output.status.success() {
        return None;
    }
    let version = String::from_utf8_lossy(&output.stdout).trim().to_owned();
    Some(version).filter(|v| !v.is_empty())
}

fn engine_version(package: &Path) -> Option<String> {
    let data = std::fs::read(package).ok()?;
    let manifest: Value = serde_json::from_slice(&data).ok()?;
    manifest
        .get("version")
        .and_then(Value::as_str)
        .map(str::to_owned)
}

/// Megabytes with at most two decimals, trailing zeros dropped.
pub fn format_memory(bytes: u64) -> String {
    let megabytes = (bytes as f64 / 1024.0 / 1024.0 * 100.0).round() / 100.0;
    format!("{} MB", megabytes)
}

/// Splits `lines` into two columns, the left one holding the extra line.
pub fn two_columns(lines: &[String]) -> Vec<(&str, Option<&str>)> {
    let midpoint = (lines.len() + 1) / 2;
    let (left, right) = lines.split_at(midpoint);
    left.iter()
        .enumerate()
        .map(|(i, l)| (l.as_str(), right.get(i).map(String::as_str)))
        .collect()
}
