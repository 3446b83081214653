use crate::builder::addon::BuildReport;
use crate::utils::logger::{LogLevel, Logger};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;

/// Size and checksum of a built archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactDigest {
    pub size: u64,
    pub sha256: String,
}

pub fn digest_artifact(path: &Path) -> std::io::Result<ArtifactDigest> {
    let buf = fs::read(path)?;
    let mut hasher = Sha256::new();
    hasher.update(&buf);
    Ok(ArtifactDigest {
        size: buf.len() as u64,
        sha256: hex::encode(hasher.finalize()),
    })
}

pub fn human_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KiB", "MiB", "GiB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}

pub fn print_artifact_summary(report: &BuildReport) -> std::io::Result<()> {
    let logger = Logger::new();
    let digest = digest_artifact(&report.archive)?;

    let archive_lines = [
        format!("Path    : {}", report.archive.display()),
        format!("Size    : {}", human_size(digest.size)),
        format!("Members : {}", report.members.len()),
    ];
    let refs: Vec<&str> = archive_lines.iter().map(|s| s.as_str()).collect();
    logger.log_message_with_trace(LogLevel::Info, &format!("📦 {}", report.addon_name), refs);

    let sha_line = format!("SHA256 : {}", digest.sha256);
    logger.log_message_with_trace(LogLevel::Info, "🧾 Checksums", vec![sha_line.as_str()]);
    Ok(())
}
