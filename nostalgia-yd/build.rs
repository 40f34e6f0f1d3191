//! Build script for nostalgia-yd
//!
//! Exposes build identification to the binary as compile-time env vars:
//! `GIT_HASH`, `BUILD_TIMESTAMP`, `BUILD_PROFILE`.

use chrono::{DateTime, SecondsFormat, Utc};
use std::process::Command;

/// Trimmed stdout of a successful git invocation
fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8(output.stdout)
        .ok()
        .map(|s| s.trim().to_string())
}

/// Short commit hash, suffixed `-dirty` when the work tree has local changes
fn commit_id() -> String {
    let Some(hash) = git(&["rev-parse", "--short=8", "HEAD"]) else {
        return "unknown".to_string();
    };
    match git(&["status", "--porcelain", "--untracked-files=no"]) {
        Some(changes) if !changes.is_empty() => format!("{}-dirty", hash),
        _ => hash,
    }
}

/// UTC build time; honours SOURCE_DATE_EPOCH for reproducible builds
fn build_time() -> DateTime<Utc> {
    std::env::var("SOURCE_DATE_EPOCH")
        .ok()
        .and_then(|epoch| epoch.parse::<i64>().ok())
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .unwrap_or_else(Utc::now)
}

fn main() {
    let values = [
        ("GIT_HASH", commit_id()),
        (
            "BUILD_TIMESTAMP",
            build_time().to_rfc3339_opts(SecondsFormat::Secs, true),
        ),
        (
            "BUILD_PROFILE",
            std::env::var("PROFILE").unwrap_or_else(|_| "unknown".to_string()),
        ),
    ];

    for (key, value) in values {
        println!("cargo:rustc-env={}={}", key, value);
    }

    println!("cargo:rerun-if-env-changed=SOURCE_DATE_EPOCH");
    // Hash follows new commits and staged changes
    println!("cargo:rerun-if-changed=../.git/HEAD");
    println!("cargo:rerun-if-changed=../.git/index");
}
