//! Brain-wave headset discovery.
//!
//! Paired headsets show up as Bluetooth serial (RFCOMM) nodes under `/dev`.
//! Only discovery is implemented; no connection is opened and no EEG data
//! is read.

use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Number of RFCOMM nodes scanned, starting at rfcomm0.
const MAX_RFCOMM_NODES: usize = 16;

#[derive(Debug, Error)]
pub enum HeadsetError {
    #[error("no headset found under {0}")]
    NotFound(String),
}

/// A discovered headset node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeadsetInfo {
    pub path: String,
    /// Node name, e.g. "rfcomm0".
    pub node: String,
}

/// Scans a device directory for headset nodes.
pub struct Headset {
    dev_dir: PathBuf,
}

impl Default for Headset {
    fn default() -> Self {
        Self::with_dev_dir("/dev")
    }
}

impl Headset {
    pub fn with_dev_dir(dev_dir: impl AsRef<Path>) -> Self {
        Self {
            dev_dir: dev_dir.as_ref().to_path_buf(),
        }
    }

    /// List `rfcomm0`..`rfcomm15` nodes that exist.
    pub fn scan_devices(&self) -> Vec<HeadsetInfo> {
        let mut devices = Vec::new();

        for i in 0..MAX_RFCOMM_NODES {
            let node = format!("rfcomm{i}");
            let path = self.dev_dir.join(&node);
            if !path.exists() {
                continue;
            }
            tracing::debug!(path = %path.display(), "headset node found");
            devices.push(HeadsetInfo {
                path: path.to_string_lossy().into_owned(),
                node,
            });
        }

        devices
    }

    /// Like [`scan_devices`](Self::scan_devices), but an empty result is an error.
    pub fn scan(&self) -> Result<Vec<HeadsetInfo>, HeadsetError> {
        let devices = self.scan_devices();
        if devices.is_empty() {
            return Err(HeadsetError::NotFound(
                self.dev_dir.to_string_lossy().into_owned(),
            ));
        }
        tracing::info!(count = devices.len(), "headset scan complete");
        Ok(devices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_finds_rfcomm_nodes() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("rfcomm0"), b"").unwrap();
        std::fs::write(dir.path().join("rfcomm3"), b"").unwrap();
        std::fs::write(dir.path().join("ttyS0"), b"").unwrap();

        let devices = Headset::with_dev_dir(dir.path()).scan().unwrap();
        let nodes: Vec<_> = devices.iter().map(|d| d.node.as_str()).collect();
        assert_eq!(nodes, ["rfcomm0", "rfcomm3"]);
        assert!(devices[1].path.ends_with("rfcomm3"));
    }

    #[test]
    fn test_scan_ignores_nodes_past_limit() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("rfcomm16"), b"").unwrap();
        assert!(Headset::with_dev_dir(dir.path()).scan_devices().is_empty());
    }

    #[test]
    fn test_empty_scan_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = Headset::with_dev_dir(dir.path()).scan().unwrap_err();
        assert!(matches!(err, HeadsetError::NotFound(_)));
    }
}
