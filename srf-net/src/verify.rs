// srf-net/src/verify.rs
use std::fs;
use std::path::Path;

use tracing::debug;

/// Acceptance check applied after every transport attempt. Size
/// thresholding is the only integrity signal: truncated downloads from
/// the sources this tool deals with are typically tiny HTML error pages,
/// not bit-rotted large files. Pure read-only probe.
pub fn verify(path: &Path, min_size_bytes: u64) -> bool {
    let metadata = match fs::metadata(path) {
        Ok(m) => m,
        Err(_) => {
            debug!("Verification: {} does not exist", path.display());
            return false;
        }
    };
    if !metadata.is_file() {
        debug!("Verification: {} is not a regular file", path.display());
        return false;
    }
    let size = metadata.len();
    if size < min_size_bytes {
        debug!(
            "Verification: {} is too small ({} bytes, expected at least {}), probably corrupted",
            path.display(),
            size,
            min_size_bytes
        );
        return false;
    }
    debug!("Verification: {} verified ({} bytes)", path.display(), size);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use srf_common::model::DEFAULT_MIN_SIZE_BYTES;

    #[test]
    fn missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!verify(&dir.path().join("absent.pth"), 1024));
    }

    #[test]
    fn undersized_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("small.pth");
        fs::write(&path, vec![0u8; 512]).unwrap();
        assert!(!verify(&path, 1024));
    }

    #[test]
    fn file_at_threshold_passes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ok.pth");
        fs::write(&path, vec![0u8; 1024]).unwrap();
        assert!(verify(&path, 1024));
        assert!(verify(&path, 0));
    }

    #[test]
    fn directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!verify(dir.path(), 0));
    }

    #[test]
    fn default_threshold_is_ten_mib() {
        assert_eq!(DEFAULT_MIN_SIZE_BYTES, 10 * 1024 * 1024);
    }
}
