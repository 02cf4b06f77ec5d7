// srf-common/src/model.rs
// Artifact manifest types: which model files to fetch and from where.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SrfError};

/// Download threshold below which a "successful" transfer is treated as a
/// truncated download or an HTML error page.
pub const DEFAULT_MIN_SIZE_BYTES: u64 = 10 * 1024 * 1024;

const DRIVE_EXPORT_URL: &str = "https://drive.google.com/uc?export=download";

/// One remote location/method for obtaining an artifact.
///
/// Order within an artifact's candidate list is a priority, not a set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateSource {
    /// Opaque identifier on a share host that interposes a confirmation
    /// page before serving large files (Google Drive in the builtin
    /// manifest).
    FileId(String),
    /// Plain URL, fetched as-is.
    Url(String),
    /// Shell command template embedding its own source URL. `{output}` is
    /// replaced with the destination path at invocation time.
    Command(String),
}

impl CandidateSource {
    /// Canonical download URL for this candidate, if it has one.
    /// `Command` candidates carry their URL inside the template instead.
    pub fn download_url(&self) -> Option<String> {
        match self {
            CandidateSource::FileId(id) => Some(format!("{DRIVE_EXPORT_URL}&id={id}")),
            CandidateSource::Url(url) => Some(url.clone()),
            CandidateSource::Command(_) => None,
        }
    }

    /// URL with the interstitial confirmation token appended. Only
    /// meaningful for `FileId` candidates.
    pub fn confirm_url(&self, token: &str) -> Option<String> {
        match self {
            CandidateSource::FileId(id) => {
                Some(format!("{DRIVE_EXPORT_URL}&confirm={token}&id={id}"))
            }
            _ => None,
        }
    }

    /// Short human-readable form for log lines.
    pub fn describe(&self) -> String {
        match self {
            CandidateSource::FileId(id) => format!("file id {id}"),
            CandidateSource::Url(url) => url.clone(),
            CandidateSource::Command(template) => format!("command `{template}`"),
        }
    }
}

/// A named binary file this system must ensure exists locally.
/// Built from static configuration; immutable during a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artifact {
    /// Unique key, doubling as the target filename.
    pub name: String,
    /// Files smaller than this are rejected by verification.
    #[serde(default = "default_min_size_bytes")]
    pub min_size_bytes: u64,
    /// Candidate sources in priority order.
    pub candidates: Vec<CandidateSource>,
    /// Alternate direct URLs, probed by the mirror strategy regardless of
    /// which candidate is being attempted.
    #[serde(default)]
    pub mirrors: Vec<String>,
    /// Where to get the file by hand when every source is exhausted.
    #[serde(default)]
    pub manual_source: Option<String>,
}

fn default_min_size_bytes() -> u64 {
    DEFAULT_MIN_SIZE_BYTES
}

impl Artifact {
    pub fn target_path(&self, model_dir: &Path) -> PathBuf {
        model_dir.join(&self.name)
    }
}

/// The full table of artifacts for one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub artifacts: Vec<Artifact>,
}

impl Manifest {
    /// Loads a manifest from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path).map_err(|e| {
            SrfError::Config(format!("Failed to read manifest {}: {}", path.display(), e))
        })?;
        let manifest: Manifest = serde_json::from_str(&data)?;
        Ok(manifest)
    }

    /// The recognizer models needed by the text super-resolution training
    /// and evaluation configs, with the known share-host IDs and mirrors.
    pub fn builtin() -> Self {
        let shared_fallback_ids = [
            "1KKahTJDFVbJhTbMBbTFDPNzKCnsjvjpM",
            "1-5JW3wTRkOw7h4_qVqKJqRdNgqYTSCvt",
        ];

        let candidates = |primary: &str| -> Vec<CandidateSource> {
            std::iter::once(primary)
                .chain(shared_fallback_ids)
                .map(|id| CandidateSource::FileId(id.to_string()))
                .collect()
        };

        Manifest {
            artifacts: vec![
                Artifact {
                    name: "aster.pth.tar".to_string(),
                    min_size_bytes: DEFAULT_MIN_SIZE_BYTES,
                    candidates: candidates("1sOqiX9cqOgXV0qbMHTwl5eSV_5_d1gwc"),
                    mirrors: vec![
                        "https://github.com/ayumiymk/aster.pytorch/releases/download/v1.0/aster.pth.tar"
                            .to_string(),
                        "https://huggingface.co/spaces/akhaliq/ASTER/resolve/main/aster.pth.tar"
                            .to_string(),
                    ],
                    manual_source: Some("https://github.com/ayumiymk/aster.pytorch".to_string()),
                },
                Artifact {
                    name: "moran.pth".to_string(),
                    min_size_bytes: DEFAULT_MIN_SIZE_BYTES,
                    candidates: candidates("1YLDHhtc5EyRNyhvNQS6ywC9htkdT4c7q"),
                    mirrors: vec![
                        "https://github.com/Canjie-Luo/MORAN_v2/releases/download/v1.0/moran.pth"
                            .to_string(),
                    ],
                    manual_source: Some("https://github.com/Canjie-Luo/MORAN_v2".to_string()),
                },
                Artifact {
                    name: "crnn.pth".to_string(),
                    min_size_bytes: DEFAULT_MIN_SIZE_BYTES,
                    candidates: candidates("1ooaHefQp0wDATLvOZlsXyLCjWiHSHKX"),
                    mirrors: vec![
                        "https://github.com/meijieru/crnn.pytorch/releases/download/v1.0/crnn.pth"
                            .to_string(),
                    ],
                    manual_source: Some("https://github.com/meijieru/crnn.pytorch".to_string()),
                },
            ],
        }
    }

    /// Restricts the manifest to the named artifacts. An empty name list
    /// keeps everything; an unknown name is an error rather than a silent
    /// no-op.
    pub fn select(&self, names: &[String]) -> Result<Vec<Artifact>> {
        if names.is_empty() {
            return Ok(self.artifacts.clone());
        }
        let mut selected = Vec::with_capacity(names.len());
        for name in names {
            let artifact = self
                .artifacts
                .iter()
                .find(|a| &a.name == name)
                .ok_or_else(|| {
                    SrfError::NotFound(format!("No artifact named '{name}' in the manifest"))
                })?;
            selected.push(artifact.clone());
        }
        Ok(selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_id_renders_export_and_confirm_urls() {
        let candidate = CandidateSource::FileId("abc123".to_string());
        assert_eq!(
            candidate.download_url().unwrap(),
            "https://drive.google.com/uc?export=download&id=abc123"
        );
        assert_eq!(
            candidate.confirm_url("tok").unwrap(),
            "https://drive.google.com/uc?export=download&confirm=tok&id=abc123"
        );
    }

    #[test]
    fn command_candidate_has_no_url() {
        let candidate = CandidateSource::Command("curl ... -o \"{output}\"".to_string());
        assert!(candidate.download_url().is_none());
        assert!(candidate.confirm_url("tok").is_none());
    }

    #[test]
    fn builtin_manifest_is_complete() {
        let manifest = Manifest::builtin();
        assert_eq!(manifest.artifacts.len(), 3);
        for artifact in &manifest.artifacts {
            assert!(!artifact.candidates.is_empty(), "{} has no candidates", artifact.name);
            assert!(!artifact.mirrors.is_empty(), "{} has no mirrors", artifact.name);
            assert!(artifact.manual_source.is_some());
            assert_eq!(artifact.min_size_bytes, DEFAULT_MIN_SIZE_BYTES);
        }
    }

    #[test]
    fn manifest_parses_from_json() {
        let json = r#"{
            "artifacts": [
                {
                    "name": "foo.bin",
                    "candidates": [
                        { "file_id": "id1" },
                        { "url": "https://example.com/foo.bin" }
                    ],
                    "mirrors": ["https://mirror.example.com/foo.bin"]
                }
            ]
        }"#;
        let manifest: Manifest = serde_json::from_str(json).unwrap();
        let artifact = &manifest.artifacts[0];
        assert_eq!(artifact.name, "foo.bin");
        assert_eq!(artifact.min_size_bytes, DEFAULT_MIN_SIZE_BYTES);
        assert_eq!(artifact.candidates.len(), 2);
        assert!(artifact.manual_source.is_none());
    }

    #[test]
    fn manifest_loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("models.json");
        let json = serde_json::to_string(&Manifest::builtin()).unwrap();
        fs::write(&path, json).unwrap();
        let manifest = Manifest::from_path(&path).unwrap();
        assert_eq!(manifest.artifacts.len(), 3);
        assert!(Manifest::from_path(&dir.path().join("absent.json")).is_err());
    }

    #[test]
    fn select_rejects_unknown_names() {
        let manifest = Manifest::builtin();
        let selected = manifest.select(&["crnn.pth".to_string()]).unwrap();
        assert_eq!(selected.len(), 1);
        assert!(manifest.select(&["nope.pth".to_string()]).is_err());
    }
}
