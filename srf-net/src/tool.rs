// srf-net/src/tool.rs
use std::path::Path;

use async_trait::async_trait;
use srf_common::error::{Result, SrfError};
use srf_common::model::{Artifact, CandidateSource};
use tracing::debug;

use crate::transport::Transport;

/// External download-tool invocation. Two instances exist, differing only
/// in which binary and argument syntax they use; both share the same
/// contract: exit code zero is success, anything else is a transport
/// failure carrying the tool's stderr. A binary missing from the host
/// surfaces as a shell "command not found" exit, not a crash.
pub struct ToolFetch {
    binary: &'static str,
    template: &'static str,
}

impl ToolFetch {
    pub fn wget() -> Self {
        Self {
            binary: "wget",
            template: r#"wget --no-check-certificate "{url}" -O "{output}""#,
        }
    }

    pub fn curl() -> Self {
        Self {
            binary: "curl",
            template: r#"curl -L "{url}" -o "{output}""#,
        }
    }

    fn render_command(&self, candidate: &CandidateSource, dest: &Path) -> Option<String> {
        let output = dest.display().to_string();
        match candidate {
            // Command candidates embed their own URL and tooling.
            CandidateSource::Command(template) => Some(template.replace("{output}", &output)),
            other => {
                let url = other.download_url()?;
                Some(
                    self.template
                        .replace("{url}", &url)
                        .replace("{output}", &output),
                )
            }
        }
    }
}

#[async_trait]
impl Transport for ToolFetch {
    fn name(&self) -> &'static str {
        self.binary
    }

    async fn attempt(
        &self,
        artifact: &Artifact,
        candidate: &CandidateSource,
        dest: &Path,
    ) -> Result<()> {
        let command = self.render_command(candidate, dest).ok_or_else(|| {
            SrfError::Generic(format!(
                "Candidate for '{}' has no download URL",
                artifact.name
            ))
        })?;

        debug!("Running: {}", command);
        let output = tokio::process::Command::new("sh")
            .arg("-c")
            .arg(&command)
            .output()
            .await
            .map_err(|e| {
                SrfError::CommandExecError(format!("Failed to spawn shell for {}: {}", self.binary, e))
            })?;

        if output.status.success() {
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(SrfError::CommandExecError(format!(
                "{} exited with {}: {}",
                self.binary,
                output.status,
                stderr.trim()
            )))
        }
    }
}
