//! Content fingerprints.
//!
//! The fingerprint of an archive is computed by an external program
//! (`dirhasher` by default) that hashes the archive's decompressed contents
//! and prints the result. The mirror never computes it itself.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;

/// Program run when no other is configured.
pub const DEFAULT_FINGERPRINT_PROGRAM: &str = "dirhasher";

/// Fingerprint procedure errors. All of them abort the run.
#[derive(Debug, Error)]
pub enum FingerprintError {
    /// The program could not be started.
    #[error("failed to run {program}: {source}")]
    Spawn {
        /// Program that was run.
        program: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The program exited unsuccessfully.
    #[error("{program} failed with code: {}", exit_code(.code))]
    Failed {
        /// Program that was run.
        program: String,
        /// Exit code, `None` if killed by a signal.
        code: Option<i32>,
    },

    /// The program printed something that is not a fingerprint.
    #[error("{program} produced invalid output for {path}: {reason}")]
    InvalidOutput {
        /// Program that was run.
        program: String,
        /// Archive being fingerprinted.
        path: PathBuf,
        /// What was wrong.
        reason: String,
    },
}

fn exit_code(code: &Option<i32>) -> String {
    code.map_or_else(|| "signal".to_string(), |c| c.to_string())
}

/// Computes an archive's fingerprint.
#[async_trait]
pub trait Fingerprinter: Send + Sync {
    /// Fingerprint the archive at `path`.
    async fn fingerprint(&self, path: &Path) -> Result<String, FingerprintError>;
}

/// Runs an external program as `program [args...] <path>` and takes its
/// trimmed stdout as the fingerprint.
#[derive(Clone, Debug)]
pub struct CommandFingerprinter {
    program: OsString,
    args: Vec<OsString>,
}

impl CommandFingerprinter {
    /// Run `program` with the archive path as its only argument.
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Add arguments placed before the archive path.
    pub fn with_args<I, A>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    fn program_name(&self) -> String {
        self.program.to_string_lossy().into_owned()
    }
}

impl Default for CommandFingerprinter {
    fn default() -> Self {
        Self::new(DEFAULT_FINGERPRINT_PROGRAM)
    }
}

#[async_trait]
impl Fingerprinter for CommandFingerprinter {
    async fn fingerprint(&self, path: &Path) -> Result<String, FingerprintError> {
        let output = tokio::process::Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| FingerprintError::Spawn {
                program: self.program_name(),
                source,
            })?;

        if !output.status.success() {
            return Err(FingerprintError::Failed {
                program: self.program_name(),
                code: output.status.code(),
            });
        }

        let stdout = String::from_utf8(output.stdout).map_err(|_| FingerprintError::InvalidOutput {
            program: self.program_name(),
            path: path.to_path_buf(),
            reason: "output is not UTF-8".to_string(),
        })?;
        let fingerprint = stdout.trim();
        if fingerprint.is_empty() {
            return Err(FingerprintError::InvalidOutput {
                program: self.program_name(),
                path: path.to_path_buf(),
                reason: "output is empty".to_string(),
            });
        }

        tracing::debug!("fingerprint of {}: {}", path.display(), fingerprint);
        Ok(fingerprint.to_string())
    }
}
