//! Progress lines on stdout.

use std::io::Write;

use mirror_sync::{Progress, ProgressEvent};

/// Prints one line per [`ProgressEvent`].
pub struct ConsoleProgress<W> {
    out: W,
}

impl ConsoleProgress<std::io::Stdout> {
    /// Print to stdout.
    pub fn stdout() -> Self {
        Self {
            out: std::io::stdout(),
        }
    }
}

impl<W: Write> ConsoleProgress<W> {
    /// Print to any writer.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Consume and return the writer.
    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Format an event as its progress line, without the newline.
pub fn format_event(event: &ProgressEvent) -> String {
    match event {
        ProgressEvent::PackageStarted { package } => package.clone(),
        ProgressEvent::VersionStarted { version } => format!(" {}", version),
        ProgressEvent::ArtifactSynced {
            bucket,
            key,
            fingerprint,
            copied,
        } => {
            let marker = if *copied { '+' } else { '=' };
            format!("  {} {}/{} {}", marker, bucket, key, fingerprint)
        }
        ProgressEvent::VersionDocumentWritten { bucket, key }
        | ProgressEvent::IndexDocumentWritten { bucket, key } => format!("  + {}/{}", bucket, key),
        ProgressEvent::PackageFinished { archives } => format!(" <{} archives>", archives),
    }
}

impl<W: Write + Send> Progress for ConsoleProgress<W> {
    fn on_event(&mut self, event: &ProgressEvent) {
        // Progress output is best-effort.
        if let Err(e) = writeln!(self.out, "{}", format_event(event)) {
            tracing::debug!("failed to write progress: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_for_a_package() {
        let events = [
            ProgressEvent::PackageStarted { package: "aws".into() },
            ProgressEvent::VersionStarted { version: "5.0.0".into() },
            ProgressEvent::ArtifactSynced {
                bucket: "m".into(),
                key: "p/aws_5.0.0_linux_amd64.zip".into(),
                fingerprint: "h1:abc".into(),
                copied: true,
            },
            ProgressEvent::ArtifactSynced {
                bucket: "m".into(),
                key: "p/aws_5.0.0_darwin_arm64.zip".into(),
                fingerprint: "h1:def".into(),
                copied: false,
            },
            ProgressEvent::VersionDocumentWritten {
                bucket: "m".into(),
                key: "p/5.0.0.json".into(),
            },
            ProgressEvent::PackageFinished { archives: 2 },
            ProgressEvent::IndexDocumentWritten {
                bucket: "m".into(),
                key: "p/index.json".into(),
            },
        ];

        let mut progress = ConsoleProgress::new(Vec::new());
        for event in &events {
            progress.on_event(event);
        }
        let output = String::from_utf8(progress.into_inner()).unwrap();

        assert_eq!(
            output,
            "aws\n 5.0.0\n  + m/p/aws_5.0.0_linux_amd64.zip h1:abc\n  = m/p/aws_5.0.0_darwin_arm64.zip h1:def\n  + m/p/5.0.0.json\n <2 archives>\n  + m/p/index.json\n"
        );
    }
}
