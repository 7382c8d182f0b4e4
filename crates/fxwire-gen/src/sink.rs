//! Output seams: diagnostics and generated sources.
//!
//! The generator never talks to a messenger or filesystem directly; it is
//! handed a sink for each. Memory sinks back the tests, the filesystem sink
//! lays sources out under a generated-sources root the way annotation
//! processor output conventionally lands on disk.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use fxwire_types::Diagnostic;

pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

#[derive(Debug, Default)]
pub struct MemoryDiagnostics {
    pub diagnostics: Vec<Diagnostic>,
}

impl MemoryDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == fxwire_types::Severity::Warning)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == fxwire_types::Severity::Error)
    }
}

impl DiagnosticSink for MemoryDiagnostics {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("failed to write generated source for `{qualified_name}`")]
    Io {
        qualified_name: String,
        #[source]
        source: io::Error,
    },
}

pub trait SourceSink {
    /// Persists one generated compilation unit, addressed by the qualified
    /// name of the type it declares.
    fn write(&mut self, qualified_name: &str, source: &str) -> Result<(), WriteError>;
}

#[derive(Debug, Default)]
pub struct MemorySources {
    pub sources: Vec<(String, String)>,
}

impl MemorySources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, qualified_name: &str) -> Option<&str> {
        self.sources
            .iter()
            .find(|(name, _)| name == qualified_name)
            .map(|(_, source)| source.as_str())
    }
}

impl SourceSink for MemorySources {
    fn write(&mut self, qualified_name: &str, source: &str) -> Result<(), WriteError> {
        self.sources
            .push((qualified_name.to_string(), source.to_string()));
        Ok(())
    }
}

/// Writes `com.example.Foo` to `<root>/com/example/Foo.java`.
#[derive(Debug)]
pub struct FsSourceSink {
    root: PathBuf,
}

impl FsSourceSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, qualified_name: &str) -> PathBuf {
        let mut path = self.root.clone();
        let mut segments = qualified_name.split('.').peekable();
        while let Some(segment) = segments.next() {
            if segments.peek().is_some() {
                path.push(segment);
            } else {
                path.push(format!("{segment}.java"));
            }
        }
        path
    }
}

impl SourceSink for FsSourceSink {
    fn write(&mut self, qualified_name: &str, source: &str) -> Result<(), WriteError> {
        let path = self.path_for(qualified_name);
        let io_err = |source| WriteError::Io {
            qualified_name: qualified_name.to_string(),
            source,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        std::fs::write(&path, source).map_err(io_err)?;
        tracing::debug!(path = %path.display(), "wrote generated source");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fs_sink_lays_out_package_directories() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = FsSourceSink::new(dir.path());
        sink.write("com.example.ui.MainViewGenerated", "class MainViewGenerated {}\n")
            .unwrap();

        let expected = dir
            .path()
            .join("com")
            .join("example")
            .join("ui")
            .join("MainViewGenerated.java");
        let text = std::fs::read_to_string(expected).unwrap();
        assert_eq!(text, "class MainViewGenerated {}\n");
    }

    #[test]
    fn fs_sink_handles_default_package() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = FsSourceSink::new(dir.path());
        sink.write("Lone", "class Lone {}\n").unwrap();
        assert!(dir.path().join("Lone.java").is_file());
    }
}
