//! Benchmark manifest
//!
//! Describes the benchmark settings and, per language, how to build and run
//! its entry. A default manifest covering the suite is embedded in the
//! binary; `--manifest` replaces it with a user file.
//!
//! Relative paths resolve against the manifest root: the directory holding
//! the manifest file, or the current directory for the embedded default.

use crate::error::HarnessError;
use serde::Deserialize;
use std::collections::HashSet;
use std::env::consts::EXE_SUFFIX;
use std::fs;
use std::path::{Path, PathBuf};

/// Embedded default manifest
pub static DEFAULT_MANIFEST: &str = include_str!("manifest.toml");

/// Settings shared by every language entry
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BenchmarkSettings {
    /// Title shown above the results
    #[serde(default = "default_name")]
    pub name: String,
    /// Value every entry must print
    #[serde(default = "default_expected")]
    pub expected: u64,
    /// Measured runs per entry
    #[serde(default = "default_runs")]
    pub runs: u32,
    /// Unmeasured runs before the measured ones
    #[serde(default = "default_warmup")]
    pub warmup: u32,
}

fn default_name() -> String {
    format!("Fibonacci Recursivo (N={})", fibonacci::N)
}

fn default_expected() -> u64 {
    fibonacci::EXPECTED
}

fn default_runs() -> u32 {
    3
}

fn default_warmup() -> u32 {
    1
}

impl Default for BenchmarkSettings {
    fn default() -> Self {
        BenchmarkSettings {
            name: default_name(),
            expected: default_expected(),
            runs: default_runs(),
            warmup: default_warmup(),
        }
    }
}

/// How to build and run one language's benchmark entry
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LanguageEntry {
    /// Unique name, used by `--only`
    pub name: String,
    /// Working directory for build and run, relative to the manifest root
    pub dir: Option<PathBuf>,
    /// Build steps, each an argv, run in order
    #[serde(default)]
    pub build: Vec<Vec<String>>,
    /// Build output; when it exists the build is skipped
    pub artifact: Option<PathBuf>,
    /// Command that runs the benchmark
    pub run: Vec<String>,
    #[serde(skip)]
    root: PathBuf,
}

impl LanguageEntry {
    /// Directory commands for this entry run in
    pub fn working_dir(&self) -> PathBuf {
        match &self.dir {
            Some(dir) => self.root.join(dir),
            None => self.root.clone(),
        }
    }

    /// Absolute-or-root-relative location of the build artifact, with the
    /// platform's executable suffix when the name has no extension
    pub fn artifact_path(&self) -> Option<PathBuf> {
        self.artifact
            .as_ref()
            .map(|a| with_exe_suffix(self.working_dir().join(a), EXE_SUFFIX))
    }

    pub fn has_build_steps(&self) -> bool {
        !self.build.is_empty()
    }
}

/// Append `suffix` (`.exe` on Windows, empty elsewhere) to a path that has
/// no extension of its own
pub fn with_exe_suffix(path: PathBuf, suffix: &str) -> PathBuf {
    if suffix.is_empty() || path.extension().is_some() {
        return path;
    }
    let mut name = path.into_os_string();
    name.push(suffix);
    PathBuf::from(name)
}

/// Parsed manifest
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    #[serde(default)]
    pub benchmark: BenchmarkSettings,
    #[serde(rename = "language", default)]
    pub languages: Vec<LanguageEntry>,
}

impl Manifest {
    /// Parse a manifest; relative paths resolve against `.`
    ///
    /// Only the TOML shape is checked here. Call [`Manifest::validate`] once
    /// command-line overrides have been applied.
    pub fn from_toml(toml_str: &str) -> Result<Self, HarnessError> {
        let mut manifest: Manifest = toml::from_str(toml_str)?;
        manifest.set_root(Path::new("."));
        Ok(manifest)
    }

    /// The embedded default manifest
    pub fn default_manifest() -> Result<Self, HarnessError> {
        Self::from_toml(DEFAULT_MANIFEST)
    }

    /// Read a manifest file; relative paths resolve against its directory
    pub fn from_file(path: &Path) -> Result<Self, HarnessError> {
        let content = fs::read_to_string(path)
            .map_err(|e| HarnessError::io(format!("reading {}", path.display()), e))?;
        let mut manifest = Self::from_toml(&content)?;
        let root = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        manifest.set_root(root);
        Ok(manifest)
    }

    /// Load `path` if given, otherwise the default rooted at the current directory
    pub fn load(path: Option<&Path>) -> Result<Self, HarnessError> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let cwd = std::env::current_dir()
                    .map_err(|e| HarnessError::io("reading current directory", e))?;
                let mut manifest = Self::default_manifest()?;
                manifest.set_root(&cwd);
                Ok(manifest)
            }
        }
    }

    pub fn set_root(&mut self, root: &Path) {
        for entry in &mut self.languages {
            entry.root = root.to_path_buf();
        }
    }

    /// Check settings and entries
    pub fn validate(&self) -> Result<(), HarnessError> {
        if self.benchmark.runs == 0 {
            return Err(HarnessError::Manifest(
                "benchmark.runs must be at least 1".to_string(),
            ));
        }
        if self.languages.is_empty() {
            return Err(HarnessError::Manifest(
                "no [[language]] entries defined".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for entry in &self.languages {
            if entry.name.trim().is_empty() {
                return Err(HarnessError::Manifest(
                    "language name cannot be empty".to_string(),
                ));
            }
            if !seen.insert(entry.name.to_ascii_lowercase()) {
                return Err(HarnessError::Manifest(format!(
                    "language '{}' is defined more than once",
                    entry.name
                )));
            }
            if entry.run.first().is_none_or(|p| p.is_empty()) {
                return Err(HarnessError::Manifest(format!(
                    "language '{}' has an empty run command",
                    entry.name
                )));
            }
            for (i, step) in entry.build.iter().enumerate() {
                if step.first().is_none_or(|p| p.is_empty()) {
                    return Err(HarnessError::Manifest(format!(
                        "language '{}' has an empty build step #{}",
                        entry.name,
                        i + 1
                    )));
                }
            }
        }
        Ok(())
    }

    /// Language names in manifest order
    pub fn names(&self) -> Vec<&str> {
        self.languages.iter().map(|l| l.name.as_str()).collect()
    }

    /// Entries named by `only` (case-insensitive), in manifest order.
    /// An empty filter selects every entry.
    pub fn select(&self, only: &[String]) -> Result<Vec<&LanguageEntry>, HarnessError> {
        if only.is_empty() {
            return Ok(self.languages.iter().collect());
        }

        for name in only {
            if !self
                .languages
                .iter()
                .any(|l| l.name.eq_ignore_ascii_case(name))
            {
                return Err(HarnessError::UnknownLanguage(name.clone()));
            }
        }

        Ok(self
            .languages
            .iter()
            .filter(|l| only.iter().any(|n| l.name.eq_ignore_ascii_case(n)))
            .collect())
    }
}
