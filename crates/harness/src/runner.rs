//! Builds language entries and times their runs
//!
//! Entries run one at a time and every run is a fresh process, so start-up
//! cost is part of the measurement for every language alike.

use crate::error::HarnessError;
use crate::manifest::{BenchmarkSettings, LanguageEntry, with_exe_suffix};
use fibonacci::parse_result_line;
use std::env::consts::EXE_SUFFIX;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Result of the build phase for one entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome {
    /// No build steps configured
    NotRequired,
    /// Artifact already present, build skipped
    UpToDate,
    /// All build steps succeeded
    Built,
    /// A build step failed; holds its output or spawn error
    Failed(String),
}

/// Final status of one entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Ok,
    /// A run failed or printed the wrong result
    Error(String),
    BuildFailed(String),
}

impl Status {
    pub fn label(&self) -> &'static str {
        match self {
            Status::Ok => "OK",
            Status::Error(_) => "ERROR",
            Status::BuildFailed(_) => "BUILD FAILED",
        }
    }

    pub fn detail(&self) -> Option<&str> {
        match self {
            Status::Ok => None,
            Status::Error(msg) | Status::BuildFailed(msg) => Some(msg.as_str()),
        }
    }
}

/// Timings and status for one entry
#[derive(Debug, Clone)]
pub struct LanguageResult {
    pub name: String,
    pub status: Status,
    /// Measured runs only; warmup runs are discarded
    pub times: Vec<Duration>,
}

impl LanguageResult {
    /// Mean of the measured runs, `None` unless the entry finished OK
    pub fn mean(&self) -> Option<Duration> {
        if self.status != Status::Ok || self.times.is_empty() {
            return None;
        }
        let total: Duration = self.times.iter().sum();
        Some(total / self.times.len() as u32)
    }
}

/// Executes builds and timed runs for a set of entries
pub struct Runner {
    settings: BenchmarkSettings,
    /// Build even when the artifact exists
    rebuild: bool,
}

impl Runner {
    pub fn new(settings: BenchmarkSettings) -> Self {
        Runner {
            settings,
            rebuild: false,
        }
    }

    pub fn with_rebuild(mut self, rebuild: bool) -> Self {
        self.rebuild = rebuild;
        self
    }

    pub fn settings(&self) -> &BenchmarkSettings {
        &self.settings
    }

    /// Run the build steps of `entry`, unless its artifact is already there
    pub fn build(&self, entry: &LanguageEntry) -> BuildOutcome {
        if !entry.has_build_steps() {
            return BuildOutcome::NotRequired;
        }

        if !self.rebuild
            && let Some(artifact) = entry.artifact_path()
            && artifact.exists()
        {
            debug!(
                language = %entry.name,
                artifact = %artifact.display(),
                "artifact present, skipping build"
            );
            return BuildOutcome::UpToDate;
        }

        let workdir = entry.working_dir();
        for step in &entry.build {
            info!(language = %entry.name, command = %step.join(" "), "building");
            let output = match execute(step, &workdir) {
                Ok(output) => output,
                Err(e) => return BuildOutcome::Failed(e.to_string()),
            };
            if !output.status.success() {
                let stdout = String::from_utf8_lossy(&output.stdout);
                let stderr = String::from_utf8_lossy(&output.stderr);
                let mut message = format!("{}{}", stdout, stderr).trim().to_string();
                if message.is_empty() {
                    message = format!("`{}` exited with {}", step.join(" "), output.status);
                }
                return BuildOutcome::Failed(message);
            }
        }
        BuildOutcome::Built
    }

    /// Time `warmup + runs` executions of `entry`, stopping at the first failure
    pub fn run(&self, entry: &LanguageEntry) -> LanguageResult {
        let workdir = entry.working_dir();
        let total = self.settings.warmup.saturating_add(self.settings.runs);
        let mut times = Vec::with_capacity(self.settings.runs as usize);

        for i in 0..total {
            let start = Instant::now();
            let output = execute(&entry.run, &workdir);
            let elapsed = start.elapsed();

            if let Err(message) = self.check_output(output) {
                warn!(language = %entry.name, run = i + 1, "{}", message);
                return LanguageResult {
                    name: entry.name.clone(),
                    status: Status::Error(message),
                    times: Vec::new(),
                };
            }

            let warmup = i < self.settings.warmup;
            debug!(
                language = %entry.name,
                run = i + 1,
                elapsed_ms = elapsed.as_millis() as u64,
                warmup,
                "run finished"
            );
            if !warmup {
                times.push(elapsed);
            }
        }

        LanguageResult {
            name: entry.name.clone(),
            status: Status::Ok,
            times,
        }
    }

    /// Build then run every entry in order
    pub fn run_all(&self, entries: &[&LanguageEntry]) -> Vec<LanguageResult> {
        entries
            .iter()
            .map(|entry| match self.build(entry) {
                BuildOutcome::Failed(message) => {
                    warn!(language = %entry.name, "build failed");
                    LanguageResult {
                        name: entry.name.clone(),
                        status: Status::BuildFailed(message),
                        times: Vec::new(),
                    }
                }
                _ => {
                    let result = self.run(entry);
                    if let Some(mean) = result.mean() {
                        info!(language = %entry.name, mean_secs = mean.as_secs_f64(), "done");
                    }
                    result
                }
            })
            .collect()
    }

    fn check_output(&self, output: Result<Output, HarnessError>) -> Result<(), String> {
        let output = output.map_err(|e| e.to_string())?;
        let stdout = String::from_utf8_lossy(&output.stdout);

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let detail = if stderr.trim().is_empty() {
                stdout.trim().to_string()
            } else {
                stderr.trim().to_string()
            };
            return Err(format!("exited with {}: {}", output.status, detail));
        }

        match find_result(&stdout) {
            Some(value) if value == self.settings.expected => Ok(()),
            _ => Err(format!("unexpected output: {}", stdout.trim())),
        }
    }
}

/// Value of the first result line in `stdout`
fn find_result(stdout: &str) -> Option<u64> {
    stdout
        .lines()
        .filter_map(parse_result_line)
        .map(|(_, value)| value)
        .next()
}

/// Spawn `argv` in `workdir` and wait for it
fn execute(argv: &[String], workdir: &Path) -> Result<Output, HarnessError> {
    // Manifest::validate rejects empty `run` and `build` commands; this only
    // guards entries built without going through it.
    let Some((program, args)) = argv.split_first() else {
        return Err(HarnessError::Manifest("empty command".to_string()));
    };
    let program = resolve_program(program, workdir);

    Command::new(&program)
        .args(args)
        .current_dir(workdir)
        .output()
        .map_err(|e| HarnessError::io(format!("running {}", program.display()), e))
}

/// Relative paths such as `./bench` or `target/release/bench` are taken
/// relative to `workdir` and get the platform's executable suffix; bare
/// names are left for `PATH` lookup.
fn resolve_program(program: &str, workdir: &Path) -> PathBuf {
    let path = Path::new(program);
    if path.is_relative() && path.components().count() > 1 {
        with_exe_suffix(workdir.join(path), EXE_SUFFIX)
    } else {
        path.to_path_buf()
    }
}
