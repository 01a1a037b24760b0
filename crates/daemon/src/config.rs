// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scheduler configuration.
//!
//! Jobs and options come from a TOML file, CLI job specs (`name=command`),
//! or both; CLI values win. Durations are written human-style (`"90s"`,
//! `"5m"`, `"12h"`, `"1h30m"`, or bare seconds). The pidfile path resolves
//! CLI flag > `STEADY_PIDFILE` > config file > a default derived from the
//! registered job names under `$XDG_RUNTIME_DIR`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use steady_core::JobOptions;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file {path}: {source}")]
    Read { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid duration {value:?} (expected e.g. \"90s\", \"5m\", \"12h\")")]
    BadDuration { value: String },
    #[error("invalid job spec {0:?} (expected name=command)")]
    BadJobSpec(String),
    #[error("job {0:?} is registered twice")]
    DuplicateJob(String),
    #[error("no jobs registered; pass name=command specs or a config file")]
    NoJobs,
}

/// One registered job: a stable name plus the command line it runs.
#[derive(Debug, Clone)]
pub struct JobSpec {
    pub name: String,
    pub command: String,
    pub options: JobOptions,
}

/// Fully resolved scheduler configuration.
#[derive(Debug)]
pub struct Config {
    pub pidfile: PathBuf,
    pub allow_concurrent: bool,
    pub kill_concurrent: bool,
    pub notify: Vec<String>,
    pub jobs: Vec<JobSpec>,
}

/// Caller-supplied values that override the config file.
#[derive(Debug, Default)]
pub struct Overrides {
    pub config: Option<PathBuf>,
    pub pidfile: Option<PathBuf>,
    pub allow_concurrent: bool,
    pub no_kill_concurrent: bool,
    pub notify: Vec<String>,
    /// `name=command` specs, appended after the config file's jobs
    pub jobs: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    pidfile: Option<PathBuf>,
    allow_concurrent: Option<bool>,
    kill_concurrent: Option<bool>,
    #[serde(default)]
    notify: Vec<String>,
    #[serde(default, rename = "job")]
    jobs: Vec<JobEntry>,
}

#[derive(Debug, Deserialize)]
struct JobEntry {
    name: String,
    command: String,
    success_cooldown: Option<String>,
    fail_cooldown: Option<String>,
    non_recoverable_downtime: Option<String>,
    logger_name: Option<String>,
    run_as_uid: Option<u32>,
    run_as_gid: Option<u32>,
}

impl JobEntry {
    fn into_spec(self) -> Result<JobSpec, ConfigError> {
        let mut options = JobOptions::default();
        if let Some(v) = self.success_cooldown {
            options.success_cooldown = parse_duration(&v)?;
        }
        if let Some(v) = self.fail_cooldown {
            options.fail_cooldown = parse_duration(&v)?;
        }
        if let Some(v) = self.non_recoverable_downtime {
            options.non_recoverable_downtime = parse_duration(&v)?;
        }
        if let Some(v) = self.logger_name {
            options.logger_name = v;
        }
        options.run_as_uid = self.run_as_uid;
        options.run_as_gid = self.run_as_gid;
        Ok(JobSpec { name: self.name, command: self.command, options })
    }
}

impl Config {
    /// Load the config file (if any) and fold in the overrides.
    pub fn load(overrides: Overrides) -> Result<Self, ConfigError> {
        let file = match &overrides.config {
            Some(path) => read_config_file(path)?,
            None => ConfigFile::default(),
        };

        let mut jobs = Vec::new();
        for entry in file.jobs {
            jobs.push(entry.into_spec()?);
        }
        for spec in &overrides.jobs {
            jobs.push(parse_job_spec(spec)?);
        }
        if jobs.is_empty() {
            return Err(ConfigError::NoJobs);
        }
        for (i, job) in jobs.iter().enumerate() {
            if jobs[..i].iter().any(|other| other.name == job.name) {
                return Err(ConfigError::DuplicateJob(job.name.clone()));
            }
        }

        let pidfile = overrides
            .pidfile
            .or_else(|| std::env::var_os("STEADY_PIDFILE").map(PathBuf::from))
            .or(file.pidfile)
            .unwrap_or_else(|| default_pidfile(&jobs));

        let mut notify = file.notify;
        notify.extend(overrides.notify);

        Ok(Self {
            pidfile,
            allow_concurrent: overrides.allow_concurrent || file.allow_concurrent.unwrap_or(false),
            kill_concurrent: file.kill_concurrent.unwrap_or(true) && !overrides.no_kill_concurrent,
            notify,
            jobs,
        })
    }
}

fn read_config_file(path: &Path) -> Result<ConfigFile, ConfigError> {
    let contents = std::fs::read_to_string(path)
        .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
    Ok(toml::from_str(&contents)?)
}

/// Parse a `name=command` CLI job spec with default options.
pub fn parse_job_spec(spec: &str) -> Result<JobSpec, ConfigError> {
    let (name, command) = spec
        .split_once('=')
        .ok_or_else(|| ConfigError::BadJobSpec(spec.to_string()))?;
    let name = name.trim();
    let command = command.trim();
    if name.is_empty() || command.is_empty() {
        return Err(ConfigError::BadJobSpec(spec.to_string()));
    }
    Ok(JobSpec {
        name: name.to_string(),
        command: command.to_string(),
        options: JobOptions::default(),
    })
}

/// Parse a human duration: bare seconds (`"90"`) or unit segments
/// (`"45s"`, `"5m"`, `"12h"`, `"2d"`, `"1h30m"`).
pub fn parse_duration(value: &str) -> Result<Duration, ConfigError> {
    let bad = || ConfigError::BadDuration { value: value.to_string() };
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(bad());
    }
    if trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Ok(Duration::from_secs(trimmed.parse().map_err(|_| bad())?));
    }

    let mut total: u64 = 0;
    let mut digits = String::new();
    for c in trimmed.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
            continue;
        }
        if c.is_whitespace() {
            continue;
        }
        let amount: u64 = digits.parse().map_err(|_| bad())?;
        digits.clear();
        let unit: u64 = match c {
            's' => 1,
            'm' => 60,
            'h' => 3600,
            'd' => 86_400,
            _ => return Err(bad()),
        };
        total = amount.checked_mul(unit).and_then(|v| total.checked_add(v)).ok_or_else(bad)?;
    }
    if !digits.is_empty() {
        // trailing digits without a unit
        return Err(bad());
    }
    Ok(Duration::from_secs(total))
}

/// Default pidfile path, named after the registered jobs.
fn default_pidfile(jobs: &[JobSpec]) -> PathBuf {
    let name: String =
        jobs.iter().map(|j| j.name.as_str()).collect::<Vec<_>>().join("_");
    if let Some(dir) = std::env::var_os("XDG_RUNTIME_DIR") {
        return PathBuf::from(dir).join("steady").join(format!("{name}.pid"));
    }
    std::env::temp_dir().join(format!("steady-{name}.pid"))
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
