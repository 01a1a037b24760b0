// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `steadyd` - run a set of registered jobs forever.
//!
//! Exit codes: 0 only on graceful shutdown (the loop is infinite by
//! default), 2 on an unresolved concurrency conflict, 1 on anything else.

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use steady_core::{SystemClock, ThreadSleeper};
use steady_daemon::config::Overrides;
use steady_daemon::{
    CommandJob, Config, DesktopNotifySink, GuardError, InstanceGuard, Job, Scheduler, TaskRunner,
};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Continuously run a set of jobs, absorbing and escalating failures.
#[derive(Parser)]
#[command(name = "steadyd", version)]
struct Cli {
    /// Jobs to run, as name=command specs (appended after config file jobs)
    jobs: Vec<String>,

    /// Path to a TOML config file declaring jobs and options
    #[arg(long)]
    config: Option<std::path::PathBuf>,

    /// Pidfile path (default: derived from job names, or $STEADY_PIDFILE)
    #[arg(long)]
    pidfile: Option<std::path::PathBuf>,

    /// Tolerate a live competing instance instead of resolving it
    #[arg(long)]
    allow_concurrent: bool,

    /// Fail instead of terminating a live competing instance
    #[arg(long)]
    no_kill_concurrent: bool,

    /// Notification recipients (repeatable)
    #[arg(long = "notify")]
    notify: Vec<String>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("STEADY_LOG").unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            if e.downcast_ref::<GuardError>().is_some() {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load(Overrides {
        config: cli.config,
        pidfile: cli.pidfile,
        allow_concurrent: cli.allow_concurrent,
        no_kill_concurrent: cli.no_kill_concurrent,
        notify: cli.notify,
        jobs: cli.jobs,
    })?;

    if let Some(parent) = config.pidfile.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating pidfile directory {}", parent.display()))?;
    }

    let guard =
        InstanceGuard::new(&config.pidfile, config.allow_concurrent, config.kill_concurrent);

    let runners = config
        .jobs
        .iter()
        .map(|spec| {
            info!(
                task = %spec.name,
                command = %spec.command,
                success_cooldown = ?spec.options.success_cooldown,
                fail_cooldown = ?spec.options.fail_cooldown,
                "registered job"
            );
            if spec.options.run_as_uid.is_some() || spec.options.run_as_gid.is_some() {
                warn!(task = %spec.name, "run_as uid/gid accepted but not enforced here");
            }
            TaskRunner::new(
                spec.name.clone(),
                spec.options.clone(),
                Box::new(CommandJob::new(&spec.command)) as Box<dyn Job>,
                config.notify.clone(),
                SystemClock,
                ThreadSleeper,
                DesktopNotifySink::new(),
            )
        })
        .collect();

    let mut scheduler = Scheduler::new(guard, runners);
    scheduler.run()?;
    Ok(())
}
