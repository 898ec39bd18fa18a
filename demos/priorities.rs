//! # Example: priorities
//!
//! Runs the critical part of a warm-up sequence first and lets the rest
//! start in the background once it is done.
//!
//! Shows how to:
//! - Tag tasks with [`TaskOption::priority`] and [`TaskOption::label`].
//! - Select an inclusive priority range with [`RunOption::between`].
//! - Launch the unselected tasks afterwards with [`Controller::run_all`].
//! - Implement [`Task`] on a struct instead of using a closure.
//!
//! ## Flow
//! ```text
//! run_all(between(0, 1))
//!     ├─► eligible: config (0), schema (1)   ── wait for both
//!     └─► deferred: cache (5), metrics (9)   ── launched after the round
//! ```
//!
//! ## Run
//! ```bash
//! RUST_LOG=debug cargo run --example priorities
//! ```

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use hands::{Context, Controller, RunOption, Task, TaskError, TaskOption};
use tokio::sync::oneshot;
use tracing_subscriber::EnvFilter;

/// A warm-up step that takes a fixed amount of time.
struct Warmup {
    name: &'static str,
    cost: Duration,
}

#[async_trait]
impl Task for Warmup {
    async fn run(&self, ctx: Context) -> Result<(), TaskError> {
        if ctx.is_cancelled() {
            return Err(TaskError::Canceled);
        }
        tokio::time::sleep(self.cost).await;
        tracing::info!(step = self.name, "warm-up step finished");
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let ctl = Controller::new();
    for (name, priority, ms) in [
        ("config", 0, 30_u64),
        ("schema", 1, 60),
        ("cache", 5, 200),
        ("metrics", 9, 100),
    ] {
        ctl.add_task(
            Arc::new(Warmup {
                name,
                cost: Duration::from_millis(ms),
            }),
            [TaskOption::priority(priority), TaskOption::label(name)],
        );
    }

    let (tx, drained) = oneshot::channel();
    ctl.done(move || {
        let _ = tx.send(());
    });

    ctl.run_all([RunOption::between(0, 1)]).await?;
    println!("critical warm-up done; {} task(s) still running", ctl.outstanding());

    drained.await?;
    println!("warm-up complete");
    Ok(())
}
