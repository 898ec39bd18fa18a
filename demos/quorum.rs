//! # Example: quorum
//!
//! Returns as soon as half of a batch of replicas answered, while the slower
//! replicas keep running in the background.
//!
//! Shows how to:
//! - Register closure tasks with [`Controller::add`].
//! - Stop on a fraction of completions with [`RunOption::percentage`].
//! - Bound the wait with [`RunOption::with_context`].
//! - Attach the built-in [`LogWriter`] subscriber.
//! - Observe the final drain with [`Controller::done`].
//!
//! ## Flow
//! ```text
//! replica-0..5 ──► run(percentage(0.5), with_context(300ms))
//!     ├─► 3 of 6 replicas answered ──► run returns Ok(())
//!     └─► remaining replicas finish ──► done() callback
//! ```
//!
//! ## Run
//! ```bash
//! RUST_LOG=debug cargo run --example quorum
//! ```

use std::{sync::Arc, time::Duration};

use hands::{
    Context, Controller, ControllerConfig, LogWriter, RunOption, Subscribe, TaskError, TaskOption,
};
use tokio::sync::oneshot;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(LogWriter::new())];
    let ctl = Controller::builder(ControllerConfig::default())
        .with_subscribers(subs)
        .build();

    for (i, latency) in [40_u64, 120, 20, 250, 80, 160].into_iter().enumerate() {
        ctl.add(
            move |ctx: Context| async move {
                tokio::select! {
                    _ = ctx.done() => Err(TaskError::Canceled),
                    _ = tokio::time::sleep(Duration::from_millis(latency)) => {
                        println!("[replica-{i}] answered after {latency}ms");
                        Ok(())
                    }
                }
            },
            [TaskOption::label(format!("replica-{i}"))],
        );
    }

    let (tx, drained) = oneshot::channel();
    ctl.done(move || {
        let _ = tx.send(());
    });

    let ctx = Context::with_timeout(Duration::from_millis(300));
    match ctl
        .run([RunOption::percentage(0.5), RunOption::with_context(ctx)])
        .await
    {
        Ok(()) => println!("quorum reached"),
        Err(err) => println!("quorum not reached: {err}"),
    }

    drained.await?;
    println!("all replicas finished");
    Ok(())
}
