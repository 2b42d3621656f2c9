//! Spinner shown while waiting on the network.

use std::future::Future;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Start a ticking spinner with `msg`. Hidden when `hidden` is true.
pub(crate) fn start(hidden: bool, msg: impl Into<String>) -> ProgressBar {
    if hidden {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("  {spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars("/-\\|");
    pb.set_style(style);
    pb.set_message(msg.into());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Drive `fut` to completion behind a spinner, clearing the line afterwards.
pub(crate) async fn while_waiting<F: Future>(
    hidden: bool,
    msg: impl Into<String>,
    fut: F,
) -> F::Output {
    let pb = start(hidden, msg);
    let output = fut.await;
    pb.finish_and_clear();
    output
}
