//! Ctrl-C handling.

use tokio_util::sync::CancellationToken;

/// Cancels `cancel` when the process receives Ctrl-C.
///
/// Cancelling interrupts a pacing wait in progress, so a long backoff does not
/// keep the process alive. Returns the handle of the listening task.
pub fn shutdown_on_ctrl_c(cancel: CancellationToken) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        tokio::select! {
            result = tokio::signal::ctrl_c() => {
                match result {
                    Ok(()) => log::warn!("Received Ctrl-C, stopping after the current request"),
                    Err(e) => log::error!("Failed to listen for Ctrl-C: {e}"),
                }
                cancel.cancel();
            }
            _ = cancel.cancelled() => {}
        }
    })
}

/// Cancels `cancel` and waits for the listener from [`shutdown_on_ctrl_c`].
///
/// Returns `false` if the listener task panicked or was aborted; that is
/// logged at `debug` since the run itself is already over.
pub async fn stop_ctrl_c_listener(
    cancel: &CancellationToken,
    listener: tokio::task::JoinHandle<()>,
) -> bool {
    cancel.cancel();
    match listener.await {
        Ok(()) => true,
        Err(e) => {
            log::debug!("Ctrl-C listener task did not finish cleanly: {e}");
            false
        }
    }
}
