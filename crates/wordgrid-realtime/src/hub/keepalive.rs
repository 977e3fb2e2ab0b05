//! Cancelable, postponable repeating timer used for hub keep-alives.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;
use tokio::time;
use tokio_util::sync::CancellationToken;

/// Handle to a running keep-alive loop.
///
/// The loop calls `on_fire` every `interval` until it is stopped, the
/// handle is dropped, or `on_fire` returns `false`. [`KeepAlive::postpone`]
/// restarts the current interval.
#[derive(Debug)]
pub struct KeepAlive {
    cancel: CancellationToken,
    postpone: Arc<Notify>,
}

impl KeepAlive {
    /// Spawn the loop on the current tokio runtime.
    ///
    /// Returns `None` outside a runtime; the hub then runs without
    /// keep-alives rather than panicking.
    pub fn start<F>(interval: Duration, on_fire: F) -> Option<Self>
    where
        F: Fn() -> bool + Send + 'static,
    {
        let runtime = tokio::runtime::Handle::try_current().ok()?;

        let cancel = CancellationToken::new();
        let postpone = Arc::new(Notify::new());

        runtime.spawn(run_keepalive(
            interval,
            cancel.clone(),
            Arc::clone(&postpone),
            on_fire,
        ));

        Some(Self { cancel, postpone })
    }

    /// Restart the current interval.
    pub fn postpone(&self) {
        self.postpone.notify_one();
    }

    /// Stop the loop. No further `on_fire` call starts after this returns.
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    /// Whether [`KeepAlive::stop`] has been called.
    pub fn is_stopped(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl Drop for KeepAlive {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn run_keepalive<F>(
    interval: Duration,
    cancel: CancellationToken,
    postpone: Arc<Notify>,
    on_fire: F,
) where
    F: Fn() -> bool + Send + 'static,
{
    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = postpone.notified() => continue,
            _ = time::sleep(interval) => {
                if cancel.is_cancelled() || !on_fire() {
                    break;
                }
            }
        }
    }

    tracing::trace!("Keep-alive loop ended");
}
