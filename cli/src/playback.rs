//! Real-time playback
//!
//! Advances a session's game clock on a tokio interval so delayed actions
//! fire while the prompt stays responsive.

use std::time::Duration;

use tokio::task::JoinHandle;

use crate::context::SessionHandle;

/// Spawn a ticking task. Runs for `limit` of game time, or until nothing is
/// pending when no limit is given.
pub fn spawn_playback(
    session: SessionHandle,
    tick: Duration,
    limit: Option<Duration>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(tick);
        // first tick completes immediately
        interval.tick().await;

        let mut elapsed = Duration::ZERO;
        loop {
            interval.tick().await;
            elapsed += tick;

            let mut s = session.write().await;
            match s.advance(tick) {
                Ok(ran) if ran > 0 => {
                    let label = s.elapsed_label();
                    for entry in s.set.context().drain_journal() {
                        println!("[{label}] {entry}");
                    }
                }
                Ok(_) => {}
                Err(err) => {
                    tracing::warn!(error = %err, "playback stopped");
                    break;
                }
            }

            let done = match limit {
                Some(limit) => elapsed >= limit,
                None => s.set.pending() == 0,
            };
            if done {
                tracing::debug!(elapsed_ms = elapsed.as_millis() as u64, "playback finished");
                break;
            }
        }
    })
}
