//! Expiry Sweep Task
//!
//! Background task that periodically removes expired cache entries.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::layer::LayerInner;
use crate::store::Store;
use crate::time::Time;

/// Spawns a task that sweeps expired entries every `interval`.
///
/// The task runs in an infinite loop, sleeping for the interval between
/// passes. Each pass takes the layer's lock, so a sweep interleaves with
/// application calls only at call boundaries, never mid-call. Sweep
/// failures have no caller to surface to and are logged instead.
///
/// The returned handle is owned by the layer and aborted on `dispose` or
/// drop.
pub(crate) fn spawn_sweep_task<S>(
    inner: Arc<Mutex<LayerInner<S>>>,
    interval: Time,
) -> JoinHandle<()>
where
    S: Store + Send + 'static,
    S::Value: 'static,
{
    let period = interval.to_duration();

    tokio::spawn(async move {
        info!(
            interval_ms = interval.as_millis(),
            "starting expiry sweep task"
        );

        loop {
            tokio::time::sleep(period).await;

            let swept = {
                let mut inner = inner.lock();
                inner.sweep()
            };

            match swept {
                Ok(0) => debug!("expiry sweep: nothing to remove"),
                Ok(count) => info!(count, "expiry sweep: removed expired entries"),
                Err(err) => warn!(error = %err, "expiry sweep failed"),
            }
        }
    })
}
