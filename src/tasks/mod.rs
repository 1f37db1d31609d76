//! Background Tasks Module
//!
//! Contains background tasks that run periodically while a layer is live.
//!
//! # Tasks
//! - Expiry sweep: removes expired cache entries at the configured interval

mod sweep;

pub(crate) use sweep::spawn_sweep_task;
