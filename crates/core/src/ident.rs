//! Identity for observable instances.
//!
//! Every observable object and list is assigned a unique id at
//! construction. Event provenance and subject comparison use the id, so
//! two handles to the same underlying observable always compare equal.

use core::sync::atomic::{AtomicU64, Ordering};

/// Unique identifier for an observable instance.
pub type ObservableId = u64;

/// Global observable ID counter.
static NEXT_OBSERVABLE_ID: AtomicU64 = AtomicU64::new(1);

/// Gets the next unique observable ID.
pub fn next_observable_id() -> ObservableId {
    NEXT_OBSERVABLE_ID.fetch_add(1, Ordering::SeqCst)
}
