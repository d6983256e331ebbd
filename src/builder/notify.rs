//! Debounced change notification.
//!
//! Every builder mutation publishes a [`SchemaSnapshot`] on a watch channel.
//! [`debounced`] turns that stream into "settled" notifications for preview
//! or autosave consumers: a snapshot is delivered once no newer one has
//! arrived for `delay`. Only the latest snapshot of a burst is delivered.

use super::types::SchemaSnapshot;
use log::trace;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::sleep;

/// Deliver settled snapshots from `changes` to `sink` until the builder is
/// dropped.
///
/// A burst still settling when the builder goes away is delivered before
/// returning.
pub async fn debounced<F>(mut changes: watch::Receiver<SchemaSnapshot>, delay: Duration, mut sink: F)
where
    F: FnMut(SchemaSnapshot),
{
    while changes.changed().await.is_ok() {
        let closed = loop {
            tokio::select! {
                changed = changes.changed() => {
                    if changed.is_err() {
                        break true;
                    }
                    trace!("Change notification postponed by a newer revision");
                }
                _ = sleep(delay) => break false,
            }
        };

        let snapshot = changes.borrow_and_update().clone();
        trace!("Delivering settled revision {}", snapshot.revision);
        sink(snapshot);

        if closed {
            return;
        }
    }
}
