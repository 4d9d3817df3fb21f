//! Periodic stats publisher
//!
//! Pushes the current stats snapshot to every open subscriber on a fixed
//! interval, so dashboards refresh even when no events arrive. A tick
//! never fails fatally; the in-memory read is infallible by construction
//! and the broadcast is best-effort.

use std::sync::Arc;
use std::time::Duration;

use crate::notifier::{Envelope, Notifier};
use crate::store::EventStore;
use crate::tasks::PeriodicTask;

pub fn start(store: Arc<EventStore>, notifier: Arc<Notifier>, period: Duration) -> PeriodicTask {
    PeriodicTask::spawn("stats-publisher", period, move || {
        let stats = store.stats();
        tracing::trace!(
            honeypot_hits = stats.honeypot_hits,
            active_threats = stats.active_threats,
            "Publishing stats snapshot"
        );
        notifier.broadcast(&Envelope::StatsUpdate(stats));
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(flavor = "multi_thread")]
    async fn test_publishes_snapshots_on_interval() {
        let store = Arc::new(EventStore::new());
        let notifier = Arc::new(Notifier::new());
        let (sub, mut rx) = notifier.subscribe();
        notifier.open(sub);

        let task = start(
            Arc::clone(&store),
            Arc::clone(&notifier),
            Duration::from_millis(20),
        );

        let envelope = tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("tick within deadline")
            .expect("channel open");
        match envelope {
            Envelope::StatsUpdate(stats) => assert_eq!(stats.honeypot_hits, 0),
            other => panic!("unexpected envelope: {:?}", other),
        }

        task.stop();
    }
}
