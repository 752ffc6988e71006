//! This module contains [`TrackingSession`], which runs a [`KeypointSource`] on a background
//! thread and lets the scene poll its results.

use crate::{DetectorError, HandSnapshot};
use std::{
    sync::Arc,
    thread::{self, JoinHandle},
    time::Duration,
};
use tokio::{
    sync::{oneshot, watch},
    time::MissedTickBehavior,
};
use tracing::{debug, info, instrument, warn};

/// Something that can detect hands, like a camera feeding a landmark model.
pub trait KeypointSource: Send {
    /// A short name for this source, for logging.
    fn name(&self) -> &str;

    /// Acquire whatever this source needs, like the video stream. This is called exactly once, on
    /// the tracking thread, before the first call to [`Self::poll`].
    fn start(&mut self) -> Result<(), DetectorError>;

    /// Get the latest hand from the source, or `None` if there's no hand in view. This should
    /// return promptly.
    fn poll(&mut self) -> Result<Option<HandSnapshot>, DetectorError>;

    /// Release everything acquired in [`Self::start`]. This is called when the session ends, even
    /// if starting failed.
    fn stop(&mut self) {}
}

/// The latest news from the tracking thread.
#[derive(Clone, Debug)]
pub enum DetectorUpdate {
    /// The source hasn't produced anything yet.
    Starting,

    /// The source saw a hand.
    Hand(HandSnapshot),

    /// The source is running but there's no hand in view.
    NoHand,

    /// The source failed to start, so the session is over.
    Failed(Arc<DetectorError>),
}

/// A running keypoint source on its own thread.
///
/// The source is only held while the session is alive. Stopping or dropping the session tells
/// the thread to release the source and waits for it to do so.
#[derive(Debug)]
pub struct TrackingSession {
    /// The latest update from the thread.
    updates: watch::Receiver<DetectorUpdate>,

    /// Send `()` down this to kill the thread.
    kill_tx: Option<oneshot::Sender<()>>,

    /// The thread itself, so that we can wait for it to finish.
    thread: Option<JoinHandle<()>>,

    /// Have we already seen the last update from a thread that has finished?
    finished: bool,
}

impl TrackingSession {
    /// Start running the given source on a new thread, polling it at the given interval.
    pub fn start(
        source: Box<dyn KeypointSource>,
        poll_interval: Duration,
    ) -> Result<Self, DetectorError> {
        let (updates_tx, updates) = watch::channel(DetectorUpdate::Starting);
        let (kill_tx, kill_rx) = oneshot::channel();

        let thread = thread::Builder::new()
            .name("keypoint-source".to_string())
            .spawn(move || run_source(source, poll_interval, updates_tx, kill_rx))
            .map_err(DetectorError::Spawn)?;

        Ok(Self {
            updates,
            kill_tx: Some(kill_tx),
            thread: Some(thread),
            finished: false,
        })
    }

    /// Get the latest update from the source, if there's been one since the last poll. This never
    /// blocks.
    pub fn poll(&mut self) -> Option<DetectorUpdate> {
        match self.updates.has_changed() {
            Ok(true) => Some(self.updates.borrow_and_update().clone()),
            Ok(false) => None,

            // The thread has finished, so its last update is final and nothing new can arrive
            Err(_) if !self.finished => {
                self.finished = true;
                Some(self.updates.borrow_and_update().clone())
            }
            Err(_) => None,
        }
    }

    /// Stop the source and wait for the thread to release it.
    pub fn stop(mut self) {
        self.shut_down();
    }

    /// Kill the thread and join it. Safe to call more than once.
    fn shut_down(&mut self) {
        if let Some(kill_tx) = self.kill_tx.take() {
            // The thread might have already finished by itself, so there's nobody to tell
            let _ = kill_tx.send(());
        }

        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                warn!("Keypoint source thread panicked");
            }
        }
    }
}

impl Drop for TrackingSession {
    fn drop(&mut self) {
        self.shut_down();
    }
}

/// Start the source and poll it until we're told to stop. Intended to be run in a background
/// thread.
#[instrument(skip_all, fields(source = source.name()))]
fn run_source(
    mut source: Box<dyn KeypointSource>,
    poll_interval: Duration,
    updates: watch::Sender<DetectorUpdate>,
    mut kill_rx: oneshot::Receiver<()>,
) {
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
    {
        Ok(runtime) => runtime,
        Err(error) => {
            warn!(?error, "Unable to build runtime for keypoint source");
            updates.send_replace(DetectorUpdate::Failed(Arc::new(DetectorError::Io(error))));
            return;
        }
    };

    if let Err(error) = source.start() {
        warn!(%error, "Keypoint source failed to start");
        source.stop();
        updates.send_replace(DetectorUpdate::Failed(Arc::new(error)));
        return;
    }
    info!("Keypoint source started");

    runtime.block_on(async {
        let mut interval = tokio::time::interval(poll_interval.max(Duration::from_millis(1)));
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                biased;

                // If the sender is dropped without sending, the session is gone, so we stop too
                _ = &mut kill_rx => break,

                _ = interval.tick() => match source.poll() {
                    Ok(Some(hand)) => {
                        updates.send_replace(DetectorUpdate::Hand(hand));
                    }
                    Ok(None) => {
                        updates.send_replace(DetectorUpdate::NoHand);
                    }
                    Err(error) => debug!(%error, "Keypoint source failed to poll; retrying"),
                },
            }
        }
    });

    source.stop();
    info!("Keypoint source stopped");
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use glam::Vec3;
    use std::{
        sync::atomic::{AtomicBool, Ordering},
        time::Instant,
    };

    /// A source that always sees the same hand, and records whether it's been stopped.
    pub(crate) struct FixedSource {
        pub hand: HandSnapshot,
        pub fail_to_start: bool,
        pub stopped: Arc<AtomicBool>,
    }

    impl FixedSource {
        pub fn open_hand() -> Self {
            Self {
                hand: HandSnapshot::with_keypoints(&[
                    (crate::THUMB_TIP, Vec3::new(0.1, 0.5, 0.)),
                    (crate::PINKY_TIP, Vec3::new(0.9, 0.5, 0.)),
                    (crate::MIDDLE_FINGER_KNUCKLE, Vec3::new(0.75, 0.5, 0.)),
                ]),
                fail_to_start: false,
                stopped: Arc::new(AtomicBool::new(false)),
            }
        }
    }

    impl KeypointSource for FixedSource {
        fn name(&self) -> &str {
            "fixed"
        }

        fn start(&mut self) -> Result<(), DetectorError> {
            if self.fail_to_start {
                Err(DetectorError::PermissionDenied)
            } else {
                Ok(())
            }
        }

        fn poll(&mut self) -> Result<Option<HandSnapshot>, DetectorError> {
            Ok(Some(self.hand.clone()))
        }

        fn stop(&mut self) {
            self.stopped.store(true, Ordering::SeqCst);
        }
    }

    /// Poll the session until the predicate matches an update, or panic after two seconds.
    pub(crate) fn wait_for(
        session: &mut TrackingSession,
        mut predicate: impl FnMut(&DetectorUpdate) -> bool,
    ) -> DetectorUpdate {
        let start = Instant::now();
        while start.elapsed() < Duration::from_secs(2) {
            if let Some(update) = session.poll() {
                if predicate(&update) {
                    return update;
                }
            }
            thread::sleep(Duration::from_millis(2));
        }
        panic!("Timed out waiting for a detector update");
    }

    #[test]
    fn session_delivers_hands_test() {
        let source = FixedSource::open_hand();
        let stopped = Arc::clone(&source.stopped);
        let expected = source.hand.clone();

        let mut session = TrackingSession::start(Box::new(source), Duration::from_millis(5)).unwrap();
        let update = wait_for(&mut session, |update| matches!(update, DetectorUpdate::Hand(_)));

        match update {
            DetectorUpdate::Hand(hand) => assert_eq!(hand, expected),
            other => panic!("Expected a hand, got {other:?}"),
        }

        assert!(!stopped.load(Ordering::SeqCst));
        session.stop();
        assert!(stopped.load(Ordering::SeqCst), "Stopping must release the source");
    }

    #[test]
    fn session_reports_failure_test() {
        let source = FixedSource {
            fail_to_start: true,
            ..FixedSource::open_hand()
        };
        let stopped = Arc::clone(&source.stopped);

        let mut session = TrackingSession::start(Box::new(source), Duration::from_millis(5)).unwrap();
        let update = wait_for(&mut session, |update| matches!(update, DetectorUpdate::Failed(_)));

        assert!(matches!(
            update,
            DetectorUpdate::Failed(error) if matches!(*error, DetectorError::PermissionDenied)
        ));

        drop(session);
        assert!(stopped.load(Ordering::SeqCst));
    }
}
