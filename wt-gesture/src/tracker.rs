//! This module contains [`GestureTracker`], which ties a [`GestureInputAdapter`] to a
//! [`TrackingSession`] that only exists while tracking is enabled.

use crate::{
    DetectorError, DetectorUpdate, GestureConfig, GestureInputAdapter, GestureState,
    KeypointSource, TrackingSession,
};
use glam::Vec2;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// A function that makes a fresh keypoint source every time tracking is enabled.
pub type SourceFactory = Box<dyn FnMut() -> Result<Box<dyn KeypointSource>, DetectorError> + Send>;

/// Gesture tracking for the scene.
///
/// While tracking is enabled, a [`TrackingSession`] runs in the background and every tick feeds
/// its latest hand to the adapter. While tracking is disabled, there is no session at all and the
/// gesture state is frozen.
pub struct GestureTracker {
    /// The config for the adapter and the session.
    config: GestureConfig,

    /// The adapter that smooths the hand into scene controls.
    adapter: GestureInputAdapter,

    /// Makes keypoint sources. If this is `None`, tracking can never be enabled.
    factory: Option<SourceFactory>,

    /// The running session, if tracking is enabled.
    session: Option<TrackingSession>,
}

impl GestureTracker {
    /// Create a new tracker with tracking disabled.
    pub fn new(config: GestureConfig, factory: Option<SourceFactory>) -> Self {
        let adapter = GestureInputAdapter::new(&config);
        Self {
            config,
            adapter,
            factory,
            session: None,
        }
    }

    /// Turn tracking on or off, returning whether tracking is now enabled.
    ///
    /// Turning tracking on can fail if there's no keypoint source available. That's logged and
    /// tracking just stays off. Turning it off stops the source and waits for it to be released
    /// before returning.
    #[instrument(skip(self))]
    pub fn set_enabled(&mut self, enabled: bool) -> bool {
        match (enabled, self.session.is_some()) {
            (true, true) | (false, false) => {}
            (true, false) => match self.start_session() {
                Ok(session) => {
                    info!("Hand tracking enabled");
                    self.session = Some(session);
                }
                Err(error) => warn!(%error, "Unable to start hand tracking"),
            },
            (false, true) => self.stop_session(),
        }

        self.is_enabled()
    }

    /// Make a new source and start it in a session.
    fn start_session(&mut self) -> Result<TrackingSession, DetectorError> {
        let factory = self.factory.as_mut().ok_or_else(|| {
            DetectorError::Unavailable("no keypoint source is configured".to_string())
        })?;

        TrackingSession::start(
            factory()?,
            Duration::from_millis(self.config.poll_interval_ms),
        )
    }

    /// Stop the current session, if there is one.
    fn stop_session(&mut self) {
        if let Some(session) = self.session.take() {
            session.stop();
            info!("Hand tracking disabled");
        }
    }

    /// Is tracking enabled?
    pub fn is_enabled(&self) -> bool {
        self.session.is_some()
    }

    /// Poll the session for a new hand and smooth the scene controls over `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        if let Some(session) = &mut self.session {
            match session.poll() {
                Some(DetectorUpdate::Hand(hand)) => {
                    self.adapter.observe(&hand, &self.config);
                }
                Some(DetectorUpdate::Failed(error)) => {
                    warn!(%error, "Hand tracking failed, so disabling it");
                    self.stop_session();
                }
                Some(DetectorUpdate::NoHand | DetectorUpdate::Starting) | None => {}
            }
        }

        self.adapter.tick(&self.config, dt, self.is_enabled());
    }

    /// Stop tracking for good.
    pub fn shutdown(&mut self) {
        debug!("Shutting down gesture tracker");
        self.stop_session();
    }

    /// The latest interpreted gesture.
    pub fn state(&self) -> GestureState {
        self.adapter.state()
    }

    /// The current smoothed scale of the scene.
    pub fn scale(&self) -> f32 {
        self.adapter.scale()
    }

    /// The current smoothed rotation of the scene, with pitch in `x` and yaw in `y`.
    pub fn rotation(&self) -> Vec2 {
        self.adapter.rotation()
    }
}

impl std::fmt::Debug for GestureTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GestureTracker")
            .field("config", &self.config)
            .field("adapter", &self.adapter)
            .field("has_factory", &self.factory.is_some())
            .field("session", &self.session)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::tests::FixedSource;
    use std::{thread, time::Instant};

    fn fixed_factory(fail_to_start: bool) -> SourceFactory {
        Box::new(move || -> Result<Box<dyn KeypointSource>, DetectorError> {
            Ok(Box::new(FixedSource {
                fail_to_start,
                ..FixedSource::open_hand()
            }))
        })
    }

    /// Tick the tracker until the predicate is true, or panic after two seconds.
    fn tick_until(tracker: &mut GestureTracker, predicate: impl Fn(&GestureTracker) -> bool) {
        let start = Instant::now();
        while !predicate(tracker) {
            assert!(
                start.elapsed() < Duration::from_secs(2),
                "Timed out: {tracker:?}"
            );
            tracker.tick(1. / 60.);
            thread::sleep(Duration::from_millis(2));
        }
    }

    #[test]
    fn tracker_follows_hand_test() {
        let mut tracker = GestureTracker::new(GestureConfig::default(), Some(fixed_factory(false)));
        assert!(!tracker.is_enabled());

        assert!(tracker.set_enabled(true));
        tick_until(&mut tracker, |tracker| tracker.state().is_open);

        assert!(tracker.rotation().y > 0.);
        assert!(tracker.scale() > 1.);

        assert!(!tracker.set_enabled(false));
        let state = tracker.state();
        let rotation = tracker.rotation();

        for dt in [1. / 60., 1., 0.] {
            tracker.tick(dt);
            assert_eq!(tracker.state(), state);
            assert_eq!(tracker.rotation(), rotation);
        }
    }

    #[test]
    fn failed_detector_disables_tracking_test() {
        let mut tracker = GestureTracker::new(GestureConfig::default(), Some(fixed_factory(true)));

        assert!(tracker.set_enabled(true));
        tick_until(&mut tracker, |tracker| !tracker.is_enabled());
        assert_eq!(tracker.state(), GestureState::default());
    }

    #[test]
    fn no_source_test() {
        let mut tracker = GestureTracker::new(GestureConfig::default(), None);
        assert!(!tracker.set_enabled(true));

        let mut tracker = GestureTracker::new(
            GestureConfig::default(),
            Some(Box::new(|| -> Result<Box<dyn KeypointSource>, DetectorError> {
                Err(DetectorError::PermissionDenied)
            })),
        );
        assert!(!tracker.set_enabled(true));

        tracker.tick(1.);
        assert_eq!(tracker.state(), GestureState::default());
        assert_eq!(tracker.scale(), 1.);
    }
}
