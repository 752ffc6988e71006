//! This module contains [`Scene`], which owns and advances everything in the scene.

use crate::{
    decorations::PendingOrnament, place_in_outer_ring, place_on_tree_surface, Gift, Ornament,
    Payload, PlacementMode, SceneConfig, SceneError, SceneEvent, SceneHandle, WishProjectile,
};
use glam::Vec3;
use rand::rngs::StdRng;
use std::{
    mem,
    time::{SystemTime, UNIX_EPOCH},
};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, trace, warn};
use wt_animation::{
    Animator, FallAndSettle, FallEvent, FlightEvent, FlightWithTrail, Hoverable,
    MaterializeAndIdle, OrnamentEvent, Tick, TopperSpin, TreePulse,
};
use wt_frame::{
    DecorationId, DecorationKind, DecorationView, PointCloudKind, PointCloudView, SceneFrame,
    Transform, WishView,
};
use wt_gesture::{GestureState, GestureTracker, SourceFactory};
use wt_particles::{generate_sparkle, generate_tree, BaseRings, ParticlePointSet, SnowField};

/// The function called with the id and payload of a decoration when it gets clicked.
pub type ClickCallback = Box<dyn FnMut(DecorationId, &Payload) + Send>;

/// The whole scene.
///
/// The scene is advanced by exactly one call to [`Self::advance`] per frame, and nothing in it
/// changes between those calls. Events from outside of the frame loop are queued up through a
/// [`SceneHandle`] and applied at the start of the next frame.
pub struct Scene {
    /// The config that this scene was built from.
    config: SceneConfig,

    /// The single random source shared by everything in the scene.
    rng: StdRng,

    /// The number of seconds that the scene has been running.
    time: f32,

    /// The particles of the tree.
    tree: ParticlePointSet,

    /// The snow.
    snow: SnowField,

    /// The rings around the base of the tree.
    rings: BaseRings,

    /// The cloud drawn at the head of every wish.
    sparkle: ParticlePointSet,

    /// The heart on top of the tree.
    topper: TopperSpin,

    /// The glow of the tree when a wish arrives.
    pulse: TreePulse,

    /// Every gift, in the order they were added.
    gifts: Vec<Gift>,

    /// Every ornament, in the order they appeared.
    ornaments: Vec<Ornament>,

    /// The wishes still in flight.
    wishes: Vec<WishProjectile>,

    /// The wishes that have arrived but haven't become ornaments yet.
    pending: Vec<PendingOrnament>,

    /// The hand tracking.
    gestures: GestureTracker,

    /// Kept so that the event queue never closes while the scene is alive.
    events_tx: mpsc::UnboundedSender<SceneEvent>,

    /// The queue of events to apply at the start of the next frame.
    events_rx: mpsc::UnboundedReceiver<SceneEvent>,

    /// Called whenever a decoration is clicked.
    click_callback: Option<ClickCallback>,

    /// The last id given to something the user added.
    last_user_id: u64,
}

impl Scene {
    /// Build a new scene from the given config, with its default gifts and ornaments.
    ///
    /// The source factory is used to make a keypoint source whenever hand tracking gets enabled.
    /// If it's `None`, tracking can never be enabled.
    #[instrument(skip_all)]
    pub fn new(
        config: SceneConfig,
        source_factory: Option<SourceFactory>,
    ) -> Result<Self, SceneError> {
        config.placement.validate()?;

        let mut rng = config.make_rng();

        let tree = generate_tree(&config.tree, &mut rng)?;
        let snow = SnowField::generate(&config.snow, &mut rng)?;
        let rings = BaseRings::generate(&config.rings, config.tree.base_radius, &mut rng)?;
        let sparkle = generate_sparkle(&config.sparkle, &mut rng)?;

        let topper = TopperSpin::new(config.apex(), config.topper_spin_speed);
        let pulse = TreePulse::new(config.pulse_decay);
        let gestures = GestureTracker::new(config.gesture.clone(), source_factory);

        let (events_tx, events_rx) = mpsc::unbounded_channel();

        let mut scene = Self {
            config,
            rng,
            time: 0.,
            tree,
            snow,
            rings,
            sparkle,
            topper,
            pulse,
            gifts: Vec::new(),
            ornaments: Vec::new(),
            wishes: Vec::new(),
            pending: Vec::new(),
            gestures,
            events_tx,
            events_rx,
            click_callback: None,
            last_user_id: 0,
        };
        scene.add_default_content();

        info!(
            particles = scene.tree.len() + scene.snow.len(),
            gifts = scene.gifts.len(),
            ornaments = scene.ornaments.len(),
            "Built scene"
        );
        Ok(scene)
    }

    /// Add the gifts and ornaments that are there from the start.
    fn add_default_content(&mut self) {
        let base_radius = self.config.tree.base_radius;

        for (index, image) in self.config.default_gift_images.iter().enumerate() {
            let placement = place_in_outer_ring(
                index,
                base_radius,
                PlacementMode::Seeded,
                &self.config.placement,
                &mut self.rng,
            );
            let colour = self.config.gift_palette.cycle(index);

            self.gifts.push(Gift {
                id: DecorationId::Default {
                    kind: DecorationKind::Gift,
                    index,
                },
                image: image.clone(),
                placement,
                animator: FallAndSettle::new(
                    placement.position,
                    colour,
                    &self.config.fall,
                    &mut self.rng,
                ),
            });
        }

        for (index, text) in self.config.default_wishes.iter().enumerate() {
            let placement =
                place_on_tree_surface(&self.config.tree, &self.config.placement, &mut self.rng);
            let colour = self.config.ornament_palette.cycle(index);

            self.ornaments.push(Ornament {
                id: DecorationId::Default {
                    kind: DecorationKind::Ornament,
                    index,
                },
                text: text.clone(),
                animator: MaterializeAndIdle::new(placement.position, colour),
            });
        }
    }

    /// Get a fresh id for something the user added.
    ///
    /// Ids are millisecond timestamps, bumped along when needed so that they always increase.
    fn next_user_id(&mut self) -> DecorationId {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |duration| duration.as_millis() as u64);

        self.last_user_id = now.max(self.last_user_id + 1);
        DecorationId::User(self.last_user_id)
    }

    /// Make a wish, which flies up to the top of the tree and becomes an ornament.
    ///
    /// Returns `None` and does nothing if the text is blank.
    #[instrument(skip(self))]
    pub fn submit_wish(&mut self, text: &str) -> Option<DecorationId> {
        let text = text.trim();
        if text.is_empty() {
            debug!("Ignoring empty wish");
            return None;
        }

        let id = self.next_user_id();
        self.wishes.push(WishProjectile {
            id,
            text: text.to_string(),
            animator: FlightWithTrail::new(&self.config.flight, self.config.apex()),
        });

        info!(%id, "Launched wish");
        Some(id)
    }

    /// Add a gift with the given image, which drops into the ring around the tree.
    #[instrument(skip(self))]
    pub fn submit_gift(&mut self, image: &str) -> DecorationId {
        let id = self.next_user_id();
        let placement = place_in_outer_ring(
            self.gifts.len(),
            self.config.tree.base_radius,
            PlacementMode::Incremental,
            &self.config.placement,
            &mut self.rng,
        );
        let colour = self.config.gift_palette.choose(&mut self.rng);

        self.gifts.push(Gift {
            id,
            image: image.to_string(),
            placement,
            animator: FallAndSettle::new(
                placement.position,
                colour,
                &self.config.fall,
                &mut self.rng,
            ),
        });

        info!(%id, azimuth = placement.azimuth, "Added gift");
        id
    }

    /// Turn hand tracking on or off, returning whether it's now enabled.
    ///
    /// If the keypoint source can't be started, tracking stays off and the scene carries on.
    pub fn set_tracking_enabled(&mut self, enabled: bool) -> bool {
        self.gestures.set_enabled(enabled)
    }

    /// Set whether the pointer is over the given decoration, returning `false` if there's no
    /// such decoration.
    pub fn set_hovered(&mut self, id: DecorationId, hovered: bool) -> bool {
        if let Some(gift) = self.gifts.iter_mut().find(|gift| gift.id == id) {
            gift.animator.set_hovered(hovered);
            return true;
        }

        if let Some(ornament) = self.ornaments.iter_mut().find(|ornament| ornament.id == id) {
            ornament.animator.set_hovered(hovered);
            return true;
        }

        debug!(%id, "Tried to hover over a missing decoration");
        false
    }

    /// The payload of the given decoration, if it exists.
    pub fn payload(&self, id: DecorationId) -> Option<Payload> {
        self.gifts
            .iter()
            .find(|gift| gift.id == id)
            .map(Gift::payload)
            .or_else(|| {
                self.ornaments
                    .iter()
                    .find(|ornament| ornament.id == id)
                    .map(Ornament::payload)
            })
    }

    /// Click on the given decoration, passing its payload to the click callback.
    ///
    /// Returns the payload, or `None` if there's no such decoration.
    #[instrument(skip(self))]
    pub fn click(&mut self, id: DecorationId) -> Option<Payload> {
        let Some(payload) = self.payload(id) else {
            debug!("Clicked on a missing decoration");
            return None;
        };

        debug!(%payload, "Clicked on decoration");
        if let Some(callback) = &mut self.click_callback {
            callback(id, &payload);
        }

        Some(payload)
    }

    /// Set the function to call whenever a decoration is clicked, replacing any previous one.
    pub fn on_decoration_click(
        &mut self,
        callback: impl FnMut(DecorationId, &Payload) + Send + 'static,
    ) {
        self.click_callback = Some(Box::new(callback));
    }

    /// Get a handle to send events to this scene from anywhere.
    pub fn handle(&self) -> SceneHandle {
        SceneHandle::new(self.events_tx.clone())
    }

    /// Apply all the events queued up since the last frame.
    fn apply_queued_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            trace!(?event, "Applying event");

            match event {
                SceneEvent::SubmitWish(text) => {
                    self.submit_wish(&text);
                }
                SceneEvent::SubmitGift(image) => {
                    self.submit_gift(&image);
                }
                SceneEvent::SetTracking(enabled) => {
                    self.set_tracking_enabled(enabled);
                }
                SceneEvent::Hover { id, hovered } => {
                    self.set_hovered(id, hovered);
                }
                SceneEvent::Click(id) => {
                    self.click(id);
                }
            }
        }
    }

    /// Advance the whole scene by `dt` seconds.
    ///
    /// This applies queued events, then moves the gestures, the particle fields, and every
    /// decoration and wish. Arrived wishes are removed and become ornaments after a delay. A
    /// negative or invalid `dt` is treated as zero.
    pub fn advance(&mut self, dt: f32) {
        self.apply_queued_events();

        let dt = Tick::new(dt, self.time).dt();
        self.time += dt;
        let tick = Tick::new(dt, self.time);

        self.gestures.tick(dt);

        self.snow.tick(dt);
        self.rings.tick(dt, self.time);
        self.topper.tick(dt);
        self.pulse.tick(dt);

        for gift in &mut self.gifts {
            if let Some(FallEvent::Landed) =
                gift.animator.tick(&self.config.fall, tick, &mut self.rng)
            {
                debug!(id = %gift.id, "Gift landed");
            }
        }

        for ornament in &mut self.ornaments {
            if let Some(OrnamentEvent::Materialized) =
                ornament
                    .animator
                    .tick(&self.config.materialize, tick, &mut self.rng)
            {
                debug!(id = %ornament.id, "Ornament materialized");
            }
        }

        // Before new arrivals are queued, so a wish never becomes an ornament in the tick it
        // arrives.
        self.promote_pending_ornaments(dt);

        for wish in &mut self.wishes {
            if let Some(FlightEvent::Arrived) =
                wish.animator.tick(&self.config.flight, tick, &mut self.rng)
            {
                info!(id = %wish.id, "Wish arrived");
                self.pulse.trigger(self.config.arrival_pulse);
                self.pending.push(PendingOrnament {
                    id: wish.id,
                    text: wish.text.clone(),
                    remaining: self.config.ornament_delay,
                });
            }
        }
        self.wishes.retain(|wish| !wish.animator.has_arrived());
    }

    /// Count down the pending ornaments and hang the ones that are ready.
    fn promote_pending_ornaments(&mut self, dt: f32) {
        for pending in &mut self.pending {
            pending.remaining -= dt;
        }

        let (ready, waiting): (Vec<_>, Vec<_>) = mem::take(&mut self.pending)
            .into_iter()
            .partition(|pending| pending.remaining <= 0.);
        self.pending = waiting;

        for PendingOrnament { id, text, .. } in ready {
            let placement =
                place_on_tree_surface(&self.config.tree, &self.config.placement, &mut self.rng);
            let colour = self.config.ornament_palette.choose(&mut self.rng);

            debug!(%id, height = placement.position.y, "Hanging ornament");
            self.ornaments.push(Ornament {
                id,
                text,
                animator: MaterializeAndIdle::new(placement.position, colour),
            });
        }
    }

    /// Everything the renderer needs to draw the current state of the scene.
    pub fn frame(&self) -> SceneFrame<'_> {
        let rotation = self.gestures.rotation();
        let root = Transform::from_translation(self.config.root_offset)
            .with_rotation(Vec3::new(rotation.x, rotation.y, 0.))
            .with_scale(self.gestures.scale());

        let mut point_clouds = vec![
            PointCloudView {
                kind: PointCloudKind::Tree,
                positions: self.tree.positions(),
                colours: Some(self.tree.colours()),
                transform: Transform::IDENTITY,
                pulse: self.pulse.intensity(),
            },
            PointCloudView {
                kind: PointCloudKind::Snow,
                positions: self.snow.positions(),
                colours: None,
                transform: Transform::IDENTITY,
                pulse: 0.,
            },
        ];
        point_clouds.extend(self.rings.rings().iter().map(|ring| PointCloudView {
            kind: PointCloudKind::BaseRing,
            positions: ring.points().positions(),
            colours: Some(ring.points().colours()),
            transform: ring.transform(),
            pulse: 0.,
        }));

        let gifts = self.gifts.iter().map(|gift| DecorationView {
            id: gift.id,
            kind: DecorationKind::Gift,
            transform: gift.animator.transform(),
            material: gift.animator.material(&self.config.fall),
        });
        let ornaments = self.ornaments.iter().map(|ornament| DecorationView {
            id: ornament.id,
            kind: DecorationKind::Ornament,
            transform: ornament.animator.transform(),
            material: ornament.animator.material(&self.config.materialize),
        });

        SceneFrame {
            root,
            auto_rotate: !self.gestures.is_enabled(),
            topper: self.topper.transform(),
            point_clouds,
            wish_sparkle: PointCloudView {
                kind: PointCloudKind::WishSparkle,
                positions: self.sparkle.positions(),
                colours: Some(self.sparkle.colours()),
                transform: Transform::IDENTITY,
                pulse: 0.,
            },
            decorations: gifts.chain(ornaments).collect(),
            wishes: self
                .wishes
                .iter()
                .map(|wish| WishView {
                    id: wish.id,
                    transform: wish.animator.transform(),
                    trail: wish.animator.trail().points(),
                })
                .collect(),
        }
    }

    /// Stop hand tracking and release the keypoint source.
    pub fn shutdown(&mut self) {
        if self.gestures.is_enabled() {
            warn!("Shutting down the scene while hand tracking is still enabled");
        }
        self.gestures.shutdown();
        debug!(time = self.time, "Scene shut down");
    }

    /// The config that this scene was built from.
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// The number of seconds that the scene has been running.
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Every gift, in the order they were added.
    pub fn gifts(&self) -> &[Gift] {
        &self.gifts
    }

    /// Every ornament, in the order they appeared.
    pub fn ornaments(&self) -> &[Ornament] {
        &self.ornaments
    }

    /// The wishes still in flight.
    pub fn wishes(&self) -> &[WishProjectile] {
        &self.wishes
    }

    /// The number of wishes that have arrived but not become ornaments yet.
    pub fn pending_ornament_count(&self) -> usize {
        self.pending.len()
    }

    /// Is hand tracking enabled?
    pub fn is_tracking_enabled(&self) -> bool {
        self.gestures.is_enabled()
    }

    /// The latest interpreted hand gesture.
    pub fn gesture_state(&self) -> GestureState {
        self.gestures.state()
    }

    /// The current intensity of the glow of the tree, in [0, 1].
    pub fn pulse_intensity(&self) -> f32 {
        self.pulse.intensity()
    }

    /// The snow.
    pub fn snow(&self) -> &SnowField {
        &self.snow
    }
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("time", &self.time)
            .field("gifts", &self.gifts.len())
            .field("ornaments", &self.ornaments.len())
            .field("wishes", &self.wishes.len())
            .field("pending", &self.pending.len())
            .field("gestures", &self.gestures)
            .finish_non_exhaustive()
    }
}
