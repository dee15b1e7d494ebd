//=========================================================================
// Session
//=========================================================================
//
// One run of the game, from the first tick until the first hit.
//
// Architecture:
//   tick(dt) → timers (score, spawns, expiries)
//            → player input
//            → world.step (movement, landings, contacts)
//            → ground refill
//            → animations
//            → contact check → GameOver (once)
//
// The session owns its world and timers outright. Dropping it is the
// whole teardown: nothing scheduled here can fire into a later session.
// Expiry payloads carry body handles, and a handle that is no longer in
// its collection is ignored.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use glam::Vec2;
use log::{debug, info, trace};
use rand::Rng;

//=== Internal Dependencies ===============================================

use super::config::GameConfig;
use super::difficulty::SpeedState;
use super::ground::GroundStrip;
use super::hazards::{self, Hazard, HazardCollection, HazardKind};
use super::layers;
use super::player::Player;
use super::score::Scoreboard;
use crate::core::animation::AnimationLibrary;
use crate::core::audio::AudioQueue;
use crate::core::labels::LabelBoard;
use crate::core::physics::{BodyHandle, World};
use crate::core::timer::TimerQueue;

//=== SessionEvent ========================================================

/// Timer payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Score,
    SpawnBird,
    SpawnPlants,
    Expire(HazardKind, BodyHandle),
}

//=== TickOutcome =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Running,
    /// The player was hit this tick. Reported exactly once.
    GameOver { score: u64 },
    /// The session already ended; nothing moves.
    Paused,
}

//=== Session =============================================================

pub struct Session {
    config: GameConfig,
    world: World,
    timers: TimerQueue<SessionEvent>,
    player: Player,
    ground: GroundStrip,
    birds: HazardCollection,
    plants: HazardCollection,
    speed: SpeedState,
    scoreboard: Scoreboard,
    high_score: u64,
    over: bool,
}

impl Session {
    /// Builds a fresh session: score 0, initial speeds, no hazards, a
    /// full ground strip, and the three repeating timers.
    pub fn start(config: &GameConfig, library: &AnimationLibrary, high_score: u64) -> Self {
        let tuning = &config.tuning;

        let mut world = World::new(Vec2::new(0.0, config.viewport.gravity_y));
        world.add_collider(layers::PLAYER, layers::GROUND);
        world.add_collider(layers::PLANT, layers::GROUND);
        world.add_overlap(layers::PLAYER, layers::BIRD);
        world.add_overlap(layers::PLAYER, layers::PLANT);

        let mut speed = SpeedState::new(tuning);
        let mut ground = GroundStrip::new(&config.viewport, tuning);
        ground.fill_from(&mut world, 0.0, &mut speed);

        let player = Player::spawn(&mut world, library, tuning);

        let mut timers = TimerQueue::new();
        timers.every(tuning.score_period(), SessionEvent::Score);
        timers.every(tuning.bird_period(), SessionEvent::SpawnBird);
        timers.every(tuning.plant_period(), SessionEvent::SpawnPlants);

        info!(target: "game", "Session started (high score {})", high_score);

        Self {
            config: config.clone(),
            world,
            timers,
            player,
            ground,
            birds: HazardCollection::new(),
            plants: HazardCollection::new(),
            speed,
            scoreboard: Scoreboard::new(tuning.ping_every),
            high_score,
            over: false,
        }
    }

    //--- tick() -----------------------------------------------------------

    /// Advances the session by `dt`.
    pub fn tick(
        &mut self,
        dt: Duration,
        jump_held: bool,
        rng: &mut impl Rng,
        library: &AnimationLibrary,
        labels: &mut LabelBoard,
        audio: &mut AudioQueue,
    ) -> TickOutcome {
        if self.over {
            return TickOutcome::Paused;
        }

        for event in self.timers.advance(dt) {
            self.dispatch(event, rng, library, labels, audio);
        }

        self.player
            .handle_input(&mut self.world, jump_held, library, audio, &self.config.tuning);

        let contacts = self.world.step(dt);
        self.ground.update(&mut self.world, &mut self.speed);

        self.player.animator.advance(dt);
        for hazard in self.birds.iter_mut().chain(self.plants.iter_mut()) {
            hazard.animator.advance(dt);
        }

        let hit = contacts.iter().any(|contact| {
            contact.a == self.player.body
                && (self.birds.contains(contact.b) || self.plants.contains(contact.b))
        });

        if hit {
            self.over = true;
            audio.play("shot");
            info!(target: "game", "Player hit, final score {}", self.scoreboard.score());
            return TickOutcome::GameOver { score: self.scoreboard.score() };
        }

        TickOutcome::Running
    }

    //--- Spawning ---------------------------------------------------------

    /// Spawns one bird in a random lane and schedules its expiry.
    pub fn spawn_bird(&mut self, rng: &mut impl Rng, library: &AnimationLibrary) -> BodyHandle {
        let bird = hazards::spawn_bird(
            &mut self.world,
            rng,
            &mut self.speed,
            library,
            &self.config.tuning,
        );
        self.track(bird)
    }

    /// Spawns one bird centred at `center` and schedules its expiry.
    pub fn spawn_bird_at(&mut self, center: Vec2, library: &AnimationLibrary) -> BodyHandle {
        let bird = hazards::spawn_bird_at(
            &mut self.world,
            center,
            &mut self.speed,
            library,
            &self.config.tuning,
        );
        self.track(bird)
    }

    /// Spawns a random plant volley and schedules each plant's expiry.
    pub fn spawn_plants(&mut self, rng: &mut impl Rng) -> Vec<BodyHandle> {
        let plants = hazards::spawn_plants(
            &mut self.world,
            rng,
            &self.speed,
            &self.config.viewport,
            &self.config.tuning,
        );
        plants.into_iter().map(|plant| self.track(plant)).collect()
    }

    //--- Queries ----------------------------------------------------------

    pub fn score(&self) -> u64 {
        self.scoreboard.score()
    }

    /// High score read when the session started.
    pub fn high_score(&self) -> u64 {
        self.high_score
    }

    pub fn is_over(&self) -> bool {
        self.over
    }

    /// Play time so far.
    pub fn elapsed(&self) -> Duration {
        self.timers.now()
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn ground(&self) -> &GroundStrip {
        &self.ground
    }

    pub fn birds(&self) -> &HazardCollection {
        &self.birds
    }

    pub fn plants(&self) -> &HazardCollection {
        &self.plants
    }

    pub fn speed(&self) -> &SpeedState {
        &self.speed
    }

    //--- Internal Helpers -------------------------------------------------

    fn dispatch(
        &mut self,
        event: SessionEvent,
        rng: &mut impl Rng,
        library: &AnimationLibrary,
        labels: &mut LabelBoard,
        audio: &mut AudioQueue,
    ) {
        match event {
            SessionEvent::Score => {
                let (score, milestone) = self.scoreboard.tick();
                labels.set_text("score", Scoreboard::label(score));
                if milestone {
                    audio.play("ping");
                }
            }
            SessionEvent::SpawnBird => {
                self.spawn_bird(rng, library);
            }
            SessionEvent::SpawnPlants => {
                self.spawn_plants(rng);
            }
            SessionEvent::Expire(kind, handle) => self.expire(kind, handle),
        }
    }

    fn track(&mut self, hazard: Hazard) -> BodyHandle {
        let handle = hazard.body;
        let (collection, lifetime) = match hazard.kind {
            HazardKind::Bird => (&mut self.birds, self.config.tuning.bird_lifetime()),
            HazardKind::Plant => (&mut self.plants, self.config.tuning.plant_lifetime()),
        };

        self.timers.after(lifetime, SessionEvent::Expire(hazard.kind, handle));
        collection.add(hazard);
        handle
    }

    fn expire(&mut self, kind: HazardKind, handle: BodyHandle) {
        let collection = match kind {
            HazardKind::Bird => &mut self.birds,
            HazardKind::Plant => &mut self.plants,
        };

        if collection.remove(handle) && self.world.despawn(handle) {
            debug!(target: "game", "{:?} expired", kind);
        } else {
            trace!(target: "game", "Stale expiry for {:?} ignored", kind);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::animations;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    struct Harness {
        session: Session,
        library: AnimationLibrary,
        rng: ChaCha8Rng,
        labels: LabelBoard,
        audio: AudioQueue,
    }

    impl Harness {
        fn new(config: GameConfig) -> Self {
            let library = animations();
            Self {
                session: Session::start(&config, &library, 0),
                library,
                rng: ChaCha8Rng::seed_from_u64(3),
                labels: LabelBoard::new(),
                audio: AudioQueue::new(),
            }
        }

        fn run(&mut self, millis: u64) -> TickOutcome {
            let mut outcome = TickOutcome::Running;
            for _ in 0..millis / 10 {
                outcome = self.session.tick(
                    Duration::from_millis(10),
                    false,
                    &mut self.rng,
                    &self.library,
                    &mut self.labels,
                    &mut self.audio,
                );
                if outcome != TickOutcome::Running {
                    break;
                }
            }
            outcome
        }
    }

    fn quiet_config() -> GameConfig {
        let mut config = GameConfig::default();
        config.tuning.bird_period_ms = 3_600_000;
        config.tuning.plant_period_ms = 3_600_000;
        config
    }

    #[test]
    fn starts_fresh() {
        let harness = Harness::new(GameConfig::default());
        let session = &harness.session;

        assert_eq!(session.score(), 0);
        assert!(session.birds().is_empty());
        assert!(session.plants().is_empty());
        assert!(!session.is_over());
        assert_eq!(session.ground().rightmost_edge(session.world()), Some(822.0));
    }

    #[test]
    fn score_ticks_every_quarter_second() {
        let mut harness = Harness::new(quiet_config());
        harness.labels.set("score", Vec2::ZERO, "SCORE:0");

        assert_eq!(harness.run(1000), TickOutcome::Running);
        assert_eq!(harness.session.score(), 4);
        assert_eq!(harness.labels.text("score"), Some("SCORE: 4"));
    }

    #[test]
    fn spawn_timers_fire_on_schedule() {
        let mut config = GameConfig::default();
        config.tuning.bird_period_ms = 1000;
        config.tuning.plant_period_ms = 500;
        config.tuning.bird_lifetime_ms = 3_600_000;
        config.tuning.plant_lifetime_ms = 3_600_000;
        let mut harness = Harness::new(config);

        // Hazards spawn far right and take well over a second to arrive
        harness.run(1000);
        assert_eq!(harness.session.birds().len(), 1);
        assert!(!harness.session.plants().is_empty());
    }

    #[test]
    fn stale_expiry_is_ignored() {
        let mut harness = Harness::new(quiet_config());
        let handle = harness.session.spawn_bird_at(Vec2::new(790.0, 280.0), &harness.library);

        harness.session.expire(HazardKind::Bird, handle);
        assert!(harness.session.birds().is_empty());
        assert!(!harness.session.world().is_alive(handle));

        // Second dispatch for the same handle is a no-op
        harness.session.expire(HazardKind::Bird, handle);
        harness.session.expire(HazardKind::Plant, handle);
        assert!(harness.session.birds().is_empty());
    }

    #[test]
    fn hit_ends_session_once() {
        let mut harness = Harness::new(quiet_config());
        harness.run(1000);

        let center = harness.session.world().get(harness.session.player().body).unwrap().center();
        harness.session.spawn_bird_at(center, &harness.library);

        assert_eq!(harness.run(10), TickOutcome::GameOver { score: 4 });
        assert_eq!(harness.audio.count("shot"), 1);
        assert_eq!(harness.run(1000), TickOutcome::Paused);
        assert_eq!(harness.audio.count("shot"), 1);
        assert_eq!(harness.session.score(), 4);
    }

    #[test]
    fn upper_lane_bird_passes_over_grounded_player() {
        let mut harness = Harness::new(quiet_config());
        harness.run(1000);
        harness.session.spawn_bird_at(Vec2::new(400.0, 280.0), &harness.library);

        assert_eq!(harness.run(1000), TickOutcome::Running);
    }
}
