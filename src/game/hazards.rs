//=========================================================================
// Hazards
//=========================================================================
//
// Birds fly across at one of two heights; plants drop onto the ground
// and scroll with it.
//
// Placement is split into pure roll → outcome functions (tested with
// fixed rolls) and spawners that draw the rolls from an injected `Rng`.
// Hazards never leave the screen on their own terms: the session
// schedules an expiry timer for each one.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec2;
use log::debug;
use rand::Rng;

//=== Internal Dependencies ===============================================

use super::config::{Tuning, ViewportConfig};
use super::difficulty::SpeedState;
use super::layers;
use crate::core::animation::{AnimationLibrary, Animator};
use crate::core::physics::{Body, BodyHandle, World};

//=== HazardKind ==========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HazardKind {
    Bird,
    Plant,
}

//=== Hazard ==============================================================

#[derive(Debug, Clone)]
pub struct Hazard {
    pub body: BodyHandle,
    pub kind: HazardKind,
    pub scale: f32,
    pub animator: Animator,
}

//=== HazardCollection ====================================================

/// Live hazards of one kind, in spawn order.
#[derive(Debug, Clone, Default)]
pub struct HazardCollection {
    hazards: Vec<Hazard>,
}

impl HazardCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, hazard: Hazard) {
        self.hazards.push(hazard);
    }

    /// Forgets the hazard owning `body`. Returns `false` if it was not a
    /// member (already expired, or from another session).
    pub fn remove(&mut self, body: BodyHandle) -> bool {
        let before = self.hazards.len();
        self.hazards.retain(|hazard| hazard.body != body);
        self.hazards.len() != before
    }

    pub fn contains(&self, body: BodyHandle) -> bool {
        self.hazards.iter().any(|hazard| hazard.body == body)
    }

    pub fn get(&self, body: BodyHandle) -> Option<&Hazard> {
        self.hazards.iter().find(|hazard| hazard.body == body)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Hazard> {
        self.hazards.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Hazard> {
        self.hazards.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.hazards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hazards.is_empty()
    }
}

//=== BirdLane ============================================================

/// Where a bird enters, as a centre point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BirdLane {
    pub center: Vec2,
}

impl BirdLane {
    /// `lane_roll > 0.5` picks the upper lane. The x position never
    /// starts closer than `bird_min_x`.
    pub fn from_roll(lane_roll: f32, x_roll: f32, tuning: &Tuning) -> Self {
        let [upper, lower] = tuning.bird_lanes;
        let y = if lane_roll > 0.5 { upper } else { lower };
        let x = (x_roll * tuning.bird_x_range).max(tuning.bird_min_x);
        Self { center: Vec2::new(x, y) }
    }
}

//=== PlantVolley =========================================================

/// Size and count of one plant spawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlantVolley {
    pub scale: f32,
    pub count: usize,
}

impl PlantVolley {
    /// Small rolls give a pair of small plants, large rolls one big
    /// plant, anything between one plant scaled by the roll itself.
    pub fn from_roll(roll: f32) -> Self {
        if roll <= 0.4 {
            Self { scale: 0.6, count: 2 }
        } else if roll > 0.9 {
            Self { scale: 0.9, count: 1 }
        } else {
            Self { scale: roll, count: 1 }
        }
    }
}

//=== Spawners ============================================================

/// Spawns a bird at `center`, flying at the next bird speed.
pub fn spawn_bird_at(
    world: &mut World,
    center: Vec2,
    speed: &mut SpeedState,
    library: &AnimationLibrary,
    tuning: &Tuning,
) -> Hazard {
    let velocity = speed.next_bird_velocity();
    let body = Body::centered(layers::BIRD, center, tuning.bird_size())
        .with_velocity(Vec2::new(velocity, 0.0));

    let mut animator = Animator::new();
    animator.play(library, "fly", false);

    debug!(target: "game::hazards", "Bird at {:?} moving {}", center, velocity);
    Hazard {
        body: world.spawn(body),
        kind: HazardKind::Bird,
        scale: 2.0,
        animator,
    }
}

/// Rolls a lane and spawns one bird there.
pub fn spawn_bird(
    world: &mut World,
    rng: &mut impl Rng,
    speed: &mut SpeedState,
    library: &AnimationLibrary,
    tuning: &Tuning,
) -> Hazard {
    let lane = BirdLane::from_roll(rng.gen::<f32>(), rng.gen::<f32>(), tuning);
    spawn_bird_at(world, lane.center, speed, library, tuning)
}

/// Spawns the plants of `volley` at the right edge of the viewport.
pub fn spawn_plant_volley(
    world: &mut World,
    volley: PlantVolley,
    speed: &SpeedState,
    viewport: &ViewportConfig,
    tuning: &Tuning,
) -> Vec<Hazard> {
    let velocity = speed.plant_velocity();
    let sprite = tuning.plant_size() * volley.scale;
    let hitbox = Vec2::new(sprite.x * 0.5, sprite.y);
    let top = viewport.height() - tuning.tile_height - tuning.plant_drop;

    debug!(
        target: "game::hazards",
        "{} plant(s) at scale {:.2} moving {}", volley.count, volley.scale, velocity
    );

    (0..volley.count)
        .map(|i| {
            let sprite_x = viewport.width() + i as f32 * tuning.plant_pair_offset;
            let position = Vec2::new(sprite_x + tuning.plant_hitbox_offset * volley.scale, top);
            let body = Body::new(layers::PLANT, position, hitbox)
                .with_velocity(Vec2::new(velocity, 0.0))
                .with_gravity(tuning.plant_gravity);

            Hazard {
                body: world.spawn(body),
                kind: HazardKind::Plant,
                scale: volley.scale,
                animator: Animator::new(),
            }
        })
        .collect()
}

/// Rolls a volley and spawns it.
pub fn spawn_plants(
    world: &mut World,
    rng: &mut impl Rng,
    speed: &SpeedState,
    viewport: &ViewportConfig,
    tuning: &Tuning,
) -> Vec<Hazard> {
    let volley = PlantVolley::from_roll(rng.gen::<f32>());
    spawn_plant_volley(world, volley, speed, viewport, tuning)
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

    //=== Rolls ============================================================

    #[test]
    fn bird_lane_split_at_half() {
        let tuning = Tuning::default();
        assert_eq!(BirdLane::from_roll(0.51, 0.0, &tuning).center.y, 280.0);
        assert_eq!(BirdLane::from_roll(0.5, 0.0, &tuning).center.y, 360.0);
        assert_eq!(BirdLane::from_roll(0.0, 0.0, &tuning).center.y, 360.0);
    }

    #[test]
    fn bird_x_never_below_minimum() {
        let tuning = Tuning::default();
        assert_eq!(BirdLane::from_roll(0.0, 0.1, &tuning).center.x, 780.0);
        assert_eq!(BirdLane::from_roll(0.0, 0.95, &tuning).center.x, 855.0);
    }

    #[test]
    fn plant_volley_bands() {
        assert_eq!(PlantVolley::from_roll(0.0), PlantVolley { scale: 0.6, count: 2 });
        assert_eq!(PlantVolley::from_roll(0.4), PlantVolley { scale: 0.6, count: 2 });
        assert_eq!(PlantVolley::from_roll(0.75), PlantVolley { scale: 0.75, count: 1 });
        assert_eq!(PlantVolley::from_roll(0.9), PlantVolley { scale: 0.9, count: 1 });
        assert_eq!(PlantVolley::from_roll(0.95), PlantVolley { scale: 0.9, count: 1 });
    }

    //=== Spawning =========================================================

    #[test]
    fn random_birds_stay_in_lanes() {
        let tuning = Tuning::default();
        let library = animations();
        let mut world = World::default();
        let mut speed = SpeedState::new(&tuning);
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        for _ in 0..50 {
            let bird = spawn_bird(&mut world, &mut rng, &mut speed, &library, &tuning);
            let center = world.get(bird.body).unwrap().center();
            assert!(center.y == 280.0 || center.y == 360.0);
            assert!(center.x >= 780.0);
            assert_eq!(bird.animator.current(), Some("fly"));
        }
        assert_eq!(speed.bird(), -400.0);
    }

    #[test]
    fn random_plants_match_volley_rules() {
        let tuning = Tuning::default();
        let viewport = ViewportConfig::default();
        let speed = SpeedState::new(&tuning);
        let mut world = World::default();
        let mut rng = ChaCha8Rng::seed_from_u64(11);

        for _ in 0..50 {
            let plants = spawn_plants(&mut world, &mut rng, &speed, &viewport, &tuning);
            let scale = plants[0].scale;
            match plants.len() {
                2 => assert_eq!(scale, 0.6),
                1 => assert!(scale > 0.4 && scale <= 0.9),
                n => panic!("unexpected volley of {}", n),
            }
        }
    }

    #[test]
    fn pair_is_offset_and_shares_velocity() {
        let tuning = Tuning::default();
        let viewport = ViewportConfig::default();
        let speed = SpeedState::new(&tuning);
        let mut world = World::default();

        let plants = spawn_plant_volley(
            &mut world,
            PlantVolley { scale: 0.6, count: 2 },
            &speed,
            &viewport,
            &tuning,
        );
        let first = world.get(plants[0].body).unwrap();
        let second = world.get(plants[1].body).unwrap();

        assert_eq!(second.position.x - first.position.x, 10.0);
        assert_eq!(first.position.y, 326.0);
        assert_eq!(first.velocity.x, -180.0);
        assert_eq!(second.velocity, first.velocity);
        assert_eq!(first.gravity, 750.0);
        // Hitbox is half the scaled sprite width
        assert!((first.size.x - 19.2).abs() < 1e-4);
        assert!((first.size.y - 60.0).abs() < 1e-4);
    }

    #[test]
    fn plant_spawn_does_not_speed_up_ground() {
        let tuning = Tuning::default();
        let viewport = ViewportConfig::default();
        let speed = SpeedState::new(&tuning);
        let mut world = World::default();

        spawn_plant_volley(&mut world, PlantVolley::from_roll(0.7), &speed, &viewport, &tuning);
        assert_eq!(speed.ground(), -180.0);
    }

    //=== Collection =======================================================

    #[test]
    fn collection_membership() {
        let tuning = Tuning::default();
        let library = animations();
        let mut world = World::default();
        let mut speed = SpeedState::new(&tuning);
        let mut birds = HazardCollection::new();

        let bird = spawn_bird_at(&mut world, Vec2::new(800.0, 280.0), &mut speed, &library, &tuning);
        let handle = bird.body;
        birds.add(bird);

        assert!(birds.contains(handle));
        assert_eq!(birds.get(handle).map(|h| h.kind), Some(HazardKind::Bird));
        assert!(birds.remove(handle));
        assert!(!birds.remove(handle));
        assert!(birds.is_empty());
    }
}
