//=========================================================================
// Arcade Physics World
//=========================================================================
//
// Axis-aligned bodies with velocity and gravity, stored in a generational
// arena so handles held by timers or collections can be checked for
// liveness after the body is gone.
//
// Architecture:
//   spawn() → BodyHandle { index, generation }
//   step(dt) → integrate → resolve colliders → report overlaps (Contact)
//
// Colliders only resolve landings: a dynamic body falling onto an
// immovable one is snapped to its top and marked `touching_down`. Side
// contact is not separated; the runner never needs it.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use glam::Vec2;
use log::trace;

//=== Layer ===============================================================

/// Collision layer. Games define their own constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Layer(pub u32);

//=== BodyHandle ==========================================================

/// Stable reference to a body. Stale once the body is despawned, even if
/// the slot is later reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyHandle {
    index: u32,
    generation: u32,
}

//=== Body ================================================================

/// A rectangular body. `position` is the top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub layer: Layer,
    pub position: Vec2,
    pub size: Vec2,
    pub velocity: Vec2,
    /// Downward acceleration added on top of world gravity (px/s²).
    pub gravity: f32,
    /// Immovable bodies ignore gravity and are never pushed.
    pub immovable: bool,
    /// Set during `step` when the body landed on an immovable body.
    pub touching_down: bool,
    previous_position: Vec2,
}

impl Body {
    pub fn new(layer: Layer, position: Vec2, size: Vec2) -> Self {
        Self {
            layer,
            position,
            size,
            velocity: Vec2::ZERO,
            gravity: 0.0,
            immovable: false,
            touching_down: false,
            previous_position: position,
        }
    }

    /// Builds a body from its centre point instead of its corner.
    pub fn centered(layer: Layer, center: Vec2, size: Vec2) -> Self {
        Self::new(layer, center - size * 0.5, size)
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_gravity(mut self, gravity: f32) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn immovable(mut self) -> Self {
        self.immovable = true;
        self
    }

    pub fn left(&self) -> f32 {
        self.position.x
    }

    pub fn right(&self) -> f32 {
        self.position.x + self.size.x
    }

    pub fn top(&self) -> f32 {
        self.position.y
    }

    pub fn bottom(&self) -> f32 {
        self.position.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.position + self.size * 0.5
    }

    /// Strict AABB overlap; touching edges do not count.
    pub fn overlaps(&self, other: &Body) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

//=== Contact =============================================================

/// Overlap between a body of the first and a body of the second layer of
/// a registered overlap pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    pub a: BodyHandle,
    pub b: BodyHandle,
}

//=== World ===============================================================

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    body: Option<Body>,
}

/// Owns every body of one scene.
#[derive(Debug, Clone)]
pub struct World {
    gravity: Vec2,
    slots: Vec<Slot>,
    free: Vec<u32>,
    colliders: Vec<(Layer, Layer)>,
    overlaps: Vec<(Layer, Layer)>,
}

impl World {
    /// Creates an empty world with the given global gravity (px/s²).
    pub fn new(gravity: Vec2) -> Self {
        Self {
            gravity,
            slots: Vec::new(),
            free: Vec::new(),
            colliders: Vec::new(),
            overlaps: Vec::new(),
        }
    }

    //--- Bodies -----------------------------------------------------------

    pub fn spawn(&mut self, body: Body) -> BodyHandle {
        match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.body = Some(body);
                BodyHandle { index, generation: slot.generation }
            }
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Slot { generation: 0, body: Some(body) });
                BodyHandle { index, generation: 0 }
            }
        }
    }

    /// Removes a body. Returns `false` for a stale handle.
    pub fn despawn(&mut self, handle: BodyHandle) -> bool {
        let Some(slot) = self.slots.get_mut(handle.index as usize) else {
            return false;
        };
        if slot.generation != handle.generation || slot.body.is_none() {
            return false;
        }
        slot.body = None;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index);
        true
    }

    pub fn is_alive(&self, handle: BodyHandle) -> bool {
        self.get(handle).is_some()
    }

    pub fn get(&self, handle: BodyHandle) -> Option<&Body> {
        self.slots
            .get(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.body.as_ref())
    }

    pub fn get_mut(&mut self, handle: BodyHandle) -> Option<&mut Body> {
        self.slots
            .get_mut(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.body.as_mut())
    }

    /// Number of live bodies.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.body.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes every body and pair registration. Outstanding handles
    /// become stale.
    pub fn clear(&mut self) {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.body.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(index as u32);
            }
        }
        self.colliders.clear();
        self.overlaps.clear();
    }

    //--- Pair Registration ------------------------------------------------

    /// Dynamic bodies of `dynamic` land on immovable bodies of `solid`.
    pub fn add_collider(&mut self, dynamic: Layer, solid: Layer) {
        if !self.colliders.contains(&(dynamic, solid)) {
            self.colliders.push((dynamic, solid));
        }
    }

    /// Report a [`Contact`] whenever an `a` body overlaps a `b` body.
    pub fn add_overlap(&mut self, a: Layer, b: Layer) {
        if !self.overlaps.contains(&(a, b)) {
            self.overlaps.push((a, b));
        }
    }

    //--- Simulation -------------------------------------------------------

    /// Advances every body by `dt` and returns this step's contacts.
    pub fn step(&mut self, dt: Duration) -> Vec<Contact> {
        let secs = dt.as_secs_f32();

        for body in self.slots.iter_mut().filter_map(|slot| slot.body.as_mut()) {
            body.previous_position = body.position;
            if !body.immovable {
                body.touching_down = false;
                body.velocity.y += (self.gravity.y + body.gravity) * secs;
                body.velocity.x += self.gravity.x * secs;
            }
            body.position += body.velocity * secs;
        }

        for (dynamic, solid) in self.colliders.clone() {
            self.resolve_landings(dynamic, solid);
        }

        let mut contacts = Vec::new();
        for &(a, b) in &self.overlaps {
            for (ha, body_a) in self.bodies_in(a) {
                for (hb, body_b) in self.bodies_in(b) {
                    if ha != hb && body_a.overlaps(body_b) {
                        contacts.push(Contact { a: ha, b: hb });
                    }
                }
            }
        }

        if !contacts.is_empty() {
            trace!(target: "core::physics", "{} contact(s) this step", contacts.len());
        }
        contacts
    }

    //--- Internal Helpers -------------------------------------------------

    fn handles(&self) -> impl Iterator<Item = (BodyHandle, &Body)> + '_ {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.body.as_ref().map(|body| {
                (BodyHandle { index: index as u32, generation: slot.generation }, body)
            })
        })
    }

    fn bodies_in(&self, layer: Layer) -> impl Iterator<Item = (BodyHandle, &Body)> + '_ {
        self.handles().filter(move |(_, body)| body.layer == layer)
    }

    fn resolve_landings(&mut self, dynamic: Layer, solid: Layer) {
        // Snapshot the solids so dynamic bodies can be mutated freely.
        let solids: Vec<(f32, Body)> = self
            .bodies_in(solid)
            .filter(|(_, body)| body.immovable)
            .map(|(_, body)| (body.previous_position.y, body.clone()))
            .collect();

        let movers: Vec<BodyHandle> = self
            .bodies_in(dynamic)
            .filter(|(_, body)| !body.immovable)
            .map(|(handle, _)| handle)
            .collect();

        for handle in movers {
            let Some(body) = self.get_mut(handle) else { continue };
            let previous_bottom = body.previous_position.y + body.size.y;

            for (previous_top, solid_body) in &solids {
                let falling_onto = body.velocity.y >= 0.0 && previous_bottom <= previous_top + 0.5;
                if falling_onto && body.overlaps(solid_body) {
                    body.position.y = solid_body.top() - body.size.y;
                    body.velocity.y = 0.0;
                    body.touching_down = true;
                }
            }
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(Vec2::ZERO)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const MOVER: Layer = Layer(0);
    const FLOOR: Layer = Layer(1);
    const THREAT: Layer = Layer(2);

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn floor(world: &mut World) -> BodyHandle {
        world.spawn(
            Body::new(FLOOR, Vec2::new(0.0, 400.0), Vec2::new(800.0, 64.0)).immovable(),
        )
    }

    //--- Arena ------------------------------------------------------------

    #[test]
    fn despawn_makes_handle_stale() {
        let mut world = World::default();
        let handle = world.spawn(Body::new(MOVER, Vec2::ZERO, Vec2::ONE));

        assert!(world.is_alive(handle));
        assert!(world.despawn(handle));
        assert!(!world.is_alive(handle));
        assert!(!world.despawn(handle), "double despawn is a no-op");
    }

    #[test]
    fn reused_slot_does_not_revive_old_handle() {
        let mut world = World::default();
        let old = world.spawn(Body::new(MOVER, Vec2::ZERO, Vec2::ONE));
        world.despawn(old);

        let new = world.spawn(Body::new(MOVER, Vec2::new(5.0, 5.0), Vec2::ONE));
        assert!(world.get(old).is_none());
        assert_eq!(world.get(new).map(|b| b.position), Some(Vec2::new(5.0, 5.0)));
        assert_eq!(world.len(), 1);
    }

    #[test]
    fn clear_invalidates_everything() {
        let mut world = World::default();
        let a = world.spawn(Body::new(MOVER, Vec2::ZERO, Vec2::ONE));
        let b = world.spawn(Body::new(FLOOR, Vec2::ZERO, Vec2::ONE));
        world.clear();

        assert!(world.is_empty());
        assert!(!world.is_alive(a));
        assert!(!world.is_alive(b));
    }

    #[test]
    fn centered_constructor_places_center() {
        let body = Body::centered(MOVER, Vec2::new(100.0, 280.0), Vec2::new(60.0, 60.0));
        assert_eq!(body.center(), Vec2::new(100.0, 280.0));
        assert_eq!(body.left(), 70.0);
        assert_eq!(body.top(), 250.0);
    }

    //--- Integration ------------------------------------------------------

    #[test]
    fn velocity_moves_bodies() {
        let mut world = World::default();
        let handle = world.spawn(
            Body::new(MOVER, Vec2::new(800.0, 0.0), Vec2::ONE).with_velocity(Vec2::new(-200.0, 0.0)),
        );
        world.step(ms(500));
        assert_eq!(world.get(handle).map(|b| b.position.x), Some(700.0));
    }

    #[test]
    fn immovable_bodies_ignore_gravity_but_keep_velocity() {
        let mut world = World::new(Vec2::new(0.0, 100.0));
        let tile = world.spawn(
            Body::new(FLOOR, Vec2::new(0.0, 400.0), Vec2::new(64.0, 64.0))
                .immovable()
                .with_velocity(Vec2::new(-100.0, 0.0)),
        );
        world.step(ms(1000));

        let tile = world.get(tile).map(|b| b.position);
        assert_eq!(tile, Some(Vec2::new(-100.0, 400.0)));
    }

    #[test]
    fn gravity_pulls_dynamic_bodies_down() {
        let mut world = World::default();
        let handle = world.spawn(Body::new(MOVER, Vec2::ZERO, Vec2::ONE).with_gravity(800.0));
        world.step(ms(100));

        let body = world.get(handle).cloned().expect("alive");
        assert!(body.velocity.y > 0.0);
        assert!(body.position.y > 0.0);
    }

    //--- Colliders --------------------------------------------------------

    #[test]
    fn falling_body_lands_and_touches_down() {
        let mut world = World::default();
        floor(&mut world);
        world.add_collider(MOVER, FLOOR);
        let runner = world.spawn(
            Body::new(MOVER, Vec2::new(100.0, 300.0), Vec2::new(20.0, 50.0)).with_gravity(850.0),
        );

        for _ in 0..120 {
            world.step(ms(16));
        }

        let body = world.get(runner).cloned().expect("alive");
        assert!(body.touching_down);
        assert_eq!(body.bottom(), 400.0);
        assert_eq!(body.velocity.y, 0.0);
    }

    #[test]
    fn body_in_the_air_is_not_touching_down() {
        let mut world = World::default();
        floor(&mut world);
        world.add_collider(MOVER, FLOOR);
        let runner = world.spawn(
            Body::new(MOVER, Vec2::new(100.0, 0.0), Vec2::new(20.0, 50.0)).with_gravity(850.0),
        );
        world.step(ms(16));
        assert_eq!(world.get(runner).map(|b| b.touching_down), Some(false));
    }

    #[test]
    fn rising_body_passes_through_from_below() {
        let mut world = World::default();
        floor(&mut world);
        world.add_collider(MOVER, FLOOR);
        let runner = world.spawn(
            Body::new(MOVER, Vec2::new(100.0, 470.0), Vec2::new(20.0, 20.0))
                .with_velocity(Vec2::new(0.0, -300.0)),
        );
        world.step(ms(100));
        assert_eq!(world.get(runner).map(|b| b.touching_down), Some(false));
    }

    //--- Overlaps ---------------------------------------------------------

    #[test]
    fn overlap_pairs_report_contacts() {
        let mut world = World::default();
        world.add_overlap(MOVER, THREAT);
        let runner = world.spawn(Body::new(MOVER, Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0)));
        let threat = world.spawn(Body::new(THREAT, Vec2::new(5.0, 5.0), Vec2::new(10.0, 10.0)));
        world.spawn(Body::new(THREAT, Vec2::new(50.0, 50.0), Vec2::new(10.0, 10.0)));

        let contacts = world.step(Duration::ZERO);
        assert_eq!(contacts, vec![Contact { a: runner, b: threat }]);
    }

    #[test]
    fn touching_edges_are_not_contacts() {
        let mut world = World::default();
        world.add_overlap(MOVER, THREAT);
        world.spawn(Body::new(MOVER, Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0)));
        world.spawn(Body::new(THREAT, Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0)));

        assert!(world.step(Duration::ZERO).is_empty());
    }

    #[test]
    fn unregistered_layers_never_report() {
        let mut world = World::default();
        world.spawn(Body::new(MOVER, Vec2::ZERO, Vec2::new(10.0, 10.0)));
        world.spawn(Body::new(THREAT, Vec2::ZERO, Vec2::new(10.0, 10.0)));

        assert!(world.step(Duration::ZERO).is_empty());
    }
}
