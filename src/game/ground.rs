//=========================================================================
// Ground Strip
//=========================================================================
//
// Tiled, endlessly scrolling ground.
//
// Architecture:
//   fill_from(x) → append tiles → retune ALL tile velocities → prune
//   update()     → refill when the rightmost edge enters the viewport
//
// Tiles are kept oldest first, so the last one is always the rightmost.
// Every refill nudges the ground speed once per tile; newer tiles end
// up marginally faster than older ones and close in on them, so the
// strip may overlap itself but never opens a gap.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec2;
use log::{debug, trace};

//=== Internal Dependencies ===============================================

use super::config::{Tuning, ViewportConfig};
use super::difficulty::SpeedState;
use super::layers;
use crate::core::physics::{Body, BodyHandle, World};

//=== GroundStrip =========================================================

#[derive(Debug, Clone)]
pub struct GroundStrip {
    tiles: Vec<BodyHandle>,
    tile_size: Vec2,
    overlap: f32,
    viewport_width: f32,
    surface_y: f32,
}

impl GroundStrip {
    pub fn new(viewport: &ViewportConfig, tuning: &Tuning) -> Self {
        Self {
            tiles: Vec::new(),
            tile_size: Vec2::new(tuning.tile_width, tuning.tile_height),
            overlap: tuning.tile_overlap,
            viewport_width: viewport.width(),
            surface_y: viewport.height() - tuning.tile_height,
        }
    }

    //--- Building ---------------------------------------------------------

    /// Lays a motionless strip across the viewport (menu backdrop).
    pub fn build_static(&mut self, world: &mut World) {
        let count = self.append_from(world, 0.0);
        debug!(target: "game::ground", "Built static strip of {} tiles", count);
    }

    /// Appends tiles starting at `x` until the viewport is covered, then
    /// retunes every tile's velocity and drops tiles far off-screen.
    pub fn fill_from(&mut self, world: &mut World, x: f32, speed: &mut SpeedState) {
        let count = self.append_from(world, x);

        for handle in &self.tiles {
            let velocity = speed.next_ground_velocity();
            if let Some(tile) = world.get_mut(*handle) {
                tile.velocity.x = velocity;
            }
        }

        let pruned = self.prune(world);
        debug!(
            target: "game::ground",
            "Refilled {} tiles from x={:.1}, pruned {}, ground speed {}",
            count,
            x,
            pruned,
            speed.ground()
        );
    }

    /// Refills when the rightmost edge has entered the viewport. Returns
    /// whether a refill happened.
    pub fn update(&mut self, world: &mut World, speed: &mut SpeedState) -> bool {
        match self.rightmost_edge(world) {
            Some(edge) if edge < self.viewport_width => {
                trace!(target: "game::ground", "Rightmost edge {:.1} inside viewport", edge);
                self.fill_from(world, edge, speed);
                true
            }
            Some(_) => false,
            None => {
                self.fill_from(world, 0.0, speed);
                true
            }
        }
    }

    //--- Queries ----------------------------------------------------------

    /// Right edge of the newest tile.
    pub fn rightmost_edge(&self, world: &World) -> Option<f32> {
        self.tiles
            .last()
            .and_then(|handle| world.get(*handle))
            .map(Body::right)
    }

    pub fn tiles(&self) -> &[BodyHandle] {
        &self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Forgets every tile and despawns them from `world`.
    pub fn clear(&mut self, world: &mut World) {
        for handle in self.tiles.drain(..) {
            world.despawn(handle);
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn append_from(&mut self, world: &mut World, x: f32) -> usize {
        let anchor = x - self.overlap;
        let count = ((self.viewport_width - anchor) / self.tile_size.x).ceil().max(1.0) as usize;

        for i in 0..count {
            let position = Vec2::new(anchor + i as f32 * self.tile_size.x, self.surface_y);
            let tile = Body::new(layers::GROUND, position, self.tile_size).immovable();
            self.tiles.push(world.spawn(tile));
        }
        count
    }

    fn prune(&mut self, world: &mut World) -> usize {
        let limit = -2.0 * self.tile_size.x;
        let before = self.tiles.len();

        self.tiles.retain(|handle| match world.get(*handle).map(|tile| tile.left() < limit) {
            Some(true) => {
                world.despawn(*handle);
                false
            }
            Some(false) => true,
            None => false,
        });

        before - self.tiles.len()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn setup() -> (World, GroundStrip, SpeedState) {
        let tuning = Tuning::default();
        let strip = GroundStrip::new(&ViewportConfig::default(), &tuning);
        (World::default(), strip, SpeedState::new(&tuning))
    }

    //=== Initial Fill =====================================================

    #[test]
    fn first_fill_covers_viewport_from_overlap() {
        let (mut world, mut strip, mut speed) = setup();
        strip.fill_from(&mut world, 0.0, &mut speed);

        assert_eq!(strip.len(), 13);
        let first = world.get(strip.tiles()[0]).unwrap();
        assert_eq!(first.position, Vec2::new(-10.0, 436.0));
        assert_eq!(strip.rightmost_edge(&world), Some(822.0));
    }

    #[test]
    fn every_tile_gets_its_own_speed_nudge() {
        let (mut world, mut strip, mut speed) = setup();
        strip.fill_from(&mut world, 0.0, &mut speed);

        let velocities: Vec<f32> =
            strip.tiles().iter().map(|h| world.get(*h).unwrap().velocity.x).collect();
        assert_eq!(velocities[0], -181.0);
        assert_eq!(velocities[12], -193.0);
        assert_eq!(speed.ground(), -193.0);
    }

    #[test]
    fn static_strip_does_not_move() {
        let (mut world, mut strip, _) = setup();
        strip.build_static(&mut world);
        world.step(Duration::from_millis(500));

        assert_eq!(strip.len(), 13);
        assert_eq!(strip.rightmost_edge(&world), Some(822.0));
    }

    #[test]
    fn update_on_empty_strip_fills_it() {
        let (mut world, mut strip, mut speed) = setup();
        assert!(strip.update(&mut world, &mut speed));
        assert!(!strip.is_empty());
    }

    //=== Scrolling ========================================================

    #[test]
    fn no_refill_while_edge_is_outside_viewport() {
        let (mut world, mut strip, mut speed) = setup();
        strip.fill_from(&mut world, 0.0, &mut speed);
        assert!(!strip.update(&mut world, &mut speed));
    }

    #[test]
    fn rightmost_edge_never_enters_viewport() {
        let (mut world, mut strip, mut speed) = setup();
        strip.fill_from(&mut world, 0.0, &mut speed);

        for _ in 0..2000 {
            world.step(Duration::from_millis(16));
            strip.update(&mut world, &mut speed);
            let edge = strip.rightmost_edge(&world).unwrap();
            assert!(edge >= 800.0, "edge {} left of viewport", edge);
        }
    }

    #[test]
    fn far_off_tiles_are_pruned() {
        let (mut world, mut strip, mut speed) = setup();
        strip.fill_from(&mut world, 0.0, &mut speed);

        for _ in 0..2000 {
            world.step(Duration::from_millis(16));
            strip.update(&mut world, &mut speed);
        }

        // Pruning is lazy, so only check the bound after the last refill
        // together with the world size staying small
        assert!(strip.len() < 40);
        assert_eq!(world.len(), strip.len());
    }

    #[test]
    fn ground_speed_reaches_floor() {
        let (mut world, mut strip, mut speed) = setup();
        strip.fill_from(&mut world, 0.0, &mut speed);

        for _ in 0..2000 {
            world.step(Duration::from_millis(16));
            strip.update(&mut world, &mut speed);
        }
        assert_eq!(speed.ground(), -230.0);
    }

    #[test]
    fn clear_despawns_tiles() {
        let (mut world, mut strip, mut speed) = setup();
        strip.fill_from(&mut world, 0.0, &mut speed);
        strip.clear(&mut world);

        assert!(strip.is_empty());
        assert!(world.is_empty());
    }
}
