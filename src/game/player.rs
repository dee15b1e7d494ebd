//=========================================================================
// Player
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;

//=== Internal Dependencies ===============================================

use super::config::Tuning;
use super::layers;
use crate::core::animation::{AnimationLibrary, Animator};
use crate::core::audio::AudioQueue;
use crate::core::physics::{Body, BodyHandle, World};

//=== Player ==============================================================

#[derive(Debug, Clone)]
pub struct Player {
    pub body: BodyHandle,
    pub animator: Animator,
}

impl Player {
    /// Spawns the runner, idle, at the configured spawn point.
    pub fn spawn(world: &mut World, library: &AnimationLibrary, tuning: &Tuning) -> Self {
        let body = Body::centered(layers::PLAYER, tuning.player_spawn(), tuning.player_size())
            .with_gravity(tuning.player_gravity);

        let mut animator = Animator::new();
        animator.play(library, "idle", false);

        Self { body: world.spawn(body), animator }
    }

    /// Applies one tick of input. Only a grounded player reacts: a held
    /// jump launches it, otherwise it keeps running.
    pub fn handle_input(
        &mut self,
        world: &mut World,
        jump_held: bool,
        library: &AnimationLibrary,
        audio: &mut AudioQueue,
        tuning: &Tuning,
    ) {
        let Some(body) = world.get_mut(self.body) else {
            return;
        };
        if !body.touching_down {
            return;
        }

        if jump_held {
            body.velocity.y = tuning.jump_velocity;
            self.animator.play(library, "jump", false);
            audio.play("numkey");
            debug!(target: "game::player", "Jump");
        } else {
            self.animator.play(library, "run", true);
        }
    }

    pub fn touching_down(&self, world: &World) -> bool {
        world.get(self.body).is_some_and(|body| body.touching_down)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::animations;
    use glam::Vec2;
    use std::time::Duration;

    fn grounded() -> (World, Player, AnimationLibrary) {
        let library = animations();
        let mut world = World::default();
        world.add_collider(layers::PLAYER, layers::GROUND);
        world.spawn(
            Body::new(layers::GROUND, Vec2::new(0.0, 436.0), Vec2::new(800.0, 64.0)).immovable(),
        );
        let player = Player::spawn(&mut world, &library, &Tuning::default());

        for _ in 0..100 {
            world.step(Duration::from_millis(10));
        }
        (world, player, library)
    }

    #[test]
    fn spawns_idle_at_spawn_point() {
        let library = animations();
        let mut world = World::default();
        let player = Player::spawn(&mut world, &library, &Tuning::default());

        let body = world.get(player.body).unwrap();
        assert_eq!(body.center(), Vec2::new(250.0, 200.0));
        assert_eq!(body.gravity, 850.0);
        assert_eq!(player.animator.current(), Some("idle"));
    }

    #[test]
    fn falls_onto_ground() {
        let (world, player, _) = grounded();
        assert!(player.touching_down(&world));
        assert_eq!(world.get(player.body).unwrap().bottom(), 436.0);
    }

    #[test]
    fn grounded_without_jump_runs() {
        let (mut world, mut player, library) = grounded();
        let mut audio = AudioQueue::new();

        player.handle_input(&mut world, false, &library, &mut audio, &Tuning::default());
        assert_eq!(player.animator.current(), Some("run"));
        assert!(audio.pending().is_empty());
    }

    #[test]
    fn grounded_jump_launches() {
        let (mut world, mut player, library) = grounded();
        let mut audio = AudioQueue::new();

        player.handle_input(&mut world, true, &library, &mut audio, &Tuning::default());
        assert_eq!(world.get(player.body).unwrap().velocity.y, -500.0);
        assert_eq!(player.animator.current(), Some("jump"));
        assert_eq!(audio.count("numkey"), 1);
    }

    #[test]
    fn airborne_input_is_ignored() {
        let library = animations();
        let tuning = Tuning::default();
        let mut world = World::default();
        let mut player = Player::spawn(&mut world, &library, &tuning);
        let mut audio = AudioQueue::new();
        world.step(Duration::from_millis(10));

        player.handle_input(&mut world, true, &library, &mut audio, &tuning);
        assert_eq!(player.animator.current(), Some("idle"));
        assert!(audio.pending().is_empty());
    }

    #[test]
    fn run_continues_without_restarting() {
        let (mut world, mut player, library) = grounded();
        let mut audio = AudioQueue::new();
        let tuning = Tuning::default();

        player.handle_input(&mut world, false, &library, &mut audio, &tuning);
        player.animator.advance(Duration::from_millis(70));
        let frame = player.animator.frame();
        player.handle_input(&mut world, false, &library, &mut audio, &tuning);

        assert_eq!(player.animator.frame(), frame);
        assert_ne!(frame, Some(6));
    }
}
