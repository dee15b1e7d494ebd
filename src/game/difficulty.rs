//=========================================================================
// Difficulty
//=========================================================================
//
// Per-session speed scalars. Every use makes the next one faster (more
// negative) until the floor is reached; nothing ever slows back down
// within a session.
//
//=========================================================================

use super::config::Tuning;

/// Bird and ground speeds for one session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedState {
    bird: f32,
    ground: f32,
    bird_floor: f32,
    ground_floor: f32,
}

impl SpeedState {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            bird: tuning.bird_speed,
            ground: tuning.ground_speed,
            bird_floor: tuning.bird_speed_floor,
            ground_floor: tuning.ground_speed_floor,
        }
    }

    /// Speeds the birds up by one and returns the new bird velocity.
    pub fn next_bird_velocity(&mut self) -> f32 {
        self.bird = (self.bird - 1.0).max(self.bird_floor);
        self.bird
    }

    /// Speeds the ground up by one and returns the new ground velocity.
    pub fn next_ground_velocity(&mut self) -> f32 {
        self.ground = (self.ground - 1.0).max(self.ground_floor);
        self.ground
    }

    /// Plants travel with the ground without speeding it up.
    pub fn plant_velocity(&self) -> f32 {
        self.ground.max(self.ground_floor)
    }

    pub fn bird(&self) -> f32 {
        self.bird
    }

    pub fn ground(&self) -> f32 {
        self.ground
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
