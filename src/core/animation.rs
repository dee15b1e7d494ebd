//=========================================================================
// Sprite Animation
//=========================================================================
//
// Named frame sequences and a per-entity player.
//
// Architecture:
//   AnimationLibrary (registered once) → Animator::play(key) → advance(dt)
//                                                             → frame()
//
// There is no renderer, so an animation only tracks which frame index is
// current. Games read it for logging and tests.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::time::Duration;

use log::{debug, warn};

//=== Animation ===========================================================

/// A frame sequence played at a fixed rate.
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    pub frames: Vec<u32>,
    /// Frames per second.
    pub frame_rate: f32,
    /// Restart from the first frame after the last one.
    pub looping: bool,
}

impl Animation {
    /// Contiguous frame range `start..=end`.
    pub fn range(start: u32, end: u32, frame_rate: f32, looping: bool) -> Self {
        Self {
            frames: (start..=end).collect(),
            frame_rate,
            looping,
        }
    }

    /// A single held frame.
    pub fn still(frame: u32) -> Self {
        Self {
            frames: vec![frame],
            frame_rate: 10.0,
            looping: false,
        }
    }

    fn frame_duration(&self) -> Duration {
        if self.frame_rate > 0.0 {
            Duration::from_secs_f32(1.0 / self.frame_rate)
        } else {
            Duration::MAX
        }
    }
}

//=== AnimationLibrary ====================================================

/// Animations registered by name.
#[derive(Debug, Clone, Default)]
pub struct AnimationLibrary {
    animations: HashMap<&'static str, Animation>,
}

impl AnimationLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `animation` under `key`, replacing any previous one.
    pub fn add(&mut self, key: &'static str, animation: Animation) {
        if self.animations.insert(key, animation).is_some() {
            warn!(target: "core::animation", "Animation {:?} replaced", key);
        }
    }

    pub fn get(&self, key: &str) -> Option<&Animation> {
        self.animations.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.animations.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.animations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }
}

//=== Animator ============================================================

/// Plays one animation at a time for a single entity.
#[derive(Debug, Clone, Default)]
pub struct Animator {
    current: Option<(&'static str, Animation)>,
    index: usize,
    elapsed: Duration,
}

impl Animator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts `key` from its first frame.
    ///
    /// With `ignore_if_playing`, a request for the animation that is
    /// already running leaves it untouched. Unknown keys are ignored.
    pub fn play(&mut self, library: &AnimationLibrary, key: &'static str, ignore_if_playing: bool) {
        if ignore_if_playing && self.current() == Some(key) {
            return;
        }

        let Some(animation) = library.get(key) else {
            warn!(target: "core::animation", "Unknown animation {:?}", key);
            return;
        };

        debug!(target: "core::animation", "Play {:?}", key);
        self.current = Some((key, animation.clone()));
        self.index = 0;
        self.elapsed = Duration::ZERO;
    }

    /// Advances playback by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        let Some((_, animation)) = &self.current else {
            return;
        };
        if animation.frames.len() < 2 {
            return;
        }

        let step = animation.frame_duration();
        self.elapsed += dt;

        while self.elapsed >= step {
            self.elapsed -= step;
            if self.index + 1 < animation.frames.len() {
                self.index += 1;
            } else if animation.looping {
                self.index = 0;
            } else {
                self.elapsed = Duration::ZERO;
                break;
            }
        }
    }

    /// Key of the running animation.
    pub fn current(&self) -> Option<&'static str> {
        self.current.as_ref().map(|(key, _)| *key)
    }

    /// Frame index currently shown.
    pub fn frame(&self) -> Option<u32> {
        self.current
            .as_ref()
            .and_then(|(_, animation)| animation.frames.get(self.index).copied())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn library() -> AnimationLibrary {
        let mut library = AnimationLibrary::new();
        library.add("run", Animation::range(6, 9, 10.0, true));
        library.add("jump", Animation::still(11));
        library.add("once", Animation::range(0, 2, 10.0, false));
        library
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn range_builds_inclusive_frames() {
        assert_eq!(Animation::range(6, 9, 15.0, true).frames, vec![6, 7, 8, 9]);
    }

    #[test]
    fn idle_animator_has_no_frame() {
        let animator = Animator::new();
        assert_eq!(animator.current(), None);
        assert_eq!(animator.frame(), None);
    }

    #[test]
    fn play_starts_at_first_frame() {
        let library = library();
        let mut animator = Animator::new();
        animator.play(&library, "run", false);

        assert_eq!(animator.current(), Some("run"));
        assert_eq!(animator.frame(), Some(6));
    }

    #[test]
    fn looping_animation_wraps() {
        let library = library();
        let mut animator = Animator::new();
        animator.play(&library, "run", false);

        animator.advance(ms(250));
        assert_eq!(animator.frame(), Some(8));
        animator.advance(ms(200));
        assert_eq!(animator.frame(), Some(6));
    }

    #[test]
    fn non_looping_animation_holds_last_frame() {
        let library = library();
        let mut animator = Animator::new();
        animator.play(&library, "once", false);

        animator.advance(ms(1000));
        assert_eq!(animator.frame(), Some(2));
    }

    #[test]
    fn ignore_if_playing_keeps_progress() {
        let library = library();
        let mut animator = Animator::new();
        animator.play(&library, "run", false);
        animator.advance(ms(150));
        assert_eq!(animator.frame(), Some(7));

        animator.play(&library, "run", true);
        assert_eq!(animator.frame(), Some(7));

        animator.play(&library, "run", false);
        assert_eq!(animator.frame(), Some(6), "restart without the flag");
    }

    #[test]
    fn unknown_key_leaves_state_alone() {
        let library = library();
        let mut animator = Animator::new();
        animator.play(&library, "jump", false);
        animator.play(&library, "swim", false);

        assert_eq!(animator.current(), Some("jump"));
        assert_eq!(animator.frame(), Some(11));
    }
}
