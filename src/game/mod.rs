//=========================================================================
// Dash Runner
//=========================================================================
//
// The runner itself: a player jumps birds and plants while the ground
// scrolls underneath and the score ticks up.
//
// Screens:
//   Title ──start──▶ Playing ──hit──▶ GameOver ──start──▶ Playing
//     └───────────── quit (any screen) ─────────────▶ exit
//
// Everything here runs on the core thread and reaches the host only
// through `GlobalContext`.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod config;
pub mod difficulty;
pub mod ground;
pub mod hazards;
pub mod player;
pub mod score;
pub mod screens;
pub mod session;

//=== Public API ==========================================================

pub use config::{ConfigError, GameConfig};
pub use screens::{MenuScreen, PlayingScreen};
pub use session::{Session, TickOutcome};

//=== Internal Dependencies ===============================================

use crate::core::animation::{Animation, AnimationLibrary};
use crate::core::globals::GlobalSystems;
use crate::core::input::{Action, InputContext, InputSystem, KeyCode};
use crate::core::scene::{SceneKey, SceneManager};

//=== Screen ==============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    Title,
    Playing,
    GameOver,
}

impl SceneKey for Screen {}

//=== GameAction ==========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    /// Leave a menu screen for a new session.
    Start,
    Jump,
    Quit,
}

impl Action for GameAction {}

/// Bindings active on the title and game-over screens.
pub const MENU: InputContext = InputContext::custom(0);

//=== Layers ==============================================================

pub mod layers {
    use crate::core::physics::Layer;

    pub const PLAYER: Layer = Layer(0);
    pub const GROUND: Layer = Layer(1);
    pub const BIRD: Layer = Layer(2);
    pub const PLANT: Layer = Layer(3);
}

//=== Animations ==========================================================

/// Every animation the game plays, keyed by name.
pub fn animations() -> AnimationLibrary {
    let mut library = AnimationLibrary::new();
    library.add("fly", Animation::range(0, 1, 10.0, true));
    library.add("idle", Animation::still(6));
    library.add("run", Animation::range(6, 9, 15.0, true));
    library.add("jump", Animation::still(11));
    library
}

//=== Registration ========================================================

/// Binds keys and registers the three screens. Title is the first one
/// entered.
pub fn register(systems: &mut GlobalSystems<Screen, GameAction>, config: &GameConfig) {
    bind_keys(&mut systems.input);
    register_screens(&mut systems.scene_manager, config, PlayingScreen::new(config));
}

/// Menu keys start or quit; in play the same keys jump.
pub fn bind_keys(input: &mut InputSystem<GameAction>) {
    input.bind_key(KeyCode::Space, GameAction::Start, MENU);
    input.bind_key(KeyCode::Enter, GameAction::Start, MENU);
    input.bind_key(KeyCode::KeyR, GameAction::Start, MENU);
    input.bind_key(KeyCode::Escape, GameAction::Quit, MENU);
    input.bind_key(KeyCode::KeyQ, GameAction::Quit, MENU);

    input.bind_key(KeyCode::Space, GameAction::Jump, InputContext::Primary);
    input.bind_key(KeyCode::ArrowUp, GameAction::Jump, InputContext::Primary);
    input.bind_key(KeyCode::KeyW, GameAction::Jump, InputContext::Primary);
    input.bind_key(KeyCode::Escape, GameAction::Quit, InputContext::Primary);
}

/// Registers Title (default), `playing`, and GameOver.
pub fn register_screens(
    scenes: &mut SceneManager<Screen>,
    config: &GameConfig,
    playing: PlayingScreen,
) {
    scenes.register_default(Screen::Title, MenuScreen::title(config));
    scenes.register_scene(Screen::Playing, playing);
    scenes.register_scene(Screen::GameOver, MenuScreen::game_over(config));
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn animations_are_registered() {
        let library = animations();
        assert_eq!(library.len(), 4);
        for key in ["fly", "idle", "run", "jump"] {
            assert!(library.contains(key), "missing {}", key);
        }
        assert_eq!(library.get("run").map(|a| a.frames.clone()), Some(vec![6, 7, 8, 9]));
    }

    #[test]
    fn register_installs_all_screens() {
        let mut systems = GlobalSystems::<Screen, GameAction>::new();
        register(&mut systems, &GameConfig::default());

        for screen in [Screen::Title, Screen::Playing, Screen::GameOver] {
            assert!(systems.scene_manager.is_registered(screen));
        }
    }
}
