//=========================================================================
// Playing Screen
//=========================================================================
//
// Hosts one `Session` per visit. The session is built on enter and
// dropped on exit, so every visit starts from scratch.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec2;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

//=== Internal Dependencies ===============================================

use crate::core::animation::AnimationLibrary;
use crate::core::globals::GlobalContext;
use crate::core::input::InputContext;
use crate::core::scene::{Scene, SceneTransition};
use crate::game::config::GameConfig;
use crate::game::score::{HighScore, Scoreboard};
use crate::game::session::{Session, TickOutcome};
use crate::game::{animations, GameAction, Screen};

//=== PlayingScreen =======================================================

pub struct PlayingScreen {
    config: GameConfig,
    library: AnimationLibrary,
    rng: StdRng,
    session: Option<Session>,
}

impl PlayingScreen {
    pub fn new(config: &GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Uses a fixed seed so spawns repeat exactly.
    pub fn with_seed(config: &GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: &GameConfig, rng: StdRng) -> Self {
        Self {
            config: config.clone(),
            library: animations(),
            rng,
            session: None,
        }
    }

    /// The running session, if the screen is active.
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }
}

impl Scene<Screen> for PlayingScreen {
    fn on_enter(&mut self, context: &mut GlobalContext) {
        let high_score = HighScore::load(&*context.store);

        context.labels.clear();
        context.labels.set("max", Vec2::new(30.0, 25.0), format!("MAX: {}", high_score));
        context.labels.set("score", Vec2::new(600.0, 25.0), "SCORE:0");
        context.message_bus.push(InputContext::Primary);

        self.session = Some(Session::start(&self.config, &self.library, high_score));
    }

    fn on_exit(&mut self, _context: &mut GlobalContext) {
        self.session = None;
    }

    fn update(&mut self, context: &mut GlobalContext) {
        if context.pressed(GameAction::Quit) {
            context.message_bus.push(SceneTransition::<Screen>::Exit);
            return;
        }

        let Some(session) = self.session.as_mut() else {
            return;
        };

        let jump_held = context.held(GameAction::Jump);
        let outcome = session.tick(
            context.clock.delta,
            jump_held,
            &mut self.rng,
            &self.library,
            &mut context.labels,
            &mut context.audio,
        );

        if let TickOutcome::GameOver { score } = outcome {
            let best = HighScore::record(&mut *context.store, score);
            info!(target: "game", "Game over: {} ({})", Scoreboard::label(score), best);
            context.message_bus.push(SceneTransition::Switch(Screen::GameOver));
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::MemoryStore;
    use crate::game::score::HIGH_SCORE_KEY;

    #[test]
    fn enter_builds_session_and_labels() {
        let mut screen = PlayingScreen::with_seed(&GameConfig::default(), 1);
        let mut context = GlobalContext::with_store(MemoryStore::new().with_value(HIGH_SCORE_KEY, 42));

        screen.on_enter(&mut context);

        assert_eq!(context.labels.text("max"), Some("MAX: 42"));
        assert_eq!(context.labels.text("score"), Some("SCORE:0"));
        assert_eq!(screen.session().map(Session::high_score), Some(42));
        assert_eq!(context.message_bus.read::<InputContext>(), &[InputContext::Primary]);
    }

    #[test]
    fn exit_drops_session() {
        let mut screen = PlayingScreen::with_seed(&GameConfig::default(), 1);
        let mut context = GlobalContext::new();

        screen.on_enter(&mut context);
        screen.on_exit(&mut context);

        assert!(screen.session().is_none());
    }

    #[test]
    fn quit_exits_without_recording() {
        let mut screen = PlayingScreen::with_seed(&GameConfig::default(), 1);
        let mut context = GlobalContext::new();
        screen.on_enter(&mut context);
        context.message_bus.push(crate::core::input::Pressed(GameAction::Quit));

        screen.update(&mut context);

        assert_eq!(
            context.message_bus.read::<SceneTransition<Screen>>(),
            &[SceneTransition::Exit]
        );
        assert_eq!(HighScore::load(&*context.store), 0);
    }
}
