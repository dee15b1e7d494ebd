//=========================================================================
// Menu Screens
//=========================================================================
//
// Title and game-over share one scene type: two lines of text over a
// motionless ground strip, waiting for start or quit.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec2;
use log::info;

//=== Internal Dependencies ===============================================

use crate::core::globals::GlobalContext;
use crate::core::physics::World;
use crate::core::scene::{Scene, SceneTransition};
use crate::game::config::GameConfig;
use crate::game::ground::GroundStrip;
use crate::game::{GameAction, Screen, MENU};

//=== MenuScreen ==========================================================

pub struct MenuScreen {
    heading: &'static str,
    prompt: &'static str,
    world: World,
    ground: GroundStrip,
}

impl MenuScreen {
    pub fn title(config: &GameConfig) -> Self {
        Self::new(config, "START NEW GAME", "PRESS SPACE TO START")
    }

    pub fn game_over(config: &GameConfig) -> Self {
        Self::new(config, "RESTART GAME", "PRESS SPACE TO RESTART")
    }

    fn new(config: &GameConfig, heading: &'static str, prompt: &'static str) -> Self {
        Self {
            heading,
            prompt,
            world: World::default(),
            ground: GroundStrip::new(&config.viewport, &config.tuning),
        }
    }

    pub fn heading(&self) -> &'static str {
        self.heading
    }

    /// Tiles in the backdrop strip (empty while the screen is inactive).
    pub fn ground_tiles(&self) -> usize {
        self.ground.len()
    }
}

impl Scene<Screen> for MenuScreen {
    fn on_enter(&mut self, context: &mut GlobalContext) {
        info!(target: "game", "Menu: {}", self.heading);

        context.labels.clear();
        context.labels.set("heading", Vec2::new(400.0, 200.0), self.heading);
        context.labels.set("prompt", Vec2::new(400.0, 250.0), self.prompt);

        self.ground.build_static(&mut self.world);
        context.message_bus.push(MENU);
    }

    fn on_exit(&mut self, _context: &mut GlobalContext) {
        self.ground.clear(&mut self.world);
    }

    fn update(&mut self, context: &mut GlobalContext) {
        if context.pressed(GameAction::Quit) {
            context.message_bus.push(SceneTransition::<Screen>::Exit);
        } else if context.pressed(GameAction::Start) {
            context.message_bus.push(SceneTransition::Switch(Screen::Playing));
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
