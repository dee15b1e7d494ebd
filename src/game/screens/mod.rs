//=========================================================================
// Screens
//=========================================================================

mod menu;
mod playing;

pub use menu::MenuScreen;
pub use playing::PlayingScreen;
