// Top-level screens.
use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum Screen {
    #[default]
    Menu,
    ChapterSelect,
    Game,
}
