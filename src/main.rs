// Main
mod audio;
mod chapter_select;
mod fade;
mod game;
mod menu;
mod progress;
mod screens;
mod widgets;

use bevy::prelude::*;

use audio::ClickAudioPlugin;
use chapter_select::ChapterSelectPlugin;
use fade::FadePlugin;
use game::GamePlugin;
use menu::MenuPlugin;
use progress::ProgressPlugin;
use screens::Screen;
use widgets::WidgetsPlugin;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Novella".to_string(),
                resolution: (1280.0, 720.0).into(),
                ..default()
            }),
            ..default()
        }))
        .init_state::<Screen>()
        .add_plugins((
            ProgressPlugin,
            ClickAudioPlugin,
            WidgetsPlugin,
            MenuPlugin,
            ChapterSelectPlugin,
            GamePlugin,
            FadePlugin,
        ))
        .add_systems(Startup, setup_camera)
        .run();
}

fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}
