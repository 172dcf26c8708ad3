// Main menu

use bevy::prelude::*;
use strum::{EnumIter, IntoEnumIterator};

use crate::audio::PlayClick;
use crate::progress::Progress;
use crate::screens::Screen;
use crate::widgets::spawn_button;

pub struct MenuPlugin;

impl Plugin for MenuPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(Screen::Menu), setup_menu)
            .add_systems(OnExit(Screen::Menu), exit_menu)
            .add_systems(
                Update,
                (button_actions, book_hover).run_if(in_state(Screen::Menu)),
            );
    }
}

const BOOK_CLOSED: &str = "textures/book_closed.png";
const BOOK_OPEN: &str = "textures/book_open.png";

#[derive(Component, Clone, Copy, EnumIter)]
enum MenuButton {
    Start,
    Load,
}

impl MenuButton {
    fn label(self) -> &'static str {
        match self {
            Self::Start => "Начать",
            Self::Load => "Загрузить",
        }
    }
}

#[derive(Resource)]
struct MenuArt {
    closed: Handle<Image>,
    open: Handle<Image>,
}

#[derive(Component)]
struct BookArt;

fn setup_menu(mut commands: Commands, asset_server: Res<AssetServer>) {
    let art = MenuArt {
        closed: asset_server.load(BOOK_CLOSED),
        open: asset_server.load(BOOK_OPEN),
    };

    // Root container.
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                row_gap: Val::Px(24.0),
                ..default()
            },
            DespawnOnExit(Screen::Menu),
        ))
        .with_children(|parent| {
            // Book art above the buttons; opens while Start is hovered.
            parent.spawn((
                BookArt,
                ImageNode::new(art.closed.clone()),
                Node {
                    width: Val::Px(320.0),
                    height: Val::Px(240.0),
                    margin: UiRect::bottom(Val::Px(32.0)),
                    ..default()
                },
            ));

            for button in MenuButton::iter() {
                spawn_button(parent, button.label(), button);
            }
        });

    commands.insert_resource(art);
}

fn button_actions(
    query: Query<(&Interaction, &MenuButton), Changed<Interaction>>,
    progress: Res<Progress>,
    mut next_screen: ResMut<NextState<Screen>>,
    mut clicks: MessageWriter<PlayClick>,
) {
    for (interaction, button) in &query {
        if *interaction != Interaction::Pressed {
            continue;
        }
        clicks.write(PlayClick);
        match button {
            MenuButton::Start => {
                // Resume whatever chapter the record points at.
                info!("starting chapter {}", progress.current_chapter);
                next_screen.set(Screen::Game);
            }
            MenuButton::Load => {
                next_screen.set(Screen::ChapterSelect);
            }
        }
    }
}

fn book_hover(
    buttons: Query<(&Interaction, &MenuButton), Changed<Interaction>>,
    art: Res<MenuArt>,
    mut book: Query<&mut ImageNode, With<BookArt>>,
) {
    for (interaction, button) in &buttons {
        if !matches!(button, MenuButton::Start) {
            continue;
        }
        let Ok(mut image) = book.single_mut() else {
            return;
        };
        image.image = match interaction {
            Interaction::None => art.closed.clone(),
            _ => art.open.clone(),
        };
    }
}

fn exit_menu(mut commands: Commands) {
    commands.remove_resource::<MenuArt>();
}
