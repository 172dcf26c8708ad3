// In-game view: chapter background, dialogue box, and the control panel.

use bevy::prelude::*;

use crate::audio::PlayClick;
use crate::progress::Progress;
use crate::screens::Screen;
use crate::widgets::spawn_button;

pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(Screen::Game), setup_game)
            .add_systems(OnExit(Screen::Game), exit_game)
            .add_systems(
                Update,
                (
                    trigger_actions,
                    panel_actions,
                    confirm_actions,
                    choice_actions,
                    sync_panel.run_if(resource_exists_and_changed::<PanelState>),
                )
                    .run_if(in_state(Screen::Game)),
            );
    }
}

const PANEL_ICON: &str = "textures/panel.png";

const DIALOGUE: &str = "Ветер листает страницы. Кто-то тихо зовёт тебя по имени.";
const CHOICES: [&str; 2] = ["Откликнуться", "Промолчать"];

fn background_path(chapter: u32) -> String {
    format!("textures/chapter_{chapter}.png")
}

/// Open/closed state of the control panel and its restart confirmation.
/// Mutated only through the intent methods below; a sync system mirrors it
/// into node visibility.
#[derive(Resource, Debug, Default, PartialEq, Eq)]
struct PanelState {
    panel_open: bool,
    confirm_open: bool,
}

impl PanelState {
    fn toggle_panel(&mut self) {
        self.panel_open = !self.panel_open;
    }

    fn open_confirm(&mut self) {
        self.confirm_open = true;
    }

    /// Restart was confirmed: close the confirmation and the panel.
    fn confirm_restart(&mut self) {
        self.confirm_open = false;
        self.panel_open = false;
    }

    /// Restart was declined: close only the confirmation.
    fn decline_restart(&mut self) {
        self.confirm_open = false;
    }
}

#[derive(Component)]
struct PanelTrigger;

#[derive(Component)]
struct Panel;

#[derive(Component, Clone, Copy)]
enum PanelButton {
    Back,
    Restart,
}

#[derive(Component)]
struct ConfirmDialog;

#[derive(Component, Clone, Copy)]
enum ConfirmButton {
    Yes,
    No,
}

#[derive(Component)]
struct ChoiceButton(usize);

fn setup_game(mut commands: Commands, asset_server: Res<AssetServer>, progress: Res<Progress>) {
    commands.insert_resource(PanelState::default());

    // Chapter background fills the window behind everything else.
    commands.spawn((
        ImageNode::new(asset_server.load(background_path(progress.current_chapter))),
        Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            position_type: PositionType::Absolute,
            ..default()
        },
        DespawnOnExit(Screen::Game),
    ));

    // Panel trigger in the top-left corner.
    commands.spawn((
        PanelTrigger,
        Button,
        ImageNode::new(asset_server.load(PANEL_ICON)),
        Node {
            width: Val::Px(48.0),
            height: Val::Px(48.0),
            position_type: PositionType::Absolute,
            top: Val::Px(12.0),
            left: Val::Px(12.0),
            ..default()
        },
        DespawnOnExit(Screen::Game),
    ));

    // The panel itself, hidden until the trigger is pressed.
    commands
        .spawn((
            Panel,
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(72.0),
                left: Val::Px(12.0),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(8.0),
                padding: UiRect::all(Val::Px(12.0)),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.8)),
            Visibility::Hidden,
            DespawnOnExit(Screen::Game),
        ))
        .with_children(|panel| {
            spawn_button(panel, "Назад", PanelButton::Back);
            spawn_button(panel, "Рестарт", PanelButton::Restart);
        });

    // Restart confirmation overlay.
    commands
        .spawn((
            ConfirmDialog,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                position_type: PositionType::Absolute,
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                row_gap: Val::Px(16.0),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.6)),
            GlobalZIndex(150),
            Visibility::Hidden,
            DespawnOnExit(Screen::Game),
        ))
        .with_children(|dialog| {
            dialog.spawn((
                Text::new("Начать главу заново?"),
                TextFont {
                    font_size: 28.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));

            dialog
                .spawn(Node {
                    column_gap: Val::Px(16.0),
                    ..default()
                })
                .with_children(|row| {
                    spawn_button(row, "Да", ConfirmButton::Yes);
                    spawn_button(row, "Нет", ConfirmButton::No);
                });
        });

    // Dialogue box along the bottom.
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                bottom: Val::Px(24.0),
                left: Val::Percent(10.0),
                width: Val::Percent(80.0),
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                row_gap: Val::Px(16.0),
                padding: UiRect::all(Val::Px(24.0)),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.7)),
            DespawnOnExit(Screen::Game),
        ))
        .with_children(|dialogue| {
            dialogue.spawn((
                Text::new(DIALOGUE),
                TextFont {
                    font_size: 22.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));

            dialogue
                .spawn(Node {
                    column_gap: Val::Px(16.0),
                    ..default()
                })
                .with_children(|row| {
                    for (index, label) in CHOICES.iter().enumerate() {
                        spawn_button(row, label, ChoiceButton(index));
                    }
                });
        });
}

fn trigger_actions(
    query: Query<&Interaction, (Changed<Interaction>, With<PanelTrigger>)>,
    mut state: ResMut<PanelState>,
    mut clicks: MessageWriter<PlayClick>,
) {
    for interaction in &query {
        if *interaction == Interaction::Pressed {
            clicks.write(PlayClick);
            state.toggle_panel();
        }
    }
}

fn panel_actions(
    query: Query<(&Interaction, &PanelButton), Changed<Interaction>>,
    mut state: ResMut<PanelState>,
    mut next_screen: ResMut<NextState<Screen>>,
    mut clicks: MessageWriter<PlayClick>,
) {
    for (interaction, button) in &query {
        if *interaction != Interaction::Pressed {
            continue;
        }
        clicks.write(PlayClick);
        match button {
            PanelButton::Back => {
                next_screen.set(Screen::Menu);
            }
            PanelButton::Restart => {
                state.open_confirm();
            }
        }
    }
}

fn confirm_actions(
    query: Query<(&Interaction, &ConfirmButton), Changed<Interaction>>,
    mut state: ResMut<PanelState>,
    progress: Res<Progress>,
    mut clicks: MessageWriter<PlayClick>,
) {
    for (interaction, button) in &query {
        if *interaction != Interaction::Pressed {
            continue;
        }
        clicks.write(PlayClick);
        match button {
            ConfirmButton::Yes => {
                // Chapter-local progress does not exist yet, so restarting is
                // just a return to the top of the scene.
                info!("restarting chapter {}", progress.current_chapter);
                state.confirm_restart();
            }
            ConfirmButton::No => {
                state.decline_restart();
            }
        }
    }
}

fn choice_actions(
    query: Query<(&Interaction, &ChoiceButton), Changed<Interaction>>,
    mut clicks: MessageWriter<PlayClick>,
) {
    for (interaction, choice) in &query {
        if *interaction == Interaction::Pressed {
            clicks.write(PlayClick);
            info!("choice: {}", CHOICES[choice.0]);
        }
    }
}

fn sync_panel(
    state: Res<PanelState>,
    mut panels: Query<&mut Visibility, (With<Panel>, Without<ConfirmDialog>)>,
    mut dialogs: Query<&mut Visibility, (With<ConfirmDialog>, Without<Panel>)>,
) {
    for mut visibility in &mut panels {
        *visibility = if state.panel_open {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }
    for mut visibility in &mut dialogs {
        *visibility = if state.confirm_open {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }
}

fn exit_game(mut commands: Commands) {
    commands.remove_resource::<PanelState>();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panel_toggle_round_trips() {
        let mut state = PanelState::default();
        state.toggle_panel();
        assert!(state.panel_open);
        state.toggle_panel();
        assert!(!state.panel_open);
    }

    #[test]
    fn declining_restart_closes_only_the_confirmation() {
        let mut state = PanelState {
            panel_open: true,
            confirm_open: true,
        };
        state.decline_restart();
        assert_eq!(
            state,
            PanelState {
                panel_open: true,
                confirm_open: false,
            }
        );
    }

    #[test]
    fn confirming_restart_closes_panel_and_confirmation() {
        let mut state = PanelState {
            panel_open: true,
            confirm_open: true,
        };
        state.confirm_restart();
        assert_eq!(state, PanelState::default());
    }

    #[test]
    fn background_path_follows_current_chapter() {
        assert_eq!(background_path(1), "textures/chapter_1.png");
        assert_eq!(background_path(10), "textures/chapter_10.png");
    }
}
