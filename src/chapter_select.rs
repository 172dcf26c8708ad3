// Chapter select: ten slots gated by the unlock high-water mark.

use bevy::prelude::*;

use crate::audio::PlayClick;
use crate::progress::Progress;
use crate::screens::Screen;
use crate::widgets::{DIM_BORDER, NORMAL_BUTTON, spawn_button};

pub struct ChapterSelectPlugin;

impl Plugin for ChapterSelectPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(Screen::ChapterSelect), setup_chapter_select)
            .add_systems(OnExit(Screen::ChapterSelect), clear_tooltip)
            .add_systems(
                Update,
                (
                    slot_actions,
                    back_actions,
                    sync_tooltip.run_if(resource_exists_and_changed::<LockTooltip>),
                    tick_tooltip.run_if(resource_exists::<LockTooltip>),
                )
                    .run_if(in_state(Screen::ChapterSelect)),
            );
    }
}

const CHAPTER_COUNT: u32 = 10;
const TOOLTIP_SECS: f32 = 3.0;

const LOCK_ICON: &str = "textures/lock.png";

#[derive(Component)]
struct ChapterSlot(u32);

#[derive(Component)]
struct BackButton;

#[derive(Component)]
struct TooltipText;

/// The single visible lock tooltip and its auto-hide timer. At most one exists;
/// pointing it at another chapter restarts the timer.
#[derive(Resource)]
struct LockTooltip {
    chapter: u32,
    timer: Timer,
}

impl LockTooltip {
    fn new(chapter: u32) -> Self {
        Self {
            chapter,
            timer: Timer::from_seconds(TOOLTIP_SECS, TimerMode::Once),
        }
    }

    fn retarget(&mut self, chapter: u32) {
        self.chapter = chapter;
        self.timer.reset();
    }

    fn expired(&mut self, delta: std::time::Duration) -> bool {
        self.timer.tick(delta).finished()
    }
}

/// Roman numeral label for a chapter slot.
fn roman(chapter: u32) -> &'static str {
    match chapter {
        1 => "I",
        2 => "II",
        3 => "III",
        4 => "IV",
        5 => "V",
        6 => "VI",
        7 => "VII",
        8 => "VIII",
        9 => "IX",
        10 => "X",
        _ => "?",
    }
}

fn setup_chapter_select(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    progress: Res<Progress>,
) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                row_gap: Val::Px(32.0),
                ..default()
            },
            DespawnOnExit(Screen::ChapterSelect),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("Главы"),
                TextFont {
                    font_size: 36.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));

            // Slot grid, five per row.
            parent
                .spawn(Node {
                    width: Val::Px(5.0 * 88.0),
                    flex_wrap: FlexWrap::Wrap,
                    justify_content: JustifyContent::Center,
                    column_gap: Val::Px(16.0),
                    row_gap: Val::Px(16.0),
                    ..default()
                })
                .with_children(|grid| {
                    for chapter in 1..=CHAPTER_COUNT {
                        spawn_slot(grid, chapter, progress.is_locked(chapter), &asset_server);
                    }
                });

            spawn_button(parent, "Назад", BackButton);
        });
}

fn spawn_slot(
    parent: &mut ChildSpawnerCommands,
    chapter: u32,
    locked: bool,
    asset_server: &AssetServer,
) {
    let numeral_color = if locked {
        Color::srgba(1.0, 1.0, 1.0, 0.35)
    } else {
        Color::WHITE
    };

    parent
        .spawn((
            ChapterSlot(chapter),
            Button,
            Node {
                width: Val::Px(72.0),
                height: Val::Px(72.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                border: UiRect::all(Val::Px(2.0)),
                ..default()
            },
            BorderColor::all(DIM_BORDER),
            BackgroundColor(NORMAL_BUTTON),
        ))
        .with_children(|slot| {
            slot.spawn((
                Text::new(roman(chapter)),
                TextFont {
                    font_size: 28.0,
                    ..default()
                },
                TextColor(numeral_color),
            ));

            if locked {
                slot.spawn((
                    ImageNode::new(asset_server.load(LOCK_ICON)),
                    Node {
                        width: Val::Px(20.0),
                        height: Val::Px(20.0),
                        position_type: PositionType::Absolute,
                        top: Val::Px(4.0),
                        right: Val::Px(4.0),
                        ..default()
                    },
                ));
            }
        });
}

fn slot_actions(
    query: Query<(&Interaction, &ChapterSlot), Changed<Interaction>>,
    mut progress: ResMut<Progress>,
    mut next_screen: ResMut<NextState<Screen>>,
    mut clicks: MessageWriter<PlayClick>,
    mut tooltip: Option<ResMut<LockTooltip>>,
    mut commands: Commands,
) {
    for (interaction, slot) in &query {
        if *interaction != Interaction::Pressed {
            continue;
        }
        clicks.write(PlayClick);
        if progress.is_locked(slot.0) {
            match tooltip.as_mut() {
                Some(tooltip) => tooltip.retarget(slot.0),
                None => commands.insert_resource(LockTooltip::new(slot.0)),
            }
        } else {
            progress.enter_chapter(slot.0);
            next_screen.set(Screen::Game);
        }
    }
}

fn back_actions(
    query: Query<&Interaction, (Changed<Interaction>, With<BackButton>)>,
    mut next_screen: ResMut<NextState<Screen>>,
    mut clicks: MessageWriter<PlayClick>,
) {
    for interaction in &query {
        if *interaction == Interaction::Pressed {
            clicks.write(PlayClick);
            next_screen.set(Screen::Menu);
        }
    }
}

/// Replace the tooltip text whenever the resource appears or changes target.
fn sync_tooltip(
    mut commands: Commands,
    tooltip: Res<LockTooltip>,
    existing: Query<Entity, With<TooltipText>>,
) {
    for entity in &existing {
        commands.entity(entity).despawn();
    }
    commands.spawn((
        TooltipText,
        Text::new(format!("Глава {} ещё не открыта", roman(tooltip.chapter))),
        TextFont {
            font_size: 20.0,
            ..default()
        },
        TextColor(Color::srgb(0.9, 0.8, 0.5)),
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(48.0),
            ..default()
        },
        DespawnOnExit(Screen::ChapterSelect),
    ));
}

fn tick_tooltip(
    mut commands: Commands,
    mut tooltip: ResMut<LockTooltip>,
    time: Res<Time>,
    texts: Query<Entity, With<TooltipText>>,
) {
    if tooltip.expired(time.delta()) {
        for entity in &texts {
            commands.entity(entity).despawn();
        }
        commands.remove_resource::<LockTooltip>();
    }
}

fn clear_tooltip(mut commands: Commands) {
    commands.remove_resource::<LockTooltip>();
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn roman_numerals_cover_all_slots() {
        let labels: Vec<_> = (1..=CHAPTER_COUNT).map(roman).collect();
        assert_eq!(
            labels,
            ["I", "II", "III", "IV", "V", "VI", "VII", "VIII", "IX", "X"]
        );
    }

    #[test]
    fn tooltip_hides_after_three_seconds() {
        let mut tooltip = LockTooltip::new(3);
        assert!(!tooltip.expired(Duration::from_secs_f32(2.9)));
        assert!(tooltip.expired(Duration::from_secs_f32(0.2)));
    }

    #[test]
    fn retarget_restarts_the_timer() {
        // Show A, then B before A's timer fires: B gets its own full window
        // and A's deadline never triggers a hide.
        let mut tooltip = LockTooltip::new(3);
        assert!(!tooltip.expired(Duration::from_secs_f32(2.0)));

        tooltip.retarget(7);
        assert_eq!(tooltip.chapter, 7);
        assert!(!tooltip.expired(Duration::from_secs_f32(2.0)));
        assert!(tooltip.expired(Duration::from_secs_f32(1.1)));
    }

    #[test]
    fn locked_selection_only_arms_tooltip() {
        let mut progress = Progress::default();
        assert!(progress.is_locked(3));

        let tooltip = LockTooltip::new(3);
        assert_eq!(tooltip.chapter, 3);
        // The record is untouched, so the view has nothing to transition on.
        assert!(!progress.enter_chapter(3));
        assert_eq!(progress, Progress::default());
    }
}
