// One-shot entrance fade when the game view opens.

use bevy::prelude::*;

use crate::screens::Screen;

pub struct FadePlugin;

impl Plugin for FadePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(Screen::Game), spawn_overlay)
            .add_systems(OnExit(Screen::Game), clear_fade)
            .add_systems(Update, fade_overlay.run_if(in_state(Screen::Game)));
    }
}

const HOLD: f32 = 0.1;
const FADE_OUT: f32 = 0.6;

#[derive(Resource)]
struct FadeTimer(f32);

#[derive(Component)]
struct FadeOverlay;

fn spawn_overlay(mut commands: Commands) {
    commands.insert_resource(FadeTimer(0.0));

    commands.spawn((
        FadeOverlay,
        Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            position_type: PositionType::Absolute,
            ..default()
        },
        BackgroundColor(Color::BLACK),
        GlobalZIndex(100),
        DespawnOnExit(Screen::Game),
    ));
}

/// Overlay alpha over elapsed time: opaque through the hold, then a linear
/// fade to clear. Monotone non-increasing.
fn overlay_alpha(t: f32) -> f32 {
    if t < HOLD {
        1.0
    } else {
        (1.0 - (t - HOLD) / FADE_OUT).max(0.0)
    }
}

fn fade_overlay(
    mut commands: Commands,
    time: Res<Time>,
    timer: Option<ResMut<FadeTimer>>,
    overlays: Query<Entity, With<FadeOverlay>>,
    mut backgrounds: Query<&mut BackgroundColor, With<FadeOverlay>>,
) {
    let Some(mut timer) = timer else {
        return;
    };

    timer.0 += time.delta_secs();
    let t = timer.0;

    if t >= HOLD + FADE_OUT {
        // Done — despawn the overlay and stop ticking until the next entry.
        for entity in &overlays {
            commands.entity(entity).despawn();
        }
        commands.remove_resource::<FadeTimer>();
        return;
    }

    let alpha = overlay_alpha(t);
    for mut bg in &mut backgrounds {
        bg.0 = Color::srgba(0.0, 0.0, 0.0, alpha);
    }
}

fn clear_fade(mut commands: Commands) {
    commands.remove_resource::<FadeTimer>();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlay_starts_opaque() {
        assert_eq!(overlay_alpha(0.0), 1.0);
    }

    #[test]
    fn overlay_holds_through_the_delay() {
        assert_eq!(overlay_alpha(HOLD - 0.01), 1.0);
    }

    #[test]
    fn overlay_is_clear_after_the_fade() {
        assert_eq!(overlay_alpha(HOLD + FADE_OUT), 0.0);
        assert_eq!(overlay_alpha(HOLD + FADE_OUT + 1.0), 0.0);
    }

    #[test]
    fn overlay_alpha_is_monotone_non_increasing() {
        let mut previous = f32::INFINITY;
        for step in 0..100 {
            let alpha = overlay_alpha(step as f32 * 0.01);
            assert!(alpha <= previous);
            previous = alpha;
        }
    }
}
