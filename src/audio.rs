// Click-sound feedback for user-intent actions.

use bevy::audio::Volume;
use bevy::prelude::*;

pub struct ClickAudioPlugin;

impl Plugin for ClickAudioPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<PlayClick>()
            .add_systems(Startup, load_click_sound)
            .add_systems(Update, drain_clicks);
    }
}

const CLICK_PATH: &str = "audio/click.ogg";
const CLICK_VOLUME: f32 = 0.3;

/// Fire-and-forget request for the UI click sound. Senders never learn whether
/// playback happened.
#[derive(Message)]
pub struct PlayClick;

#[derive(Resource)]
struct ClickSound(Handle<AudioSource>);

fn load_click_sound(mut commands: Commands, asset_server: Res<AssetServer>) {
    commands.insert_resource(ClickSound(asset_server.load(CLICK_PATH)));
}

/// Play at most one click per frame. Requests made before the asset has
/// finished loading are dropped, not queued.
fn drain_clicks(
    mut commands: Commands,
    mut clicks: MessageReader<PlayClick>,
    sound: Res<ClickSound>,
    asset_server: Res<AssetServer>,
) {
    if clicks.is_empty() {
        return;
    }
    clicks.clear();
    if !asset_server.is_loaded_with_dependencies(&sound.0) {
        return;
    }
    commands.spawn((
        AudioPlayer::new(sound.0.clone()),
        PlaybackSettings::DESPAWN.with_volume(Volume::Linear(CLICK_VOLUME)),
    ));
}
