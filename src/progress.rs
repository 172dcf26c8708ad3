// Persisted chapter progress: one JSON record in the platform data directory.

use std::fs;
use std::path::PathBuf;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

pub struct ProgressPlugin;

impl Plugin for ProgressPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(load())
            .add_systems(Update, save_on_change.run_if(resource_changed::<Progress>));
    }
}

const APP_DIR: &str = "novella";
const SAVE_FILE: &str = "progress.json";

/// The single implicit save: the chapter being read and the unlock high-water
/// mark. `unlocked_chapters` only ever grows; `current_chapter` may point
/// anywhere at or below it.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub current_chapter: u32,
    pub unlocked_chapters: u32,
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            current_chapter: 1,
            unlocked_chapters: 1,
        }
    }
}

impl Progress {
    /// Chapters above the unlock high-water mark are not playable.
    pub fn is_locked(&self, chapter: u32) -> bool {
        chapter > self.unlocked_chapters
    }

    /// Enter `chapter` if it is unlocked, making it the current chapter.
    /// Locked chapters leave the record untouched.
    pub fn enter_chapter(&mut self, chapter: u32) -> bool {
        if self.is_locked(chapter) {
            return false;
        }
        self.current_chapter = chapter;
        true
    }
}

fn save_path() -> Option<PathBuf> {
    Some(dirs::data_dir()?.join(APP_DIR).join(SAVE_FILE))
}

/// Parse a persisted record. Missing fields, wrong-typed fields, and chapter
/// numbers below 1 are all rejected.
fn decode(json: &str) -> Option<Progress> {
    let progress: Progress = serde_json::from_str(json).ok()?;
    if progress.current_chapter < 1 || progress.unlocked_chapters < 1 {
        return None;
    }
    Some(progress)
}

fn encode(progress: &Progress) -> String {
    serde_json::to_string(progress).unwrap_or_default()
}

/// Read the progress record, falling back to defaults on any corruption.
pub fn load() -> Progress {
    let Some(path) = save_path() else {
        return Progress::default();
    };
    let Ok(json) = fs::read_to_string(&path) else {
        return Progress::default();
    };
    match decode(&json) {
        Some(progress) => progress,
        None => {
            warn!("discarding corrupt progress record at {}", path.display());
            Progress::default()
        }
    }
}

/// Write the progress record. Failures are logged and swallowed; the in-memory
/// state stays authoritative until a later write succeeds.
pub fn save(progress: &Progress) {
    let Some(path) = save_path() else {
        error!("no data directory; progress not saved");
        return;
    };
    if let Some(dir) = path.parent() {
        if let Err(e) = fs::create_dir_all(dir) {
            error!("create {}: {e}", dir.display());
            return;
        }
    }
    if let Err(e) = fs::write(&path, encode(progress)) {
        error!("write {}: {e}", path.display());
    }
}

fn save_on_change(progress: Res<Progress>) {
    save(&progress);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_first_chapter() {
        let progress = Progress::default();
        assert_eq!(progress.current_chapter, 1);
        assert_eq!(progress.unlocked_chapters, 1);
    }

    #[test]
    fn decode_rejects_invalid_json() {
        assert_eq!(decode(""), None);
        assert_eq!(decode("not json"), None);
        assert_eq!(decode("42"), None);
    }

    #[test]
    fn decode_rejects_missing_fields() {
        assert_eq!(decode("{}"), None);
        assert_eq!(decode(r#"{"current_chapter": 2}"#), None);
        assert_eq!(decode(r#"{"unlocked_chapters": 3}"#), None);
    }

    #[test]
    fn decode_rejects_wrong_types() {
        assert_eq!(
            decode(r#"{"current_chapter": "2", "unlocked_chapters": 3}"#),
            None
        );
        assert_eq!(
            decode(r#"{"current_chapter": 2, "unlocked_chapters": null}"#),
            None
        );
    }

    #[test]
    fn decode_rejects_out_of_range_chapters() {
        assert_eq!(decode(r#"{"current_chapter": 0, "unlocked_chapters": 1}"#), None);
        assert_eq!(decode(r#"{"current_chapter": 1, "unlocked_chapters": 0}"#), None);
        assert_eq!(
            decode(r#"{"current_chapter": -1, "unlocked_chapters": 1}"#),
            None
        );
    }

    #[test]
    fn decode_accepts_valid_record() {
        let progress = decode(r#"{"current_chapter": 3, "unlocked_chapters": 5}"#).unwrap();
        assert_eq!(progress.current_chapter, 3);
        assert_eq!(progress.unlocked_chapters, 5);
    }

    #[test]
    fn encode_decode_round_trip_is_stable() {
        let progress = Progress {
            current_chapter: 4,
            unlocked_chapters: 7,
        };
        let first = encode(&progress);
        let second = encode(&decode(&first).unwrap());
        assert_eq!(first, second);
    }

    #[test]
    fn is_locked_matches_high_water_mark() {
        let progress = Progress {
            current_chapter: 1,
            unlocked_chapters: 3,
        };
        for chapter in 1..=10 {
            assert_eq!(progress.is_locked(chapter), chapter > 3);
        }
    }

    #[test]
    fn is_locked_boundary_is_playable() {
        let progress = Progress {
            current_chapter: 1,
            unlocked_chapters: 4,
        };
        assert!(!progress.is_locked(4));
        assert!(progress.is_locked(5));
    }

    #[test]
    fn enter_locked_chapter_changes_nothing() {
        let mut progress = Progress::default();
        assert!(!progress.enter_chapter(3));
        assert_eq!(progress, Progress::default());
    }

    #[test]
    fn enter_unlocked_chapter_sets_current() {
        let mut progress = Progress {
            current_chapter: 1,
            unlocked_chapters: 5,
        };
        assert!(progress.enter_chapter(4));
        assert_eq!(progress.current_chapter, 4);
        assert_eq!(progress.unlocked_chapters, 5);
    }

    #[test]
    fn fresh_install_flow() {
        // First run: defaults, start reading, record still round-trips as {1, 1}.
        let mut progress = Progress::default();
        assert!(progress.enter_chapter(1));
        let reloaded = decode(&encode(&progress)).unwrap();
        assert_eq!(reloaded, Progress::default());
    }
}
