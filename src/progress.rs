//! Unlocked ages, persisted between sessions as RON.
//!
//! Winning a match in the highest unlocked age unlocks the next one.

use std::path::{Path, PathBuf};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::GameSet;
use crate::gameplay::MatchMessage;
use crate::sim::MatchEvent;
use crate::sim::roster::AGES;

const DEFAULT_PROGRESS_PATH: &str = "progress.ron";

// === Resources ===

#[derive(Resource, Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Progress {
    /// Highest age index the player may pick.
    #[serde(default)]
    pub unlocked_age: usize,
}

impl Progress {
    /// Records a won match. Returns `true` if a new age was unlocked.
    pub fn record_completed(&mut self, age: usize) -> bool {
        let next = (age + 1).min(AGES.len() - 1);
        if age < self.unlocked_age || next <= self.unlocked_age {
            return false;
        }
        self.unlocked_age = next;
        true
    }
}

/// Where progress is stored. `None` keeps it in memory only.
#[derive(Resource, Debug, Clone)]
pub struct ProgressFile(pub Option<PathBuf>);

impl Default for ProgressFile {
    fn default() -> Self {
        Self(Some(PathBuf::from(DEFAULT_PROGRESS_PATH)))
    }
}

// === Storage ===

/// Reads progress from `path`. Missing or unreadable files yield `None`.
#[must_use]
pub fn load(path: &Path) -> Option<Progress> {
    if !path.exists() {
        info!("No progress file at {path:?}. Starting fresh.");
        return None;
    }

    match std::fs::read_to_string(path) {
        Ok(contents) => match ron::from_str::<Progress>(&contents) {
            Ok(progress) => {
                info!("Loaded progress from {path:?}: {progress:?}");
                Some(progress)
            }
            Err(e) => {
                error!("Failed to parse progress file: {e}. Using defaults.");
                None
            }
        },
        Err(e) => {
            error!("Failed to read progress file: {e}. Using defaults.");
            None
        }
    }
}

pub fn save(path: &Path, progress: &Progress) {
    let pretty = ron::ser::PrettyConfig::default();
    match ron::ser::to_string_pretty(progress, pretty) {
        Ok(serialized) => {
            if let Err(e) = std::fs::write(path, serialized) {
                error!("Failed to write progress file: {e}");
            } else {
                info!("Progress saved to {path:?}");
            }
        }
        Err(e) => error!("Failed to serialize progress: {e}"),
    }
}

// === Systems ===

fn load_progress(mut commands: Commands, file: Res<ProgressFile>) {
    let progress = file
        .0
        .as_deref()
        .and_then(load)
        .unwrap_or_default();
    commands.insert_resource(progress);
}

fn record_progress(
    mut messages: MessageReader<MatchMessage>,
    mut progress: ResMut<Progress>,
    file: Res<ProgressFile>,
) {
    let mut unlocked = false;
    for message in messages.read() {
        if let MatchEvent::AgeCompleted { age } = message.0 {
            unlocked |= progress.record_completed(age);
        }
    }
    if !unlocked {
        return;
    }
    info!("Unlocked age {}", progress.unlocked_age);
    match &file.0 {
        Some(path) => save(path, &progress),
        None => debug!("Progress file disabled, keeping unlock in memory"),
    }
}

// === Plugin ===

pub(crate) fn plugin(app: &mut App) {
    app.init_resource::<ProgressFile>();
    app.add_systems(PreStartup, load_progress);
    app.add_systems(
        Update,
        record_progress
            .in_set(GameSet::Ui)
            .run_if(resource_exists::<Progress>),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("lane-siege-{}-{name}.ron", std::process::id()))
    }

    #[test]
    fn winning_the_current_age_unlocks_the_next() {
        let mut progress = Progress::default();
        assert!(progress.record_completed(0));
        assert_eq!(progress.unlocked_age, 1);
    }

    #[test]
    fn replaying_an_old_age_unlocks_nothing() {
        let mut progress = Progress { unlocked_age: 2 };
        assert!(!progress.record_completed(0));
        assert!(!progress.record_completed(1));
        assert_eq!(progress.unlocked_age, 2);
    }

    #[test]
    fn last_age_is_the_cap() {
        let last = AGES.len() - 1;
        let mut progress = Progress { unlocked_age: last };
        assert!(!progress.record_completed(last));
        assert_eq!(progress.unlocked_age, last);
    }

    #[test]
    fn progress_survives_a_save_and_load() {
        let path = scratch_path("roundtrip");
        save(&path, &Progress { unlocked_age: 3 });

        assert_eq!(load(&path), Some(Progress { unlocked_age: 3 }));
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn corrupt_file_falls_back_to_none() {
        let path = scratch_path("corrupt");
        std::fs::write(&path, "not ron at all {").unwrap();

        assert_eq!(load(&path), None);
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn missing_field_uses_default() {
        let progress: Progress = ron::from_str("()").unwrap();
        assert_eq!(progress, Progress::default());
    }
}

#[cfg(test)]
mod integration_tests {
    use super::*;
    use crate::sim::MatchOutcome;
    use crate::testing::{create_gameplay_test_app, transition_to_ingame};
    use pretty_assertions::assert_eq;

    #[test]
    fn age_completed_message_unlocks_next_age() {
        let mut app = create_gameplay_test_app();
        app.add_plugins(plugin);
        transition_to_ingame(&mut app);

        app.world_mut().write_message(MatchMessage(MatchEvent::MatchEnded {
            outcome: MatchOutcome::Victory,
        }));
        app.world_mut()
            .write_message(MatchMessage(MatchEvent::AgeCompleted { age: 0 }));
        app.update();

        assert_eq!(app.world().resource::<Progress>().unlocked_age, 1);
    }

    #[test]
    fn disabled_file_still_loads_defaults() {
        let mut app = create_gameplay_test_app();
        app.add_plugins(plugin);
        app.update();

        assert_eq!(*app.world().resource::<Progress>(), Progress::default());
    }
}
