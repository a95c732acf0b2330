use chrono::Utc;
use log::warn;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

pub type StoreResult<T> = Result<T, StoreError>;

// Default per-collection filenames, relative to the data dir.
pub const LEAGUE_INFO_FILE: &str = "league_info.json";
pub const TEAM_PROFILES_FILE: &str = "team_profiles.json";
pub const PLAYER_PROFILES_FILE: &str = "player_profiles.json";
pub const MATCHES_FILE: &str = "matches.json";
pub const INJURIES_FILE: &str = "injuries.json";
pub const NARRATIVES_FILE: &str = "narratives.json";

#[derive(Debug)]
pub enum StoreError {
    /// Filename contains characters outside the allow-list.
    InvalidFilename(String),
    Io(io::Error, String),
    Serialize(serde_json::Error, String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::InvalidFilename(name) => {
                write!(
                    f,
                    "Invalid filename {name:?}: only letters, digits, underscore, hyphen, space and period are allowed"
                )
            }
            StoreError::Io(e, path) => write!(f, "I/O error for {path}: {e}"),
            StoreError::Serialize(e, path) => write!(f, "Serialize error for {path}: {e}"),
        }
    }
}

impl std::error::Error for StoreError {}

/// Allow-list filename check. Accepts only word characters, hyphens,
/// periods and spaces, and requires at least one character. Every
/// persistence write is gated on this.
pub fn is_valid_filename(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | ' '))
}

/// Which asset subdirectory an uploaded image lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    TeamLogo,
    PlayerPhoto,
}

impl AssetKind {
    pub fn subdir(self) -> &'static str {
        match self {
            AssetKind::TeamLogo => "team_logos",
            AssetKind::PlayerPhoto => "player_photos",
        }
    }

    fn suffix(self) -> &'static str {
        match self {
            AssetKind::TeamLogo => "logo",
            AssetKind::PlayerPhoto => "photo",
        }
    }
}

/// JSON record store rooted at a fixed base directory.
///
/// Writes never overwrite an existing file: a colliding save is renamed by
/// inserting the current Unix timestamp before the extension, and the path
/// actually written is returned so the caller can tell the user.
#[derive(Debug, Clone)]
pub struct RecordStore {
    base_dir: PathBuf,
}

impl RecordStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Serialize `value` as pretty JSON under `filename`. Returns the path
    /// actually written, which differs from the requested one when the
    /// target already existed.
    pub fn save_json<T: Serialize>(&self, value: &T, filename: &str) -> StoreResult<PathBuf> {
        if !is_valid_filename(filename) {
            return Err(StoreError::InvalidFilename(filename.to_string()));
        }

        let mut path = self.base_dir.join(filename);
        if path.exists() {
            let renamed = timestamped_filename(filename);
            warn!("{filename} already exists, saving as {renamed} instead");
            path = self.base_dir.join(renamed);
        }

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| StoreError::Io(e, path.display().to_string()))?;
        }
        let payload = serde_json::to_string_pretty(value)
            .map_err(|e| StoreError::Serialize(e, path.display().to_string()))?;
        std::fs::write(&path, payload)
            .map_err(|e| StoreError::Io(e, path.display().to_string()))?;
        Ok(path)
    }

    /// Re-serialize a collection to its own backing file, in place. This is
    /// the routine persistence path after an in-memory mutation; the
    /// collision renaming in [`RecordStore::save_json`] only protects
    /// user-directed saves under new names.
    pub fn rewrite_json<T: Serialize>(&self, value: &T, filename: &str) -> StoreResult<PathBuf> {
        if !is_valid_filename(filename) {
            return Err(StoreError::InvalidFilename(filename.to_string()));
        }
        let path = self.base_dir.join(filename);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| StoreError::Io(e, path.display().to_string()))?;
        }
        let payload = serde_json::to_string_pretty(value)
            .map_err(|e| StoreError::Serialize(e, path.display().to_string()))?;
        std::fs::write(&path, payload)
            .map_err(|e| StoreError::Io(e, path.display().to_string()))?;
        Ok(path)
    }

    /// Plain-text save with the same collision discipline as `save_json`.
    /// Used for exporting an assembled prompt.
    pub fn save_text(&self, text: &str, filename: &str) -> StoreResult<PathBuf> {
        if !is_valid_filename(filename) {
            return Err(StoreError::InvalidFilename(filename.to_string()));
        }
        let mut path = self.base_dir.join(filename);
        if path.exists() {
            let renamed = timestamped_filename(filename);
            warn!("{filename} already exists, saving as {renamed} instead");
            path = self.base_dir.join(renamed);
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| StoreError::Io(e, path.display().to_string()))?;
        }
        std::fs::write(&path, text)
            .map_err(|e| StoreError::Io(e, path.display().to_string()))?;
        Ok(path)
    }

    /// Read and parse the named JSON file. Missing and corrupt files both
    /// come back as `None` so callers start from an empty collection; the
    /// two cases are told apart in the log.
    pub fn load_json<T: DeserializeOwned>(&self, filename: &str) -> Option<T> {
        let path = self.base_dir.join(filename);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!("could not read {}: {e}", path.display());
                return None;
            }
        };
        match serde_json::from_str(&content) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(
                    "{} is corrupt, starting from an empty collection: {e}",
                    path.display()
                );
                None
            }
        }
    }

    /// Store an uploaded image for the named entity. The filename is
    /// derived from the entity name (spaces become underscores); a repeat
    /// upload for the same name overwrites the previous asset.
    pub fn save_image(
        &self,
        bytes: &[u8],
        extension: &str,
        owner_name: &str,
        kind: AssetKind,
    ) -> StoreResult<PathBuf> {
        let filename = format!(
            "{}_{}.{}",
            owner_name.trim().replace(' ', "_"),
            kind.suffix(),
            extension.trim_start_matches('.')
        );
        if !is_valid_filename(&filename) {
            return Err(StoreError::InvalidFilename(filename));
        }

        let dir = self.base_dir.join(kind.subdir());
        std::fs::create_dir_all(&dir).map_err(|e| StoreError::Io(e, dir.display().to_string()))?;
        let path = dir.join(filename);
        std::fs::write(&path, bytes)
            .map_err(|e| StoreError::Io(e, path.display().to_string()))?;
        Ok(path)
    }
}

/// "team_profiles.json" -> "team_profiles_1731000000.json"
fn timestamped_filename(filename: &str) -> String {
    let ts = Utc::now().timestamp();
    match filename.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => format!("{stem}_{ts}.{ext}"),
        _ => format!("{filename}_{ts}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TeamProfile;

    #[test]
    fn filenames_with_listed_characters_are_accepted() {
        for name in ["a", "team_profiles.json", "my save-2.json", "Sea Sons.v2"] {
            assert!(is_valid_filename(name), "should accept {name:?}");
        }
    }

    #[test]
    fn filenames_outside_the_allow_list_are_rejected() {
        for name in ["", "../escape.json", "a/b.json", "save?.json", "a\\b", "x:y"] {
            assert!(!is_valid_filename(name), "should reject {name:?}");
        }
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::new(dir.path());
        let teams = vec![
            TeamProfile {
                name: "Orcland Raiders".into(),
                race: "Orc".into(),
                ..Default::default()
            },
            TeamProfile {
                name: "Reikland Reavers".into(),
                race: "Human".into(),
                ..Default::default()
            },
        ];

        store.save_json(&teams, TEAM_PROFILES_FILE).unwrap();
        let loaded: Vec<TeamProfile> = store.load_json(TEAM_PROFILES_FILE).unwrap();
        assert_eq!(loaded, teams);
    }

    #[test]
    fn save_rejects_invalid_filename_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::new(dir.path());
        let err = store
            .save_json(&Vec::<TeamProfile>::new(), "../oops.json")
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidFilename(_)));
        assert!(std::fs::read_dir(dir.path()).unwrap().next().is_none());
    }

    #[test]
    fn collision_writes_timestamped_file_and_keeps_original() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::new(dir.path());
        let first = vec![TeamProfile {
            name: "Orcland Raiders".into(),
            ..Default::default()
        }];
        let second = vec![TeamProfile {
            name: "Reikland Reavers".into(),
            ..Default::default()
        }];

        let original = store.save_json(&first, TEAM_PROFILES_FILE).unwrap();
        let renamed = store.save_json(&second, TEAM_PROFILES_FILE).unwrap();

        assert_ne!(original, renamed);
        let name = renamed.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("team_profiles_"), "got {name}");
        assert!(name.ends_with(".json"), "got {name}");
        let suffix = name
            .strip_prefix("team_profiles_")
            .and_then(|s| s.strip_suffix(".json"))
            .unwrap();
        assert!(
            suffix.chars().all(|c| c.is_ascii_digit()),
            "suffix should be a unix timestamp, got {suffix}"
        );

        // Original contents untouched.
        let kept: Vec<TeamProfile> = store.load_json(TEAM_PROFILES_FILE).unwrap();
        assert_eq!(kept, first);
    }

    #[test]
    fn rewrite_updates_the_backing_file_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::new(dir.path());
        let mut teams = vec![TeamProfile {
            name: "Orcland Raiders".into(),
            ..Default::default()
        }];

        store.rewrite_json(&teams, TEAM_PROFILES_FILE).unwrap();
        teams.push(TeamProfile {
            name: "Reikland Reavers".into(),
            ..Default::default()
        });
        let path = store.rewrite_json(&teams, TEAM_PROFILES_FILE).unwrap();

        assert_eq!(path, dir.path().join(TEAM_PROFILES_FILE));
        let loaded: Vec<TeamProfile> = store.load_json(TEAM_PROFILES_FILE).unwrap();
        assert_eq!(loaded.len(), 2);
        // No timestamped siblings from routine rewrites.
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn text_export_follows_the_collision_discipline() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::new(dir.path());
        let first = store.save_text("first prompt", "prompt.txt").unwrap();
        let second = store.save_text("second prompt", "prompt.txt").unwrap();

        assert_ne!(first, second);
        assert_eq!(std::fs::read_to_string(&first).unwrap(), "first prompt");
        assert_eq!(std::fs::read_to_string(&second).unwrap(), "second prompt");
    }

    #[test]
    fn missing_and_corrupt_files_load_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::new(dir.path());
        assert!(store.load_json::<Vec<TeamProfile>>("absent.json").is_none());

        std::fs::write(dir.path().join("broken.json"), "{not json").unwrap();
        assert!(store.load_json::<Vec<TeamProfile>>("broken.json").is_none());
    }

    #[test]
    fn image_filename_derives_from_owner_name() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::new(dir.path());
        let path = store
            .save_image(b"\x89PNG", "png", "Orcland Raiders", AssetKind::TeamLogo)
            .unwrap();
        assert!(path.ends_with("team_logos/Orcland_Raiders_logo.png"));
        assert!(path.exists());

        // Repeat upload for the same name overwrites in place.
        let again = store
            .save_image(b"GIF89a", "png", "Orcland Raiders", AssetKind::TeamLogo)
            .unwrap();
        assert_eq!(path, again);
        assert_eq!(std::fs::read(&again).unwrap(), b"GIF89a");
    }

    #[test]
    fn timestamped_name_handles_missing_extension() {
        let renamed = timestamped_filename("notes");
        assert!(renamed.starts_with("notes_"));
        assert!(!renamed.contains('.'));
    }
}
