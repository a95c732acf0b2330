use crate::store::{
    AssetKind, INJURIES_FILE, LEAGUE_INFO_FILE, MATCHES_FILE, NARRATIVES_FILE,
    PLAYER_PROFILES_FILE, RecordStore, StoreError, TEAM_PROFILES_FILE,
};
use crate::{InjuryReport, LeagueInfo, MatchReport, Narrative, PlayerProfile, TeamProfile};
use log::info;
use std::fmt;
use std::path::{Path, PathBuf};

pub type LeagueResult<T> = Result<T, LeagueError>;

#[derive(Debug)]
pub enum LeagueError {
    /// Required fields missing at save time — all of them, not just the first.
    Validation(Vec<String>),
    /// Index into a collection that no longer (or never) existed.
    OutOfRange(usize),
    Store(StoreError),
}

impl fmt::Display for LeagueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeagueError::Validation(fields) => {
                write!(f, "The following fields are required: {}", fields.join(", "))
            }
            LeagueError::OutOfRange(index) => write!(f, "No record at position {index}"),
            LeagueError::Store(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for LeagueError {}

impl From<StoreError> for LeagueError {
    fn from(e: StoreError) -> Self {
        LeagueError::Store(e)
    }
}

fn validated(violations: Vec<String>) -> LeagueResult<()> {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(LeagueError::Validation(violations))
    }
}

/// The process-wide league state: every record collection, loaded once at
/// startup and re-serialized to its backing file after each mutation.
///
/// One operation runs at a time (the UI is single-threaded), so there is no
/// locking here; a multi-client reimplementation would need it.
#[derive(Debug)]
pub struct League {
    store: RecordStore,
    pub info: LeagueInfo,
    pub teams: Vec<TeamProfile>,
    pub players: Vec<PlayerProfile>,
    pub matches: Vec<MatchReport>,
    pub injuries: Vec<InjuryReport>,
    pub narratives: Vec<Narrative>,
}

impl League {
    /// Load every collection from the store's base directory. Missing or
    /// corrupt files start their collection empty.
    pub fn load(store: RecordStore) -> Self {
        let league = Self {
            info: store.load_json(LEAGUE_INFO_FILE).unwrap_or_default(),
            teams: store.load_json(TEAM_PROFILES_FILE).unwrap_or_default(),
            players: store.load_json(PLAYER_PROFILES_FILE).unwrap_or_default(),
            matches: store.load_json(MATCHES_FILE).unwrap_or_default(),
            injuries: store.load_json(INJURIES_FILE).unwrap_or_default(),
            narratives: store.load_json(NARRATIVES_FILE).unwrap_or_default(),
            store,
        };
        info!(
            "loaded league data from {}: {} teams, {} players, {} matches",
            league.store.base_dir().display(),
            league.teams.len(),
            league.players.len(),
            league.matches.len()
        );
        league
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    // -----------------------------------------------------------------------
    // Name joins — first-match linear scans, resolved at record creation
    // time. No match resolves to an empty string, never an error.
    // -----------------------------------------------------------------------

    pub fn race_of(&self, team_name: &str) -> String {
        self.teams
            .iter()
            .find(|t| t.name == team_name)
            .map(|t| t.race.clone())
            .unwrap_or_default()
    }

    pub fn team_of(&self, player_name: &str) -> String {
        self.players
            .iter()
            .find(|p| p.name == player_name)
            .map(|p| p.team_name.clone())
            .unwrap_or_default()
    }

    // -----------------------------------------------------------------------
    // League info — singleton, overwritten wholesale
    // -----------------------------------------------------------------------

    pub fn save_info(&mut self, info: LeagueInfo) -> LeagueResult<()> {
        self.info = info;
        self.store.rewrite_json(&self.info, LEAGUE_INFO_FILE)?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Teams
    // -----------------------------------------------------------------------

    pub fn add_team(&mut self, team: TeamProfile) -> LeagueResult<()> {
        validated(team.validate())?;
        self.teams.push(team);
        self.store.rewrite_json(&self.teams, TEAM_PROFILES_FILE)?;
        Ok(())
    }

    pub fn update_team(&mut self, index: usize, team: TeamProfile) -> LeagueResult<()> {
        validated(team.validate())?;
        let slot = self
            .teams
            .get_mut(index)
            .ok_or(LeagueError::OutOfRange(index))?;
        // Keep the stored logo unless the edit replaced it.
        let logo = slot.logo_path.take();
        *slot = TeamProfile {
            logo_path: team.logo_path.or(logo),
            ..team
        };
        self.store.rewrite_json(&self.teams, TEAM_PROFILES_FILE)?;
        Ok(())
    }

    pub fn delete_team(&mut self, index: usize) -> LeagueResult<()> {
        if index >= self.teams.len() {
            return Err(LeagueError::OutOfRange(index));
        }
        self.teams.remove(index);
        self.store.rewrite_json(&self.teams, TEAM_PROFILES_FILE)?;
        Ok(())
    }

    /// Import a logo image for the team at `index` and record its path.
    pub fn attach_team_logo(&mut self, index: usize, source: &Path) -> LeagueResult<PathBuf> {
        let name = self
            .teams
            .get(index)
            .ok_or(LeagueError::OutOfRange(index))?
            .name
            .clone();
        let path = self.import_image(source, &name, AssetKind::TeamLogo)?;
        self.teams[index].logo_path = Some(path.display().to_string());
        self.store.rewrite_json(&self.teams, TEAM_PROFILES_FILE)?;
        Ok(path)
    }

    // -----------------------------------------------------------------------
    // Players
    // -----------------------------------------------------------------------

    pub fn add_player(&mut self, player: PlayerProfile) -> LeagueResult<()> {
        validated(player.validate())?;
        self.players.push(player);
        self.store
            .rewrite_json(&self.players, PLAYER_PROFILES_FILE)?;
        Ok(())
    }

    pub fn update_player(&mut self, index: usize, player: PlayerProfile) -> LeagueResult<()> {
        validated(player.validate())?;
        let slot = self
            .players
            .get_mut(index)
            .ok_or(LeagueError::OutOfRange(index))?;
        let photo = slot.photo_path.take();
        *slot = PlayerProfile {
            photo_path: player.photo_path.or(photo),
            ..player
        };
        self.store
            .rewrite_json(&self.players, PLAYER_PROFILES_FILE)?;
        Ok(())
    }

    pub fn delete_player(&mut self, index: usize) -> LeagueResult<()> {
        if index >= self.players.len() {
            return Err(LeagueError::OutOfRange(index));
        }
        self.players.remove(index);
        self.store
            .rewrite_json(&self.players, PLAYER_PROFILES_FILE)?;
        Ok(())
    }

    pub fn attach_player_photo(&mut self, index: usize, source: &Path) -> LeagueResult<PathBuf> {
        let name = self
            .players
            .get(index)
            .ok_or(LeagueError::OutOfRange(index))?
            .name
            .clone();
        let path = self.import_image(source, &name, AssetKind::PlayerPhoto)?;
        self.players[index].photo_path = Some(path.display().to_string());
        self.store
            .rewrite_json(&self.players, PLAYER_PROFILES_FILE)?;
        Ok(path)
    }

    // -----------------------------------------------------------------------
    // Matches
    //
    // Team races are copied from the team profiles when the match is
    // recorded. That snapshot is deliberate: editing a team later does not
    // rewrite history.
    // -----------------------------------------------------------------------

    pub fn add_match(&mut self, mut report: MatchReport) -> LeagueResult<()> {
        validated(report.validate())?;
        report.team_a_race = self.race_of(&report.team_a_name);
        report.team_b_race = self.race_of(&report.team_b_name);
        self.matches.push(report);
        self.store.rewrite_json(&self.matches, MATCHES_FILE)?;
        Ok(())
    }

    pub fn update_match(&mut self, index: usize, mut report: MatchReport) -> LeagueResult<()> {
        validated(report.validate())?;
        if index >= self.matches.len() {
            return Err(LeagueError::OutOfRange(index));
        }
        report.team_a_race = self.race_of(&report.team_a_name);
        report.team_b_race = self.race_of(&report.team_b_name);
        self.matches[index] = report;
        self.store.rewrite_json(&self.matches, MATCHES_FILE)?;
        Ok(())
    }

    pub fn delete_match(&mut self, index: usize) -> LeagueResult<()> {
        if index >= self.matches.len() {
            return Err(LeagueError::OutOfRange(index));
        }
        self.matches.remove(index);
        self.store.rewrite_json(&self.matches, MATCHES_FILE)?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Injuries — team name snapshots from the player profile, same rules
    // -----------------------------------------------------------------------

    pub fn add_injury(&mut self, mut injury: InjuryReport) -> LeagueResult<()> {
        validated(injury.validate())?;
        injury.team_name = self.team_of(&injury.player_name);
        self.injuries.push(injury);
        self.store.rewrite_json(&self.injuries, INJURIES_FILE)?;
        Ok(())
    }

    pub fn update_injury(&mut self, index: usize, mut injury: InjuryReport) -> LeagueResult<()> {
        validated(injury.validate())?;
        if index >= self.injuries.len() {
            return Err(LeagueError::OutOfRange(index));
        }
        injury.team_name = self.team_of(&injury.player_name);
        self.injuries[index] = injury;
        self.store.rewrite_json(&self.injuries, INJURIES_FILE)?;
        Ok(())
    }

    pub fn delete_injury(&mut self, index: usize) -> LeagueResult<()> {
        if index >= self.injuries.len() {
            return Err(LeagueError::OutOfRange(index));
        }
        self.injuries.remove(index);
        self.store.rewrite_json(&self.injuries, INJURIES_FILE)?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Narratives
    // -----------------------------------------------------------------------

    pub fn add_narrative(&mut self, narrative: Narrative) -> LeagueResult<()> {
        validated(narrative.validate())?;
        self.narratives.push(narrative);
        self.store.rewrite_json(&self.narratives, NARRATIVES_FILE)?;
        Ok(())
    }

    pub fn update_narrative(&mut self, index: usize, narrative: Narrative) -> LeagueResult<()> {
        validated(narrative.validate())?;
        if index >= self.narratives.len() {
            return Err(LeagueError::OutOfRange(index));
        }
        self.narratives[index] = narrative;
        self.store.rewrite_json(&self.narratives, NARRATIVES_FILE)?;
        Ok(())
    }

    pub fn delete_narrative(&mut self, index: usize) -> LeagueResult<()> {
        if index >= self.narratives.len() {
            return Err(LeagueError::OutOfRange(index));
        }
        self.narratives.remove(index);
        self.store.rewrite_json(&self.narratives, NARRATIVES_FILE)?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Prompt export — user-directed save, so the collision renaming applies
    // -----------------------------------------------------------------------

    pub fn export_prompt(&self, text: &str, filename: &str) -> LeagueResult<PathBuf> {
        Ok(self.store.save_text(text, filename)?)
    }

    fn import_image(
        &self,
        source: &Path,
        owner_name: &str,
        kind: AssetKind,
    ) -> Result<PathBuf, StoreError> {
        let bytes = std::fs::read(source)
            .map_err(|e| StoreError::Io(e, source.display().to_string()))?;
        let extension = source
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("png");
        self.store.save_image(&bytes, extension, owner_name, kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn league_in(dir: &Path) -> League {
        League::load(RecordStore::new(dir))
    }

    fn team(name: &str, race: &str) -> TeamProfile {
        TeamProfile {
            name: name.into(),
            race: race.into(),
            ..Default::default()
        }
    }

    #[test]
    fn create_with_missing_fields_reports_all_and_mutates_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut league = league_in(dir.path());
        league.add_team(team("Orcland Raiders", "Orc")).unwrap();

        let err = league.add_player(PlayerProfile::default()).unwrap_err();
        match err {
            LeagueError::Validation(fields) => {
                assert_eq!(fields, vec!["Player Name".to_string(), "Team Name".to_string()]);
            }
            other => panic!("expected validation error, got {other}"),
        }
        assert!(league.players.is_empty());
        // Nothing was persisted for the rejected create.
        assert!(!dir.path().join(PLAYER_PROFILES_FILE).exists());
    }

    #[test]
    fn collections_survive_a_reload() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut league = league_in(dir.path());
            league.add_team(team("Orcland Raiders", "Orc")).unwrap();
            league
                .save_info(LeagueInfo {
                    name: "Bloodweiser Open".into(),
                    description: "Four teams, no mercy.".into(),
                })
                .unwrap();
        }
        let league = league_in(dir.path());
        assert_eq!(league.teams.len(), 1);
        assert_eq!(league.teams[0].name, "Orcland Raiders");
        assert_eq!(league.info.name, "Bloodweiser Open");
    }

    #[test]
    fn match_snapshots_race_at_creation_time() {
        let dir = tempfile::tempdir().unwrap();
        let mut league = league_in(dir.path());
        league.add_team(team("Orcland Raiders", "Orc")).unwrap();
        league.add_team(team("Reikland Reavers", "Human")).unwrap();

        league
            .add_match(MatchReport {
                date: "2026-08-01".into(),
                team_a_name: "Orcland Raiders".into(),
                team_b_name: "Reikland Reavers".into(),
                final_score: "2-1".into(),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(league.matches[0].team_a_race, "Orc");
        assert_eq!(league.matches[0].team_b_race, "Human");

        // Editing the team later must not rewrite the recorded match.
        let mut edited = league.teams[0].clone();
        edited.race = "Black Orc".into();
        league.update_team(0, edited).unwrap();
        assert_eq!(league.matches[0].team_a_race, "Orc");
    }

    #[test]
    fn unknown_names_join_to_empty_strings() {
        let dir = tempfile::tempdir().unwrap();
        let mut league = league_in(dir.path());
        league
            .add_match(MatchReport {
                team_a_name: "Nomads".into(),
                team_b_name: "Drifters".into(),
                final_score: "0-0".into(),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(league.matches[0].team_a_race, "");

        league
            .add_injury(InjuryReport {
                player_name: "Unknown Legend".into(),
                injury_type: "Gouged Eye".into(),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(league.injuries[0].team_name, "");
    }

    #[test]
    fn injury_snapshots_team_from_player() {
        let dir = tempfile::tempdir().unwrap();
        let mut league = league_in(dir.path());
        league
            .add_player(PlayerProfile {
                name: "Grom".into(),
                team_name: "Orcland Raiders".into(),
                ..Default::default()
            })
            .unwrap();
        league
            .add_injury(InjuryReport {
                player_name: "Grom".into(),
                injury_type: "Broken Jaw".into(),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(league.injuries[0].team_name, "Orcland Raiders");
    }

    #[test]
    fn delete_removes_exactly_one_and_shifts_the_rest() {
        let dir = tempfile::tempdir().unwrap();
        let mut league = league_in(dir.path());
        for name in ["A", "B", "C"] {
            league.add_team(team(name, "Orc")).unwrap();
        }

        league.delete_team(1).unwrap();
        let names: Vec<&str> = league.teams.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["A", "C"]);
    }

    #[test]
    fn out_of_range_delete_is_a_reported_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let mut league = league_in(dir.path());
        league.add_team(team("A", "Orc")).unwrap();

        let err = league.delete_team(5).unwrap_err();
        assert!(matches!(err, LeagueError::OutOfRange(5)));
        assert_eq!(league.teams.len(), 1);
        assert_eq!(league.teams[0].name, "A");
    }

    #[test]
    fn update_preserves_position_and_validates() {
        let dir = tempfile::tempdir().unwrap();
        let mut league = league_in(dir.path());
        for name in ["A", "B", "C"] {
            league.add_team(team(name, "Orc")).unwrap();
        }

        league.update_team(1, team("B2", "Skaven")).unwrap();
        let names: Vec<&str> = league.teams.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B2", "C"]);

        let err = league.update_team(1, TeamProfile::default()).unwrap_err();
        assert!(matches!(err, LeagueError::Validation(_)));
        assert_eq!(league.teams[1].name, "B2");
    }

    #[test]
    fn update_keeps_an_existing_logo_unless_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let mut league = league_in(dir.path());
        let mut with_logo = team("A", "Orc");
        with_logo.logo_path = Some("team_logos/A_logo.png".into());
        league.add_team(with_logo).unwrap();

        league.update_team(0, team("A", "Black Orc")).unwrap();
        assert_eq!(
            league.teams[0].logo_path.as_deref(),
            Some("team_logos/A_logo.png")
        );
    }

    #[test]
    fn attach_team_logo_records_the_stored_path() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("upload.png");
        std::fs::write(&source, b"\x89PNG").unwrap();

        let mut league = league_in(dir.path());
        league.add_team(team("Orcland Raiders", "Orc")).unwrap();
        let stored = league.attach_team_logo(0, &source).unwrap();

        assert!(stored.ends_with("team_logos/Orcland_Raiders_logo.png"));
        assert_eq!(
            league.teams[0].logo_path.as_deref(),
            Some(stored.display().to_string().as_str())
        );
    }
}
