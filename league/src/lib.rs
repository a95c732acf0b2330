pub mod dataset;
pub mod league;
pub mod prompt;
pub mod store;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Domain records — flat serde structs, one per persisted collection
// ---------------------------------------------------------------------------

/// League-wide metadata. Singleton: saved and overwritten wholesale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeagueInfo {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamProfile {
    pub name: String,
    pub race: String,
    pub coach_name: String,
    pub history: String,
    pub achievements: String,
    /// Relative path under the data dir, set by the image asset store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_path: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub matches_played: u32,
    pub touchdowns: u32,
    pub interceptions: u32,
    pub injuries_caused: u32,
    pub mvp_awards: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub name: String,
    pub team_name: String,
    pub position: String,
    pub bio: String,
    pub career_highlights: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_path: Option<String>,
    #[serde(default)]
    pub stats: PlayerStats,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchReport {
    pub date: String,
    pub team_a_name: String,
    /// Race copied from the team profile when the match is recorded.
    /// Snapshot semantics: never refreshed if the profile changes later.
    #[serde(default)]
    pub team_a_race: String,
    pub team_b_name: String,
    #[serde(default)]
    pub team_b_race: String,
    pub final_score: String,
    pub key_events: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InjuryReport {
    pub player_name: String,
    /// Team copied from the player profile when the injury is recorded
    /// (snapshot, same as the match race fields).
    #[serde(default)]
    pub team_name: String,
    pub injury_type: String,
    pub description: String,
    pub time_out: String,
    pub expected_return: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Narrative {
    pub title: String,
    pub description: String,
    /// Free-text list of the teams or players this storyline touches.
    pub involved: String,
    pub recent_developments: String,
}

// ---------------------------------------------------------------------------
// Required-field validation
//
// Each validate() collects *every* missing required field so the caller can
// report them all at once. An empty vec means the record may be saved.
// ---------------------------------------------------------------------------

fn require(violations: &mut Vec<String>, value: &str, label: &str) {
    if value.trim().is_empty() {
        violations.push(label.to_string());
    }
}

impl TeamProfile {
    pub fn validate(&self) -> Vec<String> {
        let mut v = Vec::new();
        require(&mut v, &self.name, "Team Name");
        v
    }
}

impl PlayerProfile {
    pub fn validate(&self) -> Vec<String> {
        let mut v = Vec::new();
        require(&mut v, &self.name, "Player Name");
        require(&mut v, &self.team_name, "Team Name");
        v
    }
}

impl MatchReport {
    pub fn validate(&self) -> Vec<String> {
        let mut v = Vec::new();
        require(&mut v, &self.team_a_name, "Team A");
        require(&mut v, &self.team_b_name, "Team B");
        require(&mut v, &self.final_score, "Final Score");
        v
    }
}

impl InjuryReport {
    pub fn validate(&self) -> Vec<String> {
        let mut v = Vec::new();
        require(&mut v, &self.player_name, "Player Name");
        require(&mut v, &self.injury_type, "Injury Type");
        v
    }
}

impl Narrative {
    pub fn validate(&self) -> Vec<String> {
        let mut v = Vec::new();
        require(&mut v, &self.title, "Title");
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_team_reports_name() {
        let team = TeamProfile::default();
        assert_eq!(team.validate(), vec!["Team Name".to_string()]);
    }

    #[test]
    fn whitespace_only_counts_as_missing() {
        let team = TeamProfile {
            name: "   ".into(),
            ..Default::default()
        };
        assert_eq!(team.validate(), vec!["Team Name".to_string()]);
    }

    #[test]
    fn player_collects_all_violations_at_once() {
        let player = PlayerProfile::default();
        assert_eq!(
            player.validate(),
            vec!["Player Name".to_string(), "Team Name".to_string()]
        );
    }

    #[test]
    fn match_requires_both_teams_and_score() {
        let report = MatchReport {
            team_a_name: "Orcland Raiders".into(),
            ..Default::default()
        };
        assert_eq!(
            report.validate(),
            vec!["Team B".to_string(), "Final Score".to_string()]
        );
    }

    #[test]
    fn complete_records_validate_clean() {
        let injury = InjuryReport {
            player_name: "Grom".into(),
            injury_type: "Smashed Collarbone".into(),
            ..Default::default()
        };
        assert!(injury.validate().is_empty());

        let narrative = Narrative {
            title: "The Long Feud".into(),
            ..Default::default()
        };
        assert!(narrative.validate().is_empty());
    }

    #[test]
    fn stats_default_to_zero() {
        let player = PlayerProfile {
            name: "Grom".into(),
            team_name: "Orcland Raiders".into(),
            ..Default::default()
        };
        assert_eq!(player.stats.touchdowns, 0);
        assert_eq!(player.stats.mvp_awards, 0);
    }
}
