use crate::dataset::{DataFormat, Dataset};
use crate::league::League;
use crate::{InjuryReport, LeagueInfo, MatchReport, Narrative, PlayerProfile, TeamProfile};

// Fixed sentences substituted for empty sections, so the downstream model
// is told explicitly that a section has nothing in it.
const NO_LEAGUE_INFO: &str = "No league information provided.";
const NO_TEAMS: &str = "No team profiles provided.";
const NO_PLAYERS: &str = "No player profiles provided.";
const NO_MATCHES: &str = "No match reports provided.";
const NO_INJURIES: &str = "No injury reports provided.";
const NO_NARRATIVES: &str = "No narratives provided.";
const NO_DATA: &str = "No data provided.";

/// The free-text fields that frame the report, straight from the form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PromptInputs {
    pub report_type: String,
    pub reporter_name: String,
    pub reporter_description: String,
    pub tone_style: String,
    pub format_length: String,
    pub additional_details: String,
}

impl PromptInputs {
    /// Collects every missing required field, mirroring the record
    /// validation: the caller reports them all at once.
    pub fn validate(&self) -> Vec<String> {
        let mut missing = Vec::new();
        for (value, label) in [
            (&self.report_type, "Type of Report"),
            (&self.reporter_name, "Reporter Character Name"),
            (&self.reporter_description, "Reporter Character Description"),
            (&self.tone_style, "Tone and Style"),
            (&self.format_length, "Format and Length"),
        ] {
            if value.trim().is_empty() {
                missing.push(label.to_string());
            }
        }
        missing
    }
}

/// Assemble the full GPT prompt from the current league state. Pure string
/// templating, recomputed from scratch on every call.
pub fn assemble_league(
    league: &League,
    inputs: &PromptInputs,
    dataset: Option<(&Dataset, DataFormat)>,
) -> String {
    assemble(
        &league.info,
        &league.teams,
        &league.players,
        &league.matches,
        &league.injuries,
        &league.narratives,
        inputs,
        dataset,
    )
}

#[allow(clippy::too_many_arguments)]
pub fn assemble(
    info: &LeagueInfo,
    teams: &[TeamProfile],
    players: &[PlayerProfile],
    matches: &[MatchReport],
    injuries: &[InjuryReport],
    narratives: &[Narrative],
    inputs: &PromptInputs,
    dataset: Option<(&Dataset, DataFormat)>,
) -> String {
    let league_name = if info.name.trim().is_empty() {
        "the league".to_string()
    } else {
        info.name.trim().to_string()
    };

    let data_block = match dataset {
        Some((data, format)) if !data.is_empty() => data.render(format),
        _ => NO_DATA.to_string(),
    };

    format!(
        "You are a seasoned sports journalist in the fantastical and brutal world of Blood Bowl. \
Your task is to write a **{report_type}** for the **{league_name}**. The report should be \
engaging and entertaining for both players in the league and fans of Blood Bowl in general. \
Assume the audience does not need an understanding of Blood Bowl mechanics to enjoy the content.

**Please use the following information to craft your report:**

1. **League Information:**

{league_info}

2. **Team Profiles:**

{teams}

3. **Player Profiles:**

{players}

4. **Match Reports:**

{matches}

5. **Injury Reports:**

{injuries}

6. **Narratives and Lore:**

{narratives}

7. **League Data:**

{data}

**Reporter Character:**
- **Character Name:** {reporter_name}
- **Character Description:** {reporter_description}

**Tone and Style:** {tone_style}

**Format and Length:** {format_length}

**Additional Details:**
{additional_details}

---
**Now, please write the report accordingly.**
",
        report_type = inputs.report_type.trim(),
        league_name = league_name,
        league_info = league_info_block(info),
        teams = section(teams, NO_TEAMS, team_block),
        players = section(players, NO_PLAYERS, player_block),
        matches = section(matches, NO_MATCHES, match_block),
        injuries = section(injuries, NO_INJURIES, injury_block),
        narratives = section(narratives, NO_NARRATIVES, narrative_block),
        data = data_block,
        reporter_name = inputs.reporter_name.trim(),
        reporter_description = inputs.reporter_description.trim(),
        tone_style = inputs.tone_style.trim(),
        format_length = inputs.format_length.trim(),
        additional_details = inputs.additional_details.trim(),
    )
}

fn section<T>(records: &[T], empty: &str, block: impl Fn(&T) -> String) -> String {
    if records.is_empty() {
        return empty.to_string();
    }
    records
        .iter()
        .map(block)
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn league_info_block(info: &LeagueInfo) -> String {
    if info.name.trim().is_empty() && info.description.trim().is_empty() {
        return NO_LEAGUE_INFO.to_string();
    }
    format!("League Name: {}\nDescription: {}", info.name, info.description)
}

fn team_block(team: &TeamProfile) -> String {
    format!(
        "Team: {}\nRace: {}\nCoach: {}\nHistory: {}\nAchievements: {}",
        team.name, team.race, team.coach_name, team.history, team.achievements
    )
}

fn player_block(player: &PlayerProfile) -> String {
    let s = player.stats;
    format!(
        "Player: {}\nTeam: {}\nPosition: {}\nBio: {}\nCareer Highlights: {}\n\
Stats: {} matches played, {} touchdowns, {} interceptions, {} injuries caused, {} MVP awards",
        player.name,
        player.team_name,
        player.position,
        player.bio,
        player.career_highlights,
        s.matches_played,
        s.touchdowns,
        s.interceptions,
        s.injuries_caused,
        s.mvp_awards
    )
}

fn match_block(report: &MatchReport) -> String {
    format!(
        "Date: {}\nMatchup: {} vs {}\nFinal Score: {}\nKey Events: {}",
        report.date,
        name_with_race(&report.team_a_name, &report.team_a_race),
        name_with_race(&report.team_b_name, &report.team_b_race),
        report.final_score,
        report.key_events
    )
}

fn injury_block(injury: &InjuryReport) -> String {
    format!(
        "Player: {}\nInjury: {}\nDescription: {}\nTime Out: {}\nExpected Return: {}",
        name_with_race(&injury.player_name, &injury.team_name),
        injury.injury_type,
        injury.description,
        injury.time_out,
        injury.expected_return
    )
}

fn narrative_block(narrative: &Narrative) -> String {
    format!(
        "Title: {}\nDescription: {}\nInvolved: {}\nRecent Developments: {}",
        narrative.title, narrative.description, narrative.involved, narrative.recent_developments
    )
}

/// "Orcland Raiders (Orc)", or just the name when the snapshot field was
/// empty (the referenced profile never existed or was deleted first).
fn name_with_race(name: &str, qualifier: &str) -> String {
    if qualifier.trim().is_empty() {
        name.to_string()
    } else {
        format!("{name} ({qualifier})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PlayerStats;

    fn inputs() -> PromptInputs {
        PromptInputs {
            report_type: "Match Summary".into(),
            reporter_name: "Hakflem Quillchewer".into(),
            reporter_description: "A rat with a grudge and a press pass.".into(),
            tone_style: "humorous and satirical".into(),
            format_length: "Newspaper article, about 500 words".into(),
            additional_details: String::new(),
        }
    }

    fn empty_prompt() -> String {
        assemble(
            &LeagueInfo::default(),
            &[],
            &[],
            &[],
            &[],
            &[],
            &inputs(),
            None,
        )
    }

    #[test]
    fn validate_lists_every_missing_input() {
        let missing = PromptInputs::default().validate();
        assert_eq!(
            missing,
            vec![
                "Type of Report",
                "Reporter Character Name",
                "Reporter Character Description",
                "Tone and Style",
                "Format and Length",
            ]
        );
        assert!(inputs().validate().is_empty());
    }

    #[test]
    fn empty_collections_render_the_fixed_sentences() {
        let prompt = empty_prompt();
        for sentence in [
            NO_LEAGUE_INFO,
            NO_TEAMS,
            NO_PLAYERS,
            NO_MATCHES,
            NO_INJURIES,
            NO_NARRATIVES,
            NO_DATA,
        ] {
            assert!(prompt.contains(sentence), "missing {sentence:?}");
        }
    }

    #[test]
    fn empty_collections_leave_no_record_shaped_lines() {
        let prompt = empty_prompt();
        for label in ["Team: ", "Player: ", "Final Score:", "Injury: ", "Title: "] {
            assert!(!prompt.contains(label), "unexpected {label:?}");
        }
    }

    #[test]
    fn sections_are_numbered_and_ordered() {
        let prompt = empty_prompt();
        let headers = [
            "1. **League Information:**",
            "2. **Team Profiles:**",
            "3. **Player Profiles:**",
            "4. **Match Reports:**",
            "5. **Injury Reports:**",
            "6. **Narratives and Lore:**",
            "7. **League Data:**",
        ];
        let mut last = 0;
        for header in headers {
            let at = prompt.find(header).unwrap_or_else(|| panic!("missing {header}"));
            assert!(at > last, "{header} out of order");
            last = at;
        }
        assert!(prompt.ends_with("**Now, please write the report accordingly.**\n"));
    }

    #[test]
    fn end_to_end_records_land_in_their_sections() {
        let teams = vec![TeamProfile {
            name: "Orcland Raiders".into(),
            race: "Orc".into(),
            ..Default::default()
        }];
        let players = vec![PlayerProfile {
            name: "Grom".into(),
            team_name: "Orcland Raiders".into(),
            stats: PlayerStats::default(),
            ..Default::default()
        }];
        let matches = vec![MatchReport {
            team_a_name: "Orcland Raiders".into(),
            team_a_race: "Orc".into(),
            team_b_name: "Orcland Raiders".into(),
            team_b_race: "Orc".into(),
            final_score: "2-1".into(),
            ..Default::default()
        }];

        let prompt = assemble(
            &LeagueInfo {
                name: "Bloodweiser Open".into(),
                description: String::new(),
            },
            &teams,
            &players,
            &matches,
            &[],
            &[],
            &inputs(),
            None,
        );

        let teams_at = prompt.find("2. **Team Profiles:**").unwrap();
        let players_at = prompt.find("3. **Player Profiles:**").unwrap();
        let matches_at = prompt.find("4. **Match Reports:**").unwrap();
        let injuries_at = prompt.find("5. **Injury Reports:**").unwrap();

        let team_section = &prompt[teams_at..players_at];
        let player_section = &prompt[players_at..matches_at];
        let match_section = &prompt[matches_at..injuries_at];

        assert!(team_section.contains("Orcland Raiders"));
        assert!(player_section.contains("Grom"));
        assert!(match_section.contains("2-1"));
        assert!(teams_at < players_at && players_at < matches_at);
    }

    #[test]
    fn dataset_renders_inside_the_data_section() {
        let data = Dataset::from_reader("team,wins\nOrcland Raiders,3\n".as_bytes()).unwrap();
        let prompt = assemble(
            &LeagueInfo::default(),
            &[],
            &[],
            &[],
            &[],
            &[],
            &inputs(),
            Some((&data, DataFormat::BulletPoints)),
        );
        assert!(prompt.contains("- **team:** Orcland Raiders; **wins:** 3"));
        assert!(!prompt.contains(NO_DATA));
    }

    #[test]
    fn missing_race_snapshot_drops_the_parenthetical() {
        assert_eq!(name_with_race("Nomads", ""), "Nomads");
        assert_eq!(name_with_race("Nomads", "Orc"), "Nomads (Orc)");
    }
}
