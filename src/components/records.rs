use bb_league::{InjuryReport, MatchReport, Narrative, PlayerProfile, TeamProfile};

// ---------------------------------------------------------------------------
// One-line list rows for each record kind. Every row is clipped to the
// available width so narrow terminals never wrap.
// ---------------------------------------------------------------------------

pub fn team_row(team: &TeamProfile, width: usize) -> String {
    let logo = if team.logo_path.is_some() { "◆" } else { " " };
    clip(
        &format!(
            "{} {} | coach {} {logo}",
            pad(&team.name, 22),
            pad(&team.race, 12),
            team.coach_name
        ),
        width,
    )
}

pub fn player_row(player: &PlayerProfile, width: usize) -> String {
    let s = player.stats;
    clip(
        &format!(
            "{} {} {} | {} TD {} INT {} MVP",
            pad(&player.name, 18),
            pad(&player.team_name, 20),
            pad(&player.position, 12),
            s.touchdowns,
            s.interceptions,
            s.mvp_awards
        ),
        width,
    )
}

pub fn match_row(report: &MatchReport, width: usize) -> String {
    clip(
        &format!(
            "{} {} vs {}  [{}]",
            pad(&report.date, 10),
            pad(&report.team_a_name, 18),
            pad(&report.team_b_name, 18),
            report.final_score
        ),
        width,
    )
}

pub fn injury_row(injury: &InjuryReport, width: usize) -> String {
    clip(
        &format!(
            "{} {} {} | out {}",
            pad(&injury.player_name, 18),
            pad(&injury.team_name, 20),
            pad(&injury.injury_type, 18),
            injury.time_out
        ),
        width,
    )
}

pub fn narrative_row(narrative: &Narrative, width: usize) -> String {
    clip(
        &format!("{} | {}", pad(&narrative.title, 28), narrative.involved),
        width,
    )
}

/// Pad or truncate to exactly `max` characters.
fn pad(name: &str, max: usize) -> String {
    let mut s: String = name.chars().take(max).collect();
    while s.chars().count() < max {
        s.push(' ');
    }
    s
}

fn clip(line: &str, width: usize) -> String {
    line.chars().take(width).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bb_league::PlayerStats;

    #[test]
    fn pad_is_width_exact() {
        assert_eq!(pad("Orcland Raiders", 10).chars().count(), 10);
        assert_eq!(pad("Ab", 6), "Ab    ");
    }

    #[test]
    fn rows_never_exceed_the_given_width() {
        let team = TeamProfile {
            name: "A Very Long Blood Bowl Franchise Name".into(),
            race: "Chaos Dwarf".into(),
            coach_name: "Grimgor the Patient".into(),
            ..Default::default()
        };
        assert!(team_row(&team, 40).chars().count() <= 40);

        let player = PlayerProfile {
            name: "Grom".into(),
            team_name: "Orcland Raiders".into(),
            position: "Blitzer".into(),
            stats: PlayerStats {
                touchdowns: 12,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(player_row(&player, 30).chars().count() <= 30);
    }

    #[test]
    fn match_row_shows_score_in_brackets() {
        let report = MatchReport {
            date: "2026-08-01".into(),
            team_a_name: "Orcland Raiders".into(),
            team_b_name: "Reikland Reavers".into(),
            final_score: "2-1".into(),
            ..Default::default()
        };
        let row = match_row(&report, 120);
        assert!(row.contains("[2-1]"));
        assert!(row.contains("Orcland Raiders"));
    }

    #[test]
    fn team_row_marks_a_stored_logo() {
        let mut team = TeamProfile {
            name: "Orcland Raiders".into(),
            ..Default::default()
        };
        assert!(!team_row(&team, 120).contains('◆'));
        team.logo_path = Some("team_logos/Orcland_Raiders_logo.png".into());
        assert!(team_row(&team, 120).contains('◆'));
    }
}
