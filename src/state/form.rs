use bb_league::prompt::PromptInputs;
use bb_league::{
    InjuryReport, LeagueInfo, MatchReport, Narrative, PlayerProfile, PlayerStats, TeamProfile,
};

/// Which record a form session edits. Carried so submit knows how to turn
/// the field values back into a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    LeagueInfo,
    Team,
    Player,
    Match,
    Injury,
    Narrative,
    PromptInputs,
}

#[derive(Debug, Clone)]
pub struct FormField {
    pub label: &'static str,
    pub value: String,
    /// Digits only — used for the player stat counters.
    pub numeric: bool,
}

impl FormField {
    fn text(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
            numeric: false,
        }
    }

    fn number(label: &'static str, value: u32) -> Self {
        Self {
            label,
            value: value.to_string(),
            numeric: true,
        }
    }
}

/// A modal field editor: one focused field at a time, Enter advances,
/// Enter on the last field submits.
#[derive(Debug, Clone)]
pub struct FormSession {
    pub kind: FormKind,
    pub title: String,
    pub fields: Vec<FormField>,
    pub focus: usize,
    /// Some(index) = editing an existing record in place.
    pub editing: Option<usize>,
}

impl FormSession {
    pub fn league_info(info: &LeagueInfo) -> Self {
        Self {
            kind: FormKind::LeagueInfo,
            title: "League Information".into(),
            fields: vec![
                FormField::text("League Name", &info.name),
                FormField::text("Description", &info.description),
            ],
            focus: 0,
            editing: Some(0),
        }
    }

    pub fn team(existing: Option<(usize, &TeamProfile)>) -> Self {
        let blank = TeamProfile::default();
        let (editing, team) = match existing {
            Some((index, team)) => (Some(index), team),
            None => (None, &blank),
        };
        Self {
            kind: FormKind::Team,
            title: if editing.is_some() { "Edit Team" } else { "New Team" }.into(),
            fields: vec![
                FormField::text("Team Name", &team.name),
                FormField::text("Race", &team.race),
                FormField::text("Coach", &team.coach_name),
                FormField::text("History", &team.history),
                FormField::text("Achievements", &team.achievements),
                FormField::text("Logo File", ""),
            ],
            focus: 0,
            editing,
        }
    }

    pub fn player(existing: Option<(usize, &PlayerProfile)>) -> Self {
        let blank = PlayerProfile::default();
        let (editing, player) = match existing {
            Some((index, player)) => (Some(index), player),
            None => (None, &blank),
        };
        Self {
            kind: FormKind::Player,
            title: if editing.is_some() { "Edit Player" } else { "New Player" }.into(),
            fields: vec![
                FormField::text("Player Name", &player.name),
                FormField::text("Team Name", &player.team_name),
                FormField::text("Position", &player.position),
                FormField::text("Bio", &player.bio),
                FormField::text("Career Highlights", &player.career_highlights),
                FormField::number("Matches Played", player.stats.matches_played),
                FormField::number("Touchdowns", player.stats.touchdowns),
                FormField::number("Interceptions", player.stats.interceptions),
                FormField::number("Injuries Caused", player.stats.injuries_caused),
                FormField::number("MVP Awards", player.stats.mvp_awards),
                FormField::text("Photo File", ""),
            ],
            focus: 0,
            editing,
        }
    }

    pub fn match_report(existing: Option<(usize, &MatchReport)>) -> Self {
        let blank = MatchReport::default();
        let (editing, report) = match existing {
            Some((index, report)) => (Some(index), report),
            None => (None, &blank),
        };
        Self {
            kind: FormKind::Match,
            title: if editing.is_some() { "Edit Match" } else { "New Match" }.into(),
            fields: vec![
                FormField::text("Date", &report.date),
                FormField::text("Team A", &report.team_a_name),
                FormField::text("Team B", &report.team_b_name),
                FormField::text("Final Score", &report.final_score),
                FormField::text("Key Events", &report.key_events),
            ],
            focus: 0,
            editing,
        }
    }

    pub fn injury(existing: Option<(usize, &InjuryReport)>) -> Self {
        let blank = InjuryReport::default();
        let (editing, injury) = match existing {
            Some((index, injury)) => (Some(index), injury),
            None => (None, &blank),
        };
        Self {
            kind: FormKind::Injury,
            title: if editing.is_some() { "Edit Injury" } else { "New Injury" }.into(),
            fields: vec![
                FormField::text("Player Name", &injury.player_name),
                FormField::text("Injury Type", &injury.injury_type),
                FormField::text("Description", &injury.description),
                FormField::text("Time Out", &injury.time_out),
                FormField::text("Expected Return", &injury.expected_return),
            ],
            focus: 0,
            editing,
        }
    }

    pub fn narrative(existing: Option<(usize, &Narrative)>) -> Self {
        let blank = Narrative::default();
        let (editing, narrative) = match existing {
            Some((index, narrative)) => (Some(index), narrative),
            None => (None, &blank),
        };
        Self {
            kind: FormKind::Narrative,
            title: if editing.is_some() { "Edit Narrative" } else { "New Narrative" }.into(),
            fields: vec![
                FormField::text("Title", &narrative.title),
                FormField::text("Description", &narrative.description),
                FormField::text("Teams/Players Involved", &narrative.involved),
                FormField::text("Recent Developments", &narrative.recent_developments),
            ],
            focus: 0,
            editing,
        }
    }

    pub fn prompt_inputs(inputs: &PromptInputs) -> Self {
        Self {
            kind: FormKind::PromptInputs,
            title: "Report Settings".into(),
            fields: vec![
                FormField::text("Type of Report", &inputs.report_type),
                FormField::text("Reporter Character Name", &inputs.reporter_name),
                FormField::text("Reporter Character Description", &inputs.reporter_description),
                FormField::text("Tone and Style", &inputs.tone_style),
                FormField::text("Format and Length", &inputs.format_length),
                FormField::text("Additional Details", &inputs.additional_details),
            ],
            focus: 0,
            editing: Some(0),
        }
    }

    // -----------------------------------------------------------------------
    // Editing
    // -----------------------------------------------------------------------

    pub fn focus_next(&mut self) {
        if self.focus + 1 < self.fields.len() {
            self.focus += 1;
        }
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.saturating_sub(1);
    }

    pub fn on_last_field(&self) -> bool {
        self.focus + 1 == self.fields.len()
    }

    pub fn insert_char(&mut self, c: char) {
        let field = &mut self.fields[self.focus];
        if field.numeric && !c.is_ascii_digit() {
            return;
        }
        field.value.push(c);
    }

    pub fn backspace(&mut self) {
        self.fields[self.focus].value.pop();
    }

    fn value(&self, index: usize) -> String {
        self.fields
            .get(index)
            .map(|f| f.value.trim().to_string())
            .unwrap_or_default()
    }

    fn number_at(&self, index: usize) -> u32 {
        self.value(index).parse().unwrap_or(0)
    }

    fn optional(&self, index: usize) -> Option<String> {
        let value = self.value(index);
        if value.is_empty() { None } else { Some(value) }
    }

    // -----------------------------------------------------------------------
    // Field values back into records. Field order matches the constructors
    // above; validation happens in bb-league on save.
    // -----------------------------------------------------------------------

    pub fn to_league_info(&self) -> LeagueInfo {
        LeagueInfo {
            name: self.value(0),
            description: self.value(1),
        }
    }

    /// Returns the team plus the logo file path to import, if one was typed.
    pub fn to_team(&self) -> (TeamProfile, Option<String>) {
        let team = TeamProfile {
            name: self.value(0),
            race: self.value(1),
            coach_name: self.value(2),
            history: self.value(3),
            achievements: self.value(4),
            logo_path: None,
        };
        (team, self.optional(5))
    }

    pub fn to_player(&self) -> (PlayerProfile, Option<String>) {
        let player = PlayerProfile {
            name: self.value(0),
            team_name: self.value(1),
            position: self.value(2),
            bio: self.value(3),
            career_highlights: self.value(4),
            photo_path: None,
            stats: PlayerStats {
                matches_played: self.number_at(5),
                touchdowns: self.number_at(6),
                interceptions: self.number_at(7),
                injuries_caused: self.number_at(8),
                mvp_awards: self.number_at(9),
            },
        };
        (player, self.optional(10))
    }

    pub fn to_match(&self) -> MatchReport {
        MatchReport {
            date: self.value(0),
            team_a_name: self.value(1),
            team_b_name: self.value(2),
            final_score: self.value(3),
            key_events: self.value(4),
            // Race snapshots are filled by the league at save time.
            ..Default::default()
        }
    }

    pub fn to_injury(&self) -> InjuryReport {
        InjuryReport {
            player_name: self.value(0),
            injury_type: self.value(1),
            description: self.value(2),
            time_out: self.value(3),
            expected_return: self.value(4),
            ..Default::default()
        }
    }

    pub fn to_narrative(&self) -> Narrative {
        Narrative {
            title: self.value(0),
            description: self.value(1),
            involved: self.value(2),
            recent_developments: self.value(3),
        }
    }

    pub fn to_prompt_inputs(&self) -> PromptInputs {
        PromptInputs {
            report_type: self.value(0),
            reporter_name: self.value(1),
            reporter_description: self.value(2),
            tone_style: self.value(3),
            format_length: self.value(4),
            additional_details: self.value(5),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typing_fills_the_focused_field() {
        let mut form = FormSession::team(None);
        for c in "Orcland Raiders".chars() {
            form.insert_char(c);
        }
        form.focus_next();
        for c in "Orc".chars() {
            form.insert_char(c);
        }
        let (team, logo) = form.to_team();
        assert_eq!(team.name, "Orcland Raiders");
        assert_eq!(team.race, "Orc");
        assert!(logo.is_none());
    }

    #[test]
    fn numeric_fields_reject_non_digits() {
        let mut form = FormSession::player(None);
        form.focus = 6; // Touchdowns
        form.insert_char('x');
        form.insert_char('4');
        let (player, _) = form.to_player();
        assert_eq!(player.stats.touchdowns, 4);
    }

    #[test]
    fn backspace_and_focus_bounds() {
        let mut form = FormSession::narrative(None);
        form.insert_char('a');
        form.backspace();
        form.backspace(); // already empty, must not panic
        assert_eq!(form.fields[0].value, "");

        form.focus_prev(); // at first field, stays put
        assert_eq!(form.focus, 0);
        for _ in 0..20 {
            form.focus_next();
        }
        assert!(form.on_last_field());
    }

    #[test]
    fn edit_form_preloads_existing_values() {
        let report = MatchReport {
            date: "2026-08-01".into(),
            team_a_name: "Orcland Raiders".into(),
            team_b_name: "Reikland Reavers".into(),
            final_score: "2-1".into(),
            key_events: "A troll ate the ball.".into(),
            ..Default::default()
        };
        let form = FormSession::match_report(Some((3, &report)));
        assert_eq!(form.editing, Some(3));
        assert_eq!(form.to_match().final_score, "2-1");
    }

    #[test]
    fn blank_stats_parse_to_zero() {
        let mut form = FormSession::player(None);
        form.fields[5].value.clear();
        let (player, _) = form.to_player();
        assert_eq!(player.stats.matches_played, 0);
    }
}
