use crate::state::app_settings::AppSettings;
use crate::state::app_state::AppState;
use crate::state::form::{FormKind, FormSession};
use bb_league::league::{League, LeagueError};
use bb_league::prompt;
use bb_league::store::RecordStore;
use std::path::Path;

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum MenuItem {
    #[default]
    League,
    Teams,
    Players,
    Matches,
    Injuries,
    Narratives,
    Prompt,
    Help,
}

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
    pub league: League,
}

impl App {
    pub fn new() -> Self {
        let settings = AppSettings::load();
        let league = League::load(RecordStore::new(settings.data_dir.clone()));

        let app = Self {
            state: AppState::new(),
            league,
            settings,
        };

        if let Some(level) = app.settings.log_level {
            log::set_max_level(level);
            tui_logger::set_default_level(level);
        }

        app
    }

    // -----------------------------------------------------------------------
    // Tab management
    // -----------------------------------------------------------------------

    pub fn update_tab(&mut self, next: MenuItem) {
        if self.state.active_tab == next {
            return;
        }
        self.state.previous_tab = self.state.active_tab;
        self.state.active_tab = next;
        self.state.pending_delete = None;
    }

    pub fn exit_help(&mut self) {
        if self.state.active_tab == MenuItem::Help {
            self.state.active_tab = self.state.previous_tab;
        }
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }

    pub fn dismiss_intro(&mut self) {
        self.state.show_intro = false;
    }

    // -----------------------------------------------------------------------
    // List navigation
    // -----------------------------------------------------------------------

    pub fn active_len(&self) -> usize {
        match self.state.active_tab {
            MenuItem::Teams => self.league.teams.len(),
            MenuItem::Players => self.league.players.len(),
            MenuItem::Matches => self.league.matches.len(),
            MenuItem::Injuries => self.league.injuries.len(),
            MenuItem::Narratives => self.league.narratives.len(),
            _ => 0,
        }
    }

    pub fn selection_down(&mut self) {
        let len = self.active_len();
        if let Some(view) = self.state.view_mut(self.state.active_tab) {
            view.move_down(len);
        }
    }

    pub fn selection_up(&mut self) {
        if let Some(view) = self.state.view_mut(self.state.active_tab) {
            view.move_up();
        }
    }

    fn selected_index(&self) -> Option<usize> {
        let view = self.state.view(self.state.active_tab)?;
        (self.active_len() > 0).then_some(view.selected)
    }

    /// A short display name for the selected record, for status prompts.
    fn selected_label(&self) -> Option<String> {
        let index = self.selected_index()?;
        match self.state.active_tab {
            MenuItem::Teams => self.league.teams.get(index).map(|t| t.name.clone()),
            MenuItem::Players => self.league.players.get(index).map(|p| p.name.clone()),
            MenuItem::Matches => self
                .league
                .matches
                .get(index)
                .map(|m| format!("{} vs {}", m.team_a_name, m.team_b_name)),
            MenuItem::Injuries => self.league.injuries.get(index).map(|i| i.player_name.clone()),
            MenuItem::Narratives => self.league.narratives.get(index).map(|n| n.title.clone()),
            _ => None,
        }
    }

    // -----------------------------------------------------------------------
    // Forms
    // -----------------------------------------------------------------------

    pub fn open_add_form(&mut self) {
        let form = match self.state.active_tab {
            MenuItem::Teams => FormSession::team(None),
            MenuItem::Players => FormSession::player(None),
            MenuItem::Matches => FormSession::match_report(None),
            MenuItem::Injuries => FormSession::injury(None),
            MenuItem::Narratives => FormSession::narrative(None),
            _ => return,
        };
        self.state.last_error = None;
        self.state.form = Some(form);
    }

    pub fn open_edit_form(&mut self) {
        let form = match self.state.active_tab {
            MenuItem::League => Some(FormSession::league_info(&self.league.info)),
            MenuItem::Prompt => Some(FormSession::prompt_inputs(&self.state.prompt.inputs)),
            MenuItem::Teams => self
                .selected_index()
                .and_then(|i| self.league.teams.get(i).map(|t| FormSession::team(Some((i, t))))),
            MenuItem::Players => self.selected_index().and_then(|i| {
                self.league
                    .players
                    .get(i)
                    .map(|p| FormSession::player(Some((i, p))))
            }),
            MenuItem::Matches => self.selected_index().and_then(|i| {
                self.league
                    .matches
                    .get(i)
                    .map(|m| FormSession::match_report(Some((i, m))))
            }),
            MenuItem::Injuries => self.selected_index().and_then(|i| {
                self.league
                    .injuries
                    .get(i)
                    .map(|inj| FormSession::injury(Some((i, inj))))
            }),
            MenuItem::Narratives => self.selected_index().and_then(|i| {
                self.league
                    .narratives
                    .get(i)
                    .map(|n| FormSession::narrative(Some((i, n))))
            }),
            MenuItem::Help => None,
        };
        if let Some(form) = form {
            self.state.last_error = None;
            self.state.form = Some(form);
        }
    }

    pub fn cancel_form(&mut self) {
        self.state.form = None;
        self.state.status = Some("Cancelled".to_string());
    }

    /// Apply the active form. On validation failure the form stays open
    /// with every missing field reported at once.
    pub fn submit_form(&mut self) {
        let Some(form) = self.state.form.take() else {
            return;
        };

        let result = match form.kind {
            FormKind::LeagueInfo => self
                .league
                .save_info(form.to_league_info())
                .map(|_| "Saved league information".to_string()),
            FormKind::Team => self.save_team(&form),
            FormKind::Player => self.save_player(&form),
            FormKind::Match => {
                let report = form.to_match();
                let label = format!("{} vs {}", report.team_a_name, report.team_b_name);
                match form.editing {
                    Some(index) => self.league.update_match(index, report),
                    None => self.league.add_match(report),
                }
                .map(|_| format!("Saved match {label}"))
            }
            FormKind::Injury => {
                let injury = form.to_injury();
                let label = injury.player_name.clone();
                match form.editing {
                    Some(index) => self.league.update_injury(index, injury),
                    None => self.league.add_injury(injury),
                }
                .map(|_| format!("Saved injury report for {label}"))
            }
            FormKind::Narrative => {
                let narrative = form.to_narrative();
                let label = narrative.title.clone();
                match form.editing {
                    Some(index) => self.league.update_narrative(index, narrative),
                    None => self.league.add_narrative(narrative),
                }
                .map(|_| format!("Saved narrative \"{label}\""))
            }
            FormKind::PromptInputs => {
                self.state.prompt.inputs = form.to_prompt_inputs();
                Ok("Report settings updated".to_string())
            }
        };

        match result {
            Ok(message) => {
                self.state.last_error = None;
                self.state.status = Some(message);
            }
            Err(e) => {
                // Keep the form open on validation failure so the user can
                // fix it in place.
                let keep = matches!(e, LeagueError::Validation(_));
                self.state.last_error = Some(e.to_string());
                if keep {
                    self.state.form = Some(form);
                }
            }
        }
    }

    fn save_team(&mut self, form: &FormSession) -> Result<String, LeagueError> {
        let (team, logo) = form.to_team();
        let label = team.name.clone();
        let index = match form.editing {
            Some(index) => {
                self.league.update_team(index, team)?;
                index
            }
            None => {
                self.league.add_team(team)?;
                self.league.teams.len() - 1
            }
        };
        if let Some(source) = logo {
            let stored = self.league.attach_team_logo(index, Path::new(&source))?;
            return Ok(format!(
                "Saved team {label}, logo stored as {}",
                stored.display()
            ));
        }
        Ok(format!("Saved team {label}"))
    }

    fn save_player(&mut self, form: &FormSession) -> Result<String, LeagueError> {
        let (player, photo) = form.to_player();
        let label = player.name.clone();
        let index = match form.editing {
            Some(index) => {
                self.league.update_player(index, player)?;
                index
            }
            None => {
                self.league.add_player(player)?;
                self.league.players.len() - 1
            }
        };
        if let Some(source) = photo {
            let stored = self.league.attach_player_photo(index, Path::new(&source))?;
            return Ok(format!(
                "Saved player {label}, photo stored as {}",
                stored.display()
            ));
        }
        Ok(format!("Saved player {label}"))
    }

    // -----------------------------------------------------------------------
    // Deletion — two-step: `d` marks, `y` confirms, anything else cancels
    // -----------------------------------------------------------------------

    pub fn request_delete(&mut self) {
        let Some(index) = self.selected_index() else {
            return;
        };
        let label = self.selected_label().unwrap_or_default();
        self.state.pending_delete = Some(index);
        self.state.status = Some(format!("Delete \"{label}\"? Press y to confirm"));
    }

    pub fn confirm_delete(&mut self) {
        let Some(index) = self.state.pending_delete.take() else {
            return;
        };
        let result = match self.state.active_tab {
            MenuItem::Teams => self.league.delete_team(index),
            MenuItem::Players => self.league.delete_player(index),
            MenuItem::Matches => self.league.delete_match(index),
            MenuItem::Injuries => self.league.delete_injury(index),
            MenuItem::Narratives => self.league.delete_narrative(index),
            _ => return,
        };
        match result {
            Ok(()) => {
                let len = self.active_len();
                if let Some(view) = self.state.view_mut(self.state.active_tab) {
                    view.clamp(len);
                }
                self.state.status = Some("Deleted".to_string());
            }
            Err(e) => self.state.last_error = Some(e.to_string()),
        }
    }

    pub fn cancel_delete(&mut self) {
        if self.state.pending_delete.take().is_some() {
            self.state.status = Some("Delete cancelled".to_string());
        }
    }

    // -----------------------------------------------------------------------
    // Prompt generation
    // -----------------------------------------------------------------------

    pub fn generate_prompt(&mut self) {
        let missing = self.state.prompt.inputs.validate();
        if !missing.is_empty() {
            self.state.last_error = Some(format!(
                "The following fields are required: {}",
                missing.join(", ")
            ));
            return;
        }
        self.state.prompt.text =
            prompt::assemble_league(&self.league, &self.state.prompt.inputs, None);
        self.state.prompt.scroll = 0;
        self.state.last_error = None;
        self.state.status = Some(format!(
            "Prompt generated ({} characters) — copy it out or press w to write a file",
            self.state.prompt.text.chars().count()
        ));
    }

    pub fn export_prompt(&mut self) {
        if self.state.prompt.text.is_empty() {
            self.state.last_error = Some("Generate a prompt first (press g)".to_string());
            return;
        }
        match self.league.export_prompt(&self.state.prompt.text, "prompt.txt") {
            Ok(path) => {
                // The store renames on collision, so name the actual file.
                self.state.status = Some(format!("Prompt written to {}", path.display()));
            }
            Err(e) => self.state.last_error = Some(e.to_string()),
        }
    }

    pub fn prompt_scroll_down(&mut self) {
        let max = self.state.prompt.text.lines().count().saturating_sub(1) as u16;
        self.state.prompt.scroll = (self.state.prompt.scroll + 1).min(max);
    }

    pub fn prompt_scroll_up(&mut self) {
        self.state.prompt.scroll = self.state.prompt.scroll.saturating_sub(1);
    }

    pub fn on_error(&mut self, message: String) {
        self.state.last_error = Some(message);
    }
}
