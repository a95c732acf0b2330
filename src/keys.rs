use crate::app::{App, MenuItem};
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::Mutex;

pub async fn handle_key_bindings(key_event: KeyEvent, app: &Arc<Mutex<App>>) {
    let mut guard = app.lock().await;

    if guard.state.show_intro {
        match (key_event.code, key_event.modifiers) {
            (KeyCode::Enter, _) => guard.dismiss_intro(),
            (Char('q'), _) | (Char('c'), KeyModifiers::CONTROL) => {
                crate::cleanup_terminal();
                std::process::exit(0);
            }
            _ => {}
        }
        return;
    }

    // Modal form takes every key until saved or cancelled.
    if guard.state.form.is_some() {
        handle_form_keys(key_event, &mut guard);
        return;
    }

    // A pending delete wants y; any other key cancels it.
    if guard.state.pending_delete.is_some() {
        match key_event.code {
            Char('y') => guard.confirm_delete(),
            _ => guard.cancel_delete(),
        }
        return;
    }

    match (guard.state.active_tab, key_event.code, key_event.modifiers) {
        // Quit
        (_, Char('q'), _) | (_, Char('c'), KeyModifiers::CONTROL) => {
            crate::cleanup_terminal();
            std::process::exit(0);
        }

        // Tab switching
        (_, Char('1'), _) => guard.update_tab(MenuItem::League),
        (_, Char('2'), _) => guard.update_tab(MenuItem::Teams),
        (_, Char('3'), _) => guard.update_tab(MenuItem::Players),
        (_, Char('4'), _) => guard.update_tab(MenuItem::Matches),
        (_, Char('5'), _) => guard.update_tab(MenuItem::Injuries),
        (_, Char('6'), _) => guard.update_tab(MenuItem::Narratives),
        (_, Char('7'), _) => guard.update_tab(MenuItem::Prompt),
        (_, Char('?'), _) => guard.update_tab(MenuItem::Help),
        (MenuItem::Help, KeyCode::Esc, _) => guard.exit_help(),

        // League info is a singleton: edit only.
        (MenuItem::League, Char('e') | KeyCode::Enter, _) => guard.open_edit_form(),

        // Record collections: navigate + CRUD
        (
            MenuItem::Teams
            | MenuItem::Players
            | MenuItem::Matches
            | MenuItem::Injuries
            | MenuItem::Narratives,
            code,
            _,
        ) => match code {
            Char('j') | KeyCode::Down => guard.selection_down(),
            Char('k') | KeyCode::Up => guard.selection_up(),
            Char('a') => guard.open_add_form(),
            Char('e') | KeyCode::Enter => guard.open_edit_form(),
            Char('d') => guard.request_delete(),
            Char('f') => guard.toggle_full_screen(),
            Char('"') => guard.toggle_show_logs(),
            _ => {}
        },

        // Prompt tab
        (MenuItem::Prompt, Char('e'), _) => guard.open_edit_form(),
        (MenuItem::Prompt, Char('g'), _) => guard.generate_prompt(),
        (MenuItem::Prompt, Char('w'), _) => guard.export_prompt(),
        (MenuItem::Prompt, Char('j') | KeyCode::Down, _) => guard.prompt_scroll_down(),
        (MenuItem::Prompt, Char('k') | KeyCode::Up, _) => guard.prompt_scroll_up(),

        // Global
        (_, Char('f'), _) => guard.toggle_full_screen(),
        (_, Char('"'), _) => guard.toggle_show_logs(),

        _ => {}
    }
}

fn handle_form_keys(key_event: KeyEvent, guard: &mut App) {
    let Some(form) = guard.state.form.as_mut() else {
        return;
    };
    match (key_event.code, key_event.modifiers) {
        (KeyCode::Esc, _) => guard.cancel_form(),
        (KeyCode::Enter, _) => {
            if form.on_last_field() {
                guard.submit_form();
            } else {
                form.focus_next();
            }
        }
        (KeyCode::Down | KeyCode::Tab, _) => form.focus_next(),
        (KeyCode::Up | KeyCode::BackTab, _) => form.focus_prev(),
        (KeyCode::Backspace, _) => form.backspace(),
        // Ctrl-s saves from any field.
        (Char('s'), KeyModifiers::CONTROL) => guard.submit_form(),
        (Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => form.insert_char(c),
        _ => {}
    }
}
