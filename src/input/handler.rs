use crate::app::AppState;
use crate::domain::UiMode;
use crate::persistence::KeyValueStore;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

/// Handle keyboard input events. Returns `true` when the app should quit.
pub fn handle_key<S: KeyValueStore>(app: &mut AppState<S>, key: KeyEvent) -> Result<bool> {
    match app.ui_mode {
        UiMode::Normal => handle_normal_mode(app, key),
        UiMode::AddingTask | UiMode::AddingCategory => handle_input_form_mode(app, key),
        UiMode::ConfirmRemoveCategory => handle_confirm_mode(app, key),
    }
}

/// Handle keys in normal mode
fn handle_normal_mode<S: KeyValueStore>(app: &mut AppState<S>, key: KeyEvent) -> Result<bool> {
    match key.code {
        // Navigation
        KeyCode::Up | KeyCode::Char('k') => {
            app.move_selection_up();
            Ok(false)
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.move_selection_down();
            Ok(false)
        }

        // Filter tabs
        KeyCode::Tab | KeyCode::Right => {
            app.next_filter();
            Ok(false)
        }
        KeyCode::BackTab | KeyCode::Left => {
            app.prev_filter();
            Ok(false)
        }
        KeyCode::Char('0') => {
            app.show_all();
            Ok(false)
        }

        // Toggle done
        KeyCode::Char(' ') | KeyCode::Enter => {
            app.toggle_selected();
            Ok(false)
        }

        // Remove task
        KeyCode::Char('x') | KeyCode::Char('X') | KeyCode::Delete => {
            app.remove_selected();
            Ok(false)
        }

        // Add task
        KeyCode::Char('a') | KeyCode::Char('A') => {
            app.start_add_task();
            Ok(false)
        }

        // New category
        KeyCode::Char('n') | KeyCode::Char('N') => {
            app.start_add_category();
            Ok(false)
        }

        // Remove filtered category
        KeyCode::Char('D') => {
            app.start_remove_category();
            Ok(false)
        }

        // Clear completed
        KeyCode::Char('C') => {
            app.clear_completed();
            Ok(false)
        }

        // Quit
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Ok(true),

        _ => Ok(false),
    }
}

/// Handle keys in input form mode (adding task/category)
fn handle_input_form_mode<S: KeyValueStore>(app: &mut AppState<S>, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Enter => app.submit_input_form(),
        KeyCode::Esc => app.cancel_input_form(),
        KeyCode::Tab | KeyCode::Down => app.input_form_cycle(true),
        KeyCode::BackTab | KeyCode::Up => app.input_form_cycle(false),
        KeyCode::Backspace => app.input_form_backspace(),
        KeyCode::Char(c) => app.input_form_add_char(c),
        _ => {}
    }
    Ok(false)
}

/// Handle keys while confirming category removal
fn handle_confirm_mode<S: KeyValueStore>(app: &mut AppState<S>, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_remove_category(),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.cancel_remove_category(),
        _ => {}
    }
    Ok(false)
}
