//! Keyboard handling. Every action runs synchronously on this thread;
//! the draw that follows shows its status line.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::actions;
use crate::app::{App, Focus, Section};

pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Global bindings first
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') => {
                app.should_quit = true;
                return;
            }
            KeyCode::Char('s') => {
                let config = app.config_from_fields();
                app.status = Some(actions::save_config(&config, &app.config_path));
                return;
            }
            _ => {}
        }
    }

    match key.code {
        KeyCode::F(1) => return app.set_section(Section::Chat),
        KeyCode::F(2) => return app.set_section(Section::Upload),
        KeyCode::F(3) => return app.set_section(Section::MultiUpload),
        KeyCode::F(4) => return app.set_section(Section::Files),
        KeyCode::F(5) => return app.set_section(Section::Publish),
        KeyCode::Tab => return app.focus_next(),
        KeyCode::BackTab => return app.focus_prev(),
        _ => {}
    }

    match app.focus {
        Focus::FileList => handle_file_list_key(app, key),
        _ => handle_field_key(app, key),
    }
}

/// Keys while a text field is focused. Enter triggers the action the
/// field belongs to.
fn handle_field_key(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Enter {
        return run_action(app);
    }
    let Some(field) = app.focused_field_mut() else {
        return;
    };
    match key.code {
        KeyCode::Char(c) => field.insert_char(c),
        KeyCode::Backspace => field.backspace(),
        KeyCode::Delete => field.delete(),
        KeyCode::Left => field.move_left(),
        KeyCode::Right => field.move_right(),
        KeyCode::Home => field.move_home(),
        KeyCode::End => field.move_end(),
        _ => {}
    }
}

/// Keys while the file list is focused: navigate, refresh, view, delete.
fn handle_file_list_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.session.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.session.select_next(),
        KeyCode::Char('r') => app.status = Some(actions::refresh_listing(&mut app.session)),
        KeyCode::Enter | KeyCode::Char('v') => app.status = Some(actions::view_file(&mut app.session)),
        KeyCode::Char('d') => {
            app.status = Some(actions::delete_selected(&mut app.session));
            // The listing is stale after a delete; refresh right away so
            // the selection cannot point at the removed file.
            if app.session.listing_stale && app.session.connected() {
                actions::refresh_listing(&mut app.session);
            }
        }
        _ => {}
    }
}

/// Enter on a field: sidebar connects, section fields run their section's
/// action.
fn run_action(app: &mut App) {
    match app.focus {
        Focus::Config(_) => {
            let config = app.config_from_fields();
            app.status = Some(actions::connect(&mut app.session, &config));
        }
        Focus::Section(_) => {
            let status = match app.section {
                Section::Chat => {
                    let prompt = app.chat_prompt.value.clone();
                    let status = actions::ask(&mut app.session, &prompt);
                    if status.kind == actions::StatusKind::Success {
                        app.chat_prompt.clear();
                    }
                    status
                }
                Section::Upload => actions::upload_one(&mut app.session, &app.upload_path.value, &app.upload_dest.value),
                Section::MultiUpload => {
                    actions::upload_many(&mut app.session, &app.multi_paths.value, &app.multi_folder.value)
                }
                Section::Publish => actions::publish(&mut app.session, &app.publish_path.value),
                Section::Files => return,
            };
            app.status = Some(status);
        }
        Focus::FileList => {}
    }
}
