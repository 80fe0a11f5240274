//! Applies handler [`Action`]s to the navigation history and the watchdog.

use crate::app::action::Action;
use crate::app::state::{AppState, EntryKind};
use crate::nav::Navigator;
use crate::watchdog::{DelayScheduler, ResetDecision, SessionResetTimer};

pub fn execute<S: DelayScheduler>(
    state: &mut AppState,
    mut watchdog: Option<&mut SessionResetTimer<S>>,
    action: Action,
) {
    match action {
        Action::Activity { kind } => {
            if let Some(timer) = watchdog.as_deref_mut() {
                tracing::trace!(?kind, "activity");
                timer.notify_activity();
            }
        }
        Action::IdleExpired { generation } => {
            if let Some(timer) = watchdog.as_deref_mut() {
                handle_expiry(state, timer, generation);
            }
        }
        Action::Navigate { location } => {
            if state.history.push(&location) {
                state.record_location();
            }
        }
        Action::Back => {
            if state.history.back() {
                state.record_location();
            } else {
                state.system_message("Already at the first page.".to_string());
            }
        }
        Action::Forward => {
            if state.history.forward() {
                state.record_location();
            } else {
                state.system_message("Already at the latest page.".to_string());
            }
        }
        Action::Home => {
            let location = state.history.current().slugs().location;
            let home = if location.is_empty() {
                state.config.shell.start_path.clone()
            } else {
                state
                    .config
                    .watchdog
                    .target_template
                    .replace(crate::route::target::LOCATION_PLACEHOLDER, &location)
            };
            if state.history.push(&home) {
                state.record_location();
            }
        }
        Action::ShowStatus => show_status(state, watchdog.as_deref()),
        Action::Quit => {
            if let Some(timer) = watchdog.as_deref_mut() {
                timer.stop();
            }
            state.should_quit = true;
        }
    }

    sync_status(state, watchdog.as_deref());
}

/// Copy the watchdog's live countdown into the render state.
pub fn sync_status<S: DelayScheduler>(state: &mut AppState, watchdog: Option<&SessionResetTimer<S>>) {
    state.watchdog.enabled = watchdog.is_some();
    state.watchdog.remaining = watchdog.and_then(|t| t.remaining());
}

fn handle_expiry<S: DelayScheduler>(
    state: &mut AppState,
    timer: &mut SessionResetTimer<S>,
    generation: u64,
) {
    match timer.fire(generation) {
        Ok(ResetDecision::Stale) => {}
        Ok(ResetDecision::Idle { slugs }) => {
            let note = if slugs.location.is_empty() {
                "Idle; page is outside any location, staying put.".to_string()
            } else {
                format!("Idle; already on the {} home set.", slugs.location)
            };
            state.system_message(note);
        }
        Ok(ResetDecision::Redirect { url, slugs }) => {
            let from = state.history.current().location();
            match state.history.redirect(&url) {
                Ok(()) => {
                    state.watchdog.resets += 1;
                    state.add_entry(
                        EntryKind::Reset,
                        format!("Idle on {}, returning to {}", from, slugs.location),
                    );
                    state.record_location();
                }
                Err(e) => {
                    tracing::warn!(error = %e, "idle reset navigation failed");
                    state.error_message(format!("Reset failed: {}", e));
                }
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "could not build reset URL");
            state.error_message(format!("Reset failed: bad target URL ({})", e));
        }
    }
}

fn show_status<S: DelayScheduler>(state: &mut AppState, watchdog: Option<&SessionResetTimer<S>>) {
    let current = state.history.current().clone();
    let slugs = current.slugs();
    let mut lines = vec![
        format!("Location: {}", current.location()),
        format!(
            "Slugs: location={:?} set={:?} object={:?}",
            slugs.location, slugs.current, slugs.object
        ),
        format!(
            "History: {} entries, {} full loads",
            state.history.len(),
            state.history.full_loads()
        ),
    ];
    match watchdog {
        Some(timer) => {
            lines.push(format!(
                "Watchdog: timeout {}s, {}, reset on this page: {}",
                timer.timeout().as_secs(),
                if timer.is_armed() { "armed" } else { "disarmed" },
                if slugs.should_reset() { "yes" } else { "no" }
            ));
            if !slugs.location.is_empty() {
                match timer.target().build(&slugs.location) {
                    Ok(url) => lines.push(format!("Reset target: {}", url)),
                    Err(e) => lines.push(format!("Reset target invalid: {}", e)),
                }
            }
        }
        None => lines.push("Watchdog: off".to_string()),
    }
    for line in lines {
        state.system_message(line);
    }
}
