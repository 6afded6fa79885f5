use crate::app::{AppState, Mode};
use crate::sync::sync_engine::SyncEngine;
use crate::timetable::{EntryRef, PinnedEntry, Timetable};

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Saved(EntryRef),
    Invalid,
    SaveFailed,
    NoForm,
}

/// Applies the open form to the timetable and persists the result.
///
/// Validation failures raise an alert and leave both the timetable and the
/// form untouched. A failed save restores the previous timetable and keeps
/// the form open so the user can retry.
pub async fn submit_class_form(app: &mut AppState, sync: &SyncEngine) -> SubmitOutcome {
    let Some(form) = app.class_form.clone() else {
        return SubmitOutcome::NoForm;
    };

    let previous = app.timetable.clone();
    let entry_ref = match form.apply(&mut app.timetable) {
        Ok(entry_ref) => entry_ref,
        Err(e) => {
            tracing::info!("Rejected class form: {}", e);
            app.show_alert(e.to_string());
            return SubmitOutcome::Invalid;
        }
    };

    app.set_loading(true);
    match persist(app, sync, previous).await {
        Ok(()) => {
            app.select(entry_ref);
            app.close_form();
            SubmitOutcome::Saved(entry_ref)
        }
        Err(()) => SubmitOutcome::SaveFailed,
    }
}

/// Removes the pinned entry and persists. Returns whether the store accepted
/// the change. An entry that can no longer be found is left alone.
pub async fn delete_entry(app: &mut AppState, sync: &SyncEngine, target: &PinnedEntry) -> bool {
    app.delete_confirmation = None;
    app.mode = Mode::Normal;

    let Some(entry_ref) = target.resolve(&app.timetable) else {
        tracing::warn!("Delete skipped: {} is no longer in the timetable", target.original.name);
        app.set_status_message(format!("{} was already removed", target.original.name));
        return false;
    };

    let previous = app.timetable.clone();
    match app.timetable.remove(entry_ref) {
        Ok(removed) => tracing::info!("Deleting {} on {}", removed.name, entry_ref.day),
        Err(e) => {
            tracing::warn!("Delete skipped: {}", e);
            app.mark_dirty();
            return false;
        }
    }

    app.set_loading(true);
    let saved = persist(app, sync, previous).await.is_ok();
    app.clamp_cursor();
    saved
}

/// Replaces the held timetable with the stored one. On failure the current
/// state is kept and the error shows in the status bar.
pub async fn reload(app: &mut AppState, sync: &SyncEngine) -> bool {
    app.set_loading(true);
    match sync.load().await {
        Ok(timetable) => {
            app.timetable = timetable;
            app.clamp_cursor();
            app.set_loading(false);
            true
        }
        Err(e) => {
            tracing::error!("Failed to load timetable: {}", e);
            app.fail_sync(format!("Load failed: {}", e));
            false
        }
    }
}

/// Writes the held timetable as-is.
pub async fn push(app: &mut AppState, sync: &SyncEngine) -> bool {
    app.set_loading(true);
    match sync.save(&app.timetable).await {
        Ok(()) => {
            app.set_loading(false);
            true
        }
        Err(e) => {
            app.fail_sync(format!("Save failed: {}", e));
            false
        }
    }
}

async fn persist(app: &mut AppState, sync: &SyncEngine, previous: Timetable) -> Result<(), ()> {
    match sync.save(&app.timetable).await {
        Ok(()) => {
            app.set_loading(false);
            Ok(())
        }
        Err(e) => {
            app.timetable = previous;
            app.clamp_cursor();
            app.fail_sync(format!("Save failed: {}", e));
            Err(())
        }
    }
}
