//! Top-level application state and the user-intent workflows
//!
//! The orchestrator owns the record collection, the notification queue, the
//! create form and the edit/delete surfaces. Every workflow is split into a
//! synchronous `begin`/`submit` transition, the remote call, and a synchronous
//! `finish` transition, so an event loop can apply them around its own async
//! runtime. The `load`/`create`/`update`/`delete` drivers chain the three
//! steps for callers that can hold `&mut self` across the call.
//!
//! Each action slot (initial load, create, the open edit, the open delete)
//! allows one request in flight. Triggers while a slot is busy are ignored.
//! Completions are not cancelled: one arriving after its surface was closed
//! still updates the collection if the target is present, and closes a
//! surface only if it is still showing that target.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::clock::Clock;
use crate::error::GatewayError;
use crate::form::{FieldError, FormEngine, Submission};
use crate::gateway::RecordGateway;
use crate::notify::{Notification, NotificationId, NotificationKind, NotificationQueue};
use crate::record::{Record, RecordId};
use crate::schema::FieldSchema;
use crate::store::RecordStore;
use crate::table::TableView;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    /// The table is replaced by a retry banner showing `message`
    Failed { message: String },
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }
}

/// The edit modal: a form pre-filled from `target`
#[derive(Debug, Clone)]
pub struct EditSession {
    pub target: Record,
    pub form: FormEngine,
}

impl EditSession {
    pub fn is_busy(&self) -> bool {
        self.form.is_busy()
    }
}

/// The delete confirmation dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteSession {
    pub target: Record,
    pub busy: bool,
}

/// How a chained workflow ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Nothing to do: slot busy or surface not open
    Skipped,
    /// The form held invalid values; no request was made
    Rejected(Vec<FieldError>),
    Succeeded,
    Failed,
}

pub struct Orchestrator {
    schema: FieldSchema,
    records: RecordStore,
    load: LoadState,
    create_form: FormEngine,
    edit: Option<EditSession>,
    delete: Option<DeleteSession>,
    notifications: NotificationQueue,
    clock: Arc<dyn Clock + Send + Sync>,
}

impl Orchestrator {
    pub fn new(schema: FieldSchema, clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self {
            create_form: FormEngine::create(schema.clone()),
            schema,
            records: RecordStore::new(),
            load: LoadState::Idle,
            edit: None,
            delete: None,
            notifications: NotificationQueue::default(),
            clock,
        }
    }

    /// Display duration of notifications queued from now on
    pub fn with_notification_ttl(mut self, ttl_ms: u64) -> Self {
        self.notifications = NotificationQueue::new(ttl_ms);
        self
    }

    pub fn schema(&self) -> &FieldSchema {
        &self.schema
    }

    pub fn records(&self) -> &RecordStore {
        &self.records
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load
    }

    pub fn table(&self) -> TableView {
        TableView::project(&self.schema, self.records.records())
    }

    pub fn notifications(&self) -> &NotificationQueue {
        &self.notifications
    }

    /// Text shown for a record in notifications and prompts
    pub fn display_name(&self, record: &Record) -> String {
        self.schema
            .display_name(record.attributes())
            .unwrap_or_else(|| record.id.to_string())
    }

    fn now(&self) -> u64 {
        self.clock.now_ms()
    }

    fn notify(&mut self, kind: NotificationKind, text: String) -> NotificationId {
        let now = self.now();
        self.notifications.push(kind, text, now)
    }

    /// Drops notifications whose display time has elapsed
    pub fn expire_notifications(&mut self) -> Vec<NotificationId> {
        let now = self.now();
        self.notifications.expire(now)
    }

    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        self.notifications.remove(id)
    }

    /// Takes every queued notification, for front-ends without timers
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain()
    }

    // -- load --

    /// Enters `Loading`. False when a load is already in flight.
    pub fn begin_load(&mut self) -> bool {
        if self.load.is_loading() {
            return false;
        }
        debug!("loading records");
        self.load = LoadState::Loading;
        true
    }

    pub fn finish_load(&mut self, result: Result<Vec<Record>, GatewayError>) {
        match result {
            Ok(records) => {
                debug!(count = records.len(), "records loaded");
                self.records.replace_all(records);
                self.load = LoadState::Loaded;
            }
            Err(e) => {
                warn!(cause = %e.cause(), "{e}");
                let message = format!("Failed to fetch {}", self.schema.names().plural);
                self.notify(NotificationKind::Error, message.clone());
                self.load = LoadState::Failed { message };
            }
        }
    }

    // -- create --

    pub fn create_form(&self) -> &FormEngine {
        &self.create_form
    }

    /// Field events go straight to the form
    pub fn create_form_mut(&mut self) -> &mut FormEngine {
        &mut self.create_form
    }

    pub fn is_creating(&self) -> bool {
        self.create_form.is_busy()
    }

    /// Submits the create form. On acceptance the slot becomes busy and the
    /// returned draft must be sent, then passed on to [`Self::finish_create`].
    pub fn submit_create(&mut self) -> Submission {
        let submission = self.create_form.submit();
        if matches!(submission, Submission::Accepted(_)) {
            debug!("create submitted");
            self.create_form.set_busy(true);
        }
        submission
    }

    pub fn finish_create(&mut self, result: Result<Record, GatewayError>) {
        self.create_form.set_busy(false);
        match result {
            Ok(record) => {
                let text = format!(
                    "{} \"{}\" created successfully!",
                    self.schema.names().title(),
                    self.display_name(&record)
                );
                debug!(id = %record.id, "record created");
                self.records.insert(record);
                self.notify(NotificationKind::Success, text);
            }
            Err(e) => {
                warn!(cause = %e.cause(), "{e}");
                let text = format!("Failed to create {}", self.schema.names().singular);
                self.notify(NotificationKind::Error, text);
            }
        }
    }

    // -- edit --

    pub fn edit_session(&self) -> Option<&EditSession> {
        self.edit.as_ref()
    }

    pub fn edit_form_mut(&mut self) -> Option<&mut FormEngine> {
        self.edit.as_mut().map(|s| &mut s.form)
    }

    /// Opens the edit modal for `id`. Ignored while an update is in flight
    /// or when `id` is not in the collection.
    pub fn open_edit(&mut self, id: &RecordId) -> bool {
        if self.edit.as_ref().is_some_and(EditSession::is_busy) {
            return false;
        }
        let Some(record) = self.records.get(id) else {
            return false;
        };
        debug!(%id, "edit opened");
        self.edit = Some(EditSession {
            form: FormEngine::edit(self.schema.clone(), record).with_cancel(),
            target: record.clone(),
        });
        true
    }

    /// Cancel button: disabled while the update is in flight
    pub fn cancel_edit(&mut self) -> bool {
        if self.edit.as_ref().is_some_and(EditSession::is_busy) {
            return false;
        }
        self.edit.take().is_some()
    }

    /// Submits the edit form. On acceptance the session becomes busy; send
    /// the draft for `edit_session().target.id` and call
    /// [`Self::finish_update`] with that id.
    pub fn submit_edit(&mut self) -> Submission {
        let Some(session) = self.edit.as_mut() else {
            return Submission::Ignored;
        };
        let submission = session.form.submit();
        if matches!(submission, Submission::Accepted(_)) {
            debug!(id = %session.target.id, "update submitted");
            session.form.set_busy(true);
        }
        submission
    }

    pub fn finish_update(&mut self, id: &RecordId, result: Result<Record, GatewayError>) {
        let current = self.edit.as_ref().is_some_and(|s| &s.target.id == id);
        match result {
            Ok(record) => {
                let text = format!(
                    "{} \"{}\" updated successfully!",
                    self.schema.names().title(),
                    self.display_name(&record)
                );
                if !self.records.replace(id, record) {
                    debug!(%id, "updated record no longer listed");
                }
                if current {
                    self.edit = None;
                }
                self.notify(NotificationKind::Success, text);
            }
            Err(e) => {
                warn!(%id, cause = %e.cause(), "{e}");
                if let Some(session) = self.edit.as_mut().filter(|_| current) {
                    session.form.set_busy(false);
                }
                let text = format!("Failed to update {}", self.schema.names().singular);
                self.notify(NotificationKind::Error, text);
            }
        }
    }

    // -- delete --

    pub fn delete_session(&self) -> Option<&DeleteSession> {
        self.delete.as_ref()
    }

    /// Opens the confirmation for `id`
    pub fn open_delete(&mut self, id: &RecordId) -> bool {
        if self.delete.as_ref().is_some_and(|s| s.busy) {
            return false;
        }
        let Some(record) = self.records.get(id) else {
            return false;
        };
        debug!(%id, "delete confirmation opened");
        self.delete = Some(DeleteSession {
            target: record.clone(),
            busy: false,
        });
        true
    }

    pub fn cancel_delete(&mut self) -> bool {
        if self.delete.as_ref().is_some_and(|s| s.busy) {
            return false;
        }
        self.delete.take().is_some()
    }

    /// Heading of the confirmation dialog, e.g. "Delete User"
    pub fn delete_title(&self) -> String {
        format!("Delete {}", self.schema.names().title())
    }

    /// Message of the open confirmation dialog
    pub fn delete_prompt(&self) -> Option<String> {
        self.delete.as_ref().map(|s| {
            format!(
                "Are you sure you want to delete \"{}\"? This action cannot be undone.",
                self.display_name(&s.target)
            )
        })
    }

    /// Confirm button. Returns the id to delete, or `None` when there is no
    /// open confirmation or its request is already in flight.
    pub fn begin_delete(&mut self) -> Option<RecordId> {
        let session = self.delete.as_mut().filter(|s| !s.busy)?;
        session.busy = true;
        debug!(id = %session.target.id, "delete confirmed");
        Some(session.target.id.clone())
    }

    pub fn finish_delete(&mut self, id: &RecordId, result: Result<(), GatewayError>) {
        let current = self.delete.as_ref().is_some_and(|s| &s.target.id == id);
        match result {
            Ok(()) => {
                let name = match self.records.remove(id) {
                    Some(record) => self.display_name(&record),
                    None => match self.delete.as_ref().filter(|_| current) {
                        Some(session) => self.display_name(&session.target),
                        None => id.to_string(),
                    },
                };
                if current {
                    self.delete = None;
                }
                let text = format!("{} \"{name}\" deleted.", self.schema.names().title());
                self.notify(NotificationKind::Success, text);
            }
            Err(e) => {
                warn!(%id, cause = %e.cause(), "{e}");
                if let Some(session) = self.delete.as_mut().filter(|_| current) {
                    session.busy = false;
                }
                let text = format!("Failed to delete {}", self.schema.names().singular);
                self.notify(NotificationKind::Error, text);
            }
        }
    }

    /// Escape key: closes the confirmation if open, else the edit modal.
    /// Like the cancel buttons, does nothing while the topmost surface has a
    /// request in flight.
    pub fn escape(&mut self) -> bool {
        if self.delete.is_some() {
            return self.cancel_delete();
        }
        self.cancel_edit()
    }

    // -- chained drivers --

    pub async fn load<G: RecordGateway + ?Sized>(&mut self, gateway: &G) -> ActionOutcome {
        if !self.begin_load() {
            return ActionOutcome::Skipped;
        }
        let result = gateway.list().await;
        let outcome = outcome_of(&result);
        self.finish_load(result);
        outcome
    }

    pub async fn create<G: RecordGateway + ?Sized>(&mut self, gateway: &G) -> ActionOutcome {
        let draft = match self.submit_create() {
            Submission::Accepted(draft) => draft,
            Submission::Rejected(errors) => return ActionOutcome::Rejected(errors),
            Submission::Ignored => return ActionOutcome::Skipped,
        };
        let result = gateway.create(&draft).await;
        let outcome = outcome_of(&result);
        self.finish_create(result);
        outcome
    }

    pub async fn update<G: RecordGateway + ?Sized>(&mut self, gateway: &G) -> ActionOutcome {
        let draft = match self.submit_edit() {
            Submission::Accepted(draft) => draft,
            Submission::Rejected(errors) => return ActionOutcome::Rejected(errors),
            Submission::Ignored => return ActionOutcome::Skipped,
        };
        let Some(id) = self.edit.as_ref().map(|s| s.target.id.clone()) else {
            return ActionOutcome::Skipped;
        };
        let result = gateway.update(&id, &draft).await;
        let outcome = outcome_of(&result);
        self.finish_update(&id, result);
        outcome
    }

    pub async fn delete<G: RecordGateway + ?Sized>(&mut self, gateway: &G) -> ActionOutcome {
        let Some(id) = self.begin_delete() else {
            return ActionOutcome::Skipped;
        };
        let result = gateway.delete(&id).await;
        let outcome = outcome_of(&result);
        self.finish_delete(&id, result);
        outcome
    }
}

fn outcome_of<T>(result: &Result<T, GatewayError>) -> ActionOutcome {
    match result {
        Ok(_) => ActionOutcome::Succeeded,
        Err(_) => ActionOutcome::Failed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::error::FailureCause;
    use crate::record::RecordDraft;
    use crate::schema::user_schema;

    fn user(id: &str, first: &str, last: &str) -> Record {
        Record::new(
            id,
            RecordDraft::new()
                .with("firstName", first)
                .with("lastName", last)
                .with("phone", "5551234567")
                .with("email", format!("{}@x.com", first.to_lowercase())),
        )
    }

    fn loaded() -> (Orchestrator, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(0));
        let mut app = Orchestrator::new(user_schema(), clock.clone());
        assert!(app.begin_load());
        app.finish_load(Ok(vec![user("u1", "Ann", "Bo"), user("u2", "Jo", "Lee")]));
        (app, clock)
    }

    fn texts(app: &Orchestrator) -> Vec<String> {
        app.notifications().iter().map(|n| n.text.clone()).collect()
    }

    #[test]
    fn test_load_is_single_flight() {
        let mut app = Orchestrator::new(user_schema(), Arc::new(ManualClock::default()));
        assert!(app.begin_load());
        assert!(!app.begin_load());
        app.finish_load(Err(GatewayError::FetchFailed(FailureCause::Status(500))));
        assert_eq!(
            app.load_state(),
            &LoadState::Failed {
                message: "Failed to fetch users".into()
            }
        );
        assert_eq!(texts(&app), ["Failed to fetch users"]);
        assert!(app.begin_load());
    }

    #[test]
    fn test_create_busy_ignores_second_submit() {
        let (mut app, _) = loaded();
        for (name, value) in [
            ("firstName", "Kim"),
            ("lastName", "Ray"),
            ("phone", "5550000000"),
            ("email", "kim@x.com"),
        ] {
            app.create_form_mut().change(name, value);
        }
        assert!(matches!(app.submit_create(), Submission::Accepted(_)));
        assert!(app.is_creating());
        assert_eq!(app.submit_create(), Submission::Ignored);

        app.finish_create(Ok(user("u9", "Kim", "Ray")));
        assert!(!app.is_creating());
        assert_eq!(app.records().len(), 3);
        assert_eq!(texts(&app), ["User \"Kim Ray\" created successfully!"]);
    }

    #[test]
    fn test_failed_create_leaves_collection() {
        let (mut app, _) = loaded();
        app.finish_create(Err(GatewayError::CreateFailed(FailureCause::Transport("refused".into()))));
        assert_eq!(app.records().len(), 2);
        assert_eq!(texts(&app), ["Failed to create user"]);
    }

    #[test]
    fn test_escape_ignored_while_update_in_flight() {
        let (mut app, _) = loaded();
        let id = RecordId::new("u2");
        assert!(app.open_edit(&id));
        app.edit_form_mut().unwrap().change("lastName", "Park");
        assert!(matches!(app.submit_edit(), Submission::Accepted(_)));

        assert!(!app.escape());
        assert!(app.edit_session().is_some_and(EditSession::is_busy));
        assert!(!app.open_edit(&id));
        assert_eq!(app.submit_edit(), Submission::Ignored);

        app.finish_update(&id, Ok(user("u2", "Jo", "Park")));
        assert_eq!(app.records().get(&id).unwrap().value("lastName"), "Park");
        assert!(app.edit_session().is_none());

        // idle again: reopen and escape work
        assert!(app.open_edit(&id));
        assert!(app.escape());
        assert!(app.edit_session().is_none());
    }

    #[test]
    fn test_escape_ignored_while_delete_in_flight() {
        let (mut app, _) = loaded();
        let id = RecordId::new("u2");
        assert!(app.open_edit(&RecordId::new("u1")));
        assert!(app.open_delete(&id));
        assert_eq!(app.begin_delete(), Some(id.clone()));

        // the busy confirmation stays and shields the edit modal beneath it
        assert!(!app.escape());
        assert!(app.delete_session().is_some_and(|s| s.busy));
        assert!(app.edit_session().is_some());
        assert!(!app.open_delete(&id));
        assert_eq!(app.begin_delete(), None);

        app.finish_delete(&id, Err(GatewayError::DeleteFailed(FailureCause::Status(500))));
        assert!(app.records().contains(&id));
        assert!(app.escape());
        assert!(app.delete_session().is_none());
        assert!(app.edit_session().is_some());
    }

    #[test]
    fn test_late_update_for_removed_record_is_dropped() {
        let (mut app, _) = loaded();
        let id = RecordId::new("u2");
        app.open_edit(&id);
        app.submit_edit();
        app.records.remove(&id);

        app.finish_update(&id, Ok(user("u2", "Jo", "Park")));
        assert!(!app.records().contains(&id));
        assert_eq!(app.records().len(), 1);
    }

    #[test]
    fn test_edit_cannot_reopen_while_busy() {
        let (mut app, _) = loaded();
        app.open_edit(&RecordId::new("u2"));
        app.submit_edit();
        assert!(!app.open_edit(&RecordId::new("u1")));
        assert!(!app.cancel_edit());
        assert_eq!(app.submit_edit(), Submission::Ignored);
    }

    #[test]
    fn test_delete_prompt_and_single_flight() {
        let (mut app, _) = loaded();
        assert!(app.open_delete(&RecordId::new("u2")));
        assert_eq!(
            app.delete_prompt().unwrap(),
            "Are you sure you want to delete \"Jo Lee\"? This action cannot be undone."
        );
        assert_eq!(app.delete_title(), "Delete User");
        assert_eq!(app.begin_delete(), Some(RecordId::new("u2")));
        assert_eq!(app.begin_delete(), None);
        assert!(!app.cancel_delete());

        app.finish_delete(&RecordId::new("u2"), Ok(()));
        assert!(app.delete_session().is_none());
        assert_eq!(texts(&app), ["User \"Jo Lee\" deleted."]);
    }

    #[test]
    fn test_escape_closes_confirmation_before_edit() {
        let (mut app, _) = loaded();
        app.open_edit(&RecordId::new("u1"));
        app.open_delete(&RecordId::new("u2"));

        assert!(app.escape());
        assert!(app.delete_session().is_none());
        assert!(app.edit_session().is_some());
        assert!(app.escape());
        assert!(app.edit_session().is_none());
        assert!(!app.escape());
    }

    #[test]
    fn test_notifications_expire_with_clock() {
        let (mut app, clock) = loaded();
        let app_ttl = app.notifications().ttl_ms();
        app.finish_create(Err(GatewayError::CreateFailed(FailureCause::Status(400))));
        clock.advance(app_ttl - 1);
        assert!(app.expire_notifications().is_empty());
        clock.advance(1);
        assert_eq!(app.expire_notifications().len(), 1);
        assert!(app.notifications().is_empty());
    }

    #[test]
    fn test_display_name_falls_back_to_id() {
        let (app, _) = loaded();
        let anonymous = Record::new("u7", RecordDraft::new());
        assert_eq!(app.display_name(&anonymous), "u7");
    }
}
