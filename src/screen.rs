//! One create/edit form, one listing and one notification slot per record kind.

use crate::{
    controllers::{
        form::{BeginSubmit, FormController, FormDraft, FormState, SubmitAction, SubmitOutcome},
        list::{FetchOutcome, ListController, ListState},
        notification::{Notification, Notifier},
    },
    data::{Persisted, RecordFields, RecordId, course::Course, student::Student},
    error::{
        BadDecisionSnafu, MissingRecordSnafu, NoPendingDeleteSnafu, RosterError, RosterResult,
    },
    gateway::RecordGateway,
    maud_conveniences::{form_element, form_submit_button, render_table, subtitle, title, toast},
    validator::FieldSpec,
};
use maud::{Markup, html};
use snafu::OptionExt;
use std::{
    str::FromStr,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};
use uuid::Uuid;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DeleteDecision {
    Confirm,
    Cancel,
}

impl FromStr for DeleteDecision {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "confirm" => Ok(Self::Confirm),
            "cancel" => Ok(Self::Cancel),
            _ => BadDecisionSnafu { original: s }.fail(),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum SubmitReport {
    Invalid,
    AlreadySubmitting,
    Created,
    Updated(RecordId),
    Failed,
}

#[derive(Debug, PartialEq, Eq)]
pub enum DeleteReport {
    Cancelled,
    Deleted,
    Failed,
}

/// Everything the form needs to draw itself, copied out from under the lock.
struct FormView {
    state: FormState,
    draft: FormDraft,
    editing: Option<RecordId>,
}

pub struct RecordScreen<T: RecordFields> {
    gateway: Arc<dyn RecordGateway<T>>,
    form: Mutex<FormController<T>>,
    list: Mutex<ListController<T>>,
    notifier: Notifier,
    pending_delete: Mutex<Option<RecordId>>,
}

impl<T: RecordFields> std::fmt::Debug for RecordScreen<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordScreen")
            .field("kind", &T::KIND)
            .finish_non_exhaustive()
    }
}

impl<T: RecordFields> RecordScreen<T> {
    pub fn new(gateway: Arc<dyn RecordGateway<T>>, notification_timeout: Duration) -> Self {
        Self {
            gateway,
            form: Mutex::new(FormController::new()),
            list: Mutex::new(ListController::new()),
            notifier: Notifier::new(notification_timeout),
            pending_delete: Mutex::new(None),
        }
    }

    pub async fn mount(&self) {
        info!(kind = %T::KIND, "Mounting screen");
        self.refetch().await;
    }

    pub async fn refetch(&self) {
        let ticket = lock(&self.list).begin_fetch();
        let result = self.gateway.list().await;
        let outcome = lock(&self.list).finish_fetch(ticket, result);

        if let FetchOutcome::Failed(e) = outcome {
            warn!(kind = %T::KIND, ?e, "Unable to load records");
            self.notifier.error(format!(
                "Unable to load {}: {e}",
                T::KIND.segment()
            ));
        }
    }

    pub fn records(&self) -> Arc<Vec<Persisted<T>>> {
        lock(&self.list).records()
    }

    #[cfg(test)]
    pub fn list_state(&self) -> ListState {
        lock(&self.list).state()
    }

    #[cfg(test)]
    pub fn form_state(&self) -> FormState {
        lock(&self.form).state()
    }

    pub fn draft(&self) -> FormDraft {
        lock(&self.form).draft().clone()
    }

    pub fn editing_id(&self) -> Option<RecordId> {
        lock(&self.form).editing_id().cloned()
    }

    pub fn notification(&self) -> Option<Notification> {
        self.notifier.current()
    }

    pub fn pending_delete(&self) -> Option<RecordId> {
        lock(&self.pending_delete).clone()
    }

    pub fn edit(&self, id: &RecordId) -> RosterResult<()> {
        let record = lock(&self.list)
            .find(id)
            .cloned()
            .context(MissingRecordSnafu {
                kind: T::KIND,
                id: id.clone(),
            })?;
        lock(&self.form).retarget(Some(record));
        Ok(())
    }

    pub fn new_record(&self) {
        lock(&self.form).retarget(None);
    }

    pub fn set_field(&self, name: &str, value: impl Into<String>) -> RosterResult<()> {
        lock(&self.form).set_field(name, value)
    }

    pub fn blur_field(&self, name: &str) -> RosterResult<()> {
        lock(&self.form).blur_field(name)
    }

    pub async fn submit(&self) -> RosterResult<SubmitReport> {
        let begin = lock(&self.form).begin_submit()?;
        let ticket = match begin {
            BeginSubmit::Ready(ticket) => ticket,
            BeginSubmit::Invalid(errors) => {
                debug!(kind = %T::KIND, ?errors, "Submission blocked by validation");
                return Ok(SubmitReport::Invalid);
            }
            BeginSubmit::AlreadySubmitting => return Ok(SubmitReport::AlreadySubmitting),
        };

        let (verb, result) = match &ticket.action {
            SubmitAction::Create(fields) => ("create", self.gateway.create(fields).await),
            SubmitAction::Update(id, fields) => ("update", self.gateway.update(id, fields).await),
        };
        let outcome = lock(&self.form).finish_submit(ticket, result);

        Ok(match outcome {
            SubmitOutcome::Created => {
                self.notifier.success(format!("{} created", T::KIND.title()));
                self.refetch().await;
                SubmitReport::Created
            }
            SubmitOutcome::Updated(id) => {
                self.notifier.success(format!("{} updated", T::KIND.title()));
                self.stop_editing(&id);
                self.refetch().await;
                SubmitReport::Updated(id)
            }
            SubmitOutcome::Failed(e) => {
                warn!(kind = %T::KIND, ?e, verb, "Submission failed");
                self.notifier
                    .error(format!("Unable to {verb} {}: {e}", T::KIND));
                SubmitReport::Failed
            }
        })
    }

    ///only if the form is still looking at `id` - it may have moved on while we were waiting
    fn stop_editing(&self, id: &RecordId) {
        let mut form = lock(&self.form);
        if form.editing_id() == Some(id) {
            form.retarget(None);
        }
    }

    /// First half of deleting: remember what to delete and ask.
    pub fn request_delete(&self, id: &RecordId) -> RosterResult<()> {
        snafu::ensure!(
            lock(&self.list).find(id).is_some(),
            MissingRecordSnafu {
                kind: T::KIND,
                id: id.clone(),
            }
        );
        *lock(&self.pending_delete) = Some(id.clone());
        Ok(())
    }

    pub async fn resolve_delete(&self, decision: DeleteDecision) -> RosterResult<DeleteReport> {
        let id = lock(&self.pending_delete)
            .take()
            .context(NoPendingDeleteSnafu { kind: T::KIND })?;

        if decision == DeleteDecision::Cancel {
            debug!(kind = %T::KIND, %id, "Delete cancelled");
            return Ok(DeleteReport::Cancelled);
        }

        Ok(match self.gateway.remove(&id).await {
            Ok(()) => {
                self.notifier.success(format!("{} deleted", T::KIND.title()));
                self.stop_editing(&id);
                self.refetch().await;
                DeleteReport::Deleted
            }
            Err(e) => {
                warn!(kind = %T::KIND, %id, ?e, "Delete failed");
                self.notifier
                    .error(format!("Unable to delete {}: {e}", T::KIND));
                DeleteReport::Failed
            }
        })
    }

    pub fn dismiss_notification(&self, id: Option<Uuid>) {
        match id {
            Some(id) => self.notifier.dismiss_id(id),
            None => self.notifier.dismiss(),
        };
    }

    pub fn shutdown(&self) {
        self.notifier.dismiss();
    }

    pub fn dom_id() -> String {
        format!("{}-screen", T::KIND.segment())
    }

    fn target() -> String {
        format!("#{}", Self::dom_id())
    }

    fn toast_id() -> String {
        format!("{}-toast", T::KIND.segment())
    }

    /// Only the notification slot. Expiry and dismissal swap this and nothing else, so
    /// whatever is half-typed into the form survives.
    pub fn render_notification(&self) -> Markup {
        let segment = T::KIND.segment();
        let target = format!("#{}", Self::toast_id());

        html! {
            div id=(Self::toast_id()) {
                @if let Some(notification) = self.notifier.current() {
                    (toast(
                        &notification,
                        &format!("/{segment}/notification/dismiss"),
                        &format!("/{segment}/notification"),
                        &target,
                        self.notifier.timeout().as_millis(),
                    ))
                }
            }
        }
    }

    pub fn render_field(&self, spec: &FieldSpec) -> Markup {
        let form = lock(&self.form);
        Self::field_markup(spec, form.draft(), form.is_locked(spec.name))
    }

    fn field_markup(spec: &FieldSpec, draft: &FormDraft, locked: bool) -> Markup {
        let segment = T::KIND.segment();
        let id = format!("{segment}-{}", spec.name);

        form_element(
            &id,
            spec.label,
            html! {
                input type=(spec.input.html_type()) id=(id) name=(spec.name) value=(draft.value(spec.name))
                    disabled[locked]
                    hx-post={"/" (segment) "/field"} hx-trigger="blur" hx-vals={"{\"_field\": \"" (spec.name) "\"}"}
                    hx-target={"#field-" (id)} hx-swap="outerHTML"
                    class="shadow appearance-none border rounded w-full py-2 px-3 leading-tight focus:outline-none focus:shadow-outline bg-gray-700 border-gray-600" {}
            },
            draft.visible_error(spec.name),
        )
    }

    fn render_form(view: &FormView) -> Markup {
        let segment = T::KIND.segment();
        let target = Self::target();
        let heading = match view.editing {
            Some(_) => format!("Edit {}", T::KIND.title()),
            None => format!("Create {}", T::KIND.title()),
        };
        let submitting = view.state == FormState::Submitting;

        html! {
            (subtitle(heading))
            form hx-post={"/" (segment)} hx-target=(target) hx-swap="outerHTML" class="p-4" novalidate {
                @for spec in T::schema().fields {
                    (Self::field_markup(spec, &view.draft, view.editing.is_some() && spec.name == T::key_field()))
                }
                @if submitting {
                    p class="text-gray-400 italic" {"Saving..."}
                } @else if view.editing.is_some() {
                    div class="flex flex-row space-x-4" {
                        (form_submit_button(Some("Save")))
                        button type="button" class="bg-gray-600 hover:bg-gray-800 font-bold py-2 px-4 rounded" hx-post={"/" (segment) "/new"} hx-target=(target) hx-swap="outerHTML" {
                            "Cancel"
                        }
                    }
                } @else {
                    (form_submit_button(Some(&format!("Create {}", T::KIND.title()))))
                }
            }
        }
    }

    fn render_list(&self, records: &[Persisted<T>], state: ListState) -> Markup {
        let segment = T::KIND.segment();
        let target = Self::target();
        let schema = T::schema();

        let rows = records
            .iter()
            .map(|record| {
                let values = record.fields.to_values();
                let mut row: Vec<Markup> = schema
                    .fields
                    .iter()
                    .map(|spec| html! {(values.get(spec.name).map_or("", String::as_str))})
                    .collect();
                row.push(html! {
                    div class="flex flex-row space-x-2" {
                        button class="bg-slate-600 hover:bg-slate-800 font-bold py-1 px-3 rounded" hx-get={"/" (segment) "/" (record.id.path_segment()) "/edit"} hx-target=(target) hx-swap="outerHTML" {
                            "Edit"
                        }
                        button class="bg-red-600 hover:bg-red-800 font-bold py-1 px-3 rounded" hx-get={"/" (segment) "/" (record.id.path_segment()) "/delete"} hx-target=(target) hx-swap="outerHTML" {
                            "Delete"
                        }
                    }
                });
                row
            })
            .collect();

        html! {
            @match state {
                ListState::Loading => {
                    p class="text-gray-400 italic mb-2" {"Loading..."}
                }
                ListState::Failed => {
                    p class="text-red-400 italic mb-2" {"Showing the last list we managed to load."}
                }
                ListState::Ready => {}
            }
            (render_table(
                schema.fields.iter().map(|spec| spec.label).chain(["Actions"]),
                rows,
            ))
        }
    }

    fn render_confirmation(&self, records: &[Persisted<T>], id: &RecordId) -> Markup {
        let segment = T::KIND.segment();
        let target = Self::target();
        let what = records
            .iter()
            .find(|record| &record.id == id)
            .map_or_else(|| id.to_string(), |record| record.fields.display_key());

        html! {
            div role="dialog" class="bg-gray-700 rounded p-4 mb-4" {
                p class="mb-4" {"Delete " (T::KIND) " " (what) "?"}
                div class="flex flex-row space-x-4" {
                    button class="bg-red-600 hover:bg-red-800 font-bold py-2 px-4 rounded" hx-post={"/" (segment) "/delete"} hx-vals="{\"decision\": \"confirm\"}" hx-target=(target) hx-swap="outerHTML" {
                        "Delete"
                    }
                    button class="bg-gray-600 hover:bg-gray-800 font-bold py-2 px-4 rounded" hx-post={"/" (segment) "/delete"} hx-vals="{\"decision\": \"cancel\"}" hx-target=(target) hx-swap="outerHTML" {
                        "Cancel"
                    }
                }
            }
        }
    }

    pub fn render(&self) -> Markup {
        let segment = T::KIND.segment();
        let view = {
            let form = lock(&self.form);
            FormView {
                state: form.state(),
                draft: form.draft().clone(),
                editing: form.editing_id().cloned(),
            }
        };
        let (records, list_state) = {
            let list = lock(&self.list);
            (list.records(), list.state())
        };
        let pending = self.pending_delete();

        html! {
            div id=(Self::dom_id()) class="bg-gray-800 p-8 rounded shadow-md w-full flex flex-col space-y-4" {
                div class="flex flex-row items-center justify-between" {
                    (title(T::KIND.plural_title()))
                    button class="bg-slate-600 hover:bg-slate-800 font-bold py-2 px-4 rounded" hx-post={"/" (segment) "/refresh"} hx-target=(Self::target()) hx-swap="outerHTML" {
                        "Refresh"
                    }
                }
                (self.render_notification())
                @if let Some(id) = pending {
                    (self.render_confirmation(&records, &id))
                }
                (Self::render_form(&view))
                (self.render_list(&records, list_state))
            }
        }
    }
}

/// Picks one kind's screen out of [`Screens`], so routes can be written once for both.
pub trait ScreenOf: RecordFields {
    fn screen(screens: &Screens) -> &RecordScreen<Self>;
}

impl ScreenOf for Student {
    fn screen(screens: &Screens) -> &RecordScreen<Self> {
        &screens.students
    }
}

impl ScreenOf for Course {
    fn screen(screens: &Screens) -> &RecordScreen<Self> {
        &screens.courses
    }
}

#[derive(Debug)]
pub struct Screens {
    pub students: RecordScreen<Student>,
    pub courses: RecordScreen<Course>,
}

impl Screens {
    pub async fn mount(&self) {
        futures::future::join(self.students.mount(), self.courses.mount()).await;
    }

    pub fn shutdown(&self) {
        self.students.shutdown();
        self.courses.shutdown();
    }

    pub fn render(&self) -> Markup {
        html! {
            div class="grid grid-cols-1 xl:grid-cols-2 gap-8 w-full p-8" {
                (self.students.render())
                (self.courses.render())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        controllers::notification::Severity,
        test_support::{FakeBackend, sample_course, sample_student, student_values},
    };

    const TIMEOUT: Duration = Duration::from_millis(3_000);

    fn student_screen(backend: &FakeBackend) -> RecordScreen<Student> {
        RecordScreen::new(Arc::new(backend.api().records::<Student>()), TIMEOUT)
    }

    fn course_screen(backend: &FakeBackend) -> RecordScreen<Course> {
        RecordScreen::new(Arc::new(backend.api().records::<Course>()), TIMEOUT)
    }

    fn fill(screen: &RecordScreen<Student>, name: &str, student_id: &str) {
        for (field, value) in student_values(name, student_id) {
            screen.set_field(field, value).unwrap();
        }
    }

    #[tokio::test]
    async fn mount_fetches_the_collection() {
        let backend = FakeBackend::spawn().await;
        backend.seed(&sample_course("Systems", "CS1")).await;
        let screen = course_screen(&backend);
        assert_eq!(screen.list_state(), ListState::Loading);

        screen.mount().await;

        assert_eq!(screen.list_state(), ListState::Ready);
        assert_eq!(screen.records()[0].fields.code, "CS1");
        assert_eq!(screen.notification(), None);
    }

    #[tokio::test]
    async fn creating_ada_posts_exactly_her_fields_and_refetches() {
        let backend = FakeBackend::spawn().await;
        let screen = student_screen(&backend);
        screen.mount().await;
        backend.forget_requests().await;

        fill(&screen, "Ada", "S1");
        assert_eq!(screen.submit().await.unwrap(), SubmitReport::Created);

        let requests = backend.requests().await;
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].method, "POST");
        assert_eq!(
            requests[0].body.as_ref().unwrap(),
            &serde_json::json!({
                "name": "Ada",
                "studentId": "S1",
                "dob": "2000-01-01",
                "address": "X",
                "phoneNumber": "555",
                "prefix": "Ms",
                "typeOfSubject": "CS",
                "FieldOfStudy": "CS",
                "FieldOfWork": "SWE",
                "classRoom": "101",
                "year": "2024",
            })
        );
        assert_eq!(requests[1].method, "GET");

        assert_eq!(screen.records().len(), 1);
        assert_eq!(screen.records()[0].fields, sample_student("Ada", "S1"));
        assert_eq!(screen.form_state(), FormState::Empty);
        assert_eq!(
            screen.notification().map(|n| n.severity),
            Some(Severity::Success)
        );
    }

    #[tokio::test]
    async fn invalid_submit_never_reaches_the_backend() {
        let backend = FakeBackend::spawn().await;
        let screen = student_screen(&backend);
        screen.mount().await;
        backend.forget_requests().await;

        screen.set_field("name", "Ada").unwrap();
        assert_eq!(screen.submit().await.unwrap(), SubmitReport::Invalid);

        assert!(backend.requests().await.is_empty());
        assert_eq!(screen.notification(), None);
        assert_eq!(
            screen.draft().visible_error("studentId"),
            Some("Student ID is required")
        );
    }

    #[tokio::test]
    async fn update_shows_new_values_and_clears_the_edit_target() {
        let backend = FakeBackend::spawn().await;
        let id = backend.seed(&sample_student("Ada", "S1")).await;
        let screen = student_screen(&backend);
        screen.mount().await;

        screen.edit(&id).unwrap();
        screen.set_field("address", "Y").unwrap();
        assert_eq!(
            screen.submit().await.unwrap(),
            SubmitReport::Updated(id.clone())
        );

        assert_eq!(screen.editing_id(), None);
        let records = screen.records();
        let updated = records.iter().find(|r| r.id == id).unwrap();
        assert_eq!(updated.fields.address, "Y");
        assert_eq!(updated.fields.student_id, "S1");
    }

    #[tokio::test]
    async fn update_against_deleted_record_keeps_the_draft() {
        let backend = FakeBackend::spawn().await;
        let id = backend.seed(&sample_student("Ada", "S1")).await;
        let screen = student_screen(&backend);
        screen.mount().await;

        screen.edit(&id).unwrap();
        screen.set_field("name", "Ada L.").unwrap();
        backend.delete_behind_the_scenes::<Student>(&id).await;
        backend.forget_requests().await;

        assert_eq!(screen.submit().await.unwrap(), SubmitReport::Failed);

        assert_eq!(screen.form_state(), FormState::Editing);
        assert_eq!(screen.draft().value("name"), "Ada L.");
        assert_eq!(screen.editing_id(), Some(id));
        let notification = screen.notification().unwrap();
        assert_eq!(notification.severity, Severity::Error);
        assert!(notification.message.starts_with("Unable to update student"));

        let requests = backend.requests().await;
        assert_eq!(requests.len(), 1, "list should not be refetched");
        assert_eq!(requests[0].method, "PUT");
    }

    #[tokio::test]
    async fn rejected_delete_does_nothing() {
        let backend = FakeBackend::spawn().await;
        let id = backend.seed(&sample_course("Systems", "CS1")).await;
        let screen = course_screen(&backend);
        screen.mount().await;
        backend.forget_requests().await;

        screen.request_delete(&id).unwrap();
        assert_eq!(screen.pending_delete(), Some(id.clone()));
        assert_eq!(
            screen.resolve_delete(DeleteDecision::Cancel).await.unwrap(),
            DeleteReport::Cancelled
        );

        assert!(backend.requests().await.is_empty());
        assert_eq!(screen.records().len(), 1);
        assert_eq!(screen.notification(), None);
        assert_eq!(screen.pending_delete(), None);
    }

    #[tokio::test]
    async fn confirmed_delete_removes_and_refetches() {
        let backend = FakeBackend::spawn().await;
        let id = backend.seed(&sample_course("Systems", "CS1")).await;
        let keep = backend.seed(&sample_course("Networks", "CS2")).await;
        let screen = course_screen(&backend);
        screen.mount().await;

        screen.request_delete(&id).unwrap();
        assert_eq!(
            screen.resolve_delete(DeleteDecision::Confirm).await.unwrap(),
            DeleteReport::Deleted
        );

        let ids: Vec<_> = screen.records().iter().map(|r| r.id.clone()).collect();
        assert_eq!(ids, [keep]);
        assert_eq!(screen.notification().unwrap().message, "Course deleted");
    }

    #[tokio::test]
    async fn failed_delete_only_notifies() {
        let backend = FakeBackend::spawn().await;
        let id = backend.seed(&sample_course("Systems", "CS1")).await;
        let screen = course_screen(&backend);
        screen.mount().await;

        screen.request_delete(&id).unwrap();
        backend.delete_behind_the_scenes::<Course>(&id).await;
        backend.forget_requests().await;

        assert_eq!(
            screen.resolve_delete(DeleteDecision::Confirm).await.unwrap(),
            DeleteReport::Failed
        );
        assert_eq!(backend.requests().await.len(), 1);
        assert_eq!(screen.records().len(), 1);
        assert_eq!(
            screen.notification().map(|n| n.severity),
            Some(Severity::Error)
        );
    }

    #[tokio::test]
    async fn resolving_without_a_request_is_an_error() {
        let backend = FakeBackend::spawn().await;
        let screen = course_screen(&backend);
        assert!(matches!(
            screen.resolve_delete(DeleteDecision::Confirm).await,
            Err(RosterError::NoPendingDelete { .. })
        ));
        assert!(matches!(
            screen.request_delete(&RecordId::new("nope")),
            Err(RosterError::MissingRecord { .. })
        ));
    }

    #[tokio::test]
    async fn failed_refresh_keeps_list_and_reports() {
        let backend = FakeBackend::spawn().await;
        backend.seed(&sample_course("Systems", "CS1")).await;
        let screen = course_screen(&backend);
        screen.mount().await;

        backend.fail_next(axum::http::StatusCode::INTERNAL_SERVER_ERROR).await;
        screen.refetch().await;

        assert_eq!(screen.list_state(), ListState::Failed);
        assert_eq!(screen.records().len(), 1);
        let notification = screen.notification().unwrap();
        assert_eq!(notification.severity, Severity::Error);
        assert!(notification.message.starts_with("Unable to load courses"));
    }

    #[tokio::test]
    async fn render_shows_form_table_and_confirmation() {
        let backend = FakeBackend::spawn().await;
        let id = backend.seed(&sample_student("Ada", "S1")).await;
        let screen = student_screen(&backend);
        screen.mount().await;

        let page = screen.render().into_string();
        assert!(page.contains("id=\"students-screen\""));
        assert!(page.contains("Create Student"));
        assert!(page.contains("Date of Birth"));
        assert!(page.contains("Ada"));

        screen.edit(&id).unwrap();
        screen.request_delete(&id).unwrap();
        let page = screen.render().into_string();
        assert!(page.contains("Edit Student"));
        assert!(page.contains("Delete student Ada (S1)?"));
        assert!(page.contains("disabled"));
    }

    #[tokio::test]
    async fn notification_expiry_only_swaps_the_toast() {
        let backend = FakeBackend::spawn().await;
        let screen = student_screen(&backend);
        screen.mount().await;
        fill(&screen, "Ada", "S1");
        screen.submit().await.unwrap();

        let fragment = screen.render_notification().into_string();
        assert!(fragment.contains("Student created"));
        assert!(fragment.contains("hx-get=\"/students/notification\""));
        assert!(fragment.contains("hx-target=\"#students-toast\""));
        assert!(!fragment.contains("<form"));

        let page = screen.render().into_string();
        assert!(page.contains("id=\"students-toast\""));
        assert!(!page.contains("hx-get=\"/students\""));

        screen.dismiss_notification(None);
        let fragment = screen.render_notification().into_string();
        assert_eq!(fragment, "<div id=\"students-toast\"></div>");
    }

    #[tokio::test]
    async fn row_links_escape_the_record_id() {
        let backend = FakeBackend::spawn().await;
        backend
            .seed_as("x/y z", &sample_course("Systems", "CS1"))
            .await;
        let screen = course_screen(&backend);
        screen.mount().await;

        let page = screen.render().into_string();
        assert!(page.contains("/courses/x%2Fy%20z/edit"));
        assert!(page.contains("/courses/x%2Fy%20z/delete"));
    }

    #[test]
    fn decisions_parse() {
        assert_eq!("confirm".parse::<DeleteDecision>().unwrap(), DeleteDecision::Confirm);
        assert_eq!("cancel".parse::<DeleteDecision>().unwrap(), DeleteDecision::Cancel);
        assert!("maybe".parse::<DeleteDecision>().is_err());
    }
}
