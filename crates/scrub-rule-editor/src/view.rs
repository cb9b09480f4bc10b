//! Rule Editor View
//!
//! Drives one "new rule" or "edit rule" modal session:
//! - Form controls (rule type, tables, name) and the raw code editor
//! - The structured sub-editor for the current selection
//! - Generate, verify and save against the backend
//! - Banners and cross-component events
//!
//! The view is cheap to clone; clones share the same session. Actions may
//! run concurrently. Responses that arrive after the modal closed are
//! dropped without touching any state.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use scrub_core::{RuleBackend, RuleDraft, RuleType};
use scrub_settings::EditorSettings;
use tokio::sync::mpsc::UnboundedSender;
use uuid::Uuid;

use crate::code_editor::{CodeBuffer, CodeEditor};
use crate::error::Result;
use crate::events::RuleEditorEvent;
use crate::form::{EditorScope, RuleForm};
use crate::models::{ContainerId, EditorLayout, EditorTab, RuleSeed, ValidationError};
use crate::notifications::{Banner, NotificationPresenter};
use crate::sub_editor::{SubEditor, SubEditorArgs, SubEditorRegistry};

const GENERATE_SUCCEEDED: &str = "Code generation succeeded.";
const VERIFY_SUCCEEDED: &str = "Verification succeeded.";
const RULE_CREATED: &str = "You have successfully created a rule.";

/// Whether any backend call is outstanding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowPhase {
    Idle,
    AwaitingBackend,
}

/// What an action ended with
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The backend accepted the request and the view was updated
    Completed,
    /// The form did not validate; no request was sent
    Invalid(ValidationError),
    /// The backend rejected the request with this message
    Rejected(String),
    /// The response arrived after the modal closed and was ignored
    Discarded,
}

struct ActiveSubEditor {
    id: Uuid,
    scope: EditorScope,
    editor: Box<dyn SubEditor>,
}

struct ViewState {
    form: RuleForm,
    code_editor: Box<dyn CodeEditor>,
    sub_editor: Option<ActiveSubEditor>,
    active_tab: EditorTab,
    layout: Option<EditorLayout>,
    shown: bool,
    open: bool,
}

struct Inner {
    backend: Arc<dyn RuleBackend>,
    registry: SubEditorRegistry,
    presenter: NotificationPresenter,
    events: UnboundedSender<RuleEditorEvent>,
    settings: EditorSettings,
    container: ContainerId,
    seed: RuleSeed,
    sources: Vec<String>,
    in_flight: AtomicUsize,
    state: Mutex<ViewState>,
}

/// Configures a [`RuleEditorView`]
pub struct RuleEditorBuilder {
    backend: Arc<dyn RuleBackend>,
    events: UnboundedSender<RuleEditorEvent>,
    seed: RuleSeed,
    sources: Vec<String>,
    settings: EditorSettings,
    registry: SubEditorRegistry,
    code_editor: Option<Box<dyn CodeEditor>>,
    container: ContainerId,
}

impl RuleEditorBuilder {
    /// Rule the session edits. Defaults to an empty new rule.
    pub fn seed(mut self, seed: RuleSeed) -> Self {
        self.seed = seed;
        self
    }

    /// Tables offered by the table selectors
    pub fn sources(mut self, sources: Vec<String>) -> Self {
        self.sources = sources;
        self
    }

    pub fn settings(mut self, settings: EditorSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn registry(mut self, registry: SubEditorRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Attach a code editor widget. Defaults to a [`CodeBuffer`].
    pub fn code_editor(mut self, code_editor: Box<dyn CodeEditor>) -> Self {
        self.code_editor = Some(code_editor);
        self
    }

    /// Element the sub-editors mount into
    pub fn container(mut self, container: ContainerId) -> Self {
        self.container = container;
        self
    }

    pub fn build(self) -> RuleEditorView {
        let mut code_editor = self
            .code_editor
            .unwrap_or_else(|| Box::new(CodeBuffer::new()));
        if self.seed.rule_type.is_udf() && !self.seed.code.is_empty() {
            code_editor.set_value(&self.seed.code);
        }

        let presenter = NotificationPresenter::new(self.settings.info_dismiss_delay());
        let state = ViewState {
            form: RuleForm::from_seed(&self.seed),
            code_editor,
            sub_editor: None,
            active_tab: EditorTab::default(),
            layout: None,
            shown: false,
            open: true,
        };

        RuleEditorView {
            inner: Arc::new(Inner {
                backend: self.backend,
                registry: self.registry,
                presenter,
                events: self.events,
                settings: self.settings,
                container: self.container,
                seed: self.seed,
                sources: self.sources,
                in_flight: AtomicUsize::new(0),
                state: Mutex::new(state),
            }),
        }
    }
}

/// Decrements the in-flight counter when a backend call ends
struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn start(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Headless controller for the rule editor modal
#[derive(Clone)]
pub struct RuleEditorView {
    inner: Arc<Inner>,
}

impl RuleEditorView {
    pub fn builder(
        backend: Arc<dyn RuleBackend>,
        events: UnboundedSender<RuleEditorEvent>,
    ) -> RuleEditorBuilder {
        RuleEditorBuilder {
            backend,
            events,
            seed: RuleSeed::default(),
            sources: Vec::new(),
            settings: EditorSettings::default(),
            registry: SubEditorRegistry::with_defaults(),
            code_editor: None,
            container: ContainerId::default(),
        }
    }

    /// Handle the modal's one-time "shown" event.
    ///
    /// Lays out the body, configures the code editor and builds the first
    /// sub-editor. Later calls do nothing.
    pub fn on_shown(&self, viewport_height: u32) -> Result<()> {
        let mut state = self.inner.state.lock();
        if state.shown {
            return Ok(());
        }
        state.shown = true;

        let layout = EditorLayout::compute(viewport_height, &self.inner.settings);
        state.layout = Some(layout);
        state
            .code_editor
            .configure(self.inner.settings.font_size, self.inner.settings.mode);
        tracing::debug!(
            body_height = layout.body_height,
            code_editor_height = layout.code_editor_height,
            "rule editor shown"
        );

        self.refresh_sub_editor(&mut state)
    }

    pub fn select_rule_type(&self, rule_type: RuleType) -> Result<()> {
        let mut state = self.inner.state.lock();
        state.form.rule_type = rule_type;
        self.refresh_sub_editor(&mut state)
    }

    pub fn select_table1(&self, table: impl Into<String>) -> Result<()> {
        let mut state = self.inner.state.lock();
        state.form.table1 = table.into();
        self.refresh_sub_editor(&mut state)
    }

    pub fn select_table2(&self, table: impl Into<String>) -> Result<()> {
        let mut state = self.inner.state.lock();
        state.form.table2 = table.into();
        self.refresh_sub_editor(&mut state)
    }

    pub fn set_name(&self, name: impl Into<String>) {
        self.inner.state.lock().form.name = name.into();
    }

    /// Replace the raw code editor text, as if typed by the user
    pub fn set_code(&self, code: &str) {
        self.inner.state.lock().code_editor.set_value(code);
    }

    /// Feed text into the active sub-editor. Returns false when none is active.
    pub fn set_structured_input(&self, input: &str) -> bool {
        let mut state = self.inner.state.lock();
        match state.sub_editor.as_mut() {
            Some(active) => {
                active.editor.set_value(input);
                true
            }
            None => false,
        }
    }

    pub fn select_tab(&self, tab: EditorTab) {
        self.inner.state.lock().active_tab = tab;
    }

    /// Hide the modal. Responses still in flight are discarded.
    pub fn close(&self) {
        let was_open = std::mem::replace(&mut self.inner.state.lock().open, false);
        if was_open {
            self.publish(RuleEditorEvent::Closed);
        }
    }

    /// Validate the form into a rule without side effects
    pub fn collect(&self) -> std::result::Result<RuleDraft, ValidationError> {
        let state = self.inner.state.lock();
        state.form.collect(
            &*state.code_editor,
            state.sub_editor.as_ref().map(|active| &*active.editor),
        )
    }

    /// Generate code for the rule and load it into the code editor.
    ///
    /// An invalid form aborts without a banner.
    #[tracing::instrument(skip(self))]
    pub async fn generate(&self) -> Result<ActionOutcome> {
        let draft = match self.collect() {
            Ok(draft) => draft,
            Err(reason) => {
                tracing::debug!(%reason, "generate aborted");
                return Ok(ActionOutcome::Invalid(reason));
            }
        };

        let response = {
            let _flight = InFlight::start(&self.inner.in_flight);
            self.inner.backend.generate(&draft).await
        };

        match response {
            Ok(generated) => {
                {
                    let mut state = self.inner.state.lock();
                    if !state.open {
                        return Ok(self.discarded("generate"));
                    }
                    state.code_editor.set_value(&generated.data);
                    state.active_tab = EditorTab::Code;
                }
                self.inner.presenter.info(GENERATE_SUCCEEDED);
                Ok(ActionOutcome::Completed)
            }
            Err(failure) => self.report_failure("generate", &failure),
        }
    }

    /// Ask the backend to verify the code editor's contents
    #[tracing::instrument(skip(self))]
    pub async fn verify(&self) -> Result<ActionOutcome> {
        let mut draft = match self.collect() {
            Ok(draft) => draft,
            Err(reason) => return Ok(self.invalid(reason)),
        };

        draft.code = self.code();
        if verify_rejects(&draft.code) {
            return Ok(self.invalid(ValidationError::CodeInEditor));
        }

        let response = {
            let _flight = InFlight::start(&self.inner.in_flight);
            self.inner.backend.generate(&draft).await
        };

        match response {
            Ok(_) => {
                if !self.is_open() {
                    return Ok(self.discarded("verify"));
                }
                self.inner.presenter.info(VERIFY_SUCCEEDED);
                Ok(ActionOutcome::Completed)
            }
            Err(failure) => self.report_failure("verify", &failure),
        }
    }

    /// Persist the rule, then close the modal and ask the rule list to refresh.
    ///
    /// A save that completes after the modal closed still refreshes the list.
    #[tracing::instrument(skip(self))]
    pub async fn save(&self) -> Result<ActionOutcome> {
        let draft = match self.collect() {
            Ok(draft) => draft,
            Err(reason) => return Ok(self.invalid(reason)),
        };

        let response = {
            let _flight = InFlight::start(&self.inner.in_flight);
            self.inner.backend.create_rule(&draft).await
        };

        match response {
            Ok(()) => {
                tracing::info!(rule = %draft.name, "rule saved");
                // The rule list outlives the modal and refreshes either way.
                let was_open = std::mem::replace(&mut self.inner.state.lock().open, false);
                if was_open {
                    self.publish(RuleEditorEvent::Closed);
                }
                self.publish(RuleEditorEvent::RefreshRuleList {
                    info: RULE_CREATED.to_string(),
                });
                Ok(ActionOutcome::Completed)
            }
            Err(failure) => self.report_failure("save", &failure),
        }
    }

    pub fn phase(&self) -> WorkflowPhase {
        if self.inner.in_flight.load(Ordering::SeqCst) > 0 {
            WorkflowPhase::AwaitingBackend
        } else {
            WorkflowPhase::Idle
        }
    }

    pub fn is_open(&self) -> bool {
        self.inner.state.lock().open
    }

    pub fn is_shown(&self) -> bool {
        self.inner.state.lock().shown
    }

    pub fn active_tab(&self) -> EditorTab {
        self.inner.state.lock().active_tab
    }

    pub fn layout(&self) -> Option<EditorLayout> {
        self.inner.state.lock().layout
    }

    pub fn form(&self) -> RuleForm {
        self.inner.state.lock().form.clone()
    }

    /// Raw code editor text
    pub fn code(&self) -> String {
        self.inner.state.lock().code_editor.value()
    }

    /// Identity of the active sub-editor; changes every time it is rebuilt
    pub fn sub_editor_id(&self) -> Option<Uuid> {
        self.inner.state.lock().sub_editor.as_ref().map(|active| active.id)
    }

    pub fn sub_editor_value(&self) -> Option<String> {
        self.inner
            .state
            .lock()
            .sub_editor
            .as_ref()
            .map(|active| active.editor.value())
    }

    pub fn banner(&self) -> Option<Banner> {
        self.inner.presenter.current()
    }

    pub fn presenter(&self) -> &NotificationPresenter {
        &self.inner.presenter
    }

    pub fn sources(&self) -> &[String] {
        &self.inner.sources
    }

    pub fn seed(&self) -> &RuleSeed {
        &self.inner.seed
    }

    /// Rebuild the sub-editor if the selection it is scoped to changed
    fn refresh_sub_editor(&self, state: &mut ViewState) -> Result<()> {
        let scope = state.form.scope();
        if state
            .sub_editor
            .as_ref()
            .is_some_and(|active| active.scope == scope)
        {
            return Ok(());
        }

        state.sub_editor = None;
        let args = SubEditorArgs {
            container: self.inner.container.clone(),
            rule_type: scope.rule_type,
            table1: scope.table1.clone(),
            table2: state.form.second_table(),
            existing: self.inner.seed.clone(),
        };
        let mut editor = self.inner.registry.create(scope.rule_type, args)?;
        editor.render();

        let id = Uuid::new_v4();
        tracing::debug!(sub_editor = %id, rule_type = %scope.rule_type, table1 = %scope.table1, "sub-editor created");
        state.sub_editor = Some(ActiveSubEditor { id, scope, editor });
        Ok(())
    }

    fn invalid(&self, reason: ValidationError) -> ActionOutcome {
        self.inner.presenter.error(reason.to_string());
        ActionOutcome::Invalid(reason)
    }

    fn discarded(&self, action: &'static str) -> ActionOutcome {
        tracing::debug!(action, "response arrived after the editor closed");
        ActionOutcome::Discarded
    }

    fn report_failure(
        &self,
        action: &'static str,
        failure: &scrub_core::BackendFailure,
    ) -> Result<ActionOutcome> {
        if !self.is_open() {
            return Ok(self.discarded(action));
        }
        tracing::warn!(action, status = ?failure.status, "backend rejected rule");
        let banner = self.inner.presenter.error_from_failure(failure)?;
        Ok(ActionOutcome::Rejected(banner.message))
    }

    fn publish(&self, event: RuleEditorEvent) {
        if self.inner.events.send(event).is_err() {
            tracing::debug!("no listener for rule editor events");
        }
    }
}

/// Verify refuses to run when this returns true.
///
/// Rejects a non-empty editor, the opposite of the emptiness checks used
/// elsewhere. Kept as observed until the intended behavior is confirmed.
fn verify_rejects(code: &str) -> bool {
    !code.is_empty()
}
