//! Rule Editor for Scrub
//!
//! A headless view controller for authoring data cleaning rules. Front ends
//! feed it control changes and clicks; it owns the form state, the active
//! structured sub-editor, the raw code editor and the notification banner.
//!
//! ## Features
//!
//! - Rule type selection with a pluggable sub-editor per type
//! - Single or paired table rules
//! - Code generation, verification and saving through a [`RuleBackend`]
//! - Info/error banners with timed dismissal
//!
//! ## Usage
//!
//! ```rust,ignore
//! use scrub_rule_editor::{RuleEditorView, RuleSeed};
//!
//! let (events_tx, mut events_rx) = tokio::sync::mpsc::unbounded_channel();
//! let view = RuleEditorView::builder(backend, events_tx)
//!     .seed(RuleSeed::default())
//!     .sources(vec!["orders".into(), "customers".into()])
//!     .build();
//!
//! view.on_shown(900)?;
//! view.set_name("zip_city");
//! view.select_table1("orders")?;
//! view.generate().await?;
//! ```
//!
//! [`RuleBackend`]: scrub_core::RuleBackend

pub mod code_editor;
pub mod error;
pub mod events;
pub mod form;
pub mod models;
pub mod notifications;
pub mod sub_editor;

mod view;

// Re-exports for convenience
pub use code_editor::{CodeBuffer, CodeEditor};
pub use error::{Result, RuleEditorError};
pub use events::RuleEditorEvent;
pub use form::{EditorScope, RuleForm};
pub use models::{ContainerId, EditorLayout, EditorTab, RuleSeed, ValidationError};
pub use notifications::{Banner, BannerKind, NotificationPresenter};
pub use sub_editor::{StructuredEditor, SubEditor, SubEditorArgs, SubEditorFactory, SubEditorRegistry};
pub use view::{ActionOutcome, RuleEditorBuilder, RuleEditorView, WorkflowPhase};
