//! Structured sub-editors
//!
//! Each rule type is bound to a factory producing the editor that authors
//! that type's rule body. The view creates one editor per
//! `(type, table1, table2)` selection and drops it when the selection
//! changes.

use std::collections::HashMap;
use std::sync::Arc;

use scrub_core::RuleType;

use crate::error::{Result, RuleEditorError};
use crate::models::{ContainerId, RuleSeed};

/// A structured editor for one rule type
pub trait SubEditor: Send {
    /// Draw the editor into its container
    fn render(&mut self);

    /// Rule body as currently authored
    fn value(&self) -> String;

    /// Feed raw text into the editor. Editors without a text form ignore it.
    fn set_value(&mut self, _value: &str) {}
}

/// Construction parameters handed to a [`SubEditorFactory`]
#[derive(Debug, Clone)]
pub struct SubEditorArgs {
    pub container: ContainerId,
    pub rule_type: RuleType,
    pub table1: String,
    pub table2: Option<String>,
    /// The rule the session was opened with
    pub existing: RuleSeed,
}

pub type SubEditorFactory = Arc<dyn Fn(SubEditorArgs) -> Box<dyn SubEditor> + Send + Sync>;

/// Maps rule types to sub-editor factories
#[derive(Clone)]
pub struct SubEditorRegistry {
    factories: HashMap<RuleType, SubEditorFactory>,
}

impl SubEditorRegistry {
    /// A registry with no bindings
    pub fn empty() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Every rule type bound to the [`StructuredEditor`]
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        for rule_type in RuleType::all() {
            registry.register(rule_type, StructuredEditor::boxed);
        }
        registry
    }

    /// Bind `rule_type` to `factory`, replacing any previous binding
    pub fn register<F>(&mut self, rule_type: RuleType, factory: F) -> &mut Self
    where
        F: Fn(SubEditorArgs) -> Box<dyn SubEditor> + Send + Sync + 'static,
    {
        self.factories.insert(rule_type, Arc::new(factory));
        self
    }

    pub fn contains(&self, rule_type: RuleType) -> bool {
        self.factories.contains_key(&rule_type)
    }

    pub fn create(&self, rule_type: RuleType, args: SubEditorArgs) -> Result<Box<dyn SubEditor>> {
        let factory = self
            .factories
            .get(&rule_type)
            .ok_or(RuleEditorError::UnregisteredRuleType(rule_type))?;
        Ok(factory(args))
    }
}

impl Default for SubEditorRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Built-in editor shared by all rule types.
///
/// Keeps the rule body as text scoped to the selected tables. When the
/// session edits a rule of the same type, the body starts from that rule.
#[derive(Debug, Clone)]
pub struct StructuredEditor {
    container: ContainerId,
    table1: String,
    table2: Option<String>,
    body: String,
    rendered: bool,
}

impl StructuredEditor {
    pub fn new(args: SubEditorArgs) -> Self {
        let body = if args.existing.rule_type == args.rule_type {
            args.existing.code
        } else {
            String::new()
        };

        Self {
            container: args.container,
            table1: args.table1,
            table2: args.table2,
            body,
            rendered: false,
        }
    }

    pub fn boxed(args: SubEditorArgs) -> Box<dyn SubEditor> {
        Box::new(Self::new(args))
    }

    pub fn tables(&self) -> (&str, Option<&str>) {
        (&self.table1, self.table2.as_deref())
    }

    pub fn is_rendered(&self) -> bool {
        self.rendered
    }
}

impl SubEditor for StructuredEditor {
    fn render(&mut self) {
        tracing::debug!(
            container = %self.container,
            table1 = %self.table1,
            table2 = ?self.table2,
            "rendering structured editor"
        );
        self.rendered = true;
    }

    fn value(&self) -> String {
        self.body.clone()
    }

    fn set_value(&mut self, value: &str) {
        self.body = value.to_string();
    }
}
