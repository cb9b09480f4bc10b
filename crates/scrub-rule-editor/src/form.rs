//! Form state and rule collection

use scrub_core::{RuleDraft, RuleType, second_table};

use crate::code_editor::CodeEditor;
use crate::models::{RuleSeed, ValidationError};
use crate::sub_editor::SubEditor;

/// Current values of the rule form controls
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleForm {
    pub rule_type: RuleType,
    pub table1: String,
    /// Raw selection; may equal `table1`
    pub table2: String,
    pub name: String,
}

/// The selection a sub-editor is scoped to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorScope {
    pub rule_type: RuleType,
    pub table1: String,
    pub table2: String,
}

impl RuleForm {
    pub fn from_seed(seed: &RuleSeed) -> Self {
        Self {
            rule_type: seed.rule_type,
            table1: seed.table1.clone(),
            table2: seed.table2.clone().unwrap_or_default(),
            name: seed.name.clone(),
        }
    }

    pub fn scope(&self) -> EditorScope {
        EditorScope {
            rule_type: self.rule_type,
            table1: self.table1.clone(),
            table2: self.table2.clone(),
        }
    }

    /// Second table with self-references collapsed
    pub fn second_table(&self) -> Option<String> {
        second_table(&self.table1, &self.table2)
    }

    /// Build a rule from the form.
    ///
    /// UDF bodies come from `code_editor`, every other type from the active
    /// sub-editor. Checks run in order and the first failure is returned.
    pub fn collect(
        &self,
        code_editor: &dyn CodeEditor,
        sub_editor: Option<&dyn SubEditor>,
    ) -> Result<RuleDraft, ValidationError> {
        if self.name.is_empty() {
            return Err(ValidationError::MissingName);
        }

        if self.table1.is_empty() {
            return Err(ValidationError::MissingTable);
        }

        let code = if self.rule_type.is_udf() {
            code_editor.value()
        } else {
            sub_editor.map(|editor| editor.value()).unwrap_or_default()
        };
        if code.is_empty() {
            return Err(ValidationError::MissingContent);
        }

        Ok(RuleDraft {
            name: self.name.clone(),
            rule_type: self.rule_type,
            table1: self.table1.clone(),
            table2: self.second_table(),
            code,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code_editor::CodeBuffer;
    use pretty_assertions::assert_eq;

    struct TextEditor(String);

    impl SubEditor for TextEditor {
        fn render(&mut self) {}

        fn value(&self) -> String {
            self.0.clone()
        }
    }

    fn form(rule_type: RuleType, name: &str, table1: &str, table2: &str) -> RuleForm {
        RuleForm {
            rule_type,
            table1: table1.to_string(),
            table2: table2.to_string(),
            name: name.to_string(),
        }
    }

    #[test]
    fn test_collect_self_join_collapses_table2() {
        let form = form(RuleType::Fd, "rule1", "orders", "orders");
        let sub = TextEditor("zip | city".to_string());

        let draft = form.collect(&CodeBuffer::new(), Some(&sub)).unwrap();
        assert_eq!(
            draft,
            RuleDraft {
                name: "rule1".to_string(),
                rule_type: RuleType::Fd,
                table1: "orders".to_string(),
                table2: None,
                code: "zip | city".to_string(),
            }
        );
    }

    #[test]
    fn test_collect_keeps_distinct_table2() {
        let form = form(RuleType::Er, "dedup", "A", "B");
        let sub = TextEditor("similar(name)".to_string());

        let draft = form.collect(&CodeBuffer::new(), Some(&sub)).unwrap();
        assert_eq!(draft.table2.as_deref(), Some("B"));
    }

    #[test]
    fn test_udf_reads_code_editor() {
        let form = form(RuleType::Udf, "udf1", "orders", "");
        let code = CodeBuffer::with_text("class MyRule {}");
        let sub = TextEditor("ignored".to_string());

        let draft = form.collect(&code, Some(&sub)).unwrap();
        assert_eq!(draft.code, "class MyRule {}");
    }

    #[test]
    fn test_first_failure_wins() {
        let empty = CodeBuffer::new();

        let all_empty = form(RuleType::Udf, "", "", "");
        assert_eq!(
            all_empty.collect(&empty, None),
            Err(ValidationError::MissingName)
        );

        let no_table = form(RuleType::Udf, "r", "", "");
        assert_eq!(
            no_table.collect(&empty, None),
            Err(ValidationError::MissingTable)
        );

        let no_code = form(RuleType::Udf, "r", "orders", "");
        assert_eq!(
            no_code.collect(&empty, None),
            Err(ValidationError::MissingContent)
        );
    }

    #[test]
    fn test_missing_sub_editor_reads_as_empty() {
        let form = form(RuleType::Dc, "r", "orders", "");
        assert_eq!(
            form.collect(&CodeBuffer::new(), None),
            Err(ValidationError::MissingContent)
        );
    }

    #[test]
    fn test_fails_iff_a_required_field_is_empty() {
        let names = ["", "r"];
        let tables = ["", "orders"];
        let codes = ["", "x"];

        for name in names {
            for table1 in tables {
                for code in codes {
                    let form = form(RuleType::Udf, name, table1, "");
                    let result = form.collect(&CodeBuffer::with_text(code), None);
                    let any_empty = name.is_empty() || table1.is_empty() || code.is_empty();
                    assert_eq!(result.is_err(), any_empty, "{name:?} {table1:?} {code:?}");
                }
            }
        }
    }

    #[test]
    fn test_from_seed() {
        let seed = RuleSeed {
            name: "r".to_string(),
            rule_type: RuleType::Er,
            table1: "a".to_string(),
            table2: Some("b".to_string()),
            code: String::new(),
        };
        let form = RuleForm::from_seed(&seed);
        assert_eq!(form.table2, "b");
        assert_eq!(form.second_table(), Some("b".to_string()));
    }
}
