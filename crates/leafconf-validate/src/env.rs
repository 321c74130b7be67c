//! `[Env]` validator

use leafconf_core::diagnostics::Diagnostic;
use leafconf_core::grammar::parse_key_value;
use leafconf_core::lexical::{strip_comment, trim_with_pos};
use leafconf_core::schema::SectionName;
use leafconf_core::ConfDocument;

use crate::{codes, Validator};

/// Every non-blank `[Env]` line must be `NAME = value`
pub struct EnvValidator;

impl Validator for EnvValidator {
    fn code(&self) -> &'static str {
        "LC6"
    }

    fn name(&self) -> &'static str {
        "env"
    }

    fn validate(&self, doc: &ConfDocument) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        for (line_no, raw) in doc.lines_of(SectionName::Env) {
            let content = trim_with_pos(strip_comment(raw), 1);
            if content.is_empty() {
                continue;
            }
            match parse_key_value(&content.text, line_no, content.column) {
                None => diagnostics.push(
                    Diagnostic::error(content.range(line_no), "Expected \"=\".")
                        .with_code(codes::ENV_EXPECTED_EQUALS),
                ),
                Some(item) if item.key.is_empty() => diagnostics.push(
                    Diagnostic::error(content.range(line_no), "Expected a variable name.")
                        .with_code(codes::ENV_EMPTY_NAME),
                ),
                Some(_) => {}
            }
        }

        diagnostics
    }
}
