//! `[Host]` static resolution validator

use std::collections::HashMap;

use leafconf_core::diagnostics::Diagnostic;
use leafconf_core::grammar::{parse_key_value, KeyValue};
use leafconf_core::lexical::{strip_comment, trim_with_pos};
use leafconf_core::schema::SectionName;
use leafconf_core::ConfDocument;

use crate::values::check_ip;
use crate::{codes, Validator};

/// Validates `host = address, address...` entries
pub struct HostValidator;

impl Validator for HostValidator {
    fn code(&self) -> &'static str {
        "LC5"
    }

    fn name(&self) -> &'static str {
        "hosts"
    }

    fn validate(&self, doc: &ConfDocument) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        let mut seen: HashMap<String, KeyValue> = HashMap::new();

        for (line_no, raw) in doc.lines_of(SectionName::Host) {
            let content = trim_with_pos(strip_comment(raw), 1);
            if content.is_empty() {
                continue;
            }
            let Some(item) = parse_key_value(&content.text, line_no, content.column) else {
                diagnostics.push(
                    Diagnostic::error(content.range(line_no), "Expected \"=\".")
                        .with_code(codes::HOST_EXPECTED_EQUALS),
                );
                continue;
            };

            match seen.get(&item.key) {
                Some(first) => diagnostics.push(
                    Diagnostic::error(
                        item.key_range(),
                        format!("Duplicate host name \"{}\".", item.key),
                    )
                    .with_code(codes::DUPLICATE_HOST)
                    .with_related(
                        first.key_range(),
                        format!("First definition of \"{}\" is here.", item.key),
                    ),
                ),
                None => {
                    seen.insert(item.key.clone(), item.clone());
                }
            }

            for address in item.value_args() {
                diagnostics.extend(check_ip(&address, line_no));
            }
        }

        diagnostics
    }
}
