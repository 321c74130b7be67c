//! `key=value` property lists shared by proxies and proxy groups

use std::collections::HashMap;

use leafconf_core::diagnostics::Diagnostic;
use leafconf_core::grammar::{parse_property, KeyValue};
use leafconf_core::lexical::TextSpan;
use leafconf_core::position::Range;
use leafconf_core::schema::Keyword;

/// Diagnostic codes used for one family of property lists
pub struct PropertyCodes {
    pub expected_pair: &'static str,
    pub duplicate: &'static str,
    pub unknown: &'static str,
    pub not_allowed: &'static str,
    pub missing: &'static str,
}

/// Schema of the properties accepted by one protocol or group type
pub struct PropertyRules<'a, K> {
    pub required: &'a [K],
    pub allowed: &'a [K],
    /// Message for a known key that this declaration does not accept
    pub not_allowed: &'a dyn Fn(&str) -> String,
    pub codes: &'a PropertyCodes,
}

/// Check the property arguments of one declaration
///
/// `args` are the comma-separated arguments from the first one containing
/// `=`. `value_range` is where missing keys are reported. `check_value`
/// validates the value of every known key.
pub fn check_properties<K, F>(
    args: &[TextSpan],
    line: usize,
    value_range: Range,
    rules: &PropertyRules<'_, K>,
    mut check_value: F,
    diagnostics: &mut Vec<Diagnostic>,
) where
    K: Keyword,
    F: FnMut(K, &KeyValue, &TextSpan, &mut Vec<Diagnostic>),
{
    let mut seen: HashMap<String, KeyValue> = HashMap::new();

    for arg in args {
        let Some(prop) = parse_property(arg, line) else {
            diagnostics.push(
                Diagnostic::error(arg.range(line), "Expected key=value pair.")
                    .with_code(rules.codes.expected_pair),
            );
            continue;
        };

        match seen.get(&prop.key) {
            Some(first) => diagnostics.push(
                Diagnostic::error(prop.key_range(), format!("Duplicate key \"{}\".", prop.key))
                    .with_code(rules.codes.duplicate)
                    .with_related(
                        first.key_range(),
                        format!("First definition of \"{}\" is here.", prop.key),
                    ),
            ),
            None => {
                seen.insert(prop.key.clone(), prop.clone());
            }
        }

        let Some(key) = K::parse(&prop.key) else {
            diagnostics.push(
                Diagnostic::error(prop.key_range(), format!("Unknown key \"{}\".", prop.key))
                    .with_code(rules.codes.unknown),
            );
            continue;
        };

        check_value(key, &prop, arg, diagnostics);

        if !rules.required.contains(&key) && !rules.allowed.contains(&key) {
            diagnostics.push(
                Diagnostic::error(prop.key_range(), (rules.not_allowed)(&prop.key))
                    .with_code(rules.codes.not_allowed),
            );
        }
    }

    for key in rules.required {
        if !seen.contains_key(key.as_str()) {
            diagnostics.push(
                Diagnostic::error(value_range, format!("Missing key \"{}\".", key.as_str()))
                    .with_code(rules.codes.missing),
            );
        }
    }
}
