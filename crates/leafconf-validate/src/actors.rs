//! `[Proxy]` and `[Proxy Group]` validator
//!
//! Proxies and groups share one namespace, so both sections are checked
//! together. Proxy declarations are checked as they are found; group
//! declarations are checked once every name is known, because groups may
//! refer to actors declared further down.

use std::collections::{HashMap, HashSet};

use leafconf_core::diagnostics::Diagnostic;
use leafconf_core::grammar::{first_property_index, parse_key_value, KeyValue};
use leafconf_core::lexical::{strip_comment, trim_with_pos, TextSpan};
use leafconf_core::schema::{
    quoted_list, GroupProperty, GroupType, Keyword, Protocol, SectionName, ValueKind,
    AEAD_CIPHERS, GROUP_METHODS, REMOVED_RANDOM_GROUP,
};
use leafconf_core::ConfDocument;

use crate::properties::{check_properties, PropertyCodes, PropertyRules};
use crate::values::{check_bool_like, check_integer, check_port};
use crate::{codes, Validator};

const PROXY_PROPERTY_CODES: PropertyCodes = PropertyCodes {
    expected_pair: codes::PROXY_EXPECTED_PAIR,
    duplicate: codes::PROXY_DUPLICATE_KEY,
    unknown: codes::PROXY_UNKNOWN_KEY,
    not_allowed: codes::PROXY_KEY_NOT_ALLOWED,
    missing: codes::PROXY_MISSING_KEY,
};

const GROUP_PROPERTY_CODES: PropertyCodes = PropertyCodes {
    expected_pair: codes::GROUP_EXPECTED_PAIR,
    duplicate: codes::GROUP_DUPLICATE_KEY,
    unknown: codes::GROUP_UNKNOWN_KEY,
    not_allowed: codes::GROUP_KEY_NOT_ALLOWED,
    missing: codes::GROUP_MISSING_KEY,
};

/// Validates proxy and proxy group declarations
///
/// # Diagnostic Codes
///
/// - `LC201`-`LC205`: Malformed lines, duplicate and conflicting names
/// - `LC210`-`LC220`: Proxy protocol, positional arguments and properties
/// - `LC301`-`LC314`: Group type, actors and properties
pub struct ActorValidator;

impl Validator for ActorValidator {
    fn code(&self) -> &'static str {
        "LC2"
    }

    fn name(&self) -> &'static str {
        "actors"
    }

    fn validate(&self, doc: &ConfDocument) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        let mut proxies: HashMap<String, KeyValue> = HashMap::new();
        let mut groups: HashMap<String, KeyValue> = HashMap::new();
        let mut names: HashSet<String> = HashSet::new();
        let mut group_items = Vec::new();

        for section in doc.sections() {
            let kind = match section.kind() {
                Some(kind @ (SectionName::Proxy | SectionName::ProxyGroup)) => kind,
                _ => continue,
            };

            for (line_no, raw) in doc.body(section) {
                let content = trim_with_pos(strip_comment(raw), 1);
                if content.is_empty() {
                    continue;
                }
                let Some(item) = parse_key_value(&content.text, line_no, content.column) else {
                    diagnostics.push(
                        Diagnostic::error(content.range(line_no), "Expected \"=\".")
                            .with_code(codes::ACTOR_EXPECTED_EQUALS),
                    );
                    continue;
                };

                names.insert(item.key.clone());
                if kind == SectionName::Proxy {
                    diagnostics.extend(check_proxy_name(&item, &proxies, &groups));
                    proxies.entry(item.key.clone()).or_insert_with(|| item.clone());
                    check_proxy(&item, &mut diagnostics);
                } else {
                    diagnostics.extend(check_group_name(&item, &proxies, &groups));
                    groups.entry(item.key.clone()).or_insert_with(|| item.clone());
                    group_items.push(item);
                }
            }
        }

        for item in &group_items {
            check_group(item, &names, &mut diagnostics);
        }

        diagnostics
    }
}

fn check_proxy_name(
    item: &KeyValue,
    proxies: &HashMap<String, KeyValue>,
    groups: &HashMap<String, KeyValue>,
) -> Option<Diagnostic> {
    if let Some(first) = proxies.get(&item.key) {
        return Some(
            Diagnostic::error(
                item.key_range(),
                format!("Duplicate definition of proxy \"{}\".", item.key),
            )
            .with_code(codes::DUPLICATE_PROXY)
            .with_related(
                first.key_range(),
                format!("First definition of proxy \"{}\" is here.", item.key),
            ),
        );
    }
    groups.get(&item.key).map(|group| {
        Diagnostic::error(
            item.key_range(),
            format!("Proxy \"{}\" conflicts with a proxy group of the same name.", item.key),
        )
        .with_code(codes::PROXY_CONFLICTS_WITH_GROUP)
        .with_related(
            group.key_range(),
            format!("Proxy group \"{}\" is defined here.", item.key),
        )
    })
}

fn check_group_name(
    item: &KeyValue,
    proxies: &HashMap<String, KeyValue>,
    groups: &HashMap<String, KeyValue>,
) -> Option<Diagnostic> {
    if let Some(first) = groups.get(&item.key) {
        return Some(
            Diagnostic::error(
                item.key_range(),
                format!("Duplicate definition of proxy group \"{}\".", item.key),
            )
            .with_code(codes::DUPLICATE_GROUP)
            .with_related(
                first.key_range(),
                format!("First definition of proxy group \"{}\" is here.", item.key),
            ),
        );
    }
    proxies.get(&item.key).map(|proxy| {
        Diagnostic::error(
            item.key_range(),
            format!("Proxy group \"{}\" conflicts with a proxy of the same name.", item.key),
        )
        .with_code(codes::GROUP_CONFLICTS_WITH_PROXY)
        .with_related(
            proxy.key_range(),
            format!("Proxy \"{}\" is defined here.", item.key),
        )
    })
}

/// Check `name = protocol, [host, port,] key=value...`
fn check_proxy(item: &KeyValue, diagnostics: &mut Vec<Diagnostic>) {
    let args = item.value_args();
    if args[0].is_empty() {
        diagnostics.push(
            Diagnostic::error(item.value_range(), "Expected proxy protocol.")
                .with_code(codes::EXPECTED_PROTOCOL),
        );
        return;
    }

    let Some(protocol) = Protocol::parse(&args[0].text) else {
        diagnostics.push(
            Diagnostic::error(
                args[0].range(item.line),
                format!(
                    "Unknown proxy protocol \"{}\". Allowed values are \"{}\".",
                    args[0].text,
                    quoted_list(&Protocol::names())
                ),
            )
            .with_code(codes::UNKNOWN_PROTOCOL),
        );
        return;
    };

    let first_kv = first_property_index(&args);
    let not_allowed =
        |key: &str| format!("Key \"{}\" is not allowed in \"{}\" protocol.", key, protocol.as_str());
    let rules = PropertyRules {
        required: protocol.required_keys(),
        allowed: protocol.allowed_keys(),
        not_allowed: &not_allowed,
        codes: &PROXY_PROPERTY_CODES,
    };
    check_properties(
        &args[first_kv..],
        item.line,
        item.value_range(),
        &rules,
        |key, prop, _, diagnostics| {
            let value = prop.value_span();
            match key.value_kind() {
                ValueKind::Cipher if !AEAD_CIPHERS.contains(&prop.value.as_str()) => {
                    diagnostics.push(
                        Diagnostic::error(
                            prop.value_range(),
                            format!(
                                "Unknown encryption method \"{}\". Allowed values are \"{}\".",
                                prop.value,
                                quoted_list(AEAD_CIPHERS)
                            ),
                        )
                        .with_code(codes::UNKNOWN_CIPHER),
                    );
                }
                ValueKind::BoolLike => diagnostics.extend(check_bool_like(&value, prop.line)),
                ValueKind::Integer => diagnostics.extend(check_integer(&value, prop.line)),
                _ => {}
            }
        },
        diagnostics,
    );

    let positional: &[TextSpan] = args.get(1..first_kv).unwrap_or(&[]);
    let mut expected = 0;
    if protocol.requires_host() {
        expected = 2;
        if positional.first().map_or(true, TextSpan::is_empty) {
            diagnostics.push(
                Diagnostic::error(item.value_range(), "Expected host name.")
                    .with_code(codes::EXPECTED_HOST),
            );
        }
        match positional.get(1).filter(|port| !port.is_empty()) {
            Some(port) => diagnostics.extend(check_port(port, item.line)),
            None => diagnostics.push(
                Diagnostic::error(item.value_range(), "Expected port number.")
                    .with_code(codes::EXPECTED_PORT),
            ),
        }
    }
    for arg in positional.iter().skip(expected) {
        diagnostics.push(
            Diagnostic::error(arg.range(item.line), "Unexpected argument.")
                .with_code(codes::UNEXPECTED_ARGUMENT),
        );
    }
}

/// Check `name = type, actor, ..., key=value...`
fn check_group(item: &KeyValue, names: &HashSet<String>, diagnostics: &mut Vec<Diagnostic>) {
    let args = item.value_args();
    if args[0].is_empty() {
        diagnostics.push(
            Diagnostic::error(item.value_range(), "Expected proxy group type.")
                .with_code(codes::EXPECTED_GROUP_TYPE),
        );
        return;
    }

    let Some(group_type) = GroupType::parse(&args[0].text) else {
        let diag = if args[0].text == REMOVED_RANDOM_GROUP {
            Diagnostic::error(
                args[0].range(item.line),
                "Proxy group type \"random\" has been replaced by \"static\" with \"method=random\".",
            )
            .with_code(codes::REMOVED_GROUP_TYPE)
        } else {
            Diagnostic::error(
                args[0].range(item.line),
                format!(
                    "Unknown group type \"{}\". Allowed values are \"{}\".",
                    args[0].text,
                    quoted_list(&GroupType::names())
                ),
            )
            .with_code(codes::UNKNOWN_GROUP_TYPE)
        };
        diagnostics.push(diag);
        return;
    };

    let first_kv = first_property_index(&args);
    let not_allowed =
        |key: &str| format!("Key \"{}\" is not allowed in a \"{}\" group.", key, group_type.as_str());
    let rules = PropertyRules {
        required: group_type.required_keys(),
        allowed: group_type.allowed_keys(),
        not_allowed: &not_allowed,
        codes: &GROUP_PROPERTY_CODES,
    };
    check_properties(
        &args[first_kv..],
        item.line,
        item.value_range(),
        &rules,
        |key, prop, arg, diagnostics| {
            if key == GroupProperty::Failover && group_type == GroupType::UrlTest {
                diagnostics.push(
                    Diagnostic::warning(
                        arg.range(prop.line),
                        "\"url-test\" means \"failover\" with \"failover=false\". \
                         Use \"failover\" as group type to customize \"failover\" option.",
                    )
                    .with_code(codes::URL_TEST_FAILOVER),
                );
            }
            let value = prop.value_span();
            match key.value_kind() {
                ValueKind::BoolLike => diagnostics.extend(check_bool_like(&value, prop.line)),
                ValueKind::Integer => diagnostics.extend(check_integer(&value, prop.line)),
                ValueKind::GroupMethod if !GROUP_METHODS.contains(&prop.value.as_str()) => {
                    diagnostics.push(
                        Diagnostic::error(
                            prop.value_range(),
                            format!(
                                "Unknown method \"{}\". Allowed values are \"{}\".",
                                prop.value,
                                quoted_list(GROUP_METHODS)
                            ),
                        )
                        .with_code(codes::UNKNOWN_METHOD),
                    );
                }
                ValueKind::Actor if !names.contains(&prop.value) => {
                    diagnostics.push(
                        Diagnostic::error(
                            prop.value_range(),
                            format!(
                                "Cannot find actor \"{}\" as a proxy or proxy group.",
                                prop.value
                            ),
                        )
                        .with_code(codes::UNRESOLVED_LAST_RESORT),
                    );
                }
                _ => {}
            }
        },
        diagnostics,
    );

    let actors: &[TextSpan] = args.get(1..first_kv).unwrap_or(&[]);
    if actors.is_empty() {
        diagnostics.push(
            Diagnostic::error(item.value_range(), "A proxy group must have at least one actor.")
                .with_code(codes::NO_ACTORS),
        );
    }
    for actor in actors {
        if actor.is_empty() {
            diagnostics.push(
                Diagnostic::error(actor.range(item.line), "Empty actor.")
                    .with_code(codes::EMPTY_ACTOR),
            );
        } else if !names.contains(&actor.text) {
            diagnostics.push(
                Diagnostic::error(
                    actor.range(item.line),
                    format!("Cannot find actor \"{}\" as a proxy or proxy group.", actor.text),
                )
                .with_code(codes::UNRESOLVED_ACTOR),
            );
        }
    }
}

#[cfg(test)]
mod tests;
