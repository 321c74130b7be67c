//! `[General]` settings validator

use std::collections::HashMap;

use leafconf_core::diagnostics::Diagnostic;
use leafconf_core::grammar::{parse_key_value, KeyValue};
use leafconf_core::lexical::{split_top_level_comma, strip_comment, trim_with_pos};
use leafconf_core::schema::{quoted_list, Keyword, SectionName, SettingKey, SettingKind, LOG_LEVELS};
use leafconf_core::ConfDocument;

use crate::values::{check_bool_like, check_integer, check_ip, check_port};
use crate::{codes, Validator};

/// Validates `[General]` settings
///
/// Every line must be `key = value` with a known key that appears once.
/// Values are checked against the domain of their key.
pub struct GeneralValidator;

impl Validator for GeneralValidator {
    fn code(&self) -> &'static str {
        "LC1"
    }

    fn name(&self) -> &'static str {
        "general"
    }

    fn validate(&self, doc: &ConfDocument) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        let mut seen: HashMap<String, KeyValue> = HashMap::new();
        // The first of always-real-ip / always-fake-ip wins
        let mut fake_ip_mode: Option<SettingKey> = None;

        for (line_no, raw) in doc.lines_of(SectionName::General) {
            let content = trim_with_pos(strip_comment(raw), 1);
            if content.is_empty() {
                continue;
            }
            let Some(item) = parse_key_value(&content.text, line_no, content.column) else {
                diagnostics.push(
                    Diagnostic::error(content.range(line_no), "Expected \"=\".")
                        .with_code(codes::GENERAL_EXPECTED_EQUALS),
                );
                continue;
            };

            match seen.get(&item.key) {
                Some(first) => diagnostics.push(
                    Diagnostic::error(
                        item.key_range(),
                        format!("Duplicate setting \"{}\".", item.key),
                    )
                    .with_code(codes::DUPLICATE_SETTING)
                    .with_related(
                        first.key_range(),
                        format!("First definition of \"{}\" is here.", item.key),
                    ),
                ),
                None => {
                    seen.insert(item.key.clone(), item.clone());
                }
            }

            let Some(key) = SettingKey::parse(&item.key) else {
                diagnostics.push(
                    Diagnostic::error(
                        item.key_range(),
                        format!("Unknown setting entry \"{}\".", item.key),
                    )
                    .with_code(codes::UNKNOWN_SETTING),
                );
                continue;
            };

            check_value(key, &item, &mut fake_ip_mode, &mut diagnostics);
        }

        diagnostics
    }
}

fn check_value(
    key: SettingKey,
    item: &KeyValue,
    fake_ip_mode: &mut Option<SettingKey>,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let value = item.value_span();
    let line = item.line;

    match key.kind() {
        SettingKind::Integer => {
            diagnostics.extend(check_integer(&value, line));
            if key != SettingKey::TunFd {
                return;
            }
            diagnostics.push(
                Diagnostic::info(
                    item.value_range(),
                    "tun-fd is only a dummy option for Leaf core to enable TUN inbound on UWP VPN Platform. \
                     \"tun = auto\" has the same effect with better semantics.",
                )
                .with_code(codes::TUN_FD_NOTE),
            );
        }
        SettingKind::Tun => {
            if item.value != "auto" {
                diagnostics.push(
                    Diagnostic::warning(
                        item.value_range(),
                        "Any value for \"tun\" except \"auto\" has no effect.",
                    )
                    .with_code(codes::TUN_NOT_AUTO),
                );
            }
        }
        SettingKind::LogLevel => {
            if !LOG_LEVELS.contains(&item.value.as_str()) {
                diagnostics.push(
                    Diagnostic::error(
                        item.value_range(),
                        format!(
                            "Invalid log level. Valid values are \"{}\".",
                            quoted_list(LOG_LEVELS)
                        ),
                    )
                    .with_code(codes::INVALID_LOG_LEVEL),
                );
            }
        }
        SettingKind::IpList => {
            for server in split_top_level_comma(&item.value, item.value_column) {
                diagnostics.extend(check_ip(&server, line));
            }
        }
        SettingKind::DomainList => match fake_ip_mode.as_ref().copied() {
            Some(first) if first != key => {
                let other = match key {
                    SettingKey::AlwaysRealIp => SettingKey::AlwaysFakeIp,
                    _ => SettingKey::AlwaysRealIp,
                };
                diagnostics.push(
                    Diagnostic::error(
                        item.full_range(),
                        format!(
                            "Cannot set \"{}\" when \"{}\" is present.",
                            key.as_str(),
                            other.as_str()
                        ),
                    )
                    .with_code(codes::FAKE_IP_CONFLICT),
                );
            }
            _ => *fake_ip_mode = Some(key),
        },
        SettingKind::BoolLike => diagnostics.extend(check_bool_like(&value, line)),
        SettingKind::Port => diagnostics.extend(check_port(&value, line)),
        SettingKind::Interface | SettingKind::Opaque => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leafconf_core::position::Range;

    fn run(body: &str) -> Vec<Diagnostic> {
        GeneralValidator.validate(&ConfDocument::parse(&format!("[General]\n{}", body)))
    }

    fn codes_of(diags: &[Diagnostic]) -> Vec<&str> {
        diags.iter().filter_map(|d| d.code.as_deref()).collect()
    }

    #[test]
    fn test_valid_settings() {
        let diags = run("\
loglevel = warn
logoutput = console
dns-server = 1.1.1.1, 8.8.8.8
interface = 127.0.0.1
port = 1087
socks-port = 1086
tun = auto
always-real-ip = *.apple.com
routing-domain-resolve = true
# comment
");
        assert!(diags.is_empty(), "{:?}", diags);
    }

    #[test]
    fn test_missing_equals() {
        let diags = run("loglevel warn");
        assert_eq!(codes_of(&diags), vec![codes::GENERAL_EXPECTED_EQUALS]);
        assert_eq!(diags[0].range, Range::on_line(2, 1, 13));
    }

    #[test]
    fn test_duplicate_setting() {
        let diags = run("port = 1\nport = 2");
        assert_eq!(codes_of(&diags), vec![codes::DUPLICATE_SETTING]);
        assert_eq!(diags[0].range, Range::on_line(3, 1, 4));
        assert_eq!(diags[0].related[0].range, Range::on_line(2, 1, 4));
    }

    #[test]
    fn test_unknown_setting() {
        let diags = run("colour = blue");
        assert_eq!(codes_of(&diags), vec![codes::UNKNOWN_SETTING]);
        assert_eq!(diags[0].message, "Unknown setting entry \"colour\".");
    }

    #[test]
    fn test_ports() {
        let diags = run("port = 70000\nhttp-port = abc\napi-port =");
        assert_eq!(
            codes_of(&diags),
            vec![codes::PORT_OUT_OF_RANGE, codes::INVALID_PORT, codes::INVALID_PORT]
        );
    }

    #[test]
    fn test_log_level() {
        let diags = run("loglevel = verbose");
        assert_eq!(codes_of(&diags), vec![codes::INVALID_LOG_LEVEL]);
        assert_eq!(
            diags[0].message,
            "Invalid log level. Valid values are \"trace\", \"debug\", \"info\", \"warn\", \"error\"."
        );
    }

    #[test]
    fn test_dns_server_entries() {
        let diags = run("dns-server = 1.1.1.1, dns.google, 8.8.8.8");
        assert_eq!(codes_of(&diags), vec![codes::INVALID_IP]);
        assert_eq!(diags[0].range, Range::on_line(2, 23, 10));
    }

    #[test]
    fn test_tun_fd_note() {
        let diags = run("tun-fd = 3");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].severity, leafconf_core::Severity::Info);

        let diags = run("tun-fd = x");
        assert_eq!(codes_of(&diags), vec![codes::NOT_AN_INTEGER, codes::TUN_FD_NOTE]);
    }

    #[test]
    fn test_tun_other_than_auto() {
        let diags = run("tun = utun3");
        assert_eq!(codes_of(&diags), vec![codes::TUN_NOT_AUTO]);
        assert!(diags[0].is_warning());
    }

    #[test]
    fn test_fake_ip_conflict_reported_on_later_setting() {
        let diags = run("always-fake-ip = a.com\nalways-real-ip = b.com");
        assert_eq!(codes_of(&diags), vec![codes::FAKE_IP_CONFLICT]);
        assert_eq!(diags[0].range.start.line, 3);
        assert_eq!(
            diags[0].message,
            "Cannot set \"always-real-ip\" when \"always-fake-ip\" is present."
        );
    }

    #[test]
    fn test_bool_like_setting() {
        let diags = run("routing-domain-resolve = yes");
        assert_eq!(codes_of(&diags), vec![codes::NOT_A_BOOL]);
        assert!(diags[0].message.contains("Do you mean \"true\"?"));
    }

    #[test]
    fn test_only_general_sections_are_checked() {
        let doc = ConfDocument::parse("[Host]\nnot a setting\n");
        assert!(GeneralValidator.validate(&doc).is_empty());
    }
}
