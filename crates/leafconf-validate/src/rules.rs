//! `[Rule]` validator

use leafconf_core::diagnostics::Diagnostic;
use leafconf_core::lexical::{char_len, split_top_level_comma, strip_comment, trim_with_pos, TextSpan};
use leafconf_core::position::{Position, Range};
use leafconf_core::resolve::Namespace;
use leafconf_core::schema::{ExternalSource, Keyword, RuleType, SectionName, NETWORKS};
use leafconf_core::ConfDocument;

use crate::values::{check_port, is_valid_cidr};
use crate::{codes, Validator};

/// Validates routing rules
///
/// Rules are `TYPE, matcher, target` or `FINAL, target`. Exactly one
/// `FINAL` rule is expected and every target must be a declared proxy or
/// proxy group.
pub struct RuleValidator;

impl Validator for RuleValidator {
    fn code(&self) -> &'static str {
        "LC4"
    }

    fn name(&self) -> &'static str {
        "rules"
    }

    fn validate(&self, doc: &ConfDocument) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        let namespace = Namespace::collect(doc);
        let mut first_final: Option<Range> = None;

        for (line_no, raw) in doc.lines_of(SectionName::Rule) {
            let content = strip_comment(raw);
            let whole = trim_with_pos(content, 1);
            if whole.is_empty() {
                continue;
            }
            let args = split_top_level_comma(content, 1);

            let Some(rule_type) = RuleType::parse(&args[0].text) else {
                diagnostics.push(
                    Diagnostic::error(
                        args[0].range(line_no),
                        format!("Unknown rule type \"{}\".", args[0].text),
                    )
                    .with_code(codes::UNKNOWN_RULE_TYPE),
                );
                continue;
            };

            let found = args.len() - 1;
            if found != rule_type.arity() {
                let message = match rule_type {
                    RuleType::Final => {
                        format!("Expected 1 arguments for \"FINAL\" rules, found {}.", found)
                    }
                    _ => format!("Expected 2 arguments, found {}.", found),
                };
                let code = match rule_type {
                    RuleType::Final => codes::FINAL_ARITY,
                    _ => codes::RULE_ARITY,
                };
                diagnostics.push(Diagnostic::error(whole.range(line_no), message).with_code(code));
                continue;
            }

            if rule_type == RuleType::Final {
                let here = args[0].range(line_no);
                match first_final {
                    Some(first) => diagnostics.push(
                        Diagnostic::error(here, "Multiple \"FINAL\" rules found.")
                            .with_code(codes::MULTIPLE_FINAL)
                            .with_related(first, "First \"FINAL\" rule is here."),
                    ),
                    None => first_final = Some(here),
                }
            } else {
                check_matcher(rule_type, &args[1], line_no, &mut diagnostics);
            }

            let target = &args[rule_type.target_index()];
            if !namespace.contains(&target.text) {
                diagnostics.push(
                    Diagnostic::error(
                        target.range(line_no),
                        format!("Proxy or proxy group \"{}\" is not defined.", target.text),
                    )
                    .with_code(codes::UNDEFINED_RULE_TARGET),
                );
            }
        }

        if first_final.is_none() {
            let range = doc
                .sections_of(SectionName::Rule)
                .next()
                .map_or(Range::point(Position::new(1, 1)), |section| section.name_range());
            diagnostics.push(
                Diagnostic::warning(range, "A \"FINAL\" rule is missing.")
                    .with_code(codes::MISSING_FINAL),
            );
        }

        diagnostics
    }
}

fn check_matcher(
    rule_type: RuleType,
    matcher: &TextSpan,
    line: usize,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let range = matcher.range(line);
    match rule_type {
        RuleType::IpCidr => {
            if !is_valid_cidr(&matcher.text) {
                diagnostics
                    .push(Diagnostic::error(range, "Invalid CIDR.").with_code(codes::INVALID_CIDR));
            }
        }
        RuleType::Domain | RuleType::DomainSuffix | RuleType::DomainKeyword | RuleType::GeoIp => {
            if matcher.is_empty() {
                diagnostics.push(
                    Diagnostic::error(range, "Expected non-empty string.")
                        .with_code(codes::EMPTY_MATCHER),
                );
            }
        }
        RuleType::External => check_external(matcher, line, diagnostics),
        RuleType::PortRange => check_port_range(matcher, line, diagnostics),
        RuleType::Network => {
            if !NETWORKS.contains(&matcher.text.as_str()) {
                diagnostics.push(
                    Diagnostic::error(
                        range,
                        format!(
                            "Unknown network type \"{}\". Allowed values are \"TCP\" and \"UDP\".",
                            matcher.text
                        ),
                    )
                    .with_code(codes::UNKNOWN_NETWORK),
                );
            }
        }
        RuleType::InboundTag | RuleType::Final => {}
    }
}

/// `mmdb:<code>`, `site:<group>` or `site:<file>:<group>`
fn check_external(matcher: &TextSpan, line: usize, diagnostics: &mut Vec<Diagnostic>) {
    let range = matcher.range(line);
    let text = matcher.text.as_str();

    if text.contains(" :") || text.contains(": ") {
        diagnostics.push(
            Diagnostic::warning(
                range,
                "Spaces in external rules will not be trimmed. Please remove spaces around the colons.",
            )
            .with_code(codes::EXTERNAL_SPACES),
        );
    }

    let invalid = |message: String| Diagnostic::error(range, message).with_code(codes::INVALID_EXTERNAL);

    let parts: Vec<&str> = text.split(':').collect();
    if parts.len() < 2 {
        diagnostics.push(invalid(
            "An external rule must have at least two components, separated by colons.".to_string(),
        ));
        return;
    }

    let problem = match ExternalSource::parse(parts[0]) {
        None => Some(format!("Unknown external rule source \"{}\".", parts[0])),
        Some(ExternalSource::Mmdb) if parts.len() > 2 => {
            Some("An external MMDB rule cannot have more than two components.".to_string())
        }
        Some(ExternalSource::Mmdb) if parts[1].is_empty() => {
            Some("An external MMDB rule must have a non-empty country code.".to_string())
        }
        Some(ExternalSource::Site) if parts.len() > 3 => {
            Some("An external site rule cannot have more than three components.".to_string())
        }
        Some(ExternalSource::Site) if parts.len() == 3 && parts[1].is_empty() => {
            Some("An external site rule must have a non-empty database file name.".to_string())
        }
        Some(ExternalSource::Site) if parts.last().is_some_and(|group| group.is_empty()) => {
            Some("An external site rule must have a non-empty domain group.".to_string())
        }
        Some(_) => None,
    };
    if let Some(message) = problem {
        diagnostics.push(invalid(message));
    }
}

/// `<port>-<port>`, each half checked where it stands
fn check_port_range(matcher: &TextSpan, line: usize, diagnostics: &mut Vec<Diagnostic>) {
    let Some((low, high)) = matcher.text.split_once('-') else {
        diagnostics.push(
            Diagnostic::error(
                matcher.range(line),
                "A port range must have two components, separated by a hyphen (\"-\").",
            )
            .with_code(codes::INVALID_PORT_RANGE),
        );
        return;
    };

    let low = TextSpan::new(low, matcher.column);
    let high = TextSpan::new(high, matcher.column + char_len(&low.text) + 1);
    diagnostics.extend(check_port(&low, line));
    diagnostics.extend(check_port(&high, line));
}
