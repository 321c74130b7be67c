//! Checks for typed values shared by every section

use std::net::IpAddr;

use leafconf_core::diagnostics::Diagnostic;
use leafconf_core::lexical::TextSpan;
use leafconf_core::schema::TRUTHY_SYNONYMS;

use crate::codes;

/// Port numbers: decimal digits only, at most 65535
pub fn check_port(span: &TextSpan, line: usize) -> Option<Diagnostic> {
    let text = span.text.as_str();
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Some(
            Diagnostic::error(span.range(line), "Invalid port number.").with_code(codes::INVALID_PORT),
        );
    }
    match text.parse::<u32>() {
        Ok(port) if port <= u32::from(u16::MAX) => None,
        _ => Some(
            Diagnostic::error(span.range(line), "Port number must be in range 0-65535.")
                .with_code(codes::PORT_OUT_OF_RANGE),
        ),
    }
}

/// Bool-like values: only the literal `true` means true
///
/// Anything other than `true` or `false` gets a warning. The warning
/// suggests `"true"` when the value looks like an attempt to enable.
pub fn check_bool_like(span: &TextSpan, line: usize) -> Option<Diagnostic> {
    let text = span.text.as_str();
    if text == "true" || text == "false" {
        return None;
    }

    let mut message = String::from("Any value except \"true\" is treated as \"false\".");
    if TRUTHY_SYNONYMS.contains(&text.to_lowercase().as_str()) {
        message.push_str(" Do you mean \"true\"?");
    }
    Some(Diagnostic::warning(span.range(line), message).with_code(codes::NOT_A_BOOL))
}

/// Signed integers
pub fn check_integer(span: &TextSpan, line: usize) -> Option<Diagnostic> {
    if span.text.parse::<i64>().is_ok() {
        return None;
    }
    Some(Diagnostic::error(span.range(line), "Expected an integer.").with_code(codes::NOT_AN_INTEGER))
}

/// IPv4 or IPv6 addresses
pub fn check_ip(span: &TextSpan, line: usize) -> Option<Diagnostic> {
    if is_valid_ip(&span.text) {
        return None;
    }
    Some(Diagnostic::error(span.range(line), "Invalid IP address.").with_code(codes::INVALID_IP))
}

pub fn is_valid_ip(s: &str) -> bool {
    s.parse::<IpAddr>().is_ok()
}

/// `address/prefix` with a prefix no longer than the address
pub fn is_valid_cidr(s: &str) -> bool {
    let Some((addr, prefix)) = s.split_once('/') else {
        return false;
    };
    let Ok(addr) = addr.parse::<IpAddr>() else {
        return false;
    };
    if prefix.is_empty() || !prefix.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    let max = match addr {
        IpAddr::V4(_) => 32,
        IpAddr::V6(_) => 128,
    };
    prefix.parse::<u8>().is_ok_and(|p| p <= max)
}
