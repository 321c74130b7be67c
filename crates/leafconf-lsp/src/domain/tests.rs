//! Tests for hover documentation

use super::hover::{HoverAnalyzer, HoverInfo};
use leafconf_core::position::{Position, Range};
use leafconf_core::schema::{Keyword, Protocol};
use leafconf_core::ConfDocument;
use tower_lsp::lsp_types::{self as lsp, HoverContents};

const CONFIG: &str = "\
[General]
loglevel = info

[Proxy]
Direct = direct
ss = shadowsocks, 1.2.3.4, 8388, encrypt-method=aes-256-gcm, password=x
vm = vmess, v.example, 443, username=u, encrypt-method=chacha20-poly1305, ws=true

[Proxy Group]
Auto = failover, ss, vm, last-resort=Direct

[Rule]
DOMAIN-SUFFIX, example.com, Auto
FINAL, Direct
";

fn hover(line: usize, column: usize) -> Option<HoverInfo> {
    HoverAnalyzer::hover_at(&ConfDocument::parse(CONFIG), Position::new(line, column))
}

fn title(line: usize, column: usize) -> String {
    hover(line, column)
        .unwrap_or_else(|| panic!("no hover at {}:{}", line, column))
        .title
}

// ==================== KEYWORD HOVER TESTS ====================

#[test]
fn test_hover_setting() {
    let info = hover(2, 3).unwrap();
    assert_eq!(info.title, "(setting) loglevel");
    assert_eq!(info.range, Range::on_line(2, 1, 8));
    assert!(info.description.is_some());
}

/// A cursor directly after a word still hovers it
#[test]
fn test_hover_at_word_end() {
    assert_eq!(title(2, 9), "(setting) loglevel");
}

#[test]
fn test_hover_protocol_keyword() {
    let info = hover(7, 7).unwrap();
    assert_eq!(info.title, "(protocol) vmess");
    assert_eq!(
        info.description.as_deref(),
        Some(Protocol::Vmess.description())
    );
    assert_eq!(info.range, Range::on_line(7, 6, 5));
}

#[test]
fn test_hover_host_and_port() {
    let host = hover(6, 20).unwrap();
    assert_eq!(host.title, "(host) 1.2.3.4");
    assert_eq!(host.range, Range::on_line(6, 19, 7));

    let port = hover(6, 29).unwrap();
    assert_eq!(port.title, "(port) 8388");
    assert_eq!(port.range, Range::on_line(6, 28, 4));
}

#[test]
fn test_hover_property_key() {
    let info = hover(6, 36).unwrap();
    assert_eq!(info.title, "(property) encrypt-method");
    assert_eq!(info.range, Range::on_line(6, 34, 14));

    // Property values have no hover
    assert!(hover(6, 50).is_none());
}

#[test]
fn test_hover_group_type_and_property() {
    let info = hover(10, 9).unwrap();
    assert_eq!(info.title, "(group type) failover");
    assert_eq!(info.range, Range::on_line(10, 8, 8));

    assert_eq!(title(10, 27), "(property) last-resort");
}

#[test]
fn test_hover_rule_type() {
    let info = hover(13, 1).unwrap();
    assert_eq!(info.title, "(rule type) DOMAIN-SUFFIX");
    assert_eq!(info.range, Range::on_line(13, 1, 13));

    // Matchers have no hover
    assert!(hover(13, 17).is_none());
}

// ==================== DECLARATION SUMMARY TESTS ====================

#[test]
fn test_hover_proxy_declaration() {
    let info = hover(6, 1).unwrap();
    assert_eq!(info.title, "(proxy) ss = shadowsocks");
    assert_eq!(
        info.description.as_deref(),
        Some("- host: `1.2.3.4`\n- port: `8388`\n- encrypt-method: `aes-256-gcm`\n- password: `x`")
    );
    assert_eq!(info.range, Range::on_line(6, 1, 2));
}

#[test]
fn test_hover_group_declaration() {
    let info = hover(10, 2).unwrap();
    assert_eq!(info.title, "(proxy group) Auto = failover");
    assert_eq!(
        info.description.as_deref(),
        Some("- actors (2): `ss`, `vm`\n- last-resort: `Direct`")
    );
}

#[test]
fn test_hover_group_member_shows_declaration() {
    let info = hover(10, 22).unwrap();
    assert_eq!(info.title, "(proxy) vm = vmess");
    assert_eq!(info.range, Range::on_line(10, 22, 2));
    assert!(info
        .description
        .unwrap()
        .starts_with("- host: `v.example`\n- port: `443`"));
}

#[test]
fn test_hover_last_resort_value() {
    let info = hover(10, 40).unwrap();
    assert_eq!(info.title, "(proxy) Direct = direct");
    assert_eq!(info.description, None);
    assert_eq!(info.range, Range::on_line(10, 38, 6));
}

#[test]
fn test_hover_rule_targets() {
    let info = hover(13, 30).unwrap();
    assert_eq!(info.title, "(proxy group) Auto = failover");
    assert_eq!(info.range, Range::on_line(13, 29, 4));

    assert_eq!(title(14, 8), "(proxy) Direct = direct");
}

// ==================== NO HOVER TESTS ====================

#[test]
fn test_no_hover_for_unresolved_reference() {
    let doc = ConfDocument::parse("[Rule]\nFINAL, Nowhere\n");
    assert!(HoverAnalyzer::hover_at(&doc, Position::new(2, 9)).is_none());
}

#[test]
fn test_no_hover_past_line_end_or_in_comment() {
    assert!(hover(2, 40).is_none());
    assert!(hover(100, 1).is_none());

    let doc = ConfDocument::parse("[General]\nloglevel = info # note\n");
    assert!(HoverAnalyzer::hover_at(&doc, Position::new(2, 20)).is_none());
}

#[test]
fn test_no_hover_outside_sections() {
    let doc = ConfDocument::parse("loglevel = info\n[Host]\na.com = 1.1.1.1\n");
    assert!(HoverAnalyzer::hover_at(&doc, Position::new(1, 2)).is_none());
    assert!(HoverAnalyzer::hover_at(&doc, Position::new(3, 2)).is_none());
}

// ==================== LSP CONVERSION TESTS ====================

#[test]
fn test_lsp_hover() {
    let hover = HoverAnalyzer::hover(CONFIG, lsp::Position::new(6, 7)).unwrap();
    let HoverContents::Markup(markup) = hover.contents else {
        panic!("expected markup");
    };
    assert!(markup.value.starts_with("```leafconf\n(protocol) vmess\n```\n\n"));
    assert_eq!(
        hover.range,
        Some(lsp::Range::new(
            lsp::Position::new(6, 5),
            lsp::Position::new(6, 10)
        ))
    );
}
