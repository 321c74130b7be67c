//! Tests for proxy and proxy group validation

use super::*;
use leafconf_core::position::Range;

fn run(text: &str) -> Vec<Diagnostic> {
    ActorValidator.validate(&ConfDocument::parse(text))
}

fn codes_of(diags: &[Diagnostic]) -> Vec<&str> {
    diags.iter().filter_map(|d| d.code.as_deref()).collect()
}

// ===== PROXY TESTS =====

#[test]
fn test_valid_proxies() {
    let diags = run("\
[Proxy]
Direct = direct, interface=en0
Reject = reject
SS = shadowsocks, 1.2.3.4, 8388, encrypt-method=aes-256-gcm, password=secret
Trojan = trojan, example.com, 443, password=pw, ws=true, ws-path=/x, amux=true, amux-max=8
Socks = socks, 127.0.0.1, 1080, username=u, password=p
");
    assert!(diags.is_empty(), "{:?}", diags);
}

#[test]
fn test_missing_password_reports_exactly_one_error() {
    let diags = run("[Proxy]\nSS = shadowsocks, 1.2.3.4, 8388, encrypt-method=aes-256-gcm\n");
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].message, "Missing key \"password\".");
    assert_eq!(diags[0].code.as_deref(), Some(codes::PROXY_MISSING_KEY));
}

#[test]
fn test_missing_equals() {
    let diags = run("[Proxy]\n  Direct direct\n");
    assert_eq!(codes_of(&diags), vec![codes::ACTOR_EXPECTED_EQUALS]);
    assert_eq!(diags[0].range, Range::on_line(2, 3, 13));
}

#[test]
fn test_empty_protocol() {
    let diags = run("[Proxy]\nA =\n");
    assert_eq!(codes_of(&diags), vec![codes::EXPECTED_PROTOCOL]);
}

#[test]
fn test_unknown_protocol_lists_alternatives() {
    let diags = run("[Proxy]\nA = http, 1.2.3.4, 80\n");
    assert_eq!(codes_of(&diags), vec![codes::UNKNOWN_PROTOCOL]);
    assert_eq!(diags[0].range, Range::on_line(2, 5, 4));
    assert!(diags[0]
        .message
        .contains("\"direct\", \"reject\", \"drop\", \"redirect\", \"socks\""));
}

#[test]
fn test_host_and_port_expected() {
    let diags = run("[Proxy]\nA = socks\n");
    assert_eq!(codes_of(&diags), vec![codes::EXPECTED_HOST, codes::EXPECTED_PORT]);

    let diags = run("[Proxy]\nA = socks, 1.2.3.4\n");
    assert_eq!(codes_of(&diags), vec![codes::EXPECTED_PORT]);
}

#[test]
fn test_port_checked_in_place() {
    let diags = run("[Proxy]\nA = socks, 1.2.3.4, 99999\n");
    assert_eq!(codes_of(&diags), vec![codes::PORT_OUT_OF_RANGE]);
    assert_eq!(diags[0].range, Range::on_line(2, 21, 5));
}

#[test]
fn test_unexpected_positional_arguments() {
    let diags = run("[Proxy]\nA = direct, 1.2.3.4\nB = socks, h, 1, extra\n");
    assert_eq!(
        codes_of(&diags),
        vec![codes::UNEXPECTED_ARGUMENT, codes::UNEXPECTED_ARGUMENT]
    );
    assert_eq!(diags[1].range, Range::on_line(3, 18, 5));
}

#[test]
fn test_key_not_allowed_for_protocol() {
    let diags = run("[Proxy]\nA = direct, password=x\n");
    assert_eq!(codes_of(&diags), vec![codes::PROXY_KEY_NOT_ALLOWED]);
    assert_eq!(
        diags[0].message,
        "Key \"password\" is not allowed in \"direct\" protocol."
    );
}

#[test]
fn test_unknown_cipher() {
    let diags = run("[Proxy]\nA = shadowsocks, h, 1, encrypt-method=rc4-md5, password=x\n");
    assert_eq!(codes_of(&diags), vec![codes::UNKNOWN_CIPHER]);
    assert!(diags[0].message.starts_with("Unknown encryption method \"rc4-md5\"."));
}

#[test]
fn test_bool_like_and_integer_properties() {
    let diags = run("[Proxy]\nA = trojan, h, 443, password=x, tls=yes, amux-max=lots\n");
    assert_eq!(codes_of(&diags), vec![codes::NOT_A_BOOL, codes::NOT_AN_INTEGER]);
    assert!(diags[0].is_warning());
}

#[test]
fn test_duplicate_proxy() {
    let diags = run("[Proxy]\nA = direct\nA = reject\n");
    assert_eq!(codes_of(&diags), vec![codes::DUPLICATE_PROXY]);
    assert_eq!(diags[0].range, Range::on_line(3, 1, 1));
    assert_eq!(diags[0].related[0].range, Range::on_line(2, 1, 1));
}

// ===== GROUP TESTS =====

#[test]
fn test_valid_groups() {
    let diags = run("\
[Proxy]
Direct = direct
Reject = reject

[Proxy Group]
Auto = failover, Direct, Reject, health-check=true, check-interval=600, last-resort=Reject
Pick = static, Auto, Direct, method=rr
Try = tryall, Pick, delay-base=0
");
    assert!(diags.is_empty(), "{:?}", diags);
}

#[test]
fn test_unresolved_actor_is_reported_at_its_column() {
    let diags = run("[Proxy]\nfoo = direct\n\n[Proxy Group]\ng = select, foo, bar\n");
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].code.as_deref(), Some(codes::UNRESOLVED_ACTOR));
    assert_eq!(diags[0].range, Range::on_line(5, 18, 3));
    assert_eq!(
        diags[0].message,
        "Cannot find actor \"bar\" as a proxy or proxy group."
    );
}

#[test]
fn test_groups_may_refer_to_later_declarations() {
    let diags = run("[Proxy Group]\nA = select, B\nB = select, C\n\n[Proxy]\nC = direct\n");
    assert!(diags.is_empty(), "{:?}", diags);
}

#[test]
fn test_removed_random_group() {
    let diags = run("[Proxy]\nD = direct\n[Proxy Group]\nG = random, D\n");
    assert_eq!(codes_of(&diags), vec![codes::REMOVED_GROUP_TYPE]);
}

#[test]
fn test_unknown_group_type() {
    let diags = run("[Proxy]\nD = direct\n[Proxy Group]\nG = balance, D\n");
    assert_eq!(codes_of(&diags), vec![codes::UNKNOWN_GROUP_TYPE]);
}

#[test]
fn test_empty_group_type() {
    let diags = run("[Proxy Group]\nG = \n");
    assert_eq!(codes_of(&diags), vec![codes::EXPECTED_GROUP_TYPE]);
}

#[test]
fn test_group_without_actors() {
    let diags = run("[Proxy Group]\nG = select\n");
    assert_eq!(codes_of(&diags), vec![codes::NO_ACTORS]);
}

#[test]
fn test_empty_actor() {
    let diags = run("[Proxy]\nD = direct\n[Proxy Group]\nG = select, D, , D\n");
    assert_eq!(codes_of(&diags), vec![codes::EMPTY_ACTOR]);
}

#[test]
fn test_url_test_failover_warning() {
    let diags = run("[Proxy]\nD = direct\n[Proxy Group]\nG = url-test, D, failover=true\n");
    assert_eq!(codes_of(&diags), vec![codes::URL_TEST_FAILOVER]);
    assert!(diags[0].is_warning());
    assert_eq!(diags[0].range, Range::on_line(4, 18, 13));
}

#[test]
fn test_unknown_method() {
    let diags = run("[Proxy]\nD = direct\n[Proxy Group]\nG = static, D, method=hash\n");
    assert_eq!(codes_of(&diags), vec![codes::UNKNOWN_METHOD]);
    assert_eq!(
        diags[0].message,
        "Unknown method \"hash\". Allowed values are \"random\", \"random-once\", \"rr\"."
    );
}

#[test]
fn test_unresolved_last_resort() {
    let diags = run("[Proxy]\nD = direct\n[Proxy Group]\nG = failover, D, last-resort=Gone\n");
    assert_eq!(codes_of(&diags), vec![codes::UNRESOLVED_LAST_RESORT]);
}

#[test]
fn test_key_not_allowed_in_group_type() {
    let diags = run("[Proxy]\nD = direct\n[Proxy Group]\nG = select, D, method=rr\n");
    assert_eq!(codes_of(&diags), vec![codes::GROUP_KEY_NOT_ALLOWED]);
    assert_eq!(
        diags[0].message,
        "Key \"method\" is not allowed in a \"select\" group."
    );
}

// ===== NAMESPACE TESTS =====

#[test]
fn test_group_conflicting_with_proxy() {
    let diags = run("[Proxy]\nX = direct\n[Proxy Group]\nX = select, X\n");
    assert_eq!(codes_of(&diags), vec![codes::GROUP_CONFLICTS_WITH_PROXY]);
    assert_eq!(diags[0].related[0].range, Range::on_line(2, 1, 1));
}

#[test]
fn test_proxy_conflicting_with_earlier_group() {
    let diags = run("[Proxy Group]\nX = select, Y\n[Proxy]\nY = direct\nX = direct\n");
    assert_eq!(codes_of(&diags), vec![codes::PROXY_CONFLICTS_WITH_GROUP]);
    assert_eq!(diags[0].range, Range::on_line(5, 1, 1));
}

#[test]
fn test_duplicate_group() {
    let diags = run("[Proxy]\nD = direct\n[Proxy Group]\nG = select, D\nG = chain, D\n");
    assert_eq!(codes_of(&diags), vec![codes::DUPLICATE_GROUP]);
}

#[test]
fn test_ignores_other_sections() {
    assert!(run("[Rule]\nFINAL, Direct\n[Host]\nnothing here\n").is_empty());
}
