use super::*;

const DOC: &str = "\
[Proxy]
Direct = direct
SS = shadowsocks, 1.2.3.4, 8388, encrypt-method=aes-256-gcm, password=x

[Proxy Group]
Auto = url-test, SS, Direct, last-resort=Direct
Pick = select, Auto, SS

[Rule]
DOMAIN, example.com, Pick
FINAL, Direct
";

fn doc() -> ConfDocument {
    ConfDocument::parse(DOC)
}

fn pos(line: usize, column: usize) -> Position {
    Position::new(line, column)
}

// ===== NAMESPACE TESTS =====

#[test]
fn test_namespace_collects_proxies_then_groups() {
    let namespace = Namespace::collect(&doc());
    assert_eq!(namespace.names(), vec!["Direct", "SS", "Auto", "Pick"]);
    assert!(namespace.contains("SS"));
    assert!(!namespace.contains("direct"));
    assert_eq!(namespace.get("Auto").map(|d| d.kind), Some(ActorKind::Group));
}

#[test]
fn test_namespace_of_empty_document() {
    let namespace = Namespace::collect(&ConfDocument::parse(""));
    assert!(namespace.is_empty());
}

// ===== NAME UNDER CURSOR TESTS =====

#[test]
fn test_name_at_proxy_declaration() {
    let site = name_at(&doc(), pos(2, 1)).unwrap();
    assert_eq!(site.name, "Direct");
    assert_eq!(site.range, Range::on_line(2, 1, 6));
    assert_eq!(site.role, NameRole::Declaration(ActorKind::Proxy));
}

#[test]
fn test_name_at_declaration_is_half_open() {
    assert!(name_at(&doc(), pos(2, 6)).is_some());
    assert!(name_at(&doc(), pos(2, 7)).is_none());
}

#[test]
fn test_name_at_group_member() {
    let site = name_at(&doc(), pos(6, 19)).unwrap();
    assert_eq!(site.name, "SS");
    assert_eq!(site.range, Range::on_line(6, 18, 2));
    assert_eq!(site.role, NameRole::GroupMember);
}

#[test]
fn test_name_at_group_type_is_not_a_name() {
    assert!(name_at(&doc(), pos(6, 9)).is_none());
}

#[test]
fn test_name_at_last_resort_value() {
    let site = name_at(&doc(), pos(6, 43)).unwrap();
    assert_eq!(site.name, "Direct");
    assert_eq!(site.range, Range::on_line(6, 42, 6));
    assert_eq!(site.role, NameRole::LastResort);
}

#[test]
fn test_name_at_last_resort_key_is_not_a_name() {
    assert!(name_at(&doc(), pos(6, 32)).is_none());
}

#[test]
fn test_name_at_rule_target() {
    let site = name_at(&doc(), pos(10, 23)).unwrap();
    assert_eq!(site.name, "Pick");
    assert_eq!(site.role, NameRole::RuleTarget);

    let site = name_at(&doc(), pos(11, 9)).unwrap();
    assert_eq!(site.name, "Direct");
    assert_eq!(site.range, Range::on_line(11, 8, 6));
}

#[test]
fn test_name_at_rule_matcher_is_not_a_name() {
    assert!(name_at(&doc(), pos(10, 10)).is_none());
    assert!(name_at(&doc(), pos(10, 2)).is_none());
}

#[test]
fn test_name_at_out_of_bounds() {
    assert!(name_at(&doc(), pos(2, 100)).is_none());
    assert!(name_at(&doc(), pos(1000, 1)).is_none());
    assert!(name_at(&doc(), pos(1, 1)).is_none());
}

const COMMENTED: &str = "\
[Proxy]
foo = direct

[Proxy Group]
g = select, foo # note

[Rule]
FINAL, foo # tail
";

/// Only a cursor on the name itself resolves
#[test]
fn test_name_at_group_member_requires_cursor_on_name() {
    let doc = ConfDocument::parse(COMMENTED);
    assert_eq!(name_at(&doc, pos(5, 14)).unwrap().name, "foo");
    assert_eq!(name_at(&doc, pos(5, 16)).unwrap().name, "foo");

    // Inside the comment, past the end of the line, between arguments
    assert!(name_at(&doc, pos(5, 19)).is_none());
    assert!(name_at(&doc, pos(5, 40)).is_none());
    assert!(name_at(&doc, pos(5, 12)).is_none());
}

#[test]
fn test_name_at_rule_target_requires_cursor_on_name() {
    let doc = ConfDocument::parse(COMMENTED);
    assert_eq!(name_at(&doc, pos(8, 9)).unwrap().role, NameRole::RuleTarget);

    assert!(name_at(&doc, pos(8, 14)).is_none());
    assert!(name_at(&doc, pos(8, 30)).is_none());
    assert!(name_at(&doc, pos(8, 7)).is_none());
}

#[test]
fn test_rename_from_comment_is_refused() {
    let doc = ConfDocument::parse(COMMENTED);
    assert_eq!(
        plan_rename(&doc, pos(8, 14), "bar"),
        Err(RenameError::NotRenameable)
    );
}

// ===== DECLARATION TESTS =====

#[test]
fn test_resolve_declaration() {
    let decl = resolve_declaration(&doc(), "Auto").unwrap();
    assert_eq!(decl.kind, ActorKind::Group);
    assert_eq!(decl.name_range(), Range::on_line(6, 1, 4));
    assert!(resolve_declaration(&doc(), "Nope").is_none());
}

#[test]
fn test_resolve_declaration_prefers_proxies() {
    let doc = ConfDocument::parse("[Proxy Group]\nX = select, Y\n[Proxy]\nX = direct");
    let decl = resolve_declaration(&doc, "X").unwrap();
    assert_eq!(decl.kind, ActorKind::Proxy);
    assert_eq!(decl.item.line, 4);
}

// ===== REFERENCE TESTS =====

#[test]
fn test_references_with_declaration() {
    let sites = resolve_references(&doc(), "Direct", true);
    let starts: Vec<(usize, usize)> = sites
        .iter()
        .map(|s| (s.range.start.line, s.range.start.column))
        .collect();
    assert_eq!(starts, vec![(2, 1), (6, 22), (6, 42), (11, 8)]);
}

#[test]
fn test_references_without_declaration() {
    let sites = resolve_references(&doc(), "Direct", false);
    assert_eq!(sites.len(), 3);
    assert!(sites
        .iter()
        .all(|s| !matches!(s.role, NameRole::Declaration(_))));
}

#[test]
fn test_references_skip_properties() {
    let doc = ConfDocument::parse("[Proxy Group]\nG = static, A, method=random\n");
    assert!(resolve_references(&doc, "random", true).is_empty());
    assert!(resolve_references(&doc, "method=random", true).is_empty());
}

#[test]
fn test_references_of_group_member() {
    let sites = resolve_references(&doc(), "SS", true);
    assert_eq!(sites.len(), 3);
}

// ===== RENAME TESTS =====

#[test]
fn test_rename_updates_every_occurrence() {
    let plan = plan_rename(&doc(), pos(2, 2), "Local").unwrap();
    assert_eq!(plan.old_name, "Direct");
    assert_eq!(plan.new_name, "Local");
    assert_eq!(plan.ranges.len(), 4);
}

#[test]
fn test_rename_from_reference_site() {
    let plan = plan_rename(&doc(), pos(7, 17), "Fastest").unwrap();
    assert_eq!(plan.old_name, "Auto");
    assert_eq!(plan.ranges.len(), 2);
}

#[test]
fn test_rename_rejects_invalid_names() {
    assert_eq!(
        plan_rename(&doc(), pos(2, 2), "a,b"),
        Err(RenameError::InvalidName("a,b".to_string()))
    );
    assert!(matches!(
        plan_rename(&doc(), pos(2, 2), "a=b"),
        Err(RenameError::InvalidName(_))
    ));
}

#[test]
fn test_rename_rejects_non_names() {
    assert_eq!(
        plan_rename(&doc(), pos(10, 3), "X"),
        Err(RenameError::NotRenameable)
    );
}
