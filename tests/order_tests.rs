use dumprestore::config::{Config, default_dependencies};
use dumprestore::core::order::plan_table_order;
use dumprestore::errors::AppError;
use indexmap::IndexMap;

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_parents_come_first_regardless_of_dump_order() {
    let seen = names(&[
        "personnel_allocations",
        "personnel",
        "teams",
        "events",
        "event_divisions",
    ]);

    let order = plan_table_order(&seen, &[], &default_dependencies()).expect("no cycle");
    assert_eq!(
        order,
        names(&[
            "teams",
            "personnel",
            "events",
            "event_divisions",
            "personnel_allocations"
        ])
    );
}

#[test]
fn test_without_dependencies_first_seen_order_is_kept() {
    let seen = names(&["b", "a", "c"]);
    let order = plan_table_order(&seen, &[], &IndexMap::new()).expect("no cycle");
    assert_eq!(order, seen);
}

#[test]
fn test_declared_order_takes_priority() {
    let seen = names(&["a", "b", "c"]);
    let declared = names(&["c", "missing"]);

    let order = plan_table_order(&seen, &declared, &IndexMap::new()).expect("no cycle");
    assert_eq!(order, names(&["c", "a", "b"]));
}

#[test]
fn test_absent_dependencies_are_ignored() {
    let seen = names(&["work_records"]);
    let order = plan_table_order(&seen, &[], &default_dependencies()).expect("no cycle");
    assert_eq!(order, names(&["work_records"]));
}

#[test]
fn test_cycle_is_reported() {
    let mut deps = IndexMap::new();
    deps.insert("a".to_string(), names(&["b"]));
    deps.insert("b".to_string(), names(&["a"]));

    let err = plan_table_order(&names(&["a", "b", "c"]), &[], &deps).unwrap_err();
    match err {
        AppError::TableOrder(msg) => {
            assert!(msg.contains("a"));
            assert!(msg.contains("b"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_self_dependency_is_not_a_cycle() {
    let mut deps = IndexMap::new();
    deps.insert("a".to_string(), names(&["a"]));

    let order = plan_table_order(&names(&["a"]), &[], &deps).expect("no cycle");
    assert_eq!(order, names(&["a"]));
}

#[test]
fn test_default_config_graph_is_acyclic() {
    let cfg = Config::default();
    assert!(cfg.problems().is_empty());
}

#[test]
fn test_missing_rest_settings_are_notices_not_problems() {
    let cfg = Config::default();
    let notices = cfg.notices();

    assert_eq!(notices.len(), 2);
    assert!(notices[0].contains("backend_url is empty"));
    assert!(notices[1].contains("api_key is empty"));
    assert!(cfg.problems().is_empty());
}
