//! Integration tests for the scale-constraint group manager: group
//! construction, merging, and the invariants the range-computation stage
//! relies on. These drive the manager directly, the way the defaults pass
//! does, one link per axis in declaration order.

use std::collections::HashMap;

use axis_constraints::layout::{AxisId, AxisType, ScaleGroups};

fn id(s: &str) -> AxisId {
    AxisId::from(s)
}

fn linear_types(ids: &[&str]) -> HashMap<AxisId, AxisType> {
    ids.iter().map(|s| (id(s), AxisType::Linear)).collect()
}

/// Every axis appears in at most one group.
fn assert_partition(groups: &ScaleGroups) {
    let mut seen: Vec<&AxisId> = Vec::new();
    for group in groups.iter() {
        for axis in group.axes() {
            assert!(
                !seen.contains(&axis),
                "partition violated: axis {} appears in two groups",
                axis
            );
            seen.push(axis);
        }
    }
}

const TOLERANCE: f64 = 1e-12;

#[test]
fn test_chain_of_links_builds_one_group() {
    let mut groups = ScaleGroups::new();
    groups.link(&id("y"), &id("x"), 2.0).unwrap();
    groups.link(&id("y2"), &id("x"), 1.0).unwrap();
    groups.link(&id("x2"), &id("y"), 3.0).unwrap();

    assert_eq!(groups.len(), 1);
    assert_partition(&groups);

    let group = groups.group_of(&id("x")).unwrap();
    assert_eq!(group.factor(&id("x")), Some(1.0));
    assert_eq!(group.factor(&id("y")), Some(2.0));
    assert_eq!(group.factor(&id("y2")), Some(1.0));
    assert_eq!(group.factor(&id("x2")), Some(6.0));
}

#[test]
fn test_merging_two_grown_groups_preserves_all_ratios() {
    let mut groups = ScaleGroups::new();

    // group one: y:x at 2:1, y2:x at 1:1
    groups.link(&id("y"), &id("x"), 2.0).unwrap();
    groups.link(&id("y2"), &id("x"), 1.0).unwrap();

    // group two: y3:x2 at 5:1
    groups.link(&id("y3"), &id("x2"), 5.0).unwrap();
    assert_eq!(groups.len(), 2);

    let ratio_y_y2 = groups
        .group_of(&id("y"))
        .unwrap()
        .ratio(&id("y"), &id("y2"))
        .unwrap();
    let ratio_y3_x2 = groups
        .group_of(&id("y3"))
        .unwrap()
        .ratio(&id("y3"), &id("x2"))
        .unwrap();

    // bridge the two groups: x2 scales with y at ratio 4
    groups.link(&id("x2"), &id("y"), 4.0).unwrap();

    assert_eq!(groups.len(), 1);
    assert_partition(&groups);
    let merged = groups.group_of(&id("x")).unwrap();
    assert_eq!(merged.len(), 5);

    // ratios that held within each former group still hold
    assert!((merged.ratio(&id("y"), &id("y2")).unwrap() - ratio_y_y2).abs() < TOLERANCE);
    assert!((merged.ratio(&id("y3"), &id("x2")).unwrap() - ratio_y3_x2).abs() < TOLERANCE);

    // and the bridge itself holds: x2 = factor(y) * 4
    let expected_x2 = merged.factor(&id("y")).unwrap() * 4.0;
    assert!((merged.factor(&id("x2")).unwrap() - expected_x2).abs() < TOLERANCE);
}

#[test]
fn test_rebasing_is_idempotent_on_ratios() {
    let mut groups = ScaleGroups::new();
    groups.link(&id("y"), &id("x"), 2.0).unwrap();
    groups.link(&id("y"), &id("x2"), 7.0).unwrap();
    groups.link(&id("y"), &id("x3"), 0.25).unwrap();

    assert_eq!(groups.len(), 1);
    assert_partition(&groups);
    let group = groups.group_of(&id("y")).unwrap();

    // each rebase fixes the new target at 1 without disturbing y:x
    assert_eq!(group.factor(&id("x3")), Some(1.0));
    assert!((group.ratio(&id("y"), &id("x")).unwrap() - 2.0).abs() < TOLERANCE);
}

#[test]
fn test_ratio_one_rebase_keeps_factors() {
    let mut groups = ScaleGroups::new();
    groups.link(&id("y"), &id("x"), 2.0).unwrap();
    groups.link(&id("y"), &id("x2"), 1.0).unwrap();

    let group = groups.group_of(&id("y")).unwrap();
    assert_eq!(group.factor(&id("y")), Some(2.0));
    assert_eq!(group.factor(&id("x")), Some(1.0));
    assert_eq!(group.factor(&id("x2")), Some(1.0));
}

#[test]
fn test_link_options_never_offer_same_group_or_other_types() {
    let mut groups = ScaleGroups::new();
    groups.link(&id("y"), &id("x"), 2.0).unwrap();

    let mut types = linear_types(&["x", "y", "x2"]);
    types.insert(id("x3"), AxisType::Date);

    let counter = [id("x"), id("x2"), id("x3")];
    let options = groups.link_options(&id("y"), &counter, &types);

    // x is in y's own group, x3 is date-typed; only x2 remains
    assert_eq!(options.linkable_axes, vec![id("x2")]);
    let this_group = options.this_group.unwrap();
    assert!(this_group.contains(&id("y")));
    assert!(this_group.contains(&id("x")));
}

#[test]
fn test_invalid_ratio_never_mutates() {
    let mut groups = ScaleGroups::new();
    groups.link(&id("y"), &id("x"), 2.0).unwrap();

    assert!(groups.link(&id("y2"), &id("x"), 0.0).is_err());
    assert!(groups.link(&id("y2"), &id("x"), -3.0).is_err());
    assert!(groups.link(&id("y2"), &id("x"), f64::NAN).is_err());

    assert_eq!(groups.len(), 1);
    assert!(groups.group_of(&id("y2")).is_none());
}
