use proptest::prelude::*;

use super::*;

fn planned(lines: &[&str]) -> Vec<String> {
    plan_statements(lines)
        .unwrap()
        .into_iter()
        .map(Item::into_string)
        .collect()
}

fn constraints(lines: &[&str]) -> Vec<Constraint> {
    StatementSyntax::default().parse_all(lines).unwrap()
}

/// Every processed constraint whose two items are placed must be ordered.
fn assert_prefix_invariant(planner: &Planner, processed: &[Constraint]) {
    for c in processed {
        let Some(p) = &c.predecessor else {
            continue;
        };
        if let (Some(p_pos), Some(d_pos)) = (
            planner.position(p.as_str()),
            planner.position(c.destination.as_str()),
        ) {
            assert!(
                p_pos < d_pos,
                "{c} violated: {} at {p_pos}, {} at {d_pos}",
                p,
                c.destination
            );
        }
    }
}

#[test]
fn travel_plan() {
    let lines = ["x => z", "y => z", "z => v", "h =>", "v => h"];
    let itinerary = plan_statements(lines).unwrap();
    insta::assert_snapshot!(itinerary, @"[h, v, z, y, x]");
    itinerary.verify(&constraints(&lines)).unwrap();
}

#[test]
fn invariant_holds_after_every_insertion() {
    let source = constraints(&[
        "x => z", "y => z", "z => v", "h =>", "v => h", "w =>", "u => w", "t => x",
    ]);
    let mut planner = Planner::new();
    for (i, c) in source.iter().enumerate() {
        planner.insert(c.clone()).unwrap();
        assert_prefix_invariant(&planner, &source[..=i]);
    }
    let itinerary = planner.finish().unwrap();
    assert_eq!(itinerary.len(), source.len());
    itinerary.verify(&source).unwrap();
}

#[test]
fn single_standalone_item() {
    assert_eq!(planned(&["a =>"]), ["a"]);
}

#[test]
fn empty_input() {
    let itinerary = plan_statements(Vec::<String>::new()).unwrap();
    assert!(itinerary.is_empty());
}

#[test]
fn self_dependency() {
    assert_eq!(
        plan_statements(["a => a"]),
        Err(PlanError::SelfDependency { item: "a".into() })
    );
    insta::assert_snapshot!(
        plan_statements(["b =>", " a=>a "]).unwrap_err(),
        @"The travel destination and the predecessor are the same for a"
    );
}

#[test]
fn duplicate_destination() {
    assert_eq!(
        plan_statements(["a => b", "a => c"]),
        Err(PlanError::DuplicateDestination { item: "a".into() })
    );
    assert_eq!(
        plan_statements(["a =>", "a =>"]),
        Err(PlanError::DuplicateDestination { item: "a".into() })
    );
    insta::assert_snapshot!(
        plan_statements(["b =>", "a => b", "a =>"]).unwrap_err(),
        @"Destination a is duplicated in the input"
    );
}

#[test]
fn repeated_predecessor_is_fine() {
    assert_eq!(planned(&["a => c", "b => c", "c =>"]), ["c", "b", "a"]);
}

#[test]
fn direct_cycle() {
    let err = plan_statements(["a => b", "b => a"]).unwrap_err();
    assert_eq!(
        err,
        PlanError::Cycle {
            destination: "b".into(),
            predecessor: "a".into(),
        }
    );
    insta::assert_snapshot!(err, @"Circle in the plan: a is already placed after b");
}

#[test]
fn transitive_cycle() {
    assert!(matches!(
        plan_statements(["a => b", "b => c", "c => a"]),
        Err(PlanError::Cycle { .. })
    ));
}

#[test]
fn contradicts_established_order() {
    // d, c, b, a would satisfy all three, but b and c are already placed apart
    assert_eq!(
        plan_statements(["a => b", "c => d", "b => c"]),
        Err(PlanError::Cycle {
            destination: "b".into(),
            predecessor: "c".into(),
        })
    );
}

#[test]
fn phantom_predecessor() {
    let err = plan_statements(["a => q"]).unwrap_err();
    assert_eq!(
        err,
        PlanError::IncompleteOrdering {
            planned: 2,
            declared: 1,
            undeclared: vec!["q".into()],
        }
    );
    insta::assert_snapshot!(
        err,
        @"No valid travel can be created from the dependencies: 2 planned for 1 declared, undeclared: [q]"
    );
}

#[test]
fn malformed_line_wins_over_semantic_errors() {
    let err = plan_statements(["a => a", "nothing here"]).unwrap_err();
    assert!(matches!(err, PlanError::Statement(_)), "{err:?}");
}

#[test]
fn first_error_aborts() {
    assert_eq!(
        plan_statements(["a => b", "b => a", "a => a"]),
        Err(PlanError::Cycle {
            destination: "b".into(),
            predecessor: "a".into(),
        })
    );
}

#[test]
fn insertion_cases() {
    let mut planner = Planner::new();

    // neither placed: appended as a pair
    planner.insert(Constraint::after("b", "a")).unwrap();
    assert_eq!(planner.sequence().collect::<Vec<_>>(), ["a", "b"]);

    // destination placed: predecessor goes right before it
    planner.insert(Constraint::after("a", "p")).unwrap();
    assert_eq!(planner.sequence().collect::<Vec<_>>(), ["p", "a", "b"]);

    // predecessor placed: destination goes right after it
    planner.insert(Constraint::after("c", "p")).unwrap();
    assert_eq!(planner.sequence().collect::<Vec<_>>(), ["p", "c", "a", "b"]);

    // both placed, in the opposite order
    assert!(matches!(
        planner.insert(Constraint::after("p", "c")),
        Err(PlanError::Cycle { .. })
    ));
}

#[test]
fn satisfied_pair_leaves_sequence_alone() {
    let mut planner = Planner::new();
    planner.insert(Constraint::after("x", "a")).unwrap();
    planner.insert(Constraint::after("c", "b")).unwrap();
    let before: Vec<Item> = planner.sequence().cloned().collect();
    assert_eq!(before, ["a", "x", "b", "c"]);

    // both placed, predecessor already earlier
    planner.insert(Constraint::after("b", "a")).unwrap();
    let after: Vec<Item> = planner.sequence().cloned().collect();
    similar_asserts::assert_eq!(before, after);
    assert!(!planner.is_unanchored("a"));
    assert!(!planner.is_unanchored("b"));

    planner.insert(Constraint::standalone("a")).unwrap();
    assert_eq!(planner.finish().unwrap().to_string(), "[a, x, b, c]");
    assert_eq!(
        planned(&["x => a", "c => b", "b => a", "a =>"]),
        ["a", "x", "b", "c"]
    );
}

#[test]
fn blank_names_from_hand_built_constraints() {
    let blank = Constraint {
        destination: Item::new("a"),
        predecessor: Some(Item::new("  ")),
    };
    assert_eq!(plan([blank]).unwrap().to_string(), "[a]");

    assert_eq!(
        plan([Constraint::standalone("   ")]),
        Err(PlanError::UnnamedDestination)
    );
    assert_eq!(
        plan([Constraint::after("", "a"), Constraint::standalone("a")]),
        Err(PlanError::UnnamedDestination)
    );
}

#[test]
fn standalone_item_already_placed() {
    let mut planner = Planner::new();
    planner.insert(Constraint::after("b", "a")).unwrap();
    planner.insert(Constraint::after("c", "b")).unwrap();
    planner.insert(Constraint::standalone("a")).unwrap();
    assert_eq!(planner.sequence().collect::<Vec<_>>(), ["a", "b", "c"]);
    assert_eq!(planner.finish().unwrap().to_string(), "[a, b, c]");
}

#[test]
fn unanchored_bookkeeping() {
    let mut planner = Planner::new();
    planner.insert(Constraint::standalone("h")).unwrap();
    planner.insert(Constraint::standalone("k")).unwrap();
    assert!(planner.is_unanchored("h"));
    assert!(planner.is_declared("h"));
    assert_eq!(planner.position("h"), None);

    planner.insert(Constraint::after("v", "h")).unwrap();
    assert!(!planner.is_unanchored("h"));
    assert!(planner.is_unanchored("k"));
    assert_eq!(planner.position("h"), Some(0));
    assert_eq!(planner.n_declared(), 3);

    // already placed, so it does not become unanchored
    planner.insert(Constraint::after("x", "w")).unwrap();
    planner.insert(Constraint::standalone("w")).unwrap();
    assert!(!planner.is_unanchored("w"));

    assert_eq!(planner.finish().unwrap().to_string(), "[h, v, w, x, k]");
}

#[test]
fn unanchored_items_keep_first_seen_order() {
    assert_eq!(planned(&["c =>", "a =>", "b =>"]), ["c", "a", "b"]);
    assert_eq!(planned(&["c =>", "a =>", "b => a"]), ["a", "b", "c"]);
}

#[test]
fn declared_predecessor_after_use() {
    assert_eq!(planned(&["b => a", "a =>"]), ["a", "b"]);
}

#[test]
fn custom_separator() {
    let syntax = StatementSyntax::new("<-").unwrap();
    let itinerary = syntax.plan(["b <- a", "a <-"]).unwrap();
    assert_eq!(itinerary.to_string(), "[a, b]");
}

#[test]
fn plan_is_deterministic() {
    let lines = ["e =>", "x => z", "y => z", "z => v", "h =>", "v => h", "d =>"];
    let first = plan_statements(lines).unwrap();
    for _ in 0..10 {
        similar_asserts::assert_eq!(plan_statements(lines).unwrap(), first);
    }
}

/// Item `i` is declared after all its candidate predecessors `j < i`, so no
/// insertion ever has to compare two placed items.
fn forward_chain() -> impl Strategy<Value = Vec<Constraint>> {
    prop::collection::vec(any::<prop::sample::Index>(), 1..40).prop_flat_map(|picks| {
        let n = picks.len();
        prop::collection::vec(any::<bool>(), n).prop_map(move |anchored| {
            picks
                .iter()
                .zip(anchored)
                .enumerate()
                .map(|(i, (pick, anchored))| {
                    let destination = format!("n{i}");
                    if i > 0 && anchored {
                        Constraint::after(destination, format!("n{}", pick.index(i)))
                    } else {
                        Constraint::standalone(destination)
                    }
                })
                .collect()
        })
    })
}

fn arbitrary_statements() -> impl Strategy<Value = Vec<Constraint>> {
    prop::collection::vec(
        (0..8usize, prop::option::of(0..8usize)).prop_map(|(d, p)| {
            Constraint::new(format!("i{d}"), p.map(|p| format!("i{p}")))
        }),
        0..12,
    )
}

proptest! {
    #[test]
    fn forward_chains_always_plan(source in forward_chain()) {
        let itinerary = plan(source.clone()).unwrap();
        prop_assert_eq!(itinerary.len(), source.len());
        prop_assert!(itinerary.verify(&source).is_ok());
    }

    #[test]
    fn produced_itineraries_verify(source in arbitrary_statements()) {
        if let Ok(itinerary) = plan(source.clone()) {
            prop_assert!(itinerary.verify(&source).is_ok());
            prop_assert_eq!(plan(source).unwrap(), itinerary);
        }
    }

    #[test]
    fn invariant_holds_for_every_prefix(source in arbitrary_statements()) {
        let mut planner = Planner::new();
        for (i, c) in source.iter().enumerate() {
            if planner.insert(c.clone()).is_err() {
                break;
            }
            assert_prefix_invariant(&planner, &source[..=i]);
        }
    }
}
