use checklist_mover_engine::{HiddenStore, Policy, reorder};

const DOC: &str = "weekly.md";

fn fixture(name: &str) -> String {
    std::fs::read_to_string(format!(
        "{}/tests/fixtures/{name}.md",
        env!("CARGO_MANIFEST_DIR")
    ))
    .unwrap()
}

#[test]
fn fixture_weekly_move() {
    let md = fixture("weekly");
    let mut store = HiddenStore::new();

    let result = reorder(&md, DOC, Policy::move_to_bottom(), &mut store);

    assert!(result.text.ends_with('\n'));
    insta::assert_snapshot!(result.text.trim_end(), @r"
    # Week 42

    <!-- TODO-MOVER: move -->
    - [ ] Renew passport
    - [ ] Call plumber
    - [x] Book dentist
    - [X] Pay rent

    ## Groceries
    * [ ] Eggs
    * [x] Milk
      * [x] Free range
    * [?] Bread (ask first)
    * [ ] Coffee

    <!-- TODO-MOVER: hide -->
    - [ ] Archive inbox

    Plain paragraph with - [x] inline text.
    ");
    insta::assert_debug_snapshot!(store.get(DOC), @r#"
    [
        HiddenEntry {
            index: 16,
            text: "- [x] Old project notes",
        },
    ]
    "#);
}

#[test]
fn fixture_weekly_hide() {
    let md = fixture("weekly");
    let mut store = HiddenStore::new();

    let result = reorder(&md, DOC, Policy::hide(), &mut store);

    insta::assert_snapshot!(result.text.trim_end(), @r"
    # Week 42

    <!-- TODO-MOVER: move -->
    - [ ] Renew passport
    - [ ] Call plumber
    - [x] Book dentist
    - [X] Pay rent

    ## Groceries
    * [ ] Eggs
    * [?] Bread (ask first)
    * [ ] Coffee

    <!-- TODO-MOVER: hide -->
    - [ ] Archive inbox

    Plain paragraph with - [x] inline text.
    ");
    insta::assert_debug_snapshot!(store.get(DOC), @r#"
    [
        HiddenEntry {
            index: 9,
            text: "* [x] Milk",
        },
        HiddenEntry {
            index: 11,
            text: "  * [x] Free range",
        },
        HiddenEntry {
            index: 16,
            text: "- [x] Old project notes",
        },
    ]
    "#);
}

#[test]
fn fixture_weekly_hide_then_restore() {
    let md = fixture("weekly");
    let mut store = HiddenStore::new();

    let hidden = reorder(&md, DOC, Policy::hide(), &mut store);
    let restored = reorder(&hidden.text, DOC, Policy::move_to_bottom(), &mut store);

    // Items under the hide marker stay hidden
    assert_eq!(restored.restored, 2);
    insta::assert_snapshot!(restored.text.trim_end(), @r"
    # Week 42

    <!-- TODO-MOVER: move -->
    - [ ] Renew passport
    - [ ] Call plumber
    - [x] Book dentist
    - [X] Pay rent

    ## Groceries
    * [x] Milk
    * [ ] Eggs
      * [x] Free range
    * [?] Bread (ask first)
    * [ ] Coffee

    <!-- TODO-MOVER: hide -->
    - [ ] Archive inbox

    Plain paragraph with - [x] inline text.
    ");
    insta::assert_debug_snapshot!(store.get(DOC), @r#"
    [
        HiddenEntry {
            index: 16,
            text: "- [x] Old project notes",
        },
    ]
    "#);
}

#[test]
fn fixture_weekly_is_idempotent() {
    let md = fixture("weekly");

    for policy in [Policy::move_to_bottom(), Policy::hide()] {
        let mut store = HiddenStore::new();
        let once = reorder(&md, DOC, policy, &mut store).text;
        let twice = reorder(&once, DOC, policy, &mut store).text;
        assert_eq!(twice, once, "not idempotent under {policy:?}");
    }
}
