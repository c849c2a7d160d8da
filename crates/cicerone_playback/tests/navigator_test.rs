use cicerone_core::{
    BranchTargets, DiagramNodeBuilder, DiagramSnapshot, PresentationBuilder, Scenario,
    ScenarioBuilder, StepBuilder, StepMode,
};
use cicerone_playback::{Navigator, PlaybackLaunch};

fn diagram(ids: &[&str]) -> DiagramSnapshot {
    let nodes = ids
        .iter()
        .enumerate()
        .map(|(i, id)| {
            DiagramNodeBuilder::default()
                .id(id.to_string())
                .x(i as f64 * 250.0)
                .y(100.0)
                .build()
                .unwrap()
        })
        .collect();
    DiagramSnapshot::new(nodes, Vec::new())
}

fn step(id: &str, order: u32, nodes: &[&str]) -> cicerone_core::Step {
    StepBuilder::default()
        .id(id.to_string())
        .name(id.to_string())
        .order(order)
        .node_ids(nodes.iter().map(|n| n.to_string()).collect::<Vec<_>>())
        .build()
        .unwrap()
}

fn scenario(id: &str, steps: Vec<cicerone_core::Step>) -> Scenario {
    ScenarioBuilder::default()
        .id(id.to_string())
        .name(id.to_string())
        .steps(steps)
        .build()
        .unwrap()
}

fn presentation(scenario_ids: &[&str]) -> cicerone_core::Presentation {
    PresentationBuilder::default()
        .id("p".to_string())
        .name("p".to_string())
        .scenario_ids(scenario_ids.iter().map(|s| s.to_string()).collect::<Vec<_>>())
        .build()
        .unwrap()
}

fn open(
    p: &cicerone_core::Presentation,
    scenarios: &[Scenario],
    diagram: DiagramSnapshot,
) -> Navigator {
    match Navigator::open(p, scenarios, diagram).unwrap() {
        PlaybackLaunch::Ready(navigator) => navigator,
        PlaybackLaunch::Empty => panic!("expected playable presentation"),
    }
}

#[tokio::test]
async fn go_next_saturates_at_the_last_index() {
    let scenarios = vec![scenario("a", vec![step("s1", 0, &[]), step("s2", 1, &[])])];
    let navigator = open(&presentation(&["a"]), &scenarios, diagram(&[]));
    let total = navigator.view().total_sub_slides;
    assert_eq!(total, 3);

    // First go_next dismisses the title interstitial.
    navigator.go_next();
    for _ in 0..total - 1 {
        navigator.go_next();
    }
    assert_eq!(navigator.view().current_index, total - 1);
    navigator.go_next();
    assert_eq!(navigator.view().current_index, total - 1);
    navigator.close();
}

#[tokio::test]
async fn go_prev_at_index_zero_is_a_no_op() {
    let scenarios = vec![scenario("a", vec![step("s1", 0, &[])])];
    let navigator = open(&presentation(&["a"]), &scenarios, diagram(&[]));
    navigator.go_prev();
    assert_eq!(navigator.view().current_index, 0);
    navigator.close();
}

#[tokio::test]
async fn titles_are_interstitials_and_not_revisitable_backward() {
    let scenarios = vec![scenario("a", vec![step("s1", 0, &[]), step("s2", 1, &[])])];
    let navigator = open(&presentation(&["a"]), &scenarios, diagram(&[]));

    let view = navigator.view();
    assert!(view.showing_title);
    assert_eq!(view.current_index, 0);

    // Dismissal advances past the interstitial without moving the index.
    navigator.go_next();
    let view = navigator.view();
    assert!(!view.showing_title);
    assert_eq!(view.current_index, 0);

    navigator.go_next();
    navigator.go_next();
    assert_eq!(navigator.view().current_index, 2);

    // Backward motion from the first overview skips the title entirely.
    navigator.go_prev();
    assert_eq!(navigator.view().current_index, 1);
    navigator.go_prev();
    assert_eq!(navigator.view().current_index, 1);
    navigator.close();
}

#[tokio::test]
async fn go_to_index_clamps_to_bounds() {
    let scenarios = vec![scenario("a", vec![step("s1", 0, &[]), step("s2", 1, &[])])];
    let navigator = open(&presentation(&["a"]), &scenarios, diagram(&[]));
    navigator.go_to_index(999);
    assert_eq!(navigator.view().current_index, 2);
    navigator.close();
}

#[tokio::test]
async fn cumulative_steps_union_prior_highlight_sets() {
    let steps = vec![
        StepBuilder::default()
            .id("s1".to_string())
            .name("s1".to_string())
            .order(0u32)
            .mode(StepMode::Cumulative)
            .node_ids(vec!["n1".to_string()])
            .build()
            .unwrap(),
        StepBuilder::default()
            .id("s2".to_string())
            .name("s2".to_string())
            .order(1u32)
            .mode(StepMode::Cumulative)
            .node_ids(vec!["n2".to_string()])
            .build()
            .unwrap(),
    ];
    let scenarios = vec![scenario("a", steps)];
    let navigator = open(&presentation(&["a"]), &scenarios, diagram(&["n1", "n2"]));
    navigator.go_to_index(2);
    assert_eq!(navigator.view().visible_node_ids, vec!["n1", "n2"]);
    navigator.close();
}

#[tokio::test]
async fn independent_steps_show_only_their_own_nodes() {
    let scenarios = vec![scenario(
        "a",
        vec![step("s1", 0, &["n1"]), step("s2", 1, &["n2"])],
    )];
    let navigator = open(&presentation(&["a"]), &scenarios, diagram(&["n1", "n2"]));
    navigator.go_to_index(2);
    let view = navigator.view();
    assert_eq!(view.visible_node_ids, vec!["n2"]);
    let dimmed: Vec<&str> = view
        .overlay
        .iter()
        .filter(|h| !h.highlighted)
        .map(|h| h.node_id.as_str())
        .collect();
    assert_eq!(dimmed, vec!["n1"]);
    navigator.close();
}

fn branching_scenario() -> Scenario {
    ScenarioBuilder::default()
        .id("a".to_string())
        .name("a".to_string())
        .steps(vec![
            StepBuilder::default()
                .id("fork".to_string())
                .name("fork".to_string())
                .order(0u32)
                .node_ids(vec!["router".to_string()])
                .branch_targets(Some(BranchTargets::new(
                    vec!["cache".to_string(), "db".to_string()],
                    vec!["Cache hit".to_string(), "Cache miss".to_string()],
                )))
                .build()
                .unwrap(),
            StepBuilder::default()
                .id("hit".to_string())
                .name("hit".to_string())
                .order(1u32)
                .node_ids(vec!["cache".to_string()])
                .build()
                .unwrap(),
            StepBuilder::default()
                .id("miss".to_string())
                .name("miss".to_string())
                .order(2u32)
                .node_ids(vec!["db".to_string()])
                .build()
                .unwrap(),
        ])
        .build()
        .unwrap()
}

#[tokio::test]
async fn branch_point_suspends_forward_navigation() {
    let scenarios = vec![branching_scenario()];
    let navigator = open(
        &presentation(&["a"]),
        &scenarios,
        diagram(&["router", "cache", "db"]),
    );
    navigator.go_next(); // dismiss title
    navigator.go_next(); // fork overview, last slide of a decision step
    let view = navigator.view();
    assert_eq!(view.current_index, 1);
    let branch = view.current_branch_point.expect("branch point pending");
    assert_eq!(branch.target_labels()[0], "Cache hit");

    // Forward motion is suspended until a branch is chosen.
    navigator.go_next();
    assert_eq!(navigator.view().current_index, 1);

    navigator.select_branch("db");
    let view = navigator.view();
    assert!(view.current_branch_point.is_none());
    assert_eq!(view.active_step_id.as_deref(), Some("miss"));
    navigator.close();
}

#[tokio::test]
async fn select_branch_with_unoffered_target_is_a_no_op() {
    let scenarios = vec![branching_scenario()];
    let navigator = open(
        &presentation(&["a"]),
        &scenarios,
        diagram(&["router", "cache", "db"]),
    );
    navigator.go_next();
    navigator.go_next();
    navigator.select_branch("not-a-target");
    let view = navigator.view();
    assert_eq!(view.current_index, 1);
    assert!(view.current_branch_point.is_some());
    navigator.close();
}

#[tokio::test]
async fn go_to_index_clears_a_pending_branch_point() {
    let scenarios = vec![branching_scenario()];
    let navigator = open(
        &presentation(&["a"]),
        &scenarios,
        diagram(&["router", "cache", "db"]),
    );
    navigator.go_next();
    navigator.go_next();
    assert!(navigator.view().current_branch_point.is_some());
    navigator.go_to_index(3);
    let view = navigator.view();
    assert!(view.current_branch_point.is_none());
    assert_eq!(view.current_index, 3);
    navigator.close();
}

#[tokio::test]
async fn missing_scenario_reference_blocks_playback_entirely() {
    let scenarios = vec![scenario("a", vec![step("s1", 0, &[])])];
    let result = Navigator::open(&presentation(&["a", "ghost"]), &scenarios, diagram(&[]));
    let err = result.err().expect("missing scenario must block playback");
    assert!(format!("{err}").contains("ghost"));
}

#[tokio::test]
async fn empty_presentation_is_a_distinct_state_not_an_error() {
    let scenarios = vec![scenario("a", vec![])];
    match Navigator::open(&presentation(&["a"]), &scenarios, diagram(&[])).unwrap() {
        PlaybackLaunch::Empty => {}
        PlaybackLaunch::Ready(_) => panic!("an all-empty presentation has nothing to present"),
    }
}

#[tokio::test]
async fn closed_navigator_ignores_navigation() {
    let scenarios = vec![scenario("a", vec![step("s1", 0, &[]), step("s2", 1, &[])])];
    let navigator = open(&presentation(&["a"]), &scenarios, diagram(&[]));
    navigator.go_next();
    navigator.go_next();
    navigator.close();
    navigator.go_next();
    navigator.go_prev();
    assert_eq!(navigator.view().current_index, 1);
}
