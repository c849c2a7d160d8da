//! Flattening authored scenarios into the linear sub-slide sequence.

use cicerone_core::{Presentation, Scenario, SubSlide};
use cicerone_error::{PresentationError, PresentationErrorKind};
use tracing::debug;

/// Resolve a presentation's scenario references, in presentation order.
///
/// This is the all-or-nothing missing-reference gate: if any referenced id
/// has no matching scenario the whole presentation is blocked, never played
/// partially.
///
/// # Errors
///
/// Returns [`PresentationErrorKind::MissingScenarios`] listing every
/// unresolved id.
pub fn resolve_scenarios(
    presentation: &Presentation,
    scenarios: &[Scenario],
) -> Result<Vec<Scenario>, PresentationError> {
    let mut resolved = Vec::with_capacity(presentation.scenario_ids().len());
    let mut missing = Vec::new();

    for id in presentation.scenario_ids() {
        match scenarios.iter().find(|scenario| scenario.id() == id) {
            Some(scenario) => resolved.push(scenario.clone()),
            None => missing.push(id.clone()),
        }
    }

    if !missing.is_empty() {
        return Err(PresentationError::new(
            PresentationErrorKind::MissingScenarios(missing.join(", ")),
        ));
    }

    Ok(resolved)
}

/// Flatten scenarios into the playable sub-slide sequence.
///
/// Pure and deterministic: safe to call on every render. For each scenario
/// in declared order, emits one title slide (skipped entirely for scenarios
/// with zero steps), then one overview slide per step in ascending `order`,
/// each followed by the step's designated node slides in authoring order.
pub fn flatten(scenarios: &[Scenario]) -> Vec<SubSlide> {
    let mut slides = Vec::new();

    for scenario in scenarios {
        if scenario.is_empty() {
            debug!(scenario = %scenario.id(), "Skipping scenario with no steps");
            continue;
        }

        slides.push(SubSlide::Title {
            scenario_id: scenario.id().clone(),
            scenario_name: scenario.name().clone(),
            scenario_description: scenario.description().clone(),
        });

        for step in scenario.sorted_steps() {
            slides.push(SubSlide::Overview {
                scenario_id: scenario.id().clone(),
                step_id: step.id().clone(),
            });

            for node_id in step.sub_slide_node_ids() {
                slides.push(SubSlide::Node {
                    scenario_id: scenario.id().clone(),
                    step_id: step.id().clone(),
                    node_id: node_id.clone(),
                });
            }
        }
    }

    debug!(
        scenario_count = scenarios.len(),
        slide_count = slides.len(),
        "Flattened scenarios"
    );
    slides
}

#[cfg(test)]
mod tests {
    use super::*;
    use cicerone_core::{PresentationBuilder, ScenarioBuilder, StepBuilder};

    fn step(id: &str, order: u32) -> cicerone_core::Step {
        StepBuilder::default()
            .id(id.to_string())
            .name(id.to_string())
            .order(order)
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

    #[test]
    fn flatten_is_deterministic() {
        let scenarios = vec![scenario("a", vec![step("a1", 0), step("a2", 1)])];
        assert_eq!(flatten(&scenarios), flatten(&scenarios));
    }

    #[test]
    fn empty_scenario_contributes_nothing() {
        let scenarios = vec![scenario("empty", vec![]), scenario("a", vec![step("a1", 0)])];
        let slides = flatten(&scenarios);
        assert_eq!(slides.len(), 2);
        assert_eq!(slides[0].scenario_id(), "a");
    }

    #[test]
    fn titles_and_overviews_in_declared_order() {
        let scenarios = vec![
            scenario("a", vec![step("a1", 0), step("a2", 1), step("a3", 2)]),
            scenario("b", vec![step("b1", 0), step("b2", 1)]),
        ];
        let slides = flatten(&scenarios);
        let shape: Vec<(bool, Option<&str>)> = slides
            .iter()
            .map(|slide| (slide.is_title(), slide.step_id()))
            .collect();
        assert_eq!(
            shape,
            vec![
                (true, None),
                (false, Some("a1")),
                (false, Some("a2")),
                (false, Some("a3")),
                (true, None),
                (false, Some("b1")),
                (false, Some("b2")),
            ]
        );
    }

    #[test]
    fn step_order_field_wins_over_array_position() {
        let scenarios = vec![scenario("a", vec![step("late", 5), step("early", 1)])];
        let slides = flatten(&scenarios);
        assert_eq!(slides[1].step_id(), Some("early"));
        assert_eq!(slides[2].step_id(), Some("late"));
    }

    #[test]
    fn node_slides_follow_their_overview_in_authoring_order() {
        let deep_dive = StepBuilder::default()
            .id("s1".to_string())
            .name("s1".to_string())
            .order(0u32)
            .node_ids(vec!["n1".to_string(), "n2".to_string(), "n3".to_string()])
            .sub_slide_node_ids(vec!["n3".to_string(), "n1".to_string()])
            .build()
            .unwrap();
        let slides = flatten(&[scenario("a", vec![deep_dive, step("s2", 1)])]);
        let focused: Vec<Option<&str>> =
            slides.iter().map(|slide| slide.focused_node_id()).collect();
        assert_eq!(focused, vec![None, None, Some("n3"), Some("n1"), None]);
    }

    #[test]
    fn missing_scenario_blocks_resolution_entirely() {
        let presentation = PresentationBuilder::default()
            .id("p".to_string())
            .name("p".to_string())
            .scenario_ids(vec!["a".to_string(), "ghost".to_string()])
            .build()
            .unwrap();
        let known = vec![scenario("a", vec![step("a1", 0)])];
        let err = resolve_scenarios(&presentation, &known).unwrap_err();
        assert!(format!("{err}").contains("ghost"));
    }

    #[test]
    fn resolution_preserves_presentation_order() {
        let presentation = PresentationBuilder::default()
            .id("p".to_string())
            .name("p".to_string())
            .scenario_ids(vec!["b".to_string(), "a".to_string()])
            .build()
            .unwrap();
        let known = vec![
            scenario("a", vec![step("a1", 0)]),
            scenario("b", vec![step("b1", 0)]),
        ];
        let resolved = resolve_scenarios(&presentation, &known).unwrap();
        let ids: Vec<&str> = resolved.iter().map(|s| s.id().as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }
}
