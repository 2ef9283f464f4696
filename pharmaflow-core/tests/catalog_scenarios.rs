//! End-to-end checks over the built-in catalog: load it, look processes
//! up, and run the aggregate and layout passes a front end would drive.

use pharmaflow_core::aggregate;
use pharmaflow_core::catalog::ProcessCatalog;
use pharmaflow_core::layout;

#[test]
fn builtin_catalog_has_the_expected_shape() {
    let catalog = ProcessCatalog::builtin().unwrap();

    assert_eq!(
        catalog.list_categories(),
        [
            "chemical-solid-dosage",
            "chemical-semi-solid",
            "chemical-liquid",
            "biologic",
            "herbal",
            "novel-delivery",
        ]
    );
    assert_eq!(catalog.len(), 11);
    assert_eq!(
        catalog.list_products("chemical-solid-dosage"),
        ["tablet", "capsule", "granule"]
    );

    // Every definition is stamped with its category and ends in a
    // packaging step, as the catalog is authored.
    for definition in catalog.definitions() {
        assert!(!definition.category.is_empty(), "{}", definition.name);
        assert!(!definition.steps.is_empty(), "{}", definition.name);
        let last = definition.steps.last().unwrap();
        assert!(
            last.name.contains("packaging"),
            "{} ends with '{}'",
            definition.name,
            last.name
        );
    }
}

#[test]
fn tablet_process_summarizes_as_authored() {
    let catalog = ProcessCatalog::builtin().unwrap();
    let tablet = catalog.get_process("chemical-solid-dosage", "tablet").unwrap();

    let summary = aggregate::summarize(tablet);
    assert_eq!(summary.step_count, 9);
    assert_eq!(summary.critical_parameter_count, 23);
    assert_eq!(summary.distinct_equipment_count, 10);
    assert_eq!(summary.total_duration_hours, 26.0);
}

#[test]
fn day_denominated_steps_are_normalized_to_hours() {
    let catalog = ProcessCatalog::builtin().unwrap();
    let vaccine = catalog.get_process("biologic", "vaccine").unwrap();

    // 7 d culture + 2 d purification + 3 d freeze drying, rest in hours.
    assert_eq!(aggregate::summarize(vaccine).total_duration_hours, 338.0);
}

#[test]
fn a_step_without_a_recorded_duration_contributes_nothing() {
    let catalog = ProcessCatalog::builtin().unwrap();
    let gel = catalog.get_process("chemical-semi-solid", "gel").unwrap();

    let dissolution = gel
        .steps
        .iter()
        .find(|step| step.name == "drug dissolution")
        .unwrap();
    assert!(dissolution.duration.is_none());
    assert_eq!(aggregate::summarize(gel).total_duration_hours, 12.0);
}

#[test]
fn unknown_names_come_back_empty_rather_than_failing() {
    let catalog = ProcessCatalog::builtin().unwrap();
    assert!(catalog.list_products("radiopharmaceutical").is_empty());
    assert!(catalog.get_process("biologic", "gene-therapy").is_none());
}

#[test]
fn category_grouping_matches_the_authored_step_counts() {
    let catalog = ProcessCatalog::builtin().unwrap();
    let stats = aggregate::group_by_category(catalog.definitions());
    assert_eq!(stats.len(), 6);

    let solids = &stats["chemical-solid-dosage"];
    assert_eq!(solids.product_count, 3);
    assert_eq!(solids.mean_step_count, 23.0 / 3.0);
    assert_eq!(solids.min_step_count, 7);
    assert_eq!(solids.max_step_count, 9);

    let biologics = &stats["biologic"];
    assert_eq!(biologics.product_count, 2);
    assert_eq!(biologics.min_step_count, 10);
    assert_eq!(biologics.max_step_count, 12);
}

#[test]
fn comparing_the_whole_catalog_truncates_to_the_cap() {
    let catalog = ProcessCatalog::builtin().unwrap();
    let comparison = aggregate::compare(catalog.definitions());

    assert!(comparison.truncated);
    assert_eq!(comparison.rows.len(), aggregate::MAX_COMPARISON_PRODUCTS);
    assert_eq!(comparison.rows[0].product, "tablet");
}

#[test]
fn comparing_a_small_selection_keeps_every_row() {
    let catalog = ProcessCatalog::builtin().unwrap();
    let tablet = catalog.get_process("chemical-solid-dosage", "tablet").unwrap();
    let vaccine = catalog.get_process("biologic", "vaccine").unwrap();

    let comparison = aggregate::compare([tablet, vaccine]);
    assert!(!comparison.truncated);
    assert_eq!(comparison.rows.len(), 2);
    assert_eq!(comparison.rows[1].category, "biologic");
}

#[test]
fn tablet_flow_layout_spans_the_canvas() {
    let catalog = ProcessCatalog::builtin().unwrap();
    let tablet = catalog.get_process("chemical-solid-dosage", "tablet").unwrap();

    let names: Vec<&str> = tablet.steps.iter().map(|step| step.name.as_str()).collect();
    let diagram = layout::layout(&names);

    assert_eq!(diagram.nodes.len(), 9);
    assert_eq!(diagram.edges.len(), 8);
    assert_eq!(diagram.nodes[0].x, 0.0);
    assert_eq!(diagram.nodes[8].x, 1.0);
    assert_eq!(diagram.nodes[0].name, "raw material inspection");
    assert_eq!(diagram.nodes[8].ordinal, 9);
}

#[test]
fn every_catalog_parameter_scores_inside_the_importance_scale() {
    let catalog = ProcessCatalog::builtin().unwrap();
    for definition in catalog.definitions() {
        for record in aggregate::parameter_profile(definition) {
            assert!(
                (2..=5).contains(&record.importance),
                "{} / {} scored {}",
                definition.name,
                record.parameter,
                record.importance
            );
        }
    }
}
