//! End-to-end compilation tests against the public API.

use sinkbom::logic::resolver::DI_GOOSENECK_FAUCET;
use sinkbom::logic::rules::faucet_ceiling;
use sinkbom::{
    compile, remove_basin, select_sink_model, AccessoryKind, AccessorySelection, BasinConfig,
    Catalog, Categorizer, Category, Configuration, FaucetConfig, PegboardConfig, Placement,
    SprayerConfig,
};
use tempfile::TempDir;

fn basin(type_id: &str, size_id: &str) -> BasinConfig {
    BasinConfig {
        type_id: Some(type_id.to_string()),
        size_id: Some(size_id.to_string()),
        ..BasinConfig::default()
    }
}

fn single_basin(type_id: &str) -> Configuration {
    Configuration {
        sink_model_id: Some("T2-B1".to_string()),
        width: Some(30.0),
        length: Some(48.0),
        basins: vec![basin(type_id, "24X20X8")],
        ..Configuration::default()
    }
}

fn di_gooseneck_count(config: &Configuration) -> usize {
    config
        .faucets
        .iter()
        .filter(|f| f.type_id.as_deref() == Some(DI_GOOSENECK_FAUCET))
        .count()
}

// =============================================================================
// Basic builds
// =============================================================================

#[test]
fn test_single_e_sink_build() {
    let result = compile(&single_basin("E_SINK"), &Catalog::builtin());

    assert!(result.total_items >= 2);
    assert!(!result.by_category(Category::SinkBody).is_empty());
    assert!(!result.by_category(Category::Basin).is_empty());
    assert!(result.is_complete());
}

#[test]
fn test_flattened_ids_are_unique() {
    let mut config = single_basin("E_SINK");
    config.sink_model_id = Some("T2-B3".to_string());
    config.basins = vec![
        basin("E_SINK", "24X20X8"),
        basin("E_SINK", "712.103"),
        basin("E_DRAIN", "T2-ADW-BASIN24X20X8"),
    ];

    let result = compile(&config, &Catalog::builtin());
    let mut ids: Vec<&str> = result.flattened.iter().map(|n| n.id.as_str()).collect();
    let before = ids.len();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), before);

    let overflow = result.flattened.iter().find(|n| n.id == "722.11").unwrap();
    assert_eq!(overflow.quantity, 3);
    assert_eq!(overflow.source_contexts.len(), 3);
}

fn custom_basin(width: f64, length: f64, depth: f64) -> BasinConfig {
    BasinConfig {
        type_id: Some("E_SINK".to_string()),
        size_id: Some("CUSTOM".to_string()),
        custom_width: Some(width),
        custom_length: Some(length),
        custom_depth: Some(depth),
        addon_ids: Vec::new(),
    }
}

fn assert_unique_ids(result: &sinkbom::BomResult) {
    let mut ids: Vec<&str> = result.flattened.iter().map(|n| n.id.as_str()).collect();
    ids.sort_unstable();
    let duplicates: Vec<&str> = ids
        .windows(2)
        .filter(|pair| pair[0] == pair[1])
        .map(|pair| pair[0])
        .collect();
    assert!(duplicates.is_empty(), "duplicate ids: {:?}", duplicates);
}

#[test]
fn test_flattened_ids_are_unique_with_custom_basins() {
    let mut config = single_basin("E_SINK");
    config.sink_model_id = Some("T2-B3".to_string());
    config.basins = vec![
        custom_basin(24.0, 20.0, 8.0),
        custom_basin(30.0, 20.0, 8.0),
        basin("E_SINK", "24X20X8"),
    ];

    let result = compile(&config, &Catalog::builtin());
    assert_unique_ids(&result);

    let fixed = result
        .flattened
        .iter()
        .find(|n| n.id == "T2-ADW-BASIN24X20X8")
        .unwrap();
    assert_eq!(fixed.quantity, 2);
}

#[test]
fn test_flattened_ids_are_unique_with_standalone_pegboard_parts() {
    let mut config = single_basin("E_SINK");
    config.length = Some(60.0);
    config.pegboard = PegboardConfig {
        enabled: true,
        type_id: Some("PERFORATED".to_string()),
        color_id: Some("BLUE".to_string()),
    };
    config.accessories = vec![
        AccessorySelection::new("T2-ADW-PB-6036", 1),
        AccessorySelection::new("T2-PB-COLOR-BLU", 1),
    ];

    let result = compile(&config, &Catalog::builtin());
    assert_unique_ids(&result);

    let panel = result
        .flattened
        .iter()
        .find(|n| n.id == "T2-ADW-PB-6036")
        .unwrap();
    assert_eq!(panel.quantity, 2);
    assert_eq!(panel.name, "Pegboard Panel 6036");
}

#[test]
fn test_full_build_sections() {
    let config = Configuration {
        sink_model_id: Some("T2-B2".to_string()),
        width: Some(30.0),
        length: Some(72.0),
        legs_type_id: Some("DL14".to_string()),
        feet_type_id: Some("SEISMIC_FEET".to_string()),
        pegboard: PegboardConfig {
            enabled: true,
            type_id: Some("SOLID".to_string()),
            color_id: Some("GREEN".to_string()),
        },
        drawer_item_ids: vec!["T2-OA-2D-152012-STACKED-KIT".to_string()],
        basins: vec![basin("E_SINK", "30X20X8"), basin("E_DRAIN", "30X20X8")],
        faucets: vec![FaucetConfig::new("WRIST_BLADE", Some(Placement::Center(1)))],
        sprayers: vec![SprayerConfig {
            type_id: Some("AIR_GUN".to_string()),
            location: Some("LEFT".to_string()),
        }],
        accessories: vec![
            AccessorySelection::new("703.38", 1),
            AccessorySelection::new("705.05", 2),
        ],
        ..Configuration::default()
    };

    let result = compile(&config, &Catalog::builtin());
    assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);

    let top: Vec<&str> = result.hierarchical.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(
        top,
        vec![
            "T2-B2",
            "T2-BSN-ESK-KIT",
            "T2-BSN-EDR-KIT",
            "T2-OA-STD-FAUCET-WB-KIT",
            "T2-OA-AIRGUN-TURRET-KIT",
            "T2-CTRL-EDR1-ESK1",
            "703.38",
            "705.05",
        ]
    );

    let pegboard = result
        .flattened
        .iter()
        .find(|n| n.id == "T2-ADW-PB-7236-SOLID-GRN-KIT")
        .unwrap();
    assert_eq!(
        pegboard.category,
        Some(Category::Accessory(AccessoryKind::Organization))
    );

    let lights = result.by_category(Category::Accessory(AccessoryKind::Lighting));
    assert_eq!(lights.len(), 1);
    let dispensers = result.by_category(Category::Accessory(AccessoryKind::Dispensers));
    assert_eq!(dispensers[0].quantity, 2);
}

// =============================================================================
// Mandatory DI gooseneck
// =============================================================================

#[test]
fn test_di_basin_injects_exactly_one_gooseneck() {
    let catalog = Catalog::builtin();
    let result = compile(&single_basin("E_SINK_DI"), &catalog);

    let goosenecks: Vec<_> = result
        .flattened
        .iter()
        .filter(|n| n.id == DI_GOOSENECK_FAUCET)
        .collect();
    assert_eq!(goosenecks.len(), 1);
    assert_eq!(goosenecks[0].quantity, 1);
    assert_eq!(di_gooseneck_count(&result.configuration), 1);

    // Recompiling the repaired configuration adds nothing
    let again = compile(&result.configuration, &catalog);
    assert_eq!(di_gooseneck_count(&again.configuration), 1);
    assert_eq!(again.flattened, result.flattened);
}

#[test]
fn test_user_selected_gooseneck_is_not_duplicated() {
    let mut config = single_basin("E_SINK_DI");
    config.faucets = vec![FaucetConfig::new("DI_GOOSENECK", Some(Placement::Center(1)))];

    let result = compile(&config, &Catalog::builtin());
    assert_eq!(di_gooseneck_count(&result.configuration), 1);
}

// =============================================================================
// Faucet rules
// =============================================================================

#[test]
fn test_faucet_ceiling_examples() {
    let drains = vec![BasinConfig::of_type("E_DRAIN"); 3];
    let sinks = vec![BasinConfig::of_type("E_SINK"); 3];
    assert_eq!(faucet_ceiling(&drains), 2);
    assert_eq!(faucet_ceiling(&sinks), 3);
}

#[test]
fn test_excess_faucets_are_dropped_from_compile() {
    let mut config = single_basin("E_SINK");
    config.faucets = vec![
        FaucetConfig::new("WRIST_BLADE", Some(Placement::Center(1))),
        FaucetConfig::new("PRE_RINSE", None),
        FaucetConfig::new("PRE_RINSE", None),
    ];

    let result = compile(&config, &Catalog::builtin());
    // A single E_SINK basin allows two faucets, only one of them placed
    assert_eq!(result.configuration.faucets.len(), 2);
    assert_eq!(result.configuration.faucets[0].placement, Some(Placement::Center(1)));
    assert_eq!(result.configuration.faucets[1].placement, None);
    assert!(!result.diagnostics.is_empty());
}

#[test]
fn test_remove_basin_leaves_legal_unique_placements() {
    let catalog = Catalog::builtin();
    let mut config = Configuration {
        basins: vec![BasinConfig::of_type("E_SINK"), BasinConfig::of_type("E_SINK")],
        faucets: vec![
            FaucetConfig::new("WRIST_BLADE", Some(Placement::Center(2))),
            FaucetConfig::new("WRIST_BLADE", Some(Placement::Between(1))),
        ],
        ..Configuration::default()
    };

    remove_basin(&mut config, 1);
    let result = compile(&config, &catalog);

    let placements: Vec<Placement> = result
        .configuration
        .faucets
        .iter()
        .filter_map(|f| f.placement)
        .collect();
    assert!(placements.iter().all(|p| *p == Placement::Center(1)));
    assert!(placements.len() <= 1);
}

#[test]
fn test_select_model_then_compile_reports_empty_slots() {
    let catalog = Catalog::builtin();
    let mut config = single_basin("E_SINK");
    select_sink_model(&mut config, "T2-B3", &catalog);
    assert_eq!(config.basins.len(), 3);

    let result = compile(&config, &catalog);
    let fields: Vec<&str> = result
        .missing_fields
        .iter()
        .map(|m| m.field.as_str())
        .collect();
    assert!(fields.contains(&"basins[0].typeId"));
    assert!(fields.contains(&"basins[2].sizeId"));
}

// =============================================================================
// Categorization
// =============================================================================

#[test]
fn test_category_examples() {
    let categorizer = Categorizer::from_catalog(&Catalog::builtin());
    assert_eq!(categorizer.categorize("711.97", "", None), Category::SinkBody);
    assert_eq!(
        categorizer.categorize("702.10", "", None),
        Category::Accessory(AccessoryKind::Storage)
    );
    assert_eq!(categorizer.categorize("QQ-1", "Widget", None), Category::Other);
}

// =============================================================================
// Custom basins and degraded input
// =============================================================================

#[test]
fn test_custom_basins_stay_distinct() {
    let mut config = single_basin("E_SINK");
    config.sink_model_id = Some("T2-B2".to_string());
    config.basins = vec![
        BasinConfig {
            type_id: Some("E_SINK".to_string()),
            size_id: Some("CUSTOM".to_string()),
            custom_width: Some(24.0),
            custom_length: Some(20.0),
            custom_depth: Some(8.0),
            addon_ids: Vec::new(),
        },
        BasinConfig {
            type_id: Some("E_SINK".to_string()),
            size_id: Some("CUSTOM".to_string()),
            custom_width: Some(30.5),
            custom_length: Some(20.0),
            custom_depth: Some(10.0),
            addon_ids: Vec::new(),
        },
    ];

    let result = compile(&config, &Catalog::builtin());

    // 24x20x8 is also a catalog size, so it takes the catalog name
    let sizes: Vec<(&str, &str)> = result
        .flattened
        .iter()
        .filter(|n| n.id.starts_with("T2-ADW-BASIN"))
        .map(|n| (n.id.as_str(), n.name.as_str()))
        .collect();
    assert_eq!(
        sizes,
        vec![
            ("T2-ADW-BASIN24X20X8", "Basin 24x20x8"),
            ("T2-ADW-BASIN-CUSTOM", "Custom Basin"),
            ("T2-ADW-BASIN30.5X20X10", "Custom Basin 30.5x20x10"),
        ]
    );

    let placeholder = result
        .flattened
        .iter()
        .find(|n| n.id == "T2-ADW-BASIN-CUSTOM")
        .unwrap();
    assert_eq!(placeholder.quantity, 2);
}

#[test]
fn test_empty_catalog_degrades_to_pass_through() {
    let result = compile(&single_basin("E_SINK"), &Catalog::empty());

    assert!(result.total_items > 0);
    assert!(!result.diagnostics.is_empty());
    assert!(result.flattened.iter().all(|n| n.category.is_some()));
    // Basin kit resolution needs no catalog
    assert!(result.flattened.iter().any(|n| n.id == "T2-BSN-ESK-KIT"));
}

#[test]
fn test_incomplete_configuration_still_compiles() {
    let config = Configuration {
        basins: vec![basin("E_SINK", "24X20X8")],
        ..Configuration::default()
    };
    let result = compile(&config, &Catalog::builtin());

    assert!(!result.is_complete());
    assert!(result.flattened.iter().any(|n| n.id == "T2-BSN-ESK-KIT"));
    assert!(config.validate(&Catalog::builtin()).is_err());
}

// =============================================================================
// Files
// =============================================================================

#[test]
fn test_compile_from_saved_files() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("build.json");
    let catalog_path = dir.path().join("catalog.json");

    single_basin("E_SINK_DI").save_to_file(&config_path).unwrap();
    Catalog::builtin().save_to_file(&catalog_path).unwrap();

    let config = Configuration::load_from_file(&config_path).unwrap();
    let catalog = Catalog::load_from_file(&catalog_path).unwrap();
    let from_files = compile(&config, &catalog);
    let in_memory = compile(&single_basin("E_SINK_DI"), &Catalog::builtin());
    assert_eq!(from_files, in_memory);
}

#[test]
fn test_result_json_shape() {
    let result = compile(&single_basin("E_SINK"), &Catalog::builtin());
    let json = serde_json::to_value(&result).unwrap();
    assert!(json["totalItems"].is_u64());
    assert!(json["topLevelItems"].is_u64());
    assert!(json["hierarchical"].is_array());
    assert!(json["flattened"][0]["sourceContexts"].is_array());
}
