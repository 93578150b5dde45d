//! Built-in catalog tables.
//!
//! Tables are kept as Rust constants so that a typo in a part number shows up
//! as a test failure rather than a silent pass-through at compile time of a BOM.
//! `Catalog::builtin()` turns them into owned, serializable records.

use crate::types::{AccessoryKind, Category};

/// Bumped whenever any table below changes.
pub const CATALOG_VERSION: &str = "2024.3";

/// (model id, display name, basin count)
pub const SINK_MODELS: &[(&str, &str, usize)] = &[
    ("T2-B1", "T2 Sink, 1 Basin", 1),
    ("T2-B2", "T2 Sink, 2 Basins", 2),
    ("T2-B3", "T2 Sink, 3 Basins", 3),
];

/// (user value, kit id, display name)
pub const LEG_TYPES: &[(&str, &str, &str)] = &[
    ("DL27", "T2-DL27-KIT", "Height Adjustable Leg Kit, DL27"),
    ("DL14", "T2-DL14-KIT", "Height Adjustable Leg Kit, DL14"),
    ("LC1", "T2-LC1-KIT", "Lift Column Leg Kit, LC1"),
    ("FIXED", "T2-FIXED-LEG-KIT", "Fixed Height Leg Kit"),
];

pub const FEET_TYPES: &[(&str, &str, &str)] = &[
    ("LEVELING_CASTOR_475", "T2-LEVELING-CASTOR-475", "Leveling Castor Kit, 4.75in"),
    ("SEISMIC_FEET", "T2-SEISMIC-FEET", "Seismic Leveling Feet Kit"),
];

pub const FAUCET_TYPES: &[(&str, &str, &str)] = &[
    ("WRIST_BLADE", "T2-OA-STD-FAUCET-WB-KIT", "Wrist Blade Faucet Kit"),
    ("PRE_RINSE", "T2-OA-PRE-RINSE-FAUCET-KIT", "Pre-Rinse Faucet Kit"),
    ("DI_GOOSENECK", "T2-OA-DI-GOOSENECK-FAUCET-KIT", "DI Gooseneck Faucet Kit"),
];

pub const SPRAYER_TYPES: &[(&str, &str, &str)] = &[
    ("WATER_GUN", "T2-OA-WATERGUN-TURRET-KIT", "Water Gun Turret Kit"),
    ("AIR_GUN", "T2-OA-AIRGUN-TURRET-KIT", "Air Gun Turret Kit"),
    ("DI_WATER_GUN", "T2-OA-DI-WATERGUN-TURRET-KIT", "DI Water Gun Turret Kit"),
];

pub const BASIN_TYPES: &[(&str, &str, &str)] = &[
    ("E_SINK", "T2-BSN-ESK-KIT", "E-Sink Basin Kit"),
    ("E_SINK_DI", "T2-BSN-ESK-DI-KIT", "E-Sink Basin Kit, DI"),
    ("E_DRAIN", "T2-BSN-EDR-KIT", "E-Drain Basin Kit"),
];

/// Pegboard coverage buckets: (min sink length, max sink length, size code), ascending.
pub const PEGBOARD_BUCKETS: &[(f64, f64, &str)] = &[
    (34.0, 47.0, "3436"),
    (48.0, 59.0, "4836"),
    (60.0, 71.0, "6036"),
    (72.0, 83.0, "7236"),
    (84.0, 95.0, "8436"),
    (96.0, 107.0, "9636"),
    (108.0, 119.0, "10836"),
    (120.0, 130.0, "12036"),
];

/// (user value, code, display name)
pub const PEGBOARD_TYPES: &[(&str, &str, &str)] = &[
    ("PERFORATED", "PERF", "Perforated"),
    ("SOLID", "SOLID", "Solid"),
];

pub const PEGBOARD_COLORS: &[(&str, &str, &str)] = &[
    ("GREEN", "GRN", "Green"),
    ("BLACK", "BLK", "Black"),
    ("YELLOW", "YLW", "Yellow"),
    ("GREY", "GRY", "Grey"),
    ("RED", "RED", "Red"),
    ("BLUE", "BLU", "Blue"),
    ("ORANGE", "ORG", "Orange"),
    ("WHITE", "WHT", "White"),
];

/// (size id, canonical part number, display name)
pub const BASIN_SIZES: &[(&str, &str, &str)] = &[
    ("20X20X8", "T2-ADW-BASIN20X20X8", "Basin 20x20x8"),
    ("24X20X8", "T2-ADW-BASIN24X20X8", "Basin 24x20x8"),
    ("24X20X10", "T2-ADW-BASIN24X20X10", "Basin 24x20x10"),
    ("30X20X8", "T2-ADW-BASIN30X20X8", "Basin 30x20x8"),
    ("30X20X10", "T2-ADW-BASIN30X20X10", "Basin 30x20x10"),
    ("36X20X8", "T2-ADW-BASIN36X20X8", "Basin 36x20x8"),
];

/// Legacy numeric size codes still found in older orders.
pub const BASIN_SIZE_ALIASES: &[(&str, &str)] = &[
    ("712.102", "T2-ADW-BASIN20X20X8"),
    ("712.103", "T2-ADW-BASIN24X20X8"),
    ("712.104", "T2-ADW-BASIN24X20X10"),
    ("712.105", "T2-ADW-BASIN30X20X8"),
    ("712.106", "T2-ADW-BASIN30X20X10"),
    ("712.107", "T2-ADW-BASIN36X20X8"),
];

pub const CUSTOM_BASIN_PART: &str = "T2-ADW-BASIN-CUSTOM";

pub const BASIN_ADDONS: &[(&str, &str)] = &[
    ("T2-OA-BASIN-LIGHT-ESK-KIT", "Basin Light Kit, E-Sink"),
    ("T2-OA-BASIN-LIGHT-EDR-KIT", "Basin Light Kit, E-Drain"),
    ("T2-BSN-BOTTOM-FILL-KIT", "Basin Bottom Fill Kit"),
    ("T2-BSN-PTRAP-DRAIN-KIT", "P-Trap Disinfection Drain Kit"),
];

pub const DRAWER_ITEMS: &[(&str, &str)] = &[
    ("T2-OA-2D-152012-STACKED-KIT", "Stacked Drawer Kit, 2 Drawers"),
    ("T2-OA-PO-SHLF-1212", "Pull-Out Shelf, 12x12"),
    ("T2-OA-DRAWER-SINGLE", "Single Drawer Kit"),
];

/// (E-drain basins, E-sink basins, control box kit id, display name)
pub const CONTROL_BOXES: &[(usize, usize, &str, &str)] = &[
    (1, 0, "T2-CTRL-EDR1", "Control Box, 1 E-Drain"),
    (0, 1, "T2-CTRL-ESK1", "Control Box, 1 E-Sink"),
    (1, 1, "T2-CTRL-EDR1-ESK1", "Control Box, 1 E-Drain + 1 E-Sink"),
    (2, 0, "T2-CTRL-EDR2", "Control Box, 2 E-Drain"),
    (0, 2, "T2-CTRL-ESK2", "Control Box, 2 E-Sink"),
    (3, 0, "T2-CTRL-EDR3", "Control Box, 3 E-Drain"),
    (0, 3, "T2-CTRL-ESK3", "Control Box, 3 E-Sink"),
    (1, 2, "T2-CTRL-EDR1-ESK2", "Control Box, 1 E-Drain + 2 E-Sink"),
    (2, 1, "T2-CTRL-EDR2-ESK1", "Control Box, 2 E-Drain + 1 E-Sink"),
];

pub const ACCESSORIES: &[(&str, &str)] = &[
    ("702.10", "Wall-Mounted Stainless Shelf, 36in"),
    ("702.14", "Under-Sink Storage Bin"),
    ("703.38", "LED Task Light Bar"),
    ("704.12", "Bin Rail, 36in"),
    ("704.20", "Pegboard Hook Set"),
    ("705.05", "Soap Dispenser, Wall Mount"),
    ("705.08", "Paper Towel Dispenser"),
    ("706.30", "Magnifier Lamp Arm"),
    ("751.05", "Replacement Filter Cartridge"),
];

/// Catalog-defined sub-parts: (parent kit id, &[(child id, child name, quantity)])
pub const KITS: &[(&str, &[(&str, &str, u32)])] = &[
    ("T2-B1", &[("711.95", "Sink Body Frame Weldment, 1 Basin", 1), ("713.10", "Backsplash Panel", 1)]),
    ("T2-B2", &[("711.96", "Sink Body Frame Weldment, 2 Basins", 1), ("713.10", "Backsplash Panel", 1)]),
    ("T2-B3", &[("711.97", "Sink Body Frame Weldment, 3 Basins", 1), ("713.10", "Backsplash Panel", 1)]),
    ("T2-DL27-KIT", &[("715.27", "Height Adjustable Leg, 27in", 4)]),
    ("T2-DL14-KIT", &[("715.14", "Height Adjustable Leg, 14in", 4)]),
    ("T2-LC1-KIT", &[("715.31", "Lift Column", 2), ("715.32", "Lift Column Cross Brace", 1)]),
    ("T2-LEVELING-CASTOR-475", &[("716.47", "Leveling Castor, 4.75in", 4)]),
    ("T2-SEISMIC-FEET", &[("716.60", "Seismic Foot Plate", 4)]),
    ("T2-BSN-ESK-KIT", &[("722.10", "E-Sink Drain Valve Assembly", 1), ("722.11", "Basin Overflow Kit", 1)]),
    (
        "T2-BSN-ESK-DI-KIT",
        &[
            ("722.10", "E-Sink Drain Valve Assembly", 1),
            ("722.11", "Basin Overflow Kit", 1),
            ("722.15", "DI Water Inlet Manifold", 1),
        ],
    ),
    ("T2-BSN-EDR-KIT", &[("722.20", "E-Drain Solenoid Valve", 1), ("722.11", "Basin Overflow Kit", 1)]),
    ("T2-OA-STD-FAUCET-WB-KIT", &[("731.05", "Wrist Blade Handle Set", 1)]),
    ("T2-OA-DI-GOOSENECK-FAUCET-KIT", &[("731.20", "DI Gooseneck Spout", 1), ("731.21", "DI Faucet Aerator", 1)]),
    ("T2-OA-WATERGUN-TURRET-KIT", &[("732.10", "Water Gun Hose Assembly", 1)]),
    ("T2-OA-AIRGUN-TURRET-KIT", &[("732.20", "Air Gun Hose Assembly", 1)]),
    ("T2-CTRL-EDR1", &[("741.01", "Control Board Assembly", 1), ("701.20", "Controller Firmware License", 1)]),
    ("T2-CTRL-ESK1", &[("741.01", "Control Board Assembly", 1), ("701.20", "Controller Firmware License", 1)]),
];

/// Numeric part-number prefix ranges: (first, last, category), inclusive.
pub const CATEGORY_RANGES: &[(u32, u32, Category)] = &[
    (700, 701, Category::System),
    (702, 702, Category::Accessory(AccessoryKind::Storage)),
    (703, 703, Category::Accessory(AccessoryKind::Lighting)),
    (704, 704, Category::Accessory(AccessoryKind::Organization)),
    (705, 705, Category::Accessory(AccessoryKind::Dispensers)),
    (706, 709, Category::Accessory(AccessoryKind::Other)),
    (710, 719, Category::SinkBody),
    (720, 729, Category::Basin),
    (730, 739, Category::FaucetSprayer),
    (740, 749, Category::ControlBox),
    (750, 759, Category::ServicePart),
];

/// Keyword heuristics, evaluated top to bottom. Matching is case-insensitive
/// over both identifier and display name.
pub const KEYWORD_RULES: &[(&[&str], Category)] = &[
    (&["control box", "ctrl"], Category::ControlBox),
    (&["faucet", "sprayer", "gooseneck", "water gun", "air gun", "turret"], Category::FaucetSprayer),
    (&["basin", "bsn"], Category::Basin),
    (&["pegboard", "bin rail", "hook"], Category::Accessory(AccessoryKind::Organization)),
    (&["shelf", "drawer", "storage", "cabinet"], Category::Accessory(AccessoryKind::Storage)),
    (&["light", "lamp"], Category::Accessory(AccessoryKind::Lighting)),
    (&["dispenser"], Category::Accessory(AccessoryKind::Dispensers)),
    (&["leg", "feet", "foot", "castor", "caster", "sink body", "frame"], Category::SinkBody),
    (&["service", "replacement", "spare"], Category::ServicePart),
    (&["firmware", "software", "system"], Category::System),
];
