use basin_core::consts::PARALLEL_CELL_THRESHOLD;
use basin_core::flood::{FloodStage, WatershedConfig};
use basin_core::topology::Connectivity;
use basin_core::BasinError;

// ---------------------------------------------------------------------------
// Connectivity
// ---------------------------------------------------------------------------

#[test]
fn test_connectivity_display() {
    assert_eq!(format!("{}", Connectivity::Four), "4-connectivity");
    assert_eq!(format!("{}", Connectivity::TwentySix), "26-connectivity");
}

#[test]
fn test_connectivity_from_count() {
    assert_eq!(Connectivity::from_count(4, 2).unwrap(), Connectivity::Four);
    assert_eq!(Connectivity::from_count(8, 2).unwrap(), Connectivity::Eight);
    assert_eq!(Connectivity::from_count(6, 3).unwrap(), Connectivity::Six);
    assert_eq!(
        Connectivity::from_count(26, 3).unwrap(),
        Connectivity::TwentySix
    );
}

#[test]
fn test_connectivity_from_count_rejects_mismatches() {
    assert!(matches!(
        Connectivity::from_count(6, 2),
        Err(BasinError::InvalidConnectivity {
            connectivity: 6,
            ndim: 2
        })
    ));
    assert!(matches!(
        Connectivity::from_count(8, 3),
        Err(BasinError::InvalidConnectivity { .. })
    ));
    assert!(matches!(
        Connectivity::from_count(5, 2),
        Err(BasinError::InvalidConnectivity { .. })
    ));
}

#[test]
fn test_connectivity_defaults() {
    assert_eq!(Connectivity::default_for(2), Some(Connectivity::Four));
    assert_eq!(Connectivity::default_for(3), Some(Connectivity::Six));
    assert_eq!(Connectivity::default_for(4), None);
}

// ---------------------------------------------------------------------------
// WatershedConfig
// ---------------------------------------------------------------------------

#[test]
fn test_watershed_config_default() {
    let config = WatershedConfig::default();
    assert_eq!(config.connectivity, None);
    assert!(config.compute_dams);
    assert_eq!(config.compactness, 0.0);
    assert_eq!(config.parallel_threshold, PARALLEL_CELL_THRESHOLD);
}

#[test]
fn test_watershed_config_builders() {
    let config = WatershedConfig::default()
        .with_connectivity(Connectivity::Eight)
        .with_dams(false)
        .with_compactness(0.25);
    assert_eq!(config.connectivity, Some(Connectivity::Eight));
    assert!(!config.compute_dams);
    assert_eq!(config.compactness, 0.25);
}

#[test]
fn test_watershed_config_json_round_trip() {
    let config = WatershedConfig::default()
        .with_connectivity(Connectivity::TwentySix)
        .with_compactness(1.5);
    let json = serde_json::to_string(&config).unwrap();
    let back: WatershedConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);
}

#[test]
fn test_watershed_config_empty_json_uses_defaults() {
    let config: WatershedConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config, WatershedConfig::default());
}

#[test]
fn test_watershed_config_partial_toml() {
    let config: WatershedConfig = toml::from_str(
        r#"
connectivity = "Eight"
compute_dams = false
"#,
    )
    .unwrap();
    assert_eq!(config.connectivity, Some(Connectivity::Eight));
    assert!(!config.compute_dams);
    assert_eq!(config.compactness, 0.0);
    assert_eq!(config.parallel_threshold, PARALLEL_CELL_THRESHOLD);
}

#[test]
fn test_watershed_config_toml_round_trip() {
    let config = WatershedConfig::default().with_compactness(0.01);
    let text = toml::to_string_pretty(&config).unwrap();
    let back: WatershedConfig = toml::from_str(&text).unwrap();
    assert_eq!(back, config);
}

// ---------------------------------------------------------------------------
// FloodStage Display
// ---------------------------------------------------------------------------

#[test]
fn test_flood_stage_display() {
    assert_eq!(format!("{}", FloodStage::Seeding), "Seeding markers");
    assert_eq!(format!("{}", FloodStage::Flooding), "Flooding");
    assert_eq!(format!("{}", FloodStage::Extracting), "Extracting labels");
}
