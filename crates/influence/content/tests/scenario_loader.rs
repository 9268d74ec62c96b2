use std::io::Write;

use influence_content::ScenarioLoader;
use influence_core::{Cell, DegeneratePolicy, GridDimensions};

const CORRIDOR: &str = r#########"
(
    name: "corridor",
    dimensions: (8, 3),
    origin: (-4, -1),
    rows: [
        "########",
        "#......#",
        "###.####",
    ],
    agents: [(1, 1)],
    threats: [(waypoints: [(6, 1), (4, 1)], speed: 3.0)],
    rewards: (max_rewards: 2, seed: 7),
    field: (max_threat_distance: 6.0, degenerate: Zero),
    time_limit: 12.5,
)
"#########;

#[test]
fn parses_rows_into_obstacles() {
    let scenario = ScenarioLoader::parse(CORRIDOR).unwrap();

    assert_eq!(scenario.name, "corridor");
    assert_eq!(scenario.dimensions, GridDimensions::new(8, 3));
    assert_eq!(scenario.geometry.origin, Cell::new(-4, -1));

    // Top row is y = 2; the gap in the bottom row is at x = 3.
    assert!(scenario.obstacles.contains(&Cell::new(0, 2)));
    assert!(scenario.obstacles.contains(&Cell::new(7, 1)));
    assert!(!scenario.obstacles.contains(&Cell::new(3, 0)));
    assert!(!scenario.obstacles.contains(&Cell::new(3, 1)));
    assert_eq!(scenario.obstacles.len(), 8 + 2 + 7);
}

#[test]
fn carries_tuning_and_routes() {
    let scenario = ScenarioLoader::parse(CORRIDOR).unwrap();

    assert_eq!(scenario.agents, vec![Cell::new(1, 1)]);
    assert_eq!(scenario.threats.len(), 1);
    assert_eq!(scenario.threats[0].waypoints[1], Cell::new(4, 1));
    assert_eq!(scenario.threats[0].speed, 3.0);
    assert_eq!(scenario.rewards.max_rewards, 2);
    assert_eq!(scenario.rewards.seed, 7);
    assert_eq!(scenario.field.max_threat_distance, 6.0);
    assert_eq!(scenario.field.max_attraction_distance, 5.0);
    assert_eq!(scenario.field.degenerate, DegeneratePolicy::Zero);
    assert_eq!(scenario.time_limit, 12.5);
}

#[test]
fn rejects_spawn_inside_obstacle() {
    let text = r#"(dimensions: (3, 3), obstacles: [(1, 1)], agents: [(1, 1)])"#;
    let err = ScenarioLoader::parse(text).unwrap_err();
    assert!(err.to_string().contains("inside an obstacle"));
}

#[test]
fn rejects_empty_dimensions() {
    let text = r#"(dimensions: (0, 4), agents: [])"#;
    assert!(ScenarioLoader::parse(text).is_err());
}

#[test]
fn rejects_ragged_rows() {
    let text = r####"(dimensions: (3, 2), rows: ["###", "#."], agents: [])"####;
    let err = ScenarioLoader::parse(text).unwrap_err();
    assert!(err.to_string().contains("row 1"));
}

#[test]
fn load_names_scenario_after_file_when_unnamed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plaza.ron");
    let mut file = std::fs::File::create(&path).unwrap();
    write!(file, "(dimensions: (4, 4), agents: [(0, 0)])").unwrap();

    let scenario = ScenarioLoader::load(&path).unwrap();
    assert_eq!(scenario.name, "plaza");
    assert_eq!(scenario.rewards.max_rewards, 6);
    assert!(scenario.obstacles.is_empty());
}

#[test]
fn load_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = ScenarioLoader::load(&dir.path().join("missing.ron")).unwrap_err();
    assert!(err.to_string().contains("Failed to read file"));
}

#[test]
fn bundled_courtyard_is_valid() {
    let scenario =
        ScenarioLoader::parse(include_str!("../data/scenarios/courtyard.ron")).unwrap();

    assert_eq!(scenario.name, "courtyard");
    assert_eq!(scenario.dimensions, GridDimensions::new(16, 12));
    assert_eq!(scenario.threats.len(), 2);
    // The pavilion interior is walkable but walled in.
    assert!(!scenario.obstacles.contains(&Cell::new(7, 5)));
    assert!(scenario.obstacles.contains(&Cell::new(6, 5)));
    assert!(scenario.obstacles.contains(&Cell::new(7, 7)));
}
