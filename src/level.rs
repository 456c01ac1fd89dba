//! Level catalog for the earthquake and flood drills
//!
//! Levels are immutable data: geometry, hazards, objectives, and timing
//! parameters. The built-in catalogs reproduce the six training scenarios;
//! catalogs can also be loaded from JSON for data-driven content.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::geom::Rect;

/// Closed set of placed-entity types. Every match site handles all variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// Furniture and structures the player can hide under or behind
    Obstacle,
    /// Source of falling debris while the ground shakes
    HazardSource,
    /// Generic object that rides the water surface
    Floatable,
    /// Elevated structure that ends the level when reached
    Shelter,
    /// Trees, signposts: climbable for partial points
    Vegetation,
    /// Cars, buses, trucks
    Vehicle,
    /// Boats and rescue craft
    Vessel,
    /// Loose wreckage
    Debris,
}

/// An object placed in a level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: String,
    pub bounds: Rect,
    pub kind: EntityKind,
    /// Grants points on first containment
    #[serde(default)]
    pub interactive: bool,
    #[serde(default)]
    pub points: Option<u32>,
    /// Tracks the water surface once submerged
    #[serde(default)]
    pub floats: bool,
}

impl Entity {
    fn new(id: &str, kind: EntityKind, x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            id: id.to_string(),
            bounds: Rect::new(x, y, w, h),
            kind,
            interactive: false,
            points: None,
            floats: false,
        }
    }

    fn interactive(mut self, points: u32) -> Self {
        self.interactive = true;
        self.points = Some(points);
        self
    }

    fn floats(mut self) -> Self {
        self.floats = true;
        self
    }
}

/// A rectangular region that ends the level when it fully contains the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SafeZone {
    pub bounds: Rect,
    /// Stories above ground; zero means ground level. In the flood drill a
    /// zone stays safe only while the water surface is still below its
    /// elevation height (`elevation * ELEVATION_STEP` above its base).
    #[serde(default)]
    pub elevation: u32,
}

/// A falling-debris source region (earthquake drill)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HazardZone {
    pub bounds: Rect,
    /// Health lost when debris from this source hits the player
    pub damage: f32,
}

/// Flood-specific level scalars
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FloodParams {
    /// Water surface y at level start (screen coordinates, larger = lower)
    pub initial_water_level: f32,
    /// Highest the water will rise (smallest y it reaches)
    pub max_water_level: f32,
    /// Pixels the surface rises per water tick
    pub rise_speed: f32,
    /// Horizontal current applied to floatables and to the swimming player
    pub current: Vec2,
}

/// Which hazard model a level runs under
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Ruleset {
    /// Falling debris, no stamina model
    Earthquake,
    /// Rising water, current drift, stamina model
    Flood(FloodParams),
}

/// Per-level scoring multipliers, fixed per ruleset
#[derive(Debug, Clone, Copy)]
pub struct ScoreFactors {
    pub time_bonus: u32,
    pub health_bonus: u32,
    pub stamina_bonus: u32,
}

impl Ruleset {
    pub fn is_flood(&self) -> bool {
        matches!(self, Ruleset::Flood(_))
    }

    pub fn score_factors(&self) -> ScoreFactors {
        match self {
            Ruleset::Earthquake => ScoreFactors {
                time_bonus: 5,
                health_bonus: 0,
                stamina_bonus: 0,
            },
            Ruleset::Flood(_) => ScoreFactors {
                time_bonus: 3,
                health_bonus: 2,
                stamina_bonus: 1,
            },
        }
    }
}

/// One discrete training scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    pub id: String,
    pub name: String,
    pub description: String,
    pub objective: String,
    pub player_start: Vec2,
    /// Countdown in whole seconds
    pub time_limit: u32,
    pub ruleset: Ruleset,
    #[serde(default)]
    pub entities: Vec<Entity>,
    #[serde(default)]
    pub safe_zones: Vec<SafeZone>,
    #[serde(default)]
    pub hazards: Vec<HazardZone>,
    #[serde(default)]
    pub rescue_points: Vec<Rect>,
}

impl Level {
    /// Base points for completing this level: the first interactive entity's
    /// declared value in the earthquake drill, a flat 200 in the flood drill.
    pub fn base_points(&self) -> u32 {
        match self.ruleset {
            Ruleset::Earthquake => self
                .entities
                .iter()
                .find(|e| e.interactive)
                .and_then(|e| e.points)
                .unwrap_or(100),
            Ruleset::Flood(_) => 200,
        }
    }
}

/// Read-only, ordered sequence of levels
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelCatalog {
    levels: Vec<Level>,
}

impl LevelCatalog {
    pub fn new(levels: Vec<Level>) -> Self {
        Self { levels }
    }

    /// Out-of-range lookup returns `None`; callers must check bounds before
    /// advancing past the last level.
    pub fn get(&self, index: usize) -> Option<&Level> {
        self.levels.get(index)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Load a catalog from JSON (data-driven level packs)
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The built-in earthquake drill: home, classroom, downtown.
    pub fn earthquake() -> Self {
        use EntityKind::*;
        Self::new(vec![
            Level {
                id: "home".into(),
                name: "Living Room Emergency".into(),
                description: "The ground starts shaking while you relax at home.".into(),
                objective: "Duck, cover and hold! Get under the sturdy table before debris falls."
                    .into(),
                player_start: Vec2::new(50.0, 300.0),
                time_limit: 15,
                ruleset: Ruleset::Earthquake,
                entities: vec![
                    Entity::new("table1", Obstacle, 300.0, 250.0, 120.0, 80.0).interactive(100),
                    Entity::new("tv", HazardSource, 500.0, 200.0, 100.0, 60.0),
                    Entity::new("bookshelf", HazardSource, 650.0, 150.0, 50.0, 200.0),
                    Entity::new("window", HazardSource, 750.0, 100.0, 100.0, 150.0),
                    Entity::new("couch", Debris, 100.0, 280.0, 150.0, 80.0),
                ],
                safe_zones: vec![SafeZone {
                    bounds: Rect::new(300.0, 250.0, 120.0, 80.0),
                    elevation: 0,
                }],
                hazards: vec![
                    HazardZone {
                        bounds: Rect::new(500.0, 200.0, 100.0, 60.0),
                        damage: 30.0,
                    },
                    HazardZone {
                        bounds: Rect::new(650.0, 150.0, 50.0, 200.0),
                        damage: 40.0,
                    },
                    HazardZone {
                        bounds: Rect::new(750.0, 100.0, 100.0, 150.0),
                        damage: 20.0,
                    },
                ],
                rescue_points: vec![],
            },
            Level {
                id: "school".into(),
                name: "Classroom Crisis".into(),
                description: "An earthquake strikes during class.".into(),
                objective: "Drop to your knees, take cover under a desk, and hold on!".into(),
                player_start: Vec2::new(100.0, 200.0),
                time_limit: 12,
                ruleset: Ruleset::Earthquake,
                entities: vec![
                    Entity::new("desk1", Obstacle, 200.0, 180.0, 80.0, 60.0).interactive(100),
                    Entity::new("desk2", Obstacle, 350.0, 180.0, 80.0, 60.0).interactive(100),
                    Entity::new("desk3", Obstacle, 500.0, 180.0, 80.0, 60.0).interactive(100),
                    Entity::new("teacher_desk", Obstacle, 650.0, 120.0, 100.0, 80.0)
                        .interactive(100),
                    Entity::new("whiteboard", HazardSource, 750.0, 50.0, 120.0, 100.0),
                    Entity::new("light1", HazardSource, 300.0, 50.0, 60.0, 20.0),
                    Entity::new("light2", HazardSource, 550.0, 50.0, 60.0, 20.0),
                ],
                safe_zones: vec![
                    SafeZone {
                        bounds: Rect::new(200.0, 180.0, 80.0, 60.0),
                        elevation: 0,
                    },
                    SafeZone {
                        bounds: Rect::new(350.0, 180.0, 80.0, 60.0),
                        elevation: 0,
                    },
                    SafeZone {
                        bounds: Rect::new(500.0, 180.0, 80.0, 60.0),
                        elevation: 0,
                    },
                    SafeZone {
                        bounds: Rect::new(650.0, 120.0, 100.0, 80.0),
                        elevation: 0,
                    },
                ],
                hazards: vec![
                    HazardZone {
                        bounds: Rect::new(750.0, 50.0, 120.0, 100.0),
                        damage: 35.0,
                    },
                    HazardZone {
                        bounds: Rect::new(300.0, 50.0, 60.0, 20.0),
                        damage: 25.0,
                    },
                    HazardZone {
                        bounds: Rect::new(550.0, 50.0, 60.0, 20.0),
                        damage: 25.0,
                    },
                ],
                rescue_points: vec![],
            },
            Level {
                id: "outdoor".into(),
                name: "Outdoor Escape".into(),
                description: "Buildings sway downtown; navigate to open ground.".into(),
                objective: "Move away from buildings! Reach the open park area.".into(),
                player_start: Vec2::new(50.0, 250.0),
                time_limit: 20,
                ruleset: Ruleset::Earthquake,
                entities: vec![
                    Entity::new("building1", HazardSource, 150.0, 50.0, 80.0, 200.0),
                    Entity::new("building2", HazardSource, 300.0, 100.0, 100.0, 150.0),
                    Entity::new("building3", HazardSource, 500.0, 80.0, 90.0, 170.0),
                    Entity::new("tree1", Vegetation, 200.0, 280.0, 30.0, 50.0),
                    Entity::new("tree2", Vegetation, 400.0, 290.0, 30.0, 50.0),
                    Entity::new("powerline", HazardSource, 250.0, 200.0, 200.0, 10.0),
                    Entity::new("park", Shelter, 650.0, 200.0, 200.0, 150.0).interactive(150),
                ],
                safe_zones: vec![SafeZone {
                    bounds: Rect::new(650.0, 200.0, 200.0, 150.0),
                    elevation: 0,
                }],
                hazards: vec![
                    HazardZone {
                        bounds: Rect::new(150.0, 50.0, 80.0, 200.0),
                        damage: 50.0,
                    },
                    HazardZone {
                        bounds: Rect::new(300.0, 100.0, 100.0, 150.0),
                        damage: 50.0,
                    },
                    HazardZone {
                        bounds: Rect::new(500.0, 80.0, 90.0, 170.0),
                        damage: 50.0,
                    },
                    HazardZone {
                        bounds: Rect::new(200.0, 280.0, 30.0, 50.0),
                        damage: 30.0,
                    },
                    HazardZone {
                        bounds: Rect::new(400.0, 290.0, 30.0, 50.0),
                        damage: 30.0,
                    },
                    HazardZone {
                        bounds: Rect::new(250.0, 200.0, 200.0, 10.0),
                        damage: 40.0,
                    },
                ],
                rescue_points: vec![],
            },
        ])
    }

    /// The built-in flood drill: residential, urban, riverside.
    pub fn flood() -> Self {
        use EntityKind::*;
        Self::new(vec![
            Level {
                id: "residential".into(),
                name: "Residential Area Flood".into(),
                description: "Heavy rains flood the neighborhood streets.".into(),
                objective: "Reach the 2-story house or evacuation shelter before the water gets too deep!"
                    .into(),
                player_start: Vec2::new(100.0, 200.0),
                time_limit: 25,
                ruleset: Ruleset::Flood(FloodParams {
                    initial_water_level: 350.0,
                    max_water_level: 250.0,
                    rise_speed: 2.0,
                    current: Vec2::new(1.0, 0.0),
                }),
                entities: vec![
                    Entity::new("house1", Obstacle, 150.0, 280.0, 100.0, 80.0),
                    Entity::new("house2", Shelter, 400.0, 220.0, 120.0, 140.0).interactive(150),
                    Entity::new("car1", Vehicle, 250.0, 320.0, 60.0, 30.0).floats(),
                    Entity::new("car2", Vehicle, 500.0, 330.0, 60.0, 30.0).floats(),
                    Entity::new("tree1", Vegetation, 350.0, 250.0, 30.0, 80.0).interactive(50),
                    Entity::new("tree2", Vegetation, 650.0, 270.0, 30.0, 80.0).interactive(50),
                    Entity::new("shelter", Shelter, 700.0, 180.0, 150.0, 100.0).interactive(200),
                    Entity::new("debris1", Debris, 300.0, 340.0, 40.0, 20.0).floats(),
                ],
                safe_zones: vec![
                    SafeZone {
                        bounds: Rect::new(400.0, 220.0, 120.0, 140.0),
                        elevation: 2,
                    },
                    SafeZone {
                        bounds: Rect::new(700.0, 180.0, 150.0, 100.0),
                        elevation: 3,
                    },
                ],
                hazards: vec![],
                rescue_points: vec![Rect::new(700.0, 180.0, 150.0, 100.0)],
            },
            Level {
                id: "urban".into(),
                name: "Urban Flash Flood".into(),
                description: "Blocked storm drains flood the city streets without warning.".into(),
                objective: "Reach the helicopter landing pad on the tall building roof!".into(),
                player_start: Vec2::new(50.0, 300.0),
                time_limit: 30,
                ruleset: Ruleset::Flood(FloodParams {
                    initial_water_level: 380.0,
                    max_water_level: 200.0,
                    rise_speed: 1.5,
                    current: Vec2::new(2.0, 0.0),
                }),
                entities: vec![
                    Entity::new("building1", Obstacle, 120.0, 200.0, 80.0, 160.0),
                    Entity::new("building2", Obstacle, 250.0, 180.0, 100.0, 180.0),
                    Entity::new("tallbuilding", Shelter, 600.0, 100.0, 120.0, 260.0)
                        .interactive(300),
                    Entity::new("bus", Vehicle, 300.0, 320.0, 100.0, 40.0).floats(),
                    Entity::new("truck", Vehicle, 450.0, 330.0, 80.0, 35.0).floats(),
                    Entity::new("boat", Vessel, 400.0, 200.0, 60.0, 30.0)
                        .interactive(100)
                        .floats(),
                    Entity::new("bench", Debris, 180.0, 340.0, 50.0, 20.0).floats(),
                    Entity::new("signpost", Vegetation, 380.0, 320.0, 10.0, 40.0).interactive(25),
                ],
                safe_zones: vec![SafeZone {
                    bounds: Rect::new(600.0, 100.0, 120.0, 260.0),
                    elevation: 5,
                }],
                hazards: vec![],
                rescue_points: vec![Rect::new(600.0, 100.0, 120.0, 40.0)],
            },
            Level {
                id: "riverside".into(),
                name: "River Overflow Emergency".into(),
                description: "The river has burst its banks; the current is swift.".into(),
                objective: "Use the rescue boat to reach the emergency shelter on high ground!"
                    .into(),
                player_start: Vec2::new(80.0, 280.0),
                time_limit: 35,
                ruleset: Ruleset::Flood(FloodParams {
                    initial_water_level: 360.0,
                    max_water_level: 180.0,
                    rise_speed: 1.0,
                    current: Vec2::new(3.0, 0.5),
                }),
                entities: vec![
                    Entity::new("cabin", Obstacle, 150.0, 300.0, 80.0, 60.0),
                    Entity::new("bridge", Vegetation, 300.0, 250.0, 200.0, 20.0).interactive(75),
                    Entity::new("emergency_shelter", Shelter, 650.0, 150.0, 180.0, 120.0)
                        .interactive(400),
                    Entity::new("boat1", Vessel, 250.0, 200.0, 70.0, 35.0)
                        .interactive(150)
                        .floats(),
                    Entity::new("boat2", Vessel, 450.0, 220.0, 70.0, 35.0)
                        .interactive(150)
                        .floats(),
                    Entity::new("rivertree1", Vegetation, 200.0, 220.0, 25.0, 60.0).interactive(40),
                    Entity::new("rivertree2", Vegetation, 380.0, 200.0, 25.0, 60.0).interactive(40),
                    Entity::new("log1", Debris, 100.0, 250.0, 60.0, 15.0).floats(),
                    Entity::new("log2", Debris, 520.0, 280.0, 50.0, 15.0).floats(),
                ],
                safe_zones: vec![
                    SafeZone {
                        bounds: Rect::new(300.0, 250.0, 200.0, 20.0),
                        elevation: 2,
                    },
                    SafeZone {
                        bounds: Rect::new(650.0, 150.0, 180.0, 120.0),
                        elevation: 4,
                    },
                ],
                hazards: vec![],
                rescue_points: vec![Rect::new(650.0, 150.0, 180.0, 120.0)],
            },
        ])
    }
}
