//! Scripted threat feed.
use influence_content::ThreatRoute;
use influence_core::{Cell, GridOracle, WorldPoint};

/// Walks a looping waypoint route at constant speed.
///
/// Threats are plain position providers for the field; they do not read it.
#[derive(Clone, Debug)]
pub struct ThreatWalker {
    waypoints: Vec<WorldPoint>,
    speed: f32,
    /// Length of one closed loop through every waypoint.
    lap: f32,
    next: usize,
    position: WorldPoint,
}

impl ThreatWalker {
    /// Starts at the first waypoint heading for the second.
    ///
    /// Returns `None` for an empty route.
    pub fn new<O: GridOracle + ?Sized>(route: &ThreatRoute, oracle: &O) -> Option<Self> {
        let waypoints: Vec<_> = route
            .waypoints
            .iter()
            .map(|cell| oracle.cell_to_world(*cell))
            .collect();
        let position = *waypoints.first()?;
        let lap = waypoints
            .iter()
            .zip(waypoints.iter().cycle().skip(1))
            .map(|(from, to)| from.distance(*to))
            .sum();
        Some(Self {
            next: 1 % waypoints.len(),
            lap,
            waypoints,
            speed: route.speed.max(0.0),
            position,
        })
    }

    /// Moves `speed * dt` along the route, wrapping past the last waypoint.
    pub fn advance(&mut self, dt: f32) -> WorldPoint {
        if self.lap <= 0.0 {
            return self.position;
        }
        // Whole laps end where they started.
        let mut budget = (self.speed * dt.max(0.0)) % self.lap;

        for _ in 0..=self.waypoints.len() {
            if budget <= 0.0 {
                break;
            }
            let target = self.waypoints[self.next];
            let gap = self.position.distance(target);
            if gap > budget {
                self.position = self.position.move_towards(target, budget);
                break;
            }
            self.position = target;
            budget -= gap;
            self.next = (self.next + 1) % self.waypoints.len();
        }

        self.position
    }

    pub fn position(&self) -> WorldPoint {
        self.position
    }

    pub fn cell<O: GridOracle + ?Sized>(&self, oracle: &O) -> Cell {
        oracle.world_to_cell(self.position)
    }
}
