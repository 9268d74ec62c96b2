//! ASCII rendering of a running session.
//!
//! Glyphs, highest priority first: `A` agent, `G` threat, `*` reward,
//! `#` obstacle, otherwise the normalized score as a digit `0`..`9`.

use std::collections::HashSet;
use std::fmt::Write;

use influence_core::{Cell, GridOracle};
use runtime::Session;

pub fn render(session: &Session) -> String {
    let oracle = session.oracle();
    let bounds = oracle.bounds();

    let agents: HashSet<Cell> = session
        .agents()
        .map(|(_, agent)| oracle.world_to_cell(agent.position()))
        .collect();
    let threats: HashSet<Cell> = session
        .threat_positions()
        .iter()
        .map(|position| oracle.world_to_cell(*position))
        .collect();
    let rewards: HashSet<Cell> = session.rewards().iter().map(|reward| reward.cell).collect();

    let mut out = String::with_capacity(bounds.len() + bounds.height as usize);
    for y in (0..bounds.height as i32).rev() {
        for x in 0..bounds.width as i32 {
            let cell = Cell::new(x, y);
            let glyph = if agents.contains(&cell) {
                'A'
            } else if threats.contains(&cell) {
                'G'
            } else if rewards.contains(&cell) {
                '*'
            } else if oracle.is_obstacle(cell) {
                '#'
            } else {
                score_digit(session.field().score_at(cell))
            };
            out.push(glyph);
        }
        out.push('\n');
    }
    out
}

/// One-line status shown under each frame.
pub fn status_line(session: &Session) -> String {
    let mut line = format!(
        "[{}] tick {} | collected {}",
        session.name(),
        session.current_tick(),
        session.total_collected()
    );
    match session.clock().remaining() {
        Some(remaining) => {
            let _ = write!(line, " | {:.1}s left", remaining);
        }
        None => {
            let _ = write!(line, " | {:.1}s elapsed", session.clock().elapsed());
        }
    }
    line
}

fn score_digit(score: f32) -> char {
    let level = (score.clamp(0.0, 1.0) * 9.0).round() as u32;
    char::from_digit(level, 10).unwrap_or('?')
}

#[cfg(test)]
mod tests {
    use super::*;
    use influence_content::{RewardSettings, Scenario};
    use influence_core::WorldPoint;

    #[test]
    fn digits_cover_the_unit_range() {
        assert_eq!(score_digit(0.0), '0');
        assert_eq!(score_digit(0.5), '5');
        assert_eq!(score_digit(1.0), '9');
        assert_eq!(score_digit(-3.0), '0');
        assert_eq!(score_digit(7.0), '9');
    }

    #[test]
    fn draws_walls_agents_and_threats() {
        let mut scenario = Scenario::open_arena(5, 4);
        scenario.threats.clear();
        scenario.rewards = RewardSettings {
            max_rewards: 0,
            seed: 0,
        };
        let mut session = Session::from_scenario(&scenario).unwrap();
        session.set_threat_positions(vec![WorldPoint::new(1.5, 1.5)]);
        session.tick(0.0).unwrap();

        let frame = render(&session);
        let rows: Vec<&str> = frame.lines().collect();

        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0], "#####");
        assert_eq!(rows[3], "#####");
        // Agent spawns at (2, 2), the threat sits at (1, 1).
        assert_eq!(&rows[1][2..3], "A");
        assert_eq!(&rows[2][1..2], "G");
    }
}
