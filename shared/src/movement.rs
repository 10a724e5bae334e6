use crate::{MAX_COORD, MOVEMENT_SPEED};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl FromStr for Direction {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            _ => Err(()),
        }
    }
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    /// Moves one step along this direction, clamping only the affected axis.
    pub fn step(&self, x: f32, y: f32) -> (f32, f32) {
        match self {
            Direction::Up => (x, clamp_coord(y - MOVEMENT_SPEED)),
            Direction::Down => (x, clamp_coord(y + MOVEMENT_SPEED)),
            Direction::Left => (clamp_coord(x - MOVEMENT_SPEED), y),
            Direction::Right => (clamp_coord(x + MOVEMENT_SPEED), y),
        }
    }
}

fn clamp_coord(value: f32) -> f32 {
    value.clamp(0.0, MAX_COORD)
}

/// Computes the position after one movement step.
///
/// Unknown direction symbols leave the position untouched.
pub fn resolve_movement(x: f32, y: f32, direction: &str) -> (f32, f32) {
    match direction.parse::<Direction>() {
        Ok(direction) => direction.step(x, y),
        Err(()) => (x, y),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SPAWN_COORD;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_direction_parsing() {
        assert_eq!("up".parse::<Direction>(), Ok(Direction::Up));
        assert_eq!("down".parse::<Direction>(), Ok(Direction::Down));
        assert_eq!("left".parse::<Direction>(), Ok(Direction::Left));
        assert_eq!("right".parse::<Direction>(), Ok(Direction::Right));
        assert!("UP".parse::<Direction>().is_err());
        assert!("".parse::<Direction>().is_err());

        for direction in [Direction::Up, Direction::Down, Direction::Left, Direction::Right] {
            assert_eq!(direction.as_str().parse::<Direction>(), Ok(direction));
        }
    }

    #[test]
    fn test_move_right_from_center() {
        let (x, y) = resolve_movement(SPAWN_COORD, SPAWN_COORD, "right");
        assert_approx_eq!(x, SPAWN_COORD + MOVEMENT_SPEED, 0.001);
        assert_eq!(y, SPAWN_COORD);
    }

    #[test]
    fn test_vertical_moves_only_touch_y() {
        let (x, y) = resolve_movement(100.0, 100.0, "up");
        assert_eq!(x, 100.0);
        assert_approx_eq!(y, 100.0 - MOVEMENT_SPEED, 0.001);

        let (x, y) = resolve_movement(100.0, 100.0, "down");
        assert_eq!(x, 100.0);
        assert_approx_eq!(y, 100.0 + MOVEMENT_SPEED, 0.001);
    }

    #[test]
    fn test_clamps_at_lower_bound() {
        assert_eq!(resolve_movement(0.0, 50.0, "left"), (0.0, 50.0));
        assert_eq!(resolve_movement(50.0, 0.0, "up"), (50.0, 0.0));
        assert_eq!(resolve_movement(3.0, 50.0, "left"), (0.0, 50.0));
    }

    #[test]
    fn test_clamps_at_upper_bound() {
        assert_eq!(resolve_movement(MAX_COORD, 50.0, "right"), (MAX_COORD, 50.0));
        assert_eq!(resolve_movement(50.0, MAX_COORD, "down"), (50.0, MAX_COORD));
        assert_eq!(
            resolve_movement(MAX_COORD - 4.0, 50.0, "right"),
            (MAX_COORD, 50.0)
        );
    }

    #[test]
    fn test_unknown_direction_is_identity() {
        assert_eq!(resolve_movement(120.0, 240.0, "diagonal"), (120.0, 240.0));
        assert_eq!(resolve_movement(120.0, 240.0, ""), (120.0, 240.0));
    }

    #[test]
    fn test_long_walk_stays_in_bounds() {
        let directions = ["left", "up", "right", "down", "right", "right", "down"];
        let (mut x, mut y) = (SPAWN_COORD, SPAWN_COORD);

        for step in 0..2000 {
            let direction = directions[step % directions.len()];
            let repeat = if step % 3 == 0 { 90 } else { 1 };
            for _ in 0..repeat {
                (x, y) = resolve_movement(x, y, direction);
                assert!((0.0..=MAX_COORD).contains(&x), "x out of bounds: {}", x);
                assert!((0.0..=MAX_COORD).contains(&y), "y out of bounds: {}", y);
            }
        }
    }
}
