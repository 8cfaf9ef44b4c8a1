use super::{Direction, Rotation};

/// The interface the evaluator drives the rover through.
///
/// Getters report state and return `int` values except `can_move`, which
/// returns `bool`. Actions mutate the world and return nothing; an action
/// whose precondition fails is expected to print a diagnostic and do nothing.
pub trait RoverHost {
    // getters

    /// 0 = north, 1 = east, 2 = south, 3 = west.
    fn orientation(&self) -> i64;
    fn x_pos(&self) -> i64;
    fn y_pos(&self) -> i64;
    fn gold(&self) -> i64;
    fn silver(&self) -> i64;
    fn copper(&self) -> i64;
    fn iron(&self) -> i64;
    fn power(&self) -> i64;

    /// Count the drillable tiles on the map, printing the count. Doubles as
    /// an action whose result is discarded.
    fn sonar(&mut self) -> i64;

    /// Maximum number of tiles the rover could advance in `direction`.
    fn max_move(&self, direction: Direction) -> i64;

    /// Whether the adjacent tile in `direction` can be entered.
    fn can_move(&self, direction: Direction) -> bool;

    // actions

    fn scan(&mut self);
    fn drill(&mut self);
    fn shockwave(&mut self);
    fn build(&mut self);
    fn push(&mut self);
    fn recharge(&mut self);
    fn backflip(&mut self);
    fn print_inventory(&self);
    fn print_map(&self);
    fn print_pos(&self);
    fn print_orientation(&self);

    /// Switch to the map stored at `path` and respawn.
    fn change_map(&mut self, path: &str);

    /// Advance `steps` tiles in `direction`, capped above by `max_move`.
    /// The lower bound is not clamped; a negative count moves backward.
    fn move_rover(&mut self, direction: Direction, steps: i64);

    /// Rotate 90 degrees.
    fn turn(&mut self, rotation: Rotation);
}
