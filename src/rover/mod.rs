//! # Rover
//!
//! The simulated mining rover and its world. The language core never touches
//! this module directly; the evaluator only sees the [`RoverHost`] trait, and
//! [`Rover`] is the production implementation behind it.

mod host;
mod map;
mod watcher;

pub use host::*;
pub use map::*;
pub use watcher::*;

use std::fmt::Display;

use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

/// A map direction as written in source programs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Grid delta for one step in this direction.
    pub fn delta(self) -> (i64, i64) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        };
        f.write_str(name)
    }
}

/// Argument of the `turn` action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    Left,
    Right,
}

impl Display for Rotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Rotation::Left => "left",
            Rotation::Right => "right",
        };
        f.write_str(name)
    }
}

/// Headings indexed by orientation: north, east, south, west.
const HEADINGS: [(i64, i64); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

const ORE_TILES: [char; 4] = ['G', 'S', 'C', 'I'];

const DRILL_COST: i64 = 10;
const BUILD_COST: i64 = 10;

/// One simulated rover: a tile map plus position, orientation, inventory and
/// power. Each rover owns its own map copy; rovers share nothing.
#[derive(Debug)]
pub struct Rover {
    name: String,
    map: TileMap,
    x: i64,
    y: i64,
    orientation: i64,
    gold: i64,
    silver: i64,
    copper: i64,
    iron: i64,
    power: i64,
    rng: StdRng,
}

impl Rover {
    pub fn new(name: impl Into<String>, map: TileMap) -> Self {
        Self::with_rng(name, map, StdRng::from_entropy())
    }

    /// Build a rover with a caller-provided RNG so behavior can be seeded.
    pub fn with_rng(name: impl Into<String>, map: TileMap, rng: StdRng) -> Self {
        let mut rover = Self {
            name: name.into(),
            map,
            x: 0,
            y: 0,
            orientation: 0,
            gold: 1,
            silver: 1,
            copper: 1,
            iron: 1,
            power: 100,
            rng,
        };
        rover.respawn();

        rover
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Place the rover on a random empty tile facing a random way.
    fn respawn(&mut self) {
        if let Some(&(x, y)) = self.map.tiles_of(' ').choose(&mut self.rng) {
            self.x = x;
            self.y = y;
        }
        self.orientation = self.rng.gen_range(0..4);
    }

    fn heading(&self) -> (i64, i64) {
        HEADINGS[self.orientation as usize]
    }

    fn tile(&self) -> char {
        self.map.get(self.x, self.y)
    }

    fn say(&self, message: impl Display) {
        println!("{} {message}", self.name);
    }
}

impl RoverHost for Rover {
    fn orientation(&self) -> i64 {
        self.orientation
    }

    fn x_pos(&self) -> i64 {
        self.x
    }

    fn y_pos(&self) -> i64 {
        self.y
    }

    fn gold(&self) -> i64 {
        self.gold
    }

    fn silver(&self) -> i64 {
        self.silver
    }

    fn copper(&self) -> i64 {
        self.copper
    }

    fn iron(&self) -> i64 {
        self.iron
    }

    fn power(&self) -> i64 {
        self.power
    }

    fn sonar(&mut self) -> i64 {
        let found = self.map.count('D') as i64;
        self.say(format_args!("found {found} scannable tiles"));

        found
    }

    fn max_move(&self, direction: Direction) -> i64 {
        let (dx, dy) = direction.delta();

        let mut steps = 0;
        while self.map.get(self.x + dx * (steps + 1), self.y + dy * (steps + 1)) != 'X' {
            steps += 1;
        }

        steps
    }

    fn can_move(&self, direction: Direction) -> bool {
        let (dx, dy) = direction.delta();

        self.map.get(self.x + dx, self.y + dy) != 'X'
    }

    fn scan(&mut self) {
        if self.tile() != 'D' {
            self.say("must be on a D tile");
            return;
        }

        let ore = ORE_TILES[self.rng.gen_range(0..ORE_TILES.len())];
        self.map.set(self.x, self.y, ore);
        self.say(format_args!("found {ore}!"));
    }

    fn drill(&mut self) {
        if self.power < DRILL_COST {
            self.say("need more power to drill");
            return;
        }
        if !ORE_TILES.contains(&self.tile()) {
            self.say("must be on an ore tile");
            return;
        }

        match self.tile() {
            'G' => self.gold += 1,
            'S' => self.silver += 1,
            'C' => self.copper += 1,
            _ => self.iron += 1,
        }
        self.map.set(self.x, self.y, ' ');
        self.power -= DRILL_COST;
    }

    fn shockwave(&mut self) {
        for (dx, dy) in HEADINGS {
            let tile = if self.rng.gen_bool(0.5) { 'D' } else { ' ' };
            self.map.set(self.x + dx, self.y + dy, tile);
        }
    }

    fn build(&mut self) {
        if self.power < BUILD_COST {
            self.say("need more power to build");
            return;
        }
        if self.gold < 1 || self.silver < 1 || self.copper < 1 || self.iron < 1 {
            self.say("need more ores to build");
            return;
        }
        if self.tile() != ' ' {
            self.say("must be on an empty tile");
            return;
        }

        self.map.set(self.x, self.y, 'B');
        self.gold -= 1;
        self.silver -= 1;
        self.copper -= 1;
        self.iron -= 1;
        self.power -= BUILD_COST;
    }

    fn push(&mut self) {
        let (dx, dy) = self.heading();
        let front = (self.x + dx, self.y + dy);
        if self.map.get(front.0, front.1) != 'R' {
            self.say("must face a R tile to push");
            return;
        }

        let next = (front.0 + dx, front.1 + dy);
        if self.map.get(next.0, next.1) == 'X' {
            self.say("unable to push R on an X tile");
            return;
        }

        self.map.set(next.0, next.1, 'R');
        let uncovered = if self.rng.gen_bool(0.5) { 'X' } else { ' ' };
        self.map.set(front.0, front.1, uncovered);
    }

    fn recharge(&mut self) {
        let Some(charge) = self.tile().to_digit(10) else {
            self.say("must be on a digit tile");
            return;
        };

        self.power += charge as i64 * 10;
        self.map.set(self.x, self.y, ' ');
    }

    fn backflip(&mut self) {
        self.orientation = (self.orientation + 2) % 4;
    }

    fn print_inventory(&self) {
        println!("INVENTORY:");
        println!("    Gold: {}", self.gold);
        println!("    Silver: {}", self.silver);
        println!("    Copper: {}", self.copper);
        println!("    Iron: {}", self.iron);
        println!();
    }

    fn print_map(&self) {
        let marker = match self.orientation {
            0 => '^',
            1 => '>',
            2 => 'v',
            _ => '<',
        };
        print!("{}", self.map.render(Some((self.x, self.y, marker))));
    }

    fn print_pos(&self) {
        println!("I am located at: ({}, {})", self.x, self.y);
    }

    fn print_orientation(&self) {
        let facing = match self.orientation {
            0 => "North",
            1 => "East",
            2 => "South",
            _ => "West",
        };
        println!("I am facing {facing}.");
    }

    fn change_map(&mut self, path: &str) {
        match TileMap::load(std::path::Path::new(path)) {
            Ok(map) => {
                self.map = map;
                self.respawn();
            }
            Err(e) => self.say(format_args!("could not load map '{path}': {e}")),
        }
    }

    fn move_rover(&mut self, direction: Direction, steps: i64) {
        let (dx, dy) = direction.delta();
        // only the upper bound is capped; a negative count moves backward
        let steps = steps.min(self.max_move(direction));

        self.x += dx * steps;
        self.y += dy * steps;
    }

    fn turn(&mut self, rotation: Rotation) {
        self.orientation = match rotation {
            Rotation::Left => (self.orientation + 3) % 4,
            Rotation::Right => (self.orientation + 1) % 4,
        };
    }
}
