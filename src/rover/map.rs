use std::{fs, io, path::Path};

/// Rectangular grid of single-character tiles.
///
/// Tile vocabulary: `X` wall, ` ` empty, `D` drillable deposit, `G`/`S`/`C`/
/// `I` ore, `R` pushable rock, `B` built structure, digits `0`-`9` recharge
/// pads. Everything outside the grid reads as a wall.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileMap {
    rows: Vec<Vec<char>>,
}

impl TileMap {
    pub fn load(path: &Path) -> io::Result<Self> {
        let content = fs::read_to_string(path)?;

        Ok(Self::parse(&content))
    }

    pub fn parse(content: &str) -> Self {
        let rows = content
            .lines()
            .map(|line| line.chars().collect())
            .collect();

        Self { rows }
    }

    /// Tile at `(x, y)`; coordinates outside the map read as `'X'`.
    pub fn get(&self, x: i64, y: i64) -> char {
        if x < 0 || y < 0 {
            return 'X';
        }

        self.rows
            .get(y as usize)
            .and_then(|row| row.get(x as usize))
            .copied()
            .unwrap_or('X')
    }

    /// Replace the tile at `(x, y)`. Writes outside the map are dropped.
    pub fn set(&mut self, x: i64, y: i64, tile: char) {
        if x < 0 || y < 0 {
            return;
        }

        if let Some(cell) = self
            .rows
            .get_mut(y as usize)
            .and_then(|row| row.get_mut(x as usize))
        {
            *cell = tile;
        }
    }

    /// Number of occurrences of `tile` on the whole map.
    pub fn count(&self, tile: char) -> usize {
        self.rows
            .iter()
            .map(|row| row.iter().filter(|&&cell| cell == tile).count())
            .sum()
    }

    /// Coordinates of every occurrence of `tile`.
    pub fn tiles_of(&self, tile: char) -> Vec<(i64, i64)> {
        let mut positions = vec![];

        for (y, row) in self.rows.iter().enumerate() {
            for (x, &cell) in row.iter().enumerate() {
                if cell == tile {
                    positions.push((x as i64, y as i64));
                }
            }
        }

        positions
    }

    /// Render the map, optionally overlaying a marker character.
    pub fn render(&self, marker: Option<(i64, i64, char)>) -> String {
        let mut output = String::new();

        for (y, row) in self.rows.iter().enumerate() {
            for (x, &cell) in row.iter().enumerate() {
                match marker {
                    Some((mx, my, m)) if (mx, my) == (x as i64, y as i64) => output.push(m),
                    _ => output.push(cell),
                }
            }
            output.push('\n');
        }

        output
    }
}
