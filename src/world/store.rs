//! Sparse level storage
//!
//! Occupied cells are indexed by column, then by row:
//! - Visible-range queries walk only the columns in range
//! - Empty columns are dropped so sparse worlds stay cheap
//! - Snapshots come out ordered by (x, y)

use std::collections::BTreeMap;
use std::ops::Range;

use super::{GridCoord, TileType};

/// Error returned by store mutations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("cell ({x}, {y}) lies outside the {width}x{height} world")]
    OutOfBounds { x: u32, y: u32, width: u32, height: u32 },
}

/// Mapping of occupied grid cells to tile types
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelStore {
    columns: BTreeMap<u32, BTreeMap<u32, TileType>>,
    len: usize,
    width: u32,
    height: u32,
}

impl LevelStore {
    /// Create an empty store for a world of the given size (in cells)
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            columns: BTreeMap::new(),
            len: 0,
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of occupied cells
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn in_bounds(&self, coord: GridCoord) -> bool {
        coord.x < self.width && coord.y < self.height
    }

    fn check_bounds(&self, coord: GridCoord) -> Result<(), StoreError> {
        if self.in_bounds(coord) {
            Ok(())
        } else {
            Err(StoreError::OutOfBounds {
                x: coord.x,
                y: coord.y,
                width: self.width,
                height: self.height,
            })
        }
    }

    pub fn get(&self, coord: GridCoord) -> Option<TileType> {
        self.columns.get(&coord.x)?.get(&coord.y).copied()
    }

    pub fn contains(&self, coord: GridCoord) -> bool {
        self.get(coord).is_some()
    }

    /// Place a tile
    ///
    /// Returns `Ok(false)` if the cell already held this tile (nothing changed).
    pub fn set(&mut self, coord: GridCoord, tile: TileType) -> Result<bool, StoreError> {
        self.check_bounds(coord)?;
        let column = self.columns.entry(coord.x).or_default();
        match column.insert(coord.y, tile) {
            Some(previous) => Ok(previous != tile),
            None => {
                self.len += 1;
                Ok(true)
            }
        }
    }

    /// Remove the tile at `coord`, returning it if there was one
    pub fn erase(&mut self, coord: GridCoord) -> Option<TileType> {
        let column = self.columns.get_mut(&coord.x)?;
        let removed = column.remove(&coord.y)?;
        if column.is_empty() {
            self.columns.remove(&coord.x);
        }
        self.len -= 1;
        Some(removed)
    }

    pub fn clear(&mut self) {
        self.columns.clear();
        self.len = 0;
    }

    /// Entries inside the half-open rectangle `cols` x `rows`
    pub fn entries_in_range(
        &self,
        cols: Range<u32>,
        rows: Range<u32>,
    ) -> impl Iterator<Item = (GridCoord, TileType)> + '_ {
        // BTreeMap::range panics on inverted ranges
        let cols = if cols.start < cols.end { cols } else { 0..0 };
        let rows = if rows.start < rows.end { rows } else { 0..0 };
        self.columns.range(cols).flat_map(move |(&x, column)| {
            column
                .range(rows.clone())
                .map(move |(&y, &tile)| (GridCoord::new(x, y), tile))
        })
    }

    /// Iterate all entries in (x, y) order
    pub fn iter(&self) -> impl Iterator<Item = (GridCoord, TileType)> + '_ {
        self.columns.iter().flat_map(|(&x, column)| {
            column.iter().map(move |(&y, &tile)| (GridCoord::new(x, y), tile))
        })
    }

    /// All entries in (x, y) order
    pub fn snapshot(&self) -> Vec<(GridCoord, TileType)> {
        self.iter().collect()
    }

    /// Replace the whole contents
    ///
    /// Entries outside the world are dropped; the number dropped is returned.
    pub fn restore<I>(&mut self, entries: I) -> usize
    where
        I: IntoIterator<Item = (GridCoord, TileType)>,
    {
        self.clear();
        let mut dropped = 0;
        for (coord, tile) in entries {
            if self.set(coord, tile).is_err() {
                dropped += 1;
            }
        }
        dropped
    }

    /// Adopt new world bounds, dropping entries that fall outside them
    ///
    /// Returns the number of entries dropped.
    pub fn resize(&mut self, width: u32, height: u32) -> usize {
        self.width = width;
        self.height = height;

        let before = self.len;
        self.columns.retain(|&x, column| {
            if x >= width {
                return false;
            }
            column.retain(|&y, _| y < height);
            !column.is_empty()
        });
        self.len = self.columns.values().map(|c| c.len()).sum();
        before - self.len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> LevelStore {
        LevelStore::new(100, 24)
    }

    #[test]
    fn test_set_and_get() {
        let mut s = store();
        assert_eq!(s.set(GridCoord::new(3, 4), TileType::Brick), Ok(true));
        assert_eq!(s.get(GridCoord::new(3, 4)), Some(TileType::Brick));
        assert_eq!(s.get(GridCoord::new(4, 3)), None);
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn test_idempotent_placement() {
        let mut s = store();
        let c = GridCoord::new(5, 2);
        assert_eq!(s.set(c, TileType::Coin), Ok(true));
        assert_eq!(s.set(c, TileType::Coin), Ok(false));
        assert_eq!(s.len(), 1);
        assert_eq!(s.snapshot(), vec![(c, TileType::Coin)]);
    }

    #[test]
    fn test_overwrite_keeps_count() {
        let mut s = store();
        let c = GridCoord::new(1, 1);
        s.set(c, TileType::Coin).unwrap();
        assert_eq!(s.set(c, TileType::Goomba), Ok(true));
        assert_eq!(s.len(), 1);
        assert_eq!(s.get(c), Some(TileType::Goomba));
    }

    #[test]
    fn test_out_of_bounds_rejected() {
        let mut s = LevelStore::new(10, 5);
        let err = s.set(GridCoord::new(10, 0), TileType::Ground).unwrap_err();
        assert_eq!(err, StoreError::OutOfBounds { x: 10, y: 0, width: 10, height: 5 });
        assert!(s.set(GridCoord::new(0, 5), TileType::Ground).is_err());
        assert!(s.is_empty());
    }

    #[test]
    fn test_erase() {
        let mut s = store();
        let c = GridCoord::new(7, 7);
        assert_eq!(s.erase(c), None);
        s.set(c, TileType::Brick).unwrap();
        assert_eq!(s.erase(c), Some(TileType::Brick));
        assert!(s.is_empty());
        assert!(s.columns.is_empty(), "empty columns are dropped");
    }

    #[test]
    fn test_entries_in_range_is_exact() {
        let mut s = store();
        for x in 0..20 {
            for y in 0..10 {
                if (x + y) % 3 == 0 {
                    s.set(GridCoord::new(x, y), TileType::Ground).unwrap();
                }
            }
        }

        let found: Vec<_> = s.entries_in_range(5..12, 2..6).collect();
        for (c, _) in &found {
            assert!((5..12).contains(&c.x) && (2..6).contains(&c.y), "{} outside range", c);
        }
        let expected = s
            .iter()
            .filter(|(c, _)| (5..12).contains(&c.x) && (2..6).contains(&c.y))
            .count();
        assert_eq!(found.len(), expected);
    }

    #[test]
    fn test_entries_in_range_empty_and_inverted() {
        let mut s = store();
        s.set(GridCoord::new(2, 2), TileType::Coin).unwrap();
        assert_eq!(s.entries_in_range(3..3, 0..24).count(), 0);
        assert_eq!(s.entries_in_range(5..2, 0..24).count(), 0);
        assert_eq!(s.entries_in_range(0..10, 9..1).count(), 0);
    }

    #[test]
    fn test_snapshot_is_ordered() {
        let mut s = store();
        s.set(GridCoord::new(10, 1), TileType::Coin).unwrap();
        s.set(GridCoord::new(2, 9), TileType::Brick).unwrap();
        s.set(GridCoord::new(2, 3), TileType::Ground).unwrap();
        let coords: Vec<_> = s.snapshot().into_iter().map(|(c, _)| c).collect();
        assert_eq!(
            coords,
            vec![GridCoord::new(2, 3), GridCoord::new(2, 9), GridCoord::new(10, 1)]
        );
    }

    #[test]
    fn test_restore_replaces_contents() {
        let mut s = LevelStore::new(10, 10);
        s.set(GridCoord::new(1, 1), TileType::Brick).unwrap();
        let dropped = s.restore(vec![
            (GridCoord::new(2, 3), TileType::Coin),
            (GridCoord::new(50, 3), TileType::Coin),
        ]);
        assert_eq!(dropped, 1);
        assert_eq!(s.snapshot(), vec![(GridCoord::new(2, 3), TileType::Coin)]);
    }

    #[test]
    fn test_resize_drops_outside_entries() {
        let mut s = LevelStore::new(20, 20);
        s.set(GridCoord::new(1, 1), TileType::Brick).unwrap();
        s.set(GridCoord::new(15, 1), TileType::Brick).unwrap();
        s.set(GridCoord::new(1, 15), TileType::Brick).unwrap();

        assert_eq!(s.resize(10, 10), 2);
        assert_eq!(s.len(), 1);
        assert!(s.set(GridCoord::new(15, 1), TileType::Coin).is_err());
    }
}
