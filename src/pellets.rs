use std::collections::BTreeSet;

use crate::components::Tile;
use crate::level::Level;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Consumed {
    Nothing,
    Pellet,
    Power,
}

/// Collectibles still on the board. Two disjoint sets that only shrink
/// until the level is refilled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PelletField {
    pellets: BTreeSet<Tile>,
    power_pellets: BTreeSet<Tile>,
}

impl PelletField {
    pub fn new(level: &Level) -> Self {
        Self {
            pellets: level.pellets.clone(),
            power_pellets: level.power_pellets.clone(),
        }
    }

    pub fn refill(&mut self, level: &Level) {
        self.pellets.clone_from(&level.pellets);
        self.power_pellets.clone_from(&level.power_pellets);
    }

    pub fn consume(&mut self, tile: Tile) -> Consumed {
        if self.pellets.remove(&tile) {
            Consumed::Pellet
        } else if self.power_pellets.remove(&tile) {
            Consumed::Power
        } else {
            Consumed::Nothing
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pellets.is_empty() && self.power_pellets.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.pellets.len() + self.power_pellets.len()
    }

    pub fn pellets(&self) -> &BTreeSet<Tile> {
        &self.pellets
    }

    pub fn power_pellets(&self) -> &BTreeSet<Tile> {
        &self.power_pellets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field() -> (Level, PelletField) {
        let level = Level::classic().unwrap();
        let field = PelletField::new(&level);
        (level, field)
    }

    #[test]
    fn test_consume_pellet_then_nothing() {
        let (_, mut field) = field();
        let before = field.remaining();
        assert_eq!(field.consume(Tile::new(1, 1)), Consumed::Pellet);
        assert_eq!(field.remaining(), before - 1);

        let snapshot = field.clone();
        assert_eq!(field.consume(Tile::new(1, 1)), Consumed::Nothing);
        assert_eq!(field, snapshot);
    }

    #[test]
    fn test_consume_wall_or_outside_is_noop() {
        let (_, mut field) = field();
        let snapshot = field.clone();
        assert_eq!(field.consume(Tile::new(0, 0)), Consumed::Nothing);
        assert_eq!(field.consume(Tile::new(-4, 99)), Consumed::Nothing);
        assert_eq!(field, snapshot);
    }

    #[test]
    fn test_consume_power() {
        let (_, mut field) = field();
        assert_eq!(field.consume(Tile::new(18, 12)), Consumed::Power);
        assert!(!field.power_pellets().contains(&Tile::new(18, 12)));
    }

    #[test]
    fn test_empties_and_refills() {
        let (level, mut field) = field();
        let all: Vec<Tile> = level
            .pellets
            .iter()
            .chain(level.power_pellets.iter())
            .copied()
            .collect();
        for tile in &all {
            assert!(!field.is_empty());
            assert_ne!(field.consume(*tile), Consumed::Nothing);
        }
        assert!(field.is_empty());
        assert_eq!(field.remaining(), 0);

        field.refill(&level);
        assert_eq!(field.remaining(), all.len());
    }
}
