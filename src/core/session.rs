//! The set of maps open in one interactive session
//!
//! Mirrors the "current open set" of the surrounding application: maps
//! are owned here, one of them may hold focus, and a periodic tick
//! autosaves every map except the focused one. Per-map save failures are
//! swallowed; the map stays modified and the next tick retries.

use crate::core::riskmap::RiskMap;

#[derive(Debug, Default)]
pub struct Session {
    maps: Vec<RiskMap>,
    focused: Option<usize>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a map to the open set and return its index
    pub fn open(&mut self, map: RiskMap) -> usize {
        self.maps.push(map);
        self.maps.len() - 1
    }

    pub fn close(&mut self, index: usize) -> Option<RiskMap> {
        if index >= self.maps.len() {
            return None;
        }
        match self.focused {
            Some(f) if f == index => self.focused = None,
            Some(f) if f > index => self.focused = Some(f - 1),
            _ => {}
        }
        Some(self.maps.remove(index))
    }

    pub fn maps(&self) -> &[RiskMap] {
        &self.maps
    }

    pub fn map_mut(&mut self, index: usize) -> Option<&mut RiskMap> {
        self.maps.get_mut(index)
    }

    pub fn focused(&self) -> Option<usize> {
        self.focused
    }

    pub fn focus(&mut self, index: usize) {
        if index < self.maps.len() {
            self.focused = Some(index);
        }
    }

    /// One autosave pass over every open map except the focused one;
    /// returns how many maps were actually written
    pub fn autosave_tick(&mut self) -> usize {
        let focused = self.focused;
        self.maps
            .iter_mut()
            .enumerate()
            .filter(|(i, _)| Some(*i) != focused)
            .map(|(_, map)| map.autosave())
            .filter(|saved| *saved)
            .count()
    }
}
