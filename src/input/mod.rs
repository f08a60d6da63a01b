//! Input — conditions, the held-key snapshot, and condition → action tables.

pub mod condition;

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};

pub use condition::{InputCondition, KeyCondition, PositionCondition};

/// Keys considered down right now, with the time each was last seen.
///
/// Most terminals only report presses (and auto-repeats), never releases,
/// so a game loop calls [`PressedKeys::expire`] each tick to drop keys that
/// have not been seen for a while.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PressedKeys {
    keys: HashMap<KeyCode, Instant>,
}

impl PressedKeys {
    pub fn press(&mut self, key: KeyCode) {
        self.press_at(key, Instant::now());
    }

    pub fn press_at(&mut self, key: KeyCode, at: Instant) {
        self.keys.insert(key, at);
    }

    pub fn release(&mut self, key: &KeyCode) {
        self.keys.remove(key);
    }

    pub fn contains(&self, key: &KeyCode) -> bool {
        self.keys.contains_key(key)
    }

    /// Forget keys last seen more than `hold` before `now`.
    pub fn expire(&mut self, now: Instant, hold: Duration) {
        self.keys
            .retain(|_, seen| now.saturating_duration_since(*seen) <= hold);
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn apply(&mut self, event: &KeyEvent) {
        match event.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => self.press(event.code),
            KeyEventKind::Release => self.release(&event.code),
        }
    }
}

impl FromIterator<KeyCode> for PressedKeys {
    fn from_iter<I: IntoIterator<Item = KeyCode>>(iter: I) -> Self {
        let now = Instant::now();
        Self {
            keys: iter.into_iter().map(|key| (key, now)).collect(),
        }
    }
}

/// An ordered table of `(condition, action)` pairs, evaluated uniformly.
#[derive(Debug, Clone)]
pub struct InputBindings<A> {
    bindings: Vec<(InputCondition, A)>,
}

impl<A> Default for InputBindings<A> {
    fn default() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }
}

impl<A> InputBindings<A> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, condition: impl Into<InputCondition>, action: A) -> &mut Self {
        self.bindings.push((condition.into(), action));
        self
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Actions whose condition matches `event`, in the order they were bound.
    pub fn evaluate_event<'a>(
        &'a self,
        event: &'a Event,
        pressed: &'a PressedKeys,
    ) -> impl Iterator<Item = &'a A> + 'a {
        self.bindings
            .iter()
            .filter(move |(condition, _)| condition.check_event(event, pressed))
            .map(|(_, action)| action)
    }

    pub fn evaluate_key<'a>(&'a self, key: &'a KeyCode) -> impl Iterator<Item = &'a A> + 'a {
        self.bindings
            .iter()
            .filter(move |(condition, _)| condition.check_key(key))
            .map(|(_, action)| action)
    }
}
