//! Input conditions — declarative predicates over a key or a mouse position.
//!
//! A condition is a value, not control flow: game setup builds them once and
//! the loop evaluates the whole table every tick. Each condition is either a
//! key condition or a position condition, never both, so checking a key
//! against a position condition (or the other way round) is simply `false`.

use crossterm::event::{Event, KeyCode, KeyEventKind, MouseEvent};
use serde::{Deserialize, Serialize};

use super::PressedKeys;
use crate::types::{Coord, Size};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyCondition {
    Exact(KeyCode),
    AnyOf(Vec<KeyCode>),
    AllOf(Vec<KeyCode>),
}

impl KeyCondition {
    /// Evaluate against a single polled key.
    ///
    /// `AllOf` is literal here: it holds only if every listed key *is* the
    /// polled key. Use [`KeyCondition::matches_pressed`] for chords. An empty
    /// `AllOf` never matches.
    pub fn matches(&self, key: &KeyCode) -> bool {
        match self {
            KeyCondition::Exact(expected) => expected == key,
            KeyCondition::AnyOf(keys) => keys.contains(key),
            KeyCondition::AllOf(keys) => !keys.is_empty() && keys.iter().all(|k| k == key),
        }
    }

    /// Evaluate against every key currently held.
    pub fn matches_pressed(&self, pressed: &PressedKeys) -> bool {
        match self {
            KeyCondition::Exact(expected) => pressed.contains(expected),
            KeyCondition::AnyOf(keys) => keys.iter().any(|k| pressed.contains(k)),
            KeyCondition::AllOf(keys) => {
                !keys.is_empty() && keys.iter().all(|k| pressed.contains(k))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionCondition {
    Exact(Coord),
    InRange { start: Coord, end: Coord },
    InArea { start: Coord, size: Size },
}

impl PositionCondition {
    pub fn matches(&self, coord: Coord) -> bool {
        match *self {
            PositionCondition::Exact(expected) => expected == coord,
            PositionCondition::InRange { start, end } => coord.is_in_range(start, end),
            PositionCondition::InArea { start, size } => coord.is_in_area(start, size),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputCondition {
    Key(KeyCondition),
    Position(PositionCondition),
}

impl InputCondition {
    /// True when the polled key is `key`.
    pub fn from_key(key: KeyCode) -> Self {
        InputCondition::Key(KeyCondition::Exact(key))
    }

    /// True when the mouse is exactly at `coord`.
    pub fn from_coord(coord: Coord) -> Self {
        InputCondition::Position(PositionCondition::Exact(coord))
    }

    /// True when the polled key is any of `keys`.
    pub fn any(keys: impl IntoIterator<Item = KeyCode>) -> Self {
        InputCondition::Key(KeyCondition::AnyOf(keys.into_iter().collect()))
    }

    /// "Every one of `keys`".
    ///
    /// Against a single key ([`InputCondition::check_key`]) this can only
    /// hold when all of `keys` equal that key. Against a held-key snapshot
    /// ([`InputCondition::check_pressed`]) it is a chord: every key must be
    /// down. An empty list never holds, whichever way it is checked.
    pub fn all(keys: impl IntoIterator<Item = KeyCode>) -> Self {
        InputCondition::Key(KeyCondition::AllOf(keys.into_iter().collect()))
    }

    /// True when the mouse is inside the closed rectangle `start..=end`.
    pub fn is_in_range(start: Coord, end: Coord) -> Self {
        InputCondition::Position(PositionCondition::InRange { start, end })
    }

    /// True when the mouse is inside the `size` cells anchored at `start`.
    pub fn is_in_area(start: Coord, size: Size) -> Self {
        InputCondition::Position(PositionCondition::InArea { start, size })
    }

    pub fn is_mouse_pos_condition(&self) -> bool {
        matches!(self, InputCondition::Position(_))
    }

    pub fn check_key(&self, key: &KeyCode) -> bool {
        match self {
            InputCondition::Key(condition) => condition.matches(key),
            InputCondition::Position(_) => false,
        }
    }

    pub fn check_coord(&self, coord: Coord) -> bool {
        match self {
            InputCondition::Key(_) => false,
            InputCondition::Position(condition) => condition.matches(coord),
        }
    }

    pub fn check_pressed(&self, pressed: &PressedKeys) -> bool {
        match self {
            InputCondition::Key(condition) => condition.matches_pressed(pressed),
            InputCondition::Position(_) => false,
        }
    }

    /// Evaluate a raw terminal event.
    ///
    /// Key presses are matched edge-triggered: `Exact`/`AnyOf` look at the
    /// pressed key, `AllOf` fires on the press that completes the chord in
    /// `pressed` (which must already include the event's key). Releases never
    /// match. Mouse events are matched on their cell position.
    pub fn check_event(&self, event: &Event, pressed: &PressedKeys) -> bool {
        match (self, event) {
            (InputCondition::Key(condition), Event::Key(key))
                if key.kind != KeyEventKind::Release =>
            {
                match condition {
                    KeyCondition::AllOf(keys) => {
                        keys.contains(&key.code) && condition.matches_pressed(pressed)
                    }
                    _ => condition.matches(&key.code),
                }
            }
            (InputCondition::Position(condition), Event::Mouse(mouse)) => {
                condition.matches(mouse_coord(mouse))
            }
            _ => false,
        }
    }
}

impl From<KeyCode> for InputCondition {
    fn from(key: KeyCode) -> Self {
        Self::from_key(key)
    }
}

impl From<Coord> for InputCondition {
    fn from(coord: Coord) -> Self {
        Self::from_coord(coord)
    }
}

pub fn mouse_coord(mouse: &MouseEvent) -> Coord {
    Coord::new(i32::from(mouse.column), i32::from(mouse.row))
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEvent, KeyModifiers, MouseEventKind};
    use pretty_assertions::assert_eq;

    use super::*;

    fn mouse_at(column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Moved,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn exact_key() {
        let condition = InputCondition::from_key(KeyCode::Char('a'));
        assert!(condition.check_key(&KeyCode::Char('a')));
        assert!(!condition.check_key(&KeyCode::Char('b')));
        assert!(!condition.is_mouse_pos_condition());
    }

    #[test]
    fn exact_coord() {
        let condition = InputCondition::from_coord(Coord::new(3, 4));
        assert!(condition.check_coord(Coord::new(3, 4)));
        assert!(!condition.check_coord(Coord::new(4, 3)));
        assert!(condition.is_mouse_pos_condition());
    }

    #[test]
    fn any_of_keys() {
        let condition = InputCondition::any([KeyCode::Char('a'), KeyCode::Char('b')]);
        assert!(condition.check_key(&KeyCode::Char('a')));
        assert!(condition.check_key(&KeyCode::Char('b')));
        assert!(!condition.check_key(&KeyCode::Char('c')));
    }

    #[test]
    fn all_of_keys_is_literal_against_one_key() {
        let chord = InputCondition::all([KeyCode::Char('a'), KeyCode::Char('b')]);
        assert!(!chord.check_key(&KeyCode::Char('a')));
        assert!(!chord.check_key(&KeyCode::Char('b')));

        let single = InputCondition::all([KeyCode::Enter]);
        assert!(single.check_key(&KeyCode::Enter));
    }

    #[test]
    fn empty_all_never_matches() {
        let empty = InputCondition::all(Vec::new());
        let pressed: PressedKeys = [KeyCode::Esc].into_iter().collect();
        assert!(!empty.check_key(&KeyCode::Esc));
        assert!(!empty.check_pressed(&pressed));
        assert!(!empty.check_pressed(&PressedKeys::default()));
        assert!(!empty.check_event(&press(KeyCode::Esc), &pressed));
    }

    #[test]
    fn all_of_keys_is_a_chord_against_held_keys() {
        let chord = InputCondition::all([KeyCode::Char('a'), KeyCode::Char('b')]);
        let mut pressed = PressedKeys::default();
        pressed.press(KeyCode::Char('a'));
        assert!(!chord.check_pressed(&pressed));
        pressed.press(KeyCode::Char('b'));
        assert!(chord.check_pressed(&pressed));
    }

    #[test]
    fn rectangle_by_corners_is_closed() {
        let condition = InputCondition::is_in_range(Coord::new(0, 0), Coord::new(10, 10));
        assert!(condition.check_coord(Coord::new(5, 5)));
        assert!(condition.check_coord(Coord::new(10, 10)));
        assert!(!condition.check_coord(Coord::new(11, 5)));
    }

    #[test]
    fn rectangle_by_size() {
        let condition = InputCondition::is_in_area(Coord::new(10, 10), Size::new(5, 2));
        assert!(condition.check_coord(Coord::new(14, 11)));
        assert!(!condition.check_coord(Coord::new(15, 11)));
    }

    #[test]
    fn wrong_mode_never_matches() {
        let key = InputCondition::from_key(KeyCode::Char('a'));
        let position = InputCondition::is_in_range(Coord::new(0, 0), Coord::new(100, 100));
        assert!(!key.check_coord(Coord::new(1, 1)));
        assert!(!position.check_key(&KeyCode::Char('a')));
        assert!(!position.check_pressed(&PressedKeys::default()));
    }

    #[test]
    fn dispatches_raw_events() {
        let pressed = PressedKeys::default();
        let key = InputCondition::from_key(KeyCode::Char('q'));
        let area = InputCondition::is_in_area(Coord::new(0, 0), Size::new(2, 2));

        assert!(key.check_event(&press(KeyCode::Char('q')), &pressed));
        assert!(!key.check_event(&mouse_at(0, 0), &pressed));
        assert!(area.check_event(&mouse_at(1, 1), &pressed));
        assert!(!area.check_event(&mouse_at(2, 1), &pressed));
        assert!(!area.check_event(&press(KeyCode::Char('q')), &pressed));

        let release = Event::Key(KeyEvent::new_with_kind(
            KeyCode::Char('q'),
            KeyModifiers::NONE,
            KeyEventKind::Release,
        ));
        assert!(!key.check_event(&release, &pressed));
    }

    #[test]
    fn chord_fires_on_completing_press() {
        let chord = InputCondition::all([KeyCode::Char('a'), KeyCode::Char('b')]);
        let mut pressed = PressedKeys::default();
        pressed.press(KeyCode::Char('a'));
        pressed.press(KeyCode::Char('b'));
        pressed.press(KeyCode::Char('z'));

        assert!(chord.check_event(&press(KeyCode::Char('b')), &pressed));
        assert!(!chord.check_event(&press(KeyCode::Char('z')), &pressed));
    }

    #[test]
    fn round_trips_through_json() {
        let condition = InputCondition::any([KeyCode::Esc, KeyCode::Char('q')]);
        let json = serde_json::to_string(&condition).unwrap();
        let back: InputCondition = serde_json::from_str(&json).unwrap();
        assert_eq!(back, condition);

        let area = InputCondition::is_in_area(Coord::new(1, 2), Size::new(3, 4));
        let json = serde_json::to_string(&area).unwrap();
        assert_eq!(
            json,
            r#"{"position":{"in_area":{"start":{"x":1,"y":2},"size":{"width":3,"height":4}}}}"#
        );
    }
}
