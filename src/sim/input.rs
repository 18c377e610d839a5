use super::ControlIntent;
use ahash::AHashSet;

/// Driving direction a key is bound to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Backward,
    Left,
    Right,
}

/// Keys with a driving binding: WASD and the arrow keys
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Key {
    W,
    A,
    S,
    D,
    ArrowUp,
    ArrowLeft,
    ArrowDown,
    ArrowRight,
}

impl Key {
    /// Parse a DOM `KeyboardEvent.key` value, ignoring case
    #[must_use]
    pub fn from_dom_key(key: &str) -> Option<Self> {
        Some(match key.to_ascii_lowercase().as_str() {
            "w" => Self::W,
            "a" => Self::A,
            "s" => Self::S,
            "d" => Self::D,
            "arrowup" => Self::ArrowUp,
            "arrowleft" => Self::ArrowLeft,
            "arrowdown" => Self::ArrowDown,
            "arrowright" => Self::ArrowRight,
            _ => return None,
        })
    }

    #[must_use]
    pub const fn direction(self) -> Direction {
        match self {
            Self::W | Self::ArrowUp => Direction::Forward,
            Self::S | Self::ArrowDown => Direction::Backward,
            Self::A | Self::ArrowLeft => Direction::Left,
            Self::D | Self::ArrowRight => Direction::Right,
        }
    }
}

/// Anything that can be polled once per tick for the driver's intent
pub trait InputSource {
    fn controls(&self) -> ControlIntent;
}

impl InputSource for ControlIntent {
    fn controls(&self) -> ControlIntent {
        *self
    }
}

/// Held-key tracker fed by key down/up events
#[derive(Clone, Debug, Default)]
pub struct KeyboardInput {
    held: AHashSet<Key>,
}

impl KeyboardInput {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the parsed key, or `None` if it has no binding
    pub fn key_down(&mut self, dom_key: &str) -> Option<Key> {
        let key = Key::from_dom_key(dom_key)?;
        self.held.insert(key);
        Some(key)
    }

    pub fn key_up(&mut self, dom_key: &str) -> Option<Key> {
        let key = Key::from_dom_key(dom_key)?;
        self.held.remove(&key);
        Some(key)
    }

    #[must_use]
    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Drop every held key, e.g. when the window loses focus
    pub fn release_all(&mut self) {
        self.held.clear();
    }

    fn direction_held(&self, direction: Direction) -> bool {
        self.held.iter().any(|key| key.direction() == direction)
    }
}

impl InputSource for KeyboardInput {
    fn controls(&self) -> ControlIntent {
        ControlIntent {
            forward: self.direction_held(Direction::Forward),
            backward: self.direction_held(Direction::Backward),
            left: self.direction_held(Direction::Left),
            right: self.direction_held(Direction::Right),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dom_keys() {
        assert_eq!(Key::from_dom_key("w"), Some(Key::W));
        assert_eq!(Key::from_dom_key("W"), Some(Key::W));
        assert_eq!(Key::from_dom_key("ArrowLeft"), Some(Key::ArrowLeft));
        assert_eq!(Key::from_dom_key("Shift"), None);
        assert_eq!(Key::from_dom_key(" "), None);
    }

    #[test]
    fn either_binding_holds_a_direction() {
        let mut input = KeyboardInput::new();
        input.key_down("w");
        input.key_down("ArrowUp");
        input.key_up("w");
        assert_eq!(input.controls(), ControlIntent::FORWARD);

        input.key_up("ArrowUp");
        assert!(input.controls().is_neutral());
    }

    #[test]
    fn repeated_events_collapse() {
        let mut input = KeyboardInput::new();
        input.key_down("d");
        input.key_down("d");
        input.key_down("a");
        let controls = input.controls();
        assert!(controls.left && controls.right);

        input.key_up("d");
        assert!(!input.controls().right);
        assert_eq!(input.key_up("Escape"), None);

        input.release_all();
        assert!(input.controls().is_neutral());
    }
}
