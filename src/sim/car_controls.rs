/// Held-direction snapshot for one tick
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ControlIntent {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

impl ControlIntent {
    /// Nothing held: no throttle, no steering
    pub const NEUTRAL: Self = Self {
        forward: false,
        backward: false,
        left: false,
        right: false,
    };

    pub const FORWARD: Self = Self {
        forward: true,
        ..Self::NEUTRAL
    };

    #[must_use]
    pub const fn is_neutral(&self) -> bool {
        !(self.forward || self.backward || self.left || self.right)
    }

    /// True when a throttle direction is held, which keeps the engine loop playing
    #[must_use]
    pub const fn has_throttle(&self) -> bool {
        self.forward || self.backward
    }
}
