use crate::consts::MS_TO_KMH;
use std::{fmt, time::Duration};

/// Palette for transient HUD messages
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NotificationColor {
    #[default]
    Yellow,
    Green,
    Gold,
    Orange,
}

impl NotificationColor {
    /// `(r, g, b, alpha)`
    #[must_use]
    pub const fn rgba(self) -> (u8, u8, u8, f32) {
        match self {
            Self::Yellow => (255, 255, 0, 0.75),
            Self::Green => (0, 255, 100, 0.75),
            Self::Gold => (255, 215, 0, 0.8),
            Self::Orange => (255, 100, 0, 0.75),
        }
    }
}

impl fmt::Display for NotificationColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (r, g, b, a) = self.rgba();
        write!(f, "rgba({r}, {g}, {b}, {a})")
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Notification {
    pub text: String,
    pub duration_ms: u32,
    pub color: NotificationColor,
}

impl Notification {
    pub const DEFAULT_DURATION_MS: u32 = 1000;

    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            duration_ms: Self::DEFAULT_DURATION_MS,
            color: NotificationColor::default(),
        }
    }

    #[must_use]
    pub const fn with_duration(mut self, duration_ms: u32) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    #[must_use]
    pub const fn with_color(mut self, color: NotificationColor) -> Self {
        self.color = color;
        self
    }

    #[must_use]
    pub const fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms as u64)
    }

    pub(crate) fn checkpoint() -> Self {
        Self::new("Checkpoint!")
    }

    pub(crate) fn lap(lap: u32, total: u32) -> Self {
        Self::new(format!("Lap {lap} / {total}"))
            .with_duration(2000)
            .with_color(NotificationColor::Green)
    }

    pub(crate) fn finished() -> Self {
        Self::new("Finished!")
            .with_duration(5000)
            .with_color(NotificationColor::Gold)
    }

    pub(crate) fn checkpoint_required() -> Self {
        Self::new("Checkpoint required first!")
            .with_duration(1500)
            .with_color(NotificationColor::Orange)
    }
}

/// Values the HUD widgets show for one frame
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HudFrame {
    /// Chassis speed in m/s
    pub speed: f32,
    pub lap_count: u32,
    pub total_laps: u32,
    pub elapsed_seconds: f32,
}

impl HudFrame {
    #[must_use]
    pub fn speed_kmh(&self) -> f32 {
        self.speed * MS_TO_KMH
    }

    /// Speed rounded to a whole km/h, as the speedometer shows it
    #[must_use]
    pub fn speed_label(&self) -> String {
        format!("{:.0} km/h", self.speed_kmh())
    }

    #[must_use]
    pub fn lap_label(&self) -> String {
        format!("Lap: {} / {}", self.lap_count, self.total_laps)
    }

    #[must_use]
    pub fn time_label(&self) -> String {
        format!("Time: {:.2}s", self.elapsed_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels() {
        let hud = HudFrame {
            speed: 10.0,
            lap_count: 1,
            total_laps: 3,
            elapsed_seconds: 12.345,
        };

        assert!((hud.speed_kmh() - 36.0).abs() < 1e-4);
        assert_eq!(hud.speed_label(), "36 km/h");
        assert_eq!(hud.lap_label(), "Lap: 1 / 3");
        assert_eq!(hud.time_label(), "Time: 12.35s");
    }

    #[test]
    fn race_messages() {
        let lap = Notification::lap(2, 3);
        assert_eq!(lap.text, "Lap 2 / 3");
        assert_eq!(lap.duration(), Duration::from_secs(2));
        assert_eq!(lap.color.to_string(), "rgba(0, 255, 100, 0.75)");

        let checkpoint = Notification::checkpoint();
        assert_eq!(checkpoint.duration_ms, 1000);
        assert_eq!(checkpoint.color, NotificationColor::Yellow);

        assert_eq!(Notification::finished().color.to_string(), "rgba(255, 215, 0, 0.8)");
    }
}
