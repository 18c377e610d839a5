mod arena;
mod arena_config;
mod audio;
mod camera;
mod car;
mod car_config;
mod car_controls;
mod hud;
mod input;
mod linear_piece_curve;
mod race_config;
mod race_state;
mod race_tracker;
mod settings;
mod track;

pub use arena::*;
pub use arena_config::*;
pub use audio::*;
pub use camera::*;
pub use car::*;
pub use car_config::*;
pub use car_controls::*;
pub use hud::*;
pub use input::*;
pub use linear_piece_curve::*;
pub use race_config::*;
pub use race_state::*;
pub use race_tracker::*;
pub use settings::*;
pub use track::*;
