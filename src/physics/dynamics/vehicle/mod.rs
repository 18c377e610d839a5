pub mod raycast_vehicle;
pub mod raycaster;
pub mod wheel_info;

pub use raycast_vehicle::{NUM_WHEELS, RaycastVehicle};
pub use wheel_info::{WheelInfo, WheelInfoConstructionInfo};
