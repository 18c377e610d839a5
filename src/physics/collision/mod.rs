pub mod narrowphase;
pub mod shapes;
