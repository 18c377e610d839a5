pub mod contact_constraint;
pub mod rigid_body;
pub mod vehicle;
pub mod world;
