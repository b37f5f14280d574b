pub mod frame;
pub mod products;

pub use glam::{DMat3, DMat4, DVec2, DVec3, DVec4};
pub use frame::Frame;
pub use products::{MomentProducts, WireMoments};

pub type Point2 = DVec2;
pub type Point3 = DVec3;
pub type Vector2 = DVec2;
pub type Vector3 = DVec3;
