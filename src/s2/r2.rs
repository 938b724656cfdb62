use crate::util::math::Vector2;

/// An R2Point represents a point in the (u,v) or (s,t) plane of a cube
/// face. See util/math/vector.rs for the methods available.
pub type R2Point = Vector2<f64>;
