pub mod s1angle;
pub mod s1interval;

pub use s1angle::S1Angle;
pub use s1interval::S1Interval;
