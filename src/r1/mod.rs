pub mod r1interval;
pub use r1interval::R1Interval;
