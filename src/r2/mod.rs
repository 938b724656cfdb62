pub mod r2rect;
pub use r2rect::R2Rect;
