pub mod color;
pub mod framebuffer;
pub mod geometry;
pub mod math;
