pub mod rasterizer;
pub mod renderer;
pub mod vertex;
