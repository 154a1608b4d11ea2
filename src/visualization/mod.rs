pub mod sink;
pub mod headless;
pub mod pasim_vis2d;
