/// Camera module - scene cameras and the fit-mode adjuster

pub mod camera;
pub mod fill_mode;

pub use camera::*;
pub use fill_mode::*;
