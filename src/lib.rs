pub mod camera;
pub mod demo;

// Re-export commonly used items
pub use camera::OrbitCameraPlugin;
pub use demo::DemoPlugin;
