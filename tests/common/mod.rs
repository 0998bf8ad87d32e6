pub mod stubs;
pub mod synthetic_scene;
