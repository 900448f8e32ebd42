pub mod config;
pub mod error;
pub mod export;
pub mod graph;
pub mod kinematics;
pub mod params;
pub mod playback;
pub mod scene;
pub mod solution;
pub mod surface;
pub mod window;
