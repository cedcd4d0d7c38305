pub mod assets;
pub mod core;
pub mod loading;
pub mod scene;
