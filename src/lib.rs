pub mod assistant;
pub mod carousel;
pub mod content;
pub mod loading;
pub mod mascot;
pub mod scroll_nav;
pub mod sections;
pub mod typewriter;

#[cfg(target_arch = "wasm32")]
pub mod frontend;

#[cfg(not(target_arch = "wasm32"))]
pub mod server;
