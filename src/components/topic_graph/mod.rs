mod animation;
mod component;
mod config;
mod emphasis;
mod format;
mod frame;
mod input;
mod interaction;
mod render;
mod state;
mod topology;
mod types;

pub use component::TopicGraphCanvas;
pub use state::TopicClicked;
pub use types::GraphData;
