pub mod animation;
pub mod app;
pub mod error;
pub mod intent;
pub mod model;
pub mod renderer;
pub mod settings;

pub const CONFY_APP_NAME: &str = "f1vis-rs";

pub use app::{Command, FrameOutput, Viewer};
pub use error::{Result, ViewerError};
pub use intent::IntentHandle;
