pub mod media;
pub mod playback_state;
pub mod script;
pub mod session;
pub mod settings;
pub mod theme;
pub mod video_library;
pub mod workflow;
