pub mod app;
pub mod control_panel;
pub mod creator;
pub mod dashboard;
pub mod editor_page;
pub mod preview_page;
pub mod shell;
pub mod upload_page;
pub mod video_preview;
