pub mod gst_player;
pub mod media_element;
pub mod preview_sync;
