use crate::types::media::FileDescriptor;
use crate::types::playback_state::PlaybackState;

/// MediaSession binds an uploaded file (owned here for the session's
/// lifetime) to its playback state and to the dashboard record created for
/// it. Replaced wholesale on the next upload; never serialized.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaSession {
    pub record_id: String,
    pub source: FileDescriptor,
    pub playback: PlaybackState,
}

impl MediaSession {
    pub fn new(record_id: String, source: FileDescriptor) -> Self {
        MediaSession {
            record_id,
            source,
            playback: PlaybackState::new(),
        }
    }
}
