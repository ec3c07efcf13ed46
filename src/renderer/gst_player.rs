use gst::prelude::*;
use gstreamer as gst;
use gstreamer_app as gst_app;
use gstreamer_video as gst_video;

use crate::error::MediaError;
use crate::renderer::media_element::{MediaElement, MediaEvent, VisualFilter};
use crate::types::media::FileDescriptor;

/// One decoded RGBA picture, ready to upload as a texture.
#[derive(Debug, Clone)]
pub struct VideoFrame {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// A `playbin` pipeline driving the preview, with an appsink for frames.
///
/// Frames land in an appsink scaled to the preview size. Brightness and
/// contrast go through a `videobalance` element installed as playbin's
/// video filter, so they only ever touch the preview picture.
pub struct GstMediaElement {
    playbin: gst::Element,
    appsink: gst_app::AppSink,
    balance: gst::Element,
    bus: gst::Bus,
    rate: f64,
    volume: f64,
    filter: Option<VisualFilter>,
    duration: Option<f64>,
    position: f64,
    frame: Option<VideoFrame>,
    frame_serial: u64,
}

fn load_err(e: impl std::fmt::Display) -> MediaError {
    MediaError::Load(e.to_string())
}

fn playback_err(e: impl std::fmt::Display) -> MediaError {
    MediaError::Playback(e.to_string())
}

impl GstMediaElement {
    /// Builds the pipeline for `source` and prerolls it (paused).
    pub fn open(source: &FileDescriptor, width: u32, height: u32) -> Result<Self, MediaError> {
        let _ = gst::init(); // Safe to call multiple times

        let uri = gst::glib::filename_to_uri(&source.path, None).map_err(load_err)?;

        let playbin = gst::ElementFactory::make("playbin")
            .property("uri", uri.as_str())
            .build()
            .map_err(load_err)?;

        let sink_description = format!(
            "videoconvert ! videoscale ! video/x-raw,format=RGBA,width={},height={},pixel-aspect-ratio=1/1 ! appsink name=sink max-buffers=1 drop=true",
            width, height
        );
        let sink_bin = gst::parse::bin_from_description(&sink_description, true).map_err(load_err)?;
        let appsink = sink_bin
            .by_name("sink")
            .and_then(|element| element.downcast::<gst_app::AppSink>().ok())
            .ok_or_else(|| MediaError::Load("appsink missing from preview sink".to_string()))?;

        let balance = gst::ElementFactory::make("videobalance")
            .build()
            .map_err(load_err)?;

        playbin.set_property("video-sink", &sink_bin);
        playbin.set_property("video-filter", &balance);

        let bus = playbin
            .bus()
            .ok_or_else(|| MediaError::Load("pipeline has no bus".to_string()))?;

        playbin.set_state(gst::State::Paused).map_err(load_err)?;
        tracing::info!(file = %source.file_name, width, height, "Preview pipeline created");

        Ok(Self {
            playbin,
            appsink,
            balance,
            bus,
            rate: 1.0,
            volume: 1.0,
            filter: None,
            duration: None,
            position: 0.0,
            frame: None,
            frame_serial: 0,
        })
    }

    fn position_clock(&self) -> gst::ClockTime {
        self.playbin
            .query_position::<gst::ClockTime>()
            .unwrap_or(gst::ClockTime::ZERO)
    }

    /// Flushing seek that keeps the given rate. Rate changes in GStreamer
    /// are expressed as seeks.
    fn seek_at_rate(&self, position: gst::ClockTime, rate: f64) -> Result<(), MediaError> {
        self.playbin
            .seek(
                rate,
                gst::SeekFlags::FLUSH | gst::SeekFlags::ACCURATE,
                gst::SeekType::Set,
                Some(position),
                gst::SeekType::None,
                gst::ClockTime::NONE,
            )
            .map_err(playback_err)
    }

    /// Pulls whatever the sink holds and keeps the newest frame.
    /// Returns a serial that changes whenever a new frame arrived.
    pub fn refresh_frame(&mut self) -> u64 {
        let sample = self
            .appsink
            .try_pull_sample(gst::ClockTime::ZERO)
            .or_else(|| self.appsink.try_pull_preroll(gst::ClockTime::ZERO));
        if let Some(frame) = sample.as_ref().and_then(frame_from_sample) {
            self.frame = Some(frame);
            self.frame_serial += 1;
        }
        self.frame_serial
    }

    pub fn frame(&self) -> Option<&VideoFrame> {
        self.frame.as_ref()
    }

    fn query_duration(&self) -> Option<f64> {
        self.playbin
            .query_duration::<gst::ClockTime>()
            .map(|d| d.seconds_f64())
    }
}

fn frame_from_sample(sample: &gst::Sample) -> Option<VideoFrame> {
    let info = gst_video::VideoInfo::from_caps(sample.caps()?).ok()?;
    let buffer = sample.buffer()?;
    let map = buffer.map_readable().ok()?;
    let width = info.width() as usize;
    let height = info.height() as usize;
    let stride = usize::try_from(info.stride()[0]).ok()?;
    let row_bytes = width * 4;

    let mut data = Vec::with_capacity(row_bytes * height);
    for row in 0..height {
        let start = row * stride;
        data.extend_from_slice(map.as_slice().get(start..start + row_bytes)?);
    }

    Some(VideoFrame {
        data,
        width: info.width(),
        height: info.height(),
    })
}

impl MediaElement for GstMediaElement {
    fn set_playback_rate(&mut self, rate: f64) {
        if (rate - self.rate).abs() < f64::EPSILON {
            return;
        }
        if rate <= 0.0 {
            tracing::warn!(rate, "Ignoring non-positive playback rate");
            return;
        }
        // Before preroll the seek is refused; the rate is retried next tick.
        match self.seek_at_rate(self.position_clock(), rate) {
            Ok(()) => self.rate = rate,
            Err(e) => tracing::debug!(rate, error = %e, "Rate change deferred"),
        }
    }

    fn set_volume(&mut self, volume: f64) {
        if (volume - self.volume).abs() < f64::EPSILON {
            return;
        }
        self.playbin.set_property("volume", volume.clamp(0.0, 10.0));
        self.volume = volume;
    }

    fn set_filter(&mut self, filter: VisualFilter) {
        if self.filter == Some(filter) {
            return;
        }
        // videobalance: brightness is an offset in [-1, 1], contrast a gain in [0, 2].
        self.balance
            .set_property("brightness", (filter.brightness - 1.0).clamp(-1.0, 1.0));
        self.balance
            .set_property("contrast", filter.contrast.clamp(0.0, 2.0));
        self.filter = Some(filter);
    }

    fn seek(&mut self, seconds: f64) -> Result<(), MediaError> {
        let position = gst::ClockTime::from_seconds_f64(seconds.max(0.0));
        self.seek_at_rate(position, self.rate)?;
        self.position = seconds.max(0.0);
        Ok(())
    }

    fn play(&mut self) -> Result<(), MediaError> {
        self.playbin
            .set_state(gst::State::Playing)
            .map(|_| ())
            .map_err(playback_err)
    }

    fn pause(&mut self) {
        if let Err(e) = self.playbin.set_state(gst::State::Paused) {
            tracing::warn!(error = %e, "Failed to pause preview");
        }
    }

    fn poll_events(&mut self) -> Vec<MediaEvent> {
        use gst::MessageView;

        let mut events = Vec::new();
        while let Some(msg) = self.bus.pop() {
            match msg.view() {
                MessageView::Error(err) => {
                    tracing::error!(
                        source = ?err.src().map(|s| s.path_string()),
                        debug = ?err.debug(),
                        "GStreamer error: {}",
                        err.error()
                    );
                    events.push(MediaEvent::Error(MediaError::Playback(err.error().to_string())));
                }
                MessageView::Eos(..) => events.push(MediaEvent::Ended),
                MessageView::AsyncDone(..) | MessageView::DurationChanged(..) => {
                    if let Some(duration) = self.query_duration() {
                        if self.duration != Some(duration) {
                            self.duration = Some(duration);
                            events.push(MediaEvent::MetadataLoaded { duration });
                        }
                    }
                }
                _ => (),
            }
        }

        if let Some(position) = self.playbin.query_position::<gst::ClockTime>() {
            let seconds = position.seconds_f64();
            if (seconds - self.position).abs() > f64::EPSILON {
                self.position = seconds;
                events.push(MediaEvent::TimeUpdate(seconds));
            }
        }
        events
    }
}

impl Drop for GstMediaElement {
    fn drop(&mut self) {
        let _ = self.playbin.set_state(gst::State::Null);
    }
}
