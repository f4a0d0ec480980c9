//! Camera capture for the scanner.
//!
//! A single manual frame per use: open the stream, sample one frame as
//! JPEG, close. No buffering, no continuous decoding.

use thiserror::Error;

/// JPEG encoder quality for captured frames.
pub const JPEG_QUALITY: f64 = 0.8;

/// Capture failures.
#[derive(Debug, Error)]
pub enum CaptureError {
    /// The user refused camera access
    #[error("camera permission denied")]
    PermissionDenied,

    /// Camera hardware or platform API unavailable
    #[error("camera unavailable: {0}")]
    Unavailable(String),
}

/// An open camera stream.
///
/// The stream is scoped to the Scanning phase: `close` must run on every
/// exit path — cancel, successful capture, and component teardown — so the
/// device is released. `close` is idempotent.
pub trait CameraSession {
    /// Sample the current video frame as a base64 JPEG payload (no
    /// data-URL prefix).
    fn capture_frame(&self) -> Result<String, CaptureError>;

    /// Stop every underlying media track.
    fn close(&self);

    /// Number of live media tracks. Zero after `close`.
    fn active_tracks(&self) -> usize;
}

/// Strip the `data:image/jpeg;base64,` prefix from a canvas data URL.
pub fn strip_data_url_prefix(data_url: &str) -> &str {
    data_url
        .split_once(',')
        .map(|(_, payload)| payload)
        .unwrap_or(data_url)
}

#[cfg(feature = "web")]
pub use browser::BrowserCamera;

#[cfg(feature = "web")]
mod browser {
    use super::*;

    use std::cell::RefCell;

    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{
        CanvasRenderingContext2d, HtmlCanvasElement, HtmlVideoElement, MediaStream,
        MediaStreamConstraints, MediaStreamTrack, MediaStreamTrackState,
    };

    /// Browser camera stream with a rear-facing preference.
    pub struct BrowserCamera {
        stream: MediaStream,
        video: RefCell<Option<HtmlVideoElement>>,
    }

    impl BrowserCamera {
        /// Request camera access via `getUserMedia`.
        ///
        /// A rejected promise is a refused permission prompt.
        pub async fn open() -> Result<Self, CaptureError> {
            let window = web_sys::window()
                .ok_or_else(|| CaptureError::Unavailable("no window".into()))?;
            let devices = window
                .navigator()
                .media_devices()
                .map_err(|_| CaptureError::Unavailable("media devices API missing".into()))?;

            let video_constraints = js_sys::Object::new();
            js_sys::Reflect::set(
                &video_constraints,
                &JsValue::from_str("facingMode"),
                &JsValue::from_str("environment"),
            )
            .map_err(|_| CaptureError::Unavailable("failed to build constraints".into()))?;

            let constraints = MediaStreamConstraints::new();
            constraints.set_video(&video_constraints.into());

            let promise = devices
                .get_user_media_with_constraints(&constraints)
                .map_err(|_| CaptureError::Unavailable("getUserMedia unsupported".into()))?;
            let stream = JsFuture::from(promise)
                .await
                .map_err(|_| CaptureError::PermissionDenied)?;

            Ok(Self {
                stream: stream.unchecked_into(),
                video: RefCell::new(None),
            })
        }

        /// Bind the stream to a `<video>` element for live preview.
        pub fn attach(&self, video: HtmlVideoElement) {
            video.set_src_object(Some(&self.stream));
            *self.video.borrow_mut() = Some(video);
        }
    }

    impl CameraSession for BrowserCamera {
        fn capture_frame(&self) -> Result<String, CaptureError> {
            let video = self.video.borrow();
            let video = video
                .as_ref()
                .ok_or_else(|| CaptureError::Unavailable("no video element attached".into()))?;

            let document = web_sys::window()
                .and_then(|w| w.document())
                .ok_or_else(|| CaptureError::Unavailable("no document".into()))?;
            let canvas: HtmlCanvasElement = document
                .create_element("canvas")
                .map_err(|_| CaptureError::Unavailable("canvas creation failed".into()))?
                .unchecked_into();
            canvas.set_width(video.video_width());
            canvas.set_height(video.video_height());

            let context: CanvasRenderingContext2d = canvas
                .get_context("2d")
                .ok()
                .flatten()
                .ok_or_else(|| CaptureError::Unavailable("2d context unavailable".into()))?
                .unchecked_into();
            context
                .draw_image_with_html_video_element(video, 0.0, 0.0)
                .map_err(|_| CaptureError::Unavailable("frame draw failed".into()))?;

            let data_url = canvas
                .to_data_url_with_type_and_encoder_options(
                    "image/jpeg",
                    &JsValue::from_f64(JPEG_QUALITY),
                )
                .map_err(|_| CaptureError::Unavailable("jpeg encoding failed".into()))?;

            Ok(strip_data_url_prefix(&data_url).to_string())
        }

        fn close(&self) {
            for track in self.stream.get_tracks().iter() {
                track.unchecked_into::<MediaStreamTrack>().stop();
            }
        }

        fn active_tracks(&self) -> usize {
            self.stream
                .get_tracks()
                .iter()
                .map(|track| track.unchecked_into::<MediaStreamTrack>())
                .filter(|track| track.ready_state() == MediaStreamTrackState::Live)
                .count()
        }
    }
}
