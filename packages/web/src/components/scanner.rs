//! Camera scanner overlay.
//!
//! The camera stream is acquired on mount and released on every exit path:
//! cancel, successful capture, and component teardown (`use_drop`).

use dioxus::prelude::*;

/// Props for Scanner
#[derive(Props, Clone, PartialEq)]
pub struct ScannerProps {
    /// Called with the captured frame as a base64 JPEG payload
    pub on_capture: EventHandler<String>,
    /// Called when the user leaves the scanner without a capture
    pub on_close: EventHandler<()>,
}

/// Fullscreen scanner with live preview and a single manual capture button.
#[component]
pub fn Scanner(props: ScannerProps) -> Element {
    let on_capture = props.on_capture;
    let on_close = props.on_close;

    // None while the permission prompt is pending
    let mut permission = use_signal(|| None::<bool>);

    #[cfg(feature = "web")]
    let camera = use_signal(|| None::<crate::capture::BrowserCamera>);

    #[cfg(feature = "web")]
    {
        let mut camera = camera;
        use_future(move || async move {
            use wasm_bindgen::JsCast;

            match crate::capture::BrowserCamera::open().await {
                Ok(cam) => {
                    let video = web_sys::window()
                        .and_then(|w| w.document())
                        .and_then(|d| d.get_element_by_id("scanner-video"))
                        .and_then(|e| e.dyn_into::<web_sys::HtmlVideoElement>().ok());
                    if let Some(video) = video {
                        cam.attach(video);
                    }
                    camera.set(Some(cam));
                    permission.set(Some(true));
                }
                Err(err) => {
                    tracing::warn!(error = %err, "Camera open failed");
                    permission.set(Some(false));
                }
            }
        });

        use_drop(move || {
            use crate::capture::CameraSession;
            if let Some(cam) = camera.peek().as_ref() {
                cam.close();
            }
        });
    }

    let handle_capture = move |_| {
        #[cfg(feature = "web")]
        {
            use crate::capture::CameraSession;

            let frame = {
                let camera = camera.read();
                camera.as_ref().map(|cam| {
                    let frame = cam.capture_frame();
                    cam.close();
                    frame
                })
            };

            match frame {
                Some(Ok(frame)) => on_capture.call(frame),
                Some(Err(err)) => {
                    tracing::warn!(error = %err, "Frame capture failed");
                    on_close.call(());
                }
                None => on_close.call(()),
            }
        }
    };

    let handle_cancel = move |_| {
        #[cfg(feature = "web")]
        {
            use crate::capture::CameraSession;
            if let Some(cam) = camera.read().as_ref() {
                cam.close();
            }
        }
        on_close.call(());
    };

    rsx! {
        div {
            class: "fixed inset-0 bg-black z-50 flex flex-col overflow-hidden",

            if permission() == Some(false) {
                // Blocking screen with a single recovery action
                div {
                    class: "flex-1 flex flex-col items-center justify-center p-6 text-white",
                    h2 { class: "text-xl font-bold mb-2", "Camera Access Denied" }
                    p {
                        class: "text-center mb-6 text-gray-400",
                        "Please enable camera permissions in your browser settings to use the scanner."
                    }
                    button {
                        class: "bg-white text-black px-6 py-2 rounded-full font-semibold",
                        onclick: handle_cancel,
                        "Go Back"
                    }
                }
            } else {
                div {
                    class: "absolute top-0 left-0 right-0 p-4 flex justify-between items-center z-10",
                    button {
                        class: "text-white bg-black/50 w-10 h-10 rounded-full flex items-center justify-center",
                        onclick: handle_cancel,
                        "\u{2715}"
                    }
                    span {
                        class: "text-white font-medium text-sm bg-black/50 px-3 py-1 rounded-full",
                        "Scan Product"
                    }
                    div { class: "w-10" }
                }

                video {
                    id: "scanner-video",
                    class: "flex-1 object-cover",
                    autoplay: true,
                    muted: true,
                    "playsinline": "true",
                }

                div {
                    class: "absolute bottom-0 left-0 right-0 p-10 flex flex-col items-center",
                    button {
                        class: "w-20 h-20 bg-white rounded-full flex items-center justify-center shadow-2xl active:scale-95 transition-transform",
                        onclick: handle_capture,
                        div { class: "w-16 h-16 rounded-full border-4 border-gray-100" }
                    }
                    p {
                        class: "text-white mt-4 text-sm font-medium",
                        "Position product inside the frame"
                    }
                }
            }
        }
    }
}
