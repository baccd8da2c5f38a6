//! Device capability adapters backed by webview scripts.
//!
//! Each adapter implements a `priorities_core::device` trait by evaluating a
//! script in the Android webview and decoding its `{ ok, error, ... }` reply.
//! Captured media is persisted under the app captures directory and handed
//! around as local file paths.
#![cfg_attr(not(target_os = "android"), allow(dead_code))]

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine as _;
use priorities_core::device::{
    Camera, CameraFacing, HapticPattern, Haptics, ImageProcessor, MediaLibrary, PermissionGate,
    PermissionKind, PermissionStatus, PlatformResult,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;

#[cfg(target_os = "android")]
use dioxus::document;

const PERMISSION_STATUS_SCRIPT: &str = r#"
(() => {
    if (!navigator.permissions || !navigator.permissions.query) {
        return { ok: true, status: "prompt" };
    }
    return (async () => {
        try {
            const result = await navigator.permissions.query({ name: "__NAME__" });
            return { ok: true, status: result.state };
        } catch (error) {
            return { ok: true, status: "prompt" };
        }
    })();
})()
"#;

const PERMISSION_REQUEST_SCRIPT: &str = r#"
(() => {
    if (!navigator.mediaDevices || !navigator.mediaDevices.getUserMedia) {
        return { ok: false, error: "Media capture is unavailable in this runtime." };
    }
    return (async () => {
        try {
            const stream = await navigator.mediaDevices.getUserMedia(__CONSTRAINTS__);
            for (const track of stream.getTracks()) {
                track.stop();
            }
            return { ok: true, status: "granted" };
        } catch (error) {
            if (error && error.name === "NotAllowedError") {
                return { ok: true, status: "denied" };
            }
            return {
                ok: false,
                error: error && error.message ? error.message : String(error),
            };
        }
    })();
})()
"#;

const TAKE_PICTURE_SCRIPT: &str = r#"
(() => {
    if (!navigator.mediaDevices || !navigator.mediaDevices.getUserMedia) {
        return { ok: false, error: "Camera capture is unavailable in this runtime." };
    }
    return (async () => {
        let stream = null;
        try {
            stream = await navigator.mediaDevices.getUserMedia({
                video: { facingMode: "__FACING__" },
                audio: false,
            });
            const video = document.createElement("video");
            video.muted = true;
            video.playsInline = true;
            video.srcObject = stream;
            await video.play();

            const canvas = document.createElement("canvas");
            canvas.width = video.videoWidth;
            canvas.height = video.videoHeight;
            canvas.getContext("2d").drawImage(video, 0, 0);
            const dataUrl = canvas.toDataURL("image/jpeg", 0.95);
            return { ok: true, mimeType: "image/jpeg", base64: dataUrl.split(",")[1] || "" };
        } catch (error) {
            return {
                ok: false,
                error: error && error.message ? error.message : String(error),
            };
        } finally {
            if (stream) {
                for (const track of stream.getTracks()) {
                    track.stop();
                }
            }
        }
    })();
})()
"#;

const START_RECORDING_SCRIPT: &str = r#"
(() => {
    const state = window.__prioritiesRecorder;
    if (state && state.recorder && state.recorder.state !== "inactive") {
        return { ok: false, error: "A recording is already running." };
    }
    if (!navigator.mediaDevices || !navigator.mediaDevices.getUserMedia) {
        return { ok: false, error: "Video capture is unavailable in this runtime." };
    }
    return (async () => {
        try {
            const stream = await navigator.mediaDevices.getUserMedia({
                video: { facingMode: "__FACING__" },
                audio: true,
            });
            const preferredTypes = ["video/mp4", "video/webm;codecs=vp9", "video/webm"];
            let mimeType = "";
            for (const candidate of preferredTypes) {
                if (typeof MediaRecorder !== "undefined" && MediaRecorder.isTypeSupported(candidate)) {
                    mimeType = candidate;
                    break;
                }
            }

            const recorder = mimeType
                ? new MediaRecorder(stream, { mimeType })
                : new MediaRecorder(stream);
            const chunks = [];
            recorder.ondataavailable = (event) => {
                if (event.data && event.data.size > 0) {
                    chunks.push(event.data);
                }
            };
            recorder.start(250);

            window.__prioritiesRecorder = {
                recorder,
                stream,
                chunks,
                mimeType: mimeType || recorder.mimeType || "video/webm",
            };
            return { ok: true };
        } catch (error) {
            return {
                ok: false,
                error: error && error.message ? error.message : String(error),
            };
        }
    })();
})()
"#;

const STOP_RECORDING_SCRIPT: &str = r#"
(() => {
    const state = window.__prioritiesRecorder;
    if (!state || !state.recorder) {
        return { ok: false, error: "No active recording." };
    }
    const { recorder, stream, chunks, mimeType } = state;

    return (async () => {
        try {
            if (recorder.state !== "inactive") {
                await new Promise((resolve, reject) => {
                    recorder.addEventListener("stop", () => resolve(), { once: true });
                    recorder.addEventListener(
                        "error",
                        (event) => reject(event.error || new Error("Recorder stop failed")),
                        { once: true }
                    );
                    recorder.stop();
                });
            }

            const blob = new Blob(chunks, { type: mimeType });
            const bytes = new Uint8Array(await blob.arrayBuffer());
            let binary = "";
            const CHUNK = 0x8000;
            for (let i = 0; i < bytes.length; i += CHUNK) {
                binary += String.fromCharCode.apply(null, bytes.subarray(i, i + CHUNK));
            }
            return { ok: true, base64: btoa(binary), mimeType: blob.type || mimeType };
        } catch (error) {
            return {
                ok: false,
                error: error && error.message ? error.message : String(error),
            };
        } finally {
            if (stream && stream.getTracks) {
                for (const track of stream.getTracks()) {
                    track.stop();
                }
            }
            window.__prioritiesRecorder = null;
        }
    })();
})()
"#;

const SET_ZOOM_SCRIPT: &str = r"
(() => {
    const state = window.__prioritiesRecorder;
    if (!state || !state.stream) {
        return;
    }
    const [track] = state.stream.getVideoTracks();
    if (!track || !track.getCapabilities) {
        return;
    }
    const range = track.getCapabilities().zoom;
    if (!range) {
        return;
    }
    const zoom = range.min + (range.max - range.min) * __ZOOM__;
    track.applyConstraints({ advanced: [{ zoom }] }).catch(() => {});
})()
";

const TRANSFORM_IMAGE_SCRIPT: &str = r#"
(() => new Promise((resolve) => {
    const image = new Image();
    image.onload = () => {
        const canvas = document.createElement("canvas");
        canvas.width = image.naturalWidth;
        canvas.height = image.naturalHeight;
        const context = canvas.getContext("2d");
        if (__FLIP__) {
            context.translate(canvas.width, 0);
            context.scale(-1, 1);
        }
        context.drawImage(image, 0, 0);
        const dataUrl = canvas.toDataURL("image/jpeg", __QUALITY__);
        resolve({ ok: true, mimeType: "image/jpeg", base64: dataUrl.split(",")[1] || "" });
    };
    image.onerror = () => resolve({ ok: false, error: "Could not decode image." });
    image.src = "__SOURCE__";
}))()
"#;

const SAVE_TO_LIBRARY_SCRIPT: &str = r#"
(() => {
    try {
        const link = document.createElement("a");
        link.href = "__SOURCE__";
        link.download = "__NAME__";
        link.style.display = "none";
        document.body.appendChild(link);
        link.click();
        link.remove();
        return { ok: true, assetId: "__NAME__" };
    } catch (error) {
        return {
            ok: false,
            error: error && error.message ? error.message : String(error),
        };
    }
})()
"#;

const VIEWPORT_SCRIPT: &str = r"
(() => ({ width: window.innerWidth, height: window.innerHeight }))()
";

const SCROLL_OFFSET_SCRIPT: &str = r#"
(() => {
    const element = document.getElementById("__ID__");
    return element ? element.scrollTop : 0;
})()
"#;

#[derive(Debug, Deserialize)]
struct ViewportResult {
    width: f32,
    height: f32,
}

#[derive(Debug, Deserialize)]
struct ScriptResult {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PermissionResult {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MediaResult {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    base64: Option<String>,
    #[serde(default, rename = "mimeType")]
    mime_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SaveResult {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default, rename = "assetId")]
    asset_id: Option<String>,
}

/// Runtime permissions through the webview permission APIs.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebPermissions;

impl PermissionGate for WebPermissions {
    async fn status(&self, kind: PermissionKind) -> PermissionStatus {
        let Some(name) = permission_name(kind) else {
            return PermissionStatus::Granted;
        };
        let script = PERMISSION_STATUS_SCRIPT.replace("__NAME__", name);
        match run_script::<PermissionResult>(&script, "query permission").await {
            Ok(result) => parse_permission_result(kind, result),
            Err(error) => {
                tracing::warn!("Permission query for {} failed: {}", kind.label(), error);
                PermissionStatus::Denied
            }
        }
    }

    async fn request(&self, kind: PermissionKind) -> PermissionStatus {
        let Some(constraints) = permission_constraints(kind) else {
            return PermissionStatus::Granted;
        };
        let script = PERMISSION_REQUEST_SCRIPT.replace("__CONSTRAINTS__", constraints);
        match run_script::<PermissionResult>(&script, "request permission").await {
            Ok(result) => parse_permission_result(kind, result),
            Err(error) => {
                tracing::warn!("Permission request for {} failed: {}", kind.label(), error);
                PermissionStatus::Denied
            }
        }
    }
}

/// Camera capture through `getUserMedia` and `MediaRecorder`.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebCamera;

impl Camera for WebCamera {
    async fn take_picture(&self, facing: CameraFacing) -> PlatformResult<String> {
        let script = TAKE_PICTURE_SCRIPT.replace("__FACING__", facing_mode(facing));
        let result: MediaResult = run_script(&script, "take picture").await?;
        persist_media_result("photo", result)
    }

    async fn start_recording(&self, facing: CameraFacing) -> PlatformResult<()> {
        let script = START_RECORDING_SCRIPT.replace("__FACING__", facing_mode(facing));
        let result: ScriptResult = run_script(&script, "start recording").await?;
        parse_script_result(result, "Recording could not start.")
    }

    async fn stop_recording(&self) -> PlatformResult<String> {
        let result: MediaResult = run_script(STOP_RECORDING_SCRIPT, "stop recording").await?;
        persist_media_result("video", result)
    }

    fn set_zoom(&self, zoom: f32) {
        let script = SET_ZOOM_SCRIPT.replace("__ZOOM__", &format!("{:.3}", zoom.clamp(0.0, 1.0)));
        fire_script(&script);
    }
}

/// Saves media by handing a download to the system.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebMediaLibrary;

impl MediaLibrary for WebMediaLibrary {
    async fn save(&self, uri: &str) -> PlatformResult<String> {
        let path = Path::new(uri);
        let name = path
            .file_name()
            .and_then(|value| value.to_str())
            .ok_or_else(|| format!("Invalid media path: {uri}"))?;
        let source = read_data_url(path)?;
        let script = SAVE_TO_LIBRARY_SCRIPT
            .replace("__SOURCE__", &source)
            .replace("__NAME__", name);
        let result: SaveResult = run_script(&script, "save media").await?;
        parse_save_result(result)
    }
}

/// Image transforms through an offscreen canvas.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebImageProcessor;

impl WebImageProcessor {
    async fn transform(uri: &str, flip: bool, quality: f32) -> PlatformResult<String> {
        let source = read_data_url(Path::new(uri))?;
        let script = TRANSFORM_IMAGE_SCRIPT
            .replace("__FLIP__", if flip { "true" } else { "false" })
            .replace("__QUALITY__", &format!("{:.2}", quality.clamp(0.0, 1.0)))
            .replace("__SOURCE__", &source);
        let result: MediaResult = run_script(&script, "process image").await?;
        persist_media_result("photo", result)
    }
}

impl ImageProcessor for WebImageProcessor {
    async fn flip_horizontal(&self, uri: &str) -> PlatformResult<String> {
        Self::transform(uri, true, 1.0).await
    }

    async fn compress(&self, uri: &str, quality: f32) -> PlatformResult<String> {
        Self::transform(uri, false, quality).await
    }
}

/// Haptics through `navigator.vibrate`.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebHaptics;

impl Haptics for WebHaptics {
    fn trigger(&self, pattern: HapticPattern) {
        fire_script(&vibrate_script(pattern));
    }
}

/// Current webview size in CSS px.
pub async fn viewport_size() -> Result<(f32, f32), String> {
    let viewport: ViewportResult = run_script(VIEWPORT_SCRIPT, "measure viewport").await?;
    if viewport.width <= 0.0 || viewport.height <= 0.0 {
        return Err(format!(
            "Viewport reported an empty size: {}x{}",
            viewport.width, viewport.height
        ));
    }
    Ok((viewport.width, viewport.height))
}

/// Vertical scroll position of the element with `element_id`.
pub async fn scroll_offset(element_id: &str) -> Result<f32, String> {
    let script = SCROLL_OFFSET_SCRIPT.replace("__ID__", element_id);
    run_script(&script, "read scroll offset").await
}

#[cfg(target_os = "android")]
async fn run_script<T: DeserializeOwned>(script: &str, action: &str) -> Result<T, String> {
    document::eval(script)
        .join()
        .await
        .map_err(|error| format!("Failed to {action}: {error}"))
}

#[cfg(not(target_os = "android"))]
async fn run_script<T: DeserializeOwned>(_script: &str, action: &str) -> Result<T, String> {
    std::future::ready(()).await;
    Err(format!("Cannot {action}: device access is only available on Android builds."))
}

#[cfg(target_os = "android")]
fn fire_script(script: &str) {
    let _ = document::eval(script);
}

#[cfg(not(target_os = "android"))]
fn fire_script(_script: &str) {
    tracing::debug!("Skipping device script outside Android");
}

const fn permission_name(kind: PermissionKind) -> Option<&'static str> {
    match kind {
        PermissionKind::Camera => Some("camera"),
        PermissionKind::Microphone => Some("microphone"),
        PermissionKind::MediaLibrary => None,
    }
}

const fn permission_constraints(kind: PermissionKind) -> Option<&'static str> {
    match kind {
        PermissionKind::Camera => Some("{ video: true }"),
        PermissionKind::Microphone => Some("{ audio: true }"),
        PermissionKind::MediaLibrary => None,
    }
}

const fn facing_mode(facing: CameraFacing) -> &'static str {
    match facing {
        CameraFacing::Front => "user",
        CameraFacing::Back => "environment",
    }
}

fn vibrate_script(pattern: HapticPattern) -> String {
    let steps = pattern
        .vibration_ms()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    format!("navigator.vibrate && navigator.vibrate([{steps}]);")
}

fn parse_permission_result(kind: PermissionKind, result: PermissionResult) -> PermissionStatus {
    if !result.ok {
        tracing::warn!(
            "Permission check for {} failed: {}",
            kind.label(),
            result.error.as_deref().unwrap_or("unknown error")
        );
        return PermissionStatus::Denied;
    }

    match result.status.as_deref() {
        Some("granted") => PermissionStatus::Granted,
        Some("prompt") | None => PermissionStatus::Undetermined,
        Some(_) => PermissionStatus::Denied,
    }
}

fn parse_script_result(result: ScriptResult, fallback: &str) -> Result<(), String> {
    if result.ok {
        Ok(())
    } else {
        Err(result.error.unwrap_or_else(|| fallback.to_string()))
    }
}

fn parse_save_result(result: SaveResult) -> Result<String, String> {
    if !result.ok {
        return Err(result
            .error
            .unwrap_or_else(|| "Media could not be saved.".to_string()));
    }
    result
        .asset_id
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| "Media library returned no asset id.".to_string())
}

fn decode_media_result(result: MediaResult) -> Result<(String, Vec<u8>), String> {
    if !result.ok {
        return Err(result
            .error
            .unwrap_or_else(|| "Capture did not return any data.".to_string()));
    }

    let encoded = result
        .base64
        .ok_or_else(|| "Capture returned no payload. Check camera permissions.".to_string())?;
    let bytes = BASE64_STANDARD
        .decode(encoded.as_bytes())
        .map_err(|error| format!("Failed to decode captured media: {error}"))?;
    if bytes.is_empty() {
        return Err("Captured media is empty.".to_string());
    }

    let mime_type = result
        .mime_type
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| "image/jpeg".to_string());
    Ok((mime_type, bytes))
}

fn persist_media_result(prefix: &str, result: MediaResult) -> Result<String, String> {
    let (mime_type, bytes) = decode_media_result(result)?;
    let file_name = build_media_file_name(prefix, &mime_type);
    let path = persist_media(&crate::paths::captures_dir(), &file_name, &bytes)?;
    Ok(path.display().to_string())
}

fn build_media_file_name(prefix: &str, mime_type: &str) -> String {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0_u128, |duration| duration.as_nanos());
    format!("{prefix}-{timestamp}.{}", media_extension(mime_type))
}

fn persist_media(dir: &Path, file_name: &str, bytes: &[u8]) -> Result<PathBuf, String> {
    std::fs::create_dir_all(dir)
        .map_err(|error| format!("Failed to create captures directory: {error}"))?;
    let path = dir.join(file_name);
    std::fs::write(&path, bytes).map_err(|error| format!("Failed to write captured media: {error}"))?;
    Ok(path)
}

fn read_data_url(path: &Path) -> Result<String, String> {
    let bytes = std::fs::read(path)
        .map_err(|error| format!("Failed to read media {}: {error}", path.display()))?;
    Ok(format!(
        "data:{};base64,{}",
        mime_for_path(path),
        BASE64_STANDARD.encode(bytes)
    ))
}

fn media_extension(mime_type: &str) -> &'static str {
    let normalized = mime_type.trim().to_ascii_lowercase();

    if normalized.contains("png") {
        "png"
    } else if normalized.contains("jpeg") || normalized.contains("jpg") {
        "jpg"
    } else if normalized.contains("mp4") {
        "mp4"
    } else if normalized.starts_with("video/") {
        "webm"
    } else {
        "bin"
    }
}

fn mime_for_path(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|value| value.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("mp4") => "video/mp4",
        Some("webm") => "video/webm",
        _ => "application/octet-stream",
    }
}
