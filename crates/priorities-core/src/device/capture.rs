//! Capture pipeline shared by the camera screens.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{Camera, CameraFacing, ImageProcessor, MediaLibrary, PermissionGate, PermissionKind, PermissionStatus};
use crate::context::MountedFlag;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CaptureConfig {
    /// JPEG quality in [0, 1]
    pub jpeg_quality: f32,
    /// Un-mirror front camera photos before saving
    pub mirror_front_camera: bool,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            jpeg_quality: 0.8,
            mirror_front_camera: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptureError {
    #[error("Permission denied: {}", .0.label())]
    PermissionDenied(PermissionKind),

    #[error("Capture failed: {0}")]
    Capture(String),

    #[error("Image processing failed: {0}")]
    Processing(String),

    #[error("Saving to library failed: {0}")]
    Save(String),
}

impl CaptureError {
    /// Title and message for the one-shot alert shown to the user
    pub fn user_alert(&self) -> (&'static str, String) {
        match self {
            Self::PermissionDenied(kind) => (
                "Permission needed",
                format!(
                    "Allow {} access in Settings to continue.",
                    kind.label()
                ),
            ),
            Self::Capture(_) => (
                "Capture failed",
                "Something went wrong with the camera. Please try again.".to_string(),
            ),
            Self::Processing(_) | Self::Save(_) => (
                "Could not save",
                "The capture could not be saved to your library.".to_string(),
            ),
        }
    }
}

/// A capture stored in the device library
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedMedia {
    pub uri: String,
    pub asset_id: String,
}

/// Permission, capture, post-process and save, in that order.
///
/// Completions that arrive after the owning screen unmounted are dropped and
/// reported as `Ok(None)`.
pub struct CaptureFlow<'a, P, C, L, I> {
    config: CaptureConfig,
    permissions: &'a P,
    camera: &'a C,
    library: &'a L,
    images: &'a I,
}

impl<'a, P, C, L, I> CaptureFlow<'a, P, C, L, I>
where
    P: PermissionGate,
    C: Camera,
    L: MediaLibrary,
    I: ImageProcessor,
{
    pub const fn new(
        config: CaptureConfig,
        permissions: &'a P,
        camera: &'a C,
        library: &'a L,
        images: &'a I,
    ) -> Self {
        Self {
            config,
            permissions,
            camera,
            library,
            images,
        }
    }

    /// Prompt when undetermined; a refused permission is not asked again.
    pub async fn ensure_permission(&self, kind: PermissionKind) -> Result<(), CaptureError> {
        let status = match self.permissions.status(kind).await {
            PermissionStatus::Undetermined => self.permissions.request(kind).await,
            status => status,
        };

        if status == PermissionStatus::Granted {
            Ok(())
        } else {
            tracing::warn!(permission = kind.label(), "Permission denied");
            Err(CaptureError::PermissionDenied(kind))
        }
    }

    pub async fn take_photo(
        &self,
        facing: CameraFacing,
        mounted: &MountedFlag,
    ) -> Result<Option<SavedMedia>, CaptureError> {
        self.ensure_permission(PermissionKind::Camera).await?;

        let mut uri = self
            .camera
            .take_picture(facing)
            .await
            .map_err(CaptureError::Capture)?;
        if !mounted.is_mounted() {
            tracing::debug!("Discarding photo captured after unmount");
            return Ok(None);
        }

        if facing == CameraFacing::Front && self.config.mirror_front_camera {
            uri = self
                .images
                .flip_horizontal(&uri)
                .await
                .map_err(CaptureError::Processing)?;
        }
        let uri = self
            .images
            .compress(&uri, self.config.jpeg_quality)
            .await
            .map_err(CaptureError::Processing)?;

        self.save(uri, mounted).await
    }

    pub async fn start_recording(&self, facing: CameraFacing) -> Result<(), CaptureError> {
        self.ensure_permission(PermissionKind::Camera).await?;
        self.ensure_permission(PermissionKind::Microphone).await?;
        self.camera
            .start_recording(facing)
            .await
            .map_err(CaptureError::Capture)
    }

    pub async fn finish_recording(
        &self,
        mounted: &MountedFlag,
    ) -> Result<Option<SavedMedia>, CaptureError> {
        let uri = self
            .camera
            .stop_recording()
            .await
            .map_err(CaptureError::Capture)?;
        self.save(uri, mounted).await
    }

    async fn save(
        &self,
        uri: String,
        mounted: &MountedFlag,
    ) -> Result<Option<SavedMedia>, CaptureError> {
        if !mounted.is_mounted() {
            tracing::debug!(%uri, "Discarding capture after unmount");
            return Ok(None);
        }
        self.ensure_permission(PermissionKind::MediaLibrary).await?;

        let asset_id = self.library.save(&uri).await.map_err(CaptureError::Save)?;
        tracing::info!(%asset_id, "Saved capture to library");
        Ok(Some(SavedMedia { uri, asset_id }))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::device::PlatformResult;

    struct FakePermissions {
        status: PermissionStatus,
        on_request: PermissionStatus,
        requests: Cell<u32>,
    }

    impl FakePermissions {
        fn granted() -> Self {
            Self {
                status: PermissionStatus::Granted,
                on_request: PermissionStatus::Granted,
                requests: Cell::new(0),
            }
        }
    }

    impl PermissionGate for FakePermissions {
        async fn status(&self, _kind: PermissionKind) -> PermissionStatus {
            self.status
        }

        async fn request(&self, _kind: PermissionKind) -> PermissionStatus {
            self.requests.set(self.requests.get() + 1);
            self.on_request
        }
    }

    #[derive(Default)]
    struct FakeCamera {
        fail: bool,
        recording: Cell<bool>,
        unmount_on_capture: Option<MountedFlag>,
    }

    impl Camera for FakeCamera {
        async fn take_picture(&self, facing: CameraFacing) -> PlatformResult<String> {
            if let Some(mounted) = &self.unmount_on_capture {
                mounted.unmount();
            }
            if self.fail {
                return Err("camera unavailable".to_string());
            }
            Ok(format!("file:///tmp/{facing:?}.jpg").to_lowercase())
        }

        async fn start_recording(&self, _facing: CameraFacing) -> PlatformResult<()> {
            self.recording.set(true);
            Ok(())
        }

        async fn stop_recording(&self) -> PlatformResult<String> {
            if self.recording.replace(false) {
                Ok("file:///tmp/clip.mp4".to_string())
            } else {
                Err("not recording".to_string())
            }
        }

        fn set_zoom(&self, _zoom: f32) {}
    }

    #[derive(Default)]
    struct FakeLibrary {
        saved: RefCell<Vec<String>>,
    }

    impl MediaLibrary for FakeLibrary {
        async fn save(&self, uri: &str) -> PlatformResult<String> {
            let mut saved = self.saved.borrow_mut();
            saved.push(uri.to_string());
            Ok(format!("asset-{}", saved.len()))
        }
    }

    #[derive(Default)]
    struct FakeImages {
        steps: RefCell<Vec<&'static str>>,
    }

    impl ImageProcessor for FakeImages {
        async fn flip_horizontal(&self, uri: &str) -> PlatformResult<String> {
            self.steps.borrow_mut().push("flip");
            Ok(uri.replace(".jpg", "-flipped.jpg"))
        }

        async fn compress(&self, uri: &str, _quality: f32) -> PlatformResult<String> {
            self.steps.borrow_mut().push("compress");
            Ok(uri.to_string())
        }
    }

    #[tokio::test]
    async fn front_photo_is_flipped_compressed_and_saved() {
        let permissions = FakePermissions::granted();
        let camera = FakeCamera::default();
        let library = FakeLibrary::default();
        let images = FakeImages::default();
        let flow = CaptureFlow::new(CaptureConfig::default(), &permissions, &camera, &library, &images);

        let saved = flow
            .take_photo(CameraFacing::Front, &MountedFlag::new())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(saved.uri, "file:///tmp/front-flipped.jpg");
        assert_eq!(saved.asset_id, "asset-1");
        assert_eq!(*images.steps.borrow(), vec!["flip", "compress"]);
    }

    #[tokio::test]
    async fn back_photo_is_not_flipped() {
        let permissions = FakePermissions::granted();
        let camera = FakeCamera::default();
        let library = FakeLibrary::default();
        let images = FakeImages::default();
        let flow = CaptureFlow::new(CaptureConfig::default(), &permissions, &camera, &library, &images);

        flow.take_photo(CameraFacing::Back, &MountedFlag::new())
            .await
            .unwrap();
        assert_eq!(*images.steps.borrow(), vec!["compress"]);
        assert_eq!(*library.saved.borrow(), vec!["file:///tmp/back.jpg".to_string()]);
    }

    #[tokio::test]
    async fn denied_permission_is_not_requested_again() {
        let permissions = FakePermissions {
            status: PermissionStatus::Denied,
            on_request: PermissionStatus::Granted,
            requests: Cell::new(0),
        };
        let camera = FakeCamera::default();
        let library = FakeLibrary::default();
        let images = FakeImages::default();
        let flow = CaptureFlow::new(CaptureConfig::default(), &permissions, &camera, &library, &images);

        let err = flow
            .take_photo(CameraFacing::Back, &MountedFlag::new())
            .await
            .unwrap_err();
        assert_eq!(err, CaptureError::PermissionDenied(PermissionKind::Camera));
        assert_eq!(permissions.requests.get(), 0);
        assert_eq!(err.user_alert().0, "Permission needed");
    }

    #[tokio::test]
    async fn undetermined_permission_prompts_once() {
        let permissions = FakePermissions {
            status: PermissionStatus::Undetermined,
            on_request: PermissionStatus::Granted,
            requests: Cell::new(0),
        };
        let camera = FakeCamera::default();
        let library = FakeLibrary::default();
        let images = FakeImages::default();
        let flow = CaptureFlow::new(CaptureConfig::default(), &permissions, &camera, &library, &images);

        flow.ensure_permission(PermissionKind::Camera).await.unwrap();
        assert_eq!(permissions.requests.get(), 1);
    }

    #[tokio::test]
    async fn camera_failure_surfaces_capture_error() {
        let permissions = FakePermissions::granted();
        let camera = FakeCamera {
            fail: true,
            ..FakeCamera::default()
        };
        let library = FakeLibrary::default();
        let images = FakeImages::default();
        let flow = CaptureFlow::new(CaptureConfig::default(), &permissions, &camera, &library, &images);

        let err = flow
            .take_photo(CameraFacing::Back, &MountedFlag::new())
            .await
            .unwrap_err();
        assert!(matches!(err, CaptureError::Capture(_)));
        assert_eq!(err.user_alert().0, "Capture failed");
        assert!(library.saved.borrow().is_empty());
    }

    #[tokio::test]
    async fn completion_after_unmount_is_discarded() {
        let mounted = MountedFlag::new();
        let permissions = FakePermissions::granted();
        let camera = FakeCamera {
            unmount_on_capture: Some(mounted.clone()),
            ..FakeCamera::default()
        };
        let library = FakeLibrary::default();
        let images = FakeImages::default();
        let flow = CaptureFlow::new(CaptureConfig::default(), &permissions, &camera, &library, &images);

        let result = flow.take_photo(CameraFacing::Back, &mounted).await.unwrap();
        assert!(result.is_none());
        assert!(images.steps.borrow().is_empty());
        assert!(library.saved.borrow().is_empty());
    }

    #[tokio::test]
    async fn recording_round_trip_saves_clip() {
        let permissions = FakePermissions::granted();
        let camera = FakeCamera::default();
        let library = FakeLibrary::default();
        let images = FakeImages::default();
        let flow = CaptureFlow::new(CaptureConfig::default(), &permissions, &camera, &library, &images);
        let mounted = MountedFlag::new();

        flow.start_recording(CameraFacing::Back).await.unwrap();
        let saved = flow.finish_recording(&mounted).await.unwrap().unwrap();
        assert_eq!(saved.uri, "file:///tmp/clip.mp4");

        let err = flow.finish_recording(&mounted).await.unwrap_err();
        assert!(matches!(err, CaptureError::Capture(_)));
    }
}
