use std::time::{Duration, Instant};

use dioxus::prelude::*;
use dioxus_primitives::toast::{use_toast, ToastOptions};
use priorities_core::context::MountedFlag;
use priorities_core::device::{
    Camera, CameraFacing, CaptureError, CaptureFlow, HapticPattern, Haptics, SavedMedia,
};
use priorities_core::gesture::{Shutter, ShutterAction, ShutterState};
use priorities_core::Color;

use super::pointer_y;
use crate::platform::{WebCamera, WebHaptics, WebImageProcessor, WebMediaLibrary, WebPermissions};
use crate::state::{use_app_state, Screen};
use crate::ui::{ButtonVariant, UiButton};

/// Poll period for shutter deadlines
const SHUTTER_POLL: Duration = Duration::from_millis(16);

const SHUTTER_SIZE: u32 = 76;

#[component]
pub fn CameraScreen() -> Element {
    let state = use_app_state();
    let toasts = use_toast();
    let shutter_config = state.config.read().shutter;
    let capture_config = state.config.read().capture;
    let mut shutter = use_signal(move || Shutter::new(shutter_config));
    let mut facing = use_signal(|| CameraFacing::Back);

    let mounted = use_hook(MountedFlag::new);
    let drop_flag = mounted.clone();
    use_drop(move || drop_flag.unmount());

    use_effect(move || state.set_background(Color::BLACK));

    let perform = move |action: ShutterAction| {
        let mounted = mounted.clone();
        let facing = *facing.peek();
        spawn(async move {
            let flow = CaptureFlow::new(
                capture_config,
                &WebPermissions,
                &WebCamera,
                &WebMediaLibrary,
                &WebImageProcessor,
            );
            if let Some(zoom) = action.device_zoom() {
                WebCamera.set_zoom(zoom);
            }
            let outcome: Result<Option<SavedMedia>, CaptureError> = match action {
                ShutterAction::SetZoom(_) => return,
                ShutterAction::TakePhoto => flow.take_photo(facing, &mounted).await,
                ShutterAction::StartRecording => flow.start_recording(facing).await.map(|()| None),
                ShutterAction::StopRecording => flow.finish_recording(&mounted).await,
            };

            if !mounted.is_mounted() {
                tracing::debug!(?action, "Camera closed before the capture completed");
                return;
            }

            match outcome {
                Ok(saved) => {
                    if action == ShutterAction::TakePhoto {
                        shutter.write().capture_finished();
                    }
                    if let Some(saved) = saved {
                        WebHaptics.trigger(HapticPattern::Success);
                        toasts.success(
                            "Saved to your library".to_string(),
                            ToastOptions::new().description(saved.asset_id),
                        );
                    }
                }
                Err(error) => {
                    tracing::error!(?action, "Capture failed: {}", error);
                    shutter.write().abort();
                    WebHaptics.trigger(HapticPattern::Error);
                    let (title, message) = error.user_alert();
                    toasts.error(title.to_string(), ToastOptions::new().description(message));
                }
            }
        });
    };

    let on_tick = perform.clone();
    use_future(move || {
        let perform = on_tick.clone();
        async move {
            loop {
                tokio::time::sleep(SHUTTER_POLL).await;
                let now = Instant::now();
                let due = shutter
                    .peek()
                    .next_deadline()
                    .is_some_and(|deadline| deadline <= now);
                if !due {
                    continue;
                }
                let action = shutter.write().tick(now);
                if let Some(action) = action {
                    perform(action);
                }
            }
        }
    });

    let on_press = move |event: PointerEvent| {
        shutter.write().press(Instant::now(), pointer_y(&event));
    };
    let on_zoom = perform.clone();
    let on_drag = move |event: PointerEvent| {
        let action = shutter.write().drag(pointer_y(&event));
        if let Some(action) = action {
            on_zoom(action);
        }
    };
    let on_release = move |_: PointerEvent| {
        let action = shutter.write().release(Instant::now());
        if let Some(action) = action {
            perform(action);
        }
    };

    let current = shutter.read().state();
    let recording = shutter.read().is_recording();
    let zoom_percent = shutter.read().zoom() * 100.0;
    let ring = if recording { "#ef4444" } else { "#ffffff" };
    let hint = match current {
        ShutterState::Idle => "Tap for a photo, hold to record",
        ShutterState::PendingRecord { .. } => "Keep holding to record",
        ShutterState::Recording { .. } => "Slide up to zoom",
        ShutterState::FinishingRecord { .. } => "Finishing recording",
        ShutterState::Capturing => "Saving photo",
    };
    let facing_label = match facing() {
        CameraFacing::Back => "Back camera",
        CameraFacing::Front => "Front camera",
    };

    rsx! {
        div {
            style: "
                position: fixed;
                inset: 0;
                background: #000000;
                color: #ffffff;
                display: flex;
                flex-direction: column;
                touch-action: none;
            ",

            div {
                style: "display: flex; justify-content: space-between; align-items: center; padding: 12px 16px;",
                UiButton {
                    type: "button",
                    variant: ButtonVariant::Ghost,
                    disabled: recording,
                    onclick: move |_| state.navigate(Screen::Grid),
                    "Close"
                }
                UiButton {
                    type: "button",
                    variant: ButtonVariant::Outline,
                    disabled: current != ShutterState::Idle,
                    onclick: move |_| {
                        let next = facing().flipped();
                        facing.set(next);
                        WebHaptics.trigger(HapticPattern::Selection);
                    },
                    "Flip"
                }
            }

            div {
                style: "flex: 1; display: flex; flex-direction: column; align-items: center; justify-content: center; gap: 8px;",
                p { style: "margin: 0; font-size: 14px; opacity: 0.7;", "{facing_label}" }
                if recording {
                    p { style: "margin: 0; font-size: 13px; color: #fca5a5;", "● REC  {zoom_percent:.0}%" }
                }
            }

            div {
                style: "display: flex; flex-direction: column; align-items: center; gap: 12px; padding-bottom: 40px;",
                p { style: "margin: 0; font-size: 12px; opacity: 0.8;", "{hint}" }
                button {
                    type: "button",
                    aria_label: "Shutter",
                    style: "
                        width: {SHUTTER_SIZE}px;
                        height: {SHUTTER_SIZE}px;
                        border-radius: 50%;
                        border: 5px solid {ring};
                        background: transparent;
                        touch-action: none;
                    ",
                    onpointerdown: on_press,
                    onpointermove: on_drag,
                    onpointerup: on_release.clone(),
                    onpointercancel: on_release,
                }
            }
        }
    }
}
