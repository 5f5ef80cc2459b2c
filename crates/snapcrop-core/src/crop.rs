//! Interactive crop overlay.
//!
//! [`CropState`] is a plain value: every transition consumes the current
//! state and returns the next one, so the host's input dispatch owns the only
//! copy and no state is shared.
//!
//! ```text
//!             enter_crop_mode
//!   Idle ─────────────────────────▶ Active(ActiveCrop)
//!    ▲                                  │  touch_start / touch_move / touch_end
//!    │      confirm_crop / cancel       │  (overlay re-clamped on every move)
//!    └──────────────────────────────────┘
//! ```
//!
//! While active, a touch that starts on the resize handle (a square centered
//! on the overlay's bottom-right corner) resizes the overlay; a touch that
//! starts elsewhere on the overlay moves it. Moves clamp the origin so the
//! whole overlay stays on the image. Resizes recompute the size from the
//! touch point and clamp it between the minimum size and the image edge.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::CropConfig;
use crate::decode::DecodedImage;
use crate::geometry::{PixelRect, PixelSize, Point, Rect};
use crate::mapping::{map_display_to_image, CropError};
use crate::vision::PixelCropper;

/// Which gesture the current touch sequence performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InteractionMode {
    #[default]
    None,
    Moving,
    Resizing,
}

/// Overlay state while crop mode is on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveCrop {
    display: Rect,
    crop: Rect,
    mode: InteractionMode,
    anchor: Point,
}

impl ActiveCrop {
    /// Start from an explicit overlay, e.g. one restored from a previous session.
    ///
    /// The overlay is fitted into `display`: each side is raised to the
    /// minimum size where the display allows and capped at the display side,
    /// then the origin is shifted so the whole overlay lies inside.
    pub fn with_crop_rect(display: Rect, crop: Rect, config: &CropConfig) -> Self {
        let width = crop.width.max(config.min_size).min(display.width).max(0.0);
        let height = crop.height.max(config.min_size).min(display.height).max(0.0);
        let crop = Rect::new(
            crop.x.min(display.max_x() - width).max(display.min_x()),
            crop.y.min(display.max_y() - height).max(display.min_y()),
            width,
            height,
        );
        Self {
            display,
            crop,
            mode: InteractionMode::None,
            anchor: Point::default(),
        }
    }

    pub fn display_rect(&self) -> Rect {
        self.display
    }

    pub fn crop_rect(&self) -> Rect {
        self.crop
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    /// The square grab area for resizing, centered on the bottom-right corner.
    pub fn resize_handle(&self, config: &CropConfig) -> Rect {
        Rect::centered_at(
            Point::new(self.crop.max_x(), self.crop.max_y()),
            config.handle_size,
            config.handle_size,
        )
    }

    /// The overlay in source pixels, as confirming now would crop it.
    pub fn pixel_rect(&self, image_size: PixelSize) -> Result<PixelRect, CropError> {
        map_display_to_image(self.crop, self.display, image_size)
    }
}

/// Input events driving the overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CropEvent {
    /// Turn crop mode on over the given display rectangle.
    Enter(Rect),
    TouchStart(Point),
    TouchMove(Point),
    TouchEnd,
    /// Leave crop mode without cropping.
    Cancel,
}

/// Crop mode state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum CropState {
    #[default]
    Idle,
    Active(ActiveCrop),
}

impl CropState {
    /// Apply one input event.
    pub fn apply(self, event: CropEvent, config: &CropConfig) -> Self {
        match event {
            CropEvent::Enter(display) => self.enter_crop_mode(display, config),
            CropEvent::TouchStart(point) => self.touch_start(point, config),
            CropEvent::TouchMove(point) => self.touch_move(point, config),
            CropEvent::TouchEnd => self.touch_end(),
            CropEvent::Cancel => self.cancel(),
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, CropState::Active(_))
    }

    pub fn active(&self) -> Option<&ActiveCrop> {
        match self {
            CropState::Active(active) => Some(active),
            CropState::Idle => None,
        }
    }

    /// Current overlay, if crop mode is on.
    pub fn crop_rect(&self) -> Option<Rect> {
        self.active().map(ActiveCrop::crop_rect)
    }

    pub fn mode(&self) -> InteractionMode {
        self.active().map_or(InteractionMode::None, ActiveCrop::mode)
    }

    /// Show the overlay centered on `display_rect`.
    ///
    /// Each side is `initial_fraction` of the display rectangle, raised to the
    /// minimum size where possible and never larger than the display. Calling
    /// this while already active resets the overlay.
    pub fn enter_crop_mode(self, display_rect: Rect, config: &CropConfig) -> Self {
        let fraction = config.initial_fraction.clamp(0.0, 1.0);
        let width = (display_rect.width * fraction).max(config.min_size).min(display_rect.width);
        let height = (display_rect.height * fraction).max(config.min_size).min(display_rect.height);

        let crop = Rect::new(
            display_rect.x.max(display_rect.x + (display_rect.width - width) / 2.0),
            display_rect.y.max(display_rect.y + (display_rect.height - height) / 2.0),
            width,
            height,
        );
        debug!(?display_rect, ?crop, "entered crop mode");
        CropState::Active(ActiveCrop::with_crop_rect(display_rect, crop, config))
    }

    /// Pick the gesture for a new touch: the resize handle wins over the body.
    pub fn touch_start(self, point: Point, config: &CropConfig) -> Self {
        let CropState::Active(mut active) = self else {
            return self;
        };

        active.mode = if active.resize_handle(config).contains(point) {
            InteractionMode::Resizing
        } else if active.crop.contains(point) {
            active.anchor = point;
            InteractionMode::Moving
        } else {
            InteractionMode::None
        };
        debug!(?point, mode = ?active.mode, "crop touch started");
        CropState::Active(active)
    }

    /// Move or resize the overlay towards `point`, keeping it on the image.
    pub fn touch_move(self, point: Point, config: &CropConfig) -> Self {
        let CropState::Active(mut active) = self else {
            return self;
        };
        let display = active.display;

        match active.mode {
            InteractionMode::None => {}
            InteractionMode::Moving => {
                let moved = active
                    .crop
                    .offset_by(point.x - active.anchor.x, point.y - active.anchor.y);
                let max_x = display.max_x() - active.crop.width;
                let max_y = display.max_y() - active.crop.height;

                active.crop.x = moved.x.min(max_x).max(display.min_x());
                active.crop.y = moved.y.min(max_y).max(display.min_y());
                active.anchor = point;
            }
            InteractionMode::Resizing => {
                let max_width = display.max_x() - active.crop.x;
                let max_height = display.max_y() - active.crop.y;

                active.crop.width = (point.x - active.crop.x).max(config.min_size).min(max_width);
                active.crop.height = (point.y - active.crop.y).max(config.min_size).min(max_height);
            }
        }
        CropState::Active(active)
    }

    pub fn touch_end(self) -> Self {
        match self {
            CropState::Active(mut active) => {
                active.mode = InteractionMode::None;
                CropState::Active(active)
            }
            CropState::Idle => CropState::Idle,
        }
    }

    pub fn cancel(self) -> Self {
        CropState::Idle
    }

    /// Leave crop mode, cropping `image` to the overlay.
    ///
    /// `image` must be upright and be the image the display rectangle was
    /// computed for. The cropper is only called when the overlay maps to at
    /// least one pixel on each axis. The returned state is always `Idle`.
    pub fn confirm_crop<C: PixelCropper + ?Sized>(
        self,
        image: &DecodedImage,
        cropper: &C,
    ) -> (CropState, Result<DecodedImage, CropError>) {
        let CropState::Active(active) = self else {
            warn!("crop confirmed while crop mode is off");
            return (
                CropState::Idle,
                Err(CropError::InvalidCropRegion {
                    width: 0.0,
                    height: 0.0,
                }),
            );
        };

        let result = active.pixel_rect(image.size()).and_then(|rect| {
            debug!(?rect, crop = ?active.crop, "confirming crop");
            cropper.crop(image, rect).map_err(CropError::from)
        });
        if let Err(err) = &result {
            warn!(%err, "crop rejected");
        }
        (CropState::Idle, result)
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use proptest::test_runner::TestCaseError;

    const EPS: f64 = 1e-9;

    fn display_strategy() -> impl Strategy<Value = Rect> {
        (-200.0f64..200.0, -200.0f64..200.0, 50.0f64..1500.0, 50.0f64..1500.0)
            .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
    }

    fn event_strategy() -> impl Strategy<Value = CropEvent> {
        let point = (-2000.0f64..2000.0, -2000.0f64..2000.0).prop_map(|(x, y)| Point::new(x, y));
        prop_oneof![
            point.clone().prop_map(CropEvent::TouchStart),
            point.prop_map(CropEvent::TouchMove),
            Just(CropEvent::TouchEnd),
        ]
    }

    fn assert_invariants(state: &CropState, config: &CropConfig) -> Result<(), TestCaseError> {
        if let CropState::Active(active) = state {
            let crop = active.crop_rect();
            let display = active.display_rect();
            prop_assert!(
                display.contains_rect(&crop, EPS),
                "{:?} escapes {:?}", crop, display
            );
            prop_assert!(crop.width >= config.min_size - EPS, "width {}", crop.width);
            prop_assert!(crop.height >= config.min_size - EPS, "height {}", crop.height);
        }
        Ok(())
    }

    proptest! {
        /// Property: The overlay stays on the image with at least the minimum size.
        #[test]
        fn prop_overlay_stays_inside_display(
            display in display_strategy(),
            events in proptest::collection::vec(event_strategy(), 0..60),
        ) {
            let config = CropConfig::default();
            let mut state = CropState::Idle.enter_crop_mode(display, &config);
            assert_invariants(&state, &config)?;

            for event in events {
                state = state.apply(event, &config);
                assert_invariants(&state, &config)?;
            }
        }

        /// Property: Gestures that start on the handle keep the overlay origin fixed.
        #[test]
        fn prop_resize_keeps_origin(
            display in display_strategy(),
            targets in proptest::collection::vec((-2000.0f64..2000.0, -2000.0f64..2000.0), 1..20),
        ) {
            let config = CropConfig::default();
            let entered = CropState::Idle.enter_crop_mode(display, &config);
            let before = entered.crop_rect().unwrap();
            let mut state = entered.touch_start(Point::new(before.max_x(), before.max_y()), &config);
            prop_assert_eq!(state.mode(), InteractionMode::Resizing);

            for (x, y) in targets {
                state = state.touch_move(Point::new(x, y), &config);
                let crop = state.crop_rect().unwrap();
                prop_assert_eq!((crop.x, crop.y), (before.x, before.y));
            }
        }

        /// Property: Entering crop mode is idempotent.
        #[test]
        fn prop_enter_is_idempotent(display in display_strategy()) {
            let config = CropConfig::default();
            let once = CropState::Idle.enter_crop_mode(display, &config);
            let twice = once.enter_crop_mode(display, &config);
            prop_assert_eq!(once, twice);
        }

        /// Property: Moves never change the overlay size.
        #[test]
        fn prop_move_preserves_size(
            display in display_strategy(),
            targets in proptest::collection::vec((-2000.0f64..2000.0, -2000.0f64..2000.0), 1..20),
        ) {
            let config = CropConfig::default();
            let entered = CropState::Idle.enter_crop_mode(display, &config);
            let before = entered.crop_rect().unwrap();
            let mut state = entered.touch_start(before.center(), &config);

            for (x, y) in targets {
                state = state.touch_move(Point::new(x, y), &config);
                let crop = state.crop_rect().unwrap();
                prop_assert_eq!((crop.width, crop.height), (before.width, before.height));
            }
        }
    }
}
