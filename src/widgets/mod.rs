//! This file is part of the xilem_audio_controls project.
//! (c) 2026 by Jacek Wisniowski
//!
//! This project was released as open source under the
//! Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
//! (compatible with the Xilem licence).

use std::ops::RangeInclusive;

use smallvec::SmallVec;
use xilem::masonry::vello::kurbo::{Point, Size};

use crate::control::{Control, Geometry};

pub mod arc_knob;
pub mod indexed_slider;
pub mod knob;

/// What a continuous control reports to its view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ControlAction {
    /// The user grabbed the control.
    Started,
    /// The value moved.
    Changed(f64),
    /// The user let go.
    Ended,
}

/// Begin a gesture at `location`. With `jump` the value also moves to the
/// pressed point.
///
/// Returns the actions to submit, in order.
pub(crate) fn press(
    control: &mut Control,
    value: &mut f64,
    location: Point,
    size: Size,
    jump: bool,
) -> SmallVec<[ControlAction; 2]> {
    let mut actions = SmallVec::new();
    control.start(value, location);
    if !control.is_active() {
        return actions;
    }
    actions.push(ControlAction::Started);
    if jump {
        actions.extend(drag(control, value, location, size));
    }
    actions
}

pub(crate) fn drag(control: &mut Control, value: &mut f64, location: Point, size: Size) -> Option<ControlAction> {
    control.update(value, location, size).map(ControlAction::Changed)
}

/// End the gesture, if there is one. Used for both release and cancel.
pub(crate) fn release(control: &mut Control) -> Option<ControlAction> {
    if !control.is_active() {
        return None;
    }
    control.end();
    Some(ControlAction::Ended)
}

/// Swap in a new range and geometry without dropping a gesture in progress.
pub(crate) fn reconfigure(
    control: &mut Control,
    range: RangeInclusive<f64>,
    geometry: Geometry,
    value: f64,
) {
    let old = std::mem::replace(control, Control::new(range.clone(), geometry));
    *control = old.reconfigured(range, geometry, value);
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    const SIZE: Size = Size::new(100.0, 100.0);

    fn slider() -> Control {
        Control::new(0.0..=1.0, Geometry::HorizontalPoint)
    }

    #[test]
    fn jump_press_reports_start_then_change() {
        let mut control = slider();
        let mut value = 0.0;
        let actions = press(&mut control, &mut value, Point::new(75.0, 10.0), SIZE, true);
        assert_eq!(actions.as_slice(), &[ControlAction::Started, ControlAction::Changed(0.75)]);
        assert_eq!(drag(&mut control, &mut value, Point::new(25.0, 10.0), SIZE), Some(ControlAction::Changed(0.25)));
        assert_eq!(release(&mut control), Some(ControlAction::Ended));
    }

    #[test]
    fn plain_press_only_starts() {
        let mut control = Control::new(0.0..=1.0, Geometry::TwoDimensionalDrag { x_sensitivity: 1.0, y_sensitivity: 1.0 });
        let mut value = 0.5;
        let actions = press(&mut control, &mut value, Point::new(50.0, 50.0), SIZE, false);
        assert_eq!(actions.as_slice(), &[ControlAction::Started]);
        assert_eq!(value, 0.5);
    }

    #[test]
    fn release_ends_exactly_once() {
        let ended = Arc::new(AtomicUsize::new(0));
        let mut control = slider().on_ended({
            let ended = Arc::clone(&ended);
            move || {
                ended.fetch_add(1, Ordering::SeqCst);
            }
        });
        let mut value = 0.0;
        press(&mut control, &mut value, Point::new(10.0, 0.0), SIZE, true);
        // Up followed by a stray Cancel.
        assert_eq!(release(&mut control), Some(ControlAction::Ended));
        assert_eq!(release(&mut control), None);
        assert_eq!(ended.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn disabling_mid_gesture_still_lets_release_end_it() {
        let mut control = slider();
        let mut value = 0.0;
        press(&mut control, &mut value, Point::new(40.0, 0.0), SIZE, true);
        control.set_enabled(false);
        assert_eq!(drag(&mut control, &mut value, Point::new(90.0, 0.0), SIZE), None);
        assert_eq!(release(&mut control), Some(ControlAction::Ended));
        assert!(!control.is_active());
    }

    #[test]
    fn disabled_press_reports_nothing() {
        let mut control = slider();
        control.set_enabled(false);
        let mut value = 0.0;
        assert!(press(&mut control, &mut value, Point::new(40.0, 0.0), SIZE, true).is_empty());
        assert_eq!(value, 0.0);
    }

    #[test]
    fn reconfigure_mid_gesture_keeps_session_and_callbacks() {
        let ended = Arc::new(AtomicUsize::new(0));
        let mut control = slider().on_ended({
            let ended = Arc::clone(&ended);
            move || {
                ended.fetch_add(1, Ordering::SeqCst);
            }
        });
        let mut value = 0.0;
        press(&mut control, &mut value, Point::new(50.0, 0.0), SIZE, true);
        reconfigure(&mut control, 0.0..=10.0, Geometry::HorizontalPoint, value);
        assert_eq!(drag(&mut control, &mut value, Point::new(20.0, 0.0), SIZE), Some(ControlAction::Changed(2.0)));
        assert_eq!(release(&mut control), Some(ControlAction::Ended));
        assert_eq!(ended.load(Ordering::SeqCst), 1);
    }
}
