//! This file is part of the xilem_audio_controls project.
//! (c) 2026 by Jacek Wisniowski
//!
//! This project was released as open source under the
//! Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
//! (compatible with the Xilem licence).

use std::f64::consts::{FRAC_PI_2, TAU};
use std::ops::RangeInclusive;

use xilem::masonry::accesskit::{Node, Role};
use xilem::masonry::core::{
    AccessCtx, BoxConstraints, BrushIndex, EventCtx, LayoutCtx, PaintCtx, PointerButtonEvent,
    PointerEvent, PointerUpdate, PropertiesMut, PropertiesRef, RegisterCtx, StyleProperty, Update,
    UpdateCtx, Widget, WidgetId, WidgetMut, render_text,
};
use xilem::masonry::vello::Scene;
use xilem::masonry::vello::kurbo::{Affine, Arc, Cap, Point, Rect, RoundedRect, Size, Stroke, Vec2};
use xilem::masonry::vello::peniko::{Color, Fill};

use xilem::masonry::parley::Layout;
use smallvec::SmallVec;
use tracing::trace_span;

use crate::control::{Control, Geometry};
use crate::range::{clamp, normalized, span};
use crate::style::ControlStyle;
use crate::theme::{DEFAULT_MAXIMUM_ANGLE, DEFAULT_MINIMUM_ANGLE, TEXT_COLOR};
use crate::widgets::{ControlAction, drag, press, reconfigure, release};

const ARC_KNOB_SIZE: f64 = 80.0;
const ARC_WIDTH_FACTOR: f64 = 0.08;
const ARC_INSET: f64 = 6.0;
const FONT_SIZE: f32 = 12.0;

/// Fraction of a full turn covered by the filled arc, measured clockwise
/// from straight down.
///
/// The fill always runs between the origin and the value, so an arc knob
/// shows how far the value has been moved away from its origin.
pub(crate) fn trim_segment(n: f64, origin_n: f64, minimum: f64, maximum: f64) -> (f64, f64) {
    let start = minimum / 360.0;
    let sweep = (maximum - minimum) / 360.0;
    (start + n.min(origin_n) * sweep, start + n.max(origin_n) * sweep)
}

/// Text shown while the value is being dragged.
pub(crate) fn value_text(value: f64, range: &RangeInclusive<f64>) -> String {
    if span(range).abs() < 10.0 {
        format!("{value:.2}")
    } else {
        format!("{value:.0}")
    }
}

/// A knob filled along an arc, adjusted by pointing around its center.
///
/// The fill starts at `origin` rather than the lower bound, which suits
/// bipolar parameters such as pan. While the knob is held its label is
/// replaced by the numeric value.
pub struct ArcKnob {
    value: f64,
    origin: f64,
    label: String,
    control: Control,
    style: ControlStyle,
    text_layout: Option<Layout<BrushIndex>>,
    shown_text: String,
    needs_layout: bool,
    /// Clamped initial value still to be reported to the host.
    correction: Option<f64>,
}

impl ArcKnob {
    pub fn new(
        label: String,
        range: RangeInclusive<f64>,
        mut value: f64,
        origin: f64,
        geometry: Geometry,
        style: ControlStyle,
    ) -> Self {
        let control = Control::new(range, geometry);
        let correction = control.appear(&mut value).then_some(value);
        let origin = clamp(origin, control.range());
        Self {
            value,
            origin,
            shown_text: label.clone(),
            label,
            control,
            style,
            text_layout: None,
            needs_layout: true,
            correction,
        }
    }

    pub fn set_value(this: &mut WidgetMut<'_, Self>, value: f64) {
        let mut v = value;
        this.widget.control.appear(&mut v);
        if (this.widget.value - v).abs() > f64::EPSILON {
            this.widget.value = v;
            this.widget.refresh_text();
            this.ctx.request_layout();
        }
    }

    pub fn set_range(this: &mut WidgetMut<'_, Self>, range: RangeInclusive<f64>) {
        let geometry = this.widget.control.geometry();
        let value = this.widget.value;
        reconfigure(&mut this.widget.control, range, geometry, value);
        let mut v = this.widget.value;
        this.widget.control.appear(&mut v);
        this.widget.value = v;
        this.widget.origin = clamp(this.widget.origin, this.widget.control.range());
        this.widget.refresh_text();
        this.ctx.request_layout();
    }

    pub fn set_angular_span(this: &mut WidgetMut<'_, Self>, minimum: f64, maximum: f64) {
        let range = this.widget.control.range().clone();
        let value = this.widget.value;
        reconfigure(&mut this.widget.control, range, Geometry::Angle { minimum, maximum }, value);
        this.widget.refresh_text();
        this.ctx.request_layout();
    }

    pub fn set_origin(this: &mut WidgetMut<'_, Self>, origin: f64) {
        this.widget.origin = clamp(origin, this.widget.control.range());
        this.ctx.request_render();
    }

    pub fn set_label(this: &mut WidgetMut<'_, Self>, label: String) {
        this.widget.label = label;
        this.widget.refresh_text();
        this.ctx.request_layout();
    }

    pub fn set_style(this: &mut WidgetMut<'_, Self>, style: ControlStyle) {
        let font_changed = this.widget.style.font_face != style.font_face;
        this.widget.style = style;
        if font_changed {
            this.widget.needs_layout = true;
            this.ctx.request_layout();
        } else {
            this.ctx.request_render();
        }
    }

    fn showing_value(&self) -> bool {
        self.control.is_active()
    }

    fn refresh_text(&mut self) {
        let text = if self.showing_value() {
            value_text(self.value, self.control.range())
        } else {
            self.label.clone()
        };
        if text != self.shown_text {
            self.shown_text = text;
            self.needs_layout = true;
        }
    }

    fn angular_span(&self) -> (f64, f64) {
        match self.control.geometry() {
            Geometry::Angle { minimum, maximum } => (minimum, maximum),
            _ => (DEFAULT_MINIMUM_ANGLE, DEFAULT_MAXIMUM_ANGLE),
        }
    }

    fn trim(&self) -> (f64, f64) {
        let range = self.control.range();
        let (minimum, maximum) = self.angular_span();
        trim_segment(normalized(self.value, range), normalized(self.origin, range), minimum, maximum)
    }
}

/// Arc between two fractions of a turn, in kurbo's angle convention.
fn turn_arc(center: Point, radius: f64, from: f64, to: f64) -> Arc {
    Arc::new(center, Vec2::new(radius, radius), FRAC_PI_2 + from * TAU, (to - from) * TAU, 0.0)
}

impl Widget for ArcKnob {
    type Action = ControlAction;

    fn on_pointer_event(
        &mut self,
        ctx: &mut EventCtx<'_>,
        _props: &mut PropertiesMut<'_>,
        event: &PointerEvent,
    ) {
        match event {
            PointerEvent::Down(PointerButtonEvent { state, .. }) if !ctx.is_disabled() => {
                ctx.request_focus();
                ctx.capture_pointer();
                let pos = ctx.local_position(state.position);
                let size = ctx.size();
                // Pointing jumps straight to the touched angle.
                for action in press(&mut self.control, &mut self.value, pos, size, true) {
                    ctx.submit_action::<ControlAction>(action);
                }
                self.refresh_text();
                ctx.request_layout();
            }
            PointerEvent::Move(PointerUpdate { current, .. }) if !ctx.is_disabled() => {
                if ctx.is_active() {
                    let pos = ctx.local_position(current.position);
                    let size = ctx.size();
                    if let Some(action) = drag(&mut self.control, &mut self.value, pos, size) {
                        ctx.submit_action::<ControlAction>(action);
                        self.refresh_text();
                        ctx.request_layout();
                    }
                }
            }
            PointerEvent::Up(..) | PointerEvent::Cancel(..) => {
                if let Some(action) = release(&mut self.control) {
                    ctx.submit_action::<ControlAction>(action);
                    self.refresh_text();
                    ctx.request_layout();
                }
                if ctx.is_active() {
                    ctx.release_pointer();
                }
            }
            _ => {}
        }
    }

    fn accepts_pointer_interaction(&self) -> bool { true }
    fn accepts_focus(&self) -> bool { true }
    fn register_children(&mut self, _ctx: &mut RegisterCtx<'_>) {}

    fn update(&mut self, ctx: &mut UpdateCtx<'_>, _props: &mut PropertiesMut<'_>, event: &Update) {
        match event {
            Update::WidgetAdded => {
                if let Some(v) = self.correction.take() {
                    ctx.submit_action::<ControlAction>(ControlAction::Changed(v));
                }
            }
            Update::DisabledChanged(disabled) => {
                self.control.set_enabled(!disabled);
                ctx.request_render();
            }
            _ => {}
        }
    }

    fn layout(&mut self, ctx: &mut LayoutCtx<'_>, _props: &mut PropertiesMut<'_>, bc: &BoxConstraints) -> Size {
        if self.needs_layout || self.text_layout.is_none() || ctx.fonts_changed() {
            let (font_ctx, layout_ctx) = ctx.text_contexts();
            let mut builder = layout_ctx.ranged_builder(font_ctx, &self.shown_text, 1.0, true);
            builder.push_default(StyleProperty::FontSize(FONT_SIZE));
            builder.push_default(self.style.font_face.style_property());
            let mut layout = builder.build(&self.shown_text);
            layout.break_all_lines(None);
            self.text_layout = Some(layout);
            self.needs_layout = false;
        }
        bc.constrain(Size::new(ARC_KNOB_SIZE, ARC_KNOB_SIZE))
    }

    fn paint(&mut self, ctx: &mut PaintCtx<'_>, _props: &PropertiesRef<'_>, scene: &mut Scene) {
        let disabled = ctx.is_disabled();
        let background = ControlStyle::paint_color(self.style.background_color, disabled);
        let foreground = ControlStyle::paint_color(self.style.foreground_color, disabled);
        let text_color = ControlStyle::paint_color(TEXT_COLOR, disabled);
        let (from, to) = self.trim();
        let (minimum, maximum) = self.angular_span();
        let (track_from, track_to) = trim_segment(1.0, 0.0, minimum, maximum);

        self.control.content(ctx.size(), |size| {
            let bg = RoundedRect::from_rect(Rect::from_origin_size(Point::ZERO, size), self.style.corner_radius);
            scene.fill(Fill::NonZero, Affine::IDENTITY, background, None, &bg);

            let center = Point::new(size.width / 2.0, size.height / 2.0);
            let arc_w = size.width.min(size.height) * ARC_WIDTH_FACTOR;
            let r = size.width.min(size.height) / 2.0 - ARC_INSET - arc_w / 2.0;
            if r <= 0.0 { return; }
            let stroke = Stroke::new(arc_w).with_caps(Cap::Round);

            // Track
            let track = turn_arc(center, r, track_from, track_to);
            scene.stroke(&stroke, Affine::IDENTITY, Color::from_rgb8(0x40, 0x40, 0x40), None, &track);

            // Fill from origin to value
            if to - from > 1e-6 {
                let fill = turn_arc(center, r, from, to);
                scene.stroke(&stroke, Affine::IDENTITY, foreground, None, &fill);
            }

            if let Some(layout) = &self.text_layout {
                let text_w = layout.width() as f64;
                let text_h = layout.height() as f64;
                render_text(
                    scene,
                    Affine::translate(Vec2::new(center.x - text_w / 2.0, center.y - text_h / 2.0)),
                    layout,
                    &[text_color.into()],
                    true,
                );
            }
        });
    }

    fn accessibility_role(&self) -> Role { Role::Slider }

    fn accessibility(&mut self, _ctx: &mut AccessCtx<'_>, _props: &PropertiesRef<'_>, node: &mut Node) {
        node.set_label(self.label.clone());
        node.set_numeric_value(self.value);
        node.set_min_numeric_value(*self.control.range().start());
        node.set_max_numeric_value(*self.control.range().end());
    }

    fn children_ids(&self) -> SmallVec<[WidgetId; 16]> { SmallVec::new() }

    fn make_trace_span(&self, id: WidgetId) -> tracing::Span {
        trace_span!("ArcKnob", id = id.trace())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn empty_fill_at_origin() {
        let (from, to) = trim_segment(0.5, 0.5, 45.0, 315.0);
        assert!((from - to).abs() < EPS, "fill should be empty, got {from}..{to}");
    }

    #[test]
    fn full_sweep_from_lower_bound() {
        let (from, to) = trim_segment(1.0, 0.0, 45.0, 315.0);
        assert!((from - 0.125).abs() < EPS, "fill should start at 45 degrees, got {from}");
        assert!((to - 0.875).abs() < EPS, "fill should end at 315 degrees, got {to}");
    }

    #[test]
    fn bipolar_fill_runs_from_origin_either_way() {
        let right = trim_segment(0.75, 0.5, 45.0, 315.0);
        let left = trim_segment(0.25, 0.5, 45.0, 315.0);
        assert!((right.0 - 0.5).abs() < EPS && (right.1 - 0.6875).abs() < EPS, "{right:?}");
        assert!((left.0 - 0.3125).abs() < EPS && (left.1 - 0.5).abs() < EPS, "{left:?}");
    }

    #[test]
    fn origin_is_clamped_into_range() {
        let knob = ArcKnob::new(
            "Pan".into(),
            -1.0..=1.0,
            0.0,
            4.0,
            Geometry::angle(),
            ControlStyle::new(Color::WHITE),
        );
        assert_eq!(knob.origin, 1.0);
        assert_eq!(knob.trim(), trim_segment(0.5, 1.0, 45.0, 315.0));
    }

    #[test]
    fn shows_value_only_while_held() {
        let mut knob = ArcKnob::new(
            "Cutoff".into(),
            0.0..=100.0,
            40.0,
            0.0,
            Geometry::angle(),
            ControlStyle::new(Color::WHITE),
        );
        assert_eq!(knob.shown_text, "Cutoff");
        knob.control.start(&knob.value, Point::new(40.0, 40.0));
        knob.refresh_text();
        assert_eq!(knob.shown_text, "40");
        knob.control.end();
        knob.refresh_text();
        assert_eq!(knob.shown_text, "Cutoff");
    }

    #[test]
    fn release_after_disable_restores_label() {
        let mut knob = ArcKnob::new(
            "Cutoff".into(),
            0.0..=100.0,
            40.0,
            0.0,
            Geometry::angle(),
            ControlStyle::new(Color::WHITE),
        );
        let size = Size::new(ARC_KNOB_SIZE, ARC_KNOB_SIZE);
        let actions = press(&mut knob.control, &mut knob.value, Point::new(40.0, 70.0), size, true);
        assert_eq!(actions.first(), Some(&ControlAction::Started));
        knob.control.set_enabled(false);
        assert_eq!(release(&mut knob.control), Some(ControlAction::Ended));
        knob.refresh_text();
        assert_eq!(knob.shown_text, "Cutoff");
    }

    #[test]
    fn out_of_range_value_is_reported_as_correction() {
        let knob = ArcKnob::new(
            "Res".into(),
            0.0..=1.0,
            7.0,
            0.0,
            Geometry::angle(),
            ControlStyle::new(Color::WHITE),
        );
        assert_eq!(knob.value, 1.0);
        assert_eq!(knob.correction, Some(1.0));
    }

    #[test]
    fn small_ranges_show_decimals() {
        assert_eq!(value_text(-0.25, &(-1.0..=1.0)), "-0.25");
        assert_eq!(value_text(63.4, &(0.0..=127.0)), "63");
    }
}
