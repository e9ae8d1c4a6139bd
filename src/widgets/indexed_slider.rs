//! This file is part of the xilem_audio_controls project.
//! (c) 2026 by Jacek Wisniowski
//!
//! This project was released as open source under the
//! Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
//! (compatible with the Xilem licence).

use xilem::masonry::accesskit::{Node, Role};
use xilem::masonry::core::{
    AccessCtx, BoxConstraints, BrushIndex, EventCtx, LayoutCtx, PaintCtx, PointerButtonEvent,
    PointerEvent, PointerUpdate, PropertiesMut, PropertiesRef, RegisterCtx, StyleProperty, Update,
    UpdateCtx, Widget, WidgetId, WidgetMut, render_text,
};
use xilem::masonry::vello::Scene;
use xilem::masonry::vello::kurbo::{Affine, Point, Rect, RoundedRect, Size, Vec2};
use xilem::masonry::vello::peniko::Fill;

use xilem::masonry::parley::Layout;
use smallvec::SmallVec;
use tracing::trace_span;

use crate::control::{Control, Geometry};
use crate::range::clamp;
use crate::style::ControlStyle;
use crate::theme::TEXT_COLOR;
use crate::widgets::{drag, press, release};

const SLIDER_HEIGHT: f64 = 32.0;
const MIN_SEGMENT_WIDTH: f64 = 32.0;
const FONT_SIZE: f32 = 11.0;
/// Keeps the right edge inside the last segment instead of one past it.
const INDEX_SCALE: f64 = 0.99;

/// Segment selected by a normalized value.
pub(crate) fn derived_index(n: f64, count: usize) -> usize {
    if count == 0 {
        return 0;
    }
    let raw = (n * INDEX_SCALE * count as f64).floor();
    clamp(raw, &(0.0..=(count - 1) as f64)) as usize
}

/// Host-supplied index pulled into `0..count`.
pub(crate) fn clamp_index(index: usize, count: usize) -> usize {
    clamp(index, &(0..=count.saturating_sub(1)))
}

/// Normalized value in the middle of the band that selects `index`.
pub(crate) fn value_for_index(index: usize, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    clamp((index as f64 + 0.5) / (INDEX_SCALE * count as f64), &(0.0..=1.0))
}

/// A horizontal row of labelled segments; one of them is highlighted.
///
/// Touching or dragging picks the segment under the pointer.
pub struct IndexedSlider {
    value: f64,
    index: usize,
    labels: Vec<String>,
    control: Control,
    style: ControlStyle,
    /// Pre-built text layouts for each label
    text_layouts: Vec<Layout<BrushIndex>>,
    needs_layout: bool,
    /// Clamped initial index still to be reported to the host.
    correction: Option<usize>,
}

impl IndexedSlider {
    pub fn new(labels: Vec<String>, index: usize, style: ControlStyle) -> Self {
        let count = labels.len();
        let clamped = clamp_index(index, count);
        let correction = (clamped != index).then_some(clamped);
        let index = clamped;
        Self {
            value: value_for_index(index, count),
            index,
            labels,
            control: Control::new(0.0..=1.0, Geometry::HorizontalPoint),
            style,
            text_layouts: Vec::new(),
            needs_layout: true,
            correction,
        }
    }

    pub fn set_index(this: &mut WidgetMut<'_, Self>, index: usize) {
        let count = this.widget.labels.len();
        let index = clamp_index(index, count);
        if this.widget.index != index {
            this.widget.index = index;
            this.widget.value = value_for_index(index, count);
            this.ctx.request_render();
        }
    }

    pub fn set_labels(this: &mut WidgetMut<'_, Self>, labels: Vec<String>) {
        let count = labels.len();
        this.widget.labels = labels;
        this.widget.index = clamp_index(this.widget.index, count);
        this.widget.value = value_for_index(this.widget.index, count);
        this.widget.needs_layout = true;
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

    /// Recompute the index after a value change; `Some` if it moved.
    fn reindex(&mut self) -> Option<usize> {
        let index = derived_index(self.value, self.labels.len());
        if index == self.index {
            return None;
        }
        self.index = index;
        Some(index)
    }

    /// Press at `location`; `Some` if the selected segment moved.
    fn press_at(&mut self, location: Point, size: Size) -> Option<usize> {
        let actions = press(&mut self.control, &mut self.value, location, size, true);
        if actions.len() > 1 { self.reindex() } else { None }
    }

    /// Drag to `location`; `Some` if the selected segment moved.
    fn drag_to(&mut self, location: Point, size: Size) -> Option<usize> {
        drag(&mut self.control, &mut self.value, location, size)?;
        self.reindex()
    }

    fn segment_width(&self, width: f64) -> f64 {
        width / self.labels.len().max(1) as f64
    }
}

impl Widget for IndexedSlider {
    type Action = usize;

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
                if let Some(idx) = self.press_at(pos, ctx.size()) {
                    ctx.submit_action::<usize>(idx);
                    ctx.request_render();
                }
            }
            PointerEvent::Move(PointerUpdate { current, .. }) if !ctx.is_disabled() => {
                if ctx.is_active() {
                    let pos = ctx.local_position(current.position);
                    if let Some(idx) = self.drag_to(pos, ctx.size()) {
                        ctx.submit_action::<usize>(idx);
                        ctx.request_render();
                    }
                }
            }
            PointerEvent::Up(..) | PointerEvent::Cancel(..) => {
                release(&mut self.control);
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
                if let Some(idx) = self.correction.take() {
                    ctx.submit_action::<usize>(idx);
                }
            }
            Update::DisabledChanged(disabled) => {
                self.control.set_enabled(!disabled);
                ctx.request_render();
            }
            _ => {}
        }
    }

    fn layout(
        &mut self, ctx: &mut LayoutCtx<'_>, _props: &mut PropertiesMut<'_>, bc: &BoxConstraints,
    ) -> Size {
        // Build text layouts for each label
        if self.needs_layout || ctx.fonts_changed() {
            let (font_ctx, layout_ctx) = ctx.text_contexts();
            self.text_layouts.clear();
            for label in &self.labels {
                let mut builder = layout_ctx.ranged_builder(font_ctx, label, 1.0, true);
                builder.push_default(StyleProperty::FontSize(FONT_SIZE));
                builder.push_default(self.style.font_face.style_property());
                let mut layout = builder.build(label);
                layout.break_all_lines(None);
                self.text_layouts.push(layout);
            }
            self.needs_layout = false;
        }

        let widest = self.text_layouts.iter()
            .map(|l| l.width() as f64 + 8.0)
            .fold(MIN_SEGMENT_WIDTH, f64::max);
        let natural_w = widest * self.labels.len().max(1) as f64;
        let w = if bc.max().width.is_finite() { bc.max().width } else { natural_w };
        bc.constrain(Size::new(w, SLIDER_HEIGHT))
    }

    fn paint(&mut self, ctx: &mut PaintCtx<'_>, _props: &PropertiesRef<'_>, scene: &mut Scene) {
        let disabled = ctx.is_disabled();
        let background = ControlStyle::paint_color(self.style.background_color, disabled);
        let foreground = ControlStyle::paint_color(self.style.foreground_color, disabled);
        let text_color = ControlStyle::paint_color(TEXT_COLOR, disabled);
        let radius = self.style.corner_radius;

        self.control.content(ctx.size(), |size| {
            let bg = RoundedRect::from_rect(Rect::from_origin_size(Point::ZERO, size), radius);
            scene.fill(Fill::NonZero, Affine::IDENTITY, background, None, &bg);
            if self.labels.is_empty() { return; }

            // Highlighted segment
            let seg_w = self.segment_width(size.width);
            let x0 = self.index as f64 * seg_w;
            let seg = RoundedRect::from_rect(Rect::new(x0, 0.0, x0 + seg_w, size.height), radius);
            scene.fill(Fill::NonZero, Affine::IDENTITY, foreground, None, &seg);

            for (i, layout) in self.text_layouts.iter().enumerate() {
                let cx = (i as f64 + 0.5) * seg_w;
                let text_w = layout.width() as f64;
                let text_h = layout.height() as f64;
                render_text(
                    scene,
                    Affine::translate(Vec2::new(cx - text_w / 2.0, (size.height - text_h) / 2.0)),
                    layout,
                    &[text_color.into()],
                    true,
                );
            }
        });
    }

    fn accessibility_role(&self) -> Role { Role::Slider }

    fn accessibility(
        &mut self, _ctx: &mut AccessCtx<'_>, _props: &PropertiesRef<'_>, node: &mut Node,
    ) {
        node.set_numeric_value(self.index as f64);
        node.set_min_numeric_value(0.0);
        node.set_max_numeric_value(self.labels.len().saturating_sub(1) as f64);
        node.set_numeric_value_step(1.0);
        if let Some(label) = self.labels.get(self.index) {
            node.set_value(label.clone());
        }
    }

    fn children_ids(&self) -> SmallVec<[WidgetId; 16]> { SmallVec::new() }

    fn make_trace_span(&self, id: WidgetId) -> tracing::Span {
        trace_span!("IndexedSlider", id = id.trace())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::ACCENT_FOREGROUND;

    fn labels(count: usize) -> Vec<String> {
        (0..count).map(|i| format!("{i}")).collect()
    }

    #[test]
    fn full_value_selects_last_segment() {
        assert_eq!(derived_index(1.0, 14), 13);
        assert_eq!(derived_index(1.0, 4), 3);
        assert_eq!(derived_index(0.0, 14), 0);
    }

    #[test]
    fn midpoint_of_fourteen() {
        assert_eq!(derived_index(0.5, 14), 6);
    }

    #[test]
    fn empty_labels_never_index_out() {
        assert_eq!(derived_index(1.0, 0), 0);
        assert_eq!(clamp_index(7, 0), 0);
        assert_eq!(value_for_index(3, 0), 0.0);
    }

    #[test]
    fn host_index_is_clamped() {
        assert_eq!(clamp_index(20, 14), 13);
        assert_eq!(clamp_index(5, 14), 5);
        let slider = IndexedSlider::new(labels(3), 9, ControlStyle::new(ACCENT_FOREGROUND));
        assert_eq!(slider.index, 2);
        assert_eq!(slider.correction, Some(2));
        let slider = IndexedSlider::new(labels(3), 1, ControlStyle::new(ACCENT_FOREGROUND));
        assert_eq!(slider.correction, None);
    }

    #[test]
    fn value_for_index_round_trips_through_derivation() {
        for count in [1, 2, 7, 14, 64] {
            for index in 0..count {
                let n = value_for_index(index, count);
                assert_eq!(derived_index(n, count), index, "count {count}, index {index}");
            }
        }
    }

    #[test]
    fn pointer_position_selects_segment() {
        let mut slider = IndexedSlider::new(labels(14), 0, ControlStyle::new(ACCENT_FOREGROUND));
        let size = Size::new(140.0, SLIDER_HEIGHT);
        let mut pick = |x: f64| {
            slider.press_at(Point::new(x, 10.0), size);
            release(&mut slider.control);
            slider.index
        };
        assert_eq!(pick(140.0), 13);
        assert_eq!(pick(70.0), 6);
        assert_eq!(pick(0.0), 0);
        assert_eq!(pick(500.0), 13);
    }

    #[test]
    fn dragging_reports_only_segment_changes() {
        let mut slider = IndexedSlider::new(labels(4), 0, ControlStyle::new(ACCENT_FOREGROUND));
        let size = Size::new(100.0, SLIDER_HEIGHT);
        assert_eq!(slider.press_at(Point::new(10.0, 5.0), size), None);
        assert_eq!(slider.drag_to(Point::new(20.0, 5.0), size), None);
        assert_eq!(slider.drag_to(Point::new(60.0, 5.0), size), Some(2));
        release(&mut slider.control);
        assert_eq!(slider.drag_to(Point::new(90.0, 5.0), size), None);
        assert_eq!(slider.index, 2);
    }

    #[test]
    fn disabled_mid_drag_release_still_ends() {
        let mut slider = IndexedSlider::new(labels(4), 0, ControlStyle::new(ACCENT_FOREGROUND));
        let size = Size::new(100.0, SLIDER_HEIGHT);
        slider.press_at(Point::new(60.0, 5.0), size);
        slider.control.set_enabled(false);
        assert_eq!(slider.drag_to(Point::new(90.0, 5.0), size), None);
        release(&mut slider.control);
        assert!(!slider.control.is_active());
    }
}
