//! This file is part of the xilem_audio_controls project.
//! (c) 2026 by Jacek Wisniowski
//!
//! This project was released as open source under the
//! Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
//! (compatible with the Xilem licence).

use xilem::core::{MessageContext, Mut, View, ViewMarker};
use xilem::core::MessageResult;
use xilem::masonry::vello::peniko::Color;
use xilem::{Pod, ViewCtx};

use crate::style::{FontFace, StyleOverrides};
use crate::theme::ACCENT_FOREGROUND;
use crate::widgets::indexed_slider::IndexedSlider as SliderWidget;

/// A segmented horizontal slider that selects one of its labels.
pub struct IndexedSlider<F> {
    labels: Vec<String>,
    index: usize,
    on_change: F,
    style: StyleOverrides,
}

/// Create an indexed slider.
///
/// An `index` past the last label is clamped, and the clamped index is reported
/// through `on_change` once the slider is added to the tree.
pub fn indexed_slider<State, Action>(
    labels: Vec<String>,
    index: usize,
    on_change: impl Fn(&mut State, usize) -> Action + Send + Sync + 'static,
) -> IndexedSlider<impl Fn(&mut State, usize) -> Action + Send + Sync + 'static> {
    IndexedSlider {
        labels,
        index,
        on_change,
        style: StyleOverrides::default(),
    }
}

impl<F> IndexedSlider<F> {
    pub fn background_color(mut self, color: Color) -> Self {
        self.style.background_color = Some(color);
        self
    }

    pub fn foreground_color(mut self, color: Color) -> Self {
        self.style.foreground_color = Some(color);
        self
    }

    pub fn corner_radius(mut self, radius: f64) -> Self {
        self.style.corner_radius = Some(radius);
        self
    }

    pub fn font(mut self, font_face: FontFace) -> Self {
        self.style.font_face = Some(font_face);
        self
    }
}

impl<F> ViewMarker for IndexedSlider<F> {}

impl<F, State, Action> View<State, Action, ViewCtx> for IndexedSlider<F>
where
    State: 'static,
    Action: 'static,
    F: Fn(&mut State, usize) -> Action + Send + Sync + 'static,
{
    type Element = Pod<SliderWidget>;
    type ViewState = ();

    fn build(&self, ctx: &mut ViewCtx, _: &mut State) -> (Self::Element, Self::ViewState) {
        let w = SliderWidget::new(self.labels.clone(), self.index, self.style.resolve(ACCENT_FOREGROUND));
        let pod = ctx.with_action_widget(|ctx| ctx.create_pod(w));
        (pod, ())
    }

    fn rebuild(
        &self,
        prev: &Self,
        _: &mut (),
        _: &mut ViewCtx,
        mut element: Mut<'_, Self::Element>,
        _: &mut State,
    ) {
        if prev.labels != self.labels {
            SliderWidget::set_labels(&mut element, self.labels.clone());
        }
        if prev.index != self.index {
            SliderWidget::set_index(&mut element, self.index);
        }
        if prev.style != self.style {
            SliderWidget::set_style(&mut element, self.style.resolve(ACCENT_FOREGROUND));
        }
    }

    fn teardown(&self, _: &mut (), ctx: &mut ViewCtx, element: Mut<'_, Self::Element>) {
        ctx.teardown_leaf(element);
    }

    fn message(
        &self,
        _: &mut (),
        message: &mut MessageContext,
        _: Mut<'_, Self::Element>,
        state: &mut State,
    ) -> MessageResult<Action> {
        if message.take_first().is_some() {
            return MessageResult::Stale;
        }
        match message.take_message::<usize>() {
            Some(idx) => MessageResult::Action((self.on_change)(state, *idx)),
            None => MessageResult::Stale,
        }
    }
}
