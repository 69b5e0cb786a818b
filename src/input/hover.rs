//! Pointer hover state and eased visual transitions.
//!
//! The bell's opacity eases between its resting and hovered values on
//! enter/leave, and the fill color can be re-targeted independently at any
//! time. Both run on the same [`Tween`] primitive, which advances purely as
//! a function of elapsed time — no timers, and retargeting always
//! interrupts the in-flight transition.

use crate::scene::Color;

/// Values a [`Tween`] can interpolate.
pub trait Lerp: Copy {
    fn lerp(from: Self, to: Self, t: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(from: Self, to: Self, t: f32) -> Self {
        from + (to - from) * t
    }
}

impl Lerp for Color {
    fn lerp(from: Self, to: Self, t: f32) -> Self {
        [
            f32::lerp(from[0], to[0], t),
            f32::lerp(from[1], to[1], t),
            f32::lerp(from[2], to[2], t),
        ]
    }
}

/// Time-based eased transition toward a target value.
#[derive(Debug, Clone)]
pub struct Tween<T: Lerp> {
    from: T,
    to: T,
    duration_ms: f32,
    elapsed_ms: f32,
}

impl<T: Lerp> Tween<T> {
    /// A settled tween holding `value`.
    pub fn settled(value: T) -> Self {
        Self {
            from: value,
            to: value,
            duration_ms: 1.0,
            elapsed_ms: 1.0,
        }
    }

    /// Start easing from the current value toward `to`, cancelling any
    /// transition already in flight.
    pub fn retarget(&mut self, to: T, duration_ms: f32) {
        self.from = self.value();
        self.to = to;
        self.duration_ms = duration_ms.max(f32::EPSILON);
        self.elapsed_ms = 0.0;
    }

    /// Advance by `dt_ms` and return the current value.
    pub fn advance(&mut self, dt_ms: f32) -> T {
        self.elapsed_ms = (self.elapsed_ms + dt_ms).min(self.duration_ms);
        self.value()
    }

    /// Current value without advancing.
    pub fn value(&self) -> T {
        let t = (self.elapsed_ms / self.duration_ms).clamp(0.0, 1.0);
        T::lerp(self.from, self.to, ease_out_cubic(t))
    }

    pub fn target(&self) -> T {
        self.to
    }

    pub fn is_settled(&self) -> bool {
        self.elapsed_ms >= self.duration_ms
    }
}

fn ease_out_cubic(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}

/// Hover transition produced by a containment update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverTransition {
    Entered,
    Left,
}

/// Hover state machine plus the two eased visual channels.
pub struct HoverState {
    hovered: bool,
    base_opacity: f32,
    hover_opacity: f32,
    opacity_ease_ms: f32,
    color_ease_ms: f32,
    opacity: Tween<f32>,
    color: Tween<Color>,
}

impl HoverState {
    pub fn new(
        base_opacity: f32,
        hover_opacity: f32,
        opacity_ease_ms: f32,
        color: Color,
        color_ease_ms: f32,
    ) -> Self {
        Self {
            hovered: false,
            base_opacity,
            hover_opacity,
            opacity_ease_ms,
            color_ease_ms,
            opacity: Tween::settled(base_opacity),
            color: Tween::settled(color),
        }
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Feed the per-tick containment result. Returns a transition only on
    /// an actual state change, so callbacks fire at most once per change.
    pub fn set_inside(&mut self, inside: bool) -> Option<HoverTransition> {
        if inside == self.hovered {
            return None;
        }
        self.hovered = inside;
        if inside {
            self.opacity.retarget(self.hover_opacity, self.opacity_ease_ms);
            Some(HoverTransition::Entered)
        } else {
            self.opacity.retarget(self.base_opacity, self.opacity_ease_ms);
            Some(HoverTransition::Left)
        }
    }

    /// Ease the fill color toward a new value, independent of hover.
    pub fn retint(&mut self, color: Color) {
        self.color.retarget(color, self.color_ease_ms);
    }

    /// Whether the color channel has finished easing.
    pub fn color_settled(&self) -> bool {
        self.color.is_settled()
    }

    /// Advance both channels and return (opacity, color) for this tick.
    pub fn advance(&mut self, dt_ms: f32) -> (f32, Color) {
        (self.opacity.advance(dt_ms), self.color.advance(dt_ms))
    }

    /// Current (opacity, color) without advancing time.
    pub fn current(&self) -> (f32, Color) {
        (self.opacity.value(), self.color.value())
    }
}
