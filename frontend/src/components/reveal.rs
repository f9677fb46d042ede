//! Scroll-driven decoration: entrance animations, parallax, counters.

/// Entrance effect named by a `data-aos` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealEffect {
    FadeUp,
    FadeDown,
    FadeLeft,
    FadeRight,
    ZoomIn,
    Fade,
}

impl RevealEffect {
    pub fn parse(name: &str) -> Self {
        match name.trim() {
            "fade-up" => RevealEffect::FadeUp,
            "fade-down" => RevealEffect::FadeDown,
            "fade-left" => RevealEffect::FadeLeft,
            "fade-right" => RevealEffect::FadeRight,
            "zoom-in" => RevealEffect::ZoomIn,
            _ => RevealEffect::Fade,
        }
    }

    /// Transform applied before the element scrolls into view.
    pub fn initial_transform(self) -> &'static str {
        match self {
            RevealEffect::FadeUp => "translateY(30px)",
            RevealEffect::FadeDown => "translateY(-30px)",
            RevealEffect::FadeLeft => "translateX(30px)",
            RevealEffect::FadeRight => "translateX(-30px)",
            RevealEffect::ZoomIn => "scale(0.9)",
            RevealEffect::Fade => "none",
        }
    }
}

pub const REVEAL_TRANSITION: &str = "opacity 0.6s ease, transform 0.6s ease";
pub const REVEALED_CLASS: &str = "aos-animate";

/// `data-aos-delay` in milliseconds; anything unparsable means no delay.
pub fn reveal_delay(raw: Option<&str>) -> u32 {
    raw.and_then(|value| value.trim().parse().ok()).unwrap_or(0)
}

pub const DEFAULT_PARALLAX_SPEED: f64 = 0.5;

/// Speed factor from a `data-parallax` attribute.
pub fn parallax_speed(raw: Option<&str>) -> f64 {
    raw.and_then(|value| value.trim().parse::<f64>().ok())
        .filter(|speed| speed.is_finite())
        .unwrap_or(DEFAULT_PARALLAX_SPEED)
}

pub fn parallax_transform(scroll_y: f64, speed: f64) -> String {
    format!("translateY({}px)", -(scroll_y * speed))
}

/// Count-up animation for `data-counter` elements, one step per frame.
#[derive(Debug, Clone, PartialEq)]
pub struct CounterAnimation {
    target: i64,
    step: f64,
    current: f64,
}

/// Roughly 2 seconds at 60 frames per second.
const COUNTER_DURATION_MS: f64 = 2000.0;
const FRAME_MS: f64 = 16.0;

impl CounterAnimation {
    pub fn new(target: i64) -> Self {
        Self {
            target,
            step: target as f64 / (COUNTER_DURATION_MS / FRAME_MS),
            current: 0.0,
        }
    }

    pub fn parse(raw: Option<&str>) -> Option<Self> {
        raw?.trim().parse().ok().map(Self::new)
    }

    pub fn target(&self) -> i64 {
        self.target
    }

    /// Advances one frame. Returns the text to display and whether the
    /// animation has finished.
    pub fn tick(&mut self) -> (String, bool) {
        self.current += self.step;
        if self.step > 0.0 && self.current < self.target as f64 {
            (format!("{}", self.current.floor() as i64), false)
        } else {
            (self.target.to_string(), true)
        }
    }
}

/// Width a `data-progress` bar animates to.
pub fn progress_width(raw: Option<&str>) -> String {
    let value = raw
        .and_then(|value| value.trim().parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .unwrap_or(0.0);
    format!("{}%", value.clamp(0.0, 100.0))
}
