//! Page-level "brain mode" flag for the glyph-rain overlay.

use crate::content::{BRAIN_TOO_COMPLEX, BRAIN_WELCOME};

/// How long the overlay shows its welcome before giving up on the visitor
pub const TOO_COMPLEX_AFTER_MS: f64 = 5000.0;

/// Caption shown over the rain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrainCaption {
    Welcome,
    TooComplex,
}

impl BrainCaption {
    pub fn headline(self) -> &'static str {
        match self {
            BrainCaption::Welcome => BRAIN_WELCOME.0,
            BrainCaption::TooComplex => BRAIN_TOO_COMPLEX.0,
        }
    }

    pub fn lines(self) -> &'static [&'static str] {
        match self {
            BrainCaption::Welcome => BRAIN_WELCOME.1,
            BrainCaption::TooComplex => BRAIN_TOO_COMPLEX.1,
        }
    }
}

/// The single cross-section flag, owned by the page root
#[derive(Debug, Clone, Default)]
pub struct BrainMode {
    activated_at_ms: Option<f64>,
}

impl BrainMode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.activated_at_ms.is_some()
    }

    /// Flip the flag; returns the new state
    pub fn toggle(&mut self, now_ms: f64) -> bool {
        if self.is_active() {
            self.deactivate();
        } else {
            self.activate(now_ms);
        }
        self.is_active()
    }

    pub fn activate(&mut self, now_ms: f64) {
        if self.activated_at_ms.is_none() {
            self.activated_at_ms = Some(now_ms);
            tracing::debug!("brain mode on");
        }
    }

    pub fn deactivate(&mut self) {
        if self.activated_at_ms.take().is_some() {
            tracing::debug!("brain mode off");
        }
    }

    /// Caption for the overlay at `now_ms`; `None` while inactive
    pub fn caption(&self, now_ms: f64) -> Option<BrainCaption> {
        let since = self.activated_at_ms?;
        if now_ms - since >= TOO_COMPLEX_AFTER_MS {
            Some(BrainCaption::TooComplex)
        } else {
            Some(BrainCaption::Welcome)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle() {
        let mut brain = BrainMode::new();
        assert!(!brain.is_active());
        assert!(brain.toggle(0.0));
        assert!(!brain.toggle(10.0));
        assert!(brain.caption(20.0).is_none());
    }

    #[test]
    fn test_caption_switches_after_timeout() {
        let mut brain = BrainMode::new();
        brain.activate(1_000.0);
        assert_eq!(brain.caption(1_000.0), Some(BrainCaption::Welcome));
        assert_eq!(brain.caption(5_999.0), Some(BrainCaption::Welcome));
        assert_eq!(brain.caption(6_000.0), Some(BrainCaption::TooComplex));
        assert!(BrainCaption::TooComplex.headline().starts_with("Too Complex!"));
    }

    #[test]
    fn test_reactivation_restarts_timer() {
        let mut brain = BrainMode::new();
        brain.activate(0.0);
        brain.deactivate();
        brain.activate(10_000.0);
        assert_eq!(brain.caption(12_000.0), Some(BrainCaption::Welcome));
    }
}
