#![forbid(unsafe_code)]

//! Edge hotspots and the auto-scroll tick.
//!
//! While a drag is active, a pointer inside the top or bottom band scrolls
//! the list toward that edge. The scroll step grows with how far past the
//! band's inner edge the pointer sits, so pushing toward the screen edge
//! scrolls faster.
//!
//! # Tick model
//!
//! Auto-scroll is a self-rearming deadline, not a thread. Entering a band
//! arms `now + delay`; each due tick scrolls once and re-arms while the
//! pointer stays in a band. Leaving the bands, or [`AutoScroll::cancel`],
//! clears the deadline so no stale tick can fire afterwards.

use std::time::Duration;

use dragselect_core::HotspotEdge;
use web_time::Instant;

use crate::config::HotspotConfig;

/// A closed vertical interval `[start, end]` in list pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub start: f32,
    pub end: f32,
}

impl Band {
    #[inline]
    #[must_use]
    pub const fn new(start: f32, end: f32) -> Self {
        Self { start, end }
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, y: f32) -> bool {
        y >= self.start && y <= self.end
    }

    #[inline]
    #[must_use]
    pub fn span(&self) -> f32 {
        self.end - self.start
    }
}

/// Both bands, resolved against a viewport height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HotspotBands {
    pub top: Band,
    pub bottom: Band,
    velocity_divisor: f32,
}

impl HotspotBands {
    /// Place the bands inside a list `viewport_height` pixels tall.
    #[must_use]
    pub fn compute(config: &HotspotConfig, viewport_height: f32) -> Self {
        let top_start = config.offset_top;
        let bottom_end = viewport_height - config.offset_bottom;
        Self {
            top: Band::new(top_start, top_start + config.height),
            bottom: Band::new(bottom_end - config.height, bottom_end),
            velocity_divisor: config.velocity_divisor,
        }
    }

    /// Which band `y` falls in and the signed scroll step for that depth.
    ///
    /// The top band wins where the two overlap (very short lists).
    #[must_use]
    pub fn locate(&self, y: f32) -> Option<(HotspotEdge, f32)> {
        if self.top.contains(y) {
            let depth = self.top.span() - (y - self.top.start);
            Some((HotspotEdge::Top, -(depth / self.velocity_divisor)))
        } else if self.bottom.contains(y) {
            let depth = y - self.bottom.start;
            Some((HotspotEdge::Bottom, depth / self.velocity_divisor))
        } else {
            None
        }
    }
}

/// Result of feeding a pointer position to [`AutoScroll::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotspotTransition {
    /// The pointer moved into `edge` (from outside or from the other band).
    Entered(HotspotEdge),
    /// The pointer left the bands.
    Left,
    /// No change in band membership.
    Unchanged,
}

/// Hotspot flags, current velocity, and the pending tick deadline.
#[derive(Debug, Clone)]
pub struct AutoScroll {
    edge: Option<HotspotEdge>,
    velocity: f32,
    next_tick: Option<Instant>,
    delay: Duration,
}

impl AutoScroll {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            edge: None,
            velocity: 0.0,
            next_tick: None,
            delay,
        }
    }

    /// Record the band the pointer is in (if any) at time `now`.
    pub fn update(&mut self, zone: Option<(HotspotEdge, f32)>, now: Instant) -> HotspotTransition {
        match zone {
            Some((edge, velocity)) => {
                self.velocity = velocity;
                if self.edge == Some(edge) {
                    return HotspotTransition::Unchanged;
                }
                self.edge = Some(edge);
                self.next_tick = Some(now + self.delay);
                HotspotTransition::Entered(edge)
            }
            None if self.edge.is_some() => {
                self.cancel();
                HotspotTransition::Left
            }
            None => HotspotTransition::Unchanged,
        }
    }

    /// Run the tick if it is due. Returns the scroll delta to apply.
    pub fn tick(&mut self, now: Instant) -> Option<f32> {
        let deadline = self.next_tick?;
        if now < deadline {
            return None;
        }
        if self.edge.is_none() {
            self.next_tick = None;
            return None;
        }
        self.next_tick = Some(now + self.delay);
        Some(self.velocity)
    }

    /// Clear both flags and drop any pending tick.
    pub fn cancel(&mut self) {
        self.edge = None;
        self.velocity = 0.0;
        self.next_tick = None;
    }

    #[inline]
    #[must_use]
    pub fn edge(&self) -> Option<HotspotEdge> {
        self.edge
    }

    #[inline]
    #[must_use]
    pub fn in_top_hotspot(&self) -> bool {
        self.edge == Some(HotspotEdge::Top)
    }

    #[inline]
    #[must_use]
    pub fn in_bottom_hotspot(&self) -> bool {
        self.edge == Some(HotspotEdge::Bottom)
    }

    /// Signed scroll step per tick (negative toward the start).
    #[inline]
    #[must_use]
    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    #[inline]
    #[must_use]
    pub fn next_tick(&self) -> Option<Instant> {
        self.next_tick
    }

    #[inline]
    #[must_use]
    pub fn is_scrolling(&self) -> bool {
        self.edge.is_some()
    }
}
