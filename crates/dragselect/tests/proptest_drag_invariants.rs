//! Property-based invariant tests for `DragSelectController`.
//!
//! 1. Range mode selects exactly `anchor..=last` after any move sequence
//! 2. Once established, `min_visited <= last <= max_visited`
//! 3. An event is consumed iff a session was active when it arrived
//! 4. No auto-scroll tick fires after the session ends

use std::time::Duration;

use dragselect::{
    DragSelectConfig, DragSelectController, EventDisposition, Instant, ListHost, PointerEvent,
    SelectionAdapter, SelectionStore,
};
use proptest::prelude::*;

const ROW: f32 = 50.0;
const ITEMS: usize = 40;

#[derive(Debug)]
struct Strip {
    offset: f32,
}

impl ListHost for Strip {
    fn item_index_at(&self, _x: f32, y: f32) -> Option<usize> {
        let content_y = y + self.offset;
        if !(0.0..=500.0).contains(&y) || content_y < 0.0 {
            return None;
        }
        let index = (content_y / ROW) as usize;
        (index < ITEMS).then_some(index)
    }

    fn viewport_height(&self) -> f32 {
        500.0
    }

    fn scroll_by(&mut self, dy: f32) {
        self.offset = (self.offset + dy).clamp(0.0, ITEMS as f32 * ROW - 500.0);
    }
}

#[derive(Debug)]
struct Plain;

impl SelectionAdapter for Plain {
    fn item_count(&self) -> usize {
        ITEMS
    }
}

// ── Strategies ──────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum Step {
    Move(f32),
    Down(f32),
    Up,
    Cancel,
    Wait(u64),
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        8 => (-20.0f32..520.0).prop_map(Step::Move),
        1 => (0.0f32..500.0).prop_map(Step::Down),
        1 => Just(Step::Up),
        1 => Just(Step::Cancel),
        3 => (0u64..80).prop_map(Step::Wait),
    ]
}

fn to_event(step: &Step) -> Option<PointerEvent> {
    match *step {
        Step::Move(y) => Some(PointerEvent::moved(10.0, y)),
        Step::Down(y) => Some(PointerEvent::down(10.0, y)),
        Step::Up => Some(PointerEvent::up(10.0, 0.0)),
        Step::Cancel => Some(PointerEvent::cancel(10.0, 0.0)),
        Step::Wait(_) => None,
    }
}

// ── Properties ──────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn range_mode_selects_anchor_to_last(
        anchor in 0..10usize,
        ys in prop::collection::vec(100.0f32..400.0, 1..40),
    ) {
        // Moves stay clear of the hotspot bands so the list never scrolls.
        let mut host = Strip { offset: 0.0 };
        let mut store = SelectionStore::new(Plain);
        let mut ctl = DragSelectController::new(DragSelectConfig::default()).unwrap();
        let t = Instant::now();
        prop_assert!(ctl.activate(anchor, &mut store));

        for y in ys {
            ctl.handle_event(&PointerEvent::moved(10.0, y), t, &mut host, &mut store);
            let last = ctl.session().unwrap().last;
            let expected: Vec<usize> = (anchor.min(last)..=anchor.max(last)).collect();
            prop_assert_eq!(store.selected_indices(), expected);
        }
    }

    #[test]
    fn visited_range_brackets_last(
        anchor in 0..10usize,
        steps in prop::collection::vec(step_strategy(), 1..60),
    ) {
        let mut host = Strip { offset: 0.0 };
        let mut store = SelectionStore::new(Plain);
        let mut ctl = DragSelectController::new(DragSelectConfig::default()).unwrap();
        let mut now = Instant::now();
        ctl.activate(anchor, &mut store);

        for step in &steps {
            match to_event(step) {
                Some(ev) => {
                    ctl.handle_event(&ev, now, &mut host, &mut store);
                }
                None => {
                    if let Step::Wait(ms) = *step {
                        now += Duration::from_millis(ms);
                    }
                    ctl.tick(now, &mut host);
                }
            }
            if let Some(s) = ctl.session() {
                prop_assert_eq!(s.anchor, anchor);
                if let (Some(min), Some(max)) = (s.min_visited, s.max_visited) {
                    prop_assert!(min <= s.last && s.last <= max);
                }
            }
        }
    }

    #[test]
    fn consumed_iff_active(
        anchor in 0..10usize,
        steps in prop::collection::vec(step_strategy(), 1..60),
    ) {
        let mut host = Strip { offset: 0.0 };
        let mut store = SelectionStore::new(Plain);
        let mut ctl = DragSelectController::new(DragSelectConfig::default()).unwrap();
        let t = Instant::now();
        ctl.activate(anchor, &mut store);

        for ev in steps.iter().filter_map(to_event) {
            let was_active = ctl.is_active();
            let d = ctl.handle_event(&ev, t, &mut host, &mut store);
            prop_assert_eq!(d == EventDisposition::Consumed, was_active);
            if ev.is_terminal() {
                prop_assert!(!ctl.is_active());
            }
        }
    }

    #[test]
    fn no_tick_after_release(
        anchor in 0..10usize,
        y in prop_oneof![0.0f32..56.0, 444.0f32..500.0],
        waits in prop::collection::vec(1u64..200, 1..10),
    ) {
        let mut host = Strip { offset: 200.0 };
        let mut store = SelectionStore::new(Plain);
        let mut ctl = DragSelectController::new(DragSelectConfig::default()).unwrap();
        let t = Instant::now();
        ctl.activate(anchor, &mut store);
        ctl.handle_event(&PointerEvent::moved(10.0, y), t, &mut host, &mut store);
        prop_assert!(ctl.next_tick_deadline().is_some());

        ctl.handle_event(&PointerEvent::up(10.0, y), t, &mut host, &mut store);
        prop_assert!(ctl.next_tick_deadline().is_none());
        prop_assert!(!ctl.auto_scroll().is_scrolling());

        let offset = host.offset;
        let mut now = t;
        for ms in waits {
            now += Duration::from_millis(ms);
            prop_assert_eq!(ctl.tick(now, &mut host), None);
        }
        prop_assert_eq!(host.offset, offset);
    }
}
