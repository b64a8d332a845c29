//! Property tests for registry invariants over random operation sequences.

use std::rc::Rc;

use proptest::prelude::*;
use shared_types::{InitialWindowState, Point, Size, WindowMode};
use window_engine::{NullNotifier, RecordingNotifier, WindowRegistry};

const IDS: [&str; 4] = ["a-window", "b-window", "c-window", "d-window"];

#[derive(Debug, Clone)]
enum Op {
    Register(usize, i32, i32),
    RegisterAt(usize, u32),
    Unregister(usize),
    Raise(usize),
    Minimize(usize),
    Maximize(usize),
    Move(usize, i32, i32),
    Resize(usize, i32, i32),
    Fit(usize),
}

fn op() -> impl Strategy<Value = Op> {
    let id = 0..IDS.len();
    prop_oneof![
        (id.clone(), -500..2000i32, -500..2000i32).prop_map(|(i, x, y)| Op::Register(i, x, y)),
        (id.clone(), z_override()).prop_map(|(i, z)| Op::RegisterAt(i, z)),
        id.clone().prop_map(Op::Unregister),
        id.clone().prop_map(Op::Raise),
        id.clone().prop_map(Op::Minimize),
        id.clone().prop_map(Op::Maximize),
        (id.clone(), -500..2000i32, -500..2000i32).prop_map(|(i, x, y)| Op::Move(i, x, y)),
        (id.clone(), 200..1500i32, 150..1000i32).prop_map(|(i, w, h)| Op::Resize(i, w, h)),
        id.prop_map(Op::Fit),
    ]
}

/// Requested z-orders around the baseline and the first few raises, plus
/// the top of the range.
fn z_override() -> impl Strategy<Value = u32> {
    prop_oneof![4 => 90..130u32, 1 => Just(u32::MAX)]
}

fn apply(registry: &WindowRegistry, op: &Op) {
    match *op {
        Op::Register(i, x, y) => {
            registry.register(
                IDS[i],
                InitialWindowState::new(Point::new(x, y), Size::new(400, 300)),
            );
        }
        Op::RegisterAt(i, z) => {
            registry.register(IDS[i], InitialWindowState::default().with_z_order(z));
        }
        Op::Unregister(i) => {
            registry.unregister(IDS[i]);
        }
        Op::Raise(i) => {
            registry.bring_to_front(IDS[i]);
        }
        Op::Minimize(i) => {
            registry.set_minimized(IDS[i]);
        }
        Op::Maximize(i) => {
            registry.set_maximized(IDS[i]);
        }
        Op::Move(i, x, y) => {
            registry.set_position(IDS[i], Point::new(x, y));
        }
        Op::Resize(i, w, h) => {
            registry.set_size(IDS[i], Size::new(w, h));
        }
        Op::Fit(i) => {
            registry.fit_to_content(IDS[i], Size::new(400, 300), Size::new(1280, 720));
        }
    }
}

proptest! {
    #[test]
    fn first_registration_wins(
        positions in prop::collection::vec((-500..2000i32, -500..2000i32), 1..8),
    ) {
        let registry = WindowRegistry::new(Rc::new(NullNotifier));
        for (x, y) in &positions {
            registry.register(
                "only-window",
                InitialWindowState::new(Point::new(*x, *y), Size::new(400, 300)),
            );
        }

        prop_assert_eq!(registry.len(), 1);
        let (x, y) = positions[0];
        prop_assert_eq!(registry.get("only-window").unwrap().position, Point::new(x, y));
    }

    #[test]
    fn consecutive_raises_strictly_increase(
        ops in prop::collection::vec(op(), 0..40),
        raises in prop::collection::vec(0..IDS.len(), 2..20),
    ) {
        let registry = WindowRegistry::new(Rc::new(NullNotifier));
        for id in IDS {
            registry.register(id, InitialWindowState::default());
        }
        for op in &ops {
            apply(&registry, op);
        }
        for id in IDS {
            registry.register(id, InitialWindowState::default());
        }

        let mut previous = 0;
        for index in raises {
            let allocated = registry.bring_to_front(IDS[index]).unwrap();
            prop_assert!(allocated > previous);
            previous = allocated;
            let front = registry.records().pop().map(|record| record.id);
            prop_assert_eq!(front.as_deref(), Some(IDS[index]));
        }
    }

    #[test]
    fn z_orders_stay_distinct_once_raised(ops in prop::collection::vec(op(), 0..60)) {
        let registry = WindowRegistry::new(Rc::new(NullNotifier));
        for op in &ops {
            apply(&registry, op);
        }

        let raised: Vec<u32> = registry
            .records()
            .iter()
            .map(|record| record.z_order)
            .filter(|z| *z > 100)
            .collect();
        let mut deduped = raised.clone();
        deduped.dedup();
        prop_assert_eq!(raised, deduped);
    }

    #[test]
    fn every_announcement_names_one_transition(ops in prop::collection::vec(op(), 0..60)) {
        let notifier = RecordingNotifier::new();
        let registry = WindowRegistry::new(Rc::new(notifier.clone()));
        for op in &ops {
            let before = registry.revision();
            let announced = notifier.notifications().len();
            apply(&registry, op);
            let changed = registry.revision() != before;
            let new_messages = notifier.notifications().len() - announced;

            prop_assert!(new_messages <= 1);
            if new_messages == 1 {
                prop_assert!(changed);
            }
        }

        for message in notifier.messages() {
            prop_assert!(
                message.ends_with(" minimized")
                    || message.ends_with(" maximized")
                    || message.ends_with(" restored")
            );
        }
    }

    #[test]
    fn mode_is_always_a_single_state(ops in prop::collection::vec(op(), 0..60)) {
        let registry = WindowRegistry::new(Rc::new(NullNotifier));
        for op in &ops {
            apply(&registry, op);
            for record in registry.records() {
                prop_assert!(!(record.is_minimized() && record.is_maximized()));
                prop_assert_eq!(
                    record.is_minimized(),
                    record.mode == WindowMode::Minimized
                );
            }
        }
    }

    #[test]
    fn equal_writes_are_silent(x in -500..2000i32, y in -500..2000i32) {
        let notifier = RecordingNotifier::new();
        let registry = WindowRegistry::new(Rc::new(notifier.clone()));
        registry.register(
            "a-window",
            InitialWindowState::new(Point::new(x, y), Size::new(400, 300)),
        );
        let revision = registry.revision();

        prop_assert!(!registry.set_position("a-window", Point::new(x, y)));
        prop_assert!(!registry.set_size("a-window", Size::new(400, 300)));
        prop_assert_eq!(registry.revision(), revision);
        prop_assert!(notifier.notifications().is_empty());
    }
}
