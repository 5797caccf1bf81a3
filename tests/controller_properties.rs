//! Property-based tests for the timer controller.
//!
//! Random sequences of toggles and ticks are replayed against a controller
//! driven by a manual clock, checking the invariants after every step.

use proptest::prelude::*;
use pulse_timer::{
    clock::{ClockMode, ManualClock},
    sinks::{ChannelSink, FanoutSink, TimerUpdate},
    state::{
        Phase, TimerController, TimerEvent, ToggleOutcome, COOLDOWN_LENGTH_SECS,
        COOLDOWN_TRIGGER_SECS, PULSE_PERIOD_SECS,
    },
};

#[derive(Debug, Clone, Copy)]
enum Step {
    Toggle,
    Tick,
}

prop_compose! {
    fn arbitrary_step()(toggle in prop::bool::weighted(0.05)) -> Step {
        if toggle { Step::Toggle } else { Step::Tick }
    }
}

fn controller() -> (TimerController, ManualClock) {
    let clock = ManualClock::new();
    (TimerController::new(clock.clone(), FanoutSink::new()), clock)
}

proptest! {
    #[test]
    fn invariants_hold_for_any_sequence(steps in prop::collection::vec(arbitrary_step(), 0..800)) {
        let (mut controller, clock) = controller();

        for step in steps {
            let before = controller.snapshot();
            match step {
                Step::Toggle => {
                    let outcome = controller.toggle();
                    if before.in_cooldown {
                        prop_assert_eq!(outcome, ToggleOutcome::Ignored);
                        prop_assert_eq!(controller.snapshot(), before);
                    } else {
                        prop_assert_eq!(controller.snapshot().elapsed_seconds, before.elapsed_seconds);
                    }
                }
                Step::Tick => {
                    let events = controller.tick();
                    let after = controller.snapshot();

                    if before.phase == Phase::Active {
                        prop_assert_eq!(after.elapsed_seconds, before.elapsed_seconds + 1);
                        let pulsed = after.elapsed_seconds % PULSE_PERIOD_SECS == 0;
                        prop_assert_eq!(after.pulse_count, before.pulse_count + pulsed as u64);
                        prop_assert_eq!(events.contains(&TimerEvent::Pulse), pulsed);
                    } else {
                        prop_assert_eq!(after.elapsed_seconds, before.elapsed_seconds);
                        prop_assert_eq!(after.pulse_count, before.pulse_count);
                    }
                }
            }

            let snapshot = controller.snapshot();
            prop_assert!(snapshot.cooldown_remaining_seconds <= COOLDOWN_LENGTH_SECS);
            if snapshot.in_cooldown {
                prop_assert!(snapshot.cooldown_remaining_seconds > 0);
                prop_assert_eq!(clock.active(), Some(ClockMode::Cooldown));
            } else if snapshot.running {
                prop_assert_eq!(clock.active(), Some(ClockMode::Main));
            } else {
                prop_assert_eq!(clock.active(), None);
            }
            prop_assert_eq!(snapshot.pulse_count, snapshot.elapsed_seconds / PULSE_PERIOD_SECS);
        }
    }

    #[test]
    fn active_ticks_below_trigger_never_cool_down(ticks in 0..COOLDOWN_TRIGGER_SECS) {
        let (mut controller, _) = controller();
        controller.toggle();
        for _ in 0..ticks {
            controller.tick();
        }
        let snapshot = controller.snapshot();
        prop_assert_eq!(snapshot.elapsed_seconds, ticks);
        prop_assert!(!snapshot.in_cooldown);
    }

    #[test]
    fn snapshot_is_stable_between_mutations(ticks in 0..400u64) {
        let (mut controller, _) = controller();
        controller.toggle();
        for _ in 0..ticks {
            controller.tick();
        }
        prop_assert_eq!(controller.snapshot(), controller.snapshot());
    }
}

#[test]
fn events_reach_sinks_in_emission_order() {
    let channel = ChannelSink::new(1024);
    let mut updates = channel.subscribe_updates();
    let mut controller = TimerController::new(ManualClock::new(), FanoutSink::new().with(channel));

    controller.toggle();
    for _ in 0..(COOLDOWN_TRIGGER_SECS + COOLDOWN_LENGTH_SECS) {
        controller.tick();
    }

    let mut events = Vec::new();
    while let Ok(update) = updates.try_recv() {
        if let TimerUpdate::Event(event) = update {
            events.push(event);
        }
    }

    let pulses = (COOLDOWN_TRIGGER_SECS / PULSE_PERIOD_SECS) as usize;
    assert_eq!(events.len(), pulses + 2);
    assert_eq!(events[pulses - 1], TimerEvent::Pulse);
    assert_eq!(events[pulses], TimerEvent::CooldownStarted);
    assert_eq!(events[pulses + 1], TimerEvent::CooldownEnded);
}
