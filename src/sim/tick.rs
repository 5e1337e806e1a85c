//! Belt operations: tick, activation, and display-window completion.
//!
//! The three inbound entry points of the core, all total functions: invalid
//! or late calls degrade to no-ops rather than erroring, because user-timing
//! races (double taps, taps while paused) are expected, not exceptional.

use log::{debug, trace};
use serde::Serialize;

use super::prize::Prize;
use super::state::{BeltController, BeltObject, ObjectState, RunState};

/// Signals from the core to the presentation layer.
///
/// The renderer consumes these to draw sprites and text, and to schedule the
/// external display timer that eventually calls
/// [`BeltController::on_display_window_elapsed`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum BeltEvent {
    /// A new object entered the belt.
    Spawned { id: u32, position: f32 },
    /// A traveling object advanced this tick.
    Moved { id: u32, position: f32 },
    /// An object left the belt (exited the span or finished resolving).
    Removed { id: u32 },
    /// An activation drew this prize; the display window is now open.
    PrizeResolved { prize: Prize },
}

impl BeltController {
    /// Advance the belt by one frame.
    ///
    /// No-op while paused: nothing spawns, moves, or is evicted. Otherwise
    /// spawns when the interval has elapsed (the first tick always spawns),
    /// advances every traveling object by `speed`, and evicts objects at or
    /// past `exit_threshold`. Eviction order within a tick is unspecified.
    pub fn tick(&mut self, now_ms: u64) -> Vec<BeltEvent> {
        let mut events = Vec::new();
        if self.run_state == RunState::Paused {
            return events;
        }

        let spawn_due = match self.last_spawn_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) >= self.config.spawn_interval_ms,
        };
        if spawn_due {
            let id = self.next_object_id();
            let position = self.config.entry_position;
            self.objects.insert(BeltObject {
                id,
                position,
                state: ObjectState::Traveling,
            });
            self.last_spawn_ms = Some(now_ms);
            debug!("spawned object {id} at {position}");
            events.push(BeltEvent::Spawned { id, position });
        }

        // A freshly spawned object advances on its spawn tick too.
        let speed = self.config.speed;
        let exit = self.config.exit_threshold;
        let mut exited = Vec::new();
        for object in self.objects.iter_mut() {
            if object.state != ObjectState::Traveling {
                continue;
            }
            object.position += speed;
            trace!("object {} moved to {}", object.id, object.position);
            events.push(BeltEvent::Moved {
                id: object.id,
                position: object.position,
            });
            if object.position >= exit {
                object.state = ObjectState::Removed;
                exited.push(object.id);
            }
        }
        for id in exited {
            self.objects.remove(id);
            debug!("object {id} exited the belt");
            events.push(BeltEvent::Removed { id });
        }

        events
    }

    /// Player tapped an object.
    ///
    /// Silent no-op when the belt is paused, the id is unknown, or the
    /// object is not traveling; this is the single re-entrancy guard that
    /// serializes rapid repeated taps to "first one wins". On success:
    /// pauses the belt, moves the object to `Resolving`, draws one prize,
    /// and emits [`BeltEvent::PrizeResolved`]. The host must then call
    /// [`on_display_window_elapsed`](Self::on_display_window_elapsed) after
    /// `display_duration_ms`.
    pub fn activate(&mut self, object_id: u32) -> Vec<BeltEvent> {
        let mut events = Vec::new();
        if self.run_state == RunState::Paused {
            return events;
        }
        match self.objects.get_mut(object_id) {
            Some(object) if object.state == ObjectState::Traveling => {
                object.state = ObjectState::Resolving;
            }
            _ => return events,
        }

        self.run_state = RunState::Paused;
        self.pending = Some(object_id);
        let prize = self.selector.choose(&mut self.rng).clone();
        debug!("object {object_id} resolved prize '{}', belt paused", prize.name);
        events.push(BeltEvent::PrizeResolved { prize });
        events
    }

    /// The display window for a resolved prize has elapsed.
    ///
    /// Completes the pending resolution: evicts the resolving object and
    /// resumes the belt. Idempotent; with no pending resolution this is a
    /// no-op, so a host timer firing twice is harmless.
    pub fn on_display_window_elapsed(&mut self) -> Vec<BeltEvent> {
        let mut events = Vec::new();
        let Some(id) = self.pending.take() else {
            return events;
        };
        if let Some(mut object) = self.objects.remove(id) {
            object.state = ObjectState::Removed;
            events.push(BeltEvent::Removed { id });
        }
        self.run_state = RunState::Running;
        debug!("display window elapsed, belt resumed");
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BeltConfig;

    fn test_prizes() -> Vec<Prize> {
        ["A", "B", "C", "D", "E"]
            .iter()
            .map(|name| Prize::new(*name, 20.0))
            .collect()
    }

    fn belt_with(config: BeltConfig) -> BeltController {
        BeltController::new(test_prizes(), config, 12345).unwrap()
    }

    fn spawn_count(events: &[BeltEvent]) -> usize {
        events
            .iter()
            .filter(|e| matches!(e, BeltEvent::Spawned { .. }))
            .count()
    }

    fn first_spawned_id(events: &[BeltEvent]) -> u32 {
        events
            .iter()
            .find_map(|e| match e {
                BeltEvent::Spawned { id, .. } => Some(*id),
                _ => None,
            })
            .unwrap()
    }

    #[test]
    fn test_spawn_interval() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut belt = belt_with(BeltConfig {
            spawn_interval_ms: 1300,
            ..Default::default()
        });

        let mut spawns = 0;
        spawns += spawn_count(&belt.tick(0)); // first tick spawns
        spawns += spawn_count(&belt.tick(1300)); // interval elapsed
        spawns += spawn_count(&belt.tick(1301)); // 1 ms since last spawn
        assert_eq!(spawns, 2);
    }

    #[test]
    fn test_object_travels_and_exits() {
        // Entry 0, speed 2.5, exit 550: removed on tick ceil(550/2.5) = 220.
        let mut belt = belt_with(BeltConfig {
            speed: 2.5,
            exit_threshold: 550.0,
            entry_position: 0.0,
            spawn_interval_ms: 1_000_000, // only the first-tick spawn
            ..Default::default()
        });

        let events = belt.tick(0);
        let id = first_spawned_id(&events);
        for t in 1..219 {
            belt.tick(t);
        }
        assert!(belt.object(id).is_some(), "object gone too early");

        let events = belt.tick(219); // 220th tick overall
        assert!(events.contains(&BeltEvent::Removed { id }));
        assert!(belt.object(id).is_none());
        assert_eq!(belt.object_count(), 0);
    }

    #[test]
    fn test_tick_while_paused_is_noop() {
        let mut belt = belt_with(BeltConfig::default());
        let events = belt.tick(0);
        let id = first_spawned_id(&events);
        assert_eq!(belt.activate(id).len(), 1);
        assert_eq!(belt.run_state(), RunState::Paused);

        let position = belt.object(id).unwrap().position;
        let events = belt.tick(5000);
        assert!(events.is_empty());
        assert_eq!(belt.object(id).unwrap().position, position);
        assert_eq!(belt.object_count(), 1);
    }

    #[test]
    fn test_activate_resolves_exactly_one_prize() {
        let mut belt = belt_with(BeltConfig::default());
        belt.tick(0);
        belt.tick(1300);
        let ids: Vec<u32> = belt.objects().map(|o| o.id).collect();
        assert_eq!(ids.len(), 2);

        let first = belt.activate(ids[0]);
        assert!(matches!(first[..], [BeltEvent::PrizeResolved { .. }]));
        assert_eq!(belt.pending_resolution(), Some(ids[0]));

        // Second tap before the display window elapses: no-op, no prize.
        let second = belt.activate(ids[1]);
        assert!(second.is_empty());
        // Re-tapping the resolving object is also a no-op.
        assert!(belt.activate(ids[0]).is_empty());
        assert_eq!(belt.pending_resolution(), Some(ids[0]));
    }

    #[test]
    fn test_display_window_elapsed_resumes_belt() {
        let mut belt = belt_with(BeltConfig::default());
        let id = first_spawned_id(&belt.tick(0));
        belt.activate(id);
        assert_eq!(belt.run_state(), RunState::Paused);

        let events = belt.on_display_window_elapsed();
        assert_eq!(events, vec![BeltEvent::Removed { id }]);
        assert_eq!(belt.run_state(), RunState::Running);
        assert_eq!(belt.pending_resolution(), None);
        assert!(belt.object(id).is_none());

        // Idempotent: a second timer fire does nothing.
        assert!(belt.on_display_window_elapsed().is_empty());
        assert_eq!(belt.run_state(), RunState::Running);
    }

    #[test]
    fn test_activate_removed_object_is_noop() {
        let mut belt = belt_with(BeltConfig {
            speed: 600.0, // exits on its spawn tick
            exit_threshold: 550.0,
            entry_position: 0.0,
            ..Default::default()
        });
        let events = belt.tick(0);
        let id = first_spawned_id(&events);
        assert!(events.contains(&BeltEvent::Removed { id }));

        assert!(belt.activate(id).is_empty());
        assert_eq!(belt.run_state(), RunState::Running);
    }

    #[test]
    fn test_activate_unknown_id_is_noop() {
        let mut belt = belt_with(BeltConfig::default());
        belt.tick(0);
        assert!(belt.activate(9999).is_empty());
        assert_eq!(belt.run_state(), RunState::Running);
    }

    #[test]
    fn test_full_cycle_resumes_spawning() {
        let mut belt = belt_with(BeltConfig::default());
        let id = first_spawned_id(&belt.tick(0));
        belt.activate(id);
        belt.on_display_window_elapsed();

        // Belt resumed: the next due tick spawns again.
        let events = belt.tick(2000);
        assert_eq!(spawn_count(&events), 1);
    }

    #[test]
    fn test_determinism() {
        // Same seed, same call sequence: identical event streams.
        let mut a = belt_with(BeltConfig::default());
        let mut b = belt_with(BeltConfig::default());

        for t in 0..10 {
            assert_eq!(a.tick(t * 700), b.tick(t * 700));
        }
        let id = a.objects().map(|o| o.id).min().unwrap();
        assert_eq!(a.activate(id), b.activate(id));
        assert_eq!(a.on_display_window_elapsed(), b.on_display_window_elapsed());
    }
}
