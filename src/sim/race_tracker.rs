use super::{AudioCue, ControlIntent, Notification, RaceConfig, RaceState};
use crate::physics::{Aabb, BodyHandle};
use ahash::AHashMap;
use arrayvec::ArrayVec;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TriggerKind {
    Checkpoint,
    FinishLine,
}

/// A non-solid box the tracker listens to, identified by its body handle
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TriggerVolume {
    pub handle: BodyHandle,
    pub kind: TriggerKind,
    pub bounds: Aabb,
}

/// The trigger pair a track hands to the tracker
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackTriggers {
    pub checkpoint: TriggerVolume,
    pub finish_line: TriggerVolume,
}

impl TrackTriggers {
    #[must_use]
    pub const fn as_array(&self) -> [TriggerVolume; 2] {
        [self.checkpoint, self.finish_line]
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum RaceEvent {
    Notification(Notification),
    Audio(AudioCue),
}

/// At most a lap message plus the finish message come out of one contact
pub type RaceEvents = ArrayVec<RaceEvent, 2>;

/// Turns contact reports into lap and checkpoint progress
#[derive(Clone, Debug)]
pub struct RaceProgressTracker {
    kinds: AHashMap<BodyHandle, TriggerKind>,
    total_laps: u32,
    cooldown: Duration,
}

impl RaceProgressTracker {
    #[must_use]
    pub fn new(triggers: TrackTriggers, config: &RaceConfig) -> Self {
        let kinds = triggers
            .as_array()
            .into_iter()
            .map(|trigger| (trigger.handle, trigger.kind))
            .collect();

        Self {
            kinds,
            total_laps: config.total_laps,
            cooldown: config.trigger_cooldown,
        }
    }

    #[must_use]
    pub const fn total_laps(&self) -> u32 {
        self.total_laps
    }

    #[must_use]
    pub fn trigger_kind(&self, handle: BodyHandle) -> Option<TriggerKind> {
        self.kinds.get(&handle).copied()
    }

    fn cooled_down(&self, last_fire: Option<Duration>, now: Duration) -> bool {
        last_fire.is_none_or(|last| now.saturating_sub(last) > self.cooldown)
    }

    /// Apply one contact between the car and `other` at simulated time `now`.
    ///
    /// Contacts after the finish, with unknown bodies, or inside a trigger's cooldown change nothing.
    pub fn on_contact(
        &self,
        state: &mut RaceState,
        other: BodyHandle,
        other_is_static: bool,
        now: Duration,
    ) -> RaceEvents {
        let mut events = RaceEvents::new();
        if state.finished {
            return events;
        }

        match self.trigger_kind(other) {
            Some(TriggerKind::Checkpoint) => {
                if !self.cooled_down(state.last_checkpoint_fire, now) {
                    return events;
                }

                state.checkpoint_armed = true;
                state.last_checkpoint_fire = Some(now);
                log::debug!("checkpoint armed at {now:?}");
                events.push(RaceEvent::Notification(Notification::checkpoint()));
            }
            Some(TriggerKind::FinishLine) => {
                if !self.cooled_down(state.last_finish_fire, now) {
                    return events;
                }

                state.last_finish_fire = Some(now);
                if !state.checkpoint_armed {
                    log::debug!("finish line crossed without a checkpoint at {now:?}");
                    events.push(RaceEvent::Notification(Notification::checkpoint_required()));
                    return events;
                }

                state.lap_count += 1;
                state.checkpoint_armed = false;
                log::debug!("lap {} / {} at {now:?}", state.lap_count, self.total_laps);
                events.push(RaceEvent::Notification(Notification::lap(
                    state.lap_count,
                    self.total_laps,
                )));

                if state.lap_count >= self.total_laps {
                    state.finished = true;
                    state.finish_time = Some(now);
                    log::info!(
                        "race finished in {:?}",
                        now.saturating_sub(state.start_time)
                    );
                    events.push(RaceEvent::Notification(Notification::finished()));
                }
            }
            None if other_is_static => events.push(RaceEvent::Audio(AudioCue::Impact)),
            None => log::trace!("ignoring contact with {other:?}"),
        }

        events
    }

    /// Controls the car actually receives; a finished race holds it in neutral
    #[must_use]
    pub const fn gate_controls(state: &RaceState, intent: ControlIntent) -> ControlIntent {
        if state.finished {
            ControlIntent::NEUTRAL
        } else {
            intent
        }
    }
}
