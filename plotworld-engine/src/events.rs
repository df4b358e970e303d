//! Cancellable notifications raised by the rule engine.

use flexstr::SharedStr;
use glam::I64Vec3;
use plotworld_core::Plot;

/// What happened, carrying the acting plot, position and players.
#[derive(Clone, Debug, PartialEq)]
pub enum PlotEvent {
    /// a player is about to change a block inside a plot
    Block {
        /// the plot containing the block
        plot: Plot,
        /// position of the affected block
        position: I64Vec3,
        /// name of the acting player
        actor: SharedStr,
    },
    /// a player is about to change a road/wall block bordering a plot
    BorderChange {
        /// the plot the block borders on
        plot: Plot,
        /// position of the affected block
        position: I64Vec3,
        /// name of the acting player
        actor: SharedStr,
    },
    /// a player is about to cross into a plot
    EnterPlot {
        /// the plot being entered
        plot: Plot,
        /// name of the moving player
        player: SharedStr,
    },
    /// a player is about to cross out of a plot
    LeavePlot {
        /// the plot being left
        plot: Plot,
        /// name of the moving player
        player: SharedStr,
    },
    /// a player is about to damage another player inside a plot
    Pvp {
        /// the plot containing the victim
        plot: Plot,
        /// name of the attacking player
        attacker: SharedStr,
        /// name of the attacked player
        victim: SharedStr,
    },
}

/// A [`PlotEvent`] in flight, carrying the cancellation flag observers may
/// set or clear.
#[derive(Clone, Debug, PartialEq)]
pub struct Notification {
    event: PlotEvent,
    cancelled: bool,
}

impl Notification {
    /// Wraps an event, seeded with the originating action's cancellation
    /// state.
    #[must_use]
    pub const fn new(event: PlotEvent, cancelled: bool) -> Self {
        Self { event, cancelled }
    }

    /// The event being dispatched.
    #[must_use]
    pub const fn event(&self) -> &PlotEvent {
        &self.event
    }

    /// Whether the underlying action is currently marked as not-to-be-applied.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Marks or unmarks the underlying action as cancelled. Later observers
    /// and the engine read the final state back.
    pub const fn set_cancelled(&mut self, cancelled: bool) {
        self.cancelled = cancelled;
    }
}

/// Observes notifications and may flip their cancellation flag.
pub trait EventObserver {
    /// Called once per dispatched notification, in subscription order.
    fn notify(&mut self, notification: &mut Notification);
}

/// Delivers notifications to all subscribed observers and reports the final
/// cancellation state back to the engine.
#[derive(Default)]
pub struct EventBus {
    observers: Vec<Box<dyn EventObserver>>,
}

impl EventBus {
    /// Creates a bus with no observers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an observer behind all previously registered ones.
    pub fn subscribe(&mut self, observer: Box<dyn EventObserver>) {
        self.observers.push(observer);
    }

    /// Dispatches one event and returns whether the underlying action ends up
    /// cancelled.
    pub fn dispatch(&mut self, event: PlotEvent, pre_cancelled: bool) -> bool {
        let mut notification = Notification::new(event, pre_cancelled);
        for observer in &mut self.observers {
            observer.notify(&mut notification);
        }
        notification.is_cancelled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plotworld_core::PlotId;

    struct Recorder {
        seen: u32,
        cancel: Option<bool>,
    }

    impl EventObserver for Recorder {
        fn notify(&mut self, notification: &mut Notification) {
            self.seen += 1;
            if let Some(cancel) = self.cancel {
                notification.set_cancelled(cancel);
            }
        }
    }

    fn enter_event() -> PlotEvent {
        PlotEvent::EnterPlot {
            plot: Plot::unclaimed(PlotId { x: 1, z: 1 }),
            player: "steve".into(),
        }
    }

    #[test]
    fn dispatch_reads_the_flag_back() {
        let mut bus = EventBus::new();
        bus.subscribe(Box::new(Recorder {
            seen: 0,
            cancel: Some(true),
        }));
        assert!(bus.dispatch(enter_event(), false));
    }

    #[test]
    fn later_observers_may_clear_the_flag() {
        let mut bus = EventBus::new();
        bus.subscribe(Box::new(Recorder {
            seen: 0,
            cancel: Some(true),
        }));
        bus.subscribe(Box::new(Recorder {
            seen: 0,
            cancel: Some(false),
        }));
        assert!(!bus.dispatch(enter_event(), false));
    }

    #[test]
    fn pre_cancelled_state_is_visible_to_observers() {
        let mut bus = EventBus::new();
        bus.subscribe(Box::new(Recorder {
            seen: 0,
            cancel: None,
        }));
        assert!(bus.dispatch(enter_event(), true));
        assert!(!bus.dispatch(enter_event(), false));
    }
}
