use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;

use tracing::debug;

use crate::config::VerificationConfig;
use crate::domain::{Effect, TimerKind, VerificationInput, VerificationView};
use crate::engine::verification::VerificationSession;
use crate::error::DeliveryError;

/// Sends a one-time code to an address (email or phone).
pub trait CodeDelivery {
    fn send_code(&mut self, target: &str, code: &str) -> Result<(), DeliveryError>;
}

impl<F> CodeDelivery for F
where
    F: FnMut(&str, &str) -> Result<(), DeliveryError>,
{
    fn send_code(&mut self, target: &str, code: &str) -> Result<(), DeliveryError> {
        self(target, code)
    }
}

/// Source of the current time in epoch seconds.
pub trait Clock {
    fn now(&self) -> i64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }
}

/// Clock moved by hand. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<i64>>,
}

impl ManualClock {
    #[must_use]
    pub fn new(start: i64) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }

    pub fn advance(&self, secs: i64) {
        self.now.set(self.now.get() + secs);
    }

    pub fn set(&self, now: i64) {
        self.now.set(now);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> i64 {
        self.now.get()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingTimer {
    pub generation: u64,
    pub timer: TimerKind,
    pub deadline: i64,
}

/// Runs a [`VerificationSession`] against a delivery collaborator and a
/// clock. Effects are executed synchronously; timers live here until they
/// fire on [`tick`](Self::tick) or are cancelled. Dropping the flow drops
/// every pending timer with it.
pub struct VerificationFlow<D: CodeDelivery, C: Clock> {
    session: VerificationSession,
    delivery: D,
    clock: C,
    timers: Vec<PendingTimer>,
}

impl<D: CodeDelivery, C: Clock> VerificationFlow<D, C> {
    pub fn new(
        target_address: impl Into<String>,
        config: VerificationConfig,
        delivery: D,
        clock: C,
    ) -> Self {
        Self {
            session: VerificationSession::new(target_address, config),
            delivery,
            clock,
            timers: Vec::new(),
        }
    }

    pub fn send(&mut self) -> VerificationView {
        self.dispatch(VerificationInput::Send)
    }

    pub fn resend(&mut self) -> VerificationView {
        self.dispatch(VerificationInput::Resend)
    }

    pub fn input(&mut self, text: &str) -> VerificationView {
        self.dispatch(VerificationInput::Input(text.to_string()))
    }

    pub fn submit(&mut self) -> VerificationView {
        self.dispatch(VerificationInput::Submit)
    }

    pub fn cancel(&mut self) -> VerificationView {
        self.dispatch(VerificationInput::Cancel)
    }

    pub fn reset(&mut self) -> VerificationView {
        self.dispatch(VerificationInput::Reset)
    }

    /// Fire every timer whose deadline has passed, earliest first.
    pub fn tick(&mut self) -> VerificationView {
        let now = self.clock.now();
        let (mut due, pending): (Vec<_>, Vec<_>) =
            self.timers.drain(..).partition(|t| t.deadline <= now);
        self.timers = pending;
        due.sort_by_key(|t| t.deadline);

        for timer in due {
            self.dispatch(VerificationInput::TimerFired {
                generation: timer.generation,
                timer: timer.timer,
            });
        }
        self.session.view()
    }

    /// Feed one input and run the effects it produces, including the
    /// completions those effects report back.
    pub fn dispatch(&mut self, input: VerificationInput) -> VerificationView {
        let mut queue = VecDeque::from([input]);

        while let Some(input) = queue.pop_front() {
            let now = self.clock.now();
            for effect in self.session.handle(input, now) {
                match effect {
                    Effect::Deliver {
                        generation,
                        target,
                        code,
                    } => {
                        let result = self.delivery.send_code(&target, &code);
                        queue.push_back(VerificationInput::DeliveryFinished { generation, result });
                    }
                    Effect::StartTimer {
                        generation,
                        timer,
                        deadline,
                    } => self.timers.push(PendingTimer {
                        generation,
                        timer,
                        deadline,
                    }),
                    Effect::CancelTimers { generation } => {
                        self.timers.retain(|t| t.generation != generation);
                        debug!(generation, "timers cancelled");
                    }
                    Effect::CheckCode { generation } => {
                        queue.push_back(VerificationInput::CheckDue { generation });
                    }
                }
            }
        }
        self.session.view()
    }

    #[must_use]
    pub fn view(&self) -> VerificationView {
        self.session.view()
    }

    #[must_use]
    pub fn session(&self) -> &VerificationSession {
        &self.session
    }

    #[must_use]
    pub fn pending_timers(&self) -> &[PendingTimer] {
        &self.timers
    }

    #[must_use]
    pub fn delivery(&self) -> &D {
        &self.delivery
    }

    pub fn delivery_mut(&mut self) -> &mut D {
        &mut self.delivery
    }

    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }
}
