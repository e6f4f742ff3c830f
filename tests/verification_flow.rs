//! End-to-end one-time code scenarios driven through `VerificationFlow`
//! with a recording delivery and a hand-moved clock.

use mascara::domain::{TimerKind, VerificationError, VerificationInput, VerificationStatus};
use mascara::engine::{CodeDelivery, ManualClock, VerificationFlow};
use mascara::{DeliveryError, VerificationConfig};

#[derive(Default)]
struct Recorder {
    codes: Vec<String>,
}

impl CodeDelivery for Recorder {
    fn send_code(&mut self, _target: &str, code: &str) -> Result<(), DeliveryError> {
        self.codes.push(code.to_string());
        Ok(())
    }
}

impl Recorder {
    fn last(&self) -> String {
        self.codes.last().cloned().unwrap()
    }
}

fn flow() -> (VerificationFlow<Recorder, ManualClock>, ManualClock) {
    let clock = ManualClock::new(1_700_000_000);
    let flow = VerificationFlow::new(
        "paciente@clinica.com.br",
        VerificationConfig::default(),
        Recorder::default(),
        clock.clone(),
    );
    (flow, clock)
}

fn wrong(code: &str) -> String {
    code.chars()
        .map(|c| if c == '9' { '0' } else { char::from(c as u8 + 1) })
        .collect()
}

fn enter(flow: &mut VerificationFlow<Recorder, ManualClock>, code: &str) -> VerificationStatus {
    flow.input(code);
    flow.submit().status
}

#[test]
fn three_wrong_codes_end_exhausted() {
    let (mut flow, clock) = flow();
    flow.send();
    let code = flow.delivery().last();

    for attempt in 1..=3 {
        clock.advance(10);
        let status = enter(&mut flow, &wrong(&code));
        if attempt < 3 {
            assert_eq!(status, VerificationStatus::AwaitingCode);
            assert_eq!(flow.view().attempts_remaining, 3 - attempt);
            assert_eq!(flow.view().entered, "");
        } else {
            assert_eq!(status, VerificationStatus::Exhausted);
        }
    }

    assert_eq!(flow.view().error, Some(VerificationError::AttemptsExhausted));
    assert!(!flow.session().has_live_code());
    assert!(flow.pending_timers().is_empty());

    // even the right code is refused now
    assert_eq!(enter(&mut flow, &code), VerificationStatus::Exhausted);
}

#[test]
fn expired_code_is_rejected() {
    let (mut flow, clock) = flow();
    flow.send();
    let code = flow.delivery().last();

    clock.advance(600);
    let view = flow.tick();
    assert_eq!(view.error, Some(VerificationError::Expired { remaining: 3 }));

    assert_eq!(enter(&mut flow, &code), VerificationStatus::AwaitingCode);
    assert_eq!(
        flow.view().error,
        Some(VerificationError::Expired { remaining: 2 })
    );
}

#[test]
fn expiry_does_not_depend_on_the_timer() {
    let (mut flow, clock) = flow();
    flow.send();
    let code = flow.delivery().last();

    // no tick: the deadline is still checked against the clock
    clock.advance(601);
    assert_eq!(enter(&mut flow, &code), VerificationStatus::AwaitingCode);
}

#[test]
fn resend_during_cooldown_keeps_original_code() {
    let (mut flow, clock) = flow();
    flow.send();
    let code = flow.delivery().last();
    let timers = flow.pending_timers().to_vec();

    clock.advance(30);
    flow.tick();
    let view = flow.resend();
    assert_eq!(view.status, VerificationStatus::AwaitingCode);
    assert!(!view.can_resend);
    assert_eq!(flow.delivery().codes.len(), 1);
    assert_eq!(flow.pending_timers(), timers.as_slice());

    assert_eq!(enter(&mut flow, &code), VerificationStatus::Verified);
}

#[test]
fn correct_code_verifies_and_clears_record() {
    let (mut flow, clock) = flow();
    flow.send();
    assert!(flow.session().has_live_code());
    let code = flow.delivery().last();

    clock.advance(120);
    assert_eq!(enter(&mut flow, &code), VerificationStatus::Verified);
    assert!(!flow.session().has_live_code());
    assert!(flow.pending_timers().is_empty());
    assert_eq!(flow.view().expires_at, None);
}

#[test]
fn resend_after_cooldown_supersedes_old_code() {
    let (mut flow, clock) = flow();
    flow.send();
    let old = flow.delivery().last();

    clock.advance(60);
    assert!(flow.tick().can_resend);
    flow.resend();
    let new = flow.delivery().last();
    assert_eq!(flow.delivery().codes.len(), 2);
    assert!(flow.pending_timers().iter().all(|t| t.generation == 2));

    if old != new {
        assert_eq!(enter(&mut flow, &old), VerificationStatus::AwaitingCode);
    }
    assert_eq!(enter(&mut flow, &new), VerificationStatus::Verified);
}

#[test]
fn stale_timer_after_cancel_has_no_effect() {
    let (mut flow, clock) = flow();
    flow.send();
    let generation = flow.session().generation();
    flow.cancel();
    let before = flow.view();

    clock.advance(700);
    let after = flow.dispatch(VerificationInput::TimerFired {
        generation,
        timer: TimerKind::Expiry,
    });
    assert_eq!(after, before);
    assert_eq!(after.status, VerificationStatus::Idle);
}

#[test]
fn fresh_session_after_exhaustion() {
    let (mut flow, _) = flow();
    flow.send();
    let code = flow.delivery().last();
    for _ in 0..3 {
        enter(&mut flow, &wrong(&code));
    }
    assert_eq!(flow.view().status, VerificationStatus::Exhausted);

    let view = flow.send();
    assert_eq!(view.status, VerificationStatus::AwaitingCode);
    assert_eq!(view.attempts_remaining, 3);
    let code = flow.delivery().last();
    assert_eq!(enter(&mut flow, &code), VerificationStatus::Verified);
}

#[test]
fn failed_delivery_issues_nothing() {
    let clock = ManualClock::new(0);
    let mut flow = VerificationFlow::new(
        "paciente@clinica.com.br",
        VerificationConfig::default(),
        |_: &str, _: &str| -> Result<(), DeliveryError> { Err(DeliveryError::new("bounced")) },
        clock,
    );
    let view = flow.send();
    assert_eq!(view.status, VerificationStatus::Idle);
    assert_eq!(
        view.error,
        Some(VerificationError::DeliveryFailed {
            reason: "bounced".to_string()
        })
    );
    assert!(!flow.session().has_live_code());
}
