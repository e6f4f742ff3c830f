use rand::Rng;
use tracing::{debug, info, warn};

use crate::config::VerificationConfig;
use crate::domain::{
    Effect, TimerKind, VerificationError, VerificationInput, VerificationStatus, VerificationView,
    CODE_LENGTH,
};
use crate::error::DeliveryError;
use crate::output::{redact_address, RedactionConfig};
use crate::utils::digits_only;

/// The one live code of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
struct IssuedCode {
    code: String,
    target_address: String,
    issued_at: i64,
    expires_at: i64,
}

/// One-time code workflow for a single target address.
///
/// `handle` is a pure reducer over inputs stamped with the current time; the
/// work it wants done comes back as [`Effect`]s. Completions for a superseded
/// send (an older `generation`) are dropped.
#[derive(Debug, Clone)]
pub struct VerificationSession {
    target_address: String,
    config: VerificationConfig,
    record: Option<IssuedCode>,
    in_flight: Option<String>,
    submitted: Option<String>,
    attempts_used: u32,
    status: VerificationStatus,
    generation: u64,
    cooldown_until: Option<i64>,
    cooldown_running: bool,
    entered: String,
    error: Option<VerificationError>,
}

impl VerificationSession {
    #[must_use]
    pub fn new(target_address: impl Into<String>, config: VerificationConfig) -> Self {
        Self {
            target_address: target_address.into(),
            config,
            record: None,
            in_flight: None,
            submitted: None,
            attempts_used: 0,
            status: VerificationStatus::Idle,
            generation: 0,
            cooldown_until: None,
            cooldown_running: false,
            entered: String::new(),
            error: None,
        }
    }

    #[must_use]
    pub fn status(&self) -> VerificationStatus {
        self.status
    }

    #[must_use]
    pub fn attempts_used(&self) -> u32 {
        self.attempts_used
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn target_address(&self) -> &str {
        &self.target_address
    }

    #[must_use]
    pub fn config(&self) -> &VerificationConfig {
        &self.config
    }

    /// Whether an issued code is currently stored for this session.
    #[must_use]
    pub fn has_live_code(&self) -> bool {
        self.record.is_some()
    }

    #[must_use]
    pub fn view(&self) -> VerificationView {
        let can_resend = match self.status {
            VerificationStatus::Idle | VerificationStatus::Exhausted => true,
            VerificationStatus::AwaitingCode => !self.cooldown_running,
            _ => false,
        };
        VerificationView {
            status: self.status,
            entered: self.entered.clone(),
            error: self.error.clone(),
            can_resend,
            attempts_remaining: self.remaining(),
            expires_at: self.record.as_ref().map(|r| r.expires_at),
        }
    }

    pub fn handle(&mut self, input: VerificationInput, now: i64) -> Vec<Effect> {
        let before = self.status;
        let effects = match input {
            VerificationInput::Send => self.on_send(now),
            VerificationInput::Resend => self.on_resend(now),
            VerificationInput::Input(text) => self.on_input(&text),
            VerificationInput::Submit => self.on_submit(),
            VerificationInput::Cancel | VerificationInput::Reset => self.teardown(),
            VerificationInput::DeliveryFinished { generation, result } => {
                if generation != self.generation || self.status != VerificationStatus::Sending {
                    debug!(generation, current = self.generation, "stale delivery result");
                    return Vec::new();
                }
                self.on_delivered(result, now)
            }
            VerificationInput::CheckDue { generation } => {
                if generation != self.generation || self.status != VerificationStatus::Verifying {
                    return Vec::new();
                }
                self.on_check(now)
            }
            VerificationInput::TimerFired { generation, timer } => {
                if generation != self.generation {
                    debug!(generation, ?timer, "stale timer");
                    return Vec::new();
                }
                self.on_timer(timer);
                Vec::new()
            }
        };

        if before != self.status {
            debug!(from = ?before, to = ?self.status, generation = self.generation, "verification transition");
        }
        effects
    }

    fn on_send(&mut self, now: i64) -> Vec<Effect> {
        if self.status.is_terminal() {
            let mut effects = self.teardown();
            effects.extend(self.begin_send());
            return effects;
        }
        match self.status {
            VerificationStatus::Sending | VerificationStatus::Verifying => Vec::new(),
            VerificationStatus::AwaitingCode => self.on_resend(now),
            _ => self.begin_send(),
        }
    }

    fn on_resend(&mut self, now: i64) -> Vec<Effect> {
        match self.status {
            VerificationStatus::AwaitingCode => {
                if self.cooldown_until.is_some_and(|until| now < until) {
                    debug!("resend ignored during cooldown");
                    return Vec::new();
                }
                self.begin_send()
            }
            VerificationStatus::Sending | VerificationStatus::Verifying => Vec::new(),
            _ => self.on_send(now),
        }
    }

    /// Invalidates whatever code was live before generating the next one.
    fn begin_send(&mut self) -> Vec<Effect> {
        let previous = self.generation;
        self.record = None;
        self.submitted = None;
        self.cooldown_until = None;
        self.cooldown_running = false;
        self.entered.clear();
        self.error = None;
        self.attempts_used = 0;
        self.generation += 1;
        self.status = VerificationStatus::Sending;

        let code = generate_code();
        self.in_flight = Some(code.clone());

        let mut effects = Vec::with_capacity(2);
        if previous > 0 {
            effects.push(Effect::CancelTimers {
                generation: previous,
            });
        }
        effects.push(Effect::Deliver {
            generation: self.generation,
            target: self.target_address.clone(),
            code,
        });
        effects
    }

    fn on_delivered(&mut self, result: Result<(), DeliveryError>, now: i64) -> Vec<Effect> {
        let code = self.in_flight.take();
        let redacted = redact_address(&self.target_address, &RedactionConfig::default());

        match (result, code) {
            (Ok(()), Some(code)) => {
                let expires_at = now.saturating_add(secs(self.config.expiry_secs));
                let cooldown_until = now.saturating_add(secs(self.config.cooldown_secs));
                self.record = Some(IssuedCode {
                    code,
                    target_address: self.target_address.clone(),
                    issued_at: now,
                    expires_at,
                });
                self.cooldown_until = Some(cooldown_until);
                self.cooldown_running = true;
                self.status = VerificationStatus::AwaitingCode;
                info!(target_address = %redacted, generation = self.generation, "verification code issued");
                vec![
                    Effect::StartTimer {
                        generation: self.generation,
                        timer: TimerKind::Cooldown,
                        deadline: cooldown_until,
                    },
                    Effect::StartTimer {
                        generation: self.generation,
                        timer: TimerKind::Expiry,
                        deadline: expires_at,
                    },
                ]
            }
            (Err(err), _) => {
                warn!(target_address = %redacted, reason = %err.reason, "verification code delivery failed");
                self.status = VerificationStatus::Idle;
                self.error = Some(VerificationError::DeliveryFailed { reason: err.reason });
                Vec::new()
            }
            (Ok(()), None) => {
                self.status = VerificationStatus::Idle;
                Vec::new()
            }
        }
    }

    fn on_input(&mut self, text: &str) -> Vec<Effect> {
        if self.status != VerificationStatus::AwaitingCode {
            return Vec::new();
        }
        let mut digits = digits_only(text);
        digits.truncate(CODE_LENGTH);
        if !digits.is_empty() {
            self.error = None;
        }
        self.entered = digits;

        if self.config.auto_submit && self.entered.len() == CODE_LENGTH {
            return self.on_submit();
        }
        Vec::new()
    }

    fn on_submit(&mut self) -> Vec<Effect> {
        if self.status != VerificationStatus::AwaitingCode {
            return Vec::new();
        }
        if self.entered.len() < CODE_LENGTH {
            self.error = Some(VerificationError::IncompleteCode);
            return Vec::new();
        }
        self.submitted = Some(self.entered.clone());
        self.status = VerificationStatus::Verifying;
        vec![Effect::CheckCode {
            generation: self.generation,
        }]
    }

    fn on_check(&mut self, now: i64) -> Vec<Effect> {
        let submitted = self.submitted.take().unwrap_or_default();
        let record = self.record.as_ref();
        let expired = record.map_or(true, |r| now >= r.expires_at);
        let matches = record.is_some_and(|r| {
            r.code == submitted && r.target_address == self.target_address && now >= r.issued_at
        });

        if matches && !expired {
            self.record = None;
            self.entered.clear();
            self.error = None;
            self.cooldown_running = false;
            self.status = VerificationStatus::Verified;
            info!(generation = self.generation, "verification code accepted");
            return vec![Effect::CancelTimers {
                generation: self.generation,
            }];
        }

        self.attempts_used += 1;
        self.entered.clear();

        if self.attempts_used >= self.config.max_attempts {
            let redacted = redact_address(&self.target_address, &RedactionConfig::default());
            warn!(target_address = %redacted, attempts = self.attempts_used, "verification attempts exhausted");
            self.record = None;
            self.cooldown_running = false;
            self.status = VerificationStatus::Exhausted;
            self.error = Some(VerificationError::AttemptsExhausted);
            return vec![Effect::CancelTimers {
                generation: self.generation,
            }];
        }

        let remaining = self.remaining();
        self.status = VerificationStatus::AwaitingCode;
        self.error = Some(if expired {
            VerificationError::Expired { remaining }
        } else {
            VerificationError::WrongCode { remaining }
        });
        Vec::new()
    }

    fn on_timer(&mut self, timer: TimerKind) {
        match timer {
            TimerKind::Cooldown => self.cooldown_running = false,
            TimerKind::Expiry => {
                if self.status == VerificationStatus::AwaitingCode {
                    self.error = Some(VerificationError::Expired {
                        remaining: self.remaining(),
                    });
                }
            }
        }
    }

    /// Back to `Idle`. Bumping the generation makes any completion or timer
    /// still in flight stale.
    fn teardown(&mut self) -> Vec<Effect> {
        let previous = self.generation;
        self.record = None;
        self.in_flight = None;
        self.submitted = None;
        self.attempts_used = 0;
        self.cooldown_until = None;
        self.cooldown_running = false;
        self.entered.clear();
        self.error = None;
        self.status = VerificationStatus::Idle;
        self.generation += 1;
        vec![Effect::CancelTimers {
            generation: previous,
        }]
    }

    fn remaining(&self) -> u32 {
        self.config.max_attempts.saturating_sub(self.attempts_used)
    }
}

fn secs(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// Uniform fixed-width numeric code.
#[must_use]
pub fn generate_code() -> String {
    let upper = 10_u32.pow(CODE_LENGTH as u32);
    let value = rand::thread_rng().gen_range(0..upper);
    format!("{value:0width$}", width = CODE_LENGTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TARGET: &str = "ana@clinica.com.br";

    fn session() -> VerificationSession {
        VerificationSession::new(TARGET, VerificationConfig::default())
    }

    /// Send and confirm delivery; returns the issued code.
    fn issue(session: &mut VerificationSession, now: i64) -> String {
        let effects = session.handle(VerificationInput::Send, now);
        let (generation, code) = effects
            .iter()
            .find_map(|e| match e {
                Effect::Deliver {
                    generation, code, ..
                } => Some((*generation, code.clone())),
                _ => None,
            })
            .expect("deliver effect");
        session.handle(
            VerificationInput::DeliveryFinished {
                generation,
                result: Ok(()),
            },
            now,
        );
        code
    }

    fn submit(session: &mut VerificationSession, code: &str, now: i64) -> Vec<Effect> {
        session.handle(VerificationInput::Input(code.to_string()), now);
        let effects = session.handle(VerificationInput::Submit, now);
        let generation = session.generation();
        let mut all = effects;
        all.extend(session.handle(VerificationInput::CheckDue { generation }, now));
        all
    }

    fn wrong(code: &str) -> String {
        let mut wrong = code.to_string();
        let last = if code.ends_with('0') { "1" } else { "0" };
        wrong.replace_range(CODE_LENGTH - 1.., last);
        wrong
    }

    // --- Sending ---

    #[test]
    fn test_generate_code_is_six_digits() {
        for _ in 0..100 {
            let code = generate_code();
            assert_eq!(code.len(), CODE_LENGTH);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_send_emits_delivery() {
        let mut s = session();
        let effects = s.handle(VerificationInput::Send, 0);
        assert_eq!(s.status(), VerificationStatus::Sending);
        assert_eq!(effects.len(), 1);
        assert!(matches!(
            &effects[0],
            Effect::Deliver { generation: 1, target, .. } if target == TARGET
        ));
        assert!(!s.has_live_code());
    }

    #[test]
    fn test_delivery_success_starts_both_timers() {
        let mut s = session();
        s.handle(VerificationInput::Send, 100);
        let effects = s.handle(
            VerificationInput::DeliveryFinished {
                generation: 1,
                result: Ok(()),
            },
            100,
        );
        assert_eq!(s.status(), VerificationStatus::AwaitingCode);
        assert!(s.has_live_code());
        assert_eq!(
            effects,
            vec![
                Effect::StartTimer {
                    generation: 1,
                    timer: TimerKind::Cooldown,
                    deadline: 160
                },
                Effect::StartTimer {
                    generation: 1,
                    timer: TimerKind::Expiry,
                    deadline: 700
                },
            ]
        );
        assert_eq!(s.view().expires_at, Some(700));
        assert!(!s.view().can_resend);
    }

    #[test]
    fn test_huge_timer_settings_saturate_deadlines() {
        let config = VerificationConfig {
            cooldown_secs: u64::MAX,
            expiry_secs: i64::MAX as u64,
            ..VerificationConfig::default()
        };
        let mut s = VerificationSession::new(TARGET, config);
        let code = issue(&mut s, 1_700_000_000);
        assert_eq!(s.status(), VerificationStatus::AwaitingCode);
        assert_eq!(s.view().expires_at, Some(i64::MAX));

        submit(&mut s, &code, 1_700_000_100);
        assert_eq!(s.status(), VerificationStatus::Verified);
    }

    #[test]
    fn test_delivery_failure_returns_to_idle() {
        let mut s = session();
        s.handle(VerificationInput::Send, 0);
        s.handle(
            VerificationInput::DeliveryFinished {
                generation: 1,
                result: Err(DeliveryError::new("smtp down")),
            },
            0,
        );
        assert_eq!(s.status(), VerificationStatus::Idle);
        assert!(!s.has_live_code());
        assert_eq!(
            s.view().error,
            Some(VerificationError::DeliveryFailed {
                reason: "smtp down".to_string()
            })
        );
        assert!(s.view().can_resend);
    }

    #[test]
    fn test_duplicate_send_while_sending_is_ignored() {
        let mut s = session();
        s.handle(VerificationInput::Send, 0);
        assert!(s.handle(VerificationInput::Send, 0).is_empty());
        assert_eq!(s.generation(), 1);
    }

    // --- Resend and cooldown ---

    #[test]
    fn test_resend_during_cooldown_is_noop() {
        let mut s = session();
        let code = issue(&mut s, 0);
        assert!(s.handle(VerificationInput::Resend, 30).is_empty());
        assert_eq!(s.generation(), 1);

        let effects = submit(&mut s, &code, 31);
        assert_eq!(s.status(), VerificationStatus::Verified);
        assert!(effects.contains(&Effect::CancelTimers { generation: 1 }));
    }

    #[test]
    fn test_resend_after_cooldown_invalidates_old_code() {
        let mut s = session();
        let old = issue(&mut s, 0);

        let effects = s.handle(VerificationInput::Resend, 60);
        assert_eq!(s.status(), VerificationStatus::Sending);
        assert!(!s.has_live_code());
        assert_eq!(effects[0], Effect::CancelTimers { generation: 1 });

        // the superseded delivery confirmation is ignored
        assert!(s
            .handle(
                VerificationInput::DeliveryFinished {
                    generation: 1,
                    result: Ok(()),
                },
                60,
            )
            .is_empty());
        assert_eq!(s.status(), VerificationStatus::Sending);

        s.handle(
            VerificationInput::DeliveryFinished {
                generation: 2,
                result: Ok(()),
            },
            61,
        );
        let record_code = s.record.as_ref().map(|r| r.code.clone()).unwrap();
        if record_code != old {
            submit(&mut s, &old, 62);
            assert_eq!(s.status(), VerificationStatus::AwaitingCode);
            assert_eq!(s.attempts_used(), 1);
        }
    }

    #[test]
    fn test_send_while_awaiting_acts_as_resend() {
        let mut s = session();
        issue(&mut s, 0);
        assert!(s.handle(VerificationInput::Send, 10).is_empty());
        assert!(!s.handle(VerificationInput::Send, 61).is_empty());
        assert_eq!(s.generation(), 2);
    }

    #[test]
    fn test_cooldown_timer_enables_resend_flag() {
        let mut s = session();
        issue(&mut s, 0);
        s.handle(
            VerificationInput::TimerFired {
                generation: 1,
                timer: TimerKind::Cooldown,
            },
            60,
        );
        assert!(s.view().can_resend);
    }

    // --- Submitting ---

    #[test]
    fn test_correct_code_verifies_and_clears_record() {
        let mut s = session();
        let code = issue(&mut s, 0);
        submit(&mut s, &code, 10);
        assert_eq!(s.status(), VerificationStatus::Verified);
        assert!(!s.has_live_code());
        assert_eq!(s.view().error, None);
    }

    #[test]
    fn test_wrong_code_counts_attempt_and_clears_entry() {
        let mut s = session();
        let code = issue(&mut s, 0);
        submit(&mut s, &wrong(&code), 10);
        assert_eq!(s.status(), VerificationStatus::AwaitingCode);
        assert_eq!(s.attempts_used(), 1);
        let view = s.view();
        assert_eq!(view.entered, "");
        assert_eq!(view.error, Some(VerificationError::WrongCode { remaining: 2 }));
        assert_eq!(view.attempts_remaining, 2);
    }

    #[test]
    fn test_three_wrong_codes_exhaust() {
        let mut s = session();
        let code = issue(&mut s, 0);
        for _ in 0..3 {
            submit(&mut s, &wrong(&code), 10);
        }
        assert_eq!(s.status(), VerificationStatus::Exhausted);
        assert_eq!(s.view().error, Some(VerificationError::AttemptsExhausted));
        assert!(!s.has_live_code());

        // terminal until a new send
        submit(&mut s, &code, 11);
        assert_eq!(s.status(), VerificationStatus::Exhausted);
    }

    #[test]
    fn test_expired_code_is_rejected() {
        let mut s = session();
        let code = issue(&mut s, 0);
        submit(&mut s, &code, 600);
        assert_eq!(s.status(), VerificationStatus::AwaitingCode);
        assert_eq!(
            s.view().error,
            Some(VerificationError::Expired { remaining: 2 })
        );
    }

    #[test]
    fn test_incomplete_code_does_not_consume_attempt() {
        let mut s = session();
        issue(&mut s, 0);
        s.handle(VerificationInput::Input("123".to_string()), 1);
        assert!(s.handle(VerificationInput::Submit, 1).is_empty());
        assert_eq!(s.status(), VerificationStatus::AwaitingCode);
        assert_eq!(s.attempts_used(), 0);
        assert_eq!(s.view().error, Some(VerificationError::IncompleteCode));
    }

    #[test]
    fn test_input_keeps_only_code_digits() {
        let mut s = session();
        issue(&mut s, 0);
        s.handle(VerificationInput::Input("12-34 5678".to_string()), 1);
        assert_eq!(s.view().entered, "123456");
    }

    #[test]
    fn test_duplicate_submit_while_verifying_is_ignored() {
        let mut s = session();
        issue(&mut s, 0);
        s.handle(VerificationInput::Input("000000".to_string()), 1);
        assert_eq!(s.handle(VerificationInput::Submit, 1).len(), 1);
        assert_eq!(s.status(), VerificationStatus::Verifying);
        assert!(s.handle(VerificationInput::Submit, 1).is_empty());
    }

    #[test]
    fn test_auto_submit_on_last_digit() {
        let config = VerificationConfig {
            auto_submit: true,
            ..VerificationConfig::default()
        };
        let mut s = VerificationSession::new(TARGET, config);
        let code = issue(&mut s, 0);
        let effects = s.handle(VerificationInput::Input(code), 1);
        assert_eq!(effects, vec![Effect::CheckCode { generation: 1 }]);
        assert_eq!(s.status(), VerificationStatus::Verifying);
    }

    // --- Teardown ---

    #[test]
    fn test_fresh_session_after_terminal_state() {
        let mut s = session();
        let code = issue(&mut s, 0);
        submit(&mut s, &code, 1);
        assert_eq!(s.status(), VerificationStatus::Verified);

        let effects = s.handle(VerificationInput::Send, 2);
        assert_eq!(s.status(), VerificationStatus::Sending);
        assert_eq!(s.attempts_used(), 0);
        assert!(effects
            .iter()
            .any(|e| matches!(e, Effect::Deliver { .. })));
    }

    #[test]
    fn test_cancel_makes_timers_stale() {
        let mut s = session();
        issue(&mut s, 0);
        let effects = s.handle(VerificationInput::Cancel, 5);
        assert_eq!(effects, vec![Effect::CancelTimers { generation: 1 }]);
        assert_eq!(s.status(), VerificationStatus::Idle);

        let before = s.view();
        s.handle(
            VerificationInput::TimerFired {
                generation: 1,
                timer: TimerKind::Expiry,
            },
            600,
        );
        assert_eq!(s.view(), before);
    }

    #[test]
    fn test_reset_after_exhausted() {
        let mut s = session();
        let code = issue(&mut s, 0);
        for _ in 0..3 {
            submit(&mut s, &wrong(&code), 1);
        }
        s.handle(VerificationInput::Reset, 2);
        assert_eq!(s.status(), VerificationStatus::Idle);
        assert_eq!(s.view().attempts_remaining, 3);
        assert_eq!(s.view().error, None);
    }
}
