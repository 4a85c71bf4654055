//! Elapsed-day gating for the outreach sequence.
//!
//! The sequence is fixed: cold email, SMS nudge, follow-up 1, follow-up 2.
//! Each step waits a configurable number of days after the previous one went
//! out. The `*_sent` flags on the lead are the only guard against sending a
//! step twice.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::followup::OutreachStep;
use crate::domain::lead::Lead;

/// Day gaps between consecutive steps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutreachSchedule {
    /// Days after the cold email before the SMS nudge.
    pub sms_after_days: i64,
    /// Days after the SMS (or the cold email, when no SMS was possible).
    pub first_followup_after_days: i64,
    /// Days after follow-up 1.
    pub second_followup_after_days: i64,
}

impl Default for OutreachSchedule {
    fn default() -> Self {
        Self {
            sms_after_days: 2,
            first_followup_after_days: 3,
            second_followup_after_days: 4,
        }
    }
}

/// Latest anchor timestamps that make each step due at a given moment.
///
/// A step is due once its anchor is at or before the matching cutoff. The
/// repository filters on these so only due leads count against a batch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DueCutoffs {
    pub sms: NaiveDateTime,
    pub first_followup: NaiveDateTime,
    pub second_followup: NaiveDateTime,
}

impl OutreachSchedule {
    pub fn cutoffs(&self, now: NaiveDateTime) -> DueCutoffs {
        DueCutoffs {
            sms: now - Duration::days(self.sms_after_days),
            first_followup: now - Duration::days(self.first_followup_after_days),
            second_followup: now - Duration::days(self.second_followup_after_days),
        }
    }
}

/// Returns the step the processor should send to `lead` at `now`, if any.
///
/// The cold email is never returned: it is sent by hand from the web UI and
/// starts the clock for everything else.
pub fn next_due_step(
    lead: &Lead,
    schedule: &OutreachSchedule,
    now: NaiveDateTime,
) -> Option<OutreachStep> {
    if !lead.status.accepts_outreach() || lead.email.is_none() {
        return None;
    }

    let state = &lead.outreach;
    let cold_email_sent_at = state.cold_email_sent_at?;
    let due = schedule.cutoffs(now);

    if !state.sms_sent && lead.phone.is_some() {
        return (cold_email_sent_at <= due.sms).then_some(OutreachStep::Sms);
    }

    if !state.followup_1_sent {
        let anchor = if state.sms_sent {
            state.sms_sent_at.unwrap_or(cold_email_sent_at)
        } else {
            cold_email_sent_at
        };
        return (anchor <= due.first_followup).then_some(OutreachStep::FollowUp1);
    }

    if !state.followup_2_sent {
        let anchor = state.followup_1_sent_at.unwrap_or(cold_email_sent_at);
        return (anchor <= due.second_followup).then_some(OutreachStep::FollowUp2);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::lead::{LeadStatus, OutreachState};
    use crate::domain::types::{HubId, LeadEmail, LeadId, PhoneNumber, SalonName};
    use chrono::NaiveDate;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, day)
            .and_then(|date| date.and_hms_opt(hour, 0, 0))
            .expect("valid date")
    }

    fn lead(outreach: OutreachState) -> Lead {
        Lead {
            id: LeadId::new(1).unwrap(),
            hub_id: HubId::new(1).unwrap(),
            salon_name: SalonName::new("Studio Urody Ewa").unwrap(),
            contact_name: None,
            email: Some(LeadEmail::new("ewa@example.com").unwrap()),
            phone: Some(PhoneNumber::new("600700800").unwrap()),
            city: None,
            status: LeadStatus::Contacted,
            notes: None,
            outreach,
            created_at: at(1, 9),
            updated_at: at(1, 9),
        }
    }

    fn cold_on_day_one() -> OutreachState {
        OutreachState {
            cold_email_sent_at: Some(at(1, 10)),
            ..OutreachState::default()
        }
    }

    #[test]
    fn cutoffs_step_back_from_now() {
        let due = OutreachSchedule::default().cutoffs(at(10, 9));
        assert_eq!(due.sms, at(8, 9));
        assert_eq!(due.first_followup, at(7, 9));
        assert_eq!(due.second_followup, at(6, 9));
    }

    #[test]
    fn nothing_before_cold_email() {
        let schedule = OutreachSchedule::default();
        let lead = lead(OutreachState::default());
        assert_eq!(next_due_step(&lead, &schedule, at(20, 0)), None);
    }

    #[test]
    fn sms_waits_for_its_delay() {
        let schedule = OutreachSchedule::default();
        let lead = lead(cold_on_day_one());
        assert_eq!(next_due_step(&lead, &schedule, at(3, 9)), None);
        assert_eq!(
            next_due_step(&lead, &schedule, at(3, 10)),
            Some(OutreachStep::Sms)
        );
    }

    #[test]
    fn first_followup_is_anchored_to_sms() {
        let schedule = OutreachSchedule::default();
        let lead = lead(OutreachState {
            sms_sent: true,
            sms_sent_at: Some(at(5, 12)),
            ..cold_on_day_one()
        });
        assert_eq!(next_due_step(&lead, &schedule, at(8, 11)), None);
        assert_eq!(
            next_due_step(&lead, &schedule, at(8, 12)),
            Some(OutreachStep::FollowUp1)
        );
    }

    #[test]
    fn missing_phone_skips_sms() {
        let schedule = OutreachSchedule::default();
        let mut lead = lead(cold_on_day_one());
        lead.phone = None;
        assert_eq!(next_due_step(&lead, &schedule, at(3, 10)), None);
        assert_eq!(
            next_due_step(&lead, &schedule, at(4, 10)),
            Some(OutreachStep::FollowUp1)
        );
    }

    #[test]
    fn second_followup_is_anchored_to_first() {
        let schedule = OutreachSchedule::default();
        let lead = lead(OutreachState {
            sms_sent: true,
            sms_sent_at: Some(at(3, 10)),
            followup_1_sent: true,
            followup_1_sent_at: Some(at(6, 10)),
            ..cold_on_day_one()
        });
        assert_eq!(next_due_step(&lead, &schedule, at(10, 9)), None);
        assert_eq!(
            next_due_step(&lead, &schedule, at(10, 10)),
            Some(OutreachStep::FollowUp2)
        );
    }

    #[test]
    fn finished_sequence_yields_nothing() {
        let schedule = OutreachSchedule::default();
        let lead = lead(OutreachState {
            sms_sent: true,
            sms_sent_at: Some(at(3, 10)),
            followup_1_sent: true,
            followup_1_sent_at: Some(at(6, 10)),
            followup_2_sent: true,
            followup_2_sent_at: Some(at(10, 10)),
            ..cold_on_day_one()
        });
        assert_eq!(next_due_step(&lead, &schedule, at(30, 0)), None);
    }

    #[test]
    fn closed_statuses_stop_the_sequence() {
        let schedule = OutreachSchedule::default();
        for status in [
            LeadStatus::Replied,
            LeadStatus::MeetingScheduled,
            LeadStatus::Won,
            LeadStatus::Lost,
        ] {
            let mut lead = lead(cold_on_day_one());
            lead.status = status;
            assert_eq!(next_due_step(&lead, &schedule, at(30, 0)), None);
        }
    }

    #[test]
    fn lead_without_email_is_never_due() {
        let schedule = OutreachSchedule::default();
        let mut lead = lead(cold_on_day_one());
        lead.email = None;
        assert_eq!(next_due_step(&lead, &schedule, at(30, 0)), None);
    }

    #[test]
    fn sent_flag_wins_over_missing_timestamp() {
        let schedule = OutreachSchedule::default();
        let lead = lead(OutreachState {
            sms_sent: true,
            sms_sent_at: None,
            ..cold_on_day_one()
        });
        assert_eq!(
            next_due_step(&lead, &schedule, at(4, 10)),
            Some(OutreachStep::FollowUp1)
        );
    }
}
