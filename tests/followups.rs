use std::cell::RefCell;

use beauty_crm::domain::followup::OutreachStep;
use beauty_crm::domain::lead::NewLead;
use beauty_crm::domain::template::{EmailTemplateKind, NewEmailTemplate};
use beauty_crm::domain::types::{
    CityName, ContactName, HubId, LeadEmail, LeadId, PhoneNumber, SalonName, TemplateBody,
    TemplateSubject,
};
use beauty_crm::outreach::{
    DeliveryError, FollowupProcessor, FollowupReport, Mailer, OutgoingEmail, OutgoingSms,
    OutreachSchedule, SmsGateway,
};
use beauty_crm::repository::{
    DieselRepository, LeadListQuery, LeadReader, LeadWriter, TemplateWriter,
};
use chrono::{NaiveDate, NaiveDateTime};

mod common;

#[derive(Default)]
struct RecordingMailer {
    sent: RefCell<Vec<OutgoingEmail>>,
}

impl Mailer for RecordingMailer {
    fn send_email(&self, email: &OutgoingEmail) -> Result<(), DeliveryError> {
        self.sent.borrow_mut().push(email.clone());
        Ok(())
    }
}

struct RejectingSms;

impl SmsGateway for RejectingSms {
    fn send_sms(&self, _sms: &OutgoingSms) -> Result<(), DeliveryError> {
        Err(DeliveryError::Transport("relay offline".into()))
    }
}

fn day(day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 3, day)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap()
}

fn hub() -> HubId {
    HubId::new(1).unwrap()
}

fn lead(salon: &str, email: &str, phone: Option<&str>) -> NewLead {
    NewLead::new(
        hub(),
        SalonName::new(salon).unwrap(),
        Some(ContactName::new("Kasia Nowak").unwrap()),
        Some(LeadEmail::new(email).unwrap()),
        phone.map(|p| PhoneNumber::new(p).unwrap()),
        Some(CityName::new("Kraków").unwrap()),
    )
}

fn find(repo: &DieselRepository, email: &str) -> LeadId {
    let (_, leads) = repo
        .list_leads(LeadListQuery::new(hub()).search(email))
        .unwrap();
    leads[0].id
}

#[test]
fn due_lead_is_not_starved_by_waiting_ones() {
    let test_db = common::TestDb::new("test_due_lead_not_starved.db");
    let repo = DieselRepository::new(test_db.pool());

    repo.upsert_email_template(&NewEmailTemplate {
        hub_id: hub(),
        kind: EmailTemplateKind::FollowUp1,
        subject: TemplateSubject::new("{{imie}}, pamiętasz o nas?").unwrap(),
        body: TemplateBody::new("<p>Salony w {{miasto}} już z nami pracują.</p>").unwrap(),
    })
    .unwrap();

    repo.create_leads(&[
        lead("Salon Anna", "anna@example.com", Some("600700801")),
        lead("Salon Aga", "aga@example.com", Some("600700802")),
        lead("Salon Basia", "basia@example.com", None),
    ])
    .unwrap();

    // Older leads already got their SMS on day 6, so follow-up 1 waits until day 9.
    for email in ["anna@example.com", "aga@example.com"] {
        let id = find(&repo, email);
        repo.mark_step_sent(id, OutreachStep::ColdEmail, day(1))
            .unwrap();
        repo.mark_step_sent(id, OutreachStep::Sms, day(6)).unwrap();
    }
    // No phone: follow-up 1 is due three days after the cold email.
    let basia = find(&repo, "basia@example.com");
    repo.mark_step_sent(basia, OutreachStep::ColdEmail, day(2))
        .unwrap();

    let mailer = RecordingMailer::default();
    let sms = RejectingSms;
    let processor = FollowupProcessor::new(&repo, &mailer, &sms, OutreachSchedule::default(), 1);

    let report = processor.run(day(7)).unwrap();
    assert_eq!(
        report,
        FollowupReport {
            processed: 1,
            sent: 1,
            skipped: 0,
            failed: 0,
        }
    );

    let sent = mailer.sent.borrow();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "basia@example.com");
    drop(sent);

    let updated = repo.get_lead_by_id(basia, hub()).unwrap().unwrap();
    assert!(updated.outreach.followup_1_sent);
    assert_eq!(updated.outreach.followup_1_sent_at, Some(day(7)));

    // Nothing else is due on the same day.
    assert_eq!(processor.run(day(7)).unwrap(), FollowupReport::default());
}
