mod helpers;

use helpers::setup::*;
use trustkeeper_sdk::{
    AttendanceAction, CreateMeetupInput, DispatchNotificationInput, HostMeetupDTO, KeeperSDK,
    MarkAttendanceInput, MarkReminderSentInput, NotificationKind, OfferAction,
    ParticipantDTO, ParticipantStatus, RegisterParticipantInput, ReminderType, ResponseAction,
    SessionRole, SignupHostInput, UpdateMeetupInput,
};

fn meetup_input(capacity: i64, waitlist_capacity: Option<i64>, starts_in: i64) -> CreateMeetupInput {
    CreateMeetupInput {
        title: "Book club".into(),
        description: Some("We read the first three chapters".into()),
        start_ts: NOW + starts_in,
        location: "Library".into(),
        capacity: Some(capacity),
        waitlist_capacity,
        fee: Some("15000".into()),
        host_name: "Kim".into(),
        host_phone: "010-1111-2222".into(),
    }
}

async fn create_meetup(
    sdk: &KeeperSDK,
    capacity: i64,
    waitlist_capacity: Option<i64>,
    starts_in: i64,
) -> HostMeetupDTO {
    sdk.meetup
        .create(meetup_input(capacity, waitlist_capacity, starts_in))
        .await
        .expect("Expected to create meetup")
        .meetup
}

async fn register(sdk: &KeeperSDK, meetup: &HostMeetupDTO, name: &str, phone: &str) -> ParticipantDTO {
    sdk.participant
        .register(RegisterParticipantInput {
            meetup_id: meetup.meetup.id,
            name: name.into(),
            phone: phone.into(),
        })
        .await
        .expect("Expected to register participant")
        .participant
}

async fn status_of(sdk: &KeeperSDK, participant: &ParticipantDTO) -> ParticipantDTO {
    sdk.participant
        .get_by_token(&participant.token)
        .await
        .expect("Expected to find participant")
        .participant
}

#[actix_web::test]
async fn test_status_ok() {
    let (_, sdk) = spawn_app().await;
    assert!(sdk.status.check_health().await.is_ok());
}

#[actix_web::test]
async fn test_create_and_get_meetup() {
    let (app, sdk) = spawn_app().await;
    let meetup = create_meetup(&sdk, 4, None, 7 * DAY).await;
    assert_eq!(meetup.meetup.fee_display.as_deref(), Some("15,000원"));
    assert_eq!(meetup.host_code.len(), 8);

    let res = sdk.meetup.get(meetup.meetup.id).await.unwrap();
    assert_eq!(res.meetup.title, "Book club");
    assert_eq!(res.registered_count, 0);

    let res = sdk.meetup.create(meetup_input(1, None, DAY)).await;
    assert_eq!(res.unwrap_err().kind(), Some("ValidationError"));

    // Host routes need a credential
    let err = sdk.meetup.roster(meetup.meetup.id).await.unwrap_err();
    assert_eq!(err.kind(), Some("Unauthorized"));
    let err = app
        .host_client("deadbeef")
        .meetup
        .roster(meetup.meetup.id)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), Some("Forbidden"));
    assert!(app
        .host_client(&meetup.host_code)
        .meetup
        .roster(meetup.meetup.id)
        .await
        .is_ok());
}

#[actix_web::test]
async fn test_capacity_and_waitlist_order() {
    let (app, sdk) = spawn_app().await;
    let meetup = create_meetup(&sdk, 2, None, 7 * DAY).await;

    let mut participants = Vec::new();
    for i in 0..5 {
        let p = register(&sdk, &meetup, &format!("Guest {}", i), &format!("010-3000-000{}", i)).await;
        participants.push(p);
    }
    assert!(participants[..2]
        .iter()
        .all(|p| p.status == ParticipantStatus::Registered && !p.is_waitlisted));
    assert!(participants[2..]
        .iter()
        .all(|p| p.status == ParticipantStatus::Waitlisted && p.is_waitlisted));

    let err = sdk
        .participant
        .register(RegisterParticipantInput {
            meetup_id: meetup.meetup.id,
            name: "Guest 0".into(),
            phone: "01030000000".into(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.kind(), Some("Conflict"));

    let roster = app
        .host_client(&meetup.host_code)
        .meetup
        .roster(meetup.meetup.id)
        .await
        .unwrap();
    let names: Vec<_> = roster.participants.iter().map(|p| p.name.clone()).collect();
    assert_eq!(names, vec!["Guest 0", "Guest 1", "Guest 2", "Guest 3", "Guest 4"]);
    assert_eq!(roster.stats.registered, 2);
    assert_eq!(roster.stats.waitlisted, 3);
}

#[actix_web::test]
async fn test_waitlist_full() {
    let (_, sdk) = spawn_app().await;
    let meetup = create_meetup(&sdk, 2, Some(1), 7 * DAY).await;

    register(&sdk, &meetup, "Alice", "010-0000-0001").await;
    register(&sdk, &meetup, "Bob", "010-0000-0002").await;
    register(&sdk, &meetup, "Carol", "010-0000-0003").await;

    let err = sdk
        .participant
        .register(RegisterParticipantInput {
            meetup_id: meetup.meetup.id,
            name: "Dave".into(),
            phone: "010-0000-0004".into(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.kind(), Some("Conflict"));
}

#[actix_web::test]
async fn test_end_to_end_scenario() {
    let (_, sdk) = spawn_app().await;
    let meetup = create_meetup(&sdk, 2, Some(1), 7 * DAY).await;

    let alice = register(&sdk, &meetup, "Alice", "010-0000-0001").await;
    let bob = register(&sdk, &meetup, "Bob", "010-0000-0002").await;
    let carol = register(&sdk, &meetup, "Carol", "010-0000-0003").await;
    assert_eq!(alice.status, ParticipantStatus::Registered);
    assert_eq!(bob.status, ParticipantStatus::Registered);
    assert!(carol.is_waitlisted);

    let dave = sdk
        .participant
        .register(RegisterParticipantInput {
            meetup_id: meetup.meetup.id,
            name: "Dave".into(),
            phone: "010-0000-0004".into(),
        })
        .await;
    assert_eq!(dave.unwrap_err().kind(), Some("Conflict"));

    let res = sdk
        .participant
        .respond(&alice.token, ResponseAction::Cancel)
        .await
        .unwrap();
    assert_eq!(res.participant.status, ParticipantStatus::Cancelled);

    let carol = status_of(&sdk, &carol).await;
    assert_eq!(carol.status, ParticipantStatus::Registered);
    assert!(!carol.is_waitlisted);
    assert!(carol.promoted_at.is_some());

    let eve = register(&sdk, &meetup, "Eve", "010-0000-0005").await;
    assert_eq!(eve.status, ParticipantStatus::Waitlisted);
    assert!(eve.is_waitlisted);
}

#[actix_web::test]
async fn test_cancel_is_not_repeatable() {
    let (_, sdk) = spawn_app().await;
    let meetup = create_meetup(&sdk, 2, None, 7 * DAY).await;
    let alice = register(&sdk, &meetup, "Alice", "010-0000-0001").await;
    register(&sdk, &meetup, "Bob", "010-0000-0002").await;
    let carol = register(&sdk, &meetup, "Carol", "010-0000-0003").await;
    let dave = register(&sdk, &meetup, "Dave", "010-0000-0004").await;

    let res = sdk
        .participant
        .respond(&alice.token, ResponseAction::Confirm)
        .await
        .unwrap();
    assert_eq!(res.participant.status, ParticipantStatus::Confirmed);

    sdk.participant
        .respond(&alice.token, ResponseAction::Cancel)
        .await
        .unwrap();
    let err = sdk
        .participant
        .respond(&alice.token, ResponseAction::Cancel)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), Some("Conflict"));

    // Only Carol took over the slot
    assert_eq!(status_of(&sdk, &carol).await.status, ParticipantStatus::Registered);
    let dave = status_of(&sdk, &dave).await;
    assert_eq!(dave.status, ParticipantStatus::Waitlisted);
    assert!(dave.is_waitlisted);
}

#[actix_web::test]
async fn test_cancellation_cutoff() {
    let (app, sdk) = spawn_app().await;
    let meetup = create_meetup(&sdk, 2, None, 7 * DAY).await;
    let alice = register(&sdk, &meetup, "Alice", "010-0000-0001").await;
    let bob = register(&sdk, &meetup, "Bob", "010-0000-0002").await;
    let start_ts = meetup.meetup.start_ts;

    app.sys.set(start_ts - DAY + 60 * 1000);
    let err = sdk
        .participant
        .respond(&alice.token, ResponseAction::Cancel)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), Some("PolicyViolation"));
    assert_eq!(err.status().map(|s| s.as_u16()), Some(422));

    app.sys.set(start_ts - DAY - 60 * 1000);
    let res = sdk
        .participant
        .respond(&bob.token, ResponseAction::Cancel)
        .await
        .unwrap();
    assert_eq!(res.participant.status, ParticipantStatus::Cancelled);
}

#[actix_web::test]
async fn test_cascading_pass() {
    let (_, sdk) = spawn_app().await;
    let meetup = create_meetup(&sdk, 2, None, 7 * DAY).await;
    let alice = register(&sdk, &meetup, "Alice", "010-0000-0001").await;
    register(&sdk, &meetup, "Bob", "010-0000-0002").await;
    let a = register(&sdk, &meetup, "A", "010-0000-0003").await;
    let b = register(&sdk, &meetup, "B", "010-0000-0004").await;
    let c = register(&sdk, &meetup, "C", "010-0000-0005").await;

    sdk.participant
        .respond(&alice.token, ResponseAction::Cancel)
        .await
        .unwrap();
    assert_eq!(status_of(&sdk, &a).await.status, ParticipantStatus::Registered);

    sdk.participant
        .answer_offer(&a.token, OfferAction::Pass)
        .await
        .unwrap();
    assert_eq!(status_of(&sdk, &b).await.status, ParticipantStatus::Registered);

    sdk.participant
        .answer_offer(&b.token, OfferAction::Pass)
        .await
        .unwrap();
    let res = sdk
        .participant
        .answer_offer(&c.token, OfferAction::Accept)
        .await
        .unwrap();
    assert_eq!(res.participant.status, ParticipantStatus::Confirmed);
    assert!(!res.participant.is_waitlisted);

    assert_eq!(status_of(&sdk, &a).await.status, ParticipantStatus::Cancelled);
    assert_eq!(status_of(&sdk, &b).await.status, ParticipantStatus::Cancelled);
}

#[actix_web::test]
async fn test_cascading_pass_from_the_waitlist() {
    let (app, sdk) = spawn_app().await;
    let meetup = create_meetup(&sdk, 2, None, 7 * DAY).await;
    register(&sdk, &meetup, "X", "010-0000-0001").await;
    register(&sdk, &meetup, "Y", "010-0000-0002").await;
    let a = register(&sdk, &meetup, "A", "010-0000-0003").await;
    let b = register(&sdk, &meetup, "B", "010-0000-0004").await;
    let c = register(&sdk, &meetup, "C", "010-0000-0005").await;

    // Raising the capacity does not promote anyone by itself
    app.host_client(&meetup.host_code)
        .meetup
        .update(UpdateMeetupInput {
            meetup_id: meetup.meetup.id,
            capacity: Some(3),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(status_of(&sdk, &a).await.is_waitlisted);

    sdk.participant
        .answer_offer(&a.token, OfferAction::Pass)
        .await
        .unwrap();
    let b_status = status_of(&sdk, &b).await;
    assert_eq!(b_status.status, ParticipantStatus::Registered);
    assert!(!b_status.is_waitlisted);
    assert!(status_of(&sdk, &c).await.is_waitlisted);

    sdk.participant
        .answer_offer(&b.token, OfferAction::Pass)
        .await
        .unwrap();
    let res = sdk
        .participant
        .answer_offer(&c.token, OfferAction::Accept)
        .await
        .unwrap();
    assert_eq!(res.participant.status, ParticipantStatus::Confirmed);
    assert!(!res.participant.is_waitlisted);

    assert_eq!(status_of(&sdk, &a).await.status, ParticipantStatus::Cancelled);
    assert_eq!(status_of(&sdk, &b).await.status, ParticipantStatus::Cancelled);

    let res = sdk.meetup.get(meetup.meetup.id).await.unwrap();
    assert_eq!(res.registered_count, 3);
    assert_eq!(res.waitlisted_count, 0);
}

#[actix_web::test]
async fn test_attendance() {
    let (app, sdk) = spawn_app().await;
    let meetup = create_meetup(&sdk, 4, None, DAY).await;
    let host = app.host_client(&meetup.host_code);
    let alice = register(&sdk, &meetup, "Alice", "010-0000-0001").await;
    let bob = register(&sdk, &meetup, "Bob", "010-0000-0002").await;

    let err = host
        .participant
        .mark_attendance(MarkAttendanceInput {
            meetup_id: meetup.meetup.id,
            participant_id: alice.id,
            action: AttendanceAction::CheckIn,
        })
        .await
        .unwrap_err();
    assert_eq!(err.kind(), Some("Conflict"));

    sdk.participant
        .respond(&alice.token, ResponseAction::Confirm)
        .await
        .unwrap();
    let res = host
        .participant
        .mark_attendance(MarkAttendanceInput {
            meetup_id: meetup.meetup.id,
            participant_id: alice.id,
            action: AttendanceAction::CheckIn,
        })
        .await
        .unwrap();
    assert_eq!(res.participant.status, ParticipantStatus::Attended);

    let res = sdk
        .participant
        .self_check_in(meetup.meetup.id, "Bob".into(), "01000000002".into())
        .await
        .unwrap();
    assert_eq!(res.participant.id, bob.id);
    assert_eq!(res.participant.status, ParticipantStatus::Attended);

    let err = sdk
        .participant
        .self_check_in(meetup.meetup.id, "Bob".into(), "010-0000-0002".into())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), Some("Conflict"));
    let err = sdk
        .participant
        .self_check_in(meetup.meetup.id, "Mallory".into(), "010-0000-0002".into())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), Some("NotFound"));
}

#[actix_web::test]
async fn test_d7_dispatch_records_reminder() {
    let (app, sdk) = spawn_app().await;
    let meetup = create_meetup(&sdk, 4, None, 7 * DAY).await;
    let host = app.host_client(&meetup.host_code);
    register(&sdk, &meetup, "Alice", "010-0000-0001").await;
    register(&sdk, &meetup, "Bob", "010-0000-0002").await;
    register(&sdk, &meetup, "Carol", "010-0000-0003").await;
    let dave = register(&sdk, &meetup, "Dave", "010-0000-0004").await;
    sdk.participant
        .respond(&dave.token, ResponseAction::Confirm)
        .await
        .unwrap();

    let res = host
        .notification
        .dispatch(DispatchNotificationInput {
            meetup_id: meetup.meetup.id,
            kind: NotificationKind::D7,
            targets: None,
        })
        .await
        .unwrap();
    assert_eq!(res.count, 3);

    let outbox = app.sms.outbox();
    assert_eq!(outbox.len(), 3);
    assert!(outbox.iter().all(|m| !m.to.contains('-')));
    assert!(outbox
        .iter()
        .all(|m| m.text.contains("https://keeper.test/confirm/")));

    let reminders = host.reminder.get(meetup.meetup.id).await.unwrap();
    assert_eq!(reminders.reminders.len(), 1);
    assert_eq!(reminders.reminders[0].reminder_type, ReminderType::D7);
    assert!(reminders.reminders[0].sent_at.is_some());
    assert!(!reminders.unsent.contains(&ReminderType::D7));

    // A failing transport fails the whole batch
    app.sms.set_failing(true);
    let err = host
        .notification
        .dispatch(DispatchNotificationInput {
            meetup_id: meetup.meetup.id,
            kind: NotificationKind::Registration,
            targets: None,
        })
        .await
        .unwrap_err();
    assert_eq!(err.kind(), Some("TransportFailure"));
}

#[actix_web::test]
async fn test_mark_reminder_sent() {
    let (app, sdk) = spawn_app().await;
    let meetup = create_meetup(&sdk, 4, None, 2 * DAY).await;
    let host = app.host_client(&meetup.host_code);

    let res = host
        .reminder
        .mark_sent(MarkReminderSentInput {
            meetup_id: meetup.meetup.id,
            reminder_type: ReminderType::D3,
            sent_by: Some("Kim".into()),
            note: None,
        })
        .await
        .unwrap();
    assert_eq!(res.reminder.sent_by.as_deref(), Some("Kim"));

    let res = host.reminder.get(meetup.meetup.id).await.unwrap();
    assert_eq!(res.days_until, 2);
    assert_eq!(res.unsent, vec![ReminderType::D7]);
}

#[actix_web::test]
async fn test_host_accounts() {
    let (app, sdk) = spawn_app().await;
    let host = sdk
        .host
        .signup(SignupHostInput {
            username: "kimhost".into(),
            password: "secret123".into(),
            name: "Kim".into(),
            email: "kim@example.com".into(),
            phone: "010-1111-2222".into(),
        })
        .await
        .unwrap()
        .host;

    assert!(sdk
        .host
        .login("kimhost".into(), "wrong-password".into())
        .await
        .is_err());
    let session = sdk
        .host
        .login("kimhost".into(), "secret123".into())
        .await
        .unwrap();
    assert_eq!(session.role, SessionRole::Host);

    let host_sdk = app.session_client(&session.token);
    let meetup = create_meetup(&host_sdk, 4, None, 7 * DAY).await;
    assert_eq!(meetup.host_id, Some(host.id));

    let res = host_sdk
        .meetup
        .update(UpdateMeetupInput {
            meetup_id: meetup.meetup.id,
            title: Some("Poetry night".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(res.meetup.meetup.title, "Poetry night");

    let mine = host_sdk.host.my_meetups().await.unwrap();
    assert_eq!(mine.meetups.len(), 1);
    assert_eq!(mine.meetups[0].pending_reminders, vec![ReminderType::D7]);

    // Meetups of other hosts are off limits, the operator may access all
    let other = create_meetup(&sdk, 4, None, 7 * DAY).await;
    let err = host_sdk.meetup.roster(other.meetup.id).await.unwrap_err();
    assert_eq!(err.kind(), Some("Forbidden"));

    let admin_session = sdk
        .host
        .login_admin(ADMIN_USERNAME.into(), ADMIN_PASSWORD.into())
        .await
        .unwrap();
    assert_eq!(admin_session.role, SessionRole::Admin);
    let admin_sdk = app.session_client(&admin_session.token);
    assert!(admin_sdk.meetup.roster(other.meetup.id).await.is_ok());
    assert!(app.config.admin.is_some());
}
