use std::sync::Arc;
use trustkeeper_domain::{Admission, Meetup, Participant, ID};
use trustkeeper_infra::{InMemorySmsProvider, KeeperContext, MockSys};

pub const HOUR: i64 = 1000 * 60 * 60;
pub const DAY: i64 = 24 * HOUR;
/// Arbitrary fixed start of the clock in tests
pub const NOW: i64 = 1_700_000_000_000;

pub struct TestContext {
    pub ctx: KeeperContext,
    pub sys: Arc<MockSys>,
    pub sms: Arc<InMemorySmsProvider>,
}

pub fn setup() -> TestContext {
    let sys = Arc::new(MockSys::new(NOW));
    let sms = Arc::new(InMemorySmsProvider::new());
    let mut ctx = KeeperContext::create_inmemory();
    ctx.sys = sys.clone();
    ctx.sms = sms.clone();
    ctx.config.public_base_url = "https://keeper.test".into();
    TestContext { ctx, sys, sms }
}

pub async fn insert_meetup(
    ctx: &KeeperContext,
    capacity: i64,
    waitlist_capacity: Option<i64>,
    starts_in: i64,
) -> Meetup {
    let meetup = Meetup {
        id: Default::default(),
        title: "Book club".into(),
        description: None,
        start_ts: NOW + starts_in,
        location: "Library".into(),
        capacity,
        waitlist_capacity,
        fee_display: None,
        host_name: "Kim".into(),
        host_phone: "010-1111-2222".into(),
        host_code: Meetup::generate_host_code(),
        host_id: None,
        status: Default::default(),
        confirmation_sent: false,
        created: NOW,
        updated: NOW,
    };
    ctx.repos.meetups.insert(&meetup).await.unwrap();
    meetup
}

/// Stores a participant directly, bypassing the admission decision
pub async fn insert_participant(
    ctx: &KeeperContext,
    meetup_id: ID,
    name: &str,
    admission: Admission,
) -> Participant {
    let now = ctx.sys.get_timestamp_millis();
    let phone = format!("010-{:04}-{:04}", now % 10_000, (now / 10_000) % 10_000);
    let participant = Participant::new(meetup_id, name.into(), phone, admission, now);
    ctx.repos.participants.insert(&participant).await.unwrap();
    participant
}
