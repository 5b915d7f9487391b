use crate::{
    participant::ParticipantStatus, phone::normalize_phone, reminder::ReminderType, Meetup,
    Participant, ID,
};
use chrono::{Datelike, TimeZone, Utc, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

/// The kinds of SMS a host can dispatch for a `Meetup`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Registration,
    D7,
    D3,
    D1,
    #[serde(rename = "dday")]
    DDay,
    WaitlistPromote,
    ConfirmReminder,
    WaitlistRegistration,
    ConfirmedComplete,
    CancelledComplete,
}

impl NotificationKind {
    pub const ALL: [NotificationKind; 10] = [
        Self::Registration,
        Self::D7,
        Self::D3,
        Self::D1,
        Self::DDay,
        Self::WaitlistPromote,
        Self::ConfirmReminder,
        Self::WaitlistRegistration,
        Self::ConfirmedComplete,
        Self::CancelledComplete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Registration => "registration",
            Self::D7 => "d7",
            Self::D3 => "d3",
            Self::D1 => "d1",
            Self::DDay => "dday",
            Self::WaitlistPromote => "waitlist_promote",
            Self::ConfirmReminder => "confirm_reminder",
            Self::WaitlistRegistration => "waitlist_registration",
            Self::ConfirmedComplete => "confirmed_complete",
            Self::CancelledComplete => "cancelled_complete",
        }
    }

    /// The scheduled reminder a successful dispatch of this kind accounts for
    pub fn reminder_type(&self) -> Option<ReminderType> {
        match self {
            Self::D7 => Some(ReminderType::D7),
            Self::D3 => Some(ReminderType::D3),
            Self::D1 => Some(ReminderType::D1),
            Self::DDay => Some(ReminderType::DDay),
            _ => None,
        }
    }

    fn template(&self) -> &'static str {
        match self {
            Self::Registration => "{name}님, {title} 모임에 신청이 완료되었습니다.\n\n{date} {time}\n{location}{fee_line}\n\n참석 확정: {confirm_link}\n참석이 어려우시면: {cancel_link}",
            Self::D7 => "{name}님, {title} 모임이 일주일 앞으로 다가왔습니다.\n\n{date} {time}\n{location}{fee_line}\n\n미리 참석을 확정해주세요: {confirm_link}\n참석이 어려우시면: {cancel_link}",
            Self::D3 => "{name}님, {title} 모임이 3일 앞으로 다가왔습니다.\n\n{date} {time}\n{location}{fee_line}\n\n미리 참석을 확정해주세요: {confirm_link}\n참석이 어려우시면: {cancel_link}",
            Self::D1 => "{name}님, 내일 {title} 모임이 예정되어 있습니다.\n\n{date} {time}\n{location}{fee_line}\n\n참석 확정: {confirm_link}\n참석이 어려우시면: {cancel_link}",
            Self::DDay => "{name}님, 오늘 {title} 모임이 있습니다.\n\n{time}\n{location}\n\n참석이 어려우시면: {cancel_link}",
            Self::WaitlistPromote => "{name}님, {title} 모임에 자리가 났습니다!\n\n{date} {time}\n{location}{fee_line}\n\n참석 확정: {confirm_link}\n참석이 어려우시면: {cancel_link}",
            Self::ConfirmReminder => "{name}님, {title} 모임 참석을 확정해주세요.\n\n{date} {time}\n{location}\n\n참석 확정: {confirm_link}\n참석이 어려우시면: {cancel_link}",
            Self::WaitlistRegistration => "{name}님, {title} 모임 대기 신청이 완료되었습니다.\n\n현재 대기 순번으로 등록되었으며, 참여자가 빠지면 참여 신청 링크를 전송해드리겠습니다.\n\n{date} {time}\n{location}",
            Self::ConfirmedComplete => "{name}님, {title} 모임 참석이 확정되었습니다.\n\n{date} {time}\n{location}\n\n참석이 어려우시면: {cancel_link}",
            Self::CancelledComplete => "{name}님, {title} 모임 참가가 취소되었습니다.\n\n다음 모임에서 뵙겠습니다.",
        }
    }
}

impl Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum InvalidNotificationKindError {
    #[error("Notification type: `{0}` is not supported")]
    Unknown(String),
}

impl FromStr for NotificationKind {
    type Err = InvalidNotificationKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|k| k.as_str() == s)
            .copied()
            .ok_or_else(|| InvalidNotificationKindError::Unknown(s.to_string()))
    }
}

/// A rendered message ready for the SMS transport
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmsMessage {
    pub to: String,
    pub text: String,
}

/// Everything outside of the meetup and participant needed to render a message
#[derive(Debug, Clone)]
pub struct MessageContext {
    /// Origin the confirm and cancel links point to
    pub base_url: String,
    pub timezone: Tz,
}

/// Picks the recipients of a notification.
///
/// Cancelled participants never receive anything. When `targets` is given
/// only those participants are considered. `participants` are expected in
/// registration order.
pub fn select_recipients<'a>(
    kind: NotificationKind,
    participants: &'a [Participant],
    targets: Option<&[ID]>,
) -> Vec<&'a Participant> {
    let targeted = participants
        .iter()
        .filter(|p| p.status != ParticipantStatus::Cancelled)
        .filter(|p| match targets {
            Some(ids) if !ids.is_empty() => ids.contains(&p.id),
            _ => true,
        });

    match kind {
        NotificationKind::D7
        | NotificationKind::D3
        | NotificationKind::D1
        | NotificationKind::DDay
        | NotificationKind::ConfirmReminder => targeted
            .filter(|p| p.status != ParticipantStatus::Confirmed && !p.is_waitlisted)
            .collect(),
        // Only the head of the queue is notified
        NotificationKind::WaitlistPromote => targeted
            .filter(|p| p.is_waitlisted && p.status == ParticipantStatus::Waitlisted)
            .take(1)
            .collect(),
        NotificationKind::Registration
        | NotificationKind::WaitlistRegistration
        | NotificationKind::ConfirmedComplete
        | NotificationKind::CancelledComplete => targeted.collect(),
    }
}

pub fn confirm_link(ctx: &MessageContext, meetup: &Meetup, participant: &Participant) -> String {
    format!(
        "{}/confirm/{}?token={}",
        ctx.base_url.trim_end_matches('/'),
        meetup.id,
        participant.token
    )
}

pub fn cancel_link(ctx: &MessageContext, meetup: &Meetup, participant: &Participant) -> String {
    format!(
        "{}/cancel/{}?token={}",
        ctx.base_url.trim_end_matches('/'),
        meetup.id,
        participant.token
    )
}

/// Renders the template of `kind` for a single participant
pub fn render(
    kind: NotificationKind,
    meetup: &Meetup,
    participant: &Participant,
    ctx: &MessageContext,
) -> String {
    let (date, time) = format_schedule(meetup.start_ts, &ctx.timezone);
    let fee_line = meetup
        .fee_display
        .as_ref()
        .map(|fee| format!("\n참가비: {}", fee))
        .unwrap_or_default();

    let values = [
        ("{name}", participant.name.clone()),
        ("{title}", meetup.title.clone()),
        ("{date}", date),
        ("{time}", time),
        ("{location}", meetup.location.clone()),
        ("{fee_line}", fee_line),
        ("{confirm_link}", confirm_link(ctx, meetup, participant)),
        ("{cancel_link}", cancel_link(ctx, meetup, participant)),
    ];
    fill_placeholders(kind.template(), &values)
}

/// Substitutes the placeholders of `template` in a single pass. Substituted
/// values are copied verbatim and never scanned for placeholders again.
fn fill_placeholders(template: &str, values: &[(&str, String)]) -> String {
    let mut text = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        text.push_str(&rest[..start]);
        let tail = &rest[start..];
        let value = tail.find('}').and_then(|end| {
            let placeholder = &tail[..=end];
            values
                .iter()
                .find(|(p, _)| *p == placeholder)
                .map(|(_, value)| (value, end + 1))
        });
        match value {
            Some((value, len)) => {
                text.push_str(value);
                rest = &tail[len..];
            }
            None => {
                text.push('{');
                rest = &tail[1..];
            }
        }
    }
    text.push_str(rest);
    text
}

/// Selects the recipients and renders one message for each of them
pub fn compose_messages(
    kind: NotificationKind,
    meetup: &Meetup,
    participants: &[Participant],
    targets: Option<&[ID]>,
    ctx: &MessageContext,
) -> Vec<SmsMessage> {
    select_recipients(kind, participants, targets)
        .into_iter()
        .map(|p| SmsMessage {
            to: normalize_phone(&p.phone),
            text: render(kind, meetup, p, ctx),
        })
        .collect()
}

fn format_schedule(start_ts: i64, tz: &Tz) -> (String, String) {
    match Utc.timestamp_millis_opt(start_ts).single() {
        Some(start) => {
            let local = start.with_timezone(tz);
            let date = format!(
                "{}월 {}일 ({})",
                local.month(),
                local.day(),
                weekday_label(local.weekday())
            );
            (date, local.format("%H:%M").to_string())
        }
        None => (String::new(), String::new()),
    }
}

fn weekday_label(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "월",
        Weekday::Tue => "화",
        Weekday::Wed => "수",
        Weekday::Thu => "목",
        Weekday::Fri => "금",
        Weekday::Sat => "토",
        Weekday::Sun => "일",
    }
}
