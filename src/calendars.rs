//! Connected-calendar aggregation across calendar-provider credentials.
//!
//! Each credential may carry a `CalendarService`. Services are listed
//! concurrently; every credential yields exactly one `ConnectedCalendar`,
//! either with its calendars and primary calendar or with an error.
//! This module is independent of recurrence expansion.

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;
use serde::{Deserialize, Serialize};

pub const NO_PRIMARY_CALENDAR: &str = "No primary calendar found";

// Provider message for an OAuth grant that was revoked or has expired.
const INVALID_GRANT: &str = "invalid_grant";

/// Opaque provider metadata carried through untouched.
pub type Integration = serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarCredential {
    pub id: String,
}

/// A calendar as reported by a provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationCalendar {
    pub external_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credential_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_selected: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_only: Option<bool>,
}

impl IntegrationCalendar {
    pub fn is_primary(&self) -> bool {
        self.primary.unwrap_or(false)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedCalendar {
    pub external_id: String,
}

/// Failure reported by a provider while listing calendars.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{message}")]
pub struct ProviderError {
    pub message: String,
}

impl ProviderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn is_invalid_grant(&self) -> bool {
        self.message == INVALID_GRANT
    }
}

#[async_trait]
pub trait CalendarService: Send + Sync {
    async fn list_calendars(
        &self,
        selected: &[SelectedCalendar],
    ) -> Result<Vec<IntegrationCalendar>, ProviderError>;
}

pub struct CalendarCredentialEntry {
    pub credential: CalendarCredential,
    pub integration: Option<Integration>,
    pub calendar: Option<Arc<dyn CalendarService>>,
}

/// Error object attached to a credential whose listing failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectedCalendarError {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectedCalendar {
    pub credential_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub integration: Option<Integration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<IntegrationCalendar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calendars: Option<Vec<IntegrationCalendar>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ConnectedCalendarError>,
}

impl ConnectedCalendar {
    fn bare(entry: &CalendarCredentialEntry) -> Self {
        Self {
            credential_id: entry.credential.id.clone(),
            integration: entry.integration.clone(),
            primary: None,
            calendars: None,
            error: None,
        }
    }

    fn failed(entry: &CalendarCredentialEntry, message: impl Into<String>) -> Self {
        Self {
            error: Some(ConnectedCalendarError {
                message: message.into(),
            }),
            ..Self::bare(entry)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectedCalendars {
    pub connected_calendars: Vec<ConnectedCalendar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_calendar: Option<IntegrationCalendar>,
}

/// List every credential's calendars and pick out the destination calendar.
///
/// The primary calendar is the first one flagged `primary`, falling back to
/// the first listed. `destination_external_id` selects the destination by
/// external id across all credentials, in input order.
pub async fn get_connected_calendars(
    entries: &[CalendarCredentialEntry],
    selected: &[SelectedCalendar],
    destination_external_id: Option<&str>,
) -> ConnectedCalendars {
    let connected_calendars =
        join_all(entries.iter().map(|entry| connect_credential(entry, selected))).await;

    let destination_calendar = destination_external_id.and_then(|wanted| {
        connected_calendars
            .iter()
            .filter_map(|c| c.calendars.as_deref())
            .flatten()
            .find(|cal| cal.external_id == wanted)
            .cloned()
    });

    ConnectedCalendars {
        connected_calendars,
        destination_calendar,
    }
}

async fn connect_credential(
    entry: &CalendarCredentialEntry,
    selected: &[SelectedCalendar],
) -> ConnectedCalendar {
    let Some(service) = entry.calendar.as_ref() else {
        return ConnectedCalendar::bare(entry);
    };

    let mut calendars = match service.list_calendars(selected).await {
        Ok(calendars) => calendars,
        Err(err) => {
            if err.is_invalid_grant() {
                tracing::warn!(credential_id = %entry.credential.id, "calendar grant revoked or expired");
            } else {
                tracing::warn!(credential_id = %entry.credential.id, error = %err, "failed to list calendars");
            }
            return ConnectedCalendar::failed(entry, err.message);
        }
    };

    let primary = calendars
        .iter()
        .find(|cal| cal.is_primary())
        .or_else(|| calendars.first())
        .cloned();
    let Some(primary) = primary else {
        tracing::debug!(credential_id = %entry.credential.id, "provider listed no calendars");
        return ConnectedCalendar::failed(entry, NO_PRIMARY_CALENDAR);
    };

    // stable: keeps provider order within primary / non-primary
    calendars.sort_by_key(|cal| !cal.is_primary());

    ConnectedCalendar {
        primary: Some(primary),
        calendars: Some(calendars),
        ..ConnectedCalendar::bare(entry)
    }
}
