//! Google Calendar API client.
//!
//! A low-level HTTP client for the Google Calendar API v3, implementing the
//! [`CalendarBoundary`] operations the export engine needs: list tagged
//! events, create an event, delete an event.

use std::time::Duration;

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::debug;

use crate::boundary::{
    BoxFuture, CalendarBoundary, CreatedEvent, DeleteOutcome, RemoteEvent, MAX_TAGGED_RESULTS,
};
use crate::config::CalendarConfig;
use crate::error::{CalendarError, CalendarResult};
use crate::event::{EventPayload, TAG_SLOT_ID, TAG_WEEK};

/// Base URL for Google Calendar API v3.
const CALENDAR_API_BASE: &str = "https://www.googleapis.com/calendar/v3";

/// Google Calendar API client.
#[derive(Debug)]
pub struct GoogleCalendarClient {
    http_client: reqwest::Client,
    access_token: String,
    api_base: String,
}

impl GoogleCalendarClient {
    /// Creates a new Google Calendar client with the given access token.
    pub fn new(access_token: impl Into<String>, timeout: Duration) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("failed to create HTTP client");

        Self {
            http_client,
            access_token: access_token.into(),
            api_base: CALENDAR_API_BASE.to_string(),
        }
    }

    /// Creates a client from a [`CalendarConfig`].
    pub fn from_config(access_token: impl Into<String>, config: &CalendarConfig) -> Self {
        let mut client = Self::new(access_token, config.timeout);
        if let Some(base) = &config.api_base {
            client = client.with_api_base(base);
        }
        client
    }

    /// Overrides the API base URL (staging endpoints, local test servers).
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    /// Updates the access token (after refresh).
    pub fn set_access_token(&mut self, token: impl Into<String>) {
        self.access_token = token.into();
    }

    fn events_url(&self, calendar_id: &str) -> String {
        format!(
            "{}/calendars/{}/events",
            self.api_base,
            urlencoding::encode(calendar_id)
        )
    }

    async fn list_week_events_inner(
        &self,
        calendar_id: &str,
        week_start: NaiveDate,
    ) -> CalendarResult<Vec<RemoteEvent>> {
        let url = self.events_url(calendar_id);
        let week = week_start.format("%Y-%m-%d").to_string();

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(&self.access_token)
            .query(&[
                ("privateExtendedProperty", format!("{}={}", TAG_WEEK, week)),
                ("singleEvents", "true".to_string()),
                ("maxResults", MAX_TAGGED_RESULTS.to_string()),
            ])
            .send()
            .await
            .map_err(transport_error)?;

        let response = check_status(response).await?;

        let body = response
            .text()
            .await
            .map_err(|e| CalendarError::network(format!("failed to read response: {}", e)))?;

        let list: EventListResponse = serde_json::from_str(&body)
            .map_err(|e| CalendarError::invalid_response(format!("failed to parse response: {}", e)))?;

        let events: Vec<RemoteEvent> = list
            .items
            .into_iter()
            .filter_map(convert_event)
            .collect();

        debug!(
            "found {} tagged events for week {} on calendar {}",
            events.len(),
            week,
            calendar_id
        );
        Ok(events)
    }

    async fn create_event_inner(
        &self,
        calendar_id: &str,
        payload: &EventPayload,
    ) -> CalendarResult<CreatedEvent> {
        let url = self.events_url(calendar_id);

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(payload)
            .send()
            .await
            .map_err(transport_error)?;

        let response = check_status(response).await?;

        let body = response
            .text()
            .await
            .map_err(|e| CalendarError::network(format!("failed to read response: {}", e)))?;

        let created: CreatedEventResponse = serde_json::from_str(&body)
            .map_err(|e| CalendarError::invalid_response(format!("failed to parse response: {}", e)))?;

        let id = created
            .id
            .ok_or_else(|| CalendarError::invalid_response("created event has no id"))?;

        debug!("created event {} on calendar {}", id, calendar_id);
        Ok(CreatedEvent {
            id,
            summary: created.summary.unwrap_or_default(),
        })
    }

    async fn delete_event_inner(
        &self,
        calendar_id: &str,
        event_id: &str,
    ) -> CalendarResult<DeleteOutcome> {
        let url = format!(
            "{}/{}",
            self.events_url(calendar_id),
            urlencoding::encode(event_id)
        );

        let response = self
            .http_client
            .delete(&url)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();

        // An id the remote side no longer knows is already reconciled.
        if status == reqwest::StatusCode::NOT_FOUND || status == reqwest::StatusCode::GONE {
            debug!("event {} already absent on calendar {}", event_id, calendar_id);
            return Ok(DeleteOutcome::AlreadyGone);
        }

        check_status(response).await?;

        debug!("deleted event {} on calendar {}", event_id, calendar_id);
        Ok(DeleteOutcome::Deleted)
    }
}

impl CalendarBoundary for GoogleCalendarClient {
    fn list_week_events<'a>(
        &'a self,
        calendar_id: &'a str,
        week_start: NaiveDate,
    ) -> BoxFuture<'a, CalendarResult<Vec<RemoteEvent>>> {
        Box::pin(self.list_week_events_inner(calendar_id, week_start))
    }

    fn create_event<'a>(
        &'a self,
        calendar_id: &'a str,
        payload: &'a EventPayload,
    ) -> BoxFuture<'a, CalendarResult<CreatedEvent>> {
        Box::pin(self.create_event_inner(calendar_id, payload))
    }

    fn delete_event<'a>(
        &'a self,
        calendar_id: &'a str,
        event_id: &'a str,
    ) -> BoxFuture<'a, CalendarResult<DeleteOutcome>> {
        Box::pin(self.delete_event_inner(calendar_id, event_id))
    }
}

/// Maps a reqwest transport failure to a calendar error.
fn transport_error(e: reqwest::Error) -> CalendarError {
    if e.is_timeout() {
        CalendarError::network("request timeout")
    } else if e.is_connect() {
        CalendarError::network(format!("connection failed: {}", e))
    } else {
        CalendarError::network(format!("request failed: {}", e))
    }
}

/// Maps non-success HTTP statuses to calendar errors, passing successful
/// responses through.
async fn check_status(response: reqwest::Response) -> CalendarResult<reqwest::Response> {
    let status = response.status();

    if status == reqwest::StatusCode::UNAUTHORIZED {
        return Err(CalendarError::authentication(
            "access token expired or invalid",
        ));
    }

    if status == reqwest::StatusCode::FORBIDDEN {
        return Err(CalendarError::authorization("access denied to calendar"));
    }

    if status == reqwest::StatusCode::NOT_FOUND {
        return Err(CalendarError::not_found("calendar or event not found"));
    }

    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        let retry_after = response
            .headers()
            .get("Retry-After")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<u64>().ok());
        return Err(CalendarError::rate_limited(format!(
            "rate limit exceeded{}",
            retry_after
                .map(|s| format!(", retry after {} seconds", s))
                .unwrap_or_default()
        )));
    }

    if status == reqwest::StatusCode::BAD_REQUEST {
        let body = response.text().await.unwrap_or_default();
        return Err(CalendarError::bad_request(format!(
            "rejected request: {}",
            body
        )));
    }

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(CalendarError::server(format!(
            "API error ({}): {}",
            status, body
        )));
    }

    Ok(response)
}

/// Converts a Google Calendar API event into a [`RemoteEvent`].
fn convert_event(event: ApiEvent) -> Option<RemoteEvent> {
    // Cancelled instances have nothing left to delete.
    if event.status.as_deref() == Some("cancelled") {
        return None;
    }

    let id = event.id?;
    let private = event
        .extended_properties
        .and_then(|p| p.private)
        .unwrap_or_default();

    Some(RemoteEvent {
        id,
        summary: event.summary,
        slot_id: private.get(TAG_SLOT_ID).cloned(),
        week: private.get(TAG_WEEK).cloned(),
    })
}

/// Response from the events.list endpoint.
#[derive(Debug, Deserialize)]
struct EventListResponse {
    #[serde(default)]
    items: Vec<ApiEvent>,
}

/// A single event from the Google Calendar API, reduced to the fields the
/// reconciliation needs.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiEvent {
    id: Option<String>,
    summary: Option<String>,
    status: Option<String>,
    extended_properties: Option<ApiExtendedProperties>,
}

/// Extended properties from the API.
#[derive(Debug, Deserialize)]
struct ApiExtendedProperties {
    private: Option<std::collections::BTreeMap<String, String>>,
}

/// Response from the events.insert endpoint.
#[derive(Debug, Deserialize)]
struct CreatedEventResponse {
    id: Option<String>,
    summary: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_event_list_response() {
        let json = r#"{
            "items": [
                {
                    "id": "evt-1",
                    "summary": "[FAROL 1] Write report",
                    "status": "confirmed",
                    "extendedProperties": {
                        "private": {
                            "weeksyncWeek": "2025-01-06",
                            "weeksyncSlotId": "2025-01-06-1-9",
                            "weeksyncCategory": "farol1"
                        }
                    }
                }
            ]
        }"#;

        let response: EventListResponse = serde_json::from_str(json).unwrap();
        let events: Vec<RemoteEvent> = response.items.into_iter().filter_map(convert_event).collect();

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, "evt-1");
        assert_eq!(events[0].summary.as_deref(), Some("[FAROL 1] Write report"));
        assert_eq!(events[0].slot_id.as_deref(), Some("2025-01-06-1-9"));
        assert_eq!(events[0].week.as_deref(), Some("2025-01-06"));
    }

    #[test]
    fn cancelled_events_are_skipped() {
        let json = r#"{
            "items": [
                {"id": "evt-1", "status": "cancelled"},
                {"id": "evt-2", "status": "confirmed"}
            ]
        }"#;

        let response: EventListResponse = serde_json::from_str(json).unwrap();
        let events: Vec<RemoteEvent> = response.items.into_iter().filter_map(convert_event).collect();

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, "evt-2");
    }

    #[test]
    fn events_without_id_are_skipped() {
        let json = r#"{"items": [{"summary": "no id"}]}"#;

        let response: EventListResponse = serde_json::from_str(json).unwrap();
        let events: Vec<RemoteEvent> = response.items.into_iter().filter_map(convert_event).collect();
        assert!(events.is_empty());
    }

    #[test]
    fn untagged_events_keep_empty_tag_fields() {
        let json = r#"{"items": [{"id": "evt-1", "summary": "plain event"}]}"#;

        let response: EventListResponse = serde_json::from_str(json).unwrap();
        let events: Vec<RemoteEvent> = response.items.into_iter().filter_map(convert_event).collect();

        assert_eq!(events.len(), 1);
        assert!(events[0].slot_id.is_none());
        assert!(events[0].week.is_none());
    }

    #[test]
    fn parse_created_event_response() {
        let json = r#"{"id": "evt-9", "summary": "[CORINGA] Gym", "status": "confirmed"}"#;
        let created: CreatedEventResponse = serde_json::from_str(json).unwrap();
        assert_eq!(created.id.as_deref(), Some("evt-9"));
        assert_eq!(created.summary.as_deref(), Some("[CORINGA] Gym"));
    }

    #[test]
    fn events_url_encodes_calendar_id() {
        let client = GoogleCalendarClient::new("token", Duration::from_secs(5));
        assert_eq!(
            client.events_url("user@example.com"),
            "https://www.googleapis.com/calendar/v3/calendars/user%40example.com/events"
        );
    }

    #[test]
    fn api_base_override() {
        let client = GoogleCalendarClient::new("token", Duration::from_secs(5))
            .with_api_base("http://localhost:8080/v3");
        assert_eq!(
            client.events_url("primary"),
            "http://localhost:8080/v3/calendars/primary/events"
        );
    }
}
