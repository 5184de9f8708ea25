use serde::{Deserialize, Serialize};

use crate::models::{PlayerId, RegistrationStatus};
use crate::roster::{
    CancelOutcome, CancelReserveOutcome, RegisterOutcome, RosterService, RosterView,
};
use crate::SCHEMA_VERSION;

/// Request payload shared by the three roster operations and the status
/// query. The three screens post the same shape to different entry
/// points.
#[derive(Debug, Deserialize)]
pub struct RosterRequest {
    pub schema_version: u8,
    pub event_id: String,
    pub player_id: String,
}

/// Request payload for the roster view query.
#[derive(Debug, Deserialize)]
pub struct RosterViewRequest {
    pub schema_version: u8,
    pub event_id: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub schema_version: u8,
    /// "admitted" | "waitlisted" | "already_present"
    pub outcome: String,
    /// 1-based reserve spot, present when waitlisted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub queue_position: Option<usize>,
    /// Where the player already stood, present on the no-op outcome.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RegistrationStatus>,
}

#[derive(Debug, Serialize)]
pub struct CancelResponse {
    pub schema_version: u8,
    /// "cancelled" | "not_registered"
    pub outcome: String,
    /// Reserve entry promoted into the vacated slot, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promoted: Option<PlayerId>,
}

#[derive(Debug, Serialize)]
pub struct CancelReserveResponse {
    pub schema_version: u8,
    /// "cancelled" | "not_reserved"
    pub outcome: String,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub schema_version: u8,
    pub status: RegistrationStatus,
}

#[derive(Debug, Serialize)]
pub struct RosterViewResponse {
    pub schema_version: u8,
    #[serde(flatten)]
    pub view: RosterView,
}

fn parse_request<'a, T: Deserialize<'a>>(request_json: &'a str) -> Result<T, String> {
    serde_json::from_str(request_json).map_err(|e| format!("Invalid JSON request: {}", e))
}

fn check_schema_version(schema_version: u8) -> Result<(), String> {
    if schema_version != SCHEMA_VERSION {
        return Err(format!("Unsupported schema version: {}", schema_version));
    }
    Ok(())
}

fn to_response_json<T: Serialize>(response: &T) -> Result<String, String> {
    serde_json::to_string(response).map_err(|e| format!("Failed to serialize response: {}", e))
}

/// Register a player for an event. Entry point for embedders crossing an
/// RPC or FFI boundary.
pub fn register_json(service: &RosterService, request_json: &str) -> Result<String, String> {
    let request: RosterRequest = parse_request(request_json)?;
    check_schema_version(request.schema_version)?;

    let outcome =
        service.register(&request.event_id, &request.player_id).map_err(|e| e.to_string())?;

    let response = match outcome {
        RegisterOutcome::Admitted => RegisterResponse {
            schema_version: SCHEMA_VERSION,
            outcome: "admitted".to_string(),
            queue_position: None,
            status: None,
        },
        RegisterOutcome::Waitlisted { queue_position } => RegisterResponse {
            schema_version: SCHEMA_VERSION,
            outcome: "waitlisted".to_string(),
            queue_position: Some(queue_position),
            status: None,
        },
        RegisterOutcome::AlreadyPresent { status } => RegisterResponse {
            schema_version: SCHEMA_VERSION,
            outcome: "already_present".to_string(),
            queue_position: None,
            status: Some(status),
        },
    };
    to_response_json(&response)
}

/// Cancel a registration, reporting who was promoted in the player's
/// place, if anyone.
pub fn cancel_json(service: &RosterService, request_json: &str) -> Result<String, String> {
    let request: RosterRequest = parse_request(request_json)?;
    check_schema_version(request.schema_version)?;

    let outcome =
        service.cancel(&request.event_id, &request.player_id).map_err(|e| e.to_string())?;

    let response = match outcome {
        CancelOutcome::Cancelled { promoted } => CancelResponse {
            schema_version: SCHEMA_VERSION,
            outcome: "cancelled".to_string(),
            promoted,
        },
        CancelOutcome::NotRegistered => CancelResponse {
            schema_version: SCHEMA_VERSION,
            outcome: "not_registered".to_string(),
            promoted: None,
        },
    };
    to_response_json(&response)
}

/// Give up a reserve spot.
pub fn cancel_reserve_json(service: &RosterService, request_json: &str) -> Result<String, String> {
    let request: RosterRequest = parse_request(request_json)?;
    check_schema_version(request.schema_version)?;

    let outcome =
        service.cancel_reserve(&request.event_id, &request.player_id).map_err(|e| e.to_string())?;

    let response = CancelReserveResponse {
        schema_version: SCHEMA_VERSION,
        outcome: match outcome {
            CancelReserveOutcome::Cancelled => "cancelled".to_string(),
            CancelReserveOutcome::NotReserved => "not_reserved".to_string(),
        },
    };
    to_response_json(&response)
}

/// Where a player stands on an event roster, for button state.
pub fn status_json(service: &RosterService, request_json: &str) -> Result<String, String> {
    let request: RosterRequest = parse_request(request_json)?;
    check_schema_version(request.schema_version)?;

    let status =
        service.status(&request.event_id, &request.player_id).map_err(|e| e.to_string())?;

    to_response_json(&StatusResponse { schema_version: SCHEMA_VERSION, status })
}

/// Roster lists and pool usage for the event detail screen.
pub fn roster_view_json(service: &RosterService, request_json: &str) -> Result<String, String> {
    let request: RosterViewRequest = parse_request(request_json)?;
    check_schema_version(request.schema_version)?;

    let view: RosterView = service.roster_view(&request.event_id).map_err(|e| e.to_string())?;

    to_response_json(&RosterViewResponse { schema_version: SCHEMA_VERSION, view })
}
