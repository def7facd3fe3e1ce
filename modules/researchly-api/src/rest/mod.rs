use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::Json,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use researchly_common::{ChatMode, ReportFlags, SourceRecord};
use researchly_core::activities;

use crate::error::ApiError;
use crate::mock;
use crate::state::AppState;

// --- Request bodies ---

#[derive(Deserialize)]
pub struct ResearchQueryBody {
    query: Option<String>,
    filters: Option<Value>,
}

#[derive(Deserialize)]
pub struct ChatBody {
    message: Option<String>,
    mode: Option<String>,
}

#[derive(Deserialize)]
pub struct ModeBody {
    mode: Option<String>,
}

#[derive(Deserialize)]
pub struct ActionBody {
    #[serde(rename = "actionType")]
    action_type: Option<String>,
    context: Option<String>,
}

#[derive(Deserialize)]
pub struct ValidateBody {
    #[serde(rename = "aiResponse")]
    ai_response: Option<String>,
    constraints: Option<Value>,
}

#[derive(Deserialize)]
pub struct UserLogBody {
    actions: Option<Vec<Value>>,
}

#[derive(Deserialize)]
pub struct FeedbackBody {
    #[serde(rename = "reportContent")]
    report_content: Option<String>,
    flags: Option<ReportFlags>,
}

// --- Helpers ---

fn now() -> String {
    Utc::now().to_rfc3339()
}

fn require(field: Option<String>, message: &'static str) -> Result<String, ApiError> {
    match field {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ApiError::bad_request(message)),
    }
}

async fn lookup_source(state: &AppState, source_id: &str) -> Result<SourceRecord, ApiError> {
    state
        .store
        .get(source_id)
        .await
        .ok_or_else(ApiError::source_not_found)
}

fn source_to_json(source: &SourceRecord) -> Value {
    json!({
        "id": source.id,
        "title": source.title,
        "content": source.content,
    })
}

// --- Handlers ---

pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": now(),
        "version": env!("CARGO_PKG_VERSION"),
        "apis": [
            "POST /api/research/query",
            "POST /api/source/{sourceId}/chat",
            "POST /api/source/{sourceId}/mode",
            "POST /api/source/{sourceId}/action",
            "POST /api/source/{sourceId}/validate",
            "GET /api/source/{sourceId}/details",
            "POST /api/user/log",
            "POST /api/report/feedback",
            "GET /api/docs",
        ],
    }))
}

pub async fn research_query(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ResearchQueryBody>,
) -> Result<Json<Value>, ApiError> {
    let query = require(body.query, "Query is required")?;
    let filters = body.filters.unwrap_or_else(|| json!({}));

    let sources: Vec<Value> = match &state.searcher {
        Some(searcher) => match searcher.search(&query).await {
            Ok(results) => results
                .iter()
                .map(|r| {
                    json!({
                        "title": r.title,
                        "url": r.url,
                        "snippet": r.snippet,
                        "authors": [],
                        "abstract": r.snippet,
                    })
                })
                .collect(),
            Err(e) => {
                let store = state.store.list().await;
                state.fall_back("research_query", e, || {
                    store.iter().map(source_to_json).collect()
                })?
            }
        },
        None => state.store.list().await.iter().map(source_to_json).collect(),
    };

    Ok(Json(json!({
        "sources": sources,
        "total": sources.len(),
        "query": query,
        "filters": filters,
        "searchId": Uuid::new_v4().to_string(),
    })))
}

pub async fn source_chat(
    State(state): State<Arc<AppState>>,
    Path(source_id): Path<String>,
    Json(body): Json<ChatBody>,
) -> Result<Json<Value>, ApiError> {
    let message = require(body.message, "Message is required")?;
    let source = lookup_source(&state, &source_id).await?;
    let mode = body
        .mode
        .as_deref()
        .and_then(ChatMode::parse)
        .unwrap_or(ChatMode::Summary);

    let response = match &state.llm {
        Some(llm) => {
            match activities::source_chat_response(llm.as_ref(), &source, &message, mode).await {
                Ok(reply) => reply,
                Err(e) => state.fall_back("source_chat", e, || {
                    mock::mock_chat_response(&message, mode)
                })?,
            }
        }
        None => mock::mock_chat_response(&message, mode),
    };

    Ok(Json(json!({
        "sourceId": source_id,
        "response": response,
        "timestamp": now(),
    })))
}

pub async fn source_mode(
    State(state): State<Arc<AppState>>,
    Path(source_id): Path<String>,
    Json(body): Json<ModeBody>,
) -> Result<Json<Value>, ApiError> {
    let mode = require(body.mode, "Mode is required")?;
    lookup_source(&state, &source_id).await?;

    Ok(Json(json!({
        "sourceId": source_id,
        "mode": mode,
        "message": format!("Mode changed to {mode}"),
        "timestamp": now(),
    })))
}

pub async fn source_action(
    State(state): State<Arc<AppState>>,
    Path(source_id): Path<String>,
    Json(body): Json<ActionBody>,
) -> Result<Json<Value>, ApiError> {
    let action = require(body.action_type, "Action type is required")?;
    lookup_source(&state, &source_id).await?;

    Ok(Json(json!({
        "sourceId": source_id,
        "action": action,
        "result": format!("Action \"{action}\" performed on source"),
        "context": body.context,
        "timestamp": now(),
    })))
}

pub async fn source_validate(
    State(state): State<Arc<AppState>>,
    Path(source_id): Path<String>,
    Json(body): Json<ValidateBody>,
) -> Result<Json<Value>, ApiError> {
    let ai_response = require(body.ai_response, "AI response is required")?;
    lookup_source(&state, &source_id).await?;
    let constraints = body.constraints.unwrap_or_else(|| json!({}));

    let validation_report = match &state.llm {
        Some(llm) => {
            match activities::validate_response(llm.as_ref(), &ai_response, &constraints).await {
                Ok(report) => report,
                Err(e) => state.fall_back("source_validate", e, mock::mock_validation_report)?,
            }
        }
        None => mock::mock_validation_report(),
    };

    Ok(Json(json!({
        "sourceId": source_id,
        "validationId": Uuid::new_v4().to_string(),
        "validationReport": validation_report,
        "timestamp": now(),
    })))
}

pub async fn source_details(
    State(state): State<Arc<AppState>>,
    Path(source_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let source = lookup_source(&state, &source_id).await?;

    Ok(Json(json!({
        "sourceId": source_id,
        "metadata": mock::mock_source_metadata(&source),
    })))
}

pub async fn user_log(
    State(state): State<Arc<AppState>>,
    Json(body): Json<UserLogBody>,
) -> Result<Json<Value>, ApiError> {
    let actions = match body.actions {
        Some(actions) if !actions.is_empty() => actions,
        _ => return Err(ApiError::bad_request("Actions are required")),
    };

    let logged_count = state.store.log_actions(actions).await;

    Ok(Json(json!({
        "message": "User actions logged successfully",
        "logId": Uuid::new_v4().to_string(),
        "loggedCount": logged_count,
        "timestamp": now(),
    })))
}

pub async fn report_feedback(
    State(state): State<Arc<AppState>>,
    Json(body): Json<FeedbackBody>,
) -> Result<Json<Value>, ApiError> {
    let report_content = require(body.report_content, "Report content is required")?;
    let flags = body.flags.unwrap_or_default();

    let feedback = match &state.llm {
        Some(llm) => {
            match activities::report_feedback(llm.as_ref(), &report_content, flags).await {
                Ok(items) => items,
                Err(e) => state.fall_back("report_feedback", e, mock::mock_feedback)?,
            }
        }
        None => mock::mock_feedback(),
    };

    Ok(Json(json!({
        "message": "Feedback generated successfully",
        "feedback": feedback,
        "timestamp": now(),
    })))
}

pub async fn api_docs() -> Json<Value> {
    Json(json!({
        "title": "Researchly API Documentation",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "AI-powered research assistant APIs",
        "endpoints": {
            "research": {
                "query": {
                    "method": "POST",
                    "path": "/api/research/query",
                    "description": "Search and retrieve research sources",
                    "body": {
                        "query": "string (required)",
                        "filters": "object (optional)"
                    }
                }
            },
            "source": {
                "chat": {
                    "method": "POST",
                    "path": "/api/source/{sourceId}/chat",
                    "description": "Chat with a specific research source",
                    "body": {
                        "message": "string (required)",
                        "mode": "string (optional: summary, explanation, implementation)"
                    }
                },
                "mode": {
                    "method": "POST",
                    "path": "/api/source/{sourceId}/mode",
                    "description": "Change interaction mode for a source",
                    "body": {
                        "mode": "string (required: summary, explanation, implementation)"
                    }
                },
                "action": {
                    "method": "POST",
                    "path": "/api/source/{sourceId}/action",
                    "description": "Perform quick actions on a source",
                    "body": {
                        "actionType": "string (required)",
                        "context": "string (optional)"
                    }
                },
                "validate": {
                    "method": "POST",
                    "path": "/api/source/{sourceId}/validate",
                    "description": "Validate an AI response against a source",
                    "body": {
                        "aiResponse": "string (required)",
                        "constraints": "object (optional)"
                    }
                },
                "details": {
                    "method": "GET",
                    "path": "/api/source/{sourceId}/details",
                    "description": "Get detailed source metadata"
                }
            },
            "user": {
                "log": {
                    "method": "POST",
                    "path": "/api/user/log",
                    "description": "Log user interactions",
                    "body": {
                        "actions": "array (required)"
                    }
                }
            },
            "report": {
                "feedback": {
                    "method": "POST",
                    "path": "/api/report/feedback",
                    "description": "Get AI feedback on a research report",
                    "body": {
                        "reportContent": "string (required)",
                        "flags": "object (optional)"
                    }
                }
            }
        }
    }))
}
