// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use axum::{
    body::{Body, Bytes},
    extract::{Query, State},
    http::header::CONTENT_TYPE,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use subtle::ConstantTimeEq;
use tower_http::trace::TraceLayer;
use vreg_kernel::config::{BASE, DEFAULT_WIDTH, END, SIZE};
use vreg_kernel::literal::parse_int;
use vreg_kernel::range::RangeRequest;
use vreg_kernel::{RegisterError, Width};

use crate::api::*;
use crate::engine::{SharedEngine, WriteValues};
use crate::errors::EngineError;

use axum::extract::Request as AxumRequest;
use axum::http::header::AUTHORIZATION;
use axum::http::StatusCode;
use axum::middleware::{from_fn_with_state, Next};
use axum::response::Response;

async fn auth_guard(
    State(token): State<Arc<String>>,
    req: AxumRequest,
    next: Next,
) -> Result<Response, StatusCode> {
    let provided = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|val| val.to_str().ok())
        .and_then(|val| val.strip_prefix("Bearer "));

    match provided {
        Some(p) if bool::from(p.as_bytes().ct_eq(token.as_bytes())) => Ok(next.run(req).await),
        _ => Err(StatusCode::UNAUTHORIZED),
    }
}

pub fn build_router(state: SharedEngine, auth_token: Option<String>) -> Router {
    let mut app = Router::new()
        .route("/api/v1/read", get(read))
        .route("/api/v1/read_range", get(read_range))
        .route("/api/v1/write", post(write))
        .route("/api/v1/write_range", post(write_range))
        .route("/api/v1/clear", get(clear))
        .route("/api/v1/clear_range", post(clear_range))
        .route("/api/v1/clear_all", post(clear_all))
        .route("/api/v1/status", get(status))
        .route("/api/v1/image", get(image))
        // Observability
        .route("/metrics", get(metrics_handler))
        .with_state(state);

    if let Some(token) = auth_token {
        tracing::info!("Auth Enabled: Bearer token required");
        app = app.layer(from_fn_with_state(Arc::new(token), auth_guard));
    } else {
        tracing::warn!("Auth Disabled: No token configured");
    }

    app.layer(TraceLayer::new_for_http())
}

// ---- boundary parsing ----

fn required_param(raw: Option<String>, name: &str) -> Result<String, EngineError> {
    raw.filter(|s| !s.is_empty())
        .ok_or_else(|| EngineError::InvalidInput(format!("{} parameter required", name)))
}

fn non_negative(v: i128, name: &str) -> Result<u64, EngineError> {
    u64::try_from(v)
        .map_err(|_| EngineError::InvalidInput(format!("{} must be a non-negative integer", name)))
}

/// Addresses outside `u64` are still checked for width first.
fn out_of_window(address: i128, width: u64) -> EngineError {
    match Width::try_from(width) {
        Err(e) => e.into(),
        Ok(_) => EngineError::OutOfRange { address, width },
    }
}

fn address(v: i128, width: u64) -> Result<u64, EngineError> {
    u64::try_from(v).map_err(|_| out_of_window(v, width))
}

fn width_param(raw: Option<String>) -> Result<u64, EngineError> {
    match raw.filter(|s| !s.is_empty()) {
        Some(w) => non_negative(parse_int(&w)?, "width"),
        None => Ok(DEFAULT_WIDTH),
    }
}

fn literal_u64(lit: &IntLiteral, name: &str) -> Result<u64, EngineError> {
    non_negative(lit.to_i128()?, name)
}

fn literal_width(lit: Option<&IntLiteral>) -> Result<u64, EngineError> {
    lit.map_or(Ok(DEFAULT_WIDTH), |w| literal_u64(w, "width"))
}

/// Builds a range from raw bounds. Bounds outside `u64` fail the same
/// checks, in the same order, as the range walk would apply to them.
fn range_from_literals(
    start: i128,
    end: Option<i128>,
    count: Option<i64>,
    width: u64,
) -> Result<RangeRequest, EngineError> {
    let end = if count.is_some() { None } else { end };
    if let Ok(start) = u64::try_from(start) {
        if !matches!(end, Some(e) if e < 0) {
            let end = end.map(|e| u64::try_from(e).unwrap_or(u64::MAX));
            return Ok(RangeRequest::from_parts(start, end, count, width)?);
        }
    }
    match (count, end) {
        (Some(c), _) if c <= 0 => Err(RegisterError::InvalidCount(c).into()),
        (None, None) => Err(RegisterError::MissingBound.into()),
        (None, Some(end)) if end < start => Err(EngineError::InvalidBounds { start, end }),
        _ => Err(out_of_window(start, width)),
    }
}

/// Bodies are parsed as JSON whatever their content type.
fn json_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, EngineError> {
    serde_json::from_slice(body)
        .map_err(|e| EngineError::InvalidInput(format!("invalid JSON body: {}", e)))
}

/// Counts outside `i64` saturate; the range walk rejects them either way.
fn saturating_count(v: i128) -> i64 {
    i64::try_from(v).unwrap_or(if v < 0 { i64::MIN } else { i64::MAX })
}

// ---- handlers ----

async fn read(
    State(state): State<SharedEngine>,
    Query(params): Query<RegisterParams>,
) -> Result<Json<ReadResponse>, EngineError> {
    let addr = parse_int(&required_param(params.addr, "addr")?)?;
    let width = width_param(params.width)?;
    let addr = address(addr, width)?;

    let engine = state.read().await;
    let value = engine.read_one(addr, width)?;
    Ok(Json(ReadResponse {
        addr: hex(addr),
        width,
        value: hex(value),
    }))
}

async fn read_range(
    State(state): State<SharedEngine>,
    Query(params): Query<ReadRangeParams>,
) -> Result<Json<ReadRangeResponse>, EngineError> {
    let start = parse_int(&required_param(params.start, "start")?)?;
    let width = width_param(params.width)?;
    let end = match params.end.filter(|s| !s.is_empty()) {
        Some(e) => Some(parse_int(&e)?),
        None => None,
    };
    let count = match params.count.filter(|s| !s.is_empty()) {
        Some(c) => Some(saturating_count(parse_int(&c)?)),
        None => None,
    };

    let range = range_from_literals(start, end, count, width)?;
    let engine = state.read().await;
    let pairs = engine.read_many(range)?;

    Ok(Json(ReadRangeResponse {
        status: "ok".into(),
        width,
        count: pairs.len(),
        data: pairs.into_iter().map(|(a, v)| (hex(a), hex(v))).collect(),
    }))
}

async fn write(
    State(state): State<SharedEngine>,
    body: Bytes,
) -> Result<Json<WriteResponse>, EngineError> {
    let req: WriteRequest = json_body(&body)?;
    let (Some(addr), Some(width), Some(value)) = (&req.addr, &req.width, &req.value) else {
        return Err(EngineError::InvalidInput(
            "JSON must contain addr, width, value (addr/value can be hex)".into(),
        ));
    };
    let addr = addr.to_i128()?;
    let width = literal_u64(width, "width")?;
    let value = value.to_i128()?;
    let addr = address(addr, width)?;

    let mut engine = state.write().await;
    let stored = engine.write_one(addr, width, value)?;
    Ok(Json(WriteResponse {
        status: "ok".into(),
        addr: hex(addr),
        width,
        value: hex(stored),
    }))
}

async fn write_range(
    State(state): State<SharedEngine>,
    body: Bytes,
) -> Result<Json<WriteRangeResponse>, EngineError> {
    let req: WriteRangeRequest = json_body(&body)?;
    let (Some(start), Some(count)) = (&req.start, &req.count) else {
        return Err(EngineError::InvalidInput(
            "JSON must contain start, count and optional width".into(),
        ));
    };
    let start = start.to_i128()?;
    let count = saturating_count(count.to_i128()?);
    let width = literal_width(req.width.as_ref())?;
    let start = match range_from_literals(start, None, Some(count), width)? {
        RangeRequest::Counted { start, .. } | RangeRequest::Bounded { start, .. } => start,
    };

    let values = if let Some(list) = &req.values {
        let parsed = list
            .iter()
            .map(IntLiteral::to_i128)
            .collect::<Result<Vec<_>, _>>()?;
        Some(WriteValues::Each(parsed))
    } else if let Some(v) = &req.value {
        Some(WriteValues::Repeat(v.to_i128()?))
    } else {
        None
    };

    let mut engine = state.write().await;
    let written = engine.write_many(start, count, width, values)?;
    Ok(Json(WriteRangeResponse {
        status: "ok".into(),
        count: written.len(),
        written: written
            .into_iter()
            .map(|(a, v)| WrittenEntry {
                addr: hex(a),
                value: hex(v),
            })
            .collect(),
    }))
}

async fn clear(
    State(state): State<SharedEngine>,
    Query(params): Query<RegisterParams>,
) -> Result<Json<ClearResponse>, EngineError> {
    let addr = parse_int(&required_param(params.addr, "addr")?)?;
    let width = width_param(params.width)?;
    let addr = address(addr, width)?;

    let mut engine = state.write().await;
    engine.clear_one(addr, width)?;
    Ok(Json(ClearResponse {
        status: "cleared".into(),
        addr: hex(addr),
        width,
        value: hex(0),
    }))
}

async fn clear_range(
    State(state): State<SharedEngine>,
    body: Bytes,
) -> Result<Json<ClearRangeResponse>, EngineError> {
    let req: ClearRangeRequest = json_body(&body)?;
    let (Some(start), Some(end)) = (&req.start, &req.end) else {
        return Err(EngineError::InvalidInput("JSON must contain start, end, width".into()));
    };
    let (start, end) = (start.to_i128()?, end.to_i128()?);
    let width = literal_width(req.width.as_ref())?;
    let (start, end) = match range_from_literals(start, Some(end), None, width)? {
        RangeRequest::Bounded { start, end, .. } => (start, end),
        RangeRequest::Counted { start, .. } => (start, start),
    };

    let mut engine = state.write().await;
    let count = engine.clear_range(start, end, width)?;
    Ok(Json(ClearRangeResponse {
        status: "cleared_range".into(),
        start: hex(start),
        end: hex(end),
        width,
        count,
    }))
}

/// A missing or malformed body counts as "not confirmed".
async fn clear_all(
    State(state): State<SharedEngine>,
    body: Bytes,
) -> Result<Json<ClearAllResponse>, EngineError> {
    let confirmed =
        serde_json::from_slice::<ClearAllRequest>(&body).map_or(false, |req| req.confirmed());

    let mut engine = state.write().await;
    engine.clear_all(confirmed)?;
    Ok(Json(ClearAllResponse {
        status: "cleared_all".into(),
        size: SIZE,
        base: hex(BASE),
    }))
}

async fn status(State(state): State<SharedEngine>) -> Json<StatusResponse> {
    let engine = state.read().await;
    Json(StatusResponse {
        base: hex(BASE),
        end: hex(END),
        size: SIZE,
        non_zero_bytes: engine.window().non_zero_bytes(),
        digest: format!("{:016x}", engine.digest()),
        persistent: engine.is_persistent(),
        image: engine.image_location(),
    })
}

/// A consistent copy of the whole window.
async fn image(State(state): State<SharedEngine>) -> impl IntoResponse {
    let bytes = {
        let engine = state.read().await;
        engine.window().as_bytes().to_vec()
    };
    ([(CONTENT_TYPE, "application/octet-stream")], Body::from(bytes))
}

async fn metrics_handler() -> String {
    crate::telemetry::get_metrics()
}
