use axum::{
    Router,
    extract::{
        Json, Query,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{HeaderValue, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use clap::Args;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;

use crate::core::{ChartSeries, MortgageParameters, Schedule, ScheduleError, YearRecord, simulate};

mod table;

pub use table::{COLUMNS, render_summary, render_table};

const INDEX_HTML: &str = include_str!("../../web/index.html");
const STYLES_CSS: &str = include_str!("../../web/styles.css");
const APP_JS: &str = include_str!("../../web/app.js");

const DEFAULT_START_YEAR: i32 = 2024;
const DEFAULT_PRINCIPAL: f64 = 500_000.0;
const DEFAULT_FORTNIGHTLY_PAYMENT: f64 = 2_000.0;
const DEFAULT_ANNUAL_LUMP_SUM: f64 = 10_000.0;
const DEFAULT_INTEREST_RATE: f64 = 5.0;

#[derive(Args, Debug, Clone, PartialEq)]
pub struct ScheduleArgs {
    #[arg(
        long,
        default_value_t = DEFAULT_START_YEAR,
        help = "Calendar year the schedule starts from"
    )]
    pub start_year: i32,
    #[arg(long, default_value_t = DEFAULT_PRINCIPAL, help = "Mortgage currently owing")]
    pub principal: f64,
    #[arg(
        long,
        default_value_t = DEFAULT_FORTNIGHTLY_PAYMENT,
        help = "Payment made every fortnight"
    )]
    pub fortnightly_payment: f64,
    #[arg(
        long,
        default_value_t = DEFAULT_ANNUAL_LUMP_SUM,
        help = "Extra payment applied once a year after the regular payments"
    )]
    pub annual_lump_sum: f64,
    #[arg(
        long,
        default_value_t = DEFAULT_INTEREST_RATE,
        help = "Annual interest rate in percent, e.g. 5"
    )]
    pub interest_rate: f64,
}

impl Default for ScheduleArgs {
    fn default() -> Self {
        Self {
            start_year: DEFAULT_START_YEAR,
            principal: DEFAULT_PRINCIPAL,
            fortnightly_payment: DEFAULT_FORTNIGHTLY_PAYMENT,
            annual_lump_sum: DEFAULT_ANNUAL_LUMP_SUM,
            interest_rate: DEFAULT_INTEREST_RATE,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct SchedulePayload {
    start_year: Option<i32>,
    principal: Option<f64>,
    fortnightly_payment: Option<f64>,
    annual_lump_sum: Option<f64>,
    interest_rate: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleResponse {
    pub parameters: MortgageParameters,
    pub years: Vec<YearRecord>,
    pub chart: ChartSeries,
    pub total_interest: f64,
    pub total_principal: f64,
    pub payoff_year: Option<i32>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
enum ErrorKind {
    InvalidParameter,
    NonAmortizing,
    NotFound,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
    kind: ErrorKind,
}

pub fn build_parameters(args: ScheduleArgs) -> Result<MortgageParameters, String> {
    for (name, value) in [
        ("--principal", args.principal),
        ("--fortnightly-payment", args.fortnightly_payment),
        ("--annual-lump-sum", args.annual_lump_sum),
        ("--interest-rate", args.interest_rate),
    ] {
        if !value.is_finite() {
            return Err(format!("{name} must be a number"));
        }
    }

    if args.principal < 0.0 {
        return Err("--principal must be >= 0".to_string());
    }

    if args.fortnightly_payment <= 0.0 {
        return Err("--fortnightly-payment must be > 0".to_string());
    }

    if args.annual_lump_sum < 0.0 {
        return Err("--annual-lump-sum must be >= 0".to_string());
    }

    if args.interest_rate < 0.0 {
        return Err("--interest-rate must be >= 0".to_string());
    }

    Ok(MortgageParameters {
        start_year: args.start_year,
        principal: args.principal,
        fortnightly_payment: args.fortnightly_payment,
        annual_lump_sum: args.annual_lump_sum,
        annual_interest_rate_percent: args.interest_rate,
    })
}

pub fn build_schedule_response(
    parameters: MortgageParameters,
    schedule: &Schedule,
) -> ScheduleResponse {
    ScheduleResponse {
        parameters,
        years: schedule.records().to_vec(),
        chart: schedule.chart_series(),
        total_interest: schedule.total_interest(),
        total_principal: schedule.total_principal(),
        payoff_year: schedule.payoff_year(),
    }
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "mortgage HTTP API listening");
    info!("Local access: http://127.0.0.1:{port}/");

    axum::serve(listener, router()).await
}

fn router() -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/index.html", get(index_handler))
        .route("/styles.css", get(styles_handler))
        .route("/app.js", get(app_js_handler))
        .route(
            "/api/schedule",
            get(schedule_get_handler).post(schedule_post_handler),
        )
        .fallback(not_found_handler)
}

async fn index_handler() -> impl IntoResponse {
    with_cache_control(Html(INDEX_HTML))
}

async fn styles_handler() -> impl IntoResponse {
    with_cache_control((
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        STYLES_CSS,
    ))
}

async fn app_js_handler() -> impl IntoResponse {
    with_cache_control((
        [(
            header::CONTENT_TYPE,
            "application/javascript; charset=utf-8",
        )],
        APP_JS,
    ))
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, ErrorKind::NotFound, "Not found")
}

async fn schedule_get_handler(
    payload: Result<Query<SchedulePayload>, QueryRejection>,
) -> Response {
    match payload {
        Ok(Query(payload)) => schedule_handler_impl(payload).await,
        Err(rejection) => malformed_payload_response(&rejection.body_text()),
    }
}

async fn schedule_post_handler(
    payload: Result<Json<SchedulePayload>, JsonRejection>,
) -> Response {
    match payload {
        Ok(Json(payload)) => schedule_handler_impl(payload).await,
        Err(rejection) => malformed_payload_response(&rejection.body_text()),
    }
}

fn malformed_payload_response(msg: &str) -> Response {
    error_response(StatusCode::BAD_REQUEST, ErrorKind::InvalidParameter, msg)
}

async fn schedule_handler_impl(payload: SchedulePayload) -> Response {
    let parameters = match parameters_from_payload(payload) {
        Ok(parameters) => parameters,
        Err(msg) => {
            return error_response(StatusCode::BAD_REQUEST, ErrorKind::InvalidParameter, &msg);
        }
    };

    match simulate(&parameters) {
        Ok(schedule) => json_response(
            StatusCode::OK,
            build_schedule_response(parameters, &schedule),
        ),
        Err(err) => schedule_error_response(&err),
    }
}

fn schedule_error_response(err: &ScheduleError) -> Response {
    let (status, kind) = match err {
        ScheduleError::InvalidParameter { .. } => {
            (StatusCode::BAD_REQUEST, ErrorKind::InvalidParameter)
        }
        ScheduleError::NonAmortizing { .. } => {
            (StatusCode::UNPROCESSABLE_ENTITY, ErrorKind::NonAmortizing)
        }
    };
    error_response(status, kind, &err.to_string())
}

fn with_cache_control<R: IntoResponse>(response: R) -> Response {
    let mut response = response.into_response();
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    response
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    with_cache_control((status, Json(body)))
}

fn error_response(status: StatusCode, kind: ErrorKind, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
            kind,
        },
    )
}

#[cfg(test)]
fn parameters_from_json(json: &str) -> Result<MortgageParameters, String> {
    let payload = serde_json::from_str::<SchedulePayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    parameters_from_payload(payload)
}

fn parameters_from_payload(payload: SchedulePayload) -> Result<MortgageParameters, String> {
    let mut args = ScheduleArgs::default();

    if let Some(v) = payload.start_year {
        args.start_year = v;
    }
    if let Some(v) = payload.principal {
        args.principal = v;
    }
    if let Some(v) = payload.fortnightly_payment {
        args.fortnightly_payment = v;
    }
    if let Some(v) = payload.annual_lump_sum {
        args.annual_lump_sum = v;
    }
    if let Some(v) = payload.interest_rate {
        args.interest_rate = v;
    }

    build_parameters(args)
}
