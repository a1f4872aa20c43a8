//! AWS Lambda handler for debt payoff projections
//!
//! Accepts a debt list via JSON and returns either a payoff plan
//! (`/debts/payoff`) or a portfolio summary (`/debts/summary`).
//!
//! Supports Lambda Function URLs for direct HTTP access.

use anyhow::Context;
use aws_lambda_events::event::lambda_function_urls::{LambdaFunctionUrlRequest, LambdaFunctionUrlResponse};
use debt_payoff::{
    payoff::{Clock, FixedClock, SystemClock},
    Debt, InMemoryDebtRepository, PayoffConfig, PayoffError, PayoffService, Strategy, YearMonth,
};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use log::info;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;

const PAYOFF_PATH: &str = "/debts/payoff";
const SUMMARY_PATH: &str = "/debts/summary";

/// Repository key for the debts carried in the request body
const REQUEST_OWNER: &str = "request";

const RESPONSE_HEADERS: [(&str, &str); 4] = [
    ("content-type", "application/json"),
    ("access-control-allow-origin", "*"),
    ("access-control-allow-methods", "GET, POST, OPTIONS"),
    ("access-control-allow-headers", "Content-Type"),
];

/// Input for both routes
#[derive(Debug, Deserialize)]
pub struct PayoffRequest {
    #[serde(default)]
    pub debts: Vec<Debt>,

    /// avalanche or snowball (default: avalanche)
    #[serde(default = "default_strategy")]
    pub strategy: String,

    /// Extra monthly payment on top of minimums (default: 0)
    #[serde(default)]
    pub extra_payment: Decimal,

    /// Month to project from, YYYY-MM (default: current month)
    #[serde(default)]
    pub start_month: Option<YearMonth>,
}

fn default_strategy() -> String {
    Strategy::default().to_string()
}

fn response(status: i64, body: Option<String>) -> LambdaFunctionUrlResponse {
    let mut response = LambdaFunctionUrlResponse {
        status_code: status,
        headers: Default::default(),
        body,
        is_base64_encoded: false,
        cookies: Vec::new(),
    };
    for (name, value) in RESPONSE_HEADERS {
        if let Ok(value) = value.parse() {
            response.headers.insert(name, value);
        }
    }
    response
}

fn error_response(status: i64, message: &str) -> LambdaFunctionUrlResponse {
    response(status, Some(serde_json::json!({ "error": message }).to_string()))
}

fn json_response(body: String) -> LambdaFunctionUrlResponse {
    response(200, Some(body))
}

fn status_for(err: &PayoffError) -> i64 {
    if err.is_client_error() {
        400
    } else {
        500
    }
}

/// Body fields, then query parameter overrides
fn parse_request(body: Option<&str>, query: &HashMap<String, String>) -> anyhow::Result<PayoffRequest> {
    let body = body.map(str::trim).filter(|b| !b.is_empty()).unwrap_or("{}");
    let mut request: PayoffRequest = serde_json::from_str(body).context("Invalid JSON")?;

    if let Some(strategy) = query.get("strategy") {
        request.strategy = strategy.clone();
    }
    if let Some(extra) = query.get("extra_payment") {
        request.extra_payment = extra
            .trim()
            .parse()
            .with_context(|| format!("extra_payment '{}' is not a number", extra))?;
    }
    if let Some(start) = query.get("start_month") {
        request.start_month = Some(start.parse().map_err(anyhow::Error::msg)?);
    }

    Ok(request)
}

/// Route one HTTP request
fn respond(
    method: &str,
    path: &str,
    query: &HashMap<String, String>,
    body: Option<&str>,
) -> LambdaFunctionUrlResponse {
    // Handle CORS preflight
    if method.eq_ignore_ascii_case("OPTIONS") {
        return response(200, None);
    }

    let request = match parse_request(body, query) {
        Ok(r) => r,
        Err(e) => return error_response(400, &format!("{:#}", e)),
    };

    let start = request.start_month.unwrap_or_else(|| SystemClock.current_month());
    let repository = InMemoryDebtRepository::new().with_debts(REQUEST_OWNER, request.debts);
    let service = PayoffService::new(repository, FixedClock(start)).with_config(PayoffConfig::from_env());

    let result = match path.trim_end_matches('/') {
        PAYOFF_PATH => service
            .payoff_plan(REQUEST_OWNER, &request.strategy, request.extra_payment)
            .map(|plan| serde_json::to_string(&plan)),
        SUMMARY_PATH => service
            .summary(REQUEST_OWNER)
            .map(|summary| serde_json::to_string(&summary)),
        other => return error_response(404, &format!("Unknown path: {}", other)),
    };

    match result {
        Ok(Ok(json)) => json_response(json),
        Ok(Err(e)) => error_response(500, &format!("Failed to serialize response: {}", e)),
        Err(e) => error_response(status_for(&e), &e.to_string()),
    }
}

/// Lambda handler function
async fn handler(event: LambdaEvent<LambdaFunctionUrlRequest>) -> Result<LambdaFunctionUrlResponse, Error> {
    let start = std::time::Instant::now();
    let request = event.payload;

    let http = &request.request_context.http;
    let method = http.method.as_deref().unwrap_or("GET");
    let path = request
        .raw_path
        .as_deref()
        .or(http.path.as_deref())
        .unwrap_or("/");

    if request.is_base64_encoded {
        return Ok(error_response(400, "Base64-encoded bodies are not supported"));
    }

    let response = respond(method, path, &request.query_string_parameters, request.body.as_deref());
    info!(
        "{} {} -> {} in {:?}",
        method,
        path,
        response.status_code,
        start.elapsed()
    );
    Ok(response)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn body() -> String {
        serde_json::json!({
            "debts": [
                {"id": 1, "name": "A", "debt_type": "credit_card", "balance": "1000", "interest_rate": "20", "minimum_payment": "50"},
                {"id": 2, "name": "B", "balance": 500, "interest_rate": 10, "minimum_payment": 50}
            ],
            "extra_payment": "100",
            "start_month": "2026-10"
        })
        .to_string()
    }

    fn parse(response: &LambdaFunctionUrlResponse) -> Value {
        serde_json::from_str(response.body.as_deref().unwrap()).unwrap()
    }

    #[test]
    fn test_preflight() {
        let response = respond("OPTIONS", PAYOFF_PATH, &HashMap::new(), None);
        assert_eq!(response.status_code, 200);
        assert!(response.body.is_none());
        let origin = response
            .headers
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok());
        assert_eq!(origin, Some("*"));
    }

    #[test]
    fn test_payoff_plan() {
        let response = respond("POST", PAYOFF_PATH, &HashMap::new(), Some(&body()));
        assert_eq!(response.status_code, 200);

        let json = parse(&response);
        assert_eq!(json["strategy"], "avalanche");
        assert_eq!(json["total_months"], 9);
        assert_eq!(json["total_interest_paid"], "91.65");
        assert_eq!(json["debt_free_date"], "2027-07");
        assert_eq!(json["payoff_order"][0]["name"], "A");
        assert_eq!(json["payoff_order"][0]["debt_type"], "credit_card");
        assert_eq!(json["monthly_projection"][0]["date"], "2026-11");
    }

    #[test]
    fn test_query_overrides_body() {
        let mut query = HashMap::new();
        query.insert("strategy".to_string(), "Snowball".to_string());
        let response = respond("GET", "/debts/payoff/", &query, Some(&body()));
        assert_eq!(response.status_code, 200);

        let json = parse(&response);
        assert_eq!(json["strategy"], "snowball");
        assert_eq!(json["total_interest_paid"], "105.32");
        assert_eq!(json["payoff_order"][0]["name"], "B");
    }

    #[test]
    fn test_summary() {
        let response = respond("POST", SUMMARY_PATH, &HashMap::new(), Some(&body()));
        assert_eq!(response.status_code, 200);

        let json = parse(&response);
        assert_eq!(json["debt_count"], 2);
        assert_eq!(json["total_debt"], "1500.00");
        assert_eq!(json["avalanche_months"], 18);
    }

    #[test]
    fn test_empty_body_is_empty_plan() {
        let mut query = HashMap::new();
        query.insert("start_month".to_string(), "2026-10".to_string());
        let response = respond("GET", PAYOFF_PATH, &query, None);
        assert_eq!(response.status_code, 200);

        let json = parse(&response);
        assert!(json["total_months"].is_null());
        assert_eq!(json["payoff_order"].as_array().map(Vec::len), Some(0));
    }

    #[test]
    fn test_client_errors() {
        let mut query = HashMap::new();
        query.insert("strategy".to_string(), "fastest".to_string());
        let response = respond("GET", PAYOFF_PATH, &query, Some(&body()));
        assert_eq!(response.status_code, 400);
        assert!(parse(&response)["error"].as_str().unwrap().contains("fastest"));

        let response = respond("POST", PAYOFF_PATH, &HashMap::new(), Some("{not json"));
        assert_eq!(response.status_code, 400);

        let mut query = HashMap::new();
        query.insert("extra_payment".to_string(), "lots".to_string());
        let response = respond("GET", PAYOFF_PATH, &query, Some(&body()));
        assert_eq!(response.status_code, 400);

        let negative = r#"{"debts": [{"id": 1, "name": "A", "balance": "-5", "interest_rate": "5", "minimum_payment": "1"}]}"#;
        let response = respond("POST", PAYOFF_PATH, &HashMap::new(), Some(negative));
        assert_eq!(response.status_code, 400);
    }

    #[test]
    fn test_unknown_path() {
        let response = respond("GET", "/debts/other", &HashMap::new(), Some(&body()));
        assert_eq!(response.status_code, 404);
    }
}
