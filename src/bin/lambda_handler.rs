//! AWS Lambda handler for running solar projections
//!
//! Accepts a (partial) parameter set as JSON and returns the yearly series,
//! summary metrics and derived breakdowns.
//!
//! Serves Lambda Function URLs (and HTTP API v2 payloads, which share their
//! shape) and API Gateway REST proxy events. The request JSON travels in the
//! HTTP body; any other event shape is refused as an invocation error.

use aws_lambda_events::event::apigw::ApiGatewayProxyRequest;
use aws_lambda_events::event::lambda_function_urls::LambdaFunctionUrlRequest;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use solar_roi::breakdown::{BillEstimate, CostBreakdown, SavingsBreakdown, DEFAULT_MONTHLY_CONSUMPTION_KWH};
use solar_roi::{project, Parameters, ProjectionSummary, YearlyRecord};

/// Input for one projection
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionRequest {
    /// Projection parameters; omitted keys use defaults
    #[serde(flatten)]
    pub parameters: Parameters,

    /// Average monthly consumption before solar, for the bill estimate (default: 245 kWh)
    #[serde(default = "default_consumption")]
    pub monthly_consumption_kwh: f64,

    /// Omit the yearly series from the response
    #[serde(default)]
    pub summary_only: bool,
}

fn default_consumption() -> f64 { DEFAULT_MONTHLY_CONSUMPTION_KWH }

/// Output of one projection
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionResponse {
    pub parameters: Parameters,
    pub summary: ProjectionSummary,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub yearly: Vec<YearlyRecord>,
    pub cost_breakdown: CostBreakdown,
    pub first_year_savings: SavingsBreakdown,
    pub bill_estimate: BillEstimate,
    pub execution_time_ms: f64,
}

/// Outcome of handling a request body, before wrapping for the caller
enum Outcome {
    Ok(ProjectionResponse),
    BadRequest(String),
}

fn handle_request(body: &str) -> Outcome {
    let start = std::time::Instant::now();

    let request: ProjectionRequest = match serde_json::from_str(body) {
        Ok(r) => r,
        Err(e) => return Outcome::BadRequest(format!("Invalid JSON: {}", e)),
    };

    let result = match project(&request.parameters) {
        Ok(r) => r,
        Err(e) => return Outcome::BadRequest(e.to_string()),
    };

    let response = ProjectionResponse {
        cost_breakdown: CostBreakdown::from_result(&result),
        first_year_savings: SavingsBreakdown::first_year(&result, &request.parameters),
        bill_estimate: BillEstimate::new(&request.parameters, request.monthly_consumption_kwh),
        summary: result.summary,
        yearly: if request.summary_only { Vec::new() } else { result.yearly },
        parameters: request.parameters,
        execution_time_ms: start.elapsed().as_secs_f64() * 1000.0,
    };

    Outcome::Ok(response)
}

fn http_response(status: u16, body: Value) -> Value {
    json!({
        "statusCode": status,
        "headers": {
            "Content-Type": "application/json",
            "Access-Control-Allow-Origin": "*",
            "Access-Control-Allow-Methods": "POST, OPTIONS",
            "Access-Control-Allow-Headers": "Content-Type",
        },
        "body": body.to_string(),
    })
}

/// The parts of an HTTP event the handler needs
#[derive(Debug)]
struct HttpRequest {
    method: String,
    body: Option<String>,
    is_base64_encoded: bool,
}

impl HttpRequest {
    /// Classify the event and deserialize it with its typed definition
    fn from_event(payload: Value) -> Result<Self, Error> {
        if payload.pointer("/requestContext/http").is_some() {
            let request: LambdaFunctionUrlRequest = serde_json::from_value(payload)?;
            Ok(Self {
                method: request.request_context.http.method.unwrap_or_default(),
                body: request.body,
                is_base64_encoded: request.is_base64_encoded,
            })
        } else if payload.get("httpMethod").is_some() {
            let request: ApiGatewayProxyRequest = serde_json::from_value(payload)?;
            Ok(Self {
                method: request.http_method.as_str().to_owned(),
                body: request.body,
                is_base64_encoded: request.is_base64_encoded,
            })
        } else {
            Err("Unrecognised event: expected a Lambda Function URL or API Gateway proxy request".into())
        }
    }
}

/// Lambda handler function
async fn handler(event: LambdaEvent<Value>) -> Result<Value, Error> {
    let request = match HttpRequest::from_event(event.payload) {
        Ok(request) => request,
        Err(e) => {
            warn!("Refused event: {}", e);
            return Err(e);
        }
    };

    // Handle CORS preflight
    if request.method.eq_ignore_ascii_case("OPTIONS") {
        return Ok(http_response(200, Value::Null));
    }

    if request.is_base64_encoded {
        return Ok(http_response(400, json!({ "error": "Binary request bodies are not supported" })));
    }

    let body = request.body.as_deref().unwrap_or("{}");
    match handle_request(body) {
        Outcome::Ok(response) => {
            info!(
                "Projected {} years in {:.3} ms",
                response.parameters.system_lifetime, response.execution_time_ms
            );
            Ok(http_response(200, serde_json::to_value(response)?))
        }
        Outcome::BadRequest(message) => {
            warn!("Rejected request: {}", message);
            Ok(http_response(400, json!({ "error": message })))
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
