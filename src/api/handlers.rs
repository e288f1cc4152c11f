//! Request handlers for the calculator endpoints.
//!
//! `GET` on a calculator returns empty results plus form defaults where the
//! calculator has them; `POST` takes the URL-encoded form and returns the
//! labelled results.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Form, Json};
use tracing::{debug, warn};

use tokio::task::{self, JoinError};

use super::AppState;
use super::types::{CalculationResponse, CalculatorInfo, ErrorResponse};
use crate::calc::reliability::element_names;
use crate::calc::{
    CableInputs, EmissionInputs, ForecastInputs, FuelOil, LoadDefaults, LoadInputs,
    ReliabilityInputs, SolidFuel,
};
use crate::error::{CalcError, CalcResult};
use crate::input::FormInput;
use crate::tables::TableSource;

/// Submitted form fields, in order.
type FormPairs = Form<Vec<(String, String)>>;
type ApiResult<T = CalculationResponse> = Result<Json<T>, ApiError>;

/// Request failure mapped to an HTTP status.
#[derive(Debug)]
pub enum ApiError {
    /// The calculation itself failed.
    Calc(CalcError),
    /// The blocking table read panicked or was cancelled.
    Task(JoinError),
}

impl From<CalcError> for ApiError {
    fn from(err: CalcError) -> Self {
        Self::Calc(err)
    }
}

impl From<JoinError> for ApiError {
    fn from(err: JoinError) -> Self {
        Self::Task(err)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Calc(CalcError::InvalidInput { .. } | CalcError::Domain(_)) => {
                StatusCode::BAD_REQUEST
            }
            Self::Calc(CalcError::LookupFailed(_) | CalcError::RangeNotFound { .. }) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            Self::Calc(CalcError::DataUnavailable { .. } | CalcError::DataCorrupt { .. })
            | Self::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            Self::Calc(err) => err.to_string(),
            Self::Task(err) => format!("calculation task failed: {err}"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = self.message();
        if status.is_server_error() {
            warn!(%error, "calculation failed");
        } else {
            debug!(%error, "calculation rejected");
        }
        (status, Json(ErrorResponse { error })).into_response()
    }
}

/// Runs `f` against the table source on the blocking pool.
async fn with_tables<T, F>(state: Arc<AppState>, f: F) -> Result<T, ApiError>
where
    F: FnOnce(&dyn TableSource) -> CalcResult<T> + Send + 'static,
    T: Send + 'static,
{
    Ok(task::spawn_blocking(move || f(state.tables.as_ref())).await??)
}

const CALCULATORS: &[CalculatorInfo] = &[
    CalculatorInfo {
        path: "/prac-1/task-1",
        title: "Solid fuel composition and heating value",
    },
    CalculatorInfo {
        path: "/prac-1/task-2",
        title: "Fuel oil working mass composition",
    },
    CalculatorInfo {
        path: "/prac-2/task-1",
        title: "Particulate emissions",
    },
    CalculatorInfo {
        path: "/prac-3/task-1",
        title: "Solar plant forecast profit",
    },
    CalculatorInfo {
        path: "/prac-4/task-1",
        title: "Cable selection and short-circuit currents",
    },
    CalculatorInfo {
        path: "/prac-5/task-1",
        title: "Single vs double circuit reliability",
    },
    CalculatorInfo {
        path: "/prac-6/task-1",
        title: "Workshop electrical loads",
    },
];

/// `GET /` → 200 + calculator list
pub async fn index() -> Json<&'static [CalculatorInfo]> {
    Json(CALCULATORS)
}

/// `GET` on calculators without form defaults.
pub async fn blank() -> Json<CalculationResponse> {
    Json(CalculationResponse::default())
}

/// `POST /prac-1/task-1`
pub async fn solid_fuel(Form(pairs): FormPairs) -> ApiResult {
    let fuel = SolidFuel::from_form(&FormInput::new(pairs))?;
    Ok(Json(CalculationResponse::results(fuel.compute().to_results())))
}

/// `POST /prac-1/task-2`
pub async fn fuel_oil(Form(pairs): FormPairs) -> ApiResult {
    let oil = FuelOil::from_form(&FormInput::new(pairs))?;
    Ok(Json(CalculationResponse::results(oil.compute().to_results())))
}

/// `POST /prac-2/task-1`
pub async fn emissions(Form(pairs): FormPairs) -> ApiResult {
    let inputs = EmissionInputs::from_form(&FormInput::new(pairs))?;
    Ok(Json(CalculationResponse::results(inputs.compute().to_results())))
}

/// `POST /prac-3/task-1`
pub async fn forecast(Form(pairs): FormPairs) -> ApiResult {
    let inputs = ForecastInputs::from_form(&FormInput::new(pairs))?;
    let results = inputs.compute().to_results(&inputs);
    Ok(Json(CalculationResponse::results(results)))
}

/// `GET /prac-4/task-1`
pub async fn cable_defaults() -> Json<CalculationResponse> {
    Json(CalculationResponse::default().with_defaults(CableInputs::default().to_defaults()))
}

/// `POST /prac-4/task-1`
pub async fn cable(State(state): State<Arc<AppState>>, Form(pairs): FormPairs) -> ApiResult {
    let inputs = CableInputs::from_form(&FormInput::new(pairs))?;
    let (inputs, report) = with_tables(state, move |tables| {
        let report = inputs.compute(tables)?;
        Ok((inputs, report))
    })
    .await?;
    Ok(Json(
        CalculationResponse::results(report.to_results()).with_defaults(inputs.to_defaults()),
    ))
}

/// `POST /prac-5/task-1`
pub async fn reliability(
    State(state): State<Arc<AppState>>,
    Form(pairs): FormPairs,
) -> ApiResult {
    let inputs = ReliabilityInputs::from_form(&FormInput::new(pairs))?;
    let report = with_tables(state, move |tables| inputs.compute(tables)).await?;
    Ok(Json(CalculationResponse::results(report.to_results())))
}

/// `GET /prac-5/data` → 200 + element names
pub async fn reliability_elements(State(state): State<Arc<AppState>>) -> ApiResult<Vec<String>> {
    Ok(Json(with_tables(state, element_names).await?))
}

/// `GET /prac-6/task-1`
pub async fn load_defaults(State(state): State<Arc<AppState>>) -> ApiResult {
    let defaults = with_tables(state, LoadDefaults::load).await?;
    Ok(Json(CalculationResponse::default().with_defaults(defaults)))
}

/// `POST /prac-6/task-1`
///
/// The submitted tables come back as the new defaults.
pub async fn loads(State(state): State<Arc<AppState>>, Form(pairs): FormPairs) -> ApiResult {
    let inputs = LoadInputs::from_form(&FormInput::new(pairs));
    let (defaults, inputs, report) = with_tables(state, move |tables| {
        let defaults = LoadDefaults::load(tables)?;
        let report = inputs.compute(tables)?;
        Ok((defaults, inputs, report))
    })
    .await?;
    Ok(Json(
        CalculationResponse::results(report.to_results())
            .with_defaults(inputs.echo(&defaults))
            .with_error(report.coefficient_errors()),
    ))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::Request;
    use tower::util::ServiceExt;

    use super::*;
    use crate::api::router;
    use crate::tables::{FileTableSource, InMemoryTableSource, TableId};

    fn shipped_tables() -> Arc<AppState> {
        let dir = concat!(env!("CARGO_MANIFEST_DIR"), "/instance");
        Arc::new(AppState::new(FileTableSource::new(dir)))
    }

    fn post(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(resp: Response) -> serde_json::Value {
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[test]
    fn error_statuses() {
        let status = |err: CalcError| ApiError::from(err).status();
        assert_eq!(status(CalcError::invalid("Hp")), StatusCode::BAD_REQUEST);
        assert_eq!(status(CalcError::Domain("x".into())), StatusCode::BAD_REQUEST);
        assert_eq!(
            status(CalcError::RangeNotFound { count: 3 }),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status(CalcError::corrupt("t", "r")),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn blocking_table_reads_map_failures() {
        let state = Arc::new(AppState::new(InMemoryTableSource::new()));
        let err = with_tables(state.clone(), element_names).await.unwrap_err();
        assert!(matches!(err, ApiError::Calc(CalcError::DataUnavailable { .. })));

        let err = with_tables(state, |_| -> CalcResult<()> { panic!("table reader crashed") })
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Task(_)));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn index_lists_calculators() {
        let app = router(shipped_tables());
        let req = Request::builder().uri("/").body(Body::empty()).unwrap();
        let resp = app.oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let json = json_body(resp).await;
        assert_eq!(json.as_array().map(Vec::len), Some(CALCULATORS.len()));
    }

    #[tokio::test]
    async fn solid_fuel_post_returns_results() {
        let app = router(shipped_tables());
        let body = "Hp=1.9&Cp=21.1&Sp=2.6&Np=0.2&Op=7.1&Wp=53&Ap=14.1";
        let resp = app.oneshot(post("/prac-1/task-1", body)).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let json = json_body(resp).await;
        assert_eq!(json["results"]["Kpc"], 2.13);
    }

    #[tokio::test]
    async fn missing_field_returns_400() {
        let app = router(shipped_tables());
        let resp = app
            .oneshot(post("/prac-1/task-1", "Hp=1.9"))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let json = json_body(resp).await;
        assert!(json["error"].as_str().is_some_and(|e| e.contains("Cp")));
    }

    #[tokio::test]
    async fn forecast_domain_violation_returns_400() {
        let app = router(shipped_tables());
        let resp = app
            .oneshot(post("/prac-3/task-1", "Pc=5&Q1=0.25&Q2=1&B=7"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn cable_get_has_defaults() {
        let app = router(shipped_tables());
        let req = Request::builder()
            .uri("/prac-4/task-1")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let json = json_body(resp).await;
        assert_eq!(json["defaults"]["Sm"], 1300.0);
    }

    #[tokio::test]
    async fn cable_out_of_range_time_returns_422() {
        let app = router(shipped_tables());
        let body = "cabel=3&Ik=2500&tf=2.5&Sm=1300&Tm=500&Sk=200";
        let resp = app.oneshot(post("/prac-4/task-1", body)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn missing_table_returns_500() {
        let app = router(Arc::new(AppState::new(InMemoryTableSource::new())));
        let req = Request::builder()
            .uri("/prac-5/data")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn untabulated_count_reports_zero_coefficient() {
        let tables = InMemoryTableSource::new()
            .with_table(
                TableId::DemandCoefficientsCabinet,
                r#"{"1": {"0.1": 8.0}, "2": {"0.1": 5.33}}"#,
            )
            .with_table(TableId::DemandCoefficientsShop, r#"{"1;100000": {"0.1": 0.7}}"#)
            .with_table(TableId::LoadDefaults, r#"{"normal": {}, "big": {}, "all": {}}"#);
        let app = router(Arc::new(AppState::new(tables)));
        let body = "nu%5B%5D=1&cos%5B%5D=1&Uh%5B%5D=0.38&n%5B%5D=10&Ph%5B%5D=20\
                    &KB%5B%5D=0.2&tg%5B%5D=1\
                    &n=10&nPh=200&nPhKB=40&nPhKBtg=40&nPh_square=4000";
        let resp = app.oneshot(post("/prac-6/task-1", body)).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let json = json_body(resp).await;
        assert_eq!(json["results"]["ne"], 10);
        assert_eq!(json["results"]["Kp"], 0.0);
        assert_eq!(json["results"]["Pp"], 0.0);
        assert_eq!(json["results"]["Kp_all"], 0.7);
        let error = json["error"].as_str().unwrap_or_default();
        assert!(error.contains("cabinet"), "{error}");
        assert!(!error.contains("shop"), "{error}");
    }

    #[tokio::test]
    async fn reliability_elements_from_memory() {
        let tables = InMemoryTableSource::new().with_table(
            TableId::ReliabilityElements,
            r#"{"T-110": [0.015, 100, 43]}"#,
        );
        let app = router(Arc::new(AppState::new(tables)));
        let req = Request::builder()
            .uri("/prac-5/data")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(json_body(resp).await, serde_json::json!(["T-110"]));
    }
}
