#[cfg(feature = "server")]
pub mod http {
    use axum::{
        extract::State,
        http::StatusCode,
        response::{IntoResponse, Json},
        routing::{get, post},
        Router,
    };
    use fuzzylib::{DefuzzifyMethod, FuzzyError, FuzzyModule, Shape};
    use serde::{Deserialize, Serialize};
    use std::collections::BTreeMap;
    use std::net::SocketAddr;
    use std::sync::Arc;
    use tower_http::cors::CorsLayer;
    use tracing::{error, info};

    /// Loaded rule base. Handlers never mutate it; each inference works on a clone.
    type SharedModule = Arc<FuzzyModule>;

    #[derive(Debug, Deserialize)]
    struct InferRequest {
        #[serde(default)]
        inputs: BTreeMap<String, f64>,
        #[serde(default)]
        outputs: Option<Vec<String>>,
        #[serde(default)]
        method: Option<DefuzzifyMethod>,
    }

    #[derive(Debug, Serialize)]
    struct InferResponse {
        method: DefuzzifyMethod,
        outputs: BTreeMap<String, f64>,
        fired: Vec<FiredRuleJson>,
    }

    #[derive(Debug, Serialize)]
    struct FiredRuleJson {
        index: usize,
        rule: String,
        confidence: f64,
    }

    #[derive(Debug, Serialize)]
    struct VariableJson {
        name: String,
        range: Option<(f64, f64)>,
        output: bool,
        sets: Vec<SetJson>,
    }

    #[derive(Debug, Serialize)]
    struct SetJson {
        name: String,
        shape: Shape,
        representative: f64,
    }

    #[derive(Debug, Serialize)]
    struct ErrorResponse {
        error: String,
    }

    type ApiError = (StatusCode, Json<ErrorResponse>);

    pub fn router(module: FuzzyModule) -> Router {
        Router::new()
            .route("/health", get(health_check))
            .route("/variables", get(list_variables))
            .route("/infer", post(infer))
            .layer(CorsLayer::permissive())
            .with_state(Arc::new(module))
    }

    pub async fn start_server(module: FuzzyModule, host: &str, port: u16) -> anyhow::Result<()> {
        let app = router(module);

        let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
        info!("Fuzzy inference server listening on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }

    async fn health_check() -> impl IntoResponse {
        Json(serde_json::json!({
            "status": "ok",
            "service": "fuzzy",
            "version": env!("CARGO_PKG_VERSION")
        }))
    }

    async fn list_variables(State(module): State<SharedModule>) -> impl IntoResponse {
        let outputs: Vec<&str> = module
            .output_variables()
            .iter()
            .map(|v| v.name())
            .collect();

        let variables: Vec<VariableJson> = module
            .variables()
            .iter()
            .map(|variable| VariableJson {
                name: variable.name().to_string(),
                range: variable.range(),
                output: outputs.contains(&variable.name()),
                sets: variable
                    .sets()
                    .map(|(name, set)| SetJson {
                        name: name.to_string(),
                        shape: *set.shape(),
                        representative: set.representative_value(),
                    })
                    .collect(),
            })
            .collect();

        Json(variables)
    }

    async fn infer(
        State(template): State<SharedModule>,
        Json(payload): Json<InferRequest>,
    ) -> Result<Json<InferResponse>, ApiError> {
        let mut module = FuzzyModule::clone(&template);

        for (name, value) in &payload.inputs {
            module.fuzzify(name, *value).map_err(inference_failed)?;
        }
        let trace = module.run_rules();

        let method = payload.method.unwrap_or_default();
        let targets = match payload.outputs {
            Some(outputs) => outputs,
            None => module
                .output_variables()
                .iter()
                .map(|v| v.name().to_string())
                .collect(),
        };

        let mut outputs = BTreeMap::new();
        for name in targets {
            let value = module.defuzzify(&name, method).map_err(inference_failed)?;
            outputs.insert(name, value);
        }

        let fired: Vec<FiredRuleJson> = trace
            .fired()
            .map(|firing| FiredRuleJson {
                index: firing.index,
                rule: module.display_rule(firing.index).unwrap_or_default(),
                confidence: firing.confidence,
            })
            .collect();

        info!(
            inputs = payload.inputs.len(),
            outputs = outputs.len(),
            fired = fired.len(),
            "inference request served"
        );

        Ok(Json(InferResponse {
            method,
            outputs,
            fired,
        }))
    }

    fn inference_failed(e: FuzzyError) -> ApiError {
        error!("Inference failed: {}", e);
        let status = match e.kind() {
            FuzzyError::UnknownVariable(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::BAD_REQUEST,
        };
        (
            status,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
    }

}

#[cfg(not(feature = "server"))]
pub mod http {
    pub async fn start_server(
        _module: fuzzylib::FuzzyModule,
        _host: &str,
        _port: u16,
    ) -> anyhow::Result<()> {
        anyhow::bail!("Server feature not enabled. Recompile with --features server")
    }
}
