use arcanum::providers::catalog::{groq_models, ModelInfo};
use axum::{response::Json, routing::get, Router};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct ModelsResponse {
    models: &'static [ModelInfo],
}

async fn list_models() -> Json<ModelsResponse> {
    Json(ModelsResponse {
        models: groq_models(),
    })
}

pub fn routes() -> Router {
    Router::new().route("/api/relay/groq/models", get(list_models))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_list_models() {
        let response = routes()
            .oneshot(
                Request::get("/api/relay/groq/models")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value: Value = serde_json::from_slice(&body).unwrap();
        let models = value["models"].as_array().unwrap();
        assert_eq!(models.len(), groq_models().len());
        assert_eq!(models[0]["id"], "qwen/qwen3-32b");
        assert_eq!(models[0]["supportsReasoning"], true);
    }
}
