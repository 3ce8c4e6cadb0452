use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::warn;

use crate::error::{OracleError, PredictError};
use crate::match_state::{Catalog, MatchInput};
use crate::predictor::{evaluate, Evaluation, OracleHandle};

#[derive(Clone)]
pub struct AppState {
    pub oracle: Arc<OracleHandle>,
    pub catalog: Catalog,
}

/// Build the Axum router for the prediction form.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/api/options", get(options_handler))
        .route("/api/health", get(health_handler))
        .route("/api/predict", post(predict_handler))
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

/// Serve the form page.
async fn index_handler() -> impl IntoResponse {
    Html(FORM_HTML)
}

/// GET /api/options
async fn options_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.catalog.clone())
}

/// GET /api/health
async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let model_loaded = state.oracle.is_available();
    Json(json!({ "status": "ok", "model_loaded": model_loaded }))
}

/// POST /api/predict
async fn predict_handler(
    State(state): State<Arc<AppState>>,
    Json(input): Json<MatchInput>,
) -> Result<Json<Evaluation>, (StatusCode, Json<Value>)> {
    input
        .into_state(&state.catalog)
        .map_err(PredictError::from)
        .and_then(|match_state| evaluate(&match_state, &state.oracle))
        .map(Json)
        .map_err(|e| {
            warn!("Prediction request rejected: {}", e);
            (status_for(&e), Json(json!({ "error": e.to_string() })))
        })
}

fn status_for(err: &PredictError) -> StatusCode {
    match err {
        PredictError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
        PredictError::Oracle(OracleError::Unavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
        PredictError::Oracle(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Embedded single-file form (HTML + CSS + JS)
const FORM_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>IPL Win Predictor</title>
<style>
  :root {
    --bg: #0f1117;
    --card: #1a1d27;
    --border: #2a2d3a;
    --accent: #6c63ff;
    --green: #00c896;
    --red: #ff4f6a;
    --text: #e0e0e0;
    --muted: #8888aa;
  }
  * { box-sizing: border-box; margin: 0; padding: 0; }
  body { background: var(--bg); color: var(--text); font-family: 'Segoe UI', system-ui, sans-serif; }
  header { display: flex; align-items: center; gap: 1rem; padding: 1rem 2rem; border-bottom: 1px solid var(--border); }
  header h1 { font-size: 1.4rem; font-weight: 700; }
  .badge { padding: .2rem .6rem; border-radius: 4px; font-size: .75rem; font-weight: 700; text-transform: uppercase; }
  .badge.ok { background: var(--green); color: #000; }
  .badge.down { background: var(--red); color: #000; }
  main { padding: 1.5rem 2rem; display: grid; gap: 1.5rem; max-width: 760px; }
  .panel { background: var(--card); border: 1px solid var(--border); border-radius: 10px; padding: 1.2rem; display: grid; gap: 1rem; }
  .row { display: grid; gap: 1rem; }
  .row.two { grid-template-columns: 1fr 1fr; }
  .row.three { grid-template-columns: 1fr 1fr 1fr; }
  @media (max-width: 640px) { .row.two, .row.three { grid-template-columns: 1fr; } }
  label { display: grid; gap: .35rem; color: var(--muted); font-size: .8rem; text-transform: uppercase; letter-spacing: .06em; }
  select, input { background: var(--bg); color: var(--text); border: 1px solid var(--border); border-radius: 6px; padding: .5rem .6rem; font-size: .95rem; }
  button { background: var(--accent); border: none; color: #fff; padding: .6rem 1.2rem; border-radius: 6px; cursor: pointer; font-size: .95rem; font-weight: 600; justify-self: start; }
  #result h2 { font-size: 1.5rem; }
  .pos { color: var(--green); }
  .neg { color: var(--red); }
  .error { color: var(--red); }
</style>
</head>
<body>
<header>
  <h1>🏏 IPL Win Predictor</h1>
  <span class="badge" id="model-badge">…</span>
</header>

<main>
  <form class="panel" id="form">
    <div class="row two">
      <label>Select the batting team <select id="batting_team"></select></label>
      <label>Select the bowling team <select id="bowling_team"></select></label>
    </div>
    <label>Select the city where the match is being played <select id="city"></select></label>
    <label>Target <input id="target" type="number" step="1" value="0"></label>
    <div class="row three">
      <label>Score <input id="score" type="number" step="1" value="0"></label>
      <label>Overs Completed <input id="overs" type="number" step="1" value="0"></label>
      <label>Wickets Fallen <input id="wickets" type="number" step="1" value="0"></label>
    </div>
    <button type="submit">Predict Probability</button>
  </form>

  <div class="panel" id="result" hidden></div>
</main>

<script>
const el = (tag, text, cls) => {
  const node = document.createElement(tag);
  node.textContent = text;
  if (cls) node.className = cls;
  return node;
};
const fill = (id, options) => {
  document.getElementById(id).replaceChildren(...options.map(o => el('option', o)));
};
const num = id => parseInt(document.getElementById(id).value, 10) || 0;

async function loadOptions() {
  const r = await fetch('/api/options');
  if (!r.ok) return;
  const c = await r.json();
  fill('batting_team', c.teams);
  fill('bowling_team', c.teams);
  fill('city', c.cities);
}

async function loadHealth() {
  const r = await fetch('/api/health');
  const badge = document.getElementById('model-badge');
  const h = r.ok ? await r.json() : { model_loaded: false };
  badge.textContent = h.model_loaded ? 'Model loaded' : 'Model unavailable';
  badge.className = 'badge ' + (h.model_loaded ? 'ok' : 'down');
}

async function predict(ev) {
  ev.preventDefault();
  const body = {
    batting_team: document.getElementById('batting_team').value,
    bowling_team: document.getElementById('bowling_team').value,
    city: document.getElementById('city').value,
    target: num('target'),
    score: num('score'),
    overs: num('overs'),
    wickets: num('wickets'),
  };
  const r = await fetch('/api/predict', {
    method: 'POST',
    headers: { 'content-type': 'application/json' },
    body: JSON.stringify(body),
  });
  const out = document.getElementById('result');
  out.hidden = false;
  const data = await r.json();
  if (!r.ok) {
    out.replaceChildren(el('p', data.error, 'error'));
    return;
  }
  const res = data.rendered;
  if (res.kind === 'status') {
    out.replaceChildren(el('h2', res.message));
  } else {
    out.replaceChildren(
      el('h2', `${res.batting_team} - ${res.win_percent}%`, 'pos'),
      el('h2', `${res.bowling_team} - ${res.loss_percent}%`, 'neg'),
    );
  }
}

document.getElementById('form').addEventListener('submit', predict);
loadOptions();
loadHealth();
</script>
</body>
</html>"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predictor::oracle::tests::sample_artifact;
    use crate::predictor::oracle::LogisticOracle;
    use axum::body::{to_bytes, Body};
    use axum::http::{Method, Request};
    use tower::ServiceExt;

    fn app_with(oracle: OracleHandle) -> Router {
        router(AppState {
            oracle: Arc::new(oracle),
            catalog: Catalog::default(),
        })
    }

    fn app() -> Router {
        let oracle = LogisticOracle::from_artifact(sample_artifact()).unwrap();
        app_with(OracleHandle::from_oracle(Arc::new(oracle)))
    }

    async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(payload) => builder
                .header("content-type", "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    fn payload(target: i32, score: i32, overs: i32, wickets: i32) -> Value {
        json!({
            "batting_team": "Mumbai Indians",
            "bowling_team": "Chennai Super Kings",
            "city": "Mumbai",
            "target": target,
            "score": score,
            "overs": overs,
            "wickets": wickets,
        })
    }

    #[tokio::test]
    async fn index_serves_the_form() {
        let response = app()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8_lossy(&bytes);
        assert!(html.contains("Predict Probability"));
        // Error messages echo user-supplied names, so nothing is parsed as markup
        assert!(!html.contains("innerHTML"));
        assert!(html.contains("textContent"));
    }

    #[tokio::test]
    async fn options_lists_sorted_catalog() {
        let (status, body) = send(app(), Method::GET, "/api/options", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["teams"][0], "Chennai Super Kings");
        assert_eq!(body["cities"].as_array().unwrap().len(), 29);
    }

    #[tokio::test]
    async fn concluded_match_returns_status() {
        let (status, body) =
            send(app(), Method::POST, "/api/predict", Some(payload(180, 190, 18, 4))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["state"], "concluded");
        assert_eq!(body["rendered"]["message"], "Mumbai Indians won the match");
    }

    #[tokio::test]
    async fn in_progress_match_returns_percentages() {
        let (status, body) =
            send(app(), Method::POST, "/api/predict", Some(payload(150, 100, 12, 3))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["state"], "predicted");
        assert_eq!(body["features"]["balls_left"], 48);
        let win = body["rendered"]["win_percent"].as_i64().unwrap();
        let loss = body["rendered"]["loss_percent"].as_i64().unwrap();
        assert!((99..=101).contains(&(win + loss)));
    }

    #[tokio::test]
    async fn invalid_input_is_unprocessable() {
        let (status, body) =
            send(app(), Method::POST, "/api/predict", Some(payload(350, 100, 12, 3))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["error"].as_str().unwrap().contains("target 350"));

        let mut unknown = payload(150, 100, 12, 3);
        unknown["city"] = json!("Lord's");
        let (status, _) = send(app(), Method::POST, "/api/predict", Some(unknown)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn extreme_numbers_are_reported_not_fatal() {
        let (status, body) = send(
            app(),
            Method::POST,
            "/api/predict",
            Some(payload(i32::MIN, i32::MIN, 12, 3)),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["error"].as_str().unwrap().contains("target"));
    }

    #[tokio::test]
    async fn missing_model_is_service_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let app = app_with(OracleHandle::from_artifact(dir.path().join("none.json")));

        let (status, body) = send(app.clone(), Method::GET, "/api/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["model_loaded"], false);

        let (status, _) =
            send(app.clone(), Method::POST, "/api/predict", Some(payload(150, 100, 12, 3))).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

        // Decided matches do not need the model
        let (status, _) =
            send(app, Method::POST, "/api/predict", Some(payload(150, 149, 20, 3))).await;
        assert_eq!(status, StatusCode::OK);
    }
}
