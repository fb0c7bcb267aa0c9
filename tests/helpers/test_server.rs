// Test Server Helpers
//
// Spawns a real HTTP server, via actix-test, that answers the libSQL pipeline
// protocol, so the remote store client is exercised over an actual socket.

use actix_web::{web, App, HttpRequest, HttpResponse};
use serde_json::{json, Value};

pub use actix_test::TestServer;

/// Bearer token the stand-in pipeline endpoint accepts
pub const PIPELINE_TOKEN: &str = "test-auth-token";

/// Start a server exposing `POST /v2/pipeline`
///
/// # Behavior
/// - Requests without `Authorization: Bearer PIPELINE_TOKEN` get 401
/// - Statements mentioning `missing_table` get a statement-level error result
/// - Statements starting with `UPDATE` report 3 affected rows
/// - Statements with arguments return one row echoing the first argument as `id`
/// - Any other statement returns two rows, `id` 1 and 2
pub fn spawn_pipeline_server() -> TestServer {
    actix_test::start(|| App::new().route("/v2/pipeline", web::post().to(pipeline)))
}

/// Base URL to hand to `LibsqlClient::new`
pub fn pipeline_base_url(srv: &TestServer) -> String {
    srv.url("/")
}

async fn pipeline(req: HttpRequest, body: web::Json<Value>) -> HttpResponse {
    let authorized = req
        .headers()
        .get("authorization")
        .and_then(|h| h.to_str().ok())
        == Some(format!("Bearer {}", PIPELINE_TOKEN).as_str());
    if !authorized {
        return HttpResponse::Unauthorized().body("invalid auth token");
    }

    let stmt = &body["requests"][0]["stmt"];
    let sql = stmt["sql"].as_str().unwrap_or_default();

    if sql.contains("missing_table") {
        return HttpResponse::Ok().json(json!({
            "baton": null,
            "base_url": null,
            "results": [
                {"type": "error", "error": {"message": "no such table: missing_table", "code": "SQLITE_ERROR"}},
                {"type": "ok", "response": {"type": "close"}}
            ]
        }));
    }

    let args = stmt["args"].as_array().cloned().unwrap_or_default();
    let (rows, affected) = if sql.trim_start().starts_with("UPDATE") {
        (json!([]), 3)
    } else if let Some(first) = args.first() {
        (json!([[first]]), 0)
    } else {
        (
            json!([
                [{"type": "integer", "value": "1"}],
                [{"type": "integer", "value": "2"}]
            ]),
            0,
        )
    };

    HttpResponse::Ok().json(json!({
        "baton": null,
        "base_url": null,
        "results": [
            {"type": "ok", "response": {"type": "execute", "result": {
                "cols": [{"name": "id", "decltype": "INTEGER"}],
                "rows": rows,
                "affected_row_count": affected,
                "last_insert_rowid": null
            }}},
            {"type": "ok", "response": {"type": "close"}}
        ]
    }))
}
