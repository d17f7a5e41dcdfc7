//! API documentation UI: `/swagger/doc.json` (OpenAPI 3) and a Swagger UI page.

use axum::{
    Json,
    extract::State,
    response::{Html, Redirect},
};
use serde_json::{Value, json};

use crate::state::AppState;

const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <title>API Gateway - Swagger UI</title>
  <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css" />
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
  <script>
    window.ui = SwaggerUIBundle({ url: "/swagger/doc.json", dom_id: "#swagger-ui" });
  </script>
</body>
</html>
"##;

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn root() -> Redirect {
    Redirect::permanent("/swagger/index.html")
}

pub async fn doc(State(state): State<AppState>) -> Json<Value> {
    Json(openapi(state.version))
}

fn envelope(data: Value) -> Value {
    object(json!({
        "code": {"type": "string", "example": "SUCCESS"},
        "message": {"type": "string"},
        "data": data
    }))
}

fn json_body(schema: Value) -> Value {
    json!({"content": {"application/json": {"schema": schema}}})
}

fn object(properties: Value) -> Value {
    json!({"type": "object", "properties": properties})
}

fn openapi(version: &str) -> Value {
    let error = json!({"$ref": "#/components/schemas/ErrorResponse"});
    let error_response = |description: &str| {
        let mut r = json_body(error.clone());
        r["description"] = json!(description);
        r
    };
    let ok = |schema: Value| {
        let mut r = json_body(schema);
        r["description"] = json!("OK");
        r
    };
    let bearer = json!([{"BearerAuth": []}]);

    let health = json!({"get": {
        "tags": ["system"],
        "summary": "Health check",
        "responses": {"200": ok(object(json!({
            "status": {"type": "string", "example": "ok"},
            "version": {"type": "string"},
            "timestamp": {"type": "string", "format": "date-time"}
        })))}
    }});

    let docs = json!({"get": {
        "tags": ["system"],
        "summary": "User manual (markdown)",
        "responses": {
            "200": ok(object(json!({"content": {"type": "string"}}))),
            "404": error_response("Documentation not found")
        }
    }});

    let login_body = json_body(json!({
        "type": "object",
        "required": ["username", "password"],
        "properties": {"username": {"type": "string"}, "password": {"type": "string"}}
    }));
    let login = json!({"post": {
        "tags": ["auth"],
        "summary": "Login (test credentials: admin/admin123)",
        "requestBody": login_body,
        "responses": {
            "200": ok(envelope(object(json!({
                "token": {"type": "string"},
                "expires_at": {"type": "string", "format": "date-time"}
            })))),
            "400": error_response("Malformed request"),
            "401": error_response("Invalid credentials")
        }
    }});

    let me = json!({"get": {
        "tags": ["auth"],
        "summary": "Current user",
        "security": bearer.clone(),
        "responses": {
            "200": ok(envelope(object(json!({
                "user_id": {"type": "string"},
                "request_id": {"type": "string"}
            })))),
            "401": error_response("Unauthorized")
        }
    }});

    let ping = json!({"get": {
        "tags": ["test"],
        "summary": "Ping",
        "security": bearer.clone(),
        "responses": {
            "200": ok(envelope(object(json!({
                "message": {"type": "string"},
                "request_id": {"type": "string"}
            })))),
            "401": error_response("Unauthorized")
        }
    }});

    let echo_body = json_body(json!({
        "type": "object",
        "required": ["message"],
        "properties": {"message": {"type": "string"}}
    }));
    let echo = json!({"post": {
        "tags": ["test"],
        "summary": "Echo a message back, reversed",
        "security": bearer,
        "requestBody": echo_body,
        "responses": {
            "200": ok(envelope(object(json!({
                "original": {"type": "string"},
                "reversed": {"type": "string"},
                "length": {"type": "integer"},
                "request_id": {"type": "string"}
            })))),
            "400": error_response("Malformed request"),
            "401": error_response("Unauthorized")
        }
    }});

    let components = json!({
        "securitySchemes": {
            "BearerAuth": {"type": "http", "scheme": "bearer", "bearerFormat": "JWT"}
        },
        "schemas": {
            "ErrorResponse": object(json!({
                "code": {"type": "string", "example": "VALIDATION_ERROR"},
                "message": {"type": "string"},
                "data": {"nullable": true}
            }))
        }
    });

    json!({
        "openapi": "3.0.3",
        "info": {
            "title": "API Gateway",
            "version": version,
            "description": "Minimal HTTP API gateway with JWT auth, request tracing and structured logging."
        },
        "components": components,
        "paths": {
            "/health": health,
            "/api/docs": docs,
            "/api/v1/auth/login": login,
            "/api/v1/auth/me": me,
            "/api/v1/ping": ping,
            "/api/v1/echo": echo
        }
    })
}
