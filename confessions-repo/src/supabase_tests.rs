//! Supabase adapter tests against a local stub of the PostgREST endpoint.

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        Router,
        extract::State,
        http::{HeaderMap, StatusCode, header},
        response::{IntoResponse, Response},
        routing::post,
    };
    use chrono::{TimeZone, Utc};
    use tokio::net::TcpListener;

    use confessions_types::{
        ConfessionId, ConfessionStore, ConfessionText, Credentials, NewConfession, RepoError,
        StoreConnector,
    };

    use crate::SupabaseConnector;

    /// One request as seen by the stub.
    #[derive(Debug, Clone)]
    struct Captured {
        apikey: Option<String>,
        authorization: Option<String>,
        prefer: Option<String>,
        body: serde_json::Value,
    }

    #[derive(Clone)]
    struct Stub {
        status: StatusCode,
        body: &'static str,
        calls: Arc<Mutex<Vec<Captured>>>,
    }

    fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    }

    async fn insert_handler(State(stub): State<Stub>, headers: HeaderMap, body: String) -> Response {
        stub.calls.lock().unwrap().push(Captured {
            apikey: header_value(&headers, "apikey"),
            authorization: header_value(&headers, "authorization"),
            prefer: header_value(&headers, "prefer"),
            body: serde_json::from_str(&body).unwrap_or(serde_json::Value::Null),
        });

        (
            stub.status,
            [(header::CONTENT_TYPE, "application/json")],
            stub.body,
        )
            .into_response()
    }

    /// Starts a stub on an ephemeral port and returns its base URL.
    async fn spawn_stub(status: StatusCode, body: &'static str) -> (String, Arc<Mutex<Vec<Captured>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let stub = Stub {
            status,
            body,
            calls: calls.clone(),
        };

        let app = Router::new()
            .route("/rest/v1/confessions", post(insert_handler))
            .with_state(stub);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{}", addr), calls)
    }

    fn confession(text: &str) -> NewConfession {
        let ts = Utc.with_ymd_and_hms(2024, 4, 3, 10, 15, 30).unwrap();
        NewConfession::at(ConfessionText::parse(text).unwrap(), ts)
    }

    fn connector() -> SupabaseConnector {
        SupabaseConnector::new().unwrap()
    }

    #[tokio::test]
    async fn test_insert_sends_one_row_with_auth_headers() {
        let (url, calls) = spawn_stub(StatusCode::CREATED, r#"[{"id": 17}]"#).await;
        let store = connector()
            .connect(&Credentials::new(&url, "eyJtest"))
            .unwrap();

        let inserted = store.insert(confession("  I lied  ")).await.unwrap();

        assert_eq!(inserted.id, Some(ConfessionId::Int(17)));

        let calls = calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        let call = &calls[0];
        assert_eq!(call.apikey.as_deref(), Some("eyJtest"));
        assert_eq!(call.authorization.as_deref(), Some("Bearer eyJtest"));
        assert_eq!(call.prefer.as_deref(), Some("return=representation"));
        assert_eq!(
            call.body,
            serde_json::json!([{
                "confession": "I lied",
                "created_at": "2024-04-03T10:15:30.000Z"
            }])
        );
    }

    #[tokio::test]
    async fn test_insert_with_uuid_id() {
        let (url, _calls) = spawn_stub(
            StatusCode::CREATED,
            r#"[{"id": "6f1c2a44-4a0e-4cf1-9d4e-1b0b6b8b2f11", "confession": "x"}]"#,
        )
        .await;
        let store = connector().connect(&Credentials::new(&url, "sb_key")).unwrap();

        let inserted = store.insert(confession("x")).await.unwrap();

        assert_eq!(
            inserted.id,
            Some(ConfessionId::Text("6f1c2a44-4a0e-4cf1-9d4e-1b0b6b8b2f11".into()))
        );
    }

    #[tokio::test]
    async fn test_insert_without_representation_still_succeeds() {
        let (url, _calls) = spawn_stub(StatusCode::CREATED, "").await;
        let store = connector().connect(&Credentials::new(&url, "sb_key")).unwrap();

        let inserted = store.insert(confession("x")).await.unwrap();

        assert_eq!(inserted.id, None);
    }

    #[tokio::test]
    async fn test_rejection_carries_store_message() {
        let (url, calls) = spawn_stub(
            StatusCode::CONFLICT,
            r#"{"code":"23505","details":null,"hint":null,"message":"duplicate key value violates unique constraint \"confessions_pkey\""}"#,
        )
        .await;
        let store = connector().connect(&Credentials::new(&url, "eyJtest")).unwrap();

        let result = store.insert(confession("again")).await;

        match result {
            Err(RepoError::Rejected(msg)) => assert_eq!(
                msg,
                "duplicate key value violates unique constraint \"confessions_pkey\""
            ),
            other => panic!("expected rejection, got {:?}", other),
        }
        assert_eq!(calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_rejection_without_message_is_empty() {
        let (url, _calls) = spawn_stub(StatusCode::INTERNAL_SERVER_ERROR, "").await;
        let store = connector().connect(&Credentials::new(&url, "eyJtest")).unwrap();

        let result = store.insert(confession("x")).await;

        assert!(matches!(result, Err(RepoError::Rejected(msg)) if msg.is_empty()));
    }

    #[tokio::test]
    async fn test_unreachable_store_is_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let store = connector()
            .connect(&Credentials::new(format!("http://{}", addr), "eyJtest"))
            .unwrap();

        let result = store.insert(confession("x")).await;

        assert!(matches!(result, Err(RepoError::Transport(msg)) if !msg.is_empty()));
    }
}
