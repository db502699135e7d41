use crate::services::game::{store::Rooms, RoomSummary};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Errors that could occur while working with room endpoints
#[derive(Debug, Error)]
pub enum RoomsError {
    /// The provided room name was blank or too long
    #[error("Invalid room name")]
    InvalidName,
}

/// Request to create a new room
#[derive(Deserialize)]
pub struct CreateRoomRequest {
    /// Name for the room
    #[serde(alias = "name")]
    room: String,
}

#[derive(Serialize)]
pub struct CreateRoomResponse {
    /// Name of the room
    room: String,
}

/// GET /rooms
///
/// Responds with the name and number of seated players for
/// every room on the server
pub async fn get_rooms(Extension(rooms): Extension<Arc<Rooms>>) -> Json<Vec<RoomSummary>> {
    Json(rooms.list())
}

/// POST /rooms
///
/// Creates a new room with the provided name. Creating a room that
/// already exists is accepted and leaves the existing room as it is.
pub async fn create_room(
    Extension(rooms): Extension<Arc<Rooms>>,
    Json(CreateRoomRequest { room }): Json<CreateRoomRequest>,
) -> Result<(StatusCode, Json<CreateRoomResponse>), RoomsError> {
    if !Rooms::is_valid_name(&room) {
        return Err(RoomsError::InvalidName);
    }

    rooms.create(&room);

    Ok((StatusCode::CREATED, Json(CreateRoomResponse { room })))
}

/// Response implementation for rooms errors
impl IntoResponse for RoomsError {
    fn into_response(self) -> Response {
        let status_code = match &self {
            Self::InvalidName => StatusCode::BAD_REQUEST,
        };

        (status_code, self.to_string()).into_response()
    }
}

#[cfg(test)]
mod test {
    use crate::{routes::router, services::game::store::Rooms};
    use axum::{
        body::{to_bytes, Body},
        http::{header::CONTENT_TYPE, Method, Request, StatusCode},
        Extension, Router,
    };
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app(rooms: &Arc<Rooms>) -> Router {
        router().layer(Extension(rooms.clone()))
    }

    fn create_request(body: &str) -> Request<Body> {
        Request::builder()
            .uri("/rooms")
            .method(Method::POST)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(body: Body) -> Value {
        let bytes = to_bytes(body, usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_get_empty() {
        let rooms = Arc::new(Rooms::default());
        let req = Request::builder()
            .uri("/rooms")
            .method(Method::GET)
            .body(Body::empty())
            .unwrap();
        let res = app(&rooms).oneshot(req).await.unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(json_body(res.into_body()).await, json!([]));
    }

    #[tokio::test]
    async fn test_create_and_list() {
        let rooms = Arc::new(Rooms::default());

        let res = app(&rooms)
            .oneshot(create_request(r#"{"room":"alpha"}"#))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);
        assert_eq!(json_body(res.into_body()).await, json!({ "room": "alpha" }));

        // Older clients send the name field
        let res = app(&rooms)
            .oneshot(create_request(r#"{"name":"beta"}"#))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);

        let req = Request::builder()
            .uri("/rooms")
            .method(Method::GET)
            .body(Body::empty())
            .unwrap();
        let res = app(&rooms).oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(
            json_body(res.into_body()).await,
            json!([
                { "name": "alpha", "size": 0 },
                { "name": "beta", "size": 0 }
            ])
        );
    }

    /// Creating an existing room is accepted without replacing it
    #[tokio::test]
    async fn test_create_existing() {
        let rooms = Arc::new(Rooms::default());
        rooms.create("alpha");
        let existing = rooms.get("alpha").unwrap();

        let res = app(&rooms)
            .oneshot(create_request(r#"{"room":"alpha"}"#))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);
        assert_eq!(rooms.total(), 1);
        assert!(Arc::ptr_eq(&existing, &rooms.get("alpha").unwrap()));
    }

    #[tokio::test]
    async fn test_create_malformed() {
        let rooms = Arc::new(Rooms::default());

        for body in ["not json", "{}", r#"{"room": 5}"#] {
            let res = app(&rooms).oneshot(create_request(body)).await.unwrap();
            assert!(
                res.status().is_client_error(),
                "Body {body:?} responded with {}",
                res.status()
            );
        }

        let res = app(&rooms)
            .oneshot(create_request(r#"{"room":"   "}"#))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(rooms.total(), 0);
    }
}
