use rocket::Request;
use rocket::http::{ContentType, Status};
use rocket::response::{self, Responder, Response};
use rocket_okapi::okapi::Map;
use rocket_okapi::okapi::openapi3::{MediaType, Response as OpenApiResponse, Responses};
use rocket_okapi::okapi::schemars::JsonSchema;
use rocket_okapi::r#gen::OpenApiGenerator;
use rocket_okapi::response::OpenApiResponderInner;
use serde::{Deserialize, Serialize};
use std::io::Cursor;

/// Envelope for every API payload. `data` is always present on success,
/// explicitly `null` when a lookup matched nothing, so clients can tell
/// "no such listing" apart from a malformed response.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        ApiResponse {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn success_with_message(message: impl Into<String>, data: T) -> Self {
        ApiResponse {
            success: true,
            message: Some(message.into()),
            data: Some(data),
        }
    }

    /// Successful lookup that may have matched nothing. An unknown listing
    /// answers `data: null`, not an error status.
    pub fn found_or_null(data: Option<T>) -> Self {
        ApiResponse {
            success: true,
            message: None,
            data,
        }
    }

    fn failure(message: String) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            message: Some(message),
            data: None,
        }
    }
}

/// Failures that surface to a client. Read paths in this API degrade
/// instead of erroring (a dead review feed becomes empty, an unknown
/// listing becomes null), so an ApiError is reserved for what must not be
/// silent: a request we cannot use, an approval write that did not land,
/// or the ratings provider refusing a lookup.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Storage(String),
    Upstream(String),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn storage(message: impl Into<String>) -> Self {
        ApiError::Storage(message.into())
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        ApiError::Upstream(message.into())
    }

    fn status(&self) -> Status {
        match self {
            ApiError::BadRequest(_) => Status::BadRequest,
            ApiError::Storage(_) => Status::InternalServerError,
            ApiError::Upstream(_) => Status::BadGateway,
        }
    }

    fn into_message(self) -> String {
        match self {
            ApiError::BadRequest(m) | ApiError::Storage(m) | ApiError::Upstream(m) => m,
        }
    }
}

impl<'r> Responder<'r, 'static> for ApiError {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'static> {
        let status = self.status();
        let body = serde_json::to_string(&ApiResponse::<()>::failure(self.into_message()))
            .unwrap_or_else(|_| {
                r#"{"success":false,"message":"Internal error","data":null}"#.to_string()
            });

        Response::build()
            .status(status)
            .header(ContentType::JSON)
            .sized_body(body.len(), Cursor::new(body))
            .ok()
    }
}

impl OpenApiResponderInner for ApiError {
    fn responses(generator: &mut OpenApiGenerator) -> rocket_okapi::Result<Responses> {
        let schema = generator.json_schema::<ApiResponse<()>>();

        let mut content = Map::new();
        content.insert(
            "application/json".to_owned(),
            MediaType {
                schema: Some(schema),
                ..Default::default()
            },
        );

        let mut responses = Responses::default();

        for (code, description) in [
            ("400", "Bad request"),
            ("500", "Approval write failed"),
            ("502", "Ratings provider unavailable"),
        ] {
            responses.responses.insert(
                code.to_string(),
                rocket_okapi::okapi::openapi3::RefOr::Object(OpenApiResponse {
                    description: description.to_string(),
                    content: content.clone(),
                    ..Default::default()
                }),
            );
        }

        Ok(responses)
    }
}
