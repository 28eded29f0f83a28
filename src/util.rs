use actix_web::{
    error::PayloadError,
    http::{
        header::{self, HeaderMap},
        StatusCode,
    },
    web, HttpResponse,
};
use futures_util::StreamExt;
use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use serde_json::{error::Category, ser::PrettyFormatter, Map, Value};
use thiserror::Error;

/// Top-level response object, e.g. `{"movie": {...}}`.
pub type Envelope = Map<String, Value>;

pub fn envelope<T: Serialize>(key: &str, value: T) -> Result<Envelope, serde_json::Error> {
    let mut map = Envelope::new();
    map.insert(key.to_string(), serde_json::to_value(value)?);
    Ok(map)
}

/// Renders `data` as tab-indented JSON followed by a newline. `headers` are
/// inserted before the content type, replacing any value with the same name.
pub fn write_json<T: Serialize + ?Sized>(
    status: StatusCode,
    data: &T,
    headers: Option<&HeaderMap>,
) -> Result<HttpResponse, serde_json::Error> {
    let mut body = Vec::with_capacity(128);
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut body, PrettyFormatter::with_indent(b"\t"));
    data.serialize(&mut serializer)?;
    body.push(b'\n');

    let mut response = HttpResponse::build(status);
    for (name, value) in headers.into_iter().flatten() {
        response.insert_header((name.clone(), value.clone()));
    }
    response.insert_header(header::ContentType::json());
    Ok(response.body(body))
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("body must not be empty")]
    Empty,
    #[error("body contains badly-formed JSON (at character {0})")]
    Syntax(usize),
    #[error("body contains badly-formed JSON")]
    UnexpectedEof,
    #[error("body contains incorrect JSON type for field {0:?}")]
    FieldType(String),
    #[error("body contains incorrect JSON type (at character {0})")]
    Type(usize),
    #[error("{0}")]
    Invalid(String),
    #[error("failed to read request body: {0}")]
    Payload(#[from] PayloadError),
}

pub async fn read_body(mut payload: web::Payload) -> Result<web::BytesMut, DecodeError> {
    let mut body = web::BytesMut::new();
    while let Some(chunk) = payload.next().await {
        body.extend_from_slice(&chunk?);
    }
    Ok(body)
}

pub async fn read_json<T: DeserializeOwned>(payload: web::Payload) -> Result<T, DecodeError> {
    let body = read_body(payload).await?;
    decode_json(&body)
}

/// Decodes the first JSON value in `body` into `T`, turning decoder failures
/// into messages fit for the client. Anything after that value is ignored, as
/// are object keys `T` does not declare.
///
/// # Panics
///
/// When serde_json classifies the error as I/O. Decoding from a slice never
/// does, so the arm only marks the category as unhandled.
pub fn decode_json<T: DeserializeOwned>(body: &[u8]) -> Result<T, DecodeError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(DecodeError::Empty);
    }

    let mut deserializer = serde_json::Deserializer::from_slice(body);
    serde_path_to_error::deserialize(&mut deserializer).map_err(|err| {
        // Errors inside a sequence name the field holding it, not the element.
        let path = err.path().to_string();
        let field = path.split('[').next().unwrap_or_default().to_string();
        triage(body, err.inner(), Some(field).filter(|field| !field.is_empty() && field != "."))
    })
}

/// For `#[serde(deserialize_with)]`: a JSON `null` leaves the field at its
/// default instead of failing the decode.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn triage(body: &[u8], err: &serde_json::Error, field: Option<String>) -> DecodeError {
    let offset = byte_offset(body, err.line(), err.column());
    match err.classify() {
        Category::Syntax => DecodeError::Syntax(offset),
        Category::Eof => DecodeError::UnexpectedEof,
        Category::Data => {
            let message = err.to_string();
            let message = message
                .rsplit_once(" at line ")
                .map_or(message.as_str(), |(message, _)| message);
            if message.starts_with("invalid type:") || message.starts_with("invalid value:") {
                return match field {
                    Some(field) => DecodeError::FieldType(field),
                    None => DecodeError::Type(offset),
                };
            }
            DecodeError::Invalid(message.to_string())
        }
        Category::Io => panic!("invalid JSON decode destination: {err}"),
    }
}

/// serde_json reports 1-based line and byte column; clients get a byte offset.
fn byte_offset(body: &[u8], line: usize, column: usize) -> usize {
    let preceding: usize = body
        .split(|b| *b == b'\n')
        .take(line.saturating_sub(1))
        .map(|line| line.len() + 1)
        .sum();
    preceding + column
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid id parameter")]
pub struct InvalidIdError;

pub fn read_id_param(raw: &str) -> Result<i64, InvalidIdError> {
    match raw.parse::<i64>() {
        Ok(id) if id >= 1 => Ok(id),
        _ => Err(InvalidIdError),
    }
}
