//! Decoding of inbound request data.
//!
//! GET requests carry their data as a base64url-encoded JSON object in a
//! single query parameter; every other method sends the JSON object as the
//! body. Decoding never fails: anything that is not a JSON object after
//! decoding becomes an empty map.

use actix_web::http::Method;
use actix_web::HttpRequest;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, Engine as _, GeneralPurpose, GeneralPurposeConfig};
use serde_json::{Map, Value};
use tracing::{debug, trace};

/// Key/value object decoded from a request
pub type RequestData = Map<String, Value>;

/// Query parameter read by default on GET requests
pub const DEFAULT_QUERY_PARAM: &str = "data";

const LENIENT_PADDING: GeneralPurposeConfig =
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent);

/// base64url, with or without trailing `=`
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, LENIENT_PADDING);

/// Standard alphabet, accepted for clients that forget to use base64url
const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, LENIENT_PADDING);

/// Decodes a base64url-encoded JSON object
///
/// # Arguments
/// * `value` - The query parameter value, already form-decoded
///
/// # Returns
/// * `RequestData` - The decoded object, or an empty map on any failure
pub fn decode_query_param(value: &str) -> RequestData {
    if value.trim().is_empty() {
        return RequestData::new();
    }

    // Form decoding of the query string turns an unescaped standard-alphabet `+` into a space.
    let restored = value.replace(' ', "+");
    let value = restored.trim();

    let bytes = match URL_SAFE_LENIENT
        .decode(value)
        .or_else(|_| STANDARD_LENIENT.decode(value))
    {
        Ok(bytes) => bytes,
        Err(e) => {
            debug!("Query parameter is not valid base64: {}", e);
            return RequestData::new();
        }
    };

    decode_json_body(&bytes)
}

/// Decodes a JSON object from a request body
///
/// # Arguments
/// * `body` - Raw body bytes
///
/// # Returns
/// * `RequestData` - The decoded object, or an empty map on any failure
pub fn decode_json_body(body: &[u8]) -> RequestData {
    if body.iter().all(u8::is_ascii_whitespace) {
        trace!("Empty request body");
        return RequestData::new();
    }

    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => map,
        Ok(other) => {
            debug!("Request data is JSON but not an object: {}", json_kind(&other));
            RequestData::new()
        }
        Err(e) => {
            debug!("Request data is not valid JSON: {}", e);
            RequestData::new()
        }
    }
}

/// Decodes the data object carried by `req`
///
/// GET and HEAD read the query parameter `param`; other methods decode `body`.
pub fn parse_request(req: &HttpRequest, body: &[u8], param: &str) -> RequestData {
    let method = req.method();
    if *method != Method::GET && *method != Method::HEAD {
        return decode_json_body(body);
    }

    let encoded = url::form_urlencoded::parse(req.query_string().as_bytes())
        .find(|(key, _)| key == param)
        .map(|(_, value)| value.into_owned());

    match encoded {
        Some(value) => decode_query_param(&value),
        None => {
            debug!("Query parameter '{}' missing", param);
            RequestData::new()
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;
    use base64::engine::general_purpose::{STANDARD, URL_SAFE, URL_SAFE_NO_PAD};
    use serde_json::json;

    #[test]
    fn decodes_unpadded_base64url() {
        let raw = r#"{"url":"example.com/?a=>>"}"#;
        let encoded = URL_SAFE_NO_PAD.encode(raw);
        let data = decode_query_param(&encoded);
        assert_eq!(data.get("url"), Some(&json!("example.com/?a=>>")));
    }

    #[test]
    fn decodes_padded_and_standard_alphabet() {
        let raw = r#"{"n":1}"#;
        assert_eq!(decode_query_param(&URL_SAFE.encode(raw)).get("n"), Some(&json!(1)));
        assert_eq!(decode_query_param(&STANDARD.encode(raw)).get("n"), Some(&json!(1)));
    }

    #[test]
    fn invalid_query_values_yield_empty() {
        assert!(decode_query_param("").is_empty());
        assert!(decode_query_param("!!!not base64!!!").is_empty());
        // Valid base64, invalid UTF-8 / JSON.
        assert!(decode_query_param(&URL_SAFE_NO_PAD.encode([0xffu8, 0xfe])).is_empty());
        // Valid JSON, not an object.
        assert!(decode_query_param(&URL_SAFE_NO_PAD.encode("[1,2]")).is_empty());
    }

    #[test]
    fn json_body_decoding() {
        let data = decode_json_body(br#"{"url":"example.com","tags":["a"]}"#);
        assert_eq!(data.get("url"), Some(&json!("example.com")));
        assert_eq!(data.get("tags"), Some(&json!(["a"])));

        assert!(decode_json_body(b"").is_empty());
        assert!(decode_json_body(b"  \n").is_empty());
        assert!(decode_json_body(b"{broken").is_empty());
        assert!(decode_json_body(b"\"just a string\"").is_empty());
    }

    #[test]
    fn get_reads_named_query_parameter() {
        let encoded = URL_SAFE_NO_PAD.encode(r#"{"url":"example.com"}"#);
        let req = TestRequest::get()
            .uri(&format!("/normalize?other=1&data={}", encoded))
            .to_http_request();
        let data = parse_request(&req, b"", DEFAULT_QUERY_PARAM);
        assert_eq!(data.get("url"), Some(&json!("example.com")));

        let missing = parse_request(&req, b"", "d");
        assert!(missing.is_empty());
    }

    #[test]
    fn get_accepts_standard_alphabet_with_plus() {
        let raw = r#"{"url":"example.com/~~~>"}"#;
        let encoded = STANDARD.encode(raw);
        assert!(encoded.contains('+'));

        let req = TestRequest::get()
            .uri(&format!("/normalize?data={}", encoded))
            .to_http_request();
        let data = parse_request(&req, b"", DEFAULT_QUERY_PARAM);
        assert_eq!(data.get("url"), Some(&json!("example.com/~~~>")));
    }

    #[test]
    fn head_reads_query_parameter() {
        let encoded = URL_SAFE_NO_PAD.encode(r#"{"url":"x"}"#);
        let req = TestRequest::default()
            .method(Method::HEAD)
            .uri(&format!("/normalize?data={}", encoded))
            .to_http_request();
        assert_eq!(parse_request(&req, b"", DEFAULT_QUERY_PARAM).get("url"), Some(&json!("x")));
    }

    #[test]
    fn get_ignores_body() {
        let req = TestRequest::get().uri("/normalize").to_http_request();
        assert!(parse_request(&req, br#"{"url":"x"}"#, DEFAULT_QUERY_PARAM).is_empty());
    }

    #[test]
    fn post_reads_body() {
        let req = TestRequest::post().uri("/normalize?data=ignored").to_http_request();
        let data = parse_request(&req, br#"{"url":"x"}"#, DEFAULT_QUERY_PARAM);
        assert_eq!(data.get("url"), Some(&json!("x")));
    }
}
