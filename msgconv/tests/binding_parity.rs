//! Both bindings must behave identically for identical input.

use bytes::Bytes;
use http::header::{ACCEPT, CACHE_CONTROL, CONTENT_LENGTH, CONTENT_TYPE};
use http::{HeaderMap, HeaderName, HeaderValue, Method, Request, Response, Uri};
use msgconv::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
struct Account {
    #[prost(string, tag = "1")]
    #[serde(default)]
    id: String,
    #[prost(int64, tag = "2")]
    #[serde(default)]
    balance: i64,
    #[prost(string, repeated, tag = "3")]
    #[serde(default)]
    tags: Vec<String>,
    #[prost(bool, tag = "4")]
    #[serde(default)]
    frozen: bool,
}

fn account() -> Account {
    Account {
        id: "acct-42".into(),
        balance: -1250,
        tags: vec!["savings".into(), "joint".into()],
        frozen: true,
    }
}

/// Plain description of a request or response, independent of binding.
#[derive(Debug, PartialEq)]
struct Parts {
    method: Option<Method>,
    uri: Option<String>,
    headers: HeaderMap,
    body: Vec<u8>,
}

type Headers = [(HeaderName, &'static str)];

/// Build and inspect a binding's own request/response types.
trait Binding: MessageConverter {
    fn build_request(method: Method, headers: &Headers, body: &[u8]) -> Self::Request;
    fn build_response(headers: &Headers, body: &[u8]) -> Self::Response;
    fn request_parts(request: &Self::Request) -> Parts;
    fn response_parts(response: &Self::Response) -> Parts;
}

impl Binding for HttpConverter {
    fn build_request(method: Method, headers: &Headers, body: &[u8]) -> Request<Bytes> {
        let mut builder = Request::builder().method(method).uri("/");
        for (name, value) in headers {
            builder = builder.header(name.clone(), *value);
        }
        builder.body(Bytes::copy_from_slice(body)).unwrap()
    }

    fn build_response(headers: &Headers, body: &[u8]) -> Response<Bytes> {
        let mut builder = Response::builder();
        for (name, value) in headers {
            builder = builder.header(name.clone(), *value);
        }
        builder.body(Bytes::copy_from_slice(body)).unwrap()
    }

    fn request_parts(request: &Request<Bytes>) -> Parts {
        Parts {
            method: Some(request.method().clone()),
            uri: Some(request.uri().to_string()),
            headers: request.headers().clone(),
            body: request.body().to_vec(),
        }
    }

    fn response_parts(response: &Response<Bytes>) -> Parts {
        assert_eq!(response.status(), http::StatusCode::OK);
        Parts {
            method: None,
            uri: None,
            headers: response.headers().clone(),
            body: response.body().to_vec(),
        }
    }
}

impl Binding for ExchangeConverter {
    fn build_request(method: Method, headers: &Headers, body: &[u8]) -> ExchangeRequest {
        let mut request = ExchangeRequest::new(method, Uri::from_static("/"));
        for (name, value) in headers {
            request
                .headers_mut()
                .append(name.clone(), HeaderValue::from_static(*value));
        }
        request.set_body(body);
        request
    }

    fn build_response(headers: &Headers, body: &[u8]) -> ExchangeResponse {
        let mut response = ExchangeResponse::default();
        for (name, value) in headers {
            response
                .headers_mut()
                .append(name.clone(), HeaderValue::from_static(*value));
        }
        response.set_body(body);
        response
    }

    fn request_parts(request: &ExchangeRequest) -> Parts {
        Parts {
            method: Some(request.method().clone()),
            uri: Some(request.uri().to_string()),
            headers: request.headers().clone(),
            body: request.body().to_vec(),
        }
    }

    fn response_parts(response: &ExchangeResponse) -> Parts {
        assert_eq!(response.status(), http::StatusCode::OK);
        Parts {
            method: None,
            uri: None,
            headers: response.headers().clone(),
            body: response.body().to_vec(),
        }
    }
}

/// Outcome of a decode, reduced to something comparable across bindings.
#[derive(Debug, PartialEq)]
enum Outcome {
    Decoded(Account),
    Unsupported,
    Codec,
    Other(String),
}

fn outcome(result: Result<(), ConvertError>, decoded: Account) -> Outcome {
    match result {
        Ok(()) => Outcome::Decoded(decoded),
        Err(e) if e.is_unsupported_media_type() => Outcome::Unsupported,
        Err(e) if e.is_codec() => Outcome::Codec,
        Err(e) => Outcome::Other(e.to_string()),
    }
}

fn decode_request_with<C: Binding>(
    converter: &C,
    method: Method,
    headers: &Headers,
    body: &[u8],
) -> Outcome {
    let mut request = C::build_request(method, headers, body);
    let mut decoded = Account::default();
    let result = converter.decode_request(&mut request, &mut decoded);
    outcome(result, decoded)
}

fn decode_response_with<C: Binding>(
    converter: &C,
    headers: &Headers,
    body: &[u8],
) -> Outcome {
    let mut response = C::build_response(headers, body);
    let mut decoded = Account::default();
    let result = converter.decode_response(&mut response, &mut decoded);
    outcome(result, decoded)
}

fn json_body() -> Vec<u8> {
    serde_json::to_vec(&account()).unwrap()
}

fn proto_body() -> Vec<u8> {
    prost::Message::encode_to_vec(&account())
}

#[test]
fn encode_request_is_identical() {
    let http = HttpConverter::new();
    let exchange = ExchangeConverter::new();

    for media_type in MediaType::ALL {
        for method in [Method::POST, Method::PUT, Method::PATCH] {
            let a = http
                .encode_request(method.clone(), "http://api.local/accounts", media_type, &account())
                .unwrap();
            let b = exchange
                .encode_request(method.clone(), "http://api.local/accounts", media_type, &account())
                .unwrap();
            assert_eq!(
                HttpConverter::request_parts(&a),
                ExchangeConverter::request_parts(&b),
                "{method} {media_type}"
            );
        }
    }
}

#[test]
fn encode_response_is_identical() {
    let http = HttpConverter::new();
    let exchange = ExchangeConverter::new();

    for media_type in MediaType::ALL {
        let a = http.encode_response(media_type, &account()).unwrap();
        let b = exchange.encode_response(media_type, &account()).unwrap();
        assert_eq!(
            HttpConverter::response_parts(&a),
            ExchangeConverter::response_parts(&b),
        );
    }
}

#[test]
fn encoded_headers_follow_wire_format() {
    fn check<C: Binding>(converter: &C) {
        for media_type in MediaType::ALL {
            let request = converter
                .encode_request(Method::POST, "/accounts", media_type, &account())
                .unwrap();
            let parts = C::request_parts(&request);
            assert_eq!(parts.headers[ACCEPT], media_type.as_str());
            assert_eq!(
                parts.headers[CONTENT_TYPE],
                format!("{}; charset=UTF-8", media_type.as_str()).as_str()
            );
            assert_eq!(parts.headers[CACHE_CONTROL], "no-cache");
            assert_eq!(
                parts.headers[CONTENT_LENGTH],
                parts.body.len().to_string().as_str()
            );
        }
    }
    check(&HttpConverter::new());
    check(&ExchangeConverter::new());
}

#[test]
fn round_trip_through_both_bindings() {
    fn round_trip<C: Binding>(converter: &C) {
        for media_type in MediaType::ALL {
            let mut request = converter
                .encode_request(Method::POST, "/accounts", media_type, &account())
                .unwrap();
            let mut decoded = Account::default();
            converter.decode_request(&mut request, &mut decoded).unwrap();
            assert_eq!(decoded, account());

            let mut response = converter.encode_response(media_type, &account()).unwrap();
            let mut decoded = Account::default();
            converter.decode_response(&mut response, &mut decoded).unwrap();
            assert_eq!(decoded, account());
        }
    }
    round_trip(&HttpConverter::new());
    round_trip(&ExchangeConverter::new());
}

#[test]
fn decode_request_outcomes_match() {
    let http = HttpConverter::new();
    let exchange = ExchangeConverter::new();
    let json = json_body();
    let proto = proto_body();

    let cases: Vec<(Method, Vec<(HeaderName, &'static str)>, &[u8], Outcome)> = vec![
        (
            Method::POST,
            vec![(ACCEPT, "application/json; charset=UTF-8")],
            &json[..],
            Outcome::Decoded(account()),
        ),
        (
            Method::PUT,
            vec![(ACCEPT, "application/x-protobuf")],
            &proto[..],
            Outcome::Decoded(account()),
        ),
        // Content-Type is not consulted for requests.
        (
            Method::POST,
            vec![(CONTENT_TYPE, "application/json")],
            &json[..],
            Outcome::Unsupported,
        ),
        (Method::POST, vec![(ACCEPT, "text/plain")], &json[..], Outcome::Unsupported),
        (
            Method::POST,
            vec![(ACCEPT, "application/json")],
            &b"{not json"[..],
            Outcome::Codec,
        ),
        (
            Method::POST,
            vec![(ACCEPT, "application/x-protobuf")],
            &[0x0a_u8, 0x7f][..],
            Outcome::Codec,
        ),
        // No body expected: nothing is inspected.
        (
            Method::GET,
            vec![(ACCEPT, "text/plain")],
            &b"{not json"[..],
            Outcome::Decoded(Account::default()),
        ),
        (
            Method::DELETE,
            vec![],
            &[0xff_u8][..],
            Outcome::Decoded(Account::default()),
        ),
    ];

    for (method, headers, body, expected) in cases {
        let a = decode_request_with(&http, method.clone(), &headers, body);
        let b = decode_request_with(&exchange, method.clone(), &headers, body);
        assert_eq!(a, b, "{method} {headers:?}");
        assert_eq!(a, expected, "{method} {headers:?}");
    }
}

#[test]
fn decode_response_outcomes_match() {
    let http = HttpConverter::new();
    let exchange = ExchangeConverter::new();
    let json = json_body();
    let proto = proto_body();

    let cases: Vec<(Vec<(HeaderName, &'static str)>, &[u8], Outcome)> = vec![
        (
            vec![(CONTENT_TYPE, "application/json; charset=UTF-8")],
            &json[..],
            Outcome::Decoded(account()),
        ),
        (
            vec![(CONTENT_TYPE, "application/x-protobuf; charset=UTF-8")],
            &proto[..],
            Outcome::Decoded(account()),
        ),
        // Accept is not consulted for responses.
        (vec![(ACCEPT, "application/json")], &json[..], Outcome::Unsupported),
        (
            vec![(CONTENT_TYPE, "text/plain; charset=UTF-8")],
            &json[..],
            Outcome::Unsupported,
        ),
        (
            vec![(CONTENT_TYPE, "application/json; charset=UTF-8; q=1")],
            &json[..],
            Outcome::Unsupported,
        ),
        // Well-formed JSON of the wrong shape is still a codec failure.
        (vec![(CONTENT_TYPE, "application/json")], &b"[1]"[..], Outcome::Codec),
        (
            vec![(CONTENT_TYPE, "application/json")],
            &b"\"text\""[..],
            Outcome::Codec,
        ),
    ];

    for (headers, body, expected) in cases {
        let a = decode_response_with(&http, &headers, body);
        let b = decode_response_with(&exchange, &headers, body);
        assert_eq!(a, b, "{headers:?}");
        assert_eq!(a, expected, "{headers:?}");
    }
}

#[test]
fn capability_queries_match() {
    let configs = [
        ConverterConfig::default(),
        ConverterConfig::builder()
            .media_types([MediaType::Protobuf])
            .build()
            .unwrap(),
        ConverterConfig::builder()
            .media_types(std::iter::empty())
            .build()
            .unwrap(),
    ];
    for config in configs {
        let http = HttpConverter::with_config(config.clone());
        let exchange = ExchangeConverter::with_config(config.clone());
        for m in MediaType::ALL {
            assert_eq!(http.can_read(m), http.can_write(m));
            assert_eq!(http.can_read(m), exchange.can_read(m));
            assert_eq!(exchange.can_read(m), exchange.can_write(m));
            assert_eq!(http.can_read(m), config.supports(m));

            let a = http.media_type(m.as_str()).ok();
            let b = exchange.media_type(m.as_str()).ok();
            assert_eq!(a, b);
            assert_eq!(a.is_some(), config.supports(m));
        }
    }
}

#[test]
fn unsupported_encode_produces_nothing() {
    let config = ConverterConfig::builder()
        .media_types([MediaType::Json])
        .build()
        .unwrap();
    let http = HttpConverter::with_config(config.clone());
    let exchange = ExchangeConverter::with_config(config);

    let err = http
        .encode_request(Method::POST, "/", MediaType::Protobuf, &account())
        .unwrap_err();
    assert!(err.is_unsupported_media_type());
    let err = exchange
        .encode_request(Method::POST, "/", MediaType::Protobuf, &account())
        .unwrap_err();
    assert!(err.is_unsupported_media_type());

    assert!(
        http.encode_response(MediaType::Protobuf, &account())
            .unwrap_err()
            .is_unsupported_media_type()
    );
    assert!(
        exchange
            .encode_response(MediaType::Protobuf, &account())
            .unwrap_err()
            .is_unsupported_media_type()
    );
}

#[test]
fn shared_converter_across_threads() {
    let converter = std::sync::Arc::new(HttpConverter::new());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let converter = converter.clone();
            std::thread::spawn(move || {
                let msg = Account {
                    balance: i,
                    ..account()
                };
                let mut response = converter
                    .encode_response(MediaType::Protobuf, &msg)
                    .unwrap();
                let mut decoded = Account::default();
                converter
                    .decode_response(&mut response, &mut decoded)
                    .unwrap();
                assert_eq!(decoded, msg);
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
}
