//! Round-trip a message through both bindings.
//!
//! - Blocking binding: encode an `http::Request`, decode it on the "server"
//! - Context binding: answer inside a reused `Exchange`, then decode the response
//! - Negotiation failure for an unsupported `Accept`
//!
//! Run with: cargo run --bin roundtrip

use msgconv::http::header::ACCEPT;
use msgconv::http::HeaderValue;
use msgconv::prelude::*;
use msgconv_examples::{User, sample_user};
use tracing::Level;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::TRACE).init();

    // Blocking binding
    let converter = HttpConverter::new();
    let mut request = converter.encode_request(
        Method::POST,
        "http://localhost:3000/users",
        MediaType::Protobuf,
        &sample_user(),
    )?;
    println!("=== Blocking binding ===");
    println!("{} {}", request.method(), request.uri());
    for (name, value) in request.headers() {
        println!("  {name}: {value:?}");
    }

    let mut user = User::default();
    converter.decode_request(&mut request, &mut user)?;
    println!("decoded: {user:?}");
    println!();

    // Context binding, reusing one exchange for several calls
    let converter = ExchangeConverter::new();
    let mut exchange = Exchange::new();
    println!("=== Context binding ===");
    for media_type in MediaType::ALL {
        exchange.reset();
        converter.encode_exchange_response(&mut exchange, media_type, &sample_user())?;
        println!(
            "{media_type}: {} bytes, status {}",
            exchange.response.body().len(),
            exchange.response.status()
        );

        let mut user = User::default();
        converter.decode_response(&exchange.response, &mut user)?;
        anyhow::ensure!(user == sample_user(), "round trip changed the message");
    }
    println!();

    // Negotiation failure
    exchange.reset();
    exchange.request.set_method(Method::POST);
    exchange
        .request
        .headers_mut()
        .insert(ACCEPT, HeaderValue::from_static("application/xml"));
    match converter.decode_exchange_request(&exchange, &mut User::default()) {
        Err(err) if err.is_unsupported_media_type() => println!("rejected: {err}"),
        other => anyhow::bail!("expected an unsupported media type, got {other:?}"),
    }

    Ok(())
}
