//! Parse a JSON document and print it back compactly.
//!
//! ```sh
//! RUST_LOG=trace cargo run -p weft-grammars --example json -- '{"a": [1, 2]}'
//! ```

use tracing::info;
use tracing_subscriber::EnvFilter;
use weft_grammars::json::{self, JsonValue};

const DOCUMENT: &str = r#"
   {
     "foo"   :    "bar"   ,
     "hello": {
        "world": true
     },
     "stuff":  [  "something" ,   true, null]
}
"#;

fn main() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let input = std::env::args().nth(1).unwrap_or_else(|| DOCUMENT.to_owned());
    let value = json::parse(&input)?;

    match &value {
        JsonValue::Object(object) => info!(properties = object.len(), "parsed a JSON object"),
        _ => info!("parsed a JSON value"),
    }
    println!("{value}");
    Ok(())
}
