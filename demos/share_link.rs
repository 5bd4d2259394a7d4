//! Example: build a share link for a snippet and read it back.
//!
//! Run with: cargo run --example share_link -- 'print("hi")'
//!
//! Pass a full URL instead of a snippet to decode it:
//!
//!     cargo run --example share_link -- 'https://example.com/#lzma=XQAAgAD...'

use python_playground_rs::prelude::*;
use python_playground_rs::share::DEFAULT_LZMA_MEMLIMIT;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let arg = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "print(\"Hello World\")".to_string());
    let links = ShareLinks::new(Scheme::Lzma, &Scheme::DECODE_PRIORITY, DEFAULT_LZMA_MEMLIMIT);

    if arg.contains("://") {
        let location = PageLocation::parse(&arg)?;
        match links.decode_location(&location) {
            Ok(Some(snippet)) => println!("{}", snippet),
            Ok(None) => println!("(no snippet in this link)"),
            Err(e) => eprintln!("could not decode link: {}", e),
        }
        return Ok(());
    }

    let codec = links.share_codec();
    let token = codec.encode(&arg)?;
    let page = PageLocation::parse("https://example.com/")?;
    let shared = page.share_location(codec.scheme(), &token);

    println!("{}", shared.href());
    println!("{} bytes -> {} token chars", arg.len(), token.len());

    let back = links.decode_location(&shared)?;
    assert_eq!(back.as_deref(), Some(arg.as_str()));
    Ok(())
}
