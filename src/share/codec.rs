//! Share-link codec: snippet text to URL token and back.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::error::{PlaygroundError, Result};
use crate::share::compress::{Compressor, LzString, Lzma, Uncompressed};
use crate::share::token::Transport;

/// Where in the page URL a scheme's key lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// After `#`, never sent to a server.
    Fragment,
    /// After `?`.
    Query,
}

/// A share-link scheme, identified by the URL key its token is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scheme {
    /// `#lzma=<token>`: LZMA over UTF-8, URL-safe Base64.
    Lzma,
    /// `#code=<token>`: LZ-string over UTF-16, URL-safe Base64.
    LzString,
    /// `?code=<base64>`: uncompressed UTF-8, plain Base64.
    LegacyBase64,
}

impl Scheme {
    /// Decode order used when a page is opened, newest scheme first.
    pub const DECODE_PRIORITY: [Scheme; 3] = [Scheme::Lzma, Scheme::LzString, Scheme::LegacyBase64];

    /// The URL parameter name.
    pub fn key(self) -> &'static str {
        match self {
            Scheme::Lzma => "lzma",
            Scheme::LzString | Scheme::LegacyBase64 => "code",
        }
    }

    /// Whether the parameter is read from the fragment or the query.
    pub fn placement(self) -> Placement {
        match self {
            Scheme::Lzma | Scheme::LzString => Placement::Fragment,
            Scheme::LegacyBase64 => Placement::Query,
        }
    }

    /// How the payload is spelled in the URL.
    pub fn transport(self) -> Transport {
        match self {
            Scheme::Lzma | Scheme::LzString => Transport::UrlSafe,
            Scheme::LegacyBase64 => Transport::Standard,
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let placement = match self.placement() {
            Placement::Fragment => '#',
            Placement::Query => '?',
        };
        write!(f, "{}{}=", placement, self.key())
    }
}

/// Converts snippets to tokens and back for one [`Scheme`].
///
/// The compressor is injectable so the transform can be exercised with a
/// fake in tests.
#[derive(Clone)]
pub struct ShareCodec {
    scheme: Scheme,
    compressor: Arc<dyn Compressor>,
}

impl fmt::Debug for ShareCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShareCodec")
            .field("scheme", &self.scheme)
            .field("compressor", &self.compressor.name())
            .finish()
    }
}

impl ShareCodec {
    /// Create a codec with an explicit compressor.
    pub fn new(scheme: Scheme, compressor: Arc<dyn Compressor>) -> Self {
        Self { scheme, compressor }
    }

    /// Create a codec backed by the scheme's real compressor.
    pub fn for_scheme(scheme: Scheme, lzma_memlimit: usize) -> Self {
        let compressor: Arc<dyn Compressor> = match scheme {
            Scheme::Lzma => Arc::new(Lzma::new(lzma_memlimit)),
            Scheme::LzString => Arc::new(LzString),
            Scheme::LegacyBase64 => Arc::new(Uncompressed),
        };
        Self::new(scheme, compressor)
    }

    /// The scheme this codec speaks.
    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    /// Encode a snippet into a token.
    ///
    /// Either a complete token is returned or an error; never a partial one.
    pub fn encode(&self, text: &str) -> Result<String> {
        let payload = self.compressor.compress(text)?;
        let token = self.scheme.transport().encode(&payload);
        debug!(
            scheme = %self.scheme,
            text_len = text.len(),
            token_len = token.len(),
            "encoded share token"
        );
        Ok(token)
    }

    /// Decode a token back into the snippet it was made from.
    pub fn decode(&self, token: &str) -> Result<String> {
        let payload = self.scheme.transport().decode(token)?;
        self.compressor.decompress(&payload)
    }

    /// [`encode`](Self::encode) on the blocking pool.
    pub async fn encode_async(&self, text: &str) -> Result<String> {
        let codec = self.clone();
        let text = text.to_string();
        tokio::task::spawn_blocking(move || codec.encode(&text))
            .await
            .map_err(|e| PlaygroundError::Compression(format!("encode task panicked: {}", e)))?
    }

    /// [`decode`](Self::decode) on the blocking pool.
    pub async fn decode_async(&self, token: &str) -> Result<String> {
        let codec = self.clone();
        let token = token.to_string();
        tokio::task::spawn_blocking(move || codec.decode(&token))
            .await
            .map_err(|e| PlaygroundError::Decompression(format!("decode task panicked: {}", e)))?
    }
}
