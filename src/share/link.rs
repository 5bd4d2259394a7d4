//! Page locations and the share parameters embedded in them.

use tracing::{debug, warn};

use crate::error::{PlaygroundError, Result};
use crate::share::codec::{Placement, Scheme, ShareCodec};

/// The parts of a page URL the playground reads and writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLocation {
    /// Scheme, host and port, e.g. `https://example.com`.
    pub origin: String,
    /// Path starting with `/`.
    pub path: String,
    /// Query string without the leading `?`.
    pub query: String,
    /// Fragment without the leading `#`.
    pub fragment: String,
}

impl PageLocation {
    /// Split an absolute URL into its parts.
    pub fn parse(href: &str) -> Result<Self> {
        let (rest, fragment) = match href.split_once('#') {
            Some((rest, fragment)) => (rest, fragment),
            None => (href, ""),
        };
        let (rest, query) = match rest.split_once('?') {
            Some((rest, query)) => (rest, query),
            None => (rest, ""),
        };

        let scheme_end = rest
            .find("://")
            .ok_or_else(|| PlaygroundError::Config(format!("not an absolute URL: {}", href)))?;
        let authority_start = scheme_end + 3;
        let (origin, path) = match rest[authority_start..].find('/') {
            Some(idx) => rest.split_at(authority_start + idx),
            None => (rest, "/"),
        };
        if origin.len() == authority_start {
            return Err(PlaygroundError::Config(format!("URL has no host: {}", href)));
        }

        Ok(Self {
            origin: origin.to_string(),
            path: path.to_string(),
            query: query.to_string(),
            fragment: fragment.to_string(),
        })
    }

    /// The full URL.
    pub fn href(&self) -> String {
        let mut href = format!("{}{}", self.origin, self.path);
        if !self.query.is_empty() {
            href.push('?');
            href.push_str(&self.query);
        }
        if !self.fragment.is_empty() {
            href.push('#');
            href.push_str(&self.fragment);
        }
        href
    }

    /// First non-empty value of `key` in the fragment or query, decoded as
    /// `application/x-www-form-urlencoded`.
    pub fn param(&self, placement: Placement, key: &str) -> Option<String> {
        let source = match placement {
            Placement::Fragment => &self.fragment,
            Placement::Query => &self.query,
        };
        form_urlencoded::parse(source.as_bytes())
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
            .filter(|v| !v.is_empty())
    }

    /// The URL to share for `token`: origin and path, plus the scheme's key.
    ///
    /// The existing query and fragment are dropped.
    pub fn share_location(&self, scheme: Scheme, token: &str) -> Self {
        let param = format!("{}={}", scheme.key(), token);
        let (query, fragment) = match scheme.placement() {
            Placement::Fragment => (String::new(), param),
            Placement::Query => (param, String::new()),
        };
        Self {
            origin: self.origin.clone(),
            path: self.path.clone(),
            query,
            fragment,
        }
    }
}

/// The share codec used for new links plus the decode-priority list used
/// when a page is opened.
#[derive(Debug, Clone)]
pub struct ShareLinks {
    share: ShareCodec,
    decoders: Vec<ShareCodec>,
}

impl ShareLinks {
    /// Build from real compressors.
    pub fn new(share_scheme: Scheme, decode_order: &[Scheme], lzma_memlimit: usize) -> Self {
        Self {
            share: ShareCodec::for_scheme(share_scheme, lzma_memlimit),
            decoders: decode_order
                .iter()
                .map(|scheme| ShareCodec::for_scheme(*scheme, lzma_memlimit))
                .collect(),
        }
    }

    /// Build from explicit codecs.
    pub fn with_codecs(share: ShareCodec, decoders: Vec<ShareCodec>) -> Self {
        Self { share, decoders }
    }

    /// Codec used when creating links.
    pub fn share_codec(&self) -> &ShareCodec {
        &self.share
    }

    /// The first decoder (in priority order) whose key is present, with its
    /// raw token.
    pub fn lookup(&self, location: &PageLocation) -> Option<(&ShareCodec, String)> {
        self.decoders.iter().find_map(|codec| {
            let scheme = codec.scheme();
            let value = location.param(scheme.placement(), scheme.key())?;
            let token = match scheme {
                // Form decoding turned the Base64 `+` into spaces.
                Scheme::LegacyBase64 => value.replace(' ', "+"),
                Scheme::Lzma | Scheme::LzString => value,
            };
            Some((codec, token))
        })
    }

    /// Snippet carried by `location`.
    ///
    /// `Ok(None)` when no known key is present. The highest-priority key
    /// decides; a lower-priority key is not consulted when it fails.
    pub fn decode_location(&self, location: &PageLocation) -> Result<Option<String>> {
        let Some((codec, token)) = self.lookup(location) else {
            return Ok(None);
        };
        debug!(scheme = %codec.scheme(), "decoding snippet from page location");
        codec
            .decode(&token)
            .map(Some)
            .inspect_err(|e| warn!(scheme = %codec.scheme(), error = %e, "share token rejected"))
    }

    /// [`decode_location`](Self::decode_location) with the decompression on
    /// the blocking pool.
    pub async fn decode_location_async(&self, location: &PageLocation) -> Result<Option<String>> {
        let Some((codec, token)) = self.lookup(location) else {
            return Ok(None);
        };
        debug!(scheme = %codec.scheme(), "decoding snippet from page location");
        codec
            .decode_async(&token)
            .await
            .map(Some)
            .inspect_err(|e| warn!(scheme = %codec.scheme(), error = %e, "share token rejected"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::share::DEFAULT_LZMA_MEMLIMIT;

    fn links() -> ShareLinks {
        ShareLinks::new(Scheme::Lzma, &Scheme::DECODE_PRIORITY, DEFAULT_LZMA_MEMLIMIT)
    }

    #[test]
    fn test_parse_location() {
        let loc = PageLocation::parse("https://example.com:8080/play/index.html?x=1#lzma=abc").unwrap();
        assert_eq!(loc.origin, "https://example.com:8080");
        assert_eq!(loc.path, "/play/index.html");
        assert_eq!(loc.query, "x=1");
        assert_eq!(loc.fragment, "lzma=abc");
        assert_eq!(loc.href(), "https://example.com:8080/play/index.html?x=1#lzma=abc");

        let bare = PageLocation::parse("http://localhost").unwrap();
        assert_eq!(bare.path, "/");
        assert_eq!(bare.href(), "http://localhost/");
    }

    #[test]
    fn test_parse_rejects_relative() {
        assert!(PageLocation::parse("/index.html#lzma=abc").is_err());
        assert!(PageLocation::parse("https:///nohost").is_err());
    }

    #[test]
    fn test_share_location_replaces_query_and_fragment() {
        let loc = PageLocation::parse("https://example.com/?code=old#code=older").unwrap();
        let shared = loc.share_location(Scheme::Lzma, "TOKEN");
        assert_eq!(shared.href(), "https://example.com/#lzma=TOKEN");
    }

    #[test]
    fn test_absent_or_unknown_key_is_no_snippet() {
        let links = links();
        for href in [
            "https://example.com/",
            "https://example.com/#other=abc",
            "https://example.com/#lzma=",
        ] {
            let loc = PageLocation::parse(href).unwrap();
            assert!(links.decode_location(&loc).unwrap().is_none(), "{}", href);
        }
    }

    #[test]
    fn test_dedicated_key_wins() {
        let links = links();
        let lzma = ShareCodec::for_scheme(Scheme::Lzma, DEFAULT_LZMA_MEMLIMIT).encode("from lzma").unwrap();
        let lz = ShareCodec::for_scheme(Scheme::LzString, DEFAULT_LZMA_MEMLIMIT).encode("from code").unwrap();

        let href = format!("https://example.com/?code=ZnJvbSBxdWVyeQ==#code={}&lzma={}", lz, lzma);
        let loc = PageLocation::parse(&href).unwrap();
        assert_eq!(links.decode_location(&loc).unwrap().as_deref(), Some("from lzma"));

        let href = format!("https://example.com/?code=ZnJvbSBxdWVyeQ==#code={}", lz);
        let loc = PageLocation::parse(&href).unwrap();
        assert_eq!(links.decode_location(&loc).unwrap().as_deref(), Some("from code"));
    }

    #[test]
    fn test_legacy_query_restores_plus() {
        // "a>>b" → "YT4+Yg==", which form decoding would turn into "YT4 Yg==".
        let loc = PageLocation::parse("https://example.com/?code=YT4+Yg==").unwrap();
        assert_eq!(links().decode_location(&loc).unwrap().as_deref(), Some("a>>b"));

        let encoded = PageLocation::parse("https://example.com/?code=YT4%2BYg%3D%3D").unwrap();
        assert_eq!(links().decode_location(&encoded).unwrap().as_deref(), Some("a>>b"));
    }

    #[test]
    fn test_corrupt_priority_key_does_not_fall_through() {
        let lz = ShareCodec::for_scheme(Scheme::LzString, DEFAULT_LZMA_MEMLIMIT).encode("fallback").unwrap();
        let href = format!("https://example.com/#lzma=AAAA&code={}", lz);
        let loc = PageLocation::parse(&href).unwrap();
        assert!(links().decode_location(&loc).is_err());
    }

    #[tokio::test]
    async fn test_decode_location_async() {
        let token = ShareCodec::for_scheme(Scheme::Lzma, DEFAULT_LZMA_MEMLIMIT).encode("x = 1").unwrap();
        let loc = PageLocation::parse(&format!("https://example.com/#lzma={}", token)).unwrap();
        assert_eq!(links().decode_location_async(&loc).await.unwrap().as_deref(), Some("x = 1"));
    }
}
