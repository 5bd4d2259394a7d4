//! Base64 transport between compressed payloads and URL text.

use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use base64::Engine;

use crate::error::{PlaygroundError, Result};

/// How a payload is spelled once it leaves the compressor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    /// Base64 with `+`→`-`, `/`→`_` and no `=` padding. Safe in a URL
    /// fragment without percent-encoding.
    UrlSafe,
    /// Plain padded Base64, as used by the oldest `?code=` links.
    Standard,
}

impl Transport {
    /// Spell `bytes` as a token.
    pub fn encode(self, bytes: &[u8]) -> String {
        match self {
            Transport::UrlSafe => URL_SAFE_NO_PAD.encode(bytes),
            Transport::Standard => STANDARD.encode(bytes),
        }
    }

    /// Recover the payload bytes from a token.
    ///
    /// The URL-safe substitutions are reversed and the token is re-padded to
    /// a multiple of four before decoding, so tokens with or without padding
    /// are both accepted.
    pub fn decode(self, token: &str) -> Result<Vec<u8>> {
        if token.is_empty() {
            return Err(PlaygroundError::EmptyToken);
        }

        let mut base64: String = match self {
            Transport::UrlSafe => token
                .chars()
                .map(|c| match c {
                    '-' => '+',
                    '_' => '/',
                    other => other,
                })
                .collect(),
            Transport::Standard => token.to_string(),
        };
        while base64.len() % 4 != 0 {
            base64.push('=');
        }

        STANDARD
            .decode(base64.as_bytes())
            .map_err(|e| PlaygroundError::MalformedToken(e.to_string()))
    }
}

/// Whether `c` belongs to the URL-safe token alphabet `[A-Za-z0-9_-]`.
pub fn is_token_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_safe_substitutes_and_strips_padding() {
        // 0xfb 0xff encodes to "+/8=" in the standard alphabet.
        let token = Transport::UrlSafe.encode(&[0xfb, 0xff]);
        assert_eq!(token, "-_8");
        assert!(token.chars().all(is_token_char));
        assert_eq!(Transport::UrlSafe.decode(&token).unwrap(), vec![0xfb, 0xff]);
    }

    #[test]
    fn test_url_safe_accepts_padded_and_standard_spelling() {
        assert_eq!(Transport::UrlSafe.decode("-_8=").unwrap(), vec![0xfb, 0xff]);
        assert_eq!(Transport::UrlSafe.decode("+/8").unwrap(), vec![0xfb, 0xff]);
    }

    #[test]
    fn test_standard_pads_and_decodes() {
        assert_eq!(Transport::Standard.encode(b"hi"), "aGk=");
        assert_eq!(Transport::Standard.decode("aGk").unwrap(), b"hi".to_vec());
    }

    #[test]
    fn test_rejects_empty_and_malformed() {
        assert!(matches!(Transport::UrlSafe.decode(""), Err(PlaygroundError::EmptyToken)));
        assert!(matches!(
            Transport::UrlSafe.decode("not-valid-base64!!"),
            Err(PlaygroundError::MalformedToken(_))
        ));
        // A single trailing sextet can never be valid Base64.
        assert!(Transport::UrlSafe.decode("abcde").is_err());
    }
}
