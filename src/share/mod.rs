//! Share links: compress a snippet into a URL-safe token and recover it from
//! a page location.
//!
//! A token is the snippet compressed by the scheme's [`Compressor`], spelled
//! in Base64 with `-`/`_` in place of `+`/`/` and no padding, so it can sit
//! in a URL fragment without percent-encoding:
//!
//! ```text
//! https://example.com/#lzma=XQAAgAD__________wA4G...
//! ```
//!
//! Older links are still understood. [`ShareLinks`] walks a decode-priority
//! list (`#lzma=`, then `#code=`, then `?code=`) and the first key present
//! decides.

pub mod codec;
pub mod compress;
pub mod link;
pub mod token;

pub use codec::{Placement, Scheme, ShareCodec};
pub use compress::{Compressor, LzString, Lzma, Uncompressed, DEFAULT_LZMA_MEMLIMIT};
pub use link::{PageLocation, ShareLinks};
pub use token::{is_token_char, Transport};
