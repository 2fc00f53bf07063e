//! Domain constants for the transport envelope.
//! Keep this intentionally small; only broadly reused literals should live here.

/// First line of the transport envelope
pub const PKCS7_BEGIN_MARKER: &str = "-----BEGIN PKCS7-----";

/// Last line of the transport envelope
pub const PKCS7_END_MARKER: &str = "-----END PKCS7-----";

/// Separator between a parameter name and its value in the canonical stream
pub const CANONICAL_KEY_VALUE_SEPARATOR: char = '=';

/// Terminator of every canonical line
pub const CANONICAL_LINE_TERMINATOR: char = '\n';
