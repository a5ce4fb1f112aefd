//! Magnet URI parsing and info hash extraction.

use std::fmt;

use crate::errors::AggregationError;

/// SHA-1 hash identifying a unique torrent swarm.
///
/// 20-byte digest extracted from a magnet URI's `btih` exact topic. Two
/// results sharing an info hash describe the same torrent regardless of
/// which provider returned them, which makes this the deduplication key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InfoHash([u8; 20]);

impl InfoHash {
    /// Creates InfoHash from a 20-byte SHA-1 digest.
    pub fn new(hash: [u8; 20]) -> Self {
        Self(hash)
    }

    /// Returns reference to the underlying 20-byte digest.
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Extracts the info hash from a magnet URI's `xt=urn:btih:` field.
    ///
    /// Hex digits are accepted in either case; the hash must be exactly
    /// 40 characters.
    ///
    /// # Errors
    /// - `AggregationError::MalformedMagnet` - URI is not a valid magnet
    ///   link, or the hash is missing, truncated, or not hexadecimal
    pub fn from_magnet(magnet_uri: &str) -> Result<Self, AggregationError> {
        magnet_url::Magnet::new(magnet_uri).map_err(|e| AggregationError::MalformedMagnet {
            reason: format!("invalid magnet URI: {e}"),
        })?;

        for param in magnet_uri.split(['?', '&']).skip(1) {
            if let Some(value) = param.strip_prefix("xt=urn:btih:") {
                return Self::parse_hex(value);
            }
        }

        Err(AggregationError::MalformedMagnet {
            reason: format!("missing btih exact topic: {magnet_uri}"),
        })
    }

    /// Parses a 40-character hex string into the 20-byte digest.
    fn parse_hex(hash_str: &str) -> Result<Self, AggregationError> {
        if hash_str.len() != 40 {
            return Err(AggregationError::MalformedMagnet {
                reason: format!("hash length {} (expected 40)", hash_str.len()),
            });
        }

        let mut hash = [0u8; 20];
        for (i, chunk) in hash_str.as_bytes().chunks(2).enumerate() {
            let pair = std::str::from_utf8(chunk).map_err(|_| AggregationError::MalformedMagnet {
                reason: format!("invalid UTF-8 in hash: {hash_str}"),
            })?;
            hash[i] = u8::from_str_radix(pair, 16).map_err(|_| AggregationError::MalformedMagnet {
                reason: format!("invalid hex character in hash: {hash_str}"),
            })?;
        }

        Ok(Self(hash))
    }
}

impl fmt::Display for InfoHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HASH: &str = "0123456789abcdef0123456789abcdef01234567";

    #[test]
    fn test_from_magnet_extracts_hash() {
        let magnet = format!("magnet:?xt=urn:btih:{HASH}&dn=Test%20Torrent");
        let info_hash = InfoHash::from_magnet(&magnet).unwrap();
        assert_eq!(info_hash.to_string(), HASH);
    }

    #[test]
    fn test_from_magnet_uppercase_hash_displays_lowercase() {
        let magnet = format!("magnet:?xt=urn:btih:{}", HASH.to_uppercase());
        let info_hash = InfoHash::from_magnet(&magnet).unwrap();
        assert_eq!(info_hash.to_string(), HASH);
    }

    #[test]
    fn test_from_magnet_hash_position_independent() {
        let magnet = format!("magnet:?dn=Test&xt=urn:btih:{HASH}&tr=http%3A%2F%2Ftracker.example.com%2Fannounce");
        assert!(InfoHash::from_magnet(&magnet).is_ok());
    }

    #[test]
    fn test_from_magnet_missing_topic() {
        let result = InfoHash::from_magnet("magnet:?dn=Test%20Torrent");
        assert!(matches!(
            result,
            Err(AggregationError::MalformedMagnet { .. })
        ));
    }

    #[test]
    fn test_from_magnet_truncated_hash() {
        let result = InfoHash::from_magnet("magnet:?xt=urn:btih:tooshort");
        assert!(matches!(
            result,
            Err(AggregationError::MalformedMagnet { .. })
        ));
    }

    #[test]
    fn test_from_magnet_non_hex_hash() {
        let result =
            InfoHash::from_magnet("magnet:?xt=urn:btih:zzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzz");
        assert!(matches!(
            result,
            Err(AggregationError::MalformedMagnet { .. })
        ));
    }

    #[test]
    fn test_display_lowercase_hex() {
        let hash = [
            0x01, 0x23, 0x45, 0x67, 0x89, 0xab, 0xcd, 0xef, 0x01, 0x23, 0x45, 0x67, 0x89, 0xab,
            0xcd, 0xef, 0x01, 0x23, 0x45, 0x67,
        ];
        assert_eq!(InfoHash::new(hash).to_string(), HASH);
    }
}
