use sha3::{Digest, Keccak256};

use crate::error::AddressError;

pub fn remove_trailing_slash(url: &str) -> String {
    if url.ends_with('/') {
        url[..url.len() - 1].to_string()
    } else {
        url.to_string()
    }
}

/// Convert an EVM address to its EIP-55 checksummed form.
///
/// Accepts all-lowercase, all-uppercase or already-checksummed input.
/// Mixed-case input must carry the correct checksum:
///   - lowercase the 40 hex chars and take keccak256 of their ASCII bytes
///   - uppercase every letter whose matching hash nibble is >= 8
pub fn to_checksum_address(address: &str) -> Result<String, AddressError> {
    let body = address
        .strip_prefix("0x")
        .ok_or(AddressError::MissingPrefix)?;
    if body.len() != 40 {
        return Err(AddressError::InvalidLength(body.len()));
    }
    if hex::decode(body).is_err() {
        return Err(AddressError::InvalidHex);
    }

    let lower = body.to_ascii_lowercase();
    let hash = Keccak256::digest(lower.as_bytes());

    let mut checksummed = String::with_capacity(42);
    checksummed.push_str("0x");
    for (i, c) in lower.chars().enumerate() {
        let byte = hash[i / 2];
        let nibble = if i % 2 == 0 { byte >> 4 } else { byte & 0x0f };
        if c.is_ascii_alphabetic() && nibble >= 8 {
            checksummed.push(c.to_ascii_uppercase());
        } else {
            checksummed.push(c);
        }
    }

    let has_lower = body.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = body.chars().any(|c| c.is_ascii_uppercase());
    if has_lower && has_upper && checksummed != address {
        return Err(AddressError::BadChecksum(checksummed));
    }

    Ok(checksummed)
}

pub fn is_address(address: &str) -> bool {
    to_checksum_address(address).is_ok()
}

/// `"8453-0xabc...-42"` -> `"8453...-42"`: first and last four characters.
pub fn shorten_id(id: &str) -> String {
    let chars: Vec<char> = id.chars().collect();
    if chars.len() <= 8 {
        return id.to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum_known_vectors() {
        // EIP-55 reference vectors
        for expected in [
            "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
            "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359",
            "0xdbF03B407c01E7cD3CBea99509d93f8DDDC8C6FB",
            "0xD1220A0cf47c7B9Be7A2E6BA89F429762e7b9aDb",
        ] {
            let lower = format!("0x{}", expected[2..].to_ascii_lowercase());
            assert_eq!(to_checksum_address(&lower).unwrap(), expected);
            assert_eq!(to_checksum_address(expected).unwrap(), expected);
        }
    }

    #[test]
    fn test_checksum_rejects_bad_mixed_case() {
        let err = to_checksum_address("0x5AAeb6053F3E94C9b9A09f33669435E7Ef1BeAed").unwrap_err();
        assert_eq!(
            err,
            AddressError::BadChecksum("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed".to_string())
        );
    }

    #[test]
    fn test_checksum_rejects_malformed() {
        assert_eq!(
            to_checksum_address("5aaeb6053f3e94c9b9a09f33669435e7ef1beaed"),
            Err(AddressError::MissingPrefix)
        );
        assert_eq!(
            to_checksum_address("0x1234"),
            Err(AddressError::InvalidLength(4))
        );
        assert_eq!(
            to_checksum_address("0xzzzeb6053f3e94c9b9a09f33669435e7ef1beaed"),
            Err(AddressError::InvalidHex)
        );
        assert!(!is_address("not-an-address"));
    }

    #[test]
    fn test_shorten_id() {
        assert_eq!(
            shorten_id("8453-0x822F17A9A5EeCFd66dBAFf7946a8071C265D1d07-1234"),
            "8453...1234"
        );
        assert_eq!(shorten_id("short"), "short");
    }

    #[test]
    fn test_remove_trailing_slash() {
        assert_eq!(remove_trailing_slash("http://localhost/"), "http://localhost");
        assert_eq!(remove_trailing_slash("http://localhost"), "http://localhost");
    }
}
