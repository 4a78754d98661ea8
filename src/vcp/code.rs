//! Validated VCP feature code tokens
//!
//! A VCP code is the 1-2 digit hexadecimal token the external tool expects
//! on its command line ("10" for brightness, "D6" for power mode). Tokens
//! are normalized to uppercase at construction.

use crate::error::{Result, VcpTuneError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A validated VCP feature code token
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VcpCode(String);

impl VcpCode {
    /// Parse and normalize a VCP code token
    ///
    /// Accepts 1-2 hexadecimal digits in either case; stores uppercase.
    pub fn new(token: &str) -> Result<Self> {
        let normalized = token.trim().to_ascii_uppercase();
        if normalized.is_empty()
            || normalized.len() > 2
            || !normalized.bytes().all(|b| b.is_ascii_hexdigit())
        {
            return Err(VcpTuneError::InvalidVcpCode(token.to_string()));
        }
        Ok(Self(normalized))
    }

    /// The token as passed to the external tool
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VcpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for VcpCode {
    type Err = VcpTuneError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for VcpCode {
    type Error = VcpTuneError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(&value)
    }
}

impl From<VcpCode> for String {
    fn from(code: VcpCode) -> Self {
        code.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_tokens() {
        assert_eq!(VcpCode::new("10").unwrap().as_str(), "10");
        assert_eq!(VcpCode::new("D6").unwrap().as_str(), "D6");
        assert_eq!(VcpCode::new("cc").unwrap().as_str(), "CC");
        assert_eq!(VcpCode::new("4").unwrap().as_str(), "4");
    }

    #[test]
    fn test_invalid_tokens() {
        assert!(VcpCode::new("").is_err());
        assert!(VcpCode::new("100").is_err());
        assert!(VcpCode::new("G1").is_err());
        assert!(VcpCode::new("0x10").is_err());
    }

    #[test]
    fn test_serde_round_trip() {
        let code = VcpCode::new("D6").unwrap();
        let json = serde_json::to_string(&code).unwrap();
        assert_eq!(json, "\"D6\"");
        let parsed: VcpCode = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, code);
    }

    #[test]
    fn test_serde_rejects_invalid() {
        let result: std::result::Result<VcpCode, _> = serde_json::from_str("\"XYZ\"");
        assert!(result.is_err());
    }
}
