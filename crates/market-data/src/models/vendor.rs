use serde::{Deserialize, Serialize};
use std::fmt;

/// The two bulk price lists published by the diamond vendor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceListKind {
    Round,
    Fancy,
}

impl PriceListKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriceListKind::Round => "round",
            PriceListKind::Fancy => "fancy",
        }
    }
}

impl fmt::Display for PriceListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tokens returned by the vendor's OAuth token endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VendorTokenGrant {
    pub access_token: String,

    /// Absent on some refresh responses; callers keep the previous one then.
    #[serde(default)]
    pub refresh_token: Option<String>,

    /// Lifetime of the access token in seconds
    pub expires_in: i64,

    #[serde(default)]
    pub token_type: Option<String>,
}
