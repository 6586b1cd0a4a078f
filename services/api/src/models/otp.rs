//! OTP code model and authentication payloads

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{User, new_id};

const PREFIX_LENGTH: usize = 4;

/// One-time code issued for a mobile number
///
/// Stored in the cache only; never returned to callers in full.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtpCode {
    pub request_id: String,
    pub prefix: String,
    pub code: u32,
}

impl OtpCode {
    /// Fresh code: random request id, 4 uppercase letters, 6 digits
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let prefix = (0..PREFIX_LENGTH)
            .map(|_| char::from(rng.gen_range(b'A'..=b'Z')))
            .collect();

        Self {
            request_id: new_id(),
            prefix,
            code: rng.gen_range(100_000..=999_999),
        }
    }

    /// Exact, case-sensitive comparison against a verification attempt
    pub fn matches(&self, request: &VerifyOtpRequest) -> bool {
        self.code == request.code && self.prefix == request.prefix
    }

    pub fn sms_content(&self, expiry_minutes: u64) -> String {
        format!(
            "Your MoviesHub verification code is {}-{}. It expires in {} minutes.",
            self.prefix, self.code, expiry_minutes
        )
    }
}

/// What the caller learns about an issued code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtpCodeIssued {
    pub request_id: String,
    pub prefix: String,
}

impl From<&OtpCode> for OtpCodeIssued {
    fn from(code: &OtpCode) -> Self {
        Self {
            request_id: code.request_id.clone(),
            prefix: code.prefix.clone(),
        }
    }
}

/// Verification attempt for a previously issued code
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpRequest {
    pub request_id: String,
    pub prefix: String,
    pub code: u32,
}

/// Successful login
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResult {
    pub token: String,
    /// Token expiry as unix seconds
    pub expiry: i64,
    pub user: User,
}
