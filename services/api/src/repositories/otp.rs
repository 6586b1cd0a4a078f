//! Cache-backed storage for issued OTP codes

use std::sync::Arc;

use anyhow::Result;
use common::cache::CacheStore;

use super::CacheKeys;
use crate::models::OtpCode;

/// OTP codes keyed by (mobile number, request id), expiring after a TTL
#[derive(Clone)]
pub struct OtpCodeRepository {
    cache: Arc<dyn CacheStore>,
    keys: CacheKeys,
    ttl_seconds: u64,
}

impl OtpCodeRepository {
    pub fn new(cache: Arc<dyn CacheStore>, keys: CacheKeys, ttl_seconds: u64) -> Self {
        Self {
            cache,
            keys,
            ttl_seconds,
        }
    }

    pub async fn cache_otp_code(&self, mobile_number: &str, otp_code: &OtpCode) -> Result<()> {
        let key = self.keys.otp(mobile_number, &otp_code.request_id);
        let value = serde_json::to_string(otp_code)?;
        self.cache.set(&key, &value, Some(self.ttl_seconds)).await
    }

    /// The live code for the request, `None` once expired or never issued
    pub async fn get_otp_code(
        &self,
        mobile_number: &str,
        request_id: &str,
    ) -> Result<Option<OtpCode>> {
        let key = self.keys.otp(mobile_number, request_id);
        match self.cache.get(&key).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Delete the record; `true` only for the one caller that removed it
    pub async fn consume(&self, mobile_number: &str, request_id: &str) -> Result<bool> {
        let key = self.keys.otp(mobile_number, request_id);
        self.cache.delete(&key).await
    }
}
