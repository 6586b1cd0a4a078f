//! Repositories over the relational store and the cache

pub mod favorite;
pub mod otp;
pub mod user;

pub use favorite::{FavoriteMovieRepository, PgFavoriteMovieRepository};
pub use otp::OtpCodeRepository;
pub use user::{PgUserRepository, UserCacheRepository, UserRepository};

/// Cache key scheme, namespaced by the application prefix
#[derive(Debug, Clone)]
pub struct CacheKeys {
    prefix: String,
}

impl CacheKeys {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn otp(&self, mobile_number: &str, request_id: &str) -> String {
        format!("{}:otp:{}:{}", self.prefix, mobile_number, request_id)
    }

    pub fn user(&self, mobile_number: &str) -> String {
        format!("{}:user:{}", self.prefix, mobile_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_keys_are_namespaced() {
        let keys = CacheKeys::new("movieshub");

        assert_eq!(
            keys.otp("0548015476", "abc123"),
            "movieshub:otp:0548015476:abc123"
        );
        assert_eq!(keys.user("0548015476"), "movieshub:user:0548015476");
    }
}
