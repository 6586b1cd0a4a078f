//! In-process repositories standing in for PostgreSQL

use std::{
    collections::HashMap,
    sync::{
        Mutex,
        atomic::{AtomicBool, Ordering},
    },
};

use anyhow::{Result, anyhow, bail};
use async_trait::async_trait;

use movieshub_api::{
    models::{FavoriteMovie, User},
    repositories::{FavoriteMovieRepository, UserRepository},
};

/// Users keyed by mobile number
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<String, User>>,
    fail_writes: AtomicBool,
    fail_reads: AtomicBool,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write fail
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent read fail
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Drop a user, standing in for administrative removal
    pub fn remove(&self, mobile_number: &str) -> Option<User> {
        self.users.lock().ok()?.remove(mobile_number)
    }

    pub fn len(&self) -> usize {
        self.users.lock().map(|users| users.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_mobile_number(&self, mobile_number: &str) -> Result<Option<User>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            bail!("user store unavailable");
        }

        let users = self.users.lock().map_err(|_| anyhow!("user store poisoned"))?;
        Ok(users.get(mobile_number).cloned())
    }

    async fn create(&self, user: &User) -> Result<bool> {
        if self.fail_writes.load(Ordering::SeqCst) {
            bail!("user store unavailable");
        }

        let mut users = self.users.lock().map_err(|_| anyhow!("user store poisoned"))?;
        if users.contains_key(&user.mobile_number) {
            return Ok(false);
        }
        users.insert(user.mobile_number.clone(), user.clone());
        Ok(true)
    }
}

/// Favorites keyed by (mobile number, movie id)
#[derive(Default)]
pub struct InMemoryFavoriteMovieRepository {
    movies: Mutex<HashMap<(String, i32), FavoriteMovie>>,
    fail_writes: AtomicBool,
    fail_reads: AtomicBool,
}

impl InMemoryFavoriteMovieRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    fn check_reads(&self) -> Result<()> {
        if self.fail_reads.load(Ordering::SeqCst) {
            bail!("favorites store unavailable");
        }
        Ok(())
    }

    fn check_writes(&self) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            bail!("favorites store unavailable");
        }
        Ok(())
    }
}

#[async_trait]
impl FavoriteMovieRepository for InMemoryFavoriteMovieRepository {
    async fn add(&self, movie: &FavoriteMovie) -> Result<Option<FavoriteMovie>> {
        self.check_writes()?;

        let mut movies = self
            .movies
            .lock()
            .map_err(|_| anyhow!("favorites store poisoned"))?;
        let key = (movie.user_mobile_number.clone(), movie.movie_id);
        let mut stored = movie.clone();
        if let Some(existing) = movies.get(&key) {
            stored.id = existing.id.clone();
        }
        movies.insert(key, stored.clone());
        Ok(Some(stored))
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        self.check_writes()?;

        let mut movies = self
            .movies
            .lock()
            .map_err(|_| anyhow!("favorites store poisoned"))?;
        let before = movies.len();
        movies.retain(|_, movie| movie.id != id);
        Ok(movies.len() < before)
    }

    async fn list(&self, mobile_number: &str) -> Result<Vec<FavoriteMovie>> {
        self.check_reads()?;

        let movies = self
            .movies
            .lock()
            .map_err(|_| anyhow!("favorites store poisoned"))?;
        let mut owned: Vec<FavoriteMovie> = movies
            .values()
            .filter(|movie| movie.user_mobile_number == mobile_number)
            .cloned()
            .collect();
        owned.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(owned)
    }

    async fn find(&self, mobile_number: &str, movie_id: i32) -> Result<Option<FavoriteMovie>> {
        self.check_reads()?;

        let movies = self
            .movies
            .lock()
            .map_err(|_| anyhow!("favorites store poisoned"))?;
        Ok(movies
            .get(&(mobile_number.to_string(), movie_id))
            .cloned())
    }
}
