//! Behaviour of the in-memory repositories the other suites rely on

mod support;

use movieshub_api::{
    models::{CreateUserRequest, FavoriteMovie, FavoriteMovieRequest, User},
    repositories::{FavoriteMovieRepository, UserRepository},
};
use support::{InMemoryFavoriteMovieRepository, InMemoryUserRepository, MOBILE_NUMBER};

fn favorite(mobile_number: &str, movie_id: i32, title: &str) -> FavoriteMovie {
    FavoriteMovie::new(
        mobile_number,
        &FavoriteMovieRequest {
            id: movie_id,
            title: title.to_string(),
            total_vote_count: 10.0,
            image_url: "/poster.jpg".to_string(),
            average_rating: 7.5,
        },
    )
}

#[tokio::test]
async fn test_user_create_is_unique_per_mobile_number() {
    let repo = InMemoryUserRepository::new();
    let request = CreateUserRequest {
        first_name: "Ama".into(),
        last_name: "Mensah".into(),
        mobile_number: MOBILE_NUMBER.into(),
    };

    assert!(repo.create(&User::new(&request)).await.unwrap());
    assert!(!repo.create(&User::new(&request)).await.unwrap());
    assert_eq!(repo.len(), 1);
}

#[tokio::test]
async fn test_favorite_add_overwrites_and_keeps_id() {
    let repo = InMemoryFavoriteMovieRepository::new();

    let first = repo.add(&favorite(MOBILE_NUMBER, 42, "Old")).await.unwrap().unwrap();
    let second = repo.add(&favorite(MOBILE_NUMBER, 42, "New")).await.unwrap().unwrap();

    assert_eq!(first.id, second.id);
    let listed = repo.list(MOBILE_NUMBER).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].title, "New");
}

#[tokio::test]
async fn test_favorite_delete_by_id() {
    let repo = InMemoryFavoriteMovieRepository::new();
    let stored = repo.add(&favorite(MOBILE_NUMBER, 7, "Seven")).await.unwrap().unwrap();

    assert!(repo.is_favorite(MOBILE_NUMBER, 7).await.unwrap());
    assert!(repo.delete(&stored.id).await.unwrap());
    assert!(!repo.delete(&stored.id).await.unwrap());
    assert!(!repo.is_favorite(MOBILE_NUMBER, 7).await.unwrap());
}

#[tokio::test]
async fn test_failure_switches() {
    let repo = InMemoryFavoriteMovieRepository::new();
    repo.fail_writes(true);
    assert!(repo.add(&favorite(MOBILE_NUMBER, 1, "One")).await.is_err());

    repo.fail_reads(true);
    assert!(repo.list(MOBILE_NUMBER).await.is_err());
}
