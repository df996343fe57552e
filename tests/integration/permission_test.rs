//! Integration tests for role-based access across resources.

mod helpers;

use http::StatusCode;

use yamdb_core::config::DataConfig;
use yamdb_core::types::pagination::PageRequest;
use yamdb_database::{TitleFilter, UserStore};
use yamdb_entity::catalog::{NewGroup, NewTitle};
use yamdb_entity::review::NewReview;
use yamdb_entity::user::{NewUser, UserRole};

#[tokio::test]
async fn test_anonymous_reads_everything_public() {
    let app = helpers::TestApp::new().await;
    let title_id = app.create_title("Сталкер").await;
    let alice = app.login_as("alice", UserRole::User).await;
    let review = app
        .app
        .reviews
        .create(&alice, title_id, NewReview::new("Шедевр", 10))
        .await
        .unwrap();

    let anon = app.anonymous();
    let page = PageRequest::default();
    assert!(app.app.categories.list(&anon, None, &page).await.is_ok());
    assert!(app.app.genres.list(&anon, None, &page).await.is_ok());
    let titles = app
        .app
        .titles
        .list(&anon, &TitleFilter::default(), &page)
        .await
        .unwrap();
    assert_eq!(titles.items[0].rating, Some(10));
    assert!(app.app.reviews.retrieve(&anon, title_id, review.id).await.is_ok());
    assert!(app.app.comments.list(&anon, title_id, review.id, &page).await.is_ok());

    let result = app
        .app
        .categories
        .create(&anon, NewGroup::new("Фильмы", "movies"))
        .await;
    assert_eq!(helpers::status(result), StatusCode::UNAUTHORIZED);
    let result = app.app.users.list(&anon, None, &page).await;
    assert_eq!(helpers::status(result), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_catalog_writes_need_admin() {
    let app = helpers::TestApp::new().await;
    let carol = app.login_as("carol", UserRole::User).await;
    let moderator = app.login_as("mod", UserRole::Moderator).await;
    let admin = app.login_as("boss", UserRole::Admin).await;

    for ctx in [&carol, &moderator] {
        let result = app
            .app
            .categories
            .create(ctx, NewGroup::new("Фильмы", "movies"))
            .await;
        assert_eq!(helpers::status(result), StatusCode::FORBIDDEN);
        let result = app
            .app
            .genres
            .create(ctx, NewGroup::new("Драма", "drama"))
            .await;
        assert_eq!(helpers::status(result), StatusCode::FORBIDDEN);
    }

    app.app
        .categories
        .create(&admin, NewGroup::new("Фильмы", "movies"))
        .await
        .unwrap();
    app.app
        .genres
        .create(&admin, NewGroup::new("Драма", "drama"))
        .await
        .unwrap();

    let input = NewTitle {
        name: "Солярис".into(),
        year: 1972,
        category: Some("movies".into()),
        genre: vec!["drama".into()],
        ..Default::default()
    };
    let result = app.app.titles.create(&carol, input.clone()).await;
    assert_eq!(helpers::status(result), StatusCode::FORBIDDEN);
    let view = app.app.titles.create(&admin, input).await.unwrap();
    assert_eq!(view.category.unwrap().slug, "movies");
    assert_eq!(view.genre[0].slug, "drama");
    assert_eq!(view.rating, None);

    let result = app.app.categories.destroy(&moderator, "movies").await;
    assert_eq!(helpers::status(result), StatusCode::FORBIDDEN);
    app.app.categories.destroy(&admin, "movies").await.unwrap();
    let view = app
        .app
        .titles
        .retrieve(&app.anonymous(), view.id)
        .await
        .unwrap();
    assert!(view.category.is_none());
}

#[tokio::test]
async fn test_superuser_bypasses_role_not_authorship() {
    let app = helpers::TestApp::new().await;
    let root = app.login_root().await;
    assert!(root.caller.is_superuser());

    app.app
        .categories
        .create(&root, NewGroup::new("Книги", "books"))
        .await
        .unwrap();
    let created = app
        .app
        .users
        .create(
            &root,
            NewUser {
                username: "dave".into(),
                email: "d@x.com".into(),
                role: Some(UserRole::Moderator),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(created.role, UserRole::Moderator);

    let title_id = app.create_title("Пикник на обочине").await;
    let alice = app.login_as("alice", UserRole::User).await;
    let review = app
        .app
        .reviews
        .create(&alice, title_id, NewReview::new("Хорошо", 8))
        .await
        .unwrap();

    // The provisioned root also holds the admin role, so demote it to see
    // the bare superuser flag against an authored object.
    let plain_root = app
        .app
        .users
        .partial_update(
            &root,
            "root",
            yamdb_entity::user::UserPatch {
                role: Some(UserRole::User),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(plain_root.is_superuser);
    let root = app.login_root().await;

    let result = app
        .app
        .reviews
        .destroy(&root, title_id, review.id)
        .await;
    assert_eq!(helpers::status(result), StatusCode::FORBIDDEN);
    assert!(app.app.categories.destroy(&root, "books").await.is_ok());
}

#[tokio::test]
async fn test_user_administration_is_admin_only() {
    let app = helpers::TestApp::new().await;
    let carol = app.login_as("carol", UserRole::User).await;
    let moderator = app.login_as("mod", UserRole::Moderator).await;
    let admin = app.login_as("boss", UserRole::Admin).await;
    let page = PageRequest::default();

    for ctx in [&carol, &moderator] {
        let result = app.app.users.list(ctx, None, &page).await;
        assert_eq!(helpers::status(result), StatusCode::FORBIDDEN);
        let result = app.app.users.retrieve(ctx, "carol").await;
        assert_eq!(helpers::status(result), StatusCode::FORBIDDEN);
    }

    let found = app.app.users.list(&admin, Some("carol"), &page).await.unwrap();
    assert_eq!(found.total_items, 1);

    app.app.users.destroy(&admin, "carol").await.unwrap();
    let result = app.app.users.retrieve(&admin, "carol").await;
    assert_eq!(helpers::status(result), StatusCode::NOT_FOUND);

    // A deleted identity can no longer authenticate with its old token.
    let result = app.app.profile.me(&carol).await;
    assert_eq!(helpers::status(result), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_seed_data_loaded_before_superusers() {
    let dir = std::env::temp_dir().join(format!("yamdb-it-{}", uuid::Uuid::new_v4().simple()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(
        dir.join("users.csv"),
        "id,username,email,role\n50,root,root@yamdb.local,user\n51,critic,critic@x.com,user\n",
    )
    .unwrap();
    std::fs::write(dir.join("category.csv"), "id,name,slug\n1,Фильм,movie\n").unwrap();
    std::fs::write(dir.join("titles.csv"), "id,name,year,category\n7,Сталкер,1979,1\n").unwrap();
    std::fs::write(
        dir.join("review.csv"),
        "id,title_id,text,author,score,pub_date\n3,7,Медленно,51,4,2020-01-01T00:00:00Z\n",
    )
    .unwrap();

    let app = helpers::TestApp::with_data(DataConfig {
        seed_directory: Some(dir.to_string_lossy().into_owned()),
    })
    .await;
    let root = app.app.stores.users.find_by_username("root").await.unwrap().unwrap();
    assert_eq!(root.id, 50);
    assert!(root.is_superuser);

    let view = app.app.titles.retrieve(&app.anonymous(), 7).await.unwrap();
    assert_eq!(view.rating, Some(4));
    assert_eq!(view.category.unwrap().slug, "movie");

    // imported accounts log in as usual and own their imported reviews
    let critic = app.login_as("critic", UserRole::User).await;
    assert_eq!(critic.caller.id(), Some(51));
    let updated = app
        .app
        .reviews
        .update(&critic, 7, 3, NewReview::new("Медленно, но красиво", 6))
        .await
        .unwrap();
    assert_eq!(updated.author, "critic");
    let outsider = app.login_as("outsider", UserRole::User).await;
    let result = app.app.reviews.destroy(&outsider, 7, 3).await;
    assert_eq!(helpers::status(result), StatusCode::FORBIDDEN);

    std::fs::remove_dir_all(&dir).unwrap();
}
