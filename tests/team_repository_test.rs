use chrono::{NaiveDate, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use betterhome::{
    domain::{PhotoStatus, TeamMember},
    error::AppError,
    repository::{SqliteTeamRepository, TeamRepository},
};

fn member(name: &str, slug: &str) -> TeamMember {
    let now = Utc::now();
    TeamMember {
        id: Uuid::new_v4(),
        name: name.to_string(),
        slug: slug.to_string(),
        role: Some("Field Officer".to_string()),
        bio: None,
        date_of_birth: NaiveDate::from_ymd_opt(1992, 7, 4),
        national_id: None,
        national_id_verified: false,
        photo_path: None,
        photo_status: PhotoStatus::Pending,
        display_order: 0,
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}

async fn setup() -> anyhow::Result<SqliteTeamRepository> {
    let pool = SqlitePool::connect(":memory:").await?;
    sqlx::migrate!("./migrations").run(&pool).await?;
    Ok(SqliteTeamRepository::new(pool))
}

#[tokio::test]
async fn test_team_member_crud() -> anyhow::Result<()> {
    let repo = setup().await?;

    // Test Create
    let created = repo.create(member("Amina Otieno", "amina-otieno")).await?;
    assert_eq!(created.name, "Amina Otieno");
    assert_eq!(created.photo_status, PhotoStatus::Pending);

    // Test Find by ID
    let found = repo.find_by_id(created.id).await?;
    assert!(found.is_some());
    assert_eq!(found.unwrap().id, created.id);

    // Test Find by Slug
    let by_slug = repo.find_by_slug("amina-otieno").await?;
    assert!(by_slug.is_some());

    // Test List
    let members = repo.list(10, 0).await?;
    assert_eq!(members.len(), 1);

    // Test Update (full-state; slug untouched)
    let mut changed = created.clone();
    changed.name = "Amina A. Otieno".to_string();
    changed.date_of_birth = NaiveDate::from_ymd_opt(1992, 7, 4);
    let updated = repo.update(changed).await?;
    assert_eq!(updated.name, "Amina A. Otieno");
    assert_eq!(updated.slug, "amina-otieno");

    // Test photo column updates
    repo.set_photo(created.id, Some("team/2025/amina-otieno-00ff00ff.jpg"), PhotoStatus::Pending)
        .await?;
    repo.set_photo_status(created.id, PhotoStatus::Optimized).await?;
    let with_photo = repo.find_by_id(created.id).await?.unwrap();
    assert_eq!(
        with_photo.photo_path.as_deref(),
        Some("team/2025/amina-otieno-00ff00ff.jpg")
    );
    assert_eq!(with_photo.photo_status, PhotoStatus::Optimized);

    // Test Delete
    repo.delete(created.id).await?;
    assert!(repo.find_by_id(created.id).await?.is_none());

    Ok(())
}

#[tokio::test]
async fn slug_snapshot_and_active_filter() -> anyhow::Result<()> {
    let repo = setup().await?;

    repo.create(member("Amina Otieno", "amina-otieno")).await?;
    let mut inactive = member("Old Colleague", "old-colleague");
    inactive.is_active = false;
    repo.create(inactive).await?;

    let mut slugs = repo.list_slugs().await?;
    slugs.sort();
    assert_eq!(slugs, vec!["amina-otieno", "old-colleague"]);

    let active = repo.list_active().await?;
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].slug, "amina-otieno");

    Ok(())
}

#[tokio::test]
async fn unique_slug_is_enforced_by_the_database() -> anyhow::Result<()> {
    let repo = setup().await?;

    repo.create(member("Jane Doe", "jane-doe")).await?;
    let err = repo.create(member("Jane Doe", "jane-doe")).await.unwrap_err();

    assert!(matches!(err, AppError::Conflict(_)));

    Ok(())
}

#[tokio::test]
async fn national_id_unique_only_when_present() -> anyhow::Result<()> {
    let repo = setup().await?;

    // Two members without a national id coexist (NULLs don't collide).
    repo.create(member("One", "one")).await?;
    repo.create(member("Two", "two")).await?;

    let mut third = member("Three", "three");
    third.national_id = Some("KE12345".to_string());
    repo.create(third).await?;

    let mut fourth = member("Four", "four");
    fourth.national_id = Some("KE12345".to_string());
    let err = repo.create(fourth).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    Ok(())
}
