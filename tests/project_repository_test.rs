use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use betterhome::{
    domain::{Project, ProjectCategory, ProjectImage, ProjectPartner, ProjectStatus, ProjectUpdate},
    repository::{
        CategoryRepository, ProjectRepository, SqliteCategoryRepository, SqliteProjectRepository,
    },
};

fn project(title: &str, slug: &str, category_id: Option<Uuid>) -> Project {
    let now = Utc::now();
    Project {
        id: Uuid::new_v4(),
        title: title.to_string(),
        slug: slug.to_string(),
        category_id,
        short_description: "A short description".to_string(),
        full_description: "The full story".to_string(),
        image_path: format!("projects/2025/{}.jpg", slug),
        location: "Nairobi, Kenya".to_string(),
        status: ProjectStatus::Ongoing,
        start_date: None,
        end_date: None,
        beneficiaries: 100,
        budget_cents: Some(1_000_000),
        funds_raised_cents: 250_000,
        is_featured: false,
        is_active: true,
        display_order: 0,
        views: 0,
        created_at: now,
        updated_at: now,
    }
}

async fn setup() -> anyhow::Result<(SqliteProjectRepository, SqliteCategoryRepository)> {
    let pool = SqlitePool::connect(":memory:").await?;
    sqlx::migrate!("./migrations").run(&pool).await?;
    Ok((
        SqliteProjectRepository::new(pool.clone()),
        SqliteCategoryRepository::new(pool),
    ))
}

#[tokio::test]
async fn test_project_crud() -> anyhow::Result<()> {
    let (repo, categories) = setup().await?;

    let category = categories
        .create(ProjectCategory {
            id: Uuid::new_v4(),
            name: "Education".to_string(),
            slug: "education".to_string(),
            description: String::new(),
            icon: "bi-book".to_string(),
            created_at: Utc::now(),
        })
        .await?;

    let created = repo
        .create(project("School Library Rebuild", "school-library-rebuild", Some(category.id)))
        .await?;
    assert_eq!(created.funding_percentage(), 25);

    let found = repo.find_by_slug("school-library-rebuild").await?;
    assert!(found.is_some());
    assert_eq!(found.unwrap().category_id, Some(category.id));

    let mut changed = created.clone();
    changed.status = ProjectStatus::Completed;
    changed.funds_raised_cents = 1_000_000;
    let updated = repo.update(changed).await?;
    assert!(updated.is_completed());
    assert_eq!(updated.funding_percentage(), 100);

    repo.delete(created.id).await?;
    assert!(repo.find_by_id(created.id).await?.is_none());

    Ok(())
}

#[tokio::test]
async fn public_listing_filters_and_counts() -> anyhow::Result<()> {
    let (repo, categories) = setup().await?;

    let education = categories
        .create(ProjectCategory {
            id: Uuid::new_v4(),
            name: "Education".to_string(),
            slug: "education".to_string(),
            description: String::new(),
            icon: String::new(),
            created_at: Utc::now(),
        })
        .await?;

    repo.create(project("Library", "library", Some(education.id))).await?;
    repo.create(project("Clinic", "clinic", None)).await?;

    let mut hidden = project("Hidden", "hidden", Some(education.id));
    hidden.is_active = false;
    repo.create(hidden).await?;

    let mut planning = project("Nursery", "nursery", None);
    planning.status = ProjectStatus::Planning;
    repo.create(planning).await?;

    // Inactive projects never appear.
    assert_eq!(repo.count_public(None, None).await?, 3);

    // Category filter
    let education_only = repo.list_public(Some(education.id), None, 10, 0).await?;
    assert_eq!(education_only.len(), 1);
    assert_eq!(education_only[0].slug, "library");

    // Status filter
    let planning_only = repo
        .list_public(None, Some(ProjectStatus::Planning), 10, 0)
        .await?;
    assert_eq!(planning_only.len(), 1);
    assert_eq!(planning_only[0].slug, "nursery");

    // Category project count includes inactive rows
    assert_eq!(categories.count_projects(education.id).await?, 2);

    Ok(())
}

#[tokio::test]
async fn featured_ordering_and_view_counter() -> anyhow::Result<()> {
    let (repo, _categories) = setup().await?;

    let plain = repo.create(project("Plain", "plain", None)).await?;
    let mut featured = project("Featured", "featured", None);
    featured.is_featured = true;
    let featured = repo.create(featured).await?;

    let listed = repo.list(10, 0).await?;
    assert_eq!(listed[0].id, featured.id);

    let front_page = repo.list_featured(3).await?;
    assert_eq!(front_page.len(), 1);

    repo.increment_views(plain.id).await?;
    repo.increment_views(plain.id).await?;
    assert_eq!(repo.find_by_id(plain.id).await?.unwrap().views, 2);

    Ok(())
}

#[tokio::test]
async fn bulk_actions_update_selected_rows() -> anyhow::Result<()> {
    let (repo, _categories) = setup().await?;

    let a = repo.create(project("A", "a", None)).await?;
    let b = repo.create(project("B", "b", None)).await?;
    let c = repo.create(project("C", "c", None)).await?;

    let affected = repo.set_featured(&[a.id, b.id], true).await?;
    assert_eq!(affected, 2);
    assert!(repo.find_by_id(a.id).await?.unwrap().is_featured);
    assert!(!repo.find_by_id(c.id).await?.unwrap().is_featured);

    let affected = repo.set_status(&[c.id], ProjectStatus::Completed).await?;
    assert_eq!(affected, 1);
    assert!(repo.find_by_id(c.id).await?.unwrap().is_completed());

    // Empty selections are a no-op.
    assert_eq!(repo.set_featured(&[], true).await?, 0);

    Ok(())
}

#[tokio::test]
async fn related_projects_exclude_self_and_respect_category() -> anyhow::Result<()> {
    let (repo, categories) = setup().await?;

    let health = categories
        .create(ProjectCategory {
            id: Uuid::new_v4(),
            name: "Healthcare".to_string(),
            slug: "healthcare".to_string(),
            description: String::new(),
            icon: String::new(),
            created_at: Utc::now(),
        })
        .await?;

    let clinic = repo.create(project("Clinic", "clinic", Some(health.id))).await?;
    repo.create(project("Outreach", "outreach", Some(health.id))).await?;
    repo.create(project("Unrelated", "unrelated", None)).await?;

    let related = repo.list_related(Some(health.id), clinic.id, 3).await?;
    assert_eq!(related.len(), 1);
    assert_eq!(related[0].slug, "outreach");

    Ok(())
}

#[tokio::test]
async fn gallery_updates_and_partners_round_trip() -> anyhow::Result<()> {
    let (repo, _categories) = setup().await?;

    let project = repo.create(project("Well", "well", None)).await?;

    repo.add_image(ProjectImage {
        id: Uuid::new_v4(),
        project_id: project.id,
        image_path: "projects/gallery/well-11aa22bb.jpg".to_string(),
        caption: "Drilling day".to_string(),
        display_order: 0,
        uploaded_at: Utc::now(),
    })
    .await?;

    repo.add_update(ProjectUpdate {
        id: Uuid::new_v4(),
        project_id: project.id,
        title: "Survey complete".to_string(),
        content: "Hydrology survey signed off.".to_string(),
        image_path: None,
        is_milestone: true,
        created_at: Utc::now(),
    })
    .await?;

    let partner = repo
        .create_partner(ProjectPartner {
            id: Uuid::new_v4(),
            name: "Maji Trust".to_string(),
            logo_path: "partners/maji.png".to_string(),
            website: None,
            description: String::new(),
            is_active: true,
        })
        .await?;
    repo.link_partner(project.id, partner.id).await?;

    assert_eq!(repo.list_images(project.id).await?.len(), 1);
    assert_eq!(repo.list_updates(project.id).await?.len(), 1);
    assert_eq!(repo.list_partners_for(project.id).await?.len(), 1);

    // Gallery rows cascade with the project.
    repo.delete(project.id).await?;
    assert!(repo.list_images(project.id).await?.is_empty());

    Ok(())
}
