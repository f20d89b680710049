use std::collections::HashSet;

use chrono::{Duration, NaiveDate, Utc};
use clap::Parser;
use fake::{
    faker::lorem::en::{Paragraph, Sentence},
    Fake,
};
use sqlx::sqlite::SqlitePoolOptions;
use uuid::Uuid;

use betterhome::{
    domain::{
        BlogPost, Event, GalleryImage, PhotoStatus, Project, ProjectCategory, ProjectPartner,
        ProjectStatus, ProjectUpdate, TeamMember,
    },
    repository::{
        BlogRepository, CategoryRepository, EventRepository, GalleryRepository, ProjectRepository,
        SqliteBlogRepository, SqliteCategoryRepository, SqliteEventRepository,
        SqliteGalleryRepository, SqliteProjectRepository, SqliteTeamRepository, TeamRepository,
    },
    service::slug::{first_free_slug, slug_base},
};

#[derive(Parser)]
#[command(about = "Seed the BetterHome database with demo content")]
struct Args {
    /// Database URL (falls back to DATABASE_URL, then sqlite:betterhome.db)
    #[arg(long)]
    database_url: Option<String>,

    /// Number of additional generated projects beyond the fixed set
    #[arg(long, default_value_t = 4)]
    extra_projects: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    println!("🌱 Starting database seeding...");

    let database_url = args
        .database_url
        .or_else(|| std::env::var("DATABASE_URL").ok())
        .unwrap_or_else(|| "sqlite:betterhome.db".to_string());

    let db_pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    println!("📋 Running migrations...");
    sqlx::migrate!("./migrations").run(&db_pool).await?;

    let team_repo = SqliteTeamRepository::new(db_pool.clone());
    let project_repo = SqliteProjectRepository::new(db_pool.clone());
    let category_repo = SqliteCategoryRepository::new(db_pool.clone());
    let blog_repo = SqliteBlogRepository::new(db_pool.clone());
    let event_repo = SqliteEventRepository::new(db_pool.clone());
    let gallery_repo = SqliteGalleryRepository::new(db_pool.clone());

    // Categories
    println!("🏷️  Creating categories...");
    let mut categories = Vec::new();
    for (name, icon) in [
        ("Education", "bi-book"),
        ("Healthcare", "bi-heart-pulse"),
        ("Environment", "bi-tree"),
        ("Water & Sanitation", "bi-droplet"),
    ] {
        let category = category_repo
            .create(ProjectCategory {
                id: Uuid::new_v4(),
                name: name.to_string(),
                slug: slug_base(name, "category"),
                description: Sentence(8..14).fake(),
                icon: icon.to_string(),
                created_at: Utc::now(),
            })
            .await?;
        categories.push(category);
    }
    println!("  ✅ Created {} categories", categories.len());

    // Projects
    println!("🏗️  Creating projects...");
    let mut taken_slugs: HashSet<String> = HashSet::new();

    let fixed = [
        (
            "Clean Water for Kibera",
            "Water & Sanitation",
            ProjectStatus::Ongoing,
            Some(2_500_000i64),
            1_750_000i64,
            true,
        ),
        (
            "School Library Rebuild",
            "Education",
            ProjectStatus::Completed,
            Some(1_200_000),
            1_200_000,
            true,
        ),
        (
            "Mobile Health Clinic",
            "Healthcare",
            ProjectStatus::Ongoing,
            Some(4_000_000),
            900_000,
            true,
        ),
        (
            "Community Tree Nursery",
            "Environment",
            ProjectStatus::Planning,
            None,
            0,
            false,
        ),
    ];

    let mut first_project_id = None;
    for (i, (title, category_name, status, budget, raised, featured)) in
        fixed.into_iter().enumerate()
    {
        let slug = first_free_slug(&slug_base(title, "project"), &taken_slugs);
        taken_slugs.insert(slug.clone());

        let category = categories.iter().find(|c| c.name == category_name);
        let project = project_repo
            .create(Project {
                id: Uuid::new_v4(),
                title: title.to_string(),
                slug: slug.clone(),
                category_id: category.map(|c| c.id),
                short_description: Sentence(10..20).fake(),
                full_description: Paragraph(4..8).fake(),
                image_path: format!("projects/seed/{}.jpg", slug),
                location: "Nairobi, Kenya".to_string(),
                status,
                start_date: NaiveDate::from_ymd_opt(2024, 3, 1),
                end_date: None,
                beneficiaries: (i as i64 + 1) * 250,
                budget_cents: budget,
                funds_raised_cents: raised,
                is_featured: featured,
                is_active: true,
                display_order: i as i64,
                views: 0,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            })
            .await?;
        first_project_id.get_or_insert(project.id);
    }

    for i in 0..args.extra_projects {
        let title: String = Sentence(3..6).fake();
        let title = title.trim_end_matches('.').to_string();
        let slug = first_free_slug(&slug_base(&title, "project"), &taken_slugs);
        taken_slugs.insert(slug.clone());

        project_repo
            .create(Project {
                id: Uuid::new_v4(),
                title,
                slug: slug.clone(),
                category_id: categories.get(i % categories.len()).map(|c| c.id),
                short_description: Sentence(10..20).fake(),
                full_description: Paragraph(4..8).fake(),
                image_path: format!("projects/seed/{}.jpg", slug),
                location: "Mombasa, Kenya".to_string(),
                status: ProjectStatus::Planning,
                start_date: None,
                end_date: None,
                beneficiaries: 0,
                budget_cents: None,
                funds_raised_cents: 0,
                is_featured: false,
                is_active: true,
                display_order: 10 + i as i64,
                views: 0,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            })
            .await?;
    }
    println!("  ✅ Created {} projects", 4 + args.extra_projects);

    // Updates and a partner for the first project
    if let Some(project_id) = first_project_id {
        project_repo
            .add_update(ProjectUpdate {
                id: Uuid::new_v4(),
                project_id,
                title: "Borehole drilling complete".to_string(),
                content: Paragraph(2..4).fake(),
                image_path: None,
                is_milestone: true,
                created_at: Utc::now() - Duration::days(14),
            })
            .await?;

        let partner = project_repo
            .create_partner(ProjectPartner {
                id: Uuid::new_v4(),
                name: "Maji Trust".to_string(),
                logo_path: "partners/maji-trust.png".to_string(),
                website: Some("https://example.org/maji".to_string()),
                description: Sentence(8..14).fake(),
                is_active: true,
            })
            .await?;
        project_repo.link_partner(project_id, partner.id).await?;
        println!("  ✅ Added a project update and partner");
    }

    // Team members
    println!("👥 Creating team members...");
    let mut team_slugs: HashSet<String> = HashSet::new();
    let members = [
        ("Amina Otieno", "Executive Director", Some((1985, 4, 12)), Some("KE8833271")),
        ("Daniel Mwangi", "Programmes Lead", Some((1990, 11, 3)), Some("KE5510094")),
        ("Grace Njeri", "Youth Ambassador", Some((2009, 2, 20)), None),
    ];
    for (i, (name, role, dob, national_id)) in members.into_iter().enumerate() {
        let slug = first_free_slug(&slug_base(name, "member"), &team_slugs);
        team_slugs.insert(slug.clone());

        team_repo
            .create(TeamMember {
                id: Uuid::new_v4(),
                name: name.to_string(),
                slug,
                role: Some(role.to_string()),
                bio: Some(Paragraph(2..4).fake()),
                date_of_birth: dob.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
                national_id: national_id.map(|id| id.to_string()),
                national_id_verified: national_id.is_some() && i == 0,
                photo_path: None,
                photo_status: PhotoStatus::Pending,
                display_order: i as i64,
                is_active: true,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            })
            .await?;
    }
    println!("  ✅ Created {} team members", members.len());

    // Blog posts
    println!("📝 Creating blog posts...");
    let mut post_slugs: HashSet<String> = HashSet::new();
    for (days_ago, title) in [
        (21, "A new well for Kibera"),
        (10, "Library rebuild handover day"),
        (2, "Volunteer spotlight"),
    ] {
        let slug = first_free_slug(&slug_base(title, "post"), &post_slugs);
        post_slugs.insert(slug.clone());

        let published = Utc::now() - Duration::days(days_ago);
        blog_repo
            .create(BlogPost {
                id: Uuid::new_v4(),
                title: title.to_string(),
                slug,
                excerpt: Sentence(12..20).fake(),
                body: Paragraph(6..10).fake(),
                cover_path: None,
                is_published: true,
                published_at: Some(published),
                created_at: published,
                updated_at: published,
            })
            .await?;
    }
    println!("  ✅ Created 3 blog posts");

    // Events
    println!("📅 Creating events...");
    for (offset_days, title) in [
        (14i64, "Annual Charity Run"),
        (30, "Community Clean-up Day"),
        (-20, "Donor Appreciation Evening"),
    ] {
        let starts_at = Utc::now() + Duration::days(offset_days);
        event_repo
            .create(Event {
                id: Uuid::new_v4(),
                title: title.to_string(),
                description: Paragraph(2..4).fake(),
                location: Some("Community Hall, Nairobi".to_string()),
                starts_at,
                ends_at: Some(starts_at + Duration::hours(3)),
                image_path: None,
                is_active: true,
                created_at: Utc::now(),
            })
            .await?;
    }
    println!("  ✅ Created 3 events");

    // Gallery
    println!("🖼️  Creating gallery images...");
    for i in 0..6 {
        gallery_repo
            .create(GalleryImage {
                id: Uuid::new_v4(),
                image_path: format!("gallery/seed/photo-{}.jpg", i + 1),
                caption: Sentence(4..8).fake(),
                taken_at: NaiveDate::from_ymd_opt(2025, 1 + i as u32, 15),
                display_order: i,
                created_at: Utc::now(),
            })
            .await?;
    }
    println!("  ✅ Created 6 gallery images");

    println!("\n✨ Database seeding complete!");

    Ok(())
}
