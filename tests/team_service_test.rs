use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use chrono::NaiveDate;
use sqlx::SqlitePool;
use tempfile::TempDir;

use betterhome::{
    domain::{CreateTeamMemberRequest, PhotoStatus, TeamMember, UpdateTeamMemberRequest},
    error::AppError,
    media::{FsPhotoStore, PhotoStore, PhotoUpload},
    repository::{SqliteTeamRepository, TeamRepository},
    service::TeamService,
};

async fn setup() -> anyhow::Result<(TeamService, Arc<SqliteTeamRepository>, TempDir)> {
    let pool = SqlitePool::connect(":memory:").await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let repo = Arc::new(SqliteTeamRepository::new(pool));
    let dir = TempDir::new()?;
    let store = Arc::new(FsPhotoStore::new(dir.path()));
    let service = TeamService::new(repo.clone(), store);

    Ok((service, repo, dir))
}

fn png_upload(filename: &str, width: u32, height: u32) -> PhotoUpload {
    let img = image::DynamicImage::ImageRgba8(image::RgbaImage::from_pixel(
        width,
        height,
        image::Rgba([10, 60, 200, 255]),
    ));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png).unwrap();
    PhotoUpload::new(filename, out.into_inner())
}

fn adult_request(name: &str, national_id: Option<&str>) -> CreateTeamMemberRequest {
    CreateTeamMemberRequest {
        name: name.to_string(),
        slug: None,
        role: Some("Programmes Lead".to_string()),
        bio: None,
        date_of_birth: NaiveDate::from_ymd_opt(1990, 5, 1),
        national_id: national_id.map(|id| id.to_string()),
        national_id_verified: false,
        display_order: 0,
        is_active: true,
    }
}

fn count_files(dir: &Path) -> usize {
    let mut count = 0;
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                count += count_files(&path);
            } else {
                count += 1;
            }
        }
    }
    count
}

#[tokio::test]
async fn adult_without_national_id_is_rejected() -> anyhow::Result<()> {
    let (service, repo, _dir) = setup().await?;

    let err = service
        .create_member(adult_request("Jane Doe", None), png_upload("jane.png", 40, 40))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Validation(msg) if msg == "national_id required"));
    assert!(repo.list(10, 0).await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn minor_with_national_id_is_rejected() -> anyhow::Result<()> {
    let (service, _repo, _dir) = setup().await?;

    let request = CreateTeamMemberRequest {
        date_of_birth: NaiveDate::from_ymd_opt(2015, 1, 1),
        ..adult_request("Young Volunteer", Some("KE12345"))
    };

    let err = service
        .create_member(request, png_upload("kid.png", 40, 40))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Validation(msg) if msg == "national_id not allowed under 18"));

    Ok(())
}

#[tokio::test]
async fn create_assigns_slug_and_optimizes_photo() -> anyhow::Result<()> {
    let (service, repo, dir) = setup().await?;

    let member = service
        .create_member(
            adult_request("Jane Doe", Some("KE900112")),
            png_upload("portrait.png", 800, 600),
        )
        .await?;

    assert_eq!(member.slug, "jane-doe");
    assert_eq!(member.photo_status, PhotoStatus::Optimized);

    let photo_path = member.photo_path.expect("photo stored");
    let on_disk = dir.path().join(&photo_path);
    assert!(on_disk.exists());

    // Optimization square-crops and caps at 500x500.
    let stored = image::open(&on_disk)?;
    assert_eq!((stored.width(), stored.height()), (500, 500));

    // Round-trips through the repository.
    let found = repo.find_by_slug("jane-doe").await?.expect("member persisted");
    assert_eq!(found.national_id.as_deref(), Some("KE900112"));

    Ok(())
}

#[tokio::test]
async fn second_member_with_same_name_gets_suffixed_slug() -> anyhow::Result<()> {
    let (service, _repo, _dir) = setup().await?;

    let first = service
        .create_member(
            adult_request("Jane Doe", Some("KE900112")),
            png_upload("a.png", 40, 40),
        )
        .await?;
    let second = service
        .create_member(
            adult_request("Jane Doe", Some("KE900113")),
            png_upload("b.png", 40, 40),
        )
        .await?;

    assert_eq!(first.slug, "jane-doe");
    assert_eq!(second.slug, "jane-doe-1");

    Ok(())
}

#[tokio::test]
async fn update_keeps_slug_and_replaces_photo() -> anyhow::Result<()> {
    let (service, repo, dir) = setup().await?;

    let member = service
        .create_member(
            adult_request("Amina Otieno", Some("KE883327")),
            png_upload("old.png", 120, 120),
        )
        .await?;
    let old_path = member.photo_path.clone().expect("photo stored");

    let updated = service
        .update_member(
            member.id,
            UpdateTeamMemberRequest {
                name: "Amina A. Otieno".to_string(),
                role: Some("Executive Director".to_string()),
                bio: None,
                date_of_birth: member.date_of_birth,
                national_id: member.national_id.clone(),
                national_id_verified: true,
                display_order: 1,
                is_active: true,
            },
            Some(png_upload("new.png", 120, 120)),
        )
        .await?;

    // Slug is assigned once and survives renames.
    assert_eq!(updated.slug, member.slug);
    assert_eq!(updated.name, "Amina A. Otieno");

    let new_path = updated.photo_path.clone().expect("photo stored");
    assert_ne!(new_path, old_path);
    assert!(!dir.path().join(&old_path).exists());
    assert!(dir.path().join(&new_path).exists());

    // Exactly one file remains on disk for this member.
    assert_eq!(count_files(dir.path()), 1);

    let found = repo.find_by_id(member.id).await?.expect("still present");
    assert_eq!(found.photo_path.as_deref(), Some(new_path.as_str()));

    Ok(())
}

#[tokio::test]
async fn update_without_photo_leaves_file_alone() -> anyhow::Result<()> {
    let (service, _repo, dir) = setup().await?;

    let member = service
        .create_member(
            adult_request("Daniel Mwangi", Some("KE551009")),
            png_upload("daniel.png", 80, 80),
        )
        .await?;

    let updated = service
        .update_member(
            member.id,
            UpdateTeamMemberRequest {
                name: member.name.clone(),
                role: None,
                bio: Some("Now with a bio".to_string()),
                date_of_birth: member.date_of_birth,
                national_id: member.national_id.clone(),
                national_id_verified: false,
                display_order: 0,
                is_active: true,
            },
            None,
        )
        .await?;

    assert_eq!(updated.photo_path, member.photo_path);
    assert_eq!(count_files(dir.path()), 1);

    Ok(())
}

#[tokio::test]
async fn delete_removes_record_then_photo() -> anyhow::Result<()> {
    let (service, repo, dir) = setup().await?;

    let member = service
        .create_member(
            adult_request("Grace Njeri", Some("KE123456")),
            png_upload("grace.png", 60, 60),
        )
        .await?;
    let photo_path = member.photo_path.clone().expect("photo stored");
    assert!(dir.path().join(&photo_path).exists());

    service.delete_member(member.id).await?;

    assert!(repo.find_by_id(member.id).await?.is_none());
    assert!(!dir.path().join(&photo_path).exists());
    assert_eq!(count_files(dir.path()), 0);

    Ok(())
}

#[tokio::test]
async fn delete_without_photo_does_not_error() -> anyhow::Result<()> {
    let (service, repo, _dir) = setup().await?;

    // Seeded directly through the repository, with no photo on disk.
    let now = chrono::Utc::now();
    let member = repo
        .create(TeamMember {
            id: uuid::Uuid::new_v4(),
            name: "No Photo".to_string(),
            slug: "no-photo".to_string(),
            role: None,
            bio: None,
            date_of_birth: None,
            national_id: None,
            national_id_verified: false,
            photo_path: None,
            photo_status: PhotoStatus::Pending,
            display_order: 0,
            is_active: true,
            created_at: now,
            updated_at: now,
        })
        .await?;

    service.delete_member(member.id).await?;
    assert!(repo.find_by_id(member.id).await?.is_none());

    Ok(())
}

#[tokio::test]
async fn failed_optimization_keeps_record_and_original_bytes() -> anyhow::Result<()> {
    let (service, repo, dir) = setup().await?;

    // Valid extension, bytes no codec can decode.
    let garbage = PhotoUpload::new("broken.jpg", b"definitely not a jpeg".to_vec());

    let member = service
        .create_member(adult_request("Broken Photo", Some("KE777001")), garbage)
        .await?;

    assert_eq!(member.photo_status, PhotoStatus::Unoptimized);

    let photo_path = member.photo_path.clone().expect("photo stored");
    let stored = std::fs::read(dir.path().join(&photo_path))?;
    assert_eq!(stored, b"definitely not a jpeg");

    // The record is committed and readable despite the failure.
    let found = repo.find_by_id(member.id).await?.expect("record committed");
    assert_eq!(found.photo_status, PhotoStatus::Unoptimized);

    Ok(())
}

#[tokio::test]
async fn explicit_slug_is_respected() -> anyhow::Result<()> {
    let (service, _repo, _dir) = setup().await?;

    let request = CreateTeamMemberRequest {
        slug: Some("founder".to_string()),
        ..adult_request("Jane Doe", Some("KE900112"))
    };

    let member = service
        .create_member(request, png_upload("jane.png", 40, 40))
        .await?;
    assert_eq!(member.slug, "founder");

    Ok(())
}

#[tokio::test]
async fn duplicate_national_id_surfaces_as_conflict() -> anyhow::Result<()> {
    let (service, _repo, _dir) = setup().await?;

    service
        .create_member(
            adult_request("First Holder", Some("KE900112")),
            png_upload("a.png", 40, 40),
        )
        .await?;

    let err = service
        .create_member(
            adult_request("Second Holder", Some("KE900112")),
            png_upload("b.png", 40, 40),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Conflict(_)));

    Ok(())
}
