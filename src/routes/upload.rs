//! Asset uploaders: hero image, branding logo/CV, showreel, reels, and
//! photo batches.
//!
//! Each handler writes the uploaded bytes to the media store under a
//! generated key, derives the public URL, and merges that URL into the
//! associated config document.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Multipart, State},
    http::HeaderMap,
    Json,
};
use chrono::Utc;
use rand::distr::{Alphanumeric, SampleString};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::error::ApiError;
use crate::routes::{config_store, media_store, now_millis_id, require_admin};
use crate::store::{keys, read_json_lossy, write_json, MediaStore};
use crate::AppState;

/// Path marker used to recover a blob key from a media URL when the
/// configured public base does not match (e.g. the base changed since the
/// blob was stored). Matches the path under which local media is served.
const MEDIA_PATH_MARKER: &str = "/media/";

#[derive(Debug, Serialize, Deserialize)]
pub struct AssetUploadResponse {
    pub success: bool,
    pub key: String,
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandingUploadResponse {
    pub success: bool,
    pub branding: Value,
    pub logo_url: Option<String>,
    pub cv_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reel {
    pub id: String,
    pub title: String,
    pub video_url: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReelUploadResponse {
    pub success: bool,
    pub reel: Reel,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowreelSettings {
    pub video_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoImage {
    pub id: String,
    pub image_url: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoUploadResponse {
    pub success: bool,
    pub category_id: String,
    pub images: Vec<PhotoImage>,
}

// ============================================================================
// Multipart plumbing
// ============================================================================

pub(crate) struct UploadedFile {
    pub filename: Option<String>,
    pub bytes: Bytes,
}

/// Drained multipart form: file parts keyed by field name, text parts as
/// plain values. A part with a filename is a file, otherwise text, matching
/// browser FormData semantics.
#[derive(Default)]
pub(crate) struct UploadForm {
    files: Vec<(String, UploadedFile)>,
    values: HashMap<String, String>,
}

impl UploadForm {
    fn file(&self, name: &str) -> Option<&UploadedFile> {
        self.files.iter().find(|(n, _)| n == name).map(|(_, f)| f)
    }

    fn files_named(&self, name: &str) -> Vec<&UploadedFile> {
        self.files
            .iter()
            .filter(|(n, _)| n == name)
            .map(|(_, f)| f)
            .collect()
    }

    fn value(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }
}

async fn read_form(mut multipart: Multipart) -> Result<UploadForm, ApiError> {
    let mut form = UploadForm::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| ApiError::Validation("Invalid multipart data".to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        let filename = field.file_name().map(str::to_string);
        if filename.is_some() {
            let bytes = field
                .bytes()
                .await
                .map_err(|_| ApiError::Validation("Failed to read file data".to_string()))?;
            form.files.push((name, UploadedFile { filename, bytes }));
        } else {
            let text = field
                .text()
                .await
                .map_err(|_| ApiError::Validation("Invalid multipart data".to_string()))?;
            form.values.insert(name, text);
        }
    }
    Ok(form)
}

// ============================================================================
// Key and URL derivation
// ============================================================================

/// Extension of the original filename, or the type-specific fallback when
/// there is no dot.
fn extension_or<'a>(filename: Option<&'a str>, fallback: &'a str) -> &'a str {
    match filename.and_then(|f| f.rsplit_once('.')) {
        Some((_, ext)) if !ext.is_empty() => ext,
        _ => fallback,
    }
}

/// Public URL for a blob key: `<base>/<key>` when a public base is
/// configured, otherwise the raw key. Callers must tolerate either form.
fn public_url(public_base: Option<&str>, key: &str) -> String {
    match public_base {
        Some(base) if !base.is_empty() => format!("{base}/{key}"),
        _ => key.to_string(),
    }
}

/// Best-effort reverse of [`public_url`]: strip the public base prefix, or
/// else locate the media path marker.
fn resolve_media_key(url: &str, public_base: Option<&str>) -> Option<String> {
    if let Some(base) = public_base.filter(|b| !b.is_empty()) {
        if let Some(rest) = url.strip_prefix(base).and_then(|r| r.strip_prefix('/')) {
            return Some(rest.to_string());
        }
    }
    url.find(MEDIA_PATH_MARKER)
        .map(|idx| url[idx + MEDIA_PATH_MARKER.len()..].to_string())
}

fn random_suffix() -> String {
    Alphanumeric
        .sample_string(&mut rand::rng(), 6)
        .to_lowercase()
}

async fn store_blob(
    media: &dyn MediaStore,
    key: &str,
    file: &UploadedFile,
) -> Result<(), ApiError> {
    media.put(key, &file.bytes).await?;
    tracing::info!(key, size = file.bytes.len(), "blob stored");
    Ok(())
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/admin/upload/hero-image
///
/// Uploads the hero image and merges its URL into the hero settings,
/// preserving every other field.
pub async fn upload_hero_image(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<Json<AssetUploadResponse>, ApiError> {
    require_admin(&state, &headers)?;
    let store = config_store(&state)?;
    let media = media_store(&state)?;

    let form = read_form(multipart).await?;
    let file = form
        .file("file")
        .ok_or_else(|| ApiError::Validation("File is required".to_string()))?;

    let ext = extension_or(file.filename.as_deref(), "jpg");
    let key = format!("hero/hero-{}.{ext}", Utc::now().timestamp_millis());
    store_blob(media, &key, file).await?;
    let url = public_url(state.public_base.as_deref(), &key);

    let mut hero = match read_json_lossy(store, keys::HERO, || Value::Null).await {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    hero.insert("imageUrl".to_string(), Value::String(url.clone()));
    write_json(store, keys::HERO, &Value::Object(hero)).await?;

    Ok(Json(AssetUploadResponse {
        success: true,
        key,
        url,
    }))
}

/// POST /api/admin/upload/branding
///
/// Accepts `logoFile` and/or `cvFile`; either, both, or neither may be
/// present. Only the uploaded URL(s) are merged into the branding document;
/// a request with neither file still echoes the current branding.
pub async fn upload_branding(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<Json<BrandingUploadResponse>, ApiError> {
    require_admin(&state, &headers)?;
    let store = config_store(&state)?;
    let media = media_store(&state)?;

    let form = read_form(multipart).await?;

    let mut logo_url = None;
    if let Some(file) = form.file("logoFile") {
        let ext = extension_or(file.filename.as_deref(), "png");
        let key = format!("branding/logo-{}.{ext}", Utc::now().timestamp_millis());
        store_blob(media, &key, file).await?;
        logo_url = Some(public_url(state.public_base.as_deref(), &key));
    }

    let mut cv_url = None;
    if let Some(file) = form.file("cvFile") {
        let ext = extension_or(file.filename.as_deref(), "pdf");
        let key = format!("cv/cv-{}.{ext}", Utc::now().timestamp_millis());
        store_blob(media, &key, file).await?;
        cv_url = Some(public_url(state.public_base.as_deref(), &key));
    }

    let mut branding = match read_json_lossy(store, keys::BRANDING, || Value::Null).await {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    if let Some(url) = &logo_url {
        branding.insert("logoUrl".to_string(), Value::String(url.clone()));
    }
    if let Some(url) = &cv_url {
        branding.insert("cvUrl".to_string(), Value::String(url.clone()));
    }
    let branding = Value::Object(branding);
    write_json(store, keys::BRANDING, &branding).await?;

    Ok(Json(BrandingUploadResponse {
        success: true,
        branding,
        logo_url,
        cv_url,
    }))
}

/// POST /api/admin/upload/showreel
///
/// Uploads the new showreel, best-effort deletes the previous blob, then
/// overwrites the showreel settings. Cleanup failures never fail the
/// request.
pub async fn upload_showreel(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<Json<AssetUploadResponse>, ApiError> {
    require_admin(&state, &headers)?;
    let store = config_store(&state)?;
    let media = media_store(&state)?;

    let form = read_form(multipart).await?;
    let file = form
        .file("file")
        .ok_or_else(|| ApiError::Validation("File is required".to_string()))?;

    let ext = extension_or(file.filename.as_deref(), "mp4");
    let key = format!("showreel/showreel-{}.{ext}", Utc::now().timestamp_millis());
    store_blob(media, &key, file).await?;
    let url = public_url(state.public_base.as_deref(), &key);

    let previous: ShowreelSettings =
        read_json_lossy(store, keys::SHOWREEL, || ShowreelSettings { video_url: None }).await;
    if let Some(old_key) = previous
        .video_url
        .as_deref()
        .and_then(|old| resolve_media_key(old, state.public_base.as_deref()))
    {
        if let Err(err) = media.delete(&old_key).await {
            tracing::warn!(key = %old_key, %err, "old showreel cleanup failed, ignoring");
        }
    }

    write_json(
        store,
        keys::SHOWREEL,
        &ShowreelSettings {
            video_url: Some(url.clone()),
        },
    )
    .await?;

    Ok(Json(AssetUploadResponse {
        success: true,
        key,
        url,
    }))
}

/// POST /api/admin/upload/reel
///
/// Uploads a reel video and appends a new entry to the reels list.
pub async fn upload_reel(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<Json<ReelUploadResponse>, ApiError> {
    require_admin(&state, &headers)?;
    let store = config_store(&state)?;
    let media = media_store(&state)?;

    let form = read_form(multipart).await?;
    let file = form
        .file("file")
        .ok_or_else(|| ApiError::Validation("File is required".to_string()))?;
    let title = form
        .value("title")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or("Reel")
        .to_string();

    let id = now_millis_id();
    let ext = extension_or(file.filename.as_deref(), "mp4");
    let key = format!("reels/{id}.{ext}");
    store_blob(media, &key, file).await?;
    let url = public_url(state.public_base.as_deref(), &key);

    let reel = Reel {
        id,
        title,
        video_url: url,
    };
    let mut reels: Vec<Reel> = read_json_lossy(store, keys::REELS, Vec::new).await;
    reels.push(reel.clone());
    write_json(store, keys::REELS, &reels).await?;

    Ok(Json(ReelUploadResponse {
        success: true,
        reel,
    }))
}

/// POST /api/admin/upload/photo
///
/// Batch-uploads photos into an existing category. All new image entries are
/// appended in one combined write so a single request cannot drop its own
/// entries; concurrent requests to the same category still race.
pub async fn upload_photo(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<Json<PhotoUploadResponse>, ApiError> {
    require_admin(&state, &headers)?;
    let store = config_store(&state)?;
    let media = media_store(&state)?;

    let form = read_form(multipart).await?;
    let category_id = form
        .value("categoryId")
        .map(str::to_string)
        .ok_or_else(|| ApiError::Validation("categoryId is required".to_string()))?;

    let files = form.files_named("files");
    if files.is_empty() {
        return Err(ApiError::Validation(
            "At least one file is required".to_string(),
        ));
    }

    let mut categories: Vec<Value> =
        read_json_lossy(store, keys::PHOTO_CATEGORIES, Vec::new).await;
    let idx = categories
        .iter()
        .position(|c| c.get("id").and_then(Value::as_str) == Some(category_id.as_str()))
        .ok_or_else(|| ApiError::NotFound("Category not found".to_string()))?;

    let mut uploaded = Vec::with_capacity(files.len());
    for file in files {
        let ext = extension_or(file.filename.as_deref(), "jpg");
        // timestamp alone can collide within one batch; add a random suffix
        let photo_id = format!("{}-{}", Utc::now().timestamp_millis(), random_suffix());
        let key = format!("photography/{category_id}/{photo_id}.{ext}");
        store_blob(media, &key, file).await?;
        uploaded.push(PhotoImage {
            id: photo_id,
            image_url: public_url(state.public_base.as_deref(), &key),
        });
    }

    let new_entries: Vec<Value> = uploaded
        .iter()
        .map(|img| json!({"id": img.id, "imageUrl": img.image_url}))
        .collect();
    if let Some(category) = categories[idx].as_object_mut() {
        let images = category
            .entry("images")
            .or_insert_with(|| Value::Array(Vec::new()));
        match images {
            Value::Array(list) => list.extend(new_entries),
            // a non-array images field is replaced, mirroring the lossy-read
            // policy for malformed stored state
            other => *other = Value::Array(new_entries),
        }
    }
    write_json(store, keys::PHOTO_CATEGORIES, &categories).await?;

    Ok(Json(PhotoUploadResponse {
        success: true,
        category_id,
        images: uploaded,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::testing::{
        multipart_body, send, test_app, test_app_with_base, unbound_app, Part, ADMIN_COOKIE,
    };
    use crate::store::ConfigStore;
    use axum::http::StatusCode;

    #[test]
    fn extension_fallbacks() {
        assert_eq!(extension_or(Some("clip.MP4"), "mp4"), "MP4");
        assert_eq!(extension_or(Some("archive.tar.gz"), "bin"), "gz");
        assert_eq!(extension_or(Some("noext"), "jpg"), "jpg");
        assert_eq!(extension_or(Some("trailing."), "png"), "png");
        assert_eq!(extension_or(None, "pdf"), "pdf");
    }

    #[test]
    fn public_url_forms() {
        assert_eq!(
            public_url(Some("https://cdn.example.com"), "hero/h.jpg"),
            "https://cdn.example.com/hero/h.jpg"
        );
        assert_eq!(public_url(None, "hero/h.jpg"), "hero/h.jpg");
        assert_eq!(public_url(Some(""), "hero/h.jpg"), "hero/h.jpg");
    }

    #[test]
    fn media_key_resolution() {
        assert_eq!(
            resolve_media_key(
                "https://cdn.example.com/showreel/old.mp4",
                Some("https://cdn.example.com")
            ),
            Some("showreel/old.mp4".to_string())
        );
        assert_eq!(
            resolve_media_key("https://other.host/media/showreel/old.mp4", None),
            Some("showreel/old.mp4".to_string())
        );
        assert_eq!(
            resolve_media_key("https://elsewhere.example/x.mp4", Some("https://cdn.example.com")),
            None
        );
    }

    #[tokio::test]
    async fn hero_image_upload_merges_image_url() {
        let app = test_app_with_base(Some("https://cdn.example.com"));
        app.config
            .put("settings:hero", r#"{"titleLine1":"hi","subtitle":"sub"}"#)
            .await
            .unwrap();

        let (content_type, body) = multipart_body(&[Part::File {
            name: "file",
            filename: "me.png",
            bytes: b"imagebytes",
        }]);
        let (status, bytes) = send(
            app.router(),
            "POST",
            "/api/admin/upload/hero-image",
            Some(ADMIN_COOKIE),
            Some((&content_type, body)),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let response: AssetUploadResponse = serde_json::from_slice(&bytes).unwrap();
        assert!(response.key.starts_with("hero/hero-"));
        assert!(response.key.ends_with(".png"));
        assert_eq!(
            response.url,
            format!("https://cdn.example.com/{}", response.key)
        );
        assert!(app.media.contains(&response.key).await);

        let hero: Value =
            serde_json::from_str(&app.config.get("settings:hero").await.unwrap().unwrap())
                .unwrap();
        assert_eq!(hero["titleLine1"], "hi");
        assert_eq!(hero["subtitle"], "sub");
        assert_eq!(hero["imageUrl"], response.url);
    }

    #[tokio::test]
    async fn hero_image_without_file_is_bad_request() {
        let app = test_app();
        let (content_type, body) = multipart_body(&[Part::Text {
            name: "note",
            value: "no file here",
        }]);
        let (status, _) = send(
            app.router(),
            "POST",
            "/api/admin/upload/hero-image",
            Some(ADMIN_COOKIE),
            Some((&content_type, body)),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn branding_logo_then_cv_preserves_logo_url() {
        let app = test_app();

        let (content_type, body) = multipart_body(&[Part::File {
            name: "logoFile",
            filename: "logo.svg",
            bytes: b"logo",
        }]);
        let (status, bytes) = send(
            app.router(),
            "POST",
            "/api/admin/upload/branding",
            Some(ADMIN_COOKIE),
            Some((&content_type, body)),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let first: BrandingUploadResponse = serde_json::from_slice(&bytes).unwrap();
        let logo_url = first.logo_url.unwrap();
        assert!(logo_url.starts_with("branding/logo-"));
        assert!(first.cv_url.is_none());

        let (content_type, body) = multipart_body(&[Part::File {
            name: "cvFile",
            filename: "cv.pdf",
            bytes: b"cv",
        }]);
        let (_, bytes) = send(
            app.router(),
            "POST",
            "/api/admin/upload/branding",
            Some(ADMIN_COOKIE),
            Some((&content_type, body)),
        )
        .await;
        let second: BrandingUploadResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(second.branding["logoUrl"], Value::String(logo_url));
        assert!(second.branding["cvUrl"]
            .as_str()
            .unwrap()
            .starts_with("cv/cv-"));
    }

    #[tokio::test]
    async fn branding_with_no_files_echoes_current_branding() {
        let app = test_app();
        app.config
            .put("settings:branding", r#"{"logoUrl":"keep.png"}"#)
            .await
            .unwrap();

        let (content_type, body) = multipart_body(&[]);
        let (status, bytes) = send(
            app.router(),
            "POST",
            "/api/admin/upload/branding",
            Some(ADMIN_COOKIE),
            Some((&content_type, body)),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let response: BrandingUploadResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(response.branding["logoUrl"], "keep.png");
        assert!(response.logo_url.is_none());
        assert!(response.cv_url.is_none());
    }

    #[tokio::test]
    async fn showreel_upload_deletes_previous_blob() {
        let app = test_app_with_base(Some("https://cdn.example.com"));
        app.media.put("showreel/old.mp4", b"old").await.unwrap();
        app.config
            .put(
                "settings:showreel",
                r#"{"videoUrl":"https://cdn.example.com/showreel/old.mp4"}"#,
            )
            .await
            .unwrap();

        let (content_type, body) = multipart_body(&[Part::File {
            name: "file",
            filename: "new.mov",
            bytes: b"new",
        }]);
        let (status, bytes) = send(
            app.router(),
            "POST",
            "/api/admin/upload/showreel",
            Some(ADMIN_COOKIE),
            Some((&content_type, body)),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let response: AssetUploadResponse = serde_json::from_slice(&bytes).unwrap();
        assert!(response.key.ends_with(".mov"));
        assert!(!app.media.contains("showreel/old.mp4").await);
        assert!(app.media.contains(&response.key).await);

        let stored: ShowreelSettings =
            serde_json::from_str(&app.config.get("settings:showreel").await.unwrap().unwrap())
                .unwrap();
        assert_eq!(stored.video_url.as_deref(), Some(response.url.as_str()));
    }

    #[tokio::test]
    async fn showreel_upload_survives_unresolvable_old_url() {
        let app = test_app();
        app.config
            .put(
                "settings:showreel",
                r#"{"videoUrl":"https://elsewhere.example/clip.mp4"}"#,
            )
            .await
            .unwrap();

        let (content_type, body) = multipart_body(&[Part::File {
            name: "file",
            filename: "reel",
            bytes: b"v",
        }]);
        let (status, bytes) = send(
            app.router(),
            "POST",
            "/api/admin/upload/showreel",
            Some(ADMIN_COOKIE),
            Some((&content_type, body)),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let response: AssetUploadResponse = serde_json::from_slice(&bytes).unwrap();
        // no dot in the filename, so the type fallback applies
        assert!(response.key.ends_with(".mp4"));
    }

    #[tokio::test]
    async fn reel_upload_appends_with_default_title() {
        let app = test_app();

        let (content_type, body) = multipart_body(&[
            Part::Text {
                name: "title",
                value: "",
            },
            Part::File {
                name: "file",
                filename: "clip.webm",
                bytes: b"video",
            },
        ]);
        let (status, bytes) = send(
            app.router(),
            "POST",
            "/api/admin/upload/reel",
            Some(ADMIN_COOKIE),
            Some((&content_type, body)),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let response: ReelUploadResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(response.reel.title, "Reel");
        assert_eq!(response.reel.video_url, format!("reels/{}.webm", response.reel.id));

        let reels: Vec<Reel> =
            serde_json::from_str(&app.config.get("reels").await.unwrap().unwrap()).unwrap();
        assert_eq!(reels.len(), 1);
        assert_eq!(reels[0].id, response.reel.id);
    }

    #[tokio::test]
    async fn photo_upload_to_unknown_category_is_not_found_and_store_untouched() {
        let app = test_app();
        let seeded = r#"[{"id":"portraits","name":"Portraits","images":[]}]"#;
        app.config
            .put("photography:categories", seeded)
            .await
            .unwrap();

        let (content_type, body) = multipart_body(&[
            Part::Text {
                name: "categoryId",
                value: "nope",
            },
            Part::File {
                name: "files",
                filename: "a.jpg",
                bytes: b"img",
            },
        ]);
        let (status, _) = send(
            app.router(),
            "POST",
            "/api/admin/upload/photo",
            Some(ADMIN_COOKIE),
            Some((&content_type, body)),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            app.config.get("photography:categories").await.unwrap().unwrap(),
            seeded
        );
        assert!(app.media.keys().await.is_empty());
    }

    #[tokio::test]
    async fn photo_batch_appends_all_images_in_one_write() {
        let app = test_app();
        app.config
            .put(
                "photography:categories",
                r#"[{"id":"travel","name":"Travel","images":[{"id":"old","imageUrl":"x.jpg"}]}]"#,
            )
            .await
            .unwrap();

        let (content_type, body) = multipart_body(&[
            Part::Text {
                name: "categoryId",
                value: "travel",
            },
            Part::File {
                name: "files",
                filename: "one.jpg",
                bytes: b"1",
            },
            Part::File {
                name: "files",
                filename: "two.png",
                bytes: b"2",
            },
        ]);
        let (status, bytes) = send(
            app.router(),
            "POST",
            "/api/admin/upload/photo",
            Some(ADMIN_COOKIE),
            Some((&content_type, body)),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let response: PhotoUploadResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(response.category_id, "travel");
        assert_eq!(response.images.len(), 2);
        assert!(response.images[0]
            .image_url
            .starts_with("photography/travel/"));
        assert_ne!(response.images[0].id, response.images[1].id);

        let categories: Vec<Value> = serde_json::from_str(
            &app.config.get("photography:categories").await.unwrap().unwrap(),
        )
        .unwrap();
        let images = categories[0]["images"].as_array().unwrap();
        assert_eq!(images.len(), 3);
        assert_eq!(images[0]["id"], "old");
    }

    #[tokio::test]
    async fn photo_upload_without_category_or_files_is_bad_request() {
        let app = test_app();
        app.config
            .put("photography:categories", r#"[{"id":"c","images":[]}]"#)
            .await
            .unwrap();

        let (content_type, body) = multipart_body(&[Part::File {
            name: "files",
            filename: "a.jpg",
            bytes: b"img",
        }]);
        let (status, _) = send(
            app.router(),
            "POST",
            "/api/admin/upload/photo",
            Some(ADMIN_COOKIE),
            Some((&content_type, body)),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (content_type, body) = multipart_body(&[Part::Text {
            name: "categoryId",
            value: "c",
        }]);
        let (status, _) = send(
            app.router(),
            "POST",
            "/api/admin/upload/photo",
            Some(ADMIN_COOKIE),
            Some((&content_type, body)),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn uploads_require_admin_session() {
        let app = test_app();
        let (content_type, body) = multipart_body(&[Part::File {
            name: "file",
            filename: "a.jpg",
            bytes: b"img",
        }]);
        let (status, _) = send(
            app.router(),
            "POST",
            "/api/admin/upload/hero-image",
            None,
            Some((&content_type, body)),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(app.media.keys().await.is_empty());
    }

    #[tokio::test]
    async fn missing_bindings_fail_fast_with_internal_error() {
        let (content_type, body) = multipart_body(&[Part::File {
            name: "file",
            filename: "a.jpg",
            bytes: b"img",
        }]);
        let (status, _) = send(
            unbound_app(),
            "POST",
            "/api/admin/upload/hero-image",
            Some(ADMIN_COOKIE),
            Some((&content_type, body)),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
