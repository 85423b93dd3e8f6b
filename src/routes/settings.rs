//! Settings writers: hero, contact, social, and SEO.
//!
//! Each PUT whitelists the recognized fields for its domain by
//! deserializing into the canonical struct (unknown fields are dropped,
//! absent fields become `null`) and overwrites the store key wholesale.
//! Hero is the one partial exception: `imageUrl` belongs to the hero-image
//! uploader and is carried over from the stored document on every text
//! write.

use std::sync::Arc;

use axum::{extract::State, http::HeaderMap, Json};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::error::ApiError;
use crate::routes::{config_store, parse_json_body, require_admin};
use crate::store::{keys, read_json_lossy, write_json};
use crate::AppState;

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroSettings {
    pub title_line1: Option<String>,
    pub title_line2: Option<String>,
    pub subtitle: Option<String>,
    pub image_url: Option<String>,
    pub tech_stack: Option<Vec<String>>,
    pub open_to_work_email: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSettings {
    pub primary_email: Option<String>,
    pub whatsapp_number: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SocialSettings {
    pub linkedin: Option<String>,
    pub instagram: Option<String>,
    pub behance: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoSettings {
    pub site_title: Option<String>,
    pub meta_description: Option<String>,
    pub keywords: Option<String>,
    pub canonical_url: Option<String>,
    pub og_image_url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HeroUpdateResponse {
    pub success: bool,
    pub hero: HeroSettings,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ContactUpdateResponse {
    pub success: bool,
    pub contact: ContactSettings,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SocialUpdateResponse {
    pub success: bool,
    pub social: SocialSettings,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SeoUpdateResponse {
    pub success: bool,
    pub seo: SeoSettings,
}

/// Shared overwrite path: auth, parse into the canonical shape, write.
async fn overwrite_settings<T>(
    state: &AppState,
    headers: &HeaderMap,
    body: &str,
    key: &str,
) -> Result<T, ApiError>
where
    T: DeserializeOwned + Serialize,
{
    require_admin(state, headers)?;
    let store = config_store(state)?;
    let canonical: T = parse_json_body(body)?;
    write_json(store, key, &canonical).await?;
    Ok(canonical)
}

/// PUT /api/admin/hero
pub async fn update_hero(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: String,
) -> Result<Json<HeroUpdateResponse>, ApiError> {
    require_admin(&state, &headers)?;
    let store = config_store(&state)?;
    let incoming: HeroSettings = parse_json_body(&body)?;

    // imageUrl is only ever set by the hero-image uploader; a text-only
    // update must not clear it.
    let stored: HeroSettings = read_json_lossy(store, keys::HERO, HeroSettings::default).await;
    let hero = HeroSettings {
        image_url: stored.image_url,
        ..incoming
    };

    write_json(store, keys::HERO, &hero).await?;
    Ok(Json(HeroUpdateResponse {
        success: true,
        hero,
    }))
}

/// PUT /api/admin/contact
pub async fn update_contact(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: String,
) -> Result<Json<ContactUpdateResponse>, ApiError> {
    let contact = overwrite_settings(&state, &headers, &body, keys::CONTACT).await?;
    Ok(Json(ContactUpdateResponse {
        success: true,
        contact,
    }))
}

/// PUT /api/admin/social
pub async fn update_social(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: String,
) -> Result<Json<SocialUpdateResponse>, ApiError> {
    let social = overwrite_settings(&state, &headers, &body, keys::SOCIAL).await?;
    Ok(Json(SocialUpdateResponse {
        success: true,
        social,
    }))
}

/// PUT /api/admin/seo
pub async fn update_seo(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: String,
) -> Result<Json<SeoUpdateResponse>, ApiError> {
    let seo = overwrite_settings(&state, &headers, &body, keys::SEO).await?;
    Ok(Json(SeoUpdateResponse { success: true, seo }))
}
