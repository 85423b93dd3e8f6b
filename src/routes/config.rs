//! Public config aggregator: the sole read path into the configuration.
//!
//! Fetches every settings/list key in parallel and substitutes a hard-coded
//! default for anything missing or malformed, so a fresh deploy (or a store
//! outage) still renders the site.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::store::{keys, read_json_lossy, ConfigStore};
use crate::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct ConfigResponse {
    pub hero: Value,
    pub branding: Value,
    pub showreel: Value,
    pub reels: Value,
    pub tools: Value,
    pub photography: Value,
    pub contact: Value,
    pub social: Value,
    pub seo: Value,
}

// Defaults used when the store is empty (first deploy / local).

fn default_hero() -> Value {
    json!({
        "titleLine1": "Hi, I'm Mohamed",
        "titleLine2": "I create Video Content and AI Automation.",
        "subtitle": null,
        "imageUrl": "https://cdn.bnsaied.com/others/hero.jpg",
        "techStack": [],
        "openToWorkEmail": "contact@bnsaied.com",
    })
}

fn default_branding() -> Value {
    json!({
        "logoUrl": "https://cdn.bnsaied.com/others/logo.png",
        "cvUrl": "https://cdn.bnsaied.com/others/Mohamed%20Said%20CV%202025%20UPDATED%202.pdf",
    })
}

fn default_contact() -> Value {
    json!({
        "primaryEmail": "contact@bnsaied.com",
        "whatsappNumber": "971524627678",
    })
}

fn default_social() -> Value {
    json!({
        "linkedin": "https://www.linkedin.com/in/bnsaied",
        "instagram": "https://www.instagram.com/mosacontent",
        "behance": "https://www.behance.net/bn_sa3ed",
    })
}

fn default_seo() -> Value {
    json!({
        "siteTitle": "Mohamed Said Mohamed | Video Editor & AI Specialist in Dubai",
        "metaDescription": "Mohamed Said Mohamed - Professional Video Editor, Cinematographer, and AI Specialist based in Dubai. Creating viral video content, AI automation tools, and stunning photography for brands worldwide.",
        "keywords": "video editor, cinematographer, AI specialist, Dubai, content creator, video production, photography, viral reels, AI automation",
        "canonicalUrl": "https://bnsaied.com/",
        "ogImageUrl": "https://cdn.bnsaied.com/others/hero.jpg",
    })
}

fn empty_list() -> Value {
    Value::Array(Vec::new())
}

fn all_defaults() -> ConfigResponse {
    ConfigResponse {
        hero: default_hero(),
        branding: default_branding(),
        showreel: Value::Null,
        reels: empty_list(),
        tools: empty_list(),
        photography: empty_list(),
        contact: default_contact(),
        social: default_social(),
        seo: default_seo(),
    }
}

async fn aggregate(store: &dyn ConfigStore) -> ConfigResponse {
    // Pure fan-out/fan-in; the branches share no mutable state.
    let (hero, branding, showreel, reels, tools, photography, contact, social, seo) = tokio::join!(
        read_json_lossy(store, keys::HERO, default_hero),
        read_json_lossy(store, keys::BRANDING, default_branding),
        read_json_lossy(store, keys::SHOWREEL, || Value::Null),
        read_json_lossy(store, keys::REELS, empty_list),
        read_json_lossy(store, keys::TOOLS, empty_list),
        read_json_lossy(store, keys::PHOTO_CATEGORIES, empty_list),
        read_json_lossy(store, keys::CONTACT, default_contact),
        read_json_lossy(store, keys::SOCIAL, default_social),
        read_json_lossy(store, keys::SEO, default_seo),
    );
    ConfigResponse {
        hero,
        branding,
        showreel,
        reels,
        tools,
        photography,
        contact,
        social,
        seo,
    }
}

/// GET /api/config
///
/// Unauthenticated; served with a permissive cross-origin header so any
/// frontend deployment can fetch it.
pub async fn get_config(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let body = match state.config.as_deref() {
        Some(store) => aggregate(store).await,
        None => all_defaults(),
    };
    (
        StatusCode::OK,
        [(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")],
        Json(body),
    )
}
