use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    response::IntoResponse,
    Extension, Json,
};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::propertydb::{PropertyExt, PropertyFilter},
    dtos::propertydtos::{
        CreatePropertyDto, LocaleQueryDto, PropertyFilterQueryDto, PropertyListItemDto,
        UpdatePropertyDto,
    },
    error::{ErrorMessage, HttpError},
    middleware::AdminSession,
    models::propertymodel::{Property, PropertyTranslation},
    utils::slug::{is_valid_slug, sanitize_slug},
    AppState,
};

const DEFAULT_LOCALE: &str = "en";
const FEATURED_LIMIT: i64 = 6;

/// Translation for the requested locale, falling back to the default.
async fn resolve_translation(
    app_state: &AppState,
    property_id: Uuid,
    locale: &str,
) -> Result<Option<PropertyTranslation>, HttpError> {
    let translation = app_state
        .db_client
        .get_translation(property_id, locale)
        .await
        .map_err(HttpError::from_db_error)?;

    if translation.is_some() || locale == DEFAULT_LOCALE {
        return Ok(translation);
    }

    app_state
        .db_client
        .get_translation(property_id, DEFAULT_LOCALE)
        .await
        .map_err(HttpError::from_db_error)
}

/// List items for the public site. A row whose stored slug would not
/// survive sanitization produces a broken detail link, so it is skipped
/// with a warning instead of rendered.
async fn render_list_items(
    app_state: &AppState,
    properties: &[Property],
    locale: &str,
) -> Result<Vec<PropertyListItemDto>, HttpError> {
    let mut items = Vec::with_capacity(properties.len());

    for property in properties {
        if !is_valid_slug(&property.slug) || sanitize_slug(&property.slug) != property.slug {
            tracing::warn!(
                "skipping property {} with invalid slug {:?}",
                property.id,
                property.slug
            );
            continue;
        }

        let translation = resolve_translation(app_state, property.id, locale).await?;
        items.push(PropertyListItemDto::from_property(
            property,
            translation.as_ref(),
        ));
    }

    Ok(items)
}

pub async fn list_properties(
    Query(filter_params): Query<PropertyFilterQueryDto>,
    Query(locale_params): Query<LocaleQueryDto>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let filter = PropertyFilter::from_query(&filter_params);

    let properties = app_state
        .db_client
        .list_properties(&filter)
        .await
        .map_err(HttpError::from_db_error)?;

    let locale = locale_params
        .locale
        .unwrap_or_else(|| DEFAULT_LOCALE.to_string());
    let items = render_list_items(&app_state, &properties, &locale).await?;

    Ok(Json(json!({
        "status": "success",
        "data": {
            "properties": items,
            "total": items.len()
        }
    })))
}

pub async fn get_featured_properties(
    Query(locale_params): Query<LocaleQueryDto>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let properties = app_state
        .db_client
        .list_featured_properties(FEATURED_LIMIT)
        .await
        .map_err(HttpError::from_db_error)?;

    let locale = locale_params
        .locale
        .unwrap_or_else(|| DEFAULT_LOCALE.to_string());
    let items = render_list_items(&app_state, &properties, &locale).await?;

    Ok(Json(json!({
        "status": "success",
        "data": {
            "properties": items,
            "total": items.len()
        }
    })))
}

pub async fn get_property(
    Path(property_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let property = app_state
        .db_client
        .get_property(property_id)
        .await
        .map_err(HttpError::from_db_error)?
        .ok_or_else(|| HttpError::not_found(ErrorMessage::PropertyNotFound))?;

    let translations = app_state
        .db_client
        .get_translations(property.id)
        .await
        .map_err(HttpError::from_db_error)?;

    Ok(Json(json!({
        "status": "success",
        "data": {
            "property": property,
            "translations": translations
        }
    })))
}

pub async fn get_property_by_slug(
    Path(slug): Path<String>,
    Query(locale_params): Query<LocaleQueryDto>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let property = app_state
        .db_client
        .get_property_by_slug(&slug)
        .await
        .map_err(HttpError::from_db_error)?
        .ok_or_else(|| HttpError::not_found(ErrorMessage::PropertyNotFound))?;

    let locale = locale_params
        .locale
        .unwrap_or_else(|| DEFAULT_LOCALE.to_string());
    let translation = resolve_translation(&app_state, property.id, &locale).await?;

    Ok(Json(json!({
        "status": "success",
        "data": {
            "property": property,
            "translation": translation
        }
    })))
}

//Admin creates a listing
pub async fn create_property(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(admin): Extension<AdminSession>,
    Json(body): Json<CreatePropertyDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    if body.translations.is_empty() {
        return Err(HttpError::bad_request("At least one translation is required"));
    }

    // Slug from the request when given, otherwise from the default
    // translation's title
    let slug_source = body.slug.clone().unwrap_or_else(|| {
        body.translations
            .iter()
            .find(|t| t.locale == DEFAULT_LOCALE)
            .or_else(|| body.translations.first())
            .map(|t| t.title.clone())
            .unwrap_or_default()
    });

    let slug = sanitize_slug(&slug_source);
    if slug.is_empty() {
        return Err(HttpError::bad_request(ErrorMessage::SlugInvalid));
    }

    let property = app_state
        .db_client
        .create_property(&slug, &body)
        .await
        .map_err(HttpError::from_db_error)?;

    tracing::info!("property {} created by {}", property.id, admin.subject);

    let translations = app_state
        .db_client
        .get_translations(property.id)
        .await
        .map_err(HttpError::from_db_error)?;

    Ok(Json(json!({
        "status": "success",
        "message": "Property created successfully",
        "data": {
            "property": property,
            "translations": translations
        }
    })))
}

pub async fn update_property(
    Path(property_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(admin): Extension<AdminSession>,
    Json(body): Json<UpdatePropertyDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let slug = match &body.slug {
        Some(raw) => {
            let sanitized = sanitize_slug(raw);
            if sanitized.is_empty() {
                return Err(HttpError::bad_request(ErrorMessage::SlugInvalid));
            }
            Some(sanitized)
        }
        None => None,
    };

    let property = app_state
        .db_client
        .update_property(property_id, slug.as_deref(), &body)
        .await
        .map_err(HttpError::from_db_error)?
        .ok_or_else(|| HttpError::not_found(ErrorMessage::PropertyNotFound))?;

    tracing::info!("property {} updated by {}", property.id, admin.subject);

    let translations = app_state
        .db_client
        .get_translations(property.id)
        .await
        .map_err(HttpError::from_db_error)?;

    Ok(Json(json!({
        "status": "success",
        "message": "Property updated successfully",
        "data": {
            "property": property,
            "translations": translations
        }
    })))
}

pub async fn delete_property(
    Path(property_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(admin): Extension<AdminSession>,
) -> Result<impl IntoResponse, HttpError> {
    let property = app_state
        .db_client
        .delete_property(property_id)
        .await
        .map_err(HttpError::from_db_error)?
        .ok_or_else(|| HttpError::not_found(ErrorMessage::PropertyNotFound))?;

    tracing::info!("property {} deleted by {}", property.id, admin.subject);

    // Best-effort image cleanup; the listing is already gone
    let paths: Vec<String> = property
        .images
        .as_array()
        .map(|urls| {
            urls.iter()
                .filter_map(|url| url.as_str())
                .filter_map(|url| app_state.storage.object_path_from_url(url))
                .collect()
        })
        .unwrap_or_default();

    if let Err(e) = app_state.storage.delete_objects(&paths).await {
        tracing::warn!(
            "failed to delete {} stored images of property {}: {}",
            paths.len(),
            property.id,
            e
        );
    }

    Ok(Json(json!({
        "status": "success",
        "message": "Property deleted successfully"
    })))
}
