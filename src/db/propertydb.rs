use async_trait::async_trait;
use sqlx::types::Json;
use uuid::Uuid;

use crate::{
    db::db::DBClient,
    dtos::propertydtos::{
        CreatePropertyDto, PropertyFilterQueryDto, PropertyTranslationDto, UpdatePropertyDto,
    },
    models::propertymodel::{Property, PropertyTranslation},
};

/// Database predicate built from the untrusted listing query string.
///
/// Everything is optional: an absent (or empty, or unparseable) parameter
/// leaves that dimension unconstrained. `purpose` is an exact match,
/// `property_types` is a membership test over the comma-joined `type`
/// parameter, `location` a case-insensitive substring match, and the price
/// bounds each apply independently. Bounds are not cross-checked, so
/// `minPrice > maxPrice` simply selects nothing.
#[derive(Debug, Default, PartialEq)]
pub struct PropertyFilter {
    pub purpose: Option<String>,
    pub property_types: Option<Vec<String>>,
    pub location: Option<String>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
}

impl PropertyFilter {
    pub fn from_query(query: &PropertyFilterQueryDto) -> Self {
        Self {
            purpose: query.purpose.clone().filter(|p| !p.is_empty()),
            property_types: query
                .property_type
                .as_ref()
                .map(|raw| {
                    raw.split(',')
                        .map(str::trim)
                        .filter(|t| !t.is_empty())
                        .map(String::from)
                        .collect::<Vec<_>>()
                })
                .filter(|types| !types.is_empty()),
            location: query.location.clone().filter(|l| !l.is_empty()),
            min_price: query.min_price.as_deref().and_then(|p| p.trim().parse().ok()),
            max_price: query.max_price.as_deref().and_then(|p| p.trim().parse().ok()),
        }
    }

    /// ILIKE pattern for the location substring match.
    pub fn location_pattern(&self) -> Option<String> {
        self.location.as_ref().map(|l| format!("%{}%", l))
    }
}

#[async_trait]
pub trait PropertyExt {
    async fn list_properties(&self, filter: &PropertyFilter) -> Result<Vec<Property>, sqlx::Error>;

    async fn list_featured_properties(&self, limit: i64) -> Result<Vec<Property>, sqlx::Error>;

    async fn get_property(&self, property_id: Uuid) -> Result<Option<Property>, sqlx::Error>;

    async fn get_property_by_slug(&self, slug: &str) -> Result<Option<Property>, sqlx::Error>;

    async fn create_property(
        &self,
        slug: &str,
        data: &CreatePropertyDto,
    ) -> Result<Property, sqlx::Error>;

    async fn update_property(
        &self,
        property_id: Uuid,
        slug: Option<&str>,
        data: &UpdatePropertyDto,
    ) -> Result<Option<Property>, sqlx::Error>;

    async fn delete_property(&self, property_id: Uuid) -> Result<Option<Property>, sqlx::Error>;

    async fn get_translations(
        &self,
        property_id: Uuid,
    ) -> Result<Vec<PropertyTranslation>, sqlx::Error>;

    async fn get_translation(
        &self,
        property_id: Uuid,
        locale: &str,
    ) -> Result<Option<PropertyTranslation>, sqlx::Error>;
}

const UPSERT_TRANSLATION_SQL: &str = r#"
    INSERT INTO property_translations (property_id, locale, title, subtitle, description, features)
    VALUES ($1, $2, $3, $4, $5, $6)
    ON CONFLICT (property_id, locale) DO UPDATE SET
        title = EXCLUDED.title,
        subtitle = EXCLUDED.subtitle,
        description = EXCLUDED.description,
        features = EXCLUDED.features,
        updated_at = NOW()
"#;

async fn upsert_translation<'e, E>(executor: E, property_id: Uuid, translation: &PropertyTranslationDto) -> Result<(), sqlx::Error>
where
    E: sqlx::Executor<'e, Database = sqlx::Postgres>,
{
    sqlx::query(UPSERT_TRANSLATION_SQL)
        .bind(property_id)
        .bind(&translation.locale)
        .bind(&translation.title)
        .bind(&translation.subtitle)
        .bind(&translation.description)
        .bind(Json(translation.features.clone().unwrap_or_default()))
        .execute(executor)
        .await?;

    Ok(())
}

#[async_trait]
impl PropertyExt for DBClient {
    async fn list_properties(&self, filter: &PropertyFilter) -> Result<Vec<Property>, sqlx::Error> {
        let properties = sqlx::query_as::<_, Property>(
            r#"
            SELECT * FROM properties
            WHERE ($1::text IS NULL OR purpose::text = $1)
            AND ($2::text[] IS NULL OR property_type::text = ANY($2))
            AND ($3::text IS NULL OR location ILIKE $3)
            AND ($4::bigint IS NULL OR price >= $4)
            AND ($5::bigint IS NULL OR price <= $5)
            ORDER BY featured DESC, created_at DESC
            "#,
        )
        .bind(&filter.purpose)
        .bind(&filter.property_types)
        .bind(filter.location_pattern())
        .bind(filter.min_price)
        .bind(filter.max_price)
        .fetch_all(&self.pool)
        .await?;

        Ok(properties)
    }

    async fn list_featured_properties(&self, limit: i64) -> Result<Vec<Property>, sqlx::Error> {
        let properties = sqlx::query_as::<_, Property>(
            r#"
            SELECT * FROM properties
            WHERE featured = TRUE
            ORDER BY created_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(properties)
    }

    async fn get_property(&self, property_id: Uuid) -> Result<Option<Property>, sqlx::Error> {
        let property = sqlx::query_as::<_, Property>("SELECT * FROM properties WHERE id = $1")
            .bind(property_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(property)
    }

    async fn get_property_by_slug(&self, slug: &str) -> Result<Option<Property>, sqlx::Error> {
        let property = sqlx::query_as::<_, Property>("SELECT * FROM properties WHERE slug = $1")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;

        Ok(property)
    }

    async fn create_property(
        &self,
        slug: &str,
        data: &CreatePropertyDto,
    ) -> Result<Property, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let property = sqlx::query_as::<_, Property>(
            r#"
            INSERT INTO properties (
                slug, status, property_type, purpose, price, bedrooms, bathrooms,
                area_sqm, location, coordinates, images, featured
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(slug)
        .bind(data.status)
        .bind(data.property_type)
        .bind(data.purpose)
        .bind(data.price)
        .bind(data.bedrooms)
        .bind(data.bathrooms)
        .bind(data.area_sqm)
        .bind(&data.location)
        .bind(&data.coordinates)
        .bind(Json(data.images.clone().unwrap_or_default()))
        .bind(data.featured.unwrap_or(false))
        .fetch_one(&mut *tx)
        .await?;

        for translation in &data.translations {
            upsert_translation(&mut *tx, property.id, translation).await?;
        }

        tx.commit().await?;

        Ok(property)
    }

    async fn update_property(
        &self,
        property_id: Uuid,
        slug: Option<&str>,
        data: &UpdatePropertyDto,
    ) -> Result<Option<Property>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let property = sqlx::query_as::<_, Property>(
            r#"
            UPDATE properties SET
                slug = COALESCE($1, slug),
                status = COALESCE($2, status),
                property_type = COALESCE($3, property_type),
                purpose = COALESCE($4, purpose),
                price = COALESCE($5, price),
                bedrooms = COALESCE($6, bedrooms),
                bathrooms = COALESCE($7, bathrooms),
                area_sqm = COALESCE($8, area_sqm),
                location = COALESCE($9, location),
                coordinates = COALESCE($10, coordinates),
                images = COALESCE($11, images),
                featured = COALESCE($12, featured),
                updated_at = NOW()
            WHERE id = $13
            RETURNING *
            "#,
        )
        .bind(slug)
        .bind(data.status)
        .bind(data.property_type)
        .bind(data.purpose)
        .bind(data.price)
        .bind(data.bedrooms)
        .bind(data.bathrooms)
        .bind(data.area_sqm)
        .bind(&data.location)
        .bind(&data.coordinates)
        .bind(data.images.clone().map(Json))
        .bind(data.featured)
        .bind(property_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(property) = property else {
            tx.rollback().await?;
            return Ok(None);
        };

        if let Some(translations) = &data.translations {
            for translation in translations {
                upsert_translation(&mut *tx, property.id, translation).await?;
            }
        }

        tx.commit().await?;

        Ok(Some(property))
    }

    async fn delete_property(&self, property_id: Uuid) -> Result<Option<Property>, sqlx::Error> {
        // Translations go with the row via ON DELETE CASCADE
        let property = sqlx::query_as::<_, Property>(
            "DELETE FROM properties WHERE id = $1 RETURNING *",
        )
        .bind(property_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(property)
    }

    async fn get_translations(
        &self,
        property_id: Uuid,
    ) -> Result<Vec<PropertyTranslation>, sqlx::Error> {
        let translations = sqlx::query_as::<_, PropertyTranslation>(
            "SELECT * FROM property_translations WHERE property_id = $1 ORDER BY locale",
        )
        .bind(property_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(translations)
    }

    async fn get_translation(
        &self,
        property_id: Uuid,
        locale: &str,
    ) -> Result<Option<PropertyTranslation>, sqlx::Error> {
        let translation = sqlx::query_as::<_, PropertyTranslation>(
            "SELECT * FROM property_translations WHERE property_id = $1 AND locale = $2",
        )
        .bind(property_id)
        .bind(locale)
        .fetch_optional(&self.pool)
        .await?;

        Ok(translation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(
        purpose: Option<&str>,
        property_type: Option<&str>,
        location: Option<&str>,
        min_price: Option<&str>,
        max_price: Option<&str>,
    ) -> PropertyFilterQueryDto {
        PropertyFilterQueryDto {
            purpose: purpose.map(String::from),
            property_type: property_type.map(String::from),
            location: location.map(String::from),
            min_price: min_price.map(String::from),
            max_price: max_price.map(String::from),
        }
    }

    #[test]
    fn test_purpose_and_min_price_leave_rest_unconstrained() {
        let filter = PropertyFilter::from_query(&query(
            Some("rent"),
            None,
            None,
            Some("100000"),
            None,
        ));

        assert_eq!(filter.purpose.as_deref(), Some("rent"));
        assert_eq!(filter.min_price, Some(100000));
        assert_eq!(filter.max_price, None);
        assert_eq!(filter.property_types, None);
        assert_eq!(filter.location, None);
    }

    #[test]
    fn test_comma_joined_type_becomes_membership_list() {
        let filter =
            PropertyFilter::from_query(&query(None, Some("villa,penthouse, apartment"), None, None, None));

        assert_eq!(
            filter.property_types,
            Some(vec![
                "villa".to_string(),
                "penthouse".to_string(),
                "apartment".to_string()
            ])
        );
    }

    #[test]
    fn test_empty_parameters_are_dropped() {
        let filter = PropertyFilter::from_query(&query(Some(""), Some(" , "), Some(""), None, None));
        assert_eq!(filter, PropertyFilter::default());
    }

    #[test]
    fn test_unparseable_price_leaves_bound_open() {
        let filter = PropertyFilter::from_query(&query(None, None, None, Some("abc"), Some("2.5m")));
        assert_eq!(filter.min_price, None);
        assert_eq!(filter.max_price, None);
    }

    #[test]
    fn test_inverted_bounds_are_not_cross_checked() {
        // Selects nothing at query time; the builder does not reject it
        let filter = PropertyFilter::from_query(&query(None, None, None, Some("500000"), Some("100")));
        assert_eq!(filter.min_price, Some(500000));
        assert_eq!(filter.max_price, Some(100));
    }

    #[test]
    fn test_location_substring_pattern() {
        let filter = PropertyFilter::from_query(&query(None, None, Some("Marbella"), None, None));
        assert_eq!(filter.location_pattern().as_deref(), Some("%Marbella%"));
    }
}
