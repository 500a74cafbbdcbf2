// ABOUTME: HTTP client for the wger exercise database REST API
// ABOUTME: Query building, status-to-error mapping, and normalization of raw exercise records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # wger Catalog Client
//!
//! Talks to `https://wger.de/api/v2`. Exercise records arrive with optional
//! top-level names and a list of translations; [`RawExercise::into_exercise`]
//! resolves them to one display record in the configured language and drops
//! records that have no usable name.

use super::{ExerciseCatalog, ExerciseQuery};
use crate::config::CatalogConfig;
use crate::constants::catalog::{DEFAULT_CATEGORY_NAME, DETAIL_LIST_PAGE_SIZE};
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::models::{Category, Equipment, Exercise, ExerciseImage, ExerciseVideo, Muscle};
use crate::pagination::OffsetPage;
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::debug;
use uuid::Uuid;

/// Service name attached to upstream errors
const SERVICE: &str = "wger";

/// Translation of an exercise's name and description
#[derive(Debug, Clone, Deserialize)]
pub struct RawTranslation {
    /// Language identifier
    pub language: u32,
    /// Translated name
    #[serde(default)]
    pub name: Option<String>,
    /// Translated description, may contain HTML
    #[serde(default)]
    pub description: Option<String>,
}

/// Exercise record as returned by `exerciseinfo`
#[derive(Debug, Clone, Deserialize)]
pub struct RawExercise {
    /// Catalog identifier
    pub id: u32,
    /// Stable upstream identifier
    #[serde(default)]
    pub uuid: Option<Uuid>,
    /// Top-level name, absent in newer API versions
    #[serde(default)]
    pub name: Option<String>,
    /// Top-level description, may contain HTML
    #[serde(default)]
    pub description: Option<String>,
    /// Category object
    #[serde(default)]
    pub category: Option<Category>,
    /// Primary muscles
    #[serde(default)]
    pub muscles: Vec<Muscle>,
    /// Secondary muscles
    #[serde(default)]
    pub muscles_secondary: Vec<Muscle>,
    /// Equipment
    #[serde(default)]
    pub equipment: Vec<Equipment>,
    /// Variation ids, sent as a list, a single id, or null
    #[serde(default, deserialize_with = "lenient_ids")]
    pub variations: Vec<u32>,
    /// License, sent as an id or an object
    #[serde(default, deserialize_with = "lenient_license")]
    pub license: Option<u32>,
    /// License attribution
    #[serde(default)]
    pub license_author: Option<String>,
    /// Attached images
    #[serde(default)]
    pub images: Vec<ExerciseImage>,
    /// Attached videos
    #[serde(default)]
    pub videos: Vec<ExerciseVideo>,
    /// Name and description translations
    #[serde(default)]
    pub translations: Vec<RawTranslation>,
}

impl RawExercise {
    /// Normalize into a display record for `language_id`
    ///
    /// Name and description fall back to the translation in `language_id`,
    /// the description is stripped of HTML, and a missing category becomes
    /// "General". Returns `None` when no non-blank name can be resolved.
    #[must_use]
    pub fn into_exercise(self, language_id: u32) -> Option<Exercise> {
        let translation = self
            .translations
            .iter()
            .find(|translation| translation.language == language_id);

        let name = non_blank(self.name.as_deref())
            .or_else(|| translation.and_then(|t| non_blank(t.name.as_deref())))?
            .to_owned();
        let description = non_blank(self.description.as_deref())
            .or_else(|| translation.and_then(|t| non_blank(t.description.as_deref())))
            .map(clean_html)
            .unwrap_or_default();

        let (category, category_id) = match self.category {
            Some(category) if !category.name.trim().is_empty() => {
                (category.name, Some(category.id))
            }
            Some(category) => (DEFAULT_CATEGORY_NAME.to_owned(), Some(category.id)),
            None => (DEFAULT_CATEGORY_NAME.to_owned(), None),
        };

        Some(Exercise {
            id: self.id,
            uuid: self.uuid,
            name,
            description,
            category,
            category_id,
            muscles: self.muscles,
            muscles_secondary: self.muscles_secondary,
            equipment: self.equipment,
            variations: self.variations,
            license: self.license,
            license_author: self.license_author,
            images: self.images,
            videos: self.videos,
        })
    }
}

/// Normalize a raw page, recording how many records were dropped
///
/// The continuation state is kept as the server sent it, so a page whose
/// records all lack a usable name still reports further pages.
#[must_use]
pub fn normalize_page(page: OffsetPage<RawExercise>, language_id: u32) -> OffsetPage<Exercise> {
    let received = page.results.len();
    let results: Vec<Exercise> = page
        .results
        .into_iter()
        .filter_map(|raw| raw.into_exercise(language_id))
        .collect();
    let skipped = received - results.len();

    OffsetPage {
        skipped,
        results,
        count: page.count,
        next: page.next,
        previous: page.previous,
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|text| !text.is_empty())
}

fn lenient_ids<'de, D>(deserializer: D) -> Result<Vec<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let to_id = |value: &Value| value.as_u64().and_then(|id| u32::try_from(id).ok());
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => items.iter().filter_map(to_id).collect(),
        Some(value) => to_id(&value).into_iter().collect(),
        None => Vec::new(),
    })
}

fn lenient_license<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let id = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Object(object)) => object.get("id").and_then(Value::as_u64),
        Some(value) => value.as_u64(),
        None => None,
    };
    Ok(id.and_then(|id| u32::try_from(id).ok()))
}

/// Strip HTML tags and decode the common entities
///
/// Removes every `<...>` span, decodes `&nbsp;`, `&amp;`, `&lt;`, `&gt;`, and
/// `&quot;` in that order, and trims surrounding whitespace. A `<` with no
/// closing `>` is kept as text.
#[must_use]
pub fn clean_html(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut rest = html;
    while let Some(open) = rest.find('<') {
        let Some(close) = rest[open..].find('>') else {
            break;
        };
        text.push_str(&rest[..open]);
        rest = &rest[open + close + 1..];
    }
    text.push_str(rest);

    text.replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .trim()
        .to_owned()
}

/// Map a non-success HTTP status to an upstream error
#[must_use]
pub fn error_for_status(status: StatusCode, resource: &str) -> AppError {
    match status {
        StatusCode::NOT_FOUND => AppError::not_found(resource).with_service(SERVICE),
        StatusCode::TOO_MANY_REQUESTS => AppError::external_rate_limited(SERVICE),
        status if status.is_server_error() => AppError::external_unavailable(
            SERVICE,
            format!("{resource} request failed with HTTP {status}"),
        ),
        status => AppError::external_service(
            SERVICE,
            format!("{resource} request failed with HTTP {status}"),
        ),
    }
}

/// wger REST API catalog
#[derive(Debug, Clone)]
pub struct WgerCatalog {
    client: Client,
    base_url: String,
    language_id: u32,
}

impl WgerCatalog {
    /// Create a client with the configured timeouts
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `config` is invalid or the HTTP client
    /// cannot be built
    pub fn new(config: &CatalogConfig) -> AppResult<Self> {
        config.validate()?;
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .user_agent(concat!("pulsefit/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                AppError::config(format!("Failed to build catalog HTTP client: {e}")).with_source(e)
            })?;
        Ok(Self::with_client(client, config))
    }

    /// Use an existing HTTP client, sharing its connection pool
    #[must_use]
    pub fn with_client(client: Client, config: &CatalogConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            language_id: config.language_id,
        }
    }

    /// GET `{base_url}/{path}` and decode the JSON body
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
        resource: &str,
    ) -> AppResult<T> {
        let url = format!("{}/{path}", self.base_url);
        let started = Instant::now();
        let result = self.send(&url, params, resource).await;
        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        AppLogger::log_catalog_request(path, result.is_ok(), elapsed_ms);
        result
    }

    async fn send<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, String)],
        resource: &str,
    ) -> AppResult<T> {
        let response = self
            .client
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(|e| {
                AppError::external_unavailable(SERVICE, format!("{resource} request failed: {e}"))
                    .with_source(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(error_for_status(status, resource));
        }

        // Undecodable bodies surface as serialization errors
        Ok(response.json::<T>().await?)
    }

    /// Fetch a short reference list in one request
    async fn get_list<T: DeserializeOwned>(
        &self,
        path: &str,
        mut params: Vec<(&str, String)>,
        resource: &str,
    ) -> AppResult<Vec<T>> {
        params.push(("limit", DETAIL_LIST_PAGE_SIZE.to_string()));
        let page: OffsetPage<T> = self.get_json(path, &params, resource).await?;
        Ok(page.results)
    }

    fn exercise_params(&self, query: &ExerciseQuery) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("language", self.language_id.to_string()),
            ("limit", query.limit.to_string()),
            ("offset", query.offset.to_string()),
        ];
        if let Some(category) = query.filters.category {
            params.push(("category", category.to_string()));
        }
        if let Some(muscle) = query.filters.muscle {
            params.push(("muscles", muscle.to_string()));
        }
        if let Some(equipment) = query.filters.equipment {
            params.push(("equipment", equipment.to_string()));
        }
        if let Some(name) = query.name.as_deref().and_then(|n| non_blank(Some(n))) {
            params.push(("name", name.to_owned()));
        }
        params
    }
}

#[async_trait]
impl ExerciseCatalog for WgerCatalog {
    async fn list_exercises(&self, query: &ExerciseQuery) -> AppResult<OffsetPage<Exercise>> {
        let params = self.exercise_params(query);
        let page: OffsetPage<RawExercise> =
            self.get_json("exerciseinfo/", &params, "exercises").await?;

        let page = normalize_page(page, self.language_id);
        if page.skipped > 0 {
            debug!(
                dropped = page.skipped,
                offset = query.offset,
                "Dropped exercises without a resolvable name"
            );
        }
        Ok(page)
    }

    async fn get_exercise(&self, id: u32) -> AppResult<Exercise> {
        let resource = format!("exercise {id}");
        let params = [("language", self.language_id.to_string())];
        let raw: RawExercise = self
            .get_json(&format!("exerciseinfo/{id}/"), &params, &resource)
            .await?;
        raw.into_exercise(self.language_id)
            .ok_or_else(|| AppError::not_found(resource).with_service(SERVICE))
    }

    async fn list_categories(&self) -> AppResult<Vec<Category>> {
        self.get_list("exercisecategory/", Vec::new(), "categories")
            .await
    }

    async fn list_muscles(&self) -> AppResult<Vec<Muscle>> {
        self.get_list("muscle/", Vec::new(), "muscles").await
    }

    async fn list_equipment(&self) -> AppResult<Vec<Equipment>> {
        self.get_list("equipment/", Vec::new(), "equipment").await
    }

    async fn list_images(&self, exercise_id: u32) -> AppResult<Vec<ExerciseImage>> {
        self.get_list(
            "exerciseimage/",
            vec![("exercise", exercise_id.to_string())],
            "exercise images",
        )
        .await
    }

    async fn list_videos(&self, exercise_id: u32) -> AppResult<Vec<ExerciseVideo>> {
        self.get_list(
            "exercisevideo/",
            vec![("exercise", exercise_id.to_string())],
            "exercise videos",
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExerciseFilters;

    #[test]
    fn test_clean_html_strips_tags_and_entities() {
        assert_eq!(
            clean_html("<p>Keep&nbsp;your back &amp; arms straight</p>\n"),
            "Keep your back & arms straight"
        );
        assert_eq!(clean_html("reps &lt; 10 &quot;slow&quot;"), "reps < 10 \"slow\"");
        assert_eq!(clean_html("a < b"), "a < b");
    }

    #[test]
    fn test_translation_fallback_and_lenient_fields() {
        let raw: RawExercise = serde_json::from_value(serde_json::json!({
            "id": 73,
            "category": {"id": 11, "name": "Chest"},
            "variations": 12,
            "license": {"id": 2, "short_name": "CC-BY-SA 4"},
            "translations": [
                {"language": 1, "name": "Bankdrücken", "description": "<p>Deutsch</p>"},
                {"language": 2, "name": "Bench Press", "description": "<p>Lower&nbsp;the bar</p>"}
            ]
        }))
        .unwrap();

        let exercise = raw.into_exercise(2).unwrap();
        assert_eq!(exercise.name, "Bench Press");
        assert_eq!(exercise.description, "Lower the bar");
        assert_eq!(exercise.category, "Chest");
        assert_eq!(exercise.variations, vec![12]);
        assert_eq!(exercise.license, Some(2));
    }

    #[test]
    fn test_unnamed_exercise_is_dropped() {
        let raw: RawExercise = serde_json::from_value(serde_json::json!({
            "id": 5,
            "name": "   ",
            "category": null,
            "variations": null,
            "translations": [{"language": 1, "name": "Nur Deutsch"}]
        }))
        .unwrap();
        assert!(raw.into_exercise(2).is_none());
    }

    #[test]
    fn test_untranslated_page_keeps_continuation() {
        let page: OffsetPage<RawExercise> = serde_json::from_value(serde_json::json!({
            "count": 3,
            "next": "https://wger.de/api/v2/exerciseinfo/?limit=1&offset=1",
            "previous": null,
            "results": [
                {"id": 1, "translations": [{"language": 1, "name": "Kniebeuge"}]}
            ]
        }))
        .unwrap();

        let page = normalize_page(page, 2);
        assert!(page.is_empty());
        assert_eq!(page.skipped, 1);
        assert_eq!(page.received(), 1);
        assert!(page.has_more());
    }

    #[test]
    fn test_missing_category_defaults_to_general() {
        let raw: RawExercise =
            serde_json::from_value(serde_json::json!({"id": 9, "name": "Plank"})).unwrap();
        let exercise = raw.into_exercise(2).unwrap();
        assert_eq!(exercise.category, "General");
        assert_eq!(exercise.category_id, None);
        assert!(exercise.variations.is_empty());
    }

    #[test]
    fn test_exercise_params_include_filters_and_name() {
        let catalog = WgerCatalog::with_client(Client::new(), &CatalogConfig::default());
        let query = ExerciseQuery::default().with_name(" squat ");
        let query = ExerciseQuery {
            filters: ExerciseFilters::by_category(10).with_equipment(3),
            ..query
        };

        let params = catalog.exercise_params(&query);
        assert!(params.contains(&("language", "2".to_owned())));
        assert!(params.contains(&("limit", "100".to_owned())));
        assert!(params.contains(&("category", "10".to_owned())));
        assert!(params.contains(&("equipment", "3".to_owned())));
        assert!(params.contains(&("name", "squat".to_owned())));
        assert!(!params.iter().any(|(key, _)| *key == "muscles"));
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            error_for_status(StatusCode::NOT_FOUND, "exercise 1").code,
            crate::errors::ErrorCode::ResourceNotFound
        );
        assert_eq!(
            error_for_status(StatusCode::TOO_MANY_REQUESTS, "exercises").code,
            crate::errors::ErrorCode::ExternalRateLimited
        );
        assert_eq!(
            error_for_status(StatusCode::BAD_GATEWAY, "exercises").code,
            crate::errors::ErrorCode::ExternalServiceUnavailable
        );
        assert_eq!(
            error_for_status(StatusCode::BAD_REQUEST, "exercises").code,
            crate::errors::ErrorCode::ExternalServiceError
        );
    }
}
