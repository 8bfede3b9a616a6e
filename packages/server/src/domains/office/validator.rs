//! Payload validation for office mutations.
//!
//! Field checks accumulate into a single `ValidationErrors` so one response
//! reports every failing field. Checks that need the database (tag
//! existence, featured-image ownership) run after the shape checks.

use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::common::{ApiError, TagId, ValidationErrors};
use crate::domains::tag::Tag;

use super::models::{Image, Office};
use super::types::OfficePayload;

/// Minimum caller-settable daily price, in minor currency units.
pub const MIN_PRICE_PER_DAY: i64 = 100;

/// A create payload with all required fields proven present.
#[derive(Debug, Clone)]
pub struct NewOffice {
    pub title: String,
    pub description: String,
    pub lat: Decimal,
    pub lng: Decimal,
    pub address_line1: String,
    pub address_line2: Option<String>,
    pub hidden: bool,
    pub price_per_day: i64,
    pub monthly_discount: i32,
    pub tags: Vec<TagId>,
}

/// Validate a create payload, yielding the typed field set.
pub async fn validate_create(
    payload: &OfficePayload,
    pool: &PgPool,
) -> Result<NewOffice, ApiError> {
    let mut errors = ValidationErrors::new();

    require(&mut errors, "title", payload.title.is_some());
    require(&mut errors, "description", payload.description.is_some());
    require(&mut errors, "lat", payload.lat.is_some());
    require(&mut errors, "lng", payload.lng.is_some());
    require(&mut errors, "address_line1", payload.address_line1.is_some());
    require(&mut errors, "price_per_day", payload.price_per_day.is_some());

    check_common(payload, &mut errors, pool).await?;

    if payload.featured_image_id.is_some() {
        // A new office has no images yet, so nothing can be featured.
        errors.add(
            "featured_image_id",
            "The selected featured image id is invalid.",
        );
    }

    match (
        &payload.title,
        &payload.description,
        payload.lat,
        payload.lng,
        &payload.address_line1,
        payload.price_per_day,
    ) {
        (Some(title), Some(description), Some(lat), Some(lng), Some(address_line1), Some(price))
            if errors.is_empty() =>
        {
            Ok(NewOffice {
                title: title.clone(),
                description: description.clone(),
                lat,
                lng,
                address_line1: address_line1.clone(),
                address_line2: payload.address_line2.clone(),
                hidden: payload.hidden.unwrap_or(false),
                price_per_day: price,
                monthly_discount: payload.monthly_discount.unwrap_or(0),
                tags: payload.tags.clone().unwrap_or_default(),
            })
        }
        _ => Err(ApiError::Validation(errors)),
    }
}

/// Validate an update payload against the persisted office.
pub async fn validate_update(
    payload: &OfficePayload,
    office: &Office,
    pool: &PgPool,
) -> Result<(), ApiError> {
    let mut errors = ValidationErrors::new();

    check_common(payload, &mut errors, pool).await?;

    if let Some(image_id) = payload.featured_image_id {
        // Field-scoped rejection of cross-office image references.
        if !Image::belongs_to_office(image_id, office.id, pool).await? {
            errors.add(
                "featured_image_id",
                "The selected featured image id is invalid.",
            );
        }
    }

    errors.into_result()
}

/// Checks shared by create and update.
async fn check_common(
    payload: &OfficePayload,
    errors: &mut ValidationErrors,
    pool: &PgPool,
) -> Result<(), ApiError> {
    for (field, value) in [
        ("title", &payload.title),
        ("description", &payload.description),
        ("address_line1", &payload.address_line1),
    ] {
        if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
            errors.add(field, format!("The {} field must not be empty.", field));
        }
    }

    if payload
        .price_per_day
        .is_some_and(|price| price < MIN_PRICE_PER_DAY)
    {
        errors.add(
            "price_per_day",
            format!("The price per day must be at least {}.", MIN_PRICE_PER_DAY),
        );
    }

    if payload.monthly_discount.is_some_and(|discount| discount < 0) {
        errors.add(
            "monthly_discount",
            "The monthly discount must be at least 0.",
        );
    }

    if let Some(tag_ids) = &payload.tags {
        // Unknown tag ids are a validation error, never a silent skip.
        let existing = Tag::find_existing_ids(tag_ids, pool).await?;
        for tag_id in tag_ids {
            if !existing.contains(tag_id) {
                errors.add("tags", format!("The selected tag {} is invalid.", tag_id));
            }
        }
    }

    Ok(())
}

fn require(errors: &mut ValidationErrors, field: &str, present: bool) {
    if !present {
        errors.add(field, format!("The {} field is required.", field));
    }
}
