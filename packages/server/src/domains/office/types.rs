//! Request/response types for the office listing API.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::common::{ImageId, OfficeId, PageParams, TagId, UserId};
use crate::domains::tag::Tag;

use super::models::{ApprovalStatus, Image, Office, User};

// =============================================================================
// List query parameters
// =============================================================================

/// Raw query parameters for `GET /api/offices`.
///
/// All values arrive as text and are parsed leniently: a missing or
/// malformed value is treated as absent, never as a request error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    pub user_id: Option<String>,
    pub host_id: Option<String>,
    pub visitor_id: Option<String>,
    pub lat: Option<String>,
    pub lng: Option<String>,
    pub page: Option<String>,
}

impl ListParams {
    /// Owner filter: `user_id`, with `host_id` as an accepted alias.
    pub fn owner_id(&self) -> Option<UserId> {
        parse_id(self.user_id.as_deref()).or_else(|| parse_id(self.host_id.as_deref()))
    }

    pub fn visitor_id(&self) -> Option<UserId> {
        parse_id(self.visitor_id.as_deref())
    }

    /// Both coordinates must parse for proximity ordering to engage.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        let lat = self.lat.as_deref()?.parse::<f64>().ok()?;
        let lng = self.lng.as_deref()?.parse::<f64>().ok()?;
        Some((lat, lng))
    }

    pub fn page_params(&self) -> PageParams {
        PageParams {
            page: self.page.as_deref().and_then(|p| p.parse().ok()),
        }
    }
}

fn parse_id<T>(value: Option<&str>) -> Option<crate::common::Id<T>> {
    value.and_then(|v| v.parse().ok())
}

// =============================================================================
// Mutation payload
// =============================================================================

/// Caller-supplied office fields for create and update.
///
/// Everything is optional at the type level; the validator enforces which
/// fields a create requires. Unknown fields (including any caller-supplied
/// approval status) are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OfficePayload {
    pub title: Option<String>,
    pub description: Option<String>,
    pub lat: Option<Decimal>,
    pub lng: Option<Decimal>,
    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
    pub hidden: Option<bool>,
    pub price_per_day: Option<i64>,
    pub monthly_discount: Option<i32>,
    pub featured_image_id: Option<ImageId>,
    pub tags: Option<Vec<TagId>>,
}

// =============================================================================
// Response representation
// =============================================================================

/// Owner summary embedded in office representations.
#[derive(Debug, Clone, Serialize)]
pub struct UserSummary {
    pub id: UserId,
    pub name: String,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        UserSummary {
            id: user.id,
            name: user.name.clone(),
        }
    }
}

/// Full office representation returned by list and detail endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct OfficeResource {
    pub id: OfficeId,
    pub title: String,
    pub description: String,
    pub lat: Decimal,
    pub lng: Decimal,
    pub address_line1: String,
    pub address_line2: Option<String>,
    pub approval_status: ApprovalStatus,
    pub hidden: bool,
    pub price_per_day: i64,
    pub monthly_discount: i32,
    pub featured_image_id: Option<ImageId>,
    pub user: Option<UserSummary>,
    pub tags: Vec<Tag>,
    pub images: Vec<Image>,
    pub reservations_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OfficeResource {
    pub fn from_parts(
        office: Office,
        user: Option<&User>,
        tags: Vec<Tag>,
        images: Vec<Image>,
        reservations_count: i64,
    ) -> Self {
        OfficeResource {
            id: office.id,
            title: office.title,
            description: office.description,
            lat: office.lat,
            lng: office.lng,
            address_line1: office.address_line1,
            address_line2: office.address_line2,
            approval_status: office.approval_status,
            hidden: office.hidden,
            price_per_day: office.price_per_day,
            monthly_discount: office.monthly_discount,
            featured_image_id: office.featured_image_id,
            user: user.map(UserSummary::from),
            tags,
            images,
            reservations_count,
            created_at: office.created_at,
            updated_at: office.updated_at,
        }
    }
}
