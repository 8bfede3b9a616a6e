//! Office listing query & mutation operations.
//!
//! Each operation takes an explicit caller context; mutations run the
//! office row and its dependent collections inside one transaction, so
//! readers never observe fresh fields with stale tag associations.

use std::collections::HashMap;

use sqlx::PgPool;

use crate::common::auth::{Caller, Capability};
use crate::common::{ApiError, OfficeId, Page, UserId};
use crate::domains::tag::Tag;
use crate::kernel::ServerDeps;

use super::filter::OfficeFilter;
use super::models::{ApprovalStatus, Image, Office, Reservation, User};
use super::types::{ListParams, OfficePayload, OfficeResource};
use super::validator;

/// List offices visible to the caller, proximity-ordered when coordinates
/// are supplied, as a fixed-size page with totals.
pub async fn list(
    params: &ListParams,
    caller: Option<&Caller>,
    pool: &PgPool,
) -> Result<Page<OfficeResource>, ApiError> {
    let filter = OfficeFilter::from_params(params, caller);
    let page_params = params.page_params();

    let (offices, total) = filter.fetch_page(&page_params, pool).await?;
    let data = load_resources(offices, pool).await?;

    Ok(Page::new(data, total, page_params.page(), "/api/offices"))
}

/// Load one office by id with its associations and Active-reservation
/// count. Detail views carry no visibility restriction; only soft-deleted
/// rows are treated as missing.
pub async fn get(office_id: OfficeId, pool: &PgPool) -> Result<OfficeResource, ApiError> {
    let office = Office::find_by_id(office_id, pool)
        .await?
        .ok_or(ApiError::NotFound("office"))?;

    load_resource(office, pool).await
}

/// Create a listing for the caller. Always lands in Pending regardless of
/// input; admins are notified after commit.
pub async fn create(
    caller: &Caller,
    payload: &OfficePayload,
    deps: &ServerDeps,
) -> Result<OfficeResource, ApiError> {
    caller.require_scope(Capability::OfficeCreate)?;

    let pool = &deps.db_pool;
    let new_office = validator::validate_create(payload, pool).await?;

    let mut tx = pool.begin().await?;
    let office = Office::insert(
        caller.user_id,
        &new_office.title,
        &new_office.description,
        new_office.lat,
        new_office.lng,
        &new_office.address_line1,
        new_office.address_line2.as_deref(),
        new_office.hidden,
        new_office.price_per_day,
        new_office.monthly_discount,
        &mut tx,
    )
    .await?;

    Tag::attach(office.id, &new_office.tags, &mut tx).await?;
    tx.commit().await?;

    notify_admins(deps, office.id, office.title.clone());

    load_resource(office, pool).await
}

/// Update a listing the caller owns. Changing lat, lng or price_per_day
/// sends the office back to Pending and re-notifies admins; other field
/// updates leave the approval status untouched.
pub async fn update(
    office_id: OfficeId,
    caller: &Caller,
    payload: &OfficePayload,
    deps: &ServerDeps,
) -> Result<OfficeResource, ApiError> {
    caller.require_scope(Capability::OfficeUpdate)?;

    let pool = &deps.db_pool;
    let office = Office::find_by_id(office_id, pool)
        .await?
        .ok_or(ApiError::NotFound("office"))?;
    caller.require_owner(office.user_id)?;

    validator::validate_update(payload, &office, pool).await?;

    // Merge caller-supplied fields over the persisted values.
    let lat = payload.lat.unwrap_or(office.lat);
    let lng = payload.lng.unwrap_or(office.lng);
    let price_per_day = payload.price_per_day.unwrap_or(office.price_per_day);

    let requires_review =
        lat != office.lat || lng != office.lng || price_per_day != office.price_per_day;
    let approval_status = if requires_review {
        ApprovalStatus::Pending
    } else {
        office.approval_status
    };

    let mut tx = pool.begin().await?;
    let updated = Office::update(
        office.id,
        payload.title.as_deref().unwrap_or(&office.title),
        payload.description.as_deref().unwrap_or(&office.description),
        lat,
        lng,
        payload
            .address_line1
            .as_deref()
            .unwrap_or(&office.address_line1),
        payload
            .address_line2
            .as_deref()
            .or(office.address_line2.as_deref()),
        approval_status,
        payload.hidden.unwrap_or(office.hidden),
        price_per_day,
        payload.monthly_discount.unwrap_or(office.monthly_discount),
        payload.featured_image_id.or(office.featured_image_id),
        &mut tx,
    )
    .await?;

    if let Some(tags) = &payload.tags {
        Tag::sync(updated.id, tags, &mut tx)
            .await
            .map_err(ApiError::Internal)?;
    }
    tx.commit().await?;

    if requires_review {
        notify_admins(deps, updated.id, updated.title.clone());
    }

    load_resource(updated, pool).await
}

/// Soft-delete a listing the caller owns, removing its image rows and
/// best-effort deleting their backing files. Blocked while any Active
/// reservation exists.
pub async fn delete(
    office_id: OfficeId,
    caller: &Caller,
    deps: &ServerDeps,
) -> Result<(), ApiError> {
    caller.require_scope(Capability::OfficeDelete)?;

    let pool = &deps.db_pool;
    let office = Office::find_by_id(office_id, pool)
        .await?
        .ok_or(ApiError::NotFound("office"))?;
    caller.require_owner(office.user_id)?;

    if Reservation::exists_active_for_office(office.id, pool).await? {
        return Err(ApiError::validation(
            "office",
            "Cannot delete an office with active reservations.",
        ));
    }

    let images = Image::find_for_office(office.id, pool).await?;

    let mut tx = pool.begin().await?;
    Image::delete_for_office(office.id, &mut tx).await?;
    Office::soft_delete(office.id, &mut tx).await?;
    tx.commit().await?;

    // Backing files are cleaned up outside the transaction: fire-once,
    // orphaned files are acceptable.
    for image in images {
        if let Err(e) = deps.storage.delete(&image.path).await {
            tracing::warn!(
                error = %e,
                office_id = %office.id,
                path = %image.path,
                "Failed to delete image file"
            );
        }
    }

    Ok(())
}

/// Notify every admin that a listing awaits approval.
///
/// Dispatch happens on a detached task after the transaction committed;
/// delivery failures are logged and never surface to the request.
fn notify_admins(deps: &ServerDeps, office_id: OfficeId, office_title: String) {
    let deps = deps.clone();
    tokio::spawn(async move {
        let admins = match User::find_admins(&deps.db_pool).await {
            Ok(admins) => admins,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load admins for notification");
                return;
            }
        };

        for admin in admins {
            if let Err(e) = deps
                .notifier
                .office_pending_approval(admin.id, office_id, &office_title)
                .await
            {
                tracing::warn!(
                    error = %e,
                    admin_id = %admin.id,
                    office_id = %office_id,
                    "Failed to deliver pending-approval notification"
                );
            }
        }
    });
}

// =============================================================================
// Representation loading
// =============================================================================

async fn load_resource(office: Office, pool: &PgPool) -> Result<OfficeResource, ApiError> {
    let mut resources = load_resources(vec![office], pool).await?;
    resources
        .pop()
        .ok_or_else(|| ApiError::Internal(anyhow::anyhow!("office representation missing")))
}

/// Batch-load associations for a page of offices: one query each for
/// images, tags, owners and Active-reservation counts.
async fn load_resources(
    offices: Vec<Office>,
    pool: &PgPool,
) -> Result<Vec<OfficeResource>, ApiError> {
    if offices.is_empty() {
        return Ok(Vec::new());
    }

    let office_ids: Vec<OfficeId> = offices.iter().map(|o| o.id).collect();
    let mut user_ids: Vec<UserId> = offices.iter().map(|o| o.user_id).collect();
    user_ids.sort_unstable();
    user_ids.dedup();

    let mut images_by_office: HashMap<OfficeId, Vec<Image>> = HashMap::new();
    for image in Image::find_for_office_ids(&office_ids, pool)
        .await
        .map_err(ApiError::Internal)?
    {
        images_by_office.entry(image.office_id).or_default().push(image);
    }

    let mut tags_by_office: HashMap<OfficeId, Vec<Tag>> = HashMap::new();
    for entry in Tag::find_for_office_ids(&office_ids, pool)
        .await
        .map_err(ApiError::Internal)?
    {
        tags_by_office
            .entry(entry.office_id)
            .or_default()
            .push(entry.tag);
    }

    let counts: HashMap<OfficeId, i64> =
        Reservation::count_active_for_office_ids(&office_ids, pool)
            .await
            .map_err(ApiError::Internal)?
            .into_iter()
            .map(|c| (c.office_id, c.count))
            .collect();

    let users: HashMap<UserId, User> = User::find_by_ids(&user_ids, pool)
        .await
        .map_err(ApiError::Internal)?
        .into_iter()
        .map(|u| (u.id, u))
        .collect();

    Ok(offices
        .into_iter()
        .map(|office| {
            let id = office.id;
            let user = users.get(&office.user_id);
            OfficeResource::from_parts(
                office,
                user,
                tags_by_office.remove(&id).unwrap_or_default(),
                images_by_office.remove(&id).unwrap_or_default(),
                counts.get(&id).copied().unwrap_or(0),
            )
        })
        .collect())
}
