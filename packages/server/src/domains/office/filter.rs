//! Office list filtering and ordering.
//!
//! The query parameters are folded into an [`OfficeFilter`] once, up front;
//! a single interpreter then renders it into SQL. No predicate logic hides
//! in the handlers.

use anyhow::Result;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::common::auth::Caller;
use crate::common::{PageParams, UserId, PER_PAGE};

use super::models::{ApprovalStatus, Office};
use super::types::ListParams;

/// Degrees-to-miles factor for one degree of latitude.
const MILES_PER_DEGREE: f64 = 69.1;

/// Divisor approximating degrees-to-radians for the longitude correction.
const DEGREES_PER_RADIAN: f64 = 57.3;

/// Fully-resolved filter for one list request.
#[derive(Debug, Clone, Default)]
pub struct OfficeFilter {
    /// The authenticated caller, if any.
    pub caller_id: Option<UserId>,
    /// Restrict to this owner (`user_id` / `host_id` parameter).
    pub owner_id: Option<UserId>,
    /// Restrict to offices the visitor has ever reserved.
    pub visitor_id: Option<UserId>,
    /// Proximity-ordering origin; requires both coordinates.
    pub coordinates: Option<(f64, f64)>,
}

impl OfficeFilter {
    pub fn from_params(params: &ListParams, caller: Option<&Caller>) -> Self {
        OfficeFilter {
            caller_id: caller.map(|c| c.user_id),
            owner_id: params.owner_id(),
            visitor_id: params.visitor_id(),
            coordinates: params.coordinates(),
        }
    }

    /// An owner browsing their own listings sees them all, including
    /// pending and hidden ones.
    pub fn owner_bypass(&self) -> bool {
        match (self.owner_id, self.caller_id) {
            (Some(owner), Some(caller)) => owner == caller,
            _ => false,
        }
    }

    /// Fetch one page of offices plus the filtered total.
    pub async fn fetch_page(
        &self,
        page: &PageParams,
        pool: &PgPool,
    ) -> Result<(Vec<Office>, i64)> {
        let mut query = QueryBuilder::<Postgres>::new(
            "SELECT * FROM offices WHERE deleted_at IS NULL",
        );
        self.push_predicates(&mut query);
        self.push_order(&mut query);
        query.push(" LIMIT ");
        query.push_bind(PER_PAGE);
        query.push(" OFFSET ");
        query.push_bind(page.offset());

        let offices = query.build_query_as::<Office>().fetch_all(pool).await?;

        let mut count_query = QueryBuilder::<Postgres>::new(
            "SELECT COUNT(*) FROM offices WHERE deleted_at IS NULL",
        );
        self.push_predicates(&mut count_query);
        let total = count_query
            .build_query_scalar::<i64>()
            .fetch_one(pool)
            .await?;

        Ok((offices, total))
    }

    fn push_predicates(&self, query: &mut QueryBuilder<'_, Postgres>) {
        if !self.owner_bypass() {
            query.push(" AND approval_status = ");
            query.push_bind(ApprovalStatus::Approved);
            query.push(" AND hidden = false");
        }

        if let Some(owner_id) = self.owner_id {
            query.push(" AND user_id = ");
            query.push_bind(owner_id);
        }

        if let Some(visitor_id) = self.visitor_id {
            query.push(
                " AND EXISTS (SELECT 1 FROM reservations r \
                 WHERE r.office_id = offices.id AND r.user_id = ",
            );
            query.push_bind(visitor_id);
            query.push(")");
        }
    }

    /// Ascending squared planar distance when coordinates are present,
    /// ascending id otherwise. The id tie-break keeps page boundaries
    /// deterministic for equal scores.
    fn push_order(&self, query: &mut QueryBuilder<'_, Postgres>) {
        match self.coordinates {
            Some((lat, lng)) => {
                query.push(format_args!(" ORDER BY POW({MILES_PER_DEGREE} * (lat::float8 - "));
                query.push_bind(lat);
                query.push(format_args!("), 2) + POW({MILES_PER_DEGREE} * ("));
                query.push_bind(lng);
                query.push(format_args!(
                    " - lng::float8) * COS(lat::float8 / {DEGREES_PER_RADIAN}), 2) ASC, id ASC"
                ));
            }
            None => {
                query.push(" ORDER BY id ASC");
            }
        }
    }
}
