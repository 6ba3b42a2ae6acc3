//! Handlers for the `/rentals` resource: lifecycle mutations,
//! availability checks, and the calendar view.
//!
//! Every mutation follows the same shape: validate, run the availability
//! gate, apply the write (rental + items share one transaction), apply
//! the product side effects, then reconcile the touched products. A
//! failed reconciliation never rolls the mutation back — it is logged
//! and surfaced as `reconciled: false` so the admin UI can prompt a
//! manual pass.

use atelier_core::availability::{assess, ProductAvailability};
use atelier_core::error::CoreError;
use atelier_core::rental;
use atelier_core::types::{Day, DbId};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{Days, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use atelier_db::models::rental::{CreateRental, Rental, RentalWithCustomer, UpdateRental};
use atelier_db::models::rental_item::{RentalItemInput, RentalItemWithProduct};
use atelier_db::repositories::{
    AvailabilityRepo, CustomerRepo, ProductRepo, RentalItemRepo, RentalRepo,
};
use atelier_events::PlatformEvent;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response shapes
// ---------------------------------------------------------------------------

/// Inbound shape for rental creation: rental fields plus line items.
#[derive(Debug, Deserialize)]
pub struct CreateRentalRequest {
    #[serde(flatten)]
    pub rental: CreateRental,
    #[serde(default)]
    pub items: Vec<RentalItemInput>,
}

/// Inbound shape for rental updates. When `items` is present the line
/// items are rewritten wholesale.
#[derive(Debug, Deserialize)]
pub struct UpdateRentalRequest {
    #[serde(flatten)]
    pub rental: UpdateRental,
    pub items: Option<Vec<RentalItemInput>>,
}

/// Outcome of a rental mutation.
#[derive(Debug, Serialize)]
pub struct RentalMutationResponse {
    pub rental: Rental,
    pub items: Vec<RentalItemWithProduct>,
    /// False when the post-mutation status reconciliation failed; the
    /// mutation itself is never rolled back for it.
    pub reconciled: bool,
}

/// A rental in the list view, with the derived overdue flag attached.
#[derive(Debug, Serialize)]
pub struct RentalListEntry {
    #[serde(flatten)]
    pub rental: RentalWithCustomer,
    pub is_overdue: bool,
}

/// Rental detail: row, items, derived overdue flag.
#[derive(Debug, Serialize)]
pub struct RentalDetail {
    #[serde(flatten)]
    pub rental: Rental,
    pub items: Vec<RentalItemWithProduct>,
    pub is_overdue: bool,
}

/// Inbound shape for availability checks.
#[derive(Debug, Deserialize)]
pub struct AvailabilityRequest {
    pub product_ids: Vec<DbId>,
    pub start_date: Day,
    pub end_date: Day,
    /// Suppresses self-conflicts while editing an existing rental.
    pub exclude_rental_id: Option<DbId>,
}

/// Outcome of deleting a rental.
#[derive(Debug, Serialize)]
pub struct DeleteRentalResponse {
    /// Products that were attached to the deleted rental.
    pub freed_products: Vec<DbId>,
    pub reconciled: bool,
}

// ---------------------------------------------------------------------------
// Availability
// ---------------------------------------------------------------------------

/// POST /api/v1/rentals/availability
///
/// Classifies each requested product against active rentals: window
/// conflicts, plus overdue rentals that block the product outright.
pub async fn check_availability(
    RequireStaff(_auth): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<AvailabilityRequest>,
) -> AppResult<Json<DataResponse<Vec<ProductAvailability>>>> {
    validate_date_order(input.start_date, input.end_date)?;

    let reports = assess_products(
        &state,
        &input.product_ids,
        input.start_date,
        input.end_date,
        input.exclude_rental_id,
    )
    .await?;

    Ok(Json(DataResponse { data: reports }))
}

/// Fetch active windows and run the core availability rules.
async fn assess_products(
    state: &AppState,
    product_ids: &[DbId],
    start_date: Day,
    end_date: Day,
    exclude_rental_id: Option<DbId>,
) -> AppResult<Vec<ProductAvailability>> {
    let windows = AvailabilityRepo::active_windows_for_products(&state.pool, product_ids).await?;
    Ok(assess(
        product_ids,
        &windows,
        start_date,
        end_date,
        exclude_rental_id,
        today(),
    ))
}

/// Reject the mutation when any requested product is unavailable for the
/// window (booking conflict or overdue block).
async fn ensure_available(
    state: &AppState,
    product_ids: &[DbId],
    start_date: Day,
    end_date: Day,
    exclude_rental_id: Option<DbId>,
) -> AppResult<()> {
    let reports =
        assess_products(state, product_ids, start_date, end_date, exclude_rental_id).await?;
    let blocked: Vec<DbId> = reports
        .iter()
        .filter(|r| !r.is_available)
        .map(|r| r.product_id)
        .collect();
    if blocked.is_empty() {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Conflict(format!(
            "Products unavailable for the requested dates: {blocked:?}"
        ))))
    }
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

/// POST /api/v1/rentals
pub async fn create(
    RequireStaff(auth): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<CreateRentalRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<RentalMutationResponse>>)> {
    validate_date_order(input.rental.rental_start_date, input.rental.rental_end_date)?;
    validate_status(input.rental.status_id)?;

    let customer = CustomerRepo::find_by_id(&state.pool, input.rental.customer_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Customer",
            id: input.rental.customer_id,
        }))?;

    let product_ids: Vec<DbId> = input.items.iter().map(|i| i.product_id).collect();
    ensure_available(
        &state,
        &product_ids,
        input.rental.rental_start_date,
        input.rental.rental_end_date,
        None,
    )
    .await?;

    let rental = RentalRepo::create_with_items(&state.pool, &input.rental, &input.items).await?;

    apply_status_side_effect(&state, rental.status_id, &product_ids).await?;
    let reconciled = reconcile_quietly(&state, &product_ids).await;

    state.event_bus.publish(
        PlatformEvent::new("rental.created")
            .with_source("rental", rental.id)
            .with_actor(auth.user_id)
            .with_payload(serde_json::json!({
                "contract_number": rental.contract_number,
                "customer_name": customer.full_name,
                "rental_start_date": rental.rental_start_date,
                "rental_end_date": rental.rental_end_date,
                "item_count": input.items.len(),
            })),
    );

    tracing::info!(
        rental_id = rental.id,
        contract_number = %rental.contract_number,
        user_id = auth.user_id,
        "Rental created",
    );

    let items = RentalItemRepo::list_with_products(&state.pool, rental.id).await?;
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: RentalMutationResponse {
                rental,
                items,
                reconciled,
            },
        }),
    ))
}

/// GET /api/v1/rentals
pub async fn list(
    RequireStaff(_auth): RequireStaff,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<RentalListEntry>>>> {
    let today = today();
    let entries = RentalRepo::list(&state.pool)
        .await?
        .into_iter()
        .map(|rental| RentalListEntry {
            is_overdue: rental.is_overdue(today),
            rental,
        })
        .collect();
    Ok(Json(DataResponse { data: entries }))
}

/// GET /api/v1/rentals/{id}
pub async fn get_by_id(
    RequireStaff(_auth): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<RentalDetail>>> {
    let rental = find_rental(&state, id).await?;
    let items = RentalItemRepo::list_with_products(&state.pool, id).await?;
    Ok(Json(DataResponse {
        data: RentalDetail {
            is_overdue: rental.is_overdue(today()),
            rental,
            items,
        },
    }))
}

/// GET /api/v1/rentals/{id}/transitions
///
/// The natural next statuses. Advisory: update accepts any known status.
pub async fn transitions(
    RequireStaff(_auth): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<i16>>>> {
    let rental = find_rental(&state, id).await?;
    Ok(Json(DataResponse {
        data: rental::valid_transitions(rental.status_id).to_vec(),
    }))
}

/// PUT /api/v1/rentals/{id}
pub async fn update(
    RequireStaff(auth): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateRentalRequest>,
) -> AppResult<Json<DataResponse<RentalMutationResponse>>> {
    let existing = find_rental(&state, id).await?;

    let start_date = input
        .rental
        .rental_start_date
        .unwrap_or(existing.rental_start_date);
    let end_date = input
        .rental
        .rental_end_date
        .unwrap_or(existing.rental_end_date);
    validate_date_order(start_date, end_date)?;
    validate_status(input.rental.status_id)?;

    let before_ids = RentalItemRepo::product_ids_for_rental(&state.pool, id).await?;
    let after_ids: Vec<DbId> = match &input.items {
        Some(items) => items.iter().map(|i| i.product_id).collect(),
        None => before_ids.clone(),
    };

    // The rental being edited never conflicts with itself.
    ensure_available(&state, &after_ids, start_date, end_date, Some(id)).await?;

    let rental = RentalRepo::update_with_items(&state.pool, id, &input.rental, input.items.as_deref())
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Rental",
            id,
        }))?;

    if rental.status_id != existing.status_id {
        apply_status_side_effect(&state, rental.status_id, &after_ids).await?;
    }

    // Reconcile everything the edit touched, including products that
    // were dropped from the item list.
    let mut touched = before_ids;
    touched.extend(&after_ids);
    let reconciled = reconcile_quietly(&state, &touched).await;

    state.event_bus.publish(
        PlatformEvent::new("rental.updated")
            .with_source("rental", rental.id)
            .with_actor(auth.user_id)
            .with_payload(serde_json::json!({
                "contract_number": rental.contract_number,
                "status_id": rental.status_id,
            })),
    );

    let items = RentalItemRepo::list_with_products(&state.pool, id).await?;
    Ok(Json(DataResponse {
        data: RentalMutationResponse {
            rental,
            items,
            reconciled,
        },
    }))
}

/// DELETE /api/v1/rentals/{id}
///
/// Removes the rental (items cascade), then reconciles every formerly
/// attached product: each flips back to `available` unless another
/// active rental still references it.
pub async fn delete(
    RequireStaff(auth): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<DeleteRentalResponse>>> {
    let freed = RentalRepo::delete(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Rental",
            id,
        }))?;

    let reconciled = reconcile_quietly(&state, &freed).await;

    state.event_bus.publish(
        PlatformEvent::new("rental.deleted")
            .with_source("rental", id)
            .with_actor(auth.user_id),
    );

    Ok(Json(DataResponse {
        data: DeleteRentalResponse {
            freed_products: freed,
            reconciled,
        },
    }))
}

// ---------------------------------------------------------------------------
// Calendar
// ---------------------------------------------------------------------------

/// Query parameters for the calendar month view.
#[derive(Debug, Deserialize)]
pub struct CalendarParams {
    pub year: i32,
    pub month: u32,
}

/// GET /api/v1/rentals/calendar?year=&month=
///
/// Rentals whose interval touches the given month.
pub async fn calendar(
    RequireStaff(_auth): RequireStaff,
    State(state): State<AppState>,
    Query(params): Query<CalendarParams>,
) -> AppResult<Json<DataResponse<Vec<RentalListEntry>>>> {
    let first = NaiveDate::from_ymd_opt(params.year, params.month, 1).ok_or_else(|| {
        AppError::Core(CoreError::Validation(format!(
            "Invalid calendar month: {}-{}",
            params.year, params.month
        )))
    })?;
    let last = first
        .checked_add_months(Months::new(1))
        .and_then(|d| d.checked_sub_days(Days::new(1)))
        .ok_or_else(|| {
            AppError::Core(CoreError::Validation("Calendar month out of range".into()))
        })?;

    let today = today();
    let entries = RentalRepo::list_overlapping(&state.pool, first, last)
        .await?
        .into_iter()
        .map(|rental| RentalListEntry {
            is_overdue: rental.is_overdue(today),
            rental,
        })
        .collect();
    Ok(Json(DataResponse { data: entries }))
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn today() -> Day {
    Utc::now().date_naive()
}

fn validate_date_order(start: Day, end: Day) -> AppResult<()> {
    if start <= end {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Validation(format!(
            "rental_start_date {start} is after rental_end_date {end}"
        ))))
    }
}

fn validate_status(status_id: Option<i16>) -> AppResult<()> {
    match status_id {
        Some(id) if !rental::is_known_status(id) => Err(AppError::Core(CoreError::Validation(
            format!("Unknown rental status id {id}"),
        ))),
        _ => Ok(()),
    }
}

async fn find_rental(state: &AppState, id: DbId) -> AppResult<Rental> {
    RentalRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Rental",
            id,
        }))
}

/// Bulk product-status side effect of entering `status_id`.
async fn apply_status_side_effect(
    state: &AppState,
    status_id: i16,
    product_ids: &[DbId],
) -> AppResult<()> {
    if product_ids.is_empty() {
        return Ok(());
    }
    if let Some(effect) = rental::product_status_effect(status_id) {
        ProductRepo::set_status_bulk(&state.pool, product_ids, effect).await?;
    }
    Ok(())
}

/// Run the scoped reconciliation pass, reporting failure instead of
/// propagating it: the mutation that triggered it already committed.
async fn reconcile_quietly(state: &AppState, product_ids: &[DbId]) -> bool {
    match ProductRepo::reconcile_products(&state.pool, product_ids).await {
        Ok(corrected) => {
            if corrected > 0 {
                tracing::debug!(corrected, "Post-mutation reconciliation corrected products");
            }
            true
        }
        Err(e) => {
            tracing::error!(error = %e, ?product_ids, "Post-mutation reconciliation failed");
            false
        }
    }
}
