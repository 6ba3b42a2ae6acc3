//! Shared fixtures for db integration tests.

#![allow(dead_code)]

use atelier_core::types::{Day, DbId};
use atelier_db::models::customer::{CreateCustomer, Customer};
use atelier_db::models::product::{CreateProduct, Product};
use atelier_db::models::rental::{CreateRental, Rental};
use atelier_db::models::rental_item::RentalItemInput;
use atelier_db::models::status::StatusId;
use atelier_db::repositories::{CustomerRepo, ProductRepo, RentalRepo};
use chrono::NaiveDate;
use sqlx::PgPool;

pub fn d(s: &str) -> Day {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid test date")
}

pub async fn seed_customer(pool: &PgPool) -> Customer {
    CustomerRepo::create(
        pool,
        &CreateCustomer {
            full_name: "Helena Prado".to_string(),
            phone: "+55 11 97777-0000".to_string(),
            email: None,
            document_number: None,
            address: None,
            notes: None,
        },
    )
    .await
    .expect("seed customer")
}

pub async fn seed_product(pool: &PgPool, name: &str) -> Product {
    ProductRepo::create(
        pool,
        &CreateProduct {
            name: name.to_string(),
            description: None,
            sku: None,
            base_sku: None,
            parent_product_id: None,
            is_variant: None,
            status_id: None,
            quantity: None,
            rental_price_cents: None,
            category_id: None,
            color_id: None,
            size_id: None,
        },
    )
    .await
    .expect("seed product")
}

/// Create a rental holding the given products, one unit each.
pub async fn seed_rental(
    pool: &PgPool,
    customer_id: DbId,
    start: &str,
    end: &str,
    status_id: StatusId,
    product_ids: &[DbId],
) -> Rental {
    let items: Vec<RentalItemInput> = product_ids
        .iter()
        .map(|&product_id| RentalItemInput {
            product_id,
            quantity: None,
        })
        .collect();

    RentalRepo::create_with_items(
        pool,
        &CreateRental {
            customer_id,
            event_date: None,
            rental_start_date: d(start),
            rental_end_date: d(end),
            status_id: Some(status_id),
            total_amount_cents: None,
            deposit_amount_cents: None,
            notes: None,
        },
        &items,
    )
    .await
    .expect("seed rental")
}
