//! Demo data for local development.

use chrono::{Duration, NaiveDateTime};
use rust_decimal::Decimal;
use tracing::info;

use crate::core::{timestamp, AppError, Result};
use crate::db::{Database, IdRow, SqlArg};

/// What a seeding run did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The store already holds reference data
    Skipped,
    Seeded { customers: usize, purchases: usize },
}

struct SeedCustomer {
    document_number: &'static str,
    first_name: &'static str,
    last_name: &'static str,
    email: &'static str,
    phone: &'static str,
    document_type_code: &'static str,
    /// (amount, days before the seeding instant)
    purchases: &'static [(i64, i64)],
}

const DOCUMENT_TYPES: &[(&str, &str)] = &[
    ("CC", "Cedula de Ciudadania"),
    ("NIT", "Numero de Identificacion Tributaria"),
    ("PAS", "Pasaporte"),
];

const CUSTOMERS: &[SeedCustomer] = &[
    SeedCustomer {
        document_number: "1234567890",
        first_name: "Juan",
        last_name: "Garcia Rodriguez",
        email: "juan.garcia@email.com",
        phone: "3001234567",
        document_type_code: "CC",
        purchases: &[(2_500_000, 5), (1_800_000, 10), (1_200_000, 15)],
    },
    SeedCustomer {
        document_number: "900123456-1",
        first_name: "Empresa",
        last_name: "ABC S.A.S",
        email: "contacto@empresaabc.com",
        phone: "6011234567",
        document_type_code: "NIT",
        purchases: &[(350_000, 20), (150_000, 25)],
    },
];

/// Insert the demo data set unless any document type already exists
pub async fn seed_demo_data(db: &Database, now: NaiveDateTime) -> Result<SeedOutcome> {
    let existing: Option<IdRow> = db
        .fetch_optional("SELECT id FROM document_types LIMIT 1", &[])
        .await?;
    if existing.is_some() {
        info!("Database already holds data, skipping seed");
        return Ok(SeedOutcome::Skipped);
    }

    let mut document_type_ids = Vec::with_capacity(DOCUMENT_TYPES.len());
    for (code, name) in DOCUMENT_TYPES {
        let id = insert_returning_id(
            db,
            "INSERT INTO document_types (code, name) VALUES (?, ?) RETURNING id",
            vec![SqlArg::from(*code), SqlArg::from(*name)],
        )
        .await?;
        document_type_ids.push((*code, id));
    }
    info!(count = document_type_ids.len(), "Document types created");

    let mut purchase_count = 0;
    for customer in CUSTOMERS {
        let document_type_id = document_type_ids
            .iter()
            .find(|(code, _)| *code == customer.document_type_code)
            .map(|(_, id)| *id)
            .ok_or_else(|| {
                AppError::internal(format!(
                    "Unknown seed document type {}",
                    customer.document_type_code
                ))
            })?;

        let customer_id = insert_returning_id(
            db,
            r#"
            INSERT INTO customers (
                document_number, first_name, last_name, email, phone, document_type_id
            ) VALUES (?, ?, ?, ?, ?, ?)
            RETURNING id
            "#,
            vec![
                SqlArg::from(customer.document_number),
                SqlArg::from(customer.first_name),
                SqlArg::from(customer.last_name),
                SqlArg::from(customer.email),
                SqlArg::from(customer.phone),
                SqlArg::from(document_type_id),
            ],
        )
        .await?;

        for (amount, days_ago) in customer.purchases {
            db.execute(
                "INSERT INTO purchases (amount, created_at, customer_id) VALUES (?, ?, ?)",
                &[
                    SqlArg::Text(Decimal::from(*amount).to_string()),
                    SqlArg::Text(timestamp::to_storage(now - Duration::days(*days_ago))),
                    SqlArg::Integer(customer_id),
                ],
            )
            .await?;
            purchase_count += 1;
        }
    }

    info!(
        customers = CUSTOMERS.len(),
        purchases = purchase_count,
        "Demo data seeded"
    );

    Ok(SeedOutcome::Seeded {
        customers: CUSTOMERS.len(),
        purchases: purchase_count,
    })
}

async fn insert_returning_id(db: &Database, sql: &str, args: Vec<SqlArg>) -> Result<i64> {
    let row: Option<IdRow> = db.fetch_optional(sql, &args).await?;
    row.map(|r| r.id)
        .ok_or_else(|| AppError::internal("Insert returned no id"))
}
