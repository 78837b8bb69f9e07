use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::ports::SupplierRepository;
use crate::domain::supplier::{NewSupplier, Supplier};
use crate::schema::proveedores;

use super::models::{NewSupplierRow, SupplierRow};
use super::with_conn;

impl From<SupplierRow> for Supplier {
    fn from(row: SupplierRow) -> Self {
        Supplier {
            id: row.id,
            name: row.name,
            email: row.email,
            registered_at: row.registered_at,
        }
    }
}

#[derive(Clone)]
pub struct DieselSupplierRepository {
    pool: DbPool,
}

impl DieselSupplierRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SupplierRepository for DieselSupplierRepository {
    async fn create(&self, supplier: NewSupplier) -> Result<Supplier, DomainError> {
        with_conn(&self.pool, move |conn| {
            let inserted = diesel::insert_into(proveedores::table)
                .values(&NewSupplierRow {
                    name: &supplier.name,
                    email: &supplier.email,
                })
                .returning(SupplierRow::as_returning())
                .get_result::<SupplierRow>(conn);

            match inserted {
                Ok(row) => Ok(row.into()),
                // lost a race against another registration with the same email
                Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
                    Err(DomainError::invalid(format!(
                        "A supplier with email {} is already registered",
                        supplier.email
                    )))
                }
                Err(e) => Err(e.into()),
            }
        })
        .await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Supplier>, DomainError> {
        with_conn(&self.pool, move |conn| {
            let row = proveedores::table
                .find(id)
                .select(SupplierRow::as_select())
                .first(conn)
                .optional()?;
            Ok(row.map(Supplier::from))
        })
        .await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Supplier>, DomainError> {
        let email = email.to_string();
        with_conn(&self.pool, move |conn| {
            let row = proveedores::table
                .filter(proveedores::correo.eq(email))
                .select(SupplierRow::as_select())
                .first(conn)
                .optional()?;
            Ok(row.map(Supplier::from))
        })
        .await
    }

    async fn exists(&self, id: i64) -> Result<bool, DomainError> {
        with_conn(&self.pool, move |conn| {
            let found = diesel::select(diesel::dsl::exists(proveedores::table.find(id)))
                .get_result::<bool>(conn)?;
            Ok(found)
        })
        .await
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        let email = email.to_string();
        with_conn(&self.pool, move |conn| {
            Ok(diesel::select(diesel::dsl::exists(
                proveedores::table.filter(proveedores::correo.eq(email)),
            ))
            .get_result::<bool>(conn)?)
        })
        .await
    }

    async fn list(&self) -> Result<Vec<Supplier>, DomainError> {
        with_conn(&self.pool, |conn| {
            let rows = proveedores::table
                .select(SupplierRow::as_select())
                .order(proveedores::id.asc())
                .load(conn)?;
            Ok(rows.into_iter().map(Supplier::from).collect())
        })
        .await
    }
}
