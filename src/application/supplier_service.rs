use std::sync::Arc;

use validator::ValidateEmail;

use crate::domain::errors::DomainError;
use crate::domain::ports::SupplierRepository;
use crate::domain::supplier::{NewSupplier, Supplier};

#[derive(Clone)]
pub struct SupplierService {
    repo: Arc<dyn SupplierRepository>,
}

impl SupplierService {
    pub fn new(repo: Arc<dyn SupplierRepository>) -> Self {
        Self { repo }
    }

    pub async fn create_supplier(&self, name: &str, email: &str) -> Result<Supplier, DomainError> {
        let name = name.trim();
        let email = email.trim();
        log::info!("Registering supplier {}", name);

        if name.is_empty() {
            return Err(DomainError::invalid("Supplier name must not be blank"));
        }
        if !email.validate_email() {
            return Err(DomainError::invalid(format!(
                "'{}' is not a valid email address",
                email
            )));
        }
        if self.repo.exists_by_email(email).await? {
            return Err(DomainError::invalid(format!(
                "A supplier with email {} is already registered",
                email
            )));
        }

        let supplier = self
            .repo
            .create(NewSupplier {
                name: name.to_string(),
                email: email.to_string(),
            })
            .await?;
        log::info!("Supplier {} registered", supplier.id);
        Ok(supplier)
    }

    pub async fn get_supplier(&self, id: i64) -> Result<Supplier, DomainError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "Supplier",
                id,
            })
    }

    pub async fn list_suppliers(&self) -> Result<Vec<Supplier>, DomainError> {
        self.repo.list().await
    }

    pub async fn supplier_exists(&self, id: i64) -> Result<bool, DomainError> {
        self.repo.exists(id).await
    }
}
