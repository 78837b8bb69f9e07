//! In-memory ports used by the service and handler tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::errors::DomainError;
use crate::domain::invoice::{Invoice, InvoiceStatus, NewInvoice};
use crate::domain::ports::{InvoiceRepository, OrderVerification, OrderVerifier, SupplierRepository};
use crate::domain::supplier::{NewSupplier, Supplier};

#[derive(Default)]
pub struct InMemorySuppliers {
    rows: Mutex<Vec<Supplier>>,
}

impl InMemorySuppliers {
    pub fn with(names: &[(&str, &str)]) -> Self {
        let rows = names
            .iter()
            .enumerate()
            .map(|(i, (name, email))| Supplier {
                id: i as i64 + 1,
                name: name.to_string(),
                email: email.to_string(),
                registered_at: Utc::now(),
            })
            .collect();
        Self {
            rows: Mutex::new(rows),
        }
    }

    pub fn count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[async_trait]
impl SupplierRepository for InMemorySuppliers {
    async fn create(&self, supplier: NewSupplier) -> Result<Supplier, DomainError> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|s| s.email == supplier.email) {
            return Err(DomainError::invalid("duplicate email"));
        }
        let created = Supplier {
            id: rows.len() as i64 + 1,
            name: supplier.name,
            email: supplier.email,
            registered_at: Utc::now(),
        };
        rows.push(created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Supplier>, DomainError> {
        Ok(self.rows.lock().unwrap().iter().find(|s| s.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Supplier>, DomainError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.email == email)
            .cloned())
    }

    async fn exists(&self, id: i64) -> Result<bool, DomainError> {
        Ok(self.rows.lock().unwrap().iter().any(|s| s.id == id))
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        Ok(self.rows.lock().unwrap().iter().any(|s| s.email == email))
    }

    async fn list(&self) -> Result<Vec<Supplier>, DomainError> {
        Ok(self.rows.lock().unwrap().clone())
    }
}

#[derive(Default)]
pub struct InMemoryInvoices {
    rows: Mutex<Vec<Invoice>>,
    next_id: Mutex<i64>,
    fail_writes: AtomicBool,
}

impl InMemoryInvoices {
    pub fn failing() -> Self {
        let repo = Self::default();
        repo.fail_writes.store(true, Ordering::SeqCst);
        repo
    }

    pub fn count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn set_status(&self, id: i64, status: InvoiceStatus) {
        let mut rows = self.rows.lock().unwrap();
        if let Some(invoice) = rows.iter_mut().find(|i| i.id == id) {
            invoice.status = status;
        }
    }
}

#[async_trait]
impl InvoiceRepository for InMemoryInvoices {
    async fn create(&self, invoice: NewInvoice) -> Result<Invoice, DomainError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DomainError::Storage("connection reset".to_string()));
        }
        let id = {
            let mut next = self.next_id.lock().unwrap();
            *next += 1;
            *next
        };
        let created = Invoice {
            id,
            supplier_id: invoice.supplier_id,
            orders: invoice.orders,
            total: invoice.total,
            created_at: Utc::now(),
            status: InvoiceStatus::Pending,
        };
        self.rows.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Invoice>, DomainError> {
        Ok(self.rows.lock().unwrap().iter().find(|i| i.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<Invoice>, DomainError> {
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn list_by_supplier(&self, supplier_id: i64) -> Result<Vec<Invoice>, DomainError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|i| i.supplier_id == supplier_id)
            .cloned()
            .collect())
    }

    async fn list_by_status(&self, status: InvoiceStatus) -> Result<Vec<Invoice>, DomainError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|i| i.status == status)
            .cloned()
            .collect())
    }

    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|i| i.id != id);
        Ok(rows.len() != before)
    }
}

/// Answers from a fixed table, `fallback` for anything not listed.
pub struct ScriptedVerifier {
    answers: HashMap<i64, OrderVerification>,
    fallback: OrderVerification,
    calls: Mutex<Vec<i64>>,
}

impl ScriptedVerifier {
    pub fn always(answer: OrderVerification) -> Self {
        Self {
            answers: HashMap::new(),
            fallback: answer,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn answering(answers: &[(i64, OrderVerification)]) -> Self {
        Self {
            answers: answers.iter().copied().collect(),
            fallback: OrderVerification::Exists,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<i64> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl OrderVerifier for ScriptedVerifier {
    async fn verify(&self, order_id: i64) -> OrderVerification {
        self.calls.lock().unwrap().push(order_id);
        self.answers
            .get(&order_id)
            .copied()
            .unwrap_or(self.fallback)
    }
}
