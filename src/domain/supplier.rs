use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct NewSupplier {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Supplier {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub registered_at: DateTime<Utc>,
}
