//! DTOs for clientes_sea adapter.

use crate::entities::clientes::CustomerStatus;

/// DTO for inserting a customer.
#[derive(Debug, Clone)]
pub struct CustomerCreate {
    pub cedula: String,
    pub nombre: String,
    pub apellidos: String,
    pub email: String,
    pub telefono: Option<String>,
    pub direccion: Option<String>,
    pub barrio: Option<String>,
    pub estado: CustomerStatus,
}

/// DTO for a partial update; `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct CustomerUpdate {
    pub cedula: Option<String>,
    pub nombre: Option<String>,
    pub apellidos: Option<String>,
    pub email: Option<String>,
    pub telefono: Option<String>,
    pub direccion: Option<String>,
    pub barrio: Option<String>,
    pub estado: Option<CustomerStatus>,
}
