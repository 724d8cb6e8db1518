//! Modelo de Driver
//!
//! Este módulo contiene el struct Driver y su tipo de vehículo.
//! Se persiste como documento en la colección `drivers`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Tipo de vehículo del repartidor
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VehicleType {
    Bike,
    Van,
    Truck,
}

impl VehicleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleType::Bike => "bike",
            VehicleType::Van => "van",
            VehicleType::Truck => "truck",
        }
    }
}

impl std::fmt::Display for VehicleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Driver principal - documento de la colección drivers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Driver {
    pub id: Uuid,
    pub name: String,
    pub vehicle_type: VehicleType,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Driver {
    /// Nuevo repartidor, siempre activo. El id lo asigna el store al insertar.
    pub fn new(name: String, vehicle_type: VehicleType) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::nil(),
            name,
            vehicle_type,
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sobrescribe los tres campos mutables
    pub fn apply_update(&mut self, name: String, vehicle_type: VehicleType, active: bool) {
        self.name = name;
        self.vehicle_type = vehicle_type;
        self.active = active;
        self.updated_at = Utc::now();
    }
}
