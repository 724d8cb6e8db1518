//! Modelo de Package
//!
//! Paquete a entregar. Se persiste como documento en la colección `packages`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Estado logístico del paquete (lo actualizan las cascadas de rutas)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PackageStatus {
    #[default]
    Pending,
    Assigned,
    Delivered,
    Cancelled,
}

/// Campos descriptivos de un paquete (creación y actualización completa)
#[derive(Debug, Clone, PartialEq)]
pub struct PackageDetails {
    pub tracking_number: String,
    pub customer_name: String,
    pub customer_address: String,
    pub customer_phone: String,
    pub weight_kg: f64,
    pub volume_m3: f64,
}

/// Package principal - documento de la colección packages
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Package {
    pub id: Uuid,
    pub tracking_number: String,
    pub customer_name: String,
    pub customer_address: String,
    pub customer_phone: String,
    pub weight_kg: f64,
    pub volume_m3: f64,
    pub delivered: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: PackageStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Package {
    pub fn new(details: PackageDetails) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::nil(),
            tracking_number: details.tracking_number,
            customer_name: details.customer_name,
            customer_address: details.customer_address,
            customer_phone: details.customer_phone,
            weight_kg: details.weight_kg,
            volume_m3: details.volume_m3,
            delivered: false,
            delivery_timestamp: None,
            status: PackageStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply_details(&mut self, details: PackageDetails) {
        self.tracking_number = details.tracking_number;
        self.customer_name = details.customer_name;
        self.customer_address = details.customer_address;
        self.customer_phone = details.customer_phone;
        self.weight_kg = details.weight_kg;
        self.volume_m3 = details.volume_m3;
        self.updated_at = Utc::now();
    }

    /// Marca el paquete como entregado. Una segunda llamada vuelve a sellar la hora.
    pub fn mark_as_delivered(&mut self) {
        let now = Utc::now();
        self.delivered = true;
        self.delivery_timestamp = Some(now);
        self.status = PackageStatus::Delivered;
        self.updated_at = now;
    }
}
