//! Distributor Model

use serde::{Deserialize, Serialize};

/// Distributor (supplier) entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Distributor {
    pub id: i64,
    pub name: String,
    pub gstin: Option<String>,
    pub drug_license_no: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub is_active: bool,
}

/// Create distributor payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistributorCreate {
    pub name: String,
    pub gstin: Option<String>,
    pub drug_license_no: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

/// Update distributor payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DistributorUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gstin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drug_license_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}
