//! REST payloads for the dashboard's tracked products, alerts, and profile.
//!
//! Identifiers and timestamps stay as strings; the UI only displays them.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub image_url: String,
    pub current_price: f64,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub is_available: bool,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Create/update body for a tracked product.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ProductInput {
    pub name: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PriceHistoryEntry {
    pub id: String,
    pub product_id: String,
    pub price: f64,
    pub created_at: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: String,
    pub product_id: String,
    pub target_price: f64,
    pub is_active: bool,
    #[serde(default)]
    pub notification_type: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub notified_at: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AlertInput {
    pub product_id: String,
    pub target_price: f64,
    pub notification_type: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChange {
    pub current_password: String,
    pub new_password: String,
}

/// A signed-in device as listed on the settings screen.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveSession {
    pub id: String,
    #[serde(default)]
    pub user_agent: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub current: bool,
}
