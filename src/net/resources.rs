//! Typed wrappers for the dashboard's protected REST resources.
//!
//! SYSTEM CONTEXT
//! ==============
//! All calls go through the authenticated `ApiClient` pipeline, so an
//! expired credential on any screen ends the session the same way. Every
//! method returns the pipeline's `ApiError` unchanged.

#![allow(clippy::missing_errors_doc)]

#[cfg(test)]
#[path = "resources_test.rs"]
mod resources_test;

use super::client::ApiClient;
use super::error::ApiError;
use super::types::{
    ActiveSession, Alert, AlertInput, PasswordChange, PriceHistoryEntry, Product, ProductInput, ProfileUpdate,
    UserProfile,
};

fn product_path(id: &str) -> String {
    format!("/products/{id}")
}

fn alert_path(id: &str) -> String {
    format!("/alerts/{id}")
}

#[derive(Clone, Debug)]
pub struct ProductsApi {
    client: ApiClient,
}

impl ProductsApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Product>, ApiError> {
        self.client.get_json("/products").await
    }

    pub async fn get(&self, id: &str) -> Result<Product, ApiError> {
        self.client.get_json(&product_path(id)).await
    }

    pub async fn create(&self, input: &ProductInput) -> Result<Product, ApiError> {
        self.client.post_json("/products", input).await
    }

    pub async fn update(&self, id: &str, input: &ProductInput) -> Result<Product, ApiError> {
        self.client.put_json(&product_path(id), input).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.client.delete(&product_path(id)).await
    }

    /// Trigger an immediate price check.
    pub async fn check_price(&self, id: &str) -> Result<Product, ApiError> {
        self.client
            .post_json(&format!("{}/check", product_path(id)), &serde_json::json!({}))
            .await
    }

    pub async fn price_history(&self, id: &str) -> Result<Vec<PriceHistoryEntry>, ApiError> {
        self.client.get_json(&format!("{}/history", product_path(id))).await
    }
}

#[derive(Clone, Debug)]
pub struct AlertsApi {
    client: ApiClient,
}

impl AlertsApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Alert>, ApiError> {
        self.client.get_json("/alerts").await
    }

    pub async fn get(&self, id: &str) -> Result<Alert, ApiError> {
        self.client.get_json(&alert_path(id)).await
    }

    pub async fn create(&self, input: &AlertInput) -> Result<Alert, ApiError> {
        self.client.post_json("/alerts", input).await
    }

    pub async fn update(&self, id: &str, input: &AlertInput) -> Result<Alert, ApiError> {
        self.client.put_json(&alert_path(id), input).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.client.delete(&alert_path(id)).await
    }

    /// Flip an alert between active and paused.
    pub async fn toggle(&self, id: &str) -> Result<Alert, ApiError> {
        self.client.patch_json(&format!("{}/toggle", alert_path(id))).await
    }
}

#[derive(Clone, Debug)]
pub struct UserApi {
    client: ApiClient,
}

impl UserApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn profile(&self) -> Result<UserProfile, ApiError> {
        self.client.get_json("/users/me").await
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<UserProfile, ApiError> {
        self.client.put_json("/users/me", update).await
    }

    pub async fn change_password(&self, change: &PasswordChange) -> Result<(), ApiError> {
        self.client.post_empty("/users/change-password", Some(change)).await
    }

    pub async fn sessions(&self) -> Result<Vec<ActiveSession>, ApiError> {
        self.client.get_json("/users/me/sessions").await
    }

    pub async fn revoke_session(&self, session_id: &str) -> Result<(), ApiError> {
        self.client.delete(&format!("/users/me/sessions/{session_id}")).await
    }
}
