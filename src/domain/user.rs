//! User Record
//!
//! Registered client or admin as listed on the admin users page.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::entity::Entity;
use super::service::alnum_suffix;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    Client,
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    #[default]
    Active,
    Inactive,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: UserRole,
    pub status: UserStatus,
    pub join_date: String,
    pub total_orders: u32,
    /// Free-text currency string, like an order amount
    pub total_spent: String,
}

impl User {
    pub fn mint_id() -> String {
        format!(
            "user_{}_{}",
            Utc::now().timestamp_millis(),
            alnum_suffix(9).to_lowercase()
        )
    }
}

impl Entity for User {
    type Id = String;

    fn id(&self) -> Self::Id {
        self.id.clone()
    }
}

/// Input for creating a user; the id is minted at persistence time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub role: UserRole,
    #[serde(default)]
    pub status: UserStatus,
    #[serde(default)]
    pub join_date: String,
    #[serde(default)]
    pub total_orders: u32,
    #[serde(default)]
    pub total_spent: String,
}

impl NewUser {
    pub fn into_user(self, id: String) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            role: self.role,
            status: self.status,
            join_date: self.join_date,
            total_orders: self.total_orders,
            total_spent: self.total_spent,
        }
    }
}

/// Partial update for a user
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<UserStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub join_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_orders: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_spent: Option<String>,
}

impl UserPatch {
    pub fn apply(&self, user: &mut User) {
        if let Some(name) = &self.name {
            user.name = name.clone();
        }
        if let Some(email) = &self.email {
            user.email = email.clone();
        }
        if let Some(phone) = &self.phone {
            user.phone = phone.clone();
        }
        if let Some(role) = self.role {
            user.role = role;
        }
        if let Some(status) = self.status {
            user.status = status;
        }
        if let Some(join_date) = &self.join_date {
            user.join_date = join_date.clone();
        }
        if let Some(total_orders) = self.total_orders {
            user.total_orders = total_orders;
        }
        if let Some(total_spent) = &self.total_spent {
            user.total_spent = total_spent.clone();
        }
    }
}
