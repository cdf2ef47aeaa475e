//! Order Record
//!
//! A client order as tracked by the admin dashboard. The `service` field
//! is the free-text service title, not a foreign key, and `amount` is a
//! free-text currency string; neither is validated at write time.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::entity::Entity;
use super::service::alnum_suffix;

/// Workflow status of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    #[default]
    New,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::New => "New",
            OrderStatus::InProgress => "In Progress",
            OrderStatus::Completed => "Completed",
            OrderStatus::Cancelled => "Cancelled",
        }
    }
}

/// A client order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub client: String,
    pub email: String,
    /// Free-text service title
    pub service: String,
    pub status: OrderStatus,
    /// Free-text currency string, e.g. "$2,500"
    pub amount: String,
    pub date: String,
    pub deadline: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    pub description: String,
    /// 0-100, not enforced at write time
    pub progress: i32,
}

impl Order {
    /// Mint an order id: `ORD-<millis>-<6 uppercase alphanumerics>`.
    pub fn mint_id() -> String {
        format!(
            "ORD-{}-{}",
            Utc::now().timestamp_millis(),
            alnum_suffix(6).to_uppercase()
        )
    }
}

impl Entity for Order {
    type Id = String;

    fn id(&self) -> Self::Id {
        self.id.clone()
    }
}

/// Input for creating an order; the id is minted at persistence time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub client: String,
    pub email: String,
    pub service: String,
    #[serde(default)]
    pub status: OrderStatus,
    pub amount: String,
    pub date: String,
    pub deadline: String,
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub progress: i32,
}

impl NewOrder {
    pub fn into_order(self, id: String) -> Order {
        Order {
            id,
            client: self.client,
            email: self.email,
            service: self.service,
            status: self.status,
            amount: self.amount,
            date: self.date,
            deadline: self.deadline,
            assigned_to: self.assigned_to,
            description: self.description,
            progress: self.progress,
        }
    }
}

/// Partial update for an order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<i32>,
}

impl OrderPatch {
    pub fn apply(&self, order: &mut Order) {
        if let Some(client) = &self.client {
            order.client = client.clone();
        }
        if let Some(email) = &self.email {
            order.email = email.clone();
        }
        if let Some(service) = &self.service {
            order.service = service.clone();
        }
        if let Some(status) = self.status {
            order.status = status;
        }
        if let Some(amount) = &self.amount {
            order.amount = amount.clone();
        }
        if let Some(date) = &self.date {
            order.date = date.clone();
        }
        if let Some(deadline) = &self.deadline {
            order.deadline = deadline.clone();
        }
        if let Some(assigned_to) = &self.assigned_to {
            order.assigned_to = Some(assigned_to.clone());
        }
        if let Some(description) = &self.description {
            order.description = description.clone();
        }
        if let Some(progress) = self.progress {
            order.progress = progress;
        }
    }
}
