//! Service Record
//!
//! A sellable offering shown on the public site and managed from the
//! admin dashboard. Identity is assigned by whichever side persists the
//! record first: the remote store on success, otherwise a locally minted
//! synthetic id. A locally minted id is never reconciled against a later
//! remote one.

use chrono::Utc;
use rand::{distr::Alphanumeric, Rng};
use serde::{Deserialize, Serialize};

use super::entity::Entity;

/// A service offering
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Service {
    pub id: String,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub duration: String,
    /// Ordered list of selling points shown on the service card
    pub features: Vec<String>,
    /// Icon tag rendered by the frontend
    pub icon: String,
    pub active: bool,
    #[serde(default)]
    pub highlighted: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Service {
    /// Mint a synthetic id for a record the remote store never saw.
    ///
    /// Pattern: `service_<millis>_<9 lowercase alphanumerics>`.
    pub fn mint_id() -> String {
        format!(
            "service_{}_{}",
            Utc::now().timestamp_millis(),
            alnum_suffix(9).to_lowercase()
        )
    }
}

impl Entity for Service {
    type Id = String;

    fn id(&self) -> Self::Id {
        self.id.clone()
    }
}

/// Input for creating a service; the id and timestamps are assigned at
/// persistence time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NewService {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub duration: String,
    pub features: Vec<String>,
    pub icon: String,
    pub active: bool,
    pub highlighted: bool,
}

impl Default for NewService {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            price: 0.0,
            category: "Development".to_string(),
            duration: "1-2 weeks".to_string(),
            features: Vec::new(),
            icon: "Code".to_string(),
            active: false,
            highlighted: false,
        }
    }
}

impl NewService {
    /// Build the stored record under the given id, stamping both
    /// timestamps with the current time.
    pub fn into_service(self, id: String) -> Service {
        let now = Utc::now().to_rfc3339();
        Service {
            id,
            title: self.title,
            description: self.description,
            price: self.price,
            category: self.category,
            duration: self.duration,
            features: self.features,
            icon: self.icon,
            active: self.active,
            highlighted: self.highlighted,
            created_at: Some(now.clone()),
            updated_at: Some(now),
        }
    }
}

/// Partial update for a service
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServicePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlighted: Option<bool>,
}

impl ServicePatch {
    /// Apply the set fields onto `service`, refreshing `updated_at`.
    pub fn apply(&self, service: &mut Service) {
        if let Some(title) = &self.title {
            service.title = title.clone();
        }
        if let Some(description) = &self.description {
            service.description = description.clone();
        }
        if let Some(price) = self.price {
            service.price = price;
        }
        if let Some(category) = &self.category {
            service.category = category.clone();
        }
        if let Some(duration) = &self.duration {
            service.duration = duration.clone();
        }
        if let Some(features) = &self.features {
            service.features = features.clone();
        }
        if let Some(icon) = &self.icon {
            service.icon = icon.clone();
        }
        if let Some(active) = self.active {
            service.active = active;
        }
        if let Some(highlighted) = self.highlighted {
            service.highlighted = highlighted;
        }
        service.updated_at = Some(Utc::now().to_rfc3339());
    }
}

pub(crate) fn alnum_suffix(len: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}
