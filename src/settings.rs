//! Website Settings
//!
//! The single document behind the public pages' copy and branding.
//! Stored settings are merged over the defaults, so a document written
//! by an older build keeps working after new fields appear.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::repository::{keys, LocalStore, StoreError, StoreResult};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct WebsiteSettings {
    // Logo & branding
    pub logo: Option<String>,
    pub site_name: String,
    pub tagline: String,

    // Company information
    pub company_description: String,
    pub about_us: String,
    pub company_story: String,
    pub founded_year: String,

    // Contact information
    pub contact_email: String,
    pub phone: String,
    pub address: String,

    // Hero section
    pub hero_title: String,
    pub hero_subtitle: String,
    pub hero_button_text: String,
    pub hero_secondary_button_text: String,

    // Statistics
    pub projects_completed: String,
    pub happy_clients: String,
    pub average_delivery: String,
    pub client_satisfaction: String,

    // Mission, vision, values
    pub mission: String,
    pub vision: String,
    pub values: String,

    // Social media
    pub website: String,
    pub linkedin: String,
    pub github: String,
    pub mail: String,
    pub twitter: String,
    pub facebook: String,
    pub instagram: String,
    pub show_linkedin: bool,
    pub show_github: bool,
    pub show_mail: bool,

    // SEO
    pub meta_title: String,
    pub meta_description: String,
    pub meta_keywords: String,
}

impl Default for WebsiteSettings {
    fn default() -> Self {
        Self {
            logo: None,
            site_name: "Dajin".into(),
            tagline: "Custom Web Development Company".into(),
            company_description: "Custom web development company".into(),
            about_us: "We are a passionate team of developers, designers, and digital strategists committed to creating exceptional digital experiences.".into(),
            company_story: "Founded in 2020, Dajin started as a small team of passionate developers who believed that every business deserves a digital presence that truly represents their vision and values.".into(),
            founded_year: "2020".into(),
            contact_email: "hello@dajin.dev".into(),
            phone: "+1 (555) 123-4567".into(),
            address: "123 Tech Street, Digital City, DC 12345".into(),
            hero_title: "We Build What You Imagine".into(),
            hero_subtitle: "Custom websites, mobile apps, and web applications crafted with precision and passion. Transform your ideas into digital reality.".into(),
            hero_button_text: "Start Your Project".into(),
            hero_secondary_button_text: "View Our Work".into(),
            projects_completed: "100+".into(),
            happy_clients: "50+".into(),
            average_delivery: "2 Week".into(),
            client_satisfaction: "99%".into(),
            mission: "To empower businesses with cutting-edge digital solutions that drive growth and success.".into(),
            vision: "To be the leading development partner for innovative companies worldwide.".into(),
            values: "Quality, innovation, and client satisfaction are at the heart of everything we do.".into(),
            website: "https://dajin.dev".into(),
            linkedin: "https://linkedin.com/company/dajin".into(),
            github: "https://github.com/dajin".into(),
            mail: "mailto:hello@dajin.dev".into(),
            twitter: "https://twitter.com/dajin".into(),
            facebook: "https://facebook.com/dajin".into(),
            instagram: "https://instagram.com/dajin".into(),
            show_linkedin: true,
            show_github: true,
            show_mail: true,
            meta_title: "Dajin - Custom Web Development Company".into(),
            meta_description: "Professional web development, mobile apps, and digital solutions. Transform your ideas into reality with our expert development team.".into(),
            meta_keywords: "web development, mobile apps, custom software, digital solutions".into(),
        }
    }
}

/// Settings accessor over the local store
pub struct SettingsStore {
    store: Arc<dyn LocalStore>,
}

impl SettingsStore {
    pub fn new(store: Arc<dyn LocalStore>) -> Self {
        Self { store }
    }

    /// Stored document merged over the defaults; defaults when nothing
    /// is stored.
    pub async fn load(&self) -> StoreResult<WebsiteSettings> {
        Ok(self
            .store
            .get_json(keys::WEBSITE_SETTINGS)
            .await?
            .unwrap_or_default())
    }

    /// Apply a partial JSON object onto the current settings and persist
    /// the result.
    pub async fn update(&self, patch: Value) -> StoreResult<WebsiteSettings> {
        let Some(fields) = patch.as_object() else {
            return Err(StoreError::Invalid(
                "settings patch must be a JSON object".to_string(),
            ));
        };
        let mut current = serde_json::to_value(self.load().await?)?;
        if let Some(target) = current.as_object_mut() {
            for (key, value) in fields {
                target.insert(key.clone(), value.clone());
            }
        }
        let merged: WebsiteSettings = serde_json::from_value(current)?;
        self.store
            .set_json(keys::WEBSITE_SETTINGS, &merged)
            .await?;
        Ok(merged)
    }

    /// Drop the stored document and go back to defaults
    pub async fn reset(&self) -> StoreResult<WebsiteSettings> {
        self.store.remove(keys::WEBSITE_SETTINGS).await?;
        Ok(WebsiteSettings::default())
    }
}
