//! Store Key Schema
//!
//! The informal, string-keyed schema of the local document store. Every
//! collection and flag lives under one of these keys as a JSON document
//! or plain string.

/// Cached service collection (JSON array of `Service`)
pub const SERVICES: &str = "services";
/// Order collection (JSON array of `Order`)
pub const ORDERS: &str = "orders";
/// User collection (JSON array of `User`)
pub const USERS: &str = "users";
/// Pending-change ledger (JSON array of `PendingChange`)
pub const PENDING_CHANGES: &str = "pending_changes";
/// Which tier last populated the services cache
pub const SERVICES_SOURCE: &str = "services_source";
/// RFC 3339 time of the last successful remote read
pub const SERVICES_LAST_SYNC: &str = "services_last_sync";
/// Website settings document (JSON `WebsiteSettings`)
pub const WEBSITE_SETTINGS: &str = "websiteSettings";

// Admin-session keys owned by the admin login flow, which lives outside
// this crate. Declared so the documented schema is complete.
pub const ADMIN_CREDENTIALS: &str = "adminCredentials";
pub const ADMIN_CONFIGURED: &str = "adminConfigured";
pub const IS_ADMIN_LOGGED_IN: &str = "isAdminLoggedIn";
pub const ADMIN_EMAIL: &str = "adminEmail";
