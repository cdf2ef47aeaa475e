//! Status Aggregator
//!
//! Pure, synchronous dashboard figures computed from in-memory
//! collections. Revenue comes from free-text currency strings; anything
//! that does not parse counts as zero. No rounding or currency-unit
//! handling.

use serde::Serialize;

use crate::domain::{Order, OrderStatus, Service, User, UserStatus};

/// Parse a currency-formatted string, stripping `$`, `,` and whitespace.
///
/// Any non-numeric leftover yields `0.0`.
pub fn parse_amount(raw: &str) -> f64 {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, '$' | ',') && !c.is_whitespace())
        .collect();
    cleaned.parse().unwrap_or(0.0)
}

/// Per-service order figures; services with no orders are omitted
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceStats {
    pub id: String,
    pub title: String,
    pub order_count: usize,
    /// Sum over completed orders only
    pub revenue: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    /// Sum over completed orders only
    pub total_revenue: f64,
    pub total_orders: usize,
    pub total_users: usize,
    pub active_users: usize,
    pub completed_orders: usize,
    /// New or in-progress
    pub pending_orders: usize,
    pub top_services: Vec<ServiceStats>,
}

pub fn summarize(orders: &[Order], services: &[Service], users: &[User]) -> AnalyticsSummary {
    let total_revenue = orders
        .iter()
        .filter(|o| o.status == OrderStatus::Completed)
        .map(|o| parse_amount(&o.amount))
        .sum();

    // Orders reference services by free-text title
    let top_services = services
        .iter()
        .map(|service| {
            let matching = || orders.iter().filter(|o| o.service == service.title);
            ServiceStats {
                id: service.id.clone(),
                title: service.title.clone(),
                order_count: matching().count(),
                revenue: matching()
                    .filter(|o| o.status == OrderStatus::Completed)
                    .map(|o| parse_amount(&o.amount))
                    .sum(),
            }
        })
        .filter(|stats| stats.order_count > 0)
        .collect();

    AnalyticsSummary {
        total_revenue,
        total_orders: orders.len(),
        total_users: users.len(),
        active_users: users
            .iter()
            .filter(|u| u.status == UserStatus::Active)
            .count(),
        completed_orders: orders
            .iter()
            .filter(|o| o.status == OrderStatus::Completed)
            .count(),
        pending_orders: orders
            .iter()
            .filter(|o| matches!(o.status, OrderStatus::New | OrderStatus::InProgress))
            .count(),
        top_services,
    }
}
