//! Domain Layer
//!
//! Typed records shared across layers, plus the core entity abstraction.

mod entity;
mod order;
mod pending;
mod service;
mod user;

pub use entity::Entity;
pub use order::{NewOrder, Order, OrderPatch, OrderStatus};
pub use pending::{ChangeKind, PendingChange};
pub use service::{NewService, Service, ServicePatch};
pub use user::{NewUser, User, UserPatch, UserRole, UserStatus};
