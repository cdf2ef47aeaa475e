//! Data Manager
//!
//! One service object over the local store for everything the admin
//! dashboard edits directly: orders, services and users. Constructed
//! once by the composition root and passed down; every write goes
//! through the store and so broadcasts the change notification other
//! handles reload on.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::analytics::{self, AnalyticsSummary};
use crate::domain::{
    Entity, NewOrder, NewService, NewUser, Order, OrderPatch, OrderStatus, Service, ServicePatch,
    User, UserPatch, UserRole, UserStatus,
};
use crate::repository::{keys, LocalStore, StoreResult};

pub struct DataManager {
    store: Arc<dyn LocalStore>,
}

impl DataManager {
    pub fn new(store: Arc<dyn LocalStore>) -> Self {
        Self { store }
    }

    // Orders

    pub async fn orders(&self) -> StoreResult<Vec<Order>> {
        self.collection(keys::ORDERS).await
    }

    pub async fn set_orders(&self, orders: &[Order]) -> StoreResult<()> {
        self.store.set_json(keys::ORDERS, orders).await
    }

    pub async fn add_order(&self, new: NewOrder) -> StoreResult<Order> {
        let order = new.into_order(Order::mint_id());
        self.append(keys::ORDERS, order.clone()).await?;
        Ok(order)
    }

    /// Returns the updated order, or `None` when the id is unknown
    /// (an update against a missing order is a no-op).
    pub async fn update_order(&self, id: &str, patch: OrderPatch) -> StoreResult<Option<Order>> {
        self.patch_in(keys::ORDERS, id, |order: &mut Order| patch.apply(order))
            .await
    }

    pub async fn delete_order(&self, id: &str) -> StoreResult<()> {
        self.remove_from::<Order>(keys::ORDERS, id).await
    }

    // Services

    pub async fn services(&self) -> StoreResult<Vec<Service>> {
        self.collection(keys::SERVICES).await
    }

    pub async fn set_services(&self, services: &[Service]) -> StoreResult<()> {
        self.store.set_json(keys::SERVICES, services).await
    }

    pub async fn add_service(&self, new: NewService) -> StoreResult<Service> {
        let service = new.into_service(Service::mint_id());
        self.append(keys::SERVICES, service.clone()).await?;
        Ok(service)
    }

    pub async fn update_service(
        &self,
        id: &str,
        patch: ServicePatch,
    ) -> StoreResult<Option<Service>> {
        self.patch_in(keys::SERVICES, id, |service: &mut Service| {
            patch.apply(service)
        })
        .await
    }

    pub async fn delete_service(&self, id: &str) -> StoreResult<()> {
        self.remove_from::<Service>(keys::SERVICES, id).await
    }

    // Users

    pub async fn users(&self) -> StoreResult<Vec<User>> {
        self.collection(keys::USERS).await
    }

    pub async fn set_users(&self, users: &[User]) -> StoreResult<()> {
        self.store.set_json(keys::USERS, users).await
    }

    pub async fn add_user(&self, new: NewUser) -> StoreResult<User> {
        let user = new.into_user(User::mint_id());
        self.append(keys::USERS, user.clone()).await?;
        Ok(user)
    }

    pub async fn update_user(&self, id: &str, patch: UserPatch) -> StoreResult<Option<User>> {
        self.patch_in(keys::USERS, id, |user: &mut User| patch.apply(user))
            .await
    }

    pub async fn delete_user(&self, id: &str) -> StoreResult<()> {
        self.remove_from::<User>(keys::USERS, id).await
    }

    // Dashboard reads

    pub async fn analytics(&self) -> StoreResult<AnalyticsSummary> {
        let orders = self.orders().await?;
        let services = self.services().await?;
        let users = self.users().await?;
        Ok(analytics::summarize(&orders, &services, &users))
    }

    pub async fn reset_all_data(&self) -> StoreResult<()> {
        self.store.remove(keys::ORDERS).await?;
        self.store.remove(keys::SERVICES).await?;
        self.store.remove(keys::USERS).await
    }

    /// Seed each empty collection with the demo content the site ships
    /// with. Non-empty collections are left alone.
    pub async fn initialize_sample_data(&self) -> StoreResult<()> {
        if self.services().await?.is_empty() {
            self.set_services(&sample_services()).await?;
        }
        if self.users().await?.is_empty() {
            self.set_users(&sample_users()).await?;
        }
        if self.orders().await?.is_empty() {
            self.set_orders(&sample_orders()).await?;
        }
        Ok(())
    }

    // Generic collection plumbing, shared by the three record types.

    async fn collection<T: Entity + DeserializeOwned>(&self, key: &str) -> StoreResult<Vec<T>> {
        Ok(self.store.get_json(key).await?.unwrap_or_default())
    }

    async fn append<T: Entity + Serialize + DeserializeOwned>(
        &self,
        key: &str,
        item: T,
    ) -> StoreResult<()> {
        let mut items = self.collection::<T>(key).await?;
        items.push(item);
        self.store.set_json(key, &items).await
    }

    async fn patch_in<T, F>(&self, key: &str, id: &str, patch: F) -> StoreResult<Option<T>>
    where
        T: Entity<Id = String> + Serialize + DeserializeOwned,
        F: FnOnce(&mut T),
    {
        let mut items = self.collection::<T>(key).await?;
        let Some(item) = items.iter_mut().find(|item| item.id() == id) else {
            return Ok(None);
        };
        patch(&mut *item);
        let updated = item.clone();
        self.store.set_json(key, &items).await?;
        Ok(Some(updated))
    }

    async fn remove_from<T>(&self, key: &str, id: &str) -> StoreResult<()>
    where
        T: Entity<Id = String> + Serialize + DeserializeOwned,
    {
        let mut items = self.collection::<T>(key).await?;
        items.retain(|item| item.id() != id);
        self.store.set_json(key, &items).await
    }
}

fn sample_services() -> Vec<Service> {
    let mk = |id: &str, title: &str, description: &str, price: f64, features: &[&str], icon: &str, highlighted: bool| {
        NewService {
            title: title.to_string(),
            description: description.to_string(),
            price,
            features: features.iter().map(|f| f.to_string()).collect(),
            icon: icon.to_string(),
            active: true,
            highlighted,
            ..Default::default()
        }
        .into_service(id.to_string())
    };
    vec![
        mk(
            "1",
            "Website Development",
            "Custom responsive websites built with modern technologies",
            2500.0,
            &["Responsive Design", "SEO Optimized", "Fast Performance", "CMS Integration"],
            "Code",
            true,
        ),
        mk(
            "2",
            "Mobile App Development",
            "Native and cross-platform mobile applications",
            5000.0,
            &["iOS & Android", "User-Friendly UI", "Push Notifications", "App Store Ready"],
            "Smartphone",
            true,
        ),
        mk(
            "3",
            "UI/UX Design",
            "Beautiful and intuitive user interface design",
            1500.0,
            &["User Research", "Wireframing", "Prototyping", "Design System"],
            "Palette",
            false,
        ),
    ]
}

fn sample_users() -> Vec<User> {
    vec![
        User {
            id: "1".to_string(),
            name: "John Doe".to_string(),
            email: "john@example.com".to_string(),
            phone: "+1 (555) 123-4567".to_string(),
            role: UserRole::Client,
            status: UserStatus::Active,
            join_date: "2024-01-15".to_string(),
            total_orders: 3,
            total_spent: "$7,500".to_string(),
        },
        User {
            id: "2".to_string(),
            name: "Jane Smith".to_string(),
            email: "jane@example.com".to_string(),
            phone: "+1 (555) 987-6543".to_string(),
            role: UserRole::Client,
            status: UserStatus::Active,
            join_date: "2024-02-20".to_string(),
            total_orders: 1,
            total_spent: "$2,500".to_string(),
        },
    ]
}

fn sample_orders() -> Vec<Order> {
    vec![
        Order {
            id: "ORD-001".to_string(),
            client: "John Doe".to_string(),
            email: "john@example.com".to_string(),
            service: "Website Development".to_string(),
            status: OrderStatus::Completed,
            amount: "$2,500".to_string(),
            date: "2024-03-01".to_string(),
            deadline: "2024-03-15".to_string(),
            assigned_to: Some("Admin".to_string()),
            description: "Complete website redesign with modern UI/UX".to_string(),
            progress: 100,
        },
        Order {
            id: "ORD-002".to_string(),
            client: "Jane Smith".to_string(),
            email: "jane@example.com".to_string(),
            service: "Mobile App Development".to_string(),
            status: OrderStatus::InProgress,
            amount: "$5,000".to_string(),
            date: "2024-03-10".to_string(),
            deadline: "2024-04-10".to_string(),
            assigned_to: Some("Development Team".to_string()),
            description: "Cross-platform mobile application for iOS and Android".to_string(),
            progress: 65,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MemoryStore;

    fn manager() -> (Arc<dyn LocalStore>, DataManager) {
        let store: Arc<dyn LocalStore> = Arc::new(MemoryStore::new());
        (store.clone(), DataManager::new(store))
    }

    fn new_order() -> NewOrder {
        NewOrder {
            client: "John Doe".to_string(),
            email: "john@example.com".to_string(),
            service: "Website Development".to_string(),
            status: OrderStatus::New,
            amount: "$2,500".to_string(),
            date: "2024-03-01".to_string(),
            deadline: "2024-03-15".to_string(),
            assigned_to: None,
            description: String::new(),
            progress: 0,
        }
    }

    #[tokio::test]
    async fn add_order_mints_id_and_persists() {
        let (_, manager) = manager();
        let order = manager.add_order(new_order()).await.expect("add failed");

        let re = regex::Regex::new(r"^ORD-\d+-[A-Z0-9]{6}$").unwrap();
        assert!(re.is_match(&order.id));

        let orders = manager.orders().await.unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0], order);
    }

    #[tokio::test]
    async fn update_order_merges_patch() {
        let (_, manager) = manager();
        let order = manager.add_order(new_order()).await.unwrap();

        let updated = manager
            .update_order(
                &order.id,
                OrderPatch {
                    status: Some(OrderStatus::Completed),
                    progress: Some(100),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .expect("order missing");

        assert_eq!(updated.status, OrderStatus::Completed);
        assert_eq!(updated.progress, 100);
        assert_eq!(updated.client, "John Doe");
    }

    #[tokio::test]
    async fn update_of_unknown_order_is_a_no_op() {
        let (_, manager) = manager();
        manager.add_order(new_order()).await.unwrap();

        let result = manager
            .update_order("ORD-0-XXXXXX", OrderPatch::default())
            .await
            .unwrap();
        assert!(result.is_none());
        assert_eq!(manager.orders().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn delete_order_removes_it() {
        let (_, manager) = manager();
        let order = manager.add_order(new_order()).await.unwrap();
        manager.delete_order(&order.id).await.unwrap();
        assert!(manager.orders().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn sample_data_only_seeds_empty_collections() {
        let (_, manager) = manager();
        manager.initialize_sample_data().await.unwrap();
        assert_eq!(manager.services().await.unwrap().len(), 3);
        assert_eq!(manager.users().await.unwrap().len(), 2);
        assert_eq!(manager.orders().await.unwrap().len(), 2);

        manager.delete_user("2").await.unwrap();
        manager.initialize_sample_data().await.unwrap();
        // Users survived the second pass untouched
        assert_eq!(manager.users().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn reset_clears_all_collections() {
        let (_, manager) = manager();
        manager.initialize_sample_data().await.unwrap();
        manager.reset_all_data().await.unwrap();
        assert!(manager.orders().await.unwrap().is_empty());
        assert!(manager.services().await.unwrap().is_empty());
        assert!(manager.users().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn updates_broadcast_to_other_handles() {
        let (store, manager_a) = manager();
        let manager_b = DataManager::new(store.clone());
        manager_a.initialize_sample_data().await.unwrap();

        let mut events = store.subscribe();
        manager_a
            .update_service(
                "1",
                ServicePatch {
                    active: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .expect("service missing");

        let event = events.recv().await.expect("no event");
        assert_eq!(event.key, keys::SERVICES);

        let seen = manager_b.services().await.unwrap();
        let flag = seen.iter().find(|s| s.id == "1").unwrap().active;
        assert!(!flag);
    }
}
