//! Application state.

use std::sync::Arc;

use entities::{Entity, Product, Task, User};
use resource_store::ResourceRepository;

/// Shared application state.
pub struct AppState {
    /// User collection.
    pub users: ResourceRepository<User>,
    /// Product collection.
    pub products: ResourceRepository<Product>,
    /// Task collection.
    pub tasks: ResourceRepository<Task>,
}

impl AppState {
    /// Creates new application state.
    pub fn new(
        users: ResourceRepository<User>,
        products: ResourceRepository<Product>,
        tasks: ResourceRepository<Task>,
    ) -> Self {
        Self {
            users,
            products,
            tasks,
        }
    }

    /// Returns the repository for entity type `E`.
    pub fn repository<E: Entity>(&self) -> &ResourceRepository<E>
    where
        Self: AsRef<ResourceRepository<E>>,
    {
        AsRef::<ResourceRepository<E>>::as_ref(self)
    }
}

impl AsRef<ResourceRepository<User>> for AppState {
    fn as_ref(&self) -> &ResourceRepository<User> {
        &self.users
    }
}

impl AsRef<ResourceRepository<Product>> for AppState {
    fn as_ref(&self) -> &ResourceRepository<Product> {
        &self.products
    }
}

impl AsRef<ResourceRepository<Task>> for AppState {
    fn as_ref(&self) -> &ResourceRepository<Task> {
        &self.tasks
    }
}

/// Type alias for shared state.
pub type SharedState = Arc<AppState>;
