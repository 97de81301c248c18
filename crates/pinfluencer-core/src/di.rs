//! Dependency registry.
//!
//! Collaborators, hook groups and controllers are registered once at
//! bootstrap and shared by every route that references them. Trait objects
//! are stored the same way as concrete types:
//!
//! ```rust
//! use pinfluencer_core::Container;
//! use std::sync::Arc;
//!
//! trait Greeter: Send + Sync {
//!     fn greet(&self) -> String;
//! }
//!
//! struct English;
//!
//! impl Greeter for English {
//!     fn greet(&self) -> String {
//!         "hello".to_string()
//!     }
//! }
//!
//! let mut container = Container::new();
//! container.register::<dyn Greeter>(Arc::new(English));
//!
//! let greeter = container.resolve::<dyn Greeter>().unwrap();
//! assert_eq!(greeter.greet(), "hello");
//! ```

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use thiserror::Error;

/// Error when a dependency cannot be resolved.
#[derive(Debug, Clone, Error)]
#[error("failed to inject {type_name}: {reason}")]
pub struct InjectionError {
    /// The type name that could not be resolved.
    pub type_name: &'static str,
    /// The reason for the failure.
    pub reason: String,
}

impl InjectionError {
    /// Creates a new injection error for a missing service.
    pub fn not_registered<T: ?Sized>() -> Self {
        Self {
            type_name: std::any::type_name::<T>(),
            reason: "service not registered".to_string(),
        }
    }
}

/// A dependency injection container.
///
/// Every entry is an `Arc<T>` boxed behind `dyn Any`, keyed by the `TypeId`
/// of `T`. Wrapping the `Arc` itself lets `T` be unsized, so repositories
/// can be registered as `dyn BrandRepository` and resolved by that name.
#[derive(Default)]
pub struct Container {
    services: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl Container {
    /// Creates a new empty container.
    #[must_use]
    pub fn new() -> Self {
        Self {
            services: HashMap::new(),
        }
    }

    /// Registers a shared service, replacing any previous registration of `T`.
    pub fn register<T: ?Sized + Send + Sync + 'static>(&mut self, service: Arc<T>) {
        self.services.insert(TypeId::of::<T>(), Box::new(service));
    }

    /// Resolves a service, returning `None` if `T` was never registered.
    #[must_use]
    pub fn resolve<T: ?Sized + Send + Sync + 'static>(&self) -> Option<Arc<T>> {
        self.services
            .get(&TypeId::of::<T>())
            .and_then(|entry| entry.downcast_ref::<Arc<T>>())
            .cloned()
    }

    /// Resolves a service or returns an error.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pinfluencer_core::Container;
    /// use std::sync::Arc;
    ///
    /// struct Mapper;
    ///
    /// let container = Container::new();
    /// let result: Result<Arc<Mapper>, _> = container.resolve_required();
    /// assert!(result.is_err());
    /// ```
    pub fn resolve_required<T: ?Sized + Send + Sync + 'static>(
        &self,
    ) -> Result<Arc<T>, InjectionError> {
        self.resolve::<T>()
            .ok_or_else(InjectionError::not_registered::<T>)
    }

    /// Checks if a service is registered.
    #[must_use]
    pub fn contains<T: ?Sized + Send + Sync + 'static>(&self) -> bool {
        self.services.contains_key(&TypeId::of::<T>())
    }

    /// Returns the number of registered services.
    #[must_use]
    pub fn len(&self) -> usize {
        self.services.len()
    }

    /// Returns `true` if no services are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("service_count", &self.services.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct TestService {
        value: String,
    }

    trait Repository: Send + Sync {
        fn name(&self) -> &str;
    }

    impl Repository for TestService {
        fn name(&self) -> &str {
            &self.value
        }
    }

    fn service(value: &str) -> Arc<TestService> {
        Arc::new(TestService {
            value: value.to_string(),
        })
    }

    #[test]
    fn test_container_new() {
        let container = Container::new();
        assert!(container.is_empty());
        assert_eq!(container.len(), 0);
    }

    #[test]
    fn test_container_register_and_resolve() {
        let mut container = Container::new();
        container.register(service("hello"));

        let resolved: Option<Arc<TestService>> = container.resolve();
        assert_eq!(resolved.unwrap().value, "hello");
    }

    #[test]
    fn test_resolve_returns_shared_instance() {
        let mut container = Container::new();
        let original = service("shared");
        container.register(Arc::clone(&original));

        let first = container.resolve::<TestService>().unwrap();
        let second = container.resolve::<TestService>().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert!(Arc::ptr_eq(&first, &original));
    }

    #[test]
    fn test_trait_object_registration() {
        let mut container = Container::new();
        container.register::<dyn Repository>(service("brands"));

        let repo = container.resolve::<dyn Repository>().unwrap();
        assert_eq!(repo.name(), "brands");
        assert!(!container.contains::<TestService>());
    }

    #[test]
    fn test_container_resolve_required_missing() {
        let container = Container::new();
        let Err(err) = container.resolve_required::<dyn Repository>() else {
            panic!("resolved an unregistered trait object");
        };
        assert!(err.to_string().contains("Repository"));
        assert!(err.to_string().contains("not registered"));
    }

    #[test]
    fn test_register_replaces() {
        let mut container = Container::new();
        container.register(service("first"));
        container.register(service("second"));

        assert_eq!(container.len(), 1);
        assert_eq!(container.resolve::<TestService>().unwrap().value, "second");
    }

    #[test]
    fn test_container_debug() {
        let mut container = Container::new();
        container.register(service("debug"));

        let debug = format!("{:?}", container);
        assert!(debug.contains("service_count"));
    }
}
