//! Type-keyed registry of in-process clients.
//!
//! Providers register an implementation once under its interface type; consumers
//! fetch it back by the same type: `hub.get::<dyn blue_user::client::BlueUserApi>()`.
//! Re-registering overwrites the previous value; `Arc`s already handed out stay valid.

use parking_lot::RwLock;
use std::{any::Any, collections::HashMap, sync::Arc};

#[derive(Debug, thiserror::Error)]
pub enum ClientHubError {
    #[error("client not found: {type_name}")]
    NotFound { type_name: &'static str },

    #[error("type mismatch in hub for {type_name}")]
    TypeMismatch { type_name: &'static str },
}

type Boxed = Box<dyn Any + Send + Sync>;

#[derive(Default)]
pub struct ClientHub {
    // Key = `type_name::<T>()`, which also works for `T = dyn Trait`.
    map: RwLock<HashMap<&'static str, Boxed>>,
}

impl ClientHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a client under the interface type `T` (usually `dyn SomeApi`).
    pub fn register<T>(&self, client: Arc<T>)
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.map
            .write()
            .insert(std::any::type_name::<T>(), Box::new(client));
    }

    /// Fetch a client by interface type `T`.
    pub fn get<T>(&self) -> Result<Arc<T>, ClientHubError>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let type_name = std::any::type_name::<T>();
        let r = self.map.read();
        let boxed = r.get(type_name).ok_or(ClientHubError::NotFound { type_name })?;
        boxed
            .downcast_ref::<Arc<T>>()
            .cloned()
            .ok_or(ClientHubError::TypeMismatch { type_name })
    }

    /// Remove a client; returns it if it was present.
    pub fn remove<T>(&self) -> Option<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let boxed = self.map.write().remove(std::any::type_name::<T>())?;
        boxed.downcast::<Arc<T>>().ok().map(|b| *b)
    }

    pub fn len(&self) -> usize {
        self.map.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    trait Greeter: Send + Sync {
        fn greet(&self) -> String;
    }

    struct English;
    impl Greeter for English {
        fn greet(&self) -> String {
            "hello".into()
        }
    }

    struct French;
    impl Greeter for French {
        fn greet(&self) -> String {
            "bonjour".into()
        }
    }

    #[test]
    fn register_and_get_trait_object() {
        let hub = ClientHub::new();
        hub.register::<dyn Greeter>(Arc::new(English));
        assert_eq!(hub.get::<dyn Greeter>().unwrap().greet(), "hello");
        assert_eq!(hub.len(), 1);
    }

    #[test]
    fn missing_client_is_not_found() {
        let hub = ClientHub::new();
        assert!(matches!(
            hub.get::<dyn Greeter>(),
            Err(ClientHubError::NotFound { .. })
        ));
    }

    #[test]
    fn reregistration_overwrites_but_keeps_old_handles() {
        let hub = ClientHub::new();
        hub.register::<dyn Greeter>(Arc::new(English));
        let old = hub.get::<dyn Greeter>().unwrap();

        hub.register::<dyn Greeter>(Arc::new(French));
        assert_eq!(hub.get::<dyn Greeter>().unwrap().greet(), "bonjour");
        assert_eq!(old.greet(), "hello");
    }

    #[test]
    fn remove_returns_client() {
        let hub = ClientHub::new();
        hub.register::<dyn Greeter>(Arc::new(English));
        assert!(hub.remove::<dyn Greeter>().is_some());
        assert!(hub.is_empty());
    }
}
