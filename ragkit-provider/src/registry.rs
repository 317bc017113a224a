use ragkit_core::{ProviderConfig, RagKitError};
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

/// A provider factory: builds an implementation from a [`ProviderConfig`].
pub type Factory<T> =
    dyn Fn(&ProviderConfig) -> Result<Arc<T>, RagKitError> + Send + Sync;

/// What happens when a name is registered twice.
///
/// Loader and splitter registries use [`RegistrationPolicy::Overwrite`]:
/// later registration silently wins. The STT registry uses
/// [`RegistrationPolicy::Fail`]: duplicate registration is a programming
/// error that panics at registration time rather than being returned as a
/// recoverable `Result`, per spec.md §4.1/§7.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationPolicy {
    Overwrite,
    Fail,
}

/// A process-wide named map from provider name to factory.
///
/// Loaders, splitters, and STT engines each own an independent `Registry`
/// instance with identical lookup/list semantics but a policy-specific
/// registration behavior (see [`RegistrationPolicy`]). Reads use a shared
/// lock; writes (registration) use an exclusive one — registration is rare
/// and lookups are cheap, so a `std::sync::RwLock` is sufficient without
/// reaching for an async-aware lock.
pub struct Registry<T: ?Sized> {
    kind: &'static str,
    policy: RegistrationPolicy,
    entries: RwLock<BTreeMap<String, Arc<Factory<T>>>>,
}

impl<T: ?Sized> Registry<T> {
    /// Creates an empty registry. `kind` names the registry for diagnostics
    /// (e.g. `"loader"`, `"splitter"`, `"stt"`).
    pub fn new(kind: &'static str, policy: RegistrationPolicy) -> Self {
        Self {
            kind,
            policy,
            entries: RwLock::new(BTreeMap::new()),
        }
    }

    /// Binds `name` to `factory`.
    ///
    /// # Panics
    ///
    /// Panics if `name` is empty, or if the policy is
    /// [`RegistrationPolicy::Fail`] and `name` is already registered — both
    /// are programming errors, not recoverable conditions, per spec.md
    /// §4.1.
    pub fn register<F>(&self, name: impl Into<String>, factory: F)
    where
        F: Fn(&ProviderConfig) -> Result<Arc<T>, RagKitError> + Send + Sync + 'static,
    {
        let name = name.into();
        assert!(!name.is_empty(), "{} registration: name must not be empty", self.kind);

        let mut entries = self.entries.write().expect("registry lock poisoned");
        if self.policy == RegistrationPolicy::Fail && entries.contains_key(&name) {
            panic!(
                "{} registry: duplicate registration for '{}'",
                self.kind, name
            );
        }
        entries.insert(name, Arc::new(factory));
    }

    /// Looks up `name` and invokes its factory with `config`.
    ///
    /// Fails with [`RagKitError::UnknownProvider`] listing every currently
    /// registered name when `name` was never registered.
    pub fn new_instance(&self, name: &str, config: &ProviderConfig) -> Result<Arc<T>, RagKitError> {
        let factory = {
            let entries = self.entries.read().expect("registry lock poisoned");
            entries.get(name).cloned()
        };
        match factory {
            Some(factory) => factory(config),
            None => Err(RagKitError::unknown_provider_builder(self.kind, name)
                .known(self.list())
                .build()),
        }
    }

    /// Returns a sorted snapshot of every registered name.
    pub fn list(&self) -> Vec<String> {
        self.entries
            .read()
            .expect("registry lock poisoned")
            .keys()
            .cloned()
            .collect()
    }
}
