use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;

/// Identity of a chat client: the model name plus its sampling temperature.
///
/// The temperature is kept as its bit pattern so the key can be hashed;
/// `0.0` and `-0.0` are therefore distinct keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientKey {
    model: String,
    temperature_bits: u32,
}

impl ClientKey {
    pub fn new(model: impl Into<String>, temperature: f32) -> Self {
        ClientKey {
            model: model.into(),
            temperature_bits: temperature.to_bits(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn temperature(&self) -> f32 {
        f32::from_bits(self.temperature_bits)
    }
}

/// Bounded cache of chat clients, evicting the least recently used.
pub struct ClientCache<M> {
    entries: LruCache<ClientKey, Arc<M>>,
}

impl<M> ClientCache<M> {
    /// Room for a handful of model/temperature pairs; call sites pick these
    /// from configuration, not from user input.
    pub const DEFAULT_CAPACITY: NonZeroUsize = match NonZeroUsize::new(8) {
        Some(n) => n,
        None => panic!("capacity must be non-zero"),
    };

    pub fn new(capacity: NonZeroUsize) -> Self {
        ClientCache {
            entries: LruCache::new(capacity),
        }
    }

    /// The cached client for `key`, building and inserting one on a miss.
    pub fn get_or_insert_with(
        &mut self,
        key: &ClientKey,
        build: impl FnOnce(&ClientKey) -> M,
    ) -> Arc<M> {
        if let Some(client) = self.entries.get(key) {
            return Arc::clone(client);
        }
        tracing::debug!(
            model = key.model(),
            temperature = key.temperature(),
            "building chat client"
        );
        let client = Arc::new(build(key));
        if let Some((evicted, _)) = self.entries.push(key.clone(), Arc::clone(&client)) {
            if &evicted != key {
                tracing::debug!(model = evicted.model(), "evicted chat client");
            }
        }
        client
    }

    pub fn contains(&self, key: &ClientKey) -> bool {
        self.entries.contains(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<M> Default for ClientCache<M> {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}
