//! Store Service
//!
//! Validates input, resolves default TTLs, checks entry kinds, and implements
//! list push/pop as read-modify-write sequences against the repository.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::{Operation, ServiceError, ServiceResult, StoreError};
use crate::store::{Entry, EntryRepository, EntryValue};

// == Store API ==
/// Typed operations exposed to transports.
#[async_trait]
pub trait StoreApi: Send + Sync {
    /// Store `value` at `key`, replacing whatever was there. A zero `ttl`
    /// selects the default TTL.
    async fn set_string(&self, key: &str, value: &str, ttl: Duration) -> ServiceResult<()>;

    async fn get_string(&self, key: &str) -> ServiceResult<String>;

    /// Remove `key`. Absent keys are not an error.
    async fn delete_string(&self, key: &str) -> ServiceResult<()>;

    /// Prepend `items` to the list at `key`, keeping their order.
    async fn lpush(&self, key: &str, items: Vec<String>) -> ServiceResult<()>;

    /// Remove and return the last element of the list at `key`.
    async fn rpop(&self, key: &str) -> ServiceResult<String>;
}

// == Store Service ==
/// Default implementation of [`StoreApi`] backed by any [`EntryRepository`].
///
/// Mutating operations are serialized through a write gate, so the read and
/// write halves of `lpush` and `rpop` never interleave with another write made
/// through the same service. Reads skip the gate.
pub struct StoreService {
    repo: Arc<dyn EntryRepository>,
    default_ttl: Duration,
    write_gate: Mutex<()>,
}

impl StoreService {
    // == Constructor ==
    /// Creates a service over `repo` using `default_ttl` for writes without
    /// an explicit TTL.
    pub fn new(repo: Arc<dyn EntryRepository>, default_ttl: Duration) -> Self {
        Self {
            repo,
            default_ttl,
            write_gate: Mutex::new(()),
        }
    }

    fn resolve_ttl(&self, ttl: Duration) -> Duration {
        if ttl.is_zero() {
            self.default_ttl
        } else {
            ttl
        }
    }
}

/// Rejects empty keys before touching the repository.
fn require_key(op: Operation, key: &str) -> ServiceResult<()> {
    if key.is_empty() {
        return Err(ServiceError::new(op, key, StoreError::EmptyKey));
    }
    Ok(())
}

#[async_trait]
impl StoreApi for StoreService {
    async fn set_string(&self, key: &str, value: &str, ttl: Duration) -> ServiceResult<()> {
        let op = Operation::SetString;
        require_key(op, key)?;
        if value.is_empty() {
            return Err(ServiceError::new(op, key, StoreError::EmptyValue));
        }

        let entry = Entry::string(value, self.resolve_ttl(ttl));

        let _gate = self.write_gate.lock().await;
        self.repo
            .set(key, entry)
            .await
            .map_err(|err| ServiceError::new(op, key, err))?;

        debug!(key, "string set");
        Ok(())
    }

    async fn get_string(&self, key: &str) -> ServiceResult<String> {
        let op = Operation::GetString;
        require_key(op, key)?;

        let entry = self
            .repo
            .get(key)
            .await
            .map_err(|err| ServiceError::new(op, key, err))?;

        match entry.value {
            EntryValue::String(value) => Ok(value),
            EntryValue::List(_) => Err(ServiceError::new(op, key, StoreError::WrongType)),
        }
    }

    async fn delete_string(&self, key: &str) -> ServiceResult<()> {
        let op = Operation::DeleteString;
        require_key(op, key)?;

        let _gate = self.write_gate.lock().await;
        self.repo
            .remove(key)
            .await
            .map_err(|err| ServiceError::new(op, key, err))?;

        debug!(key, "key deleted");
        Ok(())
    }

    async fn lpush(&self, key: &str, items: Vec<String>) -> ServiceResult<()> {
        let op = Operation::LPush;
        require_key(op, key)?;

        let _gate = self.write_gate.lock().await;

        let entry = match self.repo.get(key).await {
            Err(StoreError::NotFound) => Entry::list(items, self.default_ttl),
            Err(err) => return Err(ServiceError::new(op, key, err)),
            Ok(mut existing) => {
                let EntryValue::List(current) = &mut existing.value else {
                    return Err(ServiceError::new(op, key, StoreError::WrongType));
                };
                // New items go in front, in argument order; expiry is kept
                let mut merged = items;
                merged.append(current);
                *current = merged;
                existing
            }
        };

        self.repo
            .set(key, entry)
            .await
            .map_err(|err| ServiceError::new(op, key, err))?;

        debug!(key, "list pushed");
        Ok(())
    }

    async fn rpop(&self, key: &str) -> ServiceResult<String> {
        let op = Operation::RPop;
        require_key(op, key)?;

        let _gate = self.write_gate.lock().await;

        let mut entry = self
            .repo
            .get(key)
            .await
            .map_err(|err| ServiceError::new(op, key, err))?;

        let EntryValue::List(items) = &mut entry.value else {
            return Err(ServiceError::new(op, key, StoreError::WrongType));
        };
        let value = items
            .pop()
            .ok_or_else(|| ServiceError::new(op, key, StoreError::EmptyEntry))?;

        self.repo
            .set(key, entry)
            .await
            .map_err(|err| ServiceError::new(op, key, err))?;

        debug!(key, "list popped");
        Ok(value)
    }
}
