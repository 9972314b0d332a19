use crate::models::User;
use crate::services::StoreError;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-process user store for development and tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<String, User>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_user(&self, user: &User) -> Result<(), StoreError> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.mobile_number) {
            return Err(StoreError::Conflict(user.mobile_number.clone()));
        }

        users.insert(user.mobile_number.clone(), user.clone());
        Ok(())
    }

    pub async fn find_by_mobile(&self, mobile_number: &str) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().await.get(mobile_number).cloned())
    }

    pub async fn save_eligibility(&self, user: &User) -> Result<(), StoreError> {
        let mut users = self.users.write().await;
        let stored = users
            .get_mut(&user.mobile_number)
            .ok_or_else(|| StoreError::NotFound(user.mobile_number.clone()))?;

        stored.scheme_eligibility = user.scheme_eligibility.clone();
        stored.updated_at = user.updated_at;
        Ok(())
    }

    #[cfg(test)]
    async fn len(&self) -> usize {
        self.users.read().await.len()
    }
}
