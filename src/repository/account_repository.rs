use crate::error::{Error, Result};
use crate::models::account::Account;
use crate::models::role::Role;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

/// Accounts are namespaced per role: the same email may register once as an
/// applicant and once as a recruiter without conflict.
#[derive(Default)]
pub struct InMemoryAccountRepository {
    store: RwLock<HashMap<(Role, String), Account>>,
}

impl InMemoryAccountRepository {
    pub fn insert(
        &self,
        role: Role,
        name: String,
        email: String,
        password_hash: String,
    ) -> Result<Account> {
        let mut store = self.store.write().expect("account store poisoned");
        let key = (role, email.clone());
        if store.contains_key(&key) {
            return Err(Error::Validation(
                "An account with this email already exists".to_string(),
            ));
        }
        let account = Account {
            id: Uuid::new_v4(),
            role,
            name,
            email,
            password_hash,
            created_at: Utc::now(),
        };
        store.insert(key, account.clone());
        Ok(account)
    }

    pub fn find(&self, role: Role, email: &str) -> Option<Account> {
        let store = self.store.read().expect("account store poisoned");
        store.get(&(role, email.to_string())).cloned()
    }
}
