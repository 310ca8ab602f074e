use crate::dto::auth_dto::{LoginPayload, RegisterPayload};
use crate::error::{Error, Result};
use crate::models::account::Account;
use crate::models::role::Role;
use crate::repository::InMemoryAccountRepository;
use crate::utils::crypto::{hash_password, verify_password};
use crate::utils::token::issue_token;
use std::sync::Arc;
use validator::Validate;

#[derive(Clone)]
pub struct AuthService {
    accounts: Arc<InMemoryAccountRepository>,
    jwt_secret: String,
    token_ttl_hours: i64,
}

impl AuthService {
    pub fn new(
        accounts: Arc<InMemoryAccountRepository>,
        jwt_secret: String,
        token_ttl_hours: i64,
    ) -> Self {
        Self {
            accounts,
            jwt_secret,
            token_ttl_hours,
        }
    }

    pub fn register(&self, role: Role, payload: RegisterPayload) -> Result<Account> {
        payload.validate()?;
        let password_hash = hash_password(&payload.password)?;
        self.accounts
            .insert(role, payload.name, payload.email, password_hash)
    }

    /// Returns a signed session token for the role namespace. Unknown email
    /// and wrong password answer identically.
    pub fn login(&self, role: Role, payload: LoginPayload) -> Result<(Account, String)> {
        let account = self
            .accounts
            .find(role, &payload.email)
            .ok_or_else(invalid_credentials)?;
        if !verify_password(&payload.password, &account.password_hash)? {
            return Err(invalid_credentials());
        }
        let token = issue_token(account.id, role, &self.jwt_secret, self.token_ttl_hours)?;
        Ok((account, token))
    }
}

fn invalid_credentials() -> Error {
    Error::Unauthorized("invalid_credentials".to_string())
}
