//! Core business logic for the account system.
//!
//! `AccountService` validates requests, hashes and verifies passwords, and
//! translates store outcomes into [`AccountError`]s. It keeps no account data
//! between calls and takes no locks: concurrent writers racing on the same
//! email are settled by the store's uniqueness constraint.

use std::sync::Arc;

use adapters::{Account, AccountStore, SchemaStatus};
use tracing::{debug, info};

use super::errors::{AccountError, AccountResult};
use super::models::{AccountChanges, AuthenticatedAccount, SeedAccount, SeedOutcome};
use super::password::PasswordHasher;

const CREATE_FIELDS_REQUIRED: &str = "Nombre, email y password son requeridos";
const LOGIN_FIELDS_REQUIRED: &str = "Email y password son requeridos";

pub struct AccountService {
    store: Arc<dyn AccountStore>,
    hasher: PasswordHasher,
}

/// Treats an empty string the same as an absent field.
fn supplied(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl AccountService {
    pub fn new(store: Arc<dyn AccountStore>) -> Self {
        Self::with_hasher(store, PasswordHasher::new())
    }

    pub fn with_hasher(store: Arc<dyn AccountStore>, hasher: PasswordHasher) -> Self {
        Self { store, hasher }
    }

    /// Create the accounts table unless it already exists.
    pub async fn install(&self) -> AccountResult<SchemaStatus> {
        let status = self.store.ensure_schema().await?;
        info!(?status, "schema check finished");
        Ok(status)
    }

    /// Register a new account and return its id.
    pub async fn create_account(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> AccountResult<i64> {
        if name.is_empty() || email.is_empty() || password.is_empty() {
            return Err(AccountError::InvalidInput(CREATE_FIELDS_REQUIRED));
        }

        let password_hash = self.hasher.hash(password).await?;
        let id = self.store.insert(name, email, &password_hash).await?;

        info!(account_id = id, "account created");
        Ok(id)
    }

    pub async fn get_account(&self, id: i64) -> AccountResult<Account> {
        Ok(self.store.get_by_id(id).await?)
    }

    pub async fn list_accounts(&self) -> AccountResult<Vec<Account>> {
        Ok(self.store.list_all().await?)
    }

    /// Apply a partial update. Fields left out (or empty) keep their stored
    /// value; a new password is hashed before it reaches the store.
    pub async fn update_account(&self, id: i64, changes: AccountChanges) -> AccountResult<i64> {
        let current = self.store.get_record_by_id(id).await?;

        let name = supplied(changes.name).unwrap_or(current.name);
        let email = supplied(changes.email).unwrap_or(current.email);
        let password_hash = match supplied(changes.password) {
            Some(password) => self.hasher.hash(&password).await?,
            None => current.password_hash,
        };

        self.store.update(id, &name, &email, &password_hash).await?;

        info!(account_id = id, "account updated");
        Ok(id)
    }

    /// Check an email/password pair.
    ///
    /// An unknown email and a wrong password both fail with
    /// [`AccountError::InvalidCredentials`].
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> AccountResult<AuthenticatedAccount> {
        if email.is_empty() || password.is_empty() {
            return Err(AccountError::InvalidInput(LOGIN_FIELDS_REQUIRED));
        }

        let record = match self.store.get_by_email(email).await {
            Ok(record) => record,
            Err(adapters::StoreError::NotFound) => return Err(AccountError::InvalidCredentials),
            Err(err) => return Err(err.into()),
        };

        if !self.hasher.verify(password, &record.password_hash).await? {
            debug!(account_id = record.id, "password mismatch");
            return Err(AccountError::InvalidCredentials);
        }

        Ok(AuthenticatedAccount {
            id: record.id,
            name: record.name,
            email: record.email,
        })
    }

    /// Create each seed account in order, one at a time.
    ///
    /// Entries whose email is already registered are reported as skipped.
    /// Any other failure stops the run and is returned.
    pub async fn seed_accounts(&self, entries: &[SeedAccount]) -> AccountResult<Vec<SeedOutcome>> {
        let mut outcomes = Vec::with_capacity(entries.len());

        for entry in entries {
            match self
                .create_account(&entry.name, &entry.email, &entry.password)
                .await
            {
                Ok(id) => outcomes.push(SeedOutcome::created(id, &entry.email)),
                Err(AccountError::DuplicateEmail) => {
                    debug!(email = %entry.email, "seed account already present");
                    outcomes.push(SeedOutcome::skipped(&entry.email));
                }
                Err(err) => return Err(err),
            }
        }

        Ok(outcomes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::models::SeedStatus;
    use adapters::{MemoryAccountStore, StoreError};

    async fn create_test_service() -> (AccountService, Arc<MemoryAccountStore>) {
        let store = Arc::new(MemoryAccountStore::new());
        let service = AccountService::with_hasher(store.clone(), PasswordHasher::fast());
        service.install().await.unwrap();
        (service, store)
    }

    fn seed(name: &str, email: &str, password: &str) -> SeedAccount {
        SeedAccount {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_install_twice_reports_existing_table() {
        let (service, _) = create_test_service().await;
        assert_eq!(
            service.install().await.unwrap(),
            SchemaStatus::AlreadyExists
        );
    }

    #[tokio::test]
    async fn test_create_requires_every_field() {
        let (service, store) = create_test_service().await;

        for (name, email, password) in [
            ("", "a@x.com", "p1"),
            ("A", "", "p1"),
            ("A", "a@x.com", ""),
        ] {
            let err = service
                .create_account(name, email, password)
                .await
                .unwrap_err();
            assert!(matches!(err, AccountError::InvalidInput(_)));
        }
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_stores_hash_not_plaintext() {
        let (service, store) = create_test_service().await;
        let id = service.create_account("A", "a@x.com", "p1").await.unwrap();

        let record = store.get_record_by_id(id).await.unwrap();
        assert_ne!(record.password_hash, "p1");
        assert!(record.password_hash.starts_with("$argon2id$"));
    }

    #[tokio::test]
    async fn test_duplicate_email_leaves_first_account_intact() {
        let (service, _) = create_test_service().await;
        let id = service.create_account("A", "a@x.com", "p1").await.unwrap();

        let err = service
            .create_account("B", "a@x.com", "p2")
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::DuplicateEmail));

        let account = service.get_account(id).await.unwrap();
        assert_eq!(account.name, "A");
        assert!(service.authenticate("a@x.com", "p1").await.is_ok());
    }

    #[tokio::test]
    async fn test_get_unknown_account() {
        let (service, _) = create_test_service().await;
        assert!(matches!(
            service.get_account(404).await,
            Err(AccountError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_authenticate_success_and_failures_are_indistinguishable() {
        let (service, _) = create_test_service().await;
        let id = service.create_account("A", "a@x.com", "p1").await.unwrap();

        let account = service.authenticate("a@x.com", "p1").await.unwrap();
        assert_eq!(
            account,
            AuthenticatedAccount {
                id,
                name: "A".to_string(),
                email: "a@x.com".to_string(),
            }
        );

        let wrong_password = service.authenticate("a@x.com", "wrong").await.unwrap_err();
        let unknown_email = service.authenticate("b@x.com", "p1").await.unwrap_err();
        assert!(matches!(wrong_password, AccountError::InvalidCredentials));
        assert!(matches!(unknown_email, AccountError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    }

    #[tokio::test]
    async fn test_authenticate_accounts_with_bcrypt_hashes() {
        let (service, store) = create_test_service().await;
        // Row as written by the earlier bcryptjs-based deployment (cost 10).
        let id = store
            .insert(
                "Juan Pérez",
                "juan@test.com",
                "$2a$10$lZ2TpRAfDtUW5Ix3uAPmpuNsEigZnHSxCyZ955en7iVNsMByDJeq2",
            )
            .await
            .unwrap();

        let account = service
            .authenticate("juan@test.com", "password123")
            .await
            .unwrap();
        assert_eq!(account.id, id);
        assert!(matches!(
            service.authenticate("juan@test.com", "wrong").await,
            Err(AccountError::InvalidCredentials)
        ));

        // A name-only update keeps the bcrypt hash usable.
        let changes = AccountChanges {
            name: Some("Juan".to_string()),
            ..Default::default()
        };
        service.update_account(id, changes).await.unwrap();
        assert!(service
            .authenticate("juan@test.com", "password123")
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_authenticate_requires_both_fields() {
        let (service, _) = create_test_service().await;
        assert!(matches!(
            service.authenticate("", "p1").await,
            Err(AccountError::InvalidInput(_))
        ));
        assert!(matches!(
            service.authenticate("a@x.com", "").await,
            Err(AccountError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_partial_update_keeps_email_and_password() {
        let (service, _) = create_test_service().await;
        let id = service.create_account("A", "a@x.com", "p1").await.unwrap();

        let changes = AccountChanges {
            name: Some("B".to_string()),
            ..Default::default()
        };
        assert_eq!(service.update_account(id, changes).await.unwrap(), id);

        let account = service.get_account(id).await.unwrap();
        assert_eq!(account.name, "B");
        assert_eq!(account.email, "a@x.com");
        assert!(service.authenticate("a@x.com", "p1").await.is_ok());
    }

    #[tokio::test]
    async fn test_empty_update_fields_count_as_absent() {
        let (service, _) = create_test_service().await;
        let id = service.create_account("A", "a@x.com", "p1").await.unwrap();

        let changes = AccountChanges {
            name: Some(String::new()),
            email: Some(String::new()),
            password: Some(String::new()),
        };
        service.update_account(id, changes).await.unwrap();

        let account = service.get_account(id).await.unwrap();
        assert_eq!(account.name, "A");
        assert_eq!(account.email, "a@x.com");
        assert!(service.authenticate("a@x.com", "p1").await.is_ok());
    }

    #[tokio::test]
    async fn test_password_update_rehashes() {
        let (service, store) = create_test_service().await;
        let id = service.create_account("A", "a@x.com", "p1").await.unwrap();

        let changes = AccountChanges {
            password: Some("p2".to_string()),
            ..Default::default()
        };
        service.update_account(id, changes).await.unwrap();

        let record = store.get_record_by_id(id).await.unwrap();
        assert_ne!(record.password_hash, "p2");
        assert!(matches!(
            service.authenticate("a@x.com", "p1").await,
            Err(AccountError::InvalidCredentials)
        ));
        assert!(service.authenticate("a@x.com", "p2").await.is_ok());
    }

    #[tokio::test]
    async fn test_update_errors() {
        let (service, _) = create_test_service().await;
        let a = service.create_account("A", "a@x.com", "p1").await.unwrap();
        service.create_account("B", "b@x.com", "p1").await.unwrap();

        assert!(matches!(
            service.update_account(999, AccountChanges::default()).await,
            Err(AccountError::NotFound)
        ));

        let changes = AccountChanges {
            email: Some("b@x.com".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            service.update_account(a, changes).await,
            Err(AccountError::DuplicateEmail)
        ));
    }

    #[tokio::test]
    async fn test_seed_is_ordered_and_rerunnable() {
        let (service, _) = create_test_service().await;
        let entries = vec![
            seed("Juan", "juan@test.com", "password123"),
            seed("María", "maria@test.com", "password123"),
            seed("Carlos", "carlos@test.com", "password123"),
        ];

        let first = service.seed_accounts(&entries).await.unwrap();
        let emails: Vec<&str> = first.iter().map(|o| o.email.as_str()).collect();
        assert_eq!(emails, ["juan@test.com", "maria@test.com", "carlos@test.com"]);
        assert!(first
            .iter()
            .all(|o| o.status == SeedStatus::Created && o.id.is_some()));

        let second = service.seed_accounts(&entries).await.unwrap();
        assert_eq!(second.len(), 3);
        assert!(second
            .iter()
            .all(|o| o.status == SeedStatus::Skipped && o.id.is_none()));
        assert_eq!(service.list_accounts().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_seed_aborts_on_non_duplicate_failure() {
        let store = Arc::new(MemoryAccountStore::new());
        let service = AccountService::with_hasher(store, PasswordHasher::fast());

        // No schema yet, so the first insert fails with a store error.
        let err = service
            .seed_accounts(&[seed("A", "a@x.com", "p1")])
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::Store(StoreError::SchemaMissing)));
    }
}
