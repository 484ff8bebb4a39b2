//! Use-case tests against in-memory repositories

use std::sync::{Arc, Mutex};

use platform::token::TokenIssuer;

use crate::application::{LoginInput, LoginUseCase, RegisterInput, RegisterUseCase};
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

/// In-memory user store. Mirrors the storage-layer contract: `create`
/// itself rejects duplicates, independent of any pre-check.
#[derive(Clone, Default)]
struct InMemoryUsers {
    users: Arc<Mutex<Vec<User>>>,
}

impl UserRepository for InMemoryUsers {
    async fn create(&self, user: &User) -> AuthResult<()> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(AuthError::EmailTaken);
        }
        users.push(user.clone());
        Ok(())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| &u.email == email).cloned())
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().any(|u| &u.email == email))
    }
}

/// Store whose pre-check always reports "absent" but whose insert rejects
/// duplicates, simulating two registrations racing past the check.
#[derive(Clone)]
struct RacyUsers(InMemoryUsers);

impl UserRepository for RacyUsers {
    async fn create(&self, user: &User) -> AuthResult<()> {
        self.0.create(user).await
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        self.0.find_by_email(email).await
    }

    async fn exists_by_email(&self, _email: &Email) -> AuthResult<bool> {
        Ok(false)
    }
}

fn register_input(email: &str) -> RegisterInput {
    RegisterInput {
        name: "A".to_string(),
        email: email.to_string(),
        password: "secret1".to_string(),
    }
}

mod register {
    use super::*;

    #[tokio::test]
    async fn first_registration_succeeds_second_conflicts() {
        let repo = Arc::new(InMemoryUsers::default());
        let use_case = RegisterUseCase::new(repo);

        let output = use_case.execute(register_input("a@x.com")).await.unwrap();
        assert_eq!(output.name, "A");
        assert_eq!(output.email, "a@x.com");

        let err = use_case
            .execute(register_input("a@x.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::EmailTaken));
    }

    #[tokio::test]
    async fn insert_conflict_is_email_taken_even_after_precheck_passes() {
        let inner = InMemoryUsers::default();
        RegisterUseCase::new(Arc::new(inner.clone()))
            .execute(register_input("a@x.com"))
            .await
            .unwrap();

        // The racy store claims the email is free; the insert still
        // rejects it and the service must classify that as a conflict,
        // not a generic storage failure.
        let use_case = RegisterUseCase::new(Arc::new(RacyUsers(inner)));
        let err = use_case
            .execute(register_input("a@x.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::EmailTaken));
    }

    #[tokio::test]
    async fn rejects_missing_name_bad_email_short_password() {
        let use_case = RegisterUseCase::new(Arc::new(InMemoryUsers::default()));

        let mut input = register_input("a@x.com");
        input.name = "  ".to_string();
        assert!(matches!(
            use_case.execute(input).await.unwrap_err(),
            AuthError::Validation(_)
        ));

        assert!(matches!(
            use_case
                .execute(register_input("not-an-email"))
                .await
                .unwrap_err(),
            AuthError::Validation(_)
        ));

        let mut input = register_input("a@x.com");
        input.password = "abc".to_string();
        assert!(matches!(
            use_case.execute(input).await.unwrap_err(),
            AuthError::Validation(_)
        ));
    }

    #[tokio::test]
    async fn stored_hash_differs_from_plaintext() {
        let repo = Arc::new(InMemoryUsers::default());
        RegisterUseCase::new(repo.clone())
            .execute(register_input("a@x.com"))
            .await
            .unwrap();

        let users = repo.users.lock().unwrap();
        assert_ne!(users[0].password_hash.as_str(), "secret1");
    }
}

mod login {
    use super::*;

    async fn registered_repo() -> Arc<InMemoryUsers> {
        let repo = Arc::new(InMemoryUsers::default());
        RegisterUseCase::new(repo.clone())
            .execute(register_input("a@x.com"))
            .await
            .unwrap();
        repo
    }

    #[tokio::test]
    async fn valid_credentials_issue_verifiable_token() {
        let repo = registered_repo().await;
        let issuer = Arc::new(TokenIssuer::new([1u8; 32]));
        let use_case = LoginUseCase::new(repo, issuer.clone());

        let output = use_case
            .execute(LoginInput {
                email: "a@x.com".to_string(),
                password: "secret1".to_string(),
            })
            .await
            .unwrap();

        assert!(!output.token.is_empty());
        assert_eq!(output.email, "a@x.com");
        assert_eq!(issuer.verify(&output.token).unwrap(), "a@x.com");
    }

    #[tokio::test]
    async fn unknown_email_and_wrong_password_are_indistinguishable() {
        let repo = registered_repo().await;
        let issuer = Arc::new(TokenIssuer::new([1u8; 32]));
        let use_case = LoginUseCase::new(repo, issuer);

        let unknown = use_case
            .execute(LoginInput {
                email: "b@x.com".to_string(),
                password: "secret1".to_string(),
            })
            .await
            .unwrap_err();

        let wrong = use_case
            .execute(LoginInput {
                email: "a@x.com".to_string(),
                password: "wrong-password".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(unknown, AuthError::InvalidCredentials));
        assert!(matches!(wrong, AuthError::InvalidCredentials));
        assert_eq!(unknown.to_string(), wrong.to_string());
        assert_eq!(unknown.to_string(), "invalid email or password");
    }
}
