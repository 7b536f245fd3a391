//! Identity registry service: registration and authentication.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::info;

use crate::domain::auth::LoginCredentials;
use crate::domain::error::Error;
use crate::domain::password::CredentialHasher;
use crate::domain::policy::AccessPolicy;
use crate::domain::ports::{
    IdentityService, LoginOutcome, RegistrationRequest, UserRepository, UserRepositoryError,
};
use crate::domain::token::{Claims, TokenService};
use crate::domain::user::{Role, StoredUser, User, UserId};

fn map_repository_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("user store unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => {
            Error::internal(format!("user store error: {message}"))
        }
        UserRepositoryError::DuplicateEmail { .. } => Error::conflict("email already registered"),
    }
}

/// Registry-backed implementation of [`IdentityService`].
#[derive(Clone)]
pub struct IdentityRegistryService<R> {
    users: Arc<R>,
    hasher: CredentialHasher,
    tokens: Arc<TokenService>,
    policy: AccessPolicy,
}

impl<R> IdentityRegistryService<R> {
    /// Assemble the service from its collaborators.
    pub fn new(
        users: Arc<R>,
        hasher: CredentialHasher,
        tokens: Arc<TokenService>,
        policy: AccessPolicy,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
            policy,
        }
    }
}

impl<R> IdentityRegistryService<R>
where
    R: UserRepository,
{
    /// Resolve a requester's stored record; absent users collapse to `None`
    /// so a stale token cannot provision anything.
    async fn resolve_requester(&self, subject: &UserId) -> Result<Option<User>, Error> {
        let record = self
            .users
            .find_by_id(subject)
            .await
            .map_err(map_repository_error)?;
        Ok(record.map(|stored| stored.user))
    }
}

#[async_trait]
impl<R> IdentityService for IdentityRegistryService<R>
where
    R: UserRepository,
{
    async fn register(
        &self,
        request: RegistrationRequest,
        requester: Option<Claims>,
    ) -> Result<User, Error> {
        // Only admin provisioning needs the requester resolved; anonymous
        // personnel registration stays lookup-free.
        let resolved = match (&request.role, requester) {
            (Role::Admin, Some(claims)) => self.resolve_requester(&claims.subject).await?,
            _ => None,
        };
        self.policy
            .authorize_registration(request.role, resolved.as_ref())?;

        let digest = self
            .hasher
            .hash(&request.password)
            .map_err(|error| Error::internal(error.to_string()))?;

        let user = User {
            id: UserId::random(),
            email: request.email,
            full_name: request.full_name,
            role: request.role,
            created_at: Utc::now(),
        };
        let record = StoredUser {
            user: user.clone(),
            password_hash: digest,
        };
        self.users
            .insert(&record)
            .await
            .map_err(map_repository_error)?;

        info!(user_id = %user.id, role = %user.role, "new account registered");
        Ok(user)
    }

    async fn login(&self, credentials: LoginCredentials) -> Result<LoginOutcome, Error> {
        // An address that could never have registered cannot match a stored
        // record either way; report it exactly like a wrong password.
        let Ok(email) = credentials.email_address() else {
            return Err(Error::unauthorized("invalid credentials"));
        };
        let Some(record) = self
            .users
            .find_by_email(&email)
            .await
            .map_err(map_repository_error)?
        else {
            return Err(Error::unauthorized("invalid credentials"));
        };
        if !self
            .hasher
            .verify(credentials.password(), &record.password_hash)
        {
            return Err(Error::unauthorized("invalid credentials"));
        }

        let token = self
            .tokens
            .issue(&record.user)
            .map_err(|error| Error::internal(format!("token issuance failed: {error}")))?;
        Ok(LoginOutcome {
            token,
            user: record.user,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::error::ErrorCode;
    use crate::domain::password::Password;
    use crate::domain::ports::MockUserRepository;
    use crate::domain::token::TokenSecret;
    use crate::domain::user::{EmailAddress, FullName};

    fn tokens() -> Arc<TokenService> {
        Arc::new(TokenService::with_default_validity(&TokenSecret::new(
            *b"identity-test-secret",
        )))
    }

    fn service(users: MockUserRepository) -> IdentityRegistryService<MockUserRepository> {
        IdentityRegistryService::new(
            Arc::new(users),
            CredentialHasher,
            tokens(),
            AccessPolicy::default(),
        )
    }

    #[fixture]
    fn request() -> RegistrationRequest {
        RegistrationRequest {
            email: EmailAddress::new("medic@example.com").expect("valid email"),
            password: Password::new("Abcdefg1!").expect("strong password"),
            full_name: FullName::new("Field Medic").expect("valid name"),
            role: Role::Personnel,
        }
    }

    fn stored(role: Role, email: &str) -> StoredUser {
        let hasher = CredentialHasher;
        let password = Password::new("Abcdefg1!").expect("strong password");
        StoredUser {
            user: User {
                id: UserId::random(),
                email: EmailAddress::new(email).expect("valid email"),
                full_name: FullName::new("Some One").expect("valid name"),
                role,
                created_at: Utc::now(),
            },
            password_hash: hasher.hash(&password).expect("hashing succeeds"),
        }
    }

    fn claims_for(user: &User) -> Claims {
        Claims {
            subject: user.id.clone(),
            email: user.email.clone(),
            role: user.role,
            expires_at: Utc::now() + Duration::days(7),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn anonymous_personnel_registration_succeeds(request: RegistrationRequest) {
        let mut users = MockUserRepository::new();
        users.expect_insert().times(1).return_once(|_| Ok(()));

        let user = service(users)
            .register(request.clone(), None)
            .await
            .expect("registration succeeds");

        assert_eq!(user.email, request.email);
        assert_eq!(user.role, Role::Personnel);
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_emails_conflict(request: RegistrationRequest) {
        let mut users = MockUserRepository::new();
        users.expect_insert().times(1).return_once(|record| {
            Err(UserRepositoryError::duplicate_email(
                record.user.email.as_str(),
            ))
        });

        let error = service(users)
            .register(request, None)
            .await
            .expect_err("duplicate must conflict");
        assert_eq!(error.code, ErrorCode::Conflict);
    }

    #[rstest]
    #[tokio::test]
    async fn anonymous_admin_registration_is_forbidden(mut request: RegistrationRequest) {
        request.role = Role::Admin;
        let mut users = MockUserRepository::new();
        users.expect_insert().times(0);

        let error = service(users)
            .register(request, None)
            .await
            .expect_err("must be forbidden");
        assert_eq!(error.code, ErrorCode::Forbidden);
    }

    #[rstest]
    #[tokio::test]
    async fn personnel_requesters_cannot_provision_admins(mut request: RegistrationRequest) {
        request.role = Role::Admin;
        let requester = stored(Role::Personnel, "requester@example.com");
        let claims = claims_for(&requester.user);

        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .times(1)
            .return_once(move |_| Ok(Some(requester)));
        users.expect_insert().times(0);

        let error = service(users)
            .register(request, Some(claims))
            .await
            .expect_err("must be forbidden");
        assert_eq!(error.code, ErrorCode::Forbidden);
    }

    #[rstest]
    #[tokio::test]
    async fn vanished_requesters_cannot_provision_admins(mut request: RegistrationRequest) {
        request.role = Role::Admin;
        let ghost = stored(Role::Admin, "ghost@example.com");
        let claims = claims_for(&ghost.user);

        let mut users = MockUserRepository::new();
        users.expect_find_by_id().times(1).return_once(|_| Ok(None));
        users.expect_insert().times(0);

        let error = service(users)
            .register(request, Some(claims))
            .await
            .expect_err("must be forbidden");
        assert_eq!(error.code, ErrorCode::Forbidden);
    }

    #[rstest]
    #[tokio::test]
    async fn admin_requesters_provision_admins(mut request: RegistrationRequest) {
        request.role = Role::Admin;
        let requester = stored(Role::Admin, "chief@example.com");
        let claims = claims_for(&requester.user);

        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .times(1)
            .return_once(move |_| Ok(Some(requester)));
        users.expect_insert().times(1).return_once(|_| Ok(()));

        let user = service(users)
            .register(request, Some(claims))
            .await
            .expect("registration succeeds");
        assert_eq!(user.role, Role::Admin);
    }

    #[tokio::test]
    async fn login_round_trips_a_verifiable_token() {
        let record = stored(Role::Personnel, "medic@example.com");
        let expected = record.user.clone();

        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .times(1)
            .return_once(move |_| Ok(Some(record)));

        let tokens = tokens();
        let service = IdentityRegistryService::new(
            Arc::new(users),
            CredentialHasher,
            tokens.clone(),
            AccessPolicy::default(),
        );
        let credentials =
            LoginCredentials::try_from_parts("medic@example.com", "Abcdefg1!").expect("valid");
        let outcome = service.login(credentials).await.expect("login succeeds");

        assert_eq!(outcome.user, expected);
        let claims = tokens.verify(&outcome.token).expect("token verifies");
        assert_eq!(claims.subject, expected.id);
        assert_eq!(claims.role, expected.role);
    }

    #[tokio::test]
    async fn wrong_passwords_are_unauthorized() {
        let record = stored(Role::Personnel, "medic@example.com");
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .times(1)
            .return_once(move |_| Ok(Some(record)));

        let credentials =
            LoginCredentials::try_from_parts("medic@example.com", "WrongPw1!").expect("valid");
        let error = service(users)
            .login(credentials)
            .await
            .expect_err("must fail");
        assert_eq!(error.code, ErrorCode::Unauthorized);
        assert_eq!(error.message, "invalid credentials");
    }

    #[tokio::test]
    async fn unknown_emails_are_indistinguishable_from_wrong_passwords() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .times(1)
            .return_once(|_| Ok(None));

        let credentials =
            LoginCredentials::try_from_parts("nobody@example.com", "Abcdefg1!").expect("valid");
        let error = service(users)
            .login(credentials)
            .await
            .expect_err("must fail");
        assert_eq!(error.code, ErrorCode::Unauthorized);
        assert_eq!(error.message, "invalid credentials");
    }

    #[tokio::test]
    async fn connection_failures_surface_as_service_unavailable() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .times(1)
            .return_once(|_| Err(UserRepositoryError::connection("pool exhausted")));

        let credentials =
            LoginCredentials::try_from_parts("medic@example.com", "Abcdefg1!").expect("valid");
        let error = service(users)
            .login(credentials)
            .await
            .expect_err("must fail");
        assert_eq!(error.code, ErrorCode::ServiceUnavailable);
    }
}
