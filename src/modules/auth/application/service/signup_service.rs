use async_trait::async_trait;
use email_address::EmailAddress;
use std::sync::Arc;

use crate::modules::auth::application::domain::entities::Role;
use crate::modules::auth::application::domain::password_rules::check_password;
use crate::modules::auth::application::ports::incoming::use_cases::{
    AuthSession, SignupCommand, SignupError, SignupUseCase,
};
use crate::modules::auth::application::ports::outgoing::{
    IdentityQuery, IdentityRepository, IdentityRepositoryError, NewIdentity, PasswordHasher,
    TokenProvider,
};
use crate::shared::validation::{is_blank, ValidationErrors};

pub struct SignupService<Q, R>
where
    Q: IdentityQuery,
    R: IdentityRepository,
{
    identities: Q,
    repository: R,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenProvider>,
}

impl<Q, R> SignupService<Q, R>
where
    Q: IdentityQuery,
    R: IdentityRepository,
{
    pub fn new(
        identities: Q,
        repository: R,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenProvider>,
    ) -> Self {
        Self {
            identities,
            repository,
            hasher,
            tokens,
        }
    }

    fn validate(command: &SignupCommand) -> Result<Role, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        errors.check(is_blank(&command.name), "Name can't be blank");

        let email = command.email.trim();
        if email.is_empty() {
            errors.push("Email can't be blank");
        } else if !EmailAddress::is_valid(email) {
            errors.push("Email is invalid");
        }

        check_password(&mut errors, &command.password);

        let role = match command.role.as_deref().map(str::trim) {
            None | Some("") => Role::User,
            Some(raw) => match raw.parse::<Role>() {
                Ok(role) if role.is_self_assignable() => role,
                Ok(_) => {
                    errors.push("User type cannot be admin");
                    Role::User
                }
                Err(_) => {
                    errors.push("User type is not included in the list");
                    Role::User
                }
            },
        };

        errors.into_result(role)
    }
}

#[async_trait]
impl<Q, R> SignupUseCase for SignupService<Q, R>
where
    Q: IdentityQuery + Send + Sync,
    R: IdentityRepository + Send + Sync,
{
    async fn execute(&self, command: SignupCommand) -> Result<AuthSession, SignupError> {
        let role = Self::validate(&command).map_err(SignupError::ValidationFailed)?;
        let email = command.email.trim().to_lowercase();

        if self
            .identities
            .email_taken(&email, None)
            .await
            .map_err(|e| SignupError::Internal(e.to_string()))?
        {
            return Err(SignupError::EmailTaken);
        }

        let password_hash = self
            .hasher
            .hash(&command.password)
            .await
            .map_err(|e| SignupError::Internal(e.to_string()))?;

        let identity = self
            .repository
            .create(NewIdentity {
                name: command.name.trim().to_string(),
                email,
                password_hash,
                role,
            })
            .await
            .map_err(|e| match e {
                IdentityRepositoryError::EmailAlreadyExists => SignupError::EmailTaken,
                other => SignupError::Internal(other.to_string()),
            })?;

        let token = self
            .tokens
            .issue_access_token(identity.id)
            .map_err(|e| SignupError::Internal(e.to_string()))?;

        tracing::info!("Registered identity {} as {}", identity.id, identity.role);

        Ok(AuthSession { token, identity })
    }
}
