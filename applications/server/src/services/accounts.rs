//! Account directory: registration, login and profile lookup

use super::auth::{AccessToken, AuthService};
use crate::error::{Result, ServerError};
use countdown_core::{types::NewAccount, AccountId, AccountRepository, CountdownError, Profile};

const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Result of a successful login
#[derive(Debug, Clone)]
pub struct Session {
    pub access: AccessToken,
    pub profile: Profile,
}

fn required(field: Option<String>) -> Option<String> {
    field.filter(|value| !value.is_empty())
}

/// Create an account. Does not log in.
pub async fn register<S>(
    store: &S,
    auth: &AuthService,
    username: Option<String>,
    email: Option<String>,
    password: Option<String>,
) -> Result<Profile>
where
    S: AccountRepository + ?Sized,
{
    let (Some(username), Some(email), Some(password)) =
        (required(username), required(email), required(password))
    else {
        return Err(CountdownError::validation("Missing username, email, or password").into());
    };

    if store.find_account_by_username(&username).await?.is_some() {
        return Err(CountdownError::conflict("Username already exists").into());
    }
    if store.find_account_by_email(&email).await?.is_some() {
        return Err(CountdownError::conflict("Email already exists").into());
    }

    let password_hash = auth.hash_password(password).await?;

    // Unique constraints still catch a registration that raced past the checks
    let account = store
        .create_account(NewAccount {
            username,
            email,
            password_hash,
        })
        .await?;

    tracing::info!(account_id = %account.id, username = %account.username, "Account registered");
    Ok(account.profile())
}

/// Check a username/password pair and issue an access token
pub async fn authenticate<S>(
    store: &S,
    auth: &AuthService,
    username: Option<String>,
    password: Option<String>,
) -> Result<Session>
where
    S: AccountRepository + ?Sized,
{
    let (Some(username), Some(password)) = (required(username), required(password)) else {
        return Err(CountdownError::validation("Missing username or password").into());
    };

    let Some(account) = store.find_account_by_username(&username).await? else {
        tracing::warn!(%username, "Login for unknown username");
        return Err(ServerError::Auth(INVALID_CREDENTIALS.to_string()));
    };

    // A hash that fails to parse is treated like a wrong password
    let matches = match auth
        .verify_password(password, account.password_hash.clone())
        .await
    {
        Ok(matches) => matches,
        Err(ServerError::Bcrypt(e)) => {
            tracing::error!(account_id = %account.id, "Stored password hash unreadable: {}", e);
            false
        }
        Err(other) => return Err(other),
    };
    if !matches {
        tracing::warn!(account_id = %account.id, "Login with wrong password");
        return Err(ServerError::Auth(INVALID_CREDENTIALS.to_string()));
    }

    let access = auth.create_access_token(account.id)?;
    tracing::info!(account_id = %account.id, "Login successful");

    Ok(Session {
        access,
        profile: account.profile(),
    })
}

pub async fn get_profile<S>(store: &S, account_id: AccountId) -> Result<Profile>
where
    S: AccountRepository + ?Sized,
{
    store
        .find_account(account_id)
        .await?
        .map(|account| account.profile())
        .ok_or_else(|| ServerError::NotFound("User not found".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use countdown_core::memory::MemoryStore;

    fn auth() -> AuthService {
        AuthService::new("test-secret", 24).with_bcrypt_cost(4)
    }

    fn some(value: &str) -> Option<String> {
        Some(value.to_string())
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let store = MemoryStore::new();
        let auth = auth();

        let profile = register(&store, &auth, some("alice"), some("a@x.com"), some("pw123"))
            .await
            .unwrap();
        assert_eq!(profile.username, "alice");

        let session = authenticate(&store, &auth, some("alice"), some("pw123"))
            .await
            .unwrap();
        assert_eq!(session.profile, profile);
        assert_eq!(
            auth.verify_access_token(&session.access.token).unwrap(),
            profile.id
        );
    }

    #[tokio::test]
    async fn test_password_is_hashed() {
        let store = MemoryStore::new();
        let profile = register(&store, &auth(), some("bob"), some("b@x.com"), some("hunter2"))
            .await
            .unwrap();

        let stored = store.find_account(profile.id).await.unwrap().unwrap();
        assert_ne!(stored.password_hash, "hunter2");
        assert!(stored.password_hash.starts_with("$2"));
    }

    #[tokio::test]
    async fn test_missing_fields() {
        let store = MemoryStore::new();
        let auth = auth();

        let cases = [
            (None, some("a@x.com"), some("pw")),
            (some("alice"), None, some("pw")),
            (some("alice"), some("a@x.com"), None),
            (some(""), some("a@x.com"), some("pw")),
        ];
        for (username, email, password) in cases {
            let err = register(&store, &auth, username, email, password)
                .await
                .unwrap_err();
            assert!(matches!(err, ServerError::BadRequest(_)));
        }

        let err = authenticate(&store, &auth, some("alice"), None).await.unwrap_err();
        assert!(matches!(err, ServerError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_duplicates_conflict() {
        let store = MemoryStore::new();
        let auth = auth();
        register(&store, &auth, some("alice"), some("a@x.com"), some("pw"))
            .await
            .unwrap();

        let err = register(&store, &auth, some("alice"), some("new@x.com"), some("pw"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServerError::Conflict(ref m) if m == "Username already exists"));

        let err = register(&store, &auth, some("alicia"), some("a@x.com"), some("pw"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServerError::Conflict(ref m) if m == "Email already exists"));
    }

    #[tokio::test]
    async fn test_bad_credentials_are_indistinguishable() {
        let store = MemoryStore::new();
        let auth = auth();
        register(&store, &auth, some("alice"), some("a@x.com"), some("pw123"))
            .await
            .unwrap();

        for (username, password) in [("alice", "pw124"), ("alice", "PW123"), ("mallory", "pw123")] {
            let err = authenticate(&store, &auth, some(username), some(password))
                .await
                .unwrap_err();
            assert!(matches!(err, ServerError::Auth(ref m) if m == INVALID_CREDENTIALS));
        }
    }

    #[tokio::test]
    async fn test_whitespace_password_is_a_password() {
        let store = MemoryStore::new();
        let auth = auth();

        register(&store, &auth, some("wes"), some("w@x.com"), some("   "))
            .await
            .unwrap();
        authenticate(&store, &auth, some("wes"), some("   "))
            .await
            .unwrap();

        let err = authenticate(&store, &auth, some("wes"), some(""))
            .await
            .unwrap_err();
        assert!(matches!(err, ServerError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_unreadable_stored_hash_is_invalid_credentials() {
        let store = MemoryStore::new();
        store
            .create_account(NewAccount {
                username: "legacy".to_string(),
                email: "l@x.com".to_string(),
                password_hash: "not-a-bcrypt-hash".to_string(),
            })
            .await
            .unwrap();

        let err = authenticate(&store, &auth(), some("legacy"), some("pw"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServerError::Auth(ref m) if m == INVALID_CREDENTIALS));
    }

    #[tokio::test]
    async fn test_profile_of_unknown_account() {
        let store = MemoryStore::new();
        let err = get_profile(&store, AccountId::new(404)).await.unwrap_err();
        assert!(matches!(err, ServerError::NotFound(_)));
    }
}
