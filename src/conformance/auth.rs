//! Auth conformance cases.

use std::collections::HashSet;

use super::{BoxFuture, CaseContext, CaseError, CaseResult, ConformanceCase, ensure, ensure_eq, fail};
use crate::auth::{
    domain::{SessionId, UserId},
    ports::AuthProvider,
};
use crate::error::ErrorKind;

const VERIFIER: &str = "dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk";

/// The auth property table.
#[must_use]
pub fn cases() -> Vec<ConformanceCase<dyn AuthProvider>> {
    vec![
        ConformanceCase {
            name: "session_belongs_to_requested_user",
            run: session_belongs_to_requested_user,
        },
        ConformanceCase {
            name: "created_session_validates",
            run: created_session_validates,
        },
        ConformanceCase {
            name: "unknown_session_is_invalid",
            run: unknown_session_is_invalid,
        },
        ConformanceCase {
            name: "invalidation_is_permanent",
            run: invalidation_is_permanent,
        },
        ConformanceCase {
            name: "invalidation_is_idempotent",
            run: invalidation_is_idempotent,
        },
        ConformanceCase {
            name: "session_ids_are_unique",
            run: session_ids_are_unique,
        },
        ConformanceCase {
            name: "authorization_url_embeds_state",
            run: authorization_url_embeds_state,
        },
        ConformanceCase {
            name: "malformed_verifier_is_rejected",
            run: malformed_verifier_is_rejected,
        },
    ]
}

fn user(raw: &str) -> Result<UserId, CaseError> {
    UserId::new(raw).context("user id")
}

fn session_belongs_to_requested_user(auth: &dyn AuthProvider) -> BoxFuture<'_, CaseResult> {
    Box::pin(async move {
        let requested = user(" user-42 ")?;
        let session = auth.create_session(&requested).await.context("create")?;

        ensure_eq("user id", session.user_id(), &requested)?;
        ensure_eq("user id text", session.user_id().as_str(), " user-42 ")?;
        ensure(session.expires_at() > session.created_at(), || {
            format!(
                "expires_at {} is not after created_at {}",
                session.expires_at(),
                session.created_at()
            )
        })
    })
}

fn created_session_validates(auth: &dyn AuthProvider) -> BoxFuture<'_, CaseResult> {
    Box::pin(async move {
        let session = auth.create_session(&user("user-1")?).await.context("create")?;

        let found = auth
            .validate_session(session.id())
            .await
            .context("validate")?
            .ok_or_else(|| fail("fresh session did not validate"))?;
        ensure_eq("session id", found.id(), session.id())?;
        ensure_eq("user id", found.user_id(), session.user_id())
    })
}

fn unknown_session_is_invalid(auth: &dyn AuthProvider) -> BoxFuture<'_, CaseResult> {
    Box::pin(async move {
        let found = auth
            .validate_session(&SessionId::from("nonexistent"))
            .await
            .context("validate")?;
        ensure(found.is_none(), || "unknown session validated".to_owned())
    })
}

fn invalidation_is_permanent(auth: &dyn AuthProvider) -> BoxFuture<'_, CaseResult> {
    Box::pin(async move {
        let session = auth.create_session(&user("user-1")?).await.context("create")?;
        auth.invalidate_session(session.id())
            .await
            .context("invalidate")?;

        for attempt in 1..=3 {
            let found = auth
                .validate_session(session.id())
                .await
                .context("validate")?;
            ensure(found.is_none(), || {
                format!("invalidated session validated on check {attempt}")
            })?;
        }
        let other = auth.create_session(&user("user-1")?).await.context("create")?;
        ensure(other.id() != session.id(), || {
            "invalidated session id was reissued".to_owned()
        })
    })
}

fn invalidation_is_idempotent(auth: &dyn AuthProvider) -> BoxFuture<'_, CaseResult> {
    Box::pin(async move {
        auth.invalidate_session(&SessionId::from("never-issued"))
            .await
            .context("invalidate unknown")?;
        let session = auth.create_session(&user("user-1")?).await.context("create")?;
        auth.invalidate_session(session.id())
            .await
            .context("invalidate")?;
        auth.invalidate_session(session.id())
            .await
            .context("repeated invalidate")
    })
}

fn session_ids_are_unique(auth: &dyn AuthProvider) -> BoxFuture<'_, CaseResult> {
    Box::pin(async move {
        let owner = user("user-1")?;
        let mut seen = HashSet::new();
        for _ in 0..20 {
            let session = auth.create_session(&owner).await.context("create")?;
            let id = session.id().clone();
            ensure(!seen.contains(&id), || format!("session id {id} was issued twice"))?;
            seen.insert(id);
        }
        CaseResult::Ok(())
    })
}

fn authorization_url_embeds_state(auth: &dyn AuthProvider) -> BoxFuture<'_, CaseResult> {
    Box::pin(async move {
        let state = "csrf-token 1/2";
        let url = auth
            .authorization_url(state, VERIFIER)
            .await
            .context("authorization url")?;

        let embedded = url
            .query_pairs()
            .find(|(name, _)| name == "state")
            .map(|(_, value)| value.into_owned());
        ensure_eq("state", &embedded, &Some(state.to_owned()))
    })
}

fn malformed_verifier_is_rejected(auth: &dyn AuthProvider) -> BoxFuture<'_, CaseResult> {
    Box::pin(async move {
        match auth.authorization_url("state", "too-short").await {
            Ok(url) => Err(fail(format!("malformed verifier produced {url}"))),
            Err(err) => ensure_eq("error kind", &err.kind(), &ErrorKind::Validation),
        }
    })
}
