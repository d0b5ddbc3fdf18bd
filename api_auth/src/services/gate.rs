//! Sign-in decision hook run after a provider completes federated login.

use std::fmt;
use std::sync::Arc;

/// What the provider told us about the person signing in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignInAttempt {
    pub provider: String,
    pub email: Option<String>,
}

impl SignInAttempt {
    pub fn new(provider: impl Into<String>, email: Option<String>) -> Self {
        Self {
            provider: provider.into(),
            email,
        }
    }
}

pub type SignInCallback = dyn Fn(&SignInAttempt) -> bool + Send + Sync;

/// Decides whether a federated sign-in may become a session.
///
/// Holds an injected decision function so the OAuth callback never
/// needs to know the policy, and the policy can be tested without a
/// live provider.
#[derive(Clone)]
pub struct SignInGate {
    decide: Arc<SignInCallback>,
}

impl SignInGate {
    pub fn new<F>(decide: F) -> Self
    where
        F: Fn(&SignInAttempt) -> bool + Send + Sync + 'static,
    {
        Self {
            decide: Arc::new(decide),
        }
    }

    /// Permits `provider` sign-ins whose email belongs to `domain`.
    pub fn domain_allow_list(provider: impl Into<String>, domain: impl Into<String>) -> Self {
        let provider = provider.into();
        let domain = domain.into();
        Self::new(move |attempt| {
            attempt.provider == provider
                && attempt
                    .email
                    .as_deref()
                    .is_some_and(|email| email_in_domain(email, &domain))
        })
    }

    pub fn allows(&self, attempt: &SignInAttempt) -> bool {
        (self.decide)(attempt)
    }
}

impl fmt::Debug for SignInGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignInGate").finish_non_exhaustive()
    }
}

/// True when `email` ends in `@domain`, ignoring ASCII case.
pub fn email_in_domain(email: &str, domain: &str) -> bool {
    let domain = domain.trim_start_matches('@');
    if domain.is_empty() {
        return false;
    }
    let suffix = format!("@{}", domain);
    email
        .len()
        .checked_sub(suffix.len())
        .and_then(|start| email.get(start..))
        .is_some_and(|tail| tail.eq_ignore_ascii_case(&suffix))
}
