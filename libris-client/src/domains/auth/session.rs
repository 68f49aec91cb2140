//! Sign-in orchestration
//!
//! The session owns the [`AuthState`] and an epoch counter. Every login and
//! logout bumps the epoch; a rank that resolves under an older epoch belongs
//! to a session that no longer exists and is dropped.

use std::sync::Arc;

use futures::future::BoxFuture;
use libris_model::Rank;
use log::{debug, info, warn};

use super::permissions::{VisibilityFlags, visibility_for};
use super::state_types::AuthState;
use super::types::UserId;
use crate::error::{ClientError, ClientResult, GatewayResult, ValidationError};
use crate::infrastructure::services::CatalogGateway;

/// Handle for credentials that passed local validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoginAttempt {
    pub user_id: UserId,
    epoch: u64,
}

/// A rank fetch in flight
pub struct PendingRank {
    epoch: u64,
    future: BoxFuture<'static, GatewayResult<Rank>>,
}

impl std::fmt::Debug for PendingRank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingRank")
            .field("epoch", &self.epoch)
            .finish_non_exhaustive()
    }
}

impl PendingRank {
    pub async fn resolve(self) -> ResolvedRank {
        ResolvedRank {
            epoch: self.epoch,
            result: self.future.await,
        }
    }
}

/// Outcome of a rank fetch, not yet applied
#[derive(Debug)]
pub struct ResolvedRank {
    epoch: u64,
    result: GatewayResult<Rank>,
}

/// What applying a resolved rank did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankUpdate {
    Applied {
        rank: Rank,
        visibility: VisibilityFlags,
    },
    /// The session it was fetched for has ended
    Discarded,
}

#[derive(Debug)]
pub struct AuthSession {
    gateway: Arc<dyn CatalogGateway>,
    state: AuthState,
    epoch: u64,
}

impl AuthSession {
    pub fn new(gateway: Arc<dyn CatalogGateway>) -> Self {
        Self {
            gateway,
            state: AuthState::Anonymous,
            epoch: 0,
        }
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.is_authenticated()
    }

    pub fn rank(&self) -> Option<Rank> {
        self.state.rank()
    }

    pub fn visibility(&self) -> VisibilityFlags {
        self.state.visibility()
    }

    /// Validate `id` locally and enter `Authenticating`. Nothing is sent to
    /// the service when validation fails, and the state is left alone.
    pub fn begin_login<I>(&mut self, id: I) -> ClientResult<LoginAttempt>
    where
        I: TryInto<UserId, Error = ValidationError>,
    {
        let user_id = id.try_into()?;
        self.epoch += 1;
        self.state = AuthState::Authenticating { user_id };
        debug!("[Auth] Authenticating user {}", user_id);
        Ok(LoginAttempt {
            user_id,
            epoch: self.epoch,
        })
    }

    /// Apply the service's verdict for `attempt`. Returns whether the session
    /// is now authenticated.
    pub fn finish_login(
        &mut self,
        attempt: LoginAttempt,
        verdict: GatewayResult<bool>,
    ) -> ClientResult<bool> {
        if attempt.epoch != self.epoch {
            debug!("[Auth] Ignoring verdict for superseded login");
            return Ok(false);
        }
        match verdict {
            Ok(true) => {
                info!("[Auth] User {} signed in", attempt.user_id);
                self.state = AuthState::Authenticated {
                    user_id: attempt.user_id,
                    rank: None,
                    visibility: VisibilityFlags::HIDDEN,
                };
                Ok(true)
            }
            Ok(false) => {
                info!("[Auth] Credentials rejected for user {}", attempt.user_id);
                self.state = AuthState::Anonymous;
                Ok(false)
            }
            Err(err) => {
                warn!("[Auth] Sign-in failed: {}", err);
                self.state = AuthState::Anonymous;
                Err(err.into())
            }
        }
    }

    /// Issue the rank fetch for the current session.
    pub fn begin_rank_fetch(&self) -> ClientResult<PendingRank> {
        if !self.is_authenticated() {
            return Err(ClientError::NotAuthenticated);
        }
        let gateway = Arc::clone(&self.gateway);
        Ok(PendingRank {
            epoch: self.epoch,
            future: Box::pin(async move { gateway.fetch_rank().await }),
        })
    }

    /// Push a resolved rank through the visibility policy, unless the
    /// session it belongs to is gone.
    pub fn apply_rank(&mut self, resolved: ResolvedRank) -> ClientResult<RankUpdate> {
        if resolved.epoch != self.epoch || !self.is_authenticated() {
            debug!("[Auth] Discarding rank for an ended session");
            return Ok(RankUpdate::Discarded);
        }
        let rank = resolved.result?;
        let visibility = visibility_for(rank);
        if let AuthState::Authenticated {
            rank: current,
            visibility: flags,
            ..
        } = &mut self.state
        {
            *current = Some(rank);
            *flags = visibility;
        }
        info!("[Auth] Rank resolved to {}", rank);
        Ok(RankUpdate::Applied { rank, visibility })
    }

    /// Full sign-in: validate, authenticate, then resolve the rank.
    ///
    /// `Ok(false)` means the service rejected the credentials. A failing
    /// rank fetch is returned as an error but the session stays signed in
    /// with nothing visible.
    pub async fn login<I>(&mut self, id: I, password: &str) -> ClientResult<bool>
    where
        I: TryInto<UserId, Error = ValidationError>,
    {
        let attempt = self.begin_login(id)?;
        let verdict = self
            .gateway
            .authenticate(attempt.user_id.get(), password)
            .await;
        if !self.finish_login(attempt, verdict)? {
            return Ok(false);
        }

        let pending = self.begin_rank_fetch()?;
        let resolved = pending.resolve().await;
        self.apply_rank(resolved)?;
        Ok(true)
    }

    /// Back to `Anonymous`. Any rank still in flight will be discarded.
    pub fn logout(&mut self) {
        if let Some(user_id) = self.state.user_id() {
            info!("[Auth] User {} signed out", user_id);
        }
        self.epoch += 1;
        self.state = AuthState::Anonymous;
    }
}
