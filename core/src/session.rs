use tokio::sync::watch;

/// Authentication status as seen by the browsing surface.
///
/// This store only carries state; obtaining or refreshing tokens is the
/// job of whatever performs the login.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum AuthState {
    #[default]
    Anonymous,
    SignedIn {
        access: String,
        refresh: String,
    },
}

/// Observable session-state store with a subscribe/notify contract.
///
/// Components that need auth status subscribe once instead of polling
/// ambient storage; every `sign_in`/`sign_out` notifies all subscribers.
#[derive(Clone, Debug)]
pub struct SessionStore {
    tx: watch::Sender<AuthState>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(AuthState::Anonymous);
        Self { tx }
    }

    pub fn sign_in(&self, access: impl Into<String>, refresh: impl Into<String>) {
        self.tx.send_replace(AuthState::SignedIn {
            access: access.into(),
            refresh: refresh.into(),
        });
    }

    pub fn sign_out(&self) {
        self.tx.send_replace(AuthState::Anonymous);
    }

    pub fn current(&self) -> AuthState {
        self.tx.borrow().clone()
    }

    pub fn is_signed_in(&self) -> bool {
        matches!(self.current(), AuthState::SignedIn { .. })
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.tx.subscribe()
    }

    /// Access-token view suitable for
    /// [`BackendClient::with_token_source`](storefront_backend_client::BackendClient::with_token_source).
    pub fn access_token_source(&self) -> watch::Receiver<Option<String>> {
        let (tx, rx) = watch::channel(match self.current() {
            AuthState::SignedIn { access, .. } => Some(access),
            AuthState::Anonymous => None,
        });
        let mut auth = self.subscribe();
        tokio::spawn(async move {
            while auth.changed().await.is_ok() {
                let token = match &*auth.borrow() {
                    AuthState::SignedIn { access, .. } => Some(access.clone()),
                    AuthState::Anonymous => None,
                };
                if tx.send(token).is_err() {
                    return;
                }
            }
        });
        rx
    }
}
