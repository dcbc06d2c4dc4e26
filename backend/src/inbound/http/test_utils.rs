//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use chrono::TimeDelta;
use mockable::DefaultClock;

use crate::Trace;
use crate::domain::ports::{
    MockGearCatalog, MockLoginService, MockSuggestionWorkflow, MockUserAdministration,
    PasswordHasher, TokenService, UserRepository,
};
use crate::domain::{
    AccountService, CatalogService, Principal, Role, SuggestionService, User, Username,
};
use crate::outbound::memory::InMemoryStore;
use crate::outbound::security::{Argon2PasswordHasher, JwtTokenService};

use super::api_scope;
use super::state::HttpState;

/// State whose only working port is `tokens`.
pub fn state_with_tokens(tokens: impl TokenService + 'static) -> HttpState {
    HttpState {
        login: Arc::new(MockLoginService::new()),
        users: Arc::new(MockUserAdministration::new()),
        catalog: Arc::new(MockGearCatalog::new()),
        suggestions: Arc::new(MockSuggestionWorkflow::new()),
        tokens: Arc::new(tokens),
    }
}

/// Real services over a fresh in-memory store.
pub struct Harness {
    pub state: HttpState,
    pub store: InMemoryStore,
    tokens: Arc<JwtTokenService>,
}

impl Harness {
    pub fn new() -> Self {
        let store = InMemoryStore::new();
        let shared = Arc::new(store.clone());
        let clock = Arc::new(DefaultClock);
        let tokens = Arc::new(JwtTokenService::new(
            b"handler-test-secret",
            TimeDelta::hours(1),
            clock.clone(),
        ));
        let state = HttpState {
            login: Arc::new(AccountService::new(
                shared.clone(),
                Arc::new(Argon2PasswordHasher),
                tokens.clone(),
            )),
            users: Arc::new(AccountService::new(
                shared.clone(),
                Arc::new(Argon2PasswordHasher),
                tokens.clone(),
            )),
            catalog: Arc::new(CatalogService::new(shared.clone())),
            suggestions: Arc::new(SuggestionService::new(shared, clock)),
            tokens: tokens.clone(),
        };
        Self {
            state,
            store,
            tokens,
        }
    }

    /// `Authorization` header value for a caller holding `role`.
    pub fn bearer(&self, username: &str, role: Role) -> String {
        let principal = Principal {
            username: Username::new(username).expect("valid username"),
            role,
        };
        let token = self.tokens.issue(&principal).expect("token issued");
        format!("Bearer {}", token.as_str())
    }

    /// Store an account with an Argon2 hash of `password`.
    pub async fn add_user(&self, username: &str, password: &str, role: Role) {
        let user = User {
            username: Username::new(username).expect("valid username"),
            password_hash: Argon2PasswordHasher
                .hash(password)
                .await
                .expect("hash"),
            role,
        };
        UserRepository::insert(&self.store, &user)
            .await
            .expect("user inserted");
    }

    /// Application wired exactly as the server wires `/api`.
    pub fn app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        > + use<>,
    > {
        App::new()
            .app_data(web::Data::new(self.state.clone()))
            .wrap(Trace)
            .service(api_scope())
    }
}
