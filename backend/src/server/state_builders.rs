//! Builders wiring the stores, seeding them and assembling [`HttpState`].

use std::io;
use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::{info, warn};

use gear_catalog::domain::ports::{GearRepository, SuggestionRepository, UserRepository};
use gear_catalog::domain::{
    AccountService, CatalogSeeder, CatalogService, NewAccount, SuggestionService,
};
use gear_catalog::inbound::http::state::HttpState;
use gear_catalog::outbound::memory::InMemoryStore;
use gear_catalog::outbound::persistence::{
    DbPool, DieselGearRepository, DieselSuggestionRepository, DieselUserRepository, PoolConfig,
    run_migrations,
};
use gear_catalog::outbound::security::{Argon2PasswordHasher, JwtTokenService};
use gear_catalog::settings::AppSettings;

/// Inputs shared by every store backend.
pub struct StateInputs {
    pub(crate) tokens: Arc<JwtTokenService>,
    pub(crate) bootstrap: NewAccount,
    pub(crate) seed_sample_gear: bool,
}

impl StateInputs {
    /// Resolve token signing and bootstrap seeding from settings.
    ///
    /// # Errors
    /// Returns [`io::Error`] when the signing secret or bootstrap account is
    /// invalid.
    pub fn from_settings(settings: &AppSettings) -> io::Result<Self> {
        let secret = settings
            .token_secret(cfg!(debug_assertions))
            .map_err(io::Error::other)?;
        if settings.uses_development_secret() {
            warn!("signing tokens with the development secret (dev only)");
        }
        let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
        let tokens = Arc::new(JwtTokenService::new(&secret, settings.token_ttl(), clock));
        let bootstrap = settings.bootstrap_account().map_err(io::Error::other)?;
        Ok(Self {
            tokens,
            bootstrap,
            seed_sample_gear: settings.seed_sample_gear,
        })
    }
}

/// Seed the stores and build the HTTP state over them.
async fn assemble<U, G, S>(
    users: Arc<U>,
    gear: Arc<G>,
    suggestions: Arc<S>,
    inputs: StateInputs,
) -> io::Result<HttpState>
where
    U: UserRepository + 'static,
    G: GearRepository + 'static,
    S: SuggestionRepository + 'static,
{
    let hasher = Arc::new(Argon2PasswordHasher);
    let outcome = CatalogSeeder::new(users.clone(), gear.clone(), hasher.clone())
        .seed(&inputs.bootstrap, inputs.seed_sample_gear)
        .await
        .map_err(|err| io::Error::other(format!("seeding failed: {err}")))?;
    info!(
        account_created = outcome.account_created,
        gear_inserted = outcome.gear_inserted,
        "stores seeded"
    );

    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let accounts = Arc::new(AccountService::new(users, hasher, inputs.tokens.clone()));
    Ok(HttpState {
        login: accounts.clone(),
        users: accounts,
        catalog: Arc::new(CatalogService::new(gear)),
        suggestions: Arc::new(SuggestionService::new(suggestions, clock)),
        tokens: inputs.tokens,
    })
}

/// Build state over PostgreSQL after applying pending migrations.
async fn build_diesel_state(
    database_url: &str,
    settings: &AppSettings,
    inputs: StateInputs,
) -> io::Result<HttpState> {
    let url = database_url.to_owned();
    let applied = web::block(move || run_migrations(&url))
        .await
        .map_err(io::Error::other)?
        .map_err(io::Error::other)?;
    info!(applied, "database schema is current");

    let config = PoolConfig::new(database_url).with_max_size(settings.db_max_connections());
    let pool = DbPool::new(config)
        .await
        .map_err(|err| io::Error::other(format!("database pool: {err}")))?;
    assemble(
        Arc::new(DieselUserRepository::new(pool.clone())),
        Arc::new(DieselGearRepository::new(pool.clone())),
        Arc::new(DieselSuggestionRepository::new(pool)),
        inputs,
    )
    .await
}

/// Build the HTTP state using PostgreSQL when a URL is configured, otherwise
/// the in-memory store.
///
/// # Errors
/// Propagates [`io::Error`] for migration, pool, or seeding failures.
pub async fn build_http_state(settings: &AppSettings) -> io::Result<HttpState> {
    let inputs = StateInputs::from_settings(settings)?;
    match settings.database_url() {
        Some(url) => build_diesel_state(url, settings, inputs).await,
        None => {
            warn!("GEAR_DATABASE_URL not set; data will not survive a restart");
            let store = Arc::new(InMemoryStore::new());
            assemble(store.clone(), store.clone(), store, inputs).await
        }
    }
}
