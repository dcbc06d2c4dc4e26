//! Startup seeding: the bootstrap account and the sample catalogue.
//!
//! Seeding is idempotent. The account is only created when its username is
//! free and sample gear is only inserted into an empty catalogue.

use std::sync::Arc;

use tracing::info;

use crate::domain::ports::{
    GearRepository, GearRepositoryError, PasswordHasher, UserRepository, UserRepositoryError,
};
use crate::domain::{Category, Error, Gear, GearDetails, NewAccount, User};

/// What a seeding run changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedOutcome {
    /// The bootstrap account was created by this run.
    pub account_created: bool,
    /// Number of sample gear records inserted.
    pub gear_inserted: usize,
}

fn map_user_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        other => Error::internal(format!("user repository error: {other}")),
    }
}

fn map_gear_error(error: GearRepositoryError) -> Error {
    match error {
        GearRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("gear repository unavailable: {message}"))
        }
        GearRepositoryError::Query { message } => {
            Error::internal(format!("gear repository error: {message}"))
        }
    }
}

/// Seeds the stores on startup.
pub struct CatalogSeeder<U, G, H> {
    users: Arc<U>,
    gear: Arc<G>,
    hasher: Arc<H>,
}

impl<U, G, H> CatalogSeeder<U, G, H>
where
    U: UserRepository,
    G: GearRepository,
    H: PasswordHasher,
{
    /// Create a seeder over the given stores.
    pub fn new(users: Arc<U>, gear: Arc<G>, hasher: Arc<H>) -> Self {
        Self { users, gear, hasher }
    }

    /// Ensure `account` exists and, when `with_sample_gear` is set, that the
    /// catalogue is not empty.
    pub async fn seed(
        &self,
        account: &NewAccount,
        with_sample_gear: bool,
    ) -> Result<SeedOutcome, Error> {
        let account_created = self.ensure_account(account).await?;
        let gear_inserted = if with_sample_gear {
            self.ensure_sample_gear().await?
        } else {
            0
        };
        Ok(SeedOutcome {
            account_created,
            gear_inserted,
        })
    }

    async fn ensure_account(&self, account: &NewAccount) -> Result<bool, Error> {
        let existing = self
            .users
            .find_by_username(account.username())
            .await
            .map_err(map_user_error)?;
        if existing.is_some() {
            return Ok(false);
        }

        let password_hash = self
            .hasher
            .hash(account.password())
            .await
            .map_err(|err| Error::internal(format!("password hasher error: {err}")))?;
        let user = User {
            username: account.username().clone(),
            password_hash,
            role: account.role(),
        };
        match self.users.insert(&user).await {
            Ok(()) => {
                info!(username = %user.username, role = %user.role, "bootstrap account created");
                Ok(true)
            }
            // Another instance seeded it first.
            Err(UserRepositoryError::Duplicate { .. }) => Ok(false),
            Err(err) => Err(map_user_error(err)),
        }
    }

    async fn ensure_sample_gear(&self) -> Result<usize, Error> {
        if self.gear.count().await.map_err(map_gear_error)? > 0 {
            return Ok(0);
        }
        let samples = sample_gear();
        for details in &samples {
            self.gear
                .insert(&Gear::new(details.clone()))
                .await
                .map_err(map_gear_error)?;
        }
        info!(count = samples.len(), "sample gear seeded");
        Ok(samples.len())
    }
}

/// The starter catalogue: two items per category.
#[must_use]
pub fn sample_gear() -> Vec<GearDetails> {
    fn item(
        name: &str,
        nickname: &str,
        gear_id: &str,
        image: &str,
        description: &str,
        category: Category,
    ) -> GearDetails {
        GearDetails {
            name: name.to_owned(),
            nickname: nickname.to_owned(),
            external_gear_id: gear_id.to_owned(),
            image_url: format!("https://tr.rbxcdn.com/{image}/420/420/Hat/Png"),
            description: description.to_owned(),
            category,
        }
    }

    vec![
        item(
            "Sword of Light",
            "Épée Lumière",
            "123456789",
            "6b9243f5a6b3fa1b54b12c4f1e7f77e4",
            "Une épée brillante qui émet de la lumière",
            Category::Players,
        ),
        item(
            "Basic Shield",
            "Bouclier Basique",
            "987654321",
            "8c5243f5a6b3fa1b54b12c4f1e7f66e5",
            "Un bouclier simple mais efficace",
            Category::Players,
        ),
        item(
            "Admin Baton",
            "Bâton Admin",
            "456789123",
            "9d6243f5a6b3fa1b54b12c4f1e7f88e6",
            "Bâton spécial pour les modérateurs",
            Category::Moderator,
        ),
        item(
            "Moderator Cape",
            "Cape Modo",
            "789123456",
            "ae7243f5a6b3fa1b54b12c4f1e7f99e7",
            "Cape distinctive des modérateurs",
            Category::Moderator,
        ),
        item(
            "Event Crown",
            "Couronne Événement",
            "321654987",
            "bf8243f5a6b3fa1b54b12c4f1e7faae8",
            "Couronne spéciale pour les événements",
            Category::Events,
        ),
        item(
            "Party Launcher",
            "Lance-Fête",
            "654987321",
            "cg9243f5a6b3fa1b54b12c4f1e7fbbbe9",
            "Lance des confettis pour les fêtes",
            Category::Events,
        ),
        item(
            "Banned Weapon",
            "Arme Interdite",
            "111222333",
            "dh0243f5a6b3fa1b54b12c4f1e7fcccea",
            "Arme trop puissante, interdite d'utilisation",
            Category::Forbidden,
        ),
        item(
            "Exploit Tool",
            "Outil Exploit",
            "444555666",
            "ei1243f5a6b3fa1b54b12c4f1e7fdddeb",
            "Outil causant des bugs, strictement interdit",
            Category::Forbidden,
        ),
    ]
}
