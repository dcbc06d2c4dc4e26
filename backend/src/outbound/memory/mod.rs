//! Process-local store implementing every repository port.
//!
//! Used when no database URL is configured and by the HTTP tests. All three
//! tables sit behind one mutex, so `decide` observes and updates the
//! suggestion and the catalogue as a single step.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{
    GearRepository, GearRepositoryError, SuggestionRepository, SuggestionRepositoryError,
    UserRepository, UserRepositoryError,
};
use crate::domain::{
    Category, Decision, DecisionOutcome, Gear, GearId, GearPatch, Suggestion, SuggestionId,
    SuggestionStatus, User, Username,
};

#[derive(Default)]
struct Tables {
    users: BTreeMap<String, User>,
    gears: BTreeMap<GearId, Gear>,
    suggestions: BTreeMap<SuggestionId, Suggestion>,
}

/// Shared in-memory catalogue. Clones share the same tables.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<Mutex<Tables>>,
}

/// Lock poisoning only follows a panic in another request.
struct Poisoned;

impl InMemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, Poisoned> {
        self.tables.lock().map_err(|_| Poisoned)
    }
}

const POISONED: &str = "in-memory store lock poisoned";

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserRepositoryError> {
        let tables = self
            .lock()
            .map_err(|_| UserRepositoryError::query(POISONED))?;
        Ok(tables.users.get(username.as_ref()).cloned())
    }

    async fn insert(&self, user: &User) -> Result<(), UserRepositoryError> {
        let mut tables = self
            .lock()
            .map_err(|_| UserRepositoryError::query(POISONED))?;
        let key = user.username.as_ref().to_owned();
        if tables.users.contains_key(&key) {
            return Err(UserRepositoryError::duplicate(key));
        }
        tables.users.insert(key, user.clone());
        Ok(())
    }
}

fn sorted_gear<'a>(gear: impl Iterator<Item = &'a Gear>) -> Vec<Gear> {
    let mut gear: Vec<Gear> = gear.cloned().collect();
    gear.sort_by(|a, b| {
        a.details
            .name
            .cmp(&b.details.name)
            .then_with(|| a.id.cmp(&b.id))
    });
    gear
}

#[async_trait]
impl GearRepository for InMemoryStore {
    async fn list(&self, category: Option<Category>) -> Result<Vec<Gear>, GearRepositoryError> {
        let tables = self
            .lock()
            .map_err(|_| GearRepositoryError::query(POISONED))?;
        Ok(sorted_gear(tables.gears.values().filter(|gear| {
            category.is_none_or(|wanted| gear.details.category == wanted)
        })))
    }

    async fn find_by_id(&self, id: &GearId) -> Result<Option<Gear>, GearRepositoryError> {
        let tables = self
            .lock()
            .map_err(|_| GearRepositoryError::query(POISONED))?;
        Ok(tables.gears.get(id).cloned())
    }

    async fn insert(&self, gear: &Gear) -> Result<(), GearRepositoryError> {
        let mut tables = self
            .lock()
            .map_err(|_| GearRepositoryError::query(POISONED))?;
        tables.gears.insert(gear.id, gear.clone());
        Ok(())
    }

    async fn update(
        &self,
        id: &GearId,
        patch: &GearPatch,
    ) -> Result<Option<Gear>, GearRepositoryError> {
        let mut tables = self
            .lock()
            .map_err(|_| GearRepositoryError::query(POISONED))?;
        Ok(tables.gears.get_mut(id).map(|gear| {
            patch.apply(&mut gear.details);
            gear.clone()
        }))
    }

    async fn delete(&self, id: &GearId) -> Result<bool, GearRepositoryError> {
        let mut tables = self
            .lock()
            .map_err(|_| GearRepositoryError::query(POISONED))?;
        Ok(tables.gears.remove(id).is_some())
    }

    async fn count(&self) -> Result<u64, GearRepositoryError> {
        let tables = self
            .lock()
            .map_err(|_| GearRepositoryError::query(POISONED))?;
        u64::try_from(tables.gears.len()).map_err(|err| GearRepositoryError::query(err.to_string()))
    }
}

#[async_trait]
impl SuggestionRepository for InMemoryStore {
    async fn insert(&self, suggestion: &Suggestion) -> Result<(), SuggestionRepositoryError> {
        let mut tables = self
            .lock()
            .map_err(|_| SuggestionRepositoryError::query(POISONED))?;
        tables.suggestions.insert(suggestion.id, suggestion.clone());
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Suggestion>, SuggestionRepositoryError> {
        let tables = self
            .lock()
            .map_err(|_| SuggestionRepositoryError::query(POISONED))?;
        let mut suggestions: Vec<Suggestion> = tables.suggestions.values().cloned().collect();
        suggestions.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(suggestions)
    }

    async fn find_by_id(
        &self,
        id: &SuggestionId,
    ) -> Result<Option<Suggestion>, SuggestionRepositoryError> {
        let tables = self
            .lock()
            .map_err(|_| SuggestionRepositoryError::query(POISONED))?;
        Ok(tables.suggestions.get(id).cloned())
    }

    async fn delete(&self, id: &SuggestionId) -> Result<bool, SuggestionRepositoryError> {
        let mut tables = self
            .lock()
            .map_err(|_| SuggestionRepositoryError::query(POISONED))?;
        Ok(tables.suggestions.remove(id).is_some())
    }

    async fn decide(
        &self,
        id: &SuggestionId,
        decision: &Decision,
    ) -> Result<DecisionOutcome, SuggestionRepositoryError> {
        let mut tables = self
            .lock()
            .map_err(|_| SuggestionRepositoryError::query(POISONED))?;
        let Some(suggestion) = tables.suggestions.get_mut(id) else {
            return Ok(DecisionOutcome::NotFound);
        };
        if suggestion.status != SuggestionStatus::Pending {
            return Ok(DecisionOutcome::AlreadyDecided(suggestion.status));
        }
        suggestion.status = decision.target_status();
        if let Decision::Approve { gear } = decision {
            tables.gears.insert(gear.id, gear.clone());
        }
        Ok(DecisionOutcome::Applied)
    }
}
