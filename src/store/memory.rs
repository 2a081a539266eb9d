use std::sync::RwLock;

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use super::models::{Technology, User};

/// Errors from the user directory
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("username already registered")]
    UsernameTaken,

    #[error("user does not exist")]
    UserNotFound,

    #[error("technology not found")]
    TechnologyNotFound,
}

/// In-memory user directory. Every lookup is a linear scan; there are no
/// secondary indexes. The `RwLock` makes each operation a single atomic
/// read-modify-write on the multi-threaded runtime, so concurrent requests
/// against the same user cannot lose updates.
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: RwLock<Vec<User>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a user, enforcing username uniqueness across the directory.
    pub fn create_user(&self, name: &str, username: &str) -> Result<User, StoreError> {
        let mut users = self.users.write().expect("user directory lock poisoned");

        if users.iter().any(|user| user.username == username) {
            return Err(StoreError::UsernameTaken);
        }

        let user = User::new(name, username);
        users.push(user.clone());
        Ok(user)
    }

    /// Username lookup for the account-resolution gate.
    pub fn find_user_by_username(&self, username: &str) -> Option<User> {
        let users = self.users.read().expect("user directory lock poisoned");
        users.iter().find(|user| user.username == username).cloned()
    }

    /// Append a new technology to the end of the user's sequence.
    pub fn add_technology(
        &self,
        user_id: Uuid,
        title: &str,
        deadline: DateTime<Utc>,
    ) -> Result<Technology, StoreError> {
        let mut users = self.users.write().expect("user directory lock poisoned");
        let user = find_user_mut(&mut users, user_id)?;

        let technology = Technology::new(title, deadline);
        user.technologies.push(technology.clone());
        Ok(technology)
    }

    /// Full technology sequence in insertion order.
    pub fn list_technologies(&self, user_id: Uuid) -> Result<Vec<Technology>, StoreError> {
        let users = self.users.read().expect("user directory lock poisoned");
        users
            .iter()
            .find(|user| user.id == user_id)
            .map(|user| user.technologies.clone())
            .ok_or(StoreError::UserNotFound)
    }

    /// Replace `title` and `deadline` in place; `id`, `studied` and
    /// `created_at` are untouched.
    pub fn update_technology(
        &self,
        user_id: Uuid,
        technology_id: Uuid,
        title: &str,
        deadline: DateTime<Utc>,
    ) -> Result<Technology, StoreError> {
        let mut users = self.users.write().expect("user directory lock poisoned");
        let technology = find_technology_mut(&mut users, user_id, technology_id)?;

        technology.title = title.to_string();
        technology.deadline = deadline;
        Ok(technology.clone())
    }

    /// Set `studied` to true. Idempotent; there is no way back to unstudied.
    pub fn mark_studied(
        &self,
        user_id: Uuid,
        technology_id: Uuid,
    ) -> Result<Technology, StoreError> {
        let mut users = self.users.write().expect("user directory lock poisoned");
        let technology = find_technology_mut(&mut users, user_id, technology_id)?;

        technology.studied = true;
        Ok(technology.clone())
    }

    /// Remove exactly one technology, preserving the relative order of the
    /// remaining elements.
    pub fn delete_technology(
        &self,
        user_id: Uuid,
        technology_id: Uuid,
    ) -> Result<(), StoreError> {
        let mut users = self.users.write().expect("user directory lock poisoned");
        let user = find_user_mut(&mut users, user_id)?;

        let position = user
            .technologies
            .iter()
            .position(|technology| technology.id == technology_id)
            .ok_or(StoreError::TechnologyNotFound)?;

        user.technologies.remove(position);
        Ok(())
    }
}

fn find_user_mut(users: &mut [User], user_id: Uuid) -> Result<&mut User, StoreError> {
    users
        .iter_mut()
        .find(|user| user.id == user_id)
        .ok_or(StoreError::UserNotFound)
}

fn find_technology_mut(
    users: &mut [User],
    user_id: Uuid,
    technology_id: Uuid,
) -> Result<&mut Technology, StoreError> {
    let user = find_user_mut(users, user_id)?;
    user.technologies
        .iter_mut()
        .find(|technology| technology.id == technology_id)
        .ok_or(StoreError::TechnologyNotFound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn deadline() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn create_user_rejects_duplicate_username() {
        let store = MemoryStore::new();
        store.create_user("Ana", "ana").unwrap();

        let err = store.create_user("Ana Clone", "ana").unwrap_err();
        assert_eq!(err, StoreError::UsernameTaken);

        // The rejected attempt must not grow the directory
        assert!(store.find_user_by_username("ana").is_some());
        assert_eq!(store.find_user_by_username("ana").unwrap().name, "Ana");
    }

    #[test]
    fn find_user_by_username_misses_unknown() {
        let store = MemoryStore::new();
        assert!(store.find_user_by_username("ghost").is_none());
    }

    #[test]
    fn add_then_list_contains_the_new_entry() {
        let store = MemoryStore::new();
        let user = store.create_user("Ana", "ana").unwrap();

        let added = store.add_technology(user.id, "Go", deadline()).unwrap();
        assert!(!added.studied);

        let listed = store.list_technologies(user.id).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, added.id);
        assert_eq!(listed[0].title, "Go");
        assert_eq!(listed[0].deadline, deadline());
    }

    #[test]
    fn list_preserves_insertion_order() {
        let store = MemoryStore::new();
        let user = store.create_user("Ana", "ana").unwrap();

        let first = store.add_technology(user.id, "Go", deadline()).unwrap();
        let second = store.add_technology(user.id, "Rust", deadline()).unwrap();
        let third = store.add_technology(user.id, "Elixir", deadline()).unwrap();

        let ids: Vec<Uuid> = store
            .list_technologies(user.id)
            .unwrap()
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec![first.id, second.id, third.id]);
    }

    #[test]
    fn update_only_touches_title_and_deadline() {
        let store = MemoryStore::new();
        let user = store.create_user("Ana", "ana").unwrap();
        let added = store.add_technology(user.id, "Go", deadline()).unwrap();
        store.mark_studied(user.id, added.id).unwrap();

        let later = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let updated = store
            .update_technology(user.id, added.id, "Golang", later)
            .unwrap();

        assert_eq!(updated.id, added.id);
        assert_eq!(updated.title, "Golang");
        assert_eq!(updated.deadline, later);
        assert_eq!(updated.created_at, added.created_at);
        assert!(updated.studied);
    }

    #[test]
    fn update_unknown_technology_is_not_found() {
        let store = MemoryStore::new();
        let user = store.create_user("Ana", "ana").unwrap();

        let err = store
            .update_technology(user.id, Uuid::new_v4(), "Go", deadline())
            .unwrap_err();
        assert_eq!(err, StoreError::TechnologyNotFound);
    }

    #[test]
    fn mark_studied_is_idempotent() {
        let store = MemoryStore::new();
        let user = store.create_user("Ana", "ana").unwrap();
        let added = store.add_technology(user.id, "Go", deadline()).unwrap();

        let first = store.mark_studied(user.id, added.id).unwrap();
        let second = store.mark_studied(user.id, added.id).unwrap();
        assert!(first.studied);
        assert!(second.studied);
    }

    #[test]
    fn delete_removes_exactly_one_and_keeps_order() {
        let store = MemoryStore::new();
        let user = store.create_user("Ana", "ana").unwrap();
        let first = store.add_technology(user.id, "Go", deadline()).unwrap();
        let second = store.add_technology(user.id, "Rust", deadline()).unwrap();
        let third = store.add_technology(user.id, "Elixir", deadline()).unwrap();

        store.delete_technology(user.id, second.id).unwrap();

        let ids: Vec<Uuid> = store
            .list_technologies(user.id)
            .unwrap()
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec![first.id, third.id]);

        // Deletion is irreversible: everything on that id is NotFound now
        assert_eq!(
            store.delete_technology(user.id, second.id).unwrap_err(),
            StoreError::TechnologyNotFound
        );
        assert_eq!(
            store.mark_studied(user.id, second.id).unwrap_err(),
            StoreError::TechnologyNotFound
        );
        assert_eq!(
            store
                .update_technology(user.id, second.id, "Rust", deadline())
                .unwrap_err(),
            StoreError::TechnologyNotFound
        );
    }

    #[test]
    fn technology_operations_require_a_known_user() {
        let store = MemoryStore::new();
        let ghost = Uuid::new_v4();

        assert_eq!(
            store.add_technology(ghost, "Go", deadline()).unwrap_err(),
            StoreError::UserNotFound
        );
        assert_eq!(store.list_technologies(ghost).unwrap_err(), StoreError::UserNotFound);
    }
}
