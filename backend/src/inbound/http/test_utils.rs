//! In-memory repository fakes and state builders for handler tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use actix_web::web;
use uuid::Uuid;

use crate::domain::ports::{
    CompanyPersistenceError, CompanyRepository, UserPersistenceError, UserRepository,
};
use crate::domain::{Company, User};
use crate::inbound::http::state::AppState;

/// Map-backed stand-in for the user row store.
#[derive(Default)]
pub(crate) struct InMemoryUsers {
    rows: Mutex<HashMap<Uuid, User>>,
}

impl InMemoryUsers {
    pub(crate) fn seeded(users: impl IntoIterator<Item = User>) -> Self {
        Self {
            rows: Mutex::new(users.into_iter().map(|user| (user.id, user)).collect()),
        }
    }

    fn rows(&self) -> Result<MutexGuard<'_, HashMap<Uuid, User>>, UserPersistenceError> {
        self.rows
            .lock()
            .map_err(|_| UserPersistenceError::connection("lock poisoned"))
    }
}

impl UserRepository for InMemoryUsers {
    fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        let rows = self.rows()?;
        let mut users: Vec<User> = rows.values().cloned().collect();
        users.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(users)
    }

    fn find_by_id(&self, id: &Uuid) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.rows()?.get(id).cloned())
    }

    fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        self.rows()?.insert(user.id, user.clone());
        Ok(())
    }

    fn update(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut rows = self.rows()?;
        if !rows.contains_key(&user.id) {
            return Err(UserPersistenceError::query("user not found for update"));
        }
        rows.insert(user.id, user.clone());
        Ok(())
    }
}

/// Map-backed stand-in for the company row store.
#[derive(Default)]
pub(crate) struct InMemoryCompanies {
    rows: Mutex<HashMap<Uuid, Company>>,
}

impl InMemoryCompanies {
    pub(crate) fn seeded(companies: impl IntoIterator<Item = Company>) -> Self {
        Self {
            rows: Mutex::new(
                companies
                    .into_iter()
                    .map(|company| (company.id, company))
                    .collect(),
            ),
        }
    }

    fn rows(&self) -> Result<MutexGuard<'_, HashMap<Uuid, Company>>, CompanyPersistenceError> {
        self.rows
            .lock()
            .map_err(|_| CompanyPersistenceError::connection("lock poisoned"))
    }
}

impl CompanyRepository for InMemoryCompanies {
    fn list(&self) -> Result<Vec<Company>, CompanyPersistenceError> {
        let rows = self.rows()?;
        let mut companies: Vec<Company> = rows.values().cloned().collect();
        companies.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(companies)
    }

    fn find_by_id(&self, id: &Uuid) -> Result<Option<Company>, CompanyPersistenceError> {
        Ok(self.rows()?.get(id).cloned())
    }

    fn insert(&self, company: &Company) -> Result<(), CompanyPersistenceError> {
        self.rows()?.insert(company.id, company.clone());
        Ok(())
    }

    fn update(&self, company: &Company) -> Result<(), CompanyPersistenceError> {
        let mut rows = self.rows()?;
        if !rows.contains_key(&company.id) {
            return Err(CompanyPersistenceError::query(
                "company not found for update",
            ));
        }
        rows.insert(company.id, company.clone());
        Ok(())
    }
}

/// Application state wired against the given fakes.
pub(crate) fn test_state(users: InMemoryUsers, companies: InMemoryCompanies) -> web::Data<AppState> {
    let users: Arc<dyn UserRepository> = Arc::new(users);
    let companies: Arc<dyn CompanyRepository> = Arc::new(companies);
    web::Data::new(AppState::new(users, companies).expect("schema wiring"))
}

pub(crate) fn sample_user(name: &str) -> User {
    User {
        id: Uuid::new_v4(),
        name: name.to_owned(),
        password: "correct horse".to_owned(),
        is_admin: false,
        company: None,
    }
}

pub(crate) fn sample_company(name: &str) -> Company {
    Company {
        id: Uuid::new_v4(),
        name: name.to_owned(),
    }
}
