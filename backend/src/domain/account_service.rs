//! Registration, credential checks, and user profiles.
//!
//! The service never sees a session: inbound adapters bind the returned user
//! id to the request after a successful `register` or `verify`.

use std::sync::Arc;

use tracing::{debug, info};

use super::ports::{
    DepartmentRepository, HospitalRepository, PasswordHasher, PatientRepository, UserRepository,
};
use super::{
    Credentials, Department, EntityKind, EntityName, Error, Hospital, NewUser, PatientRecord,
    User, UserId, UserView, distinct_departments, distinct_hospitals,
};

/// Message returned when signup names an existing account.
pub const USER_EXISTS_MESSAGE: &str = "User already exists";
/// Message returned for any failed login.
pub const INVALID_LOGIN_MESSAGE: &str = "Invalid username or password";

/// User together with the patients it owns and the places they are held.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    /// The account.
    pub user: User,
    /// Patients owned by the account, ordered by id.
    pub patients: Vec<PatientRecord>,
    /// Hospitals referenced by `patients`, in first-seen order.
    pub hospitals: Vec<Hospital>,
    /// Departments referenced by `patients`, in first-seen order.
    pub departments: Vec<Department>,
}

impl UserProfile {
    fn empty(user: User) -> Self {
        Self {
            user,
            patients: Vec::new(),
            hospitals: Vec::new(),
            departments: Vec::new(),
        }
    }

    /// Render the profile with its derived hospitals and departments.
    pub fn view(&self) -> UserView {
        UserView::new(&self.user, &self.patients, &self.hospitals, &self.departments)
    }
}

/// Account use-cases.
#[derive(Clone)]
pub struct AccountService {
    users: Arc<dyn UserRepository>,
    patients: Arc<dyn PatientRepository>,
    hospitals: Arc<dyn HospitalRepository>,
    departments: Arc<dyn DepartmentRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

impl AccountService {
    /// Build the service from its ports.
    pub fn new(
        users: Arc<dyn UserRepository>,
        patients: Arc<dyn PatientRepository>,
        hospitals: Arc<dyn HospitalRepository>,
        departments: Arc<dyn DepartmentRepository>,
        hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self {
            users,
            patients,
            hospitals,
            departments,
            hasher,
        }
    }

    /// Create an account with a hashed credential.
    pub async fn register(&self, credentials: &Credentials) -> Result<UserProfile, Error> {
        let name = EntityName::parse(EntityKind::User, credentials.name())?;
        if self.users.find_by_name(&name).await?.is_some() {
            debug!(user = %name, "signup rejected: name taken");
            return Err(Error::invalid_request(USER_EXISTS_MESSAGE));
        }
        let credential = self
            .hasher
            .hash(credentials.password())
            .map_err(|err| Error::internal(err.to_string()))?;
        let user = self.users.create(&NewUser { name, credential }).await?;
        info!(user_id = %user.id(), "user registered");
        Ok(UserProfile::empty(user))
    }

    /// Check a name/password pair.
    ///
    /// Unknown names and wrong passwords fail identically.
    pub async fn verify(&self, credentials: &Credentials) -> Result<UserProfile, Error> {
        let rejected = || Error::unauthorized(INVALID_LOGIN_MESSAGE);
        let Ok(name) = EntityName::parse(EntityKind::User, credentials.name()) else {
            return Err(rejected());
        };
        let Some(user) = self.users.find_by_name(&name).await? else {
            debug!(user = %name, "login rejected: unknown user");
            return Err(rejected());
        };
        if !self.hasher.verify(credentials.password(), user.credential()) {
            debug!(user_id = %user.id(), "login rejected: credential mismatch");
            return Err(rejected());
        }
        self.load_profile(user).await
    }

    /// Resolve a session identity; `None` when the user no longer exists.
    pub async fn find_user(&self, id: UserId) -> Result<Option<User>, Error> {
        Ok(self.users.find_by_id(id).await?)
    }

    /// Profile of one user.
    pub async fn profile(&self, id: UserId) -> Result<UserProfile, Error> {
        let user = self
            .users
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::not_found(EntityKind::User.not_found_message()))?;
        self.load_profile(user).await
    }

    /// Profiles of every user, ordered by id.
    pub async fn list_profiles(&self) -> Result<Vec<UserProfile>, Error> {
        let users = self.users.list().await?;
        let mut profiles = Vec::with_capacity(users.len());
        for user in users {
            profiles.push(self.load_profile(user).await?);
        }
        Ok(profiles)
    }

    /// Delete an account and, by cascade, its patients.
    pub async fn remove_user(&self, id: UserId) -> Result<(), Error> {
        if !self.users.delete(id).await? {
            return Err(Error::not_found(EntityKind::User.not_found_message()));
        }
        info!(user_id = %id, "user removed");
        Ok(())
    }

    /// Whether any account exists yet.
    pub async fn has_users(&self) -> Result<bool, Error> {
        Ok(!self.users.list().await?.is_empty())
    }

    async fn load_profile(&self, user: User) -> Result<UserProfile, Error> {
        let patients = self.patients.list_for_user(user.id()).await?;
        let mut hospitals = Vec::new();
        for reference in distinct_hospitals(&patients) {
            if let Some(hospital) = self.hospitals.find_by_id(reference.id).await? {
                hospitals.push(hospital);
            }
        }
        let mut departments = Vec::new();
        for reference in distinct_departments(&patients) {
            if let Some(department) = self.departments.find_by_id(reference.id).await? {
                departments.push(department);
            }
        }
        Ok(UserProfile {
            user,
            patients,
            hospitals,
            departments,
        })
    }
}
