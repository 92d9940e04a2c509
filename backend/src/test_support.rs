//! Test utilities shared by unit tests and the integration suites in
//! `tests/`. Compiled for tests and behind the `test-support` feature.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use chrono::{DateTime, Local, NaiveDate, NaiveTime, Utc};
use mockable::Clock;

use crate::domain::{
    AccountService, Credentials, DepartmentService, HospitalService, PatientService, UserId,
};
use crate::inbound::http::{self, HttpState, RegistryPorts};
use crate::middleware::Trace;
use crate::outbound::credentials::Argon2CredentialHasher;
use crate::outbound::memory::InMemoryRegistry;

/// Calendar date every [`FixedClock`] reports as "today".
pub const FIXED_TODAY: NaiveDate = match NaiveDate::from_ymd_opt(2024, 5, 1) {
    Some(date) => date,
    None => panic!("fixed test date must be valid"),
};

/// Clock pinned to a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    utc_now: DateTime<Utc>,
}

impl FixedClock {
    /// Clock reporting noon UTC on `date`.
    pub fn on(date: NaiveDate) -> Self {
        Self {
            utc_now: date.and_time(NaiveTime::MIN).and_utc() + chrono::Duration::hours(12),
        }
    }
}

impl Default for FixedClock {
    fn default() -> Self {
        Self::on(FIXED_TODAY)
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

/// Services wired to one in-memory store and a cheap hasher.
#[derive(Clone)]
pub struct Registry {
    /// Backing store shared by every service.
    pub store: Arc<InMemoryRegistry>,
    /// Account service.
    pub accounts: AccountService,
    /// Patient service.
    pub patients: PatientService,
    /// Hospital service.
    pub hospitals: HospitalService,
    /// Department service.
    pub departments: DepartmentService,
    ports: RegistryPorts,
}

impl Registry {
    /// Fresh registry whose clock reads [`FIXED_TODAY`].
    pub fn in_memory() -> Self {
        Self::with_clock(Arc::new(FixedClock::default()))
    }

    /// Fresh registry using `clock` for date checks.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        let store = Arc::new(InMemoryRegistry::new());
        let ports = RegistryPorts {
            users: store.clone(),
            patients: store.clone(),
            hospitals: store.clone(),
            departments: store.clone(),
            hasher: Arc::new(Argon2CredentialHasher::minimal()),
            clock,
        };
        let HttpState {
            accounts,
            patients,
            hospitals,
            departments,
        } = HttpState::from(ports.clone());
        Self {
            store,
            accounts,
            patients,
            hospitals,
            departments,
            ports,
        }
    }

    /// Ports backing this registry.
    pub fn ports(&self) -> RegistryPorts {
        self.ports.clone()
    }

    /// HTTP state sharing this registry's store.
    pub fn http_state(&self) -> HttpState {
        HttpState {
            accounts: self.accounts.clone(),
            patients: self.patients.clone(),
            hospitals: self.hospitals.clone(),
            departments: self.departments.clone(),
        }
    }

    /// Register a user and return its id.
    ///
    /// # Panics
    /// Panics when registration fails.
    #[allow(clippy::expect_used, reason = "test helper fails loudly on bad fixtures")]
    pub async fn register(&self, name: &str, password: &str) -> UserId {
        let credentials =
            Credentials::try_from_parts(Some(name), Some(password)).expect("credential shape");
        self.accounts
            .register(&credentials)
            .await
            .expect("registration succeeds")
            .user
            .id()
    }
}

/// Session middleware for tests: fresh key, cookie `session`, not `Secure`.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Session cookie set by `res`, if any.
pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
}

/// Application with every registry route, tracing, and a test session,
/// backed by `registry`.
pub fn registry_app(
    registry: &Registry,
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
        .app_data(web::Data::new(registry.http_state()))
        .wrap(Trace)
        .service(
            web::scope("")
                .wrap(test_session_middleware())
                .configure(http::configure),
        )
}
