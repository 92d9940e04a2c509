//! Integration tests for the Diesel registry repositories against embedded
//! PostgreSQL.
//!
//! These cover behaviour that only the database enforces: `ON DELETE CASCADE`
//! from users, hospitals, and departments to patients, and unique name
//! constraints surfacing as client errors.

use actix_web::ResponseError;
use actix_web::http::StatusCode;
use chrono::NaiveDate;
use pg_embedded_setup_unpriv::TestCluster;
use registry_backend::domain::ports::{
    DepartmentRepository, HospitalRepository, PatientRepository, RepositoryError, UserRepository,
};
use registry_backend::domain::{
    CredentialHash, DateOfBirth, Department, EntityKind, EntityName, Error, Hospital,
    NewDepartment, NewHospital, NewPatient, NewUser, PatientRecord, PhoneNumber, User,
};
use registry_backend::outbound::persistence::{
    DbPool, DieselDepartmentRepository, DieselHospitalRepository, DieselPatientRepository,
    DieselUserRepository, PoolConfig, run_pending_migrations,
};
use rstest::{fixture, rstest};
use tokio::runtime::Runtime;

#[path = "support/pg_embed.rs"]
mod pg_embed;

mod support;

use pg_embed::test_cluster;
use support::{handle_cluster_setup_failure, reset_database};

const TEST_DB: &str = "diesel_registry_repo_test";

struct TestContext {
    runtime: Runtime,
    _cluster: TestCluster,
    users: DieselUserRepository,
    hospitals: DieselHospitalRepository,
    departments: DieselDepartmentRepository,
    patients: DieselPatientRepository,
}

/// Rows shared by the cascade scenarios.
struct Seeded {
    owner: User,
    hospital: Hospital,
    department: Department,
    patient: PatientRecord,
}

fn name(kind: EntityKind, raw: &str) -> EntityName {
    EntityName::parse(kind, raw).expect("valid name")
}

fn setup_context() -> Result<TestContext, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let cluster = test_cluster()?;
    let connection = cluster.connection();
    reset_database(&connection.database_url("postgres"), TEST_DB)?;
    let database_url = connection.database_url(TEST_DB);
    run_pending_migrations(&database_url).map_err(|err| err.to_string())?;

    let config = PoolConfig::new(&database_url)
        .with_max_size(2)
        .with_min_idle(Some(1));
    let pool = runtime
        .block_on(async { DbPool::new(config).await })
        .map_err(|err| err.to_string())?;

    Ok(TestContext {
        runtime,
        _cluster: cluster,
        users: DieselUserRepository::new(pool.clone()),
        hospitals: DieselHospitalRepository::new(pool.clone()),
        departments: DieselDepartmentRepository::new(pool.clone()),
        patients: DieselPatientRepository::new(pool),
    })
}

#[fixture]
fn repo_context() -> Option<TestContext> {
    match setup_context() {
        Ok(ctx) => Some(ctx),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

impl TestContext {
    fn seed(&self) -> Seeded {
        self.runtime.block_on(async {
            let owner = self
                .users
                .create(&NewUser {
                    name: name(EntityKind::User, "Ann"),
                    credential: CredentialHash::new("$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA"),
                })
                .await
                .expect("user");
            let hospital = self
                .hospitals
                .create(&NewHospital {
                    name: name(EntityKind::Hospital, "Evanston Hospital"),
                    phone_number: PhoneNumber::parse("8475702000").expect("phone"),
                })
                .await
                .expect("hospital");
            let department = self
                .departments
                .create(&NewDepartment {
                    name: name(EntityKind::Department, "Cardiology"),
                })
                .await
                .expect("department");
            let patient = self
                .patients
                .create(&NewPatient {
                    name: name(EntityKind::Patient, "John Smith"),
                    date_of_birth: DateOfBirth::from_stored(
                        NaiveDate::from_ymd_opt(1980, 4, 12).expect("date"),
                    ),
                    user_id: owner.id(),
                    hospital_id: hospital.id(),
                    department_id: department.id(),
                })
                .await
                .expect("patient");
            Seeded {
                owner,
                hospital,
                department,
                patient,
            }
        })
    }

    fn patient_exists(&self, seeded: &Seeded) -> bool {
        self.runtime
            .block_on(self.patients.find_by_id(seeded.patient.patient.id()))
            .expect("patient lookup")
            .is_some()
    }
}

#[rstest]
fn deleting_a_user_removes_their_patients(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: deleting_a_user_removes_their_patients skipped");
        return;
    };
    let seeded = context.seed();

    let removed = context
        .runtime
        .block_on(context.users.delete(seeded.owner.id()))
        .expect("delete user");

    assert!(removed);
    assert!(!context.patient_exists(&seeded));
    let hospital = context
        .runtime
        .block_on(context.hospitals.find_by_id(seeded.hospital.id()))
        .expect("hospital lookup");
    assert_eq!(hospital, Some(seeded.hospital));
}

#[rstest]
fn deleting_a_hospital_removes_its_patients(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: deleting_a_hospital_removes_its_patients skipped");
        return;
    };
    let seeded = context.seed();

    let removed = context
        .runtime
        .block_on(context.hospitals.delete(seeded.hospital.id()))
        .expect("delete hospital");

    assert!(removed);
    assert!(!context.patient_exists(&seeded));
    let remaining = context
        .runtime
        .block_on(context.patients.list_for_user(seeded.owner.id()))
        .expect("list patients");
    assert!(remaining.is_empty());
    let owner = context
        .runtime
        .block_on(context.users.find_by_id(seeded.owner.id()))
        .expect("user lookup");
    assert!(owner.is_some());
}

#[rstest]
fn deleting_a_department_removes_its_patients(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: deleting_a_department_removes_its_patients skipped");
        return;
    };
    let seeded = context.seed();

    let removed = context
        .runtime
        .block_on(context.departments.delete(seeded.department.id()))
        .expect("delete department");

    assert!(removed);
    assert!(!context.patient_exists(&seeded));
    let remaining = context
        .runtime
        .block_on(
            context
                .patients
                .list_for_hospital(seeded.hospital.id(), seeded.owner.id()),
        )
        .expect("list patients");
    assert!(remaining.is_empty());
}

#[rstest]
fn duplicate_hospital_names_become_bad_requests(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: duplicate_hospital_names_become_bad_requests skipped");
        return;
    };
    let seeded = context.seed();

    let err = context
        .runtime
        .block_on(context.hospitals.create(&NewHospital {
            name: seeded.hospital.name().clone(),
            phone_number: PhoneNumber::parse("3129425000").expect("phone"),
        }))
        .expect_err("duplicate name");

    assert_eq!(err, RepositoryError::duplicate_name(EntityKind::Hospital));
    let domain = Error::from(err);
    assert_eq!(domain.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(domain.message(), "This hospital name is already in use.");
}

#[rstest]
fn patients_naming_a_missing_hospital_are_rejected(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: patients_naming_a_missing_hospital_are_rejected skipped");
        return;
    };
    let seeded = context.seed();
    context
        .runtime
        .block_on(context.hospitals.delete(seeded.hospital.id()))
        .expect("delete hospital");

    let err = context
        .runtime
        .block_on(context.patients.create(&NewPatient {
            name: name(EntityKind::Patient, "Jane Doe"),
            date_of_birth: seeded.patient.patient.date_of_birth(),
            user_id: seeded.owner.id(),
            hospital_id: seeded.hospital.id(),
            department_id: seeded.department.id(),
        }))
        .expect_err("missing hospital");

    assert_eq!(err, RepositoryError::missing_reference(EntityKind::Hospital));
}
