//! Diesel table definitions for the registry schema.
//!
//! Must match `backend/migrations` exactly; regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered accounts.
    users (id) {
        /// Serial primary key.
        id -> Int4,
        /// Unique account name.
        name -> Varchar,
        /// Argon2 PHC string.
        credential_hash -> Varchar,
    }
}

diesel::table! {
    /// Hospital reference data.
    hospitals (id) {
        /// Serial primary key.
        id -> Int4,
        /// Unique hospital name.
        name -> Varchar,
        /// Exactly ten digits.
        phone_number -> Varchar,
    }
}

diesel::table! {
    /// Department reference data.
    departments (id) {
        /// Serial primary key.
        id -> Int4,
        /// Unique department name.
        name -> Varchar,
    }
}

diesel::table! {
    /// Patients; every foreign key cascades on delete.
    patients (id) {
        /// Serial primary key.
        id -> Int4,
        /// Unique patient name.
        name -> Varchar,
        /// Date of birth.
        date_of_birth -> Date,
        /// Owning user.
        user_id -> Int4,
        /// Admitting hospital.
        hospital_id -> Int4,
        /// Managing department.
        department_id -> Int4,
    }
}

diesel::joinable!(patients -> users (user_id));
diesel::joinable!(patients -> hospitals (hospital_id));
diesel::joinable!(patients -> departments (department_id));

diesel::allow_tables_to_appear_in_same_query!(users, hospitals, departments, patients);
