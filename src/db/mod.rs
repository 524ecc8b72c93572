// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Database layer (Firestore).

pub mod firestore;

pub use firestore::FirestoreDb;

/// Collection names as constants.
pub mod collections {
    /// User profiles, keyed by internal user ID
    pub const USERS: &str = "users";
    /// Workout records, one document per workout
    pub const WORKOUTS: &str = "workouts";
}
