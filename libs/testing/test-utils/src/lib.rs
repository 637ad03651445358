//! Shared test utilities for the users workspace
//!
//! - `TestDatabase`: PostgreSQL container with migrations applied (feature: "postgres")
//! - `TestDataBuilder`: deterministic usernames and emails derived from the test name
//! - `assertions`: small assertion helpers
//!
//! ```rust,no_run
//! use test_utils::{TestDatabase, TestDataBuilder};
//!
//! #[tokio::test]
//! async fn my_postgres_test() {
//!     let db = TestDatabase::new().await;
//!     let data = TestDataBuilder::from_test_name("my_postgres_test");
//!
//!     let username = data.username("alice");
//!     let email = data.email("alice");
//! }
//! ```

#[cfg(feature = "postgres")]
mod postgres;

#[cfg(feature = "postgres")]
pub use postgres::TestDatabase;

/// Builds unique, reproducible test values from a seed.
///
/// Values from different seeds never collide, so tests sharing one database
/// do not trip the unique constraints of each other.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seed from a hash of the test name.
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Username in the 3..=50 character range, e.g. `alice_1a2b3c4d`.
    pub fn username(&self, prefix: &str) -> String {
        let mut name = format!("{}_{:08x}", prefix, self.seed as u32);
        name.truncate(50);
        name
    }

    /// Email such as `alice_1a2b3c4d@example.com`.
    pub fn email(&self, prefix: &str) -> String {
        format!("{}_{:08x}@example.com", prefix, self.seed as u32)
    }

    /// Free-form label such as `test-project-<seed>-main`.
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("test-{}-{}-{}", prefix, self.seed, suffix)
    }
}

/// Test assertion helpers
pub mod assertions {
    /// Unwrap `Some`, panicking with `context` otherwise.
    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{}: expected Some, got None", context))
    }

    pub fn assert_none<T: std::fmt::Debug>(value: Option<T>, context: &str) {
        if let Some(v) = value {
            panic!("{}: expected None, got {:?}", context, v);
        }
    }

    /// Assert every item is ordered by `key`, largest first.
    pub fn assert_sorted_desc<T, K: PartialOrd + std::fmt::Debug>(
        items: &[T],
        key: impl Fn(&T) -> K,
        context: &str,
    ) {
        for pair in items.windows(2) {
            let (a, b) = (key(&pair[0]), key(&pair[1]));
            assert!(a >= b, "{}: {:?} listed before {:?}", context, a, b);
        }
    }
}
