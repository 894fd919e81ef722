//! Demo seed catalog for clubhouse
//!
//! Everything the club demo starts with: the three subject tracks, a login
//! directory covering every role, and sample records in every collection.
//! [`demo`] assembles the full catalog; [`bare`] keeps just the tracks and
//! logins for callers that want to build their own records.
//!
//! ```
//! let club = clubhouse_core::Club::new(clubhouse_seed::demo()).unwrap();
//! assert_eq!(club.store().domains().len(), 3);
//! assert!(club.sessions().login("dev@club.org", "dev123").is_ok());
//! ```

mod data;

pub use data::{accounts, content, domains, events, join_requests, members, tasks};

use clubhouse_core::{SeedData, Snapshot};

/// The full demo catalog with every collection populated
pub fn demo() -> SeedData {
    SeedData::new(
        domains(),
        Snapshot {
            accounts: accounts(),
            content: content(),
            join_requests: join_requests(),
            members: members(),
            tasks: tasks(),
            events: events(),
            ..Snapshot::default()
        },
    )
}

/// The tracks and the login directory, with empty collections
pub fn bare() -> SeedData {
    SeedData::new(
        domains(),
        Snapshot {
            accounts: accounts(),
            ..Snapshot::default()
        },
    )
}
