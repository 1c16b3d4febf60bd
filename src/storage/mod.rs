// Local persistence
//
// Every store lives as one JSON blob in the data directory. A missing blob
// always means "empty" or "unset", never an error.

pub mod feed;
pub mod identity;
pub mod local;
pub mod plans;

pub use feed::{Comment, FeedStore, Post};
pub use identity::Identity;
pub use local::LocalStorage;
pub use plans::PlanStore;

pub const PLANS_KEY: &str = "workoutPlans";
pub const FEED_KEY: &str = "communityPosts";
pub const NAME_KEY: &str = "userName";
pub const SESSION_KEY: &str = "auth-storage";
