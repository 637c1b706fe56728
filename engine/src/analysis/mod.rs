// Per-entity analysis over cleaned records: classification, surname links, role selection.
pub mod categories;
pub mod links;
pub mod roles;
pub mod search;
pub mod surnames;

pub use categories::{CategoryClassifier, OTHER_CATEGORY};
pub use links::{LinkFinder, LinkSearch};
pub use roles::{Official, RoleMatcher};
pub use surnames::SurnameExtractor;
