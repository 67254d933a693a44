pub mod card;

pub use card::{group_health_card, HealthCardService};
