mod application;
mod card;
mod recommendation;

pub use application::{ApplicationHistoryEntry, Constraints, IssuerLimit};
pub use card::{Card, Credit, Offer, OfferAmount};
pub use recommendation::Recommendation;
