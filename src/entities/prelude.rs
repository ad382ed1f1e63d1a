pub use super::auctions::Entity as Auctions;
