pub use super::guild::Entity as Guild;
