pub use super::company::Entity as Company;
pub use super::contact::Entity as Contact;
pub use super::interaction::Entity as Interaction;
pub use super::lead::Entity as Lead;
pub use super::profile::Entity as Profile;
