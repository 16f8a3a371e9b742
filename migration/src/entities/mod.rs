pub mod link;
pub mod question;

pub use link::Entity as LinkEntity;
pub use question::Entity as QuestionEntity;
