pub mod card;
pub mod conversation;
