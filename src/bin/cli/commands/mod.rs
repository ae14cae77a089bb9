pub mod card;
pub mod exam;
pub mod list;
pub mod repo;
pub mod show;
