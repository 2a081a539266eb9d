pub mod technologies;
pub mod users;
