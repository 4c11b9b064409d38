pub mod exercise;
pub mod from_row;
pub mod user;

pub use exercise::{display_date, CreateExercise, ExerciseEntry, FieldValue};
pub use from_row::FromSqliteRow;
pub use user::{CreateUser, User};
