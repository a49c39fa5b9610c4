pub mod parsed;
pub mod resume;
pub mod score;
