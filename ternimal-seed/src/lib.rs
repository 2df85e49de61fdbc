// Library interface for ternimal-seed (for testing purposes)
pub mod api;
pub mod logging;
pub mod seeder;
