pub mod applications;
pub mod auth;
pub mod calculator;
pub mod companies;
pub mod contact;
pub mod jobs;
pub mod probes;
pub mod quizzes;
