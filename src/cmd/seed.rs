use serde::Deserialize;

use crate::{
    pkg::{
        internal::{
            adaptors::{
                companies::{mutators::CompanyMutator, spec::CreateCompanyInput},
                jobs::{mutators::JobMutator, spec::CreateJobInput},
                quizzes::{mutators::QuizMutator, spec::CreateQuizInput},
            },
            auth::{Role, User},
        },
        server::state::{AppState, GetTxn},
    },
    prelude::{ApiError, Result},
};

const DEMO: &str = include_str!("../../seed/demo.json");

#[derive(Deserialize)]
struct SeedUser {
    name: String,
    email: String,
    password: String,
    role: Role,
}

#[derive(Deserialize)]
struct Fixtures {
    users: Vec<SeedUser>,
    companies: Vec<CreateCompanyInput>,
    jobs: Vec<CreateJobInput>,
    quizzes: Vec<CreateQuizInput>,
}

fn fixtures() -> Result<Fixtures> {
    let fixtures: Fixtures = serde_json::from_str(DEMO)?;
    for job in &fixtures.jobs {
        job.validate()?;
    }
    for quiz in &fixtures.quizzes {
        quiz.validate()?;
    }
    Ok(fixtures)
}

/// Clears companies, jobs and quizzes and loads the bundled demo data. Demo
/// accounts are reused when they already exist.
pub async fn apply() -> Result<()> {
    let fixtures = fixtures()?;
    let state = AppState::new().await?;
    let mut tx = state.db_pool.begin_txn().await?;

    let quizzes = QuizMutator::new(&mut tx).delete_all().await?;
    let jobs = JobMutator::new(&mut tx).delete_all().await?;
    let companies = CompanyMutator::new(&mut tx).delete_all().await?;
    tracing::info!(
        "cleared {} quizzes, {} jobs, {} companies",
        quizzes,
        jobs,
        companies
    );

    let mut users = vec![];
    for u in &fixtures.users {
        let user = match User::retrieve_by_email(&mut tx, &u.email).await? {
            Some(existing) => existing,
            None => User::create(&mut tx, &u.name, &u.email, &u.password, u.role).await?,
        };
        users.push(user);
    }
    let employer = users
        .iter()
        .find(|u| u.role == Role::Employer)
        .ok_or_else(|| ApiError::internal("seed data has no employer"))?
        .id;
    let creator = users
        .iter()
        .find(|u| u.role == Role::Candidate)
        .ok_or_else(|| ApiError::internal("seed data has no quiz creator"))?
        .id;

    for company in &fixtures.companies {
        CompanyMutator::new(&mut tx).create(company).await?;
    }
    let job_count = fixtures.jobs.len();
    for job in fixtures.jobs {
        JobMutator::new(&mut tx).create(job, employer).await?;
    }
    let quiz_count = fixtures.quizzes.len();
    for quiz in fixtures.quizzes {
        QuizMutator::new(&mut tx).create(quiz, creator).await?;
    }
    tx.commit().await?;

    tracing::info!(
        "seeded {} users, {} companies, {} jobs, {} quizzes",
        users.len(),
        fixtures.companies.len(),
        job_count,
        quiz_count
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use validator::Validate;

    use super::*;

    #[test]
    fn test_bundled_fixtures_are_valid() -> Result<()> {
        let fixtures = fixtures()?;
        assert!(fixtures.users.iter().any(|u| u.role == Role::Employer));
        assert!(fixtures.companies.iter().all(|c| c.validate().is_ok()));
        assert!(!fixtures.jobs.is_empty());
        assert!(!fixtures.quizzes.is_empty());
        Ok(())
    }
}
