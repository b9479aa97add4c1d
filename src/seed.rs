//! Example lookup data inserted at startup. A table is only filled when it is empty.

use crate::error::AppError;
use crate::model::{Degree, Entity, Gender, Position, Status};
use crate::service::Repository;
use crate::state::AppState;

pub const GENDERS: &[&str] = &["Male", "Female", "Other"];
pub const STATUSES: &[&str] = &["Studying", "On leave", "Graduated", "Retired"];
pub const DEGREES: &[&str] = &["Bachelor", "Master", "Doctorate"];
pub const POSITIONS: &[&str] = &["Lecturer", "Assistant Professor", "Associate Professor", "Professor"];

async fn fill_if_empty<E, F>(repo: &dyn Repository<E>, labels: &[&str], make: F) -> Result<usize, AppError>
where
    E: Entity,
    F: Fn(&str) -> E,
{
    if !repo.list().await?.is_empty() {
        return Ok(0);
    }
    for label in labels {
        repo.create(make(label)).await?;
    }
    tracing::info!(table = E::table().name, rows = labels.len(), "seeded");
    Ok(labels.len())
}

/// Returns the number of rows inserted.
pub async fn seed_example_data(state: &AppState) -> Result<usize, AppError> {
    let mut inserted = 0;
    inserted += fill_if_empty(state.genders.as_ref(), GENDERS, |l| Gender::labelled(l)).await?;
    inserted += fill_if_empty(state.statuses.as_ref(), STATUSES, |l| Status::labelled(l)).await?;
    inserted += fill_if_empty(state.degrees.as_ref(), DEGREES, |l| Degree::labelled(l)).await?;
    inserted += fill_if_empty(state.positions.as_ref(), POSITIONS, |l| Position::labelled(l)).await?;
    Ok(inserted)
}
