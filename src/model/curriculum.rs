use super::Entity;
use crate::config::schema::{TableDef, CURRICULUMS};
use crate::error::AppError;
use crate::service::RequestValidator;
use crate::sql::SqlValue;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Curriculum {
    pub curriculum_id: String,
    pub curriculum_name: String,
    pub total_credit: i32,
    pub start_year: i32,
    pub faculty_id: String,
    pub major_id: Option<String>,
    pub book_id: Option<i64>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NewCurriculum {
    pub curriculum_id: Option<String>,
    pub curriculum_name: Option<String>,
    pub total_credit: Option<i32>,
    pub start_year: Option<i32>,
    pub faculty_id: Option<String>,
    pub major_id: Option<String>,
    pub book_id: Option<i64>,
    pub description: Option<String>,
}

impl TryFrom<NewCurriculum> for Curriculum {
    type Error = AppError;

    fn try_from(req: NewCurriculum) -> Result<Self, Self::Error> {
        Ok(Curriculum {
            curriculum_id: RequestValidator::required_text("curriculum_id", req.curriculum_id)?,
            curriculum_name: RequestValidator::required_text("curriculum_name", req.curriculum_name)?,
            total_credit: RequestValidator::required_positive("total_credit", req.total_credit)?,
            start_year: RequestValidator::required_positive("start_year", req.start_year)?,
            faculty_id: RequestValidator::required_text("faculty_id", req.faculty_id)?,
            major_id: RequestValidator::optional_text(req.major_id),
            book_id: req.book_id,
            description: RequestValidator::optional_text(req.description),
        })
    }
}

impl Entity for Curriculum {
    type Key = String;
    type Patch = Infallible;
    const NAME: &'static str = "curriculum";

    fn table() -> &'static TableDef {
        &CURRICULUMS
    }

    fn key(&self) -> String {
        self.curriculum_id.clone()
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.curriculum_id.clone().into(),
            self.curriculum_name.clone().into(),
            self.total_credit.into(),
            self.start_year.into(),
            self.faculty_id.clone().into(),
            self.major_id.clone().into(),
            self.book_id.into(),
            self.description.clone().into(),
        ]
    }

    fn apply(&mut self, patch: Infallible) {
        match patch {}
    }
}
