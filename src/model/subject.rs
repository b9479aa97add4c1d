use super::{null_as_absent, Entity, Field};
use crate::config::schema::{TableDef, STUDY_TIMES, SUBJECTS};
use crate::error::AppError;
use crate::service::RequestValidator;
use crate::sql::SqlValue;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Subject {
    pub subject_id: String,
    pub subject_name: String,
    pub credit: i32,
    pub major_id: String,
}

/// POST /subjects body. Every field is required.
#[derive(Debug, Deserialize)]
pub struct NewSubject {
    pub subject_id: Option<String>,
    pub subject_name: Option<String>,
    pub credit: Option<i32>,
    pub major_id: Option<String>,
}

impl TryFrom<NewSubject> for Subject {
    type Error = AppError;

    fn try_from(req: NewSubject) -> Result<Self, Self::Error> {
        Ok(Subject {
            subject_id: RequestValidator::required_text("subject_id", req.subject_id)?,
            subject_name: RequestValidator::required_text("subject_name", req.subject_name)?,
            credit: RequestValidator::required_positive("credit", req.credit)?,
            major_id: RequestValidator::required_text("major_id", req.major_id)?,
        })
    }
}

/// PUT /subjects/:id body. The key itself cannot be changed.
#[derive(Debug, Default, Deserialize)]
pub struct SubjectPatch {
    #[serde(default, deserialize_with = "null_as_absent")]
    pub subject_name: Field<String>,
    #[serde(default, deserialize_with = "null_as_absent")]
    pub credit: Field<i32>,
    #[serde(default, deserialize_with = "null_as_absent")]
    pub major_id: Field<String>,
}

impl Entity for Subject {
    type Key = String;
    type Patch = SubjectPatch;
    const NAME: &'static str = "subject";

    fn table() -> &'static TableDef {
        &SUBJECTS
    }

    fn key(&self) -> String {
        self.subject_id.clone()
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.subject_id.clone().into(),
            self.subject_name.clone().into(),
            self.credit.into(),
            self.major_id.clone().into(),
        ]
    }

    fn apply(&mut self, patch: SubjectPatch) {
        patch.subject_name.merge_into(&mut self.subject_name);
        patch.credit.merge_into(&mut self.credit);
        patch.major_id.merge_into(&mut self.major_id);
    }

    fn check(&self) -> Result<(), AppError> {
        RequestValidator::non_blank("subject_name", &self.subject_name)?;
        RequestValidator::positive("credit", self.credit)?;
        RequestValidator::non_blank("major_id", &self.major_id)
    }
}

/// One teaching slot of a subject.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct StudyTime {
    pub id: i64,
    pub subject_id: String,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct NewStudyTime {
    #[serde(alias = "start_at")]
    pub start: Option<DateTime<Utc>>,
    #[serde(alias = "end_at")]
    pub end: Option<DateTime<Utc>>,
}

impl NewStudyTime {
    /// The owning subject comes from the path, never from the body.
    pub fn for_subject(self, subject_id: String) -> Result<StudyTime, AppError> {
        let time = StudyTime {
            id: 0,
            subject_id,
            start_at: RequestValidator::required("start", self.start)?,
            end_at: RequestValidator::required("end", self.end)?,
        };
        time.check()?;
        Ok(time)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct StudyTimePatch {
    #[serde(default, alias = "start_at", deserialize_with = "null_as_absent")]
    pub start: Field<DateTime<Utc>>,
    #[serde(default, alias = "end_at", deserialize_with = "null_as_absent")]
    pub end: Field<DateTime<Utc>>,
}

impl Entity for StudyTime {
    type Key = i64;
    type Patch = StudyTimePatch;
    const NAME: &'static str = "study time";

    fn table() -> &'static TableDef {
        &STUDY_TIMES
    }

    fn key(&self) -> i64 {
        self.id
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.id.into(),
            self.subject_id.clone().into(),
            self.start_at.into(),
            self.end_at.into(),
        ]
    }

    fn apply(&mut self, patch: StudyTimePatch) {
        patch.start.merge_into(&mut self.start_at);
        patch.end.merge_into(&mut self.end_at);
    }

    fn check(&self) -> Result<(), AppError> {
        if self.end_at <= self.start_at {
            return Err(AppError::BadRequest("end must be after start".into()));
        }
        Ok(())
    }
}
