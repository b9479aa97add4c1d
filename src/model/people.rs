use super::{null_as_absent, Entity, Field};
use crate::config::schema::{TableDef, ADMINS, STUDENTS, TEACHERS};
use crate::error::AppError;
use crate::service::RequestValidator;
use crate::sql::SqlValue;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;

fn check_person(first_name: &str, last_name: &str, email: &str) -> Result<(), AppError> {
    RequestValidator::non_blank("first_name", first_name)?;
    RequestValidator::non_blank("last_name", last_name)?;
    RequestValidator::email("email", email)
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Student {
    pub student_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub gender_id: Option<i64>,
    pub faculty_id: Option<String>,
    pub major_id: Option<String>,
    pub degree_id: Option<i64>,
    pub status_id: Option<i64>,
    pub curriculum_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NewStudent {
    pub student_id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub gender_id: Option<i64>,
    pub faculty_id: Option<String>,
    pub major_id: Option<String>,
    pub degree_id: Option<i64>,
    pub status_id: Option<i64>,
    pub curriculum_id: Option<String>,
}

impl TryFrom<NewStudent> for Student {
    type Error = AppError;

    fn try_from(req: NewStudent) -> Result<Self, Self::Error> {
        Ok(Student {
            student_id: RequestValidator::required_text("student_id", req.student_id)?,
            first_name: RequestValidator::required_text("first_name", req.first_name)?,
            last_name: RequestValidator::required_text("last_name", req.last_name)?,
            email: RequestValidator::required_email("email", req.email)?,
            phone: RequestValidator::optional_text(req.phone),
            gender_id: req.gender_id,
            faculty_id: RequestValidator::optional_text(req.faculty_id),
            major_id: RequestValidator::optional_text(req.major_id),
            degree_id: req.degree_id,
            status_id: req.status_id,
            curriculum_id: RequestValidator::optional_text(req.curriculum_id),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct StudentPatch {
    #[serde(deserialize_with = "null_as_absent")]
    pub first_name: Field<String>,
    #[serde(deserialize_with = "null_as_absent")]
    pub last_name: Field<String>,
    #[serde(deserialize_with = "null_as_absent")]
    pub email: Field<String>,
    pub phone: Field<Option<String>>,
    pub gender_id: Field<Option<i64>>,
    pub faculty_id: Field<Option<String>>,
    pub major_id: Field<Option<String>>,
    pub degree_id: Field<Option<i64>>,
    pub status_id: Field<Option<i64>>,
    pub curriculum_id: Field<Option<String>>,
}

impl Entity for Student {
    type Key = String;
    type Patch = StudentPatch;
    const NAME: &'static str = "student";

    fn table() -> &'static TableDef {
        &STUDENTS
    }

    fn key(&self) -> String {
        self.student_id.clone()
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.student_id.clone().into(),
            self.first_name.clone().into(),
            self.last_name.clone().into(),
            self.email.clone().into(),
            self.phone.clone().into(),
            self.gender_id.into(),
            self.faculty_id.clone().into(),
            self.major_id.clone().into(),
            self.degree_id.into(),
            self.status_id.into(),
            self.curriculum_id.clone().into(),
        ]
    }

    fn apply(&mut self, patch: StudentPatch) {
        patch.first_name.merge_into(&mut self.first_name);
        patch.last_name.merge_into(&mut self.last_name);
        patch.email.merge_into(&mut self.email);
        patch.phone.merge_into(&mut self.phone);
        patch.gender_id.merge_into(&mut self.gender_id);
        patch.faculty_id.merge_into(&mut self.faculty_id);
        patch.major_id.merge_into(&mut self.major_id);
        patch.degree_id.merge_into(&mut self.degree_id);
        patch.status_id.merge_into(&mut self.status_id);
        patch.curriculum_id.merge_into(&mut self.curriculum_id);
    }

    fn check(&self) -> Result<(), AppError> {
        check_person(&self.first_name, &self.last_name, &self.email)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Teacher {
    pub teacher_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub gender_id: Option<i64>,
    pub faculty_id: Option<String>,
    pub major_id: Option<String>,
    pub position_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct NewTeacher {
    pub teacher_id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub gender_id: Option<i64>,
    pub faculty_id: Option<String>,
    pub major_id: Option<String>,
    pub position_id: Option<i64>,
}

impl TryFrom<NewTeacher> for Teacher {
    type Error = AppError;

    fn try_from(req: NewTeacher) -> Result<Self, Self::Error> {
        Ok(Teacher {
            teacher_id: RequestValidator::required_text("teacher_id", req.teacher_id)?,
            first_name: RequestValidator::required_text("first_name", req.first_name)?,
            last_name: RequestValidator::required_text("last_name", req.last_name)?,
            email: RequestValidator::required_email("email", req.email)?,
            phone: RequestValidator::optional_text(req.phone),
            gender_id: req.gender_id,
            faculty_id: RequestValidator::optional_text(req.faculty_id),
            major_id: RequestValidator::optional_text(req.major_id),
            position_id: req.position_id,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TeacherPatch {
    #[serde(deserialize_with = "null_as_absent")]
    pub first_name: Field<String>,
    #[serde(deserialize_with = "null_as_absent")]
    pub last_name: Field<String>,
    #[serde(deserialize_with = "null_as_absent")]
    pub email: Field<String>,
    pub phone: Field<Option<String>>,
    pub gender_id: Field<Option<i64>>,
    pub faculty_id: Field<Option<String>>,
    pub major_id: Field<Option<String>>,
    pub position_id: Field<Option<i64>>,
}

impl Entity for Teacher {
    type Key = String;
    type Patch = TeacherPatch;
    const NAME: &'static str = "teacher";

    fn table() -> &'static TableDef {
        &TEACHERS
    }

    fn key(&self) -> String {
        self.teacher_id.clone()
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.teacher_id.clone().into(),
            self.first_name.clone().into(),
            self.last_name.clone().into(),
            self.email.clone().into(),
            self.phone.clone().into(),
            self.gender_id.into(),
            self.faculty_id.clone().into(),
            self.major_id.clone().into(),
            self.position_id.into(),
        ]
    }

    fn apply(&mut self, patch: TeacherPatch) {
        patch.first_name.merge_into(&mut self.first_name);
        patch.last_name.merge_into(&mut self.last_name);
        patch.email.merge_into(&mut self.email);
        patch.phone.merge_into(&mut self.phone);
        patch.gender_id.merge_into(&mut self.gender_id);
        patch.faculty_id.merge_into(&mut self.faculty_id);
        patch.major_id.merge_into(&mut self.major_id);
        patch.position_id.merge_into(&mut self.position_id);
    }

    fn check(&self) -> Result<(), AppError> {
        check_person(&self.first_name, &self.last_name, &self.email)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Admin {
    pub admin_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl Entity for Admin {
    type Key = String;
    type Patch = Infallible;
    const NAME: &'static str = "admin";

    fn table() -> &'static TableDef {
        &ADMINS
    }

    fn key(&self) -> String {
        self.admin_id.clone()
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.admin_id.clone().into(),
            self.first_name.clone().into(),
            self.last_name.clone().into(),
            self.email.clone().into(),
        ]
    }

    fn apply(&mut self, patch: Infallible) {
        match patch {}
    }
}
