//! Lookup tables referenced by subjects, students, teachers and curriculums.

use super::Entity;
use crate::config::schema::{TableDef, DEGREES, FACULTIES, GENDERS, MAJORS, POSITIONS, STATUSES};
use crate::error::AppError;
use crate::service::RequestValidator;
use crate::sql::SqlValue;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Faculty {
    pub faculty_id: String,
    pub faculty_name: String,
}

#[derive(Debug, Deserialize)]
pub struct NewFaculty {
    pub faculty_id: Option<String>,
    pub faculty_name: Option<String>,
}

impl TryFrom<NewFaculty> for Faculty {
    type Error = AppError;

    fn try_from(req: NewFaculty) -> Result<Self, Self::Error> {
        Ok(Faculty {
            faculty_id: RequestValidator::required_text("faculty_id", req.faculty_id)?,
            faculty_name: RequestValidator::required_text("faculty_name", req.faculty_name)?,
        })
    }
}

impl Entity for Faculty {
    type Key = String;
    type Patch = Infallible;
    const NAME: &'static str = "faculty";

    fn table() -> &'static TableDef {
        &FACULTIES
    }

    fn key(&self) -> String {
        self.faculty_id.clone()
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![self.faculty_id.clone().into(), self.faculty_name.clone().into()]
    }

    fn apply(&mut self, patch: Infallible) {
        match patch {}
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Major {
    pub major_id: String,
    pub major_name: String,
    pub faculty_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NewMajor {
    pub major_id: Option<String>,
    pub major_name: Option<String>,
    pub faculty_id: Option<String>,
}

impl TryFrom<NewMajor> for Major {
    type Error = AppError;

    fn try_from(req: NewMajor) -> Result<Self, Self::Error> {
        Ok(Major {
            major_id: RequestValidator::required_text("major_id", req.major_id)?,
            major_name: RequestValidator::required_text("major_name", req.major_name)?,
            faculty_id: RequestValidator::optional_text(req.faculty_id),
        })
    }
}

impl Entity for Major {
    type Key = String;
    type Patch = Infallible;
    const NAME: &'static str = "major";

    fn table() -> &'static TableDef {
        &MAJORS
    }

    fn key(&self) -> String {
        self.major_id.clone()
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.major_id.clone().into(),
            self.major_name.clone().into(),
            self.faculty_id.clone().into(),
        ]
    }

    fn apply(&mut self, patch: Infallible) {
        match patch {}
    }
}

/// Tables holding a generated id and a single display label.
macro_rules! label_table {
    ($ty:ident, $new:ident, $table:ident, $name:literal, $id:ident, $label:ident) => {
        #[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
        pub struct $ty {
            pub $id: i64,
            pub $label: String,
        }

        #[derive(Debug, Deserialize)]
        pub struct $new {
            pub $label: Option<String>,
        }

        impl $ty {
            /// Unsaved row; the store assigns the id.
            pub fn labelled(label: impl Into<String>) -> Self {
                $ty { $id: 0, $label: label.into() }
            }
        }

        impl TryFrom<$new> for $ty {
            type Error = AppError;

            fn try_from(req: $new) -> Result<Self, Self::Error> {
                Ok($ty::labelled(RequestValidator::required_text(stringify!($label), req.$label)?))
            }
        }

        impl Entity for $ty {
            type Key = i64;
            type Patch = Infallible;
            const NAME: &'static str = $name;

            fn table() -> &'static TableDef {
                &$table
            }

            fn key(&self) -> i64 {
                self.$id
            }

            fn values(&self) -> Vec<SqlValue> {
                vec![self.$id.into(), self.$label.clone().into()]
            }

            fn apply(&mut self, patch: Infallible) {
                match patch {}
            }
        }
    };
}

label_table!(Degree, NewDegree, DEGREES, "degree", degree_id, degree);
label_table!(Position, NewPosition, POSITIONS, "position", position_id, position);
label_table!(Status, NewStatus, STATUSES, "status", status_id, status);
label_table!(Gender, NewGender, GENDERS, "gender", gender_id, gender);
