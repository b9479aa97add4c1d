//! Static table model: columns, keys and relations for every persisted entity.
//! Drives DDL, SQL generation and dependent-row cleanup on delete.

/// Column storage type; maps 1:1 to a PostgreSQL type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnType {
    Text,
    Integer,
    BigInt,
    /// `BIGSERIAL`: generated by the store, never written by inserts.
    Serial,
    Timestamptz,
}

impl ColumnType {
    pub fn pg_type(self) -> &'static str {
        match self {
            ColumnType::Text => "TEXT",
            ColumnType::Integer => "INTEGER",
            ColumnType::BigInt => "BIGINT",
            ColumnType::Serial => "BIGSERIAL",
            ColumnType::Timestamptz => "TIMESTAMPTZ",
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ColumnDef {
    pub name: &'static str,
    pub ty: ColumnType,
    pub nullable: bool,
    pub unique: bool,
}

impl ColumnDef {
    pub const fn required(name: &'static str, ty: ColumnType) -> Self {
        ColumnDef { name, ty, nullable: false, unique: false }
    }

    pub const fn optional(name: &'static str, ty: ColumnType) -> Self {
        ColumnDef { name, ty, nullable: true, unique: false }
    }

    pub const fn unique(name: &'static str, ty: ColumnType) -> Self {
        ColumnDef { name, ty, nullable: false, unique: true }
    }

    pub fn is_generated(&self) -> bool {
        self.ty == ColumnType::Serial
    }
}

/// What happens to referencing rows when the referenced row is deleted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OnDelete {
    /// The store rejects the delete while references exist.
    Restrict,
    /// Referencing rows are removed by the repository in the same transaction.
    Cascade,
}

#[derive(Clone, Copy, Debug)]
pub struct ForeignKey {
    pub column: &'static str,
    pub references: &'static str,
    pub ref_column: &'static str,
    pub on_delete: OnDelete,
}

#[derive(Debug)]
pub struct TableDef {
    pub name: &'static str,
    pub primary_key: &'static str,
    /// Insert/update/select order; entity `values()` follow this order.
    pub columns: &'static [ColumnDef],
    pub foreign_keys: &'static [ForeignKey],
}

impl TableDef {
    pub fn pk_column(&self) -> &ColumnDef {
        self.columns
            .iter()
            .find(|c| c.name == self.primary_key)
            .unwrap_or(&self.columns[0])
    }

    pub fn has_generated_key(&self) -> bool {
        self.pk_column().is_generated()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    /// Tables whose rows must be removed before a row of this table: (child table, FK column).
    pub fn cascade_children(&self) -> Vec<(&'static TableDef, &'static str)> {
        TABLES
            .iter()
            .flat_map(|t| {
                t.foreign_keys
                    .iter()
                    .filter(|fk| fk.references == self.name && fk.on_delete == OnDelete::Cascade)
                    .map(move |fk| (*t, fk.column))
            })
            .collect()
    }
}

use ColumnType::*;

const fn fk(column: &'static str, references: &'static str, ref_column: &'static str) -> ForeignKey {
    ForeignKey { column, references, ref_column, on_delete: OnDelete::Restrict }
}

pub static FACULTIES: TableDef = TableDef {
    name: "faculties",
    primary_key: "faculty_id",
    columns: &[
        ColumnDef::required("faculty_id", Text),
        ColumnDef::required("faculty_name", Text),
    ],
    foreign_keys: &[],
};

pub static MAJORS: TableDef = TableDef {
    name: "majors",
    primary_key: "major_id",
    columns: &[
        ColumnDef::required("major_id", Text),
        ColumnDef::required("major_name", Text),
        ColumnDef::optional("faculty_id", Text),
    ],
    foreign_keys: &[fk("faculty_id", "faculties", "faculty_id")],
};

pub static DEGREES: TableDef = TableDef {
    name: "degrees",
    primary_key: "degree_id",
    columns: &[ColumnDef::required("degree_id", Serial), ColumnDef::required("degree", Text)],
    foreign_keys: &[],
};

pub static POSITIONS: TableDef = TableDef {
    name: "positions",
    primary_key: "position_id",
    columns: &[ColumnDef::required("position_id", Serial), ColumnDef::required("position", Text)],
    foreign_keys: &[],
};

pub static STATUSES: TableDef = TableDef {
    name: "statuses",
    primary_key: "status_id",
    columns: &[ColumnDef::required("status_id", Serial), ColumnDef::required("status", Text)],
    foreign_keys: &[],
};

pub static GENDERS: TableDef = TableDef {
    name: "genders",
    primary_key: "gender_id",
    columns: &[ColumnDef::required("gender_id", Serial), ColumnDef::required("gender", Text)],
    foreign_keys: &[],
};

pub static SUBJECTS: TableDef = TableDef {
    name: "subjects",
    primary_key: "subject_id",
    columns: &[
        ColumnDef::required("subject_id", Text),
        ColumnDef::required("subject_name", Text),
        ColumnDef::required("credit", Integer),
        ColumnDef::required("major_id", Text),
    ],
    foreign_keys: &[fk("major_id", "majors", "major_id")],
};

pub static STUDY_TIMES: TableDef = TableDef {
    name: "subject_study_times",
    primary_key: "id",
    columns: &[
        ColumnDef::required("id", Serial),
        ColumnDef::required("subject_id", Text),
        ColumnDef::required("start_at", Timestamptz),
        ColumnDef::required("end_at", Timestamptz),
    ],
    foreign_keys: &[ForeignKey {
        column: "subject_id",
        references: "subjects",
        ref_column: "subject_id",
        on_delete: OnDelete::Cascade,
    }],
};

pub static BOOKS: TableDef = TableDef {
    name: "books",
    primary_key: "id",
    columns: &[
        ColumnDef::required("id", Serial),
        ColumnDef::required("original_name", Text),
        ColumnDef::unique("stored_name", Text),
        ColumnDef::required("path", Text),
        ColumnDef::required("public_path", Text),
        ColumnDef::required("mime_type", Text),
        ColumnDef::required("size", BigInt),
        ColumnDef::required("checksum", Text),
        ColumnDef::optional("note", Text),
    ],
    foreign_keys: &[],
};

pub static CURRICULUMS: TableDef = TableDef {
    name: "curriculums",
    primary_key: "curriculum_id",
    columns: &[
        ColumnDef::required("curriculum_id", Text),
        ColumnDef::required("curriculum_name", Text),
        ColumnDef::required("total_credit", Integer),
        ColumnDef::required("start_year", Integer),
        ColumnDef::required("faculty_id", Text),
        ColumnDef::optional("major_id", Text),
        ColumnDef::optional("book_id", BigInt),
        ColumnDef::optional("description", Text),
    ],
    foreign_keys: &[
        fk("faculty_id", "faculties", "faculty_id"),
        fk("major_id", "majors", "major_id"),
        fk("book_id", "books", "id"),
    ],
};

pub static STUDENTS: TableDef = TableDef {
    name: "students",
    primary_key: "student_id",
    columns: &[
        ColumnDef::required("student_id", Text),
        ColumnDef::required("first_name", Text),
        ColumnDef::required("last_name", Text),
        ColumnDef::required("email", Text),
        ColumnDef::optional("phone", Text),
        ColumnDef::optional("gender_id", BigInt),
        ColumnDef::optional("faculty_id", Text),
        ColumnDef::optional("major_id", Text),
        ColumnDef::optional("degree_id", BigInt),
        ColumnDef::optional("status_id", BigInt),
        ColumnDef::optional("curriculum_id", Text),
    ],
    foreign_keys: &[
        fk("gender_id", "genders", "gender_id"),
        fk("faculty_id", "faculties", "faculty_id"),
        fk("major_id", "majors", "major_id"),
        fk("degree_id", "degrees", "degree_id"),
        fk("status_id", "statuses", "status_id"),
        fk("curriculum_id", "curriculums", "curriculum_id"),
    ],
};

pub static TEACHERS: TableDef = TableDef {
    name: "teachers",
    primary_key: "teacher_id",
    columns: &[
        ColumnDef::required("teacher_id", Text),
        ColumnDef::required("first_name", Text),
        ColumnDef::required("last_name", Text),
        ColumnDef::required("email", Text),
        ColumnDef::optional("phone", Text),
        ColumnDef::optional("gender_id", BigInt),
        ColumnDef::optional("faculty_id", Text),
        ColumnDef::optional("major_id", Text),
        ColumnDef::optional("position_id", BigInt),
    ],
    foreign_keys: &[
        fk("gender_id", "genders", "gender_id"),
        fk("faculty_id", "faculties", "faculty_id"),
        fk("major_id", "majors", "major_id"),
        fk("position_id", "positions", "position_id"),
    ],
};

pub static ADMINS: TableDef = TableDef {
    name: "admins",
    primary_key: "admin_id",
    columns: &[
        ColumnDef::required("admin_id", Text),
        ColumnDef::required("first_name", Text),
        ColumnDef::required("last_name", Text),
        ColumnDef::required("email", Text),
    ],
    foreign_keys: &[],
};

/// Every table, referenced tables before referencing ones.
pub static TABLES: &[&TableDef] = &[
    &FACULTIES,
    &MAJORS,
    &DEGREES,
    &POSITIONS,
    &STATUSES,
    &GENDERS,
    &SUBJECTS,
    &STUDY_TIMES,
    &BOOKS,
    &CURRICULUMS,
    &STUDENTS,
    &TEACHERS,
    &ADMINS,
];
