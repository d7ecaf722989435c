use chrono::Utc;
use sea_orm::{
    entity::prelude::*,
    sea_query::{Expr, Func, LikeExpr},
    Condition, ConnectionTrait, DbBackend, QueryOrder, Set,
};
use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::ModelError;
use crate::validation::{self, InputValue, ValidationErrors};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub course: String,
    pub email: String,
    pub phone: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Create/update request body. Every field is optional at this stage so that
/// a missing field surfaces as a validation error rather than a parse error.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StudentInput {
    #[serde(default)]
    pub name: Option<InputValue>,
    #[serde(default)]
    pub course: Option<InputValue>,
    #[serde(default)]
    pub email: Option<InputValue>,
    #[serde(default)]
    pub phone: Option<InputValue>,
}

impl StudentInput {
    pub fn new(name: &str, course: &str, email: &str, phone: &str) -> Self {
        Self {
            name: Some(name.into()),
            course: Some(course.into()),
            email: Some(email.into()),
            phone: Some(phone.into()),
        }
    }

    /// Apply every field rule, collecting all violations.
    pub fn validate(&self) -> Result<ValidStudent, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let name = validation::text_field(&mut errors, "name", self.name.as_ref());
        let course = validation::text_field(&mut errors, "course", self.course.as_ref());
        let email = validation::email_field(&mut errors, "email", self.email.as_ref());
        let phone = validation::digits_field(&mut errors, "phone", self.phone.as_ref());
        match (name, course, email, phone) {
            (Some(name), Some(course), Some(email), Some(phone)) if errors.is_empty() => {
                Ok(ValidStudent { name, course, email, phone })
            }
            _ => Err(errors),
        }
    }
}

/// Field set that has passed validation. Only this type reaches the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidStudent {
    pub name: String,
    pub course: String,
    pub email: String,
    pub phone: String,
}

/// Substring filters for search. Absent or blank filters impose no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SearchFilters {
    #[serde(default, deserialize_with = "filter_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "filter_text")]
    pub course: Option<String>,
    #[serde(default, deserialize_with = "filter_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "filter_text")]
    pub phone: Option<String>,
}

fn filter_text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    let raw = Option::<InputValue>::deserialize(d)?;
    Ok(raw.and_then(|v| v.normalized_text()))
}

impl SearchFilters {
    /// Provided filters paired with the column they constrain.
    pub fn active(&self) -> Vec<(Column, &str)> {
        [
            (Column::Name, &self.name),
            (Column::Course, &self.course),
            (Column::Email, &self.email),
            (Column::Phone, &self.phone),
        ]
        .into_iter()
        .filter_map(|(col, v)| v.as_deref().map(|v| (col, v)))
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.active().is_empty()
    }

    /// SQL condition: case-insensitive `LIKE %value%` per filter, ANDed.
    /// `%`, `_` and `\` in the value match literally.
    pub fn condition(&self) -> Condition {
        self.active().into_iter().fold(Condition::all(), |cond, (col, value)| {
            let pattern = format!("%{}%", escape_like(&value.to_lowercase()));
            cond.add(
                Expr::expr(Func::lower(Expr::col((Entity, col))))
                    .like(LikeExpr::new(pattern).escape('\\')),
            )
        })
    }

    /// In-memory equivalent of [`SearchFilters::condition`].
    pub fn matches(&self, m: &Model) -> bool {
        self.active().into_iter().all(|(col, value)| {
            let haystack = match col {
                Column::Name => &m.name,
                Column::Course => &m.course,
                Column::Email => &m.email,
                Column::Phone => &m.phone,
                _ => return false,
            };
            haystack.to_lowercase().contains(&value.to_lowercase())
        })
    }
}

fn escape_like(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

pub async fn create<C: ConnectionTrait>(db: &C, input: &ValidStudent) -> Result<Model, ModelError> {
    let now = Utc::now().into();
    let am = ActiveModel {
        name: Set(input.name.clone()),
        course: Set(input.course.clone()),
        email: Set(input.email.clone()),
        phone: Set(input.phone.clone()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

/// Overwrite all four mutable fields of an existing row.
pub async fn overwrite<C: ConnectionTrait>(db: &C, existing: Model, input: &ValidStudent) -> Result<Model, ModelError> {
    let mut am: ActiveModel = existing.into();
    am.name = Set(input.name.clone());
    am.course = Set(input.course.clone());
    am.email = Set(input.email.clone());
    am.phone = Set(input.phone.clone());
    am.updated_at = Set(Utc::now().into());
    Ok(am.update(db).await?)
}

/// Rows matching every filter, ascending by id.
///
/// SQLite's `LOWER` only folds ASCII, so on that backend the filters are
/// applied with [`SearchFilters::matches`] instead of in SQL.
pub async fn search<C: ConnectionTrait>(db: &C, filters: &SearchFilters) -> Result<Vec<Model>, ModelError> {
    let query = Entity::find().order_by_asc(Column::Id);
    let rows = match db.get_database_backend() {
        DbBackend::Sqlite => query
            .all(db)
            .await?
            .into_iter()
            .filter(|m| filters.matches(m))
            .collect(),
        _ => query.filter(filters.condition()).all(db).await?,
    };
    Ok(rows)
}
