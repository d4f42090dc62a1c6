//! Typed search predicates.
//!
//! Repositories describe what to match with [`Filter`] values; this module
//! turns them into a sea-orm [`Condition`]. The same condition feeds both
//! the count query and the page query.

use sea_orm::{ColumnTrait, Condition, Value};

#[derive(Debug, Clone)]
pub enum Filter<C> {
    Equals(C, Value),
    NotEquals(C, Value),
    /// Substring match (`LIKE '%value%'`)
    Contains(C, String),
    /// Matches when any member matches.
    Or(Vec<Filter<C>>),
}

impl<C: ColumnTrait> Filter<C> {
    pub fn eq(column: C, value: impl Into<Value>) -> Self {
        Filter::Equals(column, value.into())
    }

    pub fn ne(column: C, value: impl Into<Value>) -> Self {
        Filter::NotEquals(column, value.into())
    }

    /// Free-text criterion: substring unless `exact` is requested.
    pub fn text(column: C, value: impl Into<String>, exact: bool) -> Self {
        let value = value.into();
        if exact {
            Filter::Equals(column, value.into())
        } else {
            Filter::Contains(column, value)
        }
    }

    pub fn any(filters: Vec<Filter<C>>) -> Self {
        Filter::Or(filters)
    }

    pub fn into_condition(self) -> Condition {
        match self {
            Filter::Equals(column, value) => Condition::all().add(column.eq(value)),
            Filter::NotEquals(column, value) => Condition::all().add(column.ne(value)),
            Filter::Contains(column, value) => Condition::all().add(column.contains(value)),
            Filter::Or(filters) => filters
                .into_iter()
                .fold(Condition::any(), |cond, f| cond.add(f.into_condition())),
        }
    }
}

/// AND of every filter; an empty list matches everything.
pub fn all_of<C: ColumnTrait>(filters: Vec<Filter<C>>) -> Condition {
    filters
        .into_iter()
        .fold(Condition::all(), |cond, f| cond.add(f.into_condition()))
}

#[cfg(test)]
mod tests {
    use sea_orm::{DbBackend, EntityTrait, QueryFilter, QueryTrait};

    use super::*;
    use crate::entities::clientes::{Column, Entity};

    fn sql(condition: Condition) -> String {
        Entity::find()
            .filter(condition)
            .build(DbBackend::Sqlite)
            .to_string()
    }

    #[test]
    fn text_filters_switch_on_exact() {
        assert!(matches!(
            Filter::text(Column::Nombre, "ana", false),
            Filter::Contains(Column::Nombre, ref s) if s == "ana"
        ));
        assert!(matches!(
            Filter::text(Column::Nombre, "ana", true),
            Filter::Equals(Column::Nombre, ref v) if *v == Value::from("ana")
        ));
    }

    #[test]
    fn filters_are_anded_and_or_groups_nest() {
        let condition = all_of(vec![
            Filter::eq(Column::Cedula, "123"),
            Filter::any(vec![
                Filter::text(Column::Nombre, "ana", false),
                Filter::text(Column::Apellidos, "ana", false),
            ]),
            Filter::ne(Column::IdCliente, 5i64),
        ]);
        let rendered = sql(condition);
        assert!(rendered.contains(r#""clientes"."cedula" = '123'"#), "{rendered}");
        assert!(
            rendered.contains(r#""clientes"."nombre" LIKE '%ana%' OR "clientes"."apellidos" LIKE '%ana%'"#),
            "{rendered}"
        );
        assert!(rendered.contains(r#""clientes"."id_cliente" <> 5"#), "{rendered}");
    }

    #[test]
    fn empty_filter_list_matches_everything() {
        let condition = all_of::<Column>(Vec::new());
        assert!(condition.is_empty());
        let rendered = sql(condition);
        let predicate = rendered
            .split_once(" WHERE ")
            .map(|(_, predicate)| predicate.trim());
        assert!(matches!(predicate, None | Some("TRUE")), "{rendered}");
    }
}
