//! Query plan structures
//!
//! All SQL text held by a plan is `&'static str`. Filter values only enter
//! through `Predicate` parameters.

use crate::executor::SqlValue;
use crate::filter::FilterSpec;

use super::clauses;
use super::pagination::Pagination;

/// One `WHERE` clause with exactly one `?` placeholder
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    template: &'static str,
    param: SqlValue,
}

impl Predicate {
    pub fn new(template: &'static str, param: impl Into<SqlValue>) -> Self {
        debug_assert_eq!(template.matches('?').count(), 1);
        Self {
            template,
            param: param.into(),
        }
    }

    pub fn template(&self) -> &'static str {
        self.template
    }

    pub fn param(&self) -> &SqlValue {
        &self.param
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// `FROM` target of a plan
#[derive(Debug, Clone, PartialEq)]
pub enum Relation {
    /// Table or join expression
    Table(&'static str),
    /// Join expression around a subquery; `{inner}` marks where it goes
    Derived {
        template: &'static str,
        inner: Box<QueryPlan>,
    },
}

impl Relation {
    pub fn derived(template: &'static str, inner: QueryPlan) -> Self {
        debug_assert!(template.contains("{inner}"));
        Relation::Derived {
            template,
            inner: Box::new(inner),
        }
    }
}

/// A parameterized, executable description of one query
#[derive(Debug, Clone, PartialEq)]
pub struct QueryPlan {
    pub(super) label: &'static str,
    pub(super) projection: &'static str,
    pub(super) relation: Relation,
    pub(super) predicates: Vec<Predicate>,
    pub(super) grouping: Vec<&'static str>,
    pub(super) ordering: Vec<(&'static str, SortDirection)>,
    pub(super) pagination: Option<Pagination>,
}

impl QueryPlan {
    pub fn new(label: &'static str, projection: &'static str, relation: Relation) -> Self {
        Self {
            label,
            projection,
            relation,
            predicates: Vec::new(),
            grouping: Vec::new(),
            ordering: Vec::new(),
            pagination: None,
        }
    }

    /// Shorthand for a plan over a plain relation, filtered
    pub fn compose(
        label: &'static str,
        projection: &'static str,
        relation: &'static str,
        filter: &FilterSpec,
    ) -> Self {
        Self::new(label, projection, Relation::Table(relation)).filtered_by(filter)
    }

    /// Append the canonical clauses for every present filter field
    pub fn filtered_by(mut self, filter: &FilterSpec) -> Self {
        self.predicates.extend(clauses::predicates_for(filter));
        self
    }

    pub fn with_predicate(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    pub fn group_by(mut self, keys: &[&'static str]) -> Self {
        self.grouping.extend_from_slice(keys);
        self
    }

    pub fn order_by(mut self, key: &'static str, direction: SortDirection) -> Self {
        self.ordering.push((key, direction));
        self
    }

    pub fn paginate(mut self, pagination: Pagination) -> Self {
        self.pagination = Some(pagination);
        self
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn pagination(&self) -> Option<Pagination> {
        self.pagination
    }

    /// Inner plan of a derived relation
    pub fn inner(&self) -> Option<&QueryPlan> {
        match &self.relation {
            Relation::Table(_) => None,
            Relation::Derived { inner, .. } => Some(inner),
        }
    }
}
