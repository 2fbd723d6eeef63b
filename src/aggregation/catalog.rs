//! Product catalog and filter option lookups

use crate::error::{AnalyticsError, NotFoundError};
use crate::executor::{ExecutorResult, Row};
use crate::filter::InvalidFilterError;
use crate::planner::{Pagination, Predicate, QueryPlan, Relation, SortDirection};
use crate::result::{
    AssemblyContext, CatalogProduct, OptionEntry, ProductListDocument, RawRowsets,
};

use super::products::NONE_LABEL;
use super::request::AggregationRequest;

pub(crate) const CATALOG_PAGE: &str = "catalog_page";
pub(crate) const CATALOG_COUNT: &str = "catalog_count";
pub(crate) const PRODUCT_BY_ID: &str = "product_by_id";
pub(crate) const STORE_OPTIONS: &str = "store_options";
pub(crate) const CHANNEL_OPTIONS: &str = "channel_options";

const CATALOG: &str = "products p LEFT JOIN categories c ON p.category_id = c.id";

pub(crate) fn plans(request: &AggregationRequest) -> Vec<QueryPlan> {
    let filter = request.filter();
    vec![
        QueryPlan::compose(CATALOG_PAGE, "p.id, p.name, c.name", CATALOG, filter)
            .order_by("p.id", SortDirection::Asc)
            .paginate(request.pagination()),
        QueryPlan::compose(CATALOG_COUNT, "COUNT(*)", CATALOG, filter),
    ]
}

pub(crate) fn assemble(
    context: &AssemblyContext,
    rowsets: &RawRowsets,
) -> ExecutorResult<ProductListDocument> {
    let produtos = rowsets
        .rows(CATALOG_PAGE)
        .iter()
        .map(catalog_product)
        .collect::<ExecutorResult<Vec<_>>>()?;

    let total_registros = match rowsets.first(CATALOG_COUNT) {
        Some(row) => row.count(0)?,
        None => 0,
    };

    Ok(ProductListDocument {
        produtos,
        pagina: context.page,
        limit: context.limit,
        total_paginas: Pagination::total_pages(total_registros, context.limit),
        total_registros,
    })
}

/// Single product lookup; rejects non-positive identifiers
pub fn product_plan(id: i64) -> Result<QueryPlan, InvalidFilterError> {
    if id <= 0 {
        return Err(InvalidFilterError::new(
            "produto_id",
            format!("identifier must be positive, got {}", id),
        ));
    }
    Ok(
        QueryPlan::new(PRODUCT_BY_ID, "p.id, p.name, c.name", Relation::Table(CATALOG))
            .with_predicate(Predicate::new("p.id = ?", id))
            .paginate(Pagination::first(1)),
    )
}

pub(crate) fn product_from_rows(id: i64, rows: &[Row]) -> Result<CatalogProduct, AnalyticsError> {
    match rows.first() {
        Some(row) => Ok(catalog_product(row)?),
        None => Err(NotFoundError::new("product", id).into()),
    }
}

pub fn store_options_plan() -> QueryPlan {
    QueryPlan::new(STORE_OPTIONS, "st.id, st.name", Relation::Table("stores st"))
        .order_by("st.name", SortDirection::Asc)
        .order_by("st.id", SortDirection::Asc)
}

pub fn channel_options_plan() -> QueryPlan {
    QueryPlan::new(CHANNEL_OPTIONS, "ch.id, ch.name", Relation::Table("channels ch"))
        .order_by("ch.name", SortDirection::Asc)
        .order_by("ch.id", SortDirection::Asc)
}

pub(crate) fn options_from_rows(rows: &[Row]) -> ExecutorResult<Vec<OptionEntry>> {
    rows.iter()
        .map(|row| {
            Ok(OptionEntry {
                id: row.int(0)?,
                nome: row.text_or(1, "")?,
            })
        })
        .collect()
}

fn catalog_product(row: &Row) -> ExecutorResult<CatalogProduct> {
    Ok(CatalogProduct {
        id: row.int(0)?,
        produto: row.text_or(1, "")?,
        categoria: row.text_or(2, NONE_LABEL)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::SqlValue;

    #[test]
    fn test_product_plan_binds_id() {
        let rendered = product_plan(42).unwrap().render();
        assert!(rendered.sql.contains("WHERE p.id = $1"));
        assert!(rendered.sql.ends_with("LIMIT 1 OFFSET 0"));
        assert_eq!(rendered.params, vec![SqlValue::Int(42)]);
    }

    #[test]
    fn test_non_positive_product_id_rejected() {
        assert!(product_plan(0).is_err());
        assert!(product_plan(-3).is_err());
    }

    #[test]
    fn test_missing_product_is_not_found() {
        let err = product_from_rows(7, &[]).unwrap_err();
        assert_eq!(err.code(), "ANALYTICS_NOT_FOUND");
    }

    #[test]
    fn test_null_category_renders_dash() {
        let row = Row::new(vec![SqlValue::Int(1), SqlValue::Text("Suco".into()), SqlValue::Null]);
        assert_eq!(catalog_product(&row).unwrap().categoria, "-");
    }
}
