//! Product analytics
//!
//! Plans over product lines (`product_sales` joined to its sale, product
//! and category):
//!
//! - `product_page`: paginated per-product aggregate
//! - `product_count`: distinct products, for pagination
//! - `product_ranking`: the same aggregate over the full filtered set
//! - `product_kpis`: line-level totals and average cost share
//! - `category_mix`: revenue per category
//! - `product_revenue_daily`: daily revenue series
//!
//! Cost is modeled as `base_price × ASSUMED_COST_RATIO`. Rankings always use
//! the full set, never the current page.

use std::cmp::Ordering;

use rust_decimal::Decimal;

use crate::executor::{ExecutorResult, Row};
use crate::planner::{Pagination, QueryPlan, SortDirection};
use crate::result::{
    apportion_percentages, percentage, AssemblyContext, CategoryShare, IsoDate,
    MenuEngineeringEntry, Money, Percent, ProductKpis, ProductPerformance,
    ProductsAnalyticDocument, RawRowsets, RevenuePoint,
};

use super::request::AggregationRequest;

pub(crate) const PRODUCT_PAGE: &str = "product_page";
pub(crate) const PRODUCT_COUNT: &str = "product_count";
pub(crate) const PRODUCT_RANKING: &str = "product_ranking";
pub(crate) const PRODUCT_KPIS: &str = "product_kpis";
pub(crate) const CATEGORY_MIX: &str = "category_mix";
pub(crate) const PRODUCT_REVENUE_DAILY: &str = "product_revenue_daily";

/// Share of base price assumed to be cost (0.6)
pub const ASSUMED_COST_RATIO: Decimal = Decimal::from_parts(6, 0, 0, false, 1);

/// Entries in `top_vendidos`
pub const TOP_SELLERS_LIMIT: usize = 10;

/// Placeholder for a missing category or product
pub const NONE_LABEL: &str = "-";

const PRODUCT_LINES: &str = "product_sales ps \
     JOIN sales s ON ps.sale_id = s.id \
     JOIN products p ON ps.product_id = p.id \
     LEFT JOIN categories c ON p.category_id = c.id";

const PER_PRODUCT: &str = "p.id, p.name, c.name AS categoria, \
     COALESCE(SUM(ps.quantity), 0) AS qtde, \
     COALESCE(SUM(ps.total_price), 0) AS faturamento, \
     COALESCE(SUM(ps.quantity * ps.base_price), 0) AS custo_base";

pub(crate) fn plans(request: &AggregationRequest) -> Vec<QueryPlan> {
    let filter = request.filter();
    let per_product = |label: &'static str| {
        QueryPlan::compose(label, PER_PRODUCT, PRODUCT_LINES, filter)
            .group_by(&["p.id", "p.name", "c.name"])
            .order_by("faturamento", SortDirection::Desc)
            .order_by("p.id", SortDirection::Asc)
    };

    vec![
        per_product(PRODUCT_PAGE).paginate(request.pagination()),
        QueryPlan::compose(PRODUCT_COUNT, "COUNT(DISTINCT p.id)", PRODUCT_LINES, filter),
        per_product(PRODUCT_RANKING),
        QueryPlan::compose(
            PRODUCT_KPIS,
            "COALESCE(SUM(ps.quantity), 0) AS total_itens, \
             COALESCE(SUM(ps.total_price), 0) AS faturamento_total, \
             AVG(ps.quantity * ps.base_price / NULLIF(ps.total_price, 0)) AS participacao_custo",
            PRODUCT_LINES,
            filter,
        ),
        QueryPlan::compose(
            CATEGORY_MIX,
            "c.id, c.name, COALESCE(SUM(ps.total_price), 0) AS faturamento",
            PRODUCT_LINES,
            filter,
        )
        .group_by(&["c.id", "c.name"])
        .order_by("faturamento", SortDirection::Desc)
        .order_by("c.id", SortDirection::Asc),
        QueryPlan::compose(
            PRODUCT_REVENUE_DAILY,
            "DATE(s.created_at) AS data, COALESCE(SUM(ps.total_price), 0) AS valor",
            PRODUCT_LINES,
            filter,
        )
        .group_by(&["DATE(s.created_at)"])
        .order_by("data", SortDirection::Asc),
    ]
}

/// Cost and margin figures for one product
pub fn performance(
    id: i64,
    name: String,
    category: String,
    quantity: i64,
    revenue: Decimal,
    base_cost: Decimal,
) -> ProductPerformance {
    let cost = base_cost * ASSUMED_COST_RATIO;
    let margin = revenue - cost;
    ProductPerformance {
        id,
        produto: name,
        categoria: category,
        qtde: quantity,
        faturamento: Money::new(revenue),
        custo: Money::new(cost),
        margem_percentual: percentage(margin, revenue),
        margem_total: Money::new(margin),
    }
}

fn performance_row(row: &Row) -> ExecutorResult<ProductPerformance> {
    Ok(performance(
        row.int(0)?,
        row.text_or(1, NONE_LABEL)?,
        row.text_or(2, NONE_LABEL)?,
        row.truncated_or_zero(3)?,
        row.decimal_or_zero(4)?,
        row.decimal_or_zero(5)?,
    ))
}

fn by_quantity(a: &ProductPerformance, b: &ProductPerformance) -> Ordering {
    b.qtde.cmp(&a.qtde).then(a.id.cmp(&b.id))
}

fn by_margin(a: &ProductPerformance, b: &ProductPerformance) -> Ordering {
    b.margem_total.cmp(&a.margem_total).then(a.id.cmp(&b.id))
}

fn by_revenue(a: &ProductPerformance, b: &ProductPerformance) -> Ordering {
    b.faturamento.cmp(&a.faturamento).then(a.id.cmp(&b.id))
}

/// `(1 - ratio × average line cost share) × 100`
fn average_margin(cost_share: Option<Decimal>) -> Percent {
    match cost_share {
        Some(share) => {
            Percent::new((Decimal::ONE - ASSUMED_COST_RATIO * share) * Decimal::ONE_HUNDRED)
        }
        None => Percent::zero(),
    }
}

pub(crate) fn assemble(
    context: &AssemblyContext,
    rowsets: &RawRowsets,
) -> ExecutorResult<ProductsAnalyticDocument> {
    let produtos = rowsets
        .rows(PRODUCT_PAGE)
        .iter()
        .map(performance_row)
        .collect::<ExecutorResult<Vec<_>>>()?;

    let total_registros = match rowsets.first(PRODUCT_COUNT) {
        Some(row) => row.count(0)?,
        None => 0,
    };

    let mut ranking = rowsets
        .rows(PRODUCT_RANKING)
        .iter()
        .map(performance_row)
        .collect::<ExecutorResult<Vec<_>>>()?;

    let produto_mais_lucrativo = ranking
        .iter()
        .min_by(|a, b| by_margin(a, b))
        .map(|p| p.produto.clone())
        .unwrap_or_else(|| NONE_LABEL.to_string());

    ranking.sort_by(by_quantity);
    let produto_mais_vendido = ranking
        .first()
        .map(|p| p.produto.clone())
        .unwrap_or_else(|| NONE_LABEL.to_string());
    let top_vendidos: Vec<ProductPerformance> =
        ranking.iter().take(TOP_SELLERS_LIMIT).cloned().collect();

    ranking.sort_by(by_revenue);
    let menu_engineering = ranking.iter().map(MenuEngineeringEntry::from).collect();

    let kpis = match rowsets.first(PRODUCT_KPIS) {
        Some(row) => ProductKpis {
            total_itens: row.truncated_or_zero(0)?,
            faturamento_total: Money::new(row.decimal_or_zero(1)?),
            margem_media: average_margin(row.decimal_opt(2)?),
            produto_mais_vendido,
            produto_mais_lucrativo,
        },
        None => ProductKpis {
            total_itens: 0,
            faturamento_total: Money::zero(),
            margem_media: Percent::zero(),
            produto_mais_vendido,
            produto_mais_lucrativo,
        },
    };

    let mix_rows = rowsets.rows(CATEGORY_MIX);
    let mix_revenue = mix_rows
        .iter()
        .map(|row| row.decimal_or_zero(2))
        .collect::<ExecutorResult<Vec<_>>>()?;
    let mix_categorias = mix_rows
        .iter()
        .zip(apportion_percentages(&mix_revenue))
        .map(|(row, percentual)| {
            Ok(CategoryShare {
                categoria: row.text_or(1, NONE_LABEL)?,
                percentual,
            })
        })
        .collect::<ExecutorResult<Vec<_>>>()?;

    let mut evolucao_vendas = Vec::new();
    for row in rowsets.rows(PRODUCT_REVENUE_DAILY) {
        if let Some(day) = row.date_opt(0)? {
            evolucao_vendas.push(RevenuePoint {
                data: IsoDate(day),
                valor: Money::new(row.decimal_or_zero(1)?),
            });
        }
    }

    Ok(ProductsAnalyticDocument {
        pagina: context.page,
        limit: context.limit,
        total_paginas: Pagination::total_pages(total_registros, context.limit),
        total_registros,
        produtos,
        kpis,
        top_vendidos,
        menu_engineering,
        mix_categorias,
        evolucao_vendas,
    })
}
