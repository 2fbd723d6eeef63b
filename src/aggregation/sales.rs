//! Sales dashboard
//!
//! Plans: `kpis`, `daily_revenue`, `channel_sales`, `order_listing`
//! (paginated, newest first), `weekday_sales` and `hourly_sales`.
//! `total_registros` is the KPI order count, which shares the listing's
//! filter.

use crate::executor::{ExecutionError, ExecutorResult, Row};
use crate::planner::{Pagination, QueryPlan, SortDirection};
use crate::result::{
    AssemblyContext, ChannelSales, HourlySales, IsoTimestamp, Money, OrderEntry, RawRowsets,
    SalesDashboardDocument, WeekdaySales,
};

use super::kpis::{self, DAILY_REVENUE, KPIS, SALES};
use super::request::AggregationRequest;

pub(crate) const CHANNEL_SALES: &str = "channel_sales";
pub(crate) const ORDER_LISTING: &str = "order_listing";
pub(crate) const WEEKDAY_SALES: &str = "weekday_sales";
pub(crate) const HOURLY_SALES: &str = "hourly_sales";

/// Day names indexed by DOW (0 = Sunday)
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Domingo",
    "Segunda-feira",
    "Terça-feira",
    "Quarta-feira",
    "Quinta-feira",
    "Sexta-feira",
    "Sábado",
];

pub const UNKNOWN_CHANNEL: &str = "Desconhecido";
pub const UNKNOWN_CUSTOMER: &str = "Cliente não identificado";

pub(crate) fn plans(request: &AggregationRequest) -> Vec<QueryPlan> {
    let filter = request.filter();
    vec![
        kpis::kpi_plan(filter),
        kpis::daily_revenue_plan(filter),
        QueryPlan::compose(
            CHANNEL_SALES,
            "ch.id, ch.name, COUNT(*) AS total",
            "sales s LEFT JOIN channels ch ON s.channel_id = ch.id",
            filter,
        )
        .group_by(&["ch.id", "ch.name"])
        .order_by("total", SortDirection::Desc)
        .order_by("ch.id", SortDirection::Asc),
        QueryPlan::compose(
            ORDER_LISTING,
            "s.id, s.created_at, cu.customer_name, st.name, ch.name, \
             COALESCE(s.total_amount, 0), s.sale_status_desc",
            "sales s \
             LEFT JOIN customers cu ON s.customer_id = cu.id \
             LEFT JOIN stores st ON s.store_id = st.id \
             LEFT JOIN channels ch ON s.channel_id = ch.id",
            filter,
        )
        .order_by("s.created_at", SortDirection::Desc)
        .order_by("s.id", SortDirection::Desc)
        .paginate(request.pagination()),
        QueryPlan::compose(
            WEEKDAY_SALES,
            "EXTRACT(DOW FROM s.created_at)::int AS dow, COUNT(*) AS total, \
             COALESCE(SUM(s.total_amount), 0) AS faturamento",
            SALES,
            filter,
        )
        .group_by(&["dow"])
        .order_by("dow", SortDirection::Asc),
        QueryPlan::compose(
            HOURLY_SALES,
            "DATE_TRUNC('hour', s.created_at) AS hora, COUNT(*) AS total, \
             COALESCE(SUM(s.total_amount), 0) AS faturamento",
            SALES,
            filter,
        )
        .group_by(&["hora"])
        .order_by("hora", SortDirection::Asc),
    ]
}

pub(crate) fn assemble(
    context: &AssemblyContext,
    rowsets: &RawRowsets,
) -> ExecutorResult<SalesDashboardDocument> {
    let kpis = kpis::order_kpis(rowsets.first(KPIS))?;
    let total_registros = kpis.total_pedidos;

    let vendas_por_canal = rowsets
        .rows(CHANNEL_SALES)
        .iter()
        .map(|row| {
            Ok(ChannelSales {
                canal: row.text_or(1, UNKNOWN_CHANNEL)?,
                total: row.count(2)?,
            })
        })
        .collect::<ExecutorResult<Vec<_>>>()?;

    let pedidos = rowsets
        .rows(ORDER_LISTING)
        .iter()
        .map(order_entry)
        .collect::<ExecutorResult<Vec<_>>>()?;

    let vendas_por_dia_semana = rowsets
        .rows(WEEKDAY_SALES)
        .iter()
        .map(|row| {
            Ok(WeekdaySales {
                dia: weekday_name(row.int(0)?)?,
                total: row.count(1)?,
                faturamento: Money::new(row.decimal_or_zero(2)?),
            })
        })
        .collect::<ExecutorResult<Vec<_>>>()?;

    let vendas_por_horario = rowsets
        .rows(HOURLY_SALES)
        .iter()
        .map(|row| {
            Ok(HourlySales {
                hora: row.timestamp_opt(0)?.map(IsoTimestamp),
                total: row.count(1)?,
                faturamento: Money::new(row.decimal_or_zero(2)?),
            })
        })
        .collect::<ExecutorResult<Vec<_>>>()?;

    Ok(SalesDashboardDocument {
        kpis,
        faturamento_diario: kpis::daily_series(rowsets.rows(DAILY_REVENUE))?,
        vendas_por_canal,
        pedidos,
        pagina: context.page,
        total_paginas: Pagination::total_pages(total_registros, context.limit),
        total_registros,
        vendas_por_dia_semana,
        vendas_por_horario,
    })
}

fn order_entry(row: &Row) -> ExecutorResult<OrderEntry> {
    let cliente = row
        .text_opt(2)?
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(UNKNOWN_CUSTOMER)
        .to_string();

    Ok(OrderEntry {
        id: row.int(0)?,
        data: row.timestamp_opt(1)?.map(IsoTimestamp),
        cliente,
        loja: row.text_or(3, "")?,
        canal: row.text_or(4, "")?,
        valor: Money::new(row.decimal_or_zero(5)?),
        status: row.text_or(6, "")?,
    })
}

fn weekday_name(dow: i64) -> ExecutorResult<&'static str> {
    usize::try_from(dow)
        .ok()
        .and_then(|index| WEEKDAY_NAMES.get(index).copied())
        .ok_or_else(|| ExecutionError::new(format!("weekday number {} outside 0..6", dow)))
}
