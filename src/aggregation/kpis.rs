//! Order KPIs and daily revenue, shared by the overview and sales dashboards

use rust_decimal::Decimal;

use crate::executor::{ExecutorResult, Row};
use crate::filter::FilterSpec;
use crate::planner::{QueryPlan, SortDirection};
use crate::result::{percentage, DailyRevenue, IsoDate, Money, OrderKpis};

pub(crate) const KPIS: &str = "kpis";
pub(crate) const DAILY_REVENUE: &str = "daily_revenue";

pub(crate) const SALES: &str = "sales s";

/// orders, revenue, cancelled orders, average ticket.
///
/// The ticket is `AVG(total_amount)`, so sales without an amount do not
/// dilute it.
pub(crate) fn kpi_plan(filter: &FilterSpec) -> QueryPlan {
    QueryPlan::compose(
        KPIS,
        "COUNT(*) AS total_pedidos, \
         COALESCE(SUM(s.total_amount), 0) AS faturamento_total, \
         COUNT(*) FILTER (WHERE s.sale_status_desc = 'CANCELLED') AS cancelados, \
         AVG(s.total_amount) AS ticket_medio",
        SALES,
        filter,
    )
}

pub(crate) fn daily_revenue_plan(filter: &FilterSpec) -> QueryPlan {
    QueryPlan::compose(
        DAILY_REVENUE,
        "DATE(s.created_at) AS data, COALESCE(SUM(s.total_amount), 0) AS faturamento",
        SALES,
        filter,
    )
    .group_by(&["DATE(s.created_at)"])
    .order_by("data", SortDirection::Asc)
}

pub(crate) fn order_kpis(row: Option<&Row>) -> ExecutorResult<OrderKpis> {
    let Some(row) = row else {
        return Ok(OrderKpis::default());
    };

    let orders = row.count(0)?;
    let revenue = row.decimal_or_zero(1)?;
    let cancelled = row.count(2)?;

    Ok(OrderKpis {
        total_pedidos: orders,
        faturamento_total: Money::new(revenue),
        ticket_medio: row.decimal_opt(3)?.map(Money::new).unwrap_or_default(),
        taxa_cancelamento: percentage(Decimal::from(cancelled), Decimal::from(orders)),
    })
}

/// `revenue / orders`, zero without orders
pub(crate) fn average_ticket(revenue: Decimal, orders: u64) -> Money {
    if orders == 0 {
        return Money::zero();
    }
    Money::new(revenue / Decimal::from(orders))
}

/// `(date, amount)` rows; rows without a date are skipped
pub(crate) fn daily_series(rows: &[Row]) -> ExecutorResult<Vec<DailyRevenue>> {
    let mut series = Vec::with_capacity(rows.len());
    for row in rows {
        if let Some(day) = row.date_opt(0)? {
            series.push(DailyRevenue {
                data: IsoDate(day),
                faturamento: Money::new(row.decimal_or_zero(1)?),
            });
        }
    }
    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::SqlValue;
    use std::str::FromStr;

    #[test]
    fn test_kpi_derivation() {
        let row = Row::new(vec![
            SqlValue::Int(3),
            SqlValue::Decimal(Decimal::from_str("150.00").unwrap()),
            SqlValue::Int(1),
            SqlValue::Decimal(Decimal::from_str("50.0000").unwrap()),
        ]);
        let kpis = order_kpis(Some(&row)).unwrap();
        assert_eq!(kpis.total_pedidos, 3);
        assert_eq!(kpis.faturamento_total.value(), Decimal::from(150));
        assert_eq!(kpis.ticket_medio.value(), Decimal::from(50));
        assert_eq!(
            kpis.taxa_cancelamento.value(),
            Decimal::from_str("33.33").unwrap()
        );
    }

    #[test]
    fn test_no_orders_is_zero() {
        let row = Row::new(vec![
            SqlValue::Int(0),
            SqlValue::Null,
            SqlValue::Int(0),
            SqlValue::Null,
        ]);
        let kpis = order_kpis(Some(&row)).unwrap();
        assert_eq!(kpis, OrderKpis::default());
        assert_eq!(order_kpis(None).unwrap(), OrderKpis::default());
    }

    #[test]
    fn test_ticket_ignores_sales_without_amount() {
        // three orders, one without an amount: AVG covers the other two
        let row = Row::new(vec![
            SqlValue::Int(3),
            SqlValue::Decimal(Decimal::from(100)),
            SqlValue::Int(0),
            SqlValue::Decimal(Decimal::from(50)),
        ]);
        let kpis = order_kpis(Some(&row)).unwrap();
        assert_eq!(kpis.ticket_medio.value(), Decimal::from(50));

        let sql = kpi_plan(&FilterSpec::new()).render().sql;
        assert!(sql.contains("AVG(s.total_amount) AS ticket_medio"));
    }

    #[test]
    fn test_daily_plan_shape() {
        let sql = daily_revenue_plan(&FilterSpec::new()).render().sql;
        assert!(sql.ends_with("GROUP BY DATE(s.created_at) ORDER BY data ASC"));
    }
}
