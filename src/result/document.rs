//! Result documents
//!
//! Key names are the dashboard's external contract and stay in Portuguese.
//! Every list is present (possibly empty) and every KPI block is present
//! (possibly zeroed), whatever the underlying rowsets held.

use serde::Serialize;

use super::coerce::{IsoDate, IsoTimestamp, Money, Percent};

/// Response of any aggregation kind or lookup
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResultDocument {
    Overview(OverviewDocument),
    SalesDashboard(SalesDashboardDocument),
    ProductsAnalytic(ProductsAnalyticDocument),
    UnitsOverview(UnitsOverviewDocument),
    ProductList(ProductListDocument),
    Product(CatalogProduct),
    Options(Vec<OptionEntry>),
}

impl ResultDocument {
    /// Serialized JSON text
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Order KPIs shared by the overview and sales dashboards
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct OrderKpis {
    pub total_pedidos: u64,
    pub faturamento_total: Money,
    pub ticket_medio: Money,
    pub taxa_cancelamento: Percent,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyRevenue {
    pub data: IsoDate,
    pub faturamento: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopProduct {
    pub produto: String,
    pub quantidade: i64,
    pub receita: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreRevenue {
    pub loja: String,
    pub receita: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewDocument {
    pub kpis: OrderKpis,
    pub tendencia: Vec<DailyRevenue>,
    pub top_produtos: Vec<TopProduct>,
    pub faturamento_lojas: Vec<StoreRevenue>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelSales {
    pub canal: String,
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderEntry {
    pub id: i64,
    pub data: Option<IsoTimestamp>,
    pub cliente: String,
    pub loja: String,
    pub canal: String,
    pub valor: Money,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekdaySales {
    pub dia: &'static str,
    pub total: u64,
    pub faturamento: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlySales {
    pub hora: Option<IsoTimestamp>,
    pub total: u64,
    pub faturamento: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesDashboardDocument {
    pub kpis: OrderKpis,
    pub faturamento_diario: Vec<DailyRevenue>,
    pub vendas_por_canal: Vec<ChannelSales>,
    pub pedidos: Vec<OrderEntry>,
    pub pagina: u32,
    pub total_paginas: u64,
    pub total_registros: u64,
    pub vendas_por_dia_semana: Vec<WeekdaySales>,
    pub vendas_por_horario: Vec<HourlySales>,
}

/// One product's aggregated sales and modeled margin
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductPerformance {
    pub id: i64,
    pub produto: String,
    pub categoria: String,
    pub qtde: i64,
    pub faturamento: Money,
    pub custo: Money,
    pub margem_percentual: Percent,
    pub margem_total: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductKpis {
    pub total_itens: i64,
    pub faturamento_total: Money,
    pub margem_media: Percent,
    pub produto_mais_vendido: String,
    pub produto_mais_lucrativo: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuEngineeringEntry {
    pub produto: String,
    pub qtde: i64,
    pub faturamento: Money,
    pub margem_percentual: Percent,
    pub margem_total: Money,
}

impl From<&ProductPerformance> for MenuEngineeringEntry {
    fn from(p: &ProductPerformance) -> Self {
        Self {
            produto: p.produto.clone(),
            qtde: p.qtde,
            faturamento: p.faturamento,
            margem_percentual: p.margem_percentual,
            margem_total: p.margem_total,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub categoria: String,
    pub percentual: Percent,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevenuePoint {
    pub data: IsoDate,
    pub valor: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductsAnalyticDocument {
    pub pagina: u32,
    pub limit: u32,
    pub total_paginas: u64,
    pub total_registros: u64,
    pub produtos: Vec<ProductPerformance>,
    pub kpis: ProductKpis,
    pub top_vendidos: Vec<ProductPerformance>,
    pub menu_engineering: Vec<MenuEngineeringEntry>,
    pub mix_categorias: Vec<CategoryShare>,
    pub evolucao_vendas: Vec<RevenuePoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct UnitKpis {
    pub total_unidades: u64,
    pub faturamento_total: Money,
    pub ticket_medio: Money,
    pub unidades_ativas: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitEntry {
    pub id: i64,
    pub unidade: String,
    pub status: &'static str,
    pub faturamento: Money,
    pub ticket_medio: Money,
    pub pedidos: u64,
    pub ultima_venda: Option<IsoTimestamp>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitsOverviewDocument {
    pub kpis: UnitKpis,
    pub unidades: Vec<UnitEntry>,
    pub pagina: u32,
    pub total_paginas: u64,
    pub total_registros: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogProduct {
    pub id: i64,
    pub produto: String,
    pub categoria: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductListDocument {
    pub produtos: Vec<CatalogProduct>,
    pub pagina: u32,
    pub limit: u32,
    pub total_paginas: u64,
    pub total_registros: u64,
}

/// Filter option (`/filtros/*`)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptionEntry {
    pub id: i64,
    pub nome: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeroed_kpis_serialize_as_numbers() {
        let json = serde_json::to_value(OrderKpis::default()).unwrap();
        assert_eq!(json["total_pedidos"], serde_json::json!(0));
        assert_eq!(json["faturamento_total"], serde_json::json!(0.0));
        assert_eq!(json["taxa_cancelamento"], serde_json::json!(0.0));
    }

    #[test]
    fn test_options_serialize_as_array() {
        let doc = ResultDocument::Options(vec![OptionEntry {
            id: 1,
            nome: "iFood".into(),
        }]);
        assert_eq!(doc.to_json().unwrap(), "[{\"id\":1,\"nome\":\"iFood\"}]");
    }
}
