pub mod period_aggregator;

pub use period_aggregator::{
    BalanceStanding, PeriodAggregator, PeriodReport, PeriodSummary, TypeTotal,
};
