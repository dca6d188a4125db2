pub mod kpis;
pub mod parse;
