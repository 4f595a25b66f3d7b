mod price_record;
mod prediction;

pub use price_record::{date_series, DatedPrice, PriceRecord};
pub use prediction::{HealthResponse, HistoryResponse, Prediction, SymbolsResponse, MOVING_AVERAGE_METHOD};
