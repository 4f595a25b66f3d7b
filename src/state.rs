use std::sync::Arc;

use crate::external::price_source::PriceSource;
use crate::store::PriceStore;

#[derive(Clone)]
pub struct AppState {
    pub price_source: Arc<dyn PriceSource>,
    pub price_store: Arc<dyn PriceStore>,
    pub symbols: Arc<Vec<String>>,
}
