pub mod mock_source;
pub mod price_source;
