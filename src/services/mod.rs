pub mod prediction_service;
pub mod predictor;
pub mod price_service;
