//! Data module - CSV loading and normalization

mod loader;

pub use loader::{
    LoaderError, SurveyData, DISTRICT, REGION, SRC_DISTRICT, SRC_REGION, SRC_VALUE, VALUE,
};
