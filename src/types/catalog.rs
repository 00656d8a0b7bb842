use serde::{Deserialize, Serialize};

use crate::db::CarModelWithMake;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CarEntry {
    #[serde(rename = "CarModel")]
    pub car_model: String,
    #[serde(rename = "CarMake")]
    pub car_make: String,
}

impl From<CarModelWithMake> for CarEntry {
    fn from(row: CarModelWithMake) -> Self {
        Self {
            car_model: row.model_name,
            car_make: row.make_name,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CarsResponse {
    #[serde(rename = "CarModels")]
    pub car_models: Vec<CarEntry>,
}
