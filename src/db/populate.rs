//! Seed data for an empty car catalog.

pub struct SeedMake {
    pub name: &'static str,
    pub description: &'static str,
    pub models: &'static [SeedModel],
}

pub struct SeedModel {
    pub name: &'static str,
    pub car_type: &'static str,
    pub year: i64,
}

const fn model(name: &'static str, car_type: &'static str, year: i64) -> SeedModel {
    SeedModel {
        name,
        car_type,
        year,
    }
}

pub const SEED_CATALOG: &[SeedMake] = &[
    SeedMake {
        name: "NISSAN",
        description: "Great cars. Japanese technology",
        models: &[
            model("Pathfinder", "SUV", 2023),
            model("Qashqai", "SUV", 2023),
            model("XTRAIL", "SUV", 2023),
        ],
    },
    SeedMake {
        name: "Mercedes",
        description: "Great cars. German technology",
        models: &[
            model("A-Class", "SUV", 2023),
            model("C-Class", "SUV", 2023),
            model("E-Class", "SUV", 2023),
        ],
    },
    SeedMake {
        name: "Audi",
        description: "Great cars. German technology",
        models: &[
            model("A4", "SUV", 2023),
            model("A5", "SUV", 2023),
            model("A6", "SUV", 2023),
        ],
    },
    SeedMake {
        name: "Kia",
        description: "Great cars. Korean technology",
        models: &[
            model("Sorrento", "SUV", 2023),
            model("Carnival", "SUV", 2023),
            model("Cerato", "Sedan", 2023),
        ],
    },
    SeedMake {
        name: "Toyota",
        description: "Great cars. Japanese technology",
        models: &[
            model("Corolla", "Sedan", 2023),
            model("Camry", "Sedan", 2023),
            model("Kluger", "SUV", 2023),
        ],
    },
];

pub fn seed_model_count() -> usize {
    SEED_CATALOG.iter().map(|make| make.models.len()).sum()
}
