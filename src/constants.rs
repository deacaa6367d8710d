// Physical Constants
pub const GRAVITATIONAL_CONSTANT: f64 = 6.67408e-11; // N⋅m²/kg²
pub const EARTH_MASS: f64 = 5.972e24; // kg
pub const EARTH_RADIUS: f64 = 6_371_000.0; // meters

// Environmental Constants
pub const ATMOSPHERE_BOUNDARY: f64 = 100_000.0; // m (approximate Kármán line)

// Simulation Parameters
pub const TIME_STEP: f64 = 0.01; // s
pub const TARGET_ALTITUDE: f64 = 0.0; // m
pub const MAX_INTEGRATION_STEPS: usize = 10_000_000;
pub const TELEMETRY_SAMPLE_INTERVAL: usize = 10_000; // steps

// Search Parameters
pub const GOLDEN_RATIO: f64 = 1.618_033_988_749_895; // (√5 + 1) / 2
pub const SEARCH_TOLERANCE: f64 = 1e-5; // m
pub const SEARCH_LOWER_ALTITUDE: f64 = 0.0; // m
pub const SEARCH_UPPER_ALTITUDE: f64 = 10_000_000.0; // m
pub const MAX_SEARCH_ITERATIONS: usize = 500;

// Air density by altitude, US Standard Atmosphere 1976 (m, kg/m³)
pub const STANDARD_DENSITY_TABLE: [(f64, f64); 22] = [
    (0.0, 1.225),
    (1_000.0, 1.112),
    (2_000.0, 1.007),
    (3_000.0, 0.9093),
    (4_000.0, 0.8194),
    (5_000.0, 0.7364),
    (6_000.0, 0.6601),
    (7_000.0, 0.5900),
    (8_000.0, 0.5258),
    (9_000.0, 0.4671),
    (10_000.0, 0.4135),
    (15_000.0, 0.1948),
    (20_000.0, 0.088_91),
    (25_000.0, 0.040_08),
    (30_000.0, 0.018_41),
    (40_000.0, 0.003_996),
    (50_000.0, 0.001_027),
    (60_000.0, 3.097e-4),
    (70_000.0, 8.283e-5),
    (80_000.0, 1.846e-5),
    (90_000.0, 3.416e-6),
    (100_000.0, 5.604e-7),
];
