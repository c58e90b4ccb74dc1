//! # Random Walk Simulator
//!
//! Produces the next weather reading and the next free-table count from the
//! current ones. Pure apart from the RNG, so a seeded simulator replays the
//! same sequence.
//!
//! ```text
//!   condition    ── 1 in 4 ticks: step to a neighbour in WeatherCondition::ALL
//!   temperature  ── ±2 °C per tick, clamped to [8, 34]
//!   humidity     ── ±5 % per tick (+3 while raining), clamped to [30, 90]
//!   tables       ── ±2 per tick, clamped to [0, total]
//! ```

use bistro_core::{TableAvailability, Weather, WeatherCondition};
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::LiveSettings;

pub const MIN_TEMPERATURE_C: i32 = 8;
pub const MAX_TEMPERATURE_C: i32 = 34;
pub const MIN_HUMIDITY: u8 = 30;
pub const MAX_HUMIDITY: u8 = 90;

/// Largest change in free tables per tick.
pub const TABLE_STEP: i64 = 2;

const CONDITION_CHANGE_PROBABILITY: f64 = 0.25;
const TEMPERATURE_STEP: i32 = 2;
const HUMIDITY_STEP: i32 = 5;
const RAIN_HUMIDITY_DRIFT: i32 = 3;

/// Random walk over weather and table availability.
#[derive(Debug, Clone)]
pub struct Simulator<R: Rng = StdRng> {
    rng: R,
}

impl Simulator<StdRng> {
    /// Seeds from the OS.
    pub fn from_entropy() -> Self {
        Simulator {
            rng: StdRng::from_entropy(),
        }
    }

    /// Replays the same walk for the same seed.
    pub fn seeded(seed: u64) -> Self {
        Simulator {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_settings(settings: &LiveSettings) -> Self {
        match settings.seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }
}

impl<R: Rng> Simulator<R> {
    pub fn with_rng(rng: R) -> Self {
        Simulator { rng }
    }

    /// The reading that follows `current`.
    pub fn next_weather(&mut self, current: &Weather, now: DateTime<Utc>) -> Weather {
        let condition = self.next_condition(current.condition);

        let temperature_c = (current.temperature_c
            + self.rng.gen_range(-TEMPERATURE_STEP..=TEMPERATURE_STEP))
        .clamp(MIN_TEMPERATURE_C, MAX_TEMPERATURE_C);

        let mut humidity_delta = self.rng.gen_range(-HUMIDITY_STEP..=HUMIDITY_STEP);
        if !condition.terrace_open() {
            humidity_delta += RAIN_HUMIDITY_DRIFT;
        }
        let humidity = (i32::from(current.humidity) + humidity_delta)
            .clamp(i32::from(MIN_HUMIDITY), i32::from(MAX_HUMIDITY)) as u8;

        Weather {
            condition,
            temperature_c,
            humidity,
            updated_at: Some(now),
        }
    }

    fn next_condition(&mut self, current: WeatherCondition) -> WeatherCondition {
        if !self.rng.gen_bool(CONDITION_CHANGE_PROBABILITY) {
            return current;
        }

        let all = WeatherCondition::ALL;
        let index = all.iter().position(|c| *c == current).unwrap_or(0);
        let next = match index {
            0 => 1,
            i if i == all.len() - 1 => i - 1,
            i if self.rng.gen_bool(0.5) => i + 1,
            i => i - 1,
        };
        all[next]
    }

    /// Free tables after one tick. Always within `[0, current.total]`.
    pub fn next_available_tables(&mut self, current: &TableAvailability) -> u32 {
        let total = i64::from(current.total);
        let available = i64::from(current.available.min(current.total));
        let delta = self.rng.gen_range(-TABLE_STEP..=TABLE_STEP);
        (available + delta).clamp(0, total) as u32
    }
}
