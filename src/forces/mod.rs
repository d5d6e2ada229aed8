pub mod field;

pub use field::{
    apply_attraction, apply_explosion, apply_wind, attraction_force, explosion_force, wind_force,
    DEFAULT_ATTRACTION_MIN_DISTANCE,
};
