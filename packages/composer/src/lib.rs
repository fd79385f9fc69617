//! # Wanderwave Composer
//!
//! Pure functions that turn context signals (time of day, weather, location,
//! listener preferences, listening-history styles, tempo) into the bounded,
//! priority-ordered list of weighted descriptors the generator receives.
//!
//! Nothing here performs I/O or holds state: the same [`ComposeInput`]
//! always yields the same output.

mod categories;
mod coherency;
mod compose;
mod location;
mod tempo;
mod time_of_day;
mod weather;

pub use categories::category_descriptor;
pub use coherency::{COHERENCY_TEMPO_THRESHOLD, LOW_ENERGY_WORDS, coherency_filter};
pub use compose::{ComposeInput, MAX_PROMPTS, compose, session_prompts};
pub use location::{SUMMARY_MAX_CHARS, location_prompts};
pub use tempo::tempo_prompts;
pub use time_of_day::time_of_day_prompts;
pub use weather::weather_prompts;
