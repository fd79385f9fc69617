use chrono::Timelike;
use wanderwave_domain::{GeocodedPlace, NearbyPlace, Tempo, WeatherData, WeightedPrompt};

use crate::coherency::coherency_filter;
use crate::location::location_prompts;
use crate::tempo::tempo_prompts;
use crate::time_of_day::time_of_day_prompts;
use crate::weather::weather_prompts;

/// Hard cap on composed descriptors; the generator degrades past this.
pub const MAX_PROMPTS: usize = 8;

const PREFERENCE_WEIGHT: f32 = 1.8;
const TIME_OF_DAY_BOOST: f32 = 1.2;

/// Everything the composer looks at. Optional sources contribute nothing
/// when absent.
#[derive(Debug, Clone, Default)]
pub struct ComposeInput {
    /// Local wall-clock hour, 0-23.
    pub hour: u32,
    pub tempo: Tempo,
    pub weather: Option<WeatherData>,
    pub geocoded: Option<GeocodedPlace>,
    pub nearby: Option<NearbyPlace>,
    pub genre: Option<String>,
    pub experience: Option<String>,
    /// Already weighted by whoever derived them.
    pub history_styles: Vec<WeightedPrompt>,
}

impl ComposeInput {
    pub fn new(hour: u32, tempo: Tempo) -> Self {
        Self {
            hour,
            tempo,
            ..Self::default()
        }
    }

    /// Input stamped with the current local hour.
    pub fn at_local_time(tempo: Tempo) -> Self {
        Self::new(chrono::Local::now().hour(), tempo)
    }

    fn genre(&self) -> Option<&str> {
        non_blank(self.genre.as_deref())
    }

    fn experience(&self) -> Option<&str> {
        non_blank(self.experience.as_deref())
    }

    /// Any listener preference crowds the ambient sources down to one entry.
    fn has_preference(&self) -> bool {
        self.genre().is_some() || self.experience().is_some() || !self.history_styles.is_empty()
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Merge every source in priority order, filter for coherency with the tempo
/// and cut to [`MAX_PROMPTS`].
///
/// Priority: location, genre, experience, history styles, time of day,
/// weather. Truncation drops from the tail and never re-sorts by weight.
pub fn compose(input: &ComposeInput) -> Vec<WeightedPrompt> {
    let ambient_take = if input.has_preference() { 1 } else { 2 };

    let mut merged = location_prompts(input.geocoded.as_ref(), input.nearby.as_ref());
    if let Some(genre) = input.genre() {
        merged.push(WeightedPrompt::new(genre, PREFERENCE_WEIGHT));
    }
    if let Some(experience) = input.experience() {
        merged.push(WeightedPrompt::new(experience, PREFERENCE_WEIGHT));
    }
    merged.extend(input.history_styles.iter().cloned());
    merged.extend(
        time_of_day_prompts(input.hour)
            .iter()
            .take(ambient_take)
            .map(|p| p.scaled(TIME_OF_DAY_BOOST)),
    );
    merged.extend(
        weather_prompts(input.weather.as_ref())
            .into_iter()
            .take(ambient_take),
    );

    let mut composed = coherency_filter(&merged, input.tempo);
    composed.truncate(MAX_PROMPTS);
    composed
}

/// The set actually pushed upstream for `active` at `tempo`: the filtered
/// active descriptors followed by the tempo anchors.
///
/// An empty `active` set falls back to a plain "ambient" descriptor.
pub fn session_prompts(active: &[WeightedPrompt], tempo: Tempo) -> Vec<WeightedPrompt> {
    let fallback;
    let active = if active.is_empty() {
        fallback = [WeightedPrompt::new("ambient", 1.0)];
        &fallback[..]
    } else {
        active
    };
    let mut prompts = coherency_filter(active, tempo);
    prompts.extend(tempo_prompts(tempo));
    prompts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coherency::LOW_ENERGY_WORDS;
    use wanderwave_domain::WeatherCondition;

    fn tempo(bpm: u32) -> Tempo {
        Tempo::new(bpm).expect("in range")
    }

    fn texts(prompts: &[WeightedPrompt]) -> Vec<&str> {
        prompts.iter().map(|p| p.text.as_str()).collect()
    }

    #[test]
    fn time_and_weather_only() {
        let input = ComposeInput {
            weather: Some(WeatherData::new(WeatherCondition::Sunny, 20.0)),
            ..ComposeInput::new(15, tempo(100))
        };
        let composed = compose(&input);
        assert_eq!(
            texts(&composed),
            vec!["afternoon warmth", "relaxed groove", "bright cheerful", "sunny acoustic"]
        );
        assert!((composed[0].weight - 1.2 * 1.2).abs() < f32::EPSILON);
        assert!((composed[2].weight - 1.2).abs() < f32::EPSILON);
    }

    #[test]
    fn preferences_lead_and_crowd_out_ambient_sources() {
        let input = ComposeInput {
            weather: Some(WeatherData::new(WeatherCondition::Rainy, 10.0)),
            genre: Some("jazz".into()),
            experience: Some("  focus  ".into()),
            ..ComposeInput::new(10, tempo(100))
        };
        let composed = compose(&input);
        assert_eq!(
            texts(&composed),
            vec!["jazz", "focus", "bright energetic morning", "rainy day ambient"]
        );
        assert_eq!(composed[0].weight, 1.8);
        assert_eq!(composed[1].weight, 1.8);
    }

    #[test]
    fn history_styles_alone_crowd_out_ambient_sources() {
        let input = ComposeInput {
            weather: Some(WeatherData::new(WeatherCondition::Sunny, 20.0)),
            history_styles: vec![WeightedPrompt::new("in the style of Bonobo", 1.5)],
            ..ComposeInput::new(15, tempo(100))
        };
        assert_eq!(
            texts(&compose(&input)),
            vec!["in the style of Bonobo", "afternoon warmth", "bright cheerful"]
        );
    }

    #[test]
    fn blank_preferences_are_ignored() {
        let input = ComposeInput {
            genre: Some("   ".into()),
            ..ComposeInput::new(10, tempo(100))
        };
        assert_eq!(compose(&input).len(), 2);
    }

    #[test]
    fn truncates_from_the_tail() {
        let history: Vec<WeightedPrompt> = (0..7)
            .map(|i| WeightedPrompt::new(format!("style {i}"), 0.1 + i as f32))
            .collect();
        let input = ComposeInput {
            genre: Some("house".into()),
            history_styles: history,
            weather: Some(WeatherData::new(WeatherCondition::Sunny, 20.0)),
            ..ComposeInput::new(10, tempo(100))
        };
        let composed = compose(&input);
        assert_eq!(composed.len(), MAX_PROMPTS);
        assert_eq!(composed[0].text, "house");
        assert_eq!(composed[7].text, "style 6");
        // Time of day and weather are lowest priority and fall off, even
        // though their weights beat most history styles.
        assert!(!texts(&composed).contains(&"bright energetic morning"));
    }

    #[test]
    fn never_exceeds_cap() {
        let nearby = NearbyPlace {
            name: "Hall".into(),
            live_music: Some(true),
            ..Default::default()
        };
        for hour in 0..24 {
            for bpm in [60, 100, 129, 130, 180] {
                let input = ComposeInput {
                    nearby: Some(nearby.clone()),
                    genre: Some("soul".into()),
                    experience: Some("road trip".into()),
                    history_styles: vec![WeightedPrompt::new("motown", 1.0); 10],
                    weather: Some(WeatherData::new(WeatherCondition::Stormy, 40.0)),
                    ..ComposeInput::new(hour, tempo(bpm))
                };
                assert!(compose(&input).len() <= MAX_PROMPTS);
            }
        }
    }

    #[test]
    fn deterministic_for_same_input() {
        let input = ComposeInput {
            weather: Some(WeatherData::new(WeatherCondition::Foggy, -2.0)),
            genre: Some("trip hop".into()),
            ..ComposeInput::new(23, tempo(90))
        };
        assert_eq!(compose(&input), compose(&input));
    }

    #[test]
    fn high_tempo_filters_low_energy_sources() {
        let input = ComposeInput {
            weather: Some(WeatherData::new(WeatherCondition::Cloudy, 12.0)),
            ..ComposeInput::new(21, tempo(150))
        };
        for prompt in compose(&input) {
            let lowered = prompt.text.to_lowercase();
            assert!(LOW_ENERGY_WORDS.iter().all(|w| !lowered.contains(w)), "{lowered}");
        }
    }

    #[test]
    fn pushed_set_at_150_keeps_anchors_and_drops_minimal_ambient() {
        let input = ComposeInput {
            weather: Some(WeatherData::new(WeatherCondition::Clear, 20.0)),
            ..ComposeInput::new(12, tempo(150))
        };
        let pushed = session_prompts(&compose(&input), tempo(150));
        let texts = texts(&pushed);
        assert!(!texts.contains(&"minimal ambient"));
        assert_eq!(texts.iter().filter(|t| t.contains("150")).count(), 3);
    }

    #[test]
    fn empty_active_set_falls_back_to_ambient() {
        let pushed = session_prompts(&[], tempo(90));
        assert_eq!(pushed[0].text, "ambient");
        assert_eq!(pushed.len(), 6);

        // The fallback is itself low energy and disappears at high tempo.
        assert_eq!(session_prompts(&[], tempo(140)).len(), 5);
    }
}
