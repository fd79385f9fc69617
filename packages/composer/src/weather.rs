use wanderwave_domain::{WeatherCondition, WeatherData, WeightedPrompt};

const HOT_THRESHOLD_C: f32 = 30.0;
const FREEZING_THRESHOLD_C: f32 = 0.0;

/// Descriptors for the current weather. Missing weather contributes nothing.
pub fn weather_prompts(weather: Option<&WeatherData>) -> Vec<WeightedPrompt> {
    let Some(weather) = weather else {
        return Vec::new();
    };

    let pairs: &[(&str, f32)] = match weather.condition {
        WeatherCondition::Sunny | WeatherCondition::Clear => {
            &[("bright cheerful", 1.2), ("sunny acoustic", 1.0)]
        }
        WeatherCondition::Cloudy => &[("mellow overcast", 1.2), ("soft ambient", 1.0)],
        WeatherCondition::Rainy => &[
            ("rainy day ambient", 1.5),
            ("cozy indoor", 1.0),
            ("relaxing rain sounds texture", 0.8),
        ],
        WeatherCondition::Snowy => &[("winter ambient", 1.3), ("peaceful cold", 1.0)],
        WeatherCondition::Stormy => &[
            ("dramatic atmospheric", 1.3),
            ("intense ambient", 1.0),
            ("thunderous percussion", 0.9),
            ("dark brooding synths", 0.7),
        ],
        WeatherCondition::Foggy => &[("misty ambient", 1.3), ("ethereal drone", 1.0)],
        WeatherCondition::Windy => &[("breezy open air", 1.2), ("swirling textures", 1.0)],
        WeatherCondition::Other => &[("ambient", 1.0)],
    };

    let mut prompts: Vec<WeightedPrompt> =
        pairs.iter().copied().map(WeightedPrompt::from).collect();

    if weather.temperature_c > HOT_THRESHOLD_C {
        prompts.push(WeightedPrompt::new("hot summer vibes", 0.6));
    } else if weather.temperature_c < FREEZING_THRESHOLD_C {
        prompts.push(WeightedPrompt::new("chilly winter crisp", 0.5));
    }
    prompts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_weather_is_empty() {
        assert!(weather_prompts(None).is_empty());
    }

    #[test]
    fn rainy_and_freezing() {
        let weather = WeatherData::new(WeatherCondition::Rainy, -5.0);
        let texts: Vec<String> = weather_prompts(Some(&weather))
            .into_iter()
            .map(|p| p.text)
            .collect();
        assert!(texts.iter().any(|t| t.contains("rain")));
        assert!(texts.contains(&"chilly winter crisp".to_string()));
    }

    #[test]
    fn hot_day_adds_summer() {
        let weather = WeatherData::new(WeatherCondition::Sunny, 34.0);
        let prompts = weather_prompts(Some(&weather));
        assert_eq!(prompts.len(), 3);
        assert_eq!(prompts[2].text, "hot summer vibes");
    }

    #[test]
    fn mild_temperature_adds_nothing() {
        for condition in [
            WeatherCondition::Sunny,
            WeatherCondition::Clear,
            WeatherCondition::Cloudy,
            WeatherCondition::Rainy,
            WeatherCondition::Snowy,
            WeatherCondition::Stormy,
            WeatherCondition::Foggy,
            WeatherCondition::Windy,
            WeatherCondition::Other,
        ] {
            let n = weather_prompts(Some(&WeatherData::new(condition, 15.0))).len();
            assert!((1..=4).contains(&n), "{condition:?} gave {n}");
        }
    }
}
