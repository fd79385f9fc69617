use crate::categories::category_descriptor;
use wanderwave_domain::{GeocodedPlace, NearbyPlace, WeightedPrompt};

/// Editorial summaries are cut to this many characters.
pub const SUMMARY_MAX_CHARS: usize = 60;

const MAX_LOCATION_PROMPTS: usize = 2;

/// Up to two descriptors drawn from where the listener is.
///
/// Nearby-place cues are tried in order (name, live music, sports viewing,
/// category, editorial summary). The neighborhood is only used when none of
/// them produced anything.
pub fn location_prompts(
    geocoded: Option<&GeocodedPlace>,
    nearby: Option<&NearbyPlace>,
) -> Vec<WeightedPrompt> {
    let mut prompts = nearby.map(nearby_candidates).unwrap_or_default();
    prompts.truncate(MAX_LOCATION_PROMPTS);

    if prompts.is_empty()
        && let Some(hood) = geocoded
            .and_then(|place| place.neighborhood.as_deref())
            .map(str::trim)
            .filter(|hood| !hood.is_empty())
    {
        prompts.push(WeightedPrompt::new(format!("{hood} neighborhood vibe"), 1.0));
    }
    prompts
}

fn nearby_candidates(place: &NearbyPlace) -> Vec<WeightedPrompt> {
    let mut out = Vec::new();

    let name = place.name.trim();
    if !name.is_empty() {
        out.push(WeightedPrompt::new(format!("inspired by {name}"), 1.4));
    }
    if place.live_music == Some(true) {
        out.push(WeightedPrompt::new("live band energy", 1.5));
    }
    if place.good_for_watching_sports == Some(true) {
        out.push(WeightedPrompt::new("stadium crowd energy", 1.3));
    }
    let category = place
        .primary_type
        .iter()
        .chain(place.types.iter())
        .find_map(|kind| category_descriptor(kind));
    if let Some(descriptor) = category {
        out.push(WeightedPrompt::new(descriptor, 1.4));
    }
    if let Some(summary) = place
        .editorial_summary
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        let truncated: String = summary.chars().take(SUMMARY_MAX_CHARS).collect();
        out.push(WeightedPrompt::new(truncated.trim_end().to_string(), 1.0));
    }
    out
}
