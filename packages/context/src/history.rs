use std::collections::HashMap;
use wanderwave_domain::{TrackSource, TrackSummary, WeightedPrompt};

/// Upper bound on style descriptors taken from listening history.
pub const MAX_HISTORY_STYLES: usize = 2;

const STYLE_WEIGHTS: [f32; MAX_HISTORY_STYLES] = [1.5, 1.2];

/// Derive "in the style of" descriptors from the listener's most frequent
/// artists. Liked tracks count twice; ties keep first-seen order.
pub fn history_style_prompts(tracks: &[TrackSummary]) -> Vec<WeightedPrompt> {
    let mut scores: HashMap<&str, (u32, usize)> = HashMap::new();
    for (index, track) in tracks.iter().enumerate() {
        let artist = track.artist.trim();
        if artist.is_empty() {
            continue;
        }
        let points = match track.source {
            TrackSource::Liked => 2,
            TrackSource::RecentlyPlayed => 1,
        };
        scores.entry(artist).or_insert((0, index)).0 += points;
    }

    let mut ranked: Vec<(&str, u32, usize)> = scores
        .into_iter()
        .map(|(artist, (score, first_seen))| (artist, score, first_seen))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

    ranked
        .into_iter()
        .zip(STYLE_WEIGHTS)
        .map(|((artist, _, _), weight)| {
            WeightedPrompt::new(format!("in the style of {artist}"), weight)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(artist: &str, source: TrackSource) -> TrackSummary {
        TrackSummary {
            name: "untitled".to_string(),
            artist: artist.to_string(),
            source,
        }
    }

    #[test]
    fn empty_history_yields_nothing() {
        assert!(history_style_prompts(&[]).is_empty());
    }

    #[test]
    fn most_frequent_artists_win() {
        let tracks = vec![
            track("Bonobo", TrackSource::RecentlyPlayed),
            track("Khruangbin", TrackSource::RecentlyPlayed),
            track("Khruangbin", TrackSource::RecentlyPlayed),
            track("Tycho", TrackSource::RecentlyPlayed),
            track("Bonobo", TrackSource::Liked),
        ];
        let prompts = history_style_prompts(&tracks);
        assert_eq!(prompts.len(), 2);
        assert_eq!(prompts[0].text, "in the style of Bonobo");
        assert_eq!(prompts[0].weight, 1.5);
        assert_eq!(prompts[1].text, "in the style of Khruangbin");
        assert_eq!(prompts[1].weight, 1.2);
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let tracks = vec![
            track("Tycho", TrackSource::RecentlyPlayed),
            track("Bonobo", TrackSource::RecentlyPlayed),
            track("", TrackSource::Liked),
        ];
        let texts: Vec<String> = history_style_prompts(&tracks)
            .into_iter()
            .map(|p| p.text)
            .collect();
        assert_eq!(texts, vec!["in the style of Tycho", "in the style of Bonobo"]);
    }
}
