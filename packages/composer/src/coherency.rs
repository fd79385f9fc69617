use wanderwave_domain::{Tempo, WeightedPrompt};

/// At or above this bpm, low-energy descriptors are removed.
pub const COHERENCY_TEMPO_THRESHOLD: u32 = 130;

/// Vocabulary that contradicts a fast tempo. Matched as a case-insensitive
/// substring.
pub const LOW_ENERGY_WORDS: [&str; 10] = [
    "ambient", "soft", "minimal", "gentle", "peaceful", "dreamy", "mellow", "chill", "relaxing",
    "cozy",
];

/// Drop low-energy descriptors when the tempo is high; identity otherwise.
pub fn coherency_filter(prompts: &[WeightedPrompt], tempo: Tempo) -> Vec<WeightedPrompt> {
    if tempo.bpm() < COHERENCY_TEMPO_THRESHOLD {
        return prompts.to_vec();
    }
    prompts
        .iter()
        .filter(|prompt| !is_low_energy(&prompt.text))
        .cloned()
        .collect()
}

fn is_low_energy(text: &str) -> bool {
    let lowered = text.to_lowercase();
    LOW_ENERGY_WORDS.iter().any(|word| lowered.contains(word))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<WeightedPrompt> {
        vec![
            WeightedPrompt::new("Minimal Ambient", 0.8),
            WeightedPrompt::new("driving techno", 1.2),
            WeightedPrompt::new("SOFTLY glowing pads", 1.0),
            WeightedPrompt::new("evening chill", 1.2),
            WeightedPrompt::new("punchy drums", 1.1),
        ]
    }

    #[test]
    fn identity_below_threshold() {
        for bpm in Tempo::MIN_BPM..COHERENCY_TEMPO_THRESHOLD {
            let tempo = Tempo::new(bpm).expect("in range");
            assert_eq!(coherency_filter(&sample(), tempo), sample());
        }
    }

    #[test]
    fn removes_low_energy_at_and_above_threshold() {
        for bpm in COHERENCY_TEMPO_THRESHOLD..=Tempo::MAX_BPM {
            let tempo = Tempo::new(bpm).expect("in range");
            let filtered = coherency_filter(&sample(), tempo);
            let texts: Vec<&str> = filtered.iter().map(|p| p.text.as_str()).collect();
            assert_eq!(texts, vec!["driving techno", "punchy drums"]);
            for prompt in &filtered {
                assert!(!is_low_energy(&prompt.text));
            }
        }
    }

    #[test]
    fn preserves_order_and_duplicates() {
        let input = vec![
            WeightedPrompt::new("funk", 1.0),
            WeightedPrompt::new("funk", 1.0),
            WeightedPrompt::new("gentle", 1.0),
            WeightedPrompt::new("brass", 0.5),
        ];
        let tempo = Tempo::new(140).expect("in range");
        let texts: Vec<String> = coherency_filter(&input, tempo)
            .into_iter()
            .map(|p| p.text)
            .collect();
        assert_eq!(texts, vec!["funk", "funk", "brass"]);
    }
}
