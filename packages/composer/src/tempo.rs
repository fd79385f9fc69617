use wanderwave_domain::{Tempo, WeightedPrompt};

/// Anchor weights, highest first. They are deliberately above every other
/// descriptor so the generator locks onto the numeric tempo.
const ANCHOR_WEIGHTS: [f32; 3] = [2.2, 1.8, 1.5];

/// Three tempo anchors stating the literal bpm, followed by the two
/// descriptors of the matching energy band.
pub fn tempo_prompts(tempo: Tempo) -> Vec<WeightedPrompt> {
    let bpm = tempo.bpm();
    let anchors = [
        format!("{bpm} bpm"),
        format!("steady tempo of {bpm} bpm"),
        format!("rhythm locked at {bpm} beats per minute"),
    ];

    let energy: [(&str, f32); 2] = if bpm < 80 {
        [("laid-back slow groove", 1.2), ("spacious downtempo", 1.0)]
    } else if bpm < 120 {
        [("mid-tempo groove", 1.2), ("steady pulse", 1.0)]
    } else {
        [("high energy", 1.3), ("driving beat", 1.1)]
    };

    anchors
        .into_iter()
        .zip(ANCHOR_WEIGHTS)
        .map(|(text, weight)| WeightedPrompt::new(text, weight))
        .chain(energy.into_iter().map(WeightedPrompt::from))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_anchors_and_two_energy_for_every_tempo() {
        for bpm in Tempo::MIN_BPM..=Tempo::MAX_BPM {
            let tempo = Tempo::new(bpm).expect("in range");
            let prompts = tempo_prompts(tempo);
            assert_eq!(prompts.len(), 5, "bpm {bpm}");

            let literal = bpm.to_string();
            let anchors: Vec<&WeightedPrompt> =
                prompts.iter().filter(|p| p.text.contains(&literal)).collect();
            assert_eq!(anchors.len(), 3, "bpm {bpm}");
            let weights: Vec<f32> = anchors.iter().map(|p| p.weight).collect();
            assert_eq!(weights, vec![2.2, 1.8, 1.5]);
        }
    }

    #[test]
    fn energy_bands() {
        let band = |bpm| tempo_prompts(Tempo::new(bpm).expect("in range"))[3].text.clone();
        assert_eq!(band(60), "laid-back slow groove");
        assert_eq!(band(79), "laid-back slow groove");
        assert_eq!(band(80), "mid-tempo groove");
        assert_eq!(band(119), "mid-tempo groove");
        assert_eq!(band(120), "high energy");
        assert_eq!(band(180), "high energy");
    }
}
