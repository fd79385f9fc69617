use wanderwave_domain::WeightedPrompt;

/// Descriptors for the band containing `hour` (0-23, wrapped).
pub fn time_of_day_prompts(hour: u32) -> Vec<WeightedPrompt> {
    let pairs: [(&str, f32); 2] = match hour % 24 {
        5..=8 => [("gentle morning atmosphere", 1.5), ("soft ambient", 1.0)],
        9..=11 => [("bright energetic morning", 1.2), ("upbeat acoustic", 1.0)],
        12..=13 => [("midday focus", 1.0), ("minimal ambient", 0.8)],
        14..=16 => [("afternoon warmth", 1.2), ("relaxed groove", 1.0)],
        17..=19 => [("golden hour", 1.3), ("warm sunset", 1.0)],
        20..=22 => [("evening chill", 1.2), ("lo-fi beats", 1.0)],
        // 23:00 through 04:59
        _ => [("late night ambient", 1.5), ("dreamy atmospheric", 1.0)],
    };
    pairs.into_iter().map(WeightedPrompt::from).collect()
}
