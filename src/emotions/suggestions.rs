/// Sample texts offered as quick starting points.
pub const SUGGESTIONS: [&str; 4] = [
    "The launch went better than expected, and I feel genuinely proud of how everyone showed up.",
    "I'm worried we might miss the next milestone, and I can sense the pressure building across the team.",
    "I still can't believe the update landed that well — the reactions were honestly mind-blowing.",
    "My energy is drained today, and I’m fighting to stay focused no matter how hard I try.",
];

/// Returns the sample at a 1-based `index`, as shown to users.
pub fn suggestion(index: usize) -> Option<&'static str> {
    index
        .checked_sub(1)
        .and_then(|i| SUGGESTIONS.get(i))
        .copied()
}
