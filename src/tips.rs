use rand::seq::SliceRandom;
use rand::Rng;

pub const STUDY_TIPS: &[&str] = &[
    "Try 25-minute focused sessions with 5-minute breaks (Pomodoro).",
    "Start with the hardest task when you're most alert.",
    "Summarize a topic in your own words to test understanding.",
    "Practice by solving sample problems rather than only reading.",
    "Teach the concept to someone (or pretend to); it reveals gaps.",
];

/// Pick a study tip at random.
pub fn random_tip<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    STUDY_TIPS.choose(rng).copied().unwrap_or(STUDY_TIPS[0])
}
