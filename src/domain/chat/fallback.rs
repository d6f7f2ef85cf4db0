//! Canned companion replies used when the chat model cannot be reached.

use rand::seq::SliceRandom;
use rand::Rng;

use super::SessionType;

const GENERAL_SUPPORT_REPLIES: [&str; 4] = [
    "I understand you're going through a challenging time. Can you tell me more about what's been on your mind lately?",
    "It sounds like you're dealing with a lot right now. Remember that it's okay to feel overwhelmed sometimes.",
    "Thank you for sharing that with me. How has this been affecting your daily routine?",
    "I hear what you're saying. What kind of support do you think would be most helpful for you right now?",
];

const MOOD_ANALYSIS_REPLIES: [&str; 3] = [
    "Based on what you've shared, it seems like you're experiencing some mixed emotions. That's completely normal.",
    "I notice some patterns in how you're feeling. Have you considered what might be contributing to these emotions?",
    "Your emotional awareness is really good. What strategies have you tried before when feeling this way?",
];

const COPING_STRATEGIES_REPLIES: [&str; 3] = [
    "Here are some coping strategies that might help: deep breathing exercises, journaling, or taking a short walk.",
    "Have you tried mindfulness techniques? They can be really effective for managing stress and anxiety.",
    "It might help to establish a daily routine that includes activities you enjoy. What brings you joy?",
];

const CRISIS_INTERVENTION_REPLIES: [&str; 3] = [
    "I'm concerned about what you've shared. Please remember that you're not alone and help is available.",
    "If you're having thoughts of self-harm, please reach out to a crisis hotline or emergency services immediately.",
    "Your safety is the most important thing right now. Is there someone you trust who you can talk to?",
];

/// The fixed reply list for a session type.
pub fn replies_for(session_type: SessionType) -> &'static [&'static str] {
    match session_type {
        SessionType::GeneralSupport => &GENERAL_SUPPORT_REPLIES,
        SessionType::MoodAnalysis => &MOOD_ANALYSIS_REPLIES,
        SessionType::CopingStrategies => &COPING_STRATEGIES_REPLIES,
        SessionType::CrisisIntervention => &CRISIS_INTERVENTION_REPLIES,
    }
}

/// Picks a reply for a session type name. Unknown names use general support.
pub fn fallback_reply(session_type: &str) -> &'static str {
    fallback_reply_with(SessionType::from_str_lossy(session_type), &mut rand::thread_rng())
}

/// Picks a reply uniformly at random using the given generator.
pub fn fallback_reply_with<R: Rng + ?Sized>(session_type: SessionType, rng: &mut R) -> &'static str {
    replies_for(session_type)
        .choose(rng)
        .copied()
        .unwrap_or(GENERAL_SUPPORT_REPLIES[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn crisis_reply_comes_from_crisis_list() {
        for _ in 0..20 {
            assert!(CRISIS_INTERVENTION_REPLIES.contains(&fallback_reply("crisis_intervention")));
        }
    }

    #[test]
    fn unknown_type_uses_general_list() {
        for _ in 0..20 {
            assert!(GENERAL_SUPPORT_REPLIES.contains(&fallback_reply("unknown_type")));
        }
    }

    #[test]
    fn list_sizes_match_session_types() {
        assert_eq!(replies_for(SessionType::GeneralSupport).len(), 4);
        assert_eq!(replies_for(SessionType::MoodAnalysis).len(), 3);
        assert_eq!(replies_for(SessionType::CopingStrategies).len(), 3);
        assert_eq!(replies_for(SessionType::CrisisIntervention).len(), 3);
    }

    #[test]
    fn seeded_choice_is_reproducible_and_covers_the_list() {
        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);
        let mut seen = HashSet::new();
        for _ in 0..200 {
            let reply = fallback_reply_with(SessionType::CopingStrategies, &mut a);
            assert_eq!(reply, fallback_reply_with(SessionType::CopingStrategies, &mut b));
            seen.insert(reply);
        }
        assert_eq!(seen.len(), COPING_STRATEGIES_REPLIES.len());
    }
}
