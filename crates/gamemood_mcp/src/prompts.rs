use rmcp::model::{GetPromptResult, PromptMessage, PromptMessageRole};

pub fn mood_check_in_prompt(feeling: Option<&str>, minutes_available: Option<u32>) -> GetPromptResult {
    let opening = match feeling {
        Some(f) if !f.trim().is_empty() => format!("Right now I feel: \"{}\".", f.trim()),
        _ => "I'd like to check in on how I'm feeling before I play.".to_string(),
    };
    let time = minutes_available
        .map(|m| format!("\nI have about {m} minutes to play."))
        .unwrap_or_default();

    GetPromptResult::new(vec![PromptMessage::new_text(
        PromptMessageRole::User,
        format!(
            "{opening}{time}\n\nSteps:\n1. If I described my mood in words, use analyze_mood_text to turn it into mood dimensions; otherwise ask me to rate energy, stress, focus, social desire and challenge seeking from 1 to 10.\n2. Call recommend_games with that mood and the game catalog. Use a session_length filter if my time is short.\n3. Present the top three games with their match scores and one sentence on why each fits.\n4. Suggest one wellness break (breathing, posture, hydration or eye rest) to take during the session.\n\nKeep the tone warm and brief."
        ),
    )])
    .with_description("Record a mood check-in and pick a game for it")
}

pub fn wellness_review_prompt(range: &str) -> GetPromptResult {
    GetPromptResult::new(vec![PromptMessage::new_text(
        PromptMessageRole::User,
        format!(
            "Review my gaming wellness for the {range} range.\n\nInclude:\n1. Headline stats and insights from dashboard_summary with range={range}\n2. The eight wellness metrics from wellness_metrics, calling out anything below 60\n3. My current check-in streak from wellness_streak\n4. How my mood has moved day to day using mood_trends\n5. Two or three concrete suggestions for healthier play\n\nBe encouraging and specific. Do not invent numbers the tools did not return."
        ),
    )])
    .with_description(format!("Gaming wellness review for the {range} range"))
}
