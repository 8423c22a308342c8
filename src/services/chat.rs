use crate::{
    error::{AppError, AppResult},
    models::Game,
    services::{providers::TextGenerator, title_index::GameTitleIndex},
};

/// Characters of a game description quoted in the knowledge base
const DESCRIPTION_PREVIEW_CHARS: usize = 100;

const NO_GAME_MENTIONED: &str = "No specific game mentioned, use general gaming knowledge.";

const SYSTEM_PROMPT: &str = r#"
You are the "GameHub Master", an intelligent guide for a gaming platform.
Your goal is to help users navigate, find games, and use the site based on their CURRENT CONTEXT.

**GAME KNOWLEDGE BASE (DYNAMIC):**
{game_context}

**CRITICAL RULES:**
1. **FORMATTING**: Use Markdown. Use **Bold** for emphasis.
2. **NAVIGATION**: If a user asks about a specific game in the list above, output a BUTTON to `/games/<ID>`.
   - Example: "Oh, Cyberpunk! [BUTTON: Visit Night City](/games/15)"
3. **GENERAL ROUTES**:
   - Login/Register: `/auth`
   - All Games: `/games`
   - My Library: `/library` (Check your **AI Recommendations** here!)
   - Profile: `/profile`
   - Game Details: `/games/<ID>` (Look for the **AI Sentiment Score**!)
4. **CONTEXT AWARE**: Use the provided "Current Page" info to be helpful.
5. **TONE**: Enthusiastic, knowledgeable (Gamer persona).
"#;

/// One knowledge-base line for a game mentioned by the user
fn knowledge_line(game: &Game) -> String {
    let preview: String = game
        .description_text()
        .chars()
        .take(DESCRIPTION_PREVIEW_CHARS)
        .collect();
    let developer = game.developer.as_deref().unwrap_or("an unknown developer");

    format!(
        "- {} (ID {}): {}... by {}",
        game.title, game.game_id, preview, developer
    )
}

/// Assembles the full prompt sent to the model
pub fn build_prompt(mentioned: &[Game], context: &str, message: &str) -> String {
    let game_context = if mentioned.is_empty() {
        NO_GAME_MENTIONED.to_string()
    } else {
        mentioned
            .iter()
            .map(knowledge_line)
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        "\n{}\n---\n**CURRENT USER CONTEXT**:\n{}\n\n**USER QUESTION**:\n{}\n\n**AI RESPONSE**:\n",
        SYSTEM_PROMPT.replace("{game_context}", &game_context),
        context,
        message
    )
}

/// Answers a chat message, grounded in any catalog games the message names
pub async fn reply(
    index: &GameTitleIndex,
    generator: &dyn TextGenerator,
    message: &str,
    context: &str,
) -> AppResult<String> {
    if message.trim().is_empty() {
        return Err(AppError::InvalidInput("Message required".to_string()));
    }

    let mentioned = index.mentioned_in(message).await;

    tracing::info!(
        context = %context,
        mentioned = mentioned.len(),
        "Processing chat message"
    );

    let prompt = build_prompt(&mentioned, context, message);
    generator.generate(&prompt).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::providers::MockTextGenerator;

    fn witcher() -> Game {
        Game {
            game_id: 15,
            title: "The Witcher 3".to_string(),
            description: Some("x".repeat(150)),
            developer: Some("CD Projekt Red".to_string()),
            publisher: None,
            cover_image_url: None,
        }
    }

    #[test]
    fn test_knowledge_line_truncates_description() {
        let line = knowledge_line(&witcher());
        assert_eq!(
            line,
            format!("- The Witcher 3 (ID 15): {}... by CD Projekt Red", "x".repeat(100))
        );
    }

    #[test]
    fn test_prompt_without_mentions_uses_general_knowledge() {
        let prompt = build_prompt(&[], "Page: /games", "any good RPGs?");
        assert!(prompt.contains(NO_GAME_MENTIONED));
        assert!(prompt.contains("**USER QUESTION**:\nany good RPGs?"));
        assert!(prompt.contains("**CURRENT USER CONTEXT**:\nPage: /games"));
        assert!(!prompt.contains("{game_context}"));
    }

    #[tokio::test]
    async fn test_reply_grounds_prompt_in_mentioned_games() {
        let index = GameTitleIndex::from_games(vec![witcher()]);
        let mut generator = MockTextGenerator::new();
        generator
            .expect_generate()
            .withf(|prompt| prompt.contains("The Witcher 3 (ID 15)"))
            .times(1)
            .returning(|_| Ok("[BUTTON: Visit Velen](/games/15)".to_string()));

        let answer = reply(&index, &generator, "tell me about the witcher 3", "Unknown Page")
            .await
            .unwrap();
        assert_eq!(answer, "[BUTTON: Visit Velen](/games/15)");
    }

    #[tokio::test]
    async fn test_empty_message_rejected() {
        let index = GameTitleIndex::new();
        let generator = MockTextGenerator::new();
        let result = reply(&index, &generator, "   ", "Unknown Page").await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }
}
