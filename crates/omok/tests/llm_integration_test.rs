//! Integration tests against live LLM providers. Run with `--features api`.

use omok::{
    BoardSnapshot, LlmClient, LlmOracle, ModelSelection, MoveOracle, OmokConfig, Position,
};
use omok_rules::Game;
use tracing::instrument;

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
#[instrument]
async fn test_openai_connectivity() {
    dotenvy::dotenv().ok();

    let config = OmokConfig::default()
        .create_llm_config(ModelSelection::Gpt4oMini)
        .expect("OPENAI_API_KEY not set");
    let client = LlmClient::new(config);

    let response = client
        .generate(
            "Reply with a JSON object.",
            r#"Return exactly {"row": 1, "col": 2}"#,
        )
        .await
        .expect("Failed to generate");

    assert!(!response.is_empty(), "Response should not be empty");
    eprintln!("Response: {}", response);
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
#[instrument]
async fn test_gemini_connectivity() {
    dotenvy::dotenv().ok();

    let config = OmokConfig::default()
        .create_llm_config(ModelSelection::Gemini20Flash)
        .expect("GEMINI_API_KEY not set");
    let client = LlmClient::new(config);

    let response = client
        .generate(
            "Reply with a JSON object.",
            r#"Return exactly {"row": 1, "col": 2}"#,
        )
        .await
        .expect("Failed to generate");

    assert!(!response.is_empty(), "Response should not be empty");
    eprintln!("Response: {}", response);
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
#[instrument]
async fn test_oracle_proposes_on_board_move() {
    dotenvy::dotenv().ok();

    let mut game = Game::new(15);
    game.place_stone(Position::new(7, 7), true).unwrap();
    let snapshot = BoardSnapshot::from_state(game.state());

    let oracle = LlmOracle::new(OmokConfig::default());
    let pos = oracle
        .propose_move(snapshot, ModelSelection::Gpt4oMini)
        .await
        .expect("Oracle failed");

    assert!(pos.row < 15 && pos.col < 15);
    eprintln!("Oracle proposed {}", pos);
}
