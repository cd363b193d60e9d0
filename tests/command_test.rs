//! Command dispatch through the router
//! Run with: cargo test --test command_test

mod common;

use common::*;
use ginkgo_bot::application::services::command_service::HELP_MESSAGE;
use ginkgo_bot::domain::entities::BotVariant;
use ginkgo_bot::domain::traits::HistoryStore;

#[tokio::test]
async fn test_help_replies_with_help_text() {
    let h = HarnessBuilder::new(BotVariant::Default).build();

    h.router.on_message(&private_text("/cmd help")).await.unwrap();

    assert_eq!(h.transport.texts_to(&alice_target()), vec![HELP_MESSAGE.to_string()]);
    assert!(h.completion.calls().is_empty());
}

#[tokio::test]
async fn test_help_in_group_goes_to_room_without_mention() {
    let h = HarnessBuilder::new(BotVariant::Default).build();

    h.router.on_message(&group_text("/cmd help")).await.unwrap();

    assert_eq!(h.transport.texts_to(&room_target()), vec![HELP_MESSAGE.to_string()]);
}

#[tokio::test]
async fn test_prompt_sets_override_for_sender() {
    let h = HarnessBuilder::new(BotVariant::Default).build();

    h.router.on_message(&private_text("/cmd prompt talk like a pirate")).await.unwrap();

    assert_eq!(h.store.prompt("alice").await.as_deref(), Some("talk like a pirate"));
    assert!(h.transport.sent().is_empty());
}

#[tokio::test]
async fn test_empty_prompt_is_rejected_quietly() {
    let h = HarnessBuilder::new(BotVariant::Default).build();
    h.store.set_prompt("alice", "keep me").await;

    h.router.on_message(&private_text("/cmd prompt")).await.unwrap();
    h.router.on_message(&private_text("/cmd prompt    ")).await.unwrap();

    assert_eq!(h.store.prompt("alice").await.as_deref(), Some("keep me"));
    assert!(h.transport.sent().is_empty());
}

#[tokio::test]
async fn test_clear_keeps_prompt_override() {
    let h = HarnessBuilder::new(BotVariant::Default).build();
    h.store.set_prompt("alice", "be brief").await;
    h.store.append_user_message("alice", "hi").await;
    h.store.append_assistant_message("alice", "hello").await;

    h.router.on_message(&private_text("/cmd clear")).await.unwrap();

    assert!(h.store.history("alice").await.is_empty());
    assert_eq!(h.store.prompt("alice").await.as_deref(), Some("be brief"));
}

#[tokio::test]
async fn test_unknown_command_is_ignored() {
    let h = HarnessBuilder::new(BotVariant::Default).build();

    h.router.on_message(&private_text("/cmd dance now")).await.unwrap();

    assert!(h.transport.sent().is_empty());
    assert!(h.completion.calls().is_empty());
}

#[tokio::test]
async fn test_command_names_are_case_sensitive() {
    let h = HarnessBuilder::new(BotVariant::Default).build();

    h.router.on_message(&private_text("/cmd HELP")).await.unwrap();

    assert!(h.transport.sent().is_empty());
}

#[tokio::test]
async fn test_bootstrap_needs_trailing_space() {
    let h = HarnessBuilder::new(BotVariant::Default).build();

    h.router.on_message(&private_text("/cmdhelp")).await.unwrap();

    // not a command, so it is an ordinary private turn
    assert_eq!(h.completion.calls().len(), 1);
}

#[test]
fn test_default_commands_registered() {
    let h = HarnessBuilder::new(BotVariant::CustomerService).build();
    let mut names: Vec<&str> = h.router.commands().commands().map(|c| c.name.as_str()).collect();
    names.sort();
    assert_eq!(names, vec!["clear", "help", "prompt"]);
}
